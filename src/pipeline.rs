use std::path::PathBuf;

use log::info;

use crate::config::LevelConfig;
use crate::curve::{self, FittedCurve, EXPORT_SUBDIVISIONS};
use crate::data::loader;
use crate::data::model::{LevelDescriptor, ResampledPoint, Series};
use crate::error::LevelError;
use crate::export::{self, ChartRow};

// ---------------------------------------------------------------------------
// Pipeline: load → fit → resample → write
// ---------------------------------------------------------------------------

/// Everything computed before any file is written.
#[derive(Debug, Clone)]
pub struct PreparedLevel {
    pub series: Series,
    pub curve: FittedCurve,
    pub preview: Vec<ResampledPoint>,
    pub body: Vec<ResampledPoint>,
}

/// Paths and contents of what a run produced.
#[derive(Debug, Clone)]
pub struct LevelOutput {
    pub chart_path: PathBuf,
    pub descriptor_path: PathBuf,
    pub descriptor: LevelDescriptor,
    pub descriptor_json: String,
    pub rows: Vec<ChartRow>,
}

/// Run the whole pipeline.
pub fn run(config: &LevelConfig) -> Result<LevelOutput, LevelError> {
    prepare(config)?.write(config)
}

/// Load the source, fit it, and compute both resamples.
pub fn prepare(config: &LevelConfig) -> Result<PreparedLevel, LevelError> {
    config.validate()?;

    let series = loader::load_file(&config.source_path)?;
    info!(
        "{}: {} samples from {}",
        config.ticker,
        series.len(),
        config.source_path.display()
    );
    if let (Some(first), Some(last)) = (series.dates().first(), series.dates().last()) {
        info!("date range {first} .. {last}");
    }

    let curve = curve::fit(&series, config.kind)?;
    let preview = curve::preview_resample(&curve)?;
    let body = curve::export_resample(&curve, EXPORT_SUBDIVISIONS)?;
    info!(
        "{} fit (order {}), {} preview points, {} export points",
        curve.kind(),
        curve.order(),
        preview.len(),
        body.len()
    );

    Ok(PreparedLevel {
        series,
        curve,
        preview,
        body,
    })
}

impl PreparedLevel {
    /// Write the chart CSV, then the descriptor JSON.  A failure in the
    /// second step leaves the first file in place.
    pub fn write(&self, config: &LevelConfig) -> Result<LevelOutput, LevelError> {
        let lead = self.curve.evaluate(self.curve.min_x())?;
        let rows = export::chart_rows(lead, &self.preview, &self.body, config.pad_policy);

        let chart_path = config.chart_path();
        export::write_chart(&chart_path, &rows)?;
        info!("wrote {} rows to {}", rows.len(), chart_path.display());

        let descriptor = LevelDescriptor::new(
            &config.display_name,
            &config.ticker,
            &config.chart_file_name(),
            config.level_number,
        );
        let descriptor_path = config.descriptor_path();
        let descriptor_json = export::write_descriptor(&descriptor_path, &descriptor)?;
        info!("wrote descriptor to {}", descriptor_path.display());

        Ok(LevelOutput {
            chart_path,
            descriptor_path,
            descriptor,
            descriptor_json,
            rows,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::PAD_ROWS;
    use std::path::Path;

    /// A fresh directory under the system temp dir.
    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "chart_level_pipeline_{}_{name}",
            std::process::id()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn write_source(dir: &Path, body: &str) -> PathBuf {
        let path = dir.join("history.csv");
        std::fs::write(&path, format!("Date,Open,High,Low,Close\n{body}")).unwrap();
        path
    }

    fn config_in(dir: &Path, source: PathBuf, ticker: &str) -> LevelConfig {
        let mut config = LevelConfig::new(source, "Test Stock", ticker, 5);
        config.output_dir = dir.to_path_buf();
        config
    }

    #[test]
    fn end_to_end_writes_both_artifacts() {
        let dir = scratch_dir("e2e");
        let source = write_source(
            &dir,
            "d1,,,,1.0\nd2,,,,\"N/A\"\nd3,,,,2.0\nd4,,,,3.0\nd5,,,,\"4.0\"\nd6,,,,2.5\n",
        );
        let config = config_in(&dir, source, "TEST");
        let out = run(&config).unwrap();

        // 5 valid samples → 40 body rows.
        let expected_rows = PAD_ROWS + 40 + PAD_ROWS;
        let text = std::fs::read_to_string(&out.chart_path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), expected_rows);
        assert_eq!(out.rows.len(), expected_rows);
        assert_eq!(out.rows[expected_rows - 1].position, expected_rows - 1);
        for (i, line) in lines.iter().enumerate() {
            let (pos, value) = line.split_once(',').unwrap();
            assert_eq!(pos.parse::<usize>().unwrap(), i);
            assert!(value.parse::<f64>().unwrap().is_finite());
        }
        assert_eq!(lines[0], "0,1.0");
        assert_eq!(lines[expected_rows - 1], format!("{},2.5", expected_rows - 1));

        let json = std::fs::read_to_string(&out.descriptor_path).unwrap();
        let d: LevelDescriptor = serde_json::from_str(&json).unwrap();
        assert_eq!(d.chart_file, "chart_TEST.csv");
        assert_eq!(d.number, 5);
        assert!(!d.finished);
        assert_eq!(d.score, 0);
        assert_eq!(out.chart_path, dir.join("chart_TEST.csv"));
        assert_eq!(out.descriptor_path, dir.join("TEST.json"));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn single_valid_row_fails_before_any_output() {
        let dir = scratch_dir("one_row");
        let source = write_source(&dir, "d1,,,,1.0\nd2,,,,oops\n");
        let config = config_in(&dir, source, "ONE");

        let err = run(&config).unwrap_err();
        assert!(matches!(err, LevelError::Fit(_)));
        assert!(!config.chart_path().exists());
        assert!(!config.descriptor_path().exists());

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn missing_source_is_input_access() {
        let dir = scratch_dir("missing");
        let config = config_in(&dir, dir.join("nope.csv"), "MISS");
        assert!(matches!(
            run(&config).unwrap_err(),
            LevelError::InputAccess { .. }
        ));
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn path_unsafe_ticker_writes_nothing() {
        let dir = scratch_dir("unsafe");
        let source = write_source(&dir, "d1,,,,1.0\nd2,,,,2.0\n");
        let config = config_in(&dir, source, "../escape");
        assert!(matches!(
            run(&config).unwrap_err(),
            LevelError::InvalidTicker(_)
        ));
        assert!(!dir.parent().unwrap().join("escape.json").exists());
        std::fs::remove_dir_all(&dir).ok();
    }
}
