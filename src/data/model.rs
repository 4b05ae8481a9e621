use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Sample / Series – the parsed input
// ---------------------------------------------------------------------------

/// One valid input row: its position among the valid rows and its value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub index: usize,
    pub value: f64,
}

/// Valid rows in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Series {
    samples: Vec<Sample>,
    /// Date string of each sample, same length as `samples`.
    dates: Vec<String>,
}

#[cfg(test)]
impl Series {
    /// Build a series from pre-indexed samples.  Ordering is checked later,
    /// when the series is fitted.
    pub fn from_samples(samples: Vec<Sample>) -> Self {
        let dates = vec![String::new(); samples.len()];
        Series { samples, dates }
    }

    /// Build a series from plain values, indexed `0..n`.
    pub fn from_values(values: &[f64]) -> Self {
        let samples = values
            .iter()
            .enumerate()
            .map(|(index, &value)| Sample { index, value })
            .collect();
        Self::from_samples(samples)
    }
}

impl Series {
    /// Append a value at the next index.
    pub fn push(&mut self, date: String, value: f64) {
        let index = self.samples.len();
        self.samples.push(Sample { index, value });
        self.dates.push(date);
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn dates(&self) -> &[String] {
        &self.dates
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the series is empty.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Sample indices as `f64`, the x axis of the fit.
    pub fn xs(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.index as f64).collect()
    }

    pub fn ys(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.value).collect()
    }
}

// ---------------------------------------------------------------------------
// ResampledPoint – one row of the output grid
// ---------------------------------------------------------------------------

/// A point on an output grid.  `position` is a plain counter; `x` is where
/// the curve was evaluated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResampledPoint {
    pub position: usize,
    pub x: f64,
    pub value: f64,
}

// ---------------------------------------------------------------------------
// LevelDescriptor – the JSON metadata record
// ---------------------------------------------------------------------------

/// Metadata record for a generated level.  Field order is the key order of
/// the written JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelDescriptor {
    pub name: String,
    pub ticker: String,
    pub chart_file: String,
    pub number: i64,
    /// Always `false` when created here; the game flips it.
    pub finished: bool,
    /// Always `0` when created here.
    pub score: i64,
}

impl LevelDescriptor {
    pub fn new(name: &str, ticker: &str, chart_file: &str, number: i64) -> Self {
        LevelDescriptor {
            name: name.to_string(),
            ticker: ticker.to_string(),
            chart_file: chart_file.to_string(),
            number,
            finished: false,
            score: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_assigns_contiguous_indices() {
        let mut series = Series::default();
        series.push("d1".into(), 4.0);
        series.push("d2".into(), 5.5);
        assert_eq!(
            series.samples(),
            &[
                Sample { index: 0, value: 4.0 },
                Sample { index: 1, value: 5.5 }
            ]
        );
        assert_eq!(series.dates(), &["d1".to_string(), "d2".to_string()]);
    }

    #[test]
    fn descriptor_serializes_camel_case_in_order() {
        let d = LevelDescriptor::new("Apple", "AAPL", "chart_AAPL.csv", 3);
        let json = serde_json::to_string(&d).unwrap();
        assert_eq!(
            json,
            r#"{"name":"Apple","ticker":"AAPL","chartFile":"chart_AAPL.csv","number":3,"finished":false,"score":0}"#
        );
    }
}
