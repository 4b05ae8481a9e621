use std::io::{BufRead, Write};
use std::path::PathBuf;

use clap::Parser;

use crate::curve::InterpKind;
use crate::error::LevelError;
use crate::export::PadPolicy;

// ---------------------------------------------------------------------------
// Command line
// ---------------------------------------------------------------------------

/// Build a game level track from a price history CSV.
///
/// Any of --source, --name, --ticker or --number left out is asked for on
/// stdin.
#[derive(Parser, Debug, Clone)]
#[command(version, about)]
pub struct Cli {
    /// Price history CSV (header row, close price in the 5th column).
    #[arg(long)]
    pub source: Option<PathBuf>,

    /// Display name of the level.
    #[arg(long)]
    pub name: Option<String>,

    /// Ticker symbol; also the stem of both output files.
    #[arg(long)]
    pub ticker: Option<String>,

    /// Level number.
    #[arg(long)]
    pub number: Option<i64>,

    #[arg(long, value_enum, default_value_t = InterpKind::Cubic)]
    pub kind: InterpKind,

    #[arg(long, value_enum, default_value_t = PadPolicy::Reference)]
    pub pad_policy: PadPolicy,

    /// Directory the chart CSV and descriptor JSON are written to.
    #[arg(long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Show the fitted curve in a window before writing.
    #[arg(long, default_value_t = false)]
    pub preview: bool,
}

// ---------------------------------------------------------------------------
// LevelConfig – everything one run needs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct LevelConfig {
    pub source_path: PathBuf,
    pub display_name: String,
    pub ticker: String,
    pub level_number: i64,
    pub kind: InterpKind,
    pub pad_policy: PadPolicy,
    pub output_dir: PathBuf,
    pub preview: bool,
}

impl LevelConfig {
    /// A config with default kind, padding and output directory.
    pub fn new(
        source_path: impl Into<PathBuf>,
        display_name: &str,
        ticker: &str,
        level_number: i64,
    ) -> Self {
        LevelConfig {
            source_path: source_path.into(),
            display_name: display_name.to_string(),
            ticker: ticker.to_string(),
            level_number,
            kind: InterpKind::default(),
            pad_policy: PadPolicy::default(),
            output_dir: PathBuf::from("."),
            preview: false,
        }
    }

    /// Merge command-line values with answers to prompts for whatever is
    /// missing.
    pub fn from_cli<R: BufRead, W: Write>(
        cli: Cli,
        input: &mut R,
        output: &mut W,
    ) -> Result<Self, LevelError> {
        let source_path = match cli.source {
            Some(path) => path,
            None => PathBuf::from(prompt("input csv: ", input, output)?),
        };
        let display_name = match cli.name {
            Some(name) => name,
            None => prompt("stock name: ", input, output)?,
        };
        let ticker = match cli.ticker {
            Some(ticker) => ticker,
            None => prompt("stock ticker: ", input, output)?,
        };
        let level_number = match cli.number {
            Some(n) => n,
            None => {
                let raw = prompt("level number: ", input, output)?;
                raw.trim().parse().map_err(|_| {
                    LevelError::InvalidConfig(format!("level number {raw:?} is not an integer"))
                })?
            }
        };

        let mut config = LevelConfig::new(source_path, &display_name, &ticker, level_number);
        config.kind = cli.kind;
        config.pad_policy = cli.pad_policy;
        config.output_dir = cli.output_dir;
        config.preview = cli.preview;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), LevelError> {
        validate_ticker(&self.ticker)
    }

    /// `chart_<ticker>.csv`, the name stored in the descriptor.
    pub fn chart_file_name(&self) -> String {
        format!("chart_{}.csv", self.ticker)
    }

    pub fn descriptor_file_name(&self) -> String {
        format!("{}.json", self.ticker)
    }

    pub fn chart_path(&self) -> PathBuf {
        self.output_dir.join(self.chart_file_name())
    }

    pub fn descriptor_path(&self) -> PathBuf {
        self.output_dir.join(self.descriptor_file_name())
    }
}

/// Print `label`, read one line, strip the line ending.
fn prompt<R: BufRead, W: Write>(
    label: &str,
    input: &mut R,
    output: &mut W,
) -> Result<String, LevelError> {
    let io_err = |e: std::io::Error| LevelError::InvalidConfig(format!("reading {label:?}: {e}"));
    output.write_all(label.as_bytes()).map_err(io_err)?;
    output.flush().map_err(io_err)?;

    let mut line = String::new();
    let read = input.read_line(&mut line).map_err(io_err)?;
    if read == 0 {
        return Err(LevelError::InvalidConfig(format!(
            "no answer for {:?}",
            label.trim_end_matches([':', ' '])
        )));
    }
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

// ---------------------------------------------------------------------------
// Ticker validation
// ---------------------------------------------------------------------------

/// Tickers become file names, so only a conservative character set passes:
/// ASCII letters and digits plus `. - _ ^ =`, not empty, not all dots.
pub fn validate_ticker(ticker: &str) -> Result<(), LevelError> {
    let allowed = |c: char| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_' | '^' | '=');
    if ticker.is_empty() || ticker.chars().all(|c| c == '.') || !ticker.chars().all(allowed) {
        return Err(LevelError::InvalidTicker(ticker.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bare_cli() -> Cli {
        Cli::parse_from(["chart-level"])
    }

    #[test]
    fn common_tickers_are_accepted() {
        for t in ["AAPL", "BRK.B", "^GSPC", "BTC-USD", "EURUSD=X", "shop_1"] {
            assert!(validate_ticker(t).is_ok(), "{t}");
        }
    }

    #[test]
    fn path_unsafe_tickers_are_rejected() {
        for t in ["", ".", "..", "../etc", "a/b", "a\\b", "A B", "C:", "tick\0"] {
            assert!(
                matches!(validate_ticker(t), Err(LevelError::InvalidTicker(_))),
                "{t:?}"
            );
        }
    }

    #[test]
    fn missing_values_are_prompted_in_order() {
        let mut input = "prices.csv\nApple Inc\nAAPL\n7\n".as_bytes();
        let mut output = Vec::new();
        let config = LevelConfig::from_cli(bare_cli(), &mut input, &mut output).unwrap();

        assert_eq!(config.source_path, PathBuf::from("prices.csv"));
        assert_eq!(config.display_name, "Apple Inc");
        assert_eq!(config.ticker, "AAPL");
        assert_eq!(config.level_number, 7);
        assert_eq!(config.kind, InterpKind::Cubic);
        assert_eq!(
            String::from_utf8(output).unwrap(),
            "input csv: stock name: stock ticker: level number: "
        );
    }

    #[test]
    fn flags_skip_their_prompts() {
        let cli = Cli::parse_from([
            "chart-level",
            "--source",
            "a.csv",
            "--ticker",
            "MSFT",
            "--kind",
            "zero",
            "--pad-policy",
            "body-edges",
        ]);
        let mut input = "Microsoft\n3\n".as_bytes();
        let mut output = Vec::new();
        let config = LevelConfig::from_cli(cli, &mut input, &mut output).unwrap();
        assert_eq!(config.display_name, "Microsoft");
        assert_eq!(config.level_number, 3);
        assert_eq!(config.kind, InterpKind::ZeroOrderHold);
        assert_eq!(config.pad_policy, PadPolicy::BodyEdges);
        assert_eq!(config.chart_path(), PathBuf::from("./chart_MSFT.csv"));
        assert_eq!(config.descriptor_path(), PathBuf::from("./MSFT.json"));
    }

    #[test]
    fn bad_level_number_and_ticker_are_config_errors() {
        let mut input = "a.csv\nName\nTICK\nseven\n".as_bytes();
        let err = LevelConfig::from_cli(bare_cli(), &mut input, &mut Vec::new()).unwrap_err();
        assert!(matches!(err, LevelError::InvalidConfig(_)));

        let mut input = "a.csv\nName\n../x\n1\n".as_bytes();
        let err = LevelConfig::from_cli(bare_cli(), &mut input, &mut Vec::new()).unwrap_err();
        assert!(matches!(err, LevelError::InvalidTicker(_)));
    }

    #[test]
    fn closed_stdin_is_a_config_error() {
        let mut input = "a.csv\n".as_bytes();
        let err = LevelConfig::from_cli(bare_cli(), &mut input, &mut Vec::new()).unwrap_err();
        assert!(matches!(err, LevelError::InvalidConfig(_)));
    }
}
