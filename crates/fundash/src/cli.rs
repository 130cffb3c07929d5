use clap::{Args, Parser, Subcommand, ValueEnum};
use fundash_spider::Section;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Sets the level of tracing.
    #[arg(short, long, global = true)]
    pub trace: Option<TraceLevel>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve the financial analysis dashboard.
    Serve {
        /// Address to bind, e.g. `127.0.0.1:8050` [env: FUNDASH_ADDR].
        #[arg(short, long)]
        addr: Option<String>,

        #[command(flatten)]
        source: Source,
    },

    /// Download the spreadsheets of a symbol into the data directory, skipping cached ones.
    Fetch {
        /// Ticker symbol, e.g. `AAPL`.
        symbol: String,

        /// Sections to fetch.
        ///
        /// If no sections are provided, all three are fetched.
        #[arg(short, long)]
        sections: Option<Vec<SectionArg>>,

        #[command(flatten)]
        source: Source,
    },
}

/// Where spreadsheets come from, and where they are kept.
#[derive(Args, Debug)]
pub struct Source {
    /// Remote API host [env: FUNDASH_HOST].
    #[arg(long)]
    pub host: Option<String>,

    /// Cache directory for downloaded spreadsheets [env: FUNDASH_DATA_DIR].
    #[arg(short, long)]
    pub data_dir: Option<PathBuf>,
}

#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
#[clap(rename_all = "UPPERCASE")]
pub enum TraceLevel {
    DEBUG,
    ERROR,
    INFO,
    TRACE,
    WARN,
}

#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
pub enum SectionArg {
    /// Key metrics.
    Metrics,

    /// Balance sheet.
    BalanceSheet,

    /// Income statement.
    IncomeStatement,
}

impl From<SectionArg> for Section {
    fn from(arg: SectionArg) -> Self {
        match arg {
            SectionArg::Metrics => Section::Metrics,
            SectionArg::BalanceSheet => Section::BalanceSheet,
            SectionArg::IncomeStatement => Section::IncomeStatement,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_fetch_with_sections() {
        let cli = Cli::parse_from([
            "fundash",
            "--trace",
            "DEBUG",
            "fetch",
            "AAPL",
            "-s",
            "metrics",
            "-s",
            "income-statement",
            "--data-dir",
            "/tmp/fundash",
        ]);
        assert_eq!(cli.trace, Some(TraceLevel::DEBUG));
        match cli.command {
            Commands::Fetch {
                symbol,
                sections,
                source,
            } => {
                assert_eq!(symbol, "AAPL");
                assert_eq!(
                    sections,
                    Some(vec![SectionArg::Metrics, SectionArg::IncomeStatement])
                );
                assert_eq!(source.data_dir, Some(PathBuf::from("/tmp/fundash")));
                assert_eq!(source.host, None);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn parse_serve() {
        let cli = Cli::parse_from(["fundash", "serve", "--addr", "0.0.0.0:9000"]);
        assert_eq!(cli.trace, None);
        assert!(matches!(
            cli.command,
            Commands::Serve { addr: Some(ref addr), .. } if addr == "0.0.0.0:9000"
        ));
    }
}
