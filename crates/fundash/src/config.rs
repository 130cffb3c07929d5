use crate::cli::Source;
use dotenv::var;
use fundash_spider::{std_client_build, Spider, DEFAULT_DATA_DIR, DEFAULT_HOST};
use std::path::PathBuf;
use tracing::trace;

pub(crate) const DEFAULT_ADDR: &str = "127.0.0.1:8050";

/// Runtime settings; command line flags win over `.env`/environment values, which win over
/// the defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Config {
    pub addr: String,
    pub host: String,
    pub data_dir: PathBuf,
}

impl Config {
    pub(crate) fn resolve(addr: Option<String>, source: Source) -> Self {
        let config = Self {
            addr: addr
                .or_else(|| var("FUNDASH_ADDR").ok())
                .unwrap_or_else(|| DEFAULT_ADDR.to_string()),
            host: source
                .host
                .or_else(|| var("FUNDASH_HOST").ok())
                .unwrap_or_else(|| DEFAULT_HOST.to_string()),
            data_dir: source
                .data_dir
                .or_else(|| var("FUNDASH_DATA_DIR").ok().map(PathBuf::from))
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR)),
        };
        trace!("configuration resolved: {config:?}");
        config
    }

    pub(crate) fn spider(&self) -> anyhow::Result<Spider> {
        Ok(Spider::new(
            std_client_build()?,
            self.host.clone(),
            self.data_dir.clone(),
        ))
    }
}
