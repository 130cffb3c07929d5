/// Financial statement sections, and the ticker symbols they are requested for.
pub mod section;

/// Cache file paths and the on-disk writes behind them.
pub mod fs;

/// The stockrow spreadsheet [`Spider`](fetch::Spider); a single GET per section, gated by the
/// local cache.
pub mod fetch;

/// Spreadsheet parsing into [`Table`](sheet::Table)s.
pub mod sheet;

pub use fetch::{CachedFile, FetchError, Origin, Spider};
pub use section::{Section, Symbol, SymbolError};
pub use sheet::{Cell, ParseError, Table};

/// Shortcut for required API elements.
pub(crate) mod http {
    pub(crate) use reqwest::Client as HttpClient;
}

/// Default remote host serving the financials spreadsheets.
pub const DEFAULT_HOST: &str = "https://stockrow.com";

/// Default directory holding the cached spreadsheets.
pub const DEFAULT_DATA_DIR: &str = "data";

/// Build the standard [`reqwest::Client`] used across the spider.
///
/// No timeout is set; a request waits for as long as the remote takes.
pub fn std_client_build() -> reqwest::Result<http::HttpClient> {
    reqwest::ClientBuilder::new()
        .user_agent(concat!("fundash/", env!("CARGO_PKG_VERSION")))
        .build()
}

/// Formats the time elapsed since `time`, for trailing debug messages.
pub(crate) fn time_elapsed(time: std::time::Instant) -> String {
    format!("time elapsed: {:?}", time.elapsed())
}
