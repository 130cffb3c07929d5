use crate::fs::{cache_path, exists, write_file};
use crate::http::*;
use crate::section::{Section, Symbol};
use std::path::{Path, PathBuf};
use tracing::{debug, error, trace};

/// Why a section could not be brought onto disk.
///
/// Callers treat every variant the same way; the detail is there for the logs.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("unexpected status {0}")]
    Status(reqwest::StatusCode),

    #[error("failed to write cache file: {0}")]
    Write(#[from] std::io::Error),
}

/// Where a resolved file came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Origin {
    /// Already on disk; no request was made.
    Cache,
    /// Downloaded by this call.
    Remote,
}

/// A spreadsheet present on disk for one (symbol, section) pair.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CachedFile {
    pub path: PathBuf,
    pub origin: Origin,
}

/// Downloads the financials spreadsheets of a company and keeps them under `data_dir`.
#[derive(Clone, Debug)]
pub struct Spider {
    client: HttpClient,
    host: String,
    data_dir: PathBuf,
}

impl Spider {
    pub fn new(client: HttpClient, host: impl Into<String>, data_dir: impl Into<PathBuf>) -> Self {
        Self {
            client,
            host: host.into().trim_end_matches('/').to_string(),
            data_dir: data_dir.into(),
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Cache location of `section` for `symbol`.
    pub fn path(&self, symbol: &Symbol, section: Section) -> PathBuf {
        cache_path(&self.data_dir, symbol, section)
    }

    /// Spreadsheet URL, without its query string.
    pub fn url(&self, symbol: &Symbol) -> String {
        format!(
            "{host}/api/companies/{symbol}/financials.xlsx",
            host = self.host
        )
    }

    /// GET the spreadsheet for `section` and write it to the cache path.
    ///
    /// A single attempt: anything but `200 OK` is a failure.
    pub async fn fetch(&self, symbol: &Symbol, section: Section) -> Result<PathBuf, FetchError> {
        let time = std::time::Instant::now();
        let url = self.url(symbol);

        debug!("fetching {section} for [{symbol}]");
        let response = self
            .client
            .get(&url)
            .query(&[
                ("dimension", "A"),
                ("section", section.param()),
                ("sort", "asc"),
            ])
            .send()
            .await
            .map_err(|err| {
                error!("failed to fetch {section} for [{symbol}], error({err})");
                err
            })?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            error!("failed to fetch {section} for [{symbol}], status({status})");
            return Err(FetchError::Status(status));
        }

        let body = response.bytes().await.map_err(|err| {
            error!("failed to read {section} body for [{symbol}], error({err})");
            err
        })?;

        let path = self.path(symbol, section);
        write_file(&path, &body).await.map_err(|err| {
            error!("failed to write {:?}, error({err})", path);
            err
        })?;

        debug!(
            "{section} for [{symbol}] written to {:?}. {}",
            path,
            crate::time_elapsed(time)
        );
        Ok(path)
    }

    /// The cache gate: reuse the file when one exists at the cache path, fetch otherwise.
    ///
    /// Existence is the only check; the file's content is never inspected.
    pub async fn resolve(&self, symbol: &Symbol, section: Section) -> Result<CachedFile, FetchError> {
        let path = self.path(symbol, section);
        if exists(&path).await {
            trace!("cache hit for {section} of [{symbol}] at {:?}", path);
            return Ok(CachedFile {
                path,
                origin: Origin::Cache,
            });
        }

        trace!("cache miss for {section} of [{symbol}]");
        let path = self.fetch(symbol, section).await?;
        Ok(CachedFile {
            path,
            origin: Origin::Remote,
        })
    }
}
