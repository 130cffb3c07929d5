use crate::markup::Fragment;
use crate::render::render;
use fundash_spider::{sheet, FetchError, Origin, ParseError, Section, Spider, Symbol, SymbolError, Table};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, trace};

/// One press of the Analyze button.
///
/// `n_clicks` stays unset until the button is pressed for the first time.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Trigger {
    pub n_clicks: Option<u32>,
    pub symbol: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Símbolo inválido: {0}")]
    InvalidSymbol(String),

    #[error("Error al descargar el archivo {}.", .section.file_label_es())]
    Fetch {
        section: Section,
        #[source]
        source: FetchError,
    },

    #[error("Error al leer el archivo {}.", .section.file_label_es())]
    Parse {
        section: Section,
        #[source]
        source: ParseError,
    },
}

/// Terminal state of one trigger.
#[derive(Debug)]
pub enum Outcome {
    /// Nothing to do yet; the output region stays empty.
    Idle,
    Failed(PipelineError),
    Displayed(Fragment),
}

impl Outcome {
    pub fn into_fragment(self) -> Fragment {
        match self {
            Outcome::Idle => Fragment::empty(),
            Outcome::Failed(err) => Fragment::message(err.to_string()),
            Outcome::Displayed(fragment) => fragment,
        }
    }
}

/// Runs a trigger end to end: resolve, parse, render.
pub async fn run(spider: &Spider, trigger: &Trigger) -> Outcome {
    if trigger.n_clicks.is_none() {
        trace!("no trigger yet");
        return Outcome::Idle;
    }

    let symbol = match Symbol::new(trigger.symbol.as_deref().unwrap_or_default()) {
        Ok(symbol) => symbol,
        Err(SymbolError::Empty) => {
            trace!("trigger without a symbol");
            return Outcome::Idle;
        }
        Err(SymbolError::Invalid(raw)) => {
            error!("refusing symbol {raw:?}");
            return Outcome::Failed(PipelineError::InvalidSymbol(raw));
        }
    };

    match analyze(spider, &symbol).await {
        Ok(fragment) => Outcome::Displayed(fragment),
        Err(err) => {
            match std::error::Error::source(&err) {
                Some(cause) => error!("analysis of [{symbol}] failed, error({err}), cause({cause})"),
                None => error!("analysis of [{symbol}] failed, error({err})"),
            }
            Outcome::Failed(err)
        }
    }
}

/// Bring the three spreadsheets of `symbol` onto disk, parse them and render the dashboard.
pub async fn analyze(spider: &Spider, symbol: &Symbol) -> Result<Fragment, PipelineError> {
    let time = std::time::Instant::now();

    // resolving
    let metrics = resolve(spider, symbol, Section::Metrics).await?;
    let income = resolve(spider, symbol, Section::IncomeStatement).await?;
    let balance = resolve(spider, symbol, Section::BalanceSheet).await?;

    // parsing
    let metrics = parse(Section::Metrics, &metrics)?;
    let balance = parse(Section::BalanceSheet, &balance)?;
    let income = parse(Section::IncomeStatement, &income)?;

    // rendering
    let fragment = render(&metrics, &balance, &income);
    info!("[{symbol}] analysed, time elapsed: {:?}", time.elapsed());
    Ok(fragment)
}

async fn resolve(
    spider: &Spider,
    symbol: &Symbol,
    section: Section,
) -> Result<PathBuf, PipelineError> {
    let file = spider
        .resolve(symbol, section)
        .await
        .map_err(|source| PipelineError::Fetch { section, source })?;
    match file.origin {
        Origin::Cache => debug!("{section} for [{symbol}] read from cache"),
        Origin::Remote => debug!("{section} for [{symbol}] downloaded"),
    }
    Ok(file.path)
}

fn parse(section: Section, path: &Path) -> Result<Table, PipelineError> {
    sheet::parse(path).map_err(|source| PipelineError::Parse { section, source })
}
