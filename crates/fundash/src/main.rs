mod cli;
mod config;
mod fetch;

// remote imports
use clap::Parser;
use cli::{Cli, TraceLevel};
use config::Config;
use fundash_spider::Section;
use tracing::{trace, Level};
use tracing_subscriber::FmtSubscriber;

////////////////////////////////////////////////////////////////////////////

// preproccess the trace level, and open the .env file
fn preprocess(trace_level: Option<Level>) -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    if let Some(trace_level) = trace_level {
        FmtSubscriber::builder()
            .with_max_level(trace_level)
            .try_init()
            .map_err(|err| anyhow::anyhow!(err))?;
    }
    Ok(())
}

////////////////////////////////////////////////////////////////////////////

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // set the trace level
    preprocess(cli.trace.map(|trace_level| match trace_level {
        TraceLevel::DEBUG => Level::DEBUG,
        TraceLevel::ERROR => Level::ERROR,
        TraceLevel::INFO => Level::INFO,
        TraceLevel::TRACE => Level::TRACE,
        TraceLevel::WARN => Level::WARN,
    }))?;
    trace!("command line input recorded: {cli:?}");

    // if no trace level provided, use tui
    let tui = cli.trace.is_none();

    // read cli inputs
    use cli::Commands::*;
    match cli.command {
        // `fundash serve`: run the dashboard
        Serve { addr, source } => {
            let config = Config::resolve(addr, source);
            let dashboard = fundash_webapp::Dashboard::new(config.spider()?)?;
            if tui {
                println!("serving dashboard on http://{}", config.addr);
            }
            fundash_webapp::serve(dashboard, &config.addr).await?;
        }

        // `fundash fetch <SYMBOL> <Option<Vec<Section>>>`: warm the cache
        Fetch {
            symbol,
            sections,
            source,
        } => {
            let config = Config::resolve(None, source);
            let sections = match sections {
                Some(sections) => sections.into_iter().map(Section::from).collect(),
                None => Section::RESOLVE_ORDER.to_vec(),
            };
            fetch::run(&config.spider()?, &symbol, sections, tui).await?;
        }
    }

    Ok(())
}
