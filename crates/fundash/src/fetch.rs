use colored::Colorize;
use fundash_spider::{Origin, Section, Spider, Symbol};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use tracing::{debug, error, info};

/// Bring the spreadsheets of `symbol` onto disk through the cache gate.
///
/// Every requested section is attempted; the run fails if any of them could not be fetched.
pub(crate) async fn run(
    spider: &Spider,
    symbol: &str,
    sections: Vec<Section>,
    tui: bool,
) -> anyhow::Result<()> {
    let symbol = Symbol::new(symbol)?;
    let time = std::time::Instant::now();

    let mut failures = 0;
    for section in sections {
        let pb = spinner(tui, format!("{section} [{symbol}] ..."))?;

        match spider.resolve(&symbol, section).await {
            Ok(file) => {
                let status = match file.origin {
                    Origin::Cache => "cached".yellow(),
                    Origin::Remote => "fetched".green(),
                };
                debug!(
                    "{section} for [{symbol}] resolved from {:?} at {:?}",
                    file.origin, file.path
                );
                pb.finish_and_clear();
                if tui {
                    println!("{:<18} {status:<8} {}", section.param(), file.path.display());
                }
            }
            Err(err) => {
                failures += 1;
                error!("failed to resolve {section} for [{symbol}], error({err})");
                pb.finish_and_clear();
                if tui {
                    println!("{:<18} {:<8} {err}", section.param(), "failed".red());
                }
            }
        }
    }

    info!("[{symbol}] fetch finished, time elapsed: {:?}", time.elapsed());

    if failures > 0 {
        anyhow::bail!("{failures} section(s) could not be fetched for [{symbol}]");
    }
    Ok(())
}

fn spinner(tui: bool, msg: String) -> anyhow::Result<ProgressBar> {
    if !tui {
        return Ok(ProgressBar::hidden());
    }

    let pb = ProgressBar::new_spinner().with_style(
        ProgressStyle::default_spinner().template("{spinner:.magenta} {msg} [{elapsed_precise}]")?,
    );
    pb.set_message(msg);
    pb.enable_steady_tick(Duration::from_millis(100));
    Ok(pb)
}
