use anyhow::{bail, Context, Result};
use clap::Parser;
use serde::Serialize;
use std::path::PathBuf;

use feedkit::{
    Acquisition, Config, FeedCollector, FeedInfo, FeedItem, FeedParser, FinishStatus, ParseScope,
};

#[derive(Parser, Debug)]
#[command(name = "feedkit", about = "Parse an RSS or Atom feed and print it as JSON")]
struct Args {
    /// Feed URL (http, https or feed:)
    url: String,

    /// Which records to report
    #[arg(long, value_enum)]
    scope: Option<ParseScope>,

    /// Fetch on a background task instead of blocking
    #[arg(long = "async")]
    asynchronous: bool,

    /// TOML configuration file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

#[derive(Serialize)]
struct Report {
    status: Option<FinishStatus>,
    info: Option<FeedInfo>,
    items: Vec<FeedItem>,
}

fn main() -> Result<()> {
    // Logs go to stderr so stdout stays valid JSON
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("Failed to load config from '{}'", path.display()))?,
        None => Config::default(),
    };
    if let Some(scope) = args.scope {
        config.scope = scope;
    }
    if args.asynchronous {
        config.acquisition = Acquisition::Asynchronous;
    }

    let mut parser = FeedParser::new(config.clone());
    parser
        .set_url(&args.url)
        .with_context(|| format!("Invalid feed URL '{}'", args.url))?;
    parser.set_observer(FeedCollector::default());

    match config.acquisition {
        Acquisition::Synchronous => {
            parser.parse();
        }
        Acquisition::Asynchronous => {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .context("Failed to start async runtime")?;
            runtime.block_on(async {
                if parser.parse() {
                    parser.resume().await;
                }
            });
        }
    }

    let collector = parser
        .take_observer()
        .context("Feed observer missing after parse")?;
    if let Some(err) = collector.error {
        bail!(err);
    }

    let report = Report {
        status: collector.status,
        info: collector.info,
        items: collector.items,
    };
    let json = serde_json::to_string_pretty(&report).context("Failed to serialize feed")?;
    println!("{json}");
    Ok(())
}
