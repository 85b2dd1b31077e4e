//! # kosmo_corpus
//!
//! Collects blog articles from [kosmonautix.cz](https://kosmonautix.cz) into
//! a labeled JSON corpus and trains an author classifier on the scraped text.
//!
//! ## Components
//!
//! - **Scraper** (`scrape` subcommand): walks the paginated article listing,
//!   follows each article link, extracts title, author, date, and body
//!   paragraphs, and writes the records as a JSON array. Requests are issued
//!   sequentially with a fixed sleep between them.
//! - **Trainer** (`train` subcommand): loads a corpus, splits it into train
//!   and test sets, vectorizes the text with tf-idf, fits a nearest-centroid
//!   classifier per author, and logs held-out accuracy.
//!
//! ## Usage
//!
//! ```sh
//! kosmo_corpus scrape -n 1000 -o data/corpus.json -s 2
//! kosmo_corpus train -c data/corpus.json
//! ```

use clap::Parser;
use std::error::Error;
use tracing::{debug, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod corpus;
mod models;
mod scrapers;
mod train;
mod utils;

use cli::{Cli, Command, ProbeArgs, ScrapeArgs};
use scrapers::kosmonautix::Scraper;
use utils::ensure_writable_parent;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("kosmo_corpus starting up");

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    match &args.command {
        Command::Scrape(scrape_args) => scrape(scrape_args).await?,
        Command::Probe(probe_args) => probe(probe_args).await?,
        Command::Train(train_args) => train::run(train_args).await?,
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );

    Ok(())
}

/// Run the scrape pipeline: index listing pages, fetch articles, write JSON.
#[instrument(level = "info", skip_all, fields(article_count = scrape_args.article_count))]
async fn scrape(scrape_args: &ScrapeArgs) -> Result<(), Box<dyn Error>> {
    if scrape_args.output.as_os_str().is_empty() {
        return Err("output path must not be empty".into());
    }
    // Early check: fail before scraping, not after.
    ensure_writable_parent(&scrape_args.output).await?;

    let scraper = Scraper::new(
        &scrape_args.user_agent,
        scrape_args.sleep,
        scrape_args.start_page,
    )?;

    let urls = scraper.index_articles(scrape_args.article_count as usize).await;
    let articles = scraper.fetch_articles(&urls).await;
    info!(
        indexed = urls.len(),
        fetched = articles.len(),
        "Scrape finished"
    );

    corpus::write_corpus(&articles, &scrape_args.output).await?;
    Ok(())
}

/// Fetch one article and print the extracted record as pretty JSON.
#[instrument(level = "info", skip_all, fields(url = %probe_args.url))]
async fn probe(probe_args: &ProbeArgs) -> Result<(), Box<dyn Error>> {
    let scraper = Scraper::new(&probe_args.user_agent, 0, 1)?;
    match scraper.scrape_article(&probe_args.url).await {
        Some(article) => {
            println!("{}", serde_json::to_string_pretty(&article)?);
            Ok(())
        }
        None => Err(format!("could not scrape article from {}", probe_args.url).into()),
    }
}
