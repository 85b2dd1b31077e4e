//! Command-line interface definitions.
//!
//! The two components of the project are used independently, so they live
//! behind separate subcommands: `scrape` collects the corpus, `train` fits
//! and evaluates the author classifier on it.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const DEFAULT_USER_AGENT: &str = concat!(
    env!("CARGO_PKG_NAME"),
    "/",
    env!("CARGO_PKG_VERSION")
);

/// Command-line arguments.
///
/// # Examples
///
/// ```sh
/// # Scrape 500 articles, sleeping 2 seconds between requests
/// kosmo_corpus scrape -n 500 -o data/corpus.json -s 2
///
/// # Train the author classifier on the result
/// kosmo_corpus train -c data/corpus.json
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Scrape kosmonautix.cz articles into a JSON corpus
    Scrape(ScrapeArgs),
    /// Fetch a single article by URL and print the extracted record
    Probe(ProbeArgs),
    /// Train an author classifier on a scraped corpus and report accuracy
    Train(TrainArgs),
}

#[derive(Args, Debug)]
pub struct ScrapeArgs {
    /// Number of articles to scrape
    #[arg(short = 'n', long, value_parser = clap::value_parser!(u64).range(1..))]
    pub article_count: u64,

    /// Path of the JSON corpus file to write
    #[arg(short, long)]
    pub output: PathBuf,

    /// Seconds to sleep between HTTP requests
    #[arg(short, long, default_value_t = 0)]
    pub sleep: u64,

    /// Listing page to start pagination from
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub start_page: u32,

    /// User agent header sent with every request
    #[arg(long, env = "KOSMO_USER_AGENT", default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,
}

#[derive(Args, Debug)]
pub struct ProbeArgs {
    /// URL of the article page
    pub url: String,

    /// User agent header sent with the request
    #[arg(long, env = "KOSMO_USER_AGENT", default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,
}

#[derive(Args, Debug)]
pub struct TrainArgs {
    /// Path of the JSON corpus file to read
    #[arg(short, long)]
    pub corpus: PathBuf,

    /// Fraction of documents held out for testing
    #[arg(short, long, default_value_t = 0.2)]
    pub test_fraction: f64,

    /// Seed for the train/test shuffle
    #[arg(long, default_value_t = 12345)]
    pub seed: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scrape_parsing() {
        let cli = Cli::parse_from([
            "kosmo_corpus",
            "scrape",
            "--article-count",
            "100",
            "--output",
            "./corpus.json",
            "--sleep",
            "2",
        ]);

        match cli.command {
            Command::Scrape(args) => {
                assert_eq!(args.article_count, 100);
                assert_eq!(args.output, PathBuf::from("./corpus.json"));
                assert_eq!(args.sleep, 2);
                assert_eq!(args.start_page, 1);
            }
            other => panic!("expected scrape, got {other:?}"),
        }
    }

    #[test]
    fn test_scrape_short_flags() {
        let cli = Cli::parse_from(["kosmo_corpus", "scrape", "-n", "5", "-o", "/tmp/c.json"]);
        match cli.command {
            Command::Scrape(args) => {
                assert_eq!(args.article_count, 5);
                assert_eq!(args.sleep, 0);
            }
            other => panic!("expected scrape, got {other:?}"),
        }
    }

    #[test]
    fn test_scrape_rejects_zero_article_count() {
        let result =
            Cli::try_parse_from(["kosmo_corpus", "scrape", "-n", "0", "-o", "c.json"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_probe_parsing() {
        let cli = Cli::parse_from(["kosmo_corpus", "probe", "https://kosmonautix.cz/x/"]);
        match cli.command {
            Command::Probe(args) => assert_eq!(args.url, "https://kosmonautix.cz/x/"),
            other => panic!("expected probe, got {other:?}"),
        }
    }

    #[test]
    fn test_train_defaults() {
        let cli = Cli::parse_from(["kosmo_corpus", "train", "--corpus", "./corpus.json"]);
        match cli.command {
            Command::Train(args) => {
                assert_eq!(args.corpus, PathBuf::from("./corpus.json"));
                assert_eq!(args.test_fraction, 0.2);
                assert_eq!(args.seed, 12345);
            }
            other => panic!("expected train, got {other:?}"),
        }
    }
}
