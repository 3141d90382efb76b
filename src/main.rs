//! Article Scraper main entry point
//!
//! This is the command-line interface for scraping web articles and storing
//! them as CMS pages.

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use article_scraper::config::{load_config_or_default, Config};
use article_scraper::convert::{ArticlePageAssembler, ConversionOptions};
use article_scraper::fetch::{build_http_client, fetch_article, scrape};
use article_scraper::output::{write_response, ApiResponse};
use article_scraper::storage::open_storage;
use article_scraper::{Article, ScraperError};
use tracing_subscriber::EnvFilter;

/// Article Scraper: turns web articles into CMS pages
///
/// Fetches a web page and either reports its title or extracts the article
/// and stores it as a page made of ordered content elements.
#[derive(Parser, Debug)]
#[command(name = "article-scraper")]
#[command(version = "1.0.0")]
#[command(about = "Turns web articles into CMS pages", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose", global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch a page and report its title
    Scrape {
        /// Page to fetch
        url: String,
    },

    /// Fetch a page, extract its article and store it as a page
    ScrapeAndSave {
        /// Page to fetch
        url: String,

        /// Language of the new page (defaults to the configured language code)
        #[arg(long)]
        language_id: Option<i64>,

        /// Publish the page
        #[arg(long)]
        publish: bool,
    },

    /// Store a pre-parsed article read from a JSON file
    Convert {
        /// Article JSON file
        #[arg(value_name = "ARTICLE_JSON")]
        article_json: PathBuf,

        /// Language of the new page (defaults to the configured language code)
        #[arg(long)]
        language_id: Option<i64>,

        /// Publish the page
        #[arg(long)]
        publish: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let exit_code = match run(&cli).await {
        Ok(data) => {
            write_response(std::io::stdout().lock(), &ApiResponse::ok(data))
                .context("Failed to write response")?;
            0
        }
        Err(e) => {
            tracing::error!("{}", e);
            let response: ApiResponse<serde_json::Value> = ApiResponse::failure(&e);
            write_response(std::io::stdout().lock(), &response)
                .context("Failed to write error response")?;
            response.exit_code()
        }
    };

    std::process::exit(exit_code);
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("article_scraper=info,warn"),
            1 => EnvFilter::new("article_scraper=debug,info"),
            2 => EnvFilter::new("article_scraper=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    // stdout carries the JSON response only
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Runs the selected command and returns its `data` payload
async fn run(cli: &Cli) -> Result<serde_json::Value, ScraperError> {
    let config = load_config_or_default(cli.config.as_deref())?;
    if let Some(path) = &cli.config {
        tracing::debug!("Configuration loaded from: {}", path.display());
    }

    match &cli.command {
        Command::Scrape { url } => {
            let client = http_client(&config, url)?;
            let result = scrape(&client, url).await?;
            Ok(serde_json::to_value(result)?)
        }
        Command::ScrapeAndSave {
            url,
            language_id,
            publish,
        } => {
            let client = http_client(&config, url)?;
            let article = fetch_article(&client, url).await?;
            save_article(&config, &article, *language_id, *publish)
        }
        Command::Convert {
            article_json,
            language_id,
            publish,
        } => {
            let article = read_article(article_json)?;
            save_article(&config, &article, *language_id, *publish)
        }
    }
}

fn http_client(config: &Config, url: &str) -> Result<reqwest::Client, ScraperError> {
    build_http_client(&config.http).map_err(|source| ScraperError::FetchFailed {
        url: url.to_string(),
        source,
    })
}

fn read_article(path: &Path) -> Result<Article, ScraperError> {
    tracing::info!("Reading article from: {}", path.display());
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Stores `article` as a page and returns the page aggregate
fn save_article(
    config: &Config,
    article: &Article,
    language_id: Option<i64>,
    publish: bool,
) -> Result<serde_json::Value, ScraperError> {
    let mut storage = open_storage(Path::new(&config.database.path))?;
    let options = ConversionOptions::from(&config.defaults);

    // --publish only ever turns publishing on
    let publish = publish || config.defaults.publish;

    let mut assembler = ArticlePageAssembler::new(&mut storage, options);
    let aggregate = assembler.assemble(article, language_id, publish)?;

    tracing::info!(
        "Saved page {} ('{}') with {} content elements",
        aggregate.page.id,
        aggregate.page.slug,
        aggregate.content_elements.len()
    );

    Ok(serde_json::to_value(aggregate)?)
}
