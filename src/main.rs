//! sentimen-signal CLI: the review dashboard pages as subcommands.

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::io::{self, Write};
use tracing_subscriber::EnvFilter;

use sentimen_signal::data::{ReviewFilter, Sentiment};
use sentimen_signal::pages::{self, ALL_OPTION};
use sentimen_signal::{AppConfig, AppContext};

#[derive(Parser)]
#[command(name = "sentimen-signal")]
#[command(about = "Sentiment and topic analysis dashboard for app reviews")]
#[command(version)]
struct Cli {
    #[command(flatten)]
    config: AppConfig,

    /// Log at DEBUG level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Welcome page and navigation
    About,

    /// Headline metrics, sentiment distribution and top topics
    Overview,

    /// Word cloud, sentiment share and examples for one topic
    Topics {
        /// Topic description (default: first topic in the data)
        #[arg(long)]
        topic: Option<String>,
    },

    /// Sentiment counts, confidence histograms and topics per sentiment
    Sentiment {
        /// Sentiment whose top topics are shown
        #[arg(long, default_value = "Positif")]
        sentiment: String,
    },

    /// Filterable review table
    Reviews {
        /// Positif, Netral, Negatif or Semua
        #[arg(long, default_value = ALL_OPTION)]
        sentiment: String,

        /// Topic description or Semua
        #[arg(long, default_value = ALL_OPTION)]
        topic: String,

        /// Case-insensitive text search in the review
        #[arg(long, default_value = "")]
        search: String,

        /// Maximum rows to print
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Analyze a text with both models and show the evaluation results
    Demo {
        /// Review text to analyze
        #[arg(long, default_value = pages::demo::DEFAULT_TEXT)]
        text: String,

        /// Include raw reports and training logs
        #[arg(long)]
        details: bool,
    },
}

fn parse_sentiment(value: &str) -> anyhow::Result<Sentiment> {
    value.parse::<Sentiment>().map_err(anyhow::Error::msg)
}

fn build_filter(sentiment: &str, topic: &str, search: &str) -> anyhow::Result<ReviewFilter> {
    let mut filter = ReviewFilter::default().with_search(search);
    if sentiment != ALL_OPTION {
        filter = filter.with_sentiment(parse_sentiment(sentiment)?);
    }
    if topic != ALL_OPTION {
        filter = filter.with_topic(topic);
    }
    Ok(filter)
}

/// A page with its validated arguments.
enum Page {
    About,
    Overview,
    Topics(Option<String>),
    Sentiment(Sentiment),
    Reviews(ReviewFilter, Option<usize>),
    Demo { text: String, details: bool },
}

impl TryFrom<Commands> for Page {
    type Error = anyhow::Error;

    fn try_from(command: Commands) -> anyhow::Result<Self> {
        Ok(match command {
            Commands::About => Page::About,
            Commands::Overview => Page::Overview,
            Commands::Topics { topic } => Page::Topics(topic),
            Commands::Sentiment { sentiment } => Page::Sentiment(parse_sentiment(&sentiment)?),
            Commands::Reviews { sentiment, topic, search, limit } => {
                Page::Reviews(build_filter(&sentiment, &topic, &search)?, limit)
            }
            Commands::Demo { text, details } => Page::Demo { text, details },
        })
    }
}

fn main() -> anyhow::Result<()> {
    let _ = dotenv::dotenv();
    let cli = Cli::parse();

    // --verbose wins over RUST_LOG
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();

    // Arguments are validated before any asset is loaded.
    let page = Page::try_from(cli.command.unwrap_or(Commands::About))?;

    let context = AppContext::initialize(cli.config);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match &page {
        Page::About => pages::about::run(&context, &mut out),
        Page::Overview => pages::overview::run(&context, &mut out),
        Page::Topics(topic) => pages::topics::run(&context, topic.as_deref(), &mut out),
        Page::Sentiment(sentiment) => pages::sentiment::run(&context, *sentiment, &mut out),
        Page::Reviews(filter, limit) => pages::reviews::run(&context, filter, *limit, &mut out),
        Page::Demo { text, details } => pages::demo::run(&context, text, *details, &mut out),
    }
    .context("failed to write page")?;

    out.flush()?;
    Ok(())
}
