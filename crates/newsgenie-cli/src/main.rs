mod app;
mod chat;

use clap::{Parser, Subcommand};
use newsgenie_assistant::format;
use newsgenie_core::{Article, Category};
use newsgenie_pipeline::{
    category_breakdown, daily_counts, sentiment_distribution, source_distribution, trending,
};
use tracing_subscriber::EnvFilter;

use crate::app::{App, EMPTY_CORPUS_ADVISORY};

#[derive(Debug, Parser)]
#[command(name = "newsgenie")]
#[command(about = "News aggregation and question answering from the command line")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Show the latest headlines
    Headlines {
        /// Only fetch and show one category (e.g. tech, sports)
        #[arg(long, value_parser = parse_category)]
        category: Option<Category>,
    },
    /// Show the most frequent title keywords
    Trending {
        /// Number of keywords to show
        #[arg(long, default_value = "10")]
        top: usize,
    },
    /// Show corpus statistics and sentiment
    Stats,
    /// Answer a single question
    Ask {
        /// The question, e.g. "what's trending?"
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },
    /// Start an interactive conversation (the default)
    Chat,
}

fn parse_category(value: &str) -> Result<Category, String> {
    Category::from_name(value).ok_or_else(|| {
        let names: Vec<&str> = Category::ALL.iter().map(|c| c.as_str()).collect();
        format!("unknown category '{value}' (expected one of: {})", names.join(", "))
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Usage and argument errors must not depend on a valid environment.
    let cli = Cli::parse();
    let config = newsgenie_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let category = match &cli.command {
        Some(Commands::Headlines { category }) => *category,
        _ => None,
    };
    let app = App::build(config, category)?;

    match cli.command {
        Some(Commands::Headlines { category }) => run_headlines(&app, category).await,
        Some(Commands::Trending { top }) => run_trending(&app, top).await,
        Some(Commands::Stats) => run_stats(&app).await,
        Some(Commands::Ask { query }) => {
            let mut session = app.session().await;
            if session.corpus().await.is_empty() {
                eprintln!("{EMPTY_CORPUS_ADVISORY}");
            }
            println!("{}", session.ask(&query.join(" ")).await);
        }
        Some(Commands::Chat) | None => chat::run(&app).await?,
    }

    Ok(())
}

async fn run_headlines(app: &App, category: Option<Category>) {
    let corpus = app.cache().get().await;
    if corpus.is_empty() {
        eprintln!("{EMPTY_CORPUS_ADVISORY}");
        return;
    }

    let articles: Vec<&Article> = corpus
        .articles()
        .iter()
        .filter(|a| category.is_none_or(|c| a.category() == c))
        .collect();
    let heading = category.map_or_else(|| "Top stories".to_string(), |c| format!("{c} news"));
    println!("{}", format::article_list(&heading, &articles));
}

async fn run_trending(app: &App, top: usize) {
    let corpus = app.cache().get().await;
    if corpus.is_empty() {
        eprintln!("{EMPTY_CORPUS_ADVISORY}");
        return;
    }
    println!(
        "{}",
        format::trend_list("Trending topics", &trending(corpus.articles(), top))
    );
}

async fn run_stats(app: &App) {
    let corpus = app.cache().get().await;
    if corpus.is_empty() {
        eprintln!("{EMPTY_CORPUS_ADVISORY}");
        return;
    }

    let articles = corpus.articles();
    println!(
        "{}",
        format::statistics(
            articles.len(),
            &category_breakdown(articles),
            &source_distribution(articles)
        )
    );
    println!();
    println!(
        "{}",
        format::sentiment_summary("all news", &sentiment_distribution(articles))
    );

    let days = daily_counts(articles);
    if !days.is_empty() {
        println!("\n_Articles per day_");
        for (day, count) in days {
            println!("- {day}: {count}");
        }
    }
}
