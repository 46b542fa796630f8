use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use triage_feed::{
    ArticleFetcher, ArticleId, ArticleSource, CategoryFilter, FeedController, FetchConfig,
    FilterCriteria, JsonFileSource, LogSummarySender, SortKey, SummarySender, ViewMode,
};

#[derive(Parser)]
#[command(name = "triage-feed")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Filter, sort and triage a news feed", long_about = None)]
struct Cli {
    /// Backend API base URL
    #[arg(long, env = "TRIAGE_API_URL")]
    api_url: Option<String>,

    /// Read articles from a JSON dump of the API instead of fetching (takes precedence)
    #[arg(long)]
    file: Option<PathBuf>,

    /// Case-insensitive title search
    #[arg(short, long, default_value = "")]
    search: String,

    /// Category filter (All, Regulatory, Competition, Technology, Market)
    #[arg(short, long, default_value = "All")]
    category: CategoryFilter,

    /// Tag filter, repeatable; an article matches if it has any of them
    #[arg(short, long = "tag")]
    tags: Vec<String>,

    /// Sort order (date-asc, date-desc, impact-asc, impact-desc)
    #[arg(long, default_value = "date-desc", value_parser = parse_sort_key)]
    sort: SortKey,

    /// Which list to print (main, saved)
    #[arg(long, default_value = "main")]
    view: ViewMode,

    /// Article ids to dismiss before printing
    #[arg(long)]
    dismiss: Vec<String>,

    /// Article ids to save before printing
    #[arg(long)]
    save: Vec<String>,

    /// Print the view as JSON
    #[arg(long)]
    json: bool,

    /// Send the summary digest if the feed is caught up
    #[arg(long)]
    send_summary: bool,
}

fn parse_sort_key(s: &str) -> std::result::Result<SortKey, String> {
    Ok(SortKey::parse_lenient(s))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let source: Box<dyn ArticleSource> = match &cli.file {
        Some(path) => Box::new(JsonFileSource::new(path.clone())),
        None => {
            let mut config = FetchConfig::from_env();
            if let Some(api_url) = &cli.api_url {
                config.api_url = api_url.clone();
            }
            Box::new(ArticleFetcher::new(config).context("Failed to build article fetcher")?)
        }
    };

    info!("Loading articles from {}", source.source_name());
    let articles = source.fetch_articles().await.map_err(|e| {
        error!("Could not load articles from {}", source.source_name());
        e
    })?;

    let mut controller = FeedController::new(articles);
    for id in &cli.dismiss {
        controller.dismiss(&ArticleId::new(id.as_str()));
    }
    for id in &cli.save {
        controller.save(&ArticleId::new(id.as_str()));
    }

    let criteria = FilterCriteria {
        search_text: cli.search.clone(),
        category: cli.category,
        tags: cli.tags.iter().cloned().collect(),
        sort_key: cli.sort,
    };

    let view = controller.feed(&criteria, cli.view);
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else if view.is_empty() && cli.view == ViewMode::MainView {
        println!("You're up to date.");
    } else {
        for article in &view {
            println!(
                "[{}] {} | {} | {} | {}",
                article.impact,
                article.published_at.format("%d.%m.%y %H:%M"),
                article.category,
                article.source,
                article.title
            );
            println!("    id: {}", article.id);
        }
    }

    info!(
        "{} shown, {} remaining overall, {} saved",
        view.len(),
        controller.global_remaining(),
        controller.saved_feed(&FilterCriteria::default()).len()
    );

    if cli.send_summary {
        if controller.is_empty(&criteria) {
            LogSummarySender
                .send_summary(&controller.summary_request())
                .await
                .context("Failed to send summary")?;
        } else {
            info!("Feed not caught up yet, summary not sent");
        }
    }

    Ok(())
}
