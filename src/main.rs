use std::collections::HashMap;

use chrono::Utc;
use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use investfeed::cli::{Cli, Commands};
use investfeed::config::Config;
use investfeed::domain::{Article, FeedCategory, FeedHealth, FeedStatusEntry, NewsStats};
use investfeed::errors::NewsResult;
use investfeed::scoring::{HttpKeywordSource, RelevanceScorer};
use investfeed::services::{
    compute_stats, filter_articles, mock_articles, split_top_news, FeedRegistry, NewsFilter,
    NewsService,
};
use investfeed::sources::{FeedFetcher, ReqwestTransport, RetryPolicy};
use investfeed::storage::{SqliteKeyValueStore, SqliteStorage};

type LiveService =
    NewsService<SqliteKeyValueStore, ReqwestTransport, HttpKeywordSource<ReqwestTransport>>;

fn main() {
    init_logging();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run() -> NewsResult<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::from_env()?;

    match cli.command {
        Commands::Fetch {
            category,
            search,
            source,
            top,
            json,
        } => {
            let filter = NewsFilter {
                search,
                source,
                ..NewsFilter::default()
            };
            cmd_fetch(&config, category.parse()?, &filter, top, json)
        }
        Commands::Mock { category, json } => cmd_mock(category.parse()?, json),
        Commands::Status { category, json } => {
            let categories = match category {
                Some(name) => vec![name.parse()?],
                None => FeedCategory::ALL.to_vec(),
            };
            cmd_status(&config, &categories, json)
        }
        Commands::List => cmd_list(open_registry(&config)?),
        Commands::Add {
            category,
            name,
            url,
        } => cmd_add(open_registry(&config)?, category.parse()?, &name, &url),
        Commands::Remove { url } => cmd_remove(open_registry(&config)?, &url),
    }
}

fn open_registry(config: &Config) -> NewsResult<FeedRegistry<SqliteKeyValueStore>> {
    let storage = SqliteStorage::new(&config.db_path)?;
    Ok(FeedRegistry::load(SqliteKeyValueStore::new(storage)))
}

fn build_service(config: &Config) -> NewsResult<LiveService> {
    let registry = open_registry(config)?;
    let transport = ReqwestTransport::new(config.request_timeout);

    let keywords = HttpKeywordSource::new(
        transport.clone(),
        config.proxy_url.clone(),
        config.keywords_url.clone(),
    );
    let fetcher = FeedFetcher::new(
        transport,
        config.proxy_url.clone(),
        RetryPolicy::new(config.max_retries, config.backoff_base),
    );

    Ok(NewsService::new(
        registry,
        fetcher,
        RelevanceScorer::new(keywords),
    ))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FetchReport<'a> {
    category: FeedCategory,
    mock: bool,
    stats: &'a NewsStats,
    articles: &'a [Article],
}

fn cmd_fetch(
    config: &Config,
    category: FeedCategory,
    filter: &NewsFilter,
    top_only: bool,
    json: bool,
) -> NewsResult<()> {
    let mut service = build_service(config)?;

    if !json {
        println!("Fetching {} feeds...\n", category);
    }

    let fetched = service.fetch_by_category(category);
    let mock = fetched.is_empty();
    let articles = if mock { mock_articles(category) } else { fetched };

    let stats = compute_stats(&articles);
    let mut visible = filter_articles(&articles, filter);
    if top_only {
        visible = split_top_news(&visible).0;
    }

    if json {
        let report = FetchReport {
            category,
            mock,
            stats: &stats,
            articles: &visible,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if mock {
        println!("Using demo data - some RSS feeds may be unavailable.\n");
    }

    print_articles(&visible);
    print_stats(&stats);

    Ok(())
}

fn cmd_mock(category: FeedCategory, json: bool) -> NewsResult<()> {
    let articles = mock_articles(category);

    if json {
        println!("{}", serde_json::to_string_pretty(&articles)?);
        return Ok(());
    }

    print_articles(&articles);
    Ok(())
}

fn cmd_status(config: &Config, categories: &[FeedCategory], json: bool) -> NewsResult<()> {
    let mut service = build_service(config)?;

    for category in categories {
        if !json {
            println!("Checking {} feeds...", category);
        }
        service.fetch_by_category(*category);
    }

    let status = service.feed_status();

    if json {
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    println!();
    print_status(&status);

    Ok(())
}

fn cmd_list(registry: FeedRegistry<SqliteKeyValueStore>) -> NewsResult<()> {
    if registry.is_empty() {
        println!("No feeds configured.");
        return Ok(());
    }

    println!("Configured feeds:\n");
    for (category, feeds) in registry.list() {
        println!("{} ({}):", category, feeds.len());
        for feed in feeds {
            println!("  {}", feed.name);
            println!("    URL: {}", feed.url);
        }
        println!();
    }

    Ok(())
}

fn cmd_add(
    mut registry: FeedRegistry<SqliteKeyValueStore>,
    category: FeedCategory,
    name: &str,
    url: &str,
) -> NewsResult<()> {
    if registry.add(category, name, url)? {
        println!("Feed added successfully!");
        println!("  Name: {}", name.trim());
        println!("  Category: {}", category);
        println!("  URL: {}", url.trim());
    } else {
        println!("Feed already exists: {}", url);
    }

    Ok(())
}

fn cmd_remove(mut registry: FeedRegistry<SqliteKeyValueStore>, url: &str) -> NewsResult<()> {
    if registry.remove(url)? {
        println!("Removed: {}", url);
    } else {
        println!("Feed not found: {}", url);
    }

    Ok(())
}

fn print_articles(articles: &[Article]) {
    if articles.is_empty() {
        println!("No articles match.\n");
        return;
    }

    let now = Utc::now();
    for article in articles {
        println!(
            "[{}] {} - {}",
            article.tier(),
            article.relevance_score,
            article.time_ago(now)
        );
        println!("  {}", article.title);
        println!("  {} | {}", article.source, article.link);
        println!();
    }
}

fn print_stats(stats: &NewsStats) {
    println!("Total: {}", stats.total);

    println!("By source:");
    for (source, count) in sorted_counts(&stats.by_source) {
        println!("  {}: {}", source, count);
    }

    println!("By category:");
    for (category, count) in sorted_counts(&stats.by_feed_category) {
        println!("  {}: {}", category, count);
    }
}

fn sorted_counts(counts: &HashMap<String, usize>) -> Vec<(&String, &usize)> {
    let mut sorted: Vec<_> = counts.iter().collect();
    sorted.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
    sorted
}

fn print_status(status: &[FeedStatusEntry]) {
    let mut current = None;
    for entry in status {
        if current != Some(entry.category) {
            println!("{}:", entry.category);
            current = Some(entry.category);
        }

        let marker = match entry.status {
            FeedHealth::Active => "+",
            FeedHealth::Inactive => "!",
            FeedHealth::Unchecked => "?",
        };
        let attempted = entry
            .last_attempt
            .map(|at| at.format("%Y-%m-%d %H:%M:%S UTC").to_string())
            .unwrap_or_else(|| "N/A".to_string());

        println!("  {} {} [{}] (last attempt: {})", marker, entry.name, entry.status, attempted);
        println!("    URL: {}", entry.url);
        if let Some(error) = &entry.error {
            println!("    Error: {}", error);
        }
    }
}
