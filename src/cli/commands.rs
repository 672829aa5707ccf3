use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "investfeed")]
#[command(about = "Investment news aggregator for domestic, international and crypto RSS feeds")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch a category's feeds and print the scored articles
    Fetch {
        /// Category: nacional, internacional or criptomoedas
        category: String,

        /// Only articles whose title or description contains this text
        #[arg(short, long)]
        search: Option<String>,

        /// Only articles from this source (channel title)
        #[arg(long)]
        source: Option<String>,

        /// Only high relevance articles (score 90 and above)
        #[arg(long)]
        top: bool,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Print the demo article used when a category cannot be loaded
    Mock {
        /// Category: nacional, internacional or criptomoedas
        category: String,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Fetch feeds and report which ones are healthy
    Status {
        /// Only fetch this category (all categories if omitted)
        category: Option<String>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// List configured feeds by category
    List,

    /// Add a feed to a category
    Add {
        /// Category: nacional, internacional or criptomoedas
        category: String,

        /// Display name of the feed
        name: String,

        /// Feed URL
        url: String,
    },

    /// Remove a feed by URL
    Remove {
        /// Feed URL to remove
        url: String,
    },
}
