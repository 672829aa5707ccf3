use chrono::{DateTime, Utc};
use serde::Serialize;

use super::FeedCategory;

pub const MIN_RELEVANCE: u8 = 50;
pub const MAX_RELEVANCE: u8 = 99;
pub const TOP_RELEVANCE: u8 = 90;

/// An item as read from a feed, before category stamping and scoring
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedArticle {
    pub title: String,
    pub link: String,
    pub description: String,
    pub published_at: DateTime<Utc>,
    pub source: String,
    pub image: Option<String>,
}

impl ParsedArticle {
    /// Stamp the article with the category it was fetched under.
    /// The score starts at the base value until the scorer runs.
    pub fn into_article(self, category: FeedCategory) -> Article {
        Article {
            title: self.title,
            description: self.description,
            link: self.link,
            published_at: self.published_at,
            source: self.source,
            category: category.as_str().to_string(),
            feed_category: category,
            relevance_score: MIN_RELEVANCE,
            image: self.image,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub title: String,
    pub description: String,
    pub link: String,
    pub published_at: DateTime<Utc>,
    pub source: String,
    /// Editorial category; currently always the feed category label
    pub category: String,
    pub feed_category: FeedCategory,
    pub relevance_score: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Article {
    pub fn tier(&self) -> RelevanceTier {
        RelevanceTier::from_score(self.relevance_score)
    }

    pub fn is_top(&self) -> bool {
        self.relevance_score >= TOP_RELEVANCE
    }

    /// Human readable age of the article relative to `now`
    pub fn time_ago(&self, now: DateTime<Utc>) -> String {
        let hours = (now - self.published_at).num_hours();

        if hours < 1 {
            return "Há poucos minutos".to_string();
        }
        if hours == 1 {
            return "Há 1 hora".to_string();
        }
        if hours < 24 {
            return format!("Há {} horas", hours);
        }

        let days = hours / 24;
        if days == 1 {
            "Há 1 dia".to_string()
        } else {
            format!("Há {} dias", days)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RelevanceTier {
    High,
    Medium,
    Relevant,
}

impl RelevanceTier {
    pub fn from_score(score: u8) -> Self {
        if score >= TOP_RELEVANCE {
            RelevanceTier::High
        } else if score >= 80 {
            RelevanceTier::Medium
        } else {
            RelevanceTier::Relevant
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RelevanceTier::High => "Alta Relevância",
            RelevanceTier::Medium => "Média Relevância",
            RelevanceTier::Relevant => "Relevante",
        }
    }
}

impl std::fmt::Display for RelevanceTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
