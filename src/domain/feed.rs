use serde::{Deserialize, Serialize};

use crate::errors::NewsError;

/// Feed grouping used to select feeds; doubles as the article's editorial category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FeedCategory {
    #[serde(rename = "Nacional")]
    Domestic,
    #[serde(rename = "Internacional")]
    International,
    #[serde(rename = "Criptomoedas")]
    Crypto,
}

impl FeedCategory {
    pub const ALL: [FeedCategory; 3] = [
        FeedCategory::Domestic,
        FeedCategory::International,
        FeedCategory::Crypto,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FeedCategory::Domestic => "Nacional",
            FeedCategory::International => "Internacional",
            FeedCategory::Crypto => "Criptomoedas",
        }
    }

    /// Whether articles in this category go through the translator
    pub fn needs_translation(&self) -> bool {
        matches!(self, FeedCategory::International)
    }
}

impl std::str::FromStr for FeedCategory {
    type Err = NewsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "nacional" | "domestic" => Ok(FeedCategory::Domestic),
            "internacional" | "international" => Ok(FeedCategory::International),
            "criptomoedas" | "cripto" | "crypto" => Ok(FeedCategory::Crypto),
            _ => Err(NewsError::UnknownCategory(s.to_string())),
        }
    }
}

impl std::fmt::Display for FeedCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedDescriptor {
    pub name: String,
    pub url: String,
    pub category: FeedCategory,
}

impl FeedDescriptor {
    pub fn new(name: impl Into<String>, url: impl Into<String>, category: FeedCategory) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            category,
        }
    }
}
