use chrono::{DateTime, Utc};
use serde::Serialize;

use super::FeedCategory;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FeedHealth {
    Active,
    Inactive,
    Unchecked,
}

impl FeedHealth {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeedHealth::Active => "Active",
            FeedHealth::Inactive => "Inactive",
            FeedHealth::Unchecked => "Unchecked",
        }
    }
}

impl std::fmt::Display for FeedHealth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome of the most recent fetch attempt for one feed URL
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedStatus {
    pub status: FeedHealth,
    pub last_attempt: DateTime<Utc>,
    pub error: Option<String>,
}

impl FeedStatus {
    pub fn active(at: DateTime<Utc>) -> Self {
        Self {
            status: FeedHealth::Active,
            last_attempt: at,
            error: None,
        }
    }

    pub fn inactive(at: DateTime<Utc>, error: String) -> Self {
        Self {
            status: FeedHealth::Inactive,
            last_attempt: at,
            error: Some(error),
        }
    }
}

/// Status row joined with the registry descriptor it belongs to
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedStatusEntry {
    pub category: FeedCategory,
    pub name: String,
    pub url: String,
    pub status: FeedHealth,
    pub last_attempt: Option<DateTime<Utc>>,
    pub error: Option<String>,
}
