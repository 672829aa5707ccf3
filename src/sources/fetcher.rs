use std::collections::HashMap;

use chrono::Utc;
use tracing::debug;

use crate::domain::FeedStatus;
use crate::errors::{NewsError, NewsResult};
use crate::sources::http::{proxied_url, HttpTransport};
use crate::sources::retry::{retry_with_backoff, RetryPolicy};

/// Fetches feed documents through the proxy and keeps the last outcome per URL.
///
/// The status map lives as long as the fetcher and is never persisted.
pub struct FeedFetcher<T: HttpTransport> {
    transport: T,
    proxy_url: String,
    policy: RetryPolicy,
    statuses: HashMap<String, FeedStatus>,
}

impl<T: HttpTransport> FeedFetcher<T> {
    pub fn new(transport: T, proxy_url: impl Into<String>, policy: RetryPolicy) -> Self {
        Self {
            transport,
            proxy_url: proxy_url.into(),
            policy,
            statuses: HashMap::new(),
        }
    }

    /// Fetch the raw XML for `url`, retrying with backoff.
    /// Records `Active` on success and `Inactive` with the last error once
    /// every attempt has failed.
    pub fn fetch(&mut self, url: &str) -> NewsResult<String> {
        let proxied = proxied_url(&self.proxy_url, url);
        let transport = &self.transport;

        let result = retry_with_backoff(&self.policy, |attempt| {
            debug!(url, attempt = attempt + 1, "Fetching feed");
            let response = transport.get(&proxied)?;
            if !response.is_success() {
                return Err(NewsError::HttpStatus(response.status));
            }
            Ok(response.body)
        });

        match result {
            Ok(body) => {
                self.record_success(url);
                Ok(body)
            }
            Err(e) => {
                let message = e.to_string();
                self.record_failure(url, message.clone());
                Err(NewsError::FeedUnavailable {
                    url: url.to_string(),
                    attempts: self.policy.max_attempts,
                    message,
                })
            }
        }
    }

    pub fn record_success(&mut self, url: &str) {
        self.statuses
            .insert(url.to_string(), FeedStatus::active(Utc::now()));
    }

    pub fn record_failure(&mut self, url: &str, error: String) {
        self.statuses
            .insert(url.to_string(), FeedStatus::inactive(Utc::now(), error));
    }

    pub fn status(&self, url: &str) -> Option<&FeedStatus> {
        self.statuses.get(url)
    }
}
