use tracing::info;

use crate::errors::{NewsError, NewsResult};
use crate::sources::http::{proxied_url, HttpTransport};

/// Used when the keyword spreadsheet cannot be reached
pub const FALLBACK_KEYWORDS: &[&str] = &["investimento", "cripto", "dólar", "selic"];

const CSV_HEADER: &str = "palavra-chave";

#[cfg_attr(test, mockall::automock)]
pub trait KeywordSource {
    /// Load the active keyword list, lower-cased
    fn load(&self) -> NewsResult<Vec<String>>;
}

/// Keywords exported as CSV from a spreadsheet, fetched through the proxy
pub struct HttpKeywordSource<T: HttpTransport> {
    transport: T,
    proxy_url: String,
    csv_url: String,
}

impl<T: HttpTransport> HttpKeywordSource<T> {
    pub fn new(transport: T, proxy_url: impl Into<String>, csv_url: impl Into<String>) -> Self {
        Self {
            transport,
            proxy_url: proxy_url.into(),
            csv_url: csv_url.into(),
        }
    }
}

impl<T: HttpTransport> KeywordSource for HttpKeywordSource<T> {
    fn load(&self) -> NewsResult<Vec<String>> {
        let url = proxied_url(&self.proxy_url, &self.csv_url);
        let response = self.transport.get(&url)?;
        if !response.is_success() {
            return Err(NewsError::HttpStatus(response.status));
        }

        let keywords = parse_keyword_csv(&response.body);
        if keywords.is_empty() {
            return Err(NewsError::KeywordSource(
                "keyword sheet is empty".to_string(),
            ));
        }

        info!(count = keywords.len(), "Loaded keywords");
        Ok(keywords)
    }
}

/// Fixed keyword list, for offline runs and tests
#[derive(Debug, Clone, Default)]
pub struct StaticKeywordSource {
    keywords: Vec<String>,
}

impl StaticKeywordSource {
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            keywords: keywords
                .into_iter()
                .map(|k| k.as_ref().trim().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect(),
        }
    }
}

impl KeywordSource for StaticKeywordSource {
    fn load(&self) -> NewsResult<Vec<String>> {
        Ok(self.keywords.clone())
    }
}

/// One keyword per line; quotes, blank lines and the header row are dropped
pub fn parse_keyword_csv(csv: &str) -> Vec<String> {
    csv.replace('"', "")
        .lines()
        .map(|line| line.trim().to_lowercase())
        .filter(|k| !k.is_empty() && k != CSV_HEADER)
        .collect()
}
