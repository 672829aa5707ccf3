use chrono::Utc;
use feed_rs::model::Entry;
use feed_rs::parser;
use scraper::{Html, Selector};

use crate::domain::ParsedArticle;
use crate::errors::{NewsError, NewsResult};
use crate::text::normalize;

pub const UNKNOWN_SOURCE: &str = "Unknown";

/// Parse a feed document into normalized items.
///
/// Only a document that is not a feed at all is an error. Missing item
/// fields become empty strings, a missing date becomes the current time and
/// a missing channel title becomes [`UNKNOWN_SOURCE`].
pub fn parse_feed(xml: &str) -> NewsResult<Vec<ParsedArticle>> {
    let parsed = parser::parse(xml.as_bytes()).map_err(|e| NewsError::FeedParse(e.to_string()))?;

    let source = parsed
        .title
        .map(|t| t.content.trim().to_string())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| UNKNOWN_SOURCE.to_string());

    let articles = parsed
        .entries
        .into_iter()
        .map(|entry| article_from_entry(entry, &source))
        .collect();

    Ok(articles)
}

fn article_from_entry(entry: Entry, source: &str) -> ParsedArticle {
    let raw_description = entry
        .summary
        .as_ref()
        .map(|s| s.content.clone())
        .or_else(|| entry.content.as_ref().and_then(|c| c.body.clone()))
        .unwrap_or_default();

    let image = media_image(&entry).or_else(|| inline_image(&raw_description));

    let title = entry
        .title
        .map(|t| normalize(&t.content))
        .unwrap_or_default();

    let link = entry
        .links
        .into_iter()
        .next()
        .map(|l| l.href)
        .unwrap_or_default();

    let published_at = entry
        .published
        .or(entry.updated)
        .unwrap_or_else(Utc::now);

    ParsedArticle {
        title,
        link,
        description: normalize(&raw_description),
        published_at,
        source: source.to_string(),
        image,
    }
}

/// First image from `media:thumbnail`, `media:content` or an image enclosure
fn media_image(entry: &Entry) -> Option<String> {
    for media in &entry.media {
        if let Some(thumbnail) = media.thumbnails.first() {
            return Some(thumbnail.image.uri.clone());
        }
        for content in &media.content {
            let Some(url) = content.url.as_ref() else {
                continue;
            };
            let is_image = content
                .content_type
                .as_ref()
                .map(|m| m.to_string().starts_with("image/"))
                .unwrap_or(false);
            if is_image {
                return Some(url.to_string());
            }
        }
    }
    None
}

/// `src` of the first `<img>` embedded in the description markup
fn inline_image(html: &str) -> Option<String> {
    if !html.contains("<img") {
        return None;
    }
    let selector = Selector::parse("img[src]").ok()?;
    let document = Html::parse_fragment(html);
    let src = document
        .select(&selector)
        .filter_map(|img| img.value().attr("src"))
        .map(str::trim)
        .find(|src| !src.is_empty())
        .map(str::to_string);
    src
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    const SAMPLE_RSS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0" xmlns:media="http://search.yahoo.com/mrss/">
  <channel>
    <title>InfoMoney</title>
    <link>https://www.infomoney.com.br/</link>
    <description>Mercados</description>
    <item>
      <title>Ibovespa fecha em alta &amp;amp; dólar cai</title>
      <link>https://www.infomoney.com.br/mercados/ibovespa-alta/</link>
      <description><![CDATA[<p><img src="https://img.test/ibov.jpg" /> O índice subiu   1,2%.</p>]]></description>
      <pubDate>Mon, 06 Jan 2025 18:30:00 +0000</pubDate>
    </item>
    <item>
      <title>Copom decide Selic</title>
      <link>https://www.infomoney.com.br/economia/copom/</link>
      <description>Decisão às 18h</description>
      <pubDate>Wed, 08 Jan 2025 21:00:00 +0000</pubDate>
      <media:thumbnail url="https://img.test/copom.jpg" />
    </item>
  </channel>
</rss>"#;

    #[test]
    fn test_parses_items_and_channel_title() {
        let articles = parse_feed(SAMPLE_RSS).unwrap();

        assert_eq!(articles.len(), 2);
        assert_eq!(articles[0].source, "InfoMoney");
        assert_eq!(articles[1].source, "InfoMoney");
        assert_eq!(
            articles[0].link,
            "https://www.infomoney.com.br/mercados/ibovespa-alta/"
        );
        assert_eq!(
            articles[1].published_at,
            Utc.with_ymd_and_hms(2025, 1, 8, 21, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_title_and_description_are_normalized() {
        let articles = parse_feed(SAMPLE_RSS).unwrap();

        assert_eq!(articles[0].title, "Ibovespa fecha em alta & dólar cai");
        assert_eq!(articles[0].description, "O índice subiu 1,2%.");
    }

    #[test]
    fn test_images_from_markup_and_media() {
        let articles = parse_feed(SAMPLE_RSS).unwrap();

        assert_eq!(articles[0].image.as_deref(), Some("https://img.test/ibov.jpg"));
        assert_eq!(articles[1].image.as_deref(), Some("https://img.test/copom.jpg"));
    }

    #[test]
    fn test_missing_fields_default() {
        let xml = r#"<?xml version="1.0"?>
<rss version="2.0">
  <channel>
    <item>
      <title>Somente título</title>
    </item>
  </channel>
</rss>"#;

        let before = Utc::now();
        let articles = parse_feed(xml).unwrap();

        assert_eq!(articles.len(), 1);
        let article = &articles[0];
        assert_eq!(article.title, "Somente título");
        assert_eq!(article.link, "");
        assert_eq!(article.description, "");
        assert_eq!(article.source, UNKNOWN_SOURCE);
        assert!(article.published_at >= before);
        assert!(article.image.is_none());
    }

    #[test]
    fn test_empty_channel_yields_no_items() {
        let xml = r#"<rss version="2.0"><channel><title>Vazio</title></channel></rss>"#;
        assert!(parse_feed(xml).unwrap().is_empty());
    }

    #[test]
    fn test_garbage_is_parse_error() {
        let result = parse_feed("definitely not a feed");
        assert!(matches!(result, Err(NewsError::FeedParse(_))));
    }
}
