use std::cell::OnceCell;

use tracing::warn;

use crate::domain::{MAX_RELEVANCE, MIN_RELEVANCE};
use crate::scoring::keywords::{KeywordSource, FALLBACK_KEYWORDS};

const TITLE_HIT: u32 = 40;
const DESCRIPTION_HIT: u32 = 20;

/// Keyword based relevance heuristic.
///
/// The keyword list is pulled from the source on first use and kept for the
/// lifetime of the scorer. A failing or empty source falls back to
/// [`FALLBACK_KEYWORDS`].
pub struct RelevanceScorer<K: KeywordSource> {
    source: K,
    keywords: OnceCell<Vec<String>>,
}

impl<K: KeywordSource> RelevanceScorer<K> {
    pub fn new(source: K) -> Self {
        Self {
            source,
            keywords: OnceCell::new(),
        }
    }

    pub fn keywords(&self) -> &[String] {
        self.keywords.get_or_init(|| match self.source.load() {
            Ok(keywords) if !keywords.is_empty() => keywords
                .into_iter()
                .map(|k| k.to_lowercase())
                .filter(|k| !k.is_empty())
                .collect(),
            Ok(_) => {
                warn!("Keyword source returned no keywords, using fallback list");
                fallback_keywords()
            }
            Err(e) => {
                warn!(error = %e, "Could not load keywords, using fallback list");
                fallback_keywords()
            }
        })
    }

    /// Score in `[50, 99]`. The first keyword found in the title adds 40 and
    /// ends the scan; each keyword found only in the description adds 20.
    pub fn score(&self, title: &str, description: &str) -> u8 {
        let title = title.to_lowercase();
        let description = description.to_lowercase();

        let mut score = u32::from(MIN_RELEVANCE);
        for keyword in self.keywords() {
            if title.contains(keyword.as_str()) {
                score += TITLE_HIT;
                break;
            } else if description.contains(keyword.as_str()) {
                score += DESCRIPTION_HIT;
            }
        }

        score.min(u32::from(MAX_RELEVANCE)) as u8
    }
}

fn fallback_keywords() -> Vec<String> {
    FALLBACK_KEYWORDS.iter().map(|k| k.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::NewsError;
    use crate::scoring::keywords::{MockKeywordSource, StaticKeywordSource};

    fn scorer(keywords: &[&str]) -> RelevanceScorer<StaticKeywordSource> {
        RelevanceScorer::new(StaticKeywordSource::new(keywords))
    }

    #[test]
    fn test_no_match_is_base_score() {
        let scorer = scorer(&["selic"]);
        assert_eq!(scorer.score("Futebol", "Nada de finanças"), 50);
    }

    #[test]
    fn test_title_match_scores_ninety() {
        let scorer = scorer(&["selic", "ipca"]);
        assert_eq!(scorer.score("Copom mantém SELIC", ""), 90);
    }

    #[test]
    fn test_title_match_stops_scan() {
        // description hit on "selic" first, then title hit on "ipca"
        let scorer = scorer(&["selic", "ipca"]);
        assert_eq!(scorer.score("IPCA de março", "A selic segue alta"), 99);

        let scorer = self::scorer(&["ipca", "selic"]);
        assert_eq!(scorer.score("IPCA de março", "A selic segue alta"), 90);
    }

    #[test]
    fn test_description_hits_compound() {
        let scorer = scorer(&["selic", "dólar"]);
        assert_eq!(scorer.score("Mercado hoje", "Selic e dólar em foco"), 90);
    }

    #[test]
    fn test_score_is_clamped() {
        let keywords: Vec<String> = (0..20).map(|i| format!("k{}", i)).collect();
        let description = keywords.join(" ");
        let scorer = RelevanceScorer::new(StaticKeywordSource::new(&keywords));
        assert_eq!(scorer.score("sem termos", &description), 99);
    }

    #[test]
    fn test_keywords_loaded_once() {
        let mut source = MockKeywordSource::new();
        source
            .expect_load()
            .times(1)
            .returning(|| Ok(vec!["bitcoin".to_string()]));

        let scorer = RelevanceScorer::new(source);
        assert_eq!(scorer.score("Bitcoin sobe", ""), 90);
        assert_eq!(scorer.score("Ether cai", ""), 50);
        assert_eq!(scorer.keywords(), ["bitcoin".to_string()]);
    }

    #[test]
    fn test_failed_source_falls_back() {
        let mut source = MockKeywordSource::new();
        source
            .expect_load()
            .times(1)
            .returning(|| Err(NewsError::KeywordSource("offline".to_string())));

        let scorer = RelevanceScorer::new(source);
        assert_eq!(scorer.keywords().len(), FALLBACK_KEYWORDS.len());
        assert_eq!(scorer.score("Investimento em alta", ""), 90);
    }
}
