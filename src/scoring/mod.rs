pub mod keywords;
pub mod scorer;

pub use keywords::{HttpKeywordSource, KeywordSource, StaticKeywordSource};
pub use scorer::RelevanceScorer;
