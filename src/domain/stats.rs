use std::collections::HashMap;

use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsStats {
    pub total: usize,
    pub by_source: HashMap<String, usize>,
    pub by_feed_category: HashMap<String, usize>,
}
