use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::View;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchRequest {
    pub q: String,
    pub view: Option<View>,
    pub attribute_names: Vec<String>,
    pub category_ids: Vec<String>,
    pub limit: Option<u32>,
}

impl SearchRequest {
    pub fn new(q: impl Into<String>) -> Self {
        Self {
            q: q.into(),
            ..Self::default()
        }
    }
}

/// Row of `/object/{id}/query/{query_id}`; which keys appear depends on the
/// server-side query definition.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct QueryResult {
    pub source_object: Option<Value>,
    pub source_attribute: Option<Value>,
    pub object: Option<Value>,
    pub value: Option<Value>,
}
