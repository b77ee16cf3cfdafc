use serde::{Deserialize, Serialize};

use crate::WireError;

/// Body of the search POST. Page size is chosen by the server and is
/// intentionally not part of the request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub search_term: String,
    pub page_index: u32,
}

impl SearchRequest {
    pub fn new(search_term: impl Into<String>, page_index: u32) -> Self {
        Self {
            search_term: search_term.into(),
            page_index,
        }
    }

    pub fn to_json(&self) -> Result<Vec<u8>, WireError> {
        Ok(serde_json::to_vec(self)?)
    }
}
