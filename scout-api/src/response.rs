use serde::{Deserialize, Serialize};

use crate::limits::enforce_max_response_size;
use crate::result::SearchResult;
use crate::WireError;

/// Envelope for one result record; the server nests hit fields under `data`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResultRecord {
    pub data: SearchResult,
}

/// Success body of the search endpoint:
/// `{total: <int>, results: [{data: {...}}, ...]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchResponse {
    pub total: u64,
    pub results: Vec<ResultRecord>,
}

impl SearchResponse {
    /// Parses a response body, enforcing the body-size cap first.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, WireError> {
        enforce_max_response_size(bytes.len())?;
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Unwraps the `data` envelopes into the flat result sequence.
    pub fn into_results(self) -> Vec<SearchResult> {
        self.results.into_iter().map(|record| record.data).collect()
    }
}
