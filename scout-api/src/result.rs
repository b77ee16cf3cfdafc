use serde::{Deserialize, Serialize};

/// One search hit as delivered by the search endpoint.
///
/// Every field defaults to empty so dependent views can render a result
/// that has not been populated yet without hitting missing data. Unknown
/// server fields are ignored on deserialize.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchResult {
    /// Ordered path segments, outermost first (course > section > unit).
    pub location: Vec<String>,
    pub content_type: String,
    pub excerpt: String,
    pub url: String,
}
