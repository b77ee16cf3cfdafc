/// Lifecycle notifications emitted by the result collection.
///
/// The event set is closed; subscribers match on these variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchEvent {
    /// A new search completed and replaced the result set.
    Search,
    /// The next page arrived and was appended.
    Next,
    /// A request failed: transport error, non-2xx status, or a body the
    /// widget could not parse.
    Error,
}
