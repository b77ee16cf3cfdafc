use scout_api::result::SearchResult;

/// Visual separator between breadcrumb segments.
pub const BREADCRUMB_SEPARATOR: &str = " ▸ ";

// Fragments the view swaps into its container; the host page styles
// these classes.
pub static LOADING_HTML: &str = r#"<div class="search-loading" role="status">Loading results...</div>"#;
pub static ERROR_HTML: &str =
    r#"<div class="search-error" role="alert">There was an error, try searching again.</div>"#;
pub static NO_RESULTS_HTML: &str = r#"<p class="search-info">Sorry, no results were found.</p>"#;

pub fn escape_html(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '&' => "&amp;".to_string(),
            '<' => "&lt;".to_string(),
            '>' => "&gt;".to_string(),
            '"' => "&quot;".to_string(),
            '\'' => "&#39;".to_string(),
            _ => c.to_string(),
        })
        .collect::<String>()
}

/// Joins location segments into the rendered breadcrumb string, e.g.
/// "section ▸ subsection ▸ unit".
pub fn breadcrumbs(segments: &[String]) -> String {
    segments
        .iter()
        .map(|s| escape_html(s))
        .collect::<Vec<_>>()
        .join(BREADCRUMB_SEPARATOR)
}

/// Renders one result as a labeled landmark region: content type label,
/// excerpt, a link to the content, and the location breadcrumb.
pub fn render_item(result: &SearchResult) -> String {
    let url = escape_html(&result.url);
    let content_type = escape_html(&result.content_type);
    let excerpt = escape_html(&result.excerpt);
    let crumbs = breadcrumbs(&result.location);
    format!(
        "<li role=\"region\" aria-label=\"search result\">\
            <a href=\"{url}\">\
                <span class=\"result-type\">{content_type}</span>\
                <p class=\"result-excerpt\">{excerpt}</p>\
                <span class=\"result-location\">{crumbs}</span>\
            </a>\
        </li>"
    )
}

pub fn render_load_next(shown: usize, total: u64) -> String {
    format!(
        "<a class=\"search-load-next\" href=\"#\">Load next results \
            <span class=\"search-count\">{shown} of {total} shown</span>\
        </a>"
    )
}

/// Composes the full results fragment from pre-rendered item fragments.
pub fn render_list(item_fragments: &[String], load_next: Option<String>) -> String {
    let mut out = String::from("<ol class=\"search-results\">");
    for fragment in item_fragments {
        out.push_str(fragment);
    }
    out.push_str("</ol>");
    if let Some(link) = load_next {
        out.push_str(&link);
    }
    out
}
