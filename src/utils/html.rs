// src/utils/html.rs

/// Clean user-facing marketing text with the ammonia library.
///
/// Whitelist-based: safe inline tags (like <b>, <p>) are kept while
/// <script>/<iframe> and event-handler attributes are stripped, including
/// the script body.
pub fn clean_html(input: &str) -> String {
    ammonia::clean(input)
}
