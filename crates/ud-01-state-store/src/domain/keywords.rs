//! Recent search keyword list.

/// Maximum number of remembered keywords.
pub const MAX_RECENT_KEYWORDS: usize = 6;

/// Insert `keyword` at the front of `list`.
///
/// Empty keywords and keywords already present are ignored (an existing
/// keyword is not moved to the front). The oldest entries are dropped
/// beyond [`MAX_RECENT_KEYWORDS`].
///
/// # Returns
///
/// Whether the list changed.
pub fn remember_keyword(list: &mut Vec<String>, keyword: &str) -> bool {
    if keyword.is_empty() || list.iter().any(|k| k == keyword) {
        return false;
    }
    list.insert(0, keyword.to_string());
    list.truncate(MAX_RECENT_KEYWORDS);
    true
}
