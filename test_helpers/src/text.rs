//! Parsing of quoted step parameters used by the feature files.
//!
//! Feature files quote every parameter (`"/a/b[2]"`, `"b[1], b[2]"`), so
//! steps unwrap one layer of quotes before use.

const QUOTES: [char; 2] = ['"', '\''];

/// Removes one layer of matching quotes around `raw`, after trimming.
#[must_use]
pub fn unquote(raw: &str) -> &str {
    let trimmed = raw.trim();
    QUOTES
        .iter()
        .find_map(|quote| {
            trimmed
                .strip_prefix(*quote)
                .and_then(|inner| inner.strip_suffix(*quote))
        })
        .unwrap_or(trimmed)
}

/// A single step parameter, unquoted and trimmed.
#[must_use]
pub fn param(raw: &str) -> String {
    unquote(raw).trim().to_owned()
}

/// A comma-separated step parameter such as `"w[1], z[1]"`.
///
/// Blank items are dropped, so `""` yields nothing.
#[must_use]
pub fn param_list(raw: &str) -> Vec<String> {
    unquote(raw)
        .split(',')
        .map(param)
        .filter(|item| !item.is_empty())
        .collect()
}
