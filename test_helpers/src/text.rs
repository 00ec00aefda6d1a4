//! Text normalisation for values captured by behavioural steps.

/// Strips one layer of matching single or double quotes from a value.
#[must_use]
pub fn unquote(value: &str) -> &str {
    let trimmed = value.trim();
    for quote in ['"', '\''] {
        if let Some(inner) = trimmed
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner;
        }
    }
    trimmed
}

/// Trims and unquotes a scalar step argument.
#[must_use]
pub fn normalize_scalar(value: &str) -> String {
    unquote(value).trim().to_owned()
}

/// Splits a comma-separated step argument into trimmed, unquoted items.
///
/// An empty or blank argument yields no items.
#[must_use]
pub fn split_list(value: &str) -> Vec<String> {
    let inner = unquote(value);
    if inner.trim().is_empty() {
        return Vec::new();
    }
    inner.split(',').map(normalize_scalar).collect()
}

/// Collapses every run of whitespace into one space and trims the ends, so
/// multi-line expectations compare equal to single-line renderings.
#[must_use]
pub fn squash_whitespace(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}
