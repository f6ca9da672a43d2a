use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::domain::CanonicalSequence;

static SEPARATOR_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[,\s]+").expect("SEPARATOR_REGEX is a valid regex pattern"));

/// Parses an author-entered token list such as `"5, 2, 8"`.
///
/// Tokens are separated by any run of commas and whitespace. Tokens that do not
/// parse as a finite number are dropped. Entry order is preserved.
pub fn normalize(raw: &str) -> CanonicalSequence {
    let values = SEPARATOR_REGEX
        .split(raw)
        .filter(|token| !token.is_empty())
        .filter_map(parse_token)
        .collect();

    CanonicalSequence::new(values)
}

fn parse_token(token: &str) -> Option<f64> {
    token.parse::<f64>().ok().filter(|value| value.is_finite())
}
