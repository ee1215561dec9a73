use std::sync::LazyLock;

use regex::Regex;

static DIMENSIONS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+\.?\d*)\s*[xX*×]\s*(\d+\.?\d*)\s*[xX*×]\s*(\d+\.?\d*)")
        .expect("valid dimensions regex")
});

/// Parses the first `L x W x H` triple (centimetres) out of free text.
///
/// Accepts `x`, `X`, `*` or `×` as separators with optional whitespace.
/// Returns `None` when no full triple is present.
#[must_use]
pub fn parse_dimensions(text: &str) -> Option<(f64, f64, f64)> {
    let caps = DIMENSIONS_RE.captures(text)?;
    let side = |i: usize| caps.get(i)?.as_str().parse::<f64>().ok();
    Some((side(1)?, side(2)?, side(3)?))
}
