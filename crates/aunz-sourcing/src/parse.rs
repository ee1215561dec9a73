//! Display-text parsing for raw offer fields.

use std::sync::LazyLock;

use regex::Regex;

use crate::types::NumberOrText;

static NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+(?:\.\d+)?").expect("valid number regex"));
static WEIGHT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*(kg|千克|公斤|g|克)").expect("valid weight regex")
});
static OFFER_PATH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/offer/(\d+)").expect("valid offer path regex"));
static OFFER_PARAM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"offerId[=:](\d+)").expect("valid offer param regex"));

const TEN_THOUSAND: f64 = 10_000.0;

/// First number in a price label: `"¥12.50"` is 12.5, `"12.50-18.00"` is 12.5.
#[must_use]
pub fn parse_price_text(text: &str) -> Option<f64> {
    NUMBER_RE.find(text)?.as_str().parse().ok()
}

/// Sold-count badge to a unit count. `万` multiplies by ten thousand.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn parse_sold_count(text: &str) -> u64 {
    let Some(value) = NUMBER_RE
        .find(text.trim())
        .and_then(|m| m.as_str().parse::<f64>().ok())
    else {
        return 0;
    };
    if text.contains('万') {
        (value * TEN_THOUSAND).round() as u64
    } else {
        value.trunc() as u64
    }
}

/// Weight text to kilograms; gram units are divided by 1000.
#[must_use]
pub fn parse_weight_kg(text: &str) -> Option<f64> {
    let caps = WEIGHT_RE.captures(text)?;
    let value: f64 = caps.get(1)?.as_str().parse().ok()?;
    let unit = caps.get(2)?.as_str().to_lowercase();
    match unit.as_str() {
        "g" | "克" => Some(value / 1000.0),
        _ => Some(value),
    }
}

/// Offer id from a product URL: `/offer/<digits>`, then `offerId=<digits>`,
/// then the last path segment without `.html`.
#[must_use]
pub fn extract_offer_id(url: &str) -> Option<String> {
    if let Some(caps) = OFFER_PATH_RE.captures(url).or_else(|| OFFER_PARAM_RE.captures(url)) {
        return caps.get(1).map(|m| m.as_str().to_string());
    }
    let last = url
        .split(['?', '#'])
        .next()
        .unwrap_or_default()
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or_default()
        .trim_end_matches(".html");
    (!last.is_empty() && !last.contains(':')).then(|| last.to_string())
}

/// Numeric value of a number-or-text field.
pub(crate) fn number_value(value: &NumberOrText) -> Option<f64> {
    match value {
        NumberOrText::Number(n) => Some(*n),
        NumberOrText::Text(t) => parse_price_text(t),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_text_strips_currency_and_takes_first_of_range() {
        assert_eq!(parse_price_text("¥12.50"), Some(12.5));
        assert_eq!(parse_price_text("12.50-18.00"), Some(12.5));
        assert_eq!(parse_price_text(" 8 元"), Some(8.0));
        assert_eq!(parse_price_text("面议"), None);
    }

    #[test]
    fn sold_count_handles_wan_and_plus() {
        assert_eq!(parse_sold_count("1.2万+"), 12_000);
        assert_eq!(parse_sold_count("5万"), 50_000);
        assert_eq!(parse_sold_count("1000+"), 1_000);
        assert_eq!(parse_sold_count("已售 356 件"), 356);
        assert_eq!(parse_sold_count(""), 0);
        assert_eq!(parse_sold_count("暂无"), 0);
    }

    #[test]
    fn weight_units_convert_to_kg() {
        assert_eq!(parse_weight_kg("350g"), Some(0.35));
        assert_eq!(parse_weight_kg("1.2 kg"), Some(1.2));
        assert_eq!(parse_weight_kg("2千克"), Some(2.0));
        assert_eq!(parse_weight_kg("500克"), Some(0.5));
        assert_eq!(parse_weight_kg("light"), None);
    }

    #[test]
    fn offer_id_from_url_forms() {
        assert_eq!(
            extract_offer_id("https://detail.1688.com/offer/612345678901.html"),
            Some("612345678901".to_string())
        );
        assert_eq!(
            extract_offer_id("https://m.1688.com/detail?offerId=598877665544&spm=a"),
            Some("598877665544".to_string())
        );
        assert_eq!(
            extract_offer_id("https://example.com/item/abc123.html"),
            Some("abc123".to_string())
        );
        assert_eq!(extract_offer_id(""), None);
    }
}
