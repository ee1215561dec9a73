//! Normalization from [`RawOffer`] to [`aunz_core::SupplierCandidate`].
//!
//! Text parsing is delegated to [`crate::parse`]; this module decides which
//! fields are required and which fall back to neutral defaults.

use aunz_core::SupplierCandidate;

use crate::error::SourcingError;
use crate::parse::{extract_offer_id, number_value, parse_sold_count, parse_weight_kg};
use crate::types::{NumberOrText, RawOffer};

const PRODUCT_URL_BASE: &str = "https://detail.1688.com/offer";

/// Normalizes a raw offer into a [`SupplierCandidate`] with no match score.
///
/// # Errors
///
/// Returns [`SourcingError::Normalization`] if the offer has no usable id,
/// title or price, or the price is negative.
pub fn normalize_offer(raw: RawOffer) -> Result<SupplierCandidate, SourcingError> {
    let offer_id = raw
        .offer_id
        .as_ref()
        .and_then(offer_id_text)
        .or_else(|| raw.product_url.as_deref().and_then(extract_offer_id))
        .ok_or_else(|| SourcingError::Normalization {
            offer_id: "<unknown>".to_string(),
            reason: "offer has no id and no product url".into(),
        })?;

    let title = raw
        .title
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| SourcingError::Normalization {
            offer_id: offer_id.clone(),
            reason: "offer has no title".into(),
        })?
        .to_string();

    let price = raw
        .price
        .as_ref()
        .and_then(number_value)
        .ok_or_else(|| SourcingError::Normalization {
            offer_id: offer_id.clone(),
            reason: "offer has no parseable price".into(),
        })?;
    if !price.is_finite() || price < 0.0 {
        return Err(SourcingError::Normalization {
            offer_id,
            reason: format!("price {price} is negative"),
        });
    }

    let product_url = raw
        .product_url
        .filter(|u| !u.trim().is_empty())
        .unwrap_or_else(|| format!("{PRODUCT_URL_BASE}/{offer_id}.html"));

    let mut candidate = SupplierCandidate::new(offer_id, title, price);
    candidate.moq = raw.moq.as_ref().map_or(1, moq_value);
    candidate.sold_count = raw.sold_count.as_ref().map_or(0, sold_value);
    candidate.product_url = Some(product_url);
    candidate.supplier_name = raw.supplier_name.filter(|s| !s.trim().is_empty());
    candidate.location = raw.location.filter(|s| !s.trim().is_empty());
    candidate.weight_kg = raw.weight.as_ref().and_then(weight_value);
    candidate.dimensions = raw.dimensions.filter(|s| !s.trim().is_empty());
    candidate.is_small_medium = raw.is_small_medium.unwrap_or(true);
    candidate.is_verified = raw.is_verified.unwrap_or(false);
    candidate.years_in_business = raw.years_in_business;
    candidate.rating = raw
        .rating
        .filter(|r| r.is_finite())
        .map(|r| r.clamp(0.0, 5.0));

    Ok(candidate)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn offer_id_text(value: &NumberOrText) -> Option<String> {
    match value {
        NumberOrText::Number(n) if n.is_finite() && *n >= 0.0 => Some(format!("{}", n.trunc() as u64)),
        NumberOrText::Number(_) => None,
        NumberOrText::Text(t) => {
            let t = t.trim();
            (!t.is_empty()).then(|| t.to_string())
        }
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn moq_value(value: &NumberOrText) -> u32 {
    number_value(value)
        .filter(|n| n.is_finite() && *n >= 1.0)
        .map_or(1, |n| n.min(f64::from(u32::MAX)).trunc() as u32)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn sold_value(value: &NumberOrText) -> u64 {
    match value {
        NumberOrText::Number(n) if n.is_finite() && *n > 0.0 => n.trunc() as u64,
        NumberOrText::Number(_) => 0,
        NumberOrText::Text(t) => parse_sold_count(t),
    }
}

fn weight_value(value: &NumberOrText) -> Option<f64> {
    match value {
        NumberOrText::Number(n) if n.is_finite() && *n > 0.0 => Some(*n),
        NumberOrText::Number(_) => None,
        NumberOrText::Text(t) => parse_weight_kg(t),
    }
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
