//! Raw offer records as returned by sourcing-marketplace collectors.
//!
//! ## Observed shapes
//!
//! Offers come from two kinds of capture and the field names differ:
//!
//! - Embedded search JSON uses `offerId`, `subject`, `quantityBegin`,
//!   `gmvReTrade30Day`, `companyName`, `tpYear` and `isTp`.
//! - Scraped result cards carry `id`/`title`, a `price` string with a
//!   currency glyph (`"¥12.50"`, sometimes a range `"12.50-18.00"`) and a
//!   sold-count badge like `"1.2万+"` or `"1000+"`.
//!
//! Both deserialize into [`RawOffer`] through field aliases. Numeric fields
//! accept either JSON numbers or display strings ([`NumberOrText`]); the
//! text forms are interpreted in [`crate::parse`].

use serde::{Deserialize, Serialize};

/// A value that collectors emit either as a JSON number or as display text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumberOrText {
    Number(f64),
    Text(String),
}

/// One unnormalized offer from a sourcing marketplace.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawOffer {
    #[serde(default, alias = "id")]
    pub offer_id: Option<NumberOrText>,

    #[serde(default, alias = "subject")]
    pub title: Option<String>,

    /// Unit price in CNY.
    #[serde(default)]
    pub price: Option<NumberOrText>,

    #[serde(default, alias = "quantityBegin")]
    pub moq: Option<NumberOrText>,

    #[serde(default, alias = "gmvReTrade30Day")]
    pub sold_count: Option<NumberOrText>,

    #[serde(default, alias = "detailUrl")]
    pub product_url: Option<String>,

    #[serde(default, alias = "companyName")]
    pub supplier_name: Option<String>,

    #[serde(default)]
    pub location: Option<String>,

    /// Weight in kilograms, or text such as `"350g"` / `"1.2kg"`.
    #[serde(default)]
    pub weight: Option<NumberOrText>,

    /// Free-text `L x W x H` in centimetres.
    #[serde(default)]
    pub dimensions: Option<String>,

    #[serde(default)]
    pub is_small_medium: Option<bool>,

    #[serde(default, alias = "isTp")]
    pub is_verified: Option<bool>,

    #[serde(default, alias = "tpYear")]
    pub years_in_business: Option<u32>,

    #[serde(default)]
    pub rating: Option<f64>,

    /// Localized search term the offer was captured under.
    #[serde(default, alias = "search_keyword")]
    pub search_keyword: Option<String>,
}
