use serde::{Deserialize, Serialize};

/// One offer from the sourcing marketplace, normalized for filtering and
/// scoring against a target product.
///
/// Prices are in the sourcing currency (CNY).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplierCandidate {
    /// Marketplace offer ID; unique within the sourcing marketplace.
    pub offer_id: String,
    pub title: String,
    pub price: f64,
    /// Minimum order quantity, at least 1.
    pub moq: u32,
    pub sold_count: u64,
    pub product_url: Option<String>,

    pub supplier_name: Option<String>,
    pub location: Option<String>,

    pub weight_kg: Option<f64>,
    /// Raw dimension text as listed, e.g. `"30x20x10cm"`.
    pub dimensions: Option<String>,
    pub is_small_medium: bool,

    pub is_verified: bool,
    pub years_in_business: Option<u32>,
    /// Supplier rating in `[0, 5]`.
    pub rating: Option<f64>,

    /// Composite fitness in `[0, 100]` against one target product. Only set
    /// once the candidate has been scored.
    pub match_score: Option<f64>,
}

impl SupplierCandidate {
    /// Minimal candidate with neutral attributes; mostly useful for building
    /// fixtures and for sources that expose only identity and price.
    #[must_use]
    pub fn new(offer_id: impl Into<String>, title: impl Into<String>, price: f64) -> Self {
        Self {
            offer_id: offer_id.into(),
            title: title.into(),
            price,
            moq: 1,
            sold_count: 0,
            product_url: None,
            supplier_name: None,
            location: None,
            weight_kg: None,
            dimensions: None,
            is_small_medium: true,
            is_verified: false,
            years_in_business: None,
            rating: None,
            match_score: None,
        }
    }

    /// Returns the candidate with `match_score` attached.
    #[must_use]
    pub fn with_match_score(mut self, score: f64) -> Self {
        self.match_score = Some(score);
        self
    }
}
