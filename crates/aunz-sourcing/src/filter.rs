//! Price and shipping-size eligibility checks for supplier candidates.

use aunz_core::SupplierCandidate;

use crate::dimensions::parse_dimensions;

/// Upper bounds on what ships economically as a small parcel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeLimits {
    pub max_weight_kg: f64,
    pub max_side_cm: f64,
    pub max_volume_cm3: f64,
}

impl SizeLimits {
    pub const DEFAULT: Self = Self {
        max_weight_kg: 5.0,
        max_side_cm: 60.0,
        max_volume_cm3: 50_000.0,
    };

    /// Hard limits reject first; otherwise the candidate's own small/medium
    /// flag decides. Unknown weight or unparseable dimensions never reject.
    #[must_use]
    pub fn admits(&self, candidate: &SupplierCandidate) -> bool {
        if candidate
            .weight_kg
            .is_some_and(|weight| weight > self.max_weight_kg)
        {
            return false;
        }

        if let Some((length, width, height)) =
            candidate.dimensions.as_deref().and_then(parse_dimensions)
        {
            if length.max(width).max(height) > self.max_side_cm {
                return false;
            }
            if length * width * height > self.max_volume_cm3 {
                return false;
            }
        }

        candidate.is_small_medium
    }
}

impl Default for SizeLimits {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[must_use]
pub fn passes_price(candidate: &SupplierCandidate, max_price: f64) -> bool {
    candidate.price <= max_price
}

#[must_use]
pub fn passes_size(candidate: &SupplierCandidate) -> bool {
    SizeLimits::DEFAULT.admits(candidate)
}
