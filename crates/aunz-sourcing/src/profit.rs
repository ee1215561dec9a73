//! Landed-cost profit estimate for buying a batch from a supplier and
//! reselling it at a target price.

use aunz_core::ExchangeRates;
use serde::Serialize;

use crate::error::SourcingError;

const PLATFORM_FEE_NOTE: &str = "Platform fees not included (~15%)";
const VARIANCE_NOTE: &str = "Actual costs may vary";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfitEstimate {
    pub target_price: f64,
    pub target_currency: String,
    pub supplier_price_cny: f64,
    pub quantity: u32,
    pub shipping_per_unit_cny: f64,
    pub purchase_cost_cny: f64,
    pub shipping_cost_cny: f64,
    pub total_cost_cny: f64,
    pub total_cost_target_currency: f64,
    /// Units of sourcing currency per unit of target currency.
    pub exchange_rate: f64,
    pub revenue: f64,
    pub gross_profit: f64,
    pub profit_margin: f64,
    pub roi: f64,
    pub break_even_quantity: u64,
    pub notes: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ProfitEstimator {
    rates: ExchangeRates,
}

impl ProfitEstimator {
    #[must_use]
    pub fn new(rates: ExchangeRates) -> Self {
        Self { rates }
    }

    /// Estimates profit for `quantity` units bought at `supplier_price` (CNY)
    /// plus `shipping_per_unit` (CNY), sold at `target_price`.
    ///
    /// # Errors
    ///
    /// Returns [`SourcingError::InvalidInput`] for a negative or non-finite
    /// price, a zero quantity, or an empty currency code.
    pub fn estimate(
        &self,
        target_price: f64,
        target_currency: &str,
        supplier_price: f64,
        quantity: u32,
        shipping_per_unit: f64,
    ) -> Result<ProfitEstimate, SourcingError> {
        ensure_non_negative("target price", target_price)?;
        ensure_non_negative("supplier price", supplier_price)?;
        ensure_non_negative("shipping per unit", shipping_per_unit)?;
        if quantity == 0 {
            return Err(SourcingError::InvalidInput(
                "quantity must be at least 1".to_string(),
            ));
        }
        let currency = target_currency.trim().to_ascii_uppercase();
        if currency.is_empty() {
            return Err(SourcingError::InvalidInput(
                "target currency must not be empty".to_string(),
            ));
        }

        let exchange_rate = self.rates.to_sourcing(&currency);
        let inverse_rate = self.rates.from_sourcing(&currency);
        let qty = f64::from(quantity);

        let purchase_cost_cny = supplier_price * qty;
        let shipping_cost_cny = shipping_per_unit * qty;
        let total_cost_cny = purchase_cost_cny + shipping_cost_cny;
        let total_cost_target = total_cost_cny * inverse_rate;

        let revenue = target_price * qty;
        let gross_profit = revenue - total_cost_target;
        let profit_margin = if revenue > 0.0 {
            gross_profit / revenue * 100.0
        } else {
            0.0
        };
        let roi = if total_cost_target > 0.0 {
            gross_profit / total_cost_target * 100.0
        } else {
            0.0
        };

        let unit_cost_target = (supplier_price + shipping_per_unit) * inverse_rate;
        let break_even_quantity = if target_price > unit_cost_target {
            break_even_units(total_cost_target, target_price)
        } else {
            0
        };

        let notes = vec![
            format!("Exchange rate: 1 {currency} = {exchange_rate} CNY"),
            format!("Shipping cost estimate: {shipping_per_unit} CNY/unit"),
            PLATFORM_FEE_NOTE.to_string(),
            VARIANCE_NOTE.to_string(),
        ];

        Ok(ProfitEstimate {
            target_price,
            target_currency: currency,
            supplier_price_cny: supplier_price,
            quantity,
            shipping_per_unit_cny: shipping_per_unit,
            purchase_cost_cny,
            shipping_cost_cny,
            total_cost_cny,
            total_cost_target_currency: round2(total_cost_target),
            exchange_rate,
            revenue,
            gross_profit: round2(gross_profit),
            profit_margin: round2(profit_margin),
            roi: round2(roi),
            break_even_quantity,
            notes,
        })
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn break_even_units(total_cost: f64, unit_price: f64) -> u64 {
    (total_cost / unit_price).floor() as u64 + 1
}

fn ensure_non_negative(field: &str, value: f64) -> Result<(), SourcingError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(SourcingError::InvalidInput(format!(
            "{field} must be a non-negative number, got {value}"
        )))
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
