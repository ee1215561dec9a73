//! Normalization from [`SourcePayload`] to [`aunz_core::SourceListing`].

use aunz_core::{PriceStats, SourceId, SourceListing};

use crate::types::SourcePayload;

/// Rows kept in [`SourceListing::sample_items`].
pub const SAMPLE_ITEMS: usize = 5;

/// Collapses a payload into the common listing summary.
///
/// Item lists count their own rows. Price stats come from the payload when
/// provided, otherwise from the positive item prices.
#[must_use]
pub fn normalize_payload(source_id: SourceId, payload: SourcePayload) -> SourceListing {
    let (total_result_count, price_stats, items) = match payload {
        SourcePayload::SearchSummary {
            total_results,
            price_stats,
            items,
        } => (total_results, price_stats, items),
        SourcePayload::ItemList { items } => (items.len() as u64, None, items),
    };

    let price_stats = price_stats
        .filter(|stats| stats.avg.is_finite() && stats.avg > 0.0)
        .or_else(|| PriceStats::from_prices(items.iter().filter_map(|item| item.price)));

    let mut sample_items = items;
    sample_items.truncate(SAMPLE_ITEMS);

    SourceListing {
        source_id,
        total_result_count,
        price_stats,
        sample_items,
    }
}

#[cfg(test)]
mod tests {
    use aunz_core::ListingItem;

    use super::*;

    fn item(title: &str, price: Option<f64>) -> ListingItem {
        ListingItem {
            title: title.to_owned(),
            price,
            url: None,
        }
    }

    #[test]
    fn item_list_counts_rows_and_derives_stats() {
        let payload = SourcePayload::ItemList {
            items: vec![
                item("a", Some(10.0)),
                item("b", None),
                item("c", Some(30.0)),
            ],
        };
        let listing = normalize_payload(SourceId::TEMU, payload);
        assert_eq!(listing.total_result_count, 3);
        let stats = listing.price_stats.unwrap();
        assert!((stats.avg - 20.0).abs() < 1e-9);
        assert!((stats.min - 10.0).abs() < 1e-9);
    }

    #[test]
    fn search_summary_keeps_reported_total_and_stats() {
        let payload = SourcePayload::SearchSummary {
            total_results: 20_648,
            price_stats: Some(PriceStats::around_average(35.0)),
            items: vec![item("x", Some(99.0))],
        };
        let listing = normalize_payload(SourceId::TRADEME, payload);
        assert_eq!(listing.total_result_count, 20_648);
        assert_eq!(listing.average_price(), Some(35.0));
        assert_eq!(listing.sample_items.len(), 1);
    }

    #[test]
    fn empty_search_is_zero_not_absent() {
        let payload = SourcePayload::SearchSummary {
            total_results: 0,
            price_stats: None,
            items: Vec::new(),
        };
        let listing = normalize_payload(SourceId::EBAY, payload);
        assert_eq!(listing.total_result_count, 0);
        assert!(listing.price_stats.is_none());
    }

    #[test]
    fn samples_are_capped() {
        let items = (0..12).map(|i| item(&format!("i{i}"), Some(5.0))).collect();
        let listing = normalize_payload(SourceId::AMAZON, SourcePayload::ItemList { items });
        assert_eq!(listing.total_result_count, 12);
        assert_eq!(listing.sample_items.len(), SAMPLE_ITEMS);
    }
}
