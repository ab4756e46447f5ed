use eframe::egui::Color32;

use crate::sales::SaleRecord;

/// Case-insensitive substring match on the buyer. An empty query matches
/// everything.
pub fn buyer_matches(buyer: &str, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    buyer.to_uppercase().contains(&query.to_uppercase())
}

/// Recolors every record: matches keep their scale color, the rest are muted.
pub fn apply_search(
    records: &[SaleRecord],
    base_fills: &[Color32],
    query: &str,
    muted: Color32,
    fills: &mut Vec<Color32>,
) -> usize {
    fills.clear();
    fills.reserve(records.len().saturating_sub(fills.capacity()));

    let mut matched = 0usize;
    for (record, base) in records.iter().zip(base_fills) {
        if buyer_matches(&record.buyer, query) {
            fills.push(*base);
            matched += 1;
        } else {
            fills.push(muted);
        }
    }
    matched
}
