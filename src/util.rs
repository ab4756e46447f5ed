use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use eframe::egui::Color32;

/// Whole-dollar US currency, e.g. `500000.0` -> `"$500,000"`.
pub fn format_usd(value: f64) -> String {
    if !value.is_finite() {
        return format!("${value}");
    }

    let dollars = value.round();
    let digits = format!("{:.0}", dollars.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    if dollars < 0.0 {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

pub fn parse_hex_color(hex: &str) -> Option<Color32> {
    let hex = hex.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }

    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
    Some(Color32::from_rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

pub fn color_hex(color: Color32) -> String {
    format!("#{:02x}{:02x}{:02x}", color.r(), color.g(), color.b())
}

/// Deterministic value in `[-0.5, 0.5)` for a seed. Used to break ties
/// between coincident points without a random source.
pub fn stable_unit(seed: impl Hash) -> f32 {
    let mut hasher = DefaultHasher::new();
    seed.hash(&mut hasher);
    let hash = hasher.finish();

    let unit = ((hash & 0xffff_ffff) as f64 / (u32::MAX as f64 + 1.0)) as f32;
    unit - 0.5
}
