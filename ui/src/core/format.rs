//! Formatting helpers for chart labels.

/// Whole-number percentage of `count` against `total`, e.g. `"37%"`.
/// Empty when `total` is zero.
pub fn format_percent(count: u64, total: u32) -> String {
    if total == 0 {
        return String::new();
    }
    let pct = (100.0 * count as f64 / f64::from(total)).round() as i64;
    format!("{pct}%")
}

pub fn format_count(count: u64) -> String {
    count.to_string()
}

/// SVG translate transform.
pub fn translate(x: f64, y: f64) -> String {
    format!("translate({},{})", format_px(x), format_px(y))
}

/// Pixel value without a trailing `.0` for whole numbers.
pub fn format_px(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{value:.2}")
    }
}
