/// Format an evaluated number for display.
/// Whole numbers keep one fractional digit (`35` renders as `35.0`).
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else {
        let s = n.to_string();
        if s.contains('.') { s } else { format!("{}.0", s) }
    }
}
