//! Money formatting and debt arithmetic
//!
//! Amounts are plain `f64` values matching the wire format (`monto` is a
//! JSON number). Formatting follows the es-AR convention: `.` as thousands
//! separator, `,` before exactly two fraction digits.

/// Format an amount as a currency string, e.g. `1234.5` -> `"$1.234,50"`.
///
/// Rounds half-up to two fraction digits. Non-finite input degrades to
/// `"$0,00"` instead of failing; callers should avoid passing it in the
/// first place.
pub fn format_money(value: f64) -> String {
    let value = if value.is_finite() { value } else { 0.0 };
    let cents = (value * 100.0).round() as i64;
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.abs();
    let whole = abs / 100;
    let fraction = abs % 100;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    format!("${}{},{:02}", sign, grouped, fraction)
}

/// Total owed for a debt: principal plus simple interest.
///
/// No clamping happens here; the `[0, 300]` range for the rate is enforced
/// at the mutation boundary. Both the grand totals and the per-category
/// breakdowns must go through this single function so the two stay
/// numerically consistent.
pub fn total_debt(principal: f64, rate_percent: f64) -> f64 {
    principal + principal * rate_percent / 100.0
}
