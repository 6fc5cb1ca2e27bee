use rust_decimal::Decimal;

/// Formats the whole-rupee part of `value` with Indian digit grouping (e.g., 1,23,45,678).
///
/// The last three digits form one group and the digits before them are grouped in pairs.
/// Any fractional part is truncated.
pub fn format_indian_currency(value: Decimal) -> String {
    let whole = value.trunc();
    let digits = whole.abs().to_string();
    let sign = if whole.is_sign_negative() && !whole.is_zero() { "-" } else { "" };

    if digits.len() <= 3 {
        return format!("{sign}{digits}");
    }

    let (head, last_three) = digits.split_at(digits.len() - 3);
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 2);
    for (i, ch) in head.chars().enumerate() {
        if i > 0 && (head.len() - i) % 2 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{sign}{grouped},{last_three}")
}

/// A rupee amount for display, e.g. `₹1,23,456`.
pub fn rupees(value: Decimal) -> String {
    format!("₹{}", format_indian_currency(value))
}

/// A plain ratio with two decimals, e.g. `4.00x`.
pub fn multiple(value: Decimal) -> String {
    format!("{:.2}x", value.round_dp(2))
}

/// A value that is already a percentage, e.g. `170.00%`.
pub fn percent(value: Decimal) -> String {
    format!("{:.2}%", value.round_dp(2))
}

/// A fraction rendered as a percentage, e.g. `0.2833` becomes `28.33%`.
pub fn fraction_as_percent(value: Decimal) -> String {
    percent(value * Decimal::ONE_HUNDRED)
}
