//! Display helpers used when rendering fee amounts.

/// Two decimals with comma thousands separators: `1234567.5` -> `"1,234,567.50"`.
pub fn format_amount(amount: f64) -> String {
    if !amount.is_finite() {
        return "0.00".to_string();
    }

    let fixed = format!("{:.2}", amount.abs());
    let (whole, frac) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    // "-0.00" is not a thing on a receipt
    let sign = if amount < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{sign}{grouped}.{frac}")
}

/// Amount prefixed with the currency symbol, or suffixed with the ISO code
/// when no symbol is known.
pub fn format_currency(amount: f64, currency: &str) -> String {
    let symbol = match currency.to_ascii_uppercase().as_str() {
        "INR" => Some("₹"),
        "USD" => Some("$"),
        "EUR" => Some("€"),
        "GBP" => Some("£"),
        _ => None,
    };

    match symbol {
        Some(sym) => format!("{sym}{}", format_amount(amount)),
        None => format!("{} {}", format_amount(amount), currency.to_ascii_uppercase()),
    }
}
