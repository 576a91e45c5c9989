/// Render a currency amount for display.
///
/// USD uses `$1,234.56`, BRL uses `R$ 1.234,56`; other codes are prefixed
/// with the code itself. Non-finite amounts, and amounts too large to count
/// in whole cents, render as `N/A`.
pub fn format_currency(amount: f64, currency: &str) -> String {
    let scaled = (amount.abs() * 100.0).round();
    if !scaled.is_finite() || scaled >= u64::MAX as f64 {
        return "N/A".to_string();
    }

    let sign = if amount < 0.0 { "-" } else { "" };
    let cents = scaled as u64;
    let whole = (cents / 100).to_string();
    let frac = cents % 100;

    match currency {
        "BRL" => format!("{sign}R$ {},{frac:02}", group_thousands(&whole, '.')),
        "USD" => format!("{sign}${}.{frac:02}", group_thousands(&whole, ',')),
        other => format!("{sign}{other} {}.{frac:02}", group_thousands(&whole, ',')),
    }
}

fn group_thousands(digits: &str, sep: char) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(sep);
        }
        out.push(ch);
    }
    out
}
