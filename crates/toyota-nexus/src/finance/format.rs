/// US-dollar amount without cents, e.g. `$30,000`.
pub fn format_currency(amount: f64) -> String {
    format_usd(amount.round(), 0)
}

/// US-dollar amount with cents, e.g. `$513.45`.
pub fn format_monthly(amount: f64) -> String {
    format_usd(super::round_cents(amount), 2)
}

fn format_usd(amount: f64, decimals: usize) -> String {
    let rendered = format!("{:.*}", decimals, amount.abs());
    let (whole, fraction) = match rendered.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (rendered.as_str(), None),
    };

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (index, digit) in whole.chars().enumerate() {
        if index > 0 && (whole.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let negative = amount < 0.0 && rendered.chars().any(|c| c.is_ascii_digit() && c != '0');
    let sign = if negative { "-" } else { "" };

    match fraction {
        Some(fraction) => format!("{sign}${grouped}.{fraction}"),
        None => format!("{sign}${grouped}"),
    }
}
