//! Whole-unit currency formatting for price labels.

/// Format `amount` with a leading symbol and comma thousands separators,
/// e.g. `format_currency(12500, "$") == "$12,500"`.
pub fn format_currency(amount: u64, symbol: &str) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{symbol}{grouped}")
}
