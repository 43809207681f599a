use rust_decimal::Decimal;

/// 1234567 -> "1,234,567"
pub(crate) fn group_thousands(value: u128) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

pub(crate) fn format_range(lower: Decimal, upper: Decimal) -> String {
    format!("{lower} - {upper}")
}

pub(crate) fn format_pair(first: impl std::fmt::Display, second: impl std::fmt::Display) -> String {
    format!("{first} + {second}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1_000), "1,000");
        assert_eq!(group_thousands(10_000_000), "10,000,000");
    }
}
