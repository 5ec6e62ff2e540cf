//! Phone number display formatting

/// Reformat free-form phone input as `(555) 123-4567`.
///
/// Non-digits are dropped and at most ten digits are kept; partial input
/// is formatted progressively (`(555`, `(555) 12`).
pub fn format_phone(input: &str) -> String {
    let digits: String = input.chars().filter(|c| c.is_ascii_digit()).collect();

    match digits.len() {
        0 => String::new(),
        1..=3 => format!("({digits}"),
        4..=6 => format!("({}) {}", &digits[..3], &digits[3..]),
        len => format!(
            "({}) {}-{}",
            &digits[..3],
            &digits[3..6],
            &digits[6..len.min(10)]
        ),
    }
}

/// The semantic value of a phone field: its digits
pub fn phone_digits(input: &str) -> String {
    input.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Character index just past the `digits`-th digit of `formatted`
pub fn cursor_after_digits(formatted: &str, digits: usize) -> usize {
    if digits == 0 {
        return 0;
    }
    formatted
        .chars()
        .enumerate()
        .filter(|(_, c)| c.is_ascii_digit())
        .nth(digits - 1)
        .map(|(i, _)| i + 1)
        .unwrap_or_else(|| formatted.chars().count())
}
