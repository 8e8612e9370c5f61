//! Thai baht formatting and lenient amount parsing.

use std::str::FromStr;

use cashgame_types::constants::{CURRENCY_FRACTION_DIGITS, CURRENCY_SYMBOL};
use rust_decimal::{Decimal, RoundingStrategy};

/// Format an amount as baht: `฿1,234.5`, `-฿50`, `฿0`.
///
/// Rounds to two decimals (midpoint away from zero) and drops trailing
/// fractional zeros.
#[must_use]
pub fn format_currency(amount: Decimal) -> String {
    let rounded = amount
        .round_dp_with_strategy(
            CURRENCY_FRACTION_DIGITS,
            RoundingStrategy::MidpointAwayFromZero,
        )
        .normalize();
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };

    let digits = rounded.abs().to_string();
    let (whole, fraction) = match digits.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (digits.as_str(), None),
    };

    let mut out = String::with_capacity(digits.len() + 8);
    out.push_str(sign);
    out.push_str(CURRENCY_SYMBOL);
    out.push_str(&group_thousands(whole));
    if let Some(fraction) = fraction {
        out.push('.');
        out.push_str(fraction);
    }
    out
}

/// Format a net result with an explicit `+` for winners: `+฿50`, `-฿20`.
#[must_use]
pub fn format_net(net: Decimal) -> String {
    let formatted = format_currency(net);
    if net > Decimal::ZERO && !formatted.starts_with('-') {
        format!("+{formatted}")
    } else {
        formatted
    }
}

fn group_thousands(whole: &str) -> String {
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Parse a typed amount such as `฿1,000`, `$ 25.50` or `100abc`.
///
/// Currency symbols, commas, and whitespace are ignored; the longest
/// leading number is used, including an exponent (`1e3` is 1000). Blank or
/// unparsable input gives zero, and negative values clamp to zero.
#[must_use]
pub fn parse_currency(input: &str) -> Decimal {
    let cleaned: String = input
        .chars()
        .filter(|c| !matches!(c, '฿' | '$' | ',') && !c.is_whitespace())
        .collect();

    let Some(number) = leading_number(&cleaned) else {
        return Decimal::ZERO;
    };
    let parsed = if number.contains('e') {
        Decimal::from_scientific(&number)
    } else {
        Decimal::from_str(&number)
    };
    parsed
        .map(|value| value.max(Decimal::ZERO))
        .unwrap_or(Decimal::ZERO)
}

/// Longest `[+-]?digits[.digits][e[+-]digits]` prefix, rewritten into a
/// form `Decimal` accepts (`.5` → `0.5`, `5.` → `5`, `1E+3` → `1e3`).
fn leading_number(s: &str) -> Option<String> {
    let mut chars = s.chars().peekable();
    let mut sign = "";
    if let Some(&c @ ('-' | '+')) = chars.peek() {
        sign = if c == '-' { "-" } else { "" };
        chars.next();
    }

    let mut whole = String::new();
    let mut fraction = String::new();
    let mut seen_dot = false;
    while let Some(&c) = chars.peek() {
        match c {
            '0'..='9' if seen_dot => fraction.push(c),
            '0'..='9' => whole.push(c),
            '.' if !seen_dot => seen_dot = true,
            _ => break,
        }
        chars.next();
    }

    if whole.is_empty() && fraction.is_empty() {
        return None;
    }
    if whole.is_empty() {
        whole.push('0');
    }
    let mut number = format!("{sign}{whole}");
    if !fraction.is_empty() {
        number.push('.');
        number.push_str(&fraction);
    }
    if let Some(exponent) = exponent(chars) {
        number.push('e');
        number.push_str(&exponent);
    }
    Some(number)
}

/// `e[+-]digits` suffix without the marker. A bare `e` or sign is not an
/// exponent, so `1e` reads as `1`.
fn exponent(mut chars: impl Iterator<Item = char>) -> Option<String> {
    if !matches!(chars.next(), Some('e' | 'E')) {
        return None;
    }
    let mut chars = chars.peekable();
    let mut out = String::new();
    if let Some(&c @ ('-' | '+')) = chars.peek() {
        if c == '-' {
            out.push('-');
        }
        chars.next();
    }
    let digits: String = chars.take_while(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return None;
    }
    out.push_str(&digits);
    Some(out)
}
