//! Locale-aware number, currency and date formatting.
//!
//! Formatting goes through the [`LocaleFormatter`] trait so the store never
//! depends on host locale data. [`StandardFormatter`] carries the conventions
//! of the standard numeric formatters for the tags the site uses plus a few
//! common ones; unknown tags use en-US conventions.

use chrono::{Datelike, NaiveDate};

/// Maximum fraction digits for plain numbers, matching standard formatters.
const MAX_FRACTION_DIGITS: usize = 3;

const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Formatting contract used by [`LanguageStore`](crate::i18n::LanguageStore).
pub trait LocaleFormatter: Send + Sync {
    /// Format a plain number with grouping, at most three fraction digits.
    fn format_number(&self, value: f64, locale_tag: &str) -> String;

    /// Format a monetary amount in `currency` (ISO 4217 code).
    fn format_currency(&self, value: f64, currency: &str, locale_tag: &str) -> String;

    /// Render `date` with a pattern made of `YYYY`, `MM`, `MMM` and `DD` tokens.
    fn format_date(&self, date: NaiveDate, pattern: &str) -> String {
        let month_name = MONTH_ABBREVIATIONS[date.month0() as usize];
        pattern
            .replace("YYYY", &format!("{:04}", date.year()))
            .replace("MMM", month_name)
            .replace("MM", &format!("{:02}", date.month()))
            .replace("DD", &format!("{:02}", date.day()))
    }
}

/// Separators used by a locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberConventions {
    pub group_separator: &'static str,
    pub decimal_separator: &'static str,
    /// Whether the currency symbol follows the amount ("1.234,56 €")
    pub symbol_after: bool,
}

impl NumberConventions {
    pub fn for_tag(locale_tag: &str) -> NumberConventions {
        match locale_tag {
            "de-DE" | "es-ES" | "it-IT" | "pt-BR" => NumberConventions {
                group_separator: ".",
                decimal_separator: ",",
                symbol_after: true,
            },
            "fr-FR" => NumberConventions {
                group_separator: "\u{202f}",
                decimal_separator: ",",
                symbol_after: true,
            },
            // en-US, ko-KR, ja-JP, zh-CN, en-GB and unknown tags
            _ => NumberConventions {
                group_separator: ",",
                decimal_separator: ".",
                symbol_after: false,
            },
        }
    }
}

/// Formatter backed by a fixed table of locale conventions.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardFormatter;

impl StandardFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl LocaleFormatter for StandardFormatter {
    fn format_number(&self, value: f64, locale_tag: &str) -> String {
        if !value.is_finite() {
            return non_finite(value);
        }
        let conventions = NumberConventions::for_tag(locale_tag);
        let body = group_digits(value.abs(), MAX_FRACTION_DIGITS, true, &conventions);
        with_sign(value, body)
    }

    fn format_currency(&self, value: f64, currency: &str, locale_tag: &str) -> String {
        if !value.is_finite() {
            return non_finite(value);
        }
        let conventions = NumberConventions::for_tag(locale_tag);
        let digits = currency_fraction_digits(currency);
        let amount = group_digits(value.abs(), digits, false, &conventions);
        let symbol = currency_symbol(currency, locale_tag);

        let body = if conventions.symbol_after {
            format!("{}\u{a0}{}", amount, symbol)
        } else {
            format!("{}{}", symbol, amount)
        };
        with_sign(value, body)
    }
}

fn non_finite(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value > 0.0 {
        "∞".to_string()
    } else {
        "-∞".to_string()
    }
}

fn with_sign(value: f64, body: String) -> String {
    // Values that round to zero keep their sign in standard formatters ("-0")
    if value.is_sign_negative() && value != 0.0 {
        format!("-{}", body)
    } else {
        body
    }
}

/// Render a non-negative value with `fraction_digits` decimals, grouping the
/// integer part in threes. With `trim` set, trailing fractional zeros (and a
/// dangling decimal separator) are removed.
fn group_digits(
    value: f64,
    fraction_digits: usize,
    trim: bool,
    conventions: &NumberConventions,
) -> String {
    let fixed = format!("{:.*}", fraction_digits, value);
    let (integer, fraction) = match fixed.split_once('.') {
        Some((integer, fraction)) => (integer, fraction),
        None => (fixed.as_str(), ""),
    };

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (index, digit) in integer.chars().enumerate() {
        if index > 0 && (integer.len() - index) % 3 == 0 {
            grouped.push_str(conventions.group_separator);
        }
        grouped.push(digit);
    }

    let fraction = if trim {
        fraction.trim_end_matches('0')
    } else {
        fraction
    };
    if fraction.is_empty() {
        grouped
    } else {
        format!("{}{}{}", grouped, conventions.decimal_separator, fraction)
    }
}

fn currency_fraction_digits(currency: &str) -> usize {
    match currency {
        "KRW" | "JPY" | "VND" | "CLP" | "ISK" => 0,
        "BHD" | "KWD" | "JOD" | "OMR" | "TND" => 3,
        _ => 2,
    }
}

/// Symbol for `currency` as displayed in `locale_tag`.
///
/// The dollar sign is only bare in the currency's home locale; elsewhere the
/// symbol is disambiguated ("US$").
fn currency_symbol(currency: &str, locale_tag: &str) -> String {
    let symbol = match (currency, locale_tag) {
        ("USD", "en-US") => "$",
        ("USD", _) => "US$",
        ("KRW", _) => "₩",
        ("EUR", _) => "€",
        ("GBP", _) => "£",
        ("JPY", "ja-JP") => "￥",
        ("JPY", _) => "¥",
        ("CAD", "en-CA") => "$",
        ("CAD", _) => "CA$",
        (other, _) => return format!("{}\u{a0}", other),
    };
    symbol.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn fmt() -> StandardFormatter {
        StandardFormatter::new()
    }

    // ==================== Number Tests ====================

    #[test]
    fn test_format_number_grouping() {
        assert_eq!(fmt().format_number(1234567.0, "en-US"), "1,234,567");
        assert_eq!(fmt().format_number(1234567.0, "ko-KR"), "1,234,567");
        assert_eq!(fmt().format_number(1234567.0, "de-DE"), "1.234.567");
    }

    #[test]
    fn test_format_number_fraction() {
        assert_eq!(fmt().format_number(1234.5, "en-US"), "1,234.5");
        assert_eq!(fmt().format_number(1234.5678, "en-US"), "1,234.568");
        assert_eq!(fmt().format_number(1234.5, "de-DE"), "1.234,5");
        assert_eq!(fmt().format_number(0.1, "ko-KR"), "0.1");
    }

    #[test]
    fn test_format_number_small_and_negative() {
        assert_eq!(fmt().format_number(0.0, "en-US"), "0");
        assert_eq!(fmt().format_number(999.0, "en-US"), "999");
        assert_eq!(fmt().format_number(1000.0, "en-US"), "1,000");
        assert_eq!(fmt().format_number(-1234.0, "en-US"), "-1,234");
    }

    #[test]
    fn test_format_number_non_finite() {
        assert_eq!(fmt().format_number(f64::NAN, "en-US"), "NaN");
        assert_eq!(fmt().format_number(f64::INFINITY, "en-US"), "∞");
        assert_eq!(fmt().format_number(f64::NEG_INFINITY, "en-US"), "-∞");
    }

    #[test]
    fn test_format_number_unknown_tag_uses_default_conventions() {
        assert_eq!(fmt().format_number(1234.5, "xx-XX"), "1,234.5");
    }

    // ==================== Currency Tests ====================

    #[test]
    fn test_format_currency_usd() {
        assert_eq!(fmt().format_currency(1234.5, "USD", "en-US"), "$1,234.50");
        assert_eq!(fmt().format_currency(1234.5, "USD", "ko-KR"), "US$1,234.50");
        assert_eq!(fmt().format_currency(-5.0, "USD", "en-US"), "-$5.00");
    }

    #[test]
    fn test_format_currency_krw_has_no_fraction() {
        assert_eq!(fmt().format_currency(1234567.0, "KRW", "ko-KR"), "₩1,234,567");
        assert_eq!(fmt().format_currency(1234.6, "KRW", "en-US"), "₩1,235");
    }

    #[test]
    fn test_format_currency_symbol_after() {
        assert_eq!(
            fmt().format_currency(1234.5, "EUR", "de-DE"),
            "1.234,50\u{a0}€"
        );
    }

    #[test]
    fn test_format_currency_unknown_code() {
        assert_eq!(fmt().format_currency(10.0, "CHF", "en-US"), "CHF\u{a0}10.00");
    }

    // ==================== Date Tests ====================

    #[test]
    fn test_format_date_patterns() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        assert_eq!(fmt().format_date(date, "YYYY년 MM월 DD일"), "2024년 03월 07일");
        assert_eq!(fmt().format_date(date, "MMM DD, YYYY"), "Mar 07, 2024");
    }

    // ==================== Properties ====================

    proptest! {
        #[test]
        fn prop_grouping_round_trips_integers(n in 0u64..1_000_000_000_000u64) {
            let formatted = fmt().format_number(n as f64, "en-US");
            let digits: String = formatted.chars().filter(|c| *c != ',').collect();
            prop_assert_eq!(digits, n.to_string());
            for group in formatted.split(',').skip(1) {
                prop_assert_eq!(group.len(), 3);
            }
        }

        #[test]
        fn prop_de_and_en_differ_only_in_separators(n in 0u64..1_000_000_000u64, frac in 1u32..10) {
            let value = n as f64 + frac as f64 / 10.0;
            let en = fmt().format_number(value, "en-US");
            let de = fmt().format_number(value, "de-DE");
            let swapped: String = en
                .chars()
                .map(|c| match c { ',' => '.', '.' => ',', other => other })
                .collect();
            prop_assert_eq!(swapped, de);
        }
    }
}
