// Number-format helpers shared by the engine stages and its adapters.

// Brazilian number and currency format handling ("1.234,56", "R$ 12,50").
pub mod brazilian_format {
    use std::str::FromStr;
    use anyhow::{Result, anyhow};

    /// Currency symbol stripped by [`parse_currency`].
    pub const CURRENCY_SYMBOL: &str = "R$";

    // Parses decimals like "1.234,56" or "123,45" into f64
    pub fn parse_decimal(s: &str) -> Result<f64> {
        let normalized = s.trim()
            .replace('.', "")  // Remove thousand separators
            .replace(',', "."); // Replace decimal separator

        f64::from_str(&normalized)
            .map_err(|e| anyhow!("Failed to parse decimal '{}': {}", s, e))
    }

    /// Parses a monetary value such as `"R$ 1.234,56"`.
    ///
    /// A missing value counts as zero. Text that still is not a number once
    /// the symbol and separators are gone yields `None` instead of an error,
    /// so callers can treat it like any other unparseable cell.
    pub fn parse_currency(value: Option<&str>) -> Option<f64> {
        match value {
            None => Some(0.0),
            Some(raw) => parse_decimal(&raw.replace(CURRENCY_SYMBOL, ""))
                .ok()
                .filter(|v| !v.is_nan()),
        }
    }

    pub fn format_decimal(value: f64, decimals: usize) -> String {
        let formatted = format!("{:.decimals$}", value, decimals = decimals);
        formatted.replace('.', ",")
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_parse_decimal_simple() {
            assert_eq!(parse_decimal("123,45").unwrap(), 123.45);
        }

        #[test]
        fn test_parse_decimal_with_thousands() {
            assert_eq!(parse_decimal("1.234,56").unwrap(), 1234.56);
        }

        #[test]
        fn test_parse_decimal_large_number() {
            assert_eq!(parse_decimal("600.822.115,84").unwrap(), 600822115.84);
        }

        #[test]
        fn test_parse_decimal_rejects_text() {
            let err = parse_decimal("abc").unwrap_err();
            assert!(err.to_string().contains("Failed to parse decimal 'abc'"));
        }

        #[test]
        fn test_parse_currency_with_symbol() {
            assert_eq!(parse_currency(Some("R$ 1.234,56")), Some(1234.56));
            assert_eq!(parse_currency(Some("R$12,50")), Some(12.5));
        }

        #[test]
        fn test_parse_currency_without_symbol() {
            assert_eq!(parse_currency(Some("89,90")), Some(89.9));
            assert_eq!(parse_currency(Some(" 7 ")), Some(7.0));
        }

        #[test]
        fn test_parse_currency_null_is_zero() {
            assert_eq!(parse_currency(None), Some(0.0));
        }

        #[test]
        fn test_parse_currency_garbage_is_none() {
            assert_eq!(parse_currency(Some("R$ --")), None);
            assert_eq!(parse_currency(Some("")), None);
            assert_eq!(parse_currency(Some("NaN")), None);
        }

        #[test]
        fn test_format_decimal() {
            assert_eq!(format_decimal(1234.5, 2), "1234,50");
            assert_eq!(format_decimal(0.0, 0), "0");
        }
    }
}
