//! Per-country payout rates
//!
//! Advertisers pay per thousand views (CPM); a click earns the link owner
//! `rate / 1000`. Unknown or missing country codes fall back to the
//! rest-of-world rate.

use rust_decimal::Decimal;

/// (ISO country code, CPM in cents)
const CPM_TABLE: &[(&str, i64)] = &[
    ("US", 2200),
    ("GB", 2100),
    ("DE", 2000),
    ("AU", 1800),
    ("CA", 1700),
    ("FR", 1600),
    ("SE", 1500),
    ("NL", 1400),
    ("IN", 1000),
];

/// Rest-of-world CPM in cents.
const REST_OF_WORLD_CPM_CENTS: i64 = 500;

/// CPM for a country code (case-insensitive).
pub fn cpm_for(country: &str) -> Decimal {
    let code = country.trim().to_uppercase();
    let cents = CPM_TABLE
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, cents)| *cents)
        .unwrap_or(REST_OF_WORLD_CPM_CENTS);
    Decimal::new(cents, 2)
}

/// Earnings credited for a single click from a country.
pub fn per_click(country: &str) -> Decimal {
    cpm_for(country) / Decimal::from(1000)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_country_rates() {
        assert_eq!(cpm_for("US"), Decimal::new(2200, 2));
        assert_eq!(cpm_for("in"), Decimal::new(1000, 2));
    }

    #[test]
    fn test_unknown_country_falls_back() {
        assert_eq!(cpm_for("ZZ"), Decimal::new(500, 2));
        assert_eq!(cpm_for(""), Decimal::new(500, 2));
    }

    #[test]
    fn test_per_click_is_cpm_over_thousand() {
        // 22.00 / 1000 = 0.022
        assert_eq!(per_click("US"), Decimal::new(22, 3));
        assert_eq!(per_click("ZZ"), Decimal::new(5, 3));
    }
}
