//! Promotions
//!
//! Promo codes are a fixed set of tokens, each worth a percentage off the cart subtotal.

use std::{fmt, str::FromStr};

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors raised while parsing promo codes.
#[derive(Debug, Error, PartialEq)]
pub enum PromoError {
    /// The code is empty or not one of the known promo codes.
    #[error("Unknown promo code: {0:?}")]
    UnknownPromoCode(String),
}

impl PromoError {
    /// Whether the rejected input was empty (or only whitespace).
    pub fn is_empty_input(&self) -> bool {
        match self {
            PromoError::UnknownPromoCode(code) => code.trim().is_empty(),
        }
    }
}

/// A recognised promo code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PromoCode {
    /// 10% off the subtotal.
    Save10,

    /// 20% off the subtotal.
    Game20,
}

impl PromoCode {
    /// Every recognised promo code.
    pub const ALL: [PromoCode; 2] = [PromoCode::Save10, PromoCode::Game20];

    /// The token a shopper types in.
    pub fn code(self) -> &'static str {
        match self {
            PromoCode::Save10 => "SAVE10",
            PromoCode::Game20 => "GAME20",
        }
    }

    /// Discount in whole percent points.
    pub fn percent_points(self) -> u32 {
        match self {
            PromoCode::Save10 => 10,
            PromoCode::Game20 => 20,
        }
    }

    /// Fraction of the subtotal taken off.
    pub fn rate(self) -> Percentage {
        Percentage::from(Decimal::new(i64::from(self.percent_points()), 2))
    }

    /// Parse optional shopper input, where blank input means no promo.
    ///
    /// # Errors
    ///
    /// Returns [`PromoError::UnknownPromoCode`] if the input is non-blank and not recognised.
    pub fn parse_optional(input: Option<&str>) -> Result<Option<PromoCode>, PromoError> {
        match input.map(str::trim) {
            None | Some("") => Ok(None),
            Some(code) => code.parse().map(Some),
        }
    }
}

impl FromStr for PromoCode {
    type Err = PromoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalised = s.trim().to_ascii_uppercase();

        PromoCode::ALL
            .into_iter()
            .find(|promo| promo.code() == normalised)
            .ok_or_else(|| PromoError::UnknownPromoCode(s.to_string()))
    }
}

impl fmt::Display for PromoCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn parses_known_codes() -> TestResult {
        assert_eq!("SAVE10".parse::<PromoCode>()?, PromoCode::Save10);
        assert_eq!("GAME20".parse::<PromoCode>()?, PromoCode::Game20);

        Ok(())
    }

    #[test]
    fn parse_trims_and_ignores_case() -> TestResult {
        assert_eq!("  save10 ".parse::<PromoCode>()?, PromoCode::Save10);
        assert_eq!("Game20".parse::<PromoCode>()?, PromoCode::Game20);

        Ok(())
    }

    #[test]
    fn parse_rejects_unknown_codes() {
        let result = "SAVE50".parse::<PromoCode>();

        assert_eq!(
            result,
            Err(PromoError::UnknownPromoCode("SAVE50".to_string()))
        );
    }

    #[test]
    fn parse_rejects_empty_input() {
        let result = "".parse::<PromoCode>();

        assert!(matches!(&result, Err(err) if err.is_empty_input()));
    }

    #[test]
    fn unknown_code_is_not_empty_input() {
        assert!(!PromoError::UnknownPromoCode("NOPE".to_string()).is_empty_input());
    }

    #[test]
    fn parse_optional_treats_blank_as_none() -> TestResult {
        assert_eq!(PromoCode::parse_optional(None)?, None);
        assert_eq!(PromoCode::parse_optional(Some("   "))?, None);
        assert_eq!(
            PromoCode::parse_optional(Some("game20"))?,
            Some(PromoCode::Game20)
        );

        Ok(())
    }

    #[test]
    fn parse_optional_rejects_unknown_codes() {
        assert!(PromoCode::parse_optional(Some("FREE")).is_err());
    }

    #[test]
    fn rates_match_percent_points() {
        assert_eq!(PromoCode::Save10.rate() * Decimal::ONE, Decimal::new(10, 2));
        assert_eq!(PromoCode::Game20.rate() * Decimal::ONE, Decimal::new(20, 2));
    }

    #[test]
    fn display_uses_code() {
        assert_eq!(PromoCode::Save10.to_string(), "SAVE10");
        assert_eq!(format!("{}", PromoCode::Game20), "GAME20");
    }
}
