//! Decimal separator inference
//!
//! Cart pages render prices in the shopper's locale without declaring it.
//! Currency fractions are one or two digits while thousands groups are always
//! three, so the first price ending in a separator followed by one or two
//! digits settles the convention for the whole page.

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{ParsingError, ParsingResult};

const PRICE_CANDIDATE_PATTERN: &str = r"[0-9,.]+";
const TRAILING_FRACTION_PATTERN: &str = r"([.,])\d\d?$";

/// Which character separates the fraction on a page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeparatorConvention {
    /// `1,234.56`
    #[default]
    DotDecimal,
    /// `1.234,56`
    CommaDecimal,
}

impl SeparatorConvention {
    pub const fn dot_is_decimal(self) -> bool {
        matches!(self, Self::DotDecimal)
    }

    const fn from_decimal_char(separator: char) -> Self {
        match separator {
            ',' => Self::CommaDecimal,
            _ => Self::DotDecimal,
        }
    }
}

pub struct PriceLocaleDetector {
    candidate: Regex,
    trailing_fraction: Regex,
}

impl PriceLocaleDetector {
    pub fn new() -> ParsingResult<Self> {
        Ok(Self {
            candidate: compile_pattern(PRICE_CANDIDATE_PATTERN)?,
            trailing_fraction: compile_pattern(TRAILING_FRACTION_PATTERN)?,
        })
    }

    /// Convention implied by a single price text, if it is decisive
    pub fn decisive_convention(&self, price_text: &str) -> Option<SeparatorConvention> {
        let candidate = self.candidate.find(price_text)?;
        let captures = self.trailing_fraction.captures(candidate.as_str())?;
        let separator = captures.get(1)?.as_str().chars().next()?;
        Some(SeparatorConvention::from_decimal_char(separator))
    }

    /// Scan price texts in document order; defaults to dot-decimal
    pub fn detect<I, S>(&self, price_texts: I) -> SeparatorConvention
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let detected = price_texts
            .into_iter()
            .find_map(|text| self.decisive_convention(text.as_ref()));

        match detected {
            Some(convention) => {
                debug!("Detected price convention {:?}", convention);
                convention
            }
            None => {
                debug!("No decisive price found, assuming dot decimal separator");
                SeparatorConvention::default()
            }
        }
    }
}

pub(crate) fn compile_pattern(pattern: &str) -> ParsingResult<Regex> {
    Regex::new(pattern).map_err(|e| ParsingError::invalid_pattern(pattern, e))
}
