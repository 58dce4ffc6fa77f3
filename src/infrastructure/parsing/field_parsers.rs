//! Field parsers: text -> candidate match -> typed value or failure
//!
//! Each stage is a small total function. A field that cannot be decoded is
//! returned as a failed value and never aborts the rest of the document.

use regex::Regex;

use super::ParsingResult;
use super::price_locale::{SeparatorConvention, compile_pattern};
use crate::domain::{PriceField, ProductId, ProductKind};

const ITEM_PRICE_PATTERN: &str = r"[,.\d]+";
/// Any number of digit groups joined by `.` or `,`. A single optional group
/// would stop grouped totals early (`1.263,98` read as `1.263`), so the
/// whole run is taken and the separator convention decides what it means.
const TOTAL_PRICE_PATTERN: &str = r"\d+(?:[.,]\d+)*";
const PRODUCT_PATH_PATTERN: &str = r"(\w+)/(\d+)";

/// Rewrite a locale-formatted amount so `.` is the only (decimal) separator
pub fn normalize_amount(candidate: &str, convention: SeparatorConvention) -> String {
    match convention {
        SeparatorConvention::DotDecimal => candidate.replace(',', ""),
        SeparatorConvention::CommaDecimal => candidate.replace('.', "").replace(',', "."),
    }
}

/// Convert a normalized decimal string to minor units, truncating past two
/// fraction digits. `None` for anything that is not `digits[.digits]`.
pub fn decimal_to_minor_units(normalized: &str) -> Option<i64> {
    let (whole, fraction) = normalized.split_once('.').unwrap_or((normalized, ""));

    if whole.is_empty() && fraction.is_empty() {
        return None;
    }
    if !whole.bytes().all(|b| b.is_ascii_digit()) || !fraction.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let whole_units = if whole.is_empty() {
        0
    } else {
        whole.parse::<i64>().ok()?
    };

    let cents = fraction
        .bytes()
        .chain(std::iter::repeat(b'0'))
        .take(2)
        .fold(0i64, |acc, b| acc * 10 + i64::from(b - b'0'));

    whole_units.checked_mul(100)?.checked_add(cents)
}

/// Compiled patterns for the per-field parsers
pub struct FieldParsers {
    item_price: Regex,
    total_price: Regex,
    product_path: Regex,
}

impl FieldParsers {
    pub fn new() -> ParsingResult<Self> {
        Ok(Self {
            item_price: compile_pattern(ITEM_PRICE_PATTERN)?,
            total_price: compile_pattern(TOTAL_PRICE_PATTERN)?,
            product_path: compile_pattern(PRODUCT_PATH_PATTERN)?,
        })
    }

    /// Line-item price. Text without any price characters fails.
    pub fn parse_price(&self, text: &str, convention: SeparatorConvention) -> PriceField {
        self.item_price
            .find(text)
            .and_then(|m| decimal_to_minor_units(&normalize_amount(m.as_str(), convention)))
            .map_or_else(|| PriceField::unparsed(text.trim()), PriceField::parsed)
    }

    /// Order total. Text with no digits at all reads as zero.
    pub fn parse_total(&self, text: &str, convention: SeparatorConvention) -> PriceField {
        let Some(candidate) = self.total_price.find(text) else {
            return PriceField::parsed(0);
        };

        decimal_to_minor_units(&normalize_amount(candidate.as_str(), convention))
            .map_or_else(|| PriceField::unparsed(text.trim()), PriceField::parsed)
    }

    /// Product reference path such as `https://store.example/app/730/Title/`
    pub fn parse_product_id(&self, href: Option<&str>) -> ProductId {
        let Some(captures) = href.and_then(|href| self.product_path.captures(href)) else {
            return ProductId::UNKNOWN;
        };

        let kind = captures
            .get(1)
            .map_or(ProductKind::Unknown, |m| ProductKind::from_token(m.as_str()));
        let id = captures.get(2).and_then(|m| m.as_str().parse::<u32>().ok());

        match id {
            Some(id) => ProductId::new(kind, id),
            None => ProductId::UNKNOWN,
        }
    }
}
