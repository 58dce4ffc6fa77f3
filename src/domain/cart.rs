//! Cart value objects extracted from a storefront cart page
//!
//! Everything here is an immutable value built fresh per parsed document.
//! Prices are kept in integer minor currency units (1/100 of the display
//! unit) so totals never accumulate floating point error.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Purchasable entity category encoded in a product reference path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductKind {
    App,
    Sub,
    Bundle,
    Unknown,
}

impl ProductKind {
    /// Map a path token (case-insensitive) to a kind
    pub fn from_token(token: &str) -> Self {
        match token.to_ascii_uppercase().as_str() {
            "APP" => Self::App,
            "SUB" => Self::Sub,
            "BUNDLE" => Self::Bundle,
            _ => Self::Unknown,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::App => "app",
            Self::Sub => "sub",
            Self::Bundle => "bundle",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ProductKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Typed product identifier, e.g. `sub/12345`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProductId {
    pub kind: ProductKind,
    pub id: u32,
}

impl ProductId {
    /// Identifier used whenever the reference path is missing or malformed
    pub const UNKNOWN: Self = Self {
        kind: ProductKind::Unknown,
        id: 0,
    };

    /// An unrecognized kind always collapses to `UNKNOWN`, whatever the id.
    pub const fn new(kind: ProductKind, id: u32) -> Self {
        match kind {
            ProductKind::Unknown => Self::UNKNOWN,
            _ => Self { kind, id },
        }
    }

    pub fn is_known(&self) -> bool {
        self.kind != ProductKind::Unknown
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.kind, self.id)
    }
}

/// A monetary field read from the page.
///
/// Failed fields keep the raw text they were read from so callers can surface
/// diagnostics. The legacy `-100` minor-unit sentinel is still available via
/// [`PriceField::minor_units_or_sentinel`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PriceField {
    Parsed { minor_units: i64 },
    Unparsed { raw: String },
}

impl PriceField {
    /// `-1` display units, i.e. "price unparseable"
    pub const FAILED_MINOR_UNITS: i64 = -100;

    pub const fn parsed(minor_units: i64) -> Self {
        Self::Parsed { minor_units }
    }

    pub fn unparsed(raw: impl Into<String>) -> Self {
        Self::Unparsed { raw: raw.into() }
    }

    pub const fn minor_units(&self) -> Option<i64> {
        match self {
            Self::Parsed { minor_units } => Some(*minor_units),
            Self::Unparsed { .. } => None,
        }
    }

    pub const fn minor_units_or_sentinel(&self) -> i64 {
        match self {
            Self::Parsed { minor_units } => *minor_units,
            Self::Unparsed { .. } => Self::FAILED_MINOR_UNITS,
        }
    }

    pub const fn is_parsed(&self) -> bool {
        matches!(self, Self::Parsed { .. })
    }
}

/// One line item of the cart.
///
/// Equality covers identifier, name and price in minor units: the same
/// product listed twice at different prices stays two entries. The raw text
/// of an unparsed price does not take part, so every failed price compares
/// equal to every other.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItem {
    pub id: ProductId,
    pub name: String,
    pub price: PriceField,
}

impl PartialEq for CartItem {
    fn eq(&self, other: &Self) -> bool {
        self.identity() == other.identity()
    }
}

impl Eq for CartItem {}

impl Hash for CartItem {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identity().hash(state);
    }
}

impl CartItem {
    pub fn new(id: ProductId, name: impl Into<String>, price: PriceField) -> Self {
        Self {
            id,
            name: name.into(),
            price,
        }
    }

    pub const fn price_minor_units(&self) -> i64 {
        self.price.minor_units_or_sentinel()
    }

    fn identity(&self) -> (ProductId, &str, i64) {
        (self.id, &self.name, self.price_minor_units())
    }
}

/// Outcome of comparing the declared order total against the line items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum TotalCheck {
    Consistent,
    Mismatch { items_sum: i64, declared: i64 },
    /// Empty cart, or a price/total that failed to parse
    Indeterminate,
}

/// Structured cart page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartResult {
    /// Distinct items in first-seen document order
    pub items: Vec<CartItem>,
    pub total: PriceField,
    pub allows_self_purchase: bool,
    pub allows_gift_purchase: bool,
}

impl Default for CartResult {
    fn default() -> Self {
        Self::empty()
    }
}

impl CartResult {
    /// Canonical empty cart: no items, zero total, no purchase options
    pub const fn empty() -> Self {
        Self {
            items: Vec::new(),
            total: PriceField::parsed(0),
            allows_self_purchase: false,
            allows_gift_purchase: false,
        }
    }

    /// Build a result, collapsing exact duplicate items.
    ///
    /// An empty item list yields [`CartResult::empty`] whatever the other
    /// arguments say.
    pub fn new(
        items: impl IntoIterator<Item = CartItem>,
        total: PriceField,
        allows_self_purchase: bool,
        allows_gift_purchase: bool,
    ) -> Self {
        let items = dedup_items(items);
        if items.is_empty() {
            return Self::empty();
        }

        Self {
            items,
            total,
            allows_self_purchase,
            allows_gift_purchase,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub const fn total_minor_units(&self) -> i64 {
        self.total.minor_units_or_sentinel()
    }

    /// Sum of all item prices, `None` if any price failed to parse or the sum overflows
    pub fn items_sum(&self) -> Option<i64> {
        self.items
            .iter()
            .try_fold(0i64, |acc, item| acc.checked_add(item.price.minor_units()?))
    }

    pub fn check_total(&self) -> TotalCheck {
        if self.is_empty() {
            return TotalCheck::Indeterminate;
        }

        match (self.items_sum(), self.total.minor_units()) {
            (Some(items_sum), Some(declared)) if items_sum == declared => TotalCheck::Consistent,
            (Some(items_sum), Some(declared)) => TotalCheck::Mismatch { items_sum, declared },
            _ => TotalCheck::Indeterminate,
        }
    }
}

/// Set semantics over `(id, name, minor units)`, keeping first-seen order
pub fn dedup_items(items: impl IntoIterator<Item = CartItem>) -> Vec<CartItem> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: u32, name: &str, minor_units: i64) -> CartItem {
        CartItem::new(
            ProductId::new(ProductKind::App, id),
            name,
            PriceField::parsed(minor_units),
        )
    }

    #[test]
    fn test_kind_from_token_is_case_insensitive() {
        assert_eq!(ProductKind::from_token("app"), ProductKind::App);
        assert_eq!(ProductKind::from_token("Sub"), ProductKind::Sub);
        assert_eq!(ProductKind::from_token("BUNDLE"), ProductKind::Bundle);
        assert_eq!(ProductKind::from_token("weird"), ProductKind::Unknown);
    }

    #[test]
    fn test_unknown_kind_drops_id() {
        assert_eq!(ProductId::new(ProductKind::Unknown, 42), ProductId::UNKNOWN);
        assert_eq!(ProductId::new(ProductKind::Sub, 12345).to_string(), "sub/12345");
    }

    #[test]
    fn test_failed_price_keeps_sentinel() {
        let price = PriceField::unparsed("Free");
        assert_eq!(price.minor_units(), None);
        assert_eq!(price.minor_units_or_sentinel(), -100);
    }

    #[test]
    fn test_duplicates_collapse_but_price_differences_survive() {
        let result = CartResult::new(
            vec![item(10, "Game", 999), item(10, "Game", 999), item(10, "Game", 499)],
            PriceField::parsed(1498),
            true,
            false,
        );

        assert_eq!(result.items.len(), 2);
        assert_eq!(result.items[0].price_minor_units(), 999);
        assert_eq!(result.items[1].price_minor_units(), 499);
        assert_eq!(result.check_total(), TotalCheck::Consistent);
    }

    #[test]
    fn test_failed_prices_collapse_whatever_their_text() {
        let id = ProductId::new(ProductKind::App, 1);
        let result = CartResult::new(
            vec![
                CartItem::new(id, "G", PriceField::unparsed("Free")),
                CartItem::new(id, "G", PriceField::unparsed("Free to Play")),
                CartItem::new(id, "G", PriceField::unparsed("")),
            ],
            PriceField::parsed(0),
            true,
            false,
        );

        assert_eq!(result.items.len(), 1);
        assert_eq!(result.items[0].price, PriceField::unparsed("Free"));
        assert_eq!(result.items[0].price_minor_units(), -100);
    }

    #[test]
    fn test_no_items_is_canonical_empty() {
        let result = CartResult::new(Vec::new(), PriceField::parsed(5000), true, true);
        assert_eq!(result, CartResult::empty());
        assert_eq!(result.total_minor_units(), 0);
        assert_eq!(result.check_total(), TotalCheck::Indeterminate);
    }

    #[test]
    fn test_total_mismatch_and_indeterminate() {
        let result = CartResult::new(vec![item(1, "A", 100)], PriceField::parsed(150), false, false);
        assert_eq!(
            result.check_total(),
            TotalCheck::Mismatch { items_sum: 100, declared: 150 }
        );

        let broken = CartResult::new(
            vec![CartItem::new(ProductId::UNKNOWN, "B", PriceField::unparsed(""))],
            PriceField::parsed(0),
            false,
            false,
        );
        assert_eq!(broken.items_sum(), None);
        assert_eq!(broken.check_total(), TotalCheck::Indeterminate);
    }
}
