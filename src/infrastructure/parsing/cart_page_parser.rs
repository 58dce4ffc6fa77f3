//! Cart page parser
//!
//! Extracts line items, the estimated total and the purchase options from a
//! storefront cart page. The separator convention is detected once per
//! document and then applied to every price on it.
//!
//! Markup on the page is not contractually stable, so a broken field degrades
//! to an `Unknown` identifier or an unparsed price instead of failing the
//! whole document.

use once_cell::sync::Lazy;
use scraper::{ElementRef, Html};
use tracing::{debug, error, warn};

use super::config::{CartSelectors, CompiledCartSelectors};
use super::field_parsers::FieldParsers;
use super::price_locale::{PriceLocaleDetector, SeparatorConvention};
use super::{ContextualParser, HtmlParser, ParseContext, ParsingError, ParsingResult, Validator};
use crate::domain::{CartItem, CartResult, PriceField, TotalCheck};

static DEFAULT_CART_PARSER: Lazy<ParsingResult<CartPageParser>> = Lazy::new(CartPageParser::new);

/// Parse a cart page with the default selectors.
///
/// Returns `None` only when no document is supplied.
pub fn parse_cart_page(document: Option<&Html>) -> Option<CartResult> {
    let document = document?;

    match DEFAULT_CART_PARSER.as_ref() {
        Ok(parser) => Some(parser.parse_with_context(document, &ParseContext::default())),
        Err(e) => {
            error!("Default cart parser unavailable: {}", e);
            None
        }
    }
}

/// Parser for storefront cart pages
pub struct CartPageParser {
    selectors: CompiledCartSelectors,
    locale_detector: PriceLocaleDetector,
    fields: FieldParsers,
}

impl CartPageParser {
    /// Create a new cart page parser with default selectors
    pub fn new() -> ParsingResult<Self> {
        Self::with_config(&CartSelectors::default())
    }

    /// Create parser with custom selector configuration
    pub fn with_config(selectors: &CartSelectors) -> ParsingResult<Self> {
        Ok(Self {
            selectors: selectors.compile()?,
            locale_detector: PriceLocaleDetector::new()?,
            fields: FieldParsers::new()?,
        })
    }

    /// Separator convention of the page, read from its line-item prices
    pub fn detect_convention(&self, document: &Html) -> SeparatorConvention {
        let price_texts = document
            .select(&self.selectors.item_container)
            .filter_map(|item| self.price_text(item));
        self.locale_detector.detect(price_texts)
    }

    fn price_text(&self, item: ElementRef<'_>) -> Option<String> {
        item.select(&self.selectors.item_price).next().map(element_text)
    }

    fn extract_item(
        &self,
        item: ElementRef<'_>,
        index: usize,
        convention: SeparatorConvention,
        context: &ParseContext,
    ) -> CartItem {
        let link = item.select(&self.selectors.item_link).next();
        if link.is_none() {
            warn!("Cart item {} on {} has no name/link element", index, context.source);
        }

        let name = link.map(|link| element_text(link).trim().to_string()).unwrap_or_default();
        let id = self
            .fields
            .parse_product_id(link.and_then(|link| link.value().attr("href")));
        if !id.is_known() {
            warn!("Cart item {} ('{}') has an unrecognized product reference", index, name);
        }

        let price = match self.price_text(item) {
            Some(text) => self.fields.parse_price(&text, convention),
            None => PriceField::unparsed(""),
        };
        if let PriceField::Unparsed { raw } = &price {
            warn!("Cart item {} ('{}') has an unparseable price: '{}'", index, name, raw);
        }

        CartItem::new(id, name, price)
    }

    fn extract_total(
        &self,
        document: &Html,
        convention: SeparatorConvention,
        context: &ParseContext,
    ) -> PriceField {
        match document.select(&self.selectors.estimated_total).next() {
            Some(total) => self.fields.parse_total(&element_text(total), convention),
            None => {
                warn!("Cart on {} has items but no estimated total element", context.source);
                PriceField::unparsed("")
            }
        }
    }

    fn is_present(document: &Html, selector: &scraper::Selector) -> bool {
        document.select(selector).next().is_some()
    }
}

impl ContextualParser for CartPageParser {
    type Output = CartResult;
    type Context = ParseContext;

    fn parse_with_context(&self, html: &Html, context: &Self::Context) -> Self::Output {
        let convention = self.detect_convention(html);

        let items: Vec<CartItem> = html
            .select(&self.selectors.item_container)
            .enumerate()
            .map(|(index, item)| self.extract_item(item, index, convention, context))
            .collect();

        if items.is_empty() {
            debug!("No cart items found on {}", context.source);
            return CartResult::empty();
        }

        let total = self.extract_total(html, convention, context);
        let result = CartResult::new(
            items,
            total,
            Self::is_present(html, &self.selectors.purchase_self),
            Self::is_present(html, &self.selectors.purchase_gift),
        );

        debug!(
            source = %context.source,
            metadata = ?context.metadata,
            "Parsed {} distinct cart items, total {} minor units ({:?})",
            result.items.len(),
            result.total_minor_units(),
            convention
        );

        if let Err(e) = CartTotalValidator.validate(&result) {
            warn!("Cart on {}: {}", context.source, e);
        }

        result
    }
}

impl HtmlParser for CartPageParser {
    type Output = CartResult;

    fn parse(&self, html: &str) -> Self::Output {
        let document = Html::parse_document(html);
        self.parse_with_context(&document, &ParseContext::default())
    }
}

/// Checks the declared total against the sum of the line items.
///
/// Carts whose total cannot be checked (empty, or containing unparsed prices)
/// pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct CartTotalValidator;

impl Validator<CartResult> for CartTotalValidator {
    fn validate(&self, data: &CartResult) -> ParsingResult<()> {
        match data.check_total() {
            TotalCheck::Mismatch { items_sum, declared } => {
                Err(ParsingError::TotalMismatch { items_sum, declared })
            }
            TotalCheck::Consistent | TotalCheck::Indeterminate => Ok(()),
        }
    }
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect()
}
