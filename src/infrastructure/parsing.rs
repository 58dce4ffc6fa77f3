//! HTML parsing infrastructure for storefront cart pages
//!
//! Trait-based parsers over a pre-parsed `scraper::Html` document. Parsers
//! compile their selectors and patterns once and hold no mutable state, so a
//! single instance can serve any number of documents concurrently.

pub mod cart_page_parser;
pub mod config;
pub mod context;
pub mod error;
pub mod field_parsers;
pub mod price_locale;
pub mod region_list_parser;

// Re-export public types
pub use cart_page_parser::{CartPageParser, CartTotalValidator, parse_cart_page};
pub use self::config::{CartSelectors, ParsingConfig, RegionMessages, RegionSelectors};
pub use context::ParseContext;
pub use error::{ParsingError, ParsingResult};
pub use field_parsers::FieldParsers;
pub use price_locale::{PriceLocaleDetector, SeparatorConvention};
pub use region_list_parser::{RegionListParser, parse_cart_countries, render_region_report};

use scraper::Html;

/// Parser over raw HTML text
pub trait HtmlParser {
    type Output;

    /// Parse HTML content into the parser's output
    fn parse(&self, html: &str) -> Self::Output;
}

/// Parser over an already materialized document
pub trait ContextualParser {
    type Output;
    type Context;

    /// Parse HTML with contextual information
    fn parse_with_context(&self, html: &Html, context: &Self::Context) -> Self::Output;
}

/// Validation trait for parsed results
pub trait Validator<T> {
    /// Validate parsed data for consistency
    fn validate(&self, data: &T) -> ParsingResult<()>;
}
