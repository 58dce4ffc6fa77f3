//! Infrastructure layer for HTML parsing, configuration and logging
//!
//! The parsers turn a pre-parsed storefront document into the domain values;
//! fetching the page is left to the caller.

pub mod config;
pub mod logging;
pub mod parsing;
pub mod parsing_error;

// Re-export commonly used items
pub use self::config::{AppConfig, ConfigError, LoggingConfig};
pub use logging::{get_log_directory, init_logging, init_logging_with_config};
pub use parsing::{
    CartPageParser, ContextualParser, HtmlParser, ParseContext, ParsingConfig, ParsingError,
    ParsingResult, PriceLocaleDetector, RegionListParser, SeparatorConvention, Validator,
    parse_cart_countries, parse_cart_page,
};
