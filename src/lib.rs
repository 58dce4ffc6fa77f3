//! Cart Page Parser - structured extraction of storefront cart pages
//!
//! Turns a shopping-cart page into line items with typed product
//! identifiers, locale-aware prices in minor currency units, a validated
//! order total, and the list of regions the cart can be checked out in.
//!
//! ```no_run
//! use cart_page_parser_lib::infrastructure::parse_cart_page;
//! use scraper::Html;
//!
//! let html = std::fs::read_to_string("cart.html").unwrap();
//! let document = Html::parse_document(&html);
//! if let Some(cart) = parse_cart_page(Some(&document)) {
//!     println!("{} items, total {}", cart.items.len(), cart.total_minor_units());
//! }
//! ```

pub mod domain;
pub mod infrastructure;

pub use domain::{
    CartItem, CartResult, PriceField, ProductId, ProductKind, RegionEntry, RegionListResult,
    TotalCheck,
};
