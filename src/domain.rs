//! Domain module - cart and region value objects
//!
//! Plain immutable values produced by the parsers in `infrastructure`.
//! Nothing here touches markup.

pub mod cart;
pub mod region;

pub use cart::{CartItem, CartResult, PriceField, ProductId, ProductKind, TotalCheck};
pub use region::{RegionEntry, RegionListResult};
