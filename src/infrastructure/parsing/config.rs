//! Parsing configuration for cart page extraction
//!
//! Centralized CSS selectors and report templates. The defaults describe the
//! storefront's current markup; every literal can be overridden from the
//! config file when the page layout shifts.

use scraper::Selector;
use serde::{Deserialize, Serialize};

use super::{ParsingError, ParsingResult};

/// Main parsing configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParsingConfig {
    pub cart_selectors: CartSelectors,
    pub region_selectors: RegionSelectors,
    pub region_messages: RegionMessages,
}

impl ParsingConfig {
    pub fn validate(&self) -> ParsingResult<()> {
        self.cart_selectors.compile()?;
        self.region_selectors.compile()?;
        self.region_messages.validate()
    }
}

/// CSS selectors for the cart page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CartSelectors {
    /// Line-item containers
    pub item_container: String,
    /// Name/link element, relative to an item container
    pub item_link: String,
    /// Price element, relative to an item container
    pub item_price: String,
    pub estimated_total: String,
    pub purchase_self: String,
    pub purchase_gift: String,
}

impl Default for CartSelectors {
    fn default() -> Self {
        Self {
            item_container: "div[class='cart_item_list'] > div".to_string(),
            item_link: "div[class='cart_item_desc'] > a".to_string(),
            item_price: "div[class='price']".to_string(),
            estimated_total: "div#cart_estimated_total".to_string(),
            purchase_self: "a#btn_purchase_self".to_string(),
            purchase_gift: "a#btn_purchase_gift".to_string(),
        }
    }
}

/// Compiled form of [`CartSelectors`]
#[derive(Debug, Clone)]
pub struct CompiledCartSelectors {
    pub item_container: Selector,
    pub item_link: Selector,
    pub item_price: Selector,
    pub estimated_total: Selector,
    pub purchase_self: Selector,
    pub purchase_gift: Selector,
}

impl CartSelectors {
    pub fn compile(&self) -> ParsingResult<CompiledCartSelectors> {
        Ok(CompiledCartSelectors {
            item_container: compile_selector("item_container", &self.item_container)?,
            item_link: compile_selector("item_link", &self.item_link)?,
            item_price: compile_selector("item_price", &self.item_price)?,
            estimated_total: compile_selector("estimated_total", &self.estimated_total)?,
            purchase_self: compile_selector("purchase_self", &self.purchase_self)?,
            purchase_gift: compile_selector("purchase_gift", &self.purchase_gift)?,
        })
    }
}

/// CSS selectors and attribute names for the checkout region dropdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegionSelectors {
    /// Input whose value attribute holds the current region code
    pub current_region: String,
    pub region_links: String,
    pub current_value_attribute: String,
    pub code_attribute: String,
    /// Codes that belong to helper controls rather than regions
    pub excluded_codes: Vec<String>,
}

impl Default for RegionSelectors {
    fn default() -> Self {
        Self {
            current_region: "input#usercountrycurrency".to_string(),
            region_links: "ul#usercountrycurrency_droplist > li > a".to_string(),
            current_value_attribute: "value".to_string(),
            code_attribute: "id".to_string(),
            excluded_codes: vec!["help".to_string()],
        }
    }
}

#[derive(Debug, Clone)]
pub struct CompiledRegionSelectors {
    pub current_region: Selector,
    pub region_links: Selector,
}

impl RegionSelectors {
    pub fn compile(&self) -> ParsingResult<CompiledRegionSelectors> {
        Ok(CompiledRegionSelectors {
            current_region: compile_selector("current_region", &self.current_region)?,
            region_links: compile_selector("region_links", &self.region_links)?,
        })
    }
}

/// Text templates for the human-readable region report.
///
/// `{code}` and `{name}` are substituted in the item templates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegionMessages {
    pub header: String,
    pub available_header: String,
    pub item: String,
    pub item_current: String,
    pub no_region_data: String,
}

impl Default for RegionMessages {
    fn default() -> Self {
        Self {
            header: "Multi-line result:".to_string(),
            available_header: "Regions available for checkout:".to_string(),
            item: "{code}: {name}".to_string(),
            item_current: "{code}: {name} (current)".to_string(),
            no_region_data: "No region information available".to_string(),
        }
    }
}

impl RegionMessages {
    pub fn validate(&self) -> ParsingResult<()> {
        for (field, template) in [("item", &self.item), ("item_current", &self.item_current)] {
            if !template.contains("{code}") {
                return Err(ParsingError::ConfigurationError {
                    message: format!("template '{template}' has no {{code}} placeholder"),
                    field: format!("region_messages.{field}"),
                });
            }
        }
        Ok(())
    }

    pub fn format_item(&self, code: &str, name: &str, is_current: bool) -> String {
        let template = if is_current { &self.item_current } else { &self.item };
        template.replace("{code}", code).replace("{name}", name)
    }
}

fn compile_selector(field: &str, selector: &str) -> ParsingResult<Selector> {
    Selector::parse(selector).map_err(|e| ParsingError::invalid_selector(field, selector, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(ParsingConfig::default().validate().is_ok());
    }

    #[test]
    fn test_broken_selector_is_reported_with_field() {
        let selectors = CartSelectors {
            item_price: "div[class=".to_string(),
            ..CartSelectors::default()
        };
        match selectors.compile() {
            Err(ParsingError::InvalidSelector { field, .. }) => assert_eq!(field, "item_price"),
            other => panic!("expected InvalidSelector, got {other:?}"),
        }
    }

    #[test]
    fn test_template_without_code_is_rejected() {
        let messages = RegionMessages {
            item: "{name}".to_string(),
            ..RegionMessages::default()
        };
        assert!(matches!(
            messages.validate(),
            Err(ParsingError::ConfigurationError { .. })
        ));
    }

    #[test]
    fn test_format_item() {
        let messages = RegionMessages::default();
        assert_eq!(messages.format_item("US", "U.S. Dollar", false), "US: U.S. Dollar");
        assert_eq!(messages.format_item("DE", "Euro", true), "DE: Euro (current)");
    }
}
