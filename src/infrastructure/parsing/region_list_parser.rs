//! Checkout region parser
//!
//! Reads the current region from the cart page's region dropdown and lists
//! the regions the cart can be checked out in.

use once_cell::sync::Lazy;
use scraper::Html;
use tracing::{debug, warn};

use super::config::{CompiledRegionSelectors, RegionMessages, RegionSelectors};
use super::{ContextualParser, HtmlParser, ParseContext, ParsingError, ParsingResult};
use crate::domain::{RegionEntry, RegionListResult};

static DEFAULT_REGION_PARSER: Lazy<ParsingResult<RegionListParser>> =
    Lazy::new(RegionListParser::new);

/// Human-readable region report for a cart page.
///
/// Callers are expected to always supply a document; `None` is an error.
pub fn parse_cart_countries(document: Option<&Html>) -> ParsingResult<String> {
    let document = document.ok_or_else(|| ParsingError::missing_document("parse_cart_countries"))?;
    let parser = DEFAULT_REGION_PARSER.as_ref().map_err(ParsingError::clone)?;
    let regions = parser.parse_with_context(document, &ParseContext::default());
    Ok(render_region_report(&regions, &RegionMessages::default()))
}

/// Parser for the checkout region dropdown
pub struct RegionListParser {
    selectors: CompiledRegionSelectors,
    current_value_attribute: String,
    code_attribute: String,
    excluded_codes: Vec<String>,
}

impl RegionListParser {
    pub fn new() -> ParsingResult<Self> {
        Self::with_config(&RegionSelectors::default())
    }

    pub fn with_config(selectors: &RegionSelectors) -> ParsingResult<Self> {
        Ok(Self {
            selectors: selectors.compile()?,
            current_value_attribute: selectors.current_value_attribute.clone(),
            code_attribute: selectors.code_attribute.clone(),
            excluded_codes: selectors.excluded_codes.clone(),
        })
    }

    fn is_region_code(&self, code: &str) -> bool {
        !code.is_empty() && !self.excluded_codes.iter().any(|excluded| excluded == code)
    }
}

impl ContextualParser for RegionListParser {
    type Output = RegionListResult;
    type Context = ParseContext;

    fn parse_with_context(&self, html: &Html, context: &Self::Context) -> Self::Output {
        let Some(indicator) = html.select(&self.selectors.current_region).next() else {
            debug!("No current region indicator on {}", context.source);
            return RegionListResult::NoRegionData;
        };

        let current_code = indicator
            .value()
            .attr(&self.current_value_attribute)
            .unwrap_or_default()
            .to_string();
        if current_code.is_empty() {
            warn!("Current region indicator on {} carries no value", context.source);
        }

        let entries: Vec<RegionEntry> = html
            .select(&self.selectors.region_links)
            .filter_map(|link| {
                let code = link.value().attr(&self.code_attribute).unwrap_or_default();
                if !self.is_region_code(code) {
                    return None;
                }
                Some(RegionEntry {
                    code: code.to_string(),
                    name: link.text().collect::<String>().trim().to_string(),
                    is_current: code == current_code,
                })
            })
            .collect();

        debug!(
            "Found {} checkout regions on {} (current: '{}')",
            entries.len(),
            context.source,
            current_code
        );

        RegionListResult::Available {
            current_code,
            entries,
        }
    }
}

impl HtmlParser for RegionListParser {
    type Output = RegionListResult;

    fn parse(&self, html: &str) -> Self::Output {
        let document = Html::parse_document(html);
        self.parse_with_context(&document, &ParseContext::default())
    }
}

/// Multi-line report: a header, then either the region list or the no-data line
pub fn render_region_report(regions: &RegionListResult, messages: &RegionMessages) -> String {
    let mut lines = vec![messages.header.clone()];

    match regions {
        RegionListResult::NoRegionData => lines.push(messages.no_region_data.clone()),
        RegionListResult::Available { entries, .. } => {
            lines.push(messages.available_header.clone());
            lines.extend(
                entries
                    .iter()
                    .map(|entry| messages.format_item(&entry.code, &entry.name, entry.is_current)),
            );
        }
    }

    let mut report = lines.join("\n");
    report.push('\n');
    report
}
