//! End-to-end cart page extraction against realistic page fixtures
use cart_page_parser_lib::infrastructure::parsing::{
    CartPageParser, ContextualParser, HtmlParser, ParseContext, SeparatorConvention,
};
use cart_page_parser_lib::infrastructure::parse_cart_page;
use cart_page_parser_lib::{CartResult, PriceField, ProductId, ProductKind, TotalCheck};
use scraper::Html;

const EURO_CART: &str = r#"<!DOCTYPE html>
<html>
<head><title>Shopping Cart</title></head>
<body>
<div class="page_content">
  <div class="cart_item_list">
    <div class="cart_row even app_impression_tracked" id="cart_row_1001">
      <div class="cart_item_img"><img src="capsule.jpg"></div>
      <div class="cart_item_price with_discount">
        <div class="original_price">19,99€</div>
        <div class="price">9,99€</div>
      </div>
      <div class="cart_item_desc">
        <a href="https://store.example.com/app/1091500/Night_City/">Night City</a>
      </div>
    </div>
    <div class="cart_row odd" id="cart_row_1002">
      <div class="cart_item_price"><div class="price">1.249,00€</div></div>
      <div class="cart_item_desc">
        <a href="https://store.example.com/sub/54029/">Collector's Pack</a>
      </div>
    </div>
    <div class="cart_row even" id="cart_row_1003">
      <div class="cart_item_price"><div class="price">9,99€</div></div>
      <div class="cart_item_desc">
        <a href="https://store.example.com/app/1091500/Night_City/">Night City</a>
      </div>
    </div>
    <div class="cart_row odd" id="cart_row_1004">
      <div class="cart_item_price"><div class="price">4,99€</div></div>
      <div class="cart_item_desc">
        <a href="https://store.example.com/app/1091500/Night_City/">Night City</a>
      </div>
    </div>
  </div>
  <div class="cart_total_row">
    <div id="cart_estimated_total">Estimated total: 1.263,98€</div>
  </div>
  <a id="btn_purchase_self" class="btnv6_green_white_innerfade" href="/checkout/?purchasetype=self">Purchase for myself</a>
  <a id="btn_purchase_gift" class="btnv6_green_white_innerfade" href="/checkout/?purchasetype=gift">Purchase as a gift</a>
</div>
</body>
</html>"#;

const DOLLAR_CART: &str = r#"<html><body>
  <div class="cart_item_list">
    <div class="cart_row">
      <div class="price">$1,234.56</div>
      <div class="cart_item_desc"><a href="https://store.example.com/bundle/232/Complete/">Complete Bundle</a></div>
    </div>
    <div class="cart_row">
      <div class="price">Free</div>
      <div class="cart_item_desc"><a href="https://store.example.com/weird/77/">Mystery Thing</a></div>
    </div>
    <div class="cart_row">
      <div class="price">$0.99</div>
      <div class="cart_item_desc"><a href="https://store.example.com/app/notanumber/">Broken Link</a></div>
    </div>
  </div>
  <div id="cart_estimated_total">Estimated total: $1,235.55 USD</div>
</body></html>"#;

const EMPTY_CART: &str = r#"<html><body>
  <div class="cart_item_list"></div>
  <div id="cart_estimated_total">Estimated total: 12,00€</div>
  <a id="btn_purchase_self" href="/checkout/">Purchase for myself</a>
  <a id="btn_purchase_gift" href="/checkout/">Purchase as a gift</a>
</body></html>"#;

#[test]
fn euro_cart_is_parsed_with_comma_decimals() {
    let parser = CartPageParser::new().unwrap();
    let document = Html::parse_document(EURO_CART);

    assert_eq!(parser.detect_convention(&document), SeparatorConvention::CommaDecimal);

    let cart = parser.parse_with_context(&document, &ParseContext::new("euro_cart.html"));

    // rows 1001 and 1003 are identical and collapse; 1004 differs only in price
    assert_eq!(cart.items.len(), 3);

    let night_city = ProductId::new(ProductKind::App, 1_091_500);
    assert_eq!(cart.items[0].id, night_city);
    assert_eq!(cart.items[0].name, "Night City");
    assert_eq!(cart.items[0].price_minor_units(), 999);

    assert_eq!(cart.items[1].id, ProductId::new(ProductKind::Sub, 54029));
    assert_eq!(cart.items[1].name, "Collector's Pack");
    assert_eq!(cart.items[1].price_minor_units(), 124_900);

    assert_eq!(cart.items[2].id, night_city);
    assert_eq!(cart.items[2].price_minor_units(), 499);

    assert_eq!(cart.total_minor_units(), 126_398);
    assert_eq!(cart.check_total(), TotalCheck::Consistent);
    assert!(cart.allows_self_purchase);
    assert!(cart.allows_gift_purchase);
}

#[test]
fn dollar_cart_degrades_per_field() {
    let cart = CartPageParser::new().unwrap().parse(DOLLAR_CART);

    assert_eq!(cart.items.len(), 3);

    assert_eq!(cart.items[0].id, ProductId::new(ProductKind::Bundle, 232));
    assert_eq!(cart.items[0].price_minor_units(), 123_456);

    assert_eq!(cart.items[1].id, ProductId::UNKNOWN);
    assert_eq!(cart.items[1].name, "Mystery Thing");
    assert_eq!(cart.items[1].price, PriceField::unparsed("Free"));
    assert_eq!(cart.items[1].price_minor_units(), -100);

    assert_eq!(cart.items[2].id, ProductId::UNKNOWN);
    assert_eq!(cart.items[2].price_minor_units(), 99);

    assert_eq!(cart.total_minor_units(), 123_555);
    assert_eq!(cart.check_total(), TotalCheck::Indeterminate);
    assert!(!cart.allows_self_purchase);
    assert!(!cart.allows_gift_purchase);
}

#[test]
fn empty_cart_is_canonical_whatever_else_is_on_the_page() {
    let document = Html::parse_document(EMPTY_CART);
    let cart = parse_cart_page(Some(&document)).unwrap();

    assert_eq!(cart, CartResult::empty());
    assert_eq!(cart.total_minor_units(), 0);
    assert!(!cart.allows_self_purchase);
    assert!(!cart.allows_gift_purchase);
}

#[test]
fn rows_with_different_unreadable_prices_are_one_entry() {
    let html = r#"<html><body><div class="cart_item_list">
      <div><div class="price">Free</div><div class="cart_item_desc"><a href="/app/1/">G</a></div></div>
      <div><div class="price">Free to Play</div><div class="cart_item_desc"><a href="/app/1/">G</a></div></div>
    </div></body></html>"#;

    let cart = CartPageParser::new().unwrap().parse(html);

    assert_eq!(cart.items.len(), 1);
    assert_eq!(cart.items[0].id, ProductId::new(ProductKind::App, 1));
    assert_eq!(cart.items[0].price_minor_units(), -100);
}

#[test]
fn absent_document_yields_no_result() {
    assert!(parse_cart_page(None).is_none());
}

#[test]
fn cart_result_serializes_for_callers() {
    let cart = CartPageParser::new().unwrap().parse(DOLLAR_CART);
    let json = serde_json::to_value(&cart).unwrap();

    assert_eq!(json["items"][0]["id"]["kind"], "bundle");
    assert_eq!(json["items"][0]["price"]["status"], "parsed");
    assert_eq!(json["items"][1]["price"]["status"], "unparsed");
    assert_eq!(json["items"][1]["price"]["raw"], "Free");

    let back: CartResult = serde_json::from_value(json).unwrap();
    assert_eq!(back, cart);
}

#[test]
fn one_parser_serves_many_threads() {
    let parser = std::sync::Arc::new(CartPageParser::new().unwrap());

    let handles: Vec<_> = [EURO_CART, DOLLAR_CART, EMPTY_CART]
        .into_iter()
        .map(|page| {
            let parser = std::sync::Arc::clone(&parser);
            std::thread::spawn(move || parser.parse(page).items.len())
        })
        .collect();

    let counts: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(counts, vec![3, 3, 0]);
}
