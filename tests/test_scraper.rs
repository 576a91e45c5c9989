//! Storefront page parsing and scraper service tests (no network).

use cardcompare::models::{PriceKind, PriceLevel};
use cardcompare::scraper::html::{absolute_url, parse_brl_price, strip_tags};
use cardcompare::scraper::parse_listing_page;
use cardcompare::{CompareError, LigaScraper, ScraperConfig};

const BASE: &str = "https://www.ligaonepiece.com.br";

const SEARCH_PAGE: &str = r##"
<html><body>
<div class="container results">
  <div class="box p25">
    <a class="main-link-card" href="/?view=cards/card&amp;card=Monkey.D.Luffy&amp;ed=OP06">
      <img class="main-card" src="//images.ligaonepiece.com.br/op06-054.jpg" alt="">
    </a>
    <div class="mtg-name"><a href="#">Monkey.D.Luffy</a></div>
    <div class="mtg-numeric-code">(OP06-054)</div>
    <div class="edition-name">Wings of the Captain</div>
    <div class="price-min">R$ 45,90</div>
    <div class="price-avg">R$ 52,00</div>
    <div class="price-max">R$ 1.234,56</div>
  </div>
  <div class="mtg-single">
    <img class="main-card lazy" data-src="img/nami.jpg">
    <div class="mtg-name"><a href="/nami">Nami</a></div>
    <span class="mtg-numeric-code">OP01-016</span>
    <div class="price-avg">R$ 3,50</div>
  </div>
  <div class="card-item">
    <div class="mtg-name"><a href="#">Sold Out Zoro</a></div>
    <div class="price-min">R$ --</div>
  </div>
  <div class="box p25">
    <div class="mtg-name"><a href="#">Monkey.D.Luffy</a></div>
    <div class="mtg-numeric-code">(OP06-054)</div>
    <div class="price-min">R$ 60,00</div>
  </div>
  <div class="box p25">
    <div class="price-min">R$ 10,00</div>
  </div>
</div>
</body></html>
"##;

// ---------------------------------------------------------------------------
// parse_listing_page
// ---------------------------------------------------------------------------

#[test]
fn parses_complete_block() {
    let cards = parse_listing_page(SEARCH_PAGE, BASE);
    let luffy = &cards[0];

    assert_eq!(luffy.name, "Monkey.D.Luffy");
    assert_eq!(luffy.numeric_code, "OP06-054");
    assert_eq!(luffy.price, 45.9);
    assert_eq!(luffy.currency, "BRL");
    assert_eq!(luffy.set.as_deref(), Some("Wings of the Captain"));
    assert_eq!(luffy.price_level, Some(PriceLevel::Cheap));
    assert_eq!(luffy.condition.as_deref(), Some("NM"));
    assert_eq!(luffy.seller.as_deref(), Some("Liga One Piece"));
    assert_eq!(luffy.stock, Some(1));
    assert_eq!(luffy.price_usd, None);
    assert_eq!(
        luffy.image_url.as_deref(),
        Some("https://images.ligaonepiece.com.br/op06-054.jpg")
    );
    assert_eq!(
        luffy.url,
        "https://www.ligaonepiece.com.br/?view=cards/card&card=Monkey.D.Luffy&ed=OP06"
    );

    let kinds: Vec<PriceKind> = luffy.all_prices.iter().map(|p| p.kind).collect();
    assert_eq!(kinds, vec![PriceKind::Min, PriceKind::Avg, PriceKind::Max]);
    assert_eq!(luffy.all_prices[2].value, 1234.56);
}

#[test]
fn falls_back_to_first_available_price() {
    let cards = parse_listing_page(SEARCH_PAGE, BASE);
    let nami = &cards[1];

    assert_eq!(nami.name, "Nami");
    assert_eq!(nami.numeric_code, "OP01-016");
    assert_eq!(nami.price, 3.5);
    assert_eq!(nami.price_level, Some(PriceLevel::Medium));
    assert_eq!(
        nami.image_url.as_deref(),
        Some("https://www.ligaonepiece.com.br/img/nami.jpg")
    );
    assert_eq!(nami.url, "");
    assert_eq!(nami.set, None);
}

#[test]
fn skips_unpriced_nameless_and_duplicate_blocks() {
    let cards = parse_listing_page(SEARCH_PAGE, BASE);
    let names: Vec<&str> = cards.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Monkey.D.Luffy", "Nami"]);
}

#[test]
fn empty_page_has_no_listings() {
    assert!(parse_listing_page("<html><body>Nenhum resultado</body></html>", BASE).is_empty());
    assert!(parse_listing_page("", BASE).is_empty());
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

#[test]
fn parse_brl_price_handles_separators() {
    assert_eq!(parse_brl_price("R$ 1.234,56"), 1234.56);
    assert_eq!(parse_brl_price("R$0,99"), 0.99);
    assert_eq!(parse_brl_price(" 12 "), 12.0);
    assert_eq!(parse_brl_price("consulte"), 0.0);
}

#[test]
fn parse_brl_price_reads_leading_number_only() {
    assert_eq!(parse_brl_price("R$ 12,00 un"), 12.0);
    assert_eq!(parse_brl_price("12,50*"), 12.5);
    assert_eq!(parse_brl_price("R$ 1.234,56 (cada)"), 1234.56);
    assert_eq!(parse_brl_price("R$ --"), 0.0);
}

#[test]
fn absolute_url_resolves_against_base() {
    assert_eq!(absolute_url("/a/b", BASE), format!("{BASE}/a/b"));
    assert_eq!(absolute_url("a/b", &format!("{BASE}/")), format!("{BASE}/a/b"));
    assert_eq!(absolute_url("//cdn.example/x.png", BASE), "https://cdn.example/x.png");
    assert_eq!(absolute_url("http://other/x", BASE), "http://other/x");
    assert_eq!(absolute_url("", BASE), "");
}

#[test]
fn strip_tags_collapses_text() {
    assert_eq!(strip_tags("<b>Monkey.D.</b>  <i>Luffy</i>\n"), "Monkey.D. Luffy");
    assert_eq!(strip_tags("Zoro &amp; Sanji"), "Zoro & Sanji");
}

// ---------------------------------------------------------------------------
// LigaScraper
// ---------------------------------------------------------------------------

#[test]
fn search_url_pages_after_the_first() {
    let scraper = LigaScraper::new(ScraperConfig::default());

    let first = scraper.search_url("monkey d luffy", 1).unwrap();
    let pairs: Vec<(String, String)> = first.query_pairs().into_owned().collect();
    assert!(pairs.contains(&("view".into(), "cards/search".into())));
    assert!(pairs.contains(&("card".into(), "monkey d luffy".into())));
    assert!(pairs.contains(&("tipo".into(), "1".into())));
    assert!(!pairs.iter().any(|(k, _)| k == "page"));

    let third = scraper.search_url("nami", 3).unwrap();
    assert!(third.query_pairs().any(|(k, v)| k == "page" && v == "3"));
}

#[test]
fn offline_scraper_refuses_to_search() {
    let mut scraper = LigaScraper::new(ScraperConfig {
        offline: true,
        ..ScraperConfig::default()
    });

    assert!(matches!(scraper.search_cards("luffy"), Err(CompareError::Offline(_))));
    assert!(!scraper.is_initialized());
}

#[test]
fn empty_query_is_rejected_before_any_fetch() {
    let mut scraper = LigaScraper::new(ScraperConfig::default());
    assert!(matches!(
        scraper.search_cards("   "),
        Err(CompareError::InvalidArgument(_))
    ));
    assert!(!scraper.is_initialized());
}

#[test]
fn session_opens_and_closes_idempotently() {
    let mut scraper = LigaScraper::new(ScraperConfig::default());
    assert!(!scraper.is_initialized());

    scraper.initialize().unwrap();
    scraper.initialize().unwrap();
    assert!(scraper.is_initialized());

    scraper.close();
    scraper.close();
    assert!(!scraper.is_initialized());
}
