//! Stats, sorting and presentation helper tests.

mod common;

use cardcompare::matching::classify::compare_prices;
use cardcompare::matching::{
    format_currency, match_cards, match_stats, sort_matches, sorted_matches, Comparison,
};
use cardcompare::models::{BestPrice, CardMatch, MatchTier, SimilarityAnalysis, SortKey};
use cardcompare::CompareError;

const RATE: f64 = 0.2;

/// Luffy (perfect, liga saves 2.0), Zoro (high, liga saves 1.0),
/// Nami (TCGplayer leftover, $2.00), Uta (storefront leftover, $3.00).
fn sample_matches() -> Vec<CardMatch> {
    let tcg = vec![
        common::tcg_card(1, "Monkey D. Luffy", Some("OP06-054"), Some("Wings of the Captain"), Some(12.0)),
        common::tcg_card(2, "Roronoa Zoro", Some("OP01-025"), Some("Romance Dawn"), Some(5.0)),
        common::tcg_card(3, "Nami", Some("OP01-016"), Some("Romance Dawn"), Some(2.0)),
    ];
    let liga = vec![
        common::liga_card("Roronoa Zoro", "OP01-025", Some("Romance Dawn (OP-01)"), 20.0),
        common::liga_card("Monkey D. Luffy", "OP06-054", Some("Wings of the Captain"), 50.0),
        common::liga_card("Uta", "ST05-001", None, 15.0),
    ];
    match_cards(&tcg, &liga, RATE)
}

fn names(matches: &[CardMatch]) -> Vec<String> {
    matches.iter().map(common::match_name).collect()
}

// ---------------------------------------------------------------------------
// Stats
// ---------------------------------------------------------------------------

#[test]
fn stats_count_tiers_and_positive_savings() {
    let stats = match_stats(&sample_matches());

    assert_eq!(stats.perfect, 1);
    assert_eq!(stats.high, 1);
    assert_eq!(stats.medium, 0);
    assert_eq!(stats.good, 1);
    assert_eq!(stats.none, 2);
    assert_eq!(stats.liga_better, 2);
    assert_eq!(stats.tcg_better, 0);
    assert!((stats.total_savings - 3.0).abs() < 1e-9);
}

#[test]
fn stats_ignore_ties() {
    let tcg = vec![common::tcg_card(1, "Uta", Some("ST05-001"), None, Some(3.0))];
    let liga = vec![common::liga_card("Uta", "ST05-001", None, 12.0)];

    let matches = match_cards(&tcg, &liga, 0.25);
    assert_eq!(matches[0].best_price, BestPrice::Tie);
    assert_eq!(matches[0].savings, Some(0.0));
    let stats = match_stats(&matches);
    assert_eq!(stats.total_savings, 0.0);
    assert_eq!(stats.tcg_better + stats.liga_better, 0);
}

#[test]
fn stats_of_nothing_are_zero() {
    let stats = match_stats(&[]);
    assert_eq!(stats.good, 0);
    assert_eq!(stats.total_savings, 0.0);
}

#[test]
fn compare_prices_picks_cheaper_side() {
    assert_eq!(compare_prices(5.0, 8.0), (BestPrice::TcgPlayer, 3.0));
    assert_eq!(compare_prices(8.0, 5.0), (BestPrice::Liga, 3.0));
    assert_eq!(compare_prices(5.0, 5.0), (BestPrice::Tie, 0.0));
}

// ---------------------------------------------------------------------------
// Tiers
// ---------------------------------------------------------------------------

#[test]
fn tier_is_step_function_of_score() {
    let tier = |points| MatchTier::from_score(SimilarityAnalysis::from_points(points, vec![]).score);

    assert_eq!(tier(100), MatchTier::Perfect);
    assert_eq!(tier(90), MatchTier::Perfect);
    assert_eq!(tier(89), MatchTier::High);
    assert_eq!(tier(70), MatchTier::High);
    assert_eq!(tier(69), MatchTier::Medium);
    assert_eq!(tier(50), MatchTier::Medium);
    assert_eq!(tier(49), MatchTier::NoMatch);
    assert_eq!(tier(0), MatchTier::NoMatch);

    let mut last = 0;
    for points in 0..=100 {
        let rank = tier(points).rank();
        assert!(rank >= last, "rank dropped at {points}");
        last = rank;
    }
}

// ---------------------------------------------------------------------------
// Sorting
// ---------------------------------------------------------------------------

#[test]
fn sort_by_savings_treats_absent_as_zero() {
    let mut matches = sample_matches();
    matches.reverse();
    sort_matches(&mut matches, SortKey::Savings, RATE);

    assert_eq!(names(&matches), ["Monkey D. Luffy", "Roronoa Zoro", "Uta", "Nami"]);
}

#[test]
fn sort_by_match_is_stable_within_tier() {
    let mut matches = sample_matches();
    matches.reverse();
    sort_matches(&mut matches, SortKey::Match, RATE);

    assert_eq!(names(&matches), ["Monkey D. Luffy", "Roronoa Zoro", "Uta", "Nami"]);
}

#[test]
fn sort_by_lowest_price_ignores_missing_side() {
    let sorted = sorted_matches(&sample_matches(), SortKey::PriceLow, RATE);
    assert_eq!(names(&sorted), ["Nami", "Uta", "Roronoa Zoro", "Monkey D. Luffy"]);
}

#[test]
fn sort_by_highest_price_ignores_missing_side() {
    let sorted = sorted_matches(&sample_matches(), SortKey::PriceHigh, RATE);
    assert_eq!(names(&sorted), ["Monkey D. Luffy", "Roronoa Zoro", "Uta", "Nami"]);
}

#[test]
fn sorted_copy_leaves_input_untouched() {
    let original = sample_matches();
    let _ = sorted_matches(&original, SortKey::PriceLow, RATE);
    assert_eq!(original, sample_matches());
}

#[test]
fn comparison_sorts_with_its_own_rate() {
    let tcg = vec![
        common::tcg_card(1, "Cheap", Some("OP01-001"), None, Some(1.0)),
        common::tcg_card(2, "Pricey", Some("OP01-002"), None, Some(30.0)),
    ];
    let comparison =
        Comparison::build(Some(tcg.as_slice()), Some(&[][..]), RATE).sorted(SortKey::PriceHigh);
    assert_eq!(names(&comparison.matches), ["Pricey", "Cheap"]);
}

#[test]
fn sort_key_parses_labels() {
    assert_eq!("savings".parse::<SortKey>().unwrap(), SortKey::Savings);
    assert_eq!(" MATCH ".parse::<SortKey>().unwrap(), SortKey::Match);
    assert_eq!("price-low".parse::<SortKey>().unwrap(), SortKey::PriceLow);
    assert_eq!("price-high".parse::<SortKey>().unwrap(), SortKey::PriceHigh);
    assert!(matches!(
        "cheapest".parse::<SortKey>(),
        Err(CompareError::InvalidArgument(_))
    ));
    assert_eq!(SortKey::default(), SortKey::Savings);
}

// ---------------------------------------------------------------------------
// Presentation
// ---------------------------------------------------------------------------

#[test]
fn variation_prefers_storefront_code() {
    let tcg = vec![common::tcg_card(1, "Monkey D. Luffy", Some("OP06-054"), None, Some(40.0))];
    let liga = vec![common::liga_card("Monkey D. Luffy", "OP06-054-AA", None, 150.0)];

    let matches = match_cards(&tcg, &liga, RATE);
    assert_eq!(matches[0].variation().unwrap().name, "Alternate Art");

    let alone = match_cards(&tcg, &[], RATE);
    assert_eq!(alone[0].variation().unwrap().name, "Standard");
}

#[test]
fn format_currency_uses_locale_separators() {
    assert_eq!(format_currency(1234.56, "USD"), "$1,234.56");
    assert_eq!(format_currency(1234.56, "BRL"), "R$ 1.234,56");
    assert_eq!(format_currency(0.5, "USD"), "$0.50");
    assert_eq!(format_currency(1234567.891, "USD"), "$1,234,567.89");
    assert_eq!(format_currency(-3.0, "USD"), "-$3.00");
    assert_eq!(format_currency(10.0, "EUR"), "EUR 10.00");
    assert_eq!(format_currency(f64::NAN, "USD"), "N/A");
}

#[test]
fn format_currency_rejects_amounts_beyond_cent_range() {
    assert_eq!(format_currency(1e300, "USD"), "N/A");
    assert_eq!(format_currency(-1e20, "BRL"), "N/A");
    assert_eq!(format_currency(1e15, "USD"), "$1,000,000,000,000,000.00");
}
