use crate::models::{BestPrice, CardMatch, MatchStats, MatchTier, SortKey};

/// Tier counts and total positive savings over a match list.
pub fn match_stats(matches: &[CardMatch]) -> MatchStats {
    let mut stats = MatchStats::default();

    for m in matches {
        match m.match_type {
            MatchTier::Perfect => stats.perfect += 1,
            MatchTier::High => stats.high += 1,
            MatchTier::Medium => stats.medium += 1,
            MatchTier::NoMatch => stats.none += 1,
        }

        let savings = m.savings.unwrap_or(0.0);
        if savings > 0.0 {
            stats.total_savings += savings;
            match m.best_price {
                BestPrice::TcgPlayer => stats.tcg_better += 1,
                BestPrice::Liga => stats.liga_better += 1,
                BestPrice::Tie => {}
            }
        }
    }

    stats.good = stats.high + stats.medium;
    stats
}

/// Reorder matches in place. The sort is stable.
///
/// `exchange_rate` converts storefront prices for the two price orderings.
pub fn sort_matches(matches: &mut [CardMatch], key: SortKey, exchange_rate: f64) {
    match key {
        SortKey::Savings => matches.sort_by(|a, b| {
            b.savings
                .unwrap_or(0.0)
                .total_cmp(&a.savings.unwrap_or(0.0))
        }),
        SortKey::Match => matches.sort_by_key(|m| std::cmp::Reverse(m.match_type.rank())),
        SortKey::PriceLow => matches.sort_by(|a, b| {
            lowest_price(a, exchange_rate).total_cmp(&lowest_price(b, exchange_rate))
        }),
        SortKey::PriceHigh => matches.sort_by(|a, b| {
            highest_price(b, exchange_rate).total_cmp(&highest_price(a, exchange_rate))
        }),
    }
}

/// Sorted copy of `matches`, leaving the input untouched.
pub fn sorted_matches(matches: &[CardMatch], key: SortKey, exchange_rate: f64) -> Vec<CardMatch> {
    let mut sorted = matches.to_vec();
    sort_matches(&mut sorted, key, exchange_rate);
    sorted
}

/// Cheapest available price; a missing side never wins.
fn lowest_price(m: &CardMatch, rate: f64) -> f64 {
    let (tcg, liga) = side_prices(m, rate);
    tcg.unwrap_or(f64::INFINITY).min(liga.unwrap_or(f64::INFINITY))
}

fn highest_price(m: &CardMatch, rate: f64) -> f64 {
    let (tcg, liga) = side_prices(m, rate);
    tcg.unwrap_or(0.0).max(liga.unwrap_or(0.0))
}

/// USD price of each side, absent when the side or a positive price is missing.
fn side_prices(m: &CardMatch, rate: f64) -> (Option<f64>, Option<f64>) {
    let tcg = m
        .tcg_card
        .as_ref()
        .and_then(|c| c.market_price())
        .filter(|p| *p > 0.0);
    let liga = m.liga_card.as_ref().and_then(|c| c.converted_price(rate));
    (tcg, liga)
}
