use crate::models::{
    BestPrice, CardMatch, LigaCard, MatchMethod, MatchTier, SimilarityAnalysis, TcgPlayerCard,
};

/// Decide the cheaper side given both prices in the same currency.
///
/// Returns the winner and the absolute difference; a tie saves nothing.
pub fn compare_prices(tcg_price: f64, liga_price: f64) -> (BestPrice, f64) {
    if tcg_price < liga_price {
        (BestPrice::TcgPlayer, liga_price - tcg_price)
    } else if tcg_price > liga_price {
        (BestPrice::Liga, tcg_price - liga_price)
    } else {
        (BestPrice::Tie, 0.0)
    }
}

/// Build the decision record for a matched pair.
///
/// The storefront price is converted with `exchange_rate` before comparing
/// against the TCGplayer market price. A missing market quote counts as 0.
pub fn paired_match(
    tcg: &TcgPlayerCard,
    liga: &LigaCard,
    analysis: SimilarityAnalysis,
    exchange_rate: f64,
) -> CardMatch {
    let tcg_price = tcg.market_price().unwrap_or(0.0);
    let liga_price = liga.price * exchange_rate;
    let (best_price, savings) = compare_prices(tcg_price, liga_price);

    CardMatch {
        tcg_card: Some(tcg.clone()),
        liga_card: Some(liga.clone()),
        similarity: analysis.score,
        best_price,
        savings: Some(savings),
        match_type: MatchTier::from_score(analysis.score),
        match_method: analysis.method,
        confidence_score: (analysis.score * 100.0).round() as u32,
        match_reasons: analysis.reasons,
    }
}

pub fn unmatched_tcg(tcg: &TcgPlayerCard) -> CardMatch {
    leftover(Some(tcg.clone()), None, BestPrice::TcgPlayer)
}

pub fn unmatched_liga(liga: &LigaCard) -> CardMatch {
    leftover(None, Some(liga.clone()), BestPrice::Liga)
}

fn leftover(
    tcg_card: Option<TcgPlayerCard>,
    liga_card: Option<LigaCard>,
    best_price: BestPrice,
) -> CardMatch {
    CardMatch {
        tcg_card,
        liga_card,
        similarity: 0.0,
        best_price,
        savings: None,
        match_type: MatchTier::NoMatch,
        match_method: MatchMethod::Unmatched,
        confidence_score: 0,
        match_reasons: vec!["No match found".to_string()],
    }
}
