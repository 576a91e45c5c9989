use serde::{Deserialize, Serialize};

use crate::matching::aggregate::{match_stats, sort_matches};
use crate::matching::matcher::match_cards_with;
use crate::matching::similarity::SimilarityScorer;
use crate::models::{CardMatch, LigaCard, MatchStats, SortKey, TcgPlayerCard};

// ---------------------------------------------------------------------------
// Comparison — matches plus their summary for one pair of result sets
// ---------------------------------------------------------------------------

/// Reconciled view of one search across both sources.
///
/// Rebuilt from scratch for every new pair of result arrays.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comparison {
    pub matches: Vec<CardMatch>,
    pub stats: MatchStats,
    pub exchange_rate: f64,
}

impl Comparison {
    /// Match both result sets with the default scorer.
    ///
    /// If either side has not been loaded yet (`None`) the comparison is
    /// empty. An empty but loaded side still yields leftovers for the other.
    pub fn build(
        tcg: Option<&[TcgPlayerCard]>,
        liga: Option<&[LigaCard]>,
        exchange_rate: f64,
    ) -> Self {
        Self::build_with(&SimilarityScorer::default(), tcg, liga, exchange_rate)
    }

    pub fn build_with(
        scorer: &SimilarityScorer,
        tcg: Option<&[TcgPlayerCard]>,
        liga: Option<&[LigaCard]>,
        exchange_rate: f64,
    ) -> Self {
        let (Some(tcg), Some(liga)) = (tcg, liga) else {
            return Self {
                exchange_rate,
                ..Self::default()
            };
        };

        let matches = match_cards_with(scorer, tcg, liga, exchange_rate);
        let stats = match_stats(&matches);
        Self {
            matches,
            stats,
            exchange_rate,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// Reorder the matches in place.
    pub fn sort_by(&mut self, key: SortKey) {
        sort_matches(&mut self.matches, key, self.exchange_rate);
    }

    /// Consume and return the comparison sorted by `key`.
    pub fn sorted(mut self, key: SortKey) -> Self {
        self.sort_by(key);
        self
    }
}
