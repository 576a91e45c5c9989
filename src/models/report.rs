use serde::{Deserialize, Serialize};

use super::liga::LigaCard;
use super::matching::{CardMatch, MatchStats};
use super::tcgplayer::TcgPlayerCard;

// ---------------------------------------------------------------------------
// SourceErrors — Per-source failure messages for one search
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SourceErrors {
    pub tcgplayer: Option<String>,
    pub liga: Option<String>,
}

impl SourceErrors {
    pub fn any(&self) -> bool {
        self.tcgplayer.is_some() || self.liga.is_some()
    }
}

// ---------------------------------------------------------------------------
// SearchReport — Everything one combined search produced
// ---------------------------------------------------------------------------

/// Outcome of searching both sources and reconciling their listings.
///
/// A source that failed contributes an empty result list and an entry in
/// `errors`; the other source's listings still appear as leftovers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchReport {
    pub query: String,
    /// BRL -> USD rate used for every conversion in the report.
    pub exchange_rate: f64,
    /// True when the rate did not come from a live lookup.
    pub rate_fallback: bool,
    pub rate_warning: Option<String>,
    pub tcg_results: Vec<TcgPlayerCard>,
    pub liga_results: Vec<LigaCard>,
    pub errors: SourceErrors,
    pub matches: Vec<CardMatch>,
    pub stats: MatchStats,
}
