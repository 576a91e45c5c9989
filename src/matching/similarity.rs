//! Weighted evidence scoring between one listing from each source.
//!
//! Evidence is accumulated in whole points out of 100 and normalized once at
//! the end, so threshold comparisons are exact:
//!
//! | signal                         | points |
//! |--------------------------------|--------|
//! | set names equal                | 30     |
//! | normalized titles equal        | 40     |
//! | one title contains the other   | configurable, 0 by default |
//! | base print codes equal         | 30     |
//! | raw code set prefixes equal    | 15     |

use crate::matching::normalize::{code_set_prefix, normalize_code, normalize_name, tcg_card_code};
use crate::models::{LigaCard, SimilarityAnalysis, TcgPlayerCard};

pub const SET_NAME_POINTS: u32 = 30;
pub const EXACT_NAME_POINTS: u32 = 40;
pub const BASE_CODE_POINTS: u32 = 30;
pub const CODE_SET_PREFIX_POINTS: u32 = 15;

// ---------------------------------------------------------------------------
// SimilarityScorer
// ---------------------------------------------------------------------------

/// Scores a TCGplayer listing against a storefront listing.
///
/// The only tunable is the credit for titles that merely contain one another.
/// It defaults to zero points; [`with_partial_name_points`](Self::with_partial_name_points)
/// restores the 25-point credit the reason text historically advertised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SimilarityScorer {
    partial_name_points: u32,
}

impl SimilarityScorer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Points awarded when one normalized title contains the other.
    pub fn with_partial_name_points(mut self, points: u32) -> Self {
        self.partial_name_points = points;
        self
    }

    pub fn partial_name_points(&self) -> u32 {
        self.partial_name_points
    }

    /// Compare two listings and explain the result.
    pub fn score(&self, tcg: &TcgPlayerCard, liga: &LigaCard) -> SimilarityAnalysis {
        let mut reasons = Vec::new();
        let mut points = 0;

        // -- Set name ------------------------------------------------------
        let tcg_set = clean_set_name(tcg.set_name.as_deref());
        let liga_set = clean_set_name(liga.set.as_deref());
        if let (Some(a), Some(b)) = (&tcg_set, &liga_set) {
            if a == b {
                points += SET_NAME_POINTS;
                reasons.push(format!("Same set: \"{a}\" ({SET_NAME_POINTS}%)"));
            }
        }

        // -- Title ---------------------------------------------------------
        let tcg_name = normalize_name(&tcg.name);
        let liga_name = normalize_name(&liga.name);
        if !tcg_name.is_empty() && !liga_name.is_empty() {
            if tcg_name == liga_name {
                points += EXACT_NAME_POINTS;
                reasons.push(format!("Identical name: \"{tcg_name}\" ({EXACT_NAME_POINTS}%)"));
            } else if tcg_name.contains(&liga_name) || liga_name.contains(&tcg_name) {
                points += self.partial_name_points;
                reasons.push(format!(
                    "Names similar: \"{tcg_name}\" ~ \"{liga_name}\" ({}%)",
                    self.partial_name_points
                ));
            }
        }

        // -- Print code ----------------------------------------------------
        let tcg_code = tcg_card_code(tcg);
        let liga_code = Some(liga.numeric_code.trim()).filter(|c| !c.is_empty());
        if let (Some(tcg_code), Some(liga_code)) = (tcg_code.as_deref(), liga_code) {
            let tcg_base = normalize_code(tcg_code);
            let liga_base = normalize_code(liga_code);

            if tcg_base == liga_base {
                points += BASE_CODE_POINTS;
                reasons.push(format!("Base code: {tcg_base} ({BASE_CODE_POINTS}%)"));
            } else {
                let tcg_prefix = code_set_prefix(tcg_code);
                if tcg_prefix == code_set_prefix(liga_code) {
                    points += CODE_SET_PREFIX_POINTS;
                    reasons.push(format!(
                        "Same set in code: {tcg_prefix} ({CODE_SET_PREFIX_POINTS}%)"
                    ));
                }
            }
        }

        SimilarityAnalysis::from_points(points, reasons)
    }
}

/// Score a pair with the default scorer.
pub fn calculate_similarity(tcg: &TcgPlayerCard, liga: &LigaCard) -> SimilarityAnalysis {
    SimilarityScorer::default().score(tcg, liga)
}

fn clean_set_name(name: Option<&str>) -> Option<String> {
    name.map(|s| s.trim().to_lowercase()).filter(|s| !s.is_empty())
}
