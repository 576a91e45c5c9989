//! Two-pass greedy bipartite assignment between the two listing sets.
//!
//! Pass 1 locks in every pairing scoring at least 0.8, walking TCGplayer
//! listings in order and giving each the best still-free storefront listing.
//! Pass 2 repeats the walk for the remaining listings at 0.6. Whatever is left
//! on either side is reported unmatched. Ties on score keep the first
//! candidate in array order, so the result is deterministic.

use tracing::debug;

use crate::matching::classify::{paired_match, unmatched_liga, unmatched_tcg};
use crate::matching::similarity::SimilarityScorer;
use crate::models::{CardMatch, LigaCard, SimilarityAnalysis, TcgPlayerCard};

pub const HIGH_CONFIDENCE_THRESHOLD: f64 = 0.8;
pub const MEDIUM_CONFIDENCE_THRESHOLD: f64 = 0.6;

const PASS_THRESHOLDS: [f64; 2] = [HIGH_CONFIDENCE_THRESHOLD, MEDIUM_CONFIDENCE_THRESHOLD];

// ---------------------------------------------------------------------------
// Assignment — index-level result of the greedy passes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Pairing {
    pub left: usize,
    pub right: usize,
    /// 1 for the high-confidence pass, 2 for the medium pass.
    pub pass: usize,
    pub analysis: SimilarityAnalysis,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Assignment {
    /// Pairings in commit order.
    pub pairs: Vec<Pairing>,
    pub unmatched_left: Vec<usize>,
    pub unmatched_right: Vec<usize>,
}

/// Run both greedy passes over `left_len x right_len` candidates.
///
/// `score(l, r)` is called only for pairs whose members are both still free.
pub fn assign<F>(left_len: usize, right_len: usize, mut score: F) -> Assignment
where
    F: FnMut(usize, usize) -> SimilarityAnalysis,
{
    let mut used_left = vec![false; left_len];
    let mut used_right = vec![false; right_len];
    let mut pairs = Vec::new();

    for (pass_idx, &threshold) in PASS_THRESHOLDS.iter().enumerate() {
        for l in 0..left_len {
            if used_left[l] {
                continue;
            }

            let mut best: Option<(usize, SimilarityAnalysis)> = None;
            for r in 0..right_len {
                if used_right[r] {
                    continue;
                }
                let analysis = score(l, r);
                let best_score = best.as_ref().map_or(0.0, |(_, a)| a.score);
                if analysis.score > best_score && analysis.score >= threshold {
                    best = Some((r, analysis));
                }
            }

            if let Some((r, analysis)) = best {
                used_left[l] = true;
                used_right[r] = true;
                pairs.push(Pairing {
                    left: l,
                    right: r,
                    pass: pass_idx + 1,
                    analysis,
                });
            }
        }
    }

    Assignment {
        pairs,
        unmatched_left: (0..left_len).filter(|&i| !used_left[i]).collect(),
        unmatched_right: (0..right_len).filter(|&i| !used_right[i]).collect(),
    }
}

/// Match listings with the default scorer.
pub fn match_cards(tcg: &[TcgPlayerCard], liga: &[LigaCard], exchange_rate: f64) -> Vec<CardMatch> {
    match_cards_with(&SimilarityScorer::default(), tcg, liga, exchange_rate)
}

/// Match listings and emit one [`CardMatch`] per pair or leftover.
///
/// Output order: pass-1 pairs, pass-2 pairs, unmatched TCGplayer listings,
/// unmatched storefront listings. Every input listing appears exactly once.
pub fn match_cards_with(
    scorer: &SimilarityScorer,
    tcg: &[TcgPlayerCard],
    liga: &[LigaCard],
    exchange_rate: f64,
) -> Vec<CardMatch> {
    let assignment = assign(tcg.len(), liga.len(), |l, r| scorer.score(&tcg[l], &liga[r]));

    debug!(
        tcg = tcg.len(),
        liga = liga.len(),
        paired = assignment.pairs.len(),
        "matched listings"
    );

    let mut matches = Vec::with_capacity(
        assignment.pairs.len() + assignment.unmatched_left.len() + assignment.unmatched_right.len(),
    );
    for p in assignment.pairs {
        matches.push(paired_match(&tcg[p.left], &liga[p.right], p.analysis, exchange_rate));
    }
    matches.extend(assignment.unmatched_left.iter().map(|&i| unmatched_tcg(&tcg[i])));
    matches.extend(assignment.unmatched_right.iter().map(|&i| unmatched_liga(&liga[i])));
    matches
}
