use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CompareError;
use crate::models::{LigaCard, TcgPlayerCard};

// ---------------------------------------------------------------------------
// CardVariation — Special-print suffix reference data
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardVariation {
    pub code: String,
    pub name: String,
    pub description: String,
    pub rarity: String,
    pub glyph: String,
}

// ---------------------------------------------------------------------------
// MatchMethod — Descriptive label for a similarity score
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchMethod {
    #[serde(rename = "Perfect Match")]
    Perfect,
    #[serde(rename = "Good Match")]
    Good,
    #[serde(rename = "Partial Match")]
    Partial,
    #[serde(rename = "Basic Matching")]
    Basic,
    #[serde(rename = "No match found")]
    Unmatched,
}

impl MatchMethod {
    pub fn from_score(score: f64) -> Self {
        if score >= 0.9 {
            MatchMethod::Perfect
        } else if score >= 0.7 {
            MatchMethod::Good
        } else if score >= 0.5 {
            MatchMethod::Partial
        } else {
            MatchMethod::Basic
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MatchMethod::Perfect => "Perfect Match",
            MatchMethod::Good => "Good Match",
            MatchMethod::Partial => "Partial Match",
            MatchMethod::Basic => "Basic Matching",
            MatchMethod::Unmatched => "No match found",
        }
    }
}

impl fmt::Display for MatchMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// SimilarityAnalysis
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityAnalysis {
    /// Normalized score in `[0, 1]`.
    pub score: f64,
    pub reasons: Vec<String>,
    pub method: MatchMethod,
}

impl SimilarityAnalysis {
    /// Build an analysis from accumulated evidence points (out of 100).
    pub fn from_points(points: u32, reasons: Vec<String>) -> Self {
        let score = (f64::from(points) / 100.0).min(1.0);
        Self {
            score,
            reasons,
            method: MatchMethod::from_score(score),
        }
    }
}

// ---------------------------------------------------------------------------
// MatchTier / BestPrice
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchTier {
    Perfect,
    High,
    Medium,
    #[serde(rename = "none")]
    NoMatch,
}

impl MatchTier {
    /// Step function over the similarity score: 0.9 / 0.7 / 0.5.
    pub fn from_score(score: f64) -> Self {
        if score >= 0.9 {
            MatchTier::Perfect
        } else if score >= 0.7 {
            MatchTier::High
        } else if score >= 0.5 {
            MatchTier::Medium
        } else {
            MatchTier::NoMatch
        }
    }

    /// Ordering weight used by the "best match" sort.
    pub fn rank(&self) -> u8 {
        match self {
            MatchTier::Perfect => 3,
            MatchTier::High => 2,
            MatchTier::Medium => 1,
            MatchTier::NoMatch => 0,
        }
    }
}

/// Which platform offers the lower price for a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BestPrice {
    #[serde(rename = "tcg")]
    TcgPlayer,
    #[serde(rename = "liga")]
    Liga,
    #[serde(rename = "tie")]
    Tie,
}

// ---------------------------------------------------------------------------
// CardMatch — A reconciled pair, or a single-sided leftover
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardMatch {
    pub tcg_card: Option<TcgPlayerCard>,
    pub liga_card: Option<LigaCard>,
    pub similarity: f64,
    pub best_price: BestPrice,
    /// Price difference in USD; absent for unmatched leftovers.
    pub savings: Option<f64>,
    pub match_type: MatchTier,
    pub match_method: MatchMethod,
    /// `round(similarity * 100)`.
    pub confidence_score: u32,
    pub match_reasons: Vec<String>,
}

impl CardMatch {
    pub fn is_paired(&self) -> bool {
        self.tcg_card.is_some() && self.liga_card.is_some()
    }

    /// Variation of the listing's print code, preferring the storefront code.
    pub fn variation(&self) -> Option<CardVariation> {
        let liga_code = self
            .liga_card
            .as_ref()
            .map(|c| c.numeric_code.clone())
            .filter(|c| !c.is_empty());
        let code = liga_code.or_else(|| {
            self.tcg_card
                .as_ref()
                .and_then(crate::matching::tcg_card_code)
        })?;
        Some(crate::matching::identify_variation(&code))
    }
}

// ---------------------------------------------------------------------------
// MatchStats
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchStats {
    pub perfect: usize,
    pub high: usize,
    pub medium: usize,
    /// `high + medium`.
    pub good: usize,
    pub none: usize,
    pub tcg_better: usize,
    pub liga_better: usize,
    pub total_savings: f64,
}

// ---------------------------------------------------------------------------
// SortKey
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    #[default]
    Savings,
    Match,
    PriceLow,
    PriceHigh,
}

impl FromStr for SortKey {
    type Err = CompareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "savings" => Ok(SortKey::Savings),
            "match" => Ok(SortKey::Match),
            "price-low" => Ok(SortKey::PriceLow),
            "price-high" => Ok(SortKey::PriceHigh),
            other => Err(CompareError::InvalidArgument(format!(
                "Unknown sort key: {other}"
            ))),
        }
    }
}
