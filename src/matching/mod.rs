//! Cross-source record linkage between TCGplayer and Liga One Piece listings.
//!
//! The pipeline is pure and synchronous:
//!
//! 1. [`normalize`] pulls print codes out of titles and canonicalizes names.
//! 2. [`similarity`] scores one listing from each source.
//! 3. [`matcher`] runs the two-pass greedy assignment.
//! 4. [`classify`] turns pairs and leftovers into [`CardMatch`](crate::models::CardMatch) records.
//! 5. [`aggregate`] derives stats and orderings.
//!
//! [`Comparison`] bundles the whole pipeline for a pair of result sets.

pub mod aggregate;
pub mod classify;
pub mod comparison;
pub mod format;
pub mod matcher;
pub mod normalize;
pub mod similarity;
pub mod variation;

pub use aggregate::{match_stats, sort_matches, sorted_matches};
pub use comparison::Comparison;
pub use format::format_currency;
pub use matcher::{assign, match_cards, match_cards_with, Assignment, Pairing};
pub use normalize::{
    code_set_prefix, extract_code, normalize_code, normalize_name, set_code_from_number,
    set_code_from_set_name, tcg_card_code,
};
pub use similarity::{calculate_similarity, SimilarityScorer};
pub use variation::identify_variation;
