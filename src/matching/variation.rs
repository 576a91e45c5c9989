use crate::models::CardVariation;

// code, name, description, rarity, glyph
const VARIATIONS: &[(&str, &str, &str, &str, &str)] = &[
    ("E", "Special", "Special edition", "Special", "⭐"),
    ("AA", "Alternate Art", "Alternate artwork", "Super Rare", "🎨"),
    ("RE", "Reprint", "Reprinted card", "Common", "🔄"),
    ("FA", "Full Art", "Full artwork", "Rare", "🖼️"),
    ("AS", "Anniversary Set", "Anniversary edition", "Secret Rare", "🎂"),
    ("BS", "Best Selection", "Best selection print", "Super Rare", "🏆"),
    ("CH", "Championship", "Championship edition", "Promo", "🥇"),
    ("PR", "Promo", "Promotional card", "Promo", "🎁"),
    ("SP", "Special", "Special edition", "Special", "✨"),
    ("SR", "Super Rare", "Super rare print", "Super Rare", "💎"),
];

/// Classify a raw code by the letters trailing its last `-` segment.
///
/// `OP06-054SR` -> Super Rare. Unknown or missing suffixes fall back to a
/// `Standard` entry carrying whatever suffix was found.
pub fn identify_variation(code: &str) -> CardVariation {
    let last = code.rsplit('-').next().unwrap_or("");
    let suffix = last.trim_start_matches(|c: char| c.is_ascii_digit());

    VARIATIONS
        .iter()
        .find(|(c, ..)| *c == suffix)
        .map(|&(code, name, description, rarity, glyph)| CardVariation {
            code: code.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            rarity: rarity.to_string(),
            glyph: glyph.to_string(),
        })
        .unwrap_or_else(|| CardVariation {
            code: suffix.to_string(),
            name: "Standard".to_string(),
            description: "Standard print".to_string(),
            rarity: "Normal".to_string(),
            glyph: "📄".to_string(),
        })
}
