//! Normalizer and variation table tests.

mod common;

use cardcompare::matching::{
    code_set_prefix, extract_code, identify_variation, normalize_code, normalize_name,
    set_code_from_number, set_code_from_set_name, tcg_card_code,
};

// ---------------------------------------------------------------------------
// extract_code
// ---------------------------------------------------------------------------

#[test]
fn extract_code_finds_inline_code() {
    assert_eq!(
        extract_code("Monkey.D.Luffy - OP06-054").as_deref(),
        Some("OP06-054")
    );
}

#[test]
fn extract_code_upper_cases_and_prefers_first_family() {
    assert_eq!(
        extract_code("luffy op06-054 ST01-001").as_deref(),
        Some("OP06-054")
    );
}

#[test]
fn extract_code_knows_other_families() {
    assert_eq!(extract_code("Zoro (EB01-012)").as_deref(), Some("EB01-012"));
    assert_eq!(extract_code("Nami P-001").as_deref(), Some("P-001"));
    assert_eq!(extract_code("Uta PRB01-001").as_deref(), Some("PRB01-001"));
    assert_eq!(extract_code("Kaido ST04-003").as_deref(), Some("ST04-003"));
}

#[test]
fn extract_code_is_total() {
    assert_eq!(extract_code(""), None);
    assert_eq!(extract_code("Monkey D. Luffy"), None);
}

// ---------------------------------------------------------------------------
// normalize_name
// ---------------------------------------------------------------------------

#[test]
fn normalize_name_strips_codes_and_brackets() {
    assert_eq!(normalize_name("Monkey.D.Luffy (OP06-054)"), "monkey.d.luffy");
    assert_eq!(normalize_name("[Alt Art]  Nami "), "alt art nami");
}

#[test]
fn normalize_name_removes_brackets_without_splitting_words() {
    assert_eq!(normalize_name("Nami(Parallel)"), "namiparallel");
    assert_eq!(normalize_name("Nami[SP]"), "namisp");
    assert_eq!(normalize_name("Nami ( Parallel )"), "nami parallel");
}

#[test]
fn normalize_name_collapses_whitespace() {
    assert_eq!(normalize_name("  Roronoa   Zoro\t"), "roronoa zoro");
}

#[test]
fn normalize_name_empty_is_empty() {
    assert_eq!(normalize_name(""), "");
    assert_eq!(normalize_name("OP06-054"), "");
}

// ---------------------------------------------------------------------------
// normalize_code
// ---------------------------------------------------------------------------

#[test]
fn normalize_code_strips_variant_suffix() {
    assert_eq!(normalize_code("OP06-054SR"), "OP06-054");
    assert_eq!(normalize_code("OP06-054-SR"), "OP06-054");
    assert_eq!(normalize_code("OP06-054_AA"), "OP06-054");
}

#[test]
fn normalize_code_leaves_base_codes_alone() {
    assert_eq!(normalize_code("OP06-054"), "OP06-054");
    assert_eq!(normalize_code("ST01-001"), "ST01-001");
    assert_eq!(normalize_code("P-001"), "P-001");
    assert_eq!(normalize_code(""), "");
}

#[test]
fn normalize_code_is_idempotent() {
    for code in ["OP06-054SR", "OP06-054", "ST10-001-AA", "EB01-012_E", "P-001", "x"] {
        let once = normalize_code(code);
        assert_eq!(normalize_code(&once), once, "not idempotent for {code}");
    }
}

// ---------------------------------------------------------------------------
// Set codes
// ---------------------------------------------------------------------------

#[test]
fn code_set_prefix_takes_leading_segment() {
    assert_eq!(code_set_prefix("OP06-054"), "OP06");
    assert_eq!(code_set_prefix("OP06"), "OP06");
}

#[test]
fn set_code_from_number_reads_prefix() {
    assert_eq!(set_code_from_number("OP06-054").as_deref(), Some("OP06"));
    assert_eq!(set_code_from_number("ST10-001").as_deref(), Some("ST10"));
    assert_eq!(set_code_from_number("P-001").as_deref(), Some("P"));
    assert_eq!(set_code_from_number("promo"), None);
}

#[test]
fn set_code_from_set_name_uses_table() {
    assert_eq!(set_code_from_set_name("Wings of the Captain"), "OP06");
    assert_eq!(set_code_from_set_name("ROMANCE DAWN"), "OP01");
    assert_eq!(set_code_from_set_name("Starter Deck Yamato"), "ST09");
    assert_eq!(set_code_from_set_name("Starter Deck: Film Edition"), "ST01");
    assert_eq!(set_code_from_set_name("Championship 2024"), "CH01");
    assert_eq!(set_code_from_set_name("Mystery Box"), "UNK");
}

#[test]
fn tcg_card_code_prefers_number_attribute() {
    let with_number = common::tcg_card(1, "Luffy ST01-001", Some("OP06-054"), None, None);
    assert_eq!(tcg_card_code(&with_number).as_deref(), Some("OP06-054"));

    let name_only = common::tcg_card(2, "Luffy ST01-001", None, None, None);
    assert_eq!(tcg_card_code(&name_only).as_deref(), Some("ST01-001"));

    let nothing = common::tcg_card(3, "Luffy", None, None, None);
    assert_eq!(tcg_card_code(&nothing), None);
}

// ---------------------------------------------------------------------------
// identify_variation
// ---------------------------------------------------------------------------

#[test]
fn identify_variation_known_suffixes() {
    let sr = identify_variation("OP06-054SR");
    assert_eq!(sr.code, "SR");
    assert_eq!(sr.name, "Super Rare");

    let aa = identify_variation("OP06-054-AA");
    assert_eq!(aa.code, "AA");
    assert_eq!(aa.name, "Alternate Art");
}

#[test]
fn identify_variation_defaults_to_standard() {
    let plain = identify_variation("OP06-054");
    assert_eq!(plain.name, "Standard");
    assert_eq!(plain.code, "");

    let unknown = identify_variation("OP06-054ZZ");
    assert_eq!(unknown.name, "Standard");
    assert_eq!(unknown.code, "ZZ");

    assert_eq!(identify_variation("").name, "Standard");
}
