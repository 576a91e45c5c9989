//! Listing extraction from Liga One Piece search pages.
//!
//! The storefront renders each result as a card block with stable class
//! names. Blocks are located by their opening tag and sliced up to the next
//! block; fields are then read from the slice by class name.

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

use crate::config;
use crate::models::{LigaCard, PriceKind, PriceLevel, PricePoint};

/// Opening tag whose class list contains `class`.
fn class_tag(class: &str) -> Regex {
    Regex::new(&format!(
        r#"(?is)<([a-z][a-z0-9]*)\b[^>]*\bclass\s*=\s*["'](?:[^"']*\s)?{}(?:\s[^"']*)?["'][^>]*>"#,
        regex::escape(class)
    ))
    .expect("class selector pattern is valid")
}

fn attr(name: &str) -> Regex {
    Regex::new(&format!(
        r#"(?is)(?:^|\s){}\s*=\s*["']([^"']*)["']"#,
        regex::escape(name)
    ))
    .expect("attribute pattern is valid")
}

struct Selectors {
    block: Regex,
    name: Regex,
    anchor: Regex,
    code: Regex,
    price_min: Regex,
    price_avg: Regex,
    price_max: Regex,
    image: Regex,
    link: Regex,
    edition: Regex,
    src: Regex,
    data_src: Regex,
    href: Regex,
}

static SELECTORS: LazyLock<Selectors> = LazyLock::new(|| Selectors {
    block: Regex::new(r#"(?is)<[a-z][a-z0-9]*\b[^>]*\bclass\s*=\s*["']([^"']*)["'][^>]*>"#)
        .expect("block pattern is valid"),
    name: class_tag("mtg-name"),
    anchor: Regex::new(r"(?is)<a\b[^>]*>(.*?)</a\s*>").expect("anchor pattern is valid"),
    code: class_tag("mtg-numeric-code"),
    price_min: class_tag("price-min"),
    price_avg: class_tag("price-avg"),
    price_max: class_tag("price-max"),
    image: class_tag("main-card"),
    link: class_tag("main-link-card"),
    edition: class_tag("edition-name"),
    src: attr("src"),
    data_src: attr("data-src"),
    href: attr("href"),
});

/// Whether a class list marks a listing block (`box p25`, `mtg-single`, `card-item`).
fn is_card_block(class_list: &str) -> bool {
    let classes: Vec<&str> = class_list.split_whitespace().collect();
    classes.contains(&"mtg-single")
        || classes.contains(&"card-item")
        || (classes.contains(&"box") && classes.contains(&"p25"))
}

/// Split a page into per-listing slices.
fn card_blocks(html: &str) -> Vec<&str> {
    let starts: Vec<usize> = SELECTORS
        .block
        .captures_iter(html)
        .filter(|c| c.get(1).is_some_and(|m| is_card_block(m.as_str())))
        .filter_map(|c| c.get(0).map(|m| m.start()))
        .collect();

    starts
        .iter()
        .enumerate()
        .map(|(i, &start)| {
            let end = starts.get(i + 1).copied().unwrap_or(html.len());
            &html[start..end]
        })
        .collect()
}

/// Text content of the first element opened by `open`, up to its closing tag.
fn inner_text(block: &str, open: &Regex) -> Option<String> {
    let caps = open.captures(block)?;
    let whole = caps.get(0)?;
    let tag = caps.get(1)?.as_str().to_ascii_lowercase();
    let rest = &block[whole.end()..];
    let close = format!("</{tag}");
    let end = rest.to_ascii_lowercase().find(&close).unwrap_or(rest.len());
    Some(strip_tags(&rest[..end]))
}

/// Text of the first `<a>` after the element opened by `open`.
fn anchor_text_after(block: &str, open: &Regex) -> Option<String> {
    let whole = open.find(block)?;
    let rest = &block[whole.end()..];
    let caps = SELECTORS.anchor.captures(rest)?;
    Some(strip_tags(caps.get(1)?.as_str()))
}

fn attr_of(block: &str, open: &Regex, attr: &Regex) -> Option<String> {
    let tag = open.find(block)?.as_str();
    attr.captures(tag)
        .and_then(|c| c.get(1))
        .map(|m| decode_entities(m.as_str().trim()))
        .filter(|v| !v.is_empty())
}

/// Remove markup and collapse whitespace.
pub fn strip_tags(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_tag = false;

    for ch in s.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    decode_entities(&out)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn decode_entities(s: &str) -> String {
    s.replace("&nbsp;", " ")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#039;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

/// Parse a Brazilian price label (`"R$ 1.234,56"` -> `1234.56`); 0 when unreadable.
///
/// Only the leading number counts, so trailing unit text such as
/// `"12,00 un"` is ignored.
pub fn parse_brl_price(text: &str) -> f64 {
    let cleaned = text.replace("R$", "");
    let cleaned = cleaned.trim().replace('.', "").replace(',', ".");

    let mut seen_point = false;
    let end = cleaned
        .char_indices()
        .find(|&(_, c)| {
            if c == '.' && !seen_point {
                seen_point = true;
                false
            } else {
                !c.is_ascii_digit()
            }
        })
        .map_or(cleaned.len(), |(i, _)| i);
    cleaned[..end]
        .trim_end_matches('.')
        .parse::<f64>()
        .unwrap_or(0.0)
}

/// Make a storefront link absolute.
pub fn absolute_url(url: &str, base: &str) -> String {
    if url.is_empty() || url.starts_with("http://") || url.starts_with("https://") {
        return url.to_string();
    }
    if let Some(rest) = url.strip_prefix("//") {
        return format!("https://{rest}");
    }
    let base = base.trim_end_matches('/');
    if url.starts_with('/') {
        format!("{base}{url}")
    } else {
        format!("{base}/{url}")
    }
}

fn strip_parens(code: &str) -> String {
    let code = code.trim();
    match code.strip_prefix('(').and_then(|c| c.strip_suffix(')')) {
        Some(inner) => inner.trim().to_string(),
        None => code.to_string(),
    }
}

fn parse_block(block: &str, base_url: &str) -> Option<LigaCard> {
    let sel = &*SELECTORS;

    let name = anchor_text_after(block, &sel.name).filter(|n| !n.is_empty())?;
    let numeric_code = inner_text(block, &sel.code)
        .map(|c| strip_parens(&c))
        .unwrap_or_default();

    let prices: Vec<PricePoint> = [
        (&sel.price_min, PriceKind::Min),
        (&sel.price_avg, PriceKind::Avg),
        (&sel.price_max, PriceKind::Max),
    ]
    .into_iter()
    .filter_map(|(re, kind)| {
        let value = parse_brl_price(&inner_text(block, re)?);
        (value > 0.0).then_some(PricePoint { value, kind })
    })
    .collect();

    let chosen = prices
        .iter()
        .find(|p| p.kind == PriceKind::Min)
        .or_else(|| prices.first())
        .copied()?;

    let image_url = attr_of(block, &sel.image, &sel.src)
        .or_else(|| attr_of(block, &sel.image, &sel.data_src))
        .map(|u| absolute_url(&u, base_url));
    let url = attr_of(block, &sel.link, &sel.href)
        .map(|u| absolute_url(&u, base_url))
        .unwrap_or_default();
    let set = inner_text(block, &sel.edition).filter(|s| !s.is_empty());

    Some(LigaCard {
        name,
        numeric_code,
        price: chosen.value,
        currency: "BRL".to_string(),
        price_usd: None,
        image_url,
        url,
        rarity: None,
        set,
        condition: Some("NM".to_string()),
        seller: Some(config::LIGA_SOURCE_NAME.to_string()),
        stock: Some(1),
        price_level: Some(PriceLevel::from(chosen.kind)),
        all_prices: prices,
    })
}

/// Extract every listing on a search page.
///
/// Blocks without a name or without any positive price are skipped.
/// Duplicate `(name, code)` pairs keep their first occurrence.
pub fn parse_listing_page(html: &str, base_url: &str) -> Vec<LigaCard> {
    let mut seen = HashSet::new();
    card_blocks(html)
        .into_iter()
        .filter_map(|block| parse_block(block, base_url))
        .filter(|card| seen.insert((card.name.clone(), card.numeric_code.clone())))
        .collect()
}
