//! Email and phone extraction from one page

use crate::extract::phone::{is_excluded, PhoneNormalizer};
use crate::extract::tables::{COUNTRY_DIAL_CODES, PHONE_KEYWORDS};
use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use scraper::{Html, Selector};

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").unwrap());

/// The four phone pattern families, each wrapped in an optional keyword
/// context so labeled numbers ("Tél: 01 23 ...") match with their label
///
/// Families: French national, North-American, generic international
/// with a dial code, and local ten-digit without prefix.
static PHONE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    let before = format!(
        r"(?:(?:^|[^\w])|(?:{})[: .-]*)?",
        PHONE_KEYWORDS.join("|")
    );
    let after = r"(?:$|[^\d])";

    [
        format!(r"{before}(?:(?:(?:\+|00)?33|0)\s*[1-9](?:[\s.-]*\d{{2}}){{4}}){after}"),
        format!(
            r"{before}(?:\+?1[-. ]?)?\(?[2-9][0-9]{{2}}\)?[-. ]?[0-9]{{3}}[-. ]?[0-9]{{4}}{after}"
        ),
        format!(r"{before}(?:\+|00)?(?:{COUNTRY_DIAL_CODES})\s*[1-9][0-9]{{7,14}}{after}"),
        format!(r"{before}0[1-9](?:[\s.-]*\d{{2}}){{4}}{after}"),
    ]
    .iter()
    .map(|p| {
        RegexBuilder::new(p)
            .case_insensitive(true)
            .multi_line(true)
            .build()
            .unwrap()
    })
    .collect()
});

/// Extracts deduplicated emails and normalized phone numbers
///
/// Emails are matched against the visible text and the raw markup (the
/// second pass catches addresses sitting in attributes or scripts).
/// Phones come from `tel:` link targets plus the pattern families run
/// over the text of contact-bearing tags; every candidate passes
/// the exclusion filter and the normalizer before acceptance.
pub fn extract_contacts(
    document: &Html,
    raw_html: &str,
    visible_text: &str,
    normalizer: &PhoneNormalizer,
) -> (Vec<String>, Vec<String>) {
    let mut emails = Vec::new();
    for haystack in [visible_text, raw_html] {
        for m in EMAIL_PATTERN.find_iter(haystack) {
            push_unique(&mut emails, m.as_str());
        }
    }

    let mut phones = Vec::new();

    if let Ok(selector) = Selector::parse("a[href]") {
        for element in document.select(&selector) {
            if let Some(target) = element
                .value()
                .attr("href")
                .and_then(|h| h.strip_prefix("tel:"))
            {
                accept_candidate(&mut phones, target.trim(), normalizer);
            }
        }
    }

    let blocks = text_blocks(document);
    for pattern in PHONE_PATTERNS.iter() {
        for m in pattern.find_iter(&blocks) {
            accept_candidate(&mut phones, m.as_str().trim(), normalizer);
        }
    }

    (emails, phones)
}

fn accept_candidate(phones: &mut Vec<String>, candidate: &str, normalizer: &PhoneNormalizer) {
    if is_excluded(candidate) {
        return;
    }
    if let Some(normalized) = normalizer.normalize(candidate) {
        push_unique(phones, &normalized);
    }
}

/// Joins the text of tags that typically hold contact details,
/// descendants included, so numbers wrapped in inline markup
/// (`<strong>`, `<b>`, ...) are still scanned
fn text_blocks(document: &Html) -> String {
    let selector = match Selector::parse("p, div, span, a, li, td") {
        Ok(s) => s,
        Err(_) => return String::new(),
    };

    let mut blocks = Vec::new();
    for element in document.select(&selector) {
        let text = element
            .text()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        if !text.is_empty() {
            blocks.push(text);
        }
    }
    blocks.join(" ")
}

fn push_unique(values: &mut Vec<String>, value: &str) {
    if !values.iter().any(|v| v == value) {
        values.push(value.to_string());
    }
}
