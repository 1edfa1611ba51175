//! French legal-entity identifier extraction and checksum validation

use crate::record::CompanyInfo;
use once_cell::sync::Lazy;
use regex::Regex;

// Labeled forms are tried before bare digit runs.
static SIREN_LABELED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(?:SIREN|siren|Siren|siret)\s*:?\s*(\d{9})\b").unwrap());
static SIREN_BARE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(\d{9})\b").unwrap());

static SIRET_LABELED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(?:SIRET|siret|Siret)\s*:?\s*(\d{14})\b").unwrap());
static SIRET_BARE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(\d{14})\b").unwrap());

static TVA_LABELED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\b(?:TVA|N°\s*TVA|Numéro\s*TVA|VAT)\s*(?:intra(?:communautaire)?)?(?:n°|num[ée]ro)?\s*:?\s*((?:FR|BE|DE|IT|ES)\s*\d{2}\s*\d{9})\b",
    )
    .unwrap()
});
static TVA_BARE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b((?:FR|BE|DE|IT|ES)\s*\d{2}\s*\d{9})\b").unwrap());

/// Validates a SIREN (9 digits): Luhn-style doubling at odd indices
pub fn validate_siren(siren: &str) -> bool {
    if siren.len() != 9 || !siren.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }

    let sum: u32 = siren
        .chars()
        .enumerate()
        .map(|(i, c)| {
            let mut digit = c.to_digit(10).unwrap_or(0);
            if i % 2 == 1 {
                digit *= 2;
                if digit > 9 {
                    digit -= 9;
                }
            }
            digit
        })
        .sum();

    sum % 10 == 0
}

/// Validates a SIRET (14 digits): doubling at even indices
pub fn validate_siret(siret: &str) -> bool {
    if siret.len() != 14 || !siret.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }

    let sum: u32 = siret
        .chars()
        .enumerate()
        .map(|(i, c)| {
            let mut digit = c.to_digit(10).unwrap_or(0);
            if i % 2 == 0 {
                digit *= 2;
                if digit > 9 {
                    digit -= 9;
                }
            }
            digit
        })
        .sum();

    sum % 10 == 0
}

/// Validates an intra-community VAT identifier
///
/// Two uppercase letters plus 11 digits. French numbers embed a SIREN
/// after the 2-digit checksum prefix and must pass its validator; other
/// country prefixes are accepted on format alone.
pub fn validate_tva(tva: &str) -> bool {
    let tva: String = tva.chars().filter(|c| !c.is_whitespace()).collect();
    let tva = tva.to_uppercase();

    static TVA_SHAPE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z]{2}\d{11}$").unwrap());
    if !TVA_SHAPE.is_match(&tva) {
        return false;
    }

    if let Some(rest) = tva.strip_prefix("FR") {
        return validate_siren(&rest[2..]);
    }

    true
}

/// Extracts validated company identifiers from a page's visible text
///
/// SIRET is searched first; a valid hit also yields the SIREN (its
/// first 9 digits) and ends the SIREN search. Each of the three fields
/// is otherwise found independently. `source` is the page URL when any
/// field was set.
pub fn extract_company_info(text: &str, url: &str) -> CompanyInfo {
    let mut info = CompanyInfo::default();

    for pattern in [&*SIRET_LABELED, &*SIRET_BARE] {
        if let Some(captures) = pattern.captures(text) {
            let siret = &captures[1];
            if validate_siret(siret) {
                info.siren = Some(siret[..9].to_string());
                info.siret = Some(siret.to_string());
                info.source = Some(url.to_string());
                break;
            }
        }
    }

    if info.siren.is_none() {
        for pattern in [&*SIREN_LABELED, &*SIREN_BARE] {
            if let Some(captures) = pattern.captures(text) {
                let siren = &captures[1];
                if validate_siren(siren) {
                    info.siren = Some(siren.to_string());
                    info.source = Some(url.to_string());
                    break;
                }
            }
        }
    }

    for pattern in [&*TVA_LABELED, &*TVA_BARE] {
        if let Some(captures) = pattern.captures(text) {
            let tva: String = captures[1].chars().filter(|c| *c != ' ').collect();
            if validate_tva(&tva) {
                info.tva = Some(tva);
                info.source = Some(url.to_string());
                break;
            }
        }
    }

    info
}
