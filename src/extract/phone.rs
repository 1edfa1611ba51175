//! Phone-number exclusion filtering and normalization

use crate::extract::tables::{EXCLUDE_PATTERNS, SUSPICIOUS_CONTEXT};
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

/// Returns true for candidates that look like IDs, timestamps or other
/// non-phone digit runs
///
/// Two checks: the exclusion pattern table, then the immediate context
/// (first and last 5 characters) against known field-name fragments.
pub fn is_excluded(text: &str) -> bool {
    let text = text.trim().to_lowercase();

    if EXCLUDE_PATTERNS.iter().any(|p| p.is_match(&text)) {
        return true;
    }

    let chars: Vec<char> = text.chars().collect();
    let tail_start = chars.len().saturating_sub(5);
    let mut context: String = chars[tail_start..].iter().collect();
    context.extend(chars.iter().take(5));

    SUSPICIOUS_CONTEXT
        .iter()
        .any(|fragment| context.contains(fragment))
}

/// Normalizes raw phone candidates to a canonical `+`-prefixed form,
/// memoizing results per raw input string
///
/// The cache is process-wide by construction (one normalizer is shared
/// across all site pipelines via `Arc`) and never invalidated: entries
/// are a pure function of the input.
#[derive(Default)]
pub struct PhoneNormalizer {
    cache: Mutex<HashMap<String, Option<String>>>,
}

impl PhoneNormalizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Maps a raw candidate to canonical international form, or `None`
    /// if it does not fit any accepted shape
    pub fn normalize(&self, raw: &str) -> Option<String> {
        {
            let cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
            if let Some(hit) = cache.get(raw) {
                return hit.clone();
            }
        }

        let result = normalize_candidate(raw);
        let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
        cache.insert(raw.to_string(), result.clone());
        result
    }
}

/// The actual normalization rules
///
/// French national `0XXXXXXXXX` becomes `+33XXXXXXXXX`; `+`-prefixed
/// numbers are kept when they carry 10-15 digits; `00`-prefixed numbers
/// lose the `00` for a `+` when 11-15 digits remain. Anything else, or
/// anything under 8 digits, yields no result.
fn normalize_candidate(raw: &str) -> Option<String> {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect();
    let digits = cleaned.chars().filter(|c| c.is_ascii_digit()).count();
    if digits < 8 {
        return None;
    }

    if !cleaned.starts_with('+') && cleaned.starts_with('0') && digits == 10 {
        return match cleaned.chars().nth(1) {
            Some(c) if ('1'..='8').contains(&c) => Some(format!("+33{}", &cleaned[1..])),
            _ => None,
        };
    }

    if cleaned.starts_with('+') {
        if (10..=15).contains(&digits) {
            return Some(cleaned);
        }
        return None;
    }

    if cleaned.starts_with("00") {
        if (11..=15).contains(&(digits - 2)) {
            return Some(format!("+{}", &cleaned[2..]));
        }
        return None;
    }

    None
}
