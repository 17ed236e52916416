// src/extractors/officers.rs
use crate::models::Officer;
use crate::utils::text::{collapse_whitespace, normalize_name};
use once_cell::sync::Lazy;
use regex::Regex;

// "Amministratore", name span, fiscal code, then the domicile up to "carica".
static OFFICER_BLOCK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)Amministratore\s+([A-Z'À-Ü\s]+)[\s\S]*?Codice fiscale:\s*([A-Z0-9]+)[\s\S]*?domicilio\s*(.+?)\s*carica",
    )
    .expect("Failed to compile OFFICER_BLOCK_RE")
});

/// Finds every officer block in `text`, in text order.
pub fn extract_officers(text: &str) -> Vec<Officer> {
    let officers: Vec<Officer> = OFFICER_BLOCK_RE
        .captures_iter(text)
        .map(|caps| {
            let group = |i| caps.get(i).map(|m| m.as_str()).unwrap_or_default();
            Officer {
                nome: normalize_name(group(1)),
                codice_fiscale: group(2).to_string(),
                domicilio: collapse_whitespace(group(3)),
            }
        })
        .collect();

    tracing::debug!("Found {} officer blocks", officers.len());
    officers
}
