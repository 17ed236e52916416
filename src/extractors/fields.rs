// src/extractors/fields.rs

// --- Imports ---
use crate::models::{CompanyField, CompanyFields};
use crate::utils::text::collapse_whitespace;
use once_cell::sync::Lazy;
use regex::Regex;

/// How a captured group is cleaned up before it is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostProcess {
    /// Leading/trailing whitespace removed.
    Trim,
    /// Trimmed, and every internal whitespace run (newlines included)
    /// replaced with a single space.
    CollapseWhitespace,
}

/// One named pattern rule. Group 1 of the first match is the value.
#[derive(Debug)]
pub struct FieldRule {
    pub field: CompanyField,
    pub primary: Option<Regex>,
    /// Tried only when `primary` yields nothing.
    pub fallback: Option<Regex>,
    pub post: PostProcess,
}

impl FieldRule {
    fn new(field: CompanyField, primary: &str, fallback: Option<&str>, post: PostProcess) -> Self {
        Self {
            field,
            primary: compile(field, primary),
            fallback: fallback.and_then(|pat| compile(field, pat)),
            post,
        }
    }

    /// Applies the rule to `text`. Never fails: no match gives `""`.
    pub fn apply(&self, text: &str) -> String {
        let raw = [&self.primary, &self.fallback]
            .into_iter()
            .flatten()
            .map(|re| first_capture(re, text))
            .find(|value| !value.is_empty())
            .unwrap_or_default();

        match self.post {
            PostProcess::Trim => raw,
            PostProcess::CollapseWhitespace => collapse_whitespace(&raw),
        }
    }
}

/// Compiles a rule pattern, case-insensitive. A broken pattern is logged and
/// the rule then never matches.
fn compile(field: CompanyField, pattern: &str) -> Option<Regex> {
    match Regex::new(&format!("(?i){}", pattern)) {
        Ok(re) => Some(re),
        Err(e) => {
            tracing::error!("Invalid pattern for field '{}': {}", field.column(), e);
            None
        }
    }
}

/// First match's group 1, trimmed, or `""`.
pub fn first_capture(re: &Regex, text: &str) -> String {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default()
}

// --- Rule table (Lazy Static) ---
// Two layouts are covered; the labels are the ones printed by the registry.
pub static FIELD_RULES: Lazy<Vec<FieldRule>> = Lazy::new(|| {
    use CompanyField::*;
    use PostProcess::{CollapseWhitespace, Trim};

    vec![
        // Name after the document title line, else the "Denominazione:" label.
        // The label value stops at end of line so it does not run into the labels below.
        FieldRule::new(
            RagioneSociale,
            r"VISURA[^\n]*\n([A-Z0-9\.\s'&]+S\.?R\.?L\.?)",
            Some(r"Denominazione:\s*([A-Z0-9\. \t'&]+)"),
            Trim,
        ),
        FieldRule::new(
            CodiceFiscale,
            r"Codice fiscale(?: e n\.iscr\. al Registro Imprese)?\s*[:\s]*([A-Z0-9]+)",
            None,
            Trim,
        ),
        FieldRule::new(Piva, r"Partita IVA\s*([0-9]+)", None, Trim),
        FieldRule::new(FormaGiuridica, r"Forma giuridica\s*(.+)", None, Trim),
        FieldRule::new(
            Pec,
            r"(?:PEC|Domicilio digitale/PEC)\s*([A-Za-z0-9\.\-_@]+)",
            None,
            Trim,
        ),
        FieldRule::new(Rea, r"Numero REA\s*([A-Z]+\s*-\s*\d+)", None, Trim),
        FieldRule::new(DataCostituzione, r"Data atto di costituzione\s*([\d/\.]+)", None, Trim),
        FieldRule::new(DataIscrizione, r"Data iscrizione\s*([\d/\.]+)", None, Trim),
        FieldRule::new(DataUltimoProtocollo, r"Data ultimo protocollo\s*([\d/\.]+)", None, Trim),
        FieldRule::new(StatoAttivita, r"Stato attività\s*([A-Za-z]+)", None, Trim),
        FieldRule::new(DataInizioAttivita, r"Data inizio attività\s*([\d/\.]+)", None, Trim),
        FieldRule::new(AttivitaPrevalente, r"Attività prevalente\s*(.+)", None, Trim),
        FieldRule::new(CodiceAteco, r"Codice ATECO(?: 2\.1)?\s*([0-9\.\-]+)", None, Trim),
        FieldRule::new(
            CapitaleSociale,
            r"Capitale sociale(?: sottoscritto)?\s*([0-9\.,]+)",
            Some(r"Capitale sociale in Euro\s*Deliberato:\s*([0-9\.,]+)"),
            Trim,
        ),
        FieldRule::new(
            IndirizzoSedeLegale,
            r"(?s)Indirizzo Sede legale\s*(.+?)(?:Domicilio digitale/PEC|PEC|Numero REA|Partita IVA)",
            None,
            CollapseWhitespace,
        ),
        FieldRule::new(
            NumSoci,
            r"Soci e titolari di diritti su\s*azioni e quote\s*(\d+)",
            None,
            Trim,
        ),
        FieldRule::new(NumAmministratori, r"Amministratori\s*(\d+)", None, Trim),
    ]
});

/// Extracts every company field from the full text of one document.
pub fn extract_company_fields(text: &str) -> CompanyFields {
    let mut fields = CompanyFields::default();

    for rule in FIELD_RULES.iter() {
        let value = rule.apply(text);
        if value.is_empty() {
            tracing::trace!("No match for field '{}'", rule.field.column());
        }
        *fields.get_mut(rule.field) = value;
    }

    fields
}
