// src/utils/text_debug.rs
use crate::batch::file_name;
use crate::extractors::FieldRule;
use crate::pdf::TextSource;
use crate::storage::StorageManager;
use crate::utils::error::PdfError;
use std::path::Path;

/// Returns `text` with each highlighted span wrapped as `[[label|...]]`.
/// Spans overlapping an earlier one are dropped.
pub fn annotate_text(text: &str, highlights: &[(usize, usize, &str)]) -> String {
    let mut annotated = String::with_capacity(text.len() + highlights.len() * 16);
    let mut last_pos = 0;
    let mut sorted_highlights = highlights.to_vec();
    sorted_highlights.sort_by_key(|h| h.0); // Sort by position

    for (start, end, label) in sorted_highlights {
        if start < last_pos {
            continue;
        }
        annotated.push_str(&text[last_pos..start]);
        annotated.push_str(&format!("[[{}|{}]]", label, &text[start..end]));
        last_pos = end;
    }

    annotated.push_str(&text[last_pos..]);
    annotated
}

/// Span of the value each rule would pick: primary first, then fallback.
pub fn rule_highlights<'a>(text: &str, rules: &'a [FieldRule]) -> Vec<(usize, usize, &'a str)> {
    rules
        .iter()
        .filter_map(|rule| {
            [&rule.primary, &rule.fallback]
                .into_iter()
                .flatten()
                .filter_map(|re| re.captures(text).and_then(|caps| caps.get(1)))
                .find(|m| !m.as_str().trim().is_empty())
                .map(|m| (m.start(), m.end(), rule.field.column()))
        })
        .collect()
}

/// One line per rule with its value (or `<no match>`), then the annotated text.
pub fn create_rule_report(text: &str, rules: &[FieldRule]) -> String {
    let mut report = String::new();

    for rule in rules {
        let value = rule.apply(text);
        let shown = if value.is_empty() { "<no match>" } else { value.as_str() };
        report.push_str(&format!("{:<24} {}\n", rule.field.column(), shown));
    }

    report.push_str("\n---- annotated text ----\n");
    report.push_str(&annotate_text(text, &rule_highlights(text, rules)));
    report
}

/// Wraps another source and saves every document's text and rule report
/// under the output `debug/` directory.
pub struct DebugTextSource<'a, S> {
    inner: S,
    storage: &'a StorageManager,
    rules: &'a [FieldRule],
}

impl<'a, S: TextSource> DebugTextSource<'a, S> {
    pub fn new(inner: S, storage: &'a StorageManager, rules: &'a [FieldRule]) -> Self {
        Self { inner, storage, rules }
    }
}

impl<S: TextSource> TextSource for DebugTextSource<'_, S> {
    fn document_text(&self, path: &Path) -> Result<String, PdfError> {
        let text = self.inner.document_text(path)?;

        let report = create_rule_report(&text, self.rules);
        match self.storage.save_debug_text(&file_name(path), &text, &report) {
            Ok(report_path) => tracing::info!("Saved rule report: {}", report_path.display()),
            Err(e) => tracing::warn!("Failed to save debug text for {}: {}", path.display(), e),
        }

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::FIELD_RULES;

    #[test]
    fn test_annotate_text_skips_overlaps() {
        let text = "Partita IVA 0123";
        let highlights = [(12, 16, "piva"), (0, 7, "label"), (5, 14, "overlap")];
        assert_eq!(annotate_text(text, &highlights), "[[label|Partita]] IVA [[piva|0123]]");
    }

    #[test]
    fn test_rule_report_lists_every_field() {
        let report = create_rule_report("Partita IVA 01234567890", &FIELD_RULES);

        assert!(report.contains("piva"));
        assert!(report.contains("01234567890"));
        assert!(report.contains("ragione_sociale          <no match>"));
        assert!(report.contains("[[piva|01234567890]]"));
    }

    #[test]
    fn test_debug_source_saves_text() {
        struct Fixed;
        impl TextSource for Fixed {
            fn document_text(&self, _path: &Path) -> Result<String, PdfError> {
                Ok("Partita IVA 01234567890".to_string())
            }
        }

        let dir = tempfile::tempdir().unwrap();
        let storage = StorageManager::new(dir.path()).unwrap();
        let source = DebugTextSource::new(Fixed, &storage, &FIELD_RULES);

        let text = source.document_text(Path::new("/in/acme.pdf")).unwrap();

        assert_eq!(text, "Partita IVA 01234567890");
        assert!(dir.path().join("debug").join("acme.txt").exists());
        assert!(dir.path().join("debug").join("acme_rules.txt").exists());
    }
}
