// src/utils/text.rs

/// Collapses every run of whitespace (newlines included) into a single space
/// and trims both ends.
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Title-cases `s`: a letter is uppercased when it starts the string or
/// follows a non-letter, every other letter is lowercased.
///
/// "D'ANGELO MARIA-LUISA" becomes "D'Angelo Maria-Luisa".
///
/// Letters whose case mapping expands to several chars (e.g. `ß`) are left
/// as they are, so applying this twice gives the same result as once.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_is_letter = false;

    for c in s.chars() {
        if c.is_alphabetic() {
            let mapped = if prev_is_letter {
                single_char(c.to_lowercase())
            } else {
                single_char(c.to_uppercase())
            };
            out.push(mapped.unwrap_or(c));
            prev_is_letter = true;
        } else {
            out.push(c);
            prev_is_letter = false;
        }
    }

    out
}

fn single_char(mut mapping: impl Iterator<Item = char>) -> Option<char> {
    match (mapping.next(), mapping.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

/// Normalization applied to shareholder and officer names.
pub fn normalize_name(s: &str) -> String {
    title_case(&collapse_whitespace(s))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("  VIA ROMA\n 10 \t\n ROMA  "), "VIA ROMA 10 ROMA");
        assert_eq!(collapse_whitespace("\n\n"), "");
    }

    #[test]
    fn test_title_case_apostrophes_and_accents() {
        assert_eq!(title_case("D'ANGELO MARIA"), "D'Angelo Maria");
        assert_eq!(title_case("NICOLÒ DELL'ÉTOILE"), "Nicolò Dell'Étoile");
        assert_eq!(title_case("rossi-bianchi"), "Rossi-Bianchi");
    }

    #[test]
    fn test_normalize_name_is_idempotent() {
        let samples = [
            "ROSSI   MARIO",
            "\n  verdi\tGIUSEPPE \n",
            "D'ANGELO  ÀNNA",
            "",
            "   ",
            "mc donald 2nd",
            "ÜBER  ß",
        ];

        for raw in samples {
            let once = normalize_name(raw);
            let twice = normalize_name(&once);
            assert_eq!(once, twice, "normalization not idempotent for {:?}", raw);
        }
        assert_eq!(normalize_name("ROSSI   MARIO\n"), "Rossi Mario");
    }
}
