// src/extractors/visura.rs
use crate::extractors::fields::extract_company_fields;
use crate::extractors::officers::extract_officers;
use crate::extractors::shareholders::extract_shareholders;
use crate::models::{CompanyFields, Officer, Shareholder};

/// Everything pulled out of one visura's text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedVisura {
    pub company: CompanyFields,
    pub shareholders: Vec<Shareholder>,
    pub officers: Vec<Officer>,
}

/// Runs the field, shareholder and officer extractors over the full text of
/// one document. Unrecognised layouts give empty fields and no children.
pub fn extract_visura(text: &str) -> ExtractedVisura {
    let visura = ExtractedVisura {
        company: extract_company_fields(text),
        shareholders: extract_shareholders(text),
        officers: extract_officers(text),
    };

    tracing::debug!(
        "Extracted '{}': {} soci, {} amministratori",
        visura.company.ragione_sociale,
        visura.shareholders.len(),
        visura.officers.len()
    );

    visura
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "VISURA ORDINARIA SOCIETA' DI CAPITALE\n\
        NEWTON S.R.L.\n\
        Indirizzo Sede legale MILANO (MI)\nVIA TORINO 12\nCAP 20123\n\
        Domicilio digitale/PEC newton@legalmail.it\n\
        Numero REA MI - 1234567\n\
        Codice fiscale e n.iscr. al Registro Imprese 09876543210\n\
        Partita IVA 09876543210\n\
        Forma giuridica societa' a responsabilita' limitata\n\
        Capitale sociale 10.000,00\n\
        Soci e titolari di diritti su azioni e quote 1\n\
        Amministratori 1\n\
        1) NERI LUCA\nCodice fiscale: NRELCU75D15F205Z\n\
        Quota di nominali: 10.000,00 Euro\n100 %\n\
        Amministratore NERI LUCA\n2) Codice fiscale: NRELCU75D15F205Z\n\
        domicilio MILANO VIA TORINO 12 carica amministratore unico";

    #[test]
    fn test_full_document() {
        let visura = extract_visura(SAMPLE);

        assert_eq!(visura.company.ragione_sociale, "NEWTON S.R.L.");
        assert_eq!(visura.company.codice_fiscale, "09876543210");
        assert_eq!(visura.company.piva, "09876543210");
        assert_eq!(visura.company.pec, "newton@legalmail.it");
        assert_eq!(visura.company.rea, "MI - 1234567");
        assert_eq!(visura.company.indirizzo_sede_legale, "MILANO (MI) VIA TORINO 12 CAP 20123");
        assert_eq!(visura.company.capitale_sociale, "10.000,00");
        assert_eq!(visura.company.num_soci, "1");
        assert_eq!(visura.company.num_amministratori, "1");

        assert_eq!(visura.shareholders.len(), 1);
        assert_eq!(visura.shareholders[0].nome, "Neri Luca");
        assert_eq!(visura.shareholders[0].quota_euro, "10.000,00");
        assert_eq!(visura.shareholders[0].percentuale, "100");

        assert_eq!(visura.officers.len(), 1);
        assert_eq!(visura.officers[0].domicilio, "MILANO VIA TORINO 12");
    }

    #[test]
    fn test_unknown_layout_degrades_to_empty() {
        let visura = extract_visura("Rechnung Nr. 42\nBetrag: 100,00");
        assert_eq!(visura, ExtractedVisura::default());
    }
}
