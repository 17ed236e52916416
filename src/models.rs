// src/models.rs
use serde::Serialize;

/// A single spreadsheet cell as produced by [`SheetRow::cells`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CellValue<'a> {
    Text(&'a str),
    Number(f64),
}

/// Implemented by every record type written as one row of an output sheet.
pub trait SheetRow {
    /// Column headers, in output order.
    fn headers() -> Vec<&'static str>;

    /// Row cells, same order as [`SheetRow::headers`].
    fn cells(&self) -> Vec<CellValue<'_>>;
}

/// Scalar fields of a company, in output column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompanyField {
    RagioneSociale,
    CodiceFiscale,
    Piva,
    FormaGiuridica,
    Pec,
    Rea,
    DataCostituzione,
    DataIscrizione,
    DataUltimoProtocollo,
    StatoAttivita,
    DataInizioAttivita,
    AttivitaPrevalente,
    CodiceAteco,
    CapitaleSociale,
    IndirizzoSedeLegale,
    NumSoci,
    NumAmministratori,
}

impl CompanyField {
    pub const ALL: [CompanyField; 17] = [
        CompanyField::RagioneSociale,
        CompanyField::CodiceFiscale,
        CompanyField::Piva,
        CompanyField::FormaGiuridica,
        CompanyField::Pec,
        CompanyField::Rea,
        CompanyField::DataCostituzione,
        CompanyField::DataIscrizione,
        CompanyField::DataUltimoProtocollo,
        CompanyField::StatoAttivita,
        CompanyField::DataInizioAttivita,
        CompanyField::AttivitaPrevalente,
        CompanyField::CodiceAteco,
        CompanyField::CapitaleSociale,
        CompanyField::IndirizzoSedeLegale,
        CompanyField::NumSoci,
        CompanyField::NumAmministratori,
    ];

    /// Column name used in the spreadsheet and in JSON output.
    pub fn column(self) -> &'static str {
        match self {
            CompanyField::RagioneSociale => "ragione_sociale",
            CompanyField::CodiceFiscale => "codice_fiscale",
            CompanyField::Piva => "piva",
            CompanyField::FormaGiuridica => "forma_giuridica",
            CompanyField::Pec => "pec",
            CompanyField::Rea => "rea",
            CompanyField::DataCostituzione => "data_costituzione",
            CompanyField::DataIscrizione => "data_iscrizione",
            CompanyField::DataUltimoProtocollo => "data_ultimo_protocollo",
            CompanyField::StatoAttivita => "stato_attivita",
            CompanyField::DataInizioAttivita => "data_inizio_attivita",
            CompanyField::AttivitaPrevalente => "attivita_prevalente",
            CompanyField::CodiceAteco => "codice_ateco",
            CompanyField::CapitaleSociale => "capitale_sociale",
            CompanyField::IndirizzoSedeLegale => "indirizzo_sede_legale",
            CompanyField::NumSoci => "num_soci",
            CompanyField::NumAmministratori => "num_amministratori",
        }
    }
}

/// Company fields pulled out of one visura. Unmatched fields are `""`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CompanyFields {
    pub ragione_sociale: String,
    pub codice_fiscale: String,
    pub piva: String,
    pub forma_giuridica: String,
    pub pec: String,
    pub rea: String,
    pub data_costituzione: String,
    pub data_iscrizione: String,
    pub data_ultimo_protocollo: String,
    pub stato_attivita: String,
    pub data_inizio_attivita: String,
    pub attivita_prevalente: String,
    pub codice_ateco: String,
    pub capitale_sociale: String,
    pub indirizzo_sede_legale: String,
    pub num_soci: String,
    pub num_amministratori: String,
}

impl CompanyFields {
    pub fn get(&self, field: CompanyField) -> &str {
        match field {
            CompanyField::RagioneSociale => &self.ragione_sociale,
            CompanyField::CodiceFiscale => &self.codice_fiscale,
            CompanyField::Piva => &self.piva,
            CompanyField::FormaGiuridica => &self.forma_giuridica,
            CompanyField::Pec => &self.pec,
            CompanyField::Rea => &self.rea,
            CompanyField::DataCostituzione => &self.data_costituzione,
            CompanyField::DataIscrizione => &self.data_iscrizione,
            CompanyField::DataUltimoProtocollo => &self.data_ultimo_protocollo,
            CompanyField::StatoAttivita => &self.stato_attivita,
            CompanyField::DataInizioAttivita => &self.data_inizio_attivita,
            CompanyField::AttivitaPrevalente => &self.attivita_prevalente,
            CompanyField::CodiceAteco => &self.codice_ateco,
            CompanyField::CapitaleSociale => &self.capitale_sociale,
            CompanyField::IndirizzoSedeLegale => &self.indirizzo_sede_legale,
            CompanyField::NumSoci => &self.num_soci,
            CompanyField::NumAmministratori => &self.num_amministratori,
        }
    }

    pub fn get_mut(&mut self, field: CompanyField) -> &mut String {
        match field {
            CompanyField::RagioneSociale => &mut self.ragione_sociale,
            CompanyField::CodiceFiscale => &mut self.codice_fiscale,
            CompanyField::Piva => &mut self.piva,
            CompanyField::FormaGiuridica => &mut self.forma_giuridica,
            CompanyField::Pec => &mut self.pec,
            CompanyField::Rea => &mut self.rea,
            CompanyField::DataCostituzione => &mut self.data_costituzione,
            CompanyField::DataIscrizione => &mut self.data_iscrizione,
            CompanyField::DataUltimoProtocollo => &mut self.data_ultimo_protocollo,
            CompanyField::StatoAttivita => &mut self.stato_attivita,
            CompanyField::DataInizioAttivita => &mut self.data_inizio_attivita,
            CompanyField::AttivitaPrevalente => &mut self.attivita_prevalente,
            CompanyField::CodiceAteco => &mut self.codice_ateco,
            CompanyField::CapitaleSociale => &mut self.capitale_sociale,
            CompanyField::IndirizzoSedeLegale => &mut self.indirizzo_sede_legale,
            CompanyField::NumSoci => &mut self.num_soci,
            CompanyField::NumAmministratori => &mut self.num_amministratori,
        }
    }
}

/// One row of the `Imprese` sheet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanyRecord {
    #[serde(flatten)]
    pub fields: CompanyFields,
    pub id_impresa: u32,
    pub file_origine: String,
}

impl SheetRow for CompanyRecord {
    fn headers() -> Vec<&'static str> {
        CompanyField::ALL
            .iter()
            .map(|f| f.column())
            .chain(["id_impresa", "file_origine"])
            .collect()
    }

    fn cells(&self) -> Vec<CellValue<'_>> {
        CompanyField::ALL
            .iter()
            .map(|f| CellValue::Text(self.fields.get(*f)))
            .chain([
                CellValue::Number(f64::from(self.id_impresa)),
                CellValue::Text(&self.file_origine),
            ])
            .collect()
    }
}

/// A shareholder block as found in the text, before it is tied to a company.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Shareholder {
    pub nome: String,
    pub codice_fiscale: String,
    pub quota_euro: String,
    pub percentuale: String,
}

/// One row of the `Soci` sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShareholderRecord {
    #[serde(flatten)]
    pub shareholder: Shareholder,
    pub id_impresa: u32,
}

impl SheetRow for ShareholderRecord {
    fn headers() -> Vec<&'static str> {
        vec!["nome", "codice_fiscale", "quota_euro", "percentuale", "id_impresa"]
    }

    fn cells(&self) -> Vec<CellValue<'_>> {
        let s = &self.shareholder;
        vec![
            CellValue::Text(&s.nome),
            CellValue::Text(&s.codice_fiscale),
            CellValue::Text(&s.quota_euro),
            CellValue::Text(&s.percentuale),
            CellValue::Number(f64::from(self.id_impresa)),
        ]
    }
}

/// An "Amministratore" block as found in the text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Officer {
    pub nome: String,
    pub codice_fiscale: String,
    pub domicilio: String,
}

/// One row of the `Amministratori` sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OfficerRecord {
    #[serde(flatten)]
    pub officer: Officer,
    pub id_impresa: u32,
}

impl SheetRow for OfficerRecord {
    fn headers() -> Vec<&'static str> {
        vec!["nome", "codice_fiscale", "domicilio", "id_impresa"]
    }

    fn cells(&self) -> Vec<CellValue<'_>> {
        let o = &self.officer;
        vec![
            CellValue::Text(&o.nome),
            CellValue::Text(&o.codice_fiscale),
            CellValue::Text(&o.domicilio),
            CellValue::Number(f64::from(self.id_impresa)),
        ]
    }
}
