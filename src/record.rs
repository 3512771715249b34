//! The FDU record emitted by the importer.

use serde::{Deserialize, Serialize};

/// Markers the spreadsheets use for "no value", compared case-insensitively.
const NULL_MARKERS: [&str; 2] = ["nan", "n.a"];

/// A hazardous-material safety data sheet record, ready for bulk import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FduRecord {
    /// 20 random lowercase alphanumeric characters
    pub id: String,
    /// Commercial product name, never empty
    pub produto: String,
    pub nome_tecnico: String,
    pub fabricante: String,
    pub numero_cas: String,
    #[serde(rename = "classificacaoGHS")]
    pub classificacao_ghs: String,
    pub classe_risco: String,
    pub local_armazenamento: String,
    /// Trimmed name of the sheet the row came from
    pub setor: String,
    pub possui_fispq: bool,
    pub epi_necessario: String,
    pub medidas_preventivas: String,
    pub destinacao_produto: String,
    /// Expiry date, `YYYY-MM-DD`
    pub validade: String,
    /// Creation timestamp, `YYYY-MM-DDTHH:MM:SS`
    pub criado_em: String,
    /// File reference, filled in by the downstream import
    pub arquivo_url: String,
}

/// Whether `value` is one of the spreadsheet's "no value" markers.
pub fn is_null_marker(value: &str) -> bool {
    NULL_MARKERS
        .iter()
        .any(|marker| value.eq_ignore_ascii_case(marker))
}

/// Collapse "no value" markers to the empty string.
pub fn normalize_text(value: String) -> String {
    if is_null_marker(&value) {
        String::new()
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_markers() {
        assert!(is_null_marker("nan"));
        assert!(is_null_marker("NaN"));
        assert!(is_null_marker("N.A"));
        assert!(!is_null_marker("n/a"));
        assert!(!is_null_marker(" nan"));
        assert!(!is_null_marker("banana"));
    }

    #[test]
    fn test_normalize_text() {
        assert_eq!(normalize_text("N.a".to_string()), "");
        assert_eq!(normalize_text("Luvas".to_string()), "Luvas");
    }

    #[test]
    fn test_json_field_names() {
        let record = FduRecord {
            id: "abc".into(),
            produto: "Acetona".into(),
            nome_tecnico: String::new(),
            fabricante: String::new(),
            numero_cas: "67-64-1".into(),
            classificacao_ghs: "GHS02".into(),
            classe_risco: String::new(),
            local_armazenamento: String::new(),
            setor: "Almoxarifado".into(),
            possui_fispq: true,
            epi_necessario: String::new(),
            medidas_preventivas: String::new(),
            destinacao_produto: String::new(),
            validade: "2027-01-01".into(),
            criado_em: "2025-01-01T10:00:00".into(),
            arquivo_url: "placeholder".into(),
        };

        let value = serde_json::to_value(&record).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 16);
        for key in [
            "nomeTecnico",
            "numeroCas",
            "classificacaoGHS",
            "classeRisco",
            "localArmazenamento",
            "possuiFispq",
            "epiNecessario",
            "medidasPreventivas",
            "destinacaoProduto",
            "criadoEm",
            "arquivoUrl",
        ] {
            assert!(object.contains_key(key), "missing {key}");
        }
        assert_eq!(object["possuiFispq"], serde_json::Value::Bool(true));
    }
}
