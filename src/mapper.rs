//! Sheet row to [`FduRecord`] mapping.

use crate::layout::{ColumnLayout, Field};
use crate::options::ImportOptions;
use crate::record::{normalize_text, FduRecord};
use crate::synth::Synthesizer;
use crate::workbook::{CellValue, Row};
use rand::Rng;

static MISSING: CellValue = CellValue::Empty;

/// Why a row did not produce a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// The key column is blank: not a data row.
    MissingKey,
    /// The product name is blank or a "no value" marker.
    MissingProduct,
}

/// Maps sheet rows to records using a fixed column layout.
#[derive(Debug)]
pub struct RowMapper<R> {
    layout: ColumnLayout,
    file_placeholder: String,
    synth: Synthesizer<R>,
}

impl<R: Rng> RowMapper<R> {
    /// Create a mapper drawing generated fields from `synth`.
    pub fn new(options: &ImportOptions, synth: Synthesizer<R>) -> Self {
        Self {
            layout: options.layout.clone(),
            file_placeholder: options.file_placeholder.clone(),
            synth,
        }
    }

    /// Map one row of the sheet named `sheet_name`.
    pub fn map(&mut self, row: &Row, sheet_name: &str) -> Result<FduRecord, Rejection> {
        if self.cell(row, Field::Key).to_text().trim().is_empty() {
            return Err(Rejection::MissingKey);
        }

        let produto = self.text(row, Field::Produto);
        if produto.is_empty() {
            return Err(Rejection::MissingProduct);
        }

        Ok(FduRecord {
            id: self.synth.id(),
            produto,
            nome_tecnico: self.text(row, Field::NomeTecnico),
            fabricante: self.text(row, Field::Fabricante),
            numero_cas: self.text(row, Field::NumeroCas),
            classificacao_ghs: self.text(row, Field::ClassificacaoGhs),
            classe_risco: self.text(row, Field::ClasseRisco),
            local_armazenamento: self.text(row, Field::LocalArmazenamento),
            setor: normalize_text(sheet_name.trim().to_string()),
            possui_fispq: self.flag(row, Field::PossuiFispq),
            epi_necessario: self.text(row, Field::EpiNecessario),
            medidas_preventivas: self.text(row, Field::MedidasPreventivas),
            destinacao_produto: self.text(row, Field::DestinacaoProduto),
            validade: self.synth.expiry_date(),
            criado_em: self.synth.created_at(),
            arquivo_url: normalize_text(self.file_placeholder.clone()),
        })
    }

    fn cell<'r>(&self, row: &'r Row, field: Field) -> &'r CellValue {
        match self.layout.position(field) {
            Some(position) => row.get(position),
            None => &MISSING,
        }
    }

    fn text(&self, row: &Row, field: Field) -> String {
        normalize_text(self.cell(row, field).to_text())
    }

    /// Only a text cell reading "sim" in any case is a yes.
    fn flag(&self, row: &Row, field: Field) -> bool {
        self.cell(row, field)
            .as_str()
            .is_some_and(|s| s.to_lowercase() == "sim")
    }
}
