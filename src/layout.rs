//! Positional column layout of an FDU inventory sheet.

/// A record field that is read from a sheet column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// Row number of the product in the inventory. Only decides whether the
    /// row is a data row; the record gets a generated id instead.
    Key,
    Produto,
    NomeTecnico,
    Fabricante,
    NumeroCas,
    ClassificacaoGhs,
    ClasseRisco,
    LocalArmazenamento,
    PossuiFispq,
    EpiNecessario,
    MedidasPreventivas,
    DestinacaoProduto,
}

/// Column positions of the "Controle e Distribuição das FDS" sheets.
///
/// Position 8 holds a sector column that is never read: the sector of a
/// record is the name of the sheet it came from.
pub const FDU_SHEET_COLUMNS: [(usize, Field); 12] = [
    (0, Field::Key),
    (1, Field::Produto),
    (2, Field::NomeTecnico),
    (3, Field::Fabricante),
    (4, Field::NumeroCas),
    (5, Field::ClassificacaoGhs),
    (6, Field::ClasseRisco),
    (7, Field::LocalArmazenamento),
    (9, Field::PossuiFispq),
    (10, Field::EpiNecessario),
    (11, Field::MedidasPreventivas),
    (12, Field::DestinacaoProduto),
];

/// Ordered mapping from zero-based column position to record field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnLayout {
    columns: Vec<(usize, Field)>,
}

impl ColumnLayout {
    /// Build a layout from `(position, field)` pairs.
    pub fn new(columns: impl IntoIterator<Item = (usize, Field)>) -> Self {
        let mut columns: Vec<_> = columns.into_iter().collect();
        columns.sort_by_key(|(position, _)| *position);
        Self { columns }
    }

    /// The layout of the FDU control spreadsheet.
    pub fn fdu_sheet() -> Self {
        Self::new(FDU_SHEET_COLUMNS)
    }

    /// Column position of `field`, if the layout maps it.
    pub fn position(&self, field: Field) -> Option<usize> {
        self.columns
            .iter()
            .find(|(_, f)| *f == field)
            .map(|(position, _)| *position)
    }

    /// All mapped columns in position order.
    pub fn columns(&self) -> &[(usize, Field)] {
        &self.columns
    }
}

impl Default for ColumnLayout {
    fn default() -> Self {
        Self::fdu_sheet()
    }
}
