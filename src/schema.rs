use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One cell of an extracted table.
///
/// Table extraction renders every PDF cell as a string, a number, or nothing
/// at all, so the variants mirror the JSON the extraction step emits
/// (`"CASH"`, `1250.0`, `null`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum Cell {
    #[schemars(description = "A numeric cell, already coerced by the extraction step")]
    Number(f64),

    #[schemars(description = "A textual cell, verbatim from the PDF (may contain embedded carriage returns)")]
    Text(String),

    #[schemars(description = "An empty cell (null)")]
    Null,
}

impl Cell {
    /// A cell is blank when it holds nothing the pipeline can use: an
    /// explicit null, or text that trims to the empty string. Extraction
    /// emits both for visually empty PDF cells.
    pub fn is_blank(&self) -> bool {
        match self {
            Cell::Null => true,
            Cell::Text(s) => s.trim().is_empty(),
            Cell::Number(_) => false,
        }
    }

    /// The cell rendered as statement text. Blank cells render empty.
    pub fn text(&self) -> String {
        match self {
            Cell::Null => String::new(),
            Cell::Text(s) => s.clone(),
            Cell::Number(n) => n.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct RawTable {
    #[schemars(
        description = "Ordered column labels as extracted. A label is null when the PDF cell boundary produced no header text for that column."
    )]
    pub columns: Vec<Option<String>>,

    #[schemars(
        description = "Row-major cell data. Each row should carry one value per column label; ragged rows are repaired to the table's own width."
    )]
    pub rows: Vec<Vec<Cell>>,
}

impl RawTable {
    pub fn width(&self) -> usize {
        self.columns.len()
    }
}

/// The full hand-off from the PDF extraction step: one `RawTable` per page,
/// in page order. The first element is the statement's title/header block
/// and carries no transactions.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct StatementExtract {
    #[schemars(
        description = "Per-page tables in page order. The first table is the statement title block and is discarded; the second table's header row defines the column layout for the whole statement."
    )]
    pub tables: Vec<RawTable>,
}

impl StatementExtract {
    pub fn generate_json_schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(StatementExtract)
    }

    pub fn schema_as_json() -> Result<String, serde_json::Error> {
        let schema = Self::generate_json_schema();
        serde_json::to_string_pretty(&schema)
    }
}
