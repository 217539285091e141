//! Assessment snapshots imported from spreadsheet exports.
//!
//! The expected layout is one row per attribute with `Attribute,Value,Potential` headers.
//! Attribute cells may hold catalog ids or display names; potential defaults to the value.

mod parser;

use std::io::Read;
use std::path::Path;

use tracing::debug;

use crate::development::domain::MAX_ATTRIBUTE_SCORE;
use crate::development::{AttributeCatalog, AttributeScore, PlayerAttributes};

#[derive(Debug, thiserror::Error)]
pub enum AssessmentImportError {
    #[error("failed to read assessment export: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid assessment CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("{field} {value} for '{label}' is outside the 0-20 scale")]
    OutOfRange {
        label: String,
        field: &'static str,
        value: f64,
    },
}

pub struct AssessmentImporter<'a> {
    catalog: &'a AttributeCatalog,
}

impl<'a> AssessmentImporter<'a> {
    pub fn new(catalog: &'a AttributeCatalog) -> Self {
        Self { catalog }
    }

    pub fn import_path<P: AsRef<Path>>(
        &self,
        path: P,
    ) -> Result<PlayerAttributes, AssessmentImportError> {
        let file = std::fs::File::open(path)?;
        self.import_reader(file)
    }

    /// Later rows for the same attribute replace earlier ones. Scores must be finite and
    /// within 0-20.
    pub fn import_reader<R: Read>(&self, reader: R) -> Result<PlayerAttributes, AssessmentImportError> {
        let mut attributes = PlayerAttributes::new();

        for row in parser::parse_rows(reader)? {
            let potential = row.potential.unwrap_or(row.value);
            for (field, value) in [("value", row.value), ("potential", potential)] {
                if !value.is_finite() || !(0.0..=MAX_ATTRIBUTE_SCORE).contains(&value) {
                    return Err(AssessmentImportError::OutOfRange {
                        label: row.label,
                        field,
                        value,
                    });
                }
            }

            let attribute_id = match self.catalog.resolve(&row.label) {
                Some(definition) => definition.id.clone(),
                None => {
                    debug!(label = %row.label, "uncatalogued attribute kept verbatim");
                    row.label
                }
            };
            attributes.insert(attribute_id, AttributeScore::new(row.value, potential));
        }

        Ok(attributes)
    }
}
