use crate::config::MapperConfig;
use crate::core::foil::{FoilDetector, FoilFlag};
use crate::core::lookup::{LookupKey, LookupTable};
use crate::error::MapperResult;
use crate::types::{CellValue, Sheet};
use std::collections::BTreeSet;
use tracing::{debug, info, warn};

/// Header of the column added to the primary sheet
pub const ADD_TO_QUANTITY: &str = "Add to Quantity";

/// Counters describing one mapping run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MapReport {
    pub primary_rows: usize,
    pub secondary_rows: usize,
    pub lookup_entries: usize,
    /// Secondary rows whose key repeated an earlier row's key
    pub duplicate_keys: usize,
    pub matched_rows: usize,
    pub unmatched_rows: usize,
    /// Secondary rows whose foil value is neither `foil` nor `normal`
    pub unrecognised_foil_rows: usize,
}

/// Result of mapping: the annotated primary sheet and the untouched secondary
#[derive(Debug, Clone)]
pub struct MappedSheets {
    pub primary: Sheet,
    pub secondary: Sheet,
    pub report: MapReport,
}

/// Joins secondary quantities onto primary rows
pub struct QuantityMapper<'a> {
    config: &'a MapperConfig,
    detector: FoilDetector,
}

impl<'a> QuantityMapper<'a> {
    pub fn new(config: &'a MapperConfig) -> Self {
        Self {
            config,
            detector: FoilDetector::new(&config.foil_keyword),
        }
    }

    /// Annotate `primary` with an `Add to Quantity` column and rename it to
    /// the configured output sheet. `secondary` is passed through unchanged.
    ///
    /// All required columns on both sheets are checked before any row is
    /// touched.
    pub fn map(&self, mut primary: Sheet, secondary: Sheet) -> MapperResult<MappedSheets> {
        let number_idx = primary.require_column(&self.config.number_col)?;
        let condition_idx = primary.require_column(&self.config.condition_col)?;

        let mut report = MapReport {
            primary_rows: primary.row_count(),
            secondary_rows: secondary.row_count(),
            ..Default::default()
        };

        let table = self.build_lookup(&secondary, &mut report)?;

        let mut quantities = Vec::with_capacity(primary.row_count());
        for row in 0..primary.row_count() {
            let flag = self
                .detector
                .detect(&primary.cell(row, condition_idx).to_text());
            let key = LookupKey::new(&primary.cell(row, number_idx).to_text(), flag.as_str());

            match table.get(&key) {
                Some(quantity) => {
                    report.matched_rows += 1;
                    quantities.push(quantity.clone());
                }
                None => {
                    report.unmatched_rows += 1;
                    quantities.push(CellValue::Int(0));
                }
            }
        }

        primary.set_column(ADD_TO_QUANTITY, quantities);
        primary.name = self.config.output_sheet.clone();

        info!(
            matched = report.matched_rows,
            unmatched = report.unmatched_rows,
            lookup_entries = report.lookup_entries,
            "mapped quantities onto '{}'",
            primary.name
        );

        Ok(MappedSheets {
            primary,
            secondary,
            report,
        })
    }

    /// Build the lookup table from every secondary row
    pub fn build_lookup(
        &self,
        secondary: &Sheet,
        report: &mut MapReport,
    ) -> MapperResult<LookupTable> {
        let collector_idx = secondary.require_column(&self.config.collector_col)?;
        let foil_idx = secondary.require_column(&self.config.foil_col)?;
        let quantity_idx = secondary.require_column(&self.config.quantity_col)?;

        let mut table = LookupTable::new();
        let mut unrecognised: BTreeSet<String> = BTreeSet::new();

        for row in 0..secondary.row_count() {
            let foil = secondary.cell(row, foil_idx).to_text();
            if !FoilFlag::is_flag_text(&foil) {
                report.unrecognised_foil_rows += 1;
                unrecognised.insert(foil.clone());
            }

            let key = LookupKey::new(&secondary.cell(row, collector_idx).to_text(), &foil);
            table.insert(key, secondary.cell(row, quantity_idx).clone());
        }

        if !unrecognised.is_empty() {
            let values: Vec<String> = unrecognised.into_iter().map(|v| format!("{v:?}")).collect();
            warn!(
                rows = report.unrecognised_foil_rows,
                "column '{}' in sheet '{}' holds values other than \"foil\"/\"normal\" ({}); \
                 those rows can never match a listing",
                self.config.foil_col,
                secondary.name,
                values.join(", ")
            );
        }

        report.lookup_entries = table.len();
        report.duplicate_keys = table.overwritten();
        debug!(
            entries = table.len(),
            duplicates = table.overwritten(),
            "built lookup table"
        );

        Ok(table)
    }
}
