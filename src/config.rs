//! Mapper configuration
//!
//! Every option has a built-in default. A YAML config file may override any
//! subset of them, and explicit command-line flags override both.
//!
//! ```yaml
//! input: listings.xlsx
//! output: listings_updated.xlsx
//! primary_sheet: Foundations 20250421_100121
//! secondary_sheet: Manabox scanned
//! foil_keyword: foil
//! ```

use crate::error::{MapperError, MapperResult};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Fully resolved configuration for one mapping run
#[derive(Debug, Clone, PartialEq)]
pub struct MapperConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    /// Listings sheet that gets the new column
    pub primary_sheet: String,
    /// Inventory scan sheet supplying quantities
    pub secondary_sheet: String,
    pub number_col: String,
    pub collector_col: String,
    pub condition_col: String,
    /// Secondary column holding the foil indicator, compared verbatim
    pub foil_col: String,
    pub foil_keyword: String,
    pub quantity_col: String,
    pub output_sheet: String,
}

impl MapperConfig {
    /// Configuration with default sheet and column names
    pub fn new<P: AsRef<Path>, Q: AsRef<Path>>(input: P, output: Q) -> Self {
        Self {
            input: input.as_ref().to_path_buf(),
            output: output.as_ref().to_path_buf(),
            primary_sheet: "Foundations 20250421_100121".to_string(),
            secondary_sheet: "Manabox scanned".to_string(),
            number_col: "Number".to_string(),
            collector_col: "Collector number".to_string(),
            condition_col: "Condition".to_string(),
            foil_col: "Foil".to_string(),
            foil_keyword: "foil".to_string(),
            quantity_col: "Quantity".to_string(),
            output_sheet: "Foundations Updated".to_string(),
        }
    }

    /// Merge CLI values over an optional config file over the defaults
    pub fn resolve(cli: PartialConfig, file: Option<PartialConfig>) -> MapperResult<Self> {
        let merged = match file {
            Some(file) => cli.or(file),
            None => cli,
        };

        let input = merged
            .input
            .ok_or_else(|| MapperError::Config("input workbook path is required".to_string()))?;
        let output = merged
            .output
            .ok_or_else(|| MapperError::Config("output workbook path is required".to_string()))?;

        let mut config = Self::new(input, output);
        macro_rules! apply {
            ($($field:ident),*) => {
                $(if let Some(v) = merged.$field { config.$field = v; })*
            };
        }
        apply!(
            primary_sheet,
            secondary_sheet,
            number_col,
            collector_col,
            condition_col,
            foil_col,
            foil_keyword,
            quantity_col,
            output_sheet
        );

        config.validate()?;
        Ok(config)
    }

    /// Reject settings that can never produce a valid output workbook.
    /// Excel compares sheet names case-insensitively.
    pub fn validate(&self) -> MapperResult<()> {
        if self.output_sheet.to_lowercase() == self.secondary_sheet.to_lowercase() {
            return Err(MapperError::Config(format!(
                "output sheet '{}' clashes with the secondary sheet name",
                self.output_sheet
            )));
        }
        Ok(())
    }
}

/// Any subset of [`MapperConfig`] fields, as given on the command line or in
/// a YAML config file
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PartialConfig {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub primary_sheet: Option<String>,
    pub secondary_sheet: Option<String>,
    pub number_col: Option<String>,
    pub collector_col: Option<String>,
    pub condition_col: Option<String>,
    pub foil_col: Option<String>,
    pub foil_keyword: Option<String>,
    pub quantity_col: Option<String>,
    pub output_sheet: Option<String>,
}

impl PartialConfig {
    /// Load a YAML config file
    pub fn from_file(path: &Path) -> MapperResult<Self> {
        let content = fs::read_to_string(path)?;
        let config: PartialConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Fill every unset field from `fallback`
    pub fn or(self, fallback: PartialConfig) -> PartialConfig {
        PartialConfig {
            input: self.input.or(fallback.input),
            output: self.output.or(fallback.output),
            primary_sheet: self.primary_sheet.or(fallback.primary_sheet),
            secondary_sheet: self.secondary_sheet.or(fallback.secondary_sheet),
            number_col: self.number_col.or(fallback.number_col),
            collector_col: self.collector_col.or(fallback.collector_col),
            condition_col: self.condition_col.or(fallback.condition_col),
            foil_col: self.foil_col.or(fallback.foil_col),
            foil_keyword: self.foil_keyword.or(fallback.foil_keyword),
            quantity_col: self.quantity_col.or(fallback.quantity_col),
            output_sheet: self.output_sheet.or(fallback.output_sheet),
        }
    }
}
