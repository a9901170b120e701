//! Quantity Mapper - join scanned inventory quantities onto a listings sheet
//!
//! Reads a workbook holding a primary (listings) sheet and a secondary
//! (inventory scan) sheet, matches rows on card number plus foil status, and
//! writes a new workbook where the primary sheet carries an extra
//! `Add to Quantity` column.
//!
//! # Example
//!
//! ```no_run
//! use quantity_mapper::cli::map_quantities;
//! use quantity_mapper::config::MapperConfig;
//!
//! let config = MapperConfig::new("listings.xlsx", "listings_updated.xlsx");
//! let report = map_quantities(&config)?;
//!
//! println!("Matched: {}", report.matched_rows);
//! # Ok::<(), quantity_mapper::error::MapperError>(())
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod excel;
pub mod types;

// Re-export commonly used types
pub use config::MapperConfig;
pub use error::{MapperError, MapperResult};
pub use types::{CellValue, Sheet};
