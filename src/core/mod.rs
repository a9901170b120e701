//! Core mapping logic: foil detection, lookup table and the row join

pub mod foil;
pub mod lookup;
pub mod mapper;

pub use foil::{FoilDetector, FoilFlag};
pub use lookup::{LookupKey, LookupTable};
pub use mapper::{MapReport, MappedSheets, QuantityMapper, ADD_TO_QUANTITY};
