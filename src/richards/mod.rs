//! Input grids and buffered output of one dimensional Richards simulations.
mod grid;
mod output;
mod van_genuchten;

pub use grid::{RichardsGrid1D, REQUIRED};
pub use output::{
    parse_date, Metadata, Optional, Profile, RichardsOutput1D, RichardsRecord, DATE_FORMAT,
    MAX_FILE_SIZE, TIME_UNITS,
};
pub use van_genuchten::VanGenuchten;
