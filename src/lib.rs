//! # NCPLOT
//!
//! Inspect NetCDF containers and plot a few diagnostic figures from them: soil water retention
//! curves, vertical profiles of hydraulic head and water content, and surface pressure.
//!
//! A [Container] is opened read-only, its [variables](Variable) are resolved by name and read as
//! `f64` arrays through [Variable::slice]. Indices drop their axis, so `psi[1]` on a
//! `(time, depth)` variable is:
//!
//! ```no_run
//! use ncplot::Container;
//!
//! let c = Container::open("hydraulic_2D.nc").unwrap();
//! let psi = c.variable("psi").unwrap().slice((1, ..)).unwrap();
//! assert_eq!(psi.ndim(), 1);
//! ```
//!
//! The [demos] tie this together: each checks what it needs from a container before rendering
//! its figures with [plot].

#[macro_use]
extern crate anyhow;

pub mod container;
pub mod demos;
mod error;
pub mod expected;
pub mod extent;
pub mod fixtures;
pub mod plot;
pub mod richards;
pub mod validate;
pub mod writer;

pub use container::{AttrValue, Container, Dimension, Variable};
pub use error::Error;

pub mod prelude {
    pub use crate::container::{Container, Variable};
    pub use crate::demos::Options;
    pub use crate::extent::{Extent, Extents};
    pub use crate::plot::Figure;
    pub use crate::Error;
}
