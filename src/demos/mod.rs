//! The inspect-and-plot demos.
//!
//! Each demo opens one container, resolves the variables it needs, optionally checks them, and
//! renders its figures. Resolving and checking is done by a `load` function that never draws, so
//! any lookup or check failure happens before a figure is produced. The `richards` demo writes an
//! output container instead of figures.
use std::path::PathBuf;

use ndarray::{Array1, Array2, ArrayD, Ix1, Ix2};

use crate::container::Container;
use crate::Error;

pub mod pres_temp_4d;
pub mod psi_theta;
pub mod richards;
pub mod sfc_pres_temp;
pub mod swrc;

/// Options shared by all demos.
#[derive(Debug, Clone)]
pub struct Options {
    /// Where figures are written.
    pub out_dir: PathBuf,

    /// Compare stored data against the expected arrays.
    pub check_data: bool,

    /// Close the container as soon as everything is read, instead of at the end of the run.
    pub close: bool,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            out_dir: PathBuf::from("."),
            check_data: false,
            close: false,
        }
    }
}

impl Options {
    fn figure(&self, name: &str) -> PathBuf {
        self.out_dir.join(name)
    }
}

/// Print the container and then each of `names`, failing on the first missing variable.
pub fn print_info(c: &Container, names: &[&str]) -> Result<(), Error> {
    println!("\n ***FILE INFO:\n");
    println!("{c}");

    for name in names {
        let v = c.variable(name)?;
        println!("\n ***{} INFO:\n", name.to_uppercase());
        println!("{v}");
    }

    Ok(())
}

pub(crate) fn read_1d(c: &Container, name: &str) -> Result<Array1<f64>, Error> {
    Ok(c.variable(name)?.values()?.into_dimensionality::<Ix1>()?)
}

pub(crate) fn read_2d(c: &Container, name: &str) -> Result<Array2<f64>, Error> {
    Ok(c.variable(name)?.values()?.into_dimensionality::<Ix2>()?)
}

pub(crate) fn into_1d(a: ArrayD<f64>) -> Result<Array1<f64>, Error> {
    Ok(a.into_dimensionality::<Ix1>()?)
}

/// Fail unless `a` and `b` can be plotted against each other.
pub(crate) fn same_len(a: &Array1<f64>, b: &Array1<f64>, what: &str) -> Result<(), Error> {
    if a.len() == b.len() {
        Ok(())
    } else {
        Err(Error::Value(format!(
            "{what}: lengths differ ({} and {})",
            a.len(),
            b.len()
        )))
    }
}
