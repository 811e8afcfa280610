//! Read the four dimensional example variables and plot the second record of `psi` over depth.
use std::path::{Path, PathBuf};

use ndarray::Array1;
use plotters::style::BLUE;

use super::{into_1d, read_1d, same_len, Options};
use crate::container::Container;
use crate::expected::pres_temp_4d as expected;
use crate::plot::{Figure, LinePlot, Series};
use crate::validate::{assert_array_almost_equal, DEFAULT_DECIMAL};
use crate::Error;

pub const DEFAULT_PATH: &str = "hydraulic_2D.nc";

pub const REQUIRED: [&str; 6] = ["latitude", "longitude", "depth", "time", "psi", "theta"];

/// Record of `psi` that is plotted.
pub const RECORD: usize = 1;

pub const FIGURE: &str = "pres_temp_4d.png";

#[derive(Debug, Clone)]
pub struct PresTemp4d {
    pub latitude: Array1<f64>,
    pub longitude: Array1<f64>,
    pub depth: Array1<f64>,
    pub time: Array1<f64>,
    pub psi: Array1<f64>,
    pub psi_label: String,
    pub depth_label: String,
}

impl PresTemp4d {
    /// Resolve and read everything the demo needs, `psi` only at [`RECORD`].
    pub fn load(c: &Container) -> Result<PresTemp4d, Error> {
        for name in REQUIRED {
            c.variable(name)?;
        }

        let psi = c.variable("psi")?;
        let depth = c.variable("depth")?;

        let d = PresTemp4d {
            latitude: read_1d(c, "latitude")?,
            longitude: read_1d(c, "longitude")?,
            depth: read_1d(c, "depth")?,
            time: read_1d(c, "time")?,
            psi: into_1d(psi.slice((RECORD, ..))?)?,
            psi_label: psi.label()?,
            depth_label: depth.label()?,
        };
        same_len(&d.psi, &d.depth, "psi against depth")?;

        Ok(d)
    }

    /// Compare the coordinates with the expected grid.
    pub fn check(&self) -> Result<(), Error> {
        let lats = expected::latitudes(expected::NLATS).mapv(f64::from);
        let lons = expected::longitudes(expected::NLONS).mapv(f64::from);

        assert_array_almost_equal(
            self.latitude.view().into_dyn(),
            lats.view().into_dyn(),
            DEFAULT_DECIMAL,
            "latitude data not what was expected",
        )?;
        assert_array_almost_equal(
            self.longitude.view().into_dyn(),
            lons.view().into_dyn(),
            DEFAULT_DECIMAL,
            "longitude data not what was expected",
        )
    }

    pub fn figure(&self) -> LinePlot {
        LinePlot {
            title: format!("psi, record {RECORD}"),
            x_label: self.psi_label.clone(),
            y_label: self.depth_label.clone(),
            series: vec![Series::new(self.psi.to_vec(), self.depth.to_vec(), BLUE)],
            grid: false,
        }
    }
}

pub fn run(path: &Path, opts: &Options) -> anyhow::Result<Vec<PathBuf>> {
    let c = Container::open(path)?;

    let d = PresTemp4d::load(&c)?;
    if opts.check_data {
        d.check()?;
    }

    if opts.close {
        c.close();
    }

    println!("*** SUCCESS reading example file pres_temp_4D.nc");

    let p = opts.figure(FIGURE);
    d.figure().render(&p)?;

    Ok(vec![p])
}
