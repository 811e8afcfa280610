//! Surface pressure and temperature: check units, then plot pressure over the grid.
use std::path::{Path, PathBuf};

use ndarray::{Array1, Array2};

use super::{print_info, read_1d, read_2d, Options};
use crate::container::Container;
use crate::expected::sfc_pres_temp as expected;
use crate::plot::{Figure, SurfacePlot};
use crate::validate::{assert_array_almost_equal, assert_units, DEFAULT_DECIMAL};
use crate::Error;

pub const DEFAULT_PATH: &str = "sfc_pres_temp.nc";

pub const REQUIRED: [&str; 4] = ["temperature", "pressure", "latitude", "longitude"];

/// Expected `units` of each variable and the message when it differs, in checking order.
pub const UNITS: [(&str, &str, &str); 4] = [
    (
        "temperature",
        "celsius",
        "temperature units attribute not what was expected",
    ),
    (
        "pressure",
        "hPa",
        "pressure units attribute not what was expected",
    ),
    (
        "latitude",
        "degrees_east",
        "latitude units attribute not what was expected",
    ),
    (
        "longitude",
        "degrees_north",
        "longitude units attribute not what was expected",
    ),
];

pub const FIGURE: &str = "sfc_pressure.png";

/// Check every entry of [`UNITS`], stopping at the first mismatch.
pub fn check_units(c: &Container) -> Result<(), Error> {
    for (name, units, message) in UNITS {
        assert_units(&c.variable(name)?, units, message)?;
    }

    Ok(())
}

#[derive(Debug, Clone)]
pub struct Surface {
    pub latitude: Array1<f64>,
    pub longitude: Array1<f64>,
    /// `(latitude, longitude)`
    pub pressure: Array2<f64>,
    pub temperature: Array2<f64>,
    pub pressure_label: String,
}

impl Surface {
    /// Resolve the variables and check their units.
    pub fn load(c: &Container) -> Result<Surface, Error> {
        for name in REQUIRED {
            c.variable(name)?;
        }

        check_units(c)?;

        Ok(Surface {
            latitude: read_1d(c, "latitude")?,
            longitude: read_1d(c, "longitude")?,
            pressure: read_2d(c, "pressure")?,
            temperature: read_2d(c, "temperature")?,
            pressure_label: c.variable("pressure")?.label()?,
        })
    }

    /// Compare all four arrays with the expected example grid.
    pub fn check(&self) -> Result<(), Error> {
        let (nlats, nlons) = (expected::NLATS, expected::NLONS);

        let pressure = expected::pressure(nlats, nlons).mapv(f64::from);
        let temperature = expected::temperature(nlats, nlons).mapv(f64::from);
        let lats = expected::latitudes(nlats).mapv(f64::from);
        let lons = expected::longitudes(nlons).mapv(f64::from);

        for (actual, desired, message) in [
            (
                self.pressure.view().into_dyn(),
                pressure.view().into_dyn(),
                "pressure data not what was expected",
            ),
            (
                self.temperature.view().into_dyn(),
                temperature.view().into_dyn(),
                "temperature data not what was expected",
            ),
            (
                self.latitude.view().into_dyn(),
                lats.view().into_dyn(),
                "latitude data not what was expected",
            ),
            (
                self.longitude.view().into_dyn(),
                lons.view().into_dyn(),
                "longitude data not what was expected",
            ),
        ] {
            assert_array_almost_equal(actual, desired, DEFAULT_DECIMAL, message)?;
        }

        Ok(())
    }

    pub fn figure(&self) -> SurfacePlot {
        SurfacePlot {
            title: "Surface pressure".into(),
            x_label: "latitude".into(),
            y_label: "longitude".into(),
            z_label: self.pressure_label.clone(),
            x: self.latitude.to_vec(),
            y: self.longitude.to_vec(),
            // z is indexed (y, x)
            z: self.pressure.t().to_owned(),
        }
    }
}

pub fn run(path: &Path, opts: &Options) -> anyhow::Result<Vec<PathBuf>> {
    let c = Container::open(path)?;

    print_info(&c, &REQUIRED)?;

    let s = Surface::load(&c)?;
    if opts.check_data {
        s.check()?;
    }

    if opts.close {
        c.close();
    }

    println!("*** SUCCESS reading example file sfc_pres_temp.nc!");

    let p = opts.figure(FIGURE);
    s.figure().render(&p)?;

    Ok(vec![p])
}
