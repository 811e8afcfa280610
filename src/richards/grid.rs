//! The computational grid of a one dimensional Richards simulation.
//!
//! A grid file holds three groups of variables:
//!
//! * per control volume: centroid coordinates (`eta` from the soil surface, `z` from the bottom of
//!   the column, both positive upward), the initial suction `psi0` and temperature `T0`, the
//!   length of each volume and its rheology and parameter labels,
//! * per interface: `etaDual`, `zDual` and the distances between centroids `spaceDelta`,
//! * per parameter set: water contents, conductivity, storage coefficients and the five SWRC
//!   parameters, selected by `parameterID`.
use ndarray::Array1;

use super::VanGenuchten;
use crate::container::Container;
use crate::demos::read_1d;
use crate::Error;

pub const REQUIRED: [&str; 23] = [
    "eta",
    "etaDual",
    "z",
    "zDual",
    "psi0",
    "T0",
    "spaceDelta",
    "controlVolume",
    "rheologyID",
    "parameterID",
    "thetaS",
    "thetaR",
    "thetaWp",
    "thetaFc",
    "ks",
    "alphaSpecificStorage",
    "betaSpecificStorage",
    "par1SWRC",
    "par2SWRC",
    "par3SWRC",
    "par4SWRC",
    "par5SWRC",
    "controlVolumeIndex",
];

#[derive(Debug, Clone, PartialEq)]
pub struct RichardsGrid1D {
    /// m
    pub eta: Array1<f64>,
    /// m
    pub eta_dual: Array1<f64>,
    /// m
    pub z: Array1<f64>,
    /// m
    pub z_dual: Array1<f64>,
    /// Initial water suction (m).
    pub psi_ic: Array1<f64>,
    /// Initial temperature (K).
    pub temperature: Array1<f64>,
    /// m
    pub space_delta: Array1<f64>,
    /// m
    pub control_volume: Array1<f64>,
    pub rheology_id: Array1<i32>,
    pub parameter_id: Array1<i32>,

    pub theta_s: Array1<f64>,
    pub theta_r: Array1<f64>,
    pub theta_wp: Array1<f64>,
    pub theta_fc: Array1<f64>,
    /// m/s
    pub ks: Array1<f64>,
    /// 1/Pa
    pub alpha_ss: Array1<f64>,
    /// 1/Pa
    pub beta_ss: Array1<f64>,
    pub par1_swrc: Array1<f64>,
    pub par2_swrc: Array1<f64>,
    pub par3_swrc: Array1<f64>,
    pub par4_swrc: Array1<f64>,
    pub par5_swrc: Array1<f64>,

    /// Control volumes used for calibration.
    pub control_volume_index: Array1<i32>,
}

/// Read an integer label variable. Stored values must be whole numbers.
fn read_ids(c: &Container, name: &str) -> Result<Array1<i32>, Error> {
    let values = read_1d(c, name)?;

    values
        .iter()
        .map(|&v| {
            if v.fract() == 0.0 && v >= i32::MIN as f64 && v <= i32::MAX as f64 {
                Ok(v as i32)
            } else {
                Err(Error::Value(format!("`{name}` holds {v}, not a label")))
            }
        })
        .collect::<Result<Array1<i32>, _>>()
}

fn same_len(group: &str, arrays: &[(&str, usize)]) -> Result<(), Error> {
    if let Some((first, len)) = arrays.first() {
        for (name, l) in arrays {
            if l != len {
                return Err(Error::Value(format!(
                    "{group}: `{name}` has {l} values, but `{first}` has {len}"
                )));
            }
        }
    }

    Ok(())
}

/// Fail unless every label is a valid index into `0..len`.
fn check_indices(name: &str, ids: &Array1<i32>, len: usize) -> Result<(), Error> {
    match ids.iter().find(|&&i| i < 0 || i as usize >= len) {
        Some(i) => Err(Error::Value(format!(
            "`{name}` refers to {i}, but there are {len}"
        ))),
        None => Ok(()),
    }
}

impl RichardsGrid1D {
    pub fn read(c: &Container) -> Result<RichardsGrid1D, Error> {
        for name in REQUIRED {
            c.variable(name)?;
        }

        let g = RichardsGrid1D {
            eta: read_1d(c, "eta")?,
            eta_dual: read_1d(c, "etaDual")?,
            z: read_1d(c, "z")?,
            z_dual: read_1d(c, "zDual")?,
            psi_ic: read_1d(c, "psi0")?,
            temperature: read_1d(c, "T0")?,
            space_delta: read_1d(c, "spaceDelta")?,
            control_volume: read_1d(c, "controlVolume")?,
            rheology_id: read_ids(c, "rheologyID")?,
            parameter_id: read_ids(c, "parameterID")?,

            theta_s: read_1d(c, "thetaS")?,
            theta_r: read_1d(c, "thetaR")?,
            theta_wp: read_1d(c, "thetaWp")?,
            theta_fc: read_1d(c, "thetaFc")?,
            ks: read_1d(c, "ks")?,
            alpha_ss: read_1d(c, "alphaSpecificStorage")?,
            beta_ss: read_1d(c, "betaSpecificStorage")?,
            par1_swrc: read_1d(c, "par1SWRC")?,
            par2_swrc: read_1d(c, "par2SWRC")?,
            par3_swrc: read_1d(c, "par3SWRC")?,
            par4_swrc: read_1d(c, "par4SWRC")?,
            par5_swrc: read_1d(c, "par5SWRC")?,

            control_volume_index: read_ids(c, "controlVolumeIndex")?,
        };

        same_len(
            "control volumes",
            &[
                ("eta", g.eta.len()),
                ("z", g.z.len()),
                ("psi0", g.psi_ic.len()),
                ("T0", g.temperature.len()),
                ("controlVolume", g.control_volume.len()),
                ("rheologyID", g.rheology_id.len()),
                ("parameterID", g.parameter_id.len()),
            ],
        )?;
        same_len(
            "interfaces",
            &[("etaDual", g.eta_dual.len()), ("zDual", g.z_dual.len())],
        )?;
        same_len(
            "parameters",
            &[
                ("thetaS", g.theta_s.len()),
                ("thetaR", g.theta_r.len()),
                ("thetaWp", g.theta_wp.len()),
                ("thetaFc", g.theta_fc.len()),
                ("ks", g.ks.len()),
                ("alphaSpecificStorage", g.alpha_ss.len()),
                ("betaSpecificStorage", g.beta_ss.len()),
                ("par1SWRC", g.par1_swrc.len()),
                ("par2SWRC", g.par2_swrc.len()),
                ("par3SWRC", g.par3_swrc.len()),
                ("par4SWRC", g.par4_swrc.len()),
                ("par5SWRC", g.par5_swrc.len()),
            ],
        )?;

        check_indices("parameterID", &g.parameter_id, g.parameters())?;
        check_indices("controlVolumeIndex", &g.control_volume_index, g.len())?;

        Ok(g)
    }

    /// Number of control volumes.
    pub fn len(&self) -> usize {
        self.eta.len()
    }

    pub fn is_empty(&self) -> bool {
        self.eta.is_empty()
    }

    /// Number of parameter sets.
    pub fn parameters(&self) -> usize {
        self.theta_s.len()
    }

    /// Van Genuchten parameters of control volume `cell`, with `par1SWRC` as `n` and `par2SWRC`
    /// as `alpha`.
    pub fn van_genuchten(&self, cell: usize) -> Option<VanGenuchten> {
        let p = usize::try_from(*self.parameter_id.get(cell)?).ok()?;

        Some(VanGenuchten {
            theta_r: *self.theta_r.get(p)?,
            theta_s: *self.theta_s.get(p)?,
            alpha: *self.par2_swrc.get(p)?,
            n: *self.par1_swrc.get(p)?,
            ks: *self.ks.get(p)?,
        })
    }
}
