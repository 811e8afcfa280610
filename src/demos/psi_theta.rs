//! Vertical profiles of hydraulic head and water content at one record.
use std::path::{Path, PathBuf};

use chrono::DateTime;
use ndarray::Array1;
use plotters::style::{BLUE, RED};

use super::{into_1d, print_info, read_1d, same_len, Options};
use crate::container::Container;
use crate::plot::{Figure, LinePlot, Series};
use crate::Error;

pub const DEFAULT_PATH: &str = "hydraulic_2D.nc";

pub const REQUIRED: [&str; 4] = ["depth", "time", "psi", "theta"];

/// Record plotted unless told otherwise.
pub const TIME_INDEX: usize = 1;

pub const FIGURES: [&str; 2] = ["psi_profile.png", "theta_profile.png"];

/// Format seconds since the Unix epoch as `%Y-%m-%d %H:%M` (UTC).
pub fn time_title(seconds: f64) -> Result<String, Error> {
    let dt = DateTime::from_timestamp(seconds as i64, 0)
        .ok_or_else(|| Error::Value(format!("time {seconds} is out of range")))?;

    Ok(dt.format("%Y-%m-%d %H:%M").to_string())
}

#[derive(Debug, Clone)]
pub struct Profiles {
    pub title: String,
    pub depth: Array1<f64>,
    pub psi: Array1<f64>,
    pub theta: Array1<f64>,
    pub depth_label: String,
    pub psi_label: String,
    pub theta_label: String,
}

impl Profiles {
    pub fn load(c: &Container, t: usize) -> Result<Profiles, Error> {
        for name in REQUIRED {
            c.variable(name)?;
        }

        let time = c.variable("time")?;
        let psi = c.variable("psi")?;
        let theta = c.variable("theta")?;
        let depth = c.variable("depth")?;

        let seconds = time.slice(t)?.iter().copied().next().unwrap_or(f64::NAN);

        let p = Profiles {
            title: time_title(seconds)?,
            depth: read_1d(c, "depth")?,
            psi: into_1d(psi.slice((t, ..))?)?,
            theta: into_1d(theta.slice((t, ..))?)?,
            depth_label: depth.label()?,
            psi_label: psi.label()?,
            theta_label: theta.label()?,
        };
        same_len(&p.psi, &p.depth, "psi against depth")?;
        same_len(&p.theta, &p.depth, "theta against depth")?;

        Ok(p)
    }

    pub fn figures(&self) -> [LinePlot; 2] {
        let profile = |x: &Array1<f64>, x_label: &str, color| LinePlot {
            title: self.title.clone(),
            x_label: x_label.to_string(),
            y_label: self.depth_label.clone(),
            series: vec![Series::new(x.to_vec(), self.depth.to_vec(), color)],
            grid: true,
        };

        [
            profile(&self.psi, &self.psi_label, BLUE),
            profile(&self.theta, &self.theta_label, RED),
        ]
    }
}

pub fn run(path: &Path, t: usize, opts: &Options) -> anyhow::Result<Vec<PathBuf>> {
    let c = Container::open(path)?;

    print_info(&c, &REQUIRED)?;

    let profiles = Profiles::load(&c, t)?;

    if opts.close {
        c.close();
    }

    let mut out = Vec::with_capacity(FIGURES.len());
    for (fig, name) in profiles.figures().iter().zip(FIGURES) {
        let p = opts.figure(name);
        fig.render(&p)?;
        out.push(p);
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn titles() {
        assert_eq!(time_title(688_784_400.0).unwrap(), "1991-10-30 01:00");
        assert_eq!(time_title(0.0).unwrap(), "1970-01-01 00:00");
        assert!(time_title(f64::MAX).is_err());
    }
}
