//! Soil water retention curve of a hydraulic parameterization.
use std::path::{Path, PathBuf};

use ndarray::Array1;
use plotters::style::BLUE;

use super::{read_1d, same_len, Options};
use crate::container::Container;
use crate::plot::{Figure, LinePlot, Series};
use crate::Error;

pub const DEFAULT_PATH: &str = "HydraulicParameterization";

pub const REQUIRED: [&str; 4] = ["psi", "theta", "dTheta", "hydraulic_conductivity"];

pub const FIGURE: &str = "swrc.png";

#[derive(Debug, Clone)]
pub struct Swrc {
    pub psi: Array1<f64>,
    pub theta: Array1<f64>,
    pub psi_label: String,
    pub theta_label: String,
}

impl Swrc {
    pub fn load(c: &Container) -> Result<Swrc, Error> {
        for name in REQUIRED {
            c.variable(name)?;
        }

        let psi = read_1d(c, "psi")?;
        let theta = read_1d(c, "theta")?;
        same_len(&psi, &theta, "theta against psi")?;

        Ok(Swrc {
            psi,
            theta,
            psi_label: c.variable("psi")?.label()?,
            theta_label: c.variable("theta")?.label()?,
        })
    }

    pub fn figure(&self) -> LinePlot {
        LinePlot {
            title: "SWRC".into(),
            x_label: self.psi_label.clone(),
            y_label: self.theta_label.clone(),
            series: vec![Series::new(self.psi.to_vec(), self.theta.to_vec(), BLUE)],
            grid: true,
        }
    }
}

pub fn run(path: &Path, opts: &Options) -> anyhow::Result<Vec<PathBuf>> {
    let c = Container::open(path)?;

    println!("\n ***FILE INFO:\n");
    println!("{c}");
    println!("{:?}", c.variable_names());

    for (name, title) in REQUIRED.iter().zip(["PSI", "THETA", "dTheta", "K"]) {
        let v = c.variable(name)?;
        println!("\n ***{title} INFO:\n");
        println!("{v}");
    }

    let swrc = Swrc::load(&c)?;
    println!("*** SUCCESS reading");

    if opts.close {
        c.close();
    }

    println!("\n\n*** SOME PLOTS");
    let p = opts.figure(FIGURE);
    swrc.figure().render(&p)?;

    Ok(vec![p])
}

