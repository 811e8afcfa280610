//! Read a Richards 1D grid and write its initial state as the first output record.
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use super::{print_info, Options};
use crate::container::Container;
use crate::richards::{
    parse_date, Metadata, Optional, Profile, RichardsGrid1D, RichardsOutput1D, RichardsRecord,
};
use crate::Error;

pub const DEFAULT_GRID: &str = "Richards1D_grid.nc";

pub const OUTPUT: &str = "Richards1D.nc";

pub const START_DATE: &str = "1991-10-30 00:00";

/// Water content and volume of every control volume at its initial suction.
pub fn initial_state(g: &RichardsGrid1D, date: DateTime<Utc>) -> Result<RichardsRecord, Error> {
    let theta = (0..g.len())
        .map(|i| {
            g.van_genuchten(i)
                .map(|vg| vg.theta(g.psi_ic[i]))
                .ok_or_else(|| Error::Value(format!("control volume {i} has no parameters")))
        })
        .collect::<Result<Vec<f64>, _>>()?;

    let water_volume = theta
        .iter()
        .zip(&g.control_volume)
        .map(|(t, v)| t * v)
        .collect();

    let interfaces = vec![0.; g.eta_dual.len()];

    Ok(RichardsRecord {
        date,
        psi: g.psi_ic.to_vec(),
        theta,
        water_volume,
        ets: vec![0.; g.len()],
        darcy_velocity: interfaces.clone(),
        darcy_velocity_capillary: interfaces.clone(),
        darcy_velocity_gravity: interfaces.clone(),
        pore_velocity: interfaces.clone(),
        celerity: interfaces.clone(),
        kinematic_ratio: interfaces,
        ..RichardsRecord::default()
    })
}

pub fn run(path: &Path, start: &str, opts: &Options) -> anyhow::Result<Vec<PathBuf>> {
    let c = Container::open(path)?;

    print_info(&c, &["eta", "psi0", "parameterID"])?;

    let grid = RichardsGrid1D::read(&c)?;
    println!("*** SUCCESS reading {} control volumes", grid.len());

    if opts.close {
        c.close();
    }

    let metadata = Metadata {
        description: "Initial state".into(),
        path_grid: path.display().to_string(),
        swrc_model: "Van Genuchten".into(),
        ..Metadata::default()
    };

    let mut out = RichardsOutput1D::create(
        opts.out_dir.join(OUTPUT),
        &Profile::from(&grid),
        &metadata,
        &Optional::ALL,
    )?;
    out.push(initial_state(&grid, parse_date(start)?)?)?;

    Ok(out.finish()?)
}
