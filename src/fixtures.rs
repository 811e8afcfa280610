//! Writers for the sample containers the demos read.
//!
//! Four layouts: a two record `(time, depth)` Richards simulation output, the surface
//! pressure/temperature example grid, a sampled hydraulic parameterization and a Richards 1D
//! input grid.
use std::path::{Path, PathBuf};

use log::info;
use ndarray::{Array, Dimension};

use crate::demos::{psi_theta, richards, sfc_pres_temp, swrc};
use crate::expected;
use crate::richards::VanGenuchten;
use crate::writer::{Field, Precision, Record, RecordWriter, Schema, Static};
use crate::Error;

/// Number of levels in the simulation output.
pub const NLVL: usize = 20;

/// Record times (seconds since the Unix epoch): 1991-10-30 00:00 and 01:00 UTC.
pub const TIMES: [i32; 2] = [688_780_800, 688_784_400];

/// Number of control volumes of the Richards grid.
pub const NCELLS: usize = 20;

/// Number of samples of the hydraulic parameterization.
pub const NPSI: usize = 200;

fn flat<D: Dimension>(a: &Array<f32, D>) -> Vec<f32> {
    a.iter().copied().collect()
}

/// Two records of hydraulic head and water content over twenty levels, plus the latitude and
/// longitude coordinates of the four dimensional example. Each record is appended on its own.
pub fn write_hydraulic_2d(path: &Path) -> Result<(), Error> {
    use expected::pres_temp_4d::{latitudes, longitudes, NLATS, NLONS};

    info!("writing {}", path.display());

    let wide = |v: Vec<f32>| v.into_iter().map(f64::from).collect::<Vec<f64>>();

    let schema = Schema {
        attributes: vec![("title".into(), "Richards 1D example output".into())],
        dimensions: vec![
            ("depth".into(), NLVL),
            ("latitude".into(), NLATS),
            ("longitude".into(), NLONS),
        ],
        precision: Precision::Single,
        time_units: "unix convention".into(),
        time_long_name: "Time".into(),
        statics: vec![
            Static::new(
                "depth",
                "depth",
                "m",
                "Soil depth",
                (0..NLVL).map(|j| -(j as f64)).collect(),
            ),
            Static::new(
                "latitude",
                "latitude",
                "degrees_north",
                "Latitude",
                wide(flat(&latitudes(NLATS))),
            ),
            Static::new(
                "longitude",
                "longitude",
                "degrees_east",
                "Longitude",
                wide(flat(&longitudes(NLONS))),
            ),
        ],
        fields: vec![
            Field::new("psi", Some("depth"), "m", "Hydraulic head"),
            Field::new("theta", Some("depth"), "-", "Adimensional water content"),
        ],
    };

    let mut w = RecordWriter::new(path, schema)?;

    for (r, &time) in TIMES.iter().enumerate() {
        let psi = (1..=NLVL).map(|j| ((r + 1) * j) as f64).collect::<Vec<_>>();
        let theta = psi.iter().map(|p| 3. * p).collect();

        w.push(Record {
            time,
            values: vec![psi, theta],
        })?;
    }

    w.finish()?;

    Ok(())
}

/// The surface example grid. The latitude and longitude units are swapped, as in the files the
/// surface demo checks against.
pub fn write_sfc_pres_temp(path: &Path) -> Result<(), Error> {
    use expected::sfc_pres_temp::*;

    info!("writing {}", path.display());

    let mut nc = netcdf::create(path)?;
    nc.add_attribute("title", "Surface pressure and temperature example")?;

    nc.add_dimension("latitude", NLATS)?;
    nc.add_dimension("longitude", NLONS)?;

    {
        let mut v = nc.add_variable::<f32>("latitude", &["latitude"])?;
        v.put_attribute("units", "degrees_east")?;
        v.put_attribute("long_name", "Latitude")?;
        v.put_values(&flat(&latitudes(NLATS)), ..)?;
    }
    {
        let mut v = nc.add_variable::<f32>("longitude", &["longitude"])?;
        v.put_attribute("units", "degrees_north")?;
        v.put_attribute("long_name", "Longitude")?;
        v.put_values(&flat(&longitudes(NLONS)), ..)?;
    }
    {
        let mut v = nc.add_variable::<f32>("pressure", &["latitude", "longitude"])?;
        v.put_attribute("units", "hPa")?;
        v.put_attribute("long_name", "Surface pressure")?;
        v.put_values(&flat(&pressure(NLATS, NLONS)), ..)?;
    }
    {
        let mut v = nc.add_variable::<f32>("temperature", &["latitude", "longitude"])?;
        v.put_attribute("units", "celsius")?;
        v.put_attribute("long_name", "Surface temperature")?;
        v.put_values(&flat(&temperature(NLATS, NLONS)), ..)?;
    }

    Ok(())
}

/// `NPSI` samples of the Van Genuchten–Mualem model between -10 m and 0 m.
pub fn write_hydraulic_parameterization(path: &Path) -> Result<(), Error> {
    info!("writing {}", path.display());

    let vg = VanGenuchten::default();
    let psi = (0..NPSI)
        .map(|i| -10.0 + 10.0 * i as f64 / (NPSI - 1) as f64)
        .collect::<Vec<_>>();
    let theta = psi.iter().map(|&p| vg.theta(p)).collect::<Vec<_>>();
    let d_theta = psi.iter().map(|&p| vg.d_theta(p)).collect::<Vec<_>>();
    let k = psi.iter().map(|&p| vg.conductivity(p)).collect::<Vec<_>>();

    let mut nc = netcdf::create(path)?;
    nc.add_attribute("title", "Van Genuchten-Mualem hydraulic parameterization")?;
    nc.add_attribute("theta_r", vg.theta_r)?;
    nc.add_attribute("theta_s", vg.theta_s)?;
    nc.add_attribute("alpha", vg.alpha)?;
    nc.add_attribute("n", vg.n)?;
    nc.add_attribute("ks", vg.ks)?;

    nc.add_dimension("psi", NPSI)?;

    for (name, long_name, units, values) in [
        ("psi", "Pressure head", "m", &psi),
        ("theta", "Water content", "-", &theta),
        ("dTheta", "Moisture capacity", "1/m", &d_theta),
        ("hydraulic_conductivity", "Hydraulic conductivity", "m/s", &k),
    ] {
        let mut v = nc.add_variable::<f64>(name, &["psi"])?;
        v.put_attribute("units", units)?;
        v.put_attribute("long_name", long_name)?;
        v.put_values(values, ..)?;
    }

    Ok(())
}

/// A column of `NCELLS` control volumes of 0.1 m, with a loam layer over the default Van
/// Genuchten soil. Calibration points are the top, middle and bottom volumes.
pub fn write_richards_grid_1d(path: &Path) -> Result<(), Error> {
    info!("writing {}", path.display());

    let dz = 0.1;
    let bottom = NCELLS as f64 * dz;

    let eta = (0..NCELLS)
        .map(|i| -(i as f64 + 0.5) * dz)
        .collect::<Vec<_>>();
    let eta_dual = (0..=NCELLS).map(|i| -(i as f64) * dz).collect::<Vec<_>>();
    let z = eta.iter().map(|e| bottom + e).collect::<Vec<_>>();
    let z_dual = eta_dual.iter().map(|e| bottom + e).collect::<Vec<_>>();
    let space_delta = (0..=NCELLS)
        .map(|i| if i == 0 || i == NCELLS { dz / 2. } else { dz })
        .collect::<Vec<_>>();
    // hydrostatic, with the water table at the bottom
    let psi0 = z.iter().map(|z| -z).collect::<Vec<_>>();

    let rheology_id = vec![0_i32; NCELLS];
    let parameter_id = (0..NCELLS)
        .map(|i| i32::from(i >= NCELLS / 2))
        .collect::<Vec<_>>();
    let control_volume_index = [0, NCELLS as i32 / 2 - 1, NCELLS as i32 - 1];

    let loam = VanGenuchten {
        theta_r: 0.078,
        theta_s: 0.43,
        alpha: 3.6,
        n: 1.56,
        ks: 2.89e-6,
    };
    let soils = [loam, VanGenuchten::default()];
    let param = |f: fn(&VanGenuchten) -> f64| soils.iter().map(f).collect::<Vec<f64>>();

    let mut nc = netcdf::create(path)?;
    nc.add_attribute("title", "Richards 1D grid")?;

    nc.add_dimension("depth", NCELLS)?;
    nc.add_dimension("dualDepth", NCELLS + 1)?;
    nc.add_dimension("parameter", soils.len())?;
    nc.add_dimension("calibration", control_volume_index.len())?;

    for (name, dim, units, long_name, values) in [
        ("eta", "depth", "m", "Centroid coordinate from the soil surface", &eta),
        ("etaDual", "dualDepth", "m", "Interface coordinate from the soil surface", &eta_dual),
        ("z", "depth", "m", "Centroid coordinate from the bottom", &z),
        ("zDual", "dualDepth", "m", "Interface coordinate from the bottom", &z_dual),
        ("psi0", "depth", "m", "Initial water suction", &psi0),
        ("T0", "depth", "K", "Initial temperature", &vec![283.15; NCELLS]),
        ("spaceDelta", "dualDepth", "m", "Distance between centroids", &space_delta),
        ("controlVolume", "depth", "m", "Length of each control volume", &vec![dz; NCELLS]),
        ("thetaS", "parameter", "-", "Water content at saturation", &param(|v| v.theta_s)),
        ("thetaR", "parameter", "-", "Residual water content", &param(|v| v.theta_r)),
        ("thetaWp", "parameter", "-", "Water content at wilting point", &param(|_| 0.)),
        ("thetaFc", "parameter", "-", "Water content at field capacity", &param(|_| 0.)),
        ("ks", "parameter", "m/s", "Saturated hydraulic conductivity", &param(|v| v.ks)),
        ("alphaSpecificStorage", "parameter", "1/Pa", "Compressibility of the soil", &param(|_| 0.)),
        ("betaSpecificStorage", "parameter", "1/Pa", "Compressibility of water", &param(|_| 0.)),
        ("par1SWRC", "parameter", "-", "Van Genuchten n", &param(|v| v.n)),
        ("par2SWRC", "parameter", "1/m", "Van Genuchten alpha", &param(|v| v.alpha)),
        ("par3SWRC", "parameter", "-", "SWRC parameter 3", &param(|_| 0.)),
        ("par4SWRC", "parameter", "-", "SWRC parameter 4", &param(|_| 0.)),
        ("par5SWRC", "parameter", "-", "SWRC parameter 5", &param(|_| 0.)),
    ] {
        let mut v = nc.add_variable::<f64>(name, &[dim])?;
        v.put_attribute("units", units)?;
        v.put_attribute("long_name", long_name)?;
        v.put_values(values, ..)?;
    }

    for (name, dim, long_name, values) in [
        ("rheologyID", "depth", "Rheology label", &rheology_id[..]),
        ("parameterID", "depth", "Parameter set of each control volume", &parameter_id[..]),
        ("controlVolumeIndex", "calibration", "Calibration control volumes", &control_volume_index[..]),
    ] {
        let mut v = nc.add_variable::<i32>(name, &[dim])?;
        v.put_attribute("units", "-")?;
        v.put_attribute("long_name", long_name)?;
        v.put_values(values, ..)?;
    }

    Ok(())
}

/// Write every sample container into `dir`, named after each demo's default path.
pub fn write_all(dir: &Path) -> Result<Vec<PathBuf>, Error> {
    std::fs::create_dir_all(dir)?;

    let files = [
        (
            psi_theta::DEFAULT_PATH,
            write_hydraulic_2d as fn(&Path) -> Result<(), Error>,
        ),
        (sfc_pres_temp::DEFAULT_PATH, write_sfc_pres_temp),
        (swrc::DEFAULT_PATH, write_hydraulic_parameterization),
        (richards::DEFAULT_GRID, write_richards_grid_1d),
    ];

    files
        .into_iter()
        .map(|(name, write)| {
            let p = dir.join(name);
            write(&p).map(|_| p)
        })
        .collect()
}
