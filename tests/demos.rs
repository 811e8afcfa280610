use std::path::{Path, PathBuf};

use ncplot::demos::{pres_temp_4d, psi_theta, richards, sfc_pres_temp, swrc};
use ncplot::fixtures;
use ncplot::prelude::*;

fn fixtures() -> (tempfile::TempDir, Vec<PathBuf>) {
    let dir = tempfile::tempdir().unwrap();
    let files = fixtures::write_all(dir.path()).unwrap();
    (dir, files)
}

/// Units of the surface variables, in the order they are checked.
const UNITS: [Option<&str>; 4] = [
    Some("celsius"),
    Some("hPa"),
    Some("degrees_east"),
    Some("degrees_north"),
];

/// A surface container with `units` for temperature, pressure, latitude and longitude. `None`
/// leaves the attribute out.
fn surface_with_units(dir: &Path, units: [Option<&str>; 4]) -> PathBuf {
    let p = dir.join("sfc_units.nc");
    let mut nc = netcdf::create(&p).unwrap();

    nc.add_dimension("latitude", 2).unwrap();
    nc.add_dimension("longitude", 3).unwrap();

    let dims = [
        ("temperature", &["latitude", "longitude"][..]),
        ("pressure", &["latitude", "longitude"][..]),
        ("latitude", &["latitude"][..]),
        ("longitude", &["longitude"][..]),
    ];

    for ((name, dims), u) in dims.into_iter().zip(units) {
        let mut v = nc.add_variable::<f32>(name, dims).unwrap();
        v.put_attribute("long_name", name).unwrap();
        if let Some(u) = u {
            v.put_attribute("units", u).unwrap();
        }
    }

    p
}

fn units_error(units: [Option<&str>; 4]) -> String {
    let dir = tempfile::tempdir().unwrap();
    let p = surface_with_units(dir.path(), units);
    let c = Container::open(&p).unwrap();

    match sfc_pres_temp::check_units(&c) {
        Err(Error::Attribute(m)) => m,
        r => panic!("unexpected: {r:?}"),
    }
}

#[test]
fn required_variables_resolve() {
    let (dir, _) = fixtures();

    for (file, required) in [
        (swrc::DEFAULT_PATH, &swrc::REQUIRED[..]),
        (pres_temp_4d::DEFAULT_PATH, &pres_temp_4d::REQUIRED[..]),
        (psi_theta::DEFAULT_PATH, &psi_theta::REQUIRED[..]),
        (sfc_pres_temp::DEFAULT_PATH, &sfc_pres_temp::REQUIRED[..]),
        (richards::DEFAULT_GRID, &ncplot::richards::REQUIRED[..]),
    ] {
        let c = Container::open(dir.path().join(file)).unwrap();
        for name in required {
            let v = c.variable(name).unwrap();
            assert_eq!(&v.name(), name);
        }
    }
}

#[test]
fn swrc_load() {
    let (dir, _) = fixtures();
    let c = Container::open(dir.path().join(swrc::DEFAULT_PATH)).unwrap();

    let s = swrc::Swrc::load(&c).unwrap();
    assert_eq!(s.psi.len(), fixtures::NPSI);
    assert_eq!(s.psi_label, "Pressure head  [m]");
    assert_eq!(s.theta_label, "Water content  [-]");

    // saturated at psi = 0
    assert!((s.theta[fixtures::NPSI - 1] - 0.35).abs() < 1e-12);

    let fig = s.figure();
    assert_eq!(fig.title, "SWRC");
    assert!(fig.grid);
}

#[test]
fn pres_temp_4d_load_and_check() {
    let (dir, _) = fixtures();
    let c = Container::open(dir.path().join(pres_temp_4d::DEFAULT_PATH)).unwrap();

    let d = pres_temp_4d::PresTemp4d::load(&c).unwrap();
    assert_eq!(d.psi.len(), 20);
    assert_eq!(d.psi[0], 2.0);
    assert_eq!(d.psi[19], 40.0);
    assert_eq!(d.depth[19], -19.0);

    d.check().unwrap();
}

#[test]
fn pres_temp_4d_check_fails_on_other_grid() {
    let (dir, _) = fixtures();
    let c = Container::open(dir.path().join(pres_temp_4d::DEFAULT_PATH)).unwrap();

    let mut d = pres_temp_4d::PresTemp4d::load(&c).unwrap();
    d.latitude[0] += 1.0;

    match d.check() {
        Err(Error::Value(m)) => assert_eq!(m, "latitude data not what was expected"),
        r => panic!("unexpected: {r:?}"),
    }
}

#[test]
fn missing_variable_fails_before_plotting() {
    let (dir, _) = fixtures();

    // the surface file has no psi
    let c = Container::open(dir.path().join(sfc_pres_temp::DEFAULT_PATH)).unwrap();
    assert!(matches!(
        psi_theta::Profiles::load(&c, 1),
        Err(Error::MissingVariable(_))
    ));

    let out = tempfile::tempdir().unwrap();
    let opts = Options {
        out_dir: out.path().to_path_buf(),
        ..Options::default()
    };
    let r = swrc::run(&dir.path().join(sfc_pres_temp::DEFAULT_PATH), &opts);
    assert!(r.is_err());
    assert!(!out.path().join(swrc::FIGURE).exists());
}

#[test]
fn psi_theta_profiles() {
    let (dir, _) = fixtures();
    let c = Container::open(dir.path().join(psi_theta::DEFAULT_PATH)).unwrap();

    let p = psi_theta::Profiles::load(&c, psi_theta::TIME_INDEX).unwrap();
    assert_eq!(p.title, "1991-10-30 01:00");
    assert_eq!(p.theta[19], 120.0);
    assert_eq!(p.depth_label, "Soil depth  [m]");

    let p0 = psi_theta::Profiles::load(&c, 0).unwrap();
    assert_eq!(p0.title, "1991-10-30 00:00");
    assert_eq!(p0.psi[4], 5.0);

    assert!(matches!(
        psi_theta::Profiles::load(&c, 2),
        Err(Error::Extents(_))
    ));

    let [psi, theta] = p.figures();
    assert_eq!(psi.x_label, "Hydraulic head  [m]");
    assert_eq!(theta.x_label, "Adimensional water content  [-]");
    assert!(psi.grid && theta.grid);
}

#[test]
fn sfc_pres_temp_load_and_check() {
    let (dir, _) = fixtures();
    let c = Container::open(dir.path().join(sfc_pres_temp::DEFAULT_PATH)).unwrap();

    let s = sfc_pres_temp::Surface::load(&c).unwrap();
    assert_eq!(s.pressure.dim(), (6, 12));
    s.check().unwrap();

    let fig = s.figure();
    assert_eq!(fig.z.dim(), (12, 6));
    assert_eq!(fig.z[(11, 5)], 971.0);
}

#[test]
fn wrong_temperature_units() {
    let dir = tempfile::tempdir().unwrap();
    let mut units = UNITS;
    units[0] = Some("kelvin");
    let p = surface_with_units(dir.path(), units);

    let c = Container::open(&p).unwrap();
    match sfc_pres_temp::Surface::load(&c) {
        Err(Error::Attribute(m)) => {
            assert_eq!(m, "temperature units attribute not what was expected")
        }
        r => panic!("unexpected: {r:?}"),
    }

    let out = tempfile::tempdir().unwrap();
    let opts = Options {
        out_dir: out.path().to_path_buf(),
        ..Options::default()
    };
    let err = sfc_pres_temp::run(&p, &opts).unwrap_err();
    assert_eq!(
        err.to_string(),
        "temperature units attribute not what was expected"
    );
    assert!(!out.path().join(sfc_pres_temp::FIGURE).exists());
}

#[test]
fn missing_temperature_units() {
    let mut units = UNITS;
    units[0] = None;

    assert_eq!(
        units_error(units),
        "temperature units attribute not what was expected"
    );
}

#[test]
fn units_checked_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let p = surface_with_units(dir.path(), UNITS);
    sfc_pres_temp::check_units(&Container::open(&p).unwrap()).unwrap();

    // temperature is reported before pressure
    let mut units = UNITS;
    units[0] = Some("kelvin");
    units[1] = Some("Pa");
    assert_eq!(
        units_error(units),
        "temperature units attribute not what was expected"
    );

    // latitude and longitude units are swapped in the example grid
    for (i, wrong, message) in [
        (1, "Pa", "pressure units attribute not what was expected"),
        (2, "degrees_north", "latitude units attribute not what was expected"),
        (3, "degrees_east", "longitude units attribute not what was expected"),
    ] {
        let mut units = UNITS;
        units[i] = Some(wrong);
        assert_eq!(units_error(units), message);
    }
}

#[test]
fn sfc_pres_temp_check_fails_on_other_data() {
    let (dir, _) = fixtures();
    let c = Container::open(dir.path().join(sfc_pres_temp::DEFAULT_PATH)).unwrap();

    let mut s = sfc_pres_temp::Surface::load(&c).unwrap();
    s.pressure[[0, 0]] += 1.0;
    s.latitude[0] += 1.0;

    match s.check() {
        Err(Error::Value(m)) => assert_eq!(m, "pressure data not what was expected"),
        r => panic!("unexpected: {r:?}"),
    }
}

#[test]
fn render_all() {
    let (dir, _) = fixtures();
    let out = tempfile::tempdir().unwrap();
    let opts = Options {
        out_dir: out.path().to_path_buf(),
        check_data: true,
        close: true,
    };

    let mut figures = Vec::new();
    figures.extend(swrc::run(&dir.path().join(swrc::DEFAULT_PATH), &opts).unwrap());
    figures.extend(
        pres_temp_4d::run(&dir.path().join(pres_temp_4d::DEFAULT_PATH), &opts).unwrap(),
    );
    figures.extend(
        psi_theta::run(&dir.path().join(psi_theta::DEFAULT_PATH), 1, &opts).unwrap(),
    );
    figures.extend(
        sfc_pres_temp::run(&dir.path().join(sfc_pres_temp::DEFAULT_PATH), &opts).unwrap(),
    );

    assert_eq!(figures.len(), 5);
    for f in figures {
        assert!(f.is_file(), "{f:?}");
    }
}
