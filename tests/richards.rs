use std::path::{Path, PathBuf};

use ndarray::ArrayD;

use ncplot::demos::richards;
use ncplot::fixtures;
use ncplot::prelude::*;
use ncplot::richards::{
    parse_date, Metadata, Optional, Profile, RichardsGrid1D, RichardsOutput1D, RichardsRecord,
    VanGenuchten, REQUIRED,
};

fn grid_fixture() -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let p = dir.path().join(richards::DEFAULT_GRID);
    fixtures::write_richards_grid_1d(&p).unwrap();
    (dir, p)
}

/// A three volume grid with one parameter set, labelled by `parameter_id`.
fn small_grid(dir: &Path, parameter_id: &[f64]) -> PathBuf {
    let p = dir.join("small_grid.nc");
    let mut nc = netcdf::create(&p).unwrap();

    nc.add_dimension("depth", 3).unwrap();
    nc.add_dimension("dualDepth", 4).unwrap();
    nc.add_dimension("parameter", 1).unwrap();
    nc.add_dimension("calibration", 1).unwrap();

    for name in REQUIRED {
        let (dim, values) = match name {
            "etaDual" | "zDual" | "spaceDelta" => ("dualDepth", vec![0.; 4]),
            "parameterID" => ("depth", parameter_id.to_vec()),
            "controlVolumeIndex" => ("calibration", vec![2.]),
            "thetaS" | "thetaR" | "thetaWp" | "thetaFc" | "ks" | "alphaSpecificStorage"
            | "betaSpecificStorage" | "par1SWRC" | "par2SWRC" | "par3SWRC" | "par4SWRC"
            | "par5SWRC" => ("parameter", vec![1.]),
            _ => ("depth", vec![0.; 3]),
        };

        let mut v = nc.add_variable::<f64>(name, &[dim]).unwrap();
        v.put_values(&values, ..).unwrap();
    }

    p
}

fn flat(a: ArrayD<f64>) -> Vec<f64> {
    a.iter().copied().collect()
}

fn record(date: &str, n: usize, dual: usize, value: f64) -> RichardsRecord {
    RichardsRecord {
        date: parse_date(date).unwrap(),
        psi: vec![value; n],
        theta: vec![value / 10.; n],
        water_volume: vec![0.; n],
        ets: vec![0.; n],
        celerity: vec![value; dual],
        error: value / 4.,
        ..RichardsRecord::default()
    }
}

fn profile() -> Profile {
    Profile {
        depth: vec![-0.05, -0.15, -0.25],
        dual_depth: vec![0., -0.1, -0.2, -0.3],
        control_volume: vec![0.1; 3],
        psi_ic: vec![-1.; 3],
        temperature: vec![283.15; 3],
    }
}

#[test]
fn grid_read() {
    let (_d, p) = grid_fixture();
    let c = Container::open(&p).unwrap();

    let g = RichardsGrid1D::read(&c).unwrap();
    assert_eq!(g.len(), fixtures::NCELLS);
    assert_eq!(g.eta_dual.len(), fixtures::NCELLS + 1);
    assert_eq!(g.parameters(), 2);
    assert_eq!(g.control_volume_index.to_vec(), vec![0, 9, 19]);
    assert!((g.eta[0] + 0.05).abs() < 1e-12);
    assert!((g.z[0] - 1.95).abs() < 1e-12);

    let top = g.van_genuchten(0).unwrap();
    assert_eq!(top.n, 1.56);
    assert_eq!(top.alpha, 3.6);
    assert_eq!(g.van_genuchten(19).unwrap(), VanGenuchten::default());
    assert!(g.van_genuchten(fixtures::NCELLS).is_none());
}

#[test]
fn grid_missing_variable() {
    let dir = tempfile::tempdir().unwrap();
    let (_d, p) = grid_fixture();

    // the hydraulic output is not a grid
    let other = dir.path().join("hydraulic_2D.nc");
    fixtures::write_hydraulic_2d(&other).unwrap();
    assert!(matches!(
        RichardsGrid1D::read(&Container::open(&other).unwrap()),
        Err(Error::MissingVariable(m)) if m == "eta"
    ));

    assert!(RichardsGrid1D::read(&Container::open(&p).unwrap()).is_ok());
}

#[test]
fn grid_bad_labels() {
    let dir = tempfile::tempdir().unwrap();

    let p = small_grid(dir.path(), &[0., 0., 0.]);
    let g = RichardsGrid1D::read(&Container::open(&p).unwrap()).unwrap();
    assert_eq!(g.len(), 3);

    let p = small_grid(dir.path(), &[0., 1., 0.]);
    assert!(matches!(
        RichardsGrid1D::read(&Container::open(&p).unwrap()),
        Err(Error::Value(m)) if m == "`parameterID` refers to 1, but there are 1"
    ));

    let p = small_grid(dir.path(), &[0., 0.5, 0.]);
    assert!(matches!(
        RichardsGrid1D::read(&Container::open(&p).unwrap()),
        Err(Error::Value(m)) if m.starts_with("`parameterID` holds 0.5")
    ));
}

#[test]
fn output_appends_records() {
    let dir = tempfile::tempdir().unwrap();
    let p = dir.path().join("out.nc");

    let mut out = RichardsOutput1D::create(
        &p,
        &profile(),
        &Metadata {
            description: "three records".into(),
            ..Metadata::default()
        },
        &[Optional::Celerity],
    )
    .unwrap()
    .write_frequency(2);

    out.push(record("1991-10-30 00:00", 3, 4, 1.)).unwrap();
    out.push(record("1991-10-30 00:05", 3, 4, 2.)).unwrap();
    out.push(record("1991-10-30 00:10", 3, 4, 3.)).unwrap();

    let files = out.finish().unwrap();
    assert_eq!(files, vec![dir.path().join("out_0000.nc")]);

    let c = Container::open(&files[0]).unwrap();
    assert_eq!(c.dimension_len("time"), Some(3));
    assert_eq!(c.dimension_len("dualDepth"), Some(4));

    let time = flat(c.variable("time").unwrap().values().unwrap());
    assert_eq!(time, vec![11_479_680., 11_479_685., 11_479_690.]);

    let psi = c.variable("psi").unwrap();
    assert_eq!(psi.shape(), vec![3, 3]);
    assert_eq!(flat(psi.slice((2, ..)).unwrap()), vec![3.; 3]);
    assert_eq!(flat(psi.slice((0, ..)).unwrap()), vec![1.; 3]);

    let celerity = c.variable("celerity").unwrap();
    assert_eq!(celerity.shape(), vec![3, 4]);
    assert_eq!(flat(celerity.slice((1, ..)).unwrap()), vec![2.; 4]);

    let error = flat(c.variable("error").unwrap().values().unwrap());
    assert_eq!(error, vec![0.25, 0.5, 0.75]);

    let psi_ic = flat(c.variable("psiIC").unwrap().values().unwrap());
    assert_eq!(psi_ic, vec![-1.; 3]);
    assert!(matches!(
        c.variable("poreVelocity"),
        Err(Error::MissingVariable(_))
    ));
}

#[test]
fn output_rolls_over() {
    let dir = tempfile::tempdir().unwrap();
    let p = dir.path().join("out.nc");

    let mut out = RichardsOutput1D::create(&p, &profile(), &Metadata::default(), &[])
        .unwrap()
        .max_file_size(1e-9);

    for (i, date) in ["2000-01-01 00:00", "2000-01-01 01:00", "2000-01-01 02:00"]
        .into_iter()
        .enumerate()
    {
        out.push(record(date, 3, 4, i as f64)).unwrap();
    }

    let files = out.finish().unwrap();
    assert_eq!(files.len(), 3);
    assert_eq!(files[2], dir.path().join("out_0002.nc"));

    for (i, f) in files.iter().enumerate() {
        let c = Container::open(f).unwrap();
        assert_eq!(c.dimension_len("time"), Some(1));
        assert_eq!(
            flat(c.variable("psi").unwrap().slice((0, ..)).unwrap()),
            vec![i as f64; 3]
        );
        assert!(matches!(
            c.variable("celerity"),
            Err(Error::MissingVariable(_))
        ));
    }
}

#[test]
fn output_rejects_short_profile() {
    let dir = tempfile::tempdir().unwrap();
    let mut out = RichardsOutput1D::create(
        dir.path().join("out.nc"),
        &profile(),
        &Metadata::default(),
        &[Optional::Celerity],
    )
    .unwrap();

    // celerity is on the interfaces, not the volumes
    assert!(matches!(
        out.push(record("2000-01-01 00:00", 3, 3, 0.)),
        Err(Error::Value(m)) if m.starts_with("`celerity`")
    ));

    let mut far = record("2000-01-01 00:00", 3, 4, 0.);
    far.date = parse_date("9999-01-01 00:00").unwrap();
    assert!(matches!(out.push(far), Err(Error::Value(_))));

    assert!(out.finish().unwrap().is_empty());
}

#[test]
fn initial_state_written() {
    let (dir, p) = grid_fixture();
    let opts = Options {
        out_dir: dir.path().to_path_buf(),
        ..Options::default()
    };

    let files = richards::run(&p, richards::START_DATE, &opts).unwrap();
    assert_eq!(files, vec![dir.path().join("Richards1D_0000.nc")]);

    let g = RichardsGrid1D::read(&Container::open(&p).unwrap()).unwrap();
    let c = Container::open(&files[0]).unwrap();
    assert_eq!(c.dimension_len("time"), Some(1));

    let theta = flat(c.variable("theta").unwrap().slice((0, ..)).unwrap());
    for i in [0, fixtures::NCELLS - 1] {
        let expected = g.van_genuchten(i).unwrap().theta(g.psi_ic[i]);
        assert!((theta[i] - expected).abs() < 1e-12);
    }

    for o in Optional::ALL {
        assert_eq!(c.variable(o.name()).unwrap().shape(), vec![1, fixtures::NCELLS + 1]);
    }

    assert!(richards::run(&p, "30/10/1991", &opts).is_err());
}
