//! Buffered output of a one dimensional Richards simulation.
//!
//! Profiles over the control volumes (`depth`) and over their interfaces (`dualDepth`) are
//! appended along `time`, together with one value per record of the volume error, the boundary
//! conditions and the surface run-off. Time is stored as minutes since the Unix epoch.
use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDateTime, Utc};

use super::RichardsGrid1D;
use crate::writer::{Field, Precision, Record, RecordWriter, Schema, Static};
use crate::Error;

pub const TIME_UNITS: &str = "Minutes since 01/01/1970 00:00:00 UTC";

/// Files roll over once their records exceed this many megabytes.
pub const MAX_FILE_SIZE: f64 = 10_000.;

/// Format of record dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Parse a `YYYY-MM-DD HH:MM` date in UTC.
pub fn parse_date(s: &str) -> Result<DateTime<Utc>, Error> {
    NaiveDateTime::parse_from_str(s, DATE_FORMAT)
        .map(|d| d.and_utc())
        .map_err(|e| Error::Value(format!("invalid date `{s}`: {e}")))
}

/// Interface profiles that are only written when asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Optional {
    DarcyVelocity,
    DarcyVelocityCapillary,
    DarcyVelocityGravity,
    PoreVelocity,
    Celerity,
    KinematicRatio,
}

impl Optional {
    pub const ALL: [Optional; 6] = [
        Optional::DarcyVelocity,
        Optional::DarcyVelocityCapillary,
        Optional::DarcyVelocityGravity,
        Optional::PoreVelocity,
        Optional::Celerity,
        Optional::KinematicRatio,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Optional::DarcyVelocity => "darcyVelocity",
            Optional::DarcyVelocityCapillary => "darcyVelocityCapillary",
            Optional::DarcyVelocityGravity => "darcyVelocityGravity",
            Optional::PoreVelocity => "poreVelocity",
            Optional::Celerity => "celerity",
            Optional::KinematicRatio => "kinematicRatio",
        }
    }

    fn field(&self) -> Field {
        let (units, long_name) = match self {
            Optional::DarcyVelocity => ("m/s", "Darcy velocity"),
            Optional::DarcyVelocityCapillary => (
                "m/s",
                "Darcy velocity due to the gradient of capillary forces",
            ),
            Optional::DarcyVelocityGravity => ("m/s", "Darcy velocity due to the gradient of gravity"),
            Optional::PoreVelocity => (
                "m/s",
                "Pore velocity, ratio between the Darcy velocity and porosity",
            ),
            Optional::Celerity => ("m/s", "Celerity of the pressure wave"),
            Optional::KinematicRatio => ("-", "Kinematic ratio"),
        };

        Field::new(self.name(), Some("dualDepth"), units, long_name)
    }

    /// Parse a list of names, where `all` selects every optional variable.
    pub fn parse(names: &[&str]) -> Result<Vec<Optional>, Error> {
        if names.contains(&"all") {
            return Ok(Optional::ALL.to_vec());
        }

        names
            .iter()
            .map(|n| {
                Optional::ALL
                    .into_iter()
                    .find(|o| o.name() == *n)
                    .ok_or_else(|| Error::Value(format!("unknown output variable `{n}`")))
            })
            .collect()
    }
}

/// Free text describing the run, stored as global attributes.
#[derive(Debug, Clone, Default)]
pub struct Metadata {
    pub description: String,
    pub top_bc: String,
    pub bottom_bc: String,
    pub path_top_bc: String,
    pub path_bottom_bc: String,
    pub path_grid: String,
    pub time_delta: String,
    pub swrc_model: String,
    pub soil_hydraulic_conductivity_model: String,
    pub interface_conductivity_model: String,
}

impl Metadata {
    fn attributes(&self) -> Vec<(String, String)> {
        [
            ("Description of the problem", &self.description),
            ("Top boundary condition", &self.top_bc),
            ("Bottom boundary condition", &self.bottom_bc),
            ("path top boundary condition", &self.path_top_bc),
            ("path bottom boundary condition", &self.path_bottom_bc),
            ("path grid", &self.path_grid),
            ("time delta", &self.time_delta),
            ("swrc model", &self.swrc_model),
            (
                "soil hydraulic conductivity model",
                &self.soil_hydraulic_conductivity_model,
            ),
            (
                "interface conductivity model",
                &self.interface_conductivity_model,
            ),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
    }
}

/// The fixed profiles written once per file.
#[derive(Debug, Clone)]
pub struct Profile {
    pub depth: Vec<f64>,
    pub dual_depth: Vec<f64>,
    pub control_volume: Vec<f64>,
    pub psi_ic: Vec<f64>,
    pub temperature: Vec<f64>,
}

impl From<&RichardsGrid1D> for Profile {
    fn from(g: &RichardsGrid1D) -> Profile {
        Profile {
            depth: g.eta.to_vec(),
            dual_depth: g.eta_dual.to_vec(),
            control_volume: g.control_volume.to_vec(),
            psi_ic: g.psi_ic.to_vec(),
            temperature: g.temperature.to_vec(),
        }
    }
}

/// The state of the column at one date.
#[derive(Debug, Clone, Default)]
pub struct RichardsRecord {
    pub date: DateTime<Utc>,

    /// Water suction (m).
    pub psi: Vec<f64>,
    pub theta: Vec<f64>,
    /// m
    pub water_volume: Vec<f64>,
    /// Transpired stressed water (m).
    pub ets: Vec<f64>,

    pub darcy_velocity: Vec<f64>,
    pub darcy_velocity_capillary: Vec<f64>,
    pub darcy_velocity_gravity: Vec<f64>,
    pub pore_velocity: Vec<f64>,
    pub celerity: Vec<f64>,
    pub kinematic_ratio: Vec<f64>,

    /// Volume error (m).
    pub error: f64,
    pub top_bc: f64,
    pub bottom_bc: f64,
    /// m/s
    pub run_off: f64,
}

impl RichardsRecord {
    fn optional(&self, o: Optional) -> Vec<f64> {
        match o {
            Optional::DarcyVelocity => self.darcy_velocity.clone(),
            Optional::DarcyVelocityCapillary => self.darcy_velocity_capillary.clone(),
            Optional::DarcyVelocityGravity => self.darcy_velocity_gravity.clone(),
            Optional::PoreVelocity => self.pore_velocity.clone(),
            Optional::Celerity => self.celerity.clone(),
            Optional::KinematicRatio => self.kinematic_ratio.clone(),
        }
    }
}

pub struct RichardsOutput1D {
    writer: RecordWriter,
    optional: Vec<Optional>,
}

impl RichardsOutput1D {
    /// Prepare `path` for writing. Files are numbered, so the first one is `<stem>_0000.nc`.
    pub fn create<P: AsRef<Path>>(
        path: P,
        profile: &Profile,
        metadata: &Metadata,
        optional: &[Optional],
    ) -> Result<RichardsOutput1D, Error> {
        let depth = "depth";
        let dual = "dualDepth";

        let mut fields = vec![
            Field::new("psi", Some(depth), "m", "Water suction"),
            Field::new("theta", Some(depth), "-", "Water content"),
            Field::new("waterVolume", Some(depth), "m", "Water volume in each control volume"),
            Field::new("ets", Some(depth), "m", "Transpired stressed water"),
        ];
        fields.extend(optional.iter().map(Optional::field));
        fields.extend([
            Field::new("error", None, "m", "Volume error at each time step"),
            Field::new("topBC", None, "mm", "Rainfall heights"),
            Field::new("bottomBC", None, "-", "Bottom boundary condition"),
            Field::new("runOff", None, "m/s", "Run off"),
        ]);

        let schema = Schema {
            attributes: metadata.attributes(),
            dimensions: vec![
                (depth.into(), profile.depth.len()),
                (dual.into(), profile.dual_depth.len()),
            ],
            precision: Precision::Double,
            time_units: TIME_UNITS.into(),
            time_long_name: "Time".into(),
            statics: vec![
                Static::new(depth, depth, "m", "Soil depth", profile.depth.clone()),
                Static::new(dual, dual, "m", "Dual soil depth", profile.dual_depth.clone()),
                Static::new(
                    "psiIC",
                    depth,
                    "m",
                    "Initial condition for water suction",
                    profile.psi_ic.clone(),
                ),
                Static::new("T", depth, "K", "Temperature", profile.temperature.clone()),
                Static::new(
                    "controlVolume",
                    depth,
                    "m",
                    "Dimension of each control volume",
                    profile.control_volume.clone(),
                ),
            ],
            fields,
        };

        Ok(RichardsOutput1D {
            writer: RecordWriter::new(path, schema)?.max_file_size(MAX_FILE_SIZE),
            optional: optional.to_vec(),
        })
    }

    /// Append to the file every `n` records.
    #[must_use]
    pub fn write_frequency(mut self, n: usize) -> Self {
        self.writer = self.writer.write_frequency(n);
        self
    }

    #[must_use]
    pub fn max_file_size(mut self, mb: f64) -> Self {
        self.writer = self.writer.max_file_size(mb);
        self
    }

    pub fn push(&mut self, r: RichardsRecord) -> Result<(), Error> {
        let minutes = r.date.timestamp() / 60;
        let time = i32::try_from(minutes)
            .map_err(|_| Error::Value(format!("{} is out of range", r.date)))?;

        let optional = self
            .optional
            .iter()
            .map(|&o| r.optional(o))
            .collect::<Vec<_>>();

        let mut values = vec![r.psi, r.theta, r.water_volume, r.ets];
        values.extend(optional);
        values.extend([
            vec![r.error],
            vec![r.top_bc],
            vec![r.bottom_bc],
            vec![r.run_off],
        ]);

        self.writer.push(Record { time, values })
    }

    /// Write what is left and close. Returns the files written.
    pub fn finish(self) -> Result<Vec<PathBuf>, Error> {
        self.writer.finish()
    }
}
