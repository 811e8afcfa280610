//! Buffered writer of record variables along an unlimited `time` dimension.
//!
//! Records are collected in memory and appended to the file every `write_frequency` records, and
//! once more when the writer is finished. Files are written in the 64-bit offset (NetCDF-3)
//! format. When a maximum file size is set, output rolls over to numbered files
//! (`out_0000.nc`, `out_0001.nc`, ..) once the records of the current file exceed it.
use std::path::{Path, PathBuf};

use log::{debug, error, info};

use crate::Error;

/// Name of the record dimension and its coordinate variable.
pub const TIME: &str = "time";

/// Storage type of the floating point variables of a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precision {
    Single,
    Double,
}

impl Precision {
    fn bytes(&self) -> usize {
        match self {
            Precision::Single => 4,
            Precision::Double => 8,
        }
    }
}

/// A variable written once, when the file is created.
#[derive(Debug, Clone)]
pub struct Static {
    pub name: String,
    pub dim: String,
    pub units: String,
    pub long_name: String,
    pub values: Vec<f64>,
}

/// A variable with one entry per record.
#[derive(Debug, Clone)]
pub struct Field {
    pub name: String,
    /// Dimension following `time`, `None` for a single value per record.
    pub dim: Option<String>,
    pub units: String,
    pub long_name: String,
}

impl Field {
    pub fn new(name: &str, dim: Option<&str>, units: &str, long_name: &str) -> Field {
        Field {
            name: name.into(),
            dim: dim.map(Into::into),
            units: units.into(),
            long_name: long_name.into(),
        }
    }
}

impl Static {
    pub fn new(name: &str, dim: &str, units: &str, long_name: &str, values: Vec<f64>) -> Static {
        Static {
            name: name.into(),
            dim: dim.into(),
            units: units.into(),
            long_name: long_name.into(),
            values,
        }
    }
}

/// Layout of a record file.
#[derive(Debug, Clone)]
pub struct Schema {
    /// Global text attributes. Empty values are skipped.
    pub attributes: Vec<(String, String)>,
    /// Fixed dimensions. `time` is added as the unlimited dimension.
    pub dimensions: Vec<(String, usize)>,
    pub precision: Precision,
    pub time_units: String,
    pub time_long_name: String,
    pub statics: Vec<Static>,
    pub fields: Vec<Field>,
}

impl Schema {
    fn dimension_len(&self, name: &str) -> Result<usize, Error> {
        self.dimensions
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, len)| *len)
            .ok_or_else(|| Error::Value(format!("dimension `{name}` is not defined")))
    }
}

/// One record: its time and the values of every [Field], in the order of [Schema::fields].
#[derive(Debug, Clone)]
pub struct Record {
    pub time: i32,
    pub values: Vec<Vec<f64>>,
}

pub struct RecordWriter {
    path: PathBuf,
    schema: Schema,
    /// Length of each field per record.
    lens: Vec<usize>,
    write_frequency: usize,
    max_file_size: Option<f64>,

    file: Option<netcdf::FileMut>,
    file_number: usize,
    written: usize,
    pending: Vec<Record>,
    files: Vec<PathBuf>,
}

/// `out.nc` as `out_0003.nc`.
pub fn numbered(path: &Path, n: usize) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let name = match path.extension() {
        Some(ext) => format!("{stem}_{n:04}.{}", ext.to_string_lossy()),
        None => format!("{stem}_{n:04}"),
    };

    path.with_file_name(name)
}

impl RecordWriter {
    /// Check `schema`. Nothing is written until the first flush.
    pub fn new<P: AsRef<Path>>(path: P, schema: Schema) -> Result<RecordWriter, Error> {
        if schema.dimensions.iter().any(|(n, _)| n == TIME) {
            return Err(Error::Value(format!("`{TIME}` is the record dimension")));
        }

        for s in &schema.statics {
            let len = schema.dimension_len(&s.dim)?;
            if s.values.len() != len {
                return Err(Error::Value(format!(
                    "`{}` has {} values, but `{}` is {len} long",
                    s.name,
                    s.values.len(),
                    s.dim
                )));
            }
        }

        let lens = schema
            .fields
            .iter()
            .map(|f| match &f.dim {
                Some(d) => schema.dimension_len(d),
                None => Ok(1),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(RecordWriter {
            path: path.as_ref().into(),
            schema,
            lens,
            write_frequency: 1,
            max_file_size: None,
            file: None,
            file_number: 0,
            written: 0,
            pending: Vec::new(),
            files: Vec::new(),
        })
    }

    /// Append to the file every `n` records (at least one).
    #[must_use]
    pub fn write_frequency(mut self, n: usize) -> Self {
        self.write_frequency = n.max(1);
        self
    }

    /// Roll over to a new numbered file once the records of the current one exceed `mb`
    /// megabytes.
    #[must_use]
    pub fn max_file_size(mut self, mb: f64) -> Self {
        self.max_file_size = Some(mb);
        self
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Records buffered but not yet written.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Buffer `record`, flushing when `write_frequency` records are pending.
    pub fn push(&mut self, record: Record) -> Result<(), Error> {
        if record.values.len() != self.lens.len() {
            return Err(Error::Value(format!(
                "record has {} fields, expected {}",
                record.values.len(),
                self.lens.len()
            )));
        }

        for ((f, &len), v) in self.schema.fields.iter().zip(&self.lens).zip(&record.values) {
            if v.len() != len {
                return Err(Error::Value(format!(
                    "`{}` has {} values in record, expected {len}",
                    f.name,
                    v.len()
                )));
            }
        }

        self.pending.push(record);

        if self.pending.len() >= self.write_frequency {
            self.flush()?;
        }

        Ok(())
    }

    fn current_path(&self) -> PathBuf {
        match self.max_file_size {
            Some(_) => numbered(&self.path, self.file_number),
            None => self.path.clone(),
        }
    }

    /// Create a file in define mode, then write the static variables.
    fn create(&self, path: &Path) -> Result<netcdf::FileMut, Error> {
        info!("creating {}", path.display());

        let schema = &self.schema;
        let mut nc = netcdf::create_with(path, netcdf::Options::_64BIT_OFFSET)?;

        for (name, value) in schema.attributes.iter().filter(|(_, v)| !v.is_empty()) {
            nc.add_attribute(name, value.as_str())?;
        }

        for (name, len) in &schema.dimensions {
            nc.add_dimension(name, *len)?;
        }
        nc.add_unlimited_dimension(TIME)?;

        {
            let mut v = nc.add_variable::<i32>(TIME, &[TIME])?;
            v.put_attribute("units", schema.time_units.as_str())?;
            v.put_attribute("long_name", schema.time_long_name.as_str())?;
        }

        for s in &schema.statics {
            add_variable(
                &mut nc,
                schema.precision,
                &s.name,
                &[s.dim.as_str()],
                &s.units,
                &s.long_name,
            )?;
        }

        for f in &schema.fields {
            match &f.dim {
                Some(d) => add_variable(
                    &mut nc,
                    schema.precision,
                    &f.name,
                    &[TIME, d.as_str()],
                    &f.units,
                    &f.long_name,
                )?,
                None => add_variable(
                    &mut nc,
                    schema.precision,
                    &f.name,
                    &[TIME],
                    &f.units,
                    &f.long_name,
                )?,
            }
        }

        nc.enddef()?;

        for s in &schema.statics {
            put_values(&mut nc, schema.precision, &s.name, &s.values, &[0], &[s.values.len()])?;
        }

        Ok(nc)
    }

    /// Append all pending records.
    pub fn flush(&mut self) -> Result<(), Error> {
        if self.pending.is_empty() {
            return Ok(());
        }

        if self.file.is_none() {
            let path = self.current_path();
            self.file = Some(self.create(&path)?);
            self.files.push(path);
            self.written = 0;
        }

        let records = std::mem::take(&mut self.pending);
        let (start, n) = (self.written, records.len());
        let precision = self.schema.precision;

        let Some(nc) = self.file.as_mut() else {
            return Ok(());
        };

        debug!("appending records {start}..{}", start + n);

        {
            let times = records.iter().map(|r| r.time).collect::<Vec<i32>>();
            let mut v = nc
                .variable_mut(TIME)
                .ok_or_else(|| Error::MissingVariable(TIME.into()))?;
            v.put_values(&times, (&[start], &[n]))?;
        }

        for (i, (f, &len)) in self.schema.fields.iter().zip(&self.lens).enumerate() {
            let values = records
                .iter()
                .flat_map(|r| r.values[i].iter().copied())
                .collect::<Vec<f64>>();

            if f.dim.is_some() {
                put_values(nc, precision, &f.name, &values, &[start, 0], &[n, len])?;
            } else {
                put_values(nc, precision, &f.name, &values, &[start], &[n])?;
            }
        }

        self.written += n;

        if let Some(max) = self.max_file_size {
            let record_bytes = self.lens.iter().sum::<usize>() * precision.bytes() + 4;
            let mb = (self.written * record_bytes) as f64 / 1e6;

            if mb > max {
                info!("{mb:.1} MB written, starting a new file");
                self.file = None;
                self.file_number += 1;
            }
        }

        Ok(())
    }

    /// Write the remaining records and close the file. Returns every file written.
    pub fn finish(mut self) -> Result<Vec<PathBuf>, Error> {
        self.flush()?;
        self.file = None;
        Ok(std::mem::take(&mut self.files))
    }
}

impl Drop for RecordWriter {
    fn drop(&mut self) {
        if !self.pending.is_empty() {
            if let Err(e) = self.flush() {
                error!("{} records were not written: {e}", self.pending.len());
            }
        }
    }
}

fn add_variable(
    nc: &mut netcdf::FileMut,
    precision: Precision,
    name: &str,
    dims: &[&str],
    units: &str,
    long_name: &str,
) -> Result<(), Error> {
    let mut v = match precision {
        Precision::Single => nc.add_variable::<f32>(name, dims)?,
        Precision::Double => nc.add_variable::<f64>(name, dims)?,
    };
    v.put_attribute("units", units)?;
    v.put_attribute("long_name", long_name)?;

    Ok(())
}

fn put_values<const N: usize>(
    nc: &mut netcdf::FileMut,
    precision: Precision,
    name: &str,
    values: &[f64],
    start: &[usize; N],
    count: &[usize; N],
) -> Result<(), Error> {
    let mut v = nc
        .variable_mut(name)
        .ok_or_else(|| Error::MissingVariable(name.into()))?;

    match precision {
        Precision::Single => {
            let values = values.iter().map(|&v| v as f32).collect::<Vec<f32>>();
            v.put_values(&values, (start, count))?;
        }
        Precision::Double => v.put_values(values, (start, count))?,
    }

    Ok(())
}
