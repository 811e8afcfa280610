use std::fmt;

use log::debug;
use ndarray::{ArrayD, IxDyn};
use netcdf::types::{FloatType, IntType, NcVariableType};

use super::AttrValue;
use crate::extent::Extents;
use crate::plot;
use crate::Error;

/// A named variable in a [`Container`](super::Container).
///
/// Nothing is read until [`Variable::slice`] or [`Variable::values`] is called, and every call
/// reads from the file again.
pub struct Variable<'c> {
    inner: netcdf::Variable<'c>,
}

/// Read `$t` values and widen them to `f64`.
macro_rules! get_as_f64 {
    ($var: expr, $extents: expr, $t: ty) => {
        $var.get_values::<$t, _>($extents)?
            .into_iter()
            .map(|v| v as f64)
            .collect::<Vec<f64>>()
    };
}

pub(crate) fn type_name(t: &NcVariableType) -> &'static str {
    match t {
        NcVariableType::Float(FloatType::F32) => "float32",
        NcVariableType::Float(FloatType::F64) => "float64",
        NcVariableType::Int(IntType::I8) => "int8",
        NcVariableType::Int(IntType::I16) => "int16",
        NcVariableType::Int(IntType::I32) => "int32",
        NcVariableType::Int(IntType::I64) => "int64",
        NcVariableType::Int(IntType::U8) => "uint8",
        NcVariableType::Int(IntType::U16) => "uint16",
        NcVariableType::Int(IntType::U32) => "uint32",
        NcVariableType::Int(IntType::U64) => "uint64",
        _ => "non-numeric",
    }
}

impl<'c> Variable<'c> {
    pub(crate) fn new(inner: netcdf::Variable<'c>) -> Variable<'c> {
        Variable { inner }
    }

    pub fn name(&self) -> String {
        self.inner.name()
    }

    pub fn dimension_names(&self) -> Vec<String> {
        self.inner.dimensions().iter().map(|d| d.name()).collect()
    }

    pub fn shape(&self) -> Vec<usize> {
        self.inner.dimensions().iter().map(|d| d.len()).collect()
    }

    /// Number of elements.
    pub fn size(&self) -> usize {
        self.shape().iter().product()
    }

    pub fn type_name(&self) -> &'static str {
        type_name(&self.inner.vartype())
    }

    /// Value of attribute `name`.
    pub fn attribute(&self, name: &str) -> Result<AttrValue, Error> {
        let attr = self
            .inner
            .attribute(name)
            .ok_or_else(|| Error::MissingAttribute {
                variable: self.name(),
                attribute: name.to_string(),
            })?;

        Ok(attr.value()?.into())
    }

    pub fn attribute_names(&self) -> Vec<String> {
        self.inner
            .attributes()
            .map(|a| a.name().to_string())
            .collect()
    }

    /// Value of a text attribute.
    pub fn text_attribute(&self, name: &str) -> Result<String, Error> {
        match self.attribute(name)? {
            AttrValue::Text(s) => Ok(s),
            v => Err(Error::Attribute(format!(
                "attribute `{name}` of `{}` is not text: {v}",
                self.name()
            ))),
        }
    }

    pub fn units(&self) -> Result<String, Error> {
        self.text_attribute("units")
    }

    pub fn long_name(&self) -> Result<String, Error> {
        self.text_attribute("long_name")
    }

    /// Axis label from `long_name` and `units`.
    pub fn label(&self) -> Result<String, Error> {
        Ok(plot::label(&self.long_name()?, &self.units()?))
    }

    /// Read a hyperslab as `f64`. Indexed dimensions are dropped from the returned array.
    pub fn slice<E>(&self, extents: E) -> Result<ArrayD<f64>, Error>
    where
        E: TryInto<Extents>,
        E::Error: Into<Error>,
    {
        let extents: Extents = extents.try_into().map_err(Into::into)?;
        let sel = extents.resolve(&self.shape())?;

        debug!(
            "reading {}: start: {:?}, count: {:?}",
            self.name(),
            sel.start,
            sel.count
        );

        let e = (sel.start.as_slice(), sel.count.as_slice());
        let v = &self.inner;

        let values = match v.vartype() {
            NcVariableType::Float(FloatType::F64) => v.get_values::<f64, _>(e)?,
            NcVariableType::Float(FloatType::F32) => get_as_f64!(v, e, f32),
            NcVariableType::Int(IntType::I8) => get_as_f64!(v, e, i8),
            NcVariableType::Int(IntType::I16) => get_as_f64!(v, e, i16),
            NcVariableType::Int(IntType::I32) => get_as_f64!(v, e, i32),
            NcVariableType::Int(IntType::I64) => get_as_f64!(v, e, i64),
            NcVariableType::Int(IntType::U8) => get_as_f64!(v, e, u8),
            NcVariableType::Int(IntType::U16) => get_as_f64!(v, e, u16),
            NcVariableType::Int(IntType::U32) => get_as_f64!(v, e, u32),
            NcVariableType::Int(IntType::U64) => get_as_f64!(v, e, u64),
            t => {
                return Err(Error::Value(format!(
                    "variable `{}` is not numeric ({})",
                    self.name(),
                    type_name(&t)
                )))
            }
        };

        Ok(ArrayD::from_shape_vec(IxDyn(&sel.shape), values)?)
    }

    /// Read the whole variable.
    pub fn values(&self) -> Result<ArrayD<f64>, Error> {
        self.slice(..)
    }
}

impl fmt::Display for Variable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} {}({})",
            self.type_name(),
            self.name(),
            self.dimension_names().join(", ")
        )?;

        for a in self.inner.attributes() {
            match a.value() {
                Ok(v) => writeln!(f, "    {}: {}", a.name(), AttrValue::from(v))?,
                Err(e) => writeln!(f, "    {}: <unreadable: {e}>", a.name())?,
            }
        }

        let shape = self
            .shape()
            .iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "shape: ({shape})")
    }
}
