use std::fmt;

use netcdf::AttributeValue;

/// Value of a container or variable attribute. Numbers are widened to `f64`.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    Text(String),
    Texts(Vec<String>),
    Number(f64),
    Numbers(Vec<f64>),
}

impl AttrValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            AttrValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            AttrValue::Number(n) => Some(*n),
            _ => None,
        }
    }
}

fn widen<T: Into<f64>>(v: Vec<T>) -> AttrValue {
    AttrValue::Numbers(v.into_iter().map(Into::into).collect())
}

impl From<AttributeValue> for AttrValue {
    fn from(v: AttributeValue) -> Self {
        use AttributeValue::*;

        match v {
            Str(s) => AttrValue::Text(s),
            Strs(s) => AttrValue::Texts(s),
            Uchar(n) => AttrValue::Number(n.into()),
            Schar(n) => AttrValue::Number(n.into()),
            Ushort(n) => AttrValue::Number(n.into()),
            Short(n) => AttrValue::Number(n.into()),
            Uint(n) => AttrValue::Number(n.into()),
            Int(n) => AttrValue::Number(n.into()),
            Ulonglong(n) => AttrValue::Number(n as f64),
            Longlong(n) => AttrValue::Number(n as f64),
            Float(n) => AttrValue::Number(n.into()),
            Double(n) => AttrValue::Number(n),
            Uchars(v) => widen(v),
            Schars(v) => widen(v),
            Ushorts(v) => widen(v),
            Shorts(v) => widen(v),
            Uints(v) => widen(v),
            Ints(v) => widen(v),
            Ulonglongs(v) => AttrValue::Numbers(v.into_iter().map(|n| n as f64).collect()),
            Longlongs(v) => AttrValue::Numbers(v.into_iter().map(|n| n as f64).collect()),
            Floats(v) => widen(v),
            Doubles(v) => AttrValue::Numbers(v),
        }
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Text(s) => write!(f, "{s}"),
            AttrValue::Texts(s) => write!(f, "{s:?}"),
            AttrValue::Number(n) => write!(f, "{n}"),
            AttrValue::Numbers(v) => write!(f, "{v:?}"),
        }
    }
}
