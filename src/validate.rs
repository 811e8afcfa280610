//! Literal checks of attributes and data against what a demo expects.
use ndarray::ArrayViewD;

use crate::container::Variable;
use crate::Error;

/// Decimal precision used by [`assert_array_almost_equal`] unless told otherwise.
pub const DEFAULT_DECIMAL: i32 = 6;

/// Fail with `message`, verbatim, unless `actual == expected`.
pub fn assert_equal<A, E>(actual: &A, expected: &E, message: &str) -> Result<(), Error>
where
    A: PartialEq<E> + ?Sized,
    E: ?Sized,
{
    if actual == expected {
        Ok(())
    } else {
        Err(Error::Attribute(message.to_string()))
    }
}

/// Check the `units` attribute of `var`. A missing or non-text attribute fails with the same
/// `message` as a mismatch.
pub fn assert_units(var: &Variable, expected: &str, message: &str) -> Result<(), Error> {
    match var.units() {
        Ok(units) => assert_equal(units.as_str(), expected, message),
        Err(e) => {
            log::debug!("{}: {e}", var.name());
            Err(Error::Attribute(message.to_string()))
        }
    }
}

/// Fail with `message` unless the arrays have the same shape and
/// `|desired - actual| < 1.5 * 10^-decimal` everywhere. `NaN`s compare equal to `NaN`s.
pub fn assert_array_almost_equal(
    actual: ArrayViewD<f64>,
    desired: ArrayViewD<f64>,
    decimal: i32,
    message: &str,
) -> Result<(), Error> {
    let tol = 1.5 * 10f64.powi(-decimal);

    let equal = actual.shape() == desired.shape()
        && actual
            .iter()
            .zip(desired.iter())
            .all(|(a, d)| (a.is_nan() && d.is_nan()) || (d - a).abs() < tol);

    if equal {
        Ok(())
    } else {
        Err(Error::Value(message.to_string()))
    }
}
