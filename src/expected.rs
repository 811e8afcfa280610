//! Data the demo files are expected to hold. Only used by the optional data checks and by the
//! fixture writer, never read from disk.
use ndarray::{Array1, Array2, Array3};

/// `0, 1, .., n - 1`
pub fn arange(n: usize) -> Array1<f32> {
    Array1::from_iter((0..n).map(|i| i as f32))
}

/// `start + step * arange(n)`
pub fn coordinates(start: f32, step: f32, n: usize) -> Array1<f32> {
    arange(n) * step + start
}

/// The four dimensional pressure and temperature example.
pub mod pres_temp_4d {
    use super::*;

    pub const NRECS: usize = 20;
    pub const NLEVS: usize = 2;
    pub const NLATS: usize = 6;
    pub const NLONS: usize = 12;

    pub fn latitudes(nlats: usize) -> Array1<f32> {
        coordinates(25., 5., nlats)
    }

    pub fn longitudes(nlons: usize) -> Array1<f32> {
        coordinates(-125., 5., nlons)
    }

    /// `offset + arange(nlevs * nlats * nlons)` in `(nlevs, nlats, nlons)`, row-major.
    fn levels(offset: f32, nlevs: usize, nlats: usize, nlons: usize) -> Array3<f32> {
        Array3::from_shape_fn((nlevs, nlats, nlons), |(k, j, i)| {
            offset + ((k * nlats + j) * nlons + i) as f32
        })
    }

    pub fn pressure(nlevs: usize, nlats: usize, nlons: usize) -> Array3<f32> {
        levels(900., nlevs, nlats, nlons)
    }

    pub fn temperature(nlevs: usize, nlats: usize, nlons: usize) -> Array3<f32> {
        levels(9., nlevs, nlats, nlons)
    }
}

/// The surface pressure and temperature example.
pub mod sfc_pres_temp {
    use super::*;

    pub const NLATS: usize = 6;
    pub const NLONS: usize = 12;

    pub fn latitudes(nlats: usize) -> Array1<f32> {
        coordinates(-25., 5., nlats)
    }

    pub fn longitudes(nlons: usize) -> Array1<f32> {
        coordinates(-125., 5., nlons)
    }

    pub fn pressure(nlats: usize, nlons: usize) -> Array2<f32> {
        Array2::from_shape_fn((nlats, nlons), |(j, i)| 900. + (j * nlons + i) as f32)
    }

    pub fn temperature(nlats: usize, nlons: usize) -> Array2<f32> {
        Array2::from_shape_fn((nlats, nlons), |(j, i)| 9. + 0.25 * (j * nlons + i) as f32)
    }
}
