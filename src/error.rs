use std::path::PathBuf;

/// Errors raised while reading and checking a container.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The path does not resolve to a file.
    #[error("no such file: {0}")]
    NotFound(PathBuf),

    /// The file exists, but is not a readable container.
    #[error("could not open container {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: netcdf::Error,
    },

    #[error("variable `{0}` not found in container")]
    MissingVariable(String),

    #[error("variable `{variable}` has no attribute `{attribute}`")]
    MissingAttribute { variable: String, attribute: String },

    /// An attribute did not hold the expected value. The message is passed through verbatim.
    #[error("{0}")]
    Attribute(String),

    /// Stored data did not match the expected data. The message is passed through verbatim.
    #[error("{0}")]
    Value(String),

    #[error("invalid extents: {0}")]
    Extents(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    NetCDF(#[from] netcdf::Error),

    #[error(transparent)]
    Shape(#[from] ndarray::ShapeError),
}

impl From<std::convert::Infallible> for Error {
    fn from(e: std::convert::Infallible) -> Self {
        match e {}
    }
}
