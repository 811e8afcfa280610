//! Read-only access to a NetCDF container.
use std::fmt;
use std::path::{Path, PathBuf};

use log::{debug, info};

mod attr;
mod variable;

pub use attr::AttrValue;
pub use variable::Variable;

use crate::Error;

/// A named dimension and its current length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dimension {
    pub name: String,
    pub len: usize,
    pub unlimited: bool,
}

/// An open container. The file handle is held until the container is dropped or
/// [closed](Container::close).
pub struct Container {
    path: PathBuf,
    file: netcdf::File,
}

impl Container {
    /// Open an existing container for reading.
    pub fn open<P>(path: P) -> Result<Container, Error>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();

        if !path.is_file() {
            return Err(Error::NotFound(path.into()));
        }

        info!("opening {}", path.display());

        let file = netcdf::open(path).map_err(|source| Error::Open {
            path: path.into(),
            source,
        })?;

        Ok(Container {
            path: path.into(),
            file,
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn dimensions(&self) -> Vec<Dimension> {
        self.file
            .dimensions()
            .map(|d| Dimension {
                name: d.name(),
                len: d.len(),
                unlimited: d.is_unlimited(),
            })
            .collect()
    }

    pub fn dimension_len(&self, name: &str) -> Option<usize> {
        self.file.dimension(name).map(|d| d.len())
    }

    pub fn variable_names(&self) -> Vec<String> {
        self.file.variables().map(|v| v.name()).collect()
    }

    /// Look up variable `name`.
    pub fn variable(&self, name: &str) -> Result<Variable<'_>, Error> {
        self.file
            .variable(name)
            .map(Variable::new)
            .ok_or_else(|| Error::MissingVariable(name.to_string()))
    }

    /// Global attributes.
    pub fn attributes(&self) -> Vec<(String, AttrValue)> {
        self.file
            .attributes()
            .filter_map(|a| match a.value() {
                Ok(v) => Some((a.name().to_string(), v.into())),
                Err(e) => {
                    debug!("skipping unreadable attribute {}: {e}", a.name());
                    None
                }
            })
            .collect()
    }

    /// Release the file handle. Arrays already read are unaffected.
    pub fn close(self) {
        debug!("closing {}", self.path.display());
        drop(self.file);
    }
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Container")
            .field("path", &self.path)
            .field("dimensions", &self.dimensions())
            .field("variables", &self.variable_names())
            .finish()
    }
}

impl fmt::Display for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "container: {}", self.path.display())?;

        for (name, value) in self.attributes() {
            writeln!(f, "    {name}: {value}")?;
        }

        let dims = self
            .dimensions()
            .iter()
            .map(|d| {
                if d.unlimited {
                    format!("{}({}, unlimited)", d.name, d.len)
                } else {
                    format!("{}({})", d.name, d.len)
                }
            })
            .collect::<Vec<_>>();
        writeln!(f, "    dimensions(sizes): {}", dims.join(", "))?;

        let vars = self
            .file
            .variables()
            .map(|v| {
                let dims = v
                    .dimensions()
                    .iter()
                    .map(|d| d.name())
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("{} {}({})", variable::type_name(&v.vartype()), v.name(), dims)
            })
            .collect::<Vec<_>>();
        write!(f, "    variables(dimensions): {}", vars.join(", "))
    }
}
