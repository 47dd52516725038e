use crate::collab::Vfs;
use crate::error::{NavError, Result};
use crate::model::Location;
use std::fs;

/// Resolves locations against the local filesystem. Only existing
/// folders (or links to them) can be browsed.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalVfs;

impl Vfs for LocalVfs {
    fn resolve(&self, location: &Location) -> Result<Location> {
        match fs::metadata(location.path()) {
            Ok(meta) if meta.is_dir() => Ok(location.clone()),
            Ok(_) => Err(NavError::InvalidLocation(format!(
                "{} is not a folder",
                location
            ))),
            Err(e) => Err(NavError::InvalidLocation(format!("{}: {}", location, e))),
        }
    }
}
