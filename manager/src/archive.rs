use crate::config::ManagerConfig;
use crate::ManagerError;
use std::path::Path;

/// Copies the world out of `app_dir` into the configured archive path.
/// Not implemented yet.
pub fn archive_world(_config: &ManagerConfig, _app_dir: &Path) -> Result<(), ManagerError> {
  Err(ManagerError::NotImplemented("world archiving"))
}
