pub mod archive;
pub mod config;
pub mod process;
pub mod properties;
pub mod resolver;
pub mod version;

use config::{ManagerConfig, MalformedConfig};
use std::path::{Path, PathBuf};
use std::process::ExitStatus;
use thiserror::Error;
use tracing::{info, warn};

/// Exit code for any I/O failure, including failing to write output.
pub const EXIT_IO_ERROR: u8 = 7;

#[derive(Debug, Error)]
pub enum ManagerError {
  #[error("config file \"{}\" not found", .0.display())]
  ConfigNotFound(PathBuf),
  #[error("config file is malformed: {0}")]
  MalformedConfig(#[from] MalformedConfig),
  #[error("no server app folder for version \"{version}\" in \"{}\"", .base.display())]
  AppDirectoryNotFound { base: PathBuf, version: String },
  #[error("{} not found in the app folder \"{}\"", properties::SERVER_PROPERTIES, .0.display())]
  ServerPropertiesNotFound(PathBuf),
  #[error("{} not found in the app folder \"{}\"", process::SERVER_EXECUTABLE, .0.display())]
  ServerExecutableNotFound(PathBuf),
  #[error("I/O error at \"{}\": {source}", .path.display())]
  IoError {
    path: PathBuf,
    source: std::io::Error,
  },
  #[error("{0} is not implemented")]
  NotImplemented(&'static str),
}

impl ManagerError {
  pub(crate) fn io(path: &Path) -> impl FnOnce(std::io::Error) -> ManagerError + '_ {
    move |source| ManagerError::IoError {
      path: path.to_path_buf(),
      source,
    }
  }

  /// Process exit code for this failure. `1` is left for a server that
  /// exited unsuccessfully.
  pub fn exit_code(&self) -> u8 {
    match self {
      ManagerError::ConfigNotFound(_) => 2,
      ManagerError::MalformedConfig(_) => 3,
      ManagerError::AppDirectoryNotFound { .. } => 4,
      ManagerError::ServerPropertiesNotFound(_) => 5,
      ManagerError::ServerExecutableNotFound(_) => 6,
      ManagerError::IoError { .. } => EXIT_IO_ERROR,
      ManagerError::NotImplemented(_) => 8,
    }
  }
}

/// Loads the manager config at `config_path`, patches the selected server's
/// `server.properties`, then runs the server until it exits.
///
/// Stops at the first failure without touching anything further down the line.
#[tokio::main]
pub async fn run_bedrock_server(config_path: &Path) -> Result<ExitStatus, ManagerError> {
  let config = ManagerConfig::load_normalized(config_path)?;
  info!(config = %config_path.display(), version = %config.version_to_run, "config loaded");

  let app_dir = resolver::find_app(&config)?.ok_or_else(|| ManagerError::AppDirectoryNotFound {
    base: config.app_base_path.clone(),
    version: config.version_to_run.clone(),
  })?;
  info!(app_dir = %app_dir.display(), "server app folder found");

  let properties_file = app_dir.join(properties::SERVER_PROPERTIES);
  if !properties_file.is_file() {
    return Err(ManagerError::ServerPropertiesNotFound(app_dir));
  }
  properties::patch_file(&properties_file, &config)?;

  let executable = app_dir.join(process::SERVER_EXECUTABLE);
  if !executable.is_file() {
    return Err(ManagerError::ServerExecutableNotFound(app_dir));
  }
  let status = process::run_server(&executable).await?;

  if config.archive_world_on_quit {
    if let Err(error) = archive::archive_world(&config, &app_dir) {
      warn!(%error, "world was not archived");
    }
  }

  Ok(status)
}

pub fn upgrade() -> Result<(), ManagerError> {
  Err(ManagerError::NotImplemented("upgrade"))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn every_failure_class_has_its_own_exit_code() {
    let errors = [
      ManagerError::ConfigNotFound(PathBuf::new()),
      ManagerError::MalformedConfig(MalformedConfig::MissingField {
        line: 1,
        field: "app base path",
      }),
      ManagerError::AppDirectoryNotFound {
        base: PathBuf::new(),
        version: "current".to_string(),
      },
      ManagerError::ServerPropertiesNotFound(PathBuf::new()),
      ManagerError::ServerExecutableNotFound(PathBuf::new()),
      ManagerError::io(Path::new("x"))(std::io::ErrorKind::NotFound.into()),
      ManagerError::NotImplemented("upgrade"),
    ];
    let mut codes: Vec<u8> = errors.iter().map(ManagerError::exit_code).collect();
    assert!(codes.iter().all(|&code| code > 1));
    codes.sort_unstable();
    codes.dedup();
    assert_eq!(codes.len(), errors.len());
  }

  #[test]
  fn upgrade_is_reported_as_not_implemented() {
    let error = upgrade().unwrap_err();
    assert_eq!(error.to_string(), "upgrade is not implemented");
    assert_eq!(error.exit_code(), 8);
  }
}
