#![allow(dead_code)]

use bedrock_manager::process::SERVER_EXECUTABLE;
use bedrock_manager::properties::SERVER_PROPERTIES;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const PROPERTIES: &str = "server-name=Dedicated Server\ngamemode=survival\ndifficulty=easy\nlevel-name=Bedrock level\n";

/// Temporary root holding an empty `servers` app base path.
pub fn setup_test_env() -> (TempDir, PathBuf) {
  let tmp = tempfile::tempdir().unwrap();
  let base = tmp.path().join("servers");
  fs::create_dir_all(&base).unwrap();
  (tmp, base)
}

/// Creates `<base>/<name>` with a `server.properties` and, when `script` is
/// given, a server executable running that shell script.
pub fn install_server(base: &Path, name: &str, script: Option<&str>) -> PathBuf {
  let app_dir = base.join(name);
  fs::create_dir_all(&app_dir).unwrap();
  fs::write(app_dir.join(SERVER_PROPERTIES), PROPERTIES).unwrap();
  if let Some(script) = script {
    write_executable(&app_dir, script);
  }
  app_dir
}

pub fn write_executable(app_dir: &Path, script: &str) {
  let path = app_dir.join(SERVER_EXECUTABLE);
  fs::write(&path, format!("#!/bin/sh\n{script}\n")).unwrap();
  #[cfg(unix)]
  {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
  }
}

/// Writes a manager config next to `base` and returns its path.
pub fn write_config(base: &Path, version: &str, archive_flag: &str) -> PathBuf {
  let path = base.parent().unwrap().join("BedrockManager.cfg");
  let archive = base.parent().unwrap().join("archive");
  fs::write(
    &path,
    format!(
      "{}\n{}\n{version}\n{archive_flag}\ncreative\nhard\n",
      base.display(),
      archive.display()
    ),
  )
  .unwrap();
  path
}
