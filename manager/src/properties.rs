use crate::config::ManagerConfig;
use crate::ManagerError;
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::debug;

pub const SERVER_PROPERTIES: &str = "server.properties";

/// Applies the manager's game mode and difficulty to the text of a
/// `server.properties` file. Every other line, and every line terminator,
/// is kept as is.
pub fn patch_contents(contents: &str, config: &ManagerConfig) -> String {
  let mut patched = String::with_capacity(contents.len());

  for line in contents.split_inclusive('\n') {
    let body = line
      .strip_suffix('\n')
      .map_or(line, |rest| rest.strip_suffix('\r').unwrap_or(rest));
    let ending = &line[body.len()..];

    if body.starts_with("difficulty=") {
      patched.push_str("difficulty=");
      patched.push_str(&config.difficulty);
    } else if body.starts_with("gamemode=") {
      patched.push_str("gamemode=");
      patched.push_str(&config.game_mode);
    } else {
      patched.push_str(body);
    }
    patched.push_str(ending);
  }

  patched
}

/// Rewrites `path` in place. The new contents go to a temporary file next to
/// it first, so a failed write leaves the original untouched.
pub fn patch_file(path: &Path, config: &ManagerConfig) -> Result<(), ManagerError> {
  let contents = fs::read_to_string(path).map_err(ManagerError::io(path))?;
  let permissions = fs::metadata(path).map_err(ManagerError::io(path))?.permissions();
  let patched = patch_contents(&contents, config);

  let dir = match path.parent() {
    Some(parent) if !parent.as_os_str().is_empty() => parent,
    _ => Path::new("."),
  };
  let mut file = NamedTempFile::new_in(dir).map_err(ManagerError::io(dir))?;
  file
    .write_all(patched.as_bytes())
    .map_err(ManagerError::io(file.path()))?;
  fs::set_permissions(file.path(), permissions).map_err(ManagerError::io(file.path()))?;
  file
    .persist(path)
    .map_err(|error| ManagerError::io(path)(error.error))?;

  debug!(path = %path.display(), "patched server properties");
  Ok(())
}
