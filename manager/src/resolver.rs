use crate::config::{ManagerConfig, VersionSelector};
use crate::version::AppVersion;
use crate::ManagerError;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Returns the text after the last `-` of a directory name such as
/// `bedrock-server-1.20.41.02`. Names without a `-`, or starting with one,
/// carry no version.
pub fn version_suffix(name: &str) -> Option<&str> {
  match name.rfind('-') {
    Some(index) if index > 0 => Some(&name[index + 1..]),
    _ => None,
  }
}

/// Picks the app directory name to run out of `names`.
///
/// With [`VersionSelector::Current`] the highest version wins. Among equal
/// versions the first one seen is kept, so for directory scans the winner of
/// a tie depends on the order the filesystem lists entries in.
/// With [`VersionSelector::Exact`] the first name whose suffix matches is
/// returned without looking further.
pub fn select_app<'a>(
  names: impl IntoIterator<Item = &'a str>,
  selector: VersionSelector<'_>,
) -> Option<&'a str> {
  let mut highest: Option<(AppVersion, &'a str)> = None;

  for name in names {
    let Some(suffix) = version_suffix(name) else {
      debug!(name, "skipping directory without a version suffix");
      continue;
    };

    match selector {
      VersionSelector::Exact(wanted) => {
        if suffix == wanted {
          return Some(name);
        }
      }
      VersionSelector::Current => {
        let version = match suffix.parse::<AppVersion>() {
          Ok(version) => version,
          Err(error) => {
            warn!(name, %error, "skipping directory with an unparseable version");
            continue;
          }
        };
        if highest.as_ref().map_or(true, |(best, _)| *best < version) {
          highest = Some((version, name));
        }
      }
    }
  }

  highest.map(|(_, name)| name)
}

/// Scans the immediate subdirectories of the app base path and returns the
/// one to run, or `None` when the base path is missing or nothing matches.
pub fn find_app(config: &ManagerConfig) -> Result<Option<PathBuf>, ManagerError> {
  let base = &config.app_base_path;
  if !base.is_dir() {
    debug!(base = %base.display(), "app base path is not a directory");
    return Ok(None);
  }

  let mut names = Vec::new();
  for entry in fs::read_dir(base).map_err(ManagerError::io(base))? {
    let entry = entry.map_err(ManagerError::io(base))?;
    if !entry.path().is_dir() {
      continue;
    }
    match entry.file_name().into_string() {
      Ok(name) => names.push(name),
      Err(name) => debug!(?name, "skipping directory with a non UTF-8 name"),
    }
  }

  let selected = select_app(names.iter().map(String::as_str), config.version_selector());
  Ok(selected.map(|name| base.join(name)))
}

#[cfg(test)]
mod tests {
  use super::*;

  const INSTALLED: [&str; 3] = ["srv-1.2.0", "srv-1.10.0", "srv-1.3.0"];

  #[test]
  fn suffix_is_text_after_last_hyphen() {
    assert_eq!(version_suffix("bedrock-server-1.20.41.02"), Some("1.20.41.02"));
    assert_eq!(version_suffix("srv-"), Some(""));
    assert_eq!(version_suffix("serverdata"), None);
    assert_eq!(version_suffix("-1.0.0"), None);
  }

  #[test]
  fn current_selects_numerically_highest() {
    assert_eq!(select_app(INSTALLED, VersionSelector::Current), Some("srv-1.10.0"));
  }

  #[test]
  fn exact_selects_matching_suffix() {
    assert_eq!(select_app(INSTALLED, VersionSelector::Exact("1.3.0")), Some("srv-1.3.0"));
    assert_eq!(select_app(["srv-2.0.0"], VersionSelector::Exact("1.3.0")), None);
  }

  #[test]
  fn exact_stops_at_first_match() {
    let names = ["a-1.0", "b-1.0"];
    assert_eq!(select_app(names, VersionSelector::Exact("1.0")), Some("a-1.0"));
  }

  #[test]
  fn skips_names_without_usable_hyphen() {
    let names = ["serverdata", "-9.9.9", "srv-1.0.0"];
    assert_eq!(select_app(names, VersionSelector::Current), Some("srv-1.0.0"));
    assert_eq!(select_app(["serverdata", "-9.9.9"], VersionSelector::Current), None);
    assert_eq!(select_app(["-1.0"], VersionSelector::Exact("1.0")), None);
  }

  #[test]
  fn current_skips_unparseable_versions() {
    let names = ["srv-backup", "srv-1.0.0", "srv-"];
    assert_eq!(select_app(names, VersionSelector::Current), Some("srv-1.0.0"));
  }

  #[test]
  fn equal_versions_keep_first_seen() {
    let names = ["old-1.0.0", "new-1.0.0"];
    assert_eq!(select_app(names, VersionSelector::Current), Some("old-1.0.0"));
  }

  #[test]
  fn current_result_does_not_depend_on_order() {
    let mut names = INSTALLED;
    names.reverse();
    assert_eq!(select_app(names, VersionSelector::Current), Some("srv-1.10.0"));
  }
}
