use crate::ManagerError;
use std::fmt;
use std::fs;
use std::num::ParseIntError;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

pub const DEFAULT_CONFIG_FILE: &str = "BedrockManager.cfg";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MalformedConfig {
  #[error("line {line} ({field}) is missing")]
  MissingField { line: usize, field: &'static str },
  #[error("line {line} (archive world on quit) must be an integer flag, found \"{value}\"")]
  InvalidFlag {
    line: usize,
    value: String,
    source: ParseIntError,
  },
}

/// Which installed server version to launch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionSelector<'a> {
  /// Highest installed version.
  Current,
  /// Directory whose version suffix equals this string exactly.
  Exact(&'a str),
}

/// Manager settings, stored on disk as one value per line in a fixed order:
///
/// 1. app base path
/// 2. world archive path
/// 3. version to run
/// 4. archive world on quit (`0`/`1`)
/// 5. game mode
/// 6. difficulty
/// 7. world name (optional)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManagerConfig {
  pub app_base_path: PathBuf,
  pub world_archive_path: PathBuf,
  pub version_to_run: String,
  pub archive_world_on_quit: bool,
  pub game_mode: String,
  pub difficulty: String,
  pub world_name: Option<String>,
}

impl Default for ManagerConfig {
  fn default() -> Self {
    Self {
      app_base_path: PathBuf::new(),
      world_archive_path: PathBuf::new(),
      version_to_run: "latest".to_string(),
      archive_world_on_quit: true,
      game_mode: String::new(),
      difficulty: String::new(),
      world_name: None,
    }
  }
}

impl ManagerConfig {
  pub fn load(path: &Path) -> Result<Self, ManagerError> {
    if !path.is_file() {
      return Err(ManagerError::ConfigNotFound(path.to_path_buf()));
    }
    let contents = fs::read_to_string(path).map_err(ManagerError::io(path))?;
    Ok(contents.parse()?)
  }

  pub fn save(&self, path: &Path) -> Result<(), ManagerError> {
    fs::write(path, self.to_string()).map_err(ManagerError::io(path))
  }

  /// Loads the config and writes it straight back, so the file on disk is
  /// always in canonical form (flag as `0`/`1`, LF line endings).
  pub fn load_normalized(path: &Path) -> Result<Self, ManagerError> {
    let config = Self::load(path)?;
    config.save(path)?;
    Ok(config)
  }

  pub fn version_selector(&self) -> VersionSelector<'_> {
    match self.version_to_run.as_str() {
      "current" => VersionSelector::Current,
      exact => VersionSelector::Exact(exact),
    }
  }
}

impl FromStr for ManagerConfig {
  type Err = MalformedConfig;

  fn from_str(contents: &str) -> Result<Self, Self::Err> {
    let mut lines = contents.lines();
    let app_base_path = next_field(&mut lines, 1, "app base path")?;
    let world_archive_path = next_field(&mut lines, 2, "world archive path")?;
    let version_to_run = next_field(&mut lines, 3, "version to run")?;
    let flag = next_field(&mut lines, 4, "archive world on quit")?;
    let archive_world_on_quit = flag
      .trim()
      .parse::<i64>()
      .map_err(|source| MalformedConfig::InvalidFlag {
        line: 4,
        value: flag.to_string(),
        source,
      })?
      != 0;
    let game_mode = next_field(&mut lines, 5, "game mode")?;
    let difficulty = next_field(&mut lines, 6, "difficulty")?;
    let world_name = lines
      .next()
      .filter(|name| !name.is_empty())
      .map(str::to_string);

    Ok(Self {
      app_base_path: PathBuf::from(app_base_path),
      world_archive_path: PathBuf::from(world_archive_path),
      version_to_run: version_to_run.to_string(),
      archive_world_on_quit,
      game_mode: game_mode.to_string(),
      difficulty: difficulty.to_string(),
      world_name,
    })
  }
}

fn next_field<'a>(
  lines: &mut impl Iterator<Item = &'a str>,
  line: usize,
  field: &'static str,
) -> Result<&'a str, MalformedConfig> {
  lines.next().ok_or(MalformedConfig::MissingField { line, field })
}

impl fmt::Display for ManagerConfig {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    writeln!(f, "{}", self.app_base_path.display())?;
    writeln!(f, "{}", self.world_archive_path.display())?;
    writeln!(f, "{}", self.version_to_run)?;
    writeln!(f, "{}", if self.archive_world_on_quit { "1" } else { "0" })?;
    writeln!(f, "{}", self.game_mode)?;
    writeln!(f, "{}", self.difficulty)?;
    if let Some(world_name) = &self.world_name {
      writeln!(f, "{world_name}")?;
    }
    Ok(())
  }
}
