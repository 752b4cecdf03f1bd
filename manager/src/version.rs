use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid version \"{version}\": component \"{component}\" is not a non-negative integer")]
pub struct ParseVersionError {
  version: String,
  component: String,
}

/// A dot-separated numeric version such as `1.20.41.02`.
///
/// Ordering compares components left to right and the first difference wins.
/// When one version is a strict prefix of the other the shorter one is lesser,
/// so `1.2 < 1.2.0`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AppVersion(Vec<u64>);

impl AppVersion {
  pub fn components(&self) -> &[u64] {
    &self.0
  }
}

impl FromStr for AppVersion {
  type Err = ParseVersionError;

  fn from_str(version: &str) -> Result<Self, Self::Err> {
    version
      .split('.')
      .map(|component| {
        // u64::from_str would also take a leading '+'
        if component.is_empty() || !component.bytes().all(|b| b.is_ascii_digit()) {
          return Err(component);
        }
        component.parse::<u64>().map_err(|_| component)
      })
      .collect::<Result<Vec<_>, _>>()
      .map(AppVersion)
      .map_err(|component| ParseVersionError {
        version: version.to_string(),
        component: component.to_string(),
      })
  }
}

impl fmt::Display for AppVersion {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let mut components = self.0.iter();
    if let Some(first) = components.next() {
      write!(f, "{first}")?;
    }
    for component in components {
      write!(f, ".{component}")?;
    }
    Ok(())
  }
}
