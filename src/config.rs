use crate::game::constants::{DEFAULT_GRID_HEIGHT, DEFAULT_GRID_WIDTH, DEFAULT_PORT};
use crate::game::geometry::GridSize;
use anyhow::{bail, Context};
use std::env;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerConfig {
  pub port: u16,
  pub grid: GridSize,
}

impl ServerConfig {
  pub fn from_env() -> anyhow::Result<Self> {
    Self::from_lookup(|key| env::var(key).ok())
  }

  pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
    let port: u16 = lookup("PORT")
      .and_then(|value| value.trim().parse().ok())
      .unwrap_or(DEFAULT_PORT);
    let width = grid_dimension(&lookup, "GRID_WIDTH", DEFAULT_GRID_WIDTH)?;
    let height = grid_dimension(&lookup, "GRID_HEIGHT", DEFAULT_GRID_HEIGHT)?;
    Ok(Self {
      port,
      grid: GridSize::new(width, height),
    })
  }
}

fn grid_dimension(
  lookup: &impl Fn(&str) -> Option<String>,
  key: &str,
  default: i32,
) -> anyhow::Result<i32> {
  let Some(raw) = lookup(key) else { return Ok(default) };
  let value: i32 = raw
    .trim()
    .parse()
    .with_context(|| format!("{key} must be an integer, got {raw:?}"))?;
  if value <= 0 {
    bail!("{key} must be positive, got {value}");
  }
  Ok(value)
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::collections::HashMap;

  fn config_from(pairs: &[(&str, &str)]) -> anyhow::Result<ServerConfig> {
    let vars: HashMap<String, String> = pairs
      .iter()
      .map(|(key, value)| (key.to_string(), value.to_string()))
      .collect();
    ServerConfig::from_lookup(|key| vars.get(key).cloned())
  }

  #[test]
  fn defaults_apply_when_unset() {
    let config = config_from(&[]).unwrap();
    assert_eq!(config.port, DEFAULT_PORT);
    assert_eq!(config.grid, GridSize::new(40, 40));
  }

  #[test]
  fn grid_dimensions_are_configurable() {
    let config = config_from(&[("GRID_WIDTH", "12"), ("GRID_HEIGHT", " 30 "), ("PORT", "9000")]).unwrap();
    assert_eq!(config.port, 9000);
    assert_eq!(config.grid.width(), 12);
    assert_eq!(config.grid.height(), 30);
  }

  #[test]
  fn unparsable_port_falls_back_to_default() {
    let config = config_from(&[("PORT", "http")]).unwrap();
    assert_eq!(config.port, DEFAULT_PORT);
  }

  #[test]
  fn non_positive_or_invalid_grid_is_rejected() {
    assert!(config_from(&[("GRID_WIDTH", "0")]).is_err());
    assert!(config_from(&[("GRID_HEIGHT", "-4")]).is_err());
    let error = config_from(&[("GRID_WIDTH", "wide")]).unwrap_err();
    assert!(error.to_string().contains("GRID_WIDTH"));
  }
}
