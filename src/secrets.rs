//! Release secrets from the environment.
//!
//! A `.env` file in the working directory is loaded first. Variables already
//! set in the process environment are never overridden by it.

use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{AppdropError, Result};

const DOTENV_FILE: &str = ".env";

/// Collect `names` through `lookup`, failing on the first unset or empty one.
pub fn load_required<F>(names: &[&str], lookup: F) -> Result<BTreeMap<String, String>>
where
    F: Fn(&str) -> Option<String>,
{
    let mut values = BTreeMap::new();
    for name in names {
        match lookup(name).filter(|value| !value.is_empty()) {
            Some(value) => {
                values.insert((*name).to_string(), value);
            }
            None => {
                return Err(AppdropError::MissingEnv {
                    name: (*name).to_string(),
                });
            }
        }
    }
    Ok(values)
}

/// Load `.env`, then collect `names` from the process environment.
pub fn load_from_process(names: &[&str]) -> Result<BTreeMap<String, String>> {
    load_dotenv();
    load_required(names, |name| std::env::var(name).ok())
}

/// Names among `names` that are unset or empty in the process environment.
pub fn missing_from_process<'a>(names: &[&'a str]) -> Vec<&'a str> {
    load_dotenv();
    names
        .iter()
        .copied()
        .filter(|name| std::env::var(name).unwrap_or_default().is_empty())
        .collect()
}

/// Load `.env` from the working directory, if present.
pub fn load_dotenv() {
    let path = Path::new(DOTENV_FILE);
    if !path.is_file() {
        return;
    }
    match dotenvy::from_path(path) {
        Ok(()) => log::debug!("Loaded environment from {}", path.display()),
        Err(e) => log::warn!("Failed to load {} file: {}", DOTENV_FILE, e),
    }
}
