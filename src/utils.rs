use anyhow::{Context, Error, Result};
use howlong::ProcessDuration;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{prelude::*, BufReader},
    path::Path,
};
use tracing_subscriber::EnvFilter;

// input format: one item per line
// leading and trailing whitespace is stripped, empty lines are skipped
pub fn load_items_from_file(path: &Path) -> Result<Vec<String>> {
    let mut reader = BufReader::new(
        File::open(path).with_context(|| format!("failed to open {}", path.display()))?,
    );
    let mut buf = String::new();
    reader
        .read_to_string(&mut buf)
        .with_context(|| format!("failed to read {}", path.display()))?;
    Ok(load_items_from_str(&buf))
}

pub fn load_items_from_str(input: &str) -> Vec<String> {
    input
        .lines()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .map(|line| line.to_owned())
        .collect()
}

pub fn init_tracing_subscriber(directives: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(directives.to_string()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(Error::msg)
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct Time {
    real: u64,
    user: u64,
    sys: u64,
}

impl From<ProcessDuration> for Time {
    fn from(p_duration: ProcessDuration) -> Self {
        Self {
            real: p_duration.real.as_micros() as u64,
            user: p_duration.user.as_micros() as u64,
            sys: p_duration.system.as_micros() as u64,
        }
    }
}
