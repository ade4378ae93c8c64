//! Command-line options and profile loading.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use skyraid_core::enums::Difficulty;
use skyraid_core::error::ProfileError;
use skyraid_core::profile::DifficultyProfile;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read profile {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse profile {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid profile: {0}")]
    Invalid(#[from] ProfileError),
    #[error("{0}")]
    Usage(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct CliOptions {
    pub difficulty: Difficulty,
    pub seed: u64,
    pub player: String,
    pub scores_dir: PathBuf,
    /// JSON profile that replaces the built-in preset.
    pub profile_path: Option<PathBuf>,
    pub max_ticks: Option<u64>,
    /// Step as fast as possible instead of at the tick rate.
    pub unthrottled: bool,
    pub help: bool,
}

impl Default for CliOptions {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Normal,
            seed: 42,
            player: "player".to_string(),
            scores_dir: PathBuf::from("scores"),
            profile_path: None,
            max_ticks: None,
            unthrottled: false,
            help: false,
        }
    }
}

impl CliOptions {
    /// The profile file if one was given, otherwise the preset.
    pub fn resolve_profile(&self) -> Result<DifficultyProfile, ConfigError> {
        match &self.profile_path {
            Some(path) => load_profile(path),
            None => Ok(DifficultyProfile::preset(self.difficulty)),
        }
    }
}

/// Parse arguments (without the program name).
pub fn parse_args(args: &[String]) -> Result<CliOptions, ConfigError> {
    let mut options = CliOptions::default();

    let mut i = 0;
    while i < args.len() {
        let flag = args[i].as_str();
        match flag {
            "--help" | "-h" => options.help = true,
            "--unthrottled" => options.unthrottled = true,
            "--difficulty" | "--seed" | "--player" | "--scores-dir" | "--profile"
            | "--max-ticks" => {
                if i + 1 >= args.len() {
                    return Err(ConfigError::Usage(format!("{flag} needs a value")));
                }
                let value = args[i + 1].as_str();
                apply_value(&mut options, flag, value)?;
                i += 1;
            }
            other => return Err(ConfigError::Usage(format!("Unknown argument: {other}"))),
        }
        i += 1;
    }

    Ok(options)
}

fn apply_value(options: &mut CliOptions, flag: &str, value: &str) -> Result<(), ConfigError> {
    match flag {
        "--difficulty" => {
            options.difficulty = Difficulty::from_label(value).ok_or_else(|| {
                ConfigError::Usage(format!(
                    "Unknown difficulty: {value} (expected easy, normal or hard)"
                ))
            })?;
        }
        "--seed" => options.seed = parse_number(flag, value)?,
        "--player" => options.player = value.to_string(),
        "--scores-dir" => options.scores_dir = PathBuf::from(value),
        "--profile" => options.profile_path = Some(PathBuf::from(value)),
        "--max-ticks" => options.max_ticks = Some(parse_number(flag, value)?),
        _ => {}
    }
    Ok(())
}

fn parse_number(flag: &str, value: &str) -> Result<u64, ConfigError> {
    value
        .parse()
        .map_err(|_| ConfigError::Usage(format!("{flag} expects a non-negative integer, got {value}")))
}

/// Read a JSON profile and check it.
pub fn load_profile(path: &Path) -> Result<DifficultyProfile, ConfigError> {
    let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let profile: DifficultyProfile =
        serde_json::from_str(&json).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    profile.validate()?;
    Ok(profile)
}
