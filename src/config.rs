// SPDX-FileCopyrightText: 2025 casewise contributors
// SPDX-License-Identifier: GPL-3.0-or-later
//! Configuration file support for casewise.
//!
//! This module provides functionality for loading and parsing configuration
//! files (`.casewise.toml`) that control the command-line tool.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::case::CaseOperation;

/// The default configuration file name.
pub const CONFIG_FILE_NAME: &str = ".casewise.toml";

/// Configuration for the casewise command-line tool.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Operation applied when none is given on the command line (default:
    /// none).
    pub operation: Option<CaseOperation>,

    /// Replay input through sentence-start capitalization when no operation
    /// is given (default: false).
    pub auto_capitalize: bool,

    /// Glob patterns for files to include (default: empty, meaning all files
    /// must be specified on command line).
    pub include: Vec<String>,

    /// Glob patterns for files to exclude (default: empty).
    pub exclude: Vec<String>,
}

impl Config {
    /// Parse a configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }

    /// Load configuration from a file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        Self::from_toml(&content).map_err(|e| ConfigError::Parse(path.to_path_buf(), e))
    }

    /// Discover and load configuration by searching up the directory tree.
    ///
    /// Starting from `start_dir`, searches for `.casewise.toml` in each parent
    /// directory until the filesystem root is reached. Returns `None` if no
    /// configuration file is found.
    pub fn discover(start_dir: &Path) -> Result<Option<(PathBuf, Self)>, ConfigError> {
        for dir in start_dir.ancestors() {
            let config_path = dir.join(CONFIG_FILE_NAME);
            if config_path.is_file() {
                let config = Self::from_file(&config_path)?;
                return Ok(Some((config_path, config)));
            }
        }
        Ok(None)
    }

    /// Collect files matching the include patterns, excluding those matching
    /// exclude patterns.
    ///
    /// Patterns are relative to `base_dir`. Returns an empty list if no
    /// include patterns are configured.
    pub fn collect_files(&self, base_dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
        use glob::{MatchOptions, Pattern, glob_with};

        if self.include.is_empty() {
            return Ok(Vec::new());
        }

        let options = MatchOptions {
            case_sensitive: true,
            require_literal_separator: false,
            require_literal_leading_dot: false,
        };

        let mut files = Vec::new();
        for pattern in &self.include {
            let full_pattern = base_dir.join(pattern);
            let matches = glob_with(&full_pattern.to_string_lossy(), options)
                .map_err(|e| ConfigError::Glob(pattern.clone(), e))?;
            for entry in matches {
                let path = entry?;
                if path.is_file() {
                    files.push(path);
                }
            }
        }
        files.sort();
        files.dedup();

        let exclude = self
            .exclude
            .iter()
            .map(|p| {
                Pattern::new(&base_dir.join(p).to_string_lossy())
                    .map_err(|e| ConfigError::Glob(p.clone(), e))
            })
            .collect::<Result<Vec<_>, _>>()?;
        files.retain(|path| {
            let path_str = path.to_string_lossy();
            !exclude.iter().any(|pattern| pattern.matches(&path_str))
        });

        Ok(files)
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error reading the configuration file.
    #[error("failed to read {}: {}", .0.display(), .1)]
    Io(PathBuf, #[source] std::io::Error),
    /// Error parsing the TOML configuration.
    #[error("failed to parse {}: {}", .0.display(), .1)]
    Parse(PathBuf, #[source] toml::de::Error),
    /// Error parsing a glob pattern.
    #[error("invalid glob pattern '{0}': {1}")]
    Glob(String, #[source] glob::PatternError),
    /// I/O error during glob iteration.
    #[error("error reading file: {0}")]
    GlobIo(#[from] glob::GlobError),
}
