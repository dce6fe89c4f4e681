//
//  repo-aggregator
//  config/file.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Configuration File I/O Module
//!
//! Low-level reading of the optional TOML configuration file. Parsing and
//! layering happen in [`Config`](super::Config).
//!
//! ## Notes
//!
//! - All functions accept `&Path` to support both `Path` and `PathBuf`
//! - Read errors keep the offending path for the error message

use std::path::Path;

use super::ConfigError;

/// Reads the contents of a configuration file.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] if the file does not exist or cannot be read.
pub fn read_config_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Checks whether a configuration file exists at `path`.
pub fn config_exists(path: &Path) -> bool {
    path.is_file()
}
