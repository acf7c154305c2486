// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::process::ExitStatus;
use thiserror::Error;

/// Result type for toolkit operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by toolkit collaborators
#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Load(String),

    #[error("{0}")]
    Extraction(String),

    #[error("Unknown object type: {0}")]
    UnknownObjectType(String),

    #[error("Toolkit command failed ({status}): {stderr}")]
    Command { status: ExitStatus, stderr: String },

    #[error("Unreadable toolkit output: {0}")]
    Output(#[from] serde_json::Error),

    #[error("Toolkit I/O error: {0}")]
    Io(#[from] std::io::Error),
}
