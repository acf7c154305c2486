// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Service modules for staging, cleanup and toolkit orchestration.

pub mod cleanup;
pub mod orchestrator;
pub mod staging;

pub use cleanup::CleanupQueue;
pub use orchestrator::parse_staged;
pub use staging::{TempStorage, DEFAULT_FILENAME};
