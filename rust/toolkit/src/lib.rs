// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # OSM Toolkit
//!
//! Capability seam between the OSM parser service and an external building
//! energy modeling toolkit.
//!
//! The service never interprets OSM content itself. It stages an upload on
//! disk, hands the path to a [`ModelLoader`], and queries the loaded
//! [`ModelHandle`] through one [`ObjectExtractor`] per [`ObjectType`].
//! Every collaborator is optional: a [`Toolkit`] may be missing its loader or
//! any of its extractors, and callers check for that explicitly.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use osm_toolkit::{ModelHandle, ObjectType, Record, Toolkit};
//!
//! let toolkit = Toolkit::default()
//!     .with_loader(|path: &std::path::Path| -> osm_toolkit::Result<ModelHandle> {
//!         Ok(ModelHandle::new(path))
//!     })
//!     .with_extractor(ObjectType::Spaces, |_model: &ModelHandle| -> osm_toolkit::Result<_> {
//!         Ok(Some(vec![Record::new()]))
//!     });
//!
//! assert!(toolkit.loader().is_some());
//! assert!(toolkit.extractor(ObjectType::Surfaces).is_none());
//! ```
//!
//! ## External Executable
//!
//! [`CommandToolkit`] wires capabilities to an executable speaking a small
//! command-line protocol (`capabilities`, `load <path>`,
//! `extract <type> <path>`), probed once at startup.

pub mod capability;
pub mod command;
pub mod error;
pub mod model;
pub mod object_type;

pub use capability::{Capabilities, ModelLoader, ObjectExtractor, Toolkit};
pub use command::CommandToolkit;
pub use error::{Error, Result};
pub use model::{ModelHandle, Record};
pub use object_type::ObjectType;
