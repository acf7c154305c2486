// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Loader and extractor traits, and the optional capability set built from them.

use crate::error::Result;
use crate::model::{ModelHandle, Record};
use crate::object_type::ObjectType;
use serde::Serialize;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

/// Turns a staged file into a loaded model.
///
/// Implementations block; callers run them off the async executor.
pub trait ModelLoader: Send + Sync {
    fn load(&self, path: &Path) -> Result<ModelHandle>;
}

/// Read-only query for one object category of a loaded model.
///
/// `Ok(None)` means the toolkit produced no result object at all.
pub trait ObjectExtractor: Send + Sync {
    fn extract(&self, model: &ModelHandle) -> Result<Option<Vec<Record>>>;
}

impl<F> ModelLoader for F
where
    F: Fn(&Path) -> Result<ModelHandle> + Send + Sync,
{
    fn load(&self, path: &Path) -> Result<ModelHandle> {
        self(path)
    }
}

impl<F> ObjectExtractor for F
where
    F: Fn(&ModelHandle) -> Result<Option<Vec<Record>>> + Send + Sync,
{
    fn extract(&self, model: &ModelHandle) -> Result<Option<Vec<Record>>> {
        self(model)
    }
}

/// Which collaborators are wired up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Capabilities {
    pub loader: bool,
    pub spaces: bool,
    pub surfaces: bool,
    pub subsurfaces: bool,
}

/// The set of toolkit collaborators available to the service.
///
/// Each one is independently optional. A missing loader makes every parse
/// request fail; a missing extractor only degrades its own category.
#[derive(Clone, Default)]
pub struct Toolkit {
    loader: Option<Arc<dyn ModelLoader>>,
    extractors: [Option<Arc<dyn ObjectExtractor>>; 3],
}

impl Toolkit {
    pub fn with_loader(mut self, loader: impl ModelLoader + 'static) -> Self {
        self.loader = Some(Arc::new(loader));
        self
    }

    pub fn with_extractor(
        mut self,
        object_type: ObjectType,
        extractor: impl ObjectExtractor + 'static,
    ) -> Self {
        self.extractors[object_type.index()] = Some(Arc::new(extractor));
        self
    }

    pub fn loader(&self) -> Option<&Arc<dyn ModelLoader>> {
        self.loader.as_ref()
    }

    pub fn extractor(&self, object_type: ObjectType) -> Option<&Arc<dyn ObjectExtractor>> {
        self.extractors[object_type.index()].as_ref()
    }

    pub fn capabilities(&self) -> Capabilities {
        Capabilities {
            loader: self.loader.is_some(),
            spaces: self.extractor(ObjectType::Spaces).is_some(),
            surfaces: self.extractor(ObjectType::Surfaces).is_some(),
            subsurfaces: self.extractor(ObjectType::Subsurfaces).is_some(),
        }
    }
}

impl fmt::Debug for Toolkit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Toolkit")
            .field("capabilities", &self.capabilities())
            .finish()
    }
}
