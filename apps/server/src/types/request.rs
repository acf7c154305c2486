// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Request types for the API.

use crate::error::ApiError;
use osm_toolkit::ObjectType;

/// Query parameters of `POST /parse`.
///
/// `object_types` may repeat (`?object_types=spaces&object_types=surfaces`),
/// so the query is read as raw pairs rather than a struct.
#[derive(Debug, Clone, Default)]
pub struct ParseQuery {
    pub object_types: Vec<String>,
}

impl From<Vec<(String, String)>> for ParseQuery {
    fn from(pairs: Vec<(String, String)>) -> Self {
        let object_types = pairs
            .into_iter()
            .filter(|(key, _)| key == "object_types")
            .map(|(_, value)| value)
            .filter(|value| !value.trim().is_empty())
            .collect();
        Self { object_types }
    }
}

/// Validated set of categories to extract, iterated in [`ObjectType::ALL`] order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjectTypeSelection {
    selected: [bool; 3],
}

impl ObjectTypeSelection {
    pub fn all() -> Self {
        Self {
            selected: [true; 3],
        }
    }

    /// Resolve requested names. Nothing requested selects everything; any
    /// unknown name rejects the whole selection.
    pub fn resolve(requested: &[String]) -> Result<Self, ApiError> {
        if requested.is_empty() {
            return Ok(Self::all());
        }

        let mut selected = [false; 3];
        let mut invalid = Vec::new();
        for name in requested {
            match name.parse::<ObjectType>() {
                Ok(object_type) => selected[object_type.index()] = true,
                Err(_) => invalid.push(name.clone()),
            }
        }

        if !invalid.is_empty() {
            return Err(ApiError::InvalidObjectTypes { invalid });
        }
        Ok(Self { selected })
    }

    pub fn contains(&self, object_type: ObjectType) -> bool {
        self.selected[object_type.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = ObjectType> + '_ {
        ObjectType::ALL.into_iter().filter(|t| self.contains(*t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_empty_selects_all() {
        let selection = ObjectTypeSelection::resolve(&[]).unwrap();
        assert_eq!(selection, ObjectTypeSelection::all());
        assert_eq!(selection.iter().collect::<Vec<_>>(), ObjectType::ALL.to_vec());
    }

    #[test]
    fn test_selection_uses_fixed_order_and_dedupes() {
        let selection =
            ObjectTypeSelection::resolve(&names(&["subsurfaces", "spaces", "subsurfaces"])).unwrap();
        assert_eq!(
            selection.iter().collect::<Vec<_>>(),
            vec![ObjectType::Spaces, ObjectType::Subsurfaces]
        );
        assert!(!selection.contains(ObjectType::Surfaces));
    }

    #[test]
    fn test_unknown_names_reject_selection() {
        let err = ObjectTypeSelection::resolve(&names(&["spaces", "walls", "roofs"])).unwrap_err();
        match err {
            ApiError::InvalidObjectTypes { invalid } => {
                assert_eq!(invalid, names(&["walls", "roofs"]));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_query_pairs() {
        let query = ParseQuery::from(vec![
            ("object_types".to_string(), "spaces".to_string()),
            ("other".to_string(), "ignored".to_string()),
            ("object_types".to_string(), "".to_string()),
            ("object_types".to_string(), "surfaces".to_string()),
        ]);
        assert_eq!(query.object_types, names(&["spaces", "surfaces"]));
        assert!(ParseQuery::from(Vec::new()).object_types.is_empty());
    }
}
