// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Capabilities backed by an external toolkit executable.
//!
//! The executable speaks a three-command protocol:
//!
//! - `capabilities` prints a JSON array of the names it supports
//!   (`load`, `spaces`, `surfaces`, `subsurfaces`).
//! - `load <path>` exits 0 when the model translates, optionally printing
//!   `{"version": "..."}`.
//! - `extract <type> <path>` prints `null` or a JSON array of objects.
//!
//! A non-zero exit is a failure; its trimmed stderr becomes the message.

use crate::capability::{ModelLoader, ObjectExtractor, Toolkit};
use crate::error::{Error, Result};
use crate::model::{ModelHandle, Record};
use crate::object_type::ObjectType;
use serde::Deserialize;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::Arc;

/// Launcher for the external toolkit executable.
#[derive(Debug, Clone)]
pub struct CommandToolkit {
    program: PathBuf,
    args: Vec<OsString>,
}

#[derive(Debug, Default, Deserialize)]
struct LoadReport {
    version: Option<String>,
}

impl CommandToolkit {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Leading arguments passed before every protocol command
    /// (e.g. a script path when `program` is an interpreter).
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Ask the executable which capabilities it provides.
    pub fn probe(&self) -> Result<Vec<String>> {
        let stdout = self.run(&[OsStr::new("capabilities")])?;
        Ok(serde_json::from_slice(&stdout)?)
    }

    /// Probe once and wire every advertised capability.
    ///
    /// A failed probe yields a toolkit with nothing wired; the service still
    /// starts and reports the missing capabilities per request.
    pub fn into_toolkit(self) -> Toolkit {
        let names = match self.probe() {
            Ok(names) => names,
            Err(e) => {
                tracing::error!(
                    program = %self.program.display(),
                    error = %e,
                    "Toolkit capability probe failed"
                );
                return Toolkit::default();
            }
        };

        let launcher = Arc::new(self);
        let mut toolkit = Toolkit::default();
        for name in names {
            if name == "load" {
                toolkit = toolkit.with_loader(CommandLoader {
                    launcher: launcher.clone(),
                });
                continue;
            }
            match name.parse::<ObjectType>() {
                Ok(object_type) => {
                    toolkit = toolkit.with_extractor(
                        object_type,
                        CommandExtractor {
                            launcher: launcher.clone(),
                            object_type,
                        },
                    );
                }
                Err(_) => {
                    tracing::warn!(capability = %name, "Ignoring unsupported toolkit capability");
                }
            }
        }

        tracing::info!(capabilities = ?toolkit.capabilities(), "Toolkit wired");
        toolkit
    }

    /// Run one protocol command and return its stdout.
    fn run(&self, command: &[&OsStr]) -> Result<Vec<u8>> {
        let output = Command::new(&self.program)
            .args(&self.args)
            .args(command)
            .output()?;

        if !output.status.success() {
            return Err(Error::Command {
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(output.stdout)
    }
}

/// Prefer the toolkit's own stderr over the generic command error.
fn failure_message(err: Error) -> String {
    match err {
        Error::Command { stderr, .. } if !stderr.is_empty() => stderr,
        other => other.to_string(),
    }
}

struct CommandLoader {
    launcher: Arc<CommandToolkit>,
}

impl ModelLoader for CommandLoader {
    fn load(&self, path: &Path) -> Result<ModelHandle> {
        let stdout = self
            .launcher
            .run(&[OsStr::new("load"), path.as_os_str()])
            .map_err(|e| Error::Load(failure_message(e)))?;

        let report = if stdout.iter().all(u8::is_ascii_whitespace) {
            LoadReport::default()
        } else {
            serde_json::from_slice::<LoadReport>(&stdout)
                .map_err(|e| Error::Load(Error::from(e).to_string()))?
        };

        let model = ModelHandle::new(path);
        Ok(match report.version {
            Some(version) => model.with_version(version),
            None => model,
        })
    }
}

struct CommandExtractor {
    launcher: Arc<CommandToolkit>,
    object_type: ObjectType,
}

impl ObjectExtractor for CommandExtractor {
    fn extract(&self, model: &ModelHandle) -> Result<Option<Vec<Record>>> {
        let stdout = self
            .launcher
            .run(&[
                OsStr::new("extract"),
                OsStr::new(self.object_type.as_str()),
                model.source().as_os_str(),
            ])
            .map_err(|e| Error::Extraction(failure_message(e)))?;

        serde_json::from_slice(&stdout).map_err(|e| Error::Extraction(Error::from(e).to_string()))
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::capability::Capabilities;
    use std::fs;
    use tempfile::TempDir;

    const FAKE_TOOLKIT: &str = r#"
case "$1" in
  capabilities)
    echo '["load", "spaces", "surfaces", "walls"]'
    ;;
  load)
    if grep -q BROKEN "$2"; then
      echo "cannot translate model" >&2
      exit 1
    fi
    echo '{"version": "3.7.0"}'
    ;;
  extract)
    case "$2" in
      spaces) echo '[{"name": "Space 1"}, {"name": "Space 2"}]' ;;
      surfaces) echo 'null' ;;
      *) echo "no extractor for $2" >&2; exit 2 ;;
    esac
    ;;
esac
"#;

    /// Interpreted through `sh` so the test never execs a freshly written file.
    fn fake_toolkit(dir: &TempDir, script: &str) -> CommandToolkit {
        let path = dir.path().join("toolkit.sh");
        fs::write(&path, script).unwrap();
        CommandToolkit::new("sh").with_args([path])
    }

    fn model_file(dir: &TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("uploaded_model.osm");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_probe_wires_advertised_capabilities() {
        let dir = TempDir::new().unwrap();
        let toolkit = fake_toolkit(&dir, FAKE_TOOLKIT).into_toolkit();
        let caps = toolkit.capabilities();
        assert!(caps.loader);
        assert!(caps.spaces);
        assert!(caps.surfaces);
        assert!(!caps.subsurfaces);
    }

    #[test]
    fn test_failed_probe_wires_nothing() {
        let dir = TempDir::new().unwrap();
        let toolkit = fake_toolkit(&dir, "echo 'not json'").into_toolkit();
        assert_eq!(toolkit.capabilities(), Capabilities::default());

        let missing = CommandToolkit::new(dir.path().join("does-not-exist")).into_toolkit();
        assert_eq!(missing.capabilities(), Capabilities::default());
    }

    #[test]
    fn test_load_reports_version() {
        let dir = TempDir::new().unwrap();
        let toolkit = fake_toolkit(&dir, FAKE_TOOLKIT).into_toolkit();
        let path = model_file(&dir, "OS:Version,\n  {0}, !- Handle\n  3.7.0;\n");

        let model = toolkit.loader().unwrap().load(&path).unwrap();
        assert_eq!(model.source(), path.as_path());
        assert_eq!(model.version(), Some("3.7.0"));
    }

    #[test]
    fn test_load_failure_carries_stderr() {
        let dir = TempDir::new().unwrap();
        let toolkit = fake_toolkit(&dir, FAKE_TOOLKIT).into_toolkit();
        let path = model_file(&dir, "BROKEN");

        let err = toolkit.loader().unwrap().load(&path).unwrap_err();
        assert!(matches!(err, Error::Load(_)));
        assert_eq!(err.to_string(), "cannot translate model");
    }

    #[test]
    fn test_extract_records_and_null() {
        let dir = TempDir::new().unwrap();
        let toolkit = fake_toolkit(&dir, FAKE_TOOLKIT).into_toolkit();
        let model = ModelHandle::new(model_file(&dir, "OS:Version;"));

        let spaces = toolkit
            .extractor(ObjectType::Spaces)
            .unwrap()
            .extract(&model)
            .unwrap()
            .unwrap();
        assert_eq!(spaces.len(), 2);
        assert_eq!(spaces[0]["name"], "Space 1");

        let surfaces = toolkit
            .extractor(ObjectType::Surfaces)
            .unwrap()
            .extract(&model)
            .unwrap();
        assert!(surfaces.is_none());
    }

    #[test]
    fn test_extract_failure_carries_stderr() {
        let dir = TempDir::new().unwrap();
        let launcher = Arc::new(fake_toolkit(&dir, FAKE_TOOLKIT));
        let extractor = CommandExtractor {
            launcher,
            object_type: ObjectType::Subsurfaces,
        };

        let err = extractor
            .extract(&ModelHandle::new(model_file(&dir, "OS:Version;")))
            .unwrap_err();
        assert!(matches!(err, Error::Extraction(_)));
        assert_eq!(err.to_string(), "no extractor for subsurfaces");
    }
}
