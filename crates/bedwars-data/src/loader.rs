//! File discovery and format-aware deserialization for pack definitions.
//!
//! A data file is found by base name (`pack`, `economy`) and may be written
//! in RON, TOML or JSON; the extension decides the parser.

use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

// ===========================================================================
// Errors
// ===========================================================================

/// Errors that can occur while loading a pack definition.
#[derive(Debug, thiserror::Error)]
pub enum DataLoadError {
    /// A required data file was not found in the given directory.
    #[error("required file '{file}' not found in {dir}")]
    MissingRequired { file: &'static str, dir: PathBuf },

    /// The file has an extension we don't support.
    #[error("unsupported format for file: {file}")]
    UnsupportedFormat { file: PathBuf },

    /// Two files with the same base name but different formats exist.
    #[error("conflicting formats: {a} and {b}")]
    ConflictingFormats { a: PathBuf, b: PathBuf },

    /// A deserialization error occurred.
    #[error("parse error in {file}: {detail}")]
    Parse { file: PathBuf, detail: String },

    /// The economy configuration was rejected.
    #[error("invalid economy configuration in {file}: {source}")]
    Economy {
        file: PathBuf,
        source: bedwars_economy::EconomyConfigError,
    },

    /// The package builder could not be created.
    #[error(transparent)]
    Build(#[from] bedwars_core::BuildError),

    /// An I/O error occurred.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

// ===========================================================================
// Format detection
// ===========================================================================

/// Supported data file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Ron,
    Toml,
    Json,
}

/// Detect the format of a file based on its extension.
pub fn detect_format(path: &Path) -> Result<Format, DataLoadError> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("ron") => Ok(Format::Ron),
        Some("toml") => Ok(Format::Toml),
        Some("json") => Ok(Format::Json),
        _ => Err(DataLoadError::UnsupportedFormat {
            file: path.to_path_buf(),
        }),
    }
}

// ===========================================================================
// File discovery
// ===========================================================================

/// Scan a directory for a data file with the given base name.
///
/// Looks for `{base_name}.ron`, `{base_name}.toml`, and `{base_name}.json`.
/// Returns `Ok(None)` if none exists and `Err(ConflictingFormats)` if more
/// than one does.
pub fn find_data_file(dir: &Path, base_name: &str) -> Result<Option<PathBuf>, DataLoadError> {
    let mut found: Option<PathBuf> = None;

    for ext in ["ron", "toml", "json"] {
        let candidate = dir.join(format!("{base_name}.{ext}"));
        if candidate.exists() {
            if let Some(existing) = found {
                return Err(DataLoadError::ConflictingFormats {
                    a: existing,
                    b: candidate,
                });
            }
            found = Some(candidate);
        }
    }

    Ok(found)
}

/// Like [`find_data_file`], but a missing file is an error.
pub fn require_data_file(dir: &Path, base_name: &'static str) -> Result<PathBuf, DataLoadError> {
    find_data_file(dir, base_name)?.ok_or_else(|| DataLoadError::MissingRequired {
        file: base_name,
        dir: dir.to_path_buf(),
    })
}

// ===========================================================================
// Deserialization
// ===========================================================================

/// Read a file and deserialize it according to its format.
pub fn deserialize_file<T: DeserializeOwned>(path: &Path) -> Result<T, DataLoadError> {
    let format = detect_format(path)?;
    let content = std::fs::read_to_string(path)?;
    let parse_error = |detail: String| DataLoadError::Parse {
        file: path.to_path_buf(),
        detail,
    };

    match format {
        Format::Ron => ron::from_str(&content).map_err(|e| parse_error(e.to_string())),
        Format::Json => serde_json::from_str(&content).map_err(|e| parse_error(e.to_string())),
        Format::Toml => toml::from_str(&content).map_err(|e| parse_error(e.to_string())),
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::PackData;
    use bedwars_core::test_utils::TempDir;
    use std::fs;

    // -----------------------------------------------------------------------
    // detect_format
    // -----------------------------------------------------------------------

    #[test]
    fn detect_format_by_extension() {
        assert_eq!(detect_format(Path::new("pack.ron")).unwrap(), Format::Ron);
        assert_eq!(detect_format(Path::new("pack.toml")).unwrap(), Format::Toml);
        assert_eq!(detect_format(Path::new("pack.json")).unwrap(), Format::Json);
    }

    #[test]
    fn detect_format_unsupported() {
        for name in ["pack.yaml", "pack"] {
            assert!(matches!(
                detect_format(Path::new(name)),
                Err(DataLoadError::UnsupportedFormat { .. })
            ));
        }
    }

    // -----------------------------------------------------------------------
    // find_data_file / require_data_file
    // -----------------------------------------------------------------------

    #[test]
    fn find_data_file_found() {
        let dir = TempDir::new("find_found");
        fs::write(dir.path().join("economy.toml"), "").unwrap();

        let result = find_data_file(dir.path(), "economy").unwrap();
        assert_eq!(result, Some(dir.path().join("economy.toml")));
    }

    #[test]
    fn find_data_file_missing() {
        let dir = TempDir::new("find_missing");
        assert_eq!(find_data_file(dir.path(), "economy").unwrap(), None);
    }

    #[test]
    fn find_data_file_conflict() {
        let dir = TempDir::new("find_conflict");
        fs::write(dir.path().join("pack.ron"), "()").unwrap();
        fs::write(dir.path().join("pack.json"), "{}").unwrap();

        assert!(matches!(
            find_data_file(dir.path(), "pack"),
            Err(DataLoadError::ConflictingFormats { .. })
        ));
    }

    #[test]
    fn require_data_file_missing() {
        let dir = TempDir::new("require_missing");
        match require_data_file(dir.path(), "pack") {
            Err(DataLoadError::MissingRequired { file, .. }) => assert_eq!(file, "pack"),
            other => panic!("expected MissingRequired, got {other:?}"),
        }
    }

    // -----------------------------------------------------------------------
    // deserialize_file
    // -----------------------------------------------------------------------

    #[test]
    fn deserialize_each_format() {
        let dir = TempDir::new("deser_formats");
        let cases = [
            ("a.ron", r#"(display_name: "Bed Wars", namespace: "bedwars")"#),
            ("b.json", r#"{"display_name": "Bed Wars", "namespace": "bedwars"}"#),
            ("c.toml", "display_name = \"Bed Wars\"\nnamespace = \"bedwars\"\n"),
        ];
        for (name, content) in cases {
            let path = dir.path().join(name);
            fs::write(&path, content).unwrap();
            let pack: PackData = deserialize_file(&path).unwrap();
            assert_eq!(pack.display_name, "Bed Wars", "{name}");
            assert_eq!(pack.namespace, "bedwars", "{name}");
        }
    }

    #[test]
    fn deserialize_file_parse_error() {
        let dir = TempDir::new("deser_parse_err");
        let path = dir.path().join("pack.ron");
        fs::write(&path, "this is not valid RON {{{").unwrap();

        let result: Result<PackData, _> = deserialize_file(&path);
        match result {
            Err(DataLoadError::Parse { file, .. }) => assert_eq!(file, path),
            other => panic!("expected Parse, got {other:?}"),
        }
    }

    // -----------------------------------------------------------------------
    // Error display messages
    // -----------------------------------------------------------------------

    #[test]
    fn error_display_messages() {
        let e = DataLoadError::MissingRequired {
            file: "pack",
            dir: PathBuf::from("/data"),
        };
        assert!(format!("{e}").contains("pack"));
        assert!(format!("{e}").contains("/data"));

        let e = DataLoadError::ConflictingFormats {
            a: PathBuf::from("pack.ron"),
            b: PathBuf::from("pack.json"),
        };
        let msg = format!("{e}");
        assert!(msg.contains("pack.ron"));
        assert!(msg.contains("pack.json"));

        let e = DataLoadError::Economy {
            file: PathBuf::from("economy.ron"),
            source: bedwars_economy::EconomyConfigError::AlreadyConfigured,
        };
        assert!(format!("{e}").contains("economy.ron"));
    }

    #[test]
    fn io_error_converts() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let data_err: DataLoadError = io_err.into();
        assert!(matches!(data_err, DataLoadError::Io(_)));
        assert!(format!("{data_err}").contains("file not found"));
    }
}
