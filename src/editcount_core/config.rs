use crate::editcount_core::error::{EditCountError, Result};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_LEDGER_FILE: &str = "counts.json";
pub const DEFAULT_OUTPUT_FILE: &str = "photo_data.js";
pub const DEFAULT_VAR_NAME: &str = "data";

/// How the report file is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputFormat {
    /// `var <name>=[...];`, loadable by a plain `<script>` tag.
    Script { var_name: String },
    /// The bare JSON array.
    Json,
}

impl Default for OutputFormat {
    fn default() -> Self {
        OutputFormat::Script {
            var_name: DEFAULT_VAR_NAME.to_string(),
        }
    }
}

/// Everything a reconciliation run needs to know.
#[derive(Debug, Clone)]
pub struct Config {
    pub source_root: PathBuf,
    pub dest_root: PathBuf,
    pub ledger_path: PathBuf,
    pub output_path: PathBuf,
    pub output_format: OutputFormat,
}

impl Config {
    pub fn new(source_root: impl Into<PathBuf>, dest_root: impl Into<PathBuf>) -> Self {
        Config {
            source_root: source_root.into(),
            dest_root: dest_root.into(),
            ledger_path: PathBuf::from(DEFAULT_LEDGER_FILE),
            output_path: PathBuf::from(DEFAULT_OUTPUT_FILE),
            output_format: OutputFormat::default(),
        }
    }

    pub fn with_ledger_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.ledger_path = path.into();
        self
    }

    pub fn with_output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = path.into();
        self
    }

    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }

    /// Check both roots exist and are directories, and make them absolute.
    pub fn validate(mut self) -> Result<Self> {
        self.source_root = canonical_dir(&self.source_root)?;
        self.dest_root = canonical_dir(&self.dest_root)?;

        if let OutputFormat::Script { var_name } = &self.output_format {
            if !is_identifier(var_name) {
                return Err(EditCountError::Argument(format!(
                    "'{}' is not a valid JavaScript variable name",
                    var_name
                )));
            }
        }

        Ok(self)
    }
}

fn canonical_dir(path: &Path) -> Result<PathBuf> {
    if !path.exists() {
        return Err(EditCountError::PathNotFound(path.to_path_buf()));
    }
    if !path.is_dir() {
        return Err(EditCountError::NotADirectory(path.to_path_buf()));
    }
    fs::canonicalize(path).map_err(|e| EditCountError::io(path, e))
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_validate_accepts_directories() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("raws");
        let dst = temp.path().join("edits");
        fs::create_dir(&src).unwrap();
        fs::create_dir(&dst).unwrap();

        let config = Config::new(&src, &dst).validate().unwrap();
        assert!(config.source_root.is_absolute());
        assert_eq!(config.ledger_path, PathBuf::from(DEFAULT_LEDGER_FILE));
    }

    #[test]
    fn test_validate_missing_root() {
        let temp = TempDir::new().unwrap();
        let err = Config::new(temp.path().join("missing"), temp.path())
            .validate()
            .unwrap_err();
        assert!(matches!(err, EditCountError::PathNotFound(_)));
    }

    #[test]
    fn test_validate_file_as_root() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("file.txt");
        fs::write(&file, "x").unwrap();

        let err = Config::new(temp.path(), &file).validate().unwrap_err();
        assert!(matches!(err, EditCountError::NotADirectory(_)));
    }

    #[test]
    fn test_validate_var_name() {
        let temp = TempDir::new().unwrap();
        let bad = Config::new(temp.path(), temp.path())
            .with_output_format(OutputFormat::Script {
                var_name: "1data".to_string(),
            });
        assert!(matches!(bad.validate(), Err(EditCountError::Argument(_))));

        assert!(is_identifier("data"));
        assert!(is_identifier("_photo$Data1"));
        assert!(!is_identifier("photo-data"));
        assert!(!is_identifier(""));
    }
}
