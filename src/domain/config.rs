use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Configuration for the interactive record shell.
///
/// The store itself has no tunables; these settings only change how the shell
/// turns user input into store operations.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "Versions")]
pub struct Config {
    /// Whether the department typed into a course search is upper-cased
    /// before searching.
    ///
    /// Course equality is case-sensitive, so with this disabled a search for
    /// `cs 101` will not find students enrolled in `CS 101`.
    pub normalize_search_department: bool,

    /// The filename offered by default when exporting at the end of a
    /// session.
    export_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            normalize_search_department: default_normalize_search_department(),
            export_path: None,
        }
    }
}

impl Config {
    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {e}"))?;
        toml::from_str(&content).map_err(|e| format!("Failed to parse config file: {e}"))
    }

    /// The default export filename, if configured.
    #[must_use]
    pub fn export_path(&self) -> Option<&Path> {
        self.export_path.as_deref()
    }

    /// Applies the search normalisation rule to a department typed by the
    /// user.
    #[must_use]
    pub fn search_department(&self, department: &str) -> String {
        if self.normalize_search_department {
            department.to_uppercase()
        } else {
            department.to_string()
        }
    }
}

const fn default_normalize_search_department() -> bool {
    true
}

/// The serialized versions of the configuration.
/// This allows for future changes to the configuration format and to the domain
/// type without breaking compatibility.
#[derive(Debug, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        #[serde(default = "default_normalize_search_department")]
        normalize_search_department: bool,

        #[serde(default)]
        export_path: Option<PathBuf>,
    },
}

impl From<Versions> for Config {
    fn from(versions: Versions) -> Self {
        match versions {
            Versions::V1 {
                normalize_search_department,
                export_path,
            } => Self {
                normalize_search_department,
                export_path,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn load_reads_valid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(
            b"_version = \"1\"\nnormalize_search_department = false\nexport_path = \"out.txt\"\n",
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();

        assert!(!config.normalize_search_department);
        assert_eq!(config.export_path(), Some(Path::new("out.txt")));
    }

    #[test]
    fn load_missing_file_returns_error() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("missing.toml");

        let error = Config::load(&missing).unwrap_err();
        assert!(error.starts_with("Failed to read config file:"));
    }

    #[test]
    fn load_invalid_toml_returns_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"_version = \"1\"\nnormalize_search_department = \"yes\"\n")
            .unwrap();

        let error = Config::load(file.path()).unwrap_err();
        assert!(error.starts_with("Failed to parse config file:"));
    }

    #[test]
    fn empty_file_returns_default() {
        let expected = Config::default();
        let actual: Config = toml::from_str(r#"_version = "1""#).unwrap();
        assert_eq!(actual, expected);
    }

    #[test]
    fn search_department_follows_setting() {
        let mut config = Config::default();
        assert_eq!(config.search_department("cs"), "CS");

        config.normalize_search_department = false;
        assert_eq!(config.search_department("cs"), "cs");
    }
}
