//! Optional `cyco.toml` configuration.
//!
//! Every section may be omitted; unspecified values fall back to defaults.
//!
//! ```toml
//! [dynawo]
//! data_dir = "cases/IEEE14"
//! jobs = "IEEE14.jobs"
//!
//! [helics]
//! data_dir = "cases/helics"
//!
//! [output]
//! dir = "out"
//! federate_name = "Dynawo"
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use cyco_core::cosim::DEFAULT_FEDERATE_NAME;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CycoConfig {
    pub dynawo: DynawoConfig,
    pub helics: HelicsConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DynawoConfig {
    /// Directory holding the JOBS file and everything it references.
    pub data_dir: PathBuf,

    /// JOBS file name inside `data_dir`; the first `.jobs` file when unset.
    pub jobs: Option<String>,
}

impl Default for DynawoConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            jobs: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HelicsConfig {
    /// Directory holding the federate descriptor.
    pub data_dir: PathBuf,
}

impl Default for HelicsConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output directory; `<dynawo data_dir>/serialized` when unset.
    pub dir: Option<PathBuf>,

    pub federate_name: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: None,
            federate_name: DEFAULT_FEDERATE_NAME.to_string(),
        }
    }
}

impl CycoConfig {
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        toml::from_str(&contents).with_context(|| format!("parsing config {}", path.display()))
    }

    /// The file at `path` if given, defaults otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from(path),
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn defaults_point_at_current_directory() {
        let config = CycoConfig::default();
        assert_eq!(config.dynawo.data_dir, PathBuf::from("."));
        assert_eq!(config.helics.data_dir, PathBuf::from("."));
        assert_eq!(config.output.federate_name, "Dynawo");
        assert!(config.output.dir.is_none());
    }

    #[test]
    fn partial_config_keeps_defaults() {
        let config: CycoConfig = toml::from_str(
            r#"
            [dynawo]
            jobs = "IEEE14.jobs"

            [output]
            dir = "out"
        "#,
        )
        .unwrap();
        assert_eq!(config.dynawo.jobs.as_deref(), Some("IEEE14.jobs"));
        assert_eq!(config.dynawo.data_dir, PathBuf::from("."));
        assert_eq!(config.output.dir, Some(PathBuf::from("out")));
        assert_eq!(config.output.federate_name, "Dynawo");
    }

    #[test]
    fn load_reports_bad_files() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "[helics]\ndata_dir = 3\n").unwrap();
        let err = CycoConfig::load_from(file.path()).unwrap_err();
        assert!(err.to_string().contains("parsing config"));

        assert_eq!(CycoConfig::load(None).unwrap(), CycoConfig::default());
    }
}
