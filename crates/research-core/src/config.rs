//! Application configuration.

use std::{
    env,
    path::{Path, PathBuf},
    time::Duration,
};

use crate::error::{ResearchError, Result};

/// Environment variable naming the workflow deployment.
pub const DEPLOYMENT_ENV: &str = "RESEARCH_DEPLOYMENT_NAME";

pub const DEFAULT_APP_TITLE: &str = "Deep Research";
pub const DEFAULT_SESSIONS_TITLE: &str = "Sessions";

/// Name of the workflow that executes an approved plan.
pub const ORCHESTRATOR_WORKFLOW: &str = "orchestrator";

/// Resolved application settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResearchConfig {
    /// Workflow deployment to talk to; only live transports need one
    pub deployment_name: Option<String>,
    pub app_title: String,
    pub sessions_title: String,
    /// Directory export files are written to
    pub export_dir: PathBuf,
    /// Pause between items of the mock stream
    pub mock_delay: Duration,
}

impl ResearchConfig {
    /// The deployment name, which live transports cannot work without.
    ///
    /// # Errors
    ///
    /// Returns `ResearchError::Configuration` if no deployment is configured.
    pub fn require_deployment(&self) -> Result<&str> {
        self.deployment_name
            .as_deref()
            .ok_or_else(|| ResearchError::Configuration {
                message: format!("{DEPLOYMENT_ENV} is not set"),
            })
    }
}

/// Builder for [`ResearchConfig`].
///
/// Explicit settings win over the environment, which wins over defaults.
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    deployment_name: Option<String>,
    export_dir: Option<PathBuf>,
    mock_delay: Option<Duration>,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_deployment_name(mut self, name: impl Into<String>) -> Self {
        self.deployment_name = Some(name.into());
        self
    }

    /// Sets a custom export directory.
    ///
    /// If not specified, uses XDG Base Directory specification:
    /// `$XDG_DATA_HOME/research/exports` or `~/.local/share/research/exports`
    pub fn with_export_dir<P: AsRef<Path>>(mut self, dir: Option<P>) -> Self {
        if let Some(dir) = dir {
            self.export_dir = Some(dir.as_ref().to_path_buf());
        }
        self
    }

    pub fn with_mock_delay(mut self, delay: Duration) -> Self {
        self.mock_delay = Some(delay);
        self
    }

    /// Resolves the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ResearchError::XdgDirectory` if no export directory was given
    /// and the XDG data directory cannot be determined.
    pub fn build(self) -> Result<ResearchConfig> {
        let deployment_name = self.deployment_name.or_else(|| {
            env::var(DEPLOYMENT_ENV)
                .ok()
                .filter(|name| !name.trim().is_empty())
        });

        let export_dir = match self.export_dir {
            Some(dir) => dir,
            None => Self::default_export_dir()?,
        };

        Ok(ResearchConfig {
            deployment_name,
            app_title: DEFAULT_APP_TITLE.to_string(),
            sessions_title: DEFAULT_SESSIONS_TITLE.to_string(),
            export_dir,
            mock_delay: self.mock_delay.unwrap_or_default(),
        })
    }

    /// Returns the default export directory following XDG Base Directory
    /// specification.
    fn default_export_dir() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("research")
            .get_data_home()
            .map(|home| home.join("exports"))
            .ok_or_else(|| {
                ResearchError::XdgDirectory("cannot determine data home directory".to_string())
            })
    }
}
