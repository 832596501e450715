//! Configuration file support for minikube-dev

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::k8s::minikube::DEFAULT_KUBECONFIG_PATH;

/// Main configuration structure
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Settings {
    #[serde(default)]
    pub minikube: MinikubeSettings,

    #[serde(default)]
    pub colors: Colors,

    #[serde(default)]
    pub behavior: Behavior,
}

/// How minikube is invoked
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct MinikubeSettings {
    /// Binary name or path
    #[serde(default = "default_binary")]
    pub binary: String,

    /// VM driver passed as --vm-driver (kvm2, virtualbox, hyperkit, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vm_driver: Option<String>,

    /// HTTP proxy forwarded to the docker daemon inside the VM
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxy: Option<String>,

    /// Where minikube writes the kubeconfig
    #[serde(default = "default_kubeconfig_path")]
    pub kubeconfig_path: String,
}

/// Color and theme settings
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Colors {
    #[serde(default = "default_true")]
    pub enabled: bool,
}

/// Behavior settings
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Behavior {
    #[serde(default = "default_true")]
    pub confirm_destructive: bool,

    #[serde(default = "default_true")]
    pub show_progress: bool,
}

// Default value functions
fn default_binary() -> String {
    "minikube".to_string()
}

fn default_kubeconfig_path() -> String {
    DEFAULT_KUBECONFIG_PATH.to_string()
}

fn default_true() -> bool {
    true
}

impl Default for MinikubeSettings {
    fn default() -> Self {
        Self {
            binary: default_binary(),
            vm_driver: None,
            proxy: None,
            kubeconfig_path: default_kubeconfig_path(),
        }
    }
}

impl Default for Colors {
    fn default() -> Self {
        Self {
            enabled: default_true(),
        }
    }
}

impl Default for Behavior {
    fn default() -> Self {
        Self {
            confirm_destructive: default_true(),
            show_progress: default_true(),
        }
    }
}

impl Settings {
    /// Load settings from an explicit path, the standard locations, or defaults.
    ///
    /// An explicit path must exist and parse. A broken file found in a
    /// standard location is reported and skipped.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from_file(path);
        }

        match Self::find_config_file() {
            Some(path) => Ok(Self::load_from_file(&path).unwrap_or_else(|err| {
                crate::log_warn!("Ignoring config file: {:#}", err);
                Self::default()
            })),
            None => Ok(Self::default()),
        }
    }

    /// Load settings from a specific file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(settings)
    }

    /// Find config file in standard locations
    /// Priority:
    /// 1. .minikube-dev.toml in current directory
    /// 2. ~/.config/minikube-dev/config.toml (XDG config directory)
    fn find_config_file() -> Option<PathBuf> {
        let local_config = PathBuf::from(".minikube-dev.toml");
        if local_config.exists() {
            return Some(local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("minikube-dev").join("config.toml");
            if xdg_config.exists() {
                return Some(xdg_config);
            }
        }

        None
    }

    /// Generate example config file content
    pub fn example_config() -> Result<String> {
        let mut example = Settings::default();
        example.minikube.vm_driver = Some("kvm2".to_string());
        example.minikube.proxy = Some("http://proxy.example.com:3128".to_string());

        let header = "# minikube-dev configuration file\n\
                      # Place this file at ~/.config/minikube-dev/config.toml\n\
                      # or .minikube-dev.toml in your project\n\n";

        let body = toml::to_string_pretty(&example).context("Failed to serialize settings")?;
        Ok(format!("{}{}", header, body))
    }
}
