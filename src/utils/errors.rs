//! Errors with actionable suggestions for the CLI

use colored::Colorize;
use thiserror::Error;

use crate::k8s::minikube::MinikubeError;

/// Error with suggestions and an optional documentation link
#[derive(Error, Debug)]
#[error("{message}")]
pub struct DevError {
    pub message: String,
    pub suggestions: Vec<String>,
    pub docs_link: Option<String>,
    /// Output minikube printed before failing
    pub details: Option<String>,
}

impl DevError {
    /// Create a new error with suggestions
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            suggestions: Vec::new(),
            docs_link: None,
            details: None,
        }
    }

    /// Add a suggestion to the error
    pub fn suggest(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    /// Add a documentation link
    pub fn with_docs(mut self, link: impl Into<String>) -> Self {
        self.docs_link = Some(link.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        let details = details.into();
        if !details.trim().is_empty() {
            self.details = Some(details);
        }
        self
    }

    /// Display the error with suggestions on stderr
    pub fn display(&self) {
        tracing::debug!("reporting error: {}", self.message);
        eprint!("{}", self.render());
    }

    /// Error report as printed by [`DevError::display`]
    pub fn render(&self) -> String {
        let mut out = format!("{} {}\n", "Error:".red().bold(), self.message);

        if let Some(details) = &self.details {
            out.push('\n');
            out.push_str(&format!("{}\n", "minikube output:".yellow().bold()));
            for line in details.trim_end().lines() {
                out.push_str(&format!("  {}\n", line));
            }
        }

        if !self.suggestions.is_empty() {
            out.push('\n');
            out.push_str(&format!("{}\n", "Suggestions:".yellow().bold()));
            for suggestion in &self.suggestions {
                out.push_str(&format!("  {} {}\n", "→".blue(), suggestion));
            }
        }

        if let Some(docs) = &self.docs_link {
            out.push('\n');
            out.push_str(&format!("{} {}\n", "Documentation:".cyan(), docs));
        }

        out
    }

    // Common error patterns

    /// Kubeconfig not found error
    pub fn kubeconfig_not_found(path: &str) -> Self {
        Self::new(format!("Kubeconfig not found: {}", path))
            .suggest("Create the cluster first with: minikube-dev cluster create")
            .suggest("Use --kubeconfig to point at the file minikube wrote")
    }

    /// Tool not found error
    pub fn tool_not_found(tool: &str, install_hint: &str) -> Self {
        Self::new(format!("Required tool '{}' not found", tool))
            .suggest(install_hint.to_string())
            .suggest("Ensure the tool is in your PATH")
    }

    /// Proxy URL rejected
    pub fn invalid_proxy(proxy: &str, reason: &str) -> Self {
        Self::new(format!("Invalid proxy '{}': {}", proxy, reason))
            .suggest("Use a full URL such as http://proxy.example.com:3128")
            .suggest("Check the port is between 1 and 65535")
    }

    /// minikube exited with an error
    pub fn command_failed(command: &str, reason: &str) -> Self {
        Self::new(format!("'{}' failed: {}", command, reason))
            .suggest("Run with -vv to see the exact commands")
            .suggest("Check the cluster with: minikube status")
            .with_docs("https://minikube.sigs.k8s.io/docs/handbook/troubleshooting/")
    }
}

impl From<&MinikubeError> for DevError {
    fn from(err: &MinikubeError) -> Self {
        match err {
            MinikubeError::InvalidProxy { proxy, source, .. } => {
                DevError::invalid_proxy(proxy, &source.to_string())
            }
            MinikubeError::Spawn { source, .. }
                if source.kind() == std::io::ErrorKind::NotFound =>
            {
                let minikube = super::prereqs::CommonPrereqs::minikube();
                DevError::tool_not_found(&minikube.name, &minikube.hint)
            }
            MinikubeError::Spawn { command, source } => {
                DevError::command_failed(command, &source.to_string())
            }
            MinikubeError::CommandFailed {
                command,
                reason,
                output,
            } => DevError::command_failed(command, reason).with_details(output.as_str()),
            MinikubeError::Kubeconfig(source) => DevError::new(source.to_string())
                .suggest("Create the cluster first with: minikube-dev cluster create"),
        }
    }
}

/// Helper to display error and exit
pub fn display_error_and_exit(error: DevError) -> ! {
    error.display();
    std::process::exit(1);
}

/// Convert anyhow error to DevError, keeping any minikube failure details
pub fn enhance_error(err: anyhow::Error) -> DevError {
    let err = match err.downcast::<DevError>() {
        Ok(dev) => return dev,
        Err(err) => err,
    };

    if let Some(minikube) = err.downcast_ref::<MinikubeError>() {
        return DevError::from(minikube);
    }

    DevError::new(format!("{:#}", err)).suggest("Run with --verbose for more details")
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_kubeconfig_not_found_error() {
        let err = DevError::kubeconfig_not_found("minikube.kubeconfig");
        assert!(err.message.contains("minikube.kubeconfig"));
        assert_eq!(err.suggestions.len(), 2);
    }

    #[test]
    fn test_render_reports_message_once() {
        let err = DevError::kubeconfig_not_found("/tmp/nope.kc").with_details("no such file");
        let report = err.render();
        assert_eq!(report.matches("Kubeconfig not found: /tmp/nope.kc").count(), 1);
        assert!(report.contains("no such file"));
        assert!(report.contains("minikube-dev cluster create"));
    }

    #[test]
    fn test_error_with_docs() {
        let err = DevError::new("test error").with_docs("https://example.com");
        assert!(err.docs_link.is_some());
    }

    #[test]
    fn test_blank_details_dropped() {
        let err = DevError::new("test").with_details("  \n");
        assert!(err.details.is_none());
    }

    #[test]
    fn test_from_command_failed_keeps_output() {
        let err = MinikubeError::CommandFailed {
            command: "minikube start --bootstrapper=kubeadm".to_string(),
            reason: "exit status: 1".to_string(),
            output: "Exiting due to DRV_NOT_DETECTED".to_string(),
        };
        let dev = DevError::from(&err);
        assert!(dev.message.contains("minikube start"));
        assert_eq!(
            dev.details.as_deref(),
            Some("Exiting due to DRV_NOT_DETECTED")
        );
        assert!(dev.docs_link.is_some());
    }

    #[test]
    fn test_from_missing_binary() {
        let err = MinikubeError::Spawn {
            command: "minikube delete".to_string(),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        let dev = DevError::from(&err);
        assert!(dev.message.contains("'minikube' not found"));
    }

    #[test]
    fn test_enhance_error_sees_through_context() {
        let err = Err::<(), _>(MinikubeError::CommandFailed {
            command: "minikube delete".to_string(),
            reason: "exit status: 2".to_string(),
            output: String::new(),
        })
        .context("Failed to delete minikube cluster")
        .unwrap_err();

        let dev = enhance_error(err);
        assert!(dev.message.contains("minikube delete"));
        assert!(dev.details.is_none());
    }

    #[test]
    fn test_enhance_error_passes_dev_error_through() {
        let err = anyhow::Error::from(DevError::kubeconfig_not_found("dev.kubeconfig"));
        let dev = enhance_error(err);
        assert_eq!(dev.message, "Kubeconfig not found: dev.kubeconfig");
        assert_eq!(dev.suggestions.len(), 2);
    }

    #[test]
    fn test_enhance_error_generic() {
        let err = anyhow::anyhow!("something else");
        let dev = enhance_error(err);
        assert_eq!(dev.message, "something else");
    }
}
