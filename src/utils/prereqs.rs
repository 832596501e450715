//! Prerequisite checking for the tools minikube-dev shells out to

use thiserror::Error;

use super::errors::DevError;

#[derive(Error, Debug)]
pub enum PrereqError {
    #[error("Tool '{name}' not found ({hint})")]
    NotFound { name: String, hint: String },
}

/// Trait for checking prerequisites
pub trait Prerequisite {
    /// Name of the prerequisite tool
    fn name(&self) -> &str;

    /// Check if the tool is available
    fn check(&self) -> Result<(), PrereqError>;

    /// Installation hint for the user
    fn install_hint(&self) -> &str;

    /// Whether a missing tool should fail the check
    fn required(&self) -> bool {
        true
    }
}

/// Basic prerequisite that checks if a command exists
pub struct CommandPrereq {
    pub name: String,
    pub hint: String,
    pub required: bool,
}

impl CommandPrereq {
    pub fn new(name: impl Into<String>, hint: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hint: hint.into(),
            required: true,
        }
    }

    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }
}

impl Prerequisite for CommandPrereq {
    fn name(&self) -> &str {
        &self.name
    }

    fn check(&self) -> Result<(), PrereqError> {
        which::which(&self.name).map_err(|_| PrereqError::NotFound {
            name: self.name.clone(),
            hint: self.hint.clone(),
        })?;
        Ok(())
    }

    fn install_hint(&self) -> &str {
        &self.hint
    }

    fn required(&self) -> bool {
        self.required
    }
}

/// Outcome of [`CommonPrereqs::check_all`]
#[derive(Debug, Default)]
pub struct PrereqReport {
    pub found: Vec<String>,
    /// (name, install hint) of missing required tools
    pub missing: Vec<(String, String)>,
    /// (name, install hint) of missing optional tools
    pub missing_optional: Vec<(String, String)>,
}

impl PrereqReport {
    pub fn is_satisfied(&self) -> bool {
        self.missing.is_empty()
    }

    /// Error naming every missing required tool, `None` when satisfied
    pub fn missing_error(&self) -> Option<DevError> {
        if self.is_satisfied() {
            return None;
        }

        let (name, hint) = &self.missing[0];
        let mut err = DevError::tool_not_found(name, hint);
        for (other, other_hint) in &self.missing[1..] {
            err = err.suggest(format!("Also missing '{}': {}", other, other_hint));
        }
        Some(err)
    }
}

/// Common prerequisites for minikube-dev
pub struct CommonPrereqs;

impl CommonPrereqs {
    /// Get minikube prerequisite
    pub fn minikube() -> CommandPrereq {
        Self::minikube_binary("minikube")
    }

    /// minikube prerequisite for a configured binary name or path
    pub fn minikube_binary(binary: &str) -> CommandPrereq {
        CommandPrereq::new(
            binary,
            "Install from: https://minikube.sigs.k8s.io/docs/start/",
        )
    }

    /// Get kubectl prerequisite (optional: only needed to use the cluster)
    pub fn kubectl() -> CommandPrereq {
        CommandPrereq::new(
            "kubectl",
            "Install from: https://kubernetes.io/docs/tasks/tools/",
        )
        .optional()
    }

    /// Check all prerequisites and sort them by outcome
    pub fn check_all(prereqs: &[&dyn Prerequisite]) -> PrereqReport {
        let mut report = PrereqReport::default();

        for prereq in prereqs {
            match prereq.check() {
                Ok(()) => report.found.push(prereq.name().to_string()),
                Err(err) => {
                    tracing::debug!("{}", err);
                    let entry = (prereq.name().to_string(), prereq.install_hint().to_string());
                    if prereq.required() {
                        report.missing.push(entry);
                    } else {
                        report.missing_optional.push(entry);
                    }
                }
            }
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prereq_trait() {
        let prereq = CommandPrereq::new("sh", "Should always exist");
        assert_eq!(prereq.name(), "sh");
        assert!(prereq.required());
        assert!(prereq.check().is_ok());
    }

    #[test]
    fn test_missing_prereq() {
        let prereq = CommandPrereq::new("nonexistent-tool-xyz", "Test hint");
        assert!(prereq.check().is_err());
    }

    #[test]
    fn test_check_all_splits_required_and_optional() {
        let present = CommandPrereq::new("sh", "hint");
        let missing = CommandPrereq::new("nonexistent-tool-xyz", "install xyz");
        let missing_optional = CommandPrereq::new("nonexistent-tool-abc", "install abc").optional();

        let report = CommonPrereqs::check_all(&[&present, &missing, &missing_optional]);

        assert_eq!(report.found, vec!["sh"]);
        assert_eq!(
            report.missing,
            vec![("nonexistent-tool-xyz".to_string(), "install xyz".to_string())]
        );
        assert_eq!(report.missing_optional.len(), 1);
        assert!(!report.is_satisfied());
    }

    #[test]
    fn test_missing_error_names_every_required_tool() {
        let first = CommandPrereq::new("nonexistent-tool-xyz", "install xyz");
        let second = CommandPrereq::new("nonexistent-tool-uvw", "install uvw");
        let optional = CommandPrereq::new("nonexistent-tool-abc", "install abc").optional();

        let report = CommonPrereqs::check_all(&[&first, &second, &optional]);
        let err = report.missing_error().unwrap();

        assert!(err.message.contains("nonexistent-tool-xyz"));
        assert!(err.suggestions.contains(&"install xyz".to_string()));
        assert!(err.suggestions.iter().any(|s| s.contains("nonexistent-tool-uvw")));
        assert!(!err.suggestions.iter().any(|s| s.contains("nonexistent-tool-abc")));
    }

    #[test]
    fn test_only_optional_missing_is_satisfied() {
        let present = CommandPrereq::new("sh", "hint");
        let optional = CommandPrereq::new("nonexistent-tool-abc", "install abc").optional();

        let report = CommonPrereqs::check_all(&[&present, &optional]);

        assert!(report.is_satisfied());
        assert!(report.missing_error().is_none());
        assert_eq!(
            report.missing_optional,
            vec![("nonexistent-tool-abc".to_string(), optional.install_hint().to_string())]
        );
    }

    #[test]
    fn test_kubectl_is_optional() {
        assert!(!CommonPrereqs::kubectl().required());
        assert!(CommonPrereqs::minikube().required());
    }
}
