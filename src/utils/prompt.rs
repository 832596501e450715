//! Confirmation before tearing down the minikube cluster

use anyhow::{Context, Result};
use dialoguer::Confirm;
use std::path::Path;

/// Question shown before `minikube delete`
pub fn delete_prompt(kubeconfig: &Path) -> String {
    format!(
        "Delete the minikube cluster and remove {}?",
        kubeconfig.display()
    )
}

/// Ask before deleting; answering no (or pressing enter) keeps the cluster
pub fn confirm_delete(kubeconfig: &Path) -> Result<bool> {
    Confirm::new()
        .with_prompt(delete_prompt(kubeconfig))
        .default(false)
        .interact()
        .context("Failed to read confirmation (use --yes when not on a terminal)")
}
