//! Cluster command implementations

use anyhow::{Context, Result};
use std::io::ErrorKind;
use std::path::PathBuf;

use crate::config::settings::Settings;
use crate::k8s::exec::{DryRunExec, MinikubeExec, SystemExec};
use crate::k8s::minikube::{Minikube, MinikubeError};
use crate::utils::{DevError, dryrun, progress};

/// Command-line overrides for the cluster subcommands
#[derive(Debug, Clone, Default)]
pub struct ClusterOptions {
    pub vm_driver: Option<String>,
    pub proxy: Option<String>,
    pub kubeconfig: Option<PathBuf>,
    pub dry_run: bool,
}

impl ClusterOptions {
    /// Flag value if given, otherwise the config file value
    fn kubeconfig_path(&self, settings: &Settings) -> PathBuf {
        self.kubeconfig
            .clone()
            .unwrap_or_else(|| PathBuf::from(&settings.minikube.kubeconfig_path))
    }

    fn minikube<E: MinikubeExec>(&self, settings: &Settings, executor: E) -> Minikube<E> {
        Minikube::with_executor(
            self.vm_driver
                .clone()
                .or_else(|| settings.minikube.vm_driver.clone()),
            self.proxy.clone().or_else(|| settings.minikube.proxy.clone()),
            self.kubeconfig_path(settings),
            executor,
        )
    }
}

/// Handle cluster create command
pub fn create(settings: &Settings, opts: &ClusterOptions) -> Result<()> {
    if opts.dry_run {
        let minikube = opts.minikube(settings, DryRunExec::new(&settings.minikube.binary));
        minikube
            .create()
            .context("Failed to plan minikube cluster creation")?;
        dryrun::log_actions(&minikube.executor().actions());
        return Ok(());
    }

    let minikube = opts.minikube(settings, SystemExec::new(&settings.minikube.binary));
    crate::log_info!(
        "Creating minikube cluster (driver: {})",
        minikube.vm_driver().unwrap_or("default")
    );

    let spinner = progress::create_spinner(
        "Starting minikube cluster...",
        settings.behavior.show_progress,
    );
    let result = minikube.create();
    spinner.finish_and_clear();
    result.context("Failed to create minikube cluster")?;

    let kubeconfig = minikube.kubeconfig_path();
    println!();
    println!("==========================================");
    println!("Cluster created successfully!");
    println!("==========================================");
    println!();
    println!("Kubeconfig: {}", kubeconfig.display());
    println!();
    println!("To use this cluster, run:");
    println!("  export KUBECONFIG={}", absolute(kubeconfig).display());
    println!();

    Ok(())
}

/// Handle cluster delete command
pub fn delete(settings: &Settings, opts: &ClusterOptions, yes: bool) -> Result<()> {
    let minikube = opts.minikube(settings, SystemExec::new(&settings.minikube.binary));

    if opts.dry_run {
        dryrun::log_actions(&[
            format!("{} delete", settings.minikube.binary),
            format!("remove {}", minikube.kubeconfig_path().display()),
        ]);
        return Ok(());
    }

    if settings.behavior.confirm_destructive
        && !yes
        && !crate::utils::confirm_delete(minikube.kubeconfig_path())?
    {
        crate::log_info!("Deletion cancelled");
        return Ok(());
    }

    let spinner = progress::create_spinner(
        "Deleting minikube cluster...",
        settings.behavior.show_progress,
    );
    let result = minikube.delete();
    spinner.finish_and_clear();
    result.context("Failed to delete minikube cluster")?;

    println!("Cluster deleted successfully");
    Ok(())
}

/// Handle cluster kubeconfig command
pub fn kubeconfig(settings: &Settings, opts: &ClusterOptions) -> Result<()> {
    print!("{}", read_kubeconfig(settings, opts)?);
    Ok(())
}

fn read_kubeconfig(settings: &Settings, opts: &ClusterOptions) -> Result<String> {
    let minikube = opts.minikube(settings, SystemExec::new(&settings.minikube.binary));

    match minikube.kubeconfig() {
        Ok(contents) => Ok(contents),
        Err(MinikubeError::Kubeconfig(err)) if err.kind() == ErrorKind::NotFound => Err(
            DevError::kubeconfig_not_found(&minikube.kubeconfig_path().display().to_string())
                .into(),
        ),
        Err(err) => Err(err).context("Failed to read kubeconfig"),
    }
}

fn absolute(path: &std::path::Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}
