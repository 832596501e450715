//! Minikube cluster lifecycle operations

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::exec::{MinikubeExec, SystemExec};
use super::proxy::ProxyEnv;

/// Environment variable minikube reads to decide where the kubeconfig goes
pub const KUBECONFIG_ENV_VAR: &str = "KUBECONFIG";

/// Kubeconfig location used when none is configured
pub const DEFAULT_KUBECONFIG_PATH: &str = "minikube.kubeconfig";

const BOOTSTRAPPER: &str = "kubeadm";

#[derive(Error, Debug)]
pub enum MinikubeError {
    #[error("error parsing proxy '{proxy}' for 'minikube {args}': {source}")]
    InvalidProxy {
        proxy: String,
        args: String,
        source: url::ParseError,
    },

    #[error("error running command '{command}': {source}")]
    Spawn {
        command: String,
        source: std::io::Error,
    },

    #[error("error running command '{command}': {reason}")]
    CommandFailed {
        command: String,
        reason: String,
        output: String,
    },

    #[error(transparent)]
    Kubeconfig(#[from] std::io::Error),
}

impl MinikubeError {
    /// Output captured from minikube before it failed, if any
    pub fn output(&self) -> Option<&str> {
        match self {
            MinikubeError::CommandFailed { output, .. } => Some(output.as_str()),
            _ => None,
        }
    }
}

/// Adapter around the `minikube` CLI.
///
/// Every invocation runs with `KUBECONFIG` pointed at [`Minikube::kubeconfig_path`],
/// so minikube writes its credentials there instead of the user's default
/// kubeconfig. The path is fixed at construction; two adapters sharing a path
/// must be coordinated by the caller.
#[derive(Debug, Clone)]
pub struct Minikube<E = SystemExec> {
    vm_driver: Option<String>,
    proxy: Option<String>,
    kubeconfig_path: PathBuf,
    executor: E,
}

impl Minikube<SystemExec> {
    /// Adapter running the `minikube` binary from PATH, writing
    /// [`DEFAULT_KUBECONFIG_PATH`]
    pub fn new(vm_driver: Option<String>, proxy: Option<String>) -> Self {
        Self::with_executor(
            vm_driver,
            proxy,
            DEFAULT_KUBECONFIG_PATH,
            SystemExec::default(),
        )
    }
}

impl<E: MinikubeExec> Minikube<E> {
    pub fn with_executor(
        vm_driver: Option<String>,
        proxy: Option<String>,
        kubeconfig_path: impl Into<PathBuf>,
        executor: E,
    ) -> Self {
        Self {
            vm_driver: vm_driver.filter(|d| !d.is_empty()),
            proxy: proxy.filter(|p| !p.is_empty()),
            kubeconfig_path: kubeconfig_path.into(),
            executor,
        }
    }

    pub fn kubeconfig_path(&self) -> &Path {
        &self.kubeconfig_path
    }

    pub fn vm_driver(&self) -> Option<&str> {
        self.vm_driver.as_deref()
    }

    pub fn proxy(&self) -> Option<&str> {
        self.proxy.as_deref()
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Arguments for `minikube start`, including driver and proxy flags
    pub fn start_args(&self) -> Result<Vec<String>, MinikubeError> {
        let mut args = vec![
            "start".to_string(),
            format!("--bootstrapper={}", BOOTSTRAPPER),
        ];

        if let Some(driver) = &self.vm_driver {
            args.push(format!("--vm-driver={}", driver));
        }

        if let Some(proxy) = &self.proxy {
            let env = match ProxyEnv::from_proxy(proxy) {
                Ok(env) => env,
                Err(source) => {
                    return Err(MinikubeError::InvalidProxy {
                        proxy: proxy.clone(),
                        args: args.join(" "),
                        source,
                    });
                }
            };

            for assignment in env.assignments() {
                args.push("--docker-env".to_string());
                args.push(assignment);
            }
        }

        Ok(args)
    }

    /// Start the cluster and point the kubeconfig context at it
    pub fn create(&self) -> Result<(), MinikubeError> {
        let args = self.start_args()?;

        crate::log_info!(
            "Starting minikube (kubeconfig: {})...",
            self.kubeconfig_path.display()
        );
        self.exec(&args)?;

        crate::log_info!("Updating kubeconfig context...");
        self.exec(&["update-context"])?;

        Ok(())
    }

    /// Delete the cluster and remove the local kubeconfig.
    ///
    /// The kubeconfig is removed even when `minikube delete` fails. Failure to
    /// remove it is never reported.
    pub fn delete(&self) -> Result<(), MinikubeError> {
        crate::log_info!("Deleting minikube cluster...");
        let result = self.exec(&["delete"]);
        self.discard_kubeconfig();
        result.map(|_| ())
    }

    /// Contents of the kubeconfig minikube generated
    pub fn kubeconfig(&self) -> Result<String, MinikubeError> {
        Ok(fs::read_to_string(&self.kubeconfig_path)?)
    }

    /// Run minikube with `args` and the adapter's kubeconfig override
    pub fn exec<S: AsRef<str>>(&self, args: &[S]) -> Result<String, MinikubeError> {
        let args: Vec<String> = args.iter().map(|a| a.as_ref().to_string()).collect();
        let env = self.environment_from(std::env::vars_os());
        self.executor.run(&env, &args)
    }

    /// `base` with every `KUBECONFIG` entry replaced by the adapter's path
    fn environment_from(
        &self,
        base: impl IntoIterator<Item = (OsString, OsString)>,
    ) -> Vec<(OsString, OsString)> {
        let mut env: Vec<(OsString, OsString)> = base
            .into_iter()
            .filter(|(key, _)| key != KUBECONFIG_ENV_VAR)
            .collect();
        env.push((
            OsString::from(KUBECONFIG_ENV_VAR),
            self.kubeconfig_path.clone().into_os_string(),
        ));
        env
    }

    /// Best-effort cleanup: the removal error is dropped on purpose.
    fn discard_kubeconfig(&self) {
        if let Err(err) = fs::remove_file(&self.kubeconfig_path) {
            tracing::debug!(
                "Ignoring failure to remove {}: {}",
                self.kubeconfig_path.display(),
                err
            );
        }
    }
}
