//! Local Kubernetes cluster operations

pub mod exec;
pub mod minikube;
pub mod proxy;

pub use exec::{DryRunExec, MinikubeExec, SystemExec};
pub use minikube::{Minikube, MinikubeError};
