//! minikube-dev: drive a local minikube cluster through its CLI
//!
//! The [`k8s::minikube::Minikube`] adapter builds `minikube` command lines,
//! runs them with `KUBECONFIG` redirected to a fixed path, and hands back the
//! kubeconfig minikube wrote there.

pub mod commands;
pub mod config;
pub mod k8s;
pub mod utils;
