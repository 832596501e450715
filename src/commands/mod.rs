//! Command implementations for minikube-dev CLI

pub mod cluster;
