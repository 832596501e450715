//! Configuration for minikube-dev

pub mod settings;
