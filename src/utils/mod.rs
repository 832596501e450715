//! Utility modules for minikube-dev

pub mod dryrun;
pub mod errors;
pub mod logger;
pub mod prereqs;
pub mod progress;
pub mod prompt;

// Re-export commonly used items
pub use errors::DevError;
pub use logger::{log_info, log_warn};
pub use prereqs::{CommonPrereqs, Prerequisite};
pub use prompt::confirm_delete;
