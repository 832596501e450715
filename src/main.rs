//! minikube-dev CLI - Development tool for local minikube clusters

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};
use colored::Colorize;
use minikube_dev::commands::cluster::{self, ClusterOptions};
use minikube_dev::config::settings::Settings;
use minikube_dev::utils::errors::{display_error_and_exit, enhance_error};
use minikube_dev::utils::{CommonPrereqs, Prerequisite};
use minikube_dev::{log_info, utils};
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "minikube-dev")]
#[command(author, version, long_about = None)]
#[command(about = "Development CLI tool for local minikube clusters")]
struct Cli {
    /// Verbose output (can be used multiple times: -v, -vv, -vvv)
    /// -v: INFO, -vv: DEBUG, -vvv: TRACE
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Dry-run mode: show what would be done without making changes
    #[arg(long, global = true)]
    dry_run: bool,

    /// Path to a config file
    /// (default: .minikube-dev.toml or ~/.config/minikube-dev/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the minikube cluster
    Cluster {
        #[command(subcommand)]
        command: ClusterCommands,
    },

    /// Check prerequisites
    Check,

    /// Configuration helpers
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completion scripts
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Show version information
    Version,
}

#[derive(Subcommand)]
enum ClusterCommands {
    /// Start a minikube cluster and write its kubeconfig
    Create {
        /// VM driver (kvm2, virtualbox, hyperkit, ...)
        #[arg(long, env = "MINIKUBE_DEV_VM_DRIVER")]
        vm_driver: Option<String>,

        /// HTTP proxy forwarded to docker inside the VM
        #[arg(long, env = "MINIKUBE_DEV_PROXY")]
        proxy: Option<String>,

        /// Where minikube should write the kubeconfig
        #[arg(short, long)]
        kubeconfig: Option<PathBuf>,
    },

    /// Delete the minikube cluster and its kubeconfig
    Delete {
        /// Kubeconfig written by `cluster create`
        #[arg(short, long)]
        kubeconfig: Option<PathBuf>,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Print the kubeconfig written by `cluster create`
    Kubeconfig {
        /// Kubeconfig written by `cluster create`
        #[arg(short, long)]
        kubeconfig: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Print an example config file
    Example,
}

fn main() {
    let cli = Cli::parse();

    utils::logger::init(cli.verbose);

    if let Err(err) = run(cli) {
        display_error_and_exit(enhance_error(err));
    }
}

fn run(cli: Cli) -> Result<()> {
    let settings = Settings::load(cli.config.as_deref())?;

    if !settings.colors.enabled {
        colored::control::set_override(false);
    }

    // stderr, so `cluster kubeconfig > file` output stays clean
    if cli.dry_run && announces_dry_run(&cli.command) {
        eprintln!("{}", "DRY RUN MODE: No changes will be made".cyan().bold());
        eprintln!();
    }

    match cli.command {
        Commands::Cluster { command } => handle_cluster_command(&settings, command, cli.dry_run),
        Commands::Check => handle_check_command(&settings),
        Commands::Config { command } => handle_config_command(command),
        Commands::Completion { shell } => handle_completion_command(shell),
        Commands::Version => handle_version_command(),
    }
}

/// Only commands that change the cluster have anything to skip in dry-run mode
fn announces_dry_run(command: &Commands) -> bool {
    matches!(
        command,
        Commands::Cluster {
            command: ClusterCommands::Create { .. } | ClusterCommands::Delete { .. }
        }
    )
}

fn handle_cluster_command(
    settings: &Settings,
    command: ClusterCommands,
    dry_run: bool,
) -> Result<()> {
    match command {
        ClusterCommands::Create {
            vm_driver,
            proxy,
            kubeconfig,
        } => cluster::create(
            settings,
            &ClusterOptions {
                vm_driver,
                proxy,
                kubeconfig,
                dry_run,
            },
        ),
        ClusterCommands::Delete { kubeconfig, yes } => cluster::delete(
            settings,
            &ClusterOptions {
                kubeconfig,
                dry_run,
                ..Default::default()
            },
            yes,
        ),
        ClusterCommands::Kubeconfig { kubeconfig } => cluster::kubeconfig(
            settings,
            &ClusterOptions {
                kubeconfig,
                ..Default::default()
            },
        ),
    }
}

fn handle_check_command(settings: &Settings) -> Result<()> {
    log_info!("Checking prerequisites...");

    let minikube = CommonPrereqs::minikube_binary(&settings.minikube.binary);
    let kubectl = CommonPrereqs::kubectl();
    let prereqs: Vec<&dyn Prerequisite> = vec![&minikube, &kubectl];

    let report = CommonPrereqs::check_all(&prereqs);

    for name in &report.found {
        println!("  {} {}", "✓".green(), name);
    }
    for (name, hint) in &report.missing_optional {
        println!("  {} {} (optional) - {}", "!".yellow(), name, hint);
    }
    for (name, hint) in &report.missing {
        println!("  {} {} - {}", "✗".red(), name, hint);
    }

    if let Some(err) = report.missing_error() {
        display_error_and_exit(err);
    }

    println!();
    println!("{}", "All prerequisites satisfied!".green());
    Ok(())
}

fn handle_config_command(command: ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::Example => {
            print!("{}", Settings::example_config()?);
            Ok(())
        }
    }
}

fn handle_completion_command(shell: Shell) -> Result<()> {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "minikube-dev", &mut io::stdout());
    Ok(())
}

fn handle_version_command() -> Result<()> {
    println!("minikube-dev {}", env!("CARGO_PKG_VERSION"));
    println!("Development CLI tool for local minikube clusters");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_cluster_create() {
        let cli = Cli::try_parse_from([
            "minikube-dev",
            "-vv",
            "--dry-run",
            "cluster",
            "create",
            "--vm-driver",
            "kvm2",
            "--proxy",
            "http://example.com:8080",
            "--kubeconfig",
            "dev.kubeconfig",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 2);
        assert!(cli.dry_run);
        match cli.command {
            Commands::Cluster {
                command:
                    ClusterCommands::Create {
                        vm_driver,
                        proxy,
                        kubeconfig,
                    },
            } => {
                assert_eq!(vm_driver.as_deref(), Some("kvm2"));
                assert_eq!(proxy.as_deref(), Some("http://example.com:8080"));
                assert_eq!(kubeconfig, Some(PathBuf::from("dev.kubeconfig")));
            }
            _ => panic!("expected cluster create"),
        }
    }

    #[test]
    fn test_dry_run_banner_only_for_changing_commands() {
        let parse = |args: &[&str]| Cli::try_parse_from(args).unwrap().command;

        assert!(announces_dry_run(&parse(&["minikube-dev", "cluster", "create"])));
        assert!(announces_dry_run(&parse(&["minikube-dev", "cluster", "delete", "-y"])));
        assert!(!announces_dry_run(&parse(&["minikube-dev", "cluster", "kubeconfig"])));
        assert!(!announces_dry_run(&parse(&["minikube-dev", "config", "example"])));
        assert!(!announces_dry_run(&parse(&["minikube-dev", "version"])));
    }

    #[test]
    fn test_parse_cluster_delete_yes() {
        let cli = Cli::try_parse_from(["minikube-dev", "cluster", "delete", "-y"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Cluster {
                command: ClusterCommands::Delete { yes: true, .. }
            }
        ));
    }
}
