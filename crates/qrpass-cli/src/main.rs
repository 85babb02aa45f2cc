//! # qrpass CLI entry point
//!
//! Parses command-line arguments, installs logging, loads configuration
//! and dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use qrpass_cli::config::Config;
use qrpass_cli::issue::{run_issue, IssueArgs};
use qrpass_cli::register::{run_register, RegisterArgs};
use qrpass_cli::show::{run_show, ShowArgs};
use qrpass_cli::verify::{run_verify, VerifyArgs};

/// QR Pass: signed, time-boxed QR credentials.
///
/// Registers a holder profile, issues a payload that expires at the end of
/// the local day, and verifies scanned payloads.
#[derive(Parser, Debug)]
#[command(name = "qrpass", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    log_json: bool,

    /// Path to a YAML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate and store the registrant profile.
    Register(RegisterArgs),

    /// Print the stored registrant profile.
    Show(ShowArgs),

    /// Issue a signed credential payload for the stored profile.
    Issue(IssueArgs),

    /// Validate a scanned credential payload.
    Verify(VerifyArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // RUST_LOG wins over -v when set.
    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    if cli.log_json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    tracing::debug!("qrpass CLI v{} starting", env!("CARGO_PKG_VERSION"));

    let result = Config::load(cli.config.as_deref()).and_then(|config| {
        tracing::debug!(
            store = %config.profile_store.display(),
            policy = %config.expiry_policy,
            "configuration loaded"
        );
        match &cli.command {
            Commands::Register(args) => run_register(args, &config),
            Commands::Show(args) => run_show(args, &config),
            Commands::Issue(args) => run_issue(args, &config),
            Commands::Verify(args) => run_verify(args, &config),
        }
    });

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qrpass_core::ExpiryPolicy;

    #[test]
    fn cli_parse_register() {
        let cli = Cli::try_parse_from([
            "qrpass",
            "register",
            "--name",
            "Ana",
            "--id",
            "2100123",
            "--section",
            "BSCS-1",
            "--email",
            "ana@x.com",
            "--gender",
            "F",
            "--phone",
            "09171234567",
            "--participation",
            "Participant",
        ])
        .unwrap();
        if let Commands::Register(args) = cli.command {
            assert_eq!(args.name, "Ana");
            assert_eq!(args.phone_number, "09171234567");
            assert_eq!(args.participation_nature.as_deref(), Some("Participant"));
            assert!(args.designation.is_none());
            assert!(!args.force);
        } else {
            panic!("expected register");
        }
    }

    #[test]
    fn cli_parse_register_missing_field() {
        assert!(Cli::try_parse_from(["qrpass", "register", "--name", "Ana"]).is_err());
    }

    #[test]
    fn cli_parse_issue_watch_and_policy() {
        let cli =
            Cli::try_parse_from(["qrpass", "issue", "--watch", "--policy", "next-midnight"])
                .unwrap();
        if let Commands::Issue(args) = cli.command {
            assert!(args.watch);
            assert_eq!(args.policy, Some(ExpiryPolicy::NextMidnight));
        } else {
            panic!("expected issue");
        }
    }

    #[test]
    fn cli_parse_issue_rejects_unknown_policy() {
        assert!(Cli::try_parse_from(["qrpass", "issue", "--policy", "weekly"]).is_err());
    }

    #[test]
    fn cli_parse_verify_forms() {
        let cli = Cli::try_parse_from(["qrpass", "verify"]).unwrap();
        assert!(matches!(cli.command, Commands::Verify(VerifyArgs { payload: None })));

        let cli = Cli::try_parse_from(["qrpass", "verify", "-"]).unwrap();
        if let Commands::Verify(args) = cli.command {
            assert_eq!(args.payload.as_deref(), Some("-"));
        }
    }

    #[test]
    fn cli_parse_global_flags() {
        let cli = Cli::try_parse_from(["qrpass", "show", "-vv", "--config", "q.yaml", "--json"])
            .unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.config, Some(PathBuf::from("q.yaml")));
        assert!(matches!(cli.command, Commands::Show(ShowArgs { json: true })));
    }
}
