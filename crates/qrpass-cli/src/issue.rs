//! # Issue Subcommand
//!
//! Signs the stored profile into a fresh credential payload.
//!
//! The payload JSON goes to stdout so it can be piped into a QR encoder.
//! A human-readable summary goes to stderr. With `--watch` the command
//! stays in the foreground with a live validity countdown until expiry or
//! ctrl-c.

use anyhow::{Context, Result};
use clap::Args;

use qrpass_core::{ExpiryPolicy, Profile, ProfileStore};
use qrpass_credential::{IssuedCredential, Issuer};

use crate::config::Config;
use crate::countdown::{Countdown, CountdownEnd};

/// Arguments for the `issue` subcommand.
#[derive(Args, Debug)]
pub struct IssueArgs {
    /// Keep running and show the remaining validity every second.
    #[arg(long)]
    pub watch: bool,

    /// Override the configured expiry policy (end-of-day, next-midnight).
    #[arg(long)]
    pub policy: Option<ExpiryPolicy>,
}

/// Execute the issue subcommand.
pub fn run_issue(args: &IssueArgs, config: &Config) -> Result<u8> {
    let mut store = config.store();
    let profile = store
        .load()
        .with_context(|| format!("reading profile store: {}", store.path().display()))?;
    let Some(profile) = profile else {
        eprintln!("No registration found; run `qrpass register` first");
        return Ok(1);
    };

    let policy = args.policy.unwrap_or(config.expiry_policy);
    let issuer = Issuer::new(config.key_provider()?).with_policy(policy);
    let issued = issuer
        .issue(&profile)
        .with_context(|| format!("issuing credential for {}", profile.id))?;

    println!("{}", issued.serialized);
    eprint!("{}", summary(&profile, &issued));

    if args.watch {
        let end = watch(issued.expires_at)?;
        tracing::debug!(?end, "countdown stopped");
    }
    Ok(0)
}

/// The info block shown beside the QR code.
///
/// The length is counted in UTF-16 units, as the QR encoder's input
/// length is reported by the deployed clients.
pub fn summary(profile: &Profile, issued: &IssuedCredential) -> String {
    format!(
        "Student: {}\nID: {}\nSection: {}\nExpires: {}\nQR Code: {} characters\n",
        profile.name,
        profile.id,
        profile.section,
        issued.expires_at.to_local_string(),
        issued.serialized.encode_utf16().count(),
    )
}

fn watch(expires_at: qrpass_core::EpochMillis) -> Result<CountdownEnd> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("starting countdown runtime")?;

    runtime.block_on(async {
        let mut handle = Countdown::new(expires_at).spawn(|line| eprintln!("{line}"));
        let end = tokio::select! {
            end = handle.finished() => end,
            _ = tokio::signal::ctrl_c() => CountdownEnd::Cancelled,
        };
        handle.cancel();
        Ok(end)
    })
}
