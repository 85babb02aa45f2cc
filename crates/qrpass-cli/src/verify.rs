//! # Verify Subcommand
//!
//! Validates a scanned payload and prints the verdict JSON.
//!
//! ```bash
//! qrpass verify '{"id":"21-00123",...}'
//! zbarimg --raw -q pass.png | qrpass verify -
//! ```
//!
//! Exits 0 for a valid credential and 1 otherwise.

use std::io::Read;

use anyhow::{Context, Result};
use clap::Args;

use qrpass_credential::{Verdict, Verifier};
use qrpass_crypto::KeyProvider;

use crate::config::Config;

/// Arguments for the `verify` subcommand.
#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Decoded QR text. Read from stdin when omitted or `-`.
    pub payload: Option<String>,
}

/// Execute the verify subcommand.
pub fn run_verify(args: &VerifyArgs, config: &Config) -> Result<u8> {
    let text = read_payload(args.payload.as_deref(), std::io::stdin().lock())?;
    let verifier = Verifier::new(config.key_provider()?);
    let verdict = check(&verifier, &text);
    println!("{}", serde_json::to_string(&verdict)?);
    Ok(if verdict.is_valid() { 0 } else { 1 })
}

/// Validate one scanned payload.
pub fn check<K: KeyProvider>(verifier: &Verifier<K>, text: &str) -> Verdict {
    let verdict = verifier.validate(text);
    match verdict.reason() {
        None => tracing::info!("credential valid"),
        Some(reason) => tracing::info!(%reason, "credential rejected"),
    }
    verdict
}

/// The payload argument, or all of `stdin` when the argument is absent or
/// `-`. A trailing line break from the scanner is dropped.
pub fn read_payload(arg: Option<&str>, mut stdin: impl Read) -> Result<String> {
    let text = match arg {
        Some(text) if text != "-" => text.to_string(),
        _ => {
            let mut buf = String::new();
            stdin
                .read_to_string(&mut buf)
                .context("reading payload from stdin")?;
            buf
        }
    };
    Ok(text.trim_end_matches(['\r', '\n']).to_string())
}
