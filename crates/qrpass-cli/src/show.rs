//! # Show Subcommand
//!
//! Prints the stored registrant profile.

use anyhow::{Context, Result};
use clap::Args;

use qrpass_core::{Profile, ProfileField, ProfileStore};

use crate::config::Config;

/// Arguments for the `show` subcommand.
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Print the stored JSON instead of labelled lines.
    #[arg(long)]
    pub json: bool,
}

/// Execute the show subcommand.
pub fn run_show(args: &ShowArgs, config: &Config) -> Result<u8> {
    let mut store = config.store();
    let profile = store
        .load()
        .with_context(|| format!("reading profile store: {}", store.path().display()))?;
    let Some(profile) = profile else {
        eprintln!("No registration found; run `qrpass register` first");
        return Ok(1);
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&profile)?);
    } else {
        print!("{}", render(&profile));
    }
    Ok(0)
}

/// One `Label: value` line per present field, in canonical order.
pub fn render(profile: &Profile) -> String {
    ProfileField::ALL
        .iter()
        .filter_map(|field| {
            profile
                .get(*field)
                .map(|value| format!("{}: {value}\n", field.label()))
        })
        .collect()
}
