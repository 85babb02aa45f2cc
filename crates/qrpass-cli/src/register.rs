//! # Register Subcommand
//!
//! Stores the registrant profile that `issue` signs. Registration is
//! one-shot; `--force` replaces an existing profile.
//!
//! ```bash
//! qrpass register --name "Ana" --id 2100123 --section BSCS-1 \
//!     --email ana@x.com --gender F --phone 09171234567
//! ```

use anyhow::{Context, Result};
use clap::Args;

use qrpass_core::{register, Profile, QrpassError, StudentId};

use crate::config::Config;

/// Arguments for the `register` subcommand.
#[derive(Args, Debug)]
pub struct RegisterArgs {
    /// Full name.
    #[arg(long)]
    pub name: String,

    /// Student ID. Digits are reformatted to `xx-xxxxx`.
    #[arg(long)]
    pub id: String,

    /// Section or organization.
    #[arg(long)]
    pub section: String,

    /// Email address.
    #[arg(long)]
    pub email: String,

    /// Gender.
    #[arg(long)]
    pub gender: String,

    /// Phone number (at least 10 digits).
    #[arg(long = "phone")]
    pub phone_number: String,

    /// Designation.
    #[arg(long)]
    pub designation: Option<String>,

    /// Nature of participation.
    #[arg(long = "participation")]
    pub participation_nature: Option<String>,

    /// Replace an existing registration.
    #[arg(long)]
    pub force: bool,
}

impl RegisterArgs {
    /// Build the profile as the form would submit it.
    pub fn to_profile(&self) -> Profile {
        Profile {
            name: self.name.clone(),
            id: StudentId::format_input(&self.id),
            section: self.section.clone(),
            email: self.email.clone(),
            gender: self.gender.clone(),
            phone_number: self.phone_number.clone(),
            designation: self.designation.clone(),
            participation_nature: self.participation_nature.clone(),
        }
    }
}

/// Execute the register subcommand.
pub fn run_register(args: &RegisterArgs, config: &Config) -> Result<u8> {
    let mut store = config.store();
    match register(&mut store, args.to_profile(), args.force) {
        Ok(profile) => {
            println!("Registered {} ({})", profile.name, profile.id);
            Ok(0)
        }
        Err(QrpassError::Validation(e)) => {
            eprintln!("{e}");
            Ok(1)
        }
        Err(QrpassError::AlreadyRegistered { id }) => {
            eprintln!("Already registered as {id}; pass --force to replace");
            Ok(1)
        }
        Err(e) => Err(e).with_context(|| {
            format!("writing profile store: {}", store.path().display())
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qrpass_core::ProfileStore;

    fn args() -> RegisterArgs {
        RegisterArgs {
            name: "Ana".into(),
            id: "2100123".into(),
            section: "BSCS-1".into(),
            email: "ana@x.com".into(),
            gender: "F".into(),
            phone_number: "09171234567".into(),
            designation: None,
            participation_nature: None,
            force: false,
        }
    }

    fn config(dir: &tempfile::TempDir) -> Config {
        Config {
            profile_store: dir.path().join("profile.json"),
            ..Config::default()
        }
    }

    #[test]
    fn id_is_reformatted() {
        assert_eq!(args().to_profile().id, "21-00123");
    }

    #[test]
    fn register_then_refuse_then_force() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(&dir);
        assert_eq!(run_register(&args(), &config).unwrap(), 0);
        assert_eq!(run_register(&args(), &config).unwrap(), 1);

        let mut replace = args();
        replace.name = "Ben".into();
        replace.force = true;
        assert_eq!(run_register(&replace, &config).unwrap(), 0);
        assert_eq!(config.store().load().unwrap().unwrap().name, "Ben");
    }

    #[test]
    fn invalid_profile_exits_one_without_storing() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(&dir);
        let mut bad = args();
        bad.gender = "Select Gender".into();
        assert_eq!(run_register(&bad, &config).unwrap(), 1);
        assert!(config.store().load().unwrap().is_none());
    }
}
