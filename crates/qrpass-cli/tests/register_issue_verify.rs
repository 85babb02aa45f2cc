//! Full holder → scanner flow through the subcommand handlers, sharing a
//! config file on disk.

use qrpass_cli::config::Config;
use qrpass_cli::register::{run_register, RegisterArgs};
use qrpass_cli::verify::{run_verify, VerifyArgs};
use qrpass_core::{ExpiryPolicy, ProfileStore};
use qrpass_credential::Issuer;

fn register_args() -> RegisterArgs {
    RegisterArgs {
        name: "Ana".into(),
        id: "21-00123".into(),
        section: "BSCS-1".into(),
        email: "ana@x.com".into(),
        gender: "F".into(),
        phone_number: "09171234567".into(),
        designation: Some("Student".into()),
        participation_nature: Some("Participant".into()),
        force: false,
    }
}

fn write_config(dir: &tempfile::TempDir, key_env: &str) -> Config {
    let path = dir.path().join("qrpass.yaml");
    std::fs::write(
        &path,
        format!(
            "profile_store: {}\nexpiry_policy: next-midnight\nkey_env: {key_env}\n",
            dir.path().join("profile.json").display()
        ),
    )
    .unwrap();
    Config::load(Some(&path)).unwrap()
}

#[test]
fn registered_holder_passes_verification() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(&dir, "QRPASS_TEST_FLOW_KEY_UNSET");
    assert_eq!(config.expiry_policy, ExpiryPolicy::NextMidnight);

    assert_eq!(run_register(&register_args(), &config).unwrap(), 0);

    let profile = config.store().load().unwrap().unwrap();
    let issued = Issuer::new(config.key_provider().unwrap())
        .with_policy(config.expiry_policy)
        .issue(&profile)
        .unwrap();

    let args = VerifyArgs {
        payload: Some(issued.serialized.clone()),
    };
    assert_eq!(run_verify(&args, &config).unwrap(), 0);

    let tampered = VerifyArgs {
        payload: Some(issued.serialized.replace("\"Ana\"", "\"Eve\"")),
    };
    assert_eq!(run_verify(&tampered, &config).unwrap(), 1);
}

#[test]
fn scanner_with_different_key_rejects() {
    let dir = tempfile::tempdir().unwrap();
    let holder = write_config(&dir, "QRPASS_TEST_FLOW_HOLDER_UNSET");
    run_register(&register_args(), &holder).unwrap();
    let profile = holder.store().load().unwrap().unwrap();
    let issued = Issuer::new(holder.key_provider().unwrap())
        .issue(&profile)
        .unwrap();

    std::env::set_var("QRPASS_TEST_FLOW_SCANNER_KEY", "rotated-key");
    let scanner = write_config(&dir, "QRPASS_TEST_FLOW_SCANNER_KEY");
    let args = VerifyArgs {
        payload: Some(issued.serialized),
    };
    assert_eq!(run_verify(&args, &scanner).unwrap(), 1);
}
