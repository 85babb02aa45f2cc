//! # qrpass-cli — Command-Line Front End for QR Pass
//!
//! Provides the `qrpass` binary.
//!
//! ## Subcommands
//!
//! - `qrpass register`: Validate and store the registrant profile.
//! - `qrpass show`: Print the stored profile.
//! - `qrpass issue`: Sign the stored profile into a QR payload, optionally
//!   with a live validity countdown (`--watch`).
//! - `qrpass verify`: Validate a scanned payload and print the verdict.
//!
//! ```bash
//! qrpass register --name Ana --id 2100123 --section BSCS-1 \
//!     --email ana@x.com --gender F --phone 09171234567
//! qrpass issue | qrencode -l M -o pass.png
//! zbarimg --raw -q pass.png | qrpass verify
//! ```

pub mod config;
pub mod countdown;
pub mod issue;
pub mod register;
pub mod show;
pub mod verify;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_modules_are_accessible() {
        let _ = std::any::type_name::<config::Config>();
        let _ = std::any::type_name::<countdown::CountdownHandle>();
        let _ = std::any::type_name::<issue::IssueArgs>();
        let _ = std::any::type_name::<register::RegisterArgs>();
        let _ = std::any::type_name::<show::ShowArgs>();
        let _ = std::any::type_name::<verify::VerifyArgs>();
    }
}
