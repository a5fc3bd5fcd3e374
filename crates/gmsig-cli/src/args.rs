use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug, Clone)]
#[command(name = "gmsig", version, about = "Sign and verify golden measurements in JSON documents")]
pub struct Cli {
    /// Emit JSON output on stdout.
    #[arg(long, global = true)]
    pub json: bool,

    /// Increase log verbosity (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(flatten)]
    pub signing: SigningArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Options shared by every command that canonicalizes a measurement.
#[derive(Args, Debug, Clone)]
pub struct SigningArgs {
    /// Document field holding the measurement.
    #[arg(long, global = true, default_value = gmsig_core::fields::GOLDEN_MEASUREMENT)]
    pub measurement_field: String,

    /// Document field holding the base64 signature.
    #[arg(long, global = true, default_value = gmsig_core::fields::SIGNATURE)]
    pub signature_field: String,

    /// Emit non-ASCII characters as raw UTF-8 instead of \uXXXX escapes.
    #[arg(long, global = true)]
    pub raw_unicode: bool,

    /// Reject measurements containing non-integer numbers.
    #[arg(long, global = true)]
    pub integers_only: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Sign the measurement of a JSON document with a PEM private key.
    Sign {
        /// Input JSON document.
        document: PathBuf,

        /// PEM private key (PKCS#8, PKCS#1 or SEC1; unencrypted).
        key: PathBuf,

        /// Where to write the signed document.
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Verify a signed JSON document with a PEM public key.
    Verify {
        /// Signed JSON document.
        document: PathBuf,

        /// PEM public key (SubjectPublicKeyInfo or PKCS#1).
        key: PathBuf,
    },

    /// Print the canonical bytes of a document's measurement and their SHA-256.
    Canonicalize {
        /// Input JSON document.
        document: PathBuf,
    },
}
