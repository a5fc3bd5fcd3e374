use std::process::ExitCode;

use anyhow::Result;
use gmsig_core::canonical::{CanonicalJsonOptions, NumberPolicy};
use gmsig_core::config::{validate_config, FieldNames, SignerConfig};

use crate::args::{Cli, Command, SigningArgs};

mod canonicalize;
mod sign;
mod verify;

pub fn dispatch(cli: Cli) -> Result<ExitCode> {
    let cfg = signer_config(&cli.signing)?;
    match cli.command {
        Command::Sign { document, key, output } => sign::run(&cfg, &document, &key, &output),
        Command::Verify { document, key } => verify::run(&cfg, &document, &key),
        Command::Canonicalize { document } => canonicalize::run(&cfg, &document),
    }
}

fn signer_config(args: &SigningArgs) -> Result<SignerConfig> {
    let cfg = SignerConfig {
        fields: FieldNames {
            measurement: args.measurement_field.clone(),
            signature: args.signature_field.clone(),
        },
        canonical: CanonicalJsonOptions {
            escape_non_ascii: !args.raw_unicode,
            numbers: if args.integers_only {
                NumberPolicy::IntegersOnly
            } else {
                NumberPolicy::ShortestRoundTrip
            },
        },
        ..SignerConfig::default()
    };
    validate_config(&cfg)?;
    Ok(cfg)
}
