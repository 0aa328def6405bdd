//! Subscriber setup for the spans emitted during key construction,
//! finalisation and transcript coding.

use std::sync::OnceLock;

use tracing_subscriber::EnvFilter;

/// Environment variable read when no directive is passed
pub const LOG_ENV: &str = "IVC_FLAVOR_LOG";

const DEFAULT_DIRECTIVE: &str = "info";

static INSTALLED: OnceLock<bool> = OnceLock::new();

fn filter(directive: Option<&str>) -> EnvFilter {
    let directive = directive
        .filter(|d| !d.trim().is_empty())
        .map(str::to_owned)
        .or_else(|| std::env::var(LOG_ENV).ok())
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| DEFAULT_DIRECTIVE.to_owned());

    EnvFilter::try_new(&directive).unwrap_or_else(|err| {
        eprintln!("ignoring log directive '{directive}': {err}");
        EnvFilter::new(DEFAULT_DIRECTIVE)
    })
}

/// Install a compact fmt subscriber for this process.
///
/// `directive` is an `EnvFilter` string such as `ivc_flavor=debug`. Without
/// one, `IVC_FLAVOR_LOG`, then `RUST_LOG`, then `info` is used. Only the
/// first call has an effect; returns whether this crate's subscriber is the
/// one installed.
pub fn init_with_level(directive: Option<&str>) -> bool {
    *INSTALLED.get_or_init(|| {
        tracing_subscriber::fmt()
            .with_env_filter(filter(directive))
            .with_target(true)
            .compact()
            .try_init()
            .is_ok()
    })
}
