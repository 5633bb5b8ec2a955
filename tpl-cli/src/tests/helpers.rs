//! Shared fixtures for the CLI tests.

use super::*;
use camino::Utf8PathBuf;
use tpl_core::FixedLocation;
use tpl_data::DecodePolicy;

/// Directory holding a well-formed copy of the three datasets.
pub(super) fn bundle_dir() -> Utf8PathBuf {
    Utf8PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../tpl-data/tests/fixtures/bundle")
}

/// Directory holding a broken branches file, truncated visits and no events.
pub(super) fn malformed_dir() -> Utf8PathBuf {
    Utf8PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../tpl-data/tests/fixtures/malformed")
}

/// Position of the Toronto Reference Library.
pub(super) const AT_REFERENCE: FixedLocation = FixedLocation::new(43.6719, -79.3867);

pub(super) fn config_for(
    data_dir: Utf8PathBuf,
    location: Option<FixedLocation>,
    policy: DecodePolicy,
) -> BrowseConfig {
    BrowseConfig {
        data_dir,
        location,
        policy,
    }
}

/// Run `command` and return its output alongside the outcome.
pub(super) fn run_capture(
    command: &Command,
    config: &BrowseConfig,
) -> (String, Result<(), CliError>) {
    let mut buffer = Vec::new();
    let outcome = crate::commands::run_command(command, config, &mut buffer);
    let text = String::from_utf8(buffer).unwrap_or_else(|err| panic!("utf-8 output: {err}"));
    (text, outcome)
}
