//! Unit and end-to-end tests for the `tplb` CLI.
#![expect(
    clippy::panic,
    reason = "Tests assert panic branches to surface unexpected CLI outcomes"
)]

use super::*;
use crate::config::{
    ARG_LATITUDE, ARG_LONGITUDE, BrowseConfig, ENV_LATITUDE, ENV_LONGITUDE,
    config_from_layers_for_test,
};

mod helpers;
