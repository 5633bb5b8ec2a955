//! Layered configuration shared by every subcommand.

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use tpl_core::{FixedLocation, LocationProvider, NoLocation};
use tpl_data::DecodePolicy;

use crate::CliError;

pub(crate) const ARG_DATA_DIR: &str = "data-dir";
pub(crate) const ARG_LATITUDE: &str = "latitude";
pub(crate) const ARG_LONGITUDE: &str = "longitude";
pub(crate) const ARG_TOLERANT: &str = "tolerant";
pub(crate) const ENV_LATITUDE: &str = "TPL_CMDS_BROWSE_LATITUDE";
pub(crate) const ENV_LONGITUDE: &str = "TPL_CMDS_BROWSE_LONGITUDE";

const DEFAULT_DATA_DIR: &str = ".";

/// Options controlling where data comes from and where the user is.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(name = "browse")]
#[ortho_config(prefix = "TPL")]
pub(crate) struct BrowseArgs {
    /// Directory containing the three JSON datasets.
    #[arg(long = ARG_DATA_DIR, value_name = "dir", global = true)]
    #[serde(default)]
    pub(crate) data_dir: Option<Utf8PathBuf>,
    /// Latitude of the user in decimal degrees.
    #[arg(
        long = ARG_LATITUDE,
        value_name = "degrees",
        global = true,
        allow_negative_numbers = true
    )]
    #[serde(default)]
    pub(crate) latitude: Option<f64>,
    /// Longitude of the user in decimal degrees.
    #[arg(
        long = ARG_LONGITUDE,
        value_name = "degrees",
        global = true,
        allow_negative_numbers = true
    )]
    #[serde(default)]
    pub(crate) longitude: Option<f64>,
    /// Skip malformed records instead of rejecting the whole dataset.
    #[arg(long = ARG_TOLERANT, global = true)]
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub(crate) tolerant: bool,
}

impl BrowseArgs {
    pub(crate) fn into_config(self) -> Result<BrowseConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        BrowseConfig::try_from(merged)
    }
}

/// Resolved configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct BrowseConfig {
    /// Bundle directory.
    pub(crate) data_dir: Utf8PathBuf,
    /// Configured position, if both coordinates were given.
    pub(crate) location: Option<FixedLocation>,
    /// Record handling policy.
    pub(crate) policy: DecodePolicy,
}

impl BrowseConfig {
    /// Provider answering location queries for this run.
    pub(crate) fn provider(&self) -> &dyn LocationProvider {
        match &self.location {
            Some(fixed) => fixed,
            None => &NoLocation,
        }
    }

    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        Self::require_directory(&self.data_dir)
    }

    fn require_directory(path: &Utf8Path) -> Result<(), CliError> {
        match tpl_fs::dir_exists(path) {
            Ok(true) => Ok(()),
            Ok(false) => Err(CliError::MissingDataDir {
                path: path.to_path_buf(),
            }),
            Err(source) => Err(CliError::OpenDataDir {
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}

impl TryFrom<BrowseArgs> for BrowseConfig {
    type Error = CliError;

    fn try_from(args: BrowseArgs) -> Result<Self, Self::Error> {
        let data_dir = args
            .data_dir
            .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_DATA_DIR));
        let location = match (args.latitude, args.longitude) {
            (Some(latitude), Some(longitude)) => {
                check_range(ARG_LATITUDE, latitude, 90.0)?;
                check_range(ARG_LONGITUDE, longitude, 180.0)?;
                Some(FixedLocation::new(latitude, longitude))
            }
            (Some(_), None) => {
                return Err(CliError::MissingArgument {
                    field: ARG_LONGITUDE,
                    env: ENV_LONGITUDE,
                });
            }
            (None, Some(_)) => {
                return Err(CliError::MissingArgument {
                    field: ARG_LATITUDE,
                    env: ENV_LATITUDE,
                });
            }
            (None, None) => None,
        };
        let policy = if args.tolerant {
            DecodePolicy::SkipInvalid
        } else {
            DecodePolicy::Strict
        };
        Ok(Self {
            data_dir,
            location,
            policy,
        })
    }
}

fn check_range(field: &'static str, value: f64, limit: f64) -> Result<(), CliError> {
    if (-limit..=limit).contains(&value) {
        Ok(())
    } else {
        Err(CliError::CoordinateOutOfRange {
            field,
            value,
            min: -limit,
            max: limit,
        })
    }
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<BrowseConfig, CliError> {
    let merged = BrowseArgs::merge_from_layers(layers).map_err(CliError::from)?;
    BrowseConfig::try_from(merged)
}
