//! Library branch records and the services they offer.

use geo::Coord;
use serde::{Deserialize, Serialize};

use crate::de::{COORDINATE_SENTINEL, lenient_degrees};

/// A physical library location.
///
/// Coordinates are WGS84 decimal degrees. The source document stores them as
/// text; anything that does not parse is replaced with
/// [`COORDINATE_SENTINEL`] so that one bad coordinate never rejects the
/// collection.
///
/// # Examples
/// ```
/// use tpl_core::Branch;
///
/// let branch: Branch = serde_json::from_str(r#"{
///     "_id": 1, "BranchCode": "AB", "BranchName": "Albion",
///     "Address": "1515 Albion Road", "PostalCode": "M9V 1B2",
///     "Website": "https://www.torontopubliclibrary.ca/albion",
///     "Telephone": "416-394-5170", "SquareFootage": "29000",
///     "PublicParking": "59", "ServiceTier": "DL", "WardName": "Etobicoke North",
///     "Lat": "43.740", "Long": "-79.584", "KidsStop": 1
/// }"#)?;
/// assert_eq!(branch.branch_code, "AB");
/// assert!((branch.location().y - 43.740).abs() < 1e-9);
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Branch {
    /// Unique record identifier.
    #[serde(rename = "_id")]
    pub id: u64,
    /// Short code linking the branch to its visit records.
    #[serde(rename = "BranchCode")]
    pub branch_code: String,
    /// Display name; events reference the branch through it.
    #[serde(rename = "BranchName")]
    pub branch_name: String,
    /// Street address.
    #[serde(rename = "Address")]
    pub address: String,
    /// Postal code.
    #[serde(rename = "PostalCode")]
    pub postal_code: String,
    /// Branch web page.
    #[serde(rename = "Website")]
    pub website: String,
    /// Contact telephone number.
    #[serde(rename = "Telephone")]
    pub telephone: String,
    /// Floor area as published.
    #[serde(rename = "SquareFootage")]
    pub square_footage: String,
    /// Public parking description as published.
    #[serde(rename = "PublicParking")]
    pub public_parking: String,
    /// Service tier code.
    #[serde(rename = "ServiceTier")]
    pub service_tier: String,
    /// Latitude in decimal degrees.
    #[serde(
        rename = "Lat",
        default,
        deserialize_with = "lenient_degrees"
    )]
    pub latitude: f64,
    /// Longitude in decimal degrees.
    #[serde(
        rename = "Long",
        default,
        deserialize_with = "lenient_degrees"
    )]
    pub longitude: f64,
    /// Service flags.
    #[serde(flatten)]
    pub services: BranchServices,
    /// Number of public workstations.
    #[serde(rename = "Workstations", default)]
    pub workstations: Option<i64>,
    /// Neighbourhood number.
    #[serde(rename = "NBHDNo", default)]
    pub neighbourhood_no: Option<i64>,
    /// Neighbourhood name.
    #[serde(rename = "NBHDName", default)]
    pub neighbourhood_name: Option<String>,
    /// Neighbourhood improvement area marker.
    #[serde(rename = "TPLNIA", default)]
    pub tplnia: Option<i64>,
    /// Ward number.
    #[serde(rename = "WardNo", default)]
    pub ward_no: Option<i64>,
    /// Ward name.
    #[serde(rename = "WardName")]
    pub ward_name: String,
    /// Year the branch moved to its present site.
    #[serde(rename = "PresentSiteYear", default)]
    pub present_site_year: Option<i64>,
}

impl Branch {
    /// Branch position with `x = longitude` and `y = latitude`.
    pub const fn location(&self) -> Coord<f64> {
        Coord {
            x: self.longitude,
            y: self.latitude,
        }
    }

    /// Whether either coordinate component fell back to the sentinel.
    pub fn has_sentinel_location(&self) -> bool {
        self.latitude == COORDINATE_SENTINEL || self.longitude == COORDINATE_SENTINEL
    }

    /// Services this branch offers, in display order.
    pub fn offered_services(&self) -> Vec<Service> {
        Service::ALL
            .into_iter()
            .filter(|service| self.services.offers(*service))
            .collect()
    }
}

/// Nullable service flags. Absence or zero means the service is not offered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchServices {
    /// KidsStop early literacy centre.
    #[serde(rename = "KidsStop", default)]
    pub kids_stop: Option<i64>,
    /// Leading to Reading tutoring.
    #[serde(rename = "LeadingReading", default)]
    pub leading_reading: Option<i64>,
    /// Computer learning centre.
    #[serde(rename = "CLC", default)]
    pub clc: Option<i64>,
    /// Digital innovation hub.
    #[serde(rename = "DIH", default)]
    pub dih: Option<i64>,
    /// Teen council.
    #[serde(rename = "TeenCouncil", default)]
    pub teen_council: Option<i64>,
    /// Youth hub.
    #[serde(rename = "YouthHub", default)]
    pub youth_hub: Option<i64>,
    /// Adult literacy programme.
    #[serde(rename = "AdultLiteracyProgram", default)]
    pub adult_literacy_program: Option<i64>,
}

impl BranchServices {
    /// Whether the flag for `service` is present and non-zero.
    pub const fn offers(&self, service: Service) -> bool {
        let flag = match service {
            Service::KidsStop => self.kids_stop,
            Service::LeadingReading => self.leading_reading,
            Service::Clc => self.clc,
            Service::Dih => self.dih,
            Service::TeenCouncil => self.teen_council,
            Service::YouthHub => self.youth_hub,
            Service::AdultLiteracy => self.adult_literacy_program,
        };
        matches!(flag, Some(value) if value != 0)
    }
}

/// A programme a branch may offer.
///
/// # Examples
/// ```
/// use tpl_core::Service;
///
/// assert_eq!(Service::LeadingReading.label(), "Leading Reading");
/// assert_eq!(Service::Clc.to_string(), "CLC");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Service {
    /// KidsStop early literacy centre.
    KidsStop,
    /// Leading to Reading tutoring.
    LeadingReading,
    /// Computer learning centre.
    Clc,
    /// Digital innovation hub.
    Dih,
    /// Teen council.
    TeenCouncil,
    /// Youth hub.
    YouthHub,
    /// Adult literacy programme.
    AdultLiteracy,
}

impl Service {
    /// Every service in display order.
    pub const ALL: [Self; 7] = [
        Self::KidsStop,
        Self::LeadingReading,
        Self::Clc,
        Self::Dih,
        Self::TeenCouncil,
        Self::YouthHub,
        Self::AdultLiteracy,
    ];

    /// Human-readable badge label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::KidsStop => "KidsStop",
            Self::LeadingReading => "Leading Reading",
            Self::Clc => "CLC",
            Self::Dih => "DIH",
            Self::TeenCouncil => "Teen Council",
            Self::YouthHub => "Youth Hub",
            Self::AdultLiteracy => "Adult Literacy",
        }
    }
}

impl std::fmt::Display for Service {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
