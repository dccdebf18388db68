use serde::{Deserialize, Serialize};
use std::fmt;

use crate::enum_display_fromstr;
use crate::error::UserdexError;

/// Name of the per-directory fallback root when no platform data dir is available.
pub const USERDEX_DIR: &str = ".userdex";

/// Largest batch the directory API accepts in one call.
pub const MAX_RESULTS: u32 = 5000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

enum_display_fromstr!(Gender, UserdexError::InvalidGender, {
    Male => "male",
    Female => "female",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Nationality {
    Au,
    Br,
    Ca,
    Ch,
    De,
    Dk,
    Es,
    Fi,
    Fr,
    Gb,
    Ie,
    In,
    Ir,
    Mx,
    Nl,
    No,
    Nz,
    Rs,
    Tr,
    Ua,
    Us,
}

enum_display_fromstr!(Nationality, UserdexError::InvalidNationality, {
    Au => "AU",
    Br => "BR",
    Ca => "CA",
    Ch => "CH",
    De => "DE",
    Dk => "DK",
    Es => "ES",
    Fi => "FI",
    Fr => "FR",
    Gb => "GB",
    Ie => "IE",
    In => "IN",
    Ir => "IR",
    Mx => "MX",
    Nl => "NL",
    No => "NO",
    Nz => "NZ",
    Rs => "RS",
    Tr => "TR",
    Ua => "UA",
    Us => "US",
});

/// Field groups accepted by the `inc` and `exc` query parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Gender,
    Name,
    Location,
    Email,
    Login,
    Registered,
    Dob,
    Phone,
    Cell,
    Id,
    Picture,
    Nat,
}

enum_display_fromstr!(Field, UserdexError::InvalidField, {
    Gender => "gender",
    Name => "name",
    Location => "location",
    Email => "email",
    Login => "login",
    Registered => "registered",
    Dob => "dob",
    Phone => "phone",
    Cell => "cell",
    Id => "id",
    Picture => "picture",
    Nat => "nat",
});

/// Response formats the directory API can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ApiFormat {
    #[default]
    Json,
    Pretty,
    PrettyJson,
    Csv,
    Yaml,
    Xml,
}

enum_display_fromstr!(ApiFormat, UserdexError::InvalidFormat, {
    Json => "json",
    Pretty => "pretty",
    PrettyJson => "prettyjson",
    Csv => "csv",
    Yaml => "yaml",
    Xml => "xml",
});

impl ApiFormat {
    /// Whether the response body for this format is JSON we can decode.
    pub fn is_json(&self) -> bool {
        matches!(self, ApiFormat::Json | ApiFormat::Pretty | ApiFormat::PrettyJson)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Name {
    pub title: String,
    pub first: String,
    pub last: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Street {
    pub number: u32,
    pub name: String,
}

/// Postal code as sent by the API; some nationalities use numeric codes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Postcode {
    Number(i64),
    Text(String),
}

impl Default for Postcode {
    fn default() -> Self {
        Postcode::Text(String::new())
    }
}

impl fmt::Display for Postcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Postcode::Number(n) => write!(f, "{}", n),
            Postcode::Text(s) => write!(f, "{}", s),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Coordinates {
    pub latitude: String,
    pub longitude: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timezone {
    pub offset: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Location {
    pub street: Street,
    pub city: String,
    pub state: String,
    pub country: String,
    pub postcode: Postcode,
    pub coordinates: Coordinates,
    pub timezone: Timezone,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Login {
    pub uuid: String,
    pub username: String,
    pub password: String,
    pub salt: String,
    pub md5: String,
    pub sha1: String,
    pub sha256: String,
}

/// A date together with the whole number of years elapsed since it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DateInfo {
    pub date: String,
    pub age: u32,
}

/// Government identifier (for example SSN or TFN); the value is often null.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NationalId {
    pub name: String,
    pub value: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Picture {
    pub large: String,
    pub medium: String,
    pub thumbnail: String,
}

/// One user record as returned by the directory API.
///
/// Every group defaults when absent so that responses narrowed with
/// `inc`/`exc` still decode.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    pub gender: String,
    pub name: Name,
    pub location: Location,
    pub email: String,
    pub login: Login,
    pub dob: DateInfo,
    pub registered: DateInfo,
    pub phone: String,
    pub cell: String,
    #[serde(rename = "id")]
    pub national_id: NationalId,
    pub picture: Picture,
    pub nat: String,
}

impl User {
    /// Globally unique identifier of the record.
    pub fn id(&self) -> &str {
        &self.login.uuid
    }

    /// "first last"
    pub fn full_name(&self) -> String {
        format!("{} {}", self.name.first, self.name.last)
    }

    /// "title first last"
    pub fn display_name(&self) -> String {
        format!("{} {} {}", self.name.title, self.name.first, self.name.last)
            .trim()
            .to_string()
    }

    pub fn full_address(&self) -> String {
        let loc = &self.location;
        format!(
            "{} {}, {}, {} {}, {}",
            loc.street.number, loc.street.name, loc.city, loc.state, loc.postcode, loc.country
        )
    }
}

/// Server-reported metadata accompanying a batch. Any field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchMeta {
    pub seed: Option<String>,
    pub results: Option<u32>,
    pub page: Option<u32>,
    pub version: Option<String>,
}

/// Result of one remote fetch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Batch {
    #[serde(default)]
    pub results: Vec<User>,
    #[serde(default)]
    pub info: Option<FetchMeta>,
}

impl Batch {
    pub fn new(results: Vec<User>) -> Self {
        Batch {
            results,
            info: None,
        }
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}
