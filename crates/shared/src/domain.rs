use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(raw: impl Into<String>) -> Self {
                Self(raw.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

id_newtype!(UserId);
id_newtype!(SvcId);

/// Officer grade carried by a service-credential record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rank {
    Constable,
    Sergeant,
    #[serde(rename = "Sub Inspector")]
    SubInspector,
    Inspector,
    #[serde(rename = "Chief Inspector")]
    ChiefInspector,
    Superintendent,
    #[serde(rename = "Assistant Superintendent")]
    AssistantSuperintendent,
    #[serde(rename = "Deputy Inspector General")]
    DeputyInspectorGeneral,
    #[serde(rename = "Inspector General")]
    InspectorGeneral,
}

impl Rank {
    pub const ALL: [Rank; 9] = [
        Rank::Constable,
        Rank::Sergeant,
        Rank::SubInspector,
        Rank::Inspector,
        Rank::ChiefInspector,
        Rank::Superintendent,
        Rank::AssistantSuperintendent,
        Rank::DeputyInspectorGeneral,
        Rank::InspectorGeneral,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Rank::Constable => "Constable",
            Rank::Sergeant => "Sergeant",
            Rank::SubInspector => "Sub Inspector",
            Rank::Inspector => "Inspector",
            Rank::ChiefInspector => "Chief Inspector",
            Rank::Superintendent => "Superintendent",
            Rank::AssistantSuperintendent => "Assistant Superintendent",
            Rank::DeputyInspectorGeneral => "Deputy Inspector General",
            Rank::InspectorGeneral => "Inspector General",
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Assignment location associated with a user or SVC record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Station {
    #[serde(rename = "Colombo Central")]
    ColomboCentral,
    #[serde(rename = "Kandy Central")]
    KandyCentral,
    #[serde(rename = "Galle Central")]
    GalleCentral,
    #[serde(rename = "Matara Central")]
    MataraCentral,
    #[serde(rename = "Kurunegala Central")]
    KurunegalaCentral,
    #[serde(rename = "Anuradhapura Central")]
    AnuradhapuraCentral,
    #[serde(rename = "Ratnapura Central")]
    RatnapuraCentral,
    #[serde(rename = "Badulla Central")]
    BadullaCentral,
}

impl Station {
    pub const ALL: [Station; 8] = [
        Station::ColomboCentral,
        Station::KandyCentral,
        Station::GalleCentral,
        Station::MataraCentral,
        Station::KurunegalaCentral,
        Station::AnuradhapuraCentral,
        Station::RatnapuraCentral,
        Station::BadullaCentral,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Station::ColomboCentral => "Colombo Central",
            Station::KandyCentral => "Kandy Central",
            Station::GalleCentral => "Galle Central",
            Station::MataraCentral => "Matara Central",
            Station::KurunegalaCentral => "Kurunegala Central",
            Station::AnuradhapuraCentral => "Anuradhapura Central",
            Station::RatnapuraCentral => "Ratnapura Central",
            Station::BadullaCentral => "Badulla Central",
        }
    }
}

impl fmt::Display for Station {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Credential number in the `SVC` + 3-6 digits format, validated at entry.
/// The server is trusted to keep numbers unique; this type only guards shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SvcNumber(String);

impl SvcNumber {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for SvcNumber {
    type Err = DomainError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let digits = raw
            .strip_prefix("SVC")
            .ok_or_else(|| DomainError::InvalidSvcNumber(raw.to_string()))?;
        let digit_count = digits.chars().count();
        if !(3..=6).contains(&digit_count) || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(DomainError::InvalidSvcNumber(raw.to_string()));
        }
        Ok(Self(raw.to_string()))
    }
}

impl TryFrom<String> for SvcNumber {
    type Error = DomainError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        raw.parse()
    }
}

impl From<SvcNumber> for String {
    fn from(value: SvcNumber) -> Self {
        value.0
    }
}

impl fmt::Display for SvcNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Personnel account as served by the backend. Everything except the id is
/// optional on the wire; consumers substitute "N/A"/"Unknown" when rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    #[serde(rename = "_id")]
    pub id: UserId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(rename = "officerSVC", default, skip_serializing_if = "Option::is_none")]
    pub officer_svc: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub officer_rank: Option<Rank>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub police_station: Option<Station>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Service-credential record for an officer, distinct from the user account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SvcRecord {
    #[serde(rename = "_id")]
    pub id: SvcId,
    #[serde(rename = "officerSVC")]
    pub officer_svc: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub officer_rank: Option<Rank>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub police_station: Option<Station>,
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Candidate SVC for create/update/bulk-create, validated at entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SvcDraft {
    #[serde(rename = "officerSVC")]
    pub officer_svc: SvcNumber,
    pub officer_rank: Rank,
    pub police_station: Station,
}
