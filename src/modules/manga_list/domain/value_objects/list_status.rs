use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Who can see a manga list.
#[derive(
    diesel_derive_enum::DbEnum,
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
)]
#[ExistingTypePath = "crate::schema::sql_types::MangaListStatus"]
#[serde(rename_all = "UPPERCASE")]
pub enum MangaListStatus {
    #[default]
    #[db_rename = "PRIVATE"]
    Private,
    #[db_rename = "PUBLIC"]
    Public,
    #[db_rename = "UNLISTED"]
    Unlisted,
}

impl MangaListStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MangaListStatus::Private => "PRIVATE",
            MangaListStatus::Public => "PUBLIC",
            MangaListStatus::Unlisted => "UNLISTED",
        }
    }

    /// Whether the list shows up in public listings
    pub fn is_discoverable(&self) -> bool {
        matches!(self, MangaListStatus::Public)
    }
}

impl fmt::Display for MangaListStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MangaListStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "PRIVATE" => Ok(MangaListStatus::Private),
            "PUBLIC" => Ok(MangaListStatus::Public),
            "UNLISTED" => Ok(MangaListStatus::Unlisted),
            _ => Err(format!("Invalid list status: {}", s)),
        }
    }
}
