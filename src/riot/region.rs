use std::fmt;
use std::str::FromStr;

use poise::ChoiceParameter;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid region: {0}")]
pub struct InvalidRegion(pub String);

/// Servers a player can be tracked on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ChoiceParameter)]
pub enum Region {
    #[name = "VN - Vietnam"]
    Vn,
    #[name = "NA - North America"]
    Na,
    #[name = "EUW - EU West"]
    Euw,
    #[name = "EUNE - EU Nordic & East"]
    Eune,
    #[name = "KR - Korea"]
    Kr,
    #[name = "JP - Japan"]
    Jp,
    #[name = "BR - Brazil"]
    Br,
    #[name = "LAN - Latin America North"]
    Lan,
    #[name = "LAS - Latin America South"]
    Las,
    #[name = "OCE - Oceania"]
    Oce,
    #[name = "RU - Russia"]
    Ru,
    #[name = "TR - Turkey"]
    Tr,
}

impl Region {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Vn => "vn",
            Self::Na => "na",
            Self::Euw => "euw",
            Self::Eune => "eune",
            Self::Kr => "kr",
            Self::Jp => "jp",
            Self::Br => "br",
            Self::Lan => "lan",
            Self::Las => "las",
            Self::Oce => "oce",
            Self::Ru => "ru",
            Self::Tr => "tr",
        }
    }

    /// Platform host prefix used by the league endpoints.
    pub fn platform(&self) -> &'static str {
        match self {
            Self::Vn => "vn2",
            Self::Na => "na1",
            Self::Euw => "euw1",
            Self::Eune => "eun1",
            Self::Kr => "kr",
            Self::Jp => "jp1",
            Self::Br => "br1",
            Self::Lan => "la1",
            Self::Las => "la2",
            Self::Oce => "oc1",
            Self::Ru => "ru",
            Self::Tr => "tr1",
        }
    }

    /// Regional cluster serving account lookups.
    pub fn account_cluster(&self) -> &'static str {
        match self {
            Self::Na | Self::Br | Self::Lan | Self::Las | Self::Oce => "americas",
            Self::Euw | Self::Eune | Self::Ru | Self::Tr => "europe",
            Self::Vn | Self::Kr | Self::Jp => "asia",
        }
    }

    /// Regional cluster serving match history.
    pub fn match_cluster(&self) -> &'static str {
        match self {
            Self::Na | Self::Br | Self::Lan | Self::Las => "americas",
            Self::Euw | Self::Eune | Self::Ru | Self::Tr => "europe",
            Self::Kr | Self::Jp => "asia",
            Self::Vn | Self::Oce => "sea",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Vn => "Vietnam",
            Self::Na => "North America",
            Self::Euw => "EU West",
            Self::Eune => "EU Nordic & East",
            Self::Kr => "Korea",
            Self::Jp => "Japan",
            Self::Br => "Brazil",
            Self::Lan => "Latin America North",
            Self::Las => "Latin America South",
            Self::Oce => "Oceania",
            Self::Ru => "Russia",
            Self::Tr => "Turkey",
        }
    }
}

impl FromStr for Region {
    type Err = InvalidRegion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "VN" | "VN2" => Ok(Self::Vn),
            "NA" | "NA1" => Ok(Self::Na),
            "EUW" | "EUW1" => Ok(Self::Euw),
            "EUNE" | "EUN1" => Ok(Self::Eune),
            "KR" => Ok(Self::Kr),
            "JP" | "JP1" => Ok(Self::Jp),
            "BR" | "BR1" => Ok(Self::Br),
            "LAN" | "LA1" => Ok(Self::Lan),
            "LAS" | "LA2" => Ok(Self::Las),
            "OCE" | "OC1" => Ok(Self::Oce),
            "RU" => Ok(Self::Ru),
            "TR" | "TR1" => Ok(Self::Tr),
            _ => Err(InvalidRegion(s.to_string())),
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str().to_uppercase())
    }
}
