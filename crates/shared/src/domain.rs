use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            pub fn generate() -> Self {
                Self(Uuid::new_v4())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

id_newtype!(CylinderId);
id_newtype!(DeliveryId);

pub const MIN_CYLINDER_NUMBER: u16 = 1;
pub const MAX_CYLINDER_NUMBER: u16 = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CylinderKind {
    Small,
    Big,
}

impl CylinderKind {
    pub const ALL: [CylinderKind; 2] = [CylinderKind::Small, CylinderKind::Big];

    pub fn label(self) -> &'static str {
        match self {
            Self::Small => "Small",
            Self::Big => "Big",
        }
    }

    /// The kind whose pending list is checked for cross-list duplicates.
    pub fn sibling(self) -> Self {
        match self {
            Self::Small => Self::Big,
            Self::Big => Self::Small,
        }
    }
}

impl fmt::Display for CylinderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for CylinderKind {
    type Err = CylinderNumberError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("small") {
            Ok(Self::Small)
        } else if s.trim().eq_ignore_ascii_case("big") {
            Ok(Self::Big)
        } else {
            Err(CylinderNumberError::UnknownKind(s.to_string()))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CylinderNumberError {
    #[error("not a number: {0:?}")]
    NotNumeric(String),
    #[error("Number must be between {MIN_CYLINDER_NUMBER} and {MAX_CYLINDER_NUMBER}")]
    OutOfRange(u64),
    #[error("unknown cylinder type {0:?}; expected Small or Big")]
    UnknownKind(String),
}

/// Serial number painted on a cylinder, kept in normalized decimal form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CylinderNumber(u16);

impl CylinderNumber {
    pub fn new(value: u16) -> Result<Self, CylinderNumberError> {
        if (MIN_CYLINDER_NUMBER..=MAX_CYLINDER_NUMBER).contains(&value) {
            Ok(Self(value))
        } else {
            Err(CylinderNumberError::OutOfRange(u64::from(value)))
        }
    }

    pub fn value(self) -> u16 {
        self.0
    }
}

impl FromStr for CylinderNumber {
    type Err = CylinderNumberError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CylinderNumberError::NotNumeric(s.to_string()));
        }
        let value: u64 = trimmed
            .parse()
            .map_err(|_| CylinderNumberError::OutOfRange(u64::MAX))?;
        if value > u64::from(MAX_CYLINDER_NUMBER) {
            return Err(CylinderNumberError::OutOfRange(value));
        }
        // value <= 200 here, so the narrowing cannot truncate.
        Self::new(value as u16)
    }
}

impl TryFrom<String> for CylinderNumber {
    type Error = CylinderNumberError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CylinderNumber> for String {
    fn from(value: CylinderNumber) -> Self {
        value.to_string()
    }
}

impl fmt::Display for CylinderNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cylinder {
    pub id: CylinderId,
    pub number: CylinderNumber,
    #[serde(rename = "type")]
    pub kind: CylinderKind,
    pub added_at: DateTime<Utc>,
}

impl Cylinder {
    pub fn new(number: CylinderNumber, kind: CylinderKind, added_at: DateTime<Utc>) -> Self {
        Self {
            id: CylinderId::generate(),
            number,
            kind,
            added_at,
        }
    }
}

/// A delivery as entered, before the store assigns its id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDeliveryRecord {
    pub customer_name: String,
    pub address: String,
    pub delivered_small: Vec<CylinderNumber>,
    pub delivered_big: Vec<CylinderNumber>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryRecord {
    pub id: DeliveryId,
    pub customer_name: String,
    pub address: String,
    pub delivered_small: Vec<CylinderNumber>,
    pub delivered_big: Vec<CylinderNumber>,
    pub timestamp: DateTime<Utc>,
}

impl DeliveryRecord {
    pub fn from_new(id: DeliveryId, record: NewDeliveryRecord) -> Self {
        Self {
            id,
            customer_name: record.customer_name,
            address: record.address,
            delivered_small: record.delivered_small,
            delivered_big: record.delivered_big,
            timestamp: record.timestamp,
        }
    }

    pub fn total_delivered(&self) -> usize {
        self.delivered_small.len() + self.delivered_big.len()
    }

    pub fn delivered(&self, kind: CylinderKind) -> &[CylinderNumber] {
        match kind {
            CylinderKind::Small => &self.delivered_small,
            CylinderKind::Big => &self.delivered_big,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub address: String,
}
