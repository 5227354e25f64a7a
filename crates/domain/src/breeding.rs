use crate::date::{deserialize_date, deserialize_optional_date};
use crate::shared::entity::{Entity, ID};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlannedBreedingStatus {
    Planned,
    Completed,
    Cancelled,
}

impl Default for PlannedBreedingStatus {
    fn default() -> Self {
        Self::Planned
    }
}

/// A breeding the kennel intends to do at the female's next heat
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannedBreeding {
    pub id: ID,
    pub female_id: ID,
    #[serde(default)]
    pub male_id: Option<ID>,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub expected_heat_date: Option<NaiveDate>,
    #[serde(default)]
    pub status: PlannedBreedingStatus,
}

impl Entity<ID> for PlannedBreeding {
    fn id(&self) -> ID {
        self.id.clone()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PregnancyStatus {
    Active,
    Completed,
    Lost,
}

impl Default for PregnancyStatus {
    fn default() -> Self {
        Self::Active
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pregnancy {
    pub id: ID,
    pub female_id: ID,
    #[serde(default)]
    pub male_id: Option<ID>,
    #[serde(deserialize_with = "deserialize_date")]
    pub mating_date: NaiveDate,
    #[serde(default)]
    pub status: PregnancyStatus,
}

impl Pregnancy {
    /// Gestation length used to estimate the whelping date
    pub const GESTATION_DAYS: i64 = 63;
}

impl Entity<ID> for Pregnancy {
    fn id(&self) -> ID {
        self.id.clone()
    }
}
