use crate::date::{deserialize_date, deserialize_optional_date};
use crate::shared::entity::{Entity, ID};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Female,
    Male,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeatRecord {
    #[serde(deserialize_with = "deserialize_date")]
    pub date: NaiveDate,
}

/// A `Dog` owned by the kennel as it is read from the hosted database.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dog {
    pub id: ID,
    pub name: String,
    #[serde(default)]
    pub breed: String,
    pub gender: Gender,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default)]
    pub heat_history: Vec<HeatRecord>,
    /// Days between two heats for this dog. Falls back to the kennel
    /// default when not set.
    #[serde(default)]
    pub heat_interval_days: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub vaccination_date: Option<NaiveDate>,
    /// Dogs that are sold, retired or passed away are kept for pedigree
    /// purposes but never produce reminders
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl Dog {
    pub fn new(name: &str, gender: Gender) -> Self {
        Self {
            id: Default::default(),
            name: name.into(),
            breed: Default::default(),
            gender,
            date_of_birth: None,
            heat_history: Vec::new(),
            heat_interval_days: None,
            vaccination_date: None,
            is_active: true,
        }
    }

    pub fn is_female(&self) -> bool {
        self.gender == Gender::Female
    }

    /// The most recent recorded heat, regardless of the order of `heat_history`
    pub fn last_heat_date(&self) -> Option<NaiveDate> {
        self.heat_history.iter().map(|h| h.date).max()
    }
}

impl Entity<ID> for Dog {
    fn id(&self) -> ID {
        self.id.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_deserializes_database_rows() {
        let raw = r#"{
            "id": "a574624d-7c7f-456c-bbdd-670710302d45",
            "name": "Bella",
            "gender": "female",
            "dateOfBirth": "2021-05-04T00:00:00Z",
            "heatHistory": [{ "date": "2025-01-10" }, { "date": "2025-07-02" }],
            "vaccinationDate": null
        }"#;
        let dog: Dog = serde_json::from_str(raw).expect("To parse dog");
        assert!(dog.is_female());
        assert!(dog.is_active);
        assert_eq!(dog.date_of_birth, NaiveDate::from_ymd_opt(2021, 5, 4));
        assert_eq!(dog.last_heat_date(), NaiveDate::from_ymd_opt(2025, 7, 2));
        assert_eq!(dog.vaccination_date, None);
        assert_eq!(dog.heat_interval_days, None);
    }
}
