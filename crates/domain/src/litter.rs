use crate::date::deserialize_date;
use crate::shared::entity::{Entity, ID};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Litter {
    pub id: ID,
    pub name: String,
    pub mother_id: ID,
    #[serde(default)]
    pub father_id: Option<ID>,
    #[serde(deserialize_with = "deserialize_date")]
    pub date_of_birth: NaiveDate,
    #[serde(default)]
    pub puppy_count: u32,
}

impl Litter {
    pub fn new(name: &str, mother_id: ID, date_of_birth: NaiveDate) -> Self {
        Self {
            id: Default::default(),
            name: name.into(),
            mother_id,
            father_id: None,
            date_of_birth,
            puppy_count: 0,
        }
    }

    /// Age of the litter in whole days at `today`
    pub fn age_in_days(&self, today: NaiveDate) -> i64 {
        (today - self.date_of_birth).num_days()
    }
}

impl Entity<ID> for Litter {
    fn id(&self) -> ID {
        self.id.clone()
    }
}
