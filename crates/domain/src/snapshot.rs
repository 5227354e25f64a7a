use crate::breeding::{PlannedBreeding, Pregnancy};
use crate::dog::Dog;
use crate::litter::Litter;
use crate::shared::entity::ID;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

/// Read-only view of the kennel's data that the reminder rules evaluate.
/// It is fetched by the caller before the pipeline runs.
///
/// Entity lists are read one record at a time. A record that cannot be read
/// ends up in `rejected` and the other records are kept.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RawSnapshot")]
pub struct DomainSnapshot {
    pub dogs: Vec<Dog>,
    pub litters: Vec<Litter>,
    pub planned_breedings: Vec<PlannedBreeding>,
    pub pregnancies: Vec<Pregnancy>,
    #[serde(skip)]
    pub rejected: Vec<RejectedRecord>,
}

/// A record that was skipped because it could not be read
#[derive(Debug, Clone, PartialEq)]
pub struct RejectedRecord {
    /// What the record is, e.g. `dog` or `legacy-custom-reminder`
    pub kind: &'static str,
    /// The record's `id` when it has a string one
    pub entity_id: String,
    pub error: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSnapshot {
    #[serde(default)]
    dogs: Vec<Value>,
    #[serde(default)]
    litters: Vec<Value>,
    #[serde(default)]
    planned_breedings: Vec<Value>,
    #[serde(default)]
    pregnancies: Vec<Value>,
}

impl From<RawSnapshot> for DomainSnapshot {
    fn from(raw: RawSnapshot) -> Self {
        let mut rejected = Vec::new();
        Self {
            dogs: read_records("dog", raw.dogs, &mut rejected),
            litters: read_records("litter", raw.litters, &mut rejected),
            planned_breedings: read_records("planned-breeding", raw.planned_breedings, &mut rejected),
            pregnancies: read_records("pregnancy", raw.pregnancies, &mut rejected),
            rejected,
        }
    }
}

/// Reads every value on its own, moving the unreadable ones to `rejected`
pub(crate) fn read_records<T: DeserializeOwned>(
    kind: &'static str,
    values: Vec<Value>,
    rejected: &mut Vec<RejectedRecord>,
) -> Vec<T> {
    let mut records = Vec::with_capacity(values.len());
    for value in values {
        let entity_id = value
            .get("id")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        match serde_json::from_value(value) {
            Ok(record) => records.push(record),
            Err(e) => rejected.push(RejectedRecord {
                kind,
                entity_id,
                error: e.to_string(),
            }),
        }
    }
    records
}

impl DomainSnapshot {
    pub fn find_dog(&self, dog_id: &ID) -> Option<&Dog> {
        self.dogs.iter().find(|dog| dog.id == *dog_id)
    }
}
