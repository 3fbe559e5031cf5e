use crate::template::InputType;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// `{id, name}` as returned by the module and service definition listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteEntity {
    #[serde(deserialize_with = "id_as_string")]
    pub id: String,
    pub name: String,
}

/// Body of `POST /modules`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewModule {
    pub name: String,
    pub language: String,
    pub event_source: String,
    pub file_type: String,
    pub source_code: String,
}

/// Body of `PATCH /modules/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModuleUpdate {
    pub name: String,
    pub file_type: String,
    pub source_code: String,
}

/// Body of `POST /service_defs`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceDefinitionDoc {
    pub name: String,
    pub description: String,
    pub category: String,
    pub cost: String,
    pub cost_type: String,
    pub lead_time: String,
    pub lead_time_unit: String,
    pub questions: Vec<ServiceQuestion>,
    pub actions: ServiceActions,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceQuestion {
    pub id: String,
    pub question: String,
    pub description: String,
    #[serde(rename = "type")]
    pub input_type: InputType,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceActions {
    pub create_order: Vec<ModuleAction>,
}

/// Invocation of a CMP module when an order is placed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModuleAction {
    #[serde(rename = "type")]
    pub action_type: String,
    pub module_id: String,
}

impl ModuleAction {
    pub fn module(module_id: &str) -> Self {
        Self {
            action_type: "module".to_string(),
            module_id: module_id.to_string(),
        }
    }
}

/// The service catalog listing (`GET`/`PUT /service_catalog`).
///
/// Fields other than `service_defs` are carried through untouched.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CatalogDoc {
    #[serde(default, deserialize_with = "ids_as_strings")]
    pub service_defs: Vec<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl CatalogDoc {
    /// Append each id not already listed. Returns the ids that were added.
    pub fn merge_ids<'a, I>(&mut self, ids: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a String>,
    {
        let mut added = Vec::new();
        for id in ids {
            if !self.service_defs.contains(id) {
                self.service_defs.push(id.clone());
                added.push(id.clone());
            }
        }
        added
    }
}

fn value_to_id(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn id_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    value_to_id(value).ok_or_else(|| serde::de::Error::custom("id must be a string or number"))
}

fn ids_as_strings<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let values = Vec::<Value>::deserialize(deserializer)?;
    values
        .into_iter()
        .map(|v| {
            value_to_id(v).ok_or_else(|| serde::de::Error::custom("id must be a string or number"))
        })
        .collect()
}
