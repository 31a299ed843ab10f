use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// トラッカーが管理するフィールド名。業務フィールドとしては保持しない。
pub const TRACKER_FIELDS: [&str; 3] = ["isOptimistic", "pendingOperationId", "originalState"];

/// メニュー項目の業務フィールド。トラッカーは中身を解釈しない。
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(transparent)]
pub struct EntityState(Map<String, Value>);

impl EntityState {
    pub fn new(value: Value) -> Result<Self, String> {
        match value {
            Value::Object(map) => Ok(Self::from_map(map)),
            other => Err(format!(
                "Entity state must be a JSON object, got {}",
                json_type_name(&other)
            )),
        }
    }

    /// トラッカー管理フィールドは取り除いて保持する。
    pub fn from_map(mut map: Map<String, Value>) -> Self {
        for field in TRACKER_FIELDS {
            map.remove(field);
        }
        Self(map)
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

// serde 経由でもトラッカー管理フィールドを取り除く
impl<'de> Deserialize<'de> for EntityState {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Map::<String, Value>::deserialize(deserializer).map(Self::from_map)
    }
}

impl From<Map<String, Value>> for EntityState {
    fn from(map: Map<String, Value>) -> Self {
        Self::from_map(map)
    }
}

impl From<EntityState> for Value {
    fn from(state: EntityState) -> Self {
        Value::Object(state.0)
    }
}

impl TryFrom<Value> for EntityState {
    type Error = String;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
