use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

use super::collection::Collection;

/// A single record. Its shape belongs to the front-end; only the key field is read here.
pub type Record = Value;

/// The whole persisted hub state.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HubDocument {
    pub afazeres: Vec<Record>,
    pub checklist: Vec<Record>,
    pub check_status: Vec<Record>,
    pub metas: Vec<Record>,
    pub financeiro: Vec<Record>,
    pub notas: Vec<Record>,
    pub gastos_fixos: Vec<Record>,
    pub investimentos: Vec<Record>,
    /// Top-level fields the server does not know about, kept as-is.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Missing, `null` and non-list collection values all read as an empty collection,
/// so one malformed field never discards the others.
impl<'de> Deserialize<'de> for HubDocument {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mut fields = Map::<String, Value>::deserialize(deserializer)?;
        let mut document = Self::default();

        for collection in Collection::ALL {
            let items = match fields.remove(collection.field_name()) {
                None | Some(Value::Null) => Vec::new(),
                Some(Value::Array(items)) => items,
                Some(other) => {
                    warn!(
                        %collection,
                        found = json_kind(&other),
                        "Collection is not a list, treating it as empty"
                    );
                    Vec::new()
                }
            };
            *document.items_mut(collection) = items;
        }

        document.extra = fields;
        Ok(document)
    }
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn matches_key(record: &Record, field: &str, key: &str) -> bool {
    record.get(field).and_then(Value::as_str) == Some(key)
}

impl HubDocument {
    pub fn items(&self, collection: Collection) -> &[Record] {
        match collection {
            Collection::Afazeres => &self.afazeres,
            Collection::Checklist => &self.checklist,
            Collection::CheckStatus => &self.check_status,
            Collection::Metas => &self.metas,
            Collection::Financeiro => &self.financeiro,
            Collection::Notas => &self.notas,
            Collection::GastosFixos => &self.gastos_fixos,
            Collection::Investimentos => &self.investimentos,
        }
    }

    pub fn items_mut(&mut self, collection: Collection) -> &mut Vec<Record> {
        match collection {
            Collection::Afazeres => &mut self.afazeres,
            Collection::Checklist => &mut self.checklist,
            Collection::CheckStatus => &mut self.check_status,
            Collection::Metas => &mut self.metas,
            Collection::Financeiro => &mut self.financeiro,
            Collection::Notas => &mut self.notas,
            Collection::GastosFixos => &mut self.gastos_fixos,
            Collection::Investimentos => &mut self.investimentos,
        }
    }

    pub fn push_item(&mut self, collection: Collection, item: Record) {
        self.items_mut(collection).push(item);
    }

    /// Shallow-merges `patch` into the first record whose key matches.
    ///
    /// Fields absent from the patch are kept. Returns the merged record, or `None`
    /// when no record carries the key.
    pub fn merge_item(
        &mut self,
        collection: Collection,
        key: &str,
        patch: Map<String, Value>,
    ) -> Option<&Record> {
        let field = collection.key_field();
        let record = self
            .items_mut(collection)
            .iter_mut()
            .find(|record| matches_key(record, field, key))?;

        // Only objects carry a key field, so a match is always an object
        if let Value::Object(fields) = &mut *record {
            fields.extend(patch);
        }

        Some(record)
    }

    /// Drops every record whose key matches, returning how many were removed.
    pub fn remove_items(&mut self, collection: Collection, key: &str) -> usize {
        let field = collection.key_field();
        let items = self.items_mut(collection);
        let before = items.len();
        items.retain(|record| !matches_key(record, field, key));
        before - items.len()
    }
}
