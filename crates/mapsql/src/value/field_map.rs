use super::Value;
use crate::error::{SqlError, SqlResult};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// Column name → value mapping fed to the statement compiler.
///
/// Fields are kept sorted by name (byte-wise), which is the order the compiler
/// emits columns and arguments in. Insertion order never matters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldMap {
    fields: BTreeMap<String, Value>,
}

impl FieldMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field, replacing any previous value under the same name.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Consuming counterpart of [`FieldMap::set`].
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.fields.remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Fields in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Field names in name order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Number of fields that will be bound (everything except [`Raw`](super::Raw)).
    pub fn bound_len(&self) -> usize {
        self.fields.values().filter(|v| !v.is_raw()).count()
    }

    /// Build a map from any value serializing to a JSON object (structs, maps).
    ///
    /// JSON scalars become the matching [`Value`] case; arrays and nested
    /// objects are kept as [`Value::Json`].
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> SqlResult<Self> {
        let json =
            serde_json::to_value(value).map_err(|e| SqlError::Serialization(e.to_string()))?;
        match json {
            serde_json::Value::Object(object) => Ok(object
                .into_iter()
                .map(|(name, v)| (name, json_to_value(v)))
                .collect()),
            other => Err(SqlError::Serialization(format!(
                "expected a struct or map, got `{other}`"
            ))),
        }
    }
}

fn json_to_value(json: serde_json::Value) -> Value {
    use serde_json::Value as Json;

    match json {
        Json::Null => Value::Null,
        Json::Bool(b) => Value::Bool(b),
        Json::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Int(i)
            } else if let (true, Some(f)) = (n.is_f64(), n.as_f64()) {
                Value::Float(f)
            } else {
                // u64 above i64::MAX
                Value::Json(Json::Number(n))
            }
        }
        Json::String(s) => Value::Text(s),
        other => Value::Json(other),
    }
}

impl<K, V> FromIterator<(K, V)> for FieldMap
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<K, V> Extend<(K, V)> for FieldMap
where
    K: Into<String>,
    V: Into<Value>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.set(k, v);
        }
    }
}

impl<K, V, S> From<HashMap<K, V, S>> for FieldMap
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from(map: HashMap<K, V, S>) -> Self {
        map.into_iter().collect()
    }
}

impl<K, V> From<BTreeMap<K, V>> for FieldMap
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from(map: BTreeMap<K, V>) -> Self {
        map.into_iter().collect()
    }
}

impl<'a> IntoIterator for &'a FieldMap {
    type Item = (&'a String, &'a Value);
    type IntoIter = std::collections::btree_map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

/// Build a [`FieldMap`] from `name => value` pairs.
///
/// ```ignore
/// let fields = mapsql::field_map! {
///     "name" => "alice",
///     "age" => 30,
///     "created_at" => mapsql::raw("now()"),
/// };
/// ```
#[macro_export]
macro_rules! field_map {
    () => { $crate::FieldMap::new() };
    ($($name:expr => $value:expr),+ $(,)?) => {{
        let mut __mapsql_fields = $crate::FieldMap::new();
        $( __mapsql_fields.set($name, $value); )+
        __mapsql_fields
    }};
}
