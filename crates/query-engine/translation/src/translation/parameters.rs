//! The raw, untyped request parameters.

use indexmap::map::Entry;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// The free-text search term.
pub const SEARCH_TERM: &str = "searchTerm";
/// The 1-based page number.
pub const PAGE: &str = "page";
/// The page size.
pub const LIMIT: &str = "limit";
/// The (possibly dotted) field to order by.
pub const SORT_BY: &str = "sortBy";
/// `asc` or `desc`.
pub const SORT_ORDER: &str = "sortOrder";
/// Comma-separated list of fields to select.
pub const FIELDS: &str = "fields";
/// Comma-separated list of relations to include.
pub const INCLUDES: &str = "includes";

/// Parameters that are never treated as filters.
pub const RESERVED_PARAMETERS: [&str; 7] =
    [SEARCH_TERM, PAGE, LIMIT, SORT_BY, SORT_ORDER, FIELDS, INCLUDES];

/// The value of a single request parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParameterValue {
    /// `key=value`
    Text(String),
    /// `key=a&key=b` or `key[]=a`
    List(Vec<String>),
    /// `key[operator]=value`
    Object(IndexMap<String, ParameterValue>),
}

impl ParameterValue {
    /// Is there nothing to filter on?
    pub fn is_empty(&self) -> bool {
        match self {
            ParameterValue::Text(text) => text.is_empty(),
            ParameterValue::List(items) => items.is_empty(),
            ParameterValue::Object(object) => object.is_empty(),
        }
    }

    /// The value as it would appear in JSON.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            ParameterValue::Text(text) => serde_json::Value::String(text.clone()),
            ParameterValue::List(items) => items
                .iter()
                .map(|item| serde_json::Value::String(item.clone()))
                .collect(),
            ParameterValue::Object(object) => serde_json::Value::Object(
                object
                    .iter()
                    .map(|(key, value)| (key.clone(), value.to_json()))
                    .collect(),
            ),
        }
    }

    /// Add another occurrence of a plain value, turning text into a list.
    fn append(&mut self, value: String) {
        match self {
            ParameterValue::List(items) => items.push(value),
            ParameterValue::Text(previous) => {
                *self = ParameterValue::List(vec![std::mem::take(previous), value]);
            }
            ParameterValue::Object(_) => *self = ParameterValue::Text(value),
        }
    }
}

impl From<&str> for ParameterValue {
    fn from(value: &str) -> Self {
        ParameterValue::Text(value.to_string())
    }
}

impl From<String> for ParameterValue {
    fn from(value: String) -> Self {
        ParameterValue::Text(value)
    }
}

impl From<Vec<String>> for ParameterValue {
    fn from(items: Vec<String>) -> Self {
        ParameterValue::List(items)
    }
}

impl<const N: usize> From<[&str; N]> for ParameterValue {
    fn from(items: [&str; N]) -> Self {
        ParameterValue::List(items.iter().map(ToString::to_string).collect())
    }
}

/// The parameters of a single request, in the order they were given.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QueryParameters(IndexMap<String, ParameterValue>);

/// How a query string key addresses its parameter.
#[derive(Debug, PartialEq, Eq)]
enum KeyShape<'a> {
    /// `name`
    Plain(&'a str),
    /// `name[]`
    List(&'a str),
    /// `name[operator]`
    Operator(&'a str, &'a str),
}

fn key_shape(key: &str) -> KeyShape<'_> {
    let is_bare = |part: &str| !part.is_empty() && !part.contains(['[', ']']);

    if let Some(name) = key.strip_suffix("[]") {
        if is_bare(name) {
            return KeyShape::List(name);
        }
    }
    if let Some(inner) = key.strip_suffix(']') {
        if let Some((name, operator)) = inner.split_once('[') {
            if is_bare(name) && is_bare(operator) {
                return KeyShape::Operator(name, operator);
            }
        }
    }
    KeyShape::Plain(key)
}

impl QueryParameters {
    pub fn new() -> Self {
        QueryParameters(IndexMap::new())
    }

    /// Read the parameters from a URL query string such as
    /// `searchTerm=john&gender=MALE&appointmentFee[gte]=100&page=2`.
    ///
    /// A repeated key becomes a list, `key[]` is always a list and `key[operator]` builds an
    /// operator object. When a key is used with conflicting shapes the later one wins.
    pub fn from_query_string(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut parameters = QueryParameters::new();

        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            let value = value.into_owned();
            match key_shape(&key) {
                KeyShape::Plain(name) => parameters.push_text(name, value),
                KeyShape::List(name) => parameters.push_list_item(name, value),
                KeyShape::Operator(name, operator) => {
                    parameters.push_operator(name, operator, value);
                }
            }
        }
        parameters
    }

    pub fn get(&self, name: &str) -> Option<&ParameterValue> {
        self.0.get(name)
    }

    /// The text of a parameter; the last occurrence if it was repeated.
    pub fn last_text(&self, name: &str) -> Option<&str> {
        match self.0.get(name)? {
            ParameterValue::Text(text) => Some(text),
            ParameterValue::List(items) => items.last().map(String::as_str),
            ParameterValue::Object(_) => None,
        }
    }

    /// Every parameter that is not reserved, in request order.
    pub fn filters(&self) -> impl Iterator<Item = (&str, &ParameterValue)> {
        self.0
            .iter()
            .filter(|(name, _)| !RESERVED_PARAMETERS.contains(&name.as_str()))
            .map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn push_text(&mut self, name: &str, value: String) {
        match self.0.entry(name.to_string()) {
            Entry::Vacant(entry) => {
                entry.insert(ParameterValue::Text(value));
            }
            Entry::Occupied(mut entry) => entry.get_mut().append(value),
        }
    }

    fn push_list_item(&mut self, name: &str, value: String) {
        match self.0.entry(name.to_string()) {
            Entry::Vacant(entry) => {
                entry.insert(ParameterValue::List(vec![value]));
            }
            Entry::Occupied(mut entry) => {
                let slot = entry.get_mut();
                if matches!(slot, ParameterValue::Object(_)) {
                    *slot = ParameterValue::List(vec![value]);
                } else {
                    slot.append(value);
                }
            }
        }
    }

    fn push_operator(&mut self, name: &str, operator: &str, value: String) {
        let slot = self
            .0
            .entry(name.to_string())
            .or_insert_with(|| ParameterValue::Object(IndexMap::new()));
        if !matches!(slot, ParameterValue::Object(_)) {
            *slot = ParameterValue::Object(IndexMap::new());
        }
        if let ParameterValue::Object(operators) = slot {
            match operators.entry(operator.to_string()) {
                Entry::Vacant(entry) => {
                    entry.insert(ParameterValue::Text(value));
                }
                Entry::Occupied(mut entry) => entry.get_mut().append(value),
            }
        }
    }
}

impl<K, V> FromIterator<(K, V)> for QueryParameters
where
    K: Into<String>,
    V: Into<ParameterValue>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        QueryParameters(
            iter.into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_plain_and_repeated_keys() {
        let parameters =
            QueryParameters::from_query_string("?searchTerm=john+doe&tag=a&tag=b&tag=c");
        assert_eq!(parameters.last_text(SEARCH_TERM), Some("john doe"));
        assert_eq!(
            parameters.get("tag"),
            Some(&ParameterValue::from(["a", "b", "c"]))
        );
    }

    #[test]
    fn reads_operator_objects() {
        let parameters = QueryParameters::from_query_string(
            "appointmentFee[gte]=100&appointmentFee[lte]=200&status[in]=a&status[in]=b",
        );
        assert_eq!(
            parameters.get("appointmentFee"),
            Some(&ParameterValue::Object(IndexMap::from([
                ("gte".to_string(), ParameterValue::from("100")),
                ("lte".to_string(), ParameterValue::from("200")),
            ])))
        );
        assert_eq!(
            parameters.get("status"),
            Some(&ParameterValue::Object(IndexMap::from([(
                "in".to_string(),
                ParameterValue::from(["a", "b"])
            )])))
        );
    }

    #[test]
    fn bracket_list_is_always_a_list() {
        let parameters = QueryParameters::from_query_string("ids[]=1");
        assert_eq!(parameters.get("ids"), Some(&ParameterValue::from(["1"])));
    }

    #[test]
    fn decodes_percent_escapes_in_keys_and_values() {
        let parameters =
            QueryParameters::from_query_string("user.email=a%40b.com&fee%5Bgt%5D=5");
        assert_eq!(parameters.last_text("user.email"), Some("a@b.com"));
        assert_eq!(
            parameters.get("fee"),
            Some(&ParameterValue::Object(IndexMap::from([(
                "gt".to_string(),
                ParameterValue::from("5")
            )])))
        );
    }

    #[test]
    fn deeper_brackets_stay_plain_keys() {
        let parameters = QueryParameters::from_query_string("a[b][c]=1");
        assert_eq!(parameters.last_text("a[b][c]"), Some("1"));
    }

    #[test]
    fn later_shape_wins() {
        let parameters = QueryParameters::from_query_string("fee=5&fee[gt]=1&x[lt]=1&x=2");
        assert!(matches!(
            parameters.get("fee"),
            Some(ParameterValue::Object(_))
        ));
        assert_eq!(parameters.last_text("x"), Some("2"));
    }

    #[test]
    fn missing_value_is_empty() {
        let parameters = QueryParameters::from_query_string("gender&page=");
        assert_eq!(parameters.last_text("gender"), Some(""));
        assert!(parameters.get("gender").unwrap().is_empty());
    }

    #[test]
    fn filters_skip_reserved_parameters() {
        let parameters = QueryParameters::from_query_string(
            "searchTerm=a&page=1&limit=2&sortBy=x&sortOrder=asc&fields=a&includes=b&gender=MALE",
        );
        let filters: Vec<&str> = parameters.filters().map(|(name, _)| name).collect();
        assert_eq!(filters, vec!["gender"]);
    }

    #[test]
    fn deserializes_from_json() {
        let parameters: QueryParameters = serde_json::from_value(serde_json::json!({
            "gender": "MALE",
            "ids": ["1", "2"],
            "fee": { "gte": "10" }
        }))
        .unwrap();
        assert_eq!(parameters.len(), 3);
        assert_eq!(parameters.get("ids"), Some(&ParameterValue::from(["1", "2"])));
        assert_eq!(
            parameters.get("fee").map(ParameterValue::to_json),
            Some(serde_json::json!({ "gte": "10" }))
        );
    }
}
