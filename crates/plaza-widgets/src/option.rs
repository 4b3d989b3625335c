//! How a select turns caller records into display text and values.
//!
//! A [`SearchableSelect`](crate::searchable_select::SearchableSelect) never
//! inspects its options directly. It asks an [`OptionResolver`] for two
//! things per option: the text to show and search, and the integer value to
//! report when the option is chosen. `0` is reserved for "nothing selected".
//!
//! Three resolvers cover the usual cases:
//!
//! * [`ItemResolver`] for domain types implementing [`SelectItem`].
//! * [`FnResolver`] for ad-hoc accessor closures.
//! * [`FieldResolver`] for untyped JSON [`Record`]s as returned by the
//!   backend, looking fields up by name with fallbacks.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::borrow::Cow;

/// Extracts display text and value from an option of type `T`.
pub trait OptionResolver<T>: Send + 'static {
    /// Human-readable text, also used for searching and sorting.
    fn display_text(&self, option: &T) -> String;

    /// The value reported when this option is chosen.
    fn value(&self, option: &T) -> i64;
}

/// Domain types that know their own label and value.
///
/// ```ignore
/// struct CostCenter { id: i64, code: String, name: String }
///
/// impl SelectItem for CostCenter {
///     fn label(&self) -> Cow<'_, str> {
///         Cow::Owned(format!("{} · {}", self.code, self.name))
///     }
///     fn value(&self) -> i64 {
///         self.id
///     }
/// }
/// ```
pub trait SelectItem: Send + 'static {
    /// Text shown in the select.
    fn label(&self) -> Cow<'_, str>;
    /// Value reported on selection.
    fn value(&self) -> i64;
}

/// Resolver for [`SelectItem`] types.
#[derive(Debug, Clone, Copy, Default)]
pub struct ItemResolver;

impl<T: SelectItem> OptionResolver<T> for ItemResolver {
    fn display_text(&self, option: &T) -> String {
        option.label().into_owned()
    }

    fn value(&self, option: &T) -> i64 {
        option.value()
    }
}

/// Resolver built from two accessor closures.
pub struct FnResolver<D, V> {
    display: D,
    value: V,
}

/// Build a [`FnResolver`].
///
/// ```ignore
/// let resolver = resolve_with(|a: &Account| a.number.clone(), |a: &Account| a.id);
/// ```
pub fn resolve_with<T, D, V>(display: D, value: V) -> FnResolver<D, V>
where
    D: Fn(&T) -> String + Send + 'static,
    V: Fn(&T) -> i64 + Send + 'static,
{
    FnResolver { display, value }
}

impl<T, D, V> OptionResolver<T> for FnResolver<D, V>
where
    D: Fn(&T) -> String + Send + 'static,
    V: Fn(&T) -> i64 + Send + 'static,
{
    fn display_text(&self, option: &T) -> String {
        (self.display)(option)
    }

    fn value(&self, option: &T) -> i64 {
        (self.value)(option)
    }
}

/// Errors raised while turning JSON into [`Record`]s.
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    /// The input was not valid JSON.
    #[error("invalid record JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// The JSON was valid but had the wrong shape.
    #[error("expected {expected}, found {found}")]
    Shape {
        /// What was required at this position.
        expected: &'static str,
        /// JSON type actually present.
        found: &'static str,
    },
}

/// An untyped option: a JSON object with an integer `"id"` and any other
/// fields.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    /// An empty record (identifier `0`).
    pub fn new() -> Self {
        Self::default()
    }

    /// A record with the given identifier.
    pub fn with_id(id: i64) -> Self {
        Self::new().with("id", id)
    }

    /// Builder: set a field.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(field.into(), value.into());
        self
    }

    /// Raw access to a field.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// The `"id"` field as an integer, or `0` when missing or not numeric.
    pub fn identifier(&self) -> i64 {
        self.integer("id").unwrap_or(0)
    }

    /// A non-empty string field.
    pub fn text(&self, field: &str) -> Option<&str> {
        self.get(field)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }

    /// An integral numeric field. Strings such as `"7"` do not count.
    pub fn integer(&self, field: &str) -> Option<i64> {
        let value = self.get(field)?;
        value.as_i64().or_else(|| {
            value
                .as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64)
                .map(|f| f as i64)
        })
    }

    /// Convert a JSON value, which must be an object.
    pub fn from_value(value: Value) -> Result<Self, RecordError> {
        match value {
            Value::Object(map) => Ok(Record(map)),
            other => Err(RecordError::Shape {
                expected: "an object",
                found: json_type(&other),
            }),
        }
    }

    /// Parse a JSON array of objects, as returned by list endpoints.
    pub fn parse_list(json: &str) -> Result<Vec<Record>, RecordError> {
        match serde_json::from_str::<Value>(json)? {
            Value::Array(items) => items.into_iter().map(Record::from_value).collect(),
            other => Err(RecordError::Shape {
                expected: "an array",
                found: json_type(&other),
            }),
        }
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Resolver for [`Record`]s using configurable field names.
///
/// Display text is the first non-empty string among the configured display
/// field, `"name"` and `"description"`; failing those it is `"ID: {id}"`,
/// or the empty label when the record has no identifier. The value is the
/// configured value field when it holds an integer, otherwise the record's
/// identifier.
#[derive(Debug, Clone)]
pub struct FieldResolver {
    display_field: String,
    value_field: String,
    empty_label: String,
}

/// Default display field.
pub const DEFAULT_DISPLAY_FIELD: &str = "name";
/// Default value field.
pub const DEFAULT_VALUE_FIELD: &str = "id";
/// Default text for options with nothing to display.
pub const DEFAULT_EMPTY_LABEL: &str = "Unselected";

impl Default for FieldResolver {
    fn default() -> Self {
        Self {
            display_field: DEFAULT_DISPLAY_FIELD.to_string(),
            value_field: DEFAULT_VALUE_FIELD.to_string(),
            empty_label: DEFAULT_EMPTY_LABEL.to_string(),
        }
    }
}

impl FieldResolver {
    /// Resolver with the default field names.
    pub fn new() -> Self {
        Self::default()
    }

    /// Field holding the display text.
    pub fn with_display_field(mut self, field: impl Into<String>) -> Self {
        self.display_field = field.into();
        self
    }

    /// Field holding the value.
    pub fn with_value_field(mut self, field: impl Into<String>) -> Self {
        self.value_field = field.into();
        self
    }

    /// Text used when nothing else can be displayed.
    pub fn with_empty_label(mut self, label: impl Into<String>) -> Self {
        self.empty_label = label.into();
        self
    }

    /// The configured display field.
    pub fn display_field(&self) -> &str {
        &self.display_field
    }

    /// The configured value field.
    pub fn value_field(&self) -> &str {
        &self.value_field
    }
}

impl OptionResolver<Record> for FieldResolver {
    fn display_text(&self, record: &Record) -> String {
        [self.display_field.as_str(), "name", "description"]
            .into_iter()
            .find_map(|field| record.text(field))
            .map(str::to_owned)
            .unwrap_or_else(|| match record.identifier() {
                0 => self.empty_label.clone(),
                id => format!("ID: {id}"),
            })
    }

    fn value(&self, record: &Record) -> i64 {
        record
            .integer(&self.value_field)
            .unwrap_or_else(|| record.identifier())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn display_uses_configured_field_first() {
        let r = FieldResolver::new().with_display_field("nombre");
        let rec = Record::with_id(3).with("nombre", "Ventas").with("name", "Sales");
        assert_eq!(r.display_text(&rec), "Ventas");
    }

    #[test]
    fn display_falls_back_to_name() {
        let r = FieldResolver::new().with_display_field("nombre");
        let rec = Record::with_id(3).with("name", "Sales");
        assert_eq!(r.display_text(&rec), "Sales");
    }

    #[test]
    fn display_falls_back_to_description() {
        let r = FieldResolver::new().with_display_field("nombre");
        let rec = Record::with_id(3).with("description", "Cuenta de gastos");
        assert_eq!(r.display_text(&rec), "Cuenta de gastos");
    }

    #[test]
    fn non_string_fields_are_skipped() {
        let r = FieldResolver::new().with_display_field("code");
        let rec = Record::with_id(3).with("code", 4100).with("description", 12);
        assert_eq!(r.display_text(&rec), "ID: 3");
    }

    #[test]
    fn display_synthesizes_id() {
        let r = FieldResolver::new();
        assert_eq!(r.display_text(&Record::with_id(17)), "ID: 17");
    }

    #[test]
    fn display_uses_empty_label_without_id() {
        let r = FieldResolver::new().with_empty_label("Sin seleccionar");
        assert_eq!(r.display_text(&Record::new()), "Sin seleccionar");
        assert_eq!(r.display_text(&Record::new().with("name", "")), "Sin seleccionar");
    }

    #[test]
    fn value_uses_configured_integer_field() {
        let r = FieldResolver::new().with_value_field("plaza_id");
        let rec = Record::with_id(1).with("plaza_id", 7);
        assert_eq!(r.value(&rec), 7);
    }

    #[test]
    fn string_value_falls_back_to_identifier() {
        let r = FieldResolver::new().with_value_field("plaza_id");
        let rec = Record::with_id(1).with("plaza_id", "7");
        assert_eq!(r.value(&rec), 1);
    }

    #[test]
    fn value_falls_back_to_zero() {
        let r = FieldResolver::new().with_value_field("plaza_id");
        assert_eq!(r.value(&Record::new().with("name", "x")), 0);
    }

    #[test]
    fn integral_floats_count_as_integers() {
        let rec = Record::with_id(1).with("n", 8.0).with("f", 8.5);
        assert_eq!(rec.integer("n"), Some(8));
        assert_eq!(rec.integer("f"), None);
    }

    #[test]
    fn parse_list_reads_backend_payload() {
        let json = r#"[{"id": 1, "name": "Ventas"}, {"id": 2, "description": "Compras"}]"#;
        let records = Record::parse_list(json).unwrap();
        let r = FieldResolver::new();
        let labels: Vec<String> = records.iter().map(|rec| r.display_text(rec)).collect();
        assert_eq!(labels, vec!["Ventas", "Compras"]);
        assert_eq!(records[1].identifier(), 2);
    }

    #[test]
    fn parse_list_rejects_wrong_shapes() {
        let err = Record::parse_list(r#"{"id": 1}"#).unwrap_err();
        assert_eq!(err.to_string(), "expected an array, found an object");

        let err = Record::parse_list("[1]").unwrap_err();
        assert_eq!(err.to_string(), "expected an object, found a number");

        assert!(matches!(Record::parse_list("[{"), Err(RecordError::Json(_))));
    }

    #[test]
    fn record_round_trips_through_serde() {
        let rec: Record = serde_json::from_value(json!({"id": 5, "name": "Norte"})).unwrap();
        assert_eq!(rec, Record::with_id(5).with("name", "Norte"));
    }

    struct Account {
        id: i64,
        number: &'static str,
    }

    impl SelectItem for Account {
        fn label(&self) -> Cow<'_, str> {
            Cow::Borrowed(self.number)
        }
        fn value(&self) -> i64 {
            self.id
        }
    }

    #[test]
    fn item_and_fn_resolvers_agree() {
        let account = Account { id: 9, number: "6100-01" };
        let by_item = ItemResolver;
        let by_fn = resolve_with(|a: &Account| a.number.to_string(), |a: &Account| a.id);
        assert_eq!(by_item.display_text(&account), by_fn.display_text(&account));
        assert_eq!(OptionResolver::<Account>::value(&by_item, &account), 9);
        assert_eq!(by_fn.value(&account), 9);
    }
}
