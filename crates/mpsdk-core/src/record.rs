//! Schema-driven normalization of loosely-typed JSON records.
//!
//! Every domain object implements [`FromRecord`] as one explicit list of key
//! declarations against a [`Record`]. The accessor chosen for a key is the
//! declaration:
//!
//! - `string`, `int`, `decimal`, ... — required; absent or `null` is a
//!   [`NormalizeError::MalformedPayload`] naming the key.
//! - `*_or(key, default)` — optional with default; absent or `null` yields the
//!   default.
//! - `opt_*` — optional without default; absent or `null` yields `None`.
//! - `nested`, `list`, ... — recursive, eager normalization of sub-records;
//!   list order is preserved.
//!
//! Numbers arriving as numeric strings are parsed explicitly. Anything else of
//! the wrong kind is rejected rather than coerced.

use std::collections::BTreeMap;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde_json::{Map, Value};

use crate::error::NormalizeError;

/// A domain object that can be built from a raw JSON record.
pub trait FromRecord: Sized {
    /// # Errors
    ///
    /// Returns [`NormalizeError::MalformedPayload`] when a declared key is
    /// missing or holds a value of the wrong shape.
    fn from_record(record: &Record<'_>) -> Result<Self, NormalizeError>;
}

/// Normalizes a single JSON object into `T`.
///
/// # Errors
///
/// Returns [`NormalizeError::MalformedPayload`] if `value` is not an object or
/// if `T`'s declarations are not satisfied.
pub fn normalize<T: FromRecord>(value: &Value) -> Result<T, NormalizeError> {
    T::from_record(&Record::at(value, String::new())?)
}

/// Normalizes a JSON array of objects into a `Vec<T>`, preserving order.
///
/// # Errors
///
/// Returns [`NormalizeError::MalformedPayload`] if `value` is not an array or
/// any element fails to normalize. Element errors carry their index, e.g.
/// `[3].code`.
pub fn normalize_list<T: FromRecord>(value: &Value) -> Result<Vec<T>, NormalizeError> {
    let items = value
        .as_array()
        .ok_or_else(|| NormalizeError::malformed("$", expected("array", value)))?;
    items
        .iter()
        .enumerate()
        .map(|(idx, item)| T::from_record(&Record::at(item, format!("[{idx}]"))?))
        .collect()
}

/// Normalizes a JSON array of strings, preserving order.
///
/// # Errors
///
/// Returns [`NormalizeError::MalformedPayload`] keyed `$` if `value` is not an
/// array, or `[i]` for the first element that is not a string.
pub fn normalize_strings(value: &Value) -> Result<Vec<String>, NormalizeError> {
    let items = value
        .as_array()
        .ok_or_else(|| NormalizeError::malformed("$", expected("array", value)))?;
    items
        .iter()
        .enumerate()
        .map(|(idx, item)| {
            as_string(item).map_err(|reason| NormalizeError::malformed(format!("[{idx}]"), reason))
        })
        .collect()
}

/// A borrowed view over one JSON object, aware of its path from the payload
/// root so that nested failures still name the offending key.
#[derive(Debug, Clone)]
pub struct Record<'a> {
    fields: &'a Map<String, Value>,
    path: String,
}

impl<'a> Record<'a> {
    fn at(value: &'a Value, path: String) -> Result<Self, NormalizeError> {
        match value {
            Value::Object(fields) => Ok(Self { fields, path }),
            other => {
                let key = if path.is_empty() { "$".to_owned() } else { path };
                Err(NormalizeError::malformed(key, expected("object", other)))
            }
        }
    }

    /// Full path of `key` below this record.
    #[must_use]
    pub fn key_path(&self, key: &str) -> String {
        if self.path.is_empty() {
            key.to_owned()
        } else {
            format!("{}.{key}", self.path)
        }
    }

    /// Builds a [`NormalizeError::MalformedPayload`] for `key` of this record.
    #[must_use]
    pub fn malformed(&self, key: &str, reason: impl Into<String>) -> NormalizeError {
        NormalizeError::malformed(self.key_path(key), reason)
    }

    /// The raw value under `key`, `null` included.
    #[must_use]
    pub fn raw(&self, key: &str) -> Option<&'a Value> {
        self.fields.get(key)
    }

    /// The value under `key`, treating `null` as absent.
    #[must_use]
    pub fn present(&self, key: &str) -> Option<&'a Value> {
        self.fields.get(key).filter(|v| !v.is_null())
    }

    fn require(&self, key: &str) -> Result<&'a Value, NormalizeError> {
        self.present(key)
            .ok_or_else(|| self.malformed(key, "missing required key"))
    }

    fn convert<T>(
        &self,
        key: &str,
        value: &Value,
        f: fn(&Value) -> Result<T, String>,
    ) -> Result<T, NormalizeError> {
        f(value).map_err(|reason| self.malformed(key, reason))
    }

    fn required<T>(&self, key: &str, f: fn(&Value) -> Result<T, String>) -> Result<T, NormalizeError> {
        let value = self.require(key)?;
        self.convert(key, value, f)
    }

    fn optional<T>(
        &self,
        key: &str,
        f: fn(&Value) -> Result<T, String>,
    ) -> Result<Option<T>, NormalizeError> {
        self.present(key)
            .map(|value| self.convert(key, value, f))
            .transpose()
    }

    // -----------------------------------------------------------------------
    // strings
    // -----------------------------------------------------------------------

    /// # Errors
    /// Missing key or non-string value.
    pub fn string(&self, key: &str) -> Result<String, NormalizeError> {
        self.required(key, as_string)
    }

    /// # Errors
    /// Non-string value.
    pub fn opt_string(&self, key: &str) -> Result<Option<String>, NormalizeError> {
        self.optional(key, as_string)
    }

    /// # Errors
    /// Non-string value.
    pub fn string_or(&self, key: &str, default: &str) -> Result<String, NormalizeError> {
        Ok(self
            .opt_string(key)?
            .unwrap_or_else(|| default.to_owned()))
    }

    /// Required key whose value may legitimately be `null`.
    ///
    /// # Errors
    /// Absent key or a value that is neither `null` nor a string.
    pub fn nullable_string(&self, key: &str) -> Result<Option<String>, NormalizeError> {
        match self.raw(key) {
            None => Err(self.malformed(key, "missing required key")),
            Some(Value::Null) => Ok(None),
            Some(value) => self.convert(key, value, as_string).map(Some),
        }
    }

    /// # Errors
    /// Non-array value or non-string element.
    pub fn string_list_or_empty(&self, key: &str) -> Result<Vec<String>, NormalizeError> {
        self.scalar_list(key, as_string)
    }

    // -----------------------------------------------------------------------
    // numbers
    // -----------------------------------------------------------------------

    /// # Errors
    /// Missing key, or a value that is neither an integer nor an integer string.
    pub fn int(&self, key: &str) -> Result<i64, NormalizeError> {
        self.required(key, as_i64)
    }

    /// # Errors
    /// A value that is neither an integer nor an integer string.
    pub fn opt_int(&self, key: &str) -> Result<Option<i64>, NormalizeError> {
        self.optional(key, as_i64)
    }

    /// # Errors
    /// A value that is neither an integer nor an integer string.
    pub fn int_or(&self, key: &str, default: i64) -> Result<i64, NormalizeError> {
        Ok(self.opt_int(key)?.unwrap_or(default))
    }

    /// # Errors
    /// Non-array value or non-integer element.
    pub fn int_list_or_empty(&self, key: &str) -> Result<Vec<i64>, NormalizeError> {
        self.scalar_list(key, as_i64)
    }

    /// # Errors
    /// Missing key or a value that is not a decimal number or numeric string.
    pub fn decimal(&self, key: &str) -> Result<Decimal, NormalizeError> {
        self.required(key, as_decimal)
    }

    /// # Errors
    /// A value that is not a decimal number or numeric string.
    pub fn opt_decimal(&self, key: &str) -> Result<Option<Decimal>, NormalizeError> {
        self.optional(key, as_decimal)
    }

    /// # Errors
    /// A value that is not a decimal number or numeric string.
    pub fn decimal_or(&self, key: &str, default: Decimal) -> Result<Decimal, NormalizeError> {
        Ok(self.opt_decimal(key)?.unwrap_or(default))
    }

    /// # Errors
    /// Missing key or a value that is not a number or numeric string.
    pub fn float(&self, key: &str) -> Result<f64, NormalizeError> {
        self.required(key, as_f64)
    }

    /// # Errors
    /// A value that is not a number or numeric string.
    pub fn opt_float(&self, key: &str) -> Result<Option<f64>, NormalizeError> {
        self.optional(key, as_f64)
    }

    // -----------------------------------------------------------------------
    // booleans
    // -----------------------------------------------------------------------

    /// # Errors
    /// Missing key or non-boolean value.
    pub fn bool(&self, key: &str) -> Result<bool, NormalizeError> {
        self.required(key, as_bool)
    }

    /// # Errors
    /// Non-boolean value.
    pub fn bool_or(&self, key: &str, default: bool) -> Result<bool, NormalizeError> {
        Ok(self.optional(key, as_bool)?.unwrap_or(default))
    }

    // -----------------------------------------------------------------------
    // enumerations
    // -----------------------------------------------------------------------

    /// Parses a string-tagged enumeration through its [`FromStr`] impl.
    ///
    /// # Errors
    /// Missing key, non-string value, or an unrecognised tag.
    pub fn enumerated<T>(&self, key: &str) -> Result<T, NormalizeError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        let raw = self.string(key)?;
        raw.parse::<T>()
            .map_err(|e| self.malformed(key, e.to_string()))
    }

    // -----------------------------------------------------------------------
    // nested records
    // -----------------------------------------------------------------------

    /// # Errors
    /// Missing key, non-object value, or a failure inside the nested record.
    pub fn nested<T: FromRecord>(&self, key: &str) -> Result<T, NormalizeError> {
        let value = self.require(key)?;
        T::from_record(&Record::at(value, self.key_path(key))?)
    }

    /// # Errors
    /// Non-object value or a failure inside the nested record.
    pub fn opt_nested<T: FromRecord>(&self, key: &str) -> Result<Option<T>, NormalizeError> {
        self.present(key)
            .map(|value| T::from_record(&Record::at(value, self.key_path(key))?))
            .transpose()
    }

    /// # Errors
    /// Missing key, non-array value, or a failure inside any element.
    pub fn list<T: FromRecord>(&self, key: &str) -> Result<Vec<T>, NormalizeError> {
        let value = self.require(key)?;
        self.records(key, value)
    }

    /// # Errors
    /// Non-array value or a failure inside any element.
    pub fn opt_list<T: FromRecord>(&self, key: &str) -> Result<Option<Vec<T>>, NormalizeError> {
        self.present(key)
            .map(|value| self.records(key, value))
            .transpose()
    }

    /// # Errors
    /// Non-array value or a failure inside any element.
    pub fn list_or_empty<T: FromRecord>(&self, key: &str) -> Result<Vec<T>, NormalizeError> {
        Ok(self.opt_list(key)?.unwrap_or_default())
    }

    /// The object under `key`, for payloads keyed by identifiers rather than
    /// by a fixed schema.
    ///
    /// # Errors
    /// Missing key or non-object value.
    pub fn object(&self, key: &str) -> Result<&'a Map<String, Value>, NormalizeError> {
        match self.require(key)? {
            Value::Object(map) => Ok(map),
            other => Err(self.malformed(key, expected("object", other))),
        }
    }

    /// # Errors
    /// Non-object value.
    pub fn opt_object(&self, key: &str) -> Result<Option<&'a Map<String, Value>>, NormalizeError> {
        match self.present(key) {
            None => Ok(None),
            Some(Value::Object(map)) => Ok(Some(map)),
            Some(other) => Err(self.malformed(key, expected("object", other))),
        }
    }

    /// Records stored either as an array or as an object keyed by their own
    /// identifiers (`{"12": {...}, "15": {...}}`). Keys are dropped; object
    /// entries come back in key order.
    ///
    /// # Errors
    /// Missing key, a value that is neither array nor object, or a failure
    /// inside any element.
    pub fn keyed<T: FromRecord>(&self, key: &str) -> Result<Vec<T>, NormalizeError> {
        match self.require(key)? {
            Value::Object(map) => {
                let base = self.key_path(key);
                map.iter()
                    .map(|(id, item)| T::from_record(&Record::at(item, format!("{base}.{id}"))?))
                    .collect()
            }
            value => self.records(key, value),
        }
    }

    /// # Errors
    /// See [`Self::keyed`]; absent or `null` yields an empty list.
    pub fn keyed_or_empty<T: FromRecord>(&self, key: &str) -> Result<Vec<T>, NormalizeError> {
        if self.present(key).is_none() {
            return Ok(Vec::new());
        }
        self.keyed(key)
    }

    /// An object mapping integer ids to integer ids, e.g. option id to
    /// variant id. Keys and values are both coerced to integers.
    ///
    /// # Errors
    /// Missing key, non-object value, or a key or value that is not an
    /// integer.
    pub fn int_map(&self, key: &str) -> Result<BTreeMap<i64, i64>, NormalizeError> {
        let map = self.object(key)?;
        self.int_entries(key, map)
    }

    /// # Errors
    /// See [`Self::int_map`]; absent or `null` yields `None`.
    pub fn opt_int_map(&self, key: &str) -> Result<Option<BTreeMap<i64, i64>>, NormalizeError> {
        self.opt_object(key)?
            .map(|map| self.int_entries(key, map))
            .transpose()
    }

    fn int_entries(
        &self,
        key: &str,
        map: &Map<String, Value>,
    ) -> Result<BTreeMap<i64, i64>, NormalizeError> {
        map.iter()
            .map(|(k, v)| {
                let path = format!("{key}.{k}");
                let id = k
                    .parse::<i64>()
                    .map_err(|_| self.malformed(&path, format!("key \"{k}\" is not an integer")))?;
                let value = as_i64(v).map_err(|reason| self.malformed(&path, reason))?;
                Ok((id, value))
            })
            .collect()
    }

    fn records<T: FromRecord>(&self, key: &str, value: &Value) -> Result<Vec<T>, NormalizeError> {
        let items = value
            .as_array()
            .ok_or_else(|| self.malformed(key, expected("array", value)))?;
        let base = self.key_path(key);
        items
            .iter()
            .enumerate()
            .map(|(idx, item)| T::from_record(&Record::at(item, format!("{base}[{idx}]"))?))
            .collect()
    }

    fn scalar_list<T>(
        &self,
        key: &str,
        f: fn(&Value) -> Result<T, String>,
    ) -> Result<Vec<T>, NormalizeError> {
        let Some(value) = self.present(key) else {
            return Ok(Vec::new());
        };
        let items = value
            .as_array()
            .ok_or_else(|| self.malformed(key, expected("array", value)))?;
        items
            .iter()
            .enumerate()
            .map(|(idx, item)| f(item).map_err(|reason| self.malformed(&format!("{key}[{idx}]"), reason)))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// primitive conversions
// ---------------------------------------------------------------------------

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn expected(what: &str, found: &Value) -> String {
    format!("expected {what}, found {}", kind(found))
}

fn as_string(value: &Value) -> Result<String, String> {
    value
        .as_str()
        .map(str::to_owned)
        .ok_or_else(|| expected("string", value))
}

fn as_bool(value: &Value) -> Result<bool, String> {
    value.as_bool().ok_or_else(|| expected("boolean", value))
}

/// Integers, integral floats (`5.0`) and integer strings (`"5"`).
pub(crate) fn as_i64(value: &Value) -> Result<i64, String> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return Ok(i);
            }
            match n.as_f64() {
                #[allow(clippy::cast_possible_truncation)]
                Some(f) if f.fract() == 0.0 && f.abs() < 9.0e15 => Ok(f as i64),
                _ => Err(format!("number {n} is not a representable integer")),
            }
        }
        Value::String(s) => s
            .parse::<i64>()
            .map_err(|_| format!("string \"{s}\" is not an integer")),
        other => Err(expected("integer", other)),
    }
}

fn as_f64(value: &Value) -> Result<f64, String> {
    match value {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| format!("number {n} is not representable as a float")),
        Value::String(s) => match s.parse::<f64>() {
            Ok(f) if f.is_finite() => Ok(f),
            _ => Err(format!("string \"{s}\" is not a number")),
        },
        other => Err(expected("number", other)),
    }
}

/// Exact decimal parsing from either the JSON number's textual form or a
/// numeric string. `1e-7` style exponents are accepted.
pub(crate) fn as_decimal(value: &Value) -> Result<Decimal, String> {
    let text = match value {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        other => return Err(expected("decimal number", other)),
    };
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .map_err(|_| format!("\"{text}\" is not a decimal number"))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[derive(Debug)]
    struct Line {
        sku: String,
        qty: i64,
        price: Decimal,
        note: Option<String>,
        gift: bool,
    }

    impl FromRecord for Line {
        fn from_record(record: &Record<'_>) -> Result<Self, NormalizeError> {
            Ok(Self {
                sku: record.string("sku")?,
                qty: record.int("qty")?,
                price: record.decimal("price")?,
                note: record.opt_string("note")?,
                gift: record.bool_or("gift", false)?,
            })
        }
    }

    #[derive(Debug)]
    struct Cart {
        lines: Vec<Line>,
        tags: Vec<String>,
    }

    impl FromRecord for Cart {
        fn from_record(record: &Record<'_>) -> Result<Self, NormalizeError> {
            Ok(Self {
                lines: record.list("lines")?,
                tags: record.string_list_or_empty("tags")?,
            })
        }
    }

    #[test]
    fn required_key_missing_names_the_key() {
        let err = normalize::<Line>(&json!({"qty": 1, "price": 2})).unwrap_err();
        assert_eq!(err.key(), "sku");
        assert!(err.to_string().contains("missing required key"));
    }

    #[test]
    fn required_key_null_is_missing() {
        let err = normalize::<Line>(&json!({"sku": null, "qty": 1, "price": 2})).unwrap_err();
        assert_eq!(err.key(), "sku");
    }

    #[test]
    fn optional_without_default_distinguishes_absent_from_empty() {
        let absent = normalize::<Line>(&json!({"sku": "a", "qty": 1, "price": 2})).unwrap();
        assert_eq!(absent.note, None);

        let empty =
            normalize::<Line>(&json!({"sku": "a", "qty": 1, "price": 2, "note": ""})).unwrap();
        assert_eq!(empty.note.as_deref(), Some(""));
    }

    #[test]
    fn optional_with_default_applies_default() {
        let line = normalize::<Line>(&json!({"sku": "a", "qty": 1, "price": 2})).unwrap();
        assert!(!line.gift);
    }

    #[test]
    fn numeric_strings_are_parsed_explicitly() {
        let line =
            normalize::<Line>(&json!({"sku": "a", "qty": "3", "price": "12.99"})).unwrap();
        assert_eq!(line.qty, 3);
        assert_eq!(line.price, dec("12.99"));
    }

    #[test]
    fn non_numeric_string_is_rejected() {
        let err =
            normalize::<Line>(&json!({"sku": "a", "qty": "three", "price": 1})).unwrap_err();
        assert_eq!(err.key(), "qty");
    }

    #[test]
    fn boolean_is_not_a_number() {
        let err = normalize::<Line>(&json!({"sku": "a", "qty": true, "price": 1})).unwrap_err();
        assert_eq!(err.key(), "qty");
        assert!(err.to_string().contains("found boolean"));
    }

    #[test]
    fn number_is_not_a_boolean() {
        let err = normalize::<Line>(&json!({"sku": "a", "qty": 1, "price": 1, "gift": 1}))
            .unwrap_err();
        assert_eq!(err.key(), "gift");
    }

    #[test]
    fn fractional_number_is_not_an_integer() {
        let err = normalize::<Line>(&json!({"sku": "a", "qty": 1.5, "price": 1})).unwrap_err();
        assert_eq!(err.key(), "qty");
    }

    #[test]
    fn float_price_keeps_its_decimal_digits() {
        let line = normalize::<Line>(&json!({"sku": "a", "qty": 1, "price": 66.7})).unwrap();
        assert_eq!(line.price, dec("66.7"));
        assert_eq!(line.price.to_string(), "66.7");
    }

    #[test]
    fn nested_list_errors_carry_index_and_key() {
        let raw = json!({
            "lines": [
                {"sku": "a", "qty": 1, "price": 1},
                {"sku": "b", "price": 1}
            ]
        });
        let err = normalize::<Cart>(&raw).unwrap_err();
        assert_eq!(err.key(), "lines[1].qty");
    }

    #[test]
    fn list_preserves_source_order() {
        let raw = json!({
            "lines": [
                {"sku": "z", "qty": 1, "price": 1},
                {"sku": "a", "qty": 1, "price": 1},
                {"sku": "m", "qty": 1, "price": 1}
            ],
            "tags": ["x", "y"]
        });
        let cart = normalize::<Cart>(&raw).unwrap();
        let skus: Vec<_> = cart.lines.iter().map(|l| l.sku.as_str()).collect();
        assert_eq!(skus, ["z", "a", "m"]);
        assert_eq!(cart.tags, ["x", "y"]);
    }

    #[test]
    fn scalar_list_element_error_names_index() {
        let raw = json!({"lines": [], "tags": ["x", 3]});
        let err = normalize::<Cart>(&raw).unwrap_err();
        assert_eq!(err.key(), "tags[1]");
    }

    #[test]
    fn root_must_be_an_object() {
        let err = normalize::<Line>(&json!([1, 2])).unwrap_err();
        assert_eq!(err.key(), "$");
    }

    #[test]
    fn normalize_list_indexes_elements() {
        let raw = json!([{"sku": "a", "qty": 1, "price": 1}, {"sku": "b", "qty": 1}]);
        let err = normalize_list::<Line>(&raw).unwrap_err();
        assert_eq!(err.key(), "[1].price");
    }

    #[test]
    fn normalize_strings_rejects_objects_and_non_string_elements() {
        assert_eq!(normalize_strings(&json!(["FR", "DE"])).unwrap(), ["FR", "DE"]);
        assert_eq!(normalize_strings(&json!({"FR": true})).unwrap_err().key(), "$");
        assert_eq!(normalize_strings(&json!(["FR", 3])).unwrap_err().key(), "[1]");
    }

    #[test]
    fn nullable_string_requires_presence() {
        #[derive(Debug)]
        struct Node(Option<String>);
        impl FromRecord for Node {
            fn from_record(record: &Record<'_>) -> Result<Self, NormalizeError> {
                Ok(Self(record.nullable_string("parent")?))
            }
        }

        assert!(normalize::<Node>(&json!({"parent": null})).unwrap().0.is_none());
        assert_eq!(
            normalize::<Node>(&json!({"parent": "A"})).unwrap().0.as_deref(),
            Some("A")
        );
        assert_eq!(normalize::<Node>(&json!({})).unwrap_err().key(), "parent");
    }

    #[test]
    fn keyed_accepts_objects_keyed_by_id() {
        #[derive(Debug)]
        struct Lines(Vec<Line>);
        impl FromRecord for Lines {
            fn from_record(record: &Record<'_>) -> Result<Self, NormalizeError> {
                Ok(Self(record.keyed("lines")?))
            }
        }

        let raw = json!({"lines": {
            "12": {"sku": "a", "qty": 1, "price": 1},
            "15": {"sku": "b", "qty": 2, "price": 1}
        }});
        let lines = normalize::<Lines>(&raw).unwrap().0;
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].qty, 2);

        let broken = json!({"lines": {"12": {"sku": "a", "price": 1}}});
        assert_eq!(normalize::<Lines>(&broken).unwrap_err().key(), "lines.12.qty");
    }

    #[test]
    fn int_map_coerces_keys_and_values() {
        #[derive(Debug)]
        struct Combination(BTreeMap<i64, i64>);
        impl FromRecord for Combination {
            fn from_record(record: &Record<'_>) -> Result<Self, NormalizeError> {
                Ok(Self(record.int_map("combination")?))
            }
        }

        let map = normalize::<Combination>(&json!({"combination": {"1": "3", "2": 5}}))
            .unwrap()
            .0;
        assert_eq!(map.get(&1), Some(&3));
        assert_eq!(map.get(&2), Some(&5));

        let err = normalize::<Combination>(&json!({"combination": {"size": 5}})).unwrap_err();
        assert_eq!(err.key(), "combination.size");
    }

    #[test]
    fn decimal_accepts_scientific_notation() {
        assert_eq!(as_decimal(&json!("1e-2")).unwrap(), dec("0.01"));
    }
}
