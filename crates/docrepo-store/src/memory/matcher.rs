//! Filter evaluation and ordering for the in-memory backend.

use std::cmp::Ordering;

use serde_json::{Number, Value};

use docrepo_core::types::filter::{Filter, FilterField, FilterOp};
use docrepo_core::types::find_options::{SortDirection, SortField};
use docrepo_core::types::stored::{RawDocument, StoredDocument};

/// Whether `doc` satisfies every constraint of `filter`.
pub fn matches(doc: &StoredDocument, filter: &Filter) -> bool {
    if filter.id.is_some_and(|id| id != doc.id) {
        return false;
    }
    filter
        .conditions
        .iter()
        .all(|condition| condition_holds(doc.get_path(&condition.field), condition))
}

fn condition_holds(actual: Option<&Value>, condition: &FilterField) -> bool {
    let expected = &condition.value;
    match condition.op {
        FilterOp::Eq => equals(actual, expected),
        FilterOp::Ne => !equals(actual, expected),
        FilterOp::Gt => compare_present(actual, expected).is_some_and(Ordering::is_gt),
        FilterOp::Gte => compare_present(actual, expected).is_some_and(Ordering::is_ge),
        FilterOp::Lt => compare_present(actual, expected).is_some_and(Ordering::is_lt),
        FilterOp::Lte => compare_present(actual, expected).is_some_and(Ordering::is_le),
        FilterOp::In => member_of(actual, expected),
        FilterOp::Nin => !member_of(actual, expected),
        FilterOp::Exists => expected.as_bool().unwrap_or(true) == actual.is_some(),
    }
}

// a missing field equals null
fn equals(actual: Option<&Value>, expected: &Value) -> bool {
    match actual {
        Some(value) => values_equal(value, expected),
        None => expected.is_null(),
    }
}

fn member_of(actual: Option<&Value>, expected: &Value) -> bool {
    expected
        .as_array()
        .is_some_and(|candidates| candidates.iter().any(|c| equals(actual, c)))
}

fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => compare_numbers(x, y) == Some(Ordering::Equal),
        _ => a == b,
    }
}

// integers compare exactly; f64 only when a float is involved
fn compare_numbers(x: &Number, y: &Number) -> Option<Ordering> {
    if let (Some(a), Some(b)) = (x.as_i64(), y.as_i64()) {
        return Some(a.cmp(&b));
    }
    if let (Some(a), Some(b)) = (x.as_u64(), y.as_u64()) {
        return Some(a.cmp(&b));
    }
    if !x.is_f64() && !y.is_f64() {
        // one side negative, the other above i64::MAX
        return Some(if x.as_i64().is_some() {
            Ordering::Less
        } else {
            Ordering::Greater
        });
    }
    x.as_f64()?.partial_cmp(&y.as_f64()?)
}

fn compare_present(actual: Option<&Value>, expected: &Value) -> Option<Ordering> {
    compare_values(actual?, expected)
}

/// Order two values of the same JSON type. Mixed types are unordered.
pub fn compare_values(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => compare_numbers(x, y),
        (Value::String(x), Value::String(y)) => Some(x.cmp(y)),
        (Value::Bool(x), Value::Bool(y)) => Some(x.cmp(y)),
        (Value::Null, Value::Null) => Some(Ordering::Equal),
        _ => None,
    }
}

/// Compare two documents by a list of sort keys. Missing fields sort first.
pub fn compare_documents(a: &StoredDocument, b: &StoredDocument, sort: &[SortField]) -> Ordering {
    for key in sort {
        let ordering = match (a.get_path(&key.field), b.get_path(&key.field)) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (Some(x), Some(y)) => compare_values(x, y).unwrap_or(Ordering::Equal),
        };
        let ordering = match key.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    Ordering::Equal
}

/// Write `value` at a dotted path, creating intermediate objects.
pub fn set_path(fields: &mut RawDocument, path: &str, value: Value) {
    match path.split_once('.') {
        None => {
            fields.insert(path.to_string(), value);
        }
        Some((head, rest)) => {
            let child = fields
                .entry(head.to_string())
                .or_insert_with(|| Value::Object(RawDocument::new()));
            if !child.is_object() {
                *child = Value::Object(RawDocument::new());
            }
            if let Value::Object(nested) = child {
                set_path(nested, rest, value);
            }
        }
    }
}
