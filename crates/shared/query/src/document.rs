//! Dotted-path access and ordering over BSON documents.
//!
//! Follows the document-database conventions the plans rely on: a path that
//! crosses an array fans out over its elements, and a terminal array
//! contributes each element.

use std::cmp::Ordering;

use bson::{Bson, Document};

/// Every value reachable at `path`.
pub fn resolve_path<'a>(document: &'a Document, path: &str) -> Vec<&'a Bson> {
    let mut segments = path.split('.');
    let mut current: Vec<&Bson> = match segments.next().and_then(|first| document.get(first)) {
        Some(value) => vec![value],
        None => return Vec::new(),
    };

    for segment in segments {
        let mut next = Vec::new();
        for value in current {
            match value {
                Bson::Document(inner) => next.extend(inner.get(segment)),
                Bson::Array(items) => {
                    for item in items {
                        if let Bson::Document(inner) = item {
                            next.extend(inner.get(segment));
                        }
                    }
                }
                _ => {}
            }
        }
        current = next;
    }

    let mut values = Vec::with_capacity(current.len());
    for value in current {
        match value {
            Bson::Array(items) => values.extend(items.iter()),
            other => values.push(other),
        }
    }
    values
}

/// First value at `path`, without fanning out over arrays.
pub fn first_value<'a>(document: &'a Document, path: &str) -> Option<&'a Bson> {
    let mut segments = path.split('.');
    let mut current = document.get(segments.next()?)?;
    for segment in segments {
        current = match current {
            Bson::Document(inner) => inner.get(segment)?,
            _ => return None,
        };
    }
    Some(current)
}

/// Set `value` at `path`, creating intermediate documents as needed.
pub fn set_path(document: &mut Document, path: &str, value: Bson) {
    match path.split_once('.') {
        None => {
            document.insert(path, value);
        }
        Some((head, rest)) => {
            if !matches!(document.get(head), Some(Bson::Document(_))) {
                document.insert(head, Document::new());
            }
            if let Some(Bson::Document(inner)) = document.get_mut(head) {
                set_path(inner, rest, value);
            }
        }
    }
}

pub fn as_number(value: &Bson) -> Option<f64> {
    match value {
        Bson::Int32(n) => Some(f64::from(*n)),
        Bson::Int64(n) => Some(*n as f64),
        Bson::Double(n) => Some(*n),
        _ => None,
    }
}

/// Equality that treats all numeric types as one.
pub fn values_equal(left: &Bson, right: &Bson) -> bool {
    match (as_number(left), as_number(right)) {
        (Some(a), Some(b)) => a == b,
        _ => left == right,
    }
}

fn type_rank(value: Option<&Bson>) -> u8 {
    match value {
        None | Some(Bson::Null) | Some(Bson::Undefined) => 1,
        Some(Bson::Int32(_)) | Some(Bson::Int64(_)) | Some(Bson::Double(_)) => 2,
        Some(Bson::String(_)) | Some(Bson::Symbol(_)) => 3,
        Some(Bson::Document(_)) => 4,
        Some(Bson::Array(_)) => 5,
        Some(Bson::ObjectId(_)) => 7,
        Some(Bson::Boolean(_)) => 8,
        Some(Bson::DateTime(_)) => 9,
        Some(_) => 10,
    }
}

/// Cross-type ordering: missing < numbers < strings < documents < arrays
/// < object ids < booleans < dates.
pub fn compare_values(left: Option<&Bson>, right: Option<&Bson>) -> Ordering {
    let rank = type_rank(left).cmp(&type_rank(right));
    if rank != Ordering::Equal {
        return rank;
    }

    match (left, right) {
        (Some(l), Some(r)) => {
            if let (Some(a), Some(b)) = (as_number(l), as_number(r)) {
                return a.partial_cmp(&b).unwrap_or(Ordering::Equal);
            }
            match (l, r) {
                (Bson::String(a), Bson::String(b)) => a.cmp(b),
                (Bson::ObjectId(a), Bson::ObjectId(b)) => a.bytes().cmp(&b.bytes()),
                (Bson::Boolean(a), Bson::Boolean(b)) => a.cmp(b),
                (Bson::DateTime(a), Bson::DateTime(b)) => a.cmp(b),
                _ => Ordering::Equal,
            }
        }
        _ => Ordering::Equal,
    }
}
