//! Sort-order comparison for BSON values, used by the in-memory adapter to
//! reproduce MongoDB's `sort` results.
//!
//! Values are first ranked by type bracket (missing/null, numbers, strings,
//! documents, arrays, ...) and only compared by value within a bracket.

use std::cmp::Ordering;

use mongodb::bson::{Bson, Document};

fn bracket(value: Option<&Bson>) -> u8 {
    match value {
        None | Some(Bson::Null) | Some(Bson::Undefined) => 1,
        Some(Bson::MinKey) => 0,
        Some(Bson::Int32(_)) | Some(Bson::Int64(_)) | Some(Bson::Double(_)) | Some(Bson::Decimal128(_)) => 2,
        Some(Bson::String(_)) | Some(Bson::Symbol(_)) => 3,
        Some(Bson::Document(_)) => 4,
        Some(Bson::Array(_)) => 5,
        Some(Bson::Binary(_)) => 6,
        Some(Bson::ObjectId(_)) => 7,
        Some(Bson::Boolean(_)) => 8,
        Some(Bson::DateTime(_)) => 9,
        Some(Bson::Timestamp(_)) => 10,
        Some(Bson::RegularExpression(_)) => 11,
        Some(Bson::MaxKey) => 13,
        Some(_) => 12,
    }
}

fn as_f64(value: &Bson) -> Option<f64> {
    match value {
        Bson::Int32(v) => Some(f64::from(*v)),
        Bson::Int64(v) => Some(*v as f64),
        Bson::Double(v) => Some(*v),
        _ => None,
    }
}

/// Ascending comparison of two field values, `None` meaning the field is absent.
pub(crate) fn compare(a: Option<&Bson>, b: Option<&Bson>) -> Ordering {
    let by_bracket = bracket(a).cmp(&bracket(b));
    if by_bracket != Ordering::Equal {
        return by_bracket;
    }
    match (a, b) {
        (Some(Bson::String(x)), Some(Bson::String(y))) => x.cmp(y),
        (Some(Bson::ObjectId(x)), Some(Bson::ObjectId(y))) => x.cmp(y),
        (Some(Bson::Boolean(x)), Some(Bson::Boolean(y))) => x.cmp(y),
        (Some(Bson::DateTime(x)), Some(Bson::DateTime(y))) => x.cmp(y),
        (Some(x), Some(y)) => match (as_f64(x), as_f64(y)) {
            (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
            _ => Ordering::Equal,
        },
        _ => Ordering::Equal,
    }
}

/// Stable in-place sort of documents by one field.
pub(crate) fn sort_by_field(docs: &mut [Document], field: &str, descending: bool) {
    docs.sort_by(|a, b| {
        let order = compare(a.get(field), b.get(field));
        if descending {
            order.reverse()
        } else {
            order
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::doc;

    #[test]
    fn numbers_compare_across_widths() {
        assert_eq!(compare(Some(&Bson::Int32(3)), Some(&Bson::Double(2.5))), Ordering::Greater);
        assert_eq!(compare(Some(&Bson::Int64(7)), Some(&Bson::Int32(7))), Ordering::Equal);
    }

    #[test]
    fn missing_sorts_before_numbers_and_numbers_before_strings() {
        assert_eq!(compare(None, Some(&Bson::Int32(0))), Ordering::Less);
        assert_eq!(compare(Some(&Bson::Int32(1000)), Some(&Bson::String("1".into()))), Ordering::Less);
    }

    #[test]
    fn descending_sort_is_stable_for_ties() {
        let mut docs = vec![
            doc! { "n": "a", "q": 2 },
            doc! { "n": "b", "q": 5 },
            doc! { "n": "c", "q": 2 },
        ];
        sort_by_field(&mut docs, "q", true);
        let names: Vec<_> = docs.iter().map(|d| d.get_str("n").unwrap()).collect();
        assert_eq!(names, ["b", "a", "c"]);
    }
}
