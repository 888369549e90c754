//! Result materialization.
//!
//! Joined and recursive queries may hand back the same entity more than
//! once. Rows are reduced to distinct entities here, keyed by identifier,
//! keeping the first occurrence and the storage order. Nothing is re-sorted.

use std::collections::HashSet;

use uuid::Uuid;

/// An entity row with a stable identifier.
pub trait Identified {
    fn id(&self) -> Uuid;
}

/// Drop every row whose identifier was already seen, preserving order.
pub fn distinct_by_id<T: Identified>(rows: impl IntoIterator<Item = T>) -> Vec<T> {
    let mut seen = HashSet::new();
    rows.into_iter()
        .filter(|row| seen.insert(row.id()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Row(Uuid, &'static str);

    impl Identified for Row {
        fn id(&self) -> Uuid {
            self.0
        }
    }

    fn id(n: u128) -> Uuid {
        Uuid::from_u128(n)
    }

    #[test]
    fn keeps_first_seen_order() {
        let rows = vec![
            Row(id(3), "c"),
            Row(id(1), "a"),
            Row(id(3), "c again"),
            Row(id(2), "b"),
            Row(id(1), "a again"),
        ];

        let distinct = distinct_by_id(rows);

        assert_eq!(
            distinct,
            vec![Row(id(3), "c"), Row(id(1), "a"), Row(id(2), "b")]
        );
    }

    #[test]
    fn does_not_sort() {
        let rows = vec![Row(id(9), "z"), Row(id(1), "a")];
        let distinct = distinct_by_id(rows);
        assert_eq!(distinct[0].0, id(9));
        assert_eq!(distinct[1].0, id(1));
    }

    #[test]
    fn empty_input() {
        let distinct = distinct_by_id(Vec::<Row>::new());
        assert!(distinct.is_empty());
    }
}
