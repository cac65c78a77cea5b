use std::sync::Arc;

use crate::fetcher::EntityRecord;

// Stable top-down merge sort, ascending by id. Equal ids keep their input order.
pub fn merge_sort_by_id(records: Vec<EntityRecord>) -> Vec<EntityRecord> {
    if records.len() <= 1 {
        return records;
    }
    let mut left = records;
    let right = left.split_off(left.len() / 2);
    merge(merge_sort_by_id(left), merge_sort_by_id(right))
}

fn merge(left: Vec<EntityRecord>, right: Vec<EntityRecord>) -> Vec<EntityRecord> {
    let mut out = Vec::with_capacity(left.len() + right.len());
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();
    loop {
        let take_left = match (left.peek(), right.peek()) {
            (Some(l), Some(r)) => l.id <= r.id,
            (Some(_), None) => true,
            (None, Some(_)) => false,
            (None, None) => break,
        };
        let next = if take_left { left.next() } else { right.next() };
        out.extend(next);
    }
    out
}

// The session's immutable snapshot of every loaded record, ascending by id.
#[derive(Clone, Debug)]
pub struct EntityIndex {
    records: Arc<[EntityRecord]>,
}

impl EntityIndex {
    // Input that is not already ascending by id goes through the merge sort,
    // so `get` can always binary search.
    pub fn new(records: Vec<EntityRecord>) -> Self {
        let records = if records.windows(2).all(|w| w[0].id <= w[1].id) {
            records
        } else {
            merge_sort_by_id(records)
        };
        Self {
            records: records.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: u32) -> Option<&EntityRecord> {
        self.records
            .binary_search_by_key(&id, |r| r.id)
            .ok()
            .map(|pos| &self.records[pos])
    }

    pub fn iter(&self) -> std::slice::Iter<'_, EntityRecord> {
        self.records.iter()
    }

    pub fn as_slice(&self) -> &[EntityRecord] {
        &self.records
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(id: u32, name: &str) -> EntityRecord {
        EntityRecord {
            id,
            name: name.to_string(),
            stats: Vec::new(),
            sprite_url: None,
            type_tags: Vec::new(),
        }
    }

    fn ids(records: &[EntityRecord]) -> Vec<u32> {
        records.iter().map(|r| r.id).collect()
    }

    fn batch(ids: &[u32]) -> Vec<EntityRecord> {
        ids.iter().map(|&id| rec(id, &format!("mon{id}"))).collect()
    }

    #[test]
    fn empty_and_singleton_are_unchanged() {
        assert!(merge_sort_by_id(Vec::new()).is_empty());
        assert_eq!(ids(&merge_sort_by_id(batch(&[42]))), vec![42]);
    }

    #[test]
    fn sorts_ascending_by_id() {
        let sorted = merge_sort_by_id(batch(&[5, 3, 9, 1, 7, 2, 8, 6, 4]));
        assert_eq!(ids(&sorted), (1..=9).collect::<Vec<u32>>());
    }

    #[test]
    fn sorting_sorted_input_is_identity() {
        let once = merge_sort_by_id(batch(&[151, 4, 25, 1, 7, 150]));
        let twice = merge_sort_by_id(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn every_permutation_produces_the_same_order() {
        let expected: Vec<u32> = (1..=12).collect();
        let base = batch(&expected);
        let mut permutations: Vec<Vec<EntityRecord>> = Vec::new();
        for shift in 0..base.len() {
            let mut rotated = base.clone();
            rotated.rotate_left(shift);
            permutations.push(rotated.iter().rev().cloned().collect());
            permutations.push(rotated);
        }
        let (even, odd): (Vec<_>, Vec<_>) = base.iter().cloned().partition(|r| r.id % 2 == 0);
        permutations.push(odd.into_iter().chain(even).collect());

        for p in permutations {
            assert_eq!(ids(&merge_sort_by_id(p)), expected);
        }
    }

    #[test]
    fn duplicate_ids_are_both_kept_in_input_order() {
        let sorted = merge_sort_by_id(vec![rec(2, "b"), rec(1, "first"), rec(1, "second")]);
        let names: Vec<&str> = sorted.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["first", "second", "b"]);
    }

    #[test]
    fn lookup_resolves_by_id_not_position() {
        let index = EntityIndex::new(batch(&[1, 2, 4, 10]));
        assert_eq!(index.get(4).map(|r| r.id), Some(4));
        assert_eq!(index.get(10).map(|r| r.id), Some(10));
        assert!(index.get(3).is_none());
        assert!(index.get(0).is_none());
        assert_eq!(index.len(), 4);
    }

    #[test]
    fn unordered_input_is_sorted_before_indexing() {
        let index = EntityIndex::new(batch(&[10, 1, 4, 2]));
        assert_eq!(ids(index.as_slice()), vec![1, 2, 4, 10]);
        assert_eq!(index.get(1).map(|r| r.id), Some(1));
        assert_eq!(index.get(10).map(|r| r.id), Some(10));
        assert!(index.get(3).is_none());
    }
}
