//! Successor computations over height vectors.
//!
//! Every expected outcome a validator compares against is produced here.
//! Out-of-range arguments yield `None`; callers turn that into a structural
//! error with the offending line attached.

use crate::vector::HeightVector;

/// Merges positions `i` and `i + 1` into a single node of height
/// `min(v[i], v[i + 1]) - 1`.
pub fn merge(vector: &HeightVector, i: usize) -> Option<HeightVector> {
    let values = vector.values();
    if i + 1 >= values.len() {
        return None;
    }
    let mut out = Vec::with_capacity(values.len() - 1);
    out.extend_from_slice(&values[..i]);
    out.push(values[i].min(values[i + 1]) - 1);
    out.extend_from_slice(&values[i + 2..]);
    Some(HeightVector::new(out))
}

/// Promotes (or demotes, for negative `d`) the node at position `p`.
pub fn delta(vector: &HeightVector, p: usize, d: i32) -> Option<HeightVector> {
    if p >= vector.len() {
        return None;
    }
    let out = vector
        .values()
        .iter()
        .enumerate()
        .map(|(j, &h)| if j == p { h + d } else { h })
        .collect();
    Some(HeightVector::new(out))
}

/// Replaces the node at `at` by two children whose heights are the parent's
/// plus `up.0` and `up.1`. The result is one entry longer.
pub fn split(vector: &HeightVector, at: usize, up: (i32, i32)) -> Option<HeightVector> {
    let values = vector.values();
    let parent = *values.get(at)?;
    let mut out = Vec::with_capacity(values.len() + 1);
    out.extend_from_slice(&values[..at]);
    out.push(parent + up.0);
    out.push(parent + up.1);
    out.extend_from_slice(&values[at + 1..]);
    Some(HeightVector::new(out))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn hv(text: &str) -> HeightVector {
        HeightVector::parse(text).expect("valid vector")
    }

    #[test]
    fn merge_takes_lower_sibling_minus_one() {
        assert_eq!(merge(&hv("3421"), 1), Some(hv("311")));
        assert_eq!(merge(&hv("11"), 0), Some(hv("0")));
        assert_eq!(merge(&hv("21"), 0), Some(hv("0")));
    }

    #[test]
    fn merge_rejects_last_position() {
        assert_eq!(merge(&hv("12"), 1), None);
        assert_eq!(merge(&hv("1"), 0), None);
        assert_eq!(merge(&hv(""), 0), None);
    }

    #[test]
    fn delta_shifts_one_entry() {
        assert_eq!(delta(&hv("221"), 2, -1), Some(hv("220")));
        assert_eq!(delta(&hv("0"), 0, 1), Some(hv("1")));
        assert_eq!(delta(&hv("0"), 1, 1), None);
    }

    #[test]
    fn split_inserts_two_children() {
        assert_eq!(split(&hv("0"), 0, (1, 2)), Some(hv("12")));
        assert_eq!(split(&hv("322"), 1, (2, 1)), Some(hv("3432")));
        assert_eq!(split(&hv("21"), 2, (1, 1)), None);
    }

    fn vector_and_index() -> impl Strategy<Value = (Vec<i32>, usize)> {
        proptest::collection::vec(-9i32..=9, 2..16)
            .prop_flat_map(|v| {
                let len = v.len();
                (Just(v), 0..len - 1)
            })
    }

    proptest! {
        #[test]
        fn merge_shrinks_by_one((values, i) in vector_and_index()) {
            let source = HeightVector::new(values.clone());
            let merged = merge(&source, i).expect("index in range");
            prop_assert_eq!(merged.len(), values.len() - 1);
            prop_assert_eq!(merged.get(i), Some(values[i].min(values[i + 1]) - 1));
            prop_assert_eq!(&merged.values()[..i], &values[..i]);
            prop_assert_eq!(&merged.values()[i + 1..], &values[i + 2..]);
        }

        #[test]
        fn delta_changes_only_target(
            (values, p) in proptest::collection::vec(-9i32..=9, 1..16)
                .prop_flat_map(|v| { let len = v.len(); (Just(v), 0..len) }),
            d in -3i32..=3,
        ) {
            let source = HeightVector::new(values.clone());
            let shifted = delta(&source, p, d).expect("position in range");
            prop_assert_eq!(shifted.len(), values.len());
            for (j, (&before, &after)) in values.iter().zip(shifted.values()).enumerate() {
                if j == p {
                    prop_assert_eq!(after - before, d);
                } else {
                    prop_assert_eq!(after, before);
                }
            }
        }
    }
}
