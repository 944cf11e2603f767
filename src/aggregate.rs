use std::collections::BTreeMap;

/// Arithmetic sum of `selector(item)`. Empty input sums to `0.0`.
pub fn sum<T, F>(items: &[T], selector: F) -> f64
where
    F: Fn(&T) -> f64,
{
    items.iter().map(selector).sum()
}

/// Buckets items by key. Items keep their input order inside each bucket.
pub fn group_by<T, K, F>(items: &[T], key_fn: F) -> BTreeMap<K, Vec<&T>>
where
    K: Ord,
    F: Fn(&T) -> K,
{
    let mut groups: BTreeMap<K, Vec<&T>> = BTreeMap::new();
    for item in items {
        groups.entry(key_fn(item)).or_default().push(item);
    }
    groups
}

/// `numerator / denominator`, or `0.0` when the denominator is not positive.
pub fn ratio_or_zero(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sum_empty_is_zero() {
        let items: Vec<f64> = Vec::new();
        assert_eq!(sum(&items, |v| *v), 0.0);
    }

    #[test]
    fn test_sum_with_selector() {
        let items = vec![("a", 1.5), ("b", 2.5), ("c", -1.0)];
        assert_eq!(sum(&items, |(_, v)| *v), 3.0);
    }

    #[test]
    fn test_group_by_preserves_order_within_group() {
        let items = vec![("x", 1), ("y", 2), ("x", 3), ("y", 4), ("x", 5)];
        let groups = group_by(&items, |(k, _)| *k);
        assert_eq!(groups.len(), 2);
        let xs: Vec<i32> = groups["x"].iter().map(|(_, v)| *v).collect();
        assert_eq!(xs, vec![1, 3, 5]);
        let ys: Vec<i32> = groups["y"].iter().map(|(_, v)| *v).collect();
        assert_eq!(ys, vec![2, 4]);
    }

    #[test]
    fn test_group_by_empty() {
        let items: Vec<(String, i32)> = Vec::new();
        assert!(group_by(&items, |(k, _)| k.clone()).is_empty());
    }

    #[test]
    fn test_ratio_or_zero_guards_zero_and_negative() {
        assert_eq!(ratio_or_zero(10.0, 4.0), 2.5);
        assert_eq!(ratio_or_zero(10.0, 0.0), 0.0);
        assert_eq!(ratio_or_zero(10.0, -2.0), 0.0);
    }
}
