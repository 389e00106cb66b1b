/// Splits a slice into maximal runs of consecutive elements sharing a key.
pub struct GroupBy<'a, T, F, K>
where
    T: 'a,
    F: FnMut(&T) -> K,
    K: PartialEq,
{
    slice: &'a [T],
    key: F,
}

impl<'a, T, F, K> GroupBy<'a, T, F, K>
where
    T: 'a,
    F: FnMut(&T) -> K,
    K: PartialEq,
{
    /// Groups `slice` by `key`; only adjacent elements can share a group.
    pub fn new(slice: &'a [T], key: F) -> Self {
        GroupBy { slice, key }
    }
}

impl<'a, T, F, K> Iterator for GroupBy<'a, T, F, K>
where
    T: 'a,
    F: FnMut(&T) -> K,
    K: PartialEq,
{
    type Item = (K, &'a [T]);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let (first, rest) = self.slice.split_first()?;
        let key = (self.key)(first);
        let len = 1 + rest.iter().take_while(|&x| (self.key)(x) == key).count();
        let (head, tail) = self.slice.split_at(len);
        self.slice = tail;
        Some((key, head))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_by_runs() {
        let scores = [0.9, 0.5, 0.5, 0.5, 0.1, 0.5];
        let groups: Vec<(f64, usize)> = GroupBy::new(&scores, |&x| x)
            .map(|(key, run)| (key, run.len()))
            .collect();
        assert_eq!(groups, vec![(0.9, 1), (0.5, 3), (0.1, 1), (0.5, 1)]);
    }

    #[test]
    fn test_group_by_empty() {
        let empty: [(f64, bool); 0] = [];
        assert_eq!(GroupBy::new(&empty, |x| x.0).count(), 0);
    }
}
