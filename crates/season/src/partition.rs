//! Static, partition-per-worker splitting of a match-id list.

/// Splits `items` into `worker_count` near-equal chunks, distributing any
/// remainder to the first chunks. Never returns more chunks than items, and
/// never an empty chunk ahead of a non-empty one.
pub fn partition<T: Clone>(items: &[T], worker_count: usize) -> Vec<Vec<T>> {
    if items.is_empty() || worker_count == 0 {
        return Vec::new();
    }
    let worker_count = worker_count.min(items.len());
    let base = items.len() / worker_count;
    let remainder = items.len() % worker_count;

    let mut chunks = Vec::with_capacity(worker_count);
    let mut start = 0;
    for worker in 0..worker_count {
        let extra = if worker < remainder { 1 } else { 0 };
        let end = start + base + extra;
        chunks.push(items[start..end].to_vec());
        start = end;
    }
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn even_split_has_equal_chunks() {
        let items: Vec<u32> = (0..9).collect();
        let chunks = partition(&items, 3);
        assert_eq!(chunks.iter().map(Vec::len).collect::<Vec<_>>(), vec![3, 3, 3]);
    }

    #[test]
    fn remainder_goes_to_first_chunks() {
        let items: Vec<u32> = (0..10).collect();
        let chunks = partition(&items, 3);
        assert_eq!(chunks.iter().map(Vec::len).collect::<Vec<_>>(), vec![4, 3, 3]);
        let flattened: Vec<u32> = chunks.into_iter().flatten().collect();
        assert_eq!(flattened, items);
    }

    #[test]
    fn more_workers_than_items_yields_one_item_per_chunk() {
        let items = vec![1, 2];
        let chunks = partition(&items, 5);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks.iter().map(Vec::len).collect::<Vec<_>>(), vec![1, 1]);
    }

    #[test]
    fn empty_items_yields_no_chunks() {
        let items: Vec<u32> = vec![];
        assert!(partition(&items, 4).is_empty());
    }
}
