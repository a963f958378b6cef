use sorted_concurrent_map::prelude::*;

mod single_threaded;

pub fn assert_sorted_unique<K: Ord + std::fmt::Debug, V>(map: &SortedConcurrentMap<K, V>) {
    let guard = map.lock();
    let keys: Vec<&K> = guard.iter().map(|(k, _)| k).collect();
    for pair in keys.windows(2) {
        assert!(pair[0] < pair[1], "{:?} is not less than {:?}", pair[0], pair[1]);
    }
}
