use crate::SortedConcurrentMap;

pub trait MemStat {
    fn heap_size(&self) -> usize;
    fn used_size(&self) -> usize;
}

impl<T: MemStat> MemStat for Option<T> {
    fn heap_size(&self) -> usize {
        self.as_ref().map_or(0, |v| v.heap_size())
    }
    fn used_size(&self) -> usize {
        self.as_ref().map_or(0, |v| v.used_size())
    }
}

impl<T: MemStat> MemStat for Vec<T> {
    fn heap_size(&self) -> usize {
        self.capacity() * std::mem::size_of::<T>()
            + self.iter().map(|v| v.heap_size()).sum::<usize>()
    }
    fn used_size(&self) -> usize {
        self.len() * std::mem::size_of::<T>() + self.iter().map(|v| v.used_size()).sum::<usize>()
    }
}

impl MemStat for String {
    fn heap_size(&self) -> usize {
        self.capacity()
    }
    fn used_size(&self) -> usize {
        self.len()
    }
}

impl<A: MemStat, B: MemStat> MemStat for (A, B) {
    fn heap_size(&self) -> usize {
        self.0.heap_size() + self.1.heap_size()
    }
    fn used_size(&self) -> usize {
        self.0.used_size() + self.1.used_size()
    }
}

/// Entry slots are counted by the reserved capacity for `heap_size` and by the
/// live entries for `used_size`, plus whatever the keys and values own.
impl<K: MemStat, V: MemStat> MemStat for SortedConcurrentMap<K, V> {
    fn heap_size(&self) -> usize {
        let guard = self.lock();
        let slot_size = std::mem::size_of::<(K, V)>();
        let base_heap = guard.capacity() * slot_size;

        let kv_heap: usize = guard
            .iter()
            .map(|(k, v)| k.heap_size() + v.heap_size())
            .sum();

        base_heap + kv_heap
    }

    fn used_size(&self) -> usize {
        let guard = self.lock();
        let pair_size = std::mem::size_of::<(K, V)>();
        let base = guard.len() * pair_size;

        let used: usize = guard
            .iter()
            .map(|(k, v)| k.used_size() + v.used_size())
            .sum();

        base + used
    }
}

macro_rules! zero_heap_mem_stat_impl {
    ($($t:ty),*) => {
        $(
            impl MemStat for $t {
                fn heap_size(&self) -> usize {
                    0
                }
                fn used_size(&self) -> usize {
                    0
                }
            }
        )*
    };
}

zero_heap_mem_stat_impl!(
    u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, f32, f64, bool, char
);
