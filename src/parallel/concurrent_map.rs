use std::collections::BTreeMap;
use parking_lot::{MappedMutexGuard, Mutex, MutexGuard};
use crate::core::types::DocId;

/// Keys that pick their shard by `key mod shard_count`
pub trait ShardKey: Ord + Copy + Send {
    fn shard_index(&self, shard_count: usize) -> usize;
}

macro_rules! impl_shard_key {
    ($($t:ty),*) => {
        $(
            impl ShardKey for $t {
                fn shard_index(&self, shard_count: usize) -> usize {
                    ((*self as u64) % shard_count as u64) as usize
                }
            }
        )*
    };
}

impl_shard_key!(i32, i64, u32, u64, usize);

impl ShardKey for DocId {
    fn shard_index(&self, shard_count: usize) -> usize {
        self.0.shard_index(shard_count)
    }
}

/// Map split into independently locked shards.
///
/// A key always lives in the same shard, so operations on different shards
/// never contend and draining never sees the same key twice.
pub struct ConcurrentMap<K, V> {
    shards: Vec<Mutex<BTreeMap<K, V>>>,
}

impl<K: ShardKey, V> ConcurrentMap<K, V> {
    /// A shard count of zero is treated as one.
    pub fn new(shard_count: usize) -> Self {
        let shards = (0..shard_count.max(1))
            .map(|_| Mutex::new(BTreeMap::new()))
            .collect();
        ConcurrentMap { shards }
    }

    pub fn shard_count(&self) -> usize {
        self.shards.len()
    }

    fn shard(&self, key: &K) -> &Mutex<BTreeMap<K, V>> {
        &self.shards[key.shard_index(self.shards.len())]
    }

    /// Locks the key's shard and returns the value, inserting the default if absent.
    /// The shard stays locked until the guard is dropped.
    pub fn access(&self, key: K) -> MappedMutexGuard<'_, V>
    where
        V: Default,
    {
        let guard = self.shard(&key).lock();
        MutexGuard::map(guard, |map| map.entry(key).or_default())
    }

    pub fn update<F>(&self, key: K, f: F)
    where
        V: Default,
        F: FnOnce(&mut V),
    {
        f(&mut self.access(key));
    }

    pub fn erase(&self, key: &K) -> Option<V> {
        self.shard(key).lock().remove(key)
    }

    pub fn get(&self, key: &K) -> Option<V>
    where
        V: Clone,
    {
        self.shard(key).lock().get(key).cloned()
    }

    pub fn len(&self) -> usize {
        self.shards.iter().map(|shard| shard.lock().len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.shards.iter().all(|shard| shard.lock().is_empty())
    }

    /// Empties every shard into one ordered map. Shards are locked one at a time.
    pub fn drain(&self) -> BTreeMap<K, V> {
        let mut result = BTreeMap::new();
        for shard in &self.shards {
            let mut entries = std::mem::take(&mut *shard.lock());
            result.append(&mut entries);
        }
        result
    }

    pub fn into_ordinary_map(self) -> BTreeMap<K, V> {
        let mut result = BTreeMap::new();
        for shard in self.shards {
            result.append(&mut shard.into_inner());
        }
        result
    }
}
