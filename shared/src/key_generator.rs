use std::collections::VecDeque;
use std::marker::PhantomData;
use std::time::{Duration, Instant};

/// Generates keys sequentially, recycling released keys after a timeout.
///
/// The timeout keeps a just-released key from being handed out again while
/// late references to it may still be in flight (e.g. a marker removed on
/// this rank whose id still appears in an unprocessed exchange).
pub struct KeyGenerator<K> {
    recycled_keys: VecDeque<(u64, Instant)>,
    recycle_timeout: Duration,
    next_new_key: u64,
    phantom: PhantomData<fn() -> K>,
}

impl<K: From<u64> + Into<u64> + Copy> KeyGenerator<K> {
    pub fn new(recycle_timeout: Duration) -> Self {
        Self {
            recycled_keys: VecDeque::new(),
            recycle_timeout,
            next_new_key: 0,
            phantom: PhantomData,
        }
    }

    /// Return a released key to the pool; it becomes available again once
    /// the recycle timeout has elapsed.
    pub fn recycle_key(&mut self, key: &K) {
        self.recycled_keys
            .push_back(((*key).into(), Instant::now()));
    }

    /// Get a new, unused key.
    pub fn generate(&mut self) -> K {
        if let Some((key, released_at)) = self.recycled_keys.front() {
            if released_at.elapsed() >= self.recycle_timeout {
                let key = *key;
                self.recycled_keys.pop_front();
                return K::from(key);
            }
        }

        let key = self.next_new_key;
        self.next_new_key = self.next_new_key.wrapping_add(1);
        K::from(key)
    }
}
