use std::sync::atomic::{AtomicI64, Ordering};

/// Message ids: wall-clock milliseconds, bumped so every id is strictly
/// greater than the previous one.
pub struct IdGenerator {
    last: AtomicI64,
}

impl IdGenerator {
    pub fn starting_after(last: i64) -> Self {
        Self {
            last: AtomicI64::new(last),
        }
    }

    pub fn next_id(&self) -> i64 {
        self.next_at(chrono::Utc::now().timestamp_millis())
    }

    fn next_at(&self, now_ms: i64) -> i64 {
        let mut prev = self.last.load(Ordering::Relaxed);
        loop {
            let candidate = now_ms.max(prev + 1);
            match self
                .last
                .compare_exchange_weak(prev, candidate, Ordering::AcqRel, Ordering::Relaxed)
            {
                Ok(_) => return candidate,
                Err(actual) => prev = actual,
            }
        }
    }
}
