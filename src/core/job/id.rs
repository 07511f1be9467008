//! Job identifier allocation

use crate::domain::JobId;
use chrono::Utc;
use std::sync::atomic::{AtomicI64, Ordering};

/// Hands out time-derived job identifiers
///
/// Ids are wall-clock milliseconds, bumped past the previous id when two
/// runs start within the same millisecond. They are unique within one
/// process only and serve as audit metadata on markers.
#[derive(Debug, Default)]
pub struct JobIdAllocator {
    last: AtomicI64,
}

static PROCESS_ALLOCATOR: JobIdAllocator = JobIdAllocator::new();

impl JobIdAllocator {
    /// Create an allocator with no history
    pub const fn new() -> Self {
        Self {
            last: AtomicI64::new(0),
        }
    }

    /// The allocator shared by every runner in this process
    pub fn process() -> &'static JobIdAllocator {
        &PROCESS_ALLOCATOR
    }

    /// Allocate the next id
    pub fn allocate(&self) -> JobId {
        self.allocate_at(Utc::now().timestamp_millis())
    }

    fn allocate_at(&self, now_millis: i64) -> JobId {
        let mut last = self.last.load(Ordering::SeqCst);
        loop {
            let next = now_millis.max(last + 1);
            match self
                .last
                .compare_exchange_weak(last, next, Ordering::SeqCst, Ordering::SeqCst)
            {
                Ok(_) => return JobId::new(next),
                Err(actual) => last = actual,
            }
        }
    }
}
