use parking_lot::Mutex;
use shared::models::QuoteRecord;
use std::time::{Duration, Instant};

/// 共享状态: 内存报价账本
///
/// 进程重启后账本清空。
pub struct AppState {
    ledger: Mutex<Vec<QuoteRecord>>,
    pub request_timeout: Duration,
    started_at: Instant,
}

impl AppState {
    pub fn new(request_timeout: Duration) -> Self {
        Self {
            ledger: Mutex::new(Vec::new()),
            request_timeout,
            started_at: Instant::now(),
        }
    }

    /// Append a record, returning the new ledger length
    pub fn append(&self, record: QuoteRecord) -> usize {
        let mut ledger = self.ledger.lock();
        ledger.push(record);
        ledger.len()
    }

    /// Copy of the ledger in append order
    pub fn snapshot(&self) -> Vec<QuoteRecord> {
        self.ledger.lock().clone()
    }

    pub fn entries(&self) -> usize {
        self.ledger.lock().len()
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}
