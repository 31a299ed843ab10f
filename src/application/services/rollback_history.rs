use crate::domain::entities::RollbackRecord;
use std::collections::VecDeque;

/// 直近のロールバックを保持する固定長キュー。溢れた分は古い順に捨てる。
#[derive(Debug, Clone)]
pub struct RollbackHistory {
    records: VecDeque<RollbackRecord>,
    capacity: usize,
}

impl RollbackHistory {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            records: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, record: RollbackRecord) {
        while self.records.len() >= self.capacity {
            self.records.pop_front();
        }
        self.records.push_back(record);
    }

    /// 新しい方から `limit` 件を古い順で返す
    pub fn recent(&self, limit: usize) -> Vec<RollbackRecord> {
        let skip = self.records.len().saturating_sub(limit);
        self.records.iter().skip(skip).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }
}
