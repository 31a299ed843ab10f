use chrono::Utc;
use rand::rngs::{OsRng, StdRng};
use rand::{Rng, RngCore, SeedableRng};
use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Builder;

/// サーバー採番前の項目に付ける接頭辞
pub const TEMP_ID_PREFIX: &str = "temp_";

const SUFFIX_LEN: usize = 9;
const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

static FALLBACK_SEQUENCE: AtomicU64 = AtomicU64::new(0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum RandomSource {
    /// OS の乱数を使い、取得できなければフォールバックに切り替える
    #[default]
    Os,
    Fallback,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TemporaryIdGenerator {
    source: RandomSource,
}

impl TemporaryIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fallback_only() -> Self {
        Self {
            source: RandomSource::Fallback,
        }
    }

    pub fn generate(&self) -> String {
        match self.source {
            RandomSource::Os => secure_id().unwrap_or_else(fallback_id),
            RandomSource::Fallback => fallback_id(),
        }
    }
}

pub fn generate_temporary_id() -> String {
    TemporaryIdGenerator::new().generate()
}

pub fn is_temporary_id(id: &str) -> bool {
    id.starts_with(TEMP_ID_PREFIX)
}

fn secure_id() -> Option<String> {
    let mut bytes = [0u8; 16];
    if let Err(e) = OsRng.try_fill_bytes(&mut bytes) {
        tracing::warn!("OS randomness unavailable, using fallback id: {}", e);
        return None;
    }
    let uuid = Builder::from_random_bytes(bytes).into_uuid();
    Some(format!("{TEMP_ID_PREFIX}{uuid}"))
}

// 時刻 + プロセス内連番 + 疑似乱数。連番があるので時計の分解能に依存しない
fn fallback_id() -> String {
    let sequence = FALLBACK_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    let now = Utc::now();
    let seed = (now.timestamp_nanos_opt().unwrap_or_default() as u64) ^ sequence.rotate_left(32);
    let mut rng = StdRng::seed_from_u64(seed);
    let suffix: String = (0..SUFFIX_LEN)
        .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
        .collect();

    format!(
        "{TEMP_ID_PREFIX}{}_{sequence}_{suffix}",
        now.timestamp_millis()
    )
}
