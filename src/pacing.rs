use std::time::Duration;

use tokio::sync::Mutex;

/// Inserts fixed delays between test groups to stay under the target API's
/// rate limits.
///
/// State is owned by the value, not a module global, so a run can hold one
/// shared `Pacer`, several independent ones, or a [`Pacer::disabled`] one
/// for deterministic offline runs.
#[derive(Debug)]
pub struct Pacer {
    group_gap: Duration,
    item_gap: Duration,
    last_group: Mutex<Option<String>>,
}

impl Pacer {
    pub fn new(group_gap: Duration, item_gap: Duration) -> Self {
        Self {
            group_gap,
            item_gap,
            last_group: Mutex::new(None),
        }
    }

    /// Conventional gaps used against the shared public instance.
    pub fn standard() -> Self {
        Self::new(Duration::from_secs(2), Duration::from_millis(500))
    }

    /// A pacer that never sleeps.
    pub fn disabled() -> Self {
        Self::new(Duration::ZERO, Duration::ZERO)
    }

    /// Waits the configured gap before the next test: the longer group gap
    /// when `group` differs from the previous call, the short item gap when
    /// it repeats. The first call never waits.
    pub async fn pace(&self, group: &str) {
        let gap = {
            let mut last = self.last_group.lock().await;
            let gap = match last.as_deref() {
                None => Duration::ZERO,
                Some(previous) if previous == group => self.item_gap,
                Some(_) => self.group_gap,
            };
            *last = Some(group.to_owned());
            gap
        };

        if !gap.is_zero() {
            tracing::debug!(group, gap_ms = gap.as_millis() as u64, "pacing before test");
            tokio::time::sleep(gap).await;
        }
    }
}
