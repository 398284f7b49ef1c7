use rehome_storage::RelocationOutcome;
use std::iter::Sum;
use std::ops::Add;

/// Outcome counts for a set of relocation attempts.
///
/// Only built from outcomes (or by adding other `Stats`), so `total` always
/// equals `moved + failed + skipped`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    moved: u64,
    failed: u64,
    skipped: u64,
    total: u64,
}
impl Stats {
    pub fn moved(&self) -> u64 {
        self.moved
    }

    pub fn failed(&self) -> u64 {
        self.failed
    }

    pub fn skipped(&self) -> u64 {
        self.skipped
    }

    pub fn total(&self) -> u64 {
        self.total
    }
}
impl From<&RelocationOutcome> for Stats {
    fn from(outcome: &RelocationOutcome) -> Self {
        let (moved, failed, skipped) = match outcome {
            RelocationOutcome::Moved => (1, 0, 0),
            RelocationOutcome::Failed(_) => (0, 1, 0),
            RelocationOutcome::Skipped(_) => (0, 0, 1),
        };
        Self { moved, failed, skipped, total: 1 }
    }
}
impl Add for Stats {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self {
            moved: self.moved + rhs.moved,
            failed: self.failed + rhs.failed,
            skipped: self.skipped + rhs.skipped,
            total: self.total + rhs.total,
        }
    }
}
impl Sum for Stats {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

/// Counts for a single tenant's pass.
pub type TenantStats = Stats;

/// Counts for a whole run: every tenant's file counts added together, plus
/// how many tenants were processed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GlobalStats {
    pub files: Stats,
    /// Tenants that were processed to completion.
    pub tenants: u64,
    /// Tenants abandoned under [`TenantErrorPolicy::Continue`](crate::TenantErrorPolicy::Continue).
    pub tenants_failed: u64,
}
impl GlobalStats {
    pub fn with_tenant(self, stats: TenantStats) -> Self {
        Self { files: self.files + stats, tenants: self.tenants + 1, ..self }
    }

    pub fn with_failed_tenant(self) -> Self {
        Self { tenants_failed: self.tenants_failed + 1, ..self }
    }
}
