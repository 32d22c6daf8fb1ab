use crate::domain::model::{Period, ReviewRecord};

/// Records watched during `period`, in dataset order.
pub fn filter_by_period(records: &[ReviewRecord], period: Period) -> Vec<&ReviewRecord> {
    records
        .iter()
        .filter(|record| period.contains(record.watched_date))
        .collect()
}
