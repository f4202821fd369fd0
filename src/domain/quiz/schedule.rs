// ============================================================
// DATE DISTRIBUTOR
// ============================================================
// Spread grouped rows across a calendar range, one row of each
// difficulty per day

use chrono::{Days, NaiveDate};
use serde::Serialize;

use super::row::CleanedRow;

/// Valid rows grouped by difficulty tier, in CSV order.
#[derive(Debug, Clone, Default)]
pub struct GroupedRows {
    pub easy: Vec<CleanedRow>,
    pub medium: Vec<CleanedRow>,
    pub difficult: Vec<CleanedRow>,
}

impl GroupedRows {
    /// Day count implied by the fullest bucket.
    pub fn number_of_days(&self) -> usize {
        self.easy.len().max(self.medium.len()).max(self.difficult.len())
    }
}

/// One calendar day's worth of quiz content.
#[derive(Debug, Clone, Serialize)]
pub struct DateBucket {
    pub date: NaiveDate,
    pub easy: Option<CleanedRow>,
    pub medium: Option<CleanedRow>,
    pub difficult: Option<CleanedRow>,
}

/// Distribute grouped rows across consecutive days starting at
/// `start_date`, chronological order.
///
/// The slots of a day are joined purely by position: day N gets whichever
/// row sits at index N of each bucket. There is no shared identifier
/// between buckets; swapping in an explicit day-keyed strategy only
/// requires replacing this function.
pub fn distribute(rows: &GroupedRows, start_date: NaiveDate) -> Vec<DateBucket> {
    (0..rows.number_of_days())
        .map(|day_index| DateBucket {
            date: start_date + Days::new(day_index as u64),
            easy: rows.easy.get(day_index).cloned(),
            medium: rows.medium.get(day_index).cloned(),
            difficult: rows.difficult.get(day_index).cloned(),
        })
        .collect()
}

/// Last publish date for a run of `number_of_days` days; `None` when
/// there is nothing to schedule.
pub fn end_date(start_date: NaiveDate, number_of_days: usize) -> Option<NaiveDate> {
    if number_of_days == 0 {
        return None;
    }
    Some(start_date + Days::new(number_of_days as u64 - 1))
}
