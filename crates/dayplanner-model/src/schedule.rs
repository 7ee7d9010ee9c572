use chrono::{Datelike, Days, NaiveDate, Weekday};

use crate::Task;

/// The seven consecutive dates of the week containing `anchor`, starting on
/// `week_start`, or `None` when that week runs past the representable range.
pub fn week_dates(anchor: NaiveDate, week_start: Weekday) -> Option<[NaiveDate; 7]> {
    let offset = (7 + anchor.weekday().num_days_from_monday()
        - week_start.num_days_from_monday())
        % 7;
    let start = anchor.checked_sub_days(Days::new(u64::from(offset)))?;
    let mut dates = [start; 7];
    for i in 1..dates.len() {
        dates[i] = dates[i - 1].succ_opt()?;
    }
    Some(dates)
}

/// The tasks of one day, in priority order, possibly cut to a display limit.
#[derive(Debug, Clone, PartialEq)]
pub struct DaySchedule {
    pub date: NaiveDate,
    pub tasks: Vec<Task>,
    /// Tasks left out by the display limit.
    pub hidden: usize,
}

impl DaySchedule {
    pub(crate) fn new(date: NaiveDate, mut tasks: Vec<Task>, limit: Option<usize>) -> Self {
        let hidden = match limit {
            Some(limit) if tasks.len() > limit => {
                let hidden = tasks.len() - limit;
                tasks.truncate(limit);
                hidden
            }
            _ => 0,
        };
        Self {
            date,
            tasks,
            hidden,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeekView {
    pub days: Vec<DaySchedule>,
}
