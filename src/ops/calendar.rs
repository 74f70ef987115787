use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::model::task::Task;

/// Weekday column headings, Sunday first
pub const WEEKDAY_HEADINGS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarCell {
    pub day_number: u32,
    pub is_current_month: bool,
    pub is_today: bool,
    pub has_task_due: bool,
}

/// Month grid of whole weeks, padded with neighbouring months' days
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarGrid {
    pub year: i32,
    pub month: u32,
    pub weeks: Vec<Vec<CalendarCell>>,
}

impl CalendarGrid {
    /// e.g. "November 2024"
    pub fn title(&self) -> String {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .map(|d| d.format("%B %Y").to_string())
            .unwrap_or_default()
    }

    pub fn cells(&self) -> impl Iterator<Item = &CalendarCell> {
        self.weeks.iter().flatten()
    }
}

/// Grid for the month containing `today`
pub fn project(tasks: &[Task], today: NaiveDate) -> CalendarGrid {
    project_month(tasks, today, today)
}

/// Grid for the month containing `month`. `is_today` is only set when that
/// month also contains `today`.
pub fn project_month(tasks: &[Task], month: NaiveDate, today: NaiveDate) -> CalendarGrid {
    let year = month.year();
    let mon = month.month();
    let first = first_of_month(year, mon);
    let days_in_month = days_in_month(year, mon);
    let days_in_prev = first.pred_opt().map_or(31, |d| d.day());
    let leading = first.weekday().num_days_from_sunday();

    let mut cells = Vec::with_capacity(42);

    for i in (0..leading).rev() {
        cells.push(padding_cell(days_in_prev - i));
    }

    for day in 1..=days_in_month {
        let is_today = today.year() == year && today.month() == mon && today.day() == day;
        let has_task_due = tasks.iter().any(|t| {
            t.due_date.year() == year && t.due_date.month() == mon && t.due_date.day() == day
        });
        cells.push(CalendarCell {
            day_number: day,
            is_current_month: true,
            is_today,
            has_task_due,
        });
    }

    let trailing = (7 - cells.len() % 7) % 7;
    for day in 1..=trailing as u32 {
        cells.push(padding_cell(day));
    }

    CalendarGrid {
        year,
        month: mon,
        weeks: cells.chunks(7).map(|w| w.to_vec()).collect(),
    }
}

fn padding_cell(day_number: u32) -> CalendarCell {
    CalendarCell {
        day_number,
        is_current_month: false,
        is_today: false,
        has_task_due: false,
    }
}

fn first_of_month(year: i32, month: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(NaiveDate::MIN)
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    next.and_then(|d| d.pred_opt()).map_or(31, |d| d.day())
}
