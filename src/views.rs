//! Display-model computations for the presentation layer.
//!
//! Pure functions over the collections: kanban grouping, the calendar month
//! grid, and the upcoming list. The presentation layer owns DOM concerns;
//! it calls these after every change event and renders the result.

use chrono::{Datelike, Duration, NaiveDate};

use crate::config::UPCOMING_LIMIT;
use crate::model::{Event, Idea, IdeaKind, IdeaStatus};

/// Column day headers, Sunday first.
pub const DAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Board filter state: channel tab plus free-text search.
#[derive(Debug, Clone, Default)]
pub struct IdeaFilter {
    /// `None` shows every channel.
    pub kind: Option<IdeaKind>,
    pub search: Option<String>,
}

impl IdeaFilter {
    fn matches(&self, idea: &Idea) -> bool {
        if let Some(kind) = &self.kind {
            if idea.kind != *kind {
                return false;
            }
        }
        let Some(search) = self.search.as_deref().filter(|s| !s.is_empty()) else {
            return true;
        };
        let needle = search.to_lowercase();
        idea.title.to_lowercase().contains(&needle)
            || idea
                .notes
                .as_deref()
                .is_some_and(|n| n.to_lowercase().contains(&needle))
    }
}

/// One kanban column, sorted for display.
#[derive(Debug)]
pub struct KanbanColumn<'a> {
    pub status: IdeaStatus,
    pub ideas: Vec<&'a Idea>,
}

/// Group filtered ideas into the four pipeline columns.
///
/// In-column order: dated ideas first, ascending by publish date
/// (lexicographic on the fixed `YYYY-MM-DD` format), undated ideas after,
/// newest creation first. Ideas with an unrecognized status match no column
/// and simply do not appear on the board.
pub fn kanban_columns<'a>(ideas: &'a [Idea], filter: &IdeaFilter) -> Vec<KanbanColumn<'a>> {
    IdeaStatus::KNOWN
        .into_iter()
        .map(|status| {
            let mut column: Vec<&Idea> = ideas
                .iter()
                .filter(|i| i.status == status && filter.matches(i))
                .collect();
            column.sort_by(|a, b| match (&a.publish_date, &b.publish_date) {
                (Some(da), Some(db)) => da.cmp(db),
                (Some(_), None) => std::cmp::Ordering::Less,
                (None, Some(_)) => std::cmp::Ordering::Greater,
                (None, None) => b.created_at.cmp(&a.created_at),
            });
            KanbanColumn { status, ideas: column }
        })
        .collect()
}

/// Per-status totals for the count chips, over the unfiltered board.
pub fn status_counts(ideas: &[Idea]) -> Vec<(IdeaStatus, usize)> {
    IdeaStatus::KNOWN
        .into_iter()
        .map(|status| {
            let count = ideas.iter().filter(|i| i.status == status).count();
            (status, count)
        })
        .collect()
}

/// Ideas offered when assigning to a calendar day: unscheduled ones, plus
/// whatever is already on that day (so the assignment can be kept).
pub fn assignable_on<'a>(ideas: &'a [Idea], date: &str) -> Vec<&'a Idea> {
    ideas
        .iter()
        .filter(|i| match &i.publish_date {
            None => true,
            Some(d) => d == date,
        })
        .collect()
}

/// An entry of the upcoming list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpcomingEntry<'a> {
    pub id: &'a str,
    pub date: &'a str,
    pub title: &'a str,
    pub status: &'a str,
    pub kind: UpcomingKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpcomingKind {
    Idea,
    Event,
}

/// Scheduled ideas and dated events from `today` on, merged and ascending
/// by date, capped at [`UPCOMING_LIMIT`].
pub fn upcoming<'a>(ideas: &'a [Idea], events: &'a [Event], today: &str) -> Vec<UpcomingEntry<'a>> {
    let mut entries: Vec<UpcomingEntry<'a>> = ideas
        .iter()
        .filter_map(|i| {
            let date = i.publish_date.as_deref()?;
            (date >= today).then_some(UpcomingEntry {
                id: &i.id,
                date,
                title: &i.title,
                status: i.status.as_str(),
                kind: UpcomingKind::Idea,
            })
        })
        .chain(events.iter().filter_map(|e| {
            let date = e.date.as_deref()?;
            (date >= today).then_some(UpcomingEntry {
                id: &e.id,
                date,
                title: &e.title,
                status: e.status.as_str(),
                kind: UpcomingKind::Event,
            })
        }))
        .collect();

    entries.sort_by(|a, b| a.date.cmp(b.date));
    entries.truncate(UPCOMING_LIMIT);
    entries
}

/// One cell of the month grid.
#[derive(Debug)]
pub struct DayCell<'a> {
    pub date: NaiveDate,
    /// False for the previous/next-month overflow cells.
    pub in_month: bool,
    pub is_today: bool,
    pub ideas: Vec<&'a Idea>,
    pub events: Vec<&'a Event>,
}

/// A month grid: complete weeks, Sunday-first, with overflow cells from the
/// neighboring months.
#[derive(Debug)]
pub struct MonthView<'a> {
    pub year: i32,
    pub month: u32,
    pub cells: Vec<DayCell<'a>>,
}

impl MonthView<'_> {
    /// Heading like `May 2024`.
    pub fn title(&self) -> String {
        match NaiveDate::from_ymd_opt(self.year, self.month, 1) {
            Some(first) => first.format("%B %Y").to_string(),
            None => String::new(),
        }
    }
}

/// Build the grid for one month. `None` for an out-of-range year/month.
pub fn month_view<'a>(
    year: i32,
    month: u32,
    today: NaiveDate,
    ideas: &'a [Idea],
    events: &'a [Event],
) -> Option<MonthView<'a>> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let lead = first.weekday().num_days_from_sunday() as i64;
    let days_in_month = match NaiveDate::from_ymd_opt(
        if month == 12 { year + 1 } else { year },
        if month == 12 { 1 } else { month + 1 },
        1,
    ) {
        Some(next_first) => next_first.signed_duration_since(first).num_days(),
        None => return None,
    };

    let total = lead + days_in_month;
    let cell_count = if total % 7 == 0 { total } else { total + 7 - total % 7 };
    let start = first - Duration::days(lead);

    let mut cells = Vec::with_capacity(cell_count as usize);
    for offset in 0..cell_count {
        let date = start + Duration::days(offset);
        let in_month = date.month() == month && date.year() == year;
        let iso = date.format("%Y-%m-%d").to_string();

        let (day_ideas, day_events) = if in_month {
            (
                ideas
                    .iter()
                    .filter(|i| i.publish_date.as_deref() == Some(iso.as_str()))
                    .collect(),
                events
                    .iter()
                    .filter(|e| e.date.as_deref() == Some(iso.as_str()))
                    .collect(),
            )
        } else {
            (Vec::new(), Vec::new())
        };

        cells.push(DayCell {
            date,
            in_month,
            is_today: date == today,
            ideas: day_ideas,
            events: day_events,
        });
    }

    Some(MonthView { year, month, cells })
}

/// Short human date label for an ISO calendar date: `May 3`.
/// Falls back to the raw string when it does not parse.
pub fn date_label(iso: &str) -> String {
    match NaiveDate::parse_from_str(iso, "%Y-%m-%d") {
        Ok(date) => format!("{} {}", date.format("%b"), date.day()),
        Err(_) => iso.to_string(),
    }
}
