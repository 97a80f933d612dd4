//! Dashboard statistics derived from the two fetched collections.
//!
//! Everything in here is pure: collections in, snapshot out. The caller
//! supplies `now` so the six-month window is deterministic and testable.

use std::collections::HashMap;

use chrono::{DateTime, Datelike, Utc};
use shared::domain::{Rank, Station, SvcRecord, UserRecord};

const RECENT_LIMIT: usize = 5;
const STATION_LIMIT: usize = 8;
const MONTH_WINDOW: usize = 6;
const UNKNOWN_GROUP: &str = "Unknown";

const MONTH_ABBR: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupCount {
    pub name: String,
    pub count: usize,
}

/// One calendar-month slot in the registration time series.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthBucket {
    pub label: String,
    pub users: usize,
    pub svcs: usize,
}

/// Derived view state for the summary page; recomputed on demand, never
/// persisted. The zero-valued default stands in when either source fetch
/// fails.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardSnapshot {
    pub total_users: usize,
    pub total_svcs: usize,
    pub active_svcs: usize,
    pub inactive_svcs: usize,
    pub recent_users: Vec<UserRecord>,
    pub recent_svcs: Vec<SvcRecord>,
    pub users_by_station: Vec<GroupCount>,
    pub svcs_by_rank: Vec<GroupCount>,
    pub monthly_registrations: Vec<MonthBucket>,
}

/// Builds the dashboard snapshot from full collections of both entity types.
pub fn summarize(users: &[UserRecord], svcs: &[SvcRecord], now: DateTime<Utc>) -> DashboardSnapshot {
    let total_users = users.len();
    let total_svcs = svcs.len();
    let active_svcs = svcs.iter().filter(|svc| svc.is_active).count();
    let inactive_svcs = total_svcs - active_svcs;

    DashboardSnapshot {
        total_users,
        total_svcs,
        active_svcs,
        inactive_svcs,
        recent_users: most_recent(users, |user| user.created_at),
        recent_svcs: most_recent(svcs, |svc| svc.created_at),
        users_by_station: top_groups(
            users.iter().map(|user| station_label(user.police_station)),
            Some(STATION_LIMIT),
        ),
        svcs_by_rank: top_groups(svcs.iter().map(|svc| rank_label(svc.officer_rank)), None),
        monthly_registrations: monthly_registrations(users, svcs, now),
    }
}

fn station_label(station: Option<Station>) -> &'static str {
    station.map(Station::label).unwrap_or(UNKNOWN_GROUP)
}

fn rank_label(rank: Option<Rank>) -> &'static str {
    rank.map(Rank::label).unwrap_or(UNKNOWN_GROUP)
}

/// Stable descending sort by creation timestamp, truncated to the five
/// newest records. Missing timestamps sort last; equal timestamps keep the
/// collection's original relative order.
fn most_recent<T, F>(records: &[T], created_at: F) -> Vec<T>
where
    T: Clone,
    F: Fn(&T) -> Option<DateTime<Utc>>,
{
    let mut sorted = records.to_vec();
    sorted.sort_by(|a, b| created_at(b).cmp(&created_at(a)));
    sorted.truncate(RECENT_LIMIT);
    sorted
}

/// Counts per group key, sorted non-increasing by count. Tie order between
/// equal counts is unspecified. `limit` truncates after sorting.
fn top_groups<'a>(keys: impl Iterator<Item = &'a str>, limit: Option<usize>) -> Vec<GroupCount> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for key in keys {
        *counts.entry(key).or_default() += 1;
    }

    let mut groups: Vec<GroupCount> = counts
        .into_iter()
        .map(|(name, count)| GroupCount {
            name: name.to_string(),
            count,
        })
        .collect();
    groups.sort_by(|a, b| b.count.cmp(&a.count));
    if let Some(limit) = limit {
        groups.truncate(limit);
    }
    groups
}

/// The six calendar months ending at the month of `now`, oldest first, as
/// (year, month-of-year) pairs.
fn month_window(now: DateTime<Utc>) -> Vec<(i32, u32)> {
    let mut year = now.year();
    let mut month = now.month();
    let mut window = vec![(year, month)];
    for _ in 1..MONTH_WINDOW {
        if month == 1 {
            month = 12;
            year -= 1;
        } else {
            month -= 1;
        }
        window.push((year, month));
    }
    window.reverse();
    window
}

fn month_label(year: i32, month: u32) -> String {
    let abbr = MONTH_ABBR
        .get(month as usize - 1)
        .copied()
        .unwrap_or_default();
    format!("{abbr} {year}")
}

fn falls_in(created_at: Option<DateTime<Utc>>, year: i32, month: u32) -> bool {
    created_at.is_some_and(|at| at.year() == year && at.month() == month)
}

/// Independent per-bucket counts of users and SVCs created in each window
/// month. Records older than the window or without a timestamp count
/// nowhere, so the bucket totals never exceed the collection totals.
fn monthly_registrations(
    users: &[UserRecord],
    svcs: &[SvcRecord],
    now: DateTime<Utc>,
) -> Vec<MonthBucket> {
    month_window(now)
        .into_iter()
        .map(|(year, month)| MonthBucket {
            label: month_label(year, month),
            users: users
                .iter()
                .filter(|user| falls_in(user.created_at, year, month))
                .count(),
            svcs: svcs
                .iter()
                .filter(|svc| falls_in(svc.created_at, year, month))
                .count(),
        })
        .collect()
}

#[cfg(test)]
#[path = "tests/aggregate_tests.rs"]
mod tests;
