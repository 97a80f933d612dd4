use super::*;
use chrono::TimeZone;
use shared::domain::{SvcId, UserId};

fn ts(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 9, 30, 0).single().expect("valid timestamp")
}

fn user(id: &str, station: Option<Station>, created_at: Option<DateTime<Utc>>) -> UserRecord {
    UserRecord {
        id: UserId::new(id),
        full_name: None,
        officer_svc: None,
        officer_rank: None,
        police_station: station,
        email: None,
        phone: None,
        created_at,
    }
}

fn svc(
    id: &str,
    active: bool,
    rank: Option<Rank>,
    created_at: Option<DateTime<Utc>>,
) -> SvcRecord {
    SvcRecord {
        id: SvcId::new(id),
        officer_svc: format!("SVC{id:0>3}"),
        officer_rank: rank,
        police_station: None,
        is_active: active,
        created_at,
    }
}

// Mid-March 2024; the six-month window is Oct 2023 through Mar 2024.
fn now() -> DateTime<Utc> {
    ts(2024, 3, 15)
}

#[test]
fn counts_split_active_and_inactive_svcs() {
    let svcs = vec![
        svc("a", true, None, None),
        svc("b", false, None, None),
        svc("c", true, None, None),
    ];
    let snapshot = summarize(&[], &svcs, now());
    assert_eq!(snapshot.total_svcs, 3);
    assert_eq!(snapshot.active_svcs, 2);
    assert_eq!(snapshot.inactive_svcs, 1);
    assert_eq!(
        snapshot.active_svcs + snapshot.inactive_svcs,
        snapshot.total_svcs
    );
}

#[test]
fn two_svcs_one_active_totals_read_2_1_1() {
    let svcs = vec![
        svc("a", true, None, None),
        svc("b", false, None, None),
    ];
    let snapshot = summarize(&[], &svcs, now());
    assert_eq!(
        (
            snapshot.total_svcs,
            snapshot.active_svcs,
            snapshot.inactive_svcs
        ),
        (2, 1, 1)
    );
}

#[test]
fn recent_lists_take_the_five_newest_descending() {
    let users: Vec<UserRecord> = (1..=7)
        .map(|day| user(&day.to_string(), None, Some(ts(2024, 2, day))))
        .collect();
    let snapshot = summarize(&users, &[], now());

    let ids: Vec<&str> = snapshot
        .recent_users
        .iter()
        .map(|u| u.id.as_str())
        .collect();
    assert_eq!(ids, ["7", "6", "5", "4", "3"]);
}

#[test]
fn recency_ties_keep_the_collection_order() {
    let shared_ts = Some(ts(2024, 1, 10));
    let users = vec![
        user("first", None, shared_ts),
        user("second", None, shared_ts),
        user("third", None, shared_ts),
    ];
    let snapshot = summarize(&users, &[], now());
    let ids: Vec<&str> = snapshot
        .recent_users
        .iter()
        .map(|u| u.id.as_str())
        .collect();
    assert_eq!(ids, ["first", "second", "third"]);
}

#[test]
fn records_without_timestamps_sort_behind_dated_ones() {
    let users = vec![
        user("undated", None, None),
        user("dated", None, Some(ts(2023, 12, 1))),
    ];
    let snapshot = summarize(&users, &[], now());
    assert_eq!(snapshot.recent_users[0].id.as_str(), "dated");
    assert_eq!(snapshot.recent_users[1].id.as_str(), "undated");
}

#[test]
fn station_grouping_caps_at_eight_and_substitutes_unknown() {
    let mut users: Vec<UserRecord> = Vec::new();
    for (index, station) in Station::ALL.iter().enumerate() {
        for copy in 0..=index {
            users.push(user(&format!("{station}-{copy}"), Some(*station), None));
        }
    }
    users.push(user("missing-station", None, None));

    let snapshot = summarize(&users, &[], now());
    assert_eq!(snapshot.users_by_station.len(), 8);
    for pair in snapshot.users_by_station.windows(2) {
        assert!(pair[0].count >= pair[1].count, "groups not sorted by count");
    }
    // Nine distinct groups compete for eight slots; the single-member ones
    // tie at the bottom, so "Unknown" may or may not survive the cut. With
    // a strictly larger Unknown cohort it must appear.
    let mut users = users;
    users.push(user("missing-station-2", None, None));
    users.push(user("missing-station-3", None, None));
    let snapshot = summarize(&users, &[], now());
    assert!(snapshot
        .users_by_station
        .iter()
        .any(|group| group.name == "Unknown"));
}

#[test]
fn rank_grouping_reports_every_rank_present_without_truncation() {
    let mut svcs: Vec<SvcRecord> = Rank::ALL
        .iter()
        .map(|rank| svc(rank.label(), true, Some(*rank), None))
        .collect();
    svcs.push(svc("unranked", true, None, None));

    let snapshot = summarize(&[], &svcs, now());
    assert_eq!(snapshot.svcs_by_rank.len(), 10);
    assert!(snapshot
        .svcs_by_rank
        .iter()
        .any(|group| group.name == "Unknown"));
    for pair in snapshot.svcs_by_rank.windows(2) {
        assert!(pair[0].count >= pair[1].count);
    }
}

#[test]
fn month_series_has_six_buckets_ending_at_the_current_month() {
    let snapshot = summarize(&[], &[], now());
    let labels: Vec<&str> = snapshot
        .monthly_registrations
        .iter()
        .map(|bucket| bucket.label.as_str())
        .collect();
    assert_eq!(
        labels,
        [
            "Oct 2023", "Nov 2023", "Dec 2023", "Jan 2024", "Feb 2024", "Mar 2024"
        ]
    );
}

#[test]
fn month_series_window_handles_year_boundaries() {
    let snapshot = summarize(&[], &[], ts(2024, 1, 5));
    let labels: Vec<&str> = snapshot
        .monthly_registrations
        .iter()
        .map(|bucket| bucket.label.as_str())
        .collect();
    assert_eq!(
        labels,
        [
            "Aug 2023", "Sep 2023", "Oct 2023", "Nov 2023", "Dec 2023", "Jan 2024"
        ]
    );
}

#[test]
fn records_older_than_the_window_count_nowhere() {
    let users = vec![
        user("1", None, Some(ts(2024, 1, 2))),
        user("2", None, Some(ts(2023, 8, 2))),
    ];
    let snapshot = summarize(&users, &[], now());

    let january = snapshot
        .monthly_registrations
        .iter()
        .find(|bucket| bucket.label == "Jan 2024")
        .expect("january bucket");
    assert_eq!(january.users, 1);

    let bucketed: usize = snapshot
        .monthly_registrations
        .iter()
        .map(|bucket| bucket.users)
        .sum();
    assert_eq!(bucketed, 1);
    assert!(bucketed <= snapshot.total_users);
}

#[test]
fn buckets_count_users_and_svcs_independently() {
    let users = vec![
        user("u1", None, Some(ts(2024, 2, 1))),
        user("u2", None, Some(ts(2024, 2, 20))),
    ];
    let svcs = vec![
        svc("s1", true, None, Some(ts(2024, 2, 10))),
        svc("s2", true, None, Some(ts(2024, 3, 1))),
        svc("s3", true, None, None),
    ];
    let snapshot = summarize(&users, &svcs, now());

    let february = snapshot
        .monthly_registrations
        .iter()
        .find(|bucket| bucket.label == "Feb 2024")
        .expect("february bucket");
    assert_eq!((february.users, february.svcs), (2, 1));

    let march = snapshot
        .monthly_registrations
        .iter()
        .find(|bucket| bucket.label == "Mar 2024")
        .expect("march bucket");
    assert_eq!((march.users, march.svcs), (0, 1));
}

#[test]
fn default_snapshot_is_zero_valued() {
    let snapshot = DashboardSnapshot::default();
    assert_eq!(snapshot.total_users, 0);
    assert_eq!(snapshot.total_svcs, 0);
    assert!(snapshot.recent_users.is_empty());
    assert!(snapshot.monthly_registrations.is_empty());
}
