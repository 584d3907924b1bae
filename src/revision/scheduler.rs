//! Scheduling rules for spaced revision.
//!
//! Every item gets the same ladder of revision days measured from the day
//! it was first studied. Classification reads the first unfinished day;
//! the due and upcoming filters scan every unfinished day.

use std::cmp::Ordering;

use chrono::{Duration, NaiveDate};

use super::models::{RevisionItem, RevisionStatus, StatusGroup};

/// Revision day offsets from the initial study date.
pub const REVISION_OFFSETS: [i64; 7] = [1, 3, 7, 14, 30, 60, 90];

/// How far ahead the upcoming view looks, in days.
pub const UPCOMING_WINDOW_DAYS: i64 = 7;

/// Expand an initial study date into the full ladder of revision days.
pub fn schedule_dates(initial_date: NaiveDate) -> Vec<NaiveDate> {
    REVISION_OFFSETS
        .iter()
        .map(|&days| initial_date + Duration::days(days))
        .collect()
}

/// Classify an item against `today` by its first unfinished revision day.
pub fn classify_status(item: &RevisionItem, today: NaiveDate) -> RevisionStatus {
    match item.next_pending() {
        None => RevisionStatus::Completed,
        Some(next) => match next.cmp(&today) {
            Ordering::Less => RevisionStatus::Overdue,
            Ordering::Equal => RevisionStatus::Today,
            Ordering::Greater => RevisionStatus::Upcoming,
        },
    }
}

/// Whether `item` belongs to `group` when viewed on `today`.
///
/// Due and upcoming membership scan every unfinished day, not just the
/// next one; an overdue backlog does not hide a day inside the upcoming
/// window. Inactive items never count as due or upcoming but keep their
/// place in the completed and all views.
pub fn in_group(item: &RevisionItem, group: StatusGroup, today: NaiveDate) -> bool {
    match group {
        StatusGroup::All => true,
        // An item with no day ever marked is unstarted, not finished
        StatusGroup::Completed => item.is_fully_completed() && item.completed_count() > 0,
        StatusGroup::Due => {
            item.active
                && item
                    .revision_dates
                    .iter()
                    .any(|d| *d <= today && !item.completed_revisions.contains(d))
        }
        StatusGroup::Upcoming => {
            let horizon = today + Duration::days(UPCOMING_WINDOW_DAYS);
            item.active
                && item
                    .revision_dates
                    .iter()
                    .any(|d| today <= *d && *d <= horizon && !item.completed_revisions.contains(d))
        }
    }
}

/// Filter `items` down to `group`, preserving input order.
pub fn filter_group(
    items: &[RevisionItem],
    group: StatusGroup,
    today: NaiveDate,
) -> Vec<RevisionItem> {
    items
        .iter()
        .filter(|item| in_group(item, group, today))
        .cloned()
        .collect()
}

/// Order items for the planner list: unfinished items ascending by their
/// next revision day, fully revised items last with the most recently
/// started first.
pub fn sort_items(items: &mut [RevisionItem]) {
    items.sort_by(|a, b| match (a.next_pending(), b.next_pending()) {
        (Some(a_next), Some(b_next)) => a_next.cmp(&b_next),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => b.initial_date.cmp(&a.initial_date),
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn item(initial: NaiveDate) -> RevisionItem {
        RevisionItem::new(
            "Physics".to_string(),
            "Optics".to_string(),
            "Ray diagrams".to_string(),
            initial,
            Utc::now(),
        )
    }

    fn finished(initial: NaiveDate) -> RevisionItem {
        let mut it = item(initial);
        it.completed_revisions = it.revision_dates.iter().copied().collect();
        it
    }

    #[test]
    fn test_schedule_follows_fixed_ladder() {
        let dates = schedule_dates(date(2024, 1, 1));
        assert_eq!(
            dates,
            vec![
                date(2024, 1, 2),
                date(2024, 1, 4),
                date(2024, 1, 8),
                date(2024, 1, 15),
                date(2024, 1, 31),
                date(2024, 3, 1),
                date(2024, 3, 31),
            ]
        );
    }

    #[test]
    fn test_schedule_is_strictly_ascending() {
        let dates = schedule_dates(date(2023, 12, 28));
        assert!(dates.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_classify_tracks_first_unfinished_day() {
        let mut it = item(date(2024, 1, 1));

        // Nothing done yet, first day is Jan 2
        assert_eq!(
            classify_status(&it, date(2024, 1, 1)),
            RevisionStatus::Upcoming
        );
        assert_eq!(classify_status(&it, date(2024, 1, 2)), RevisionStatus::Today);
        assert_eq!(
            classify_status(&it, date(2024, 1, 3)),
            RevisionStatus::Overdue
        );

        // Finishing the first day moves the verdict to Jan 4
        it.completed_revisions.insert(date(2024, 1, 2));
        assert_eq!(
            classify_status(&it, date(2024, 1, 3)),
            RevisionStatus::Upcoming
        );
        assert_eq!(classify_status(&it, date(2024, 1, 4)), RevisionStatus::Today);
    }

    #[test]
    fn test_classify_completed_when_every_day_done() {
        let it = finished(date(2024, 1, 1));
        assert_eq!(
            classify_status(&it, date(2024, 1, 10)),
            RevisionStatus::Completed
        );
    }

    #[test]
    fn test_due_counts_any_missed_day() {
        let mut it = item(date(2024, 1, 1));
        // Jan 2 missed, Jan 4 done: the backlog keeps the item due
        it.completed_revisions.insert(date(2024, 1, 4));

        assert!(in_group(&it, StatusGroup::Due, date(2024, 1, 5)));
        assert_eq!(
            classify_status(&it, date(2024, 1, 5)),
            RevisionStatus::Overdue
        );
    }

    #[test]
    fn test_inactive_items_hide_from_due_and_upcoming() {
        let mut it = item(date(2024, 1, 1));
        it.active = false;

        assert!(!in_group(&it, StatusGroup::Due, date(2024, 1, 3)));
        assert!(!in_group(&it, StatusGroup::Upcoming, date(2024, 1, 1)));
        assert!(in_group(&it, StatusGroup::All, date(2024, 1, 3)));

        let mut done = finished(date(2024, 1, 1));
        done.active = false;
        assert!(in_group(&done, StatusGroup::Completed, date(2024, 4, 1)));
    }

    #[test]
    fn test_upcoming_window_is_inclusive() {
        let it = item(date(2024, 1, 1)); // next day is Jan 2

        assert!(in_group(&it, StatusGroup::Upcoming, date(2024, 1, 2)));
        assert!(in_group(&it, StatusGroup::Upcoming, date(2023, 12, 26)));
        assert!(!in_group(&it, StatusGroup::Upcoming, date(2023, 12, 25)));
    }

    #[test]
    fn test_day_due_today_shows_in_both_views() {
        let it = item(date(2024, 1, 1));
        let today = date(2024, 1, 2);

        assert!(in_group(&it, StatusGroup::Due, today));
        assert!(in_group(&it, StatusGroup::Upcoming, today));
    }

    #[test]
    fn test_backlog_does_not_hide_an_upcoming_day() {
        // Jan 2 and Jan 4 missed, but Jan 8 sits inside the week ahead
        let it = item(date(2024, 1, 1));
        let today = date(2024, 1, 5);

        assert!(in_group(&it, StatusGroup::Due, today));
        assert!(in_group(&it, StatusGroup::Upcoming, today));

        // With Jan 8 done the window holds nothing, backlog or not
        let mut done_ahead = item(date(2024, 1, 1));
        done_ahead.completed_revisions.insert(date(2024, 1, 8));
        assert!(in_group(&done_ahead, StatusGroup::Due, today));
        assert!(!in_group(&done_ahead, StatusGroup::Upcoming, today));
    }

    #[test]
    fn test_completed_group_ignores_backlog_items() {
        let it = item(date(2024, 1, 1));
        assert!(!in_group(&it, StatusGroup::Completed, date(2024, 6, 1)));
    }

    #[test]
    fn test_completed_needs_at_least_one_day_marked() {
        let done = finished(date(2024, 1, 1));
        assert!(in_group(&done, StatusGroup::Completed, date(2024, 4, 1)));

        // No days scheduled and none marked: nothing was ever revised,
        // even though no day is pending either
        let mut empty = item(date(2024, 1, 1));
        empty.revision_dates.clear();
        assert!(empty.is_fully_completed());
        assert!(!in_group(&empty, StatusGroup::Completed, date(2024, 4, 1)));
    }

    #[test]
    fn test_sort_orders_by_next_day_then_parks_finished_last() {
        let mut a = item(date(2024, 1, 1));
        a.completed_revisions.insert(date(2024, 1, 2)); // next day Jan 4
        let b = item(date(2024, 1, 5)); // next day Jan 6
        let c = finished(date(2024, 1, 3));
        let d = finished(date(2024, 1, 10));

        let mut items = vec![c.clone(), b.clone(), d.clone(), a.clone()];
        sort_items(&mut items);

        let ids: Vec<_> = items.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![a.id, b.id, d.id, c.id]);
    }

    #[test]
    fn test_filter_preserves_input_order() {
        let a = item(date(2024, 1, 5));
        let b = item(date(2024, 1, 1));
        let items = vec![a.clone(), b.clone()];

        let due = filter_group(&items, StatusGroup::Due, date(2024, 1, 8));
        let ids: Vec<_> = due.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![a.id, b.id]);
    }
}
