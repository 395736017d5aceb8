//! Splitting a show list into past and upcoming relative to an instant.

use chrono::NaiveDateTime;

/// Current wall-clock time, in the same naive local form as stored start times.
pub fn now() -> NaiveDateTime {
    chrono::Local::now().naive_local()
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShowSchedule<T> {
    pub past: Vec<T>,
    pub upcoming: Vec<T>,
}

impl<T> ShowSchedule<T> {
    /// Items starting strictly before `now` are past, strictly after are
    /// upcoming. An item starting exactly at `now` lands in neither list.
    /// Input order is kept within each list.
    pub fn partition<I, F>(items: I, start_of: F, now: NaiveDateTime) -> Self
    where
        I: IntoIterator<Item = T>,
        F: Fn(&T) -> NaiveDateTime,
    {
        let mut past = Vec::new();
        let mut upcoming = Vec::new();
        for item in items {
            let start = start_of(&item);
            if start < now {
                past.push(item);
            } else if start > now {
                upcoming.push(item);
            }
        }
        Self { past, upcoming }
    }

    pub fn past_count(&self) -> usize {
        self.past.len()
    }

    pub fn upcoming_count(&self) -> usize {
        self.upcoming.len()
    }

    pub fn map<U, F>(self, mut f: F) -> ShowSchedule<U>
    where
        F: FnMut(T) -> U,
    {
        ShowSchedule {
            past: self.past.into_iter().map(&mut f).collect(),
            upcoming: self.upcoming.into_iter().map(&mut f).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_partition_splits_on_now() {
        let now = at(2025, 1, 1, 0);
        let starts = vec![at(2019, 5, 21, 21), at(2035, 4, 1, 20), at(2024, 12, 31, 23)];
        let schedule = ShowSchedule::partition(starts, |s| *s, now);
        assert_eq!(schedule.past, vec![at(2019, 5, 21, 21), at(2024, 12, 31, 23)]);
        assert_eq!(schedule.upcoming, vec![at(2035, 4, 1, 20)]);
    }

    #[test]
    fn test_show_starting_exactly_now_is_in_neither_list() {
        let now = at(2025, 1, 1, 0);
        let starts = vec![now - Duration::seconds(1), now, now + Duration::seconds(1)];
        let schedule = ShowSchedule::partition(starts, |s| *s, now);
        assert_eq!(schedule.past, vec![now - Duration::seconds(1)]);
        assert_eq!(schedule.upcoming, vec![now + Duration::seconds(1)]);
    }

    #[test]
    fn test_counts_follow_their_own_list() {
        let now = at(2025, 1, 1, 0);
        let starts = vec![at(2019, 1, 1, 0), at(2030, 1, 1, 0), at(2031, 1, 1, 0)];
        let schedule = ShowSchedule::partition(starts, |s| *s, now);
        assert_eq!(schedule.past_count(), 1);
        assert_eq!(schedule.upcoming_count(), 2);
    }

    #[test]
    fn test_order_is_preserved_not_sorted() {
        let now = at(2025, 1, 1, 0);
        let starts = vec![at(2020, 6, 1, 0), at(2018, 1, 1, 0), at(2022, 3, 1, 0)];
        let schedule = ShowSchedule::partition(starts.clone(), |s| *s, now);
        assert_eq!(schedule.past, starts);
    }

    #[test]
    fn test_empty_input() {
        let schedule: ShowSchedule<NaiveDateTime> =
            ShowSchedule::partition(Vec::new(), |s| *s, at(2025, 1, 1, 0));
        assert!(schedule.past.is_empty());
        assert!(schedule.upcoming.is_empty());
    }

    #[test]
    fn test_map_keeps_partition() {
        let now = at(2025, 1, 1, 0);
        let schedule = ShowSchedule::partition(
            vec![(1, at(2019, 1, 1, 0)), (2, at(2030, 1, 1, 0))],
            |(_, s)| *s,
            now,
        )
        .map(|(id, _)| id);
        assert_eq!(schedule.past, vec![1]);
        assert_eq!(schedule.upcoming, vec![2]);
    }
}
