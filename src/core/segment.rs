//! Session segmentation
//!
//! Splits a session into contiguous slices that each lie wholly inside one
//! calendar period, prorating download and upload by the share of the
//! session's duration that falls in each slice.

use chrono::NaiveDateTime;

use crate::core::period::{Period, WeekStart};
use crate::core::types::{Session, UsageTotals};

/// A period-bounded slice of one session
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Segment<'a> {
    pub(crate) session: &'a Session,
    pub(crate) start: NaiveDateTime,
    /// Exclusive; may be midnight of the following period
    pub(crate) end: NaiveDateTime,
    pub(crate) duration_seconds: i64,
    pub(crate) download_mb: f64,
    pub(crate) upload_mb: f64,
}

impl Segment<'_> {
    pub(crate) fn to_totals(&self) -> UsageTotals {
        UsageTotals {
            duration_seconds: self.duration_seconds,
            download_mb: self.download_mb,
            upload_mb: self.upload_mb,
            count: 1,
        }
    }
}

/// Split `session` at every `period` boundary it crosses.
///
/// Zero (or negative) duration sessions produce no segments.
pub(crate) fn split_session(
    session: &Session,
    period: Period,
    week_start: WeekStart,
) -> Vec<Segment<'_>> {
    let total = session.effective_duration();
    if total <= 0 {
        return Vec::new();
    }

    let end = session.end_time();
    let mut segments = Vec::new();
    let mut current = session.login_time;

    while current < end {
        let boundary = period.next_boundary(current, week_start);
        assert!(
            boundary > current,
            "period boundary {boundary} does not advance past {current}"
        );

        let segment_end = end.min(boundary);
        let seconds = (segment_end - current).num_seconds();
        if seconds <= 0 {
            current = boundary;
            continue;
        }

        let share = seconds as f64 / total as f64;
        segments.push(Segment {
            session,
            start: current,
            end: segment_end,
            duration_seconds: seconds,
            download_mb: session.download_mb * share,
            upload_mb: session.upload_mb * share,
        });
        current = segment_end;
    }

    segments
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::parse_login_time;
    use chrono::{Datelike, Duration, NaiveDate};
    use proptest::prelude::*;

    fn session(login: &str, duration_seconds: i64, down: f64, up: f64) -> Session {
        Session {
            login_time: parse_login_time(login).unwrap(),
            duration_seconds,
            download_mb: down,
            upload_mb: up,
        }
    }

    fn split_into_days(s: &Session) -> Vec<Segment<'_>> {
        split_session(s, Period::Day, WeekStart::Monday)
    }

    fn dt(y: i32, m: u32, day: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, day)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    #[test]
    fn cross_midnight_splits_in_half() {
        let s = session("31-07-2024 23:00:00", 7200, 100.0, 50.0);
        let segs = split_into_days(&s);
        assert_eq!(segs.len(), 2);

        assert_eq!(segs[0].start, dt(2024, 7, 31, 23));
        assert_eq!(segs[0].end, dt(2024, 8, 1, 0));
        assert_eq!(segs[0].duration_seconds, 3600);
        assert!((segs[0].download_mb - 50.0).abs() < 1e-9);
        assert!((segs[0].upload_mb - 25.0).abs() < 1e-9);

        assert_eq!(segs[1].start, dt(2024, 8, 1, 0));
        assert_eq!(segs[1].end, dt(2024, 8, 1, 1));
        assert_eq!(segs[1].duration_seconds, 3600);
        assert!((segs[1].download_mb - 50.0).abs() < 1e-9);
        assert!((segs[1].upload_mb - 25.0).abs() < 1e-9);
    }

    #[test]
    fn single_day_session_is_one_exact_segment() {
        let s = session("01-08-2024 10:00:00", 5400, 150.5, 75.2);
        let segs = split_into_days(&s);
        assert_eq!(segs.len(), 1);
        assert_eq!(segs[0].duration_seconds, 5400);
        assert_eq!(segs[0].download_mb, 150.5);
        assert_eq!(segs[0].upload_mb, 75.2);
        assert!(std::ptr::eq(segs[0].session, &s));
    }

    #[test]
    fn zero_duration_produces_nothing() {
        let s = session("01-08-2024 10:00:00", 0, 10.0, 10.0);
        assert!(split_into_days(&s).is_empty());
        assert!(split_session(&s, Period::Month, WeekStart::Monday).is_empty());
    }

    #[test]
    fn negative_duration_is_treated_as_zero() {
        let s = session("01-08-2024 10:00:00", -60, 10.0, 10.0);
        assert!(split_into_days(&s).is_empty());
    }

    #[test]
    fn session_ending_exactly_at_midnight_stays_in_one_day() {
        let s = session("31-07-2024 22:00:00", 7200, 20.0, 2.0);
        let segs = split_into_days(&s);
        assert_eq!(segs.len(), 1);
        assert_eq!(segs[0].end, dt(2024, 8, 1, 0));
    }

    #[test]
    fn session_starting_at_midnight_does_not_reach_back() {
        let s = session("01-08-2024 00:00:00", 60, 1.0, 1.0);
        let segs = split_into_days(&s);
        assert_eq!(segs.len(), 1);
        assert_eq!(segs[0].start.date(), NaiveDate::from_ymd_opt(2024, 8, 1).unwrap());
    }

    #[test]
    fn multi_day_session_has_full_middle_days() {
        // 22:00 on day one through 02:00 on day four
        let s = session("01-08-2024 22:00:00", 4 * 3600 + 2 * 86_400, 52.0, 0.0);
        let segs = split_into_days(&s);
        let durations: Vec<i64> = segs.iter().map(|s| s.duration_seconds).collect();
        assert_eq!(durations, vec![7200, 86_400, 86_400, 7200]);
        assert!((segs[1].download_mb - 52.0 * 86_400.0 / 187_200.0).abs() < 1e-9);
    }

    #[test]
    fn week_split_at_monday() {
        // Sunday 2024-08-04 23:30 for one hour
        let s = session("04-08-2024 23:30:00", 3600, 60.0, 6.0);
        let segs = split_session(&s, Period::Week, WeekStart::Monday);
        assert_eq!(segs.len(), 2);
        assert_eq!(segs[0].end, dt(2024, 8, 5, 0));
        assert_eq!(segs[0].duration_seconds, 1800);
        assert!((segs[1].download_mb - 30.0).abs() < 1e-9);

        // The same instant is mid-week when weeks start on Sunday
        let segs = split_session(&s, Period::Week, WeekStart::Sunday);
        assert_eq!(segs.len(), 1);
    }

    #[test]
    fn month_split_at_first_of_month() {
        let s = session("31-01-2024 23:00:00", 3 * 3600, 30.0, 3.0);
        let segs = split_session(&s, Period::Month, WeekStart::Monday);
        assert_eq!(segs.len(), 2);
        assert_eq!(segs[0].duration_seconds, 3600);
        assert_eq!(segs[1].duration_seconds, 7200);
        assert_eq!(segs[1].start, dt(2024, 2, 1, 0));
        assert!((segs[0].download_mb - 10.0).abs() < 1e-9);
        assert!((segs[1].upload_mb - 2.0).abs() < 1e-9);
    }

    #[test]
    fn month_split_over_leap_day() {
        let s = session("29-02-2024 12:00:00", 24 * 3600, 48.0, 0.0);
        let segs = split_session(&s, Period::Month, WeekStart::Monday);
        assert_eq!(segs.len(), 2);
        assert_eq!(segs[0].end, dt(2024, 3, 1, 0));
        assert_eq!(segs[0].duration_seconds, 12 * 3600);
    }

    fn arb_session() -> impl Strategy<Value = Session> {
        (
            0i64..(366 * 5),
            0i64..86_400,
            0i64..(40 * 86_400),
            0.0f64..10_000.0,
            0.0f64..10_000.0,
        )
            .prop_map(|(day, second, duration, down, up)| {
                let base = NaiveDate::from_ymd_opt(2020, 1, 1)
                    .unwrap()
                    .and_hms_opt(0, 0, 0)
                    .unwrap();
                Session {
                    login_time: base + Duration::days(day) + Duration::seconds(second),
                    duration_seconds: duration,
                    download_mb: down,
                    upload_mb: up,
                }
            })
    }

    fn arb_period() -> impl Strategy<Value = (Period, WeekStart)> {
        prop::sample::select(vec![
            (Period::Day, WeekStart::Monday),
            (Period::Week, WeekStart::Monday),
            (Period::Week, WeekStart::Sunday),
            (Period::Month, WeekStart::Monday),
        ])
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-6 * b.abs().max(1.0)
    }

    proptest! {
        #[test]
        fn segments_conserve_session_totals(s in arb_session(), (period, ws) in arb_period()) {
            let segs = split_session(&s, period, ws);
            if s.duration_seconds == 0 {
                prop_assert!(segs.is_empty());
            } else {
                let duration: i64 = segs.iter().map(|x| x.duration_seconds).sum();
                let down: f64 = segs.iter().map(|x| x.download_mb).sum();
                let up: f64 = segs.iter().map(|x| x.upload_mb).sum();
                prop_assert_eq!(duration, s.duration_seconds);
                prop_assert!(close(down, s.download_mb), "{} vs {}", down, s.download_mb);
                prop_assert!(close(up, s.upload_mb), "{} vs {}", up, s.upload_mb);
            }
        }

        #[test]
        fn segments_are_contiguous_and_positive(s in arb_session(), (period, ws) in arb_period()) {
            let segs = split_session(&s, period, ws);
            let mut expected_start = s.login_time;
            for seg in &segs {
                prop_assert_eq!(seg.start, expected_start);
                prop_assert!(seg.end > seg.start);
                prop_assert_eq!((seg.end - seg.start).num_seconds(), seg.duration_seconds);
                expected_start = seg.end;
            }
            if !segs.is_empty() {
                prop_assert_eq!(expected_start, s.end_time());
            }
        }

        #[test]
        fn segments_never_cross_a_period_boundary(s in arb_session(), (period, ws) in arb_period()) {
            for seg in split_session(&s, period, ws) {
                let last_second = seg.end - Duration::seconds(1);
                prop_assert_eq!(
                    period.key_for(seg.start.date(), ws),
                    period.key_for(last_second.date(), ws)
                );
                if period == Period::Day {
                    prop_assert_eq!(seg.start.date().ordinal(), last_second.date().ordinal());
                }
            }
        }
    }
}
