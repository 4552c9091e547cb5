//! Daily and weekly streak transitions.

use chrono::{DateTime, NaiveDate, Utc};

use myark_entity::gamification::{Streak, UserGamification};

/// Days within which a weekly streak continues.
const WEEKLY_WINDOW_DAYS: i64 = 7;

/// Apply today's activity to both streaks.
///
/// When `performed_activity` is false only `last_streak_update` moves.
pub fn update_streaks(
    record: &mut UserGamification,
    performed_activity: bool,
    today: NaiveDate,
    now: DateTime<Utc>,
) {
    record.last_streak_update = Some(now);
    if !performed_activity {
        return;
    }

    if advance_daily(&mut record.streaks.daily, today) {
        record.achievement_stats.streak_broken_and_restarted = true;
    }
    advance_weekly(&mut record.streaks.weekly, today);
}

/// Returns true when a running streak was broken and restarted.
fn advance_daily(streak: &mut Streak, today: NaiveDate) -> bool {
    let mut restarted = false;
    match streak.last_activity_date.map(|last| (today - last).num_days()) {
        // Same day, or a stored date ahead of our clock.
        Some(gap) if gap <= 0 => {
            streak.current = streak.current.max(1);
        }
        Some(1) => {
            streak.current = streak.current.saturating_add(1);
        }
        previous => {
            restarted = previous.is_some() && streak.current >= 1;
            streak.current = 1;
            streak.start_date = Some(today);
        }
    }
    finish(streak, today);
    restarted
}

fn advance_weekly(streak: &mut Streak, today: NaiveDate) {
    match streak.last_activity_date.map(|last| (today - last).num_days()) {
        Some(gap) if gap <= 0 => {
            streak.current = streak.current.max(1);
        }
        Some(gap) if gap <= WEEKLY_WINDOW_DAYS => {
            streak.current = streak.current.saturating_add(1);
        }
        _ => {
            streak.current = 1;
            streak.start_date = Some(today);
        }
    }
    finish(streak, today);
}

fn finish(streak: &mut Streak, today: NaiveDate) {
    if streak.start_date.is_none() {
        streak.start_date = Some(today);
    }
    streak.last_activity_date = Some(today);
    streak.active = true;
    streak.best = streak.best.max(streak.current);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record() -> UserGamification {
        UserGamification::new("u1", None, Utc::now())
    }

    #[test]
    fn test_consecutive_day_increments() {
        let mut r = record();
        update_streaks(&mut r, true, day(2024, 1, 1), Utc::now());
        assert_eq!(r.streaks.daily.current, 1);
        update_streaks(&mut r, true, day(2024, 1, 2), Utc::now());
        assert_eq!(r.streaks.daily.current, 2);
        assert_eq!(r.streaks.daily.best, 2);
        assert!(!r.achievement_stats.streak_broken_and_restarted);
    }

    #[test]
    fn test_gap_resets_and_flags_restart() {
        let mut r = record();
        update_streaks(&mut r, true, day(2024, 1, 1), Utc::now());
        update_streaks(&mut r, true, day(2024, 1, 3), Utc::now());
        assert_eq!(r.streaks.daily.current, 1);
        assert_eq!(r.streaks.daily.start_date, Some(day(2024, 1, 3)));
        assert!(r.achievement_stats.streak_broken_and_restarted);
        // weekly run survives a two-day gap
        assert_eq!(r.streaks.weekly.current, 2);
    }

    #[test]
    fn test_same_day_is_idempotent() {
        let mut r = record();
        update_streaks(&mut r, true, day(2024, 1, 1), Utc::now());
        update_streaks(&mut r, true, day(2024, 1, 1), Utc::now());
        assert_eq!(r.streaks.daily.current, 1);
        assert_eq!(r.streaks.weekly.current, 1);
    }

    #[test]
    fn test_weekly_resets_after_window() {
        let mut r = record();
        update_streaks(&mut r, true, day(2024, 1, 1), Utc::now());
        update_streaks(&mut r, true, day(2024, 1, 8), Utc::now());
        assert_eq!(r.streaks.weekly.current, 2);
        update_streaks(&mut r, true, day(2024, 1, 16), Utc::now());
        assert_eq!(r.streaks.weekly.current, 1);
        assert_eq!(r.streaks.weekly.best, 2);
    }

    #[test]
    fn test_no_activity_only_touches_timestamp() {
        let mut r = record();
        let before = r.streaks.clone();
        update_streaks(&mut r, false, day(2024, 1, 1), Utc::now());
        assert_eq!(r.streaks, before);
        assert!(r.last_streak_update.is_some());
    }

    #[test]
    fn test_best_never_below_current() {
        let mut r = record();
        let start = day(2024, 1, 1);
        for offset in [0, 1, 2, 5, 6, 7, 20, 21, 22, 23] {
            update_streaks(&mut r, true, start + chrono::Duration::days(offset), Utc::now());
            assert!(r.streaks.daily.best >= r.streaks.daily.current);
            assert!(r.streaks.weekly.best >= r.streaks.weekly.current);
        }
        assert_eq!(r.streaks.daily.best, 4);
    }
}
