//! Quiz leaderboard visibility gate.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use myark_entity::quiz::{LeaderboardVisibility, VisibilityType};

/// Whether a viewer may see a quiz leaderboard right now.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum LeaderboardAccess {
    Visible,
    #[serde(rename_all = "camelCase")]
    Locked {
        reason: String,
        visible_at: Option<DateTime<Utc>>,
    },
}

impl LeaderboardAccess {
    pub fn is_visible(&self) -> bool {
        matches!(self, Self::Visible)
    }
}

/// Decide leaderboard access from the quiz settings.
///
/// The time gate is checked first, then the participants-only gate.
/// `default_delay_hours` applies when a delayed board has no explicit delay.
pub fn check_access(
    settings: &LeaderboardVisibility,
    end_date: DateTime<Utc>,
    now: DateTime<Utc>,
    has_attempted: bool,
    default_delay_hours: u32,
) -> LeaderboardAccess {
    match settings.visibility_type {
        VisibilityType::Instant => {}
        VisibilityType::Scheduled => {
            if let Some(at) = settings.scheduled_date {
                if now < at {
                    return LeaderboardAccess::Locked {
                        reason: "Leaderboard will be revealed at the scheduled time".to_string(),
                        visible_at: Some(at),
                    };
                }
            }
        }
        VisibilityType::Delayed => {
            let hours = settings.delay_hours.unwrap_or(default_delay_hours);
            // An unrepresentable reveal time never arrives.
            let reveal = end_date.checked_add_signed(Duration::hours(i64::from(hours)));
            if reveal.is_none_or(|at| now < at) {
                return LeaderboardAccess::Locked {
                    reason: format!("Leaderboard opens {hours} hours after the quiz ends"),
                    visible_at: reveal,
                };
            }
        }
    }

    if settings.show_to_participants_only && !has_attempted {
        return LeaderboardAccess::Locked {
            reason: "Leaderboard is only visible to participants".to_string(),
            visible_at: None,
        };
    }

    LeaderboardAccess::Visible
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, day, hour, 0, 0).unwrap()
    }

    fn settings(kind: VisibilityType) -> LeaderboardVisibility {
        LeaderboardVisibility {
            visibility_type: kind,
            ..LeaderboardVisibility::default()
        }
    }

    #[test]
    fn test_instant_is_always_visible() {
        let access = check_access(&settings(VisibilityType::Instant), at(1, 0), at(1, 0), false, 24);
        assert!(access.is_visible());
    }

    #[test]
    fn test_scheduled_without_date_is_visible() {
        let access = check_access(&settings(VisibilityType::Scheduled), at(1, 0), at(1, 0), true, 24);
        assert!(access.is_visible());
    }

    #[test]
    fn test_scheduled_locks_until_date() {
        let mut s = settings(VisibilityType::Scheduled);
        s.scheduled_date = Some(at(5, 12));

        let before = check_access(&s, at(1, 0), at(5, 11), true, 24);
        assert_eq!(
            before,
            LeaderboardAccess::Locked {
                reason: "Leaderboard will be revealed at the scheduled time".to_string(),
                visible_at: Some(at(5, 12)),
            }
        );
        assert!(check_access(&s, at(1, 0), at(5, 12), true, 24).is_visible());
    }

    #[test]
    fn test_delayed_uses_default_hours() {
        let s = settings(VisibilityType::Delayed);
        let end = at(10, 8);

        let locked = check_access(&s, end, at(11, 7), true, 24);
        match locked {
            LeaderboardAccess::Locked { visible_at, .. } => assert_eq!(visible_at, Some(at(11, 8))),
            LeaderboardAccess::Visible => panic!("expected locked"),
        }
        assert!(check_access(&s, end, at(11, 8), true, 24).is_visible());
    }

    #[test]
    fn test_delayed_explicit_hours() {
        let mut s = settings(VisibilityType::Delayed);
        s.delay_hours = Some(2);
        assert!(check_access(&s, at(10, 8), at(10, 10), false, 24).is_visible());
    }

    #[test]
    fn test_delay_past_calendar_range_stays_locked() {
        let mut s = settings(VisibilityType::Delayed);
        s.delay_hours = Some(u32::MAX);

        let access = check_access(&s, at(2, 0), at(3, 0), true, 24);
        assert_eq!(
            access,
            LeaderboardAccess::Locked {
                reason: format!("Leaderboard opens {} hours after the quiz ends", u32::MAX),
                visible_at: None,
            }
        );
    }

    #[test]
    fn test_participants_only() {
        let mut s = settings(VisibilityType::Instant);
        s.show_to_participants_only = true;

        let outsider = check_access(&s, at(1, 0), at(2, 0), false, 24);
        assert!(!outsider.is_visible());
        assert!(check_access(&s, at(1, 0), at(2, 0), true, 24).is_visible());
    }

    #[test]
    fn test_locked_serializes_camel_case() {
        let access = LeaderboardAccess::Locked {
            reason: "x".to_string(),
            visible_at: None,
        };
        let json = serde_json::to_value(&access).unwrap();
        assert_eq!(json["status"], "locked");
        assert!(json.get("visibleAt").is_some());
    }
}
