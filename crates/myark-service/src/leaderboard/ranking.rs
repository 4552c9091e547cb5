//! Rank arithmetic shared by every board.

use myark_entity::gamification::UserGamification;
use myark_entity::leaderboard::LeaderboardEntry;

/// 1 + the number of scores strictly greater than `xp`.
///
/// Tied students share a rank. The stored boards derive the same number with
/// a `COUNT(*)` query; this is the reference the tests hold them to.
#[cfg(test)]
pub fn rank_of(xp: u64, all: &[u64]) -> u32 {
    let above = all.iter().filter(|x| **x > xp).count();
    u32::try_from(above).unwrap_or(u32::MAX - 1) + 1
}

/// Number the records in their given order, starting at 1.
pub fn assign_ranks(records: &[UserGamification]) -> Vec<LeaderboardEntry> {
    records
        .iter()
        .zip(1u32..)
        .map(|(record, rank)| LeaderboardEntry::from_record(record, rank))
        .collect()
}

/// Caller-supplied limit, defaulted and clamped into `1..=max`.
pub fn clamp_limit(requested: Option<u32>, default: u32, max: u32) -> u32 {
    requested.unwrap_or(default).clamp(1, max.max(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_rank_of() {
        let all = [1000, 800, 500, 200];
        assert_eq!(rank_of(500, &all), 3);
        assert_eq!(rank_of(1000, &all), 1);
        assert_eq!(rank_of(0, &all), 5);
        assert_eq!(rank_of(800, &[800, 800, 100]), 1);
    }

    #[test]
    fn test_assign_ranks_in_order() {
        let now = Utc::now();
        let mut a = UserGamification::new("a", None, now);
        a.total_xp = 300;
        let b = UserGamification::new("b", None, now);
        let entries = assign_ranks(&[a, b]);
        assert_eq!(entries[0].rank, 1);
        assert_eq!(entries[0].uid, "a");
        assert_eq!(entries[1].rank, 2);
    }

    #[test]
    fn test_board_ranks_match_rank_of_for_distinct_xp() {
        let now = Utc::now();
        let xps = [1000u64, 800, 500, 200];
        let records: Vec<UserGamification> = xps
            .iter()
            .enumerate()
            .map(|(i, xp)| {
                let mut r = UserGamification::new(format!("u{i}"), None, now);
                r.total_xp = *xp as i64;
                r
            })
            .collect();

        for entry in assign_ranks(&records) {
            assert_eq!(entry.rank, rank_of(entry.total_xp as u64, &xps));
        }
    }

    #[test]
    fn test_clamp_limit() {
        assert_eq!(clamp_limit(None, 100, 500), 100);
        assert_eq!(clamp_limit(Some(0), 100, 500), 1);
        assert_eq!(clamp_limit(Some(9_999), 100, 500), 500);
    }
}
