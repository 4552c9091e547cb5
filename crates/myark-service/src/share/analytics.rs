//! Share analytics aggregation.
//!
//! Everything here is a pure function of the filtered share list so the
//! numbers can be checked without a database.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use serde::Serialize;

use myark_entity::share::ShareRecord;

const TOP_SHARERS: usize = 10;
const RECENT_SHARES: usize = 20;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ShareBreakdown {
    pub authenticated: u64,
    pub anonymous: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConversionBreakdown {
    pub viewed: u64,
    pub registered: u64,
    pub bookmarked: u64,
}

/// Totals for one signed-in sharer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopSharer {
    pub user_id: String,
    pub user_name: String,
    pub user_email: String,
    pub shares: u64,
    pub clicks: u64,
    pub conversions: u64,
    pub conversion_rate: f64,
}

/// Activity on one UTC day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyShares {
    pub date: NaiveDate,
    pub shares: u64,
    pub clicks: u64,
    pub conversions: u64,
}

/// The admin analytics report.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareAnalytics {
    pub total_shares: u64,
    pub total_clicks: u64,
    pub total_conversions: u64,
    pub click_through_rate: f64,
    pub conversion_rate: f64,
    pub share_breakdown: ShareBreakdown,
    pub conversion_breakdown: ConversionBreakdown,
    pub top_sharers: Vec<TopSharer>,
    pub recent_shares: Vec<ShareRecord>,
    pub shares_over_time: Vec<DailyShares>,
}

/// `numerator / denominator * 100`, rounded to one decimal; 0 for an empty
/// denominator.
pub fn rate(numerator: u64, denominator: u64) -> f64 {
    if denominator == 0 {
        return 0.0;
    }
    let pct = numerator as f64 / denominator as f64 * 100.0;
    (pct * 10.0).round() / 10.0
}

fn counter(value: i32) -> u64 {
    u64::try_from(value).unwrap_or(0)
}

/// Build the report from the shares matching the analytics filter.
pub fn aggregate(mut shares: Vec<ShareRecord>) -> ShareAnalytics {
    let total_shares = shares.len() as u64;
    let total_clicks: u64 = shares.iter().map(ShareRecord::clicks).sum();
    let total_conversions: u64 = shares.iter().map(ShareRecord::total_conversions).sum();

    let authenticated = shares.iter().filter(|s| s.is_authenticated).count() as u64;
    let share_breakdown = ShareBreakdown {
        authenticated,
        anonymous: total_shares - authenticated,
    };

    let conversion_breakdown = shares.iter().fold(ConversionBreakdown::default(), |mut acc, s| {
        acc.viewed += counter(s.conversions_viewed);
        acc.registered += counter(s.conversions_registered);
        acc.bookmarked += counter(s.conversions_bookmarked);
        acc
    });

    let mut sharers: HashMap<&str, TopSharer> = HashMap::new();
    for share in shares.iter().filter(|s| s.is_authenticated) {
        let Some(user_id) = share.user_id.as_deref() else {
            continue;
        };
        let entry = sharers.entry(user_id).or_insert_with(|| TopSharer {
            user_id: user_id.to_string(),
            user_name: share.user_name.clone().unwrap_or_else(|| "Unknown".to_string()),
            user_email: share.user_email.clone().unwrap_or_default(),
            shares: 0,
            clicks: 0,
            conversions: 0,
            conversion_rate: 0.0,
        });
        entry.shares += 1;
        entry.clicks += share.clicks();
        entry.conversions += share.total_conversions();
    }
    let mut top_sharers: Vec<TopSharer> = sharers
        .into_values()
        .map(|mut s| {
            s.conversion_rate = rate(s.conversions, s.clicks);
            s
        })
        .collect();
    top_sharers.sort_by(|a, b| b.shares.cmp(&a.shares).then_with(|| a.user_id.cmp(&b.user_id)));
    top_sharers.truncate(TOP_SHARERS);

    let mut by_day: BTreeMap<NaiveDate, DailyShares> = BTreeMap::new();
    for share in &shares {
        let date = share.shared_at.date_naive();
        let day = by_day.entry(date).or_insert_with(|| DailyShares {
            date,
            shares: 0,
            clicks: 0,
            conversions: 0,
        });
        day.shares += 1;
        day.clicks += share.clicks();
        day.conversions += share.total_conversions();
    }

    shares.sort_by(|a, b| b.shared_at.cmp(&a.shared_at));
    shares.truncate(RECENT_SHARES);

    ShareAnalytics {
        total_shares,
        total_clicks,
        total_conversions,
        click_through_rate: rate(total_clicks, total_shares),
        conversion_rate: rate(total_conversions, total_clicks),
        share_breakdown,
        conversion_breakdown,
        top_sharers,
        recent_shares: shares,
        shares_over_time: by_day.into_values().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use myark_entity::share::{ShareMethod, SharePlatform};

    fn share(code: &str, user: Option<&str>, at: DateTime<Utc>, clicks: i32, conv: [i32; 3]) -> ShareRecord {
        ShareRecord {
            share_code: code.to_string(),
            user_id: user.map(str::to_string),
            user_email: None,
            user_name: None,
            is_authenticated: user.is_some(),
            ip_address: None,
            user_agent: None,
            opportunity_id: "opp-1".to_string(),
            opportunity_title: "Robotics Camp".to_string(),
            opportunity_slug: None,
            share_method: ShareMethod::Whatsapp,
            platform: SharePlatform::Mobile,
            click_count: clicks,
            unique_visitors: clicks,
            conversions_viewed: conv[0],
            conversions_registered: conv[1],
            conversions_bookmarked: conv[2],
            shared_at: at,
            last_click_at: None,
            last_conversion_at: None,
            is_active: true,
        }
    }

    fn day(d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 4, d, h, 0, 0).unwrap()
    }

    #[test]
    fn test_rate_rounding_and_zero_denominator() {
        assert_eq!(rate(1, 3), 33.3);
        assert_eq!(rate(2, 3), 66.7);
        assert_eq!(rate(5, 0), 0.0);
    }

    #[test]
    fn test_totals_and_breakdowns() {
        let report = aggregate(vec![
            share("a", Some("u1"), day(1, 9), 4, [1, 1, 0]),
            share("b", None, day(1, 10), 2, [0, 0, 1]),
            share("c", Some("u1"), day(2, 9), 0, [0, 0, 0]),
        ]);
        assert_eq!(report.total_shares, 3);
        assert_eq!(report.total_clicks, 6);
        assert_eq!(report.total_conversions, 3);
        assert_eq!(report.click_through_rate, 200.0);
        assert_eq!(report.conversion_rate, 50.0);
        assert_eq!(report.share_breakdown, ShareBreakdown { authenticated: 2, anonymous: 1 });
        assert_eq!(
            report.conversion_breakdown,
            ConversionBreakdown { viewed: 1, registered: 1, bookmarked: 1 }
        );
    }

    #[test]
    fn test_top_sharers_skip_anonymous() {
        let report = aggregate(vec![
            share("a", Some("u1"), day(1, 9), 4, [1, 1, 0]),
            share("b", None, day(1, 10), 9, [0, 0, 0]),
            share("c", Some("u2"), day(2, 9), 1, [0, 0, 0]),
            share("d", Some("u1"), day(2, 10), 0, [0, 0, 0]),
        ]);
        assert_eq!(report.top_sharers.len(), 2);
        let first = &report.top_sharers[0];
        assert_eq!(first.user_id, "u1");
        assert_eq!(first.user_name, "Unknown");
        assert_eq!(first.shares, 2);
        assert_eq!(first.conversion_rate, 50.0);
    }

    #[test]
    fn test_over_time_ascending_and_recent_newest_first() {
        let base = day(3, 0);
        let shares = (0..25)
            .map(|i| share(&format!("s{i}"), None, base - Duration::hours(i * 12), 0, [0, 0, 0]))
            .collect();
        let report = aggregate(shares);

        assert_eq!(report.recent_shares.len(), 20);
        assert_eq!(report.recent_shares[0].share_code, "s0");
        let dates: Vec<_> = report.shares_over_time.iter().map(|d| d.date).collect();
        let mut sorted = dates.clone();
        sorted.sort();
        assert_eq!(dates, sorted);
        let total: u64 = report.shares_over_time.iter().map(|d| d.shares).sum();
        assert_eq!(total, 25);
    }

    #[test]
    fn test_empty_report() {
        let report = aggregate(Vec::new());
        assert_eq!(report.total_shares, 0);
        assert_eq!(report.click_through_rate, 0.0);
        assert!(report.shares_over_time.is_empty());
    }
}
