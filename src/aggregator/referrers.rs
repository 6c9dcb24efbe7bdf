//! Rank referrers by their share of sessions.
//!
//! Each share is rounded on its own, so the shares of a full list do not
//! necessarily add up to 100.

use crate::parser::payload::RawReferrer;
use crate::parser::schema::ReferrerShare;
use log::{debug, warn};

/// Rank referrers by share of `total_sessions`
///
/// **Public** - main entry point for referrer ranking
///
/// # Arguments
/// * `referrers` - Raw referrer counts, any order, duplicates kept
/// * `total_sessions` - Denominator for the share; 0 yields 0% everywhere
/// * `limit` - Number of top referrers to return (usually `TOP_REFERRER_LIMIT`)
///
/// # Returns
/// At most `limit` shares, descending by percentage. Ties keep input order.
pub fn rank_referrers(
    referrers: &[RawReferrer],
    total_sessions: u64,
    limit: usize,
) -> Vec<ReferrerShare> {
    debug!(
        "Ranking {} referrers against {} sessions (top {})",
        referrers.len(),
        total_sessions,
        limit
    );

    let mut shares: Vec<ReferrerShare> = referrers
        .iter()
        .map(|r| ReferrerShare {
            name: r.name.clone(),
            percentage: share_percentage(r.count, total_sessions),
        })
        .collect();

    // sort_by is stable: equal percentages keep their input order
    shares.sort_by(|a, b| b.percentage.cmp(&a.percentage));
    shares.truncate(limit);

    shares
}

/// Percentage of `count` over `total`, rounded half-up
///
/// **Private** - integer arithmetic, so there is no float rounding to worry about
fn share_percentage(count: u64, total: u64) -> u8 {
    if total == 0 {
        return 0;
    }

    let (count, total) = (u128::from(count), u128::from(total));
    let rounded = (200 * count + total) / (2 * total);

    if rounded > 100 {
        warn!(
            "Referrer count {} exceeds session total {}, clamping share to 100%",
            count, total
        );
        return 100;
    }

    rounded as u8
}
