//! Expiry computation for spiked items.

use crate::config::ExpiryPolicy;

const MS_PER_MINUTE: i64 = 60_000;

/// Returns the epoch-ms instant after which an item spiked at `now_epoch_ms`
/// becomes eligible for cleanup.
///
/// Saturates at `i64::MAX` instead of overflowing.
pub fn compute_expiry(now_epoch_ms: i64, policy: &ExpiryPolicy) -> i64 {
    now_epoch_ms.saturating_add(i64::from(policy.minutes()).saturating_mul(MS_PER_MINUTE))
}

#[cfg(test)]
mod tests {
    use super::compute_expiry;
    use crate::config::ExpiryPolicy;

    #[test]
    fn adds_configured_minutes() {
        let policy = ExpiryPolicy::from_minutes(30).unwrap();
        assert_eq!(compute_expiry(1_000, &policy), 1_000 + 30 * 60_000);
    }

    #[test]
    fn saturates_near_max() {
        let policy = ExpiryPolicy::from_minutes(u32::MAX).unwrap();
        assert_eq!(compute_expiry(i64::MAX - 5, &policy), i64::MAX);
    }

    #[test]
    fn smallest_policy_is_strictly_after_now() {
        let policy = ExpiryPolicy::new(std::num::NonZeroU32::MIN);
        assert!(compute_expiry(1_000, &policy) > 1_000);
    }
}
