//! Token Bucket Algorithm
//!
//! Pure decision logic: given stored state, a limit, a period, and the
//! current time, compute the refill and decide admit/deny. Owns no state
//! and performs no I/O; both storage backends run exactly these rules.
//!
//! Refill is batched per whole elapsed period (`floor(elapsed / period) *
//! limit`), not a continuous leak: a fixed-window-style refill inside a
//! token-bucket shape. Elapsed time short of a full period carries no
//! fractional credit.

/// Per-key bucket state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bucket {
    /// Admissions currently available, always `<= limit`
    pub tokens: u32,
    /// Unix seconds of the last top-up
    pub last_refill: i64,
    /// Capacity this bucket was initialized with
    pub limit: u32,
}

/// Result of an admission check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub allowed: bool,
    pub remaining: u32,
}

/// Apply refill to the stored bucket and attempt to take one token.
///
/// A stored limit that differs from the requested one (including a missing
/// bucket) resets the bucket fully refilled: a per-key plan change takes
/// effect immediately instead of draining the stale capacity. `limit == 0`
/// therefore denies every call. No token is consumed on denial.
///
/// `period_secs` must be non-zero; the stores validate before calling.
pub fn refill_and_take(
    existing: Option<Bucket>,
    limit: u32,
    period_secs: u64,
    now: i64,
) -> (Bucket, Decision) {
    let mut bucket = match existing {
        Some(b) if b.limit == limit => b,
        _ => Bucket {
            tokens: limit,
            last_refill: now,
            limit,
        },
    };

    let elapsed = now.saturating_sub(bucket.last_refill);
    if elapsed > 0 {
        let periods = (elapsed as u64) / period_secs;
        if periods > 0 {
            let refilled = (bucket.tokens as u64).saturating_add(periods.saturating_mul(limit as u64));
            bucket.tokens = refilled.min(limit as u64) as u32;
            bucket.last_refill = now;
        }
    }

    if bucket.tokens > 0 {
        bucket.tokens -= 1;
        let decision = Decision {
            allowed: true,
            remaining: bucket.tokens,
        };
        (bucket, decision)
    } else {
        (
            bucket,
            Decision {
                allowed: false,
                remaining: 0,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(existing: Option<Bucket>, limit: u32, now: i64) -> (Bucket, Decision) {
        refill_and_take(existing, limit, 60, now)
    }

    #[test]
    fn test_fresh_key_counts_down_then_denies() {
        // limit=5, period=60: six immediate calls -> 4,3,2,1,0, then denied.
        let mut state = None;
        let mut seen = Vec::new();
        for _ in 0..6 {
            let (bucket, decision) = run(state, 5, 1_000);
            state = Some(bucket);
            seen.push((decision.allowed, decision.remaining));
        }
        assert_eq!(
            seen,
            vec![
                (true, 4),
                (true, 3),
                (true, 2),
                (true, 1),
                (true, 0),
                (false, 0),
            ]
        );
    }

    #[test]
    fn test_denial_does_not_consume() {
        let (bucket, _) = run(None, 1, 0);
        let (bucket, denied) = run(Some(bucket), 1, 10);
        assert!(!denied.allowed);
        // Repeated denials leave the stored state untouched.
        let (bucket2, denied2) = run(Some(bucket), 1, 20);
        assert!(!denied2.allowed);
        assert_eq!(bucket.tokens, bucket2.tokens);
        assert_eq!(bucket.last_refill, bucket2.last_refill);
    }

    #[test]
    fn test_full_period_refills() {
        let mut state = None;
        for _ in 0..5 {
            let (bucket, _) = run(state, 5, 100);
            state = Some(bucket);
        }
        // Exhausted at t=100; one full period later the bucket is full again.
        let (bucket, decision) = run(state, 5, 160);
        assert!(decision.allowed);
        assert_eq!(decision.remaining, 4);
        assert_eq!(bucket.last_refill, 160);
    }

    #[test]
    fn test_partial_period_gives_no_credit() {
        let mut state = None;
        for _ in 0..5 {
            let (bucket, _) = run(state, 5, 100);
            state = Some(bucket);
        }
        let (bucket, decision) = run(state, 5, 159);
        assert!(!decision.allowed);
        // last_refill unchanged: no fractional credit is carried.
        assert_eq!(bucket.last_refill, 100);
    }

    #[test]
    fn test_multiple_periods_cap_at_limit() {
        let (bucket, _) = run(None, 5, 0);
        // Ten periods elapse; refill is capped at the limit, not 50 tokens.
        let (bucket, decision) = run(Some(bucket), 5, 600);
        assert!(decision.allowed);
        assert_eq!(decision.remaining, 4);
        assert_eq!(bucket.tokens, 4);
    }

    #[test]
    fn test_limit_change_resets_bucket() {
        let mut state = None;
        for _ in 0..3 {
            let (bucket, _) = run(state, 3, 50);
            state = Some(bucket);
        }
        // Plan upgraded from 3 to 10: fully refilled immediately.
        let (bucket, decision) = run(state, 10, 51);
        assert!(decision.allowed);
        assert_eq!(decision.remaining, 9);
        assert_eq!(bucket.limit, 10);
        assert_eq!(bucket.last_refill, 51);
    }

    #[test]
    fn test_limit_downgrade_also_resets() {
        let (bucket, _) = run(None, 10, 0);
        let (bucket, decision) = run(Some(bucket), 2, 1);
        assert!(decision.allowed);
        assert_eq!(decision.remaining, 1);
        assert_eq!(bucket.limit, 2);
    }

    #[test]
    fn test_zero_limit_always_denies() {
        let (bucket, decision) = run(None, 0, 0);
        assert!(!decision.allowed);
        assert_eq!(decision.remaining, 0);
        // Even after many periods there is nothing to refill.
        let (_, decision) = run(Some(bucket), 0, 6_000);
        assert!(!decision.allowed);
        assert_eq!(decision.remaining, 0);
    }

    #[test]
    fn test_remaining_stays_in_range() {
        let mut state = None;
        for now in [0, 1, 59, 60, 61, 600] {
            let (bucket, decision) = run(state, 3, now);
            state = Some(bucket);
            assert!(decision.remaining <= 3);
            assert!(bucket.tokens <= bucket.limit);
        }
    }

    #[test]
    fn test_clock_going_backwards_is_harmless() {
        let (bucket, _) = run(None, 5, 100);
        // A now before last_refill must not underflow or refill.
        let (bucket, decision) = run(Some(bucket), 5, 40);
        assert!(decision.allowed);
        assert_eq!(decision.remaining, 3);
        assert_eq!(bucket.last_refill, 100);
    }
}
