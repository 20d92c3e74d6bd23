//! Verification codes for email confirmation and password reset.
//!
//! Codes are short and guessable on their own; safety comes from the expiry
//! window and from clearing the code once it is used.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;

use crate::constants::{VERIFICATION_CODE_MAX, VERIFICATION_CODE_MIN};

/// Six-digit numeric code, uniformly drawn from `100000..=999999`.
pub fn create_token() -> String {
    rand::thread_rng()
        .gen_range(VERIFICATION_CODE_MIN..=VERIFICATION_CODE_MAX)
        .to_string()
}

/// True iff the current time is strictly after `expiry`.
pub fn is_token_expired(expiry: DateTime<Utc>) -> bool {
    is_token_expired_at(expiry, Utc::now())
}

pub fn is_token_expired_at(expiry: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    now > expiry
}

/// Expiry for a code issued at `now`.
pub fn token_expiry_from(now: DateTime<Utc>, ttl_minutes: i64) -> DateTime<Utc> {
    now + Duration::minutes(ttl_minutes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_is_six_digits_in_range() {
        for _ in 0..1_000 {
            let token = create_token();
            assert_eq!(token.len(), 6);
            let value: u32 = token.parse().unwrap();
            assert!((VERIFICATION_CODE_MIN..=VERIFICATION_CODE_MAX).contains(&value));
        }
    }

    #[test]
    fn test_expiry_is_strict() {
        let expiry = Utc::now();

        assert!(!is_token_expired_at(expiry, expiry));
        assert!(!is_token_expired_at(expiry, expiry - Duration::seconds(1)));
        assert!(is_token_expired_at(expiry, expiry + Duration::milliseconds(1)));
    }

    #[test]
    fn test_fresh_expiry_is_not_expired() {
        let expiry = token_expiry_from(Utc::now(), 10);
        assert!(!is_token_expired(expiry));
    }

    #[test]
    fn test_past_expiry_is_expired() {
        let expiry = token_expiry_from(Utc::now(), -1);
        assert!(is_token_expired(expiry));
    }
}
