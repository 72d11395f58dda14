//! One-time passcodes for passwordless athlete sign-in.
//!
//! Codes have the form `LLLDDD` (three uppercase letters, three zero-padded
//! digits). An athlete holds at most one active code; issuing a new one
//! deactivates the previous. [`OtpIssuer::validate`] distinguishes a code
//! that never existed from one that has expired.

use std::sync::LazyLock;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use rand::Rng;
use regex::Regex;

use crate::error::CoreError;
use crate::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Number of leading uppercase letters in a code.
pub const CODE_LETTERS: usize = 3;

/// Exclusive upper bound of the numeric suffix (three digits).
const CODE_NUMBER_BOUND: u16 = 1000;

/// Default collision retry ceiling for [`OtpIssuer::issue`].
pub const DEFAULT_MAX_ATTEMPTS: u32 = 10;

/// Default code lifetime in hours (30 days).
pub const DEFAULT_TTL_HOURS: i64 = 24 * 30;

static OTP_CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{3}[0-9]{3}$").expect("valid regex"));

// ---------------------------------------------------------------------------
// Generation
// ---------------------------------------------------------------------------

/// Lifetime and retry settings for issued codes.
#[derive(Debug, Clone, Copy)]
pub struct OtpPolicy {
    pub ttl: Duration,
    pub max_attempts: u32,
}

impl Default for OtpPolicy {
    fn default() -> Self {
        Self {
            ttl: Duration::hours(DEFAULT_TTL_HOURS),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

/// A freshly generated code, not yet persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedOtp {
    pub code: String,
    pub issued_at: Timestamp,
    pub expires_at: Timestamp,
}

/// Produce a random `LLLDDD` code.
pub fn generate_code() -> String {
    let mut rng = rand::rng();
    let mut code = String::with_capacity(CODE_LETTERS + 3);
    for _ in 0..CODE_LETTERS {
        code.push(char::from(rng.random_range(b'A'..=b'Z')));
    }
    let number = rng.random_range(0..CODE_NUMBER_BOUND);
    code.push_str(&format!("{number:03}"));
    code
}

/// Generate a code issued at `now` that expires one policy TTL later.
pub fn generate(policy: &OtpPolicy, now: Timestamp) -> GeneratedOtp {
    GeneratedOtp {
        code: generate_code(),
        issued_at: now,
        expires_at: now + policy.ttl,
    }
}

/// Reject anything that is not an `LLLDDD` code before touching storage.
pub fn validate_code_format(code: &str) -> Result<(), CoreError> {
    if OTP_CODE_RE.is_match(code) {
        Ok(())
    } else {
        Err(CoreError::Validation(
            "Invalid OTP format. Expected three uppercase letters followed by three digits"
                .to_string(),
        ))
    }
}

// ---------------------------------------------------------------------------
// Store abstraction
// ---------------------------------------------------------------------------

/// The fields of a persisted code that the issuer reads.
pub trait OtpRecordView {
    fn athlete_id(&self) -> DbId;
    fn expires_at(&self) -> Timestamp;
}

/// Persistence needed by [`OtpIssuer`].
#[async_trait]
pub trait OtpStore: Send + Sync {
    type Record: OtpRecordView + Send + Sync;
    type Error: From<CoreError> + Send;

    async fn athlete_exists(&self, athlete_id: DbId) -> Result<bool, Self::Error>;

    /// Deactivate every active code of the athlete. Returns the count.
    async fn deactivate_for_athlete(&self, athlete_id: DbId) -> Result<u64, Self::Error>;

    /// Whether `code` belongs to any currently active record.
    async fn code_in_use(&self, code: &str) -> Result<bool, Self::Error>;

    /// Persist `otp` as the athlete's only active code.
    ///
    /// Returns `None` if the code collided with another active code at write
    /// time, which the issuer counts as a failed attempt.
    async fn insert_active(
        &self,
        athlete_id: DbId,
        otp: &GeneratedOtp,
    ) -> Result<Option<Self::Record>, Self::Error>;

    async fn find_active_by_code(&self, code: &str) -> Result<Option<Self::Record>, Self::Error>;

    async fn find_active_for_athlete(
        &self,
        athlete_id: DbId,
    ) -> Result<Option<Self::Record>, Self::Error>;
}

// ---------------------------------------------------------------------------
// Issuer
// ---------------------------------------------------------------------------

/// Issues and validates codes against an [`OtpStore`].
pub struct OtpIssuer<'a, S> {
    store: &'a S,
    policy: OtpPolicy,
}

impl<'a, S: OtpStore> OtpIssuer<'a, S> {
    pub fn new(store: &'a S, policy: OtpPolicy) -> Self {
        Self { store, policy }
    }

    /// Issue a new active code for the athlete, superseding any previous one.
    pub async fn issue(&self, athlete_id: DbId) -> Result<S::Record, S::Error> {
        if !self.store.athlete_exists(athlete_id).await? {
            return Err(CoreError::NotFound {
                entity: "Athlete",
                id: athlete_id,
            }
            .into());
        }

        let deactivated = self.store.deactivate_for_athlete(athlete_id).await?;

        for attempt in 1..=self.policy.max_attempts {
            let otp = generate(&self.policy, Utc::now());

            if self.store.code_in_use(&otp.code).await? {
                tracing::debug!(athlete_id, attempt, "OTP code collision, retrying");
                continue;
            }

            if let Some(record) = self.store.insert_active(athlete_id, &otp).await? {
                tracing::info!(
                    athlete_id,
                    attempt,
                    deactivated,
                    expires_at = %otp.expires_at,
                    "Issued OTP",
                );
                return Ok(record);
            }

            tracing::debug!(athlete_id, attempt, "OTP code taken at write time, retrying");
        }

        tracing::warn!(
            athlete_id,
            attempts = self.policy.max_attempts,
            "Could not generate a unique OTP code",
        );
        Err(CoreError::ExhaustedRetries {
            what: "unique OTP code",
            attempts: self.policy.max_attempts,
        }
        .into())
    }

    /// Resolve a code to its athlete, checking expiry against the current time.
    pub async fn validate(&self, code: &str) -> Result<DbId, S::Error> {
        self.validate_at(code, Utc::now()).await
    }

    /// Resolve a code to its athlete, checking expiry against `now`.
    pub async fn validate_at(&self, code: &str, now: Timestamp) -> Result<DbId, S::Error> {
        validate_code_format(code)?;

        let record = self
            .store
            .find_active_by_code(code)
            .await?
            .ok_or_else(|| CoreError::NotFoundBy {
                entity: "OTP",
                field: "code",
                value: code.to_string(),
            })?;

        if now > record.expires_at() {
            return Err(CoreError::Expired("OTP code has expired".to_string()).into());
        }

        Ok(record.athlete_id())
    }

    /// Whether the athlete currently holds an active, unexpired code.
    pub async fn has_valid_code(&self, athlete_id: DbId) -> Result<bool, S::Error> {
        let record = self.store.find_active_for_athlete(athlete_id).await?;
        Ok(record.is_some_and(|r| Utc::now() <= r.expires_at()))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
