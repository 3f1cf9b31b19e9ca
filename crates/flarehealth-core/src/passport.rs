//! One-time health-passport access tokens.
//!
//! A patient picks which parts of their record to share and issues a token
//! with a fixed lifetime. A clinician redeems it once, before it expires.
//!
//! ```text
//!            issue()
//!   (none) ──────────► Active ──redeem()──► Redeemed
//!                        │
//!                        └──now ≥ expires_at──► Expired
//! ```
//!
//! Time is always passed in by the caller; nothing here reads the clock or
//! sleeps, so the state machine is deterministic under test.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use flarehealth_contracts::{
    error::{FlareHealthError, FlareHealthResult},
    passport::PermissionSet,
};

/// Where a token is in its lifecycle at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenStatus {
    Active,
    Expired,
    Redeemed,
}

/// The data encoded into the passport QR code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPayload {
    pub token_id: Uuid,
    pub permissions: PermissionSet,
    pub expires_at: DateTime<Utc>,
}

/// A one-time access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessToken {
    token_id: Uuid,
    permissions: PermissionSet,
    issued_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
    redeemed_at: Option<DateTime<Utc>>,
}

impl AccessToken {
    /// Issue a token sharing `permissions` for `ttl` starting at `now`.
    ///
    /// Returns `PassportError` if no permission was selected, `ttl` is not
    /// positive, or the expiry falls outside the representable date range.
    pub fn issue(permissions: PermissionSet, ttl: Duration, now: DateTime<Utc>) -> FlareHealthResult<Self> {
        if permissions.is_empty() {
            return Err(FlareHealthError::PassportError {
                reason: "select at least one permission to share".to_string(),
            });
        }
        if ttl <= Duration::zero() {
            return Err(FlareHealthError::PassportError {
                reason: format!("token lifetime must be positive, got {}s", ttl.num_seconds()),
            });
        }

        let expires_at = now.checked_add_signed(ttl).ok_or_else(|| FlareHealthError::PassportError {
            reason: format!("token lifetime of {}s overflows the expiry date", ttl.num_seconds()),
        })?;

        let token = Self {
            token_id: Uuid::new_v4(),
            permissions,
            issued_at: now,
            expires_at,
            redeemed_at: None,
        };

        info!(
            token_id = %token.token_id,
            expires_at = %token.expires_at,
            "passport access token issued"
        );

        Ok(token)
    }

    pub fn token_id(&self) -> Uuid {
        self.token_id
    }

    pub fn permissions(&self) -> &PermissionSet {
        &self.permissions
    }

    pub fn issued_at(&self) -> DateTime<Utc> {
        self.issued_at
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Status at `now`. A redeemed token stays redeemed after expiry.
    pub fn status(&self, now: DateTime<Utc>) -> TokenStatus {
        if self.redeemed_at.is_some() {
            TokenStatus::Redeemed
        } else if now >= self.expires_at {
            TokenStatus::Expired
        } else {
            TokenStatus::Active
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.status(now) == TokenStatus::Expired
    }

    /// Time left before expiry, never negative.
    pub fn remaining(&self, now: DateTime<Utc>) -> Duration {
        (self.expires_at - now).max(Duration::zero())
    }

    /// Countdown as `m:ss`, e.g. `"4:05"`.
    pub fn format_remaining(&self, now: DateTime<Utc>) -> String {
        let secs = self.remaining(now).num_seconds();
        format!("{}:{:02}", secs / 60, secs % 60)
    }

    /// QR payload for this token.
    pub fn payload(&self) -> TokenPayload {
        TokenPayload {
            token_id: self.token_id,
            permissions: self.permissions.clone(),
            expires_at: self.expires_at,
        }
    }

    /// Redeem the token at `now`, returning the permissions it unlocks.
    ///
    /// Fails with `TokenExpired` after the lifetime ends and with
    /// `PassportError` if the token was already redeemed.
    pub fn redeem(&mut self, now: DateTime<Utc>) -> FlareHealthResult<&PermissionSet> {
        match self.status(now) {
            TokenStatus::Active => {
                self.redeemed_at = Some(now);
                info!(token_id = %self.token_id, "passport access token redeemed");
                Ok(&self.permissions)
            }
            TokenStatus::Expired => {
                warn!(token_id = %self.token_id, "attempt to redeem expired token");
                Err(FlareHealthError::TokenExpired {
                    token_id: self.token_id.to_string(),
                })
            }
            TokenStatus::Redeemed => {
                warn!(token_id = %self.token_id, "attempt to redeem token twice");
                Err(FlareHealthError::PassportError {
                    reason: format!("token '{}' has already been redeemed", self.token_id),
                })
            }
        }
    }
}
