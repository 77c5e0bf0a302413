//! Public link access
//!
//! A user with permission on the asset always gets in. Everyone else needs a
//! public link that has not expired and, when the link is password
//! protected, the matching password. Expiry is checked before the password.
//! A link stays open through the instant it expires.

use crate::error::PublicAccessError;
use asset_types::PublicAccessSettings;
use chrono::{DateTime, Utc};

/// Decide whether a request may open an asset
///
/// # Errors
///
/// Returns the first rule that rejects the request.
pub fn check_public_access(
    has_permission: bool,
    settings: &PublicAccessSettings,
    password: Option<&str>,
    now: DateTime<Utc>,
) -> Result<(), PublicAccessError> {
    if has_permission {
        return Ok(());
    }

    if !settings.publicly_accessible {
        return Err(PublicAccessError::Forbidden);
    }

    if let Some(expiry) = settings.public_expiry_date {
        if expiry < now {
            tracing::debug!(%expiry, "public link expired");
            return Err(PublicAccessError::Expired);
        }
    }

    match settings.public_password.as_deref() {
        None | Some("") => Ok(()),
        Some(expected) => match password {
            None | Some("") => Err(PublicAccessError::PasswordRequired),
            Some(given) if given == expected => Ok(()),
            Some(_) => Err(PublicAccessError::IncorrectPassword),
        },
    }
}
