//! Error types for policy checks that reject a request

/// Reasons a public link may not be opened
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PublicAccessError {
    /// No permission and the asset is not public
    #[error("you do not have permission to view this asset")]
    Forbidden,

    /// Public link expired
    #[error("public access to this asset has expired")]
    Expired,

    /// Link is password protected and no password was supplied
    #[error("password required for public access")]
    PasswordRequired,

    /// Supplied password does not match
    #[error("incorrect password for public access")]
    IncorrectPassword,
}

impl PublicAccessError {
    /// HTTP status the API answers with
    #[inline]
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::PasswordRequired => 418,
            Self::Forbidden | Self::Expired | Self::IncorrectPassword => 403,
        }
    }
}
