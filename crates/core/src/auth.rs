use serde::{Deserialize, Serialize};

/// Acting user asserted by the host framework for one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    subject: String,
}

impl UserIdentity {
    /// Creates an identity for the host's user id.
    #[must_use]
    pub fn from_subject(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
        }
    }

    /// Returns the stable subject (user id) from the host session.
    #[must_use]
    pub fn subject(&self) -> &str {
        self.subject.as_str()
    }
}
