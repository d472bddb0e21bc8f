use crate::ActionKind;
use amount::AmountError;
use thiserror::Error;

/// Everything that can go wrong inside a token session.
///
/// None of these escape the session: write failures end up in
/// [`TokenState::error`](crate::TokenState::error) through
/// [`Error::user_message`], the rest are logged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Malformed amount text, caught before submission.
    #[error(transparent)]
    InvalidAmount(#[from] AmountError),

    /// The ledger rejected a write.
    #[error("{kind} failed: {reason}")]
    ActionFailed { kind: ActionKind, reason: String },

    /// A polling read failed.
    #[error("{method} read failed: {reason}")]
    ReadFailed { method: &'static str, reason: String },
}

impl Error {
    /// Message for the session's `error` field, if this error is user-facing.
    pub fn user_message(&self) -> Option<String> {
        match self {
            Self::ActionFailed { kind, .. } => {
                Some(format!("{} failed. Please try again.", kind.label()))
            }
            Self::InvalidAmount(_) | Self::ReadFailed { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message() {
        let cases = [
            (ActionKind::Approve, "Approve failed. Please try again."),
            (ActionKind::Transfer, "Transfer failed. Please try again."),
            (ActionKind::Mint, "Mint failed. Please try again."),
        ];
        for (kind, expected) in cases {
            let err = Error::ActionFailed {
                kind,
                reason: "rejected".to_string(),
            };
            assert_eq!(err.user_message().as_deref(), Some(expected));
        }

        let read = Error::ReadFailed {
            method: "balanceOf",
            reason: "timeout".to_string(),
        };
        assert_eq!(read.user_message(), None);
    }
}
