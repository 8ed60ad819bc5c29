//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from worker coordination, repositories, save decoding and
//! campaign commands so clients can bubble them up with consistent context.
use thiserror::Error;
use tokio::sync::oneshot;

use campaign_core::{CampaignError, ContainmentError, TransferError};

pub use crate::controller::ControllerError;
pub use crate::repository::RepositoryError;
pub use crate::save::SaveError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("campaign worker command channel closed")]
    CommandChannelClosed,

    #[error("campaign worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("campaign worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error("runtime requires oracles to be configured before building")]
    MissingOracles,

    #[error("no save repository configured")]
    NoRepository,

    #[error("save slot '{0}' not found")]
    SaveNotFound(String),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Save(#[from] SaveError),

    #[error(transparent)]
    Controller(#[from] ControllerError),

    #[error(transparent)]
    Transfer(#[from] TransferError),

    #[error(transparent)]
    Containment(#[from] ContainmentError),
}

impl RuntimeError {
    /// The campaign rule that rejected the command, `None` for infrastructure failures.
    pub fn campaign_error(&self) -> Option<&dyn CampaignError> {
        match self {
            RuntimeError::Controller(err) => Some(err),
            RuntimeError::Transfer(err) => Some(err),
            RuntimeError::Containment(err) => Some(err),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use campaign_core::{BaseId, ErrorSeverity};

    #[test]
    fn campaign_failures_keep_their_classification() {
        let err = RuntimeError::from(ContainmentError::NoContainment(BaseId(1)));
        let campaign = err.campaign_error().unwrap();
        assert_eq!(campaign.severity(), ErrorSeverity::Recoverable);
        assert_eq!(campaign.error_code(), "CONTAINMENT_NOT_AVAILABLE");

        assert!(RuntimeError::NoRepository.campaign_error().is_none());
    }
}
