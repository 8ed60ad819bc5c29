use crate::env::OracleError;
use crate::error::{CampaignError, ErrorSeverity};
use crate::state::{
    AircraftId, BaseId, BodyState, ContainmentError, EmployeeId, EmployeeKind, ItemId, SpeciesId,
};

/// Reasons a transfer could not be started. Nothing is debited when one is returned.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransferError {
    #[error("{0} does not exist")]
    UnknownBase(BaseId),

    #[error("source and destination are both {0}")]
    SameBase(BaseId),

    #[error("{0} does not exist")]
    UnknownItem(ItemId),

    #[error("{base} holds {present} of {item}, {requested} requested")]
    InsufficientItems {
        base: BaseId,
        item: ItemId,
        present: u32,
        requested: u32,
    },

    #[error("{0} does not exist")]
    UnknownEmployee(EmployeeId),

    #[error("{employee} is not available at {base}")]
    EmployeeUnavailable { employee: EmployeeId, base: BaseId },

    #[error("{employee} is listed as {listed} but is a {actual}")]
    EmployeeKindMismatch {
        employee: EmployeeId,
        listed: EmployeeKind,
        actual: EmployeeKind,
    },

    #[error("{0} does not exist")]
    UnknownAircraft(AircraftId),

    #[error("{aircraft} is not parked at {base}")]
    AircraftUnavailable { aircraft: AircraftId, base: BaseId },

    #[error("{base} holds {present} {state} {species}, {requested} requested")]
    InsufficientAliens {
        base: BaseId,
        species: SpeciesId,
        state: BodyState,
        present: u32,
        requested: u32,
    },

    #[error(transparent)]
    Containment(#[from] ContainmentError),

    #[error(transparent)]
    Oracle(#[from] OracleError),
}

impl CampaignError for TransferError {
    fn severity(&self) -> ErrorSeverity {
        use TransferError::*;
        match self {
            UnknownBase(_)
            | SameBase(_)
            | UnknownItem(_)
            | UnknownEmployee(_)
            | EmployeeKindMismatch { .. }
            | UnknownAircraft(_) => ErrorSeverity::Validation,

            InsufficientItems { .. }
            | EmployeeUnavailable { .. }
            | AircraftUnavailable { .. }
            | InsufficientAliens { .. } => ErrorSeverity::Recoverable,

            Containment(err) => err.severity(),
            Oracle(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        use TransferError::*;
        match self {
            UnknownBase(_) => "TRANSFER_UNKNOWN_BASE",
            SameBase(_) => "TRANSFER_SAME_BASE",
            UnknownItem(_) => "TRANSFER_UNKNOWN_ITEM",
            InsufficientItems { .. } => "TRANSFER_INSUFFICIENT_ITEMS",
            UnknownEmployee(_) => "TRANSFER_UNKNOWN_EMPLOYEE",
            EmployeeUnavailable { .. } => "TRANSFER_EMPLOYEE_UNAVAILABLE",
            EmployeeKindMismatch { .. } => "TRANSFER_EMPLOYEE_KIND_MISMATCH",
            UnknownAircraft(_) => "TRANSFER_UNKNOWN_AIRCRAFT",
            AircraftUnavailable { .. } => "TRANSFER_AIRCRAFT_UNAVAILABLE",
            InsufficientAliens { .. } => "TRANSFER_INSUFFICIENT_ALIENS",
            Containment(err) => err.error_code(),
            Oracle(err) => err.error_code(),
        }
    }
}
