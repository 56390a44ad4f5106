use super::pulse::PulseDescriptor;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KernelError {
    #[error("patient name and chief complaint are both required")]
    MissingPatientFields,

    #[error("choose a concrete pulse descriptor first")]
    MissingDescriptor,

    #[error("incorrect access secret")]
    IncorrectSecret,

    #[error("session is not authenticated")]
    NotAuthenticated,

    #[error("timer duration must be between {min} and {max} minutes, got {got}")]
    InvalidTimerDuration { got: u32, min: u32, max: u32 },

    /// The classification table is total over the closed descriptor set.
    /// Reaching this means the table or the engine is broken, not the user input.
    #[error("internal error: no diagnosis record for {0:?}")]
    UnknownDescriptor(PulseDescriptor),
}

impl KernelError {
    /// Internal contract violations must never be shown as a validation prompt.
    pub fn is_internal(&self) -> bool {
        matches!(self, KernelError::UnknownDescriptor(_))
    }
}

/// Kind only, no payload. Safe to record in telemetry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    MissingPatientFields,
    MissingDescriptor,
    IncorrectSecret,
    NotAuthenticated,
    InvalidTimerDuration,
    UnknownDescriptor,
}

impl From<&KernelError> for ErrorKind {
    fn from(err: &KernelError) -> Self {
        match err {
            KernelError::MissingPatientFields => ErrorKind::MissingPatientFields,
            KernelError::MissingDescriptor => ErrorKind::MissingDescriptor,
            KernelError::IncorrectSecret => ErrorKind::IncorrectSecret,
            KernelError::NotAuthenticated => ErrorKind::NotAuthenticated,
            KernelError::InvalidTimerDuration { .. } => ErrorKind::InvalidTimerDuration,
            KernelError::UnknownDescriptor(_) => ErrorKind::UnknownDescriptor,
        }
    }
}
