use super::error::KernelError;
use super::pulse::{DescriptorChoice, PulseDescriptor};

/// Intake fields for one diagnosis run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatientSession {
    pub name: String,
    pub complaint: String,
}

impl PatientSession {
    pub fn new(name: impl Into<String>, complaint: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            complaint: complaint.into(),
        }
    }
}

/// Which intake field the form is asking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntakeField {
    Name,
    Complaint,
}

/// Field presence first, descriptor second. Whitespace-only counts as empty.
/// Returns the concrete descriptor so callers never re-check the choice.
pub fn validate(
    patient: &PatientSession,
    choice: DescriptorChoice,
) -> Result<PulseDescriptor, KernelError> {
    if patient.name.trim().is_empty() || patient.complaint.trim().is_empty() {
        return Err(KernelError::MissingPatientFields);
    }

    choice.descriptor().ok_or(KernelError::MissingDescriptor)
}
