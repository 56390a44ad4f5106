use super::access::AccessState;
use super::error::KernelError;
use super::intake::{self, PatientSession};
use super::pulse::{DescriptorChoice, PulseDescriptor};
use super::table::{ClassificationTable, DiagnosisRecord, RecordSource};

/// A successful lookup, with the descriptor it was resolved for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnosis<'a> {
    pub descriptor: PulseDescriptor,
    pub record: &'a DiagnosisRecord,
}

/// Access check -> intake validation -> table lookup.
/// Each stage short-circuits; the source is only touched when all checks pass.
pub struct DiagnosisEngine<S = ClassificationTable> {
    source: S,
}

impl<S: RecordSource> DiagnosisEngine<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// PURE FUNCTION: no state is mutated on any path.
    pub fn diagnose(
        &self,
        access: AccessState,
        patient: &PatientSession,
        choice: DescriptorChoice,
    ) -> Result<Diagnosis<'_>, KernelError> {
        if !access.is_authenticated() {
            return Err(KernelError::NotAuthenticated);
        }

        let descriptor = intake::validate(patient, choice)?;
        let record = self.source.lookup(descriptor)?;

        Ok(Diagnosis { descriptor, record })
    }
}

impl Default for DiagnosisEngine<ClassificationTable> {
    fn default() -> Self {
        Self::new(ClassificationTable::new())
    }
}
