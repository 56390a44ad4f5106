use chrono::NaiveDateTime;
use tracing::{error, info, warn};
use uuid::Uuid;

use super::access::{self, AccessGraph, AccessRequest, AccessState, CredentialVerifier};
use super::diagnosis::DiagnosisEngine;
use super::error::{ErrorKind, KernelError};
use super::intake::{IntakeField, PatientSession};
use super::pulse::{DescriptorChoice, PulseDescriptor};
use super::report::{self, ReportArtifact};
use super::table::{ClassificationTable, RecordSource};
use super::telemetry::event::{TelemetryEvent, TimerEventKind};
use super::timer::TimerState;

/// Snapshot of the last successful diagnosis, kept so a later export
/// reports exactly what was shown even if the form was edited since.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosedRun {
    pub patient: PatientSession,
    pub descriptor: PulseDescriptor,
}

/// Everything one interactive session owns. Created per session, never shared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    pub id: Uuid,
    pub access: AccessState,
    pub patient: PatientSession,
    pub choice: DescriptorChoice,
    pub last_run: Option<DiagnosedRun>,
    /// Monotonic, bumps on every applied event.
    pub version: u64,
}

impl SessionContext {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            access: AccessState::default(),
            patient: PatientSession::default(),
            choice: DescriptorChoice::default(),
            last_run: None,
            version: 0,
        }
    }
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    SecretSubmitted(String),
    NameEntered(String),
    ComplaintEntered(String),
    /// Corrects one field outside the intake walk. Leaves the other field alone.
    FieldEdited { field: IntakeField, value: String },
    DescriptorChosen(DescriptorChoice),
    DiagnosisRequested,
    ExportRequested { timestamp: NaiveDateTime },
    TimerRequested { minutes: u32 },
    TimerCancelRequested,
    /// New patient, same practitioner: clears intake, keeps access.
    IntakeReset,
    SessionEnded,
}

/// What the driver must do after a transition. The reducer never performs these.
#[derive(Debug, Clone, PartialEq)]
pub enum SideEffect {
    ShowLogin(AccessState),
    ShowIntakeForm(IntakeField),
    ShowDescriptorPicker(Vec<PulseDescriptor>),
    ShowCommands,
    ShowDiagnosis(PulseDescriptor),
    ShowError(KernelError),
    Export(ReportArtifact),
    StartTimer { minutes: u32 },
    CancelTimer,
    Telemetry(TelemetryEvent),
}

/// Fixed collaborators of the reducer.
pub struct SessionKernel<S = ClassificationTable> {
    verifier: Box<dyn CredentialVerifier>,
    engine: DiagnosisEngine<S>,
    brand: String,
}

impl<S: RecordSource> SessionKernel<S> {
    pub fn new(verifier: Box<dyn CredentialVerifier>, source: S, brand: impl Into<String>) -> Self {
        Self {
            verifier,
            engine: DiagnosisEngine::new(source),
            brand: brand.into(),
        }
    }

    pub fn engine(&self) -> &DiagnosisEngine<S> {
        &self.engine
    }

    pub fn brand(&self) -> &str {
        &self.brand
    }

    /// Pure transition: (State, Event) -> (New State, Effects)
    pub fn step(
        &self,
        state: SessionContext,
        event: SessionEvent,
    ) -> (SessionContext, Vec<SideEffect>) {
        let mut next = state;
        next.version += 1;
        let mut effects = Vec::new();

        // Gate: only login and session end are reachable before authentication.
        let gated = !matches!(event, SessionEvent::SecretSubmitted(_) | SessionEvent::SessionEnded);
        if gated && !next.access.is_authenticated() {
            warn!(session = %next.id, "Rejected action on unauthenticated session");
            reject(&mut effects, KernelError::NotAuthenticated);
            effects.push(SideEffect::ShowLogin(next.access));
            return (next, effects);
        }

        match event {
            SessionEvent::SecretSubmitted(secret) => {
                let from = next.access;
                let to = access::submit_secret(from, self.verifier.as_ref(), &secret);

                if from.is_authenticated() {
                    // Nothing to do, already in.
                    effects.push(SideEffect::ShowCommands);
                    return (next, effects);
                }

                let accepted = to.is_authenticated();
                effects.push(SideEffect::Telemetry(TelemetryEvent::LoginAttempt { accepted }));
                if from != to {
                    info!(session = %next.id, ?from, ?to, "Access transition");
                    let transition = TelemetryEvent::AccessTransition { from, to };
                    effects.push(SideEffect::Telemetry(transition));
                }
                next.access = to;

                if accepted {
                    effects.push(SideEffect::ShowIntakeForm(IntakeField::Name));
                } else {
                    effects.push(SideEffect::ShowError(KernelError::IncorrectSecret));
                    effects.push(SideEffect::ShowLogin(to));
                }
            }
            SessionEvent::NameEntered(name) => {
                next.patient.name = name;
                effects.push(SideEffect::ShowIntakeForm(IntakeField::Complaint));
            }
            SessionEvent::ComplaintEntered(complaint) => {
                next.patient.complaint = complaint;
                effects.push(SideEffect::ShowDescriptorPicker(PulseDescriptor::ALL.to_vec()));
            }
            SessionEvent::FieldEdited { field, value } => {
                match field {
                    IntakeField::Name => next.patient.name = value,
                    IntakeField::Complaint => next.patient.complaint = value,
                }
                effects.push(SideEffect::ShowCommands);
            }
            SessionEvent::DescriptorChosen(choice) => {
                next.choice = choice;
                effects.push(SideEffect::ShowCommands);
            }
            SessionEvent::DiagnosisRequested => {
                match self.engine.diagnose(next.access, &next.patient, next.choice) {
                    Ok(diagnosis) => {
                        info!(
                            session = %next.id,
                            descriptor = ?diagnosis.descriptor,
                            "Diagnosis produced"
                        );
                        next.last_run = Some(DiagnosedRun {
                            patient: next.patient.clone(),
                            descriptor: diagnosis.descriptor,
                        });
                        effects.push(SideEffect::Telemetry(TelemetryEvent::DiagnosisRun {
                            descriptor: diagnosis.descriptor,
                        }));
                        effects.push(SideEffect::ShowDiagnosis(diagnosis.descriptor));
                    }
                    Err(err) => reject(&mut effects, err),
                }
            }
            SessionEvent::ExportRequested { timestamp } => {
                // Export what was last shown; with nothing shown yet, diagnose now.
                let run = match next.last_run.clone() {
                    Some(run) => Ok(run),
                    None => self
                        .engine
                        .diagnose(next.access, &next.patient, next.choice)
                        .map(|d| DiagnosedRun {
                            patient: next.patient.clone(),
                            descriptor: d.descriptor,
                        }),
                };

                match run.and_then(|run| {
                    let record = self.engine.source().lookup(run.descriptor)?;
                    Ok(report::build_artifact(
                        &self.brand,
                        &run.patient,
                        run.descriptor,
                        record,
                        timestamp,
                    ))
                }) {
                    Ok(artifact) => effects.push(SideEffect::Export(artifact)),
                    Err(err) => reject(&mut effects, err),
                }
            }
            SessionEvent::TimerRequested { minutes } => match TimerState::start(minutes) {
                Ok(_) => {
                    let started = TimerEventKind::Started { minutes };
                    effects.push(SideEffect::Telemetry(TelemetryEvent::Timer(started)));
                    effects.push(SideEffect::StartTimer { minutes });
                }
                Err(err) => reject(&mut effects, err),
            },
            SessionEvent::TimerCancelRequested => {
                effects.push(SideEffect::CancelTimer);
            }
            SessionEvent::IntakeReset => {
                next.patient = PatientSession::default();
                next.choice = DescriptorChoice::Placeholder;
                next.last_run = None;
                effects.push(SideEffect::ShowIntakeForm(IntakeField::Name));
            }
            SessionEvent::SessionEnded => {
                let access = AccessGraph::transition(next.access, AccessRequest::SessionEnd)
                    .unwrap_or(AccessState::Unauthenticated);
                info!(session = %next.id, "Session ended");

                next = SessionContext {
                    access,
                    version: next.version,
                    ..SessionContext::new()
                };
                effects.push(SideEffect::CancelTimer);
                effects.push(SideEffect::Telemetry(TelemetryEvent::SessionEnded));
                effects.push(SideEffect::ShowLogin(access));
            }
        }

        (next, effects)
    }
}

fn reject(effects: &mut Vec<SideEffect>, err: KernelError) {
    if err.is_internal() {
        error!(%err, "Internal contract violation");
    }
    effects.push(SideEffect::Telemetry(TelemetryEvent::Rejected {
        kind: ErrorKind::from(&err),
    }));
    effects.push(SideEffect::ShowError(err));
}
