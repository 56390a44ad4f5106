use std::collections::{HashMap, VecDeque};

use serde::Serialize;

use super::event::{ExportEventKind, TelemetryEvent, TimerEventKind};
use crate::kernel::error::ErrorKind;
use crate::kernel::pulse::PulseDescriptor;

#[derive(Debug, Clone, Default, Serialize)]
pub struct TelemetrySnapshot {
    pub login_stats: LoginStats,
    pub diagnosis_stats: DiagnosisStats,
    pub timer_stats: TimerStats,
    pub export_stats: ExportStats,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct LoginStats {
    pub attempts: u64,
    pub accepted: u64,
    pub rejected: u64,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct DiagnosisStats {
    pub runs: u64,
    pub by_descriptor: HashMap<PulseDescriptor, u64>,
    pub validation_rejections: u64,
    pub access_rejections: u64,
    pub internal_errors: u64,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct TimerStats {
    pub started: u64,
    pub completed: u64,
    pub cancelled: u64,
    pub total_minutes_requested: u64,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ExportStats {
    pub written: u64,
    pub failed: u64,
}

pub fn compute_snapshot(events: &VecDeque<TelemetryEvent>) -> TelemetrySnapshot {
    let mut snap = TelemetrySnapshot::default();

    for event in events {
        match event {
            TelemetryEvent::LoginAttempt { accepted } => {
                snap.login_stats.attempts += 1;
                if *accepted {
                    snap.login_stats.accepted += 1;
                } else {
                    snap.login_stats.rejected += 1;
                }
            }
            TelemetryEvent::Rejected { kind } => match kind {
                ErrorKind::MissingPatientFields | ErrorKind::MissingDescriptor => {
                    snap.diagnosis_stats.validation_rejections += 1
                }
                ErrorKind::NotAuthenticated => snap.diagnosis_stats.access_rejections += 1,
                ErrorKind::UnknownDescriptor => snap.diagnosis_stats.internal_errors += 1,
                // Counted by LoginAttempt / timer events instead
                ErrorKind::IncorrectSecret | ErrorKind::InvalidTimerDuration => {}
            },
            TelemetryEvent::DiagnosisRun { descriptor } => {
                snap.diagnosis_stats.runs += 1;
                *snap.diagnosis_stats.by_descriptor.entry(*descriptor).or_insert(0) += 1;
            }
            TelemetryEvent::Export(kind) => match kind {
                ExportEventKind::Written => snap.export_stats.written += 1,
                ExportEventKind::Failed => snap.export_stats.failed += 1,
            },
            TelemetryEvent::Timer(kind) => match kind {
                TimerEventKind::Started { minutes } => {
                    snap.timer_stats.started += 1;
                    snap.timer_stats.total_minutes_requested += u64::from(*minutes);
                }
                TimerEventKind::Completed => snap.timer_stats.completed += 1,
                TimerEventKind::Cancelled { .. } => snap.timer_stats.cancelled += 1,
            },
            _ => {}
        }
    }

    snap
}
