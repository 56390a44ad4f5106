use serde::{Deserialize, Serialize};

use crate::kernel::access::AccessState;
use crate::kernel::error::ErrorKind;
use crate::kernel::pulse::PulseDescriptor;

// Allowed: states, descriptor kinds, error kinds, counts, durations
// Forbidden: patient name, complaint, submitted secrets, report text

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TelemetryEvent {
    LoginAttempt {
        accepted: bool,
    },

    AccessTransition {
        from: AccessState,
        to: AccessState,
    },

    Rejected {
        kind: ErrorKind,
    },

    DiagnosisRun {
        descriptor: PulseDescriptor,
    },

    Export(ExportEventKind),

    Timer(TimerEventKind),

    SessionEnded,

    SessionSummary {
        login_attempts: u64,
        diagnoses: u64,
        timers_completed: u64,
        timers_cancelled: u64,
        exports: u64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExportEventKind {
    Written,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimerEventKind {
    Started { minutes: u32 },
    Completed,
    Cancelled { remaining_seconds: u32 },
}
