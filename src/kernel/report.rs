use chrono::NaiveDateTime;

use super::intake::PatientSession;
use super::pulse::PulseDescriptor;
use super::table::DiagnosisRecord;

pub const REPORT_MIME: &str = "text/plain";

const HEAVY_RULE: &str = "========================================";
const LIGHT_RULE: &str = "----------------------------------------";

/// A report ready to be handed to whatever saves or downloads it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportArtifact {
    pub filename: String,
    pub mime: &'static str,
    pub bytes: Vec<u8>,
}

/// PURE FUNCTION: same inputs, same text.
/// Free-text fields are written verbatim, nothing is escaped.
pub fn format(
    brand: &str,
    patient: &PatientSession,
    descriptor: PulseDescriptor,
    record: &DiagnosisRecord,
    timestamp: NaiveDateTime,
) -> String {
    let mut out = String::new();

    out.push_str(HEAVY_RULE);
    out.push('\n');
    out.push_str(&format!("{} Studio - Session Record\n", brand));
    out.push_str(&format!("Time: {}\n", timestamp.format("%Y-%m-%d %H:%M:%S")));

    out.push_str(&format!("Patient: {}\n", patient.name));
    out.push_str(&format!("Complaint: {}\n", patient.complaint));

    out.push_str(LIGHT_RULE);
    out.push('\n');
    out.push_str("[Diagnosis]\n");
    out.push_str(&format!("Pulse: {}\n", descriptor));
    out.push_str(&format!("Pattern: {}\n", record.pattern));
    out.push_str(&format!("Strategy: {}\n", record.strategy));

    out.push_str(LIGHT_RULE);
    out.push('\n');
    out.push_str("[Acupoints]\n");
    for (i, point) in record.acupoints.iter().enumerate() {
        out.push_str(&format!("{}. {}\n", i + 1, point.name));
        out.push_str(&format!("   Location: {}\n", point.location));
        out.push_str(&format!("   Method: {}\n", point.method));
    }

    out.push_str(HEAVY_RULE);
    out.push('\n');
    out
}

/// `<brand>_<patient-name>_<ISO-date>.txt`. The name is used as typed.
pub fn filename(brand: &str, patient: &PatientSession, timestamp: NaiveDateTime) -> String {
    format!("{}_{}_{}.txt", brand, patient.name, timestamp.format("%Y-%m-%d"))
}

pub fn build_artifact(
    brand: &str,
    patient: &PatientSession,
    descriptor: PulseDescriptor,
    record: &DiagnosisRecord,
    timestamp: NaiveDateTime,
) -> ReportArtifact {
    ReportArtifact {
        filename: filename(brand, patient, timestamp),
        mime: REPORT_MIME,
        bytes: format(brand, patient, descriptor, record, timestamp).into_bytes(),
    }
}
