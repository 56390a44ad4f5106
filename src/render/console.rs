use std::io::Write;
use std::path::Path;

use tracing::warn;

use super::RenderAdapter;
use crate::kernel::access::AccessState;
use crate::kernel::error::KernelError;
use crate::kernel::intake::IntakeField;
use crate::kernel::pulse::PulseDescriptor;
use crate::kernel::table::DiagnosisRecord;
use crate::kernel::time::Tick;
use crate::outputs::export::ExportError;

const BAR_WIDTH: usize = 30;

/// Line-oriented terminal adapter.
pub struct ConsoleAdapter<W: Write> {
    out: W,
    brand: String,
    /// A countdown line is on screen without a trailing newline.
    timer_line_open: bool,
}

impl<W: Write> ConsoleAdapter<W> {
    pub fn new(out: W, brand: impl Into<String>) -> Self {
        Self {
            out,
            brand: brand.into(),
            timer_line_open: false,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, text: &str) {
        if self.timer_line_open {
            self.timer_line_open = false;
            let _ = writeln!(self.out);
        }
        if let Err(e) = writeln!(self.out, "{}", text).and_then(|_| self.out.flush()) {
            warn!("Console write failed: {}", e);
        }
    }
}

impl<W: Write> RenderAdapter for ConsoleAdapter<W> {
    fn render_login(&mut self, state: AccessState) {
        let title = format!("{} member entrance", self.brand);
        match state {
            AccessState::Authenticated => self.emit("Signed in."),
            AccessState::Unauthenticated | AccessState::Rejected => {
                self.emit(&title);
                self.emit("Enter the access secret (ask the association for it):");
            }
        }
    }

    fn render_intake_form(&mut self, field: IntakeField) {
        match field {
            IntakeField::Name => {
                self.emit("Step 1: patient record (required)");
                self.emit("Patient name:");
            }
            IntakeField::Complaint => self.emit("Chief complaint:"),
        }
    }

    fn render_descriptor_picker(&mut self, options: &[PulseDescriptor]) {
        self.emit("Step 2: pulse input. Pick the closest match to what you feel:");
        self.emit("  0. Please choose...");
        for option in options {
            self.emit(&format!("  {}. {}", option.menu_index(), option));
        }
    }

    fn render_commands(&mut self) {
        self.emit("Commands: diagnose | export | timer [minutes] | cancel");
        self.emit("          name | complaint | pulse | new | logout | help | quit");
    }

    fn render_diagnosis(&mut self, descriptor: PulseDescriptor, record: &DiagnosisRecord) {
        self.emit("");
        self.emit(&format!("Diagnosis for {} pulse", descriptor.label()));
        self.emit(&format!("  [System state] {}", record.pattern));
        self.emit(&format!("  [Strategy]     {}", record.strategy));
        self.emit("Step 3: acupoint intervention");
        for point in &record.acupoints {
            self.emit(&format!("  * {}", point.name));
            self.emit(&format!("      Location: {}", point.location));
            self.emit(&format!("      Method:   {}", point.method));
        }
    }

    fn render_timer(&mut self, tick: &Tick) {
        let filled = (tick.progress() * BAR_WIDTH as f32).round() as usize;
        let bar = format!("{}{}", "#".repeat(filled), ".".repeat(BAR_WIDTH.saturating_sub(filled)));
        let written = write!(self.out, "\r[{}] {}", bar, tick.clock()).and_then(|_| self.out.flush());
        if let Err(e) = written {
            warn!("Console write failed: {}", e);
        }
        self.timer_line_open = true;
    }

    fn render_timer_complete(&mut self) {
        self.emit("Session finished!");
    }

    fn render_timer_cancelled(&mut self) {
        self.emit("Timer cancelled.");
    }

    fn render_error(&mut self, err: &KernelError) {
        if err.is_internal() {
            self.emit(&format!("Internal error, please report it: {}", err));
            return;
        }
        let text = match err {
            KernelError::MissingPatientFields => {
                "Cannot run: go back to step 1 and fill in the patient name and chief complaint."
                    .to_string()
            }
            KernelError::MissingDescriptor => {
                "Cannot run: choose a concrete pulse in step 2.".to_string()
            }
            KernelError::IncorrectSecret => "Incorrect secret.".to_string(),
            KernelError::NotAuthenticated => "Sign in first.".to_string(),
            other => other.to_string(),
        };
        self.emit(&text);
    }

    fn render_export(&mut self, result: Result<&Path, &ExportError>) {
        match result {
            Ok(path) => self.emit(&format!("Record saved to {}", path.display())),
            Err(_) => self.emit("Saving the record failed. The diagnosis above is unchanged."),
        }
    }

    fn render_notice(&mut self, text: &str) {
        self.emit(text);
    }
}
