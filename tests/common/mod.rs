#![allow(dead_code)]

use std::cell::Cell;
use std::path::Path;

use malikay::kernel::access::{AccessState, SharedSecretVerifier};
use malikay::kernel::error::KernelError;
use malikay::kernel::intake::IntakeField;
use malikay::kernel::pulse::PulseDescriptor;
use malikay::kernel::session::SessionKernel;
use malikay::kernel::table::{ClassificationTable, DiagnosisRecord, RecordSource};
use malikay::kernel::time::Tick;
use malikay::outputs::export::ExportError;
use malikay::render::RenderAdapter;

pub const SECRET: &str = "1234";

/// Table wrapper that counts how often it is consulted.
pub struct CountingSource {
    inner: ClassificationTable,
    pub hits: Cell<usize>,
}

impl CountingSource {
    pub fn new() -> Self {
        Self {
            inner: ClassificationTable::new(),
            hits: Cell::new(0),
        }
    }
}

impl RecordSource for CountingSource {
    fn lookup(&self, descriptor: PulseDescriptor) -> Result<&DiagnosisRecord, KernelError> {
        self.hits.set(self.hits.get() + 1);
        self.inner.lookup(descriptor)
    }
}

/// A source that lost an entry: simulates a broken table.
pub struct BrokenSource;

impl RecordSource for BrokenSource {
    fn lookup(&self, descriptor: PulseDescriptor) -> Result<&DiagnosisRecord, KernelError> {
        Err(KernelError::UnknownDescriptor(descriptor))
    }
}

pub fn kernel() -> SessionKernel {
    SessionKernel::new(
        Box::new(SharedSecretVerifier::new(SECRET)),
        ClassificationTable::new(),
        "Malikay",
    )
}

#[derive(Debug, Clone, PartialEq)]
pub enum Rendered {
    Login(AccessState),
    IntakeForm(IntakeField),
    Picker(usize),
    Commands,
    Diagnosis(PulseDescriptor),
    Timer(Tick),
    TimerComplete,
    TimerCancelled,
    Error(KernelError),
    Exported(String),
    ExportFailed,
    Notice(String),
}

#[derive(Debug, Default)]
pub struct RecordingAdapter {
    pub calls: Vec<Rendered>,
}

impl RecordingAdapter {
    pub fn count(&self, pred: impl Fn(&Rendered) -> bool) -> usize {
        self.calls.iter().filter(|c| pred(c)).count()
    }
}

impl RenderAdapter for RecordingAdapter {
    fn render_login(&mut self, state: AccessState) {
        self.calls.push(Rendered::Login(state));
    }
    fn render_intake_form(&mut self, field: IntakeField) {
        self.calls.push(Rendered::IntakeForm(field));
    }
    fn render_descriptor_picker(&mut self, options: &[PulseDescriptor]) {
        self.calls.push(Rendered::Picker(options.len()));
    }
    fn render_commands(&mut self) {
        self.calls.push(Rendered::Commands);
    }
    fn render_diagnosis(&mut self, descriptor: PulseDescriptor, _record: &DiagnosisRecord) {
        self.calls.push(Rendered::Diagnosis(descriptor));
    }
    fn render_timer(&mut self, tick: &Tick) {
        self.calls.push(Rendered::Timer(*tick));
    }
    fn render_timer_complete(&mut self) {
        self.calls.push(Rendered::TimerComplete);
    }
    fn render_timer_cancelled(&mut self) {
        self.calls.push(Rendered::TimerCancelled);
    }
    fn render_error(&mut self, err: &KernelError) {
        self.calls.push(Rendered::Error(err.clone()));
    }
    fn render_export(&mut self, result: Result<&Path, &ExportError>) {
        match result {
            Ok(path) => self.calls.push(Rendered::Exported(
                path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default(),
            )),
            Err(_) => self.calls.push(Rendered::ExportFailed),
        }
    }
    fn render_notice(&mut self, text: &str) {
        self.calls.push(Rendered::Notice(text.to_string()));
    }
}
