//! Presentation boundary. Adapters only display what the kernel hands them;
//! input comes back to the kernel as session events through the driver.

pub mod console;
pub mod input;

use std::path::Path;

use crate::kernel::access::AccessState;
use crate::kernel::error::KernelError;
use crate::kernel::intake::IntakeField;
use crate::kernel::pulse::PulseDescriptor;
use crate::kernel::table::DiagnosisRecord;
use crate::kernel::time::Tick;
use crate::outputs::export::ExportError;

pub trait RenderAdapter {
    fn render_login(&mut self, state: AccessState);
    fn render_intake_form(&mut self, field: IntakeField);
    fn render_descriptor_picker(&mut self, options: &[PulseDescriptor]);
    fn render_commands(&mut self);
    fn render_diagnosis(&mut self, descriptor: PulseDescriptor, record: &DiagnosisRecord);
    fn render_timer(&mut self, tick: &Tick);
    fn render_timer_complete(&mut self);
    fn render_timer_cancelled(&mut self);
    fn render_error(&mut self, err: &KernelError);
    fn render_export(&mut self, result: Result<&Path, &ExportError>);
    fn render_notice(&mut self, text: &str);
}
