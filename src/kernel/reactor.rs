use std::ops::ControlFlow;
use std::path::PathBuf;

use chrono::Local;
use tokio::io::{AsyncBufRead, Lines};
use tokio::sync::mpsc;
use tracing::{info, warn};

use super::cancel::TimerRegistry;
use super::intake::IntakeField;
use super::session::{SessionContext, SessionEvent, SessionKernel, SideEffect};
use super::table::{ClassificationTable, RecordSource};
use super::telemetry::event::{ExportEventKind, TelemetryEvent, TimerEventKind};
use super::telemetry::recorder::TelemetryRecorder;
use super::time::Tick;
use super::timer::{CountdownTimer, TimerEvent};
use crate::kernel::pulse::PulseDescriptor;
use crate::outputs::export;
use crate::render::input::{self, Input, Prompt};
use crate::render::RenderAdapter;

#[derive(Debug, Clone)]
pub struct ReactorConfig {
    pub export_dir: PathBuf,
    pub default_timer_minutes: u32,
}

/// Drives one session: console lines and countdown ticks in, renders and
/// file writes out. All state transitions go through `SessionKernel::step`.
pub struct Reactor<A: RenderAdapter, S: RecordSource = ClassificationTable> {
    kernel: SessionKernel<S>,
    pub state: SessionContext,
    pub timers: TimerRegistry,
    pub telemetry: TelemetryRecorder,
    pub prompt: Prompt,
    adapter: A,
    config: ReactorConfig,
    timer_rx: Option<mpsc::Receiver<TimerEvent>>,
    last_tick: Option<Tick>,
}

impl<A: RenderAdapter, S: RecordSource> Reactor<A, S> {
    pub fn new(kernel: SessionKernel<S>, adapter: A, config: ReactorConfig) -> Self {
        Self {
            kernel,
            state: SessionContext::new(),
            timers: TimerRegistry::new(),
            telemetry: TelemetryRecorder::new(),
            prompt: Prompt::Secret,
            adapter,
            config,
            timer_rx: None,
            last_tick: None,
        }
    }

    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    pub fn into_adapter(self) -> A {
        self.adapter
    }

    pub fn timer_running(&self) -> bool {
        self.timers.is_active()
    }

    pub fn start(&mut self) {
        self.prompt = Prompt::Secret;
        self.adapter.render_login(self.state.access);
    }

    /// Applies one event. Telemetry effects are recorded here, the rest returned.
    pub fn dispatch(&mut self, event: SessionEvent) -> Vec<SideEffect> {
        let state = std::mem::take(&mut self.state);
        let (next, effects) = self.kernel.step(state, event);
        self.state = next;

        let mut remaining = Vec::with_capacity(effects.len());
        for effect in effects {
            match effect {
                SideEffect::Telemetry(event) => self.telemetry.record(event),
                other => remaining.push(other),
            }
        }
        remaining
    }

    pub async fn execute(&mut self, effects: Vec<SideEffect>) {
        for effect in effects {
            match effect {
                SideEffect::ShowLogin(state) => {
                    if !state.is_authenticated() {
                        self.prompt = Prompt::Secret;
                    }
                    self.adapter.render_login(state);
                }
                SideEffect::ShowIntakeForm(field) => {
                    self.prompt = match field {
                        IntakeField::Name => Prompt::Name,
                        IntakeField::Complaint => Prompt::Complaint,
                    };
                    self.adapter.render_intake_form(field);
                }
                SideEffect::ShowDescriptorPicker(options) => {
                    self.prompt = Prompt::Descriptor;
                    self.adapter.render_descriptor_picker(&options);
                }
                SideEffect::ShowCommands => {
                    self.prompt = Prompt::Command;
                    self.adapter.render_commands();
                }
                SideEffect::ShowDiagnosis(descriptor) => {
                    match self.kernel.engine().source().lookup(descriptor) {
                        Ok(record) => self.adapter.render_diagnosis(descriptor, record),
                        Err(err) => self.adapter.render_error(&err),
                    }
                }
                SideEffect::ShowError(err) => self.adapter.render_error(&err),
                SideEffect::Export(artifact) => {
                    let result = export::write_artifact(&self.config.export_dir, &artifact).await;
                    let kind = match &result {
                        Ok(_) => ExportEventKind::Written,
                        Err(e) => {
                            warn!("Export failed: {}", e);
                            ExportEventKind::Failed
                        }
                    };
                    self.telemetry.record(TelemetryEvent::Export(kind));
                    self.adapter.render_export(result.as_deref());
                }
                SideEffect::StartTimer { minutes } => self.start_timer(minutes),
                SideEffect::CancelTimer => self.cancel_timer(),
                SideEffect::Telemetry(event) => self.telemetry.record(event),
            }
        }
    }

    fn start_timer(&mut self, minutes: u32) {
        let timer = match CountdownTimer::new(minutes) {
            Ok(timer) => timer,
            Err(err) => {
                self.adapter.render_error(&err);
                return;
            }
        };

        // One countdown per session: a new one replaces the old.
        self.cancel_timer();

        // Until the first tick arrives the whole countdown is still ahead.
        let state = timer.state();
        self.last_tick = Some(Tick {
            total_seconds: state.total_seconds,
            remaining_seconds: state.remaining_seconds,
        });

        let token = self.timers.arm();
        // Ticks and completion arrive on the channel, the task's outcome is not needed.
        let (rx, _handle) = timer.spawn(token);
        self.timer_rx = Some(rx);
    }

    fn cancel_timer(&mut self) {
        if !self.timers.cancel_active() {
            return;
        }
        let remaining_seconds = self.last_tick.map(|t| t.remaining_seconds).unwrap_or(0);
        self.telemetry
            .record(TelemetryEvent::Timer(TimerEventKind::Cancelled { remaining_seconds }));
        // Ticks already queued belong to the cancelled run.
        self.timer_rx = None;
        self.last_tick = None;
        self.adapter.render_timer_cancelled();
    }

    pub fn handle_timer_event(&mut self, event: TimerEvent) {
        match event {
            TimerEvent::Tick(tick) => {
                self.last_tick = Some(tick);
                self.adapter.render_timer(&tick);
            }
            TimerEvent::Complete => {
                self.timers.disarm();
                self.timer_rx = None;
                self.last_tick = None;
                self.telemetry.record(TelemetryEvent::Timer(TimerEventKind::Completed));
                self.adapter.render_timer_complete();
            }
        }
    }

    /// Next event of the attached countdown, or None when none is attached
    /// or it has finished.
    pub async fn poll_timer(&mut self) -> Option<TimerEvent> {
        let event = self.timer_rx.as_mut()?.recv().await;
        if event.is_none() {
            self.timer_rx = None;
        }
        event
    }

    pub async fn handle_line(&mut self, line: &str) -> ControlFlow<()> {
        let now = Local::now().naive_local();

        match input::parse_line(self.prompt, line, now, self.config.default_timer_minutes) {
            Input::Event(event) => {
                let effects = self.dispatch(event);
                self.execute(effects).await;
            }
            Input::Reprompt(prompt) => {
                self.prompt = prompt;
                match prompt {
                    Prompt::Name => self.adapter.render_intake_form(IntakeField::Name),
                    Prompt::Complaint => self.adapter.render_intake_form(IntakeField::Complaint),
                    Prompt::Edit(field) => self.adapter.render_intake_form(field),
                    Prompt::Descriptor => {
                        self.adapter.render_descriptor_picker(&PulseDescriptor::ALL)
                    }
                    Prompt::Secret => self.adapter.render_login(self.state.access),
                    Prompt::Command => self.adapter.render_commands(),
                }
            }
            Input::Help => self.adapter.render_commands(),
            Input::Quit => return ControlFlow::Break(()),
            Input::Unrecognized(text) => {
                self.adapter.render_notice(&format!("Unrecognized input: {}", text));
                if self.prompt == Prompt::Descriptor {
                    self.adapter.render_descriptor_picker(&PulseDescriptor::ALL);
                }
            }
        }

        ControlFlow::Continue(())
    }

    /// Async Driver Loop. Returns when input ends or the user quits.
    pub async fn run<R>(&mut self, mut lines: Lines<R>)
    where
        R: AsyncBufRead + Unpin,
    {
        info!(session = %self.state.id, "Session loop started");
        self.start();

        loop {
            tokio::select! {
                line = lines.next_line() => match line {
                    Ok(Some(line)) => {
                        if self.handle_line(&line).await.is_break() {
                            break;
                        }
                    }
                    Ok(None) => break,
                    Err(e) => {
                        warn!("Input read failed: {}", e);
                        break;
                    }
                },
                event = next_timer_event(&mut self.timer_rx) => match event {
                    Some(event) => self.handle_timer_event(event),
                    None => self.timer_rx = None,
                },
            }
        }
    }

    /// Stops any countdown and folds the session's telemetry into one summary.
    pub fn shutdown(&mut self) -> TelemetryEvent {
        if self.timers.is_active() {
            self.cancel_timer();
        }
        self.timers.shutdown();
        let summary = self.telemetry.aggregate_session();
        self.telemetry.record(summary.clone());
        summary
    }
}

async fn next_timer_event(rx: &mut Option<mpsc::Receiver<TimerEvent>>) -> Option<TimerEvent> {
    match rx {
        Some(rx) => rx.recv().await,
        None => std::future::pending().await,
    }
}
