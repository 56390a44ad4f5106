use chrono::NaiveDateTime;

use crate::kernel::intake::IntakeField;
use crate::kernel::pulse::{DescriptorChoice, PulseDescriptor};
use crate::kernel::session::SessionEvent;

/// What the next console line answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Prompt {
    #[default]
    Secret,
    Name,
    Complaint,
    Descriptor,
    Command,
    /// Single-field correction from the command prompt.
    Edit(IntakeField),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Event(SessionEvent),
    /// Switch prompts without touching session state.
    Reprompt(Prompt),
    Help,
    Quit,
    Unrecognized(String),
}

/// Maps one line to an input, given the prompt it answers.
/// `now` stamps export requests; `default_minutes` fills a bare `timer`.
pub fn parse_line(prompt: Prompt, line: &str, now: NaiveDateTime, default_minutes: u32) -> Input {
    let trimmed = line.trim();

    match prompt {
        Prompt::Secret => Input::Event(SessionEvent::SecretSubmitted(trimmed.to_string())),
        Prompt::Name => Input::Event(SessionEvent::NameEntered(trimmed.to_string())),
        Prompt::Complaint => Input::Event(SessionEvent::ComplaintEntered(trimmed.to_string())),
        Prompt::Edit(field) => Input::Event(SessionEvent::FieldEdited {
            field,
            value: trimmed.to_string(),
        }),
        Prompt::Descriptor => {
            if trimmed.is_empty() || trimmed == "0" {
                return Input::Event(SessionEvent::DescriptorChosen(DescriptorChoice::Placeholder));
            }
            match trimmed.parse::<PulseDescriptor>() {
                Ok(d) => Input::Event(SessionEvent::DescriptorChosen(DescriptorChoice::Chosen(d))),
                Err(_) => Input::Unrecognized(trimmed.to_string()),
            }
        }
        Prompt::Command => parse_command(trimmed, now, default_minutes),
    }
}

fn parse_command(line: &str, now: NaiveDateTime, default_minutes: u32) -> Input {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Input::Help;
    };

    match head.to_ascii_lowercase().as_str() {
        "diagnose" | "d" => Input::Event(SessionEvent::DiagnosisRequested),
        "export" | "e" => Input::Event(SessionEvent::ExportRequested { timestamp: now }),
        "timer" | "t" => match words.next() {
            None => Input::Event(SessionEvent::TimerRequested { minutes: default_minutes }),
            Some(arg) => match arg.parse::<u32>() {
                Ok(minutes) => Input::Event(SessionEvent::TimerRequested { minutes }),
                Err(_) => Input::Unrecognized(line.to_string()),
            },
        },
        "cancel" | "c" => Input::Event(SessionEvent::TimerCancelRequested),
        "name" => Input::Reprompt(Prompt::Edit(IntakeField::Name)),
        "complaint" => Input::Reprompt(Prompt::Edit(IntakeField::Complaint)),
        "pulse" => Input::Reprompt(Prompt::Descriptor),
        "new" => Input::Event(SessionEvent::IntakeReset),
        "logout" => Input::Event(SessionEvent::SessionEnded),
        "help" | "?" => Input::Help,
        "quit" | "exit" | "q" => Input::Quit,
        _ => Input::Unrecognized(line.to_string()),
    }
}
