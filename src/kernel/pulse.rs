use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The five pulse qualities a practitioner can report.
/// Closed set: the classification table is total over exactly these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PulseDescriptor {
    Wiry,
    Slippery,
    DeepThready,
    Rapid,
    Empty,
}

impl PulseDescriptor {
    /// Menu order.
    pub const ALL: [PulseDescriptor; 5] = [
        PulseDescriptor::Wiry,
        PulseDescriptor::Slippery,
        PulseDescriptor::DeepThready,
        PulseDescriptor::Rapid,
        PulseDescriptor::Empty,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PulseDescriptor::Wiry => "Wiry",
            PulseDescriptor::Slippery => "Slippery",
            PulseDescriptor::DeepThready => "Deep and Thready",
            PulseDescriptor::Rapid => "Rapid",
            PulseDescriptor::Empty => "Empty",
        }
    }

    /// What the pulse feels like under the fingers.
    pub fn feel(&self) -> &'static str {
        match self {
            PulseDescriptor::Wiry => "like pressing on a taut string, tight and forceful",
            PulseDescriptor::Slippery => "like pearls rolling on a plate, round and fluent",
            PulseDescriptor::DeepThready => {
                "absent under light touch, found only with firm pressure, a fine thread"
            }
            PulseDescriptor::Rapid => "beats very fast, hurried",
            PulseDescriptor::Empty => "soft and yielding under pressure, without strength",
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            PulseDescriptor::Wiry => "wiry",
            PulseDescriptor::Slippery => "slippery",
            PulseDescriptor::DeepThready => "deep-thready",
            PulseDescriptor::Rapid => "rapid",
            PulseDescriptor::Empty => "empty",
        }
    }

    /// 1-based position in the picker.
    pub fn menu_index(&self) -> usize {
        Self::ALL
            .iter()
            .position(|d| d == self)
            .map(|i| i + 1)
            .unwrap_or(0)
    }
}

impl fmt::Display for PulseDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.label(), self.feel())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{0}' is not one of the five pulse descriptors")]
pub struct ParseDescriptorError(pub String);

impl FromStr for PulseDescriptor {
    type Err = ParseDescriptorError;

    /// Accepts the key, the label (any case) or the 1-based menu index.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        if let Ok(index) = needle.parse::<usize>() {
            return index
                .checked_sub(1)
                .and_then(|i| Self::ALL.get(i).copied())
                .ok_or_else(|| ParseDescriptorError(needle.to_string()));
        }

        Self::ALL
            .iter()
            .copied()
            .find(|d| {
                d.key().eq_ignore_ascii_case(needle) || d.label().eq_ignore_ascii_case(needle)
            })
            .ok_or_else(|| ParseDescriptorError(needle.to_string()))
    }
}

/// The picker's value. `Placeholder` is the "please choose" entry shown before
/// the practitioner commits to a concrete descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DescriptorChoice {
    #[default]
    Placeholder,
    Chosen(PulseDescriptor),
}

impl DescriptorChoice {
    pub fn descriptor(&self) -> Option<PulseDescriptor> {
        match self {
            DescriptorChoice::Placeholder => None,
            DescriptorChoice::Chosen(d) => Some(*d),
        }
    }
}

impl From<PulseDescriptor> for DescriptorChoice {
    fn from(descriptor: PulseDescriptor) -> Self {
        DescriptorChoice::Chosen(descriptor)
    }
}
