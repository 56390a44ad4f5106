use serde::{Deserialize, Serialize};

/// One countdown step. Emitted once per second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Tick {
    pub total_seconds: u32,
    pub remaining_seconds: u32,
}

pub const TICK_MS: u64 = 1_000;

impl Tick {
    /// `MM:SS` of the remaining time.
    pub fn clock(&self) -> String {
        let (mins, secs) = (self.remaining_seconds / 60, self.remaining_seconds % 60);
        format!("{:02}:{:02}", mins, secs)
    }

    /// 0.0 at start, 1.0 on the final tick.
    pub fn progress(&self) -> f32 {
        if self.total_seconds == 0 {
            return 1.0;
        }
        (self.total_seconds - self.remaining_seconds) as f32 / self.total_seconds as f32
    }

    pub fn is_final(&self) -> bool {
        self.remaining_seconds == 0
    }
}
