//! Transport state machine.

use serde::{Deserialize, Serialize};

/// Playback state of the transport. Exactly one holds at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TransportState {
    #[default]
    Stopped,
    Playing,
    Paused,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TransportCommand {
    Play,
    Pause,
    Stop,
    BufferEnded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TransitionResult {
    None,
    StateChanged {
        from: TransportState,
        to: TransportState,
    },
}

#[derive(Debug, Default)]
pub(crate) struct TransportFsm {
    state: TransportState,
}

impl TransportFsm {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn state(&self) -> TransportState {
        self.state
    }

    pub fn transition(&mut self, command: TransportCommand) -> TransitionResult {
        use TransportCommand::*;
        use TransportState::*;

        let next = match (command, self.state) {
            (Play, Stopped | Paused) => Playing,
            (Pause, Playing) => Paused,
            (Stop, Playing | Paused) => Stopped,
            (BufferEnded, Playing) => Stopped,
            _ => return TransitionResult::None,
        };

        let from = self.state;
        self.state = next;
        TransitionResult::StateChanged { from, to: next }
    }
}
