//! Playback transport: state machine, controller and backend contracts.

mod backend;
mod controller;
pub(crate) mod fsm;
mod progress;

pub use backend::{AudioBackend, BufferInfo, PlaybackHandle, B_FORMAT_CHANNELS, SPECTRUM_BINS};
pub use controller::{TransportController, TransportEvent};
pub use fsm::TransportState;
pub use progress::{format_time, PlaybackProgress};
