//! The warbler playback engine: playback position, autoplay prediction,
//! queue mutation, and user-state persistence over an asynchronous,
//! partially-failing backend.

pub use warbler_state;
pub use warbler_api as wa;

mod app_state;
pub use app_state::AppState;

mod history;
pub use history::History;

mod collections;
pub use collections::{AddOutcome, LikedSongs, PlaylistSet};

mod events;
pub use events::{Event, HomeSection};

mod logic;
pub use logic::{Logic, LogicArgs, PlayingInfo};

mod assistant;
mod discover;
mod persist;
mod playback;
mod predictor;

mod transport;
pub use transport::TransportState;

mod tokio_thread;
