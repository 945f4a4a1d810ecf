//! Representations of warbler's domain state, converted from the backend's
//! wire types.
//!
//! Separated out to allow for use in other utilities.
#![deny(missing_docs)]

pub use warbler_api as wa;

mod track;
pub use track::{Track, TrackId};

mod snapshot;
pub use snapshot::{DEFAULT_PLAYLIST, Playlists, Snapshot};
