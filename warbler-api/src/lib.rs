//! A barebones client for the warbler backend API.
#![deny(missing_docs)]

mod client;
pub use client::*;

mod track;
pub use track::*;

mod search;
#[allow(unused_imports)]
pub use search::*;

mod user_state;
pub use user_state::*;

mod assistant;
pub use assistant::*;

mod audio;

mod request;
