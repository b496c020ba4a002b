//! HTTP handlers for audio file CRUD.

pub mod audio;
pub use audio::*;
