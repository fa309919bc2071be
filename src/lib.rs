//! Language detector: type a sentence, see which language it is written in,
//! and hear the language's Arabic name.
//!
//! * [`detect`]: detector trait and the lingua-backed implementation.
//! * [`label`]: language-code → Arabic label table.
//! * [`pipeline`]: request coordination, result presentation, view state.
//! * [`speech`]: speech sinks.
//! * [`config`]: `settings.toml` persistence.
//! * [`app`]: the egui window.

pub mod app;
pub mod config;
pub mod detect;
pub mod label;
pub mod pipeline;
pub mod speech;
