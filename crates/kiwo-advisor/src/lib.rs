//! kiwo-advisor: Localised grazing advice derived from a plot's GSS.
//!
//! Depends only on the score itself, never on pipeline internals.

pub mod recommendation;

pub use recommendation::{recommend, AdviceTier, Language, UnknownLanguage};
