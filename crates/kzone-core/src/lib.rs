//! Core domain types for strikeout pitch-pattern analysis
//!
//! - [`zone`]: the 25-zone plate-location classifier
//! - [`pitch`]: classified pitch records and the situation attributes
//!   (matchup, count) they are bucketed by

pub use self::{pitch::*, zone::*};

pub mod pitch;
pub mod zone;
