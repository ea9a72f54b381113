//! Counting utilities for the kzone project.
//!
//! - [`tally`]: ordered occurrence counters with share (relative frequency)
//!   and ranking helpers
//!
//! # Examples
//!
//! ```
//! use kzone_stats::tally::Tally;
//!
//! let mut tally = Tally::new();
//! tally.add("FF-5");
//! tally.add("FF-1");
//! tally.add("FF-1");
//! assert_eq!(tally.most_common()[0], (&"FF-1", 2));
//! ```

pub mod tally;
