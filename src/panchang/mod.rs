//! Panchang computation.
//!
//! Orchestrates one calculation per quantity (tithi, nakshatra, yoga, karan,
//! rahu kaal, gulika kaal, abhijit) and collects the outcomes, successes and
//! per-quantity failures alike, into a single [`PanchangResult`].

mod assemble;
mod types;

pub use assemble::PanchangAssembler;
pub use types::{Diagnostics, LabelStyle, PanchangRequest, PanchangResult, Probe, Quantity};
