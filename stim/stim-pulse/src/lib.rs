//! Deterministic pulse-timing schedulers.
//!
//! Independent of the geometry stack: a [`Protocol`] describes a
//! stimulation session, a [`PulseScheduler`] turns elapsed wall time into
//! discrete pulse emissions and inter-train-interval (ITI) state, one
//! `tick(dt)` per frame.
//!
//! Two timing models:
//!
//! - **Standard**: pulses at `frequency` Hz in trains of `pulses_per_train`,
//!   separated by `inter_train_interval_seconds` pauses.
//! - **Theta burst**: 3-pulse bursts at 50 Hz, repeated at 5 Hz.
//!   Intermittent (iTBS) runs 2 s trains with fixed 8 s pauses; continuous
//!   (cTBS) bursts straight through.
//!
//! Schedulers never emit more than `total_pulses` cumulative pulses, can be
//! reset to zero state, and tolerate arbitrarily large tick deltas (callers
//! normally clamp, e.g. to 100 ms, to avoid bulk catch-up after a hitch).
//!
//! # Example
//!
//! ```
//! use stim_pulse::{Protocol, PulseScheduler};
//!
//! let protocol = Protocol::standard(10.0, 40, 11.0, 3000).unwrap();
//! assert!((protocol.session_duration() - 1114.0).abs() < 1e-9);
//!
//! let mut scheduler = PulseScheduler::new(protocol);
//! let pulses = scheduler.tick(0.5); // first 0.5 s of the session
//! assert_eq!(pulses, 5);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod error;
mod protocol;
mod scheduler;
mod standard;
mod theta;

pub use error::ProtocolError;
pub use protocol::{Protocol, StimulationType};
pub use scheduler::{IntervalState, PulseScheduler};
pub use standard::StandardScheduler;
pub use theta::{
    ThetaBurstScheduler, ITBS_BURSTS_PER_TRAIN, ITBS_INTER_TRAIN_INTERVAL, ITBS_PULSES_PER_TRAIN,
    ITBS_TRAIN_DURATION, THETA_BURST_PERIOD, THETA_BURST_RATE, THETA_INTRA_BURST_PERIOD,
    THETA_INTRA_BURST_RATE, THETA_PULSES_PER_BURST,
};
