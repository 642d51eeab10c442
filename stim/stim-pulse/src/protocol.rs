//! Stimulation protocol parameters and derived metrics.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::ProtocolError;
use crate::theta::{
    ITBS_INTER_TRAIN_INTERVAL, ITBS_PULSES_PER_TRAIN, ITBS_TRAIN_DURATION, THETA_BURST_PERIOD,
    THETA_INTRA_BURST_RATE, THETA_PULSES_PER_BURST,
};

/// The timing model of a stimulation session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum StimulationType {
    /// Fixed-frequency pulse trains with explicit inter-train intervals.
    Standard,
    /// Theta burst, 2 s trains with fixed 8 s pauses.
    IntermittentThetaBurst,
    /// Theta burst, bursting straight through with no pauses.
    ContinuousThetaBurst,
}

impl StimulationType {
    /// Whether this is one of the theta-burst variants.
    #[must_use]
    pub const fn is_theta_burst(self) -> bool {
        matches!(
            self,
            Self::IntermittentThetaBurst | Self::ContinuousThetaBurst
        )
    }
}

/// A validated stimulation protocol.
///
/// Immutable once constructed; every constructor validates, so a `Protocol`
/// value is always runnable. For the theta-burst variants the burst timing
/// is fixed by the pattern and the explicit fields reflect it.
///
/// # Example
///
/// ```
/// use stim_pulse::{Protocol, ProtocolError};
///
/// let protocol = Protocol::standard(10.0, 40, 11.0, 3000).unwrap();
/// assert!((protocol.train_duration() - 4.0).abs() < 1e-12);
/// assert_eq!(protocol.total_trains(), 75);
/// assert!((protocol.session_duration() - 1114.0).abs() < 1e-9);
///
/// assert_eq!(
///     Protocol::standard(0.0, 40, 11.0, 3000),
///     Err(ProtocolError::InvalidFrequency(0.0)),
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Protocol {
    frequency: f64,
    pulses_per_train: u32,
    inter_train_interval: f64,
    total_pulses: u32,
    stimulation_type: StimulationType,
}

impl Protocol {
    /// Create a validated protocol.
    ///
    /// # Errors
    ///
    /// Rejects non-positive or non-finite `frequency`, zero
    /// `pulses_per_train` or `total_pulses`, and a negative or non-finite
    /// `inter_train_interval`.
    pub fn new(
        frequency: f64,
        pulses_per_train: u32,
        inter_train_interval: f64,
        total_pulses: u32,
        stimulation_type: StimulationType,
    ) -> Result<Self, ProtocolError> {
        if !frequency.is_finite() || frequency <= 0.0 {
            return Err(ProtocolError::InvalidFrequency(frequency));
        }
        if pulses_per_train == 0 {
            return Err(ProtocolError::InvalidPulsesPerTrain);
        }
        if total_pulses == 0 {
            return Err(ProtocolError::InvalidTotalPulses);
        }
        if !inter_train_interval.is_finite() || inter_train_interval < 0.0 {
            return Err(ProtocolError::InvalidInterTrainInterval(
                inter_train_interval,
            ));
        }
        Ok(Self {
            frequency,
            pulses_per_train,
            inter_train_interval,
            total_pulses,
            stimulation_type,
        })
    }

    /// A standard fixed-frequency protocol.
    ///
    /// # Errors
    ///
    /// Same validation as [`Protocol::new`].
    pub fn standard(
        frequency: f64,
        pulses_per_train: u32,
        inter_train_interval: f64,
        total_pulses: u32,
    ) -> Result<Self, ProtocolError> {
        Self::new(
            frequency,
            pulses_per_train,
            inter_train_interval,
            total_pulses,
            StimulationType::Standard,
        )
    }

    /// An intermittent theta-burst (iTBS) protocol.
    ///
    /// Burst timing is fixed by the pattern; only the pulse budget varies.
    ///
    /// # Errors
    ///
    /// Rejects `total_pulses == 0`.
    pub fn intermittent_theta_burst(total_pulses: u32) -> Result<Self, ProtocolError> {
        Self::new(
            THETA_INTRA_BURST_RATE,
            ITBS_PULSES_PER_TRAIN,
            ITBS_INTER_TRAIN_INTERVAL,
            total_pulses,
            StimulationType::IntermittentThetaBurst,
        )
    }

    /// A continuous theta-burst (cTBS) protocol.
    ///
    /// # Errors
    ///
    /// Rejects `total_pulses == 0`.
    pub fn continuous_theta_burst(total_pulses: u32) -> Result<Self, ProtocolError> {
        Self::new(
            THETA_INTRA_BURST_RATE,
            total_pulses,
            0.0,
            total_pulses,
            StimulationType::ContinuousThetaBurst,
        )
    }

    /// Pulse frequency in Hz.
    #[must_use]
    pub const fn frequency(&self) -> f64 {
        self.frequency
    }

    /// Pulses per train.
    #[must_use]
    pub const fn pulses_per_train(&self) -> u32 {
        self.pulses_per_train
    }

    /// Pause between trains, in seconds.
    #[must_use]
    pub const fn inter_train_interval(&self) -> f64 {
        self.inter_train_interval
    }

    /// Total pulse budget for the session.
    #[must_use]
    pub const fn total_pulses(&self) -> u32 {
        self.total_pulses
    }

    /// The timing model.
    #[must_use]
    pub const fn stimulation_type(&self) -> StimulationType {
        self.stimulation_type
    }

    /// Duration of one active train, in seconds.
    ///
    /// For cTBS the whole session is one uninterrupted train.
    #[must_use]
    pub fn train_duration(&self) -> f64 {
        match self.stimulation_type {
            StimulationType::Standard => f64::from(self.pulses_per_train) / self.frequency,
            StimulationType::IntermittentThetaBurst => ITBS_TRAIN_DURATION,
            StimulationType::ContinuousThetaBurst => self.session_duration(),
        }
    }

    /// Number of trains in the session, counting a partial final train.
    #[must_use]
    pub fn total_trains(&self) -> u32 {
        match self.stimulation_type {
            StimulationType::Standard => self.total_pulses.div_ceil(self.pulses_per_train),
            StimulationType::IntermittentThetaBurst => {
                self.total_pulses.div_ceil(ITBS_PULSES_PER_TRAIN)
            }
            StimulationType::ContinuousThetaBurst => 1,
        }
    }

    /// Expected session duration, in seconds.
    ///
    /// `total_trains * train_duration + (total_trains - 1) * iti` for the
    /// train-structured types; burst count times the burst period for cTBS.
    #[must_use]
    pub fn session_duration(&self) -> f64 {
        if self.stimulation_type == StimulationType::ContinuousThetaBurst {
            let bursts = self.total_pulses.div_ceil(THETA_PULSES_PER_BURST);
            return f64::from(bursts) * THETA_BURST_PERIOD;
        }

        let trains = f64::from(self.total_trains());
        let train_duration = match self.stimulation_type {
            StimulationType::Standard => f64::from(self.pulses_per_train) / self.frequency,
            _ => ITBS_TRAIN_DURATION,
        };
        trains.mul_add(train_duration, (trains - 1.0).max(0.0) * self.inter_train_interval)
    }
}
