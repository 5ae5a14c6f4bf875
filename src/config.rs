//! Device configuration / frequency calculations

use crate::{ constants::*, errors::*, frequency::FrequencyWord };


/// Master clock frequency, Hz
#[derive(Debug,Copy,Clone,PartialEq,Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Mclk(u32);

impl Default for Mclk {
    #[inline]
    fn default() -> Self {
        Mclk(MCLK_FREQ_DEFAULT)
    }
}

impl Mclk {
    /// Master clock, 0 < f <= 25 MHz
    pub fn new(mclk_hz: u32) -> Result<Self, RangeError> {
        (if !(1 ..= MCLK_FREQ_MAX).contains(&mclk_hz) { Err(RangeError::ClockFrequency) } else { Ok(()) } )?;
        Ok(Mclk(mclk_hz))
    }

    /// Clock frequency, Hz
    #[inline]
    pub fn hz(self: &Self) -> u32 {
        self.0
    }

    /// Highest output frequency that can be requested (exclusive).
    #[inline]
    pub fn nyquist_hz(self: &Self) -> u32 {
        self.0 / 2
    }

    /// Frequency tuning word for the desired output frequency.
    ///
    /// f OUT = f MCLK / 2^28 × FREQREG
    ///
    /// FREQREG = round(f OUT × 2^28 / f MCLK). Negative, NaN and
    /// at-or-above-Nyquist requests are rejected.
    pub fn tuning_word(self: &Self, f_out_hz: f64) -> Result<FrequencyWord, RangeError> {
        let mclk = self.0 as f64;
        // negated so NaN fails too
        (if !(f_out_hz >= 0.0 && f_out_hz * 2.0 < mclk) { Err(RangeError::OutputFrequency) } else { Ok(()) } )?;

        let word = f_out_hz * (1u64 << FREQ_WORD_BITS) as f64 / mclk;
        // non-negative, below 2^27: truncating after +0.5 rounds to nearest
        Ok(FrequencyWord::new((word + 0.5) as u32))
    }

    /// Output frequency produced by a tuning word, Hz.
    pub fn f_out_hz(self: &Self, w: FrequencyWord) -> f64 {
        w.0 as f64 * self.resolution_hz()
    }

    /// Output frequency step of one tuning word LSB, Hz.
    pub fn resolution_hz(self: &Self) -> f64 {
        self.0 as f64 / (1u64 << FREQ_WORD_BITS) as f64
    }
}
