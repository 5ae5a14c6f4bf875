//! Constants

/// Master clock most breakout boards ship with
pub const MCLK_FREQ_DEFAULT: u32 = 25_000_000;

/// Maximum allowed MCLK frequency
pub const MCLK_FREQ_MAX: u32 = 25_000_000;

/// Frequency registers are 28 bits wide
pub const FREQ_WORD_BITS: u8 = 28;

/// Largest value a frequency register can hold
pub const FREQ_WORD_MAX: u32 = (1 << FREQ_WORD_BITS) - 1;

/// Each frequency register is loaded as two 14 bit halves
pub const FREQ_HALF_BITS: u8 = 14;

/// Mask of a single 14 bit half
pub const FREQ_HALF_MASK: u32 = (1 << FREQ_HALF_BITS) - 1;

/// Phase registers are 12 bits wide
pub const PHASE_WORD_BITS: u8 = 12;

/// Number of phase steps in a full turn, 2^12
pub const PHASE_STEPS: u16 = 1 << PHASE_WORD_BITS;

/// D15:D14 of a frequency word addressing FREQ0
pub const FREQ0_ADDR: u8 = 0b01;

/// D15:D14 of a frequency word addressing FREQ1
pub const FREQ1_ADDR: u8 = 0b10;

/// D15:D14 of any phase register word
pub const PHASE_ADDR: u8 = 0b11;

/// D15:D14 of the control register word
pub const CONTROL_ADDR: u8 = 0b00;
