//! AD9833 registers
//!
//! Every write to the part is a single 16 bit word. Bits D15:D14 select the
//! destination (control, FREQ0, FREQ1 or one of the phase registers), the
//! remaining bits carry the payload.

use core::convert::TryFrom;
use core::marker::PhantomData;

use crate::constants::*;
use crate::errors::RangeError;

/// Register kind marker types
macro_rules! gen_register_marker {
    ($r:ident, $tag:expr) => {
        #[doc = concat!("Register kind marker: ", stringify!($r))]
        #[derive(Debug,Copy,Clone,PartialEq,Eq)]
        pub struct $r {}

        impl Default for Reg<$r> { #[inline] fn default() -> Self { Reg { w: ($tag as u16) << 14, phantom: PhantomData::default() } } }
    }
}

gen_register_marker!(Control, CONTROL_ADDR);
gen_register_marker!(Phase, PHASE_ADDR);
// frequency address depends on the register select, see `FreqAddr`
gen_register_marker!(Freq, 0);


/// Single 16 bit register write
#[derive(Debug,Copy,Clone,PartialEq,Eq)]
pub struct Reg<R> {
    /// Register word, as shifted out
    pub w: u16,
    phantom: PhantomData<R>,
}

/// Bit operations on 16bit words
impl<R> Reg<R> {
    #[inline]
    pub fn get<F>(self: &Self) -> F
    where F: Sized + BitField<R> + FieldBits
    {
        F::from_bits(
            (self.w >> F::offset()) & F::mask()
        )
    }

    #[inline]
    pub fn set<F>(mut self: Self, f: F) -> Self
    where F: Sized + BitField<R> + FieldBits
    {
        let fbits = (f.into_bits() & F::mask()) << F::offset();
        let rbits = self.w & (! ( F::mask() << F::offset() ));
        self.w = rbits | fbits;
        self
    }

    /// Word in bus order, MSB first
    #[inline]
    pub fn to_bytes(self: &Self) -> [u8; 2] {
        self.w.to_be_bytes()
    }
}


/// Bit operations on 16bit words
pub trait BitField<R> {
    /// Number of bits in the bit field
    fn num_bits() -> u8;

    /// Offset from 0
    fn offset() -> u8;

    #[inline]
    fn mask() -> u16 {
        !(0xFFFFu16 << Self::num_bits())
    }
}

/// Conversion of a field value to and from its raw, right-aligned bits.
/// `from_bits` only ever sees values already masked to the field width.
pub trait FieldBits {
    fn from_bits(x: u16) -> Self;
    fn into_bits(self: Self) -> u16;
}

/// Generate BitField implementation
macro_rules! gen_bitfield_impl {
	($r:ty, $n:ident, $nb:tt, $off:tt) => {
        impl BitField<$r> for $n {
            #[inline] fn num_bits() -> u8 { $nb }
            #[inline] fn offset() -> u8 { $off }
        }
    }
}

/// Small bitfield-encoded numbers boilerplate
macro_rules! gen_bitfield_struct {
	($(#[$meta:meta])*, $r:ty, $n:ident, $v:ty, $nb:tt, $off:tt) => {
        $(#[$meta])*
        #[derive(Debug,Copy,Clone,PartialEq,Eq)]
        pub struct $n(pub $v);

        gen_bitfield_impl!($r, $n, $nb, $off);

        impl FieldBits for $n {
            #[inline] fn from_bits(x: u16) -> Self { $n(x as $v) }
            #[inline] fn into_bits(self: Self) -> u16 { self.0 as u16 }
        }
	};
}

/// Single bit on/off flags
macro_rules! gen_bitfield_flag {
	($(#[$meta:meta])*, $r:ty, $n:ident, $off:tt) => {
        $(#[$meta])*
        #[derive(Debug,Copy,Clone,PartialEq,Eq)]
        pub struct $n(pub bool);

        gen_bitfield_impl!($r, $n, 1, $off);

        impl FieldBits for $n {
            #[inline] fn from_bits(x: u16) -> Self { $n(x != 0) }
            #[inline] fn into_bits(self: Self) -> u16 { self.0 as u16 }
        }
	};
}

/// Raw register select, anything but 0 or 1 is rejected
macro_rules! gen_select_try_from {
	($n:ident, $zero:ident, $one:ident, $t:ty) => {
        impl TryFrom<$t> for $n {
            type Error = RangeError;

            #[inline]
            fn try_from(x: $t) -> Result<Self, RangeError> {
                match x {
                    0 => Ok($n::$zero),
                    1 => Ok($n::$one),
                    _ => Err(RangeError::RegisterSelect),
                }
            }
        }
    }
}

/// Two-state enums, first variant encodes as 0
macro_rules! gen_bitfield_enum {
	($(#[$meta:meta])*, $n:ident, $zero:ident, $one:ident) => {
        $(#[$meta])*
        #[derive(Debug,Copy,Clone,PartialEq,Eq)]
        #[cfg_attr(feature = "defmt", derive(defmt::Format))]
        pub enum $n {
            $zero,
            $one,
        }

        impl Default for $n { #[inline] fn default() -> Self { $n::$zero } }

        impl FieldBits for $n {
            #[inline] fn from_bits(x: u16) -> Self { if x & 1 == 0 { $n::$zero } else { $n::$one } }
            #[inline] fn into_bits(self: Self) -> u16 { self as u16 }
        }

        gen_select_try_from!($n, $zero, $one, u8);
        gen_select_try_from!($n, $zero, $one, u16);
    }
}



gen_bitfield_flag!(
    /// Two write operations are required to load a complete word into
    /// either of the frequency registers. B28 = 1 allows a complete word
    /// to be loaded into a frequency register in two consecutive writes,
    /// the first containing the 14 LSBs and the second the 14 MSBs.
    /// When B28 = 0 the 28 bit register operates as two 14 bit registers,
    /// one holding the MSBs and the other the LSBs, selected by HLB.
    , Control, B28, 13
);

gen_bitfield_flag!(
    /// HLB allows the user to continuously load the MSBs or LSBs of a
    /// frequency register while ignoring the remaining 14 bits. Used
    /// together with B28 = 0; ignored when B28 = 1.
    /// HLB = 1 targets the 14 MSBs, HLB = 0 the 14 LSBs.
    , Control, Hlb, 12
);

gen_bitfield_enum!(
    /// The FSELECT bit defines whether the FREQ0 register or the FREQ1
    /// register is used in the phase accumulator.
    /// Also used as the register select of frequency writes.
    , FreqReg, F0, F1
);
gen_bitfield_impl!(Control, FreqReg, 1, 11);

gen_bitfield_enum!(
    /// The PSELECT bit defines whether the PHASE0 register or the PHASE1
    /// register data is added to the output of the phase accumulator.
    /// Also used as the register select of phase writes.
    , PhaseReg, P0, P1
);
gen_bitfield_impl!(Control, PhaseReg, 1, 10);
gen_bitfield_impl!(Phase, PhaseReg, 1, 13);

gen_bitfield_flag!(
    /// Reset = 1 resets internal registers to 0, which corresponds to an
    /// analog output of midscale. Reset does not reset the phase, frequency
    /// or control registers.
    , Control, Reset, 8
);

gen_bitfield_flag!(
    /// When SLEEP1 = 1 the internal MCLK clock is disabled and the DAC
    /// output remains at its present value because the NCO is no longer
    /// accumulating.
    , Control, Sleep1, 7
);

gen_bitfield_flag!(
    /// SLEEP12 = 1 powers down the on-chip DAC. This is useful when the
    /// part is used to output the MSB of the DAC data.
    , Control, Sleep12, 6
);

gen_bitfield_flag!(
    /// When OPBITEN = 1 the output of the DAC is no longer available at the
    /// VOUT pin; instead the MSB (or MSB/2) of the DAC data is connected to
    /// VOUT, which is useful as a coarse clock source.
    , Control, OpBitEn, 5
);

gen_bitfield_flag!(
    /// DIV2 is used in association with OPBITEN. When DIV2 = 1 the MSB of
    /// the DAC data is passed directly to VOUT. When DIV2 = 0 the MSB/2 of
    /// the DAC data is output.
    , Control, Div2, 3
);

gen_bitfield_enum!(
    /// The MODE bit is used in association with OPBITEN. With OPBITEN = 0
    /// it selects between the SIN ROM (sinusoidal output) and a bypassed
    /// ROM (triangle output). MODE must be 0 when OPBITEN = 1.
    , Waveform, Sine, Triangle
);
gen_bitfield_impl!(Control, Waveform, 1, 1);


/// Frequency register address, bits D15:D14 of a frequency write
#[derive(Debug,Copy,Clone,PartialEq,Eq)]
pub struct FreqAddr(pub u8);
gen_bitfield_impl!(Freq, FreqAddr, 2, 14);

impl FieldBits for FreqAddr {
    #[inline] fn from_bits(x: u16) -> Self { FreqAddr(x as u8) }
    #[inline] fn into_bits(self: Self) -> u16 { self.0 as u16 }
}

impl From<FreqReg> for FreqAddr {
    #[inline]
    fn from(r: FreqReg) -> Self {
        match r {
            FreqReg::F0 => FreqAddr(FREQ0_ADDR),
            FreqReg::F1 => FreqAddr(FREQ1_ADDR),
        }
    }
}

gen_bitfield_struct!(
    /// 14 bits of frequency data, either half of the 28 bit tuning word
    , Freq, FreqData, u16, 14, 0
);

gen_bitfield_struct!(
    /// 12 bit phase offset, 2π/4096 per step
    , Phase, PhaseData, u16, 12, 0
);
