//! Phase register words

use core::f64::consts::TAU;

use crate::{constants::*, register::*};


/// Unit of a requested phase offset
#[derive(Debug,Copy,Clone,PartialEq,Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AngleUnit {
    Radians,
    Degrees,
}

impl AngleUnit {
    /// Size of a full turn in this unit
    #[inline]
    fn turn(self: Self) -> f64 {
        match self {
            AngleUnit::Radians => TAU,
            AngleUnit::Degrees => 360.0,
        }
    }
}


/// 12 bit phase offset, 2π/4096 per step
#[derive(Debug,Copy,Clone,PartialEq,Eq,Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PhaseWord(pub u16);

impl PhaseWord {
    /// Quantizes any angle to the nearest phase step, wrapping modulo one turn.
    ///
    /// PHASEREG = round(angle × 4096 / 2π) mod 4096
    pub fn from_angle(angle: f32, unit: AngleUnit) -> Self {
        let steps = PHASE_STEPS as f64;
        let scaled = angle as f64 * steps / unit.turn();
        // round half away from zero, core has no f64::round
        let q = if scaled >= 0.0 { (scaled + 0.5) as i64 } else { (scaled - 0.5) as i64 };
        PhaseWord(q.rem_euclid(PHASE_STEPS as i64) as u16)
    }

    /// Phase register write of this offset into `reg`
    #[inline]
    pub fn to_reg(self: &Self, reg: PhaseReg) -> Reg<Phase> {
        Reg::<Phase>::default()
            .set(reg)
            .set(PhaseData(self.0))
    }

    /// Offset in radians, [0, 2π)
    #[inline]
    pub fn radians(self: &Self) -> f32 {
        (self.0 as f64 * TAU / PHASE_STEPS as f64) as f32
    }
}
