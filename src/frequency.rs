//! Frequency register words

use crate::{constants::*, register::*};


/// 28 bit frequency tuning word (FREQREG)
#[derive(Debug,Copy,Clone,PartialEq,Eq,Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FrequencyWord(pub u32);

impl FrequencyWord {
    /// Tuning word, bits above 28 are dropped
    #[inline]
    pub fn new(w: u32) -> Self {
        FrequencyWord(w & FREQ_WORD_MAX)
    }

    /// Splits the word into the two 14 bit writes addressed to `reg`,
    /// returned as (MSB write, LSB write).
    pub fn split(self: &Self, reg: FreqReg) -> (Reg<Freq>, Reg<Freq>) {
        let addr = FreqAddr::from(reg);
        let msb = Reg::<Freq>::default()
            .set(addr)
            .set(FreqData(((self.0 >> FREQ_HALF_BITS) & FREQ_HALF_MASK) as u16));
        let lsb = Reg::<Freq>::default()
            .set(addr)
            .set(FreqData((self.0 & FREQ_HALF_MASK) as u16));
        (msb, lsb)
    }

    /// Reassembles a word from its MSB and LSB writes, address bits are ignored.
    pub fn from_halves(msb: Reg<Freq>, lsb: Reg<Freq>) -> Self {
        let hi: FreqData = msb.get();
        let lo: FreqData = lsb.get();
        FrequencyWord(((hi.0 as u32) << FREQ_HALF_BITS) | lo.0 as u32)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Mclk;

    #[test]
    fn split_1khz_freq0() {
        let w = Mclk::default().tuning_word(1000.0).unwrap();
        let (msb, lsb) = w.split(FreqReg::F0);
        assert_eq!(msb.w, 0x4000);
        assert_eq!(lsb.w, 0x69F1);
        assert_eq!(lsb.to_bytes(), [0x69, 0xF1]);
    }

    #[test]
    fn split_tags_freq1() {
        let (msb, lsb) = FrequencyWord::new(0x0FFF_FFFF).split(FreqReg::F1);
        assert_eq!(msb.w, 0xBFFF);
        assert_eq!(lsb.w, 0xBFFF);
        let addr: FreqAddr = msb.get();
        assert_eq!(addr, FreqAddr(0b10));
    }

    #[test]
    fn split_keeps_halves_apart() {
        let w = FrequencyWord::new((0x1234 << 14) | 0x0ABC);
        let (msb, lsb) = w.split(FreqReg::F0);
        assert_eq!(msb.w, 0x4000 | 0x1234);
        assert_eq!(lsb.w, 0x4000 | 0x0ABC);
        assert_eq!(FrequencyWord::from_halves(msb, lsb), w);
    }

    #[test]
    fn new_drops_high_bits() {
        assert_eq!(FrequencyWord::new(0xF000_0001), FrequencyWord(1));
    }

    #[test]
    fn decode_after_split_within_one_step() {
        let mclk = Mclk::default();
        let step = mclk.resolution_hz();
        let mut f = 0.0f64;
        while f < mclk.nyquist_hz() as f64 {
            let (msb, lsb) = mclk.tuning_word(f).unwrap().split(FreqReg::F1);
            let back = mclk.f_out_hz(FrequencyWord::from_halves(msb, lsb));
            assert!((back - f).abs() <= step, "{} -> {}", f, back);
            f += 97_613.37;
        }
    }
}
