//! Control register shadow state
//!
//! The part is write-only, so the driver keeps its own copy of every control
//! bit and re-sends the whole word whenever any of them changes.

use crate::register::*;


/// How the next frequency write is loaded (B28 / HLB)
#[derive(Debug,Copy,Clone,PartialEq,Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WriteMode {
    /// B28 = 1, full 28 bit word in two consecutive writes, LSBs first
    Both,
    /// B28 = 0, HLB = 1, only the 14 MSBs are updated
    MostSignificantOnly,
    /// B28 = 0, HLB = 0, only the 14 LSBs are updated
    LeastSignificantOnly,
}

impl WriteMode {
    /// (B28, HLB) bits selecting this mode
    #[inline]
    pub fn bits(self: Self) -> (bool, bool) {
        match self {
            WriteMode::Both => (true, false),
            WriteMode::MostSignificantOnly => (false, true),
            WriteMode::LeastSignificantOnly => (false, false),
        }
    }
}


/// Output stage configuration
#[derive(Debug,Copy,Clone,PartialEq,Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OutputMode {
    /// Internal registers held in reset, output at midscale
    Reset,
    /// Reset with MCLK and DAC powered down
    Off,
    Sine,
    Triangle,
    /// MSB of the DAC data, DAC powered down
    Square,
    /// MSB/2 of the DAC data, DAC powered down
    SquareDivTwo,
}

/// Bits owned by the output mode
#[derive(Debug,Copy,Clone,PartialEq,Eq)]
struct OutputBits {
    reset: bool,
    sleep_clock: bool,
    sleep_dac: bool,
    opbiten: bool,
    div2: bool,
    mode: Waveform,
}

impl OutputMode {
    fn bits(self: Self) -> OutputBits {
        let base = OutputBits {
            reset: false,
            sleep_clock: false,
            sleep_dac: false,
            opbiten: false,
            div2: false,
            mode: Waveform::Sine,
        };
        match self {
            OutputMode::Reset => OutputBits { reset: true, ..base },
            OutputMode::Off => OutputBits { reset: true, sleep_clock: true, sleep_dac: true, ..base },
            OutputMode::Sine => base,
            OutputMode::Triangle => OutputBits { mode: Waveform::Triangle, ..base },
            OutputMode::Square => OutputBits { sleep_dac: true, opbiten: true, div2: true, ..base },
            OutputMode::SquareDivTwo => OutputBits { sleep_dac: true, opbiten: true, ..base },
        }
    }
}


/// Shadow copy of the control register
#[derive(Debug,Copy,Clone,PartialEq,Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ControlState {
    /// Frequency register loaded as one 28 bit word in two writes
    pub b28: bool,
    /// With `b28` clear, next frequency write targets the MSBs. Ignored otherwise.
    pub hlb: bool,
    /// Frequency register feeding the phase accumulator
    pub freq_select: FreqReg,
    /// Phase register added to the accumulator output
    pub phase_select: PhaseReg,
    pub reset: bool,
    /// SLEEP12, DAC powered down
    pub sleep_dac: bool,
    /// SLEEP1, MCLK disabled
    pub sleep_clock: bool,
    /// OPBITEN, DAC MSB routed to VOUT
    pub opbiten: bool,
    /// DIV2, full MSB instead of MSB/2 when `opbiten` is set
    pub msb_clock_divide: bool,
    /// MODE, sine or triangle when `opbiten` is clear
    pub mode: Waveform,
}

/// Power-on state: B28 = 1, RESET = 1, everything else cleared
impl Default for ControlState {
    fn default() -> Self {
        ControlState {
            b28: true,
            hlb: false,
            freq_select: FreqReg::F0,
            phase_select: PhaseReg::P0,
            reset: true,
            sleep_dac: false,
            sleep_clock: false,
            opbiten: false,
            msb_clock_divide: false,
            mode: Waveform::Sine,
        }
    }
}

impl ControlState {
    /// Control register word
    pub fn to_word(self: &Self) -> Reg<Control> {
        Reg::<Control>::default()
            .set(B28(self.b28))
            .set(Hlb(self.hlb))
            .set(self.freq_select)
            .set(self.phase_select)
            .set(Reset(self.reset))
            .set(Sleep1(self.sleep_clock))
            .set(Sleep12(self.sleep_dac))
            .set(OpBitEn(self.opbiten))
            .set(Div2(self.msb_clock_divide))
            .set(self.mode)
    }

    /// Inverse of [`to_word`](Self::to_word), address bits must be 00.
    pub fn from_word(r: Reg<Control>) -> Self {
        let b28: B28 = r.get();
        let hlb: Hlb = r.get();
        let reset: Reset = r.get();
        let sleep1: Sleep1 = r.get();
        let sleep12: Sleep12 = r.get();
        let opbiten: OpBitEn = r.get();
        let div2: Div2 = r.get();
        ControlState {
            b28: b28.0,
            hlb: hlb.0,
            freq_select: r.get(),
            phase_select: r.get(),
            reset: reset.0,
            sleep_dac: sleep12.0,
            sleep_clock: sleep1.0,
            opbiten: opbiten.0,
            msb_clock_divide: div2.0,
            mode: r.get(),
        }
    }

    /// Overwrites the fields present in `u`, keeps the rest.
    pub fn merge(self: &mut Self, u: &ControlUpdate) {
        macro_rules! merge {
            ($s:ident, $u:ident; $($f:ident),*) => { $( if let Some(v) = $u.$f { $s.$f = v; } )* }
        }
        merge!(self, u; b28, hlb, freq_select, phase_select, reset, sleep_dac, sleep_clock, opbiten, msb_clock_divide, mode);
    }

    /// Write mode selected by B28 / HLB
    pub fn write_mode(self: &Self) -> WriteMode {
        match (self.b28, self.hlb) {
            (true, _) => WriteMode::Both,
            (false, true) => WriteMode::MostSignificantOnly,
            (false, false) => WriteMode::LeastSignificantOnly,
        }
    }

    /// Output mode the current bits amount to.
    ///
    /// Combinations no [`OutputMode`] produces are reported by their
    /// dominant bit: RESET first, then OPBITEN, then MODE.
    pub fn output_mode(self: &Self) -> OutputMode {
        if self.reset {
            if self.sleep_clock && self.sleep_dac { OutputMode::Off } else { OutputMode::Reset }
        } else if self.opbiten {
            if self.msb_clock_divide { OutputMode::Square } else { OutputMode::SquareDivTwo }
        } else {
            match self.mode {
                Waveform::Sine => OutputMode::Sine,
                Waveform::Triangle => OutputMode::Triangle,
            }
        }
    }
}


/// Partial control register update, `None` keeps the current value
#[derive(Debug,Copy,Clone,PartialEq,Eq,Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ControlUpdate {
    pub b28: Option<bool>,
    pub hlb: Option<bool>,
    pub freq_select: Option<FreqReg>,
    pub phase_select: Option<PhaseReg>,
    pub reset: Option<bool>,
    pub sleep_dac: Option<bool>,
    pub sleep_clock: Option<bool>,
    pub opbiten: Option<bool>,
    pub msb_clock_divide: Option<bool>,
    pub mode: Option<Waveform>,
}

impl ControlUpdate {
    /// Sets B28 / HLB for `m`
    pub fn write_mode(mut self: Self, m: WriteMode) -> Self {
        let (b28, hlb) = m.bits();
        self.b28 = Some(b28);
        self.hlb = Some(hlb);
        self
    }

    /// Sets every bit governed by `m`, nothing else
    pub fn output_mode(mut self: Self, m: OutputMode) -> Self {
        let b = m.bits();
        self.reset = Some(b.reset);
        self.sleep_clock = Some(b.sleep_clock);
        self.sleep_dac = Some(b.sleep_dac);
        self.opbiten = Some(b.opbiten);
        self.msb_clock_divide = Some(b.div2);
        self.mode = Some(b.mode);
        self
    }

    pub fn freq_select(mut self: Self, r: FreqReg) -> Self {
        self.freq_select = Some(r);
        self
    }

    pub fn phase_select(mut self: Self, r: PhaseReg) -> Self {
        self.phase_select = Some(r);
        self
    }

    pub fn reset(mut self: Self, on: bool) -> Self {
        self.reset = Some(on);
        self
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    const ALL_MODES: [OutputMode; 6] = [
        OutputMode::Reset,
        OutputMode::Off,
        OutputMode::Sine,
        OutputMode::Triangle,
        OutputMode::Square,
        OutputMode::SquareDivTwo,
    ];

    fn with_mode(s: ControlState, m: OutputMode) -> ControlState {
        let mut s = s;
        s.merge(&ControlUpdate::default().output_mode(m));
        s
    }

    #[test]
    fn power_on_word() {
        assert_eq!(ControlState::default().to_word().w, 0x2100);
    }

    #[test]
    fn output_mode_words_from_power_on() {
        let w = |m| with_mode(ControlState::default(), m).to_word().w;
        assert_eq!(w(OutputMode::Sine), 0x2000);
        assert_eq!(w(OutputMode::Triangle), 0x2002);
        assert_eq!(w(OutputMode::Square), 0x2068);
        assert_eq!(w(OutputMode::SquareDivTwo), 0x2060);
        assert_eq!(w(OutputMode::Reset), 0x2100);
        assert_eq!(w(OutputMode::Off), 0x21C0);
    }

    #[test]
    fn output_mode_round_trips() {
        for &m in ALL_MODES.iter() {
            assert_eq!(with_mode(ControlState::default(), m).output_mode(), m);
        }
    }

    #[test]
    fn output_mode_transitions_leave_no_trace() {
        let sine = with_mode(ControlState::default(), OutputMode::Sine);
        for &from in ALL_MODES.iter() {
            let s = with_mode(with_mode(ControlState::default(), from), OutputMode::Sine);
            assert_eq!(s.to_word(), sine.to_word(), "{:?}", from);
        }
    }

    #[test]
    fn output_mode_keeps_selects_and_write_mode() {
        let mut s = ControlState::default();
        s.merge(&ControlUpdate::default()
            .write_mode(WriteMode::MostSignificantOnly)
            .freq_select(FreqReg::F1)
            .phase_select(PhaseReg::P1));
        for &m in ALL_MODES.iter() {
            let t = with_mode(s, m);
            assert_eq!(t.write_mode(), WriteMode::MostSignificantOnly);
            assert_eq!(t.freq_select, FreqReg::F1);
            assert_eq!(t.phase_select, PhaseReg::P1);
        }
    }

    #[test]
    fn partial_merge_touches_one_field() {
        let mut s = with_mode(ControlState::default(), OutputMode::Square);
        let before = s.to_word().w;
        s.merge(&ControlUpdate::default().freq_select(FreqReg::F1));
        assert_eq!(s.to_word().w, before | (1 << 11));
        assert!(s.b28);
    }

    #[test]
    fn empty_merge_is_noop() {
        let mut s = with_mode(ControlState::default(), OutputMode::Triangle);
        let before = s;
        s.merge(&ControlUpdate::default());
        assert_eq!(s, before);
    }

    #[test]
    fn write_mode_bits() {
        for &m in [WriteMode::Both, WriteMode::MostSignificantOnly, WriteMode::LeastSignificantOnly].iter() {
            let mut s = ControlState::default();
            s.merge(&ControlUpdate::default().write_mode(m));
            assert_eq!(s.write_mode(), m);
        }
        let mut s = ControlState::default();
        s.merge(&ControlUpdate::default().write_mode(WriteMode::LeastSignificantOnly));
        assert_eq!(s.to_word().w & 0x3000, 0);
        s.merge(&ControlUpdate::default().write_mode(WriteMode::MostSignificantOnly));
        assert_eq!(s.to_word().w & 0x3000, 0x1000);
    }

    #[test]
    fn hlb_ignored_with_b28() {
        let mut s = ControlState::default();
        s.hlb = true;
        assert_eq!(s.write_mode(), WriteMode::Both);
    }

    #[test]
    fn word_round_trip() {
        let mut s = with_mode(ControlState::default(), OutputMode::Off);
        s.merge(&ControlUpdate::default().freq_select(FreqReg::F1).write_mode(WriteMode::MostSignificantOnly));
        assert_eq!(ControlState::from_word(s.to_word()), s);
    }
}
