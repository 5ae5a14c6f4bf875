//! Device

use core::convert::TryFrom;

use crate::{
    config::Mclk,
    control::*,
    errors::*,
    phase::*,
    register::*,
    transport::Transport,
};


/// AD9833 device.
///
/// Owns the transport and the shadow control register, so `&mut self` on
/// every operation keeps the bus writes of one request together. Share it
/// between contexts only behind a mutex.
pub struct Ad9833<T> {
    transport: T,
    mclk: Mclk,
    control: ControlState,
    freq: [f64; 2],
    phase: [f32; 2],
}


impl<T> Ad9833<T>
where T: Transport,
{
    /// Creates the device with the default 25 MHz MCLK.
    /// Nothing is sent until [`init`](Self::init).
    pub fn new(transport: T) -> Self {
        Self::with_mclk(transport, Mclk::default())
    }

    /// Creates the device clocked by `mclk`.
    pub fn with_mclk(transport: T, mclk: Mclk) -> Self {
        Ad9833 {
            transport,
            mclk,
            control: ControlState::default(),
            freq: [0.0; 2],
            phase: [0.0; 2],
        }
    }

    /// Sends the power-on control word (B28 = 1, RESET = 1), output held at midscale.
    pub fn init(self: &mut Self) -> Result<(), Error<T::Error>> {
        self.control = ControlState::default();
        self.write_control()
    }

    /// Releases the transport
    pub fn free(self: Self) -> T {
        self.transport
    }

    /// Master clock
    #[inline]
    pub fn mclk(self: &Self) -> Mclk {
        self.mclk
    }

    /// Control register as last sent
    #[inline]
    pub fn control(self: &Self) -> &ControlState {
        &self.control
    }

    #[inline]
    pub fn write_mode(self: &Self) -> WriteMode {
        self.control.write_mode()
    }

    #[inline]
    pub fn output_mode(self: &Self) -> OutputMode {
        self.control.output_mode()
    }

    /// Last frequency requested for `reg`, Hz.
    /// Advisory only, partial writes update it too.
    #[inline]
    pub fn frequency(self: &Self, reg: FreqReg) -> f64 {
        self.freq[reg as usize]
    }

    /// Last phase requested for `reg`, radians as given
    #[inline]
    pub fn phase(self: &Self, reg: PhaseReg) -> f32 {
        self.phase[reg as usize]
    }

    /// Merges `u` into the control register and sends it.
    pub fn set_control_fields(self: &mut Self, u: ControlUpdate) -> Result<(), Error<T::Error>> {
        self.control.merge(&u);
        self.write_control()
    }

    /// Programs frequency register `reg`.
    ///
    /// Depending on the write mode this is two writes (LSBs then MSBs, the
    /// device commits on the second one) or a single half. `f_out_hz` may be
    /// fractional, negative and NaN values are rejected before anything is sent.
    pub fn set_frequency(self: &mut Self, f_out_hz: f64, reg: FreqReg) -> Result<(), Error<T::Error>> {
        let w = self.mclk.tuning_word(f_out_hz)?;
        let (msb, lsb) = w.split(reg);

        #[cfg(feature = "defmt")]
        defmt::debug!("AD9833 {} = {} Hz ({})", reg, f_out_hz, self.write_mode());

        self.freq[reg as usize] = f_out_hz;
        match self.write_mode() {
            WriteMode::Both => {
                self.write_word(lsb.w)?;
                self.write_word(msb.w)
            }
            WriteMode::MostSignificantOnly => self.write_word(msb.w),
            WriteMode::LeastSignificantOnly => self.write_word(lsb.w),
        }
    }

    /// Like [`set_frequency`](Self::set_frequency) with a raw register select.
    pub fn set_frequency_raw(self: &mut Self, f_out_hz: f64, reg: u8) -> Result<(), Error<T::Error>> {
        self.set_frequency(f_out_hz, FreqReg::try_from(reg)?)
    }

    /// Programs phase register `reg`, always a single write.
    pub fn set_phase(self: &mut Self, angle: f32, reg: PhaseReg, unit: AngleUnit) -> Result<(), Error<T::Error>> {
        let p = PhaseWord::from_angle(angle, unit);

        #[cfg(feature = "defmt")]
        defmt::debug!("AD9833 {} = {} steps", reg, p.0);

        self.phase[reg as usize] = match unit {
            AngleUnit::Radians => angle,
            AngleUnit::Degrees => angle.to_radians(),
        };
        self.write_word(p.to_reg(reg).w)
    }

    /// Sets B28 / HLB, used by every following frequency write.
    pub fn set_write_mode(self: &mut Self, m: WriteMode) -> Result<(), Error<T::Error>> {
        self.set_control_fields(ControlUpdate::default().write_mode(m))
    }

    /// Sets the output stage bits, register selects and write mode are kept.
    pub fn set_output_mode(self: &mut Self, m: OutputMode) -> Result<(), Error<T::Error>> {
        self.set_control_fields(ControlUpdate::default().output_mode(m))
    }

    /// Picks the frequency and phase registers the DDS core reads.
    pub fn select_active_registers(self: &mut Self, f: FreqReg, p: PhaseReg) -> Result<(), Error<T::Error>> {
        self.set_control_fields(ControlUpdate::default().freq_select(f).phase_select(p))
    }

    /// Sends one raw 16 bit word.
    ///
    /// Control words sent this way are not reflected in [`control`](Self::control).
    pub fn write_word(self: &mut Self, w: u16) -> Result<(), Error<T::Error>> {
        #[cfg(feature = "defmt")]
        defmt::trace!("AD9833 <- {=u16:#x}", w);

        self.transport.transmit(&w.to_be_bytes()).map_err(Error::Transport)
    }

    fn write_control(self: &mut Self) -> Result<(), Error<T::Error>> {
        let r = self.control.to_word();
        self.write_word(r.w)
    }
}
