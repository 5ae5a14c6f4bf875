//! Bus transport
//!
//! The AD9833 takes 16 bit words, MSB first, framed by FSYNC held low for
//! the whole transfer.

use embedded_hal::{
    digital::v2::OutputPin,
    blocking::spi::Write,
    spi::{Mode, MODE_2},
};

use crate::errors::TransportError;


/// Data is clocked in on the falling edge of SCLK, SCLK idles high.
/// Some hosts only latch reliably in `MODE_3`.
pub const MODE: Mode = MODE_2;


/// Framed write-only link to the device
pub trait Transport {
    type Error;

    /// Sends `bytes` as a single framed transaction.
    fn transmit(&mut self, bytes: &[u8]) -> Result<(), Self::Error>;
}


/// SPI bus plus a FSYNC (chip select) pin
pub struct SpiTransport<SPI, FSYNC> {
    spi: SPI,
    pin_fsync: FSYNC,
}

impl<SPI, FSYNC> SpiTransport<SPI, FSYNC>
where SPI: Write<u8>,
      FSYNC: OutputPin,
{
    /// `spi` - SPI device (`MOSI` => `SDATA`, `CLK` => `SCLK`, see [`MODE`])
    /// `pin_fsync` - active low frame sync, driven high here
    pub fn new(
        spi: SPI,
        mut pin_fsync: FSYNC,
    ) -> Result<Self, TransportError<SPI::Error, FSYNC::Error>> {
        pin_fsync.set_high().map_err(TransportError::Fsync)?;
        Ok(SpiTransport { spi, pin_fsync })
    }

    /// Releases the bus and the pin
    pub fn free(self: Self) -> (SPI, FSYNC) {
        (self.spi, self.pin_fsync)
    }
}

impl<SPI, FSYNC> Transport for SpiTransport<SPI, FSYNC>
where SPI: Write<u8>,
      FSYNC: OutputPin,
{
    type Error = TransportError<SPI::Error, FSYNC::Error>;

    /// FSYNC goes back high even when the SPI write fails,
    /// the first error wins.
    fn transmit(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        self.pin_fsync.set_low().map_err(TransportError::Fsync)?;
        let written = self.spi.write(bytes).map_err(TransportError::Spi);
        let released = self.pin_fsync.set_high().map_err(TransportError::Fsync);
        written.and(released)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal_mock::{
        pin::{Mock as PinMock, State as PinState, Transaction as PinTransaction},
        spi::{Mock as SpiMock, Transaction as SpiTransaction},
        MockError,
    };
    use std::{io::ErrorKind, vec};

    #[test]
    fn new_parks_fsync_high() {
        let mut spi = SpiMock::new(&[]);
        let mut fsync = PinMock::new(&[PinTransaction::set(PinState::High)]);

        let t = SpiTransport::new(spi.clone(), fsync.clone()).unwrap();
        drop(t);

        spi.done();
        fsync.done();
    }

    #[test]
    fn transmit_frames_with_fsync() {
        let mut spi = SpiMock::new(&[SpiTransaction::write(vec![0x21, 0x00])]);
        let mut fsync = PinMock::new(&[
            PinTransaction::set(PinState::High),
            PinTransaction::set(PinState::Low),
            PinTransaction::set(PinState::High),
        ]);

        let mut t = SpiTransport::new(spi.clone(), fsync.clone()).unwrap();
        t.transmit(&[0x21, 0x00]).unwrap();

        spi.done();
        fsync.done();
    }

    #[test]
    fn fsync_failure_skips_write() {
        let err = MockError::Io(ErrorKind::NotConnected);
        let mut spi = SpiMock::new(&[]);
        let mut fsync = PinMock::new(&[
            PinTransaction::set(PinState::High),
            PinTransaction::set(PinState::Low).with_error(err.clone()),
        ]);

        let mut t = SpiTransport::new(spi.clone(), fsync.clone()).unwrap();
        assert_eq!(t.transmit(&[0x21, 0x00]), Err(TransportError::Fsync(err)));

        spi.done();
        fsync.done();
    }

    /// SPI bus that rejects every write
    struct DeadSpi;

    impl Write<u8> for DeadSpi {
        type Error = MockError;

        fn write(&mut self, _words: &[u8]) -> Result<(), MockError> {
            Err(MockError::Io(ErrorKind::BrokenPipe))
        }
    }

    #[test]
    fn spi_failure_still_releases_fsync() {
        let mut fsync = PinMock::new(&[
            PinTransaction::set(PinState::High),
            PinTransaction::set(PinState::Low),
            PinTransaction::set(PinState::High),
        ]);

        let mut t = SpiTransport::new(DeadSpi, fsync.clone()).unwrap();
        assert_eq!(
            t.transmit(&[0x21, 0x00]),
            Err(TransportError::Spi(MockError::Io(ErrorKind::BrokenPipe)))
        );

        fsync.done();
    }
}
