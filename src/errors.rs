//! Errors

/// Request rejected before anything was sent to the device
#[derive(Debug,Copy,Clone,PartialEq,Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RangeError {
    /// Requested output frequency is negative or at/above MCLK / 2
    OutputFrequency,
    /// Register select outside of {0, 1}
    RegisterSelect,
    /// MCLK is zero or above the part's maximum
    ClockFrequency,
}


/// Driver error, `E` is the transport error
#[derive(Debug,Copy,Clone,PartialEq,Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// Invalid argument, nothing was transmitted and driver state is unchanged
    Range(RangeError),
    /// Bus failure, passed through as is.
    /// Part of a multi-word sequence may have reached the device.
    Transport(E),
}

impl<E> From<RangeError> for Error<E> {
    #[inline]
    fn from(e: RangeError) -> Self {
        Error::Range(e)
    }
}


/// [`SpiTransport`](crate::transport::SpiTransport) error
#[derive(Debug,Copy,Clone,PartialEq,Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransportError<SpiE, PinE> {
    /// SPI write failed
    Spi(SpiE),
    /// FSYNC pin could not be driven
    Fsync(PinE),
}
