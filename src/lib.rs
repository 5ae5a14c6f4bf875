#![no_std]

//! [AD9833](https://www.analog.com/en/products/ad9833.html) driver.
//!
//! ```ignore
//! let bus = SpiTransport::new(spi, pin_fsync)?;
//! let mut dds = Ad9833::new(bus);
//! dds.init()?;
//! dds.set_frequency(1_300.0, FreqReg::F0)?;
//! dds.set_phase(180.0, PhaseReg::P1, AngleUnit::Degrees)?;
//! dds.select_active_registers(FreqReg::F0, PhaseReg::P0)?;
//! dds.set_output_mode(OutputMode::Sine)?;
//! ```

#[cfg(test)]
extern crate std;

pub mod constants;
pub mod register;
pub mod errors;
pub mod config;
pub mod control;
pub mod frequency;
pub mod phase;
pub mod transport;
pub mod device;

pub use config::Mclk;
pub use control::{ControlState, ControlUpdate, OutputMode, WriteMode};
pub use device::Ad9833;
pub use errors::{Error, RangeError, TransportError};
pub use phase::AngleUnit;
pub use register::{FreqReg, PhaseReg, Waveform};
pub use transport::{SpiTransport, Transport};
