//! Bus interfaces for talking to the PCM51xx.
//!
//! The PCM51xx speaks the same byte-register protocol over I²C and SPI. Each
//! transaction reads or writes one register on the currently selected page.
//! The driver is generic over [`RegisterInterface`], so it does not care
//! which bus sits underneath.

use embedded_hal::blocking::i2c::{Write as I2cWrite, WriteRead};
use embedded_hal::blocking::spi::{Transfer, Write as SpiWrite};
use embedded_hal::digital::v2::OutputPin;

use core::fmt::Debug;

//
// Public Types
//

/// Something that can move one byte to or from a PCM51xx register.
pub trait RegisterInterface {
    /// The error produced when a bus transaction fails
    type Error: Debug;

    /// Put the bus into its idle state before the first transaction.
    fn init(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Write `value` to the register at `address` on the current page.
    fn write_register(&mut self, address: u8, value: u8) -> Result<(), Self::Error>;

    /// Read the register at `address` on the current page.
    fn read_register(&mut self, address: u8) -> Result<u8, Self::Error>;
}

/// A PCM51xx attached to an I²C bus.
#[derive(Debug)]
pub struct I2cInterface<I2C> {
    i2c: I2C,
    bus_address: u8,
}

/// A PCM51xx attached to an SPI bus, with its own chip-select pin.
///
/// The bus must be configured for [`SPI_MODE`], MSB first, at no more than
/// [`SPI_FREQUENCY_HZ`].
#[derive(Debug)]
pub struct SpiInterface<SPI, CS> {
    spi: SPI,
    cs: CS,
}

/// Errors from an [`SpiInterface`]
#[derive(Debug, Copy, Clone, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SpiInterfaceError<S: Debug, P: Debug> {
    /// The SPI transfer failed
    #[error("SPI transfer failed")]
    Spi(S),
    /// The chip-select pin could not be driven
    #[error("chip-select pin failed")]
    ChipSelect(P),
}

/// Either an I²C or an SPI binding, chosen at runtime.
///
/// Only one can be bound at a time. Software SPI is an SPI binding over a
/// [`SoftwareSpi`](crate::SoftwareSpi) bus.
#[derive(Debug)]
pub enum Transport<I2C, SPI, CS> {
    /// Bound over I²C
    I2c(I2cInterface<I2C>),
    /// Bound over SPI
    Spi(SpiInterface<SPI, CS>),
}

/// Errors from a [`Transport`]
#[derive(Debug, Copy, Clone, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransportError<I: Debug, S: Debug> {
    /// The I²C binding failed
    #[error("I²C transport failed")]
    I2c(I),
    /// The SPI binding failed
    #[error("SPI transport failed")]
    Spi(S),
}

//
// Public Data
//

/// The PCM51xx I²C address with both ADR pins low.
pub const DEFAULT_I2C_ADDRESS: u8 = 0x4C;

/// The PCM51xx samples on the rising edge with the clock idling low.
pub const SPI_MODE: embedded_hal::spi::Mode = embedded_hal::spi::MODE_0;

/// The SPI clock rate the driver is tested against.
pub const SPI_FREQUENCY_HZ: u32 = 1_000_000;

//
// Private Data
//

/// Set in the SPI address byte to request a read
const SPI_READ_FLAG: u8 = 0x80;

//
// impls on Public Types
//

impl<I2C> I2cInterface<I2C> {
    /// Bind to the PCM51xx at the given 7-bit I²C address.
    pub fn new(i2c: I2C, bus_address: u8) -> I2cInterface<I2C> {
        I2cInterface { i2c, bus_address }
    }

    /// The 7-bit I²C address in use.
    pub fn bus_address(&self) -> u8 {
        self.bus_address
    }

    /// Give back the I²C bus.
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C, E> RegisterInterface for I2cInterface<I2C>
where
    I2C: I2cWrite<Error = E> + WriteRead<Error = E>,
    E: Debug,
{
    type Error = E;

    fn write_register(&mut self, address: u8, value: u8) -> Result<(), E> {
        self.i2c.write(self.bus_address, &[address, value])
    }

    fn read_register(&mut self, address: u8) -> Result<u8, E> {
        let mut buffer = [0u8; 1];
        self.i2c.write_read(self.bus_address, &[address], &mut buffer)?;
        Ok(buffer[0])
    }
}

impl<SPI, CS> SpiInterface<SPI, CS> {
    /// Bind to the PCM51xx selected by `cs`.
    pub fn new(spi: SPI, cs: CS) -> SpiInterface<SPI, CS> {
        SpiInterface { spi, cs }
    }

    /// Give back the SPI bus and the chip-select pin.
    pub fn release(self) -> (SPI, CS) {
        (self.spi, self.cs)
    }
}

impl<SPI, CS, P> SpiInterface<SPI, CS>
where
    CS: OutputPin<Error = P>,
    P: Debug,
{
    /// Run `f` with chip-select asserted. CS is released even if `f` fails.
    fn selected<T, E: Debug>(
        &mut self,
        f: impl FnOnce(&mut SPI) -> Result<T, E>,
    ) -> Result<T, SpiInterfaceError<E, P>> {
        self.cs.set_low().map_err(SpiInterfaceError::ChipSelect)?;
        let result = f(&mut self.spi);
        self.cs.set_high().map_err(SpiInterfaceError::ChipSelect)?;
        result.map_err(SpiInterfaceError::Spi)
    }
}

impl<SPI, CS, E, P> RegisterInterface for SpiInterface<SPI, CS>
where
    SPI: Transfer<u8, Error = E> + SpiWrite<u8, Error = E>,
    CS: OutputPin<Error = P>,
    E: Debug,
    P: Debug,
{
    type Error = SpiInterfaceError<E, P>;

    fn init(&mut self) -> Result<(), Self::Error> {
        self.cs.set_high().map_err(SpiInterfaceError::ChipSelect)
    }

    fn write_register(&mut self, address: u8, value: u8) -> Result<(), Self::Error> {
        let buffer = [address & !SPI_READ_FLAG, value];
        self.selected(|bus| bus.write(&buffer))
    }

    fn read_register(&mut self, address: u8) -> Result<u8, Self::Error> {
        let mut buffer = [address | SPI_READ_FLAG, 0x00];
        self.selected(|bus| bus.transfer(&mut buffer).map(|rx| rx[1]))
    }
}

impl<I2C, SPI, CS> RegisterInterface for Transport<I2C, SPI, CS>
where
    I2cInterface<I2C>: RegisterInterface,
    SpiInterface<SPI, CS>: RegisterInterface,
{
    type Error = TransportError<
        <I2cInterface<I2C> as RegisterInterface>::Error,
        <SpiInterface<SPI, CS> as RegisterInterface>::Error,
    >;

    fn init(&mut self) -> Result<(), Self::Error> {
        match self {
            Transport::I2c(i2c) => i2c.init().map_err(TransportError::I2c),
            Transport::Spi(spi) => spi.init().map_err(TransportError::Spi),
        }
    }

    fn write_register(&mut self, address: u8, value: u8) -> Result<(), Self::Error> {
        match self {
            Transport::I2c(i2c) => i2c
                .write_register(address, value)
                .map_err(TransportError::I2c),
            Transport::Spi(spi) => spi
                .write_register(address, value)
                .map_err(TransportError::Spi),
        }
    }

    fn read_register(&mut self, address: u8) -> Result<u8, Self::Error> {
        match self {
            Transport::I2c(i2c) => i2c.read_register(address).map_err(TransportError::I2c),
            Transport::Spi(spi) => spi.read_register(address).map_err(TransportError::Spi),
        }
    }
}

//
// Tests
//


//
// End of file
//
