//! A bit-banged SPI bus, for boards where the PCM51xx is not wired to a
//! hardware SPI peripheral.
//!
//! Only SPI mode 0, MSB first - which is what the PCM51xx wants. Chip select
//! is not handled here; wrap the bus in an
//! [`SpiInterface`](crate::SpiInterface) along with the CS pin.

use embedded_hal::blocking::spi::{Transfer, Write};
use embedded_hal::digital::v2::{InputPin, OutputPin};

//
// Public Types
//

/// SPI over three GPIO pins.
///
/// The clock runs as fast as the pins can be toggled. There is no delay
/// between edges, so on fast cores make sure that stays below
/// [`SPI_FREQUENCY_HZ`](crate::SPI_FREQUENCY_HZ) or so.
#[derive(Debug)]
pub struct SoftwareSpi<MOSI, MISO, SCK> {
    mosi: MOSI,
    miso: MISO,
    sck: SCK,
}

//
// impls on Public Types
//

impl<MOSI, MISO, SCK> SoftwareSpi<MOSI, MISO, SCK> {
    /// Create a bus from its three data pins.
    pub fn new(mosi: MOSI, miso: MISO, sck: SCK) -> SoftwareSpi<MOSI, MISO, SCK> {
        SoftwareSpi { mosi, miso, sck }
    }

    /// Give back the pins, as `(mosi, miso, sck)`.
    pub fn release(self) -> (MOSI, MISO, SCK) {
        (self.mosi, self.miso, self.sck)
    }
}

impl<MOSI, MISO, SCK, E> SoftwareSpi<MOSI, MISO, SCK>
where
    MOSI: OutputPin<Error = E>,
    MISO: InputPin<Error = E>,
    SCK: OutputPin<Error = E>,
{
    /// Clock one byte out on MOSI while clocking one byte in from MISO.
    fn exchange(&mut self, out: u8) -> Result<u8, E> {
        let mut input = 0u8;
        for bit in (0..8).rev() {
            // Mode 0: data must be stable before the rising edge
            if out & (1 << bit) != 0 {
                self.mosi.set_high()?;
            } else {
                self.mosi.set_low()?;
            }
            self.sck.set_high()?;
            if self.miso.is_high()? {
                input |= 1 << bit;
            }
            self.sck.set_low()?;
        }
        Ok(input)
    }
}

impl<MOSI, MISO, SCK, E> Transfer<u8> for SoftwareSpi<MOSI, MISO, SCK>
where
    MOSI: OutputPin<Error = E>,
    MISO: InputPin<Error = E>,
    SCK: OutputPin<Error = E>,
{
    type Error = E;

    fn transfer<'w>(&mut self, words: &'w mut [u8]) -> Result<&'w [u8], E> {
        self.sck.set_low()?;
        for word in words.iter_mut() {
            *word = self.exchange(*word)?;
        }
        Ok(words)
    }
}

impl<MOSI, MISO, SCK, E> Write<u8> for SoftwareSpi<MOSI, MISO, SCK>
where
    MOSI: OutputPin<Error = E>,
    MISO: InputPin<Error = E>,
    SCK: OutputPin<Error = E>,
{
    type Error = E;

    fn write(&mut self, words: &[u8]) -> Result<(), E> {
        self.sck.set_low()?;
        for word in words {
            self.exchange(*word)?;
        }
        Ok(())
    }
}

//
// Tests
//


//
// End of file
//
