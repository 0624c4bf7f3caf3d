//! # PCM51xx Driver
//!
//! This is driver for the Texas Instruments PCM51xx family of audio DACs
//! (PCM5100 through PCM5142), such as the one on the Adafruit PCM5122 I²S
//! DAC breakout.
//!
//! Specifically, this driver is for setting the registers in the PCM51xx
//! over I²C or SPI - this driver does not handle the digital audio interface
//! (I²S, or similar). It only configures it.
//!
//! The PCM51xx register map is split into pages. Offset 0x00 on every page
//! selects the current page, and every other offset is only meaningful
//! relative to it. The [`Pcm51xx`] object remembers which page it last
//! selected, so it only changes page when it has to.
//!
//! Status (standby, powerdown, PLL lock, DSP boot, power state) is always read
//! fresh from the chip, because the chip changes it on its own.
//!
//! # Example
//!
//! You might bring up the DAC like this:
//!
//! ```rust
//! # struct I2c;
//! # impl embedded_hal::blocking::i2c::Write for I2c {
//! #     type Error = ();
//! #     fn write(&mut self, _address: u8, _bytes: &[u8]) -> Result<(), Self::Error> {
//! #         Ok(())
//! #     }
//! # }
//! # impl embedded_hal::blocking::i2c::WriteRead for I2c {
//! #     type Error = ();
//! #     fn write_read(&mut self, _address: u8, _bytes: &[u8], buffer: &mut [u8]) -> Result<(), Self::Error> {
//! #         buffer.fill(0);
//! #         Ok(())
//! #     }
//! # }
//! # struct Delay;
//! # impl embedded_hal::blocking::delay::DelayMs<u8> for Delay {
//! #     fn delay_ms(&mut self, _ms: u8) {}
//! # }
//! # let i2c = I2c;
//! # let delay = Delay;
//! let mut dac = pcm51xx::Pcm51xx::new_i2c(i2c, pcm51xx::DEFAULT_I2C_ADDRESS, delay);
//! if let Err(_e) = dac.begin() {
//!     // DAC didn't respond, or didn't come out of reset
//! }
//! // `begin` leaves the DAC muted
//! dac.set_i2s_size(pcm51xx::I2sSize::Bits24).unwrap();
//! dac.set_volume_db(-6.0, -6.0).unwrap();
//! dac.mute(false).unwrap();
//! ```

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]
#![deny(missing_docs)]

use core::fmt::Debug;

use embedded_hal::blocking::delay::DelayMs;

mod interface;
mod register;
mod soft_spi;

pub use interface::{
    I2cInterface, RegisterInterface, SpiInterface, SpiInterfaceError, Transport, TransportError,
    DEFAULT_I2C_ADDRESS, SPI_FREQUENCY_HZ, SPI_MODE,
};
pub use register::Register;
pub use soft_spi::SoftwareSpi;

use register::Field;

//
// Public Types
//

/// Errors you can get from the [`Pcm51xx`] driver.
#[derive(Debug, Copy, Clone, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E: Debug> {
    /// A bus transaction failed
    #[error("bus transaction failed")]
    Bus(E),
    /// A self-clearing reset bit did not clear within [`RESET_TIMEOUT_MS`]
    #[error("timed out waiting for reset to complete")]
    Timeout,
    /// GPIO pins are numbered 1 to 6. Nothing was sent to the chip.
    #[error("GPIO pin {0} does not exist")]
    InvalidPin(u8),
    /// The chip reported a field value that has no meaning
    #[error("register field held reserved value {0:#04x}")]
    ReservedValue(u8),
}

/// How the audio samples are framed on the I²S lines.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum I2sFormat {
    /// I²S Format (i.e. MSB first, `left-1` aligned)
    #[default]
    I2s = 0b00,
    /// TDM / DSP Format
    Tdm = 0b01,
    /// MSB First, Right Justified
    RightJustified = 0b10,
    /// MSB First, Left Justified
    LeftJustified = 0b11,
}

/// The size, in bits, of each sample
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum I2sSize {
    /// 16-bit samples
    Bits16 = 0b00,
    /// 20-bit samples
    Bits20 = 0b01,
    /// 24-bit samples. This is the chip's reset default.
    #[default]
    Bits24 = 0b10,
    /// 32-bit samples
    Bits32 = 0b11,
}

/// Which clock the PLL locks to
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PllReference {
    /// The system clock (SCK / MCLK) pin
    #[default]
    Sck = 0,
    /// The bit clock (BCK) pin
    Bck = 1,
    /// A GPIO pin, chosen by [`Register::GPIO_PLL_REF`]
    Gpio = 3,
}

/// Where the DAC gets its clock from
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DacClockSource {
    /// Master clock (PLL/SCK and oscillator auto-select)
    #[default]
    Master = 0,
    /// The PLL output
    Pll = 1,
    /// The SCK pin directly
    Sck = 3,
    /// The BCK pin directly
    Bck = 4,
}

/// What the chip's power sequencer is doing. Read only.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PowerState {
    /// Powered down
    #[default]
    Powerdown = 0,
    /// Waiting for the charge pump voltage to become valid
    WaitChargePump = 1,
    /// Calibrating
    Calibration1 = 2,
    /// Calibrating
    Calibration2 = 3,
    /// Ramping the volume up
    VolumeRampUp = 4,
    /// Running (playing)
    Run = 5,
    /// Line output short, or load impedance too low
    LineShort = 6,
    /// Ramping the volume down
    VolumeRampDown = 7,
    /// In standby
    Standby = 8,
}

/// The signal driven out of a GPIO pin, when that pin is an output.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GpioOutput {
    /// Driven low
    #[default]
    Off = 0x00,
    /// Driven by the DSP
    DspOutput = 0x01,
    /// Driven by the pin's bit in [`Register::GPIO_CONTROL`]
    RegisterOutput = 0x02,
    /// Auto mute flag, both channels
    AutoMuteFlag = 0x03,
    /// Auto mute flag, left channel
    AutoMuteLeft = 0x04,
    /// Auto mute flag, right channel
    AutoMuteRight = 0x05,
    /// Clock invalid flag
    ClockInvalid = 0x06,
    /// Serial audio interface data output
    Sdout = 0x07,
    /// Analog mute flag, left channel (active low)
    AnalogMuteLeft = 0x08,
    /// Analog mute flag, right channel (active low)
    AnalogMuteRight = 0x09,
    /// PLL lock flag
    PllLock = 0x0A,
    /// Charge pump clock
    ChargePumpClock = 0x0B,
    /// Under-voltage flag at 0.7 DVDD
    UnderVoltage07 = 0x0E,
    /// Under-voltage flag at 0.3 DVDD
    UnderVoltage03 = 0x0F,
    /// PLL output divided by 4 (needs Clock Flex mode)
    PllOutputDiv4 = 0x10,
}

/// Represents our PCM51xx chip, and whichever bus it is bound to.
pub struct Pcm51xx<IFACE, DELAY> {
    interface: IFACE,
    delay: DELAY,
    /// The page we last selected, or `None` if we don't know.
    page: Option<u8>,
}

//
// Public Data
//

/// How long to wait between polls of a self-clearing reset bit
pub const RESET_POLL_INTERVAL_MS: u8 = 1;

/// How long a reset may take before we give up on it
pub const RESET_TIMEOUT_MS: u8 = 100;

/// The loudest volume setting, register code 0x00
pub const VOLUME_MAX_DB: f32 = 24.0;

/// The quietest volume setting, register code 0xFF
pub const VOLUME_MIN_DB: f32 = -103.5;

/// The size of one volume step
pub const VOLUME_STEP_DB: f32 = 0.5;

//
// Private Data
//

/// Auto mute is only enabled when both channels and the link bit are set
const AUTO_MUTE_ENABLED: u8 = 0b111;

/// GPIO pins are numbered from 1
const GPIO_PINS: core::ops::RangeInclusive<u8> = 1..=6;

//
// impls on Public Types
//

impl TryFrom<u8> for PllReference {
    type Error = u8;

    fn try_from(bits: u8) -> Result<PllReference, u8> {
        match bits {
            0 => Ok(PllReference::Sck),
            1 => Ok(PllReference::Bck),
            3 => Ok(PllReference::Gpio),
            _ => Err(bits),
        }
    }
}

impl TryFrom<u8> for DacClockSource {
    type Error = u8;

    fn try_from(bits: u8) -> Result<DacClockSource, u8> {
        match bits {
            0 => Ok(DacClockSource::Master),
            1 => Ok(DacClockSource::Pll),
            3 => Ok(DacClockSource::Sck),
            4 => Ok(DacClockSource::Bck),
            _ => Err(bits),
        }
    }
}

impl TryFrom<u8> for PowerState {
    type Error = u8;

    fn try_from(bits: u8) -> Result<PowerState, u8> {
        match bits {
            0 => Ok(PowerState::Powerdown),
            1 => Ok(PowerState::WaitChargePump),
            2 => Ok(PowerState::Calibration1),
            3 => Ok(PowerState::Calibration2),
            4 => Ok(PowerState::VolumeRampUp),
            5 => Ok(PowerState::Run),
            6 => Ok(PowerState::LineShort),
            7 => Ok(PowerState::VolumeRampDown),
            8 => Ok(PowerState::Standby),
            _ => Err(bits),
        }
    }
}

impl TryFrom<u8> for GpioOutput {
    type Error = u8;

    fn try_from(bits: u8) -> Result<GpioOutput, u8> {
        match bits {
            0x00 => Ok(GpioOutput::Off),
            0x01 => Ok(GpioOutput::DspOutput),
            0x02 => Ok(GpioOutput::RegisterOutput),
            0x03 => Ok(GpioOutput::AutoMuteFlag),
            0x04 => Ok(GpioOutput::AutoMuteLeft),
            0x05 => Ok(GpioOutput::AutoMuteRight),
            0x06 => Ok(GpioOutput::ClockInvalid),
            0x07 => Ok(GpioOutput::Sdout),
            0x08 => Ok(GpioOutput::AnalogMuteLeft),
            0x09 => Ok(GpioOutput::AnalogMuteRight),
            0x0A => Ok(GpioOutput::PllLock),
            0x0B => Ok(GpioOutput::ChargePumpClock),
            0x0E => Ok(GpioOutput::UnderVoltage07),
            0x0F => Ok(GpioOutput::UnderVoltage03),
            0x10 => Ok(GpioOutput::PllOutputDiv4),
            _ => Err(bits),
        }
    }
}

impl I2sFormat {
    /// Decode a two-bit field. Every value is valid.
    fn from_bits(bits: u8) -> I2sFormat {
        match bits & 0b11 {
            0b00 => I2sFormat::I2s,
            0b01 => I2sFormat::Tdm,
            0b10 => I2sFormat::RightJustified,
            _ => I2sFormat::LeftJustified,
        }
    }
}

impl I2sSize {
    /// Decode a two-bit field. Every value is valid.
    fn from_bits(bits: u8) -> I2sSize {
        match bits & 0b11 {
            0b00 => I2sSize::Bits16,
            0b01 => I2sSize::Bits20,
            0b10 => I2sSize::Bits24,
            _ => I2sSize::Bits32,
        }
    }
}

impl<IFACE, DELAY> Pcm51xx<IFACE, DELAY> {
    /// Create a new PCM51xx driver on an already-built bus interface.
    ///
    /// Nothing is sent to the chip until you call [`Pcm51xx::begin`].
    pub fn new(interface: IFACE, delay: DELAY) -> Pcm51xx<IFACE, DELAY> {
        Pcm51xx {
            interface,
            delay,
            page: None,
        }
    }

    /// Tear down the binding, giving back the bus interface and the delay.
    pub fn release(self) -> (IFACE, DELAY) {
        (self.interface, self.delay)
    }

    /// Swap to a different bus interface, giving back the old one.
    ///
    /// The page cache starts out invalid, so call [`Pcm51xx::begin`] next.
    pub fn rebind<NEW>(self, interface: NEW) -> (Pcm51xx<NEW, DELAY>, IFACE) {
        (Pcm51xx::new(interface, self.delay), self.interface)
    }

    /// The page we believe is selected on the chip, if we know.
    pub fn cached_page(&self) -> Option<u8> {
        self.page
    }

    /// Forget which page is selected, so the next register access selects
    /// it again.
    ///
    /// Call this if the chip may have been reset or power cycled behind our
    /// back (e.g. with its hardware reset pin).
    pub fn invalidate_page_cache(&mut self) {
        self.page = None;
    }
}

impl<I2C, DELAY> Pcm51xx<I2cInterface<I2C>, DELAY> {
    /// Create a PCM51xx driver for a chip on an I²C bus.
    ///
    /// The `bus_address` is normally [`DEFAULT_I2C_ADDRESS`].
    pub fn new_i2c(i2c: I2C, bus_address: u8, delay: DELAY) -> Self {
        Pcm51xx::new(I2cInterface::new(i2c, bus_address), delay)
    }
}

impl<SPI, CS, DELAY> Pcm51xx<SpiInterface<SPI, CS>, DELAY> {
    /// Create a PCM51xx driver for a chip on a hardware SPI bus.
    ///
    /// Configure the bus for [`SPI_MODE`], MSB first, at [`SPI_FREQUENCY_HZ`].
    pub fn new_spi(spi: SPI, cs: CS, delay: DELAY) -> Self {
        Pcm51xx::new(SpiInterface::new(spi, cs), delay)
    }
}

impl<CS, MOSI, MISO, SCK, DELAY> Pcm51xx<SpiInterface<SoftwareSpi<MOSI, MISO, SCK>, CS>, DELAY> {
    /// Create a PCM51xx driver that bit-bangs SPI over four GPIO pins.
    pub fn new_software_spi(cs: CS, mosi: MOSI, miso: MISO, sclk: SCK, delay: DELAY) -> Self {
        Pcm51xx::new(
            SpiInterface::new(SoftwareSpi::new(mosi, miso, sclk), cs),
            delay,
        )
    }
}

impl<IFACE, DELAY> Pcm51xx<IFACE, DELAY>
where
    IFACE: RegisterInterface,
    DELAY: DelayMs<u8>,
{
    /// Bring the chip up into a known state.
    ///
    /// Resets every register and the internal modules, brings the chip out of
    /// powerdown and standby, and then configures it for:
    ///
    /// * all clock error detection ignored, clock divider auto-set on
    /// * PLL enabled, locked to BCK, and clocking the DAC
    /// * I²S format, 16-bit samples
    /// * auto mute off
    /// * both channels muted
    ///
    /// Any failing step aborts the whole sequence.
    pub fn begin(&mut self) -> Result<(), Error<IFACE::Error>> {
        // The chip may be on any page - don't trust the cache
        self.page = None;
        self.interface.init().map_err(Error::Bus)?;
        self.select_page(0)?;
        self.standby(true)?;
        self.reset_registers()?;
        self.reset_modules()?;
        self.powerdown(false)?;
        self.standby(false)?;
        self.apply_defaults()?;
        #[cfg(feature = "defmt")]
        defmt::debug!("PCM51xx is up");
        Ok(())
    }

    /// The default configuration applied at the end of [`Pcm51xx::begin`].
    fn apply_defaults(&mut self) -> Result<(), Error<IFACE::Error>> {
        self.ignore_fs_detect(true)?;
        self.ignore_bck_detect(true)?;
        self.ignore_sck_detect(true)?;
        self.ignore_clock_halt(true)?;
        self.ignore_clock_missing(true)?;
        self.disable_clock_autoset(false)?;
        self.ignore_pll_unlock(true)?;
        self.enable_pll(true)?;
        self.set_pll_reference(PllReference::Bck)?;
        self.set_dac_source(DacClockSource::Pll)?;
        self.set_i2s_format(I2sFormat::I2s)?;
        self.set_i2s_size(I2sSize::Bits16)?;
        self.set_auto_mute(false)?;
        // No noise until someone asks for it
        self.mute(true)
    }

    /// Make sure `page` is selected on the chip.
    ///
    /// Does nothing if we already selected it. If the write fails, we carry
    /// on believing the old page is selected.
    pub fn select_page(&mut self, page: u8) -> Result<(), Error<IFACE::Error>> {
        if self.page == Some(page) {
            return Ok(());
        }
        #[cfg(feature = "defmt")]
        defmt::debug!("Selecting PCM51xx page {}", page);
        self.interface
            .write_register(Register::PAGE_SELECT.address, page)
            .map_err(Error::Bus)?;
        self.page = Some(page);
        Ok(())
    }

    /// Read any register, selecting its page first.
    pub fn read_register(&mut self, register: Register) -> Result<u8, Error<IFACE::Error>> {
        self.select_page(register.page)?;
        self.interface
            .read_register(register.address)
            .map_err(Error::Bus)
    }

    /// Write any register, selecting its page first.
    ///
    /// Writing offset 0x00 on any page selects page `value`, exactly like
    /// [`Pcm51xx::select_page`].
    pub fn write_register(
        &mut self,
        register: Register,
        value: u8,
    ) -> Result<(), Error<IFACE::Error>> {
        if register.address == Register::PAGE_SELECT.address {
            return self.select_page(value);
        }
        self.select_page(register.page)?;
        #[cfg(feature = "defmt")]
        defmt::trace!(
            "Setting PCM51xx {}:0x{:02x} to 0x{:02x}",
            register.page,
            register.address,
            value
        );
        self.interface
            .write_register(register.address, value)
            .map_err(Error::Bus)
    }

    /// Update some of the bits in a register
    fn modify_register(
        &mut self,
        register: Register,
        mask: u8,
        value: u8,
    ) -> Result<(), Error<IFACE::Error>> {
        let current = self.read_register(register)?;
        // Clear the bits we want to change, then set any as necessary
        self.write_register(register, (current & !mask) | (value & mask))
    }

    fn read_field(&mut self, field: Field) -> Result<u8, Error<IFACE::Error>> {
        let value = self.read_register(field.register)?;
        Ok(field.extract(value))
    }

    fn write_field(&mut self, field: Field, value: u8) -> Result<(), Error<IFACE::Error>> {
        let current = self.read_register(field.register)?;
        self.write_register(field.register, field.insert(current, value))
    }

    fn read_flag(&mut self, field: Field) -> Result<bool, Error<IFACE::Error>> {
        Ok(self.read_field(field)? == 1)
    }

    fn write_flag(&mut self, field: Field, set: bool) -> Result<(), Error<IFACE::Error>> {
        self.write_field(field, set as u8)
    }

    /// Set a self-clearing reset bit, then wait for the chip to clear it.
    fn reset(&mut self, field: Field) -> Result<(), Error<IFACE::Error>> {
        self.write_flag(field, true)?;
        for _ in 0..(RESET_TIMEOUT_MS / RESET_POLL_INTERVAL_MS) {
            if !self.read_flag(field)? {
                return Ok(());
            }
            self.delay.delay_ms(RESET_POLL_INTERVAL_MS);
        }
        #[cfg(feature = "defmt")]
        defmt::warn!("PCM51xx reset bit 0x{:02x} never cleared", field.mask());
        Err(Error::Timeout)
    }

    /// Put every register back to its default value.
    ///
    /// Blocks for up to [`RESET_TIMEOUT_MS`] while the chip does it.
    pub fn reset_registers(&mut self) -> Result<(), Error<IFACE::Error>> {
        self.reset(Field::RESET_REGISTERS)
    }

    /// Reset the interpolation filter and the DAC modules.
    ///
    /// Blocks for up to [`RESET_TIMEOUT_MS`] while the chip does it.
    pub fn reset_modules(&mut self) -> Result<(), Error<IFACE::Error>> {
        self.reset(Field::RESET_MODULES)
    }

    /// Request standby mode, or request to leave it.
    pub fn standby(&mut self, enable: bool) -> Result<(), Error<IFACE::Error>> {
        self.write_flag(Field::STANDBY_REQUEST, enable)
    }

    /// Get whether standby is requested.
    pub fn is_standby(&mut self) -> Result<bool, Error<IFACE::Error>> {
        self.read_flag(Field::STANDBY_REQUEST)
    }

    /// Request powerdown mode, or request to leave it.
    ///
    /// Powerdown is deeper than standby. Leave powerdown before leaving
    /// standby.
    pub fn powerdown(&mut self, enable: bool) -> Result<(), Error<IFACE::Error>> {
        self.write_flag(Field::POWERDOWN_REQUEST, enable)
    }

    /// Get whether powerdown is requested.
    pub fn is_powerdown(&mut self) -> Result<bool, Error<IFACE::Error>> {
        self.read_flag(Field::POWERDOWN_REQUEST)
    }

    /// Set how samples are framed on the I²S lines.
    pub fn set_i2s_format(&mut self, format: I2sFormat) -> Result<(), Error<IFACE::Error>> {
        self.write_field(Field::I2S_FORMAT, format as u8)
    }

    /// Get how samples are framed on the I²S lines.
    pub fn i2s_format(&mut self) -> Result<I2sFormat, Error<IFACE::Error>> {
        Ok(I2sFormat::from_bits(self.read_field(Field::I2S_FORMAT)?))
    }

    /// Set the I²S word length.
    pub fn set_i2s_size(&mut self, size: I2sSize) -> Result<(), Error<IFACE::Error>> {
        self.write_field(Field::I2S_SIZE, size as u8)
    }

    /// Get the I²S word length.
    pub fn i2s_size(&mut self) -> Result<I2sSize, Error<IFACE::Error>> {
        Ok(I2sSize::from_bits(self.read_field(Field::I2S_SIZE)?))
    }

    /// Choose which clock the PLL locks to.
    pub fn set_pll_reference(
        &mut self,
        reference: PllReference,
    ) -> Result<(), Error<IFACE::Error>> {
        self.write_field(Field::PLL_REFERENCE, reference as u8)
    }

    /// Get which clock the PLL locks to.
    pub fn pll_reference(&mut self) -> Result<PllReference, Error<IFACE::Error>> {
        let bits = self.read_field(Field::PLL_REFERENCE)?;
        PllReference::try_from(bits).map_err(Error::ReservedValue)
    }

    /// Turn the PLL on or off.
    pub fn enable_pll(&mut self, enable: bool) -> Result<(), Error<IFACE::Error>> {
        self.write_flag(Field::PLL_ENABLE, enable)
    }

    /// Get whether the PLL is on.
    pub fn is_pll_enabled(&mut self) -> Result<bool, Error<IFACE::Error>> {
        self.read_flag(Field::PLL_ENABLE)
    }

    /// Get whether the PLL has locked to its reference.
    pub fn is_pll_locked(&mut self) -> Result<bool, Error<IFACE::Error>> {
        // 0 means locked
        Ok(!self.read_flag(Field::PLL_LOCK)?)
    }

    /// Choose where the DAC gets its clock from.
    pub fn set_dac_source(&mut self, source: DacClockSource) -> Result<(), Error<IFACE::Error>> {
        self.write_field(Field::DAC_CLOCK_SOURCE, source as u8)
    }

    /// Get where the DAC gets its clock from.
    pub fn dac_source(&mut self) -> Result<DacClockSource, Error<IFACE::Error>> {
        let bits = self.read_field(Field::DAC_CLOCK_SOURCE)?;
        DacClockSource::try_from(bits).map_err(Error::ReservedValue)
    }

    /// Set the digital volume of each channel, in dB.
    ///
    /// * 24.0 dB is the loudest (register code 0x00)
    /// * 0.0 dB is unity gain
    /// * -103.5 dB is the quietest (register code 0xFF)
    ///
    /// There is 0.5 dB per step. Values are rounded to the nearest step and
    /// clamped to that range. NaN is treated as the quietest setting.
    pub fn set_volume_db(
        &mut self,
        left_db: f32,
        right_db: f32,
    ) -> Result<(), Error<IFACE::Error>> {
        self.write_register(Register::DIGITAL_VOLUME_L, volume_to_code(left_db))?;
        self.write_register(Register::DIGITAL_VOLUME_R, volume_to_code(right_db))
    }

    /// Get the digital volume of each channel, in dB, as `(left, right)`.
    ///
    /// See [`Pcm51xx::set_volume_db`].
    pub fn volume_db(&mut self) -> Result<(f32, f32), Error<IFACE::Error>> {
        let left = self.read_register(Register::DIGITAL_VOLUME_L)?;
        let right = self.read_register(Register::DIGITAL_VOLUME_R)?;
        Ok((code_to_volume(left), code_to_volume(right)))
    }

    /// Mute or unmute both channels.
    pub fn mute(&mut self, enable: bool) -> Result<(), Error<IFACE::Error>> {
        let mask = Field::MUTE_LEFT.mask() | Field::MUTE_RIGHT.mask();
        self.modify_register(Register::MUTE, mask, if enable { mask } else { 0 })
    }

    /// Get whether both channels are muted.
    ///
    /// Returns `false` if only one channel is muted.
    pub fn is_muted(&mut self) -> Result<bool, Error<IFACE::Error>> {
        let value = self.read_register(Register::MUTE)?;
        Ok(Field::MUTE_LEFT.extract(value) == 1 && Field::MUTE_RIGHT.extract(value) == 1)
    }

    /// Turn auto mute on or off, for both channels.
    ///
    /// Auto mute silences a channel when it sees a run of zero samples.
    pub fn set_auto_mute(&mut self, enable: bool) -> Result<(), Error<IFACE::Error>> {
        self.write_field(
            Field::AUTO_MUTE,
            if enable { AUTO_MUTE_ENABLED } else { 0 },
        )
    }

    /// Get whether auto mute is fully on.
    ///
    /// Any partial setting of the auto mute bits counts as off.
    pub fn auto_mute(&mut self) -> Result<bool, Error<IFACE::Error>> {
        Ok(self.read_field(Field::AUTO_MUTE)? == AUTO_MUTE_ENABLED)
    }

    /// Turn the de-emphasis filter on or off.
    pub fn enable_deemphasis(&mut self, enable: bool) -> Result<(), Error<IFACE::Error>> {
        self.write_flag(Field::DEEMPHASIS, enable)
    }

    /// Get whether the de-emphasis filter is on.
    pub fn is_deemphasized(&mut self) -> Result<bool, Error<IFACE::Error>> {
        self.read_flag(Field::DEEMPHASIS)
    }

    /// Ignore (or stop ignoring) FS errors.
    pub fn ignore_fs_detect(&mut self, ignore: bool) -> Result<(), Error<IFACE::Error>> {
        self.write_flag(Field::IGNORE_FS_DETECT, ignore)
    }

    /// Ignore (or stop ignoring) BCK errors.
    pub fn ignore_bck_detect(&mut self, ignore: bool) -> Result<(), Error<IFACE::Error>> {
        self.write_flag(Field::IGNORE_BCK_DETECT, ignore)
    }

    /// Ignore (or stop ignoring) SCK errors.
    pub fn ignore_sck_detect(&mut self, ignore: bool) -> Result<(), Error<IFACE::Error>> {
        self.write_flag(Field::IGNORE_SCK_DETECT, ignore)
    }

    /// Ignore (or stop ignoring) clock halts.
    pub fn ignore_clock_halt(&mut self, ignore: bool) -> Result<(), Error<IFACE::Error>> {
        self.write_flag(Field::IGNORE_CLOCK_HALT, ignore)
    }

    /// Ignore (or stop ignoring) a missing LRCK or BCK.
    pub fn ignore_clock_missing(&mut self, ignore: bool) -> Result<(), Error<IFACE::Error>> {
        self.write_flag(Field::IGNORE_CLOCK_MISSING, ignore)
    }

    /// Stop the chip picking its own clock dividers.
    ///
    /// Pass `false` to let the chip configure them automatically.
    pub fn disable_clock_autoset(&mut self, disable: bool) -> Result<(), Error<IFACE::Error>> {
        self.write_flag(Field::DISABLE_CLOCK_AUTOSET, disable)
    }

    /// Ignore (or stop ignoring) the PLL losing lock.
    pub fn ignore_pll_unlock(&mut self, ignore: bool) -> Result<(), Error<IFACE::Error>> {
        self.write_flag(Field::IGNORE_PLL_UNLOCK, ignore)
    }

    /// Get whether the DSP has finished booting.
    pub fn dsp_boot_done(&mut self) -> Result<bool, Error<IFACE::Error>> {
        self.read_flag(Field::DSP_BOOT_DONE)
    }

    /// Get what the power sequencer is doing.
    pub fn power_state(&mut self) -> Result<PowerState, Error<IFACE::Error>> {
        let bits = self.read_field(Field::POWER_STATE)?;
        PowerState::try_from(bits).map_err(Error::ReservedValue)
    }

    /// Choose VCOM output mode (`true`) or VREF mode (`false`).
    pub fn enable_vcom(&mut self, enable: bool) -> Result<(), Error<IFACE::Error>> {
        self.write_flag(Field::VCOM_MODE, enable)
    }

    /// Get whether the outputs are in VCOM mode.
    pub fn is_vcom_enabled(&mut self) -> Result<bool, Error<IFACE::Error>> {
        self.read_flag(Field::VCOM_MODE)
    }

    /// Power the VCOM driver up or down.
    pub fn set_vcom_power(&mut self, enable: bool) -> Result<(), Error<IFACE::Error>> {
        // 1 bit means off (it's the power *down* control)
        self.write_flag(Field::VCOM_POWER_DOWN, !enable)
    }

    /// Get whether the VCOM driver is powered.
    pub fn is_vcom_powered(&mut self) -> Result<bool, Error<IFACE::Error>> {
        Ok(!self.read_flag(Field::VCOM_POWER_DOWN)?)
    }

    /// Make GPIO `pin` (1 to 6) an output (`true`) or an input (`false`).
    pub fn set_gpio_direction(&mut self, pin: u8, output: bool) -> Result<(), Error<IFACE::Error>> {
        check_pin(pin)?;
        self.write_flag(Field::gpio_bit(Register::GPIO_ENABLE, pin), output)
    }

    /// Set the level of GPIO `pin` (1 to 6), for pins using
    /// [`GpioOutput::RegisterOutput`].
    pub fn set_gpio_register_output(
        &mut self,
        pin: u8,
        high: bool,
    ) -> Result<(), Error<IFACE::Error>> {
        check_pin(pin)?;
        self.write_flag(Field::gpio_bit(Register::GPIO_CONTROL, pin), high)
    }

    /// Choose what drives GPIO `pin` (1 to 6) when it is an output.
    pub fn set_gpio_output(
        &mut self,
        pin: u8,
        output: GpioOutput,
    ) -> Result<(), Error<IFACE::Error>> {
        check_pin(pin)?;
        self.write_field(Field::gpio_output(pin), output as u8)
    }

    /// Get what drives GPIO `pin` (1 to 6) when it is an output.
    pub fn gpio_output(&mut self, pin: u8) -> Result<GpioOutput, Error<IFACE::Error>> {
        check_pin(pin)?;
        let bits = self.read_field(Field::gpio_output(pin))?;
        GpioOutput::try_from(bits).map_err(Error::ReservedValue)
    }

    /// Read the level on GPIO `pin` (1 to 6).
    pub fn digital_read(&mut self, pin: u8) -> Result<bool, Error<IFACE::Error>> {
        check_pin(pin)?;
        self.read_flag(Field::gpio_bit(Register::GPIO_INPUT, pin))
    }
}

//
// Private Functions
//

/// Check a GPIO number before it goes anywhere near the bus
fn check_pin<E: Debug>(pin: u8) -> Result<(), Error<E>> {
    if GPIO_PINS.contains(&pin) {
        Ok(())
    } else {
        Err(Error::InvalidPin(pin))
    }
}

/// Convert dB to an attenuation code, rounding to the nearest step
fn volume_to_code(db: f32) -> u8 {
    let steps = (VOLUME_MAX_DB - db) / VOLUME_STEP_DB;
    if steps.is_nan() {
        return u8::MAX;
    }
    // Non-negative after the clamp, so adding a half and truncating rounds
    (steps.clamp(0.0, 255.0) + 0.5) as u8
}

/// Convert an attenuation code back to dB
fn code_to_volume(code: u8) -> f32 {
    VOLUME_MAX_DB - f32::from(code) * VOLUME_STEP_DB
}

//
// Tests
//


//
// End of file
//
