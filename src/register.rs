//! The PCM51xx register map.
//!
//! Every register lives on a page. Offset 0x00 is the page select register on
//! every page, so it can always be written no matter which page is current.

//
// Public Types
//

/// A byte-wide register, identified by its page and its offset within that
/// page.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Register {
    /// The page this register lives on
    pub page: u8,
    /// The offset of this register within its page
    pub address: u8,
}

//
// Private Types
//

/// A run of bits within a single register.
///
/// `width` bits starting at bit `shift`. Writing a field leaves every other
/// bit in the register untouched.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) struct Field {
    pub(crate) register: Register,
    pub(crate) width: u8,
    pub(crate) shift: u8,
}

//
// impls on Public Types
//

impl Register {
    const fn page0(address: u8) -> Register {
        Register { page: 0, address }
    }

    const fn page1(address: u8) -> Register {
        Register { page: 1, address }
    }

    /// Page select (present on every page)
    pub const PAGE_SELECT: Register = Register::page0(0x00);
    /// Register and module reset requests
    pub const RESET: Register = Register::page0(0x01);
    /// Standby and powerdown requests
    pub const STANDBY: Register = Register::page0(0x02);
    /// Soft mute requests, left and right
    pub const MUTE: Register = Register::page0(0x03);
    /// PLL enable and lock flag
    pub const PLL: Register = Register::page0(0x04);
    /// SPI MISO function select
    pub const SPI_MISO: Register = Register::page0(0x06);
    /// De-emphasis and SDOUT select
    pub const DEEMPHASIS: Register = Register::page0(0x07);
    /// GPIO output enables
    pub const GPIO_ENABLE: Register = Register::page0(0x08);
    /// BCK and LRCLK configuration
    pub const BCK_LRCLK: Register = Register::page0(0x09);
    /// DSP GPIO input
    pub const DSP_GPIO: Register = Register::page0(0x0A);
    /// Master mode BCK/LRCLK reset
    pub const MASTER_MODE_RESET: Register = Register::page0(0x0C);
    /// PLL reference clock select
    pub const PLL_REF: Register = Register::page0(0x0D);
    /// DAC clock source select
    pub const DAC_CLK_SRC: Register = Register::page0(0x0E);
    /// GPIO source for the PLL reference
    pub const GPIO_PLL_REF: Register = Register::page0(0x12);
    /// Clock sync request
    pub const SYNC_REQ: Register = Register::page0(0x13);
    /// PLL P divider
    pub const PLL_P: Register = Register::page0(0x14);
    /// PLL J divider
    pub const PLL_J: Register = Register::page0(0x15);
    /// PLL D divider, MSB
    pub const PLL_D_MSB: Register = Register::page0(0x16);
    /// PLL D divider, LSB
    pub const PLL_D_LSB: Register = Register::page0(0x17);
    /// PLL R divider
    pub const PLL_R: Register = Register::page0(0x18);
    /// DSP clock divider
    pub const DSP_CLK_DIV: Register = Register::page0(0x1B);
    /// DAC clock divider
    pub const DAC_CLK_DIV: Register = Register::page0(0x1C);
    /// Negative charge pump clock divider
    pub const NCP_CLK_DIV: Register = Register::page0(0x1D);
    /// Oversampling clock divider
    pub const OSR_CLK_DIV: Register = Register::page0(0x1E);
    /// Master mode BCK divider
    pub const MASTER_BCK_DIV: Register = Register::page0(0x20);
    /// Master mode LRCLK divider
    pub const MASTER_LRCK_DIV: Register = Register::page0(0x21);
    /// FS speed mode
    pub const FS_SPEED: Register = Register::page0(0x22);
    /// IDAC, MSB
    pub const IDAC_MSB: Register = Register::page0(0x23);
    /// IDAC, LSB
    pub const IDAC_LSB: Register = Register::page0(0x24);
    /// Clock error detection control
    pub const ERROR_DETECT: Register = Register::page0(0x25);
    /// I²S data format and word length
    pub const I2S_CONFIG: Register = Register::page0(0x28);
    /// I²S data offset
    pub const I2S_OFFSET: Register = Register::page0(0x29);
    /// I²S upsampling
    pub const I2S_UPSAMPLE: Register = Register::page0(0x2A);
    /// DSP program selection
    pub const DSP_PROGRAM: Register = Register::page0(0x2B);
    /// Clock missing detection period
    pub const CLK_MISSING: Register = Register::page0(0x2C);
    /// Auto mute time
    pub const AUTO_MUTE_TIME: Register = Register::page0(0x3B);
    /// Digital volume control
    pub const DIGITAL_VOLUME_CTL: Register = Register::page0(0x3C);
    /// Digital volume, left channel
    pub const DIGITAL_VOLUME_L: Register = Register::page0(0x3D);
    /// Digital volume, right channel
    pub const DIGITAL_VOLUME_R: Register = Register::page0(0x3E);
    /// Volume fade control
    pub const VOLUME_FADE: Register = Register::page0(0x3F);
    /// Emergency volume fade
    pub const VOLUME_FADE_EMERGENCY: Register = Register::page0(0x40);
    /// Auto mute control
    pub const AUTO_MUTE: Register = Register::page0(0x41);
    /// GPIO1 output selection. GPIO2..GPIO6 follow at consecutive offsets.
    pub const GPIO1_OUTPUT: Register = Register::page0(0x50);
    /// GPIO register output levels
    pub const GPIO_CONTROL: Register = Register::page0(0x56);
    /// GPIO output inversion
    pub const GPIO_INVERT: Register = Register::page0(0x57);
    /// DSP overflow flags
    pub const DSP_OVERFLOW: Register = Register::page0(0x5A);
    /// Sample rate detection 1
    pub const RATE_DETECT_1: Register = Register::page0(0x5B);
    /// Sample rate detection 2
    pub const RATE_DETECT_2: Register = Register::page0(0x5C);
    /// Sample rate detection 3
    pub const RATE_DETECT_3: Register = Register::page0(0x5D);
    /// Sample rate detection 4
    pub const RATE_DETECT_4: Register = Register::page0(0x5E);
    /// Clock error status
    pub const CLOCK_STATUS: Register = Register::page0(0x5F);
    /// Analog mute monitor
    pub const ANALOG_MUTE: Register = Register::page0(0x6C);
    /// Power state and DSP boot status
    pub const POWER_STATE: Register = Register::page0(0x76);
    /// GPIO input levels
    pub const GPIO_INPUT: Register = Register::page0(0x77);
    /// Auto mute flags
    pub const AUTO_MUTE_FLAG: Register = Register::page0(0x78);

    /// Output amplitude type (OSEL), page 1
    pub const OUTPUT_AMP_TYPE: Register = Register::page1(0x01);
    /// VCOM power control (VCPD), page 1
    pub const VCOM_POWER: Register = Register::page1(0x09);

    /// The GPIO output selection register for `pin`, which must already be
    /// validated to be 1..=6.
    pub(crate) const fn gpio_output(pin: u8) -> Register {
        Register::page0(Register::GPIO1_OUTPUT.address + (pin - 1))
    }
}

//
// impls on Private Types
//

impl Field {
    const fn new(register: Register, width: u8, shift: u8) -> Field {
        Field {
            register,
            width,
            shift,
        }
    }

    /// A single-bit field
    pub(crate) const fn bit(register: Register, shift: u8) -> Field {
        Field::new(register, 1, shift)
    }

    /// The bits this field occupies, in register position.
    pub(crate) const fn mask(self) -> u8 {
        (((1u16 << self.width) - 1) << self.shift) as u8
    }

    /// Pull this field's value out of a full register byte.
    pub(crate) const fn extract(self, register_value: u8) -> u8 {
        (register_value & self.mask()) >> self.shift
    }

    /// Merge `value` into a full register byte. Bits of `value` beyond the
    /// field's width are dropped.
    pub(crate) const fn insert(self, register_value: u8, value: u8) -> u8 {
        (register_value & !self.mask()) | ((value << self.shift) & self.mask())
    }

    pub(crate) const RESET_MODULES: Field = Field::bit(Register::RESET, 4);
    pub(crate) const RESET_REGISTERS: Field = Field::bit(Register::RESET, 0);

    pub(crate) const STANDBY_REQUEST: Field = Field::bit(Register::STANDBY, 4);
    pub(crate) const POWERDOWN_REQUEST: Field = Field::bit(Register::STANDBY, 0);

    pub(crate) const MUTE_LEFT: Field = Field::bit(Register::MUTE, 4);
    pub(crate) const MUTE_RIGHT: Field = Field::bit(Register::MUTE, 0);

    /// Active low
    pub(crate) const PLL_LOCK: Field = Field::bit(Register::PLL, 4);
    pub(crate) const PLL_ENABLE: Field = Field::bit(Register::PLL, 0);

    pub(crate) const DEEMPHASIS: Field = Field::bit(Register::DEEMPHASIS, 4);

    pub(crate) const PLL_REFERENCE: Field = Field::new(Register::PLL_REF, 3, 4);
    pub(crate) const DAC_CLOCK_SOURCE: Field = Field::new(Register::DAC_CLK_SRC, 3, 4);

    pub(crate) const IGNORE_FS_DETECT: Field = Field::bit(Register::ERROR_DETECT, 6);
    pub(crate) const IGNORE_BCK_DETECT: Field = Field::bit(Register::ERROR_DETECT, 5);
    pub(crate) const IGNORE_SCK_DETECT: Field = Field::bit(Register::ERROR_DETECT, 4);
    pub(crate) const IGNORE_CLOCK_HALT: Field = Field::bit(Register::ERROR_DETECT, 3);
    pub(crate) const IGNORE_CLOCK_MISSING: Field = Field::bit(Register::ERROR_DETECT, 2);
    pub(crate) const DISABLE_CLOCK_AUTOSET: Field = Field::bit(Register::ERROR_DETECT, 1);
    pub(crate) const IGNORE_PLL_UNLOCK: Field = Field::bit(Register::ERROR_DETECT, 0);

    pub(crate) const I2S_FORMAT: Field = Field::new(Register::I2S_CONFIG, 2, 4);
    pub(crate) const I2S_SIZE: Field = Field::new(Register::I2S_CONFIG, 2, 0);

    /// Left and right auto mute enables plus the channel-link bit. Enabled
    /// means all three are set.
    pub(crate) const AUTO_MUTE: Field = Field::new(Register::AUTO_MUTE, 3, 0);

    pub(crate) const DSP_BOOT_DONE: Field = Field::bit(Register::POWER_STATE, 7);
    pub(crate) const POWER_STATE: Field = Field::new(Register::POWER_STATE, 4, 0);

    /// Output amplitude type: 1 is VCOM, 0 is VREF
    pub(crate) const VCOM_MODE: Field = Field::bit(Register::OUTPUT_AMP_TYPE, 0);
    /// Active low
    pub(crate) const VCOM_POWER_DOWN: Field = Field::bit(Register::VCOM_POWER, 0);

    /// The per-pin bit in one of the GPIO bank registers. `pin` must already
    /// be validated to be 1..=6.
    pub(crate) const fn gpio_bit(register: Register, pin: u8) -> Field {
        Field::bit(register, pin - 1)
    }

    /// The 5-bit output source selection for `pin`, which must already be
    /// validated to be 1..=6.
    pub(crate) const fn gpio_output(pin: u8) -> Field {
        Field::new(Register::gpio_output(pin), 5, 0)
    }
}

//
// Tests
//


//
// End of file
//
