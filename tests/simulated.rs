//! Drives the PCM51xx driver against a simulated register file.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use embedded_hal::blocking::delay::DelayMs;
use pcm51xx::{
    DacClockSource, Error, GpioOutput, I2sFormat, I2sSize, Pcm51xx, PllReference, PowerState,
    Register, RegisterInterface, RESET_TIMEOUT_MS,
};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Op {
    Write { page: u8, address: u8, value: u8 },
    Read { page: u8, address: u8 },
}

impl Op {
    fn page(&self) -> u8 {
        match *self {
            Op::Write { page, .. } | Op::Read { page, .. } => page,
        }
    }

    fn address(&self) -> u8 {
        match *self {
            Op::Write { address, .. } | Op::Read { address, .. } => address,
        }
    }

    fn is_page_select(&self) -> bool {
        matches!(self, Op::Write { address: 0x00, .. })
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
struct BusFault;

#[derive(Default)]
struct Chip {
    page: u8,
    registers: HashMap<(u8, u8), u8>,
    log: Vec<Op>,
    /// The reset bits never self-clear
    reset_stuck: bool,
    fail_writes: bool,
    fail_page_selects: bool,
}

/// A PCM51xx register file, shared so tests can poke it behind the driver's
/// back.
#[derive(Clone, Default)]
struct SimulatedDac(Rc<RefCell<Chip>>);

impl SimulatedDac {
    fn get(&self, register: Register) -> u8 {
        let chip = self.0.borrow();
        chip.registers
            .get(&(register.page, register.address))
            .copied()
            .unwrap_or(0)
    }

    fn poke(&self, register: Register, value: u8) {
        self.0
            .borrow_mut()
            .registers
            .insert((register.page, register.address), value);
    }

    fn log(&self) -> Vec<Op> {
        self.0.borrow().log.clone()
    }

    fn clear_log(&self) {
        self.0.borrow_mut().log.clear();
    }

    fn page_selects(&self) -> usize {
        self.log().iter().filter(|op| op.is_page_select()).count()
    }
}

impl RegisterInterface for SimulatedDac {
    type Error = BusFault;

    fn write_register(&mut self, address: u8, value: u8) -> Result<(), BusFault> {
        let mut chip = self.0.borrow_mut();
        if chip.fail_writes || (address == 0x00 && chip.fail_page_selects) {
            return Err(BusFault);
        }
        let page = chip.page;
        chip.log.push(Op::Write {
            page,
            address,
            value,
        });
        if address == 0x00 {
            chip.page = value;
            return Ok(());
        }
        let mut value = value;
        if page == 0 && address == Register::RESET.address && !chip.reset_stuck {
            if value & 0x01 != 0 {
                chip.registers.clear();
            }
            // Both reset bits clear themselves
            value &= !0x11;
        }
        chip.registers.insert((page, address), value);
        Ok(())
    }

    fn read_register(&mut self, address: u8) -> Result<u8, BusFault> {
        let mut chip = self.0.borrow_mut();
        let page = chip.page;
        chip.log.push(Op::Read { page, address });
        if address == 0x00 {
            return Ok(page);
        }
        Ok(chip.registers.get(&(page, address)).copied().unwrap_or(0))
    }
}

/// Counts the milliseconds it was asked to wait, without waiting.
#[derive(Clone, Default)]
struct Delay(Rc<Cell<u32>>);

impl DelayMs<u8> for Delay {
    fn delay_ms(&mut self, ms: u8) {
        self.0.set(self.0.get() + u32::from(ms));
    }
}

fn setup() -> (Pcm51xx<SimulatedDac, Delay>, SimulatedDac, Delay) {
    let sim = SimulatedDac::default();
    let delay = Delay::default();
    (Pcm51xx::new(sim.clone(), delay.clone()), sim, delay)
}

// Page cache

#[test]
fn second_select_of_same_page_is_free() {
    let (mut dac, sim, _) = setup();
    dac.select_page(0).unwrap();
    dac.select_page(0).unwrap();
    assert_eq!(sim.page_selects(), 1);
    assert_eq!(dac.cached_page(), Some(0));
}

#[test]
fn failed_select_keeps_old_page() {
    let (mut dac, sim, _) = setup();
    dac.select_page(0).unwrap();
    sim.0.borrow_mut().fail_writes = true;
    assert_eq!(dac.select_page(1), Err(Error::Bus(BusFault)));
    assert_eq!(dac.cached_page(), Some(0));
}

#[test]
fn failed_select_from_unknown_stays_unknown() {
    let (mut dac, sim, _) = setup();
    sim.0.borrow_mut().fail_writes = true;
    assert!(dac.select_page(0).is_err());
    assert_eq!(dac.cached_page(), None);
}

#[test]
fn fresh_handle_always_selects() {
    let (mut dac, sim, _) = setup();
    assert_eq!(dac.cached_page(), None);
    // The chip powers up on page 0, but we can't know that
    dac.is_muted().unwrap();
    assert_eq!(sim.log()[0], Op::Write { page: 0, address: 0, value: 0 });
}

#[test]
fn invalidated_cache_selects_again() {
    let (mut dac, sim, _) = setup();
    dac.select_page(0).unwrap();
    dac.invalidate_page_cache();
    assert_eq!(dac.cached_page(), None);
    dac.select_page(0).unwrap();
    assert_eq!(sim.page_selects(), 2);
}

#[test]
fn page_one_registers_select_page_one() {
    let (mut dac, sim, _) = setup();
    dac.begin().unwrap();
    sim.clear_log();

    dac.enable_vcom(true).unwrap();
    dac.is_muted().unwrap();

    let log = sim.log();
    assert_eq!(log[0], Op::Write { page: 0, address: 0, value: 1 });
    assert!(log[1..3].iter().all(|op| op.page() == 1));
    assert_eq!(log[3], Op::Write { page: 1, address: 0, value: 0 });
    assert_eq!(log[4], Op::Read { page: 0, address: 0x03 });
    assert_eq!(sim.page_selects(), 2);
}

#[test]
fn unreadable_page_gives_error_and_default_is_documented() {
    let (mut dac, sim, _) = setup();
    sim.0.borrow_mut().fail_page_selects = true;

    assert_eq!(dac.i2s_size(), Err(Error::Bus(BusFault)));
    assert_eq!(dac.i2s_size().unwrap_or_default(), I2sSize::Bits24);
    assert_eq!(dac.i2s_format().unwrap_or_default(), I2sFormat::I2s);
    assert_eq!(dac.pll_reference().unwrap_or_default(), PllReference::Sck);
    assert_eq!(dac.dac_source().unwrap_or_default(), DacClockSource::Master);
    assert_eq!(dac.power_state().unwrap_or_default(), PowerState::Powerdown);
    assert_eq!(dac.gpio_output(5).unwrap_or_default(), GpioOutput::Off);
    assert!(!dac.is_muted().unwrap_or_default());
    assert!(sim.log().is_empty());
}

// Bring-up

#[test]
fn begin_leaves_chip_muted_and_configured() {
    let (mut dac, sim, _) = setup();
    dac.begin().unwrap();

    assert_eq!(sim.get(Register::MUTE), 0x11);
    assert!(dac.is_muted().unwrap());
    // Out of standby and powerdown
    assert_eq!(sim.get(Register::STANDBY), 0x00);
    // Everything ignored except clock auto-set
    assert_eq!(sim.get(Register::ERROR_DETECT), 0b0111_1101);
    assert_eq!(sim.get(Register::PLL) & 0x01, 0x01);
    assert_eq!(dac.pll_reference().unwrap(), PllReference::Bck);
    assert_eq!(dac.dac_source().unwrap(), DacClockSource::Pll);
    assert_eq!(dac.i2s_format().unwrap(), I2sFormat::I2s);
    assert_eq!(dac.i2s_size().unwrap(), I2sSize::Bits16);
    assert!(!dac.auto_mute().unwrap());
}

#[test]
fn begin_selects_page_zero_first_from_any_page() {
    let (mut dac, sim, delay) = setup();
    // Someone else left the chip on page 1
    sim.0.borrow_mut().page = 1;
    dac.begin().unwrap();

    let log = sim.log();
    assert_eq!(log[0], Op::Write { page: 1, address: 0, value: 0 });
    // Everything after that is on page 0, with no redundant selects
    assert!(log[1..].iter().all(|op| op.page() == 0));
    assert_eq!(sim.page_selects(), 1);
    // Both resets completed on the first poll
    assert_eq!(delay.0.get(), 0);
    assert_eq!(dac.cached_page(), Some(0));
}

#[test]
fn begin_ignores_stale_cache() {
    let (mut dac, sim, _) = setup();
    dac.begin().unwrap();
    // The chip was hardware-reset and someone selected page 1 behind our back
    sim.0.borrow_mut().page = 1;
    sim.clear_log();

    dac.begin().unwrap();
    assert_eq!(sim.log()[0], Op::Write { page: 1, address: 0, value: 0 });
}

#[test]
fn begin_resets_before_configuring() {
    let (mut dac, sim, _) = setup();
    dac.begin().unwrap();

    let writes: Vec<(u8, u8)> = sim
        .log()
        .iter()
        .filter_map(|op| match *op {
            Op::Write { address, value, .. } if address != 0 => Some((address, value)),
            _ => None,
        })
        .collect();
    // standby, register reset, module reset, out of powerdown, out of standby.
    // The register reset already cleared the standby request.
    assert_eq!(
        &writes[..5],
        &[(0x02, 0x10), (0x01, 0x01), (0x01, 0x10), (0x02, 0x00), (0x02, 0x00)]
    );
    // ... and mute is the last thing we do
    assert_eq!(writes.last(), Some(&(0x03, 0x11)));
}

#[test]
fn begin_fails_on_bus_error() {
    let (mut dac, sim, _) = setup();
    sim.0.borrow_mut().fail_writes = true;
    assert_eq!(dac.begin(), Err(Error::Bus(BusFault)));
}

#[test]
fn begin_fails_when_reset_hangs() {
    let (mut dac, sim, _) = setup();
    sim.0.borrow_mut().reset_stuck = true;
    assert_eq!(dac.begin(), Err(Error::Timeout));
    // Never got as far as the mute
    assert!(!sim
        .log()
        .iter()
        .any(|op| matches!(op, Op::Write { address: 0x03, .. })));
}

// Resets

#[test]
fn reset_times_out() {
    let (mut dac, sim, delay) = setup();
    sim.0.borrow_mut().reset_stuck = true;

    assert_eq!(dac.reset_registers(), Err(Error::Timeout));
    assert_eq!(delay.0.get(), u32::from(RESET_TIMEOUT_MS));
    let polls = sim
        .log()
        .iter()
        .filter(|op| matches!(op, Op::Read { address: 0x01, .. }))
        .count();
    // One read for the read-modify-write, then one per poll
    assert_eq!(polls, 1 + usize::from(RESET_TIMEOUT_MS));
}

#[test]
fn module_reset_times_out() {
    let (mut dac, sim, delay) = setup();
    sim.0.borrow_mut().reset_stuck = true;
    assert_eq!(dac.reset_modules(), Err(Error::Timeout));
    assert_eq!(delay.0.get(), u32::from(RESET_TIMEOUT_MS));
    assert_eq!(sim.get(Register::RESET), 0x10);
}

#[test]
fn reset_completes() {
    let (mut dac, sim, delay) = setup();
    sim.poke(Register::I2S_CONFIG, 0x33);
    dac.reset_registers().unwrap();
    dac.reset_modules().unwrap();
    assert_eq!(sim.get(Register::I2S_CONFIG), 0x00);
    assert_eq!(sim.get(Register::RESET), 0x00);
    assert_eq!(delay.0.get(), 0);
}

// Volume

#[test]
fn volume_extremes() {
    let (mut dac, sim, _) = setup();
    dac.set_volume_db(24.0, 24.0).unwrap();
    assert_eq!(sim.get(Register::DIGITAL_VOLUME_L), 0x00);
    assert_eq!(sim.get(Register::DIGITAL_VOLUME_R), 0x00);

    dac.set_volume_db(-103.5, -103.5).unwrap();
    assert_eq!(sim.get(Register::DIGITAL_VOLUME_L), 0xFF);
    assert_eq!(sim.get(Register::DIGITAL_VOLUME_R), 0xFF);

    dac.set_volume_db(60.0, -500.0).unwrap();
    assert_eq!(dac.volume_db().unwrap(), (24.0, -103.5));
}

#[test]
fn volume_channels_are_independent() {
    let (mut dac, sim, _) = setup();
    dac.set_volume_db(0.0, -6.0).unwrap();
    assert_eq!(sim.get(Register::DIGITAL_VOLUME_L), 0x30);
    assert_eq!(sim.get(Register::DIGITAL_VOLUME_R), 0x3C);
    assert_eq!(dac.volume_db().unwrap(), (0.0, -6.0));
}

#[test]
fn volume_round_trips_to_nearest_step() {
    let (mut dac, _, _) = setup();
    for code in 0..=255u8 {
        let step = 24.0 - f32::from(code) * 0.5;
        for offset in [-0.2, -0.1, 0.0, 0.1, 0.2] {
            dac.set_volume_db(step + offset, step - offset).unwrap();
            assert_eq!(dac.volume_db().unwrap(), (step, step), "{} {}", step, offset);
        }
    }
}

// Mute

#[test]
fn mute_sets_both_bits() {
    let (mut dac, sim, _) = setup();
    dac.mute(true).unwrap();
    assert_eq!(sim.get(Register::MUTE), 0x11);
    assert!(dac.is_muted().unwrap());

    dac.mute(false).unwrap();
    assert_eq!(sim.get(Register::MUTE), 0x00);
    assert!(!dac.is_muted().unwrap());
}

#[test]
fn half_muted_is_not_muted() {
    let (mut dac, sim, _) = setup();
    dac.mute(true).unwrap();

    sim.poke(Register::MUTE, 0x10);
    assert!(!dac.is_muted().unwrap());
    sim.poke(Register::MUTE, 0x01);
    assert!(!dac.is_muted().unwrap());
}

#[test]
fn mute_leaves_other_bits_alone() {
    let (mut dac, sim, _) = setup();
    sim.poke(Register::MUTE, 0xEE);
    dac.mute(true).unwrap();
    assert_eq!(sim.get(Register::MUTE), 0xFF);
    dac.mute(false).unwrap();
    assert_eq!(sim.get(Register::MUTE), 0xEE);
}

// Auto mute

#[test]
fn auto_mute_needs_all_three_bits() {
    let (mut dac, sim, _) = setup();
    for pattern in 0..=0b111u8 {
        sim.poke(Register::AUTO_MUTE, 0xF8 | pattern);
        assert_eq!(dac.auto_mute().unwrap(), pattern == 0b111, "{:03b}", pattern);
    }
}

#[test]
fn auto_mute_writes_all_ones() {
    let (mut dac, sim, _) = setup();
    sim.poke(Register::AUTO_MUTE, 0xA8);
    dac.set_auto_mute(true).unwrap();
    assert_eq!(sim.get(Register::AUTO_MUTE), 0xAF);
    assert!(dac.auto_mute().unwrap());
    dac.set_auto_mute(false).unwrap();
    assert_eq!(sim.get(Register::AUTO_MUTE), 0xA8);
}

// GPIO

#[test]
fn gpio_pins_out_of_range_touch_nothing() {
    let (mut dac, sim, _) = setup();
    for pin in [0, 7, 255] {
        assert_eq!(dac.set_gpio_direction(pin, true), Err(Error::InvalidPin(pin)));
        assert_eq!(
            dac.set_gpio_register_output(pin, true),
            Err(Error::InvalidPin(pin))
        );
        assert_eq!(
            dac.set_gpio_output(pin, GpioOutput::RegisterOutput),
            Err(Error::InvalidPin(pin))
        );
        assert_eq!(dac.gpio_output(pin), Err(Error::InvalidPin(pin)));
        assert_eq!(dac.digital_read(pin), Err(Error::InvalidPin(pin)));
    }
    assert!(sim.log().is_empty());
    assert_eq!(dac.cached_page(), None);
}

#[test]
fn gpio_direction_writes_one_bit() {
    let (mut dac, sim, _) = setup();
    for pin in 1..=6u8 {
        sim.poke(Register::GPIO_ENABLE, 0x00);
        dac.set_gpio_direction(pin, true).unwrap();
        assert_eq!(sim.get(Register::GPIO_ENABLE), 1 << (pin - 1));

        sim.poke(Register::GPIO_ENABLE, 0xFF);
        dac.set_gpio_direction(pin, false).unwrap();
        assert_eq!(sim.get(Register::GPIO_ENABLE), !(1 << (pin - 1)));
    }
}

#[test]
fn gpio_register_output() {
    let (mut dac, sim, _) = setup();
    dac.set_gpio_register_output(4, true).unwrap();
    dac.set_gpio_register_output(1, true).unwrap();
    assert_eq!(sim.get(Register::GPIO_CONTROL), 0b0000_1001);
    dac.set_gpio_register_output(4, false).unwrap();
    assert_eq!(sim.get(Register::GPIO_CONTROL), 0b0000_0001);
}

#[test]
fn gpio_output_selection() {
    let (mut dac, sim, _) = setup();
    dac.set_gpio_output(5, GpioOutput::PllLock).unwrap();
    assert_eq!(sim.get(Register { page: 0, address: 0x54 }), 0x0A);
    assert_eq!(dac.gpio_output(5).unwrap(), GpioOutput::PllLock);

    dac.set_gpio_output(1, GpioOutput::Sdout).unwrap();
    assert_eq!(sim.get(Register::GPIO1_OUTPUT), 0x07);

    sim.poke(Register { page: 0, address: 0x55 }, 0xE0 | 0x0C);
    assert_eq!(dac.gpio_output(6), Err(Error::ReservedValue(0x0C)));
}

#[test]
fn digital_read_reports_each_pin() {
    let (mut dac, sim, _) = setup();
    sim.poke(Register::GPIO_INPUT, 0b0010_0100);
    let levels: Vec<bool> = (1..=6u8).map(|pin| dac.digital_read(pin).unwrap()).collect();
    assert_eq!(levels, vec![false, false, true, false, false, true]);
}

// Everything else

#[test]
fn standby_and_powerdown() {
    let (mut dac, sim, _) = setup();
    dac.standby(true).unwrap();
    assert_eq!(sim.get(Register::STANDBY), 0x10);
    assert!(dac.is_standby().unwrap());
    assert!(!dac.is_powerdown().unwrap());

    dac.powerdown(true).unwrap();
    assert_eq!(sim.get(Register::STANDBY), 0x11);
    assert!(dac.is_powerdown().unwrap());

    dac.powerdown(false).unwrap();
    dac.standby(false).unwrap();
    assert_eq!(sim.get(Register::STANDBY), 0x00);
}

#[test]
fn i2s_fields_share_a_register() {
    let (mut dac, sim, _) = setup();
    dac.set_i2s_format(I2sFormat::LeftJustified).unwrap();
    dac.set_i2s_size(I2sSize::Bits20).unwrap();
    assert_eq!(sim.get(Register::I2S_CONFIG), 0b0011_0001);
    assert_eq!(dac.i2s_format().unwrap(), I2sFormat::LeftJustified);
    assert_eq!(dac.i2s_size().unwrap(), I2sSize::Bits20);

    dac.set_i2s_format(I2sFormat::Tdm).unwrap();
    assert_eq!(sim.get(Register::I2S_CONFIG), 0b0001_0001);
}

#[test]
fn clock_sources() {
    let (mut dac, sim, _) = setup();
    dac.set_pll_reference(PllReference::Gpio).unwrap();
    assert_eq!(sim.get(Register::PLL_REF), 0x30);
    dac.set_dac_source(DacClockSource::Bck).unwrap();
    assert_eq!(sim.get(Register::DAC_CLK_SRC), 0x40);
    assert_eq!(dac.dac_source().unwrap(), DacClockSource::Bck);

    sim.poke(Register::PLL_REF, 0x20);
    assert_eq!(dac.pll_reference(), Err(Error::ReservedValue(2)));
}

#[test]
fn pll_lock_is_active_low() {
    let (mut dac, sim, _) = setup();
    dac.enable_pll(true).unwrap();
    assert!(dac.is_pll_enabled().unwrap());
    assert!(dac.is_pll_locked().unwrap());
    sim.poke(Register::PLL, 0x11);
    assert!(!dac.is_pll_locked().unwrap());
    dac.enable_pll(false).unwrap();
    assert_eq!(sim.get(Register::PLL), 0x10);
}

#[test]
fn deemphasis() {
    let (mut dac, sim, _) = setup();
    dac.enable_deemphasis(true).unwrap();
    assert_eq!(sim.get(Register::DEEMPHASIS), 0x10);
    assert!(dac.is_deemphasized().unwrap());
}

#[test]
fn error_detection_bits() {
    let (mut dac, sim, _) = setup();
    dac.ignore_fs_detect(true).unwrap();
    assert_eq!(sim.get(Register::ERROR_DETECT), 0b0100_0000);
    dac.ignore_bck_detect(true).unwrap();
    dac.ignore_sck_detect(true).unwrap();
    dac.ignore_clock_halt(true).unwrap();
    dac.ignore_clock_missing(true).unwrap();
    dac.disable_clock_autoset(true).unwrap();
    dac.ignore_pll_unlock(true).unwrap();
    assert_eq!(sim.get(Register::ERROR_DETECT), 0b0111_1111);
    dac.disable_clock_autoset(false).unwrap();
    assert_eq!(sim.get(Register::ERROR_DETECT), 0b0111_1101);
}

#[test]
fn status_is_read_fresh() {
    let (mut dac, sim, _) = setup();
    sim.poke(Register::POWER_STATE, 0x85);
    assert!(dac.dsp_boot_done().unwrap());
    assert_eq!(dac.power_state().unwrap(), PowerState::Run);

    sim.poke(Register::POWER_STATE, 0x08);
    assert!(!dac.dsp_boot_done().unwrap());
    assert_eq!(dac.power_state().unwrap(), PowerState::Standby);

    sim.poke(Register::POWER_STATE, 0x0F);
    assert_eq!(dac.power_state(), Err(Error::ReservedValue(0x0F)));
}

#[test]
fn vcom_controls_live_on_page_one() {
    let (mut dac, sim, _) = setup();
    dac.enable_vcom(true).unwrap();
    assert_eq!(sim.get(Register::OUTPUT_AMP_TYPE), 0x01);
    assert!(dac.is_vcom_enabled().unwrap());

    // Powering up clears the power-down bit
    sim.poke(Register::VCOM_POWER, 0x01);
    dac.set_vcom_power(true).unwrap();
    assert_eq!(sim.get(Register::VCOM_POWER), 0x00);
    assert!(dac.is_vcom_powered().unwrap());
    dac.set_vcom_power(false).unwrap();
    assert_eq!(sim.get(Register::VCOM_POWER), 0x01);
    assert!(!dac.is_vcom_powered().unwrap());

    // Same offsets on page 0 are untouched
    assert_eq!(sim.get(Register { page: 0, address: 0x01 }), 0x00);
    assert_eq!(sim.get(Register { page: 0, address: 0x09 }), 0x00);
}

#[test]
fn rebind_starts_with_unknown_page() {
    let (mut dac, old, delay) = setup();
    dac.begin().unwrap();

    let new = SimulatedDac::default();
    let (mut dac, _old) = dac.rebind(new.clone());
    assert_eq!(dac.cached_page(), None);
    old.clear_log();

    dac.mute(false).unwrap();
    assert!(old.log().is_empty());
    assert_eq!(new.log()[0], Op::Write { page: 0, address: 0, value: 0 });

    let (_iface, _delay) = dac.release();
    assert_eq!(delay.0.get(), 0);
}

#[test]
fn raw_register_access() {
    let (mut dac, sim, _) = setup();
    dac.write_register(Register::AUTO_MUTE_TIME, 0x42).unwrap();
    assert_eq!(sim.get(Register::AUTO_MUTE_TIME), 0x42);
    sim.poke(Register::CLOCK_STATUS, 0x05);
    assert_eq!(dac.read_register(Register::CLOCK_STATUS).unwrap(), 0x05);
    assert!(sim.log().iter().skip(1).all(|op| op.address() != 0x00));
}

#[test]
fn raw_page_select_moves_the_cache() {
    let (mut dac, sim, _) = setup();
    dac.select_page(0).unwrap();
    dac.write_register(Register::PAGE_SELECT, 1).unwrap();
    assert_eq!(dac.cached_page(), Some(1));
    assert_eq!(sim.0.borrow().page, 1);

    sim.poke(Register::MUTE, 0x11);
    sim.clear_log();
    assert!(dac.is_muted().unwrap());
    assert_eq!(
        sim.log(),
        vec![
            Op::Write { page: 1, address: 0, value: 0 },
            Op::Read { page: 0, address: 0x03 },
        ]
    );
}

#[test]
fn page_select_offset_on_another_page_is_a_page_select() {
    let (mut dac, sim, _) = setup();
    dac.write_register(Register { page: 1, address: 0x00 }, 0).unwrap();
    assert_eq!(dac.cached_page(), Some(0));
    // Only the one select, straight to the requested page
    assert_eq!(sim.log(), vec![Op::Write { page: 0, address: 0, value: 0 }]);

    dac.write_register(Register::PAGE_SELECT, 0).unwrap();
    assert_eq!(sim.page_selects(), 1);
}
