//! One-byte target slot in the on-chip EEPROM.

use avr_device::atmega32u4::EEPROM;
use avr_device::interrupt;
use c64_keymap::TargetStore;

const TARGET_ADDR: u16 = 0;

const EERE: u8 = 0x01;
const EEPE: u8 = 0x02;
const EEMPE: u8 = 0x04;

pub struct Eeprom {
    eeprom: EEPROM,
}

impl Eeprom {
    pub fn new(eeprom: EEPROM) -> Self {
        Self { eeprom }
    }

    fn wait_ready(&self) {
        while self.eeprom.eecr.read().bits() & EEPE != 0 {}
    }

    fn read(&self, addr: u16) -> u8 {
        self.wait_ready();
        self.eeprom.eear.write(|w| unsafe { w.bits(addr) });
        self.eeprom.eecr.write(|w| unsafe { w.bits(EERE) });
        self.eeprom.eedr.read().bits()
    }

    fn write(&self, addr: u16, value: u8) {
        self.wait_ready();
        self.eeprom.eear.write(|w| unsafe { w.bits(addr) });
        self.eeprom.eedr.write(|w| unsafe { w.bits(value) });
        // EEPE must follow EEMPE within four cycles.
        interrupt::free(|_| {
            self.eeprom.eecr.write(|w| unsafe { w.bits(EEMPE) });
            self.eeprom.eecr.write(|w| unsafe { w.bits(EEMPE | EEPE) });
        });
    }
}

impl TargetStore for Eeprom {
    fn load(&mut self) -> u8 {
        self.read(TARGET_ADDR)
    }

    fn store(&mut self, value: u8) {
        if self.read(TARGET_ADDR) != value {
            self.write(TARGET_ADDR, value);
        }
    }
}
