//! On-board LED (PD6) used to blink the selected target number.

use avr_device::atmega32u4::PORTD;
use c64_keymap::Notifier;
use embedded_hal::delay::DelayNs;

use crate::clock::BusyDelay;

const LED: u8 = 0x40;
const BLINK_MS: u32 = 200;

pub struct Led {
    port: PORTD,
    delay: BusyDelay,
}

impl Led {
    pub fn new(port: PORTD) -> Self {
        port.ddrd.modify(|r, w| unsafe { w.bits(r.bits() | LED) });
        let mut led = Self { port, delay: BusyDelay };
        led.set(false);
        led
    }

    pub fn set(&mut self, on: bool) {
        if on {
            self.port.portd.modify(|r, w| unsafe { w.bits(r.bits() | LED) });
        } else {
            self.port.portd.modify(|r, w| unsafe { w.bits(r.bits() & !LED) });
        }
    }
}

impl Notifier for Led {
    fn notify(&mut self, count: u8) {
        for _ in 0..count {
            self.set(true);
            self.delay.delay_ms(BLINK_MS);
            self.set(false);
            self.delay.delay_ms(BLINK_MS);
        }
    }
}
