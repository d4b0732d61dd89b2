//! Millisecond tick from Timer0 and a busy-wait delay.

use core::cell::Cell;

use avr_device::atmega32u4::TC0;
use avr_device::interrupt::{self, Mutex};
use c64_keymap::scan::Clock;
use embedded_hal::delay::DelayNs;

static MILLIS: Mutex<Cell<u32>> = Mutex::new(Cell::new(0));

/// 16 MHz / 64 / (249 + 1) = 1 kHz
const PRESCALE_64: u8 = 0x03;
const CTC_MODE: u8 = 0x02;
const COMPARE_A: u8 = 249;
const OCIE0A: u8 = 0x02;

pub struct Millis {
    _timer: TC0,
}

impl Millis {
    /// Start the tick. Global interrupts must be enabled afterwards.
    pub fn start(timer: TC0) -> Self {
        timer.tccr0a.write(|w| unsafe { w.bits(CTC_MODE) });
        timer.ocr0a.write(|w| unsafe { w.bits(COMPARE_A) });
        timer.tccr0b.write(|w| unsafe { w.bits(PRESCALE_64) });
        timer.timsk0.write(|w| unsafe { w.bits(OCIE0A) });
        Self { _timer: timer }
    }
}

impl Clock for Millis {
    fn now_ms(&mut self) -> u32 {
        interrupt::free(|cs| MILLIS.borrow(cs).get())
    }
}

#[avr_device::interrupt(atmega32u4)]
fn TIMER0_COMPA() {
    interrupt::free(|cs| {
        let millis = MILLIS.borrow(cs);
        millis.set(millis.get().wrapping_add(1));
    });
}

/// Busy-wait delay, approximate at 16 MHz.
#[derive(Clone, Copy, Default)]
pub struct BusyDelay;

impl DelayNs for BusyDelay {
    fn delay_ns(&mut self, ns: u32) {
        // ~4 cycles (250 ns) per iteration
        for _ in 0..ns / 250 {
            unsafe { core::arch::asm!("nop") };
        }
    }

    fn delay_us(&mut self, us: u32) {
        for _ in 0..us {
            for _ in 0..4u8 {
                unsafe { core::arch::asm!("nop") };
            }
        }
    }

    fn delay_ms(&mut self, ms: u32) {
        for _ in 0..ms {
            for _ in 0..4000u16 {
                unsafe { core::arch::asm!("nop") };
            }
        }
    }
}
