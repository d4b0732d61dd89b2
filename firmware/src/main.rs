//! C64 keyboard to USB firmware for ATmega32U4 (Teensy 2.0).
//!
//! Scans the original C64 keyboard matrix, translates it for the selected
//! target (ASCII, VICE 2/BMC64, VICE 3 or MiSTer) and sends USB HID boot
//! keyboard reports. The target survives power cycles in EEPROM; the LED
//! blinks the target number at startup and after every change.

#![no_std]
#![no_main]
#![feature(abi_avr_interrupt)]
#![feature(asm_experimental_arch)]

mod clock;
mod eeprom;
mod hid;
mod led;
mod matrix;

use avr_device::atmega32u4::Peripherals;
use c64_keymap::scan::Scanner;
use c64_keymap::{Keyboard, Timing};

use clock::{BusyDelay, Millis};
use eeprom::Eeprom;
use hid::UsbKeyboard;
use led::Led;
use matrix::C64Matrix;

/// Panic handler: loop forever.
#[panic_handler]
fn panic(_info: &core::panic::PanicInfo) -> ! {
    loop {}
}

#[no_mangle]
pub extern "C" fn main() -> ! {
    let dp = unsafe { Peripherals::steal() };

    // Clock prescaler = 1 (16MHz)
    dp.CPU.clkpr.write(|w| w.clkpce().set_bit());
    dp.CPU.clkpr.write(|w| unsafe { w.bits(0) });

    let Peripherals { USB_DEVICE, PLL, PORTB, PORTC, PORTD, PORTE, PORTF, EEPROM, TC0, .. } = dp;

    let matrix = C64Matrix::new(PORTB, PORTC, PORTE, PORTF);
    let led = Led::new(PORTD);
    let clock = Millis::start(TC0);
    unsafe { avr_device::interrupt::enable() };

    let mut usb = UsbKeyboard::new(USB_DEVICE);
    usb.init(&PLL);

    let timing = Timing::default();
    let mut keyboard = Keyboard::start(usb, Eeprom::new(EEPROM), led, BusyDelay, timing);
    let mut scanner = Scanner::new(matrix, clock, BusyDelay, &timing);

    scanner.run(&mut keyboard, |keyboard| keyboard.sink_mut().poll())
}
