//! USB HID boot keyboard for ATmega32U4.
//!
//! Register-level driver for the built-in USB controller. The keyboard
//! pipeline talks to it through [`Sink`]: every press/release updates the
//! held [`KeyReport`] and the report goes out on EP1 as soon as it differs
//! from the last one sent. Bus events are polled from the scan loop.

use avr_device::atmega32u4::{PLL, USB_DEVICE};
use c64_keymap::{KeyReport, Sink, Symbol};

const EP0_SIZE: u8 = 64;
const EP1_SIZE: u8 = 8;

// bmRequestType
const DEVICE_TO_HOST: u8 = 0x80;
const HOST_TO_DEVICE: u8 = 0x00;
const INTERFACE_TO_HOST: u8 = 0x81;
const CLASS_TO_HOST: u8 = 0xA1;
const CLASS_TO_INTERFACE: u8 = 0x21;

// bRequest, standard
const GET_DESCRIPTOR: u8 = 0x06;
const SET_ADDRESS: u8 = 0x05;
const GET_CONFIGURATION: u8 = 0x08;
const SET_CONFIGURATION: u8 = 0x09;

// bRequest, HID class
const GET_REPORT: u8 = 0x01;
const SET_IDLE: u8 = 0x0A;
const SET_PROTOCOL: u8 = 0x0B;

// Descriptor types
const DEVICE: u8 = 0x01;
const CONFIGURATION: u8 = 0x02;
const STRING: u8 = 0x03;
const HID_REPORT: u8 = 0x22;

/// Boot keyboard report: modifier bits, reserved byte, LED output, 6 usages.
#[rustfmt::skip]
static HID_REPORT_DESCRIPTOR: [u8; 64] = [
    0x05, 0x01, 0x09, 0x06, 0xA1, 0x01,             // Generic Desktop / Keyboard / Application
    0x05, 0x07, 0x19, 0xE0, 0x29, 0xE7,             // modifiers: LeftCtrl..RightGui
    0x15, 0x00, 0x25, 0x01, 0x75, 0x01, 0x95, 0x08,
    0x81, 0x02,
    0x95, 0x01, 0x75, 0x08, 0x81, 0x01,             // reserved byte
    0x95, 0x05, 0x75, 0x01, 0x05, 0x08,             // LEDs 1..5
    0x19, 0x01, 0x29, 0x05, 0x91, 0x02,
    0x95, 0x01, 0x75, 0x03, 0x91, 0x01,             // LED padding
    0x95, 0x06, 0x75, 0x08, 0x15, 0x00,             // six usage slots
    0x26, 0xFF, 0x00, 0x05, 0x07, 0x19, 0x00,
    0x29, 0xFF, 0x81, 0x00,
    0xC0,
];

#[rustfmt::skip]
static DEVICE_DESCRIPTOR: [u8; 18] = [
    18, DEVICE,
    0x00, 0x02,             // USB 2.0
    0, 0, 0,                // class per interface
    EP0_SIZE,
    0xC0, 0x16,             // VID 0x16C0
    0xDC, 0x27,             // PID 0x27DC, keyboard
    0x01, 0x00,             // release 1.0
    1, 2, 0,                // manufacturer, product, no serial
    1,
];

#[rustfmt::skip]
static CONFIG_DESCRIPTOR: [u8; 34] = [
    9, CONFIGURATION, 34, 0, 1, 1, 0,
    0x80, 50,               // bus powered, 100 mA
    // interface 0: HID boot keyboard
    9, 0x04, 0, 0, 1, 0x03, 0x01, 0x01, 0,
    // HID 1.11, one report descriptor
    9, 0x21, 0x11, 0x01, 0, 1, HID_REPORT, HID_REPORT_DESCRIPTOR.len() as u8, 0,
    // EP1 IN interrupt, polled every 1 ms so menu sequences go out back to back
    7, 0x05, 0x81, 0x03, EP1_SIZE, 0, 1,
];

static LANGUAGES: [u8; 4] = [4, STRING, 0x09, 0x04];
static MANUFACTURER: [u8; 8] = string_descriptor(b"C64");
static PRODUCT: [u8; 26] = string_descriptor(b"C64 Keyboard");

/// UTF-16LE string descriptor for an ASCII string; `N` is `2 + 2 * len`.
const fn string_descriptor<const N: usize>(text: &[u8]) -> [u8; N] {
    let mut desc = [0u8; N];
    desc[0] = N as u8;
    desc[1] = STRING;
    let mut i = 0;
    while i < text.len() {
        desc[2 + 2 * i] = text[i];
        i += 1;
    }
    desc
}

fn descriptor(kind: u8, index: u8) -> Option<&'static [u8]> {
    match (kind, index) {
        (DEVICE, _) => Some(&DEVICE_DESCRIPTOR),
        (CONFIGURATION, _) => Some(&CONFIG_DESCRIPTOR),
        (STRING, 0) => Some(&LANGUAGES),
        (STRING, 1) => Some(&MANUFACTURER),
        (STRING, 2) => Some(&PRODUCT),
        _ => None,
    }
}

/// The eight bytes of a SETUP packet, in the fields this device uses.
struct SetupPacket {
    request_type: u8,
    request: u8,
    value_low: u8,
    value_high: u8,
    length: u16,
}

impl SetupPacket {
    fn read(usb: &USB_DEVICE) -> Self {
        let mut raw = [0u8; 8];
        for byte in raw.iter_mut() {
            *byte = usb.uedatx.read().bits();
        }
        Self {
            request_type: raw[0],
            request: raw[1],
            value_low: raw[2],
            value_high: raw[3],
            length: u16::from_le_bytes([raw[6], raw[7]]),
        }
    }
}

pub struct UsbKeyboard {
    usb: USB_DEVICE,
    configured: bool,
    report: KeyReport,
    /// `None` until the host has seen a report on the current configuration.
    last_sent: Option<KeyReport>,
}

impl UsbKeyboard {
    pub fn new(usb: USB_DEVICE) -> Self {
        Self { usb, configured: false, report: KeyReport::empty(), last_sent: None }
    }

    /// Bring up the pad regulator, PLL and controller, then attach.
    pub fn init(&mut self, pll: &PLL) {
        let usb = &self.usb;

        usb.uhwcon.write(|w| w.uvrege().set_bit());
        usb.usbcon.write(|w| w.usbe().set_bit().otgpade().set_bit());

        // 16MHz crystal -> 48MHz USB clock
        pll.pllcsr.write(|w| w.pindiv().set_bit().plle().set_bit());
        while pll.pllcsr.read().plock().bit_is_clear() {}

        usb.usbcon.modify(|_, w| w.frzclk().clear_bit());
        usb.udcon.modify(|_, w| w.detach().clear_bit());

        // USB interrupts stay disabled: global interrupts are on for the
        // millisecond timer and there is no USB vector.
        self.configured = false;
    }

    /// Service bus reset and control requests, then flush any report that
    /// could not be sent earlier.
    pub fn poll(&mut self) {
        if self.usb.udint.read().eorsti().bit_is_set() {
            self.usb.udint.modify(|_, w| w.eorsti().clear_bit());
            self.enable_control_endpoint();
            self.configured = false;
        }

        self.select_endpoint(0);
        if self.usb.ueintx.read().rxstpi().bit_is_set() {
            let setup = SetupPacket::read(&self.usb);
            self.usb.ueintx.modify(|_, w| w.rxstpi().clear_bit());
            self.handle_setup(&setup);
        }

        self.flush();
    }

    /// Send the current report if it changed since the last send.
    fn flush(&mut self) {
        if !self.configured || self.last_sent == Some(self.report) {
            return;
        }

        self.select_endpoint(1);

        // Give up after a bounded wait; the next poll retries.
        let mut budget: u16 = 0xFFFF;
        while self.usb.ueintx.read().rwal().bit_is_clear() {
            budget -= 1;
            if budget == 0 {
                return;
            }
        }

        self.write_fifo(&self.report.to_bytes());
        self.usb.ueintx.modify(|_, w| w.fifocon().clear_bit().txini().clear_bit());
        self.last_sent = Some(self.report);
    }

    fn enable_control_endpoint(&self) {
        self.select_endpoint(0);
        self.usb.ueconx.write(|w| w.epen().set_bit());
        self.usb.uecfg0x.write(|w| w.eptype().bits(0b00));
        self.usb.uecfg1x.write(|w| w.epsize().bits(0b011).alloc().set_bit());
    }

    fn enable_report_endpoint(&self) {
        self.select_endpoint(1);
        self.usb.ueconx.write(|w| w.epen().set_bit());
        self.usb.uecfg0x.write(|w| w.eptype().bits(0b11).epdir().set_bit());
        self.usb.uecfg1x.write(|w| w.epsize().bits(0b000).alloc().set_bit());
    }

    fn select_endpoint(&self, ep: u8) {
        self.usb.uenum.write(|w| w.bits(ep & 0x07));
    }

    fn handle_setup(&mut self, setup: &SetupPacket) {
        match (setup.request_type, setup.request) {
            (DEVICE_TO_HOST, GET_DESCRIPTOR) => {
                match descriptor(setup.value_high, setup.value_low) {
                    Some(desc) => self.send_control(desc, setup.length),
                    None => self.stall(),
                }
            }
            (INTERFACE_TO_HOST, GET_DESCRIPTOR) if setup.value_high == HID_REPORT => {
                self.send_control(&HID_REPORT_DESCRIPTOR, setup.length);
            }
            (HOST_TO_DEVICE, SET_ADDRESS) => {
                // The address only takes effect after the status stage.
                self.acknowledge();
                self.wait_in_ready();
                self.usb.udaddr.write(|w| w.uadd().bits(setup.value_low & 0x7F).adden().set_bit());
            }
            (HOST_TO_DEVICE, SET_CONFIGURATION) => {
                self.acknowledge();
                self.enable_report_endpoint();
                self.configured = true;
                self.last_sent = None;
            }
            (DEVICE_TO_HOST, GET_CONFIGURATION) => {
                self.wait_in_ready();
                self.write_fifo(&[self.configured as u8]);
                self.acknowledge();
            }
            (CLASS_TO_HOST, GET_REPORT) => {
                self.wait_in_ready();
                self.write_fifo(&self.report.to_bytes());
                self.acknowledge();
            }
            (CLASS_TO_INTERFACE, SET_IDLE | SET_PROTOCOL) => self.acknowledge(),
            _ => self.stall(),
        }
    }

    /// IN data stage in EP0-sized chunks, then the host's status stage.
    fn send_control(&self, desc: &[u8], requested: u16) {
        let desc = &desc[..desc.len().min(requested as usize)];

        for chunk in desc.chunks(EP0_SIZE as usize) {
            self.wait_in_ready();
            self.write_fifo(chunk);
            self.acknowledge();
        }

        while self.usb.ueintx.read().rxouti().bit_is_clear() {}
        self.usb.ueintx.modify(|_, w| w.rxouti().clear_bit());
    }

    fn write_fifo(&self, bytes: &[u8]) {
        for &byte in bytes {
            self.usb.uedatx.write(|w| w.bits(byte));
        }
    }

    fn wait_in_ready(&self) {
        while self.usb.ueintx.read().txini().bit_is_clear() {}
    }

    /// Release the IN bank: sends queued data, or a zero-length packet.
    fn acknowledge(&self) {
        self.usb.ueintx.modify(|_, w| w.txini().clear_bit());
    }

    fn stall(&self) {
        self.usb.ueconx.modify(|_, w| w.stallrq().set_bit());
    }
}

impl Sink for UsbKeyboard {
    fn press(&mut self, symbol: Symbol) {
        self.report.press(symbol);
        self.flush();
    }

    fn release(&mut self, symbol: Symbol) {
        self.report.release(symbol);
        self.flush();
    }

    fn release_all(&mut self) {
        self.report.release_all();
        self.flush();
    }
}
