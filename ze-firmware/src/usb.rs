use core::mem::MaybeUninit;
use embassy_usb::{
    control::{InResponse, OutResponse, Recipient, Request, RequestType},
    driver::Driver,
    types::InterfaceNumber,
    Builder, Config, Handler,
};

use crate::hid::HidWriter;
use crate::key_reporter::REPORT_SIZE;

// HID
const HID_DESC_DESCTYPE_HID: u8 = 0x21;
const HID_DESC_DESCTYPE_HID_REPORT: u8 = 0x22;
const HID_DESC_SPEC_1_11: [u8; 2] = [0x11, 0x01];
const HID_DESC_COUNTRY_UNSPEC: u8 = 0x00;

const HID_REQ_SET_IDLE: u8 = 0x0a;
const HID_REQ_GET_IDLE: u8 = 0x02;
const HID_REQ_SET_REPORT: u8 = 0x09;
const HID_REQ_GET_PROTOCOL: u8 = 0x03;
const HID_REQ_SET_PROTOCOL: u8 = 0x0b;

const HID_CLASS: u8 = 3;
const HID_SUBCLASS_NONE: u8 = 0;
const HID_PROTOCOL_KEYBOARD: u8 = 1;

/// Keyboard collection with report id 1: modifier bits, a reserved byte, six key usages and one
/// consumer usage. The LED output report is accepted and ignored.
#[rustfmt::skip]
pub const REPORT_DESC: &[u8] = &[
    0x05, 0x01,       // (GLOBAL) USAGE_PAGE         0x0001 Generic Desktop Page
    0x09, 0x06,       // (LOCAL)  USAGE              0x00010006 Keyboard
    0xA1, 0x01,       // (MAIN)   COLLECTION         Application
    0x85, 0x01,       //   (GLOBAL) REPORT_ID          0x01
    0x05, 0x07,       //   (GLOBAL) USAGE_PAGE         0x0007 Keyboard/Keypad Page
    0x19, 0xE0,       //   (LOCAL)  USAGE_MINIMUM      0x000700E0 Keyboard LeftControl
    0x29, 0xE7,       //   (LOCAL)  USAGE_MAXIMUM      0x000700E7 Keyboard Right GUI
    0x15, 0x00,       //   (GLOBAL) LOGICAL_MINIMUM    0
    0x25, 0x01,       //   (GLOBAL) LOGICAL_MAXIMUM    1
    0x95, 0x08,       //   (GLOBAL) REPORT_COUNT       8
    0x75, 0x01,       //   (GLOBAL) REPORT_SIZE        1
    0x81, 0x02,       //   (MAIN)   INPUT              Data Variable Absolute
    0x95, 0x01,       //   (GLOBAL) REPORT_COUNT       1
    0x75, 0x08,       //   (GLOBAL) REPORT_SIZE        8
    0x81, 0x01,       //   (MAIN)   INPUT              Constant (reserved byte)
    0x05, 0x08,       //   (GLOBAL) USAGE_PAGE         0x0008 LED Page
    0x19, 0x01,       //   (LOCAL)  USAGE_MINIMUM      0x00080001 Num Lock
    0x29, 0x05,       //   (LOCAL)  USAGE_MAXIMUM      0x00080005 Kana
    0x95, 0x05,       //   (GLOBAL) REPORT_COUNT       5
    0x75, 0x01,       //   (GLOBAL) REPORT_SIZE        1
    0x91, 0x02,       //   (MAIN)   OUTPUT             Data Variable Absolute
    0x95, 0x01,       //   (GLOBAL) REPORT_COUNT       1
    0x75, 0x03,       //   (GLOBAL) REPORT_SIZE        3
    0x91, 0x01,       //   (MAIN)   OUTPUT             Constant (padding)
    0x05, 0x07,       //   (GLOBAL) USAGE_PAGE         0x0007 Keyboard/Keypad Page
    0x19, 0x00,       //   (LOCAL)  USAGE_MINIMUM      0x00070000 No event
    0x29, 0xFF,       //   (LOCAL)  USAGE_MAXIMUM      0x000700FF
    0x15, 0x00,       //   (GLOBAL) LOGICAL_MINIMUM    0
    0x26, 0xFF, 0x00, //   (GLOBAL) LOGICAL_MAXIMUM    255
    0x95, 0x06,       //   (GLOBAL) REPORT_COUNT       6 key slots
    0x75, 0x08,       //   (GLOBAL) REPORT_SIZE        8
    0x81, 0x00,       //   (MAIN)   INPUT              Data Array
    0x05, 0x0C,       //   (GLOBAL) USAGE_PAGE         0x000C Consumer Page
    0x19, 0x00,       //   (LOCAL)  USAGE_MINIMUM      0x000C0000 Unassigned
    0x2A, 0xA0, 0x02, //   (LOCAL)  USAGE_MAXIMUM      0x000C02A0 AC Soft Key Left
    0x15, 0x00,       //   (GLOBAL) LOGICAL_MINIMUM    0
    0x26, 0xA0, 0x02, //   (GLOBAL) LOGICAL_MAXIMUM    0x02A0
    0x95, 0x01,       //   (GLOBAL) REPORT_COUNT       1
    0x75, 0x10,       //   (GLOBAL) REPORT_SIZE        16
    0x81, 0x00,       //   (MAIN)   INPUT              Data Array
    0xC0,             // (MAIN)   END_COLLECTION     Application
];

/// Storage for the interface's control handler. Must outlive the USB device.
pub struct State {
    control: MaybeUninit<Control>,
}
impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}
impl State {
    pub const fn new() -> Self {
        State {
            control: MaybeUninit::uninit(),
        }
    }
}

const CONFIG_SIZE: usize = 128;
const BOS_SIZE: usize = 32;
const MSOS_SIZE: usize = 0;
const CONTROL_SIZE: usize = 256;

pub struct UsbBuffers {
    config_descriptor_buf: [u8; CONFIG_SIZE],
    bos_descriptor_buf: [u8; BOS_SIZE],
    msos_descriptor_buf: [u8; MSOS_SIZE],
    control_buf: [u8; CONTROL_SIZE],
}

impl Default for UsbBuffers {
    fn default() -> Self {
        Self {
            config_descriptor_buf: [0; CONFIG_SIZE],
            bos_descriptor_buf: [0; BOS_SIZE],
            msos_descriptor_buf: [0; MSOS_SIZE],
            control_buf: [0; CONTROL_SIZE],
        }
    }
}

pub struct Configurator<'d> {
    device_config: Option<Config<'d>>,
    max_packet_size: u16,
    poll_ms: u8,
}

impl<'d> Configurator<'d> {
    pub fn new(device_config: Config<'d>) -> Self {
        Self {
            max_packet_size: device_config.max_packet_size_0 as u16,
            device_config: Some(device_config),
            poll_ms: 1,
        }
    }

    pub fn poll_ms(mut self, poll_ms: u8) -> Self {
        self.poll_ms = poll_ms;
        self
    }

    /// Only the first call returns a builder.
    pub fn usb_builder<D: Driver<'d>>(
        &mut self,
        driver: D,
        buffers: &'d mut UsbBuffers,
    ) -> Option<Builder<'d, D>> {
        self.device_config.take().map(|device_config| {
            Builder::new(
                driver,
                device_config,
                &mut buffers.config_descriptor_buf,
                &mut buffers.bos_descriptor_buf,
                &mut buffers.msos_descriptor_buf,
                &mut buffers.control_buf,
            )
        })
    }

    /// Add the keyboard interface and return the writer for its interrupt IN endpoint.
    pub fn add_keyboard<D: Driver<'d>>(
        &self,
        builder: &mut Builder<'d, D>,
        state: &'d mut State,
    ) -> HidWriter<'d, D, REPORT_SIZE> {
        let mut func = builder.function(HID_CLASS, HID_SUBCLASS_NONE, HID_PROTOCOL_KEYBOARD);
        let mut iface = func.interface();
        let if_num = iface.interface_number();
        let mut alt = iface.alt_setting(HID_CLASS, HID_SUBCLASS_NONE, HID_PROTOCOL_KEYBOARD, None);

        let control = Control::new(if_num, REPORT_DESC);
        alt.descriptor(HID_DESC_DESCTYPE_HID, &control.hid_descriptor[2..]);

        let ep_in = alt.endpoint_interrupt_in(self.max_packet_size, self.poll_ms);

        drop(func);

        let control = state.control.write(control);
        builder.handler(control);

        HidWriter::new(ep_in)
    }
}

struct Control {
    if_num: InterfaceNumber,
    report_descriptor: &'static [u8],
    hid_descriptor: [u8; 9],
    idle_ms: u32,
}
impl Control {
    fn new(if_num: InterfaceNumber, report_descriptor: &'static [u8]) -> Self {
        let len = report_descriptor.len();
        Control {
            if_num,
            report_descriptor,
            idle_ms: 0,
            hid_descriptor: [
                9,                            // Length of buf inclusive of size prefix
                HID_DESC_DESCTYPE_HID,        // Descriptor type
                HID_DESC_SPEC_1_11[0],        // bcdHID 1.11
                HID_DESC_SPEC_1_11[1],        //
                HID_DESC_COUNTRY_UNSPEC,      // Country code not supported
                1,                            // Number of following descriptors
                HID_DESC_DESCTYPE_HID_REPORT, // We have a HID report descriptor the host should read
                (len & 0xFF) as u8,           // HID report descriptor size,
                (len >> 8 & 0xFF) as u8,      //
            ],
        }
    }

    fn is_for_me(&self, req: &Request) -> bool {
        req.index == self.if_num.0 as u16
    }
}
impl Handler for Control {
    fn control_out(&mut self, req: Request, data: &[u8]) -> Option<OutResponse> {
        if req.request_type != RequestType::Class
            || req.recipient != Recipient::Interface
            || !self.is_for_me(&req)
        {
            return None;
        }

        match req.request {
            HID_REQ_SET_IDLE => {
                let dur = u32::from(req.value >> 8);
                self.idle_ms = 4 * dur;
                Some(OutResponse::Accepted)
            }
            HID_REQ_SET_REPORT => {
                crate::debug!("LED report {:?}", data);
                Some(OutResponse::Accepted)
            }
            HID_REQ_SET_PROTOCOL => {
                if req.value == 1 {
                    Some(OutResponse::Accepted)
                } else {
                    crate::warn!("boot protocol unsupported");
                    Some(OutResponse::Rejected)
                }
            }
            _ => Some(OutResponse::Rejected),
        }
    }

    fn control_in<'a>(&'a mut self, req: Request, buf: &'a mut [u8]) -> Option<InResponse<'a>> {
        if !self.is_for_me(&req) {
            return None;
        }

        match (req.request_type, req.recipient) {
            (RequestType::Standard, Recipient::Interface) => match req.request {
                Request::GET_DESCRIPTOR => match (req.value >> 8) as u8 {
                    HID_DESC_DESCTYPE_HID_REPORT => {
                        Some(InResponse::Accepted(self.report_descriptor))
                    }
                    HID_DESC_DESCTYPE_HID => Some(InResponse::Accepted(&self.hid_descriptor)),
                    _ => Some(InResponse::Rejected),
                },
                _ => Some(InResponse::Rejected),
            },
            (RequestType::Class, Recipient::Interface) => match req.request {
                HID_REQ_GET_IDLE => {
                    buf[0] = u8::try_from(self.idle_ms / 4).unwrap_or(0);
                    Some(InResponse::Accepted(&buf[0..1]))
                }
                HID_REQ_GET_PROTOCOL => {
                    // report protocol only
                    buf[0] = 1;
                    Some(InResponse::Accepted(&buf[0..1]))
                }
                _ => Some(InResponse::Rejected),
            },
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "usb_test.rs"]
mod test;
