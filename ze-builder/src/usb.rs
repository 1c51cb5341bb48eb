use embassy_usb::{driver::Driver, Builder};
use ze_firmware::{hid, key_reporter::REPORT_SIZE};

pub use ze_firmware::usb::{Configurator, State, UsbBuffers};

pub type KeyboardWriter<'d, D> = hid::HidWriter<'d, D, REPORT_SIZE>;

/// USB identity of a keyboard. Usually a `static` in the keyboard's `main.rs`.
pub struct ConfigBuilder {
    pub vendor_id: u16,
    pub product_id: u16,
    pub manufacturer: &'static str,
    pub product: &'static str,
    pub serial_number: &'static str,
    pub max_power: u16,
    pub poll_ms: u8,
}
impl ConfigBuilder {
    pub fn usb_config<'d>(&self) -> embassy_usb::Config<'d> {
        let mut conf = embassy_usb::Config::new(self.vendor_id, self.product_id);
        conf.manufacturer = Some(self.manufacturer);
        conf.product = Some(self.product);
        conf.serial_number = Some(self.serial_number);
        conf.max_power = self.max_power;
        conf
    }

    pub fn usb_configurator<'d>(&self) -> Configurator<'d> {
        Configurator::new(self.usb_config()).poll_ms(self.poll_ms)
    }

    pub fn keyboard_iface<'d, D: Driver<'d>>(
        &self,
        usb_config: &Configurator<'d>,
        keyboard_state: &'d mut State,
        usb_builder: &mut Builder<'d, D>,
    ) -> KeyboardWriter<'d, D> {
        crate::info!("keyboard interface {:x}:{:x}", self.vendor_id, self.product_id);
        usb_config.add_keyboard(usb_builder, keyboard_state)
    }
}

#[cfg(test)]
#[path = "usb_test.rs"]
mod test;
