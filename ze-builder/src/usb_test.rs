use embassy_futures::block_on;
use ze_firmware::key_reporter::{Report, Reporter};
use ze_firmware::usb_test_stub::MyDriver;

use super::*;

const CONFIG_BUILDER: ConfigBuilder = ConfigBuilder {
    vendor_id: 0x1209,
    product_id: 0x5a60,
    manufacturer: "Ze",
    product: "Ze60",
    serial_number: "ze:0001",
    max_power: 150,
    poll_ms: 1,
};

#[test]
fn usb_config() {
    let conf = CONFIG_BUILDER.usb_config();

    assert_eq!(conf.manufacturer, Some("Ze"));
    assert_eq!(conf.product, Some("Ze60"));
    assert_eq!(conf.serial_number, Some("ze:0001"));
    assert_eq!(conf.max_power, 150);
}

#[test]
fn keyboard_iface() {
    let driver = MyDriver::default();
    let messages = driver.messages.clone();
    let mut buffers = UsbBuffers::default();
    let mut state = State::new();

    let mut usb_config = CONFIG_BUILDER.usb_configurator();
    let mut usb_builder = usb_config.usb_builder(driver, &mut buffers).unwrap();
    let writer = CONFIG_BUILDER.keyboard_iface(&usb_config, &mut state, &mut usb_builder);

    let mut reporter = Reporter::new(writer);
    let mut report = Report::default();
    report.keys[0] = 0x14;
    block_on(reporter.report(&report)).unwrap();

    assert_eq!(messages.get().as_slice(), &[1, 0, 0, 0x14, 0, 0, 0, 0, 0, 0, 0]);
}
