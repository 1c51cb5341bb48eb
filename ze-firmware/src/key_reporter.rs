use embassy_sync::{blocking_mutex::raw::RawMutex, channel::Channel};
use embassy_usb::driver::{Driver, EndpointError};

use crate::{hid::HidWriter, warn};

/// Report id of the combined keyboard and media report.
pub const KEYBOARD_REPORT_ID: u8 = 1;

/// Key slots carried by the USB report. Matches [`crate::usb::REPORT_DESC`].
pub const REPORT_KEY_SLOTS: usize = 6;

/// Bytes on the wire: id, modifiers, reserved, key slots and a 16 bit consumer usage.
pub const REPORT_SIZE: usize = 3 + REPORT_KEY_SLOTS + 2;

/// The output of one cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Report<const N: usize> {
    pub keys: [u16; N],
    pub modifiers: u8,
    pub media: u16,
}

impl<const N: usize> Default for Report<N> {
    fn default() -> Self {
        Self {
            keys: [0; N],
            modifiers: 0,
            media: 0,
        }
    }
}

impl Report<REPORT_KEY_SLOTS> {
    /// Encode for the wire. Key codes that do not fit the keyboard usage page are sent as "no
    /// event".
    pub fn to_bytes(&self) -> [u8; REPORT_SIZE] {
        let mut bytes = [0; REPORT_SIZE];
        bytes[0] = KEYBOARD_REPORT_ID;
        bytes[1] = self.modifiers;
        for (b, code) in bytes[3..3 + REPORT_KEY_SLOTS].iter_mut().zip(self.keys) {
            *b = u8::try_from(code).unwrap_or(0);
        }
        bytes[3 + REPORT_KEY_SLOTS..].copy_from_slice(&self.media.to_le_bytes());
        bytes
    }
}

/// Receives the report produced by every cycle.
pub trait ReportEmitter<const N: usize> {
    fn emit(&mut self, report: &Report<N>);
}

/// Hands reports from the scan loop to the USB task. A full channel drops the report.
pub struct ReportChannel<M: RawMutex, const N: usize, const CAP: usize>(Channel<M, Report<N>, CAP>);
impl<M: RawMutex, const N: usize, const CAP: usize> Default for ReportChannel<M, N, CAP> {
    fn default() -> Self {
        Self(Channel::new())
    }
}
impl<M: RawMutex, const N: usize, const CAP: usize> ReportChannel<M, N, CAP> {
    pub async fn receive(&self) -> Report<N> {
        self.0.receive().await
    }

    pub fn try_send(&self, report: Report<N>) {
        if self.0.try_send(report).is_err() {
            warn!("report channel full; report dropped");
        }
    }
}

impl<M: RawMutex, const N: usize, const CAP: usize> ReportEmitter<N> for &ReportChannel<M, N, CAP> {
    fn emit(&mut self, report: &Report<N>) {
        self.try_send(*report);
    }
}

pub struct Reporter<'d, D: Driver<'d>> {
    hid_writer: HidWriter<'d, D, REPORT_SIZE>,
}

impl<'d, D: Driver<'d>> Reporter<'d, D> {
    pub fn new(hid_writer: HidWriter<'d, D, REPORT_SIZE>) -> Self {
        Self { hid_writer }
    }

    pub async fn report(&mut self, report: &Report<REPORT_KEY_SLOTS>) -> Result<(), EndpointError> {
        self.hid_writer.write(&report.to_bytes()).await
    }

    pub async fn run<M: RawMutex, const CAP: usize>(
        &mut self,
        channel: &ReportChannel<M, REPORT_KEY_SLOTS, CAP>,
    ) -> ! {
        loop {
            let report = channel.receive().await;
            if let Err(e) = self.report(&report).await {
                warn!("failed to send report: {:?}", e);
            }
        }
    }
}

#[cfg(test)]
#[path = "key_reporter_test.rs"]
mod test;
