use std::vec::Vec;
use crate::error::EnumerationError;
use super::{CaptureDeviceEnumerator, Device};
use super::native::find_or_empty;

mod msmf;

/// Media Foundation (MSMF) video capture sources.
#[derive(Debug, Default)]
pub struct MediaFoundation;

impl CaptureDeviceEnumerator for MediaFoundation {
    fn backend_name(&self) -> &'static str {
        "Media Foundation"
    }

    fn find_capture_devices(&self) -> Result<Vec<Device>, EnumerationError> {
        // Could also add UEYE devices.
        Ok(find_or_empty(self.backend_name(), msmf::query_native_devices))
    }
}
