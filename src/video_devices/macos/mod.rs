use std::vec::Vec;
use crate::error::EnumerationError;
use super::{CaptureDeviceEnumerator, Device};
use super::native::find_or_empty;

mod avfoundation;

/// AVFoundation video capture devices.
#[derive(Debug, Default)]
pub struct AvFoundation;

impl CaptureDeviceEnumerator for AvFoundation {
    fn backend_name(&self) -> &'static str {
        "AVFoundation"
    }

    fn find_capture_devices(&self) -> Result<Vec<Device>, EnumerationError> {
        Ok(find_or_empty(self.backend_name(), avfoundation::query_native_devices))
    }
}
