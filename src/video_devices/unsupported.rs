use std::vec::Vec;
use tracing::warn;
use crate::error::EnumerationError;
use super::{CaptureDeviceEnumerator, Device};

/// Stands in on hosts without a capture backend; always finds nothing.
#[derive(Debug)]
pub struct Unsupported {
    os: &'static str
}

impl Unsupported {
    pub fn new(os: &'static str) -> Self {
        Unsupported { os }
    }

    pub fn for_host() -> Self {
        Self::new(std::env::consts::OS)
    }
}

impl CaptureDeviceEnumerator for Unsupported {
    fn backend_name(&self) -> &'static str {
        "unsupported"
    }

    fn find_capture_devices(&self) -> Result<Vec<Device>, EnumerationError> {
        warn!("Camera enumeration is not supported on {}", self.os);
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_nothing_without_failing() {
        let devices = Unsupported::new("plan9").find_capture_devices().unwrap();

        assert!(devices.is_empty());
    }
}
