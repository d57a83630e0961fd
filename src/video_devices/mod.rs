use std::vec::Vec;
use crate::config::Config;
use crate::error::EnumerationError;

mod device;
pub use device::Device;
pub use device::FrameFormat;

// The v4l2-ctl gateway is plain process handling, so it builds everywhere.
pub mod linux;
#[cfg(target_os = "macos")]
pub mod macos;
#[cfg(target_os = "windows")]
pub mod windows;
pub mod native;
pub mod unsupported;

/// One way of finding the capture devices attached to this host.
pub trait CaptureDeviceEnumerator {
    fn backend_name(&self) -> &'static str;

    fn find_capture_devices(&self) -> Result<Vec<Device>, EnumerationError>;
}

/// Picks the enumerator for the host this was built for.
#[cfg(target_os = "linux")]
pub fn platform_enumerator(config: &Config) -> Box<dyn CaptureDeviceEnumerator> {
    Box::new(linux::V4l2Ctl::new(config.v4l2_ctl.clone()))
}

#[cfg(target_os = "macos")]
pub fn platform_enumerator(_config: &Config) -> Box<dyn CaptureDeviceEnumerator> {
    Box::new(macos::AvFoundation)
}

#[cfg(target_os = "windows")]
pub fn platform_enumerator(_config: &Config) -> Box<dyn CaptureDeviceEnumerator> {
    Box::new(windows::MediaFoundation)
}

#[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
pub fn platform_enumerator(_config: &Config) -> Box<dyn CaptureDeviceEnumerator> {
    Box::new(unsupported::Unsupported::for_host())
}
