//! Lists the video capture devices attached to this host and the
//! (width, height, fps) formats each one supports.
//!
//! Linux devices come from the `v4l2-ctl` tool, macOS devices from
//! AVFoundation and Windows devices from Media Foundation.

pub mod config;
pub mod error;
pub mod listing;
pub mod logging;
pub mod video_devices;

pub use error::EnumerationError;
pub use video_devices::{platform_enumerator, CaptureDeviceEnumerator, Device, FrameFormat};
