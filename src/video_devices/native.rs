//! Plain records handed over by native capture frameworks.
//!
//! The framework bridges copy what they need out of the framework's own
//! object graph into these, so nothing framework specific outlives the query.

use std::vec::Vec;
use tracing::{error, warn};
use crate::error::EnumerationError;
use super::{Device, FrameFormat};

/// Outcome of reading one device out of a framework.
pub type NativeResult = Result<NativeDevice, EnumerationError>;

#[derive(Debug, Clone, PartialEq)]
pub struct NativeDevice {
    pub name: String,
    pub formats: Vec<NativeFormat>
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NativeFormat {
    pub width: u32,
    pub height: u32,
    /// `None` when the framework advertises no frame rate for the format.
    pub max_fps: Option<f64>
}

impl From<NativeFormat> for FrameFormat {
    fn from(format: NativeFormat) -> Self {
        let fps = format.max_fps
            .filter(|fps| fps.is_finite() && *fps >= 0.0)
            .map_or(FrameFormat::UNKNOWN_FPS, |fps| fps.trunc() as i32);
        FrameFormat::new(format.width, format.height, fps)
    }
}

/// Numbers devices by their position in the framework's list, leaving out
/// the ones that could not be read. Devices after a failed one keep their
/// position.
pub fn collect_devices<I>(results: I) -> Vec<Device> where I: IntoIterator<Item = NativeResult> {
    results.into_iter()
        .enumerate()
        .filter_map(|(index, result)| match result {
            Ok(native) => Some(to_device(index as u32, native)),
            Err(err) => {
                warn!(index, "Skipping device that could not be read: {}", err);
                None
            }
        })
        .collect()
}

/// Runs a framework query. A failure of the query as a whole is logged and
/// leaves nothing listed.
pub fn find_or_empty<F>(backend: &str, query: F) -> Vec<Device> where
    F: FnOnce() -> Result<Vec<NativeResult>, EnumerationError>
{
    match query() {
        Ok(results) => collect_devices(results),
        Err(err) => {
            error!("Error enumerating {} devices: {}", backend, err);
            Vec::new()
        }
    }
}

fn to_device(index: u32, native: NativeDevice) -> Device {
    Device {
        index,
        name: native.name,
        formats: native.formats.into_iter().map(FrameFormat::from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn into_devices(natives: Vec<NativeDevice>) -> Vec<Device> {
        collect_devices(natives.into_iter().map(Ok))
    }

    fn format(width: u32, height: u32, max_fps: Option<f64>) -> NativeFormat {
        NativeFormat { width, height, max_fps }
    }

    #[test]
    fn indexes_follow_framework_order() {
        let devices = into_devices(vec![
            NativeDevice { name: "FaceTime HD Camera".to_string(), formats: vec![] },
            NativeDevice { name: "Desk View Camera".to_string(), formats: vec![] }
        ]);

        assert_eq!(devices, vec![
            Device::new(0, "FaceTime HD Camera"),
            Device::new(1, "Desk View Camera")
        ]);
    }

    #[test]
    fn missing_rate_maps_to_sentinel() {
        let devices = into_devices(vec![NativeDevice {
            name: "cam".to_string(),
            formats: vec![format(1920, 1080, Some(59.94)), format(640, 480, None)]
        }]);

        assert_eq!(devices[0].formats, vec![
            FrameFormat::new(1920, 1080, 59),
            FrameFormat::new(640, 480, FrameFormat::UNKNOWN_FPS)
        ]);
    }

    #[test]
    fn nonsensical_rate_maps_to_sentinel() {
        assert_eq!(FrameFormat::from(format(1, 1, Some(f64::NAN))).fps, FrameFormat::UNKNOWN_FPS);
        assert_eq!(FrameFormat::from(format(1, 1, Some(-5.0))).fps, FrameFormat::UNKNOWN_FPS);
    }

    #[test]
    fn failed_query_lists_nothing() {
        let devices = find_or_empty("test", || Err(EnumerationError::platform("device source unavailable")));

        assert!(devices.is_empty());
    }

    #[test]
    fn failed_device_is_skipped_and_others_keep_their_index() {
        let devices = find_or_empty("test", || Ok(vec![
            Ok(NativeDevice { name: "Integrated Camera".to_string(), formats: vec![] }),
            Err(EnumerationError::platform("device is in use")),
            Ok(NativeDevice { name: "USB Camera".to_string(), formats: vec![format(640, 480, Some(30.0))] })
        ]));

        let mut usb = Device::new(2, "USB Camera");
        usb.formats = vec![FrameFormat::new(640, 480, 30)];
        assert_eq!(devices, vec![Device::new(0, "Integrated Camera"), usb]);
    }

    #[test]
    fn keeps_format_order_and_duplicates() {
        let devices = into_devices(vec![NativeDevice {
            name: "cam".to_string(),
            formats: vec![format(640, 480, Some(30.0)), format(1280, 720, Some(30.0)), format(640, 480, Some(30.0))]
        }]);

        let widths: Vec<u32> = devices[0].formats.iter().map(|f| f.width).collect();
        assert_eq!(widths, vec![640, 1280, 640]);
    }
}
