//! Reads devices and formats from AVFoundation.
/*
 * See:
 * https://developer.apple.com/documentation/avfoundation/avcapturedevice
 * https://developer.apple.com/documentation/avfoundation/avcapturedevice/format
 */
use objc2_av_foundation::{AVCaptureDevice, AVCaptureDeviceFormat, AVMediaTypeVideo};
use objc2_core_media::CMVideoFormatDescriptionGetDimensions;
use crate::error::EnumerationError;
use crate::video_devices::native::{NativeDevice, NativeFormat, NativeResult};

pub fn query_native_devices() -> Result<Vec<NativeResult>, EnumerationError> {
    let media_type = unsafe { AVMediaTypeVideo }
        .ok_or_else(|| EnumerationError::platform("AVMediaTypeVideo not available"))?;

    #[allow(deprecated)]
    let devices = unsafe { AVCaptureDevice::devicesWithMediaType(media_type) };

    Ok(devices.iter()
        .map(|device| Ok(to_native_device(&device)))
        .collect())
}

fn to_native_device(device: &AVCaptureDevice) -> NativeDevice {
    let name = unsafe { device.localizedName() }.to_string();
    let formats = unsafe { device.formats() }
        .iter()
        .map(|format| to_native_format(&format))
        .collect();
    NativeDevice { name, formats }
}

fn to_native_format(format: &AVCaptureDeviceFormat) -> NativeFormat {
    let desc = unsafe { format.formatDescription() };
    let dims = unsafe { CMVideoFormatDescriptionGetDimensions(&desc) };

    // Only the first advertised range is consulted.
    let max_fps = unsafe { format.videoSupportedFrameRateRanges() }
        .iter()
        .next()
        .map(|range| unsafe { range.maxFrameRate() });

    NativeFormat {
        width: dims.width.max(0) as u32,
        height: dims.height.max(0) as u32,
        max_fps
    }
}
