use std::fmt;
use std::vec::Vec;

/// A video capture device found during one enumeration call.
///
/// The index is only meaningful for the enumeration that produced it; the
/// host is free to renumber device nodes between runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Device {
    pub index: u32,
    pub name: String,
    /// In the order the backend reported them. Never sorted or deduplicated.
    pub formats: Vec<FrameFormat>
}

impl Device {
    /// A device with no formats yet, as discovered before format lookup.
    pub fn new(index: u32, name: impl Into<String>) -> Self {
        Device {
            index,
            name: name.into(),
            formats: Vec::new()
        }
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "- Camera {}: {}", self.index, self.name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameFormat {
    pub width: u32,
    pub height: u32,
    pub fps: i32
}

impl FrameFormat {
    /// Frame rate reported when a native framework gives no rate for a format.
    pub const UNKNOWN_FPS: i32 = -1;

    pub fn new(width: u32, height: u32, fps: i32) -> Self {
        FrameFormat { width, height, fps }
    }
}

impl From<(u32, u32, i32)> for FrameFormat {
    fn from((width, height, fps): (u32, u32, i32)) -> Self {
        FrameFormat { width, height, fps }
    }
}

impl fmt::Display for FrameFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{} @ {} fps", self.width, self.height, self.fps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_device_has_no_formats() {
        let device = Device::new(2, "ZED");
        assert_eq!(device.index, 2);
        assert_eq!(device.name, "ZED");
        assert!(device.formats.is_empty());
    }

    #[test]
    fn displays_device_header() {
        let device = Device::new(0, "BisonCam,NB Pro");
        assert_eq!(device.to_string(), "- Camera 0: BisonCam,NB Pro");
    }

    #[test]
    fn displays_format_as_size_and_rate() {
        assert_eq!(FrameFormat::new(1280, 720, 30).to_string(), "1280x720 @ 30 fps");
        assert_eq!(FrameFormat::new(640, 480, FrameFormat::UNKNOWN_FPS).to_string(), "640x480 @ -1 fps");
    }
}
