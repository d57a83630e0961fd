use std::io::{Result, Write};
use crate::video_devices::Device;

/// Writes each device followed by its formats, indented two spaces.
pub fn write_listing<W: Write>(out: &mut W, devices: &[Device]) -> Result<()> {
    for device in devices {
        writeln!(out, "{}", device)?;
        for format in &device.formats {
            writeln!(out, "  {}", format)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::video_devices::FrameFormat;

    #[test]
    fn lists_devices_with_their_formats() {
        let mut zed = Device::new(2, "ZED");
        zed.formats = vec![FrameFormat::new(1280, 720, 30), FrameFormat::new(640, 480, 30)];
        let devices = vec![zed, Device::new(0, "BisonCam,NB Pro")];

        let mut out = Vec::new();
        write_listing(&mut out, &devices).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(),
            "- Camera 2: ZED\n  1280x720 @ 30 fps\n  640x480 @ 30 fps\n- Camera 0: BisonCam,NB Pro\n");
    }

    #[test]
    fn nothing_found_prints_nothing() {
        let mut out = Vec::new();
        write_listing(&mut out, &[]).unwrap();

        assert!(out.is_empty());
    }
}
