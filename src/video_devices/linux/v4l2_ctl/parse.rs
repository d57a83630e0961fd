//! Parsers for the text that `v4l2-ctl` prints.
/*
 * `v4l2-ctl --list-devices` prints one block per device, blocks separated
 * by a blank line:
 *
 *   ZED: ZED (usb-0000:00:14.0-1):
 *           /dev/video2
 *           /dev/video3
 *
 * `v4l2-ctl --list-formats-ext /dev/videoN` nests sizes under pixel formats
 * and frame intervals under sizes:
 *
 *   [0]: 'MJPG' (Motion-JPEG, compressed)
 *           Size: Discrete 1280x720
 *                   Interval: Discrete 0.033s (30.000 fps)
 *
 * Anything that does not fit these shapes is skipped rather than reported.
 */
use lazy_static::lazy_static;
use regex::{Captures, Regex};
use std::vec::Vec;
use tracing::trace;
use crate::video_devices::{Device, FrameFormat};

lazy_static! {
    static ref BLANK_LINE: Regex = Regex::new(r"\r?\n[ \t]*\r?\n").unwrap();
    static ref VIDEO_NODE: Regex = Regex::new(r"/dev/video(\d+)").unwrap();
    // Each size is paired with the first interval that follows it, however
    // much text sits in between.
    static ref SIZE_AND_INTERVAL: Regex = Regex::new(
        r"(?s)Size: Discrete (\d+)x(\d+).*?Interval: Discrete [0-9.]+s \(([0-9.]+) fps\)"
    ).unwrap();
}

/// Turns `--list-devices` output into devices with empty format lists.
///
/// A block needs a header line and at least two node lines. The name is the
/// header up to its first `:`, the index comes from the first node line.
pub fn parse_list_devices(output: &str) -> Vec<Device> {
    BLANK_LINE.split(output.trim())
        .map(str::trim)
        .filter(|block| !block.is_empty())
        .filter_map(to_device)
        .collect()
}

fn to_device(block: &str) -> Option<Device> {
    let lines: Vec<&str> = block.lines().collect();
    if lines.len() <= 2 {
        trace!(block, "skipping device block with too few lines");
        return None;
    }
    let name = lines[0].split(':').next().unwrap_or_default();
    match to_node_index(lines[1]) {
        Some(index) => Some(Device::new(index, name)),
        None => {
            trace!(line = lines[1], "skipping device block without a /dev/video node");
            None
        }
    }
}

// A node number too large for u32 is treated like a missing one.
fn to_node_index(line: &str) -> Option<u32> {
    VIDEO_NODE.captures(line)?
        .get(1)?
        .as_str()
        .parse::<u32>()
        .ok()
}

/// Turns `--list-formats-ext` output into formats, in the order they appear.
///
/// Frame rates are truncated, so `29.970 fps` becomes 29.
pub fn parse_list_formats(output: &str) -> Vec<FrameFormat> {
    SIZE_AND_INTERVAL.captures_iter(output)
        .filter_map(|caps| to_frame_format(&caps))
        .collect()
}

fn to_frame_format(caps: &Captures) -> Option<FrameFormat> {
    let width = caps[1].parse::<u32>().ok()?;
    let height = caps[2].parse::<u32>().ok()?;
    let fps = caps[3].parse::<f64>().ok()?;
    Some(FrameFormat::new(width, height, fps.trunc() as i32))
}
