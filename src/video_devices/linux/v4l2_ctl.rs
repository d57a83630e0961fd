//! Finds v4l (Video for Linux) capture devices by running `v4l2-ctl`.
/*
 * The index reported for a device is the number in its /dev/videoN node,
 * which is also the index cv::VideoCapture and friends accept.
 *
 * Two queries are made per run:
 *   v4l2-ctl --list-devices
 *   v4l2-ctl --list-formats-ext /dev/videoN   (once per device found)
 *
 * See https://git.linuxtv.org/v4l-utils.git/tree/utils/v4l2-ctl
 */
use std::{
    ffi::OsString,
    io::{ErrorKind, Read},
    process::{Child, Command, ExitStatus, Output, Stdio},
    sync::mpsc::{self, Receiver, RecvTimeoutError},
    thread,
    time::{Duration, Instant},
    vec::Vec
};
use tracing::{debug, error, warn};
use crate::error::EnumerationError;
use crate::video_devices::{CaptureDeviceEnumerator, Device};

mod parse;
pub use parse::{parse_list_devices, parse_list_formats};

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// What to do with the devices already found when one of them fails its
/// format query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Any failure after the availability check empties the whole result.
    #[default]
    DiscardAll,
    /// A failing format query drops only that device.
    SkipDevice
}

#[derive(Debug, Clone)]
pub struct V4l2CtlConfig {
    pub program: OsString,
    /// Shown after the "not found" message.
    pub install_hint: String,
    /// Per invocation. `None` waits for as long as the tool takes.
    pub timeout: Option<Duration>,
    pub failure_policy: FailurePolicy
}

impl Default for V4l2CtlConfig {
    fn default() -> Self {
        Self {
            program: OsString::from("v4l2-ctl"),
            install_hint: "Please install the v4l-utils package.".to_string(),
            timeout: Some(Duration::from_secs(10)),
            failure_policy: FailurePolicy::default()
        }
    }
}

/// Gateway to the `v4l2-ctl` command-line tool.
#[derive(Debug, Clone, Default)]
pub struct V4l2Ctl {
    config: V4l2CtlConfig
}

impl V4l2Ctl {
    pub fn new(config: V4l2CtlConfig) -> Self {
        V4l2Ctl { config }
    }

    /// Runs `v4l2-ctl --version`, failing if the tool is missing or broken.
    pub fn ensure_tool_available(&self) -> Result<(), EnumerationError> {
        let output = self.run(&["--version"])?;
        let version = String::from_utf8_lossy(&output.stdout);
        debug!(version = version.trim(), "found v4l2-ctl");
        Ok(())
    }

    /// Lists devices, then fills in each device's formats.
    ///
    /// Only the availability check can fail this call. Later failures are
    /// logged and handled according to the configured [FailurePolicy].
    pub fn enumerate(&self) -> Result<Vec<Device>, EnumerationError> {
        self.ensure_tool_available()?;

        match self.enumerate_available() {
            Ok(devices) => Ok(devices),
            Err(err) => {
                error!("Error enumerating v4l2 devices: {}", err);
                Ok(Vec::new())
            }
        }
    }

    fn enumerate_available(&self) -> Result<Vec<Device>, EnumerationError> {
        let listing = self.run_for_text(&["--list-devices"])?;
        let mut devices = Vec::<Device>::new();

        for mut device in parse_list_devices(&listing) {
            match self.find_formats(&mut device) {
                Ok(()) => devices.push(device),
                Err(err) if self.config.failure_policy == FailurePolicy::SkipDevice => {
                    warn!(index = device.index, name = %device.name,
                        "Skipping device whose formats could not be listed: {}", err);
                },
                Err(err) => { return Err(err); }
            }
        }
        Ok(devices)
    }

    fn find_formats(&self, device: &mut Device) -> Result<(), EnumerationError> {
        let node = format!("/dev/video{}", device.index);
        let listing = self.run_for_text(&["--list-formats-ext", &node])?;
        device.formats = parse_list_formats(&listing);
        debug!(index = device.index, formats = device.formats.len(), "listed formats");
        Ok(())
    }

    fn run_for_text(&self, args: &[&str]) -> Result<String, EnumerationError> {
        let output = self.run(args)?;
        String::from_utf8(output.stdout)
            .map_err(|_| self.execution_failed(args, "output is not valid UTF-8".to_string()))
    }

    fn run(&self, args: &[&str]) -> Result<Output, EnumerationError> {
        let child = Command::new(&self.config.program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|err| match err.kind() {
                ErrorKind::NotFound => EnumerationError::ToolNotFound {
                    program: self.program_name(),
                    install_hint: self.config.install_hint.clone()
                },
                _ => self.execution_failed(args, err.to_string())
            })?;

        let output = match self.config.timeout {
            Some(timeout) => wait_with_timeout(child, timeout),
            None => child.wait_with_output()
        }.map_err(|err| self.execution_failed(args, err.to_string()))?;

        if !output.status.success() {
            return Err(self.execution_failed(args, describe_failure(&output)));
        }
        Ok(output)
    }

    fn execution_failed(&self, args: &[&str], detail: String) -> EnumerationError {
        EnumerationError::ToolExecutionFailed {
            program: self.program_name(),
            args: args.join(" "),
            detail
        }
    }

    fn program_name(&self) -> String {
        self.config.program.to_string_lossy().to_string()
    }
}

impl CaptureDeviceEnumerator for V4l2Ctl {
    fn backend_name(&self) -> &'static str {
        "v4l2-ctl"
    }

    fn find_capture_devices(&self) -> Result<Vec<Device>, EnumerationError> {
        self.enumerate()
    }
}

/// Waits for the child like [Child::wait_with_output], killing it once the
/// timeout has passed. Reading its output is held to the same deadline, since
/// a background process started by the tool can keep the pipes open.
fn wait_with_timeout(mut child: Child, timeout: Duration) -> std::io::Result<Output> {
    // Drain both pipes while waiting so a chatty tool can't block on a full pipe.
    let stdout = child.stdout.take().map(drain);
    let stderr = child.stderr.take().map(drain);

    let deadline = Instant::now() + timeout;
    let status: ExitStatus = loop {
        if let Some(status) = child.try_wait()? {
            break status;
        }
        if Instant::now() >= deadline {
            child.kill().ok();
            child.wait().ok();
            return Err(timed_out(timeout));
        }
        thread::sleep(POLL_INTERVAL);
    };

    Ok(Output {
        status,
        stdout: collect(stdout, deadline, timeout)?,
        stderr: collect(stderr, deadline, timeout)?
    })
}

fn drain<R: Read + Send + 'static>(mut pipe: R) -> Receiver<Vec<u8>> {
    let (sender, receiver) = mpsc::channel();
    thread::spawn(move || {
        let mut buf = Vec::new();
        pipe.read_to_end(&mut buf).ok();
        sender.send(buf).ok();
    });
    receiver
}

fn collect(pipe: Option<Receiver<Vec<u8>>>, deadline: Instant, timeout: Duration) -> std::io::Result<Vec<u8>> {
    let Some(receiver) = pipe else {
        return Ok(Vec::new());
    };
    match receiver.recv_timeout(deadline.saturating_duration_since(Instant::now())) {
        Ok(buf) => Ok(buf),
        Err(RecvTimeoutError::Timeout) => Err(timed_out(timeout)),
        Err(RecvTimeoutError::Disconnected) => Ok(Vec::new())
    }
}

fn timed_out(timeout: Duration) -> std::io::Error {
    std::io::Error::new(ErrorKind::TimedOut, format!("no response within {:?}", timeout))
}

fn describe_failure(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stderr = stderr.trim();
    if stderr.is_empty() {
        output.status.to_string()
    } else {
        format!("{}: {}", output.status, stderr)
    }
}
