mod v4l2_ctl;

pub use v4l2_ctl::{
    parse_list_devices,
    parse_list_formats,
    FailurePolicy,
    V4l2Ctl,
    V4l2CtlConfig
};

// Reading /dev/video* directly through the v4l2 ioctls would avoid the
// v4l-utils dependency, at the cost of unsafe FFI.
