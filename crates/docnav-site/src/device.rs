//! Device breakpoints.

use docnav_config::{BuildMode, Breakpoints};

use crate::error::DeviceError;

/// Device classes with a configured breakpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeviceType {
    Mobile,
}

impl DeviceType {
    fn name(self) -> &'static str {
        match self {
            Self::Mobile => "mobile",
        }
    }

    fn breakpoint(self, breakpoints: &Breakpoints) -> &str {
        match self {
            Self::Mobile => &breakpoints.mobile,
        }
    }
}

/// Maximum viewport width, in pixels, of `device`.
///
/// A breakpoint that is not an integer pixel value is an error in
/// development builds and is ignored (`Ok(None)`) in production builds.
pub fn device_width(
    device: DeviceType,
    breakpoints: &Breakpoints,
    mode: BuildMode,
) -> Result<Option<u32>, DeviceError> {
    let raw = device.breakpoint(breakpoints);
    match raw.trim().trim_end_matches("px").trim().parse::<u32>() {
        Ok(width) => Ok(Some(width)),
        Err(_) if mode == BuildMode::Development => Err(DeviceError::InvalidWidth {
            device: device.name(),
            value: raw.to_owned(),
        }),
        Err(_) => {
            tracing::debug!(device = device.name(), value = raw, "Ignoring invalid device width");
            Ok(None)
        }
    }
}

/// Whether a viewport of `viewport_width` pixels counts as the device.
pub fn is_device(width: u32, viewport_width: u32) -> bool {
    viewport_width <= width
}
