//! Error types for navigation resolution.

/// Error returned by the [`Navigator`](crate::Navigator).
#[derive(Debug, thiserror::Error)]
pub enum NavigationError {
    /// Sidebar items were requested before any route was resolved.
    #[error("Sidebar items requested before navigation was resolved for any route")]
    SidebarNotProvided,
    /// Device breakpoint error.
    #[error(transparent)]
    Device(#[from] DeviceError),
}

/// Error for malformed device breakpoints.
#[derive(Debug, thiserror::Error)]
pub enum DeviceError {
    /// Breakpoint is not an integer pixel value.
    #[error("Device width for {device} must be an integer pixel value (got {value:?})")]
    InvalidWidth {
        device: &'static str,
        value: String,
    },
}
