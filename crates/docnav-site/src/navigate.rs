//! Programmatic navigation.

use crate::path::{encode_path, is_absolute, is_protocol_qualified};

/// What the host should do to follow a link.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NavigateAction {
    /// Nothing to do.
    None,
    /// Push a route onto the router history.
    Push(String),
    /// Open the URL outside the site.
    Open(String),
}

/// Decide how to follow `url` from the route at `current_path`.
///
/// # Examples
///
/// ```
/// use docnav_site::navigate::{NavigateAction, navigate_action};
///
/// assert_eq!(navigate_action("/guide/", "/"), NavigateAction::Push("/guide/".to_owned()));
/// assert_eq!(navigate_action("/guide/", "/guide/"), NavigateAction::None);
/// ```
pub fn navigate_action(url: &str, current_path: &str) -> NavigateAction {
    if url.is_empty() {
        NavigateAction::None
    } else if is_absolute(url) {
        if url == current_path {
            NavigateAction::None
        } else {
            NavigateAction::Push(url.to_owned())
        }
    } else if is_protocol_qualified(url) {
        NavigateAction::Open(url.to_owned())
    } else {
        NavigateAction::Push(encode_path(url))
    }
}
