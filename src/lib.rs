//! Rectangle selection over rendered web content, answered in one line.
//!
//! Page side: [`gesture`] recognises the long-press drag, [`render`] draws the
//! corner markers, [`extract`] collects the text under the rectangle and
//! [`bridge`] posts it to the host. Host side: [`host`] asks the backend and
//! runs the reply through [`answer::sanitize`].

pub mod answer;
pub mod bridge;
pub mod config;
pub mod domain;
pub mod extract;
pub mod gesture;
pub mod host;
pub mod page;
pub mod render;
pub mod session;
