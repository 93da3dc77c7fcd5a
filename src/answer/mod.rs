//! From raw backend output to the line the user sees
//!
//! - `request`: backend request/response shapes
//! - `client`: the backend call and its transport
//! - `sanitize`: single-line answer normalization
//! - `display`: auto-hiding answer display

pub mod client;
pub mod display;
pub mod request;
pub mod sanitize;

pub use client::{BackendError, HttpTransport, Transport};
pub use display::AnswerDisplay;
pub use sanitize::sanitize_answer;
