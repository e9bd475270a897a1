//! Directional mouse gesture capture and recognition.
//!
//! [`mouse_gestures::GestureCapture`] consumes pointer events, classifies the
//! surface a stroke is drawn on, reduces the path to a direction code and
//! hands finished gestures to a [`mouse_gestures::GestureEventSink`].

pub mod actions;
pub mod logging;
pub mod mouse_gestures;
pub mod replay;
pub mod settings;
