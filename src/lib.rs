pub mod boundary;
pub mod commands;
pub mod config;
pub mod content;
pub mod demo;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod logging;
pub mod registry;
pub mod render;
pub mod rotator;
pub mod state;
pub mod sync;
pub mod tui;
pub mod widget;

pub use error::{CarouscrollError, Result};
pub use registry::{ContainerId, Registry};
pub use widget::{EventResult, Widget, WidgetEvent, WidgetHost};
