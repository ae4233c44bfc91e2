pub mod circle;
pub mod components;
pub mod display;
pub mod draw;
pub mod font;
pub mod geometry;
pub mod page;
pub mod scheduler;
pub mod text;
pub mod time;
pub mod widget;

pub use display::{Framebuffer, Scale, Scaled};
pub use draw::DrawError;
pub use geometry::{Constraints, Padding};
pub use page::ClockPage;
pub use scheduler::{Scheduler, TaskHandle};
pub use time::{FixedClock, LocalClock, TimeSample, TimeSource};
pub use widget::{ClockStyle, ClockWidget, Paintable, Palette};

/// Default repaint period of the redraw driver.
pub const REFRESH_INTERVAL: std::time::Duration = std::time::Duration::from_millis(1000);
