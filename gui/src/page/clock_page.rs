use embedded_graphics::{
    pixelcolor::Rgb888,
    prelude::{DrawTarget, Size},
};
use std::{fmt::Debug, time::Duration};

use crate::{
    draw::DrawError,
    geometry::Constraints,
    scheduler::{Scheduler, TaskHandle},
    widget::{ClockWidget, Paintable},
    REFRESH_INTERVAL,
};

/// The screen hosting the clock. Owns the widget and the redraw driver's
/// handle for as long as it is active.
pub struct ClockPage {
    widget: ClockWidget,
    refresh_interval: Duration,
    redraw: Option<TaskHandle>,
}

impl ClockPage {
    pub fn new(widget: ClockWidget) -> Self {
        Self {
            widget,
            refresh_interval: REFRESH_INTERVAL,
            redraw: None,
        }
    }

    pub fn refresh_interval(mut self, refresh_interval: Duration) -> Self {
        self.refresh_interval = refresh_interval;
        self
    }

    /// Starts the redraw driver: an immediate repaint, then one per interval.
    pub fn on_start(&mut self, scheduler: &mut Scheduler) {
        if let Some(previous) = self.redraw.take() {
            previous.cancel();
        }

        let invalidator = self.widget.invalidator();
        let handle = scheduler.every(self.refresh_interval, move || invalidator.request());
        self.redraw = Some(handle);

        log::info!(
            "Clock page started, repainting every {} ms",
            self.refresh_interval.as_millis()
        );
    }

    /// Flips between the analog and digital faces.
    pub fn on_tap(&mut self) {
        self.widget.toggle();
        log::debug!(
            "Switched to {} face",
            if self.widget.is_show_analog() {
                "analog"
            } else {
                "digital"
            }
        );
    }

    /// Stops the redraw driver.
    pub fn on_destroy(&mut self) {
        if let Some(handle) = self.redraw.take() {
            handle.cancel();
            log::info!("Clock page destroyed");
        }
    }

    pub fn is_active(&self) -> bool {
        self.redraw
            .as_ref()
            .is_some_and(|handle| !handle.is_cancelled())
    }

    pub fn layout(&mut self, constraints: Constraints) -> Size {
        self.widget.on_measure(constraints)
    }

    pub fn widget(&self) -> &ClockWidget {
        &self.widget
    }

    pub fn draw<Display>(&mut self, display: &mut Display) -> Result<(), DrawError>
    where
        Display: DrawTarget<Color = Rgb888>,
        Display::Error: Debug,
    {
        self.widget.on_paint(display)
    }

    /// Repaints only when something asked for it. Returns whether it drew.
    pub fn draw_if_invalidated<Display>(&mut self, display: &mut Display) -> Result<bool, DrawError>
    where
        Display: DrawTarget<Color = Rgb888>,
        Display::Error: Debug,
    {
        if !self.widget.invalidator().is_requested() {
            return Ok(false);
        }

        self.draw(display)?;
        Ok(true)
    }
}

impl Drop for ClockPage {
    fn drop(&mut self) {
        self.on_destroy();
    }
}
