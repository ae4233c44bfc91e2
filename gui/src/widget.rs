use embedded_graphics::{
    pixelcolor::{Rgb888, RgbColor},
    prelude::{DrawTarget, Size},
};
use std::{cell::Cell, fmt::Debug, rc::Rc};

use crate::{
    components::{draw_analog, draw_digital},
    draw::{clear, DrawError},
    geometry::{measure, Constraints, Geometry},
    time::{LocalClock, TimeSample, TimeSource},
};

pub const DEFAULT_PRIMARY_COLOR: Rgb888 = Rgb888::WHITE;
pub const DEFAULT_SECONDARY_COLOR: Rgb888 = Rgb888::new(0xCC, 0xCC, 0xCC);

/// Something the host can lay out and draw.
pub trait Paintable {
    fn on_measure(&mut self, constraints: Constraints) -> Size;

    fn on_paint<Display>(&mut self, canvas: &mut Display) -> Result<(), DrawError>
    where
        Display: DrawTarget<Color = Rgb888>,
        Display::Error: Debug;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub seconds_needle: Rgb888,
    pub hours_needle: Rgb888,
    pub minutes_needle: Rgb888,
    pub degrees: Rgb888,
    pub hour_values: Rgb888,
    pub numbers: Rgb888,
    pub background: Rgb888,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            seconds_needle: DEFAULT_SECONDARY_COLOR,
            hours_needle: DEFAULT_PRIMARY_COLOR,
            minutes_needle: DEFAULT_PRIMARY_COLOR,
            degrees: DEFAULT_PRIMARY_COLOR,
            hour_values: DEFAULT_PRIMARY_COLOR,
            numbers: Rgb888::WHITE,
            background: Rgb888::BLACK,
        }
    }
}

/// Sizes used by the faces. Lengths are in pixels, strokes and text ratios
/// are fractions of the face width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClockStyle {
    pub hour_needle_length: u32,
    pub minute_needle_length: u32,
    pub second_needle_length: u32,
    pub center_dot_radius: u32,
    pub hour_value_font_size: u32,
    pub degree_stroke: f64,
    pub hour_minute_needle_stroke: f64,
    pub second_needle_stroke: f64,
    pub digital_text_ratio: f64,
    pub meridiem_ratio: f64,
}

impl Default for ClockStyle {
    fn default() -> Self {
        Self {
            hour_needle_length: 150,
            minute_needle_length: 300,
            second_needle_length: 200,
            center_dot_radius: 40,
            hour_value_font_size: 80,
            degree_stroke: 0.010,
            hour_minute_needle_stroke: 0.015,
            second_needle_stroke: 0.005,
            digital_text_ratio: 0.2,
            meridiem_ratio: 0.3,
        }
    }
}

/// Shared "needs repaint" flag.
#[derive(Debug, Clone, Default)]
pub struct Invalidator(Rc<Cell<bool>>);

impl Invalidator {
    pub fn request(&self) {
        self.0.set(true);
    }

    pub fn is_requested(&self) -> bool {
        self.0.get()
    }

    /// Clears the flag, returning whether it was set.
    pub fn take(&self) -> bool {
        self.0.replace(false)
    }
}

pub struct ClockWidget {
    show_analog: bool,
    measured: Option<Size>,
    geometry: Geometry,
    palette: Palette,
    style: ClockStyle,
    clock: Box<dyn TimeSource>,
    invalidator: Invalidator,
}

impl ClockWidget {
    pub fn new(clock: Box<dyn TimeSource>) -> Self {
        Self {
            show_analog: true,
            measured: None,
            geometry: Geometry::default(),
            palette: Palette::default(),
            style: ClockStyle::default(),
            clock,
            invalidator: Invalidator::default(),
        }
    }

    pub fn palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    pub fn style(mut self, style: ClockStyle) -> Self {
        self.style = style;
        self
    }

    pub fn is_show_analog(&self) -> bool {
        self.show_analog
    }

    pub fn set_show_analog(&mut self, show_analog: bool) {
        self.show_analog = show_analog;
        self.invalidate();
    }

    pub fn toggle(&mut self) {
        self.set_show_analog(!self.show_analog);
    }

    pub fn invalidate(&self) {
        self.invalidator.request();
    }

    /// Handle that lets other parties (the redraw driver) request a repaint.
    pub fn invalidator(&self) -> Invalidator {
        self.invalidator.clone()
    }

    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    pub fn measured(&self) -> Option<Size> {
        self.measured
    }

    fn sample(&self) -> TimeSample {
        self.clock.sample()
    }
}

impl Default for ClockWidget {
    fn default() -> Self {
        Self::new(Box::new(LocalClock))
    }
}

impl Paintable for ClockWidget {
    fn on_measure(&mut self, constraints: Constraints) -> Size {
        let size = measure(constraints);
        self.measured = Some(size);
        size
    }

    fn on_paint<Display>(&mut self, canvas: &mut Display) -> Result<(), DrawError>
    where
        Display: DrawTarget<Color = Rgb888>,
        Display::Error: Debug,
    {
        let size = self.measured.unwrap_or_else(|| canvas.bounding_box().size);
        self.geometry = Geometry::from_size(size);
        self.invalidator.take();

        clear(canvas, self.palette.background)?;

        let time = self.sample();
        if self.show_analog {
            draw_analog(canvas, &self.geometry, &self.style, &self.palette, &time)
        } else {
            draw_digital(canvas, &self.geometry, &self.style, &self.palette, &time)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{display::Framebuffer, geometry::Padding, time::FixedClock};
    use embedded_graphics::{prelude::Point, Pixel};

    fn widget_at(hour: u32, minute: u32, second: u32) -> ClockWidget {
        ClockWidget::new(Box::new(FixedClock::hms(hour, minute, second).unwrap()))
    }

    fn paint(widget: &mut ClockWidget, side: u32) -> Framebuffer<Rgb888> {
        let mut fb = Framebuffer::new(Size::new(side, side), Rgb888::BLACK);
        widget.on_paint(&mut fb).unwrap();
        fb
    }

    fn digital_at(hour: u32, minute: u32, second: u32) -> ClockWidget {
        let mut widget = widget_at(hour, minute, second);
        widget.set_show_analog(false);
        widget
    }

    /// `(left, top, right, bottom)` of the pixels in `color` that pass `keep`.
    /// Right and bottom are exclusive.
    fn ink_bounds(
        fb: &Framebuffer<Rgb888>,
        color: Rgb888,
        keep: impl Fn(Point) -> bool,
    ) -> Option<(i32, i32, i32, i32)> {
        fb.pixels()
            .filter(|&Pixel(point, c)| c == color && keep(point))
            .fold(None, |bounds, Pixel(p, _)| {
                let (l, t, r, b) = bounds.unwrap_or((p.x, p.y, p.x + 1, p.y + 1));
                Some((l.min(p.x), t.min(p.y), r.max(p.x + 1), b.max(p.y + 1)))
            })
    }

    #[test]
    fn measure_remembers_square_size() {
        let mut widget = ClockWidget::default();
        let size = widget.on_measure(Constraints::new(Size::new(500, 320), Padding::uniform(10)));

        assert_eq!(size, Size::new(320, 320));
        assert_eq!(widget.measured(), Some(size));
    }

    #[test]
    fn paint_recomputes_geometry_from_layout() {
        let mut widget = widget_at(12, 0, 0);
        widget.on_measure(Constraints::new(Size::new(300, 400), Padding::default()));

        let mut fb = Framebuffer::new(Size::new(400, 400), Rgb888::BLACK);
        widget.on_paint(&mut fb).unwrap();

        assert_eq!(widget.geometry().width, 300);
        assert_eq!(widget.geometry().center_x, 150);
    }

    #[test]
    fn analog_face_draws_ticks_and_center_dot() {
        let mut widget = widget_at(12, 0, 0);
        let fb = paint(&mut widget, 400);
        let palette = Palette::default();

        // center dot over the needles
        assert_eq!(fb.pixel(Point::new(200, 200)), Some(palette.hours_needle));
        // 3 o'clock tick is opaque
        assert_eq!(fb.pixel(Point::new(388, 200)), Some(palette.degrees));
        // 6° tick is faded
        assert_eq!(fb.pixel(Point::new(386, 180)), Some(Rgb888::new(140, 140, 140)));
    }

    #[test]
    fn needles_follow_the_time() {
        let palette = Palette::default();

        // 12:00:00, every needle points up; nothing below the dot
        let fb = paint(&mut widget_at(12, 0, 0), 800);
        assert_eq!(fb.pixel(Point::new(400, 400 - 250)), Some(palette.minutes_needle));
        assert_eq!(fb.pixel(Point::new(400, 400 + 100)), Some(palette.background));

        // 12:30:00, minute needle points down
        let fb = paint(&mut widget_at(12, 30, 0), 800);
        assert_eq!(fb.pixel(Point::new(400, 400 + 250)), Some(palette.minutes_needle));
    }

    #[test]
    fn digital_face_has_no_ticks() {
        let mut widget = widget_at(9, 5, 3);
        widget.set_show_analog(false);
        let fb = paint(&mut widget, 400);
        let palette = Palette::default();

        assert_eq!(fb.pixel(Point::new(388, 200)), Some(palette.background));
        assert!(fb.count(palette.numbers) > 0);
        // text stays on the horizontal center line band
        assert_eq!(fb.pixel(Point::new(200, 10)), Some(palette.background));
    }

    #[test]
    fn digital_text_grows_with_the_face() {
        let numbers = Palette::default().numbers;
        let mut widget = digital_at(21, 5, 3);

        let (_, small_top, _, small_bottom) =
            ink_bounds(&paint(&mut widget, 400), numbers, |_| true).unwrap();
        let (left, large_top, right, large_bottom) =
            ink_bounds(&paint(&mut widget, 720), numbers, |_| true).unwrap();

        let small = small_bottom - small_top;
        let large = large_bottom - large_top;
        assert!(large > small);
        // both stay proportional to the width
        assert!((large * 400 / 720 - small).abs() <= 2, "{} vs {}", small, large);
        assert!(left >= 0 && right <= 720);
    }

    #[test]
    fn digital_text_is_centered() {
        let numbers = Palette::default().numbers;

        for side in [200, 400, 720] {
            let fb = paint(&mut digital_at(20, 5, 3), side);
            let (left, top, right, bottom) = ink_bounds(&fb, numbers, |_| true).unwrap();
            let center = side as i32 / 2;

            assert!((left + right - 2 * center).abs() <= 3, "{}: {}..{}", side, left, right);
            assert!((top + bottom - 2 * center).abs() <= 3, "{}: {}..{}", side, top, bottom);
        }
    }

    #[test]
    fn meridiem_is_smaller_and_shares_the_baseline() {
        let numbers = Palette::default().numbers;
        let fb = paint(&mut digital_at(20, 5, 3), 400);
        let (_, top, right, bottom) = ink_bounds(&fb, numbers, |_| true).unwrap();

        // rightmost column belongs to the "M" of "PM"
        let (_, suffix_top, _, suffix_bottom) =
            ink_bounds(&fb, numbers, |p| p.x == right - 1).unwrap();

        assert!(suffix_top > top);
        assert!((suffix_bottom - bottom).abs() <= 1);
        assert!((suffix_bottom - suffix_top) * 2 < bottom - top);
    }

    #[test]
    fn meridiem_follows_its_ratio() {
        let numbers = Palette::default().numbers;
        let suffix_height = |meridiem_ratio: f64| {
            let mut widget = digital_at(20, 5, 3).style(ClockStyle {
                meridiem_ratio,
                ..ClockStyle::default()
            });
            let fb = paint(&mut widget, 400);
            let (_, _, right, _) = ink_bounds(&fb, numbers, |_| true).unwrap();
            let (_, top, _, bottom) = ink_bounds(&fb, numbers, |p| p.x == right - 1).unwrap();
            bottom - top
        };

        assert!(suffix_height(0.6) > suffix_height(0.3));
    }

    #[test]
    fn toggle_twice_restores_the_face() {
        let mut widget = widget_at(3, 0, 0);
        let before = paint(&mut widget, 300);

        widget.toggle();
        assert!(!widget.is_show_analog());
        let digital = paint(&mut widget, 300);
        assert!(before.diff(&digital).is_some());

        widget.toggle();
        assert!(widget.is_show_analog());
        let after = paint(&mut widget, 300);
        assert!(before.diff(&after).is_none());
    }

    #[test]
    fn toggling_requests_a_repaint() {
        let mut widget = widget_at(3, 0, 0);
        let invalidator = widget.invalidator();
        assert!(!invalidator.is_requested());

        widget.toggle();
        assert!(invalidator.is_requested());

        paint(&mut widget, 100);
        assert!(!invalidator.is_requested());
    }

    #[test]
    fn zero_size_draws_nothing() {
        let mut widget = widget_at(3, 0, 0);
        widget.on_measure(Constraints::new(Size::zero(), Padding::default()));
        let mut fb = Framebuffer::new(Size::new(0, 0), Rgb888::BLACK);
        widget.on_paint(&mut fb).unwrap();

        widget.set_show_analog(false);
        widget.on_paint(&mut fb).unwrap();
    }
}
