//! Layout and angle math for the clock face.
//!
//! Angles are in degrees. Face points (ticks, numerals) use the math
//! convention with y pointing up, `y = cx - r sin θ`; needle angles are
//! already offset by -90° and use screen convention, `y = cy + r sin θ`.

use embedded_graphics::prelude::{Point, Size};
use num_traits::ToPrimitive;

use crate::time::TimeSample;

pub const FULL_ANGLE: i32 = 360;
pub const RIGHT_ANGLE: i32 = 90;
pub const DEGREE_STEP: usize = 6;
pub const HOUR_STEP: usize = 30;

pub const CUSTOM_ALPHA: u8 = 140;
pub const FULL_ALPHA: u8 = crate::draw::FULL_ALPHA;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Padding {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl Padding {
    pub fn uniform(value: u32) -> Self {
        Self {
            left: value,
            top: value,
            right: value,
            bottom: value,
        }
    }

    pub fn horizontal(&self) -> u32 {
        self.left.saturating_add(self.right)
    }

    pub fn vertical(&self) -> u32 {
        self.top.saturating_add(self.bottom)
    }
}

/// Space offered by the host during a layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Constraints {
    pub available: Size,
    pub padding: Padding,
}

impl Constraints {
    pub fn new(available: Size, padding: Padding) -> Self {
        Self { available, padding }
    }
}

/// Squares the drawable region: the content side is the smaller of the two
/// padded dimensions, then padding is added back on each axis.
pub fn measure(constraints: Constraints) -> Size {
    let padding = constraints.padding;
    let width = constraints.available.width.saturating_sub(padding.horizontal());
    let height = constraints.available.height.saturating_sub(padding.vertical());
    let size = width.min(height);

    Size::new(
        size.saturating_add(padding.horizontal()),
        size.saturating_add(padding.vertical()),
    )
}

/// Per-paint geometry, always square.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Geometry {
    pub width: i32,
    pub center_x: i32,
    pub center_y: i32,
    pub radius: i32,
}

impl Geometry {
    pub fn from_size(size: Size) -> Self {
        let width = size.width.min(size.height).to_i32().unwrap_or(i32::MAX);
        let half_width = width / 2;

        Self {
            width,
            center_x: half_width,
            center_y: half_width,
            radius: half_width,
        }
    }

    /// `width * ratio`, truncated.
    pub fn scaled(&self, ratio: f64) -> i32 {
        truncate(self.width as f64 * ratio)
    }

    /// Stroke width for a ratio of the face width, at least one pixel.
    pub fn stroke(&self, ratio: f64) -> u32 {
        self.scaled(ratio).max(1) as u32
    }

    /// Point on the face at `degrees` counter-clockwise from east.
    pub fn face_point(&self, radius: i32, degrees: f64) -> Point {
        let theta = degrees.to_radians();
        let c = self.center_x as f64;

        Point::new(
            truncate(c + radius as f64 * theta.cos()),
            truncate(c - radius as f64 * theta.sin()),
        )
    }

    /// End point of a needle of `length` at a screen angle (clockwise, 0° east).
    pub fn needle_end(&self, degrees: i32, length: u32) -> Point {
        let theta = (degrees as f64).to_radians();
        let length = length as f64;

        Point::new(
            self.center_x + truncate(theta.cos() * length),
            self.center_y + truncate(theta.sin() * length),
        )
    }

    /// Hour needle end. Unlike [`needle_end`](Self::needle_end) this truncates
    /// the absolute coordinate rather than the offset, so a negative
    /// fractional offset lands one pixel further left or up.
    pub fn hour_needle_end(&self, degrees: i32, length: u32) -> Point {
        let theta = (degrees as f64).to_radians();
        let length = length as f64;

        Point::new(
            truncate(self.center_x as f64 + theta.cos() * length),
            truncate(self.center_y as f64 + theta.sin() * length),
        )
    }

    pub fn center(&self) -> Point {
        Point::new(self.center_x, self.center_y)
    }
}

fn truncate(value: f64) -> i32 {
    value.trunc().to_i32().unwrap_or(0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DegreeTick {
    pub angle: i32,
    pub start: Point,
    pub end: Point,
    pub alpha: u8,
}

/// Hour positions and the five-second marks are opaque, the rest faded.
pub fn tick_alpha(angle: i32) -> u8 {
    if angle % RIGHT_ANGLE != 0 && angle % 15 != 0 {
        CUSTOM_ALPHA
    } else {
        FULL_ALPHA
    }
}

/// The 60 radial tick segments around the rim.
pub fn degree_ticks(geometry: &Geometry) -> impl Iterator<Item = DegreeTick> + '_ {
    let r_padded = geometry.center_x - geometry.scaled(0.01);
    let r_end = geometry.center_x - geometry.scaled(0.05);

    (0..FULL_ANGLE).step_by(DEGREE_STEP).map(move |angle| DegreeTick {
        angle,
        start: geometry.face_point(r_padded, angle as f64),
        end: geometry.face_point(r_end, angle as f64),
        alpha: tick_alpha(angle),
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HourValue {
    pub label: i32,
    pub start: Point,
    pub end: Point,
}

impl HourValue {
    pub fn midpoint(&self) -> Point {
        Point::new((self.start.x + self.end.x) / 2, (self.start.y + self.end.y) / 2)
    }
}

/// The twelve numerals, running clockwise with 12 at the top.
pub fn hour_values(geometry: &Geometry) -> impl Iterator<Item = HourValue> + '_ {
    let r_padded = geometry.center_x - geometry.scaled(0.15);
    let r_end = geometry.center_x - geometry.scaled(0.05);

    (0..FULL_ANGLE).step_by(HOUR_STEP).map(move |angle| {
        // Quarter-turn so that 0° lands on 12 o'clock.
        let degrees = (angle + RIGHT_ANGLE) as f64;

        HourValue {
            label: (FULL_ANGLE - angle) / HOUR_STEP as i32,
            start: geometry.face_point(r_padded, degrees),
            end: geometry.face_point(r_end, degrees),
        }
    })
}

/// Hour needle angle. The minute contribution is integer-divided, so the
/// needle only advances one degree every two minutes.
pub fn hour_needle_angle(hour: u32, minute: u32) -> i32 {
    hour as i32 * 30 - RIGHT_ANGLE + (minute as i32 * 6) / 12
}

pub fn minute_needle_angle(minute: u32) -> i32 {
    minute as i32 * 6 - RIGHT_ANGLE
}

pub fn second_needle_angle(second: u32) -> i32 {
    second as i32 * 6 - RIGHT_ANGLE
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NeedleAngles {
    pub hour: i32,
    pub minute: i32,
    pub second: i32,
}

impl From<&TimeSample> for NeedleAngles {
    fn from(sample: &TimeSample) -> Self {
        Self {
            hour: hour_needle_angle(sample.hour, sample.minute),
            minute: minute_needle_angle(sample.minute),
            second: second_needle_angle(sample.second),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn measure_is_square_for_any_offer() {
        let padding = Padding {
            left: 3,
            top: 7,
            right: 5,
            bottom: 1,
        };

        for (w, h) in [(400, 300), (300, 400), (500, 500), (8, 100), (0, 50)] {
            let size = measure(Constraints::new(Size::new(w, h), padding));
            let side = w
                .saturating_sub(padding.horizontal())
                .min(h.saturating_sub(padding.vertical()));

            assert_eq!(size.width - padding.horizontal(), side);
            assert_eq!(size.height - padding.vertical(), side);
        }
    }

    #[test]
    fn geometry_uses_shorter_side() {
        let geometry = Geometry::from_size(Size::new(401, 600));
        assert_eq!(geometry.width, 401);
        assert_eq!(geometry.center_x, 200);
        assert_eq!(geometry.center_y, 200);
        assert_eq!(geometry.radius, 200);
    }

    #[test]
    fn needle_angles() {
        assert_eq!(hour_needle_angle(3, 0), 0);
        assert_eq!(minute_needle_angle(15), 0);
        assert_eq!(minute_needle_angle(45), 180);
        assert_eq!(second_needle_angle(0), -90);
        // 7 * 6 / 12 truncates to 3
        assert_eq!(hour_needle_angle(3, 7), 3);
    }

    #[test]
    fn needle_end_points() {
        let geometry = Geometry::from_size(Size::new(800, 800));
        assert_eq!(geometry.needle_end(0, 150), Point::new(550, 400));
        assert_eq!(geometry.needle_end(180, 300), Point::new(100, 400));
        assert_eq!(geometry.needle_end(-90, 200), Point::new(400, 200));
        assert_eq!(geometry.hour_needle_end(0, 150), Point::new(550, 400));
    }

    #[test]
    fn hour_needle_truncates_the_absolute_coordinate() {
        let geometry = Geometry::from_size(Size::new(800, 800));

        // cos 91° * 150 is about -2.62
        assert_eq!(geometry.hour_needle_end(91, 150), Point::new(397, 549));
        assert_eq!(geometry.needle_end(91, 150), Point::new(398, 549));
    }

    #[test]
    fn huge_padding_saturates() {
        let padding = Padding::uniform(u32::MAX);
        assert_eq!(padding.horizontal(), u32::MAX);

        let size = measure(Constraints::new(Size::new(100, 100), padding));
        assert_eq!(size, Size::new(u32::MAX, u32::MAX));
    }

    #[test]
    fn tick_alpha_marks_quarters_and_five_seconds() {
        let full: Vec<i32> = (0..FULL_ANGLE)
            .step_by(DEGREE_STEP)
            .filter(|angle| tick_alpha(*angle) == FULL_ALPHA)
            .collect();

        assert_eq!(full.len(), 12);
        assert!(full.iter().all(|angle| angle % 30 == 0));
        assert_eq!(tick_alpha(6), CUSTOM_ALPHA);
        assert_eq!(tick_alpha(90), FULL_ALPHA);
        assert_eq!(tick_alpha(180), FULL_ALPHA);
    }

    #[test]
    fn sixty_ticks_inside_the_rim() {
        let geometry = Geometry::from_size(Size::new(400, 400));
        let ticks: Vec<_> = degree_ticks(&geometry).collect();

        assert_eq!(ticks.len(), 60);
        assert_eq!(ticks[0].start, Point::new(396, 200));
        assert_eq!(ticks[0].end, Point::new(380, 200));
        // 90° points straight up
        assert_eq!(ticks[15].start, Point::new(200, 4));
    }

    #[test]
    fn numerals_run_clockwise_from_twelve() {
        let geometry = Geometry::from_size(Size::new(400, 400));
        let values: Vec<_> = hour_values(&geometry).collect();

        assert_eq!(values.len(), 12);
        let labels: Vec<i32> = values.iter().map(|v| v.label).collect();
        assert_eq!(labels, vec![12, 11, 10, 9, 8, 7, 6, 5, 4, 3, 2, 1]);

        let twelve = values[0];
        assert_eq!(twelve.start.x, 200);
        assert!(twelve.start.y < 200 && twelve.end.y < twelve.start.y);

        let three = values[9];
        assert!(three.midpoint().x > 200);
        assert!((three.midpoint().y - 200).abs() <= 1);
    }
}
