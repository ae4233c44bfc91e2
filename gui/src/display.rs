use embedded_graphics::{
    pixelcolor::BinaryColor,
    prelude::{Dimensions, DrawTarget, OriginDimensions, PixelColor, Point, PointsIter, Size},
    primitives::Rectangle,
    Pixel,
};

/// In-memory draw target. Used for headless rendering and for inspecting
/// what the clock widget painted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Framebuffer<C> {
    size: Size,
    pixels: Vec<C>,
}

impl<C: PixelColor> Framebuffer<C> {
    /// Creates a framebuffer filled with `background`.
    pub fn new(size: Size, background: C) -> Self {
        let pixel_count = size.width as usize * size.height as usize;

        Framebuffer {
            size,
            pixels: vec![background; pixel_count],
        }
    }

    /// Returns the color at `point`, or `None` outside the buffer.
    pub fn pixel(&self, point: Point) -> Option<C> {
        self.point_to_index(point)
            .and_then(|index| self.pixels.get(index).copied())
    }

    /// Number of pixels currently holding `color`.
    pub fn count(&self, color: C) -> usize {
        self.pixels.iter().filter(|p| **p == color).count()
    }

    /// Iterates over every pixel in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = Pixel<C>> + '_ {
        self.bounding_box()
            .points()
            .zip(self.pixels.iter().copied())
            .map(|(point, color)| Pixel(point, color))
    }

    fn point_to_index(&self, point: Point) -> Option<usize> {
        if let Ok((x, y)) = <(u32, u32)>::try_from(point) {
            if x < self.size.width && y < self.size.height {
                return Some((x + y * self.size.width) as usize);
            }
        }

        None
    }

    /// Compares two frames of the same size.
    ///
    /// Returns `None` when they are identical, otherwise a mask where every
    /// differing pixel is `BinaryColor::On`. Frames of different sizes always
    /// produce a mask covering the smaller of the two.
    pub fn diff(&self, other: &Framebuffer<C>) -> Option<Framebuffer<BinaryColor>> {
        let size = Size::new(
            self.size.width.min(other.size.width),
            self.size.height.min(other.size.height),
        );
        let mut mask = Framebuffer::new(size, BinaryColor::Off);
        let mut changed = self.size != other.size;

        for point in mask.bounding_box().points() {
            if self.pixel(point) != other.pixel(point) {
                if let Some(index) = mask.point_to_index(point) {
                    mask.pixels[index] = BinaryColor::On;
                }
                changed = true;
            }
        }

        changed.then_some(mask)
    }
}

impl<C: PixelColor> DrawTarget for Framebuffer<C> {
    type Color = C;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels.into_iter() {
            if let Some(index) = self.point_to_index(point) {
                self.pixels[index] = color;
            }
        }

        Ok(())
    }
}

impl<C> OriginDimensions for Framebuffer<C> {
    fn size(&self) -> Size {
        self.size
    }
}

/// Enlargement ratio `to / from`, never below one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scale {
    num: i32,
    den: i32,
}

impl Scale {
    pub const ONE: Scale = Scale { num: 1, den: 1 };

    /// Ratio that stretches `from` pixels over `to` pixels.
    pub fn new(to: u32, from: u32) -> Self {
        match (i32::try_from(to), i32::try_from(from)) {
            (Ok(num), Ok(den)) if den > 0 && num > den => Scale { num, den },
            _ => Self::ONE,
        }
    }

    /// Maps an unscaled coordinate, rounding toward negative infinity.
    pub fn apply(&self, value: i32) -> i32 {
        (value * self.num).div_euclid(self.den)
    }

    fn invert(&self, value: i32) -> i32 {
        (value * self.den).div_euclid(self.num)
    }
}

/// Draw target that enlarges everything drawn into it by `scale`, with the
/// unscaled origin placed at `origin` on the wrapped target.
///
/// Each source pixel becomes a block, so bitmap text can be drawn larger
/// than its font.
pub struct Scaled<'a, D> {
    target: &'a mut D,
    origin: Point,
    scale: Scale,
}

impl<'a, D> Scaled<'a, D> {
    pub fn new(target: &'a mut D, origin: Point, scale: Scale) -> Self {
        Self {
            target,
            origin,
            scale,
        }
    }
}

impl<D: DrawTarget> DrawTarget for Scaled<'_, D> {
    type Color = D::Color;
    type Error = D::Error;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels.into_iter() {
            let x = self.scale.apply(point.x);
            let y = self.scale.apply(point.y);
            let size = Size::new(
                (self.scale.apply(point.x + 1) - x) as u32,
                (self.scale.apply(point.y + 1) - y) as u32,
            );

            self.target
                .fill_solid(&Rectangle::new(self.origin + Point::new(x, y), size), color)?;
        }

        Ok(())
    }
}

impl<D: DrawTarget> Dimensions for Scaled<'_, D> {
    fn bounding_box(&self) -> Rectangle {
        let area = self.target.bounding_box();
        let top_left = area.top_left - self.origin;

        Rectangle::new(
            Point::new(self.scale.invert(top_left.x), self.scale.invert(top_left.y)),
            Size::new(
                self.scale.invert(area.size.width as i32) as u32 + 2,
                self.scale.invert(area.size.height as i32) as u32 + 2,
            ),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::pixelcolor::{Rgb888, RgbColor};

    #[test]
    fn out_of_bounds_pixels_are_ignored() {
        let mut fb = Framebuffer::new(Size::new(4, 4), Rgb888::BLACK);
        fb.draw_iter([
            Pixel(Point::new(1, 1), Rgb888::RED),
            Pixel(Point::new(-1, 0), Rgb888::RED),
            Pixel(Point::new(4, 0), Rgb888::RED),
        ])
        .unwrap();

        assert_eq!(fb.count(Rgb888::RED), 1);
        assert_eq!(fb.pixel(Point::new(1, 1)), Some(Rgb888::RED));
        assert_eq!(fb.pixel(Point::new(4, 4)), None);
    }

    #[test]
    fn diff_reports_changed_pixels() {
        let a = Framebuffer::new(Size::new(3, 3), Rgb888::BLACK);
        let mut b = a.clone();
        assert!(a.diff(&b).is_none());

        b.draw_iter([Pixel(Point::new(2, 0), Rgb888::WHITE)]).unwrap();
        let mask = a.diff(&b).unwrap();
        assert_eq!(mask.count(BinaryColor::On), 1);
        assert_eq!(mask.pixel(Point::new(2, 0)), Some(BinaryColor::On));
    }

    #[test]
    fn scale_never_shrinks() {
        assert_eq!(Scale::new(40, 64), Scale::ONE);
        assert_eq!(Scale::new(64, 0), Scale::ONE);
        assert_eq!(Scale::new(80, 64).apply(64), 80);
        assert_eq!(Scale::new(80, 64).apply(-1), -2);
    }

    #[test]
    fn scaled_pixels_become_blocks() {
        let mut fb = Framebuffer::new(Size::new(20, 20), Rgb888::BLACK);
        Scaled::new(&mut fb, Point::new(10, 10), Scale::new(2, 1))
            .draw_iter([
                Pixel(Point::new(1, 0), Rgb888::RED),
                Pixel(Point::new(-1, -1), Rgb888::GREEN),
            ])
            .unwrap();

        assert_eq!(fb.count(Rgb888::RED), 4);
        assert_eq!(fb.pixel(Point::new(12, 10)), Some(Rgb888::RED));
        assert_eq!(fb.pixel(Point::new(13, 11)), Some(Rgb888::RED));
        assert_eq!(fb.count(Rgb888::GREEN), 4);
        assert_eq!(fb.pixel(Point::new(8, 8)), Some(Rgb888::GREEN));
    }
}
