use embedded_graphics::{
    pixelcolor::Rgb888,
    prelude::{DrawTarget, Point, Primitive},
    primitives::PrimitiveStyleBuilder,
    Drawable,
};
use std::fmt::Debug;

use crate::draw::DrawError;

/// Filled circle positioned by its center.
pub struct Circle {
    pub x: i32,
    pub y: i32,
    pub radius: u32,
}

impl Circle {
    pub fn new(x: i32, y: i32, radius: u32) -> Self {
        Self { x, y, radius }
    }

    pub fn draw<Display>(&self, display: &mut Display, color: Rgb888) -> Result<(), DrawError>
    where
        Display: DrawTarget<Color = Rgb888>,
        Display::Error: Debug,
    {
        let style = PrimitiveStyleBuilder::new().fill_color(color).build();

        embedded_graphics::primitives::Circle::with_center(
            Point::new(self.x, self.y),
            self.radius * 2 + 1,
        )
        .into_styled(style)
        .draw(display)
        .map_err(|err| DrawError::DrawFailed(format!("{:?}", err)))?;

        Ok(())
    }
}
