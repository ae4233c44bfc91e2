use embedded_graphics::{
    pixelcolor::Rgb888,
    prelude::{DrawTarget, Point},
    primitives::Rectangle,
};
use std::fmt::Debug;
use u8g2_fonts::{
    types::{FontColor, HorizontalAlignment, VerticalPosition},
    FontRenderer,
};

use crate::draw::DrawError;

pub struct Text {
    text: String,
    font: FontRenderer,
    x: i32,
    y: i32,
    vertical_pos: VerticalPosition,
    horizontal_align: HorizontalAlignment,
}

impl Text {
    pub fn new(text: &str, font: &FontRenderer) -> Self {
        Self {
            text: text.to_string(),
            font: font.clone(),
            x: 0,
            y: 0,
            vertical_pos: VerticalPosition::Top,
            horizontal_align: HorizontalAlignment::Left,
        }
    }

    pub fn x(mut self, x: i32) -> Self {
        self.x = x;
        self
    }

    pub fn y(mut self, y: i32) -> Self {
        self.y = y;
        self
    }

    pub fn vertical_pos(mut self, vertical_pos: VerticalPosition) -> Self {
        self.vertical_pos = vertical_pos;
        self
    }

    pub fn horizontal_align(mut self, horizontal_align: HorizontalAlignment) -> Self {
        self.horizontal_align = horizontal_align;
        self
    }

    pub fn bounding_box(&self) -> Result<Rectangle, DrawError> {
        let position = Point::new(self.x, self.y);

        self.font
            .get_rendered_dimensions_aligned(
                self.text.as_str(),
                position,
                self.vertical_pos,
                self.horizontal_align,
            )
            .map_err(|err| DrawError::DrawFailed(format!("{:?}", err)))?
            .ok_or(DrawError::DrawFailed(format!(
                "Failed to get bounding box of {:?}",
                self.text
            )))
    }

    pub fn draw<Display>(&self, display: &mut Display, color: Rgb888) -> Result<Rectangle, DrawError>
    where
        Display: DrawTarget<Color = Rgb888>,
        Display::Error: Debug,
    {
        let bounding_box = self.bounding_box()?;

        self.font
            .render_aligned(
                self.text.as_str(),
                Point::new(self.x, self.y),
                self.vertical_pos,
                self.horizontal_align,
                FontColor::Transparent(color),
                display,
            )
            .map_err(|err| DrawError::DrawFailed(format!("{:?}", err)))?;

        Ok(bounding_box)
    }
}
