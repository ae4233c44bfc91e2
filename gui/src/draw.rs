use embedded_graphics::{
    pixelcolor::{Rgb888, RgbColor},
    prelude::{DrawTarget, Point, Primitive},
    primitives::{Line, PrimitiveStyleBuilder},
    Drawable,
};
use std::fmt::Debug;
use thiserror::Error;

pub const FULL_ALPHA: u8 = 255;

pub fn clear<Display>(display: &mut Display, color: Rgb888) -> Result<(), DrawError>
where
    Display: DrawTarget<Color = Rgb888>,
    Display::Error: Debug,
{
    display
        .clear(color)
        .map_err(|err| DrawError::DrawFailed(format!("Failed to clear display: {:?}", err)))
}

/// Mixes `color` over `background` as if `color` had the given alpha.
pub fn blend(color: Rgb888, background: Rgb888, alpha: u8) -> Rgb888 {
    let mix = |fg: u8, bg: u8| -> u8 {
        let a = alpha as u16;
        ((fg as u16 * a + bg as u16 * (255 - a) + 127) / 255) as u8
    };

    Rgb888::new(
        mix(color.r(), background.r()),
        mix(color.g(), background.g()),
        mix(color.b(), background.b()),
    )
}

pub fn draw_line<Display>(
    display: &mut Display,
    start: Point,
    end: Point,
    stroke_width: u32,
    color: Rgb888,
) -> Result<(), DrawError>
where
    Display: DrawTarget<Color = Rgb888>,
    Display::Error: Debug,
{
    let style = PrimitiveStyleBuilder::new()
        .stroke_color(color)
        .stroke_width(stroke_width.max(1))
        .build();

    Line::new(start, end)
        .into_styled(style)
        .draw(display)
        .map_err(|err| DrawError::DrawFailed(format!("{:?}", err)))?;

    Ok(())
}

#[derive(Debug, Error)]
pub enum DrawError {
    #[error("Draw failed: {0}")]
    DrawFailed(String),
    #[error("No font fits within {0}px")]
    FontNotFound(u32),
}
