use embedded_graphics::{
    pixelcolor::Rgb888,
    prelude::{DrawTarget, Point},
};
use std::fmt::Debug;
use u8g2_fonts::types::{HorizontalAlignment, VerticalPosition};

use crate::{
    display::{Scale, Scaled},
    draw::DrawError,
    font,
    geometry::Geometry,
    text::Text,
    time::TimeSample,
    widget::{ClockStyle, Palette},
};

/// `HH:MM:SS` at `digital_text_ratio` of the face width followed by a smaller
/// `AM`/`PM`, sharing one baseline, centered on the face.
///
/// Each run is rendered with the largest font that fits and enlarged to the
/// requested height.
pub fn draw_digital<Display>(
    display: &mut Display,
    geometry: &Geometry,
    style: &ClockStyle,
    palette: &Palette,
    time: &TimeSample,
) -> Result<(), DrawError>
where
    Display: DrawTarget<Color = Rgb888>,
    Display::Error: Debug,
{
    let requested = geometry.scaled(style.digital_text_ratio).max(0) as u32;
    let Some(base_height) = font::fitting_height(requested) else {
        // Too small to show anything legible
        return Ok(());
    };
    let base_scale = Scale::new(requested, base_height);

    let suffix_requested = (requested as f64 * style.meridiem_ratio) as u32;
    let suffix_height = font::fitting_height(suffix_requested).unwrap_or(font::MIN_HEIGHT);
    let suffix_scale = Scale::new(suffix_requested, suffix_height);

    let base_font = font::font_for_height(base_height)?;
    let suffix_font = font::font_for_height(suffix_height)?;

    let digits = Text::new(
        &format!("{:02}:{:02}:{:02}", time.hour, time.minute, time.second),
        &base_font,
    )
    .vertical_pos(VerticalPosition::Baseline)
    .horizontal_align(HorizontalAlignment::Left);
    let meridiem = Text::new(time.am_pm.as_str(), &suffix_font)
        .vertical_pos(VerticalPosition::Baseline)
        .horizontal_align(HorizontalAlignment::Left);

    // Extents relative to the pen position at the baseline, after scaling
    let digits_box = digits.bounding_box()?;
    let meridiem_box = meridiem.bounding_box()?;

    let digits_left = base_scale.apply(digits_box.top_left.x);
    let digits_right = base_scale.apply(digits_box.top_left.x + digits_box.size.width as i32);
    let digits_top = base_scale.apply(digits_box.top_left.y);
    let digits_bottom = base_scale.apply(digits_box.top_left.y + digits_box.size.height as i32);
    let meridiem_right =
        suffix_scale.apply(meridiem_box.top_left.x + meridiem_box.size.width as i32);

    let x = geometry.center_x - (digits_left + digits_right + meridiem_right) / 2;
    let baseline = geometry.center_y - (digits_top + digits_bottom) / 2;

    digits.draw(
        &mut Scaled::new(&mut *display, Point::new(x, baseline), base_scale),
        palette.numbers,
    )?;
    meridiem.draw(
        &mut Scaled::new(&mut *display, Point::new(x + digits_right, baseline), suffix_scale),
        palette.numbers,
    )?;

    Ok(())
}
