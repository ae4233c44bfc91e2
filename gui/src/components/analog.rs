use embedded_graphics::{pixelcolor::Rgb888, prelude::DrawTarget};
use std::fmt::Debug;
use u8g2_fonts::types::{HorizontalAlignment, VerticalPosition};

use crate::{
    circle::Circle,
    draw::{blend, draw_line, DrawError},
    font,
    geometry::{degree_ticks, hour_values, Geometry, NeedleAngles},
    text::Text,
    time::TimeSample,
    widget::{ClockStyle, Palette},
};

/// Rim ticks, one per second of the minute.
pub fn draw_degrees<Display>(
    display: &mut Display,
    geometry: &Geometry,
    style: &ClockStyle,
    palette: &Palette,
) -> Result<(), DrawError>
where
    Display: DrawTarget<Color = Rgb888>,
    Display::Error: Debug,
{
    let stroke = geometry.stroke(style.degree_stroke);

    for tick in degree_ticks(geometry) {
        let color = blend(palette.degrees, palette.background, tick.alpha);
        draw_line(display, tick.start, tick.end, stroke, color)?;
    }

    Ok(())
}

/// Numerals 1 to 12, drawn upright at the middle of each radial slot.
pub fn draw_hour_values<Display>(
    display: &mut Display,
    geometry: &Geometry,
    style: &ClockStyle,
    palette: &Palette,
) -> Result<(), DrawError>
where
    Display: DrawTarget<Color = Rgb888>,
    Display::Error: Debug,
{
    let font = font::font_for_height(style.hour_value_font_size)?;

    for value in hour_values(geometry) {
        let anchor = value.midpoint();

        Text::new(&value.label.to_string(), &font)
            .x(anchor.x)
            .y(anchor.y)
            .vertical_pos(VerticalPosition::Center)
            .horizontal_align(HorizontalAlignment::Center)
            .draw(display, palette.hour_values)?;
    }

    Ok(())
}

pub fn draw_needles<Display>(
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
    let angles = NeedleAngles::from(time);
    let center = geometry.center();
    let thick = geometry.stroke(style.hour_minute_needle_stroke);
    let thin = geometry.stroke(style.second_needle_stroke);

    // Hour
    draw_line(
        display,
        center,
        geometry.hour_needle_end(angles.hour, style.hour_needle_length),
        thick,
        palette.hours_needle,
    )?;

    // Minute
    draw_line(
        display,
        center,
        geometry.needle_end(angles.minute, style.minute_needle_length),
        thick,
        palette.minutes_needle,
    )?;

    // Second
    draw_line(
        display,
        center,
        geometry.needle_end(angles.second, style.second_needle_length),
        thin,
        palette.seconds_needle,
    )?;

    Ok(())
}

pub fn draw_center<Display>(
    display: &mut Display,
    geometry: &Geometry,
    style: &ClockStyle,
    palette: &Palette,
) -> Result<(), DrawError>
where
    Display: DrawTarget<Color = Rgb888>,
    Display::Error: Debug,
{
    Circle::new(geometry.center_x, geometry.center_y, style.center_dot_radius)
        .draw(display, palette.hours_needle)
}

/// Full analog face, back to front.
pub fn draw_analog<Display>(
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
    draw_degrees(display, geometry, style, palette)?;
    draw_hour_values(display, geometry, style, palette)?;
    draw_needles(display, geometry, style, palette, time)?;
    draw_center(display, geometry, style, palette)?;

    Ok(())
}
