use embedded_graphics::{pixelcolor::Rgb888, prelude::*};
use embedded_graphics_simulator::{OutputSettingsBuilder, SimulatorDisplay};
use gui::{ClockPage, ClockWidget, Constraints, FixedClock, Padding};

const SIZE: u32 = 720;

fn main() -> anyhow::Result<()> {
    let mut display: SimulatorDisplay<Rgb888> = SimulatorDisplay::new(Size::new(SIZE, SIZE));

    let output_settings = OutputSettingsBuilder::new()
        .scale(1)
        .pixel_spacing(0)
        .build();

    let clock = FixedClock::hms(10, 9, 30).ok_or(anyhow::anyhow!("invalid time"))?;
    let mut page = ClockPage::new(ClockWidget::new(Box::new(clock)));
    page.layout(Constraints::new(Size::new(SIZE, SIZE), Padding::default()));

    let prefix = std::env::args().nth(1).unwrap_or("clock".into());

    page.draw(&mut display)?;
    display
        .to_rgb_output_image(&output_settings)
        .save_png(format!("{prefix}-analog.png"))?;

    page.on_tap();
    page.draw(&mut display)?;
    display
        .to_rgb_output_image(&output_settings)
        .save_png(format!("{prefix}-digital.png"))?;

    Ok(())
}
