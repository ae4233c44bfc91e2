use embedded_graphics::{pixelcolor::Rgb888, prelude::Size};
use embedded_graphics_simulator::{OutputSettings, OutputSettingsBuilder, SimulatorDisplay};

pub fn create_display(size: u32) -> SimulatorDisplay<Rgb888> {
    SimulatorDisplay::new(Size::new(size, size))
}

pub fn output_settings(scale: u32) -> OutputSettings {
    OutputSettingsBuilder::new()
        .scale(scale.max(1))
        .pixel_spacing(0)
        .build()
}
