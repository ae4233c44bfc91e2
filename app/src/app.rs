use std::{
    path::{Path, PathBuf},
    thread,
    time::{Duration, Instant},
};

use embedded_graphics::{pixelcolor::Rgb888, prelude::Size};
use embedded_graphics_simulator::SimulatorDisplay;
use gui::{
    ClockPage, ClockStyle, ClockWidget, Constraints, Padding, Palette, Scheduler, TimeSource,
};

use crate::{
    clock::ZonedClock,
    display::{create_display, output_settings},
    settings::AppSettings,
};

// Upper bound on one idle wait so the loop stays responsive.
const MAX_IDLE: Duration = Duration::from_millis(50);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Render one frame to a PNG and exit.
    Snapshot(PathBuf),
    /// Repaint into an off-screen display, optionally for a fixed count.
    Headless { ticks: Option<u32> },
    /// Live window; a click toggles the face.
    Window,
}

cfg_if::cfg_if! {
    if #[cfg(feature = "window")] {
        pub fn default_mode() -> Mode {
            Mode::Window
        }
    } else {
        pub fn default_mode() -> Mode {
            Mode::Headless { ticks: None }
        }
    }
}

pub struct App {
    mode: Mode,
    settings: AppSettings,
    clock: ZonedClock,
    scheduler: Scheduler,
    page: ClockPage,
    display: SimulatorDisplay<Rgb888>,
}

impl App {
    pub fn new(mode: Mode, settings: AppSettings) -> Self {
        let clock = ZonedClock::new(settings.timezone);

        let mut widget = ClockWidget::new(Box::new(clock))
            .style(ClockStyle::from(&settings.style))
            .palette(Palette::from(&settings.palette));
        widget.set_show_analog(settings.show_analog);

        let page = ClockPage::new(widget).refresh_interval(settings.refresh_interval());
        let display = create_display(settings.size);

        Self {
            mode,
            settings,
            clock,
            scheduler: Scheduler::new(),
            page,
            display,
        }
    }

    fn initialize(&mut self) {
        log::info!("initialize: {:?}", self.mode);

        let size = self.page.layout(Constraints::new(
            Size::new(self.settings.size, self.settings.size),
            Padding::uniform(self.settings.padding),
        ));
        log::debug!("Clock laid out at {}x{}", size.width, size.height);

        match self.settings.timezone {
            Some(timezone) => log::info!("Using timezone {}", timezone),
            None => log::info!("Using system local time"),
        }
    }

    fn snapshot(&mut self, path: &Path) -> anyhow::Result<()> {
        self.page.draw(&mut self.display)?;

        self.display
            .to_rgb_output_image(&output_settings(self.settings.scale))
            .save_png(path)?;

        log::info!("Snapshot of {} written to {}", self.clock.sample(), path.display());
        Ok(())
    }

    fn headless(&mut self, ticks: Option<u32>) -> anyhow::Result<()> {
        let start = Instant::now();
        let mut repaints = 0;

        self.page.on_start(&mut self.scheduler);

        while ticks.map_or(true, |ticks| repaints < ticks) {
            self.scheduler.run_due(start.elapsed());

            if self.page.draw_if_invalidated(&mut self.display)? {
                repaints += 1;
                log::info!("Repaint {} at {}", repaints, self.clock.sample());
            }

            let Some(deadline) = self.scheduler.next_deadline() else {
                break;
            };
            thread::sleep(deadline.saturating_sub(start.elapsed()).min(MAX_IDLE));
        }

        self.page.on_destroy();
        Ok(())
    }

    #[cfg(feature = "window")]
    fn window(&mut self) -> anyhow::Result<()> {
        use embedded_graphics_simulator::{SimulatorEvent, Window};

        let mut window = Window::new("Clock", &output_settings(self.settings.scale));
        let start = Instant::now();

        self.page.on_start(&mut self.scheduler);

        'running: loop {
            self.scheduler.run_due(start.elapsed());
            self.page.draw_if_invalidated(&mut self.display)?;

            window.update(&self.display);

            for event in window.events() {
                match event {
                    SimulatorEvent::Quit => break 'running,
                    SimulatorEvent::MouseButtonUp { .. } => self.page.on_tap(),
                    _ => {}
                }
            }

            thread::sleep(MAX_IDLE);
        }

        self.page.on_destroy();
        Ok(())
    }

    #[cfg(not(feature = "window"))]
    fn window(&mut self) -> anyhow::Result<()> {
        anyhow::bail!("clock-app was built without the `window` feature")
    }

    fn run_internal(&mut self) -> anyhow::Result<()> {
        self.initialize();

        match self.mode.clone() {
            Mode::Snapshot(path) => self.snapshot(&path)?,
            Mode::Headless { ticks } => self.headless(ticks)?,
            Mode::Window => self.window()?,
        };

        Ok(())
    }

    /// Runs until the chosen mode finishes. Returns false on failure.
    pub fn run(&mut self) -> bool {
        if let Err(e) = self.run_internal() {
            self.handle_error(e);
            return false;
        }

        true
    }

    fn handle_error(&mut self, e: anyhow::Error) {
        log::error!("Unexpected error: {:?}", e);
        self.page.on_destroy();
    }
}
