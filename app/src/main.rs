use std::process::ExitCode;

use app::{default_mode, App, Mode};
use cli::Args;
use settings::AppSettings;

pub mod app;
pub mod cli;
pub mod clock;
pub mod display;
pub mod settings;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = match Args::parse(std::env::args_os().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            log::error!("{:#}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut settings = match AppSettings::load(args.config.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            log::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    if args.digital {
        settings.show_analog = false;
    }

    let mode = match (args.snapshot, args.ticks) {
        (Some(path), _) => Mode::Snapshot(path),
        (None, Some(ticks)) => Mode::Headless { ticks: Some(ticks) },
        (None, None) => default_mode(),
    };

    let mut app = App::new(mode, settings);
    if app.run() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
