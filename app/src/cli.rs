use std::{ffi::OsString, path::PathBuf};

use anyhow::{anyhow, Context};

pub const USAGE: &str =
    "usage: clock-app [--config <path>] [--snapshot <png>] [--digital] [--ticks <n>]";

#[derive(Debug, Default, PartialEq, Eq)]
pub struct Args {
    pub config: Option<PathBuf>,
    /// Render one frame to this PNG and exit.
    pub snapshot: Option<PathBuf>,
    /// Start on the digital face.
    pub digital: bool,
    /// Stop after this many repaints.
    pub ticks: Option<u32>,
}

impl Args {
    pub fn parse<I>(args: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = OsString>,
    {
        let mut parsed = Args::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            let arg = arg
                .into_string()
                .map_err(|arg| anyhow!("Invalid argument {:?}", arg))?;

            match arg.as_str() {
                "--config" => parsed.config = Some(value(&mut args, &arg)?.into()),
                "--snapshot" => parsed.snapshot = Some(value(&mut args, &arg)?.into()),
                "--digital" => parsed.digital = true,
                "--ticks" => {
                    let ticks = value(&mut args, &arg)?;
                    parsed.ticks = Some(
                        ticks
                            .to_str()
                            .and_then(|ticks| ticks.parse().ok())
                            .with_context(|| format!("--ticks expects a number, got {:?}", ticks))?,
                    );
                }
                _ => return Err(anyhow!("Unknown argument {:?}\n{}", arg, USAGE)),
            }
        }

        Ok(parsed)
    }
}

fn value<I>(args: &mut I, flag: &str) -> anyhow::Result<OsString>
where
    I: Iterator<Item = OsString>,
{
    args.next()
        .ok_or_else(|| anyhow!("{} expects a value\n{}", flag, USAGE))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> anyhow::Result<Args> {
        Args::parse(args.iter().map(OsString::from))
    }

    #[test]
    fn no_arguments() {
        assert_eq!(parse(&[]).unwrap(), Args::default());
    }

    #[test]
    fn all_arguments() {
        let args = parse(&[
            "--config",
            "a.toml",
            "--snapshot",
            "out.png",
            "--digital",
            "--ticks",
            "3",
        ])
        .unwrap();

        assert_eq!(args.config, Some(PathBuf::from("a.toml")));
        assert_eq!(args.snapshot, Some(PathBuf::from("out.png")));
        assert!(args.digital);
        assert_eq!(args.ticks, Some(3));
    }

    #[test]
    fn rejects_bad_input() {
        assert!(parse(&["--ticks", "many"]).is_err());
        assert!(parse(&["--config"]).is_err());
        assert!(parse(&["--verbose"]).is_err());
    }
}
