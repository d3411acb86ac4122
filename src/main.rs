mod app;
mod command;
mod config;
mod consts;
mod difficulty;
mod fx;
mod game;
mod highscores;
mod menu;
mod options;
mod util;
mod warning;
use crate::app::App;
use crate::config::Config;
use crate::highscores::HighScores;
use crate::util::Globals;
use crate::warning::Warning;
use lexopt::{Arg, Parser};
use std::io::ErrorKind;
use std::path::PathBuf;
use std::process::ExitCode;

static USAGE: &str = concat!(
    "Usage: ",
    env!("CARGO_PKG_NAME"),
    " [-c PATH|--config PATH]\n",
    "\n",
    "Terminal snake with a wrap-around playfield\n",
    "\n",
    "Options:\n",
    "  -c PATH, --config PATH    Read configuration from PATH\n",
    "  -h, --help                Show this message and exit\n",
    "  -V, --version             Show the program version and exit\n",
);

fn main() -> ExitCode {
    match try_main() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{name}: {e:#}", name = env!("CARGO_PKG_NAME"));
            ExitCode::from(2)
        }
    }
}

fn try_main() -> anyhow::Result<ExitCode> {
    match Args::parse()? {
        Args::Help => {
            print!("{USAGE}");
            Ok(ExitCode::SUCCESS)
        }
        Args::Version => {
            println!(
                "{name} {version}",
                name = env!("CARGO_PKG_NAME"),
                version = env!("CARGO_PKG_VERSION"),
            );
            Ok(ExitCode::SUCCESS)
        }
        Args::Run { config_path } => run(config_path),
    }
}

/// Load configuration and high scores, degrading any problem to an
/// in-app warning, then hand the terminal to [`App`].
fn run(config_path: Option<PathBuf>) -> anyhow::Result<ExitCode> {
    let mut warnings = Vec::new();
    // An explicitly-given configuration path must exist; the default one
    // need not.
    let r = match &config_path {
        Some(path) => Config::load(path, false),
        None => Config::default_path().and_then(|p| Config::load(&p, true)),
    };
    let config = r.unwrap_or_else(|e| {
        warnings.push(Warning::from(e));
        Config::default()
    });
    let scores = config.load_scores().unwrap_or_else(|e| {
        warnings.push(Warning::from(e));
        HighScores::default()
    });
    let globals = Globals {
        options: config.options,
        config,
        scores,
    };
    let terminal = ratatui::init();
    let r = App::new(globals, warnings).run(terminal);
    ratatui::restore();
    match r {
        Ok(()) => Ok(ExitCode::SUCCESS),
        // e.g. the terminal went away mid-session
        Err(e) if e.kind() == ErrorKind::BrokenPipe => Ok(ExitCode::SUCCESS),
        Err(e) => Err(e.into()),
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
enum Args {
    Run { config_path: Option<PathBuf> },
    Help,
    Version,
}

impl Args {
    fn parse() -> Result<Args, lexopt::Error> {
        let mut config_path = None;
        let mut parser = Parser::from_env();
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('c') | Arg::Long("config") => {
                    config_path = Some(PathBuf::from(parser.value()?));
                }
                Arg::Short('h') | Arg::Long("help") => return Ok(Args::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Args::Version),
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Args::Run { config_path })
    }
}
