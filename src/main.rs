#![deny(warnings)]

use clap::Parser;
use color_eyre::eyre::Result;
use tracing::warn;

use kwexpand::{
    app::App,
    core::trigger::EventKind,
    infrastructure::{cli::Cli, config::Config, tui::Tui},
    utils::{initialize_logging, initialize_panic_handler},
};

fn run() -> Result<()> {
    let args = <Cli as Parser>::parse();

    let config = Config::load(args.config.as_deref())?;
    let mut options = config.expander;
    if args.debug {
        options.debug = Some(true);
    }

    initialize_logging(options.debug.unwrap_or(false))?;

    initialize_panic_handler()?;

    let key_up = options.event.unwrap_or_default() == EventKind::KeyUp;
    let mut tui = Tui::new()?;
    tui.enter(key_up)?;
    if key_up && !tui.reports_releases() {
        warn!("terminal does not report key releases, expanding on keydown");
        options.event = Some(EventKind::KeyDown);
    }

    let text = args.text.as_deref().unwrap_or_default();
    let result = App::new(options, text).and_then(|mut app| app.run(&mut tui));
    tui.exit()?;
    result
}

fn main() -> Result<()> {
    if let Err(e) = run() {
        eprintln!("{} error: Something went wrong", env!("CARGO_PKG_NAME"));
        Err(e)
    } else {
        Ok(())
    }
}
