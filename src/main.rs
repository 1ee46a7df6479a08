//! Flappy entry point
//!
//! Parses settings, loads the sprite manifest and runs the game loop either
//! in the terminal or headless.

use std::io;
use std::process::ExitCode;

use flappy::app::{App, AppError, RunSummary};
use flappy::audio::AudioManager;
use flappy::input::{Autopilot, TerminalInput};
use flappy::renderer::{JsonLinesPresenter, TerminalPresenter};
use flappy::scheduler::FrameScheduler;
use flappy::settings::USAGE;
use flappy::{AssetBundle, Settings, consts::SIM_HZ};

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "--help" || a == "-h") {
        println!("Flappy - fixed-timestep pipe-gate arcade game\n");
        println!("{USAGE}");
        return ExitCode::SUCCESS;
    }

    match run(&args) {
        Ok(summary) => {
            log::info!("Best score {}", summary.best_score);
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::error!("{err}");
            eprintln!("flappy: {err}");
            if matches!(err, AppError::Settings(_)) {
                eprintln!("Run 'flappy --help' for usage.");
            }
            ExitCode::FAILURE
        }
    }
}

fn run(args: &[String]) -> Result<RunSummary, AppError> {
    let settings = Settings::from_args(args)?;
    let assets = match &settings.assets {
        Some(path) => AssetBundle::load(path)?,
        None => AssetBundle::default(),
    };

    let mut audio = AudioManager::new();
    audio.set_muted(settings.muted);
    audio.set_bell(settings.bell);

    let scheduler = FrameScheduler::new(SIM_HZ);

    if settings.headless {
        log::info!("Running headless");
        let presenter = JsonLinesPresenter::new(io::stdout().lock());
        let mut app = App::new(assets, settings, presenter, audio, Autopilot, scheduler);
        return app.run();
    }

    let presenter = TerminalPresenter::new(assets.clone())?;
    let mut app = App::new(assets, settings, presenter, audio, TerminalInput, scheduler);
    app.run()
}
