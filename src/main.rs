// src/main.rs

use bevy::{
    app::ScheduleRunnerPlugin,
    log::LogPlugin,
    prelude::*,
};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

mod cli;
mod config;
mod hud;
mod settings;

use cli::{Cli, Commands};
use config::HudConfig;
use hud::{FovSource, HudPlugin, SimulatedFov};
use settings::SettingsPlugin;

fn main() {
    let cli = Cli::parse();

    let config_path = match cli.config.clone() {
        Some(path) => Ok(path),
        None => config::default_config_path(),
    };
    let hud_config = match config_path.and_then(|path| config::load_config(&path)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config: {}. Using defaults.", e);
            HudConfig::default()
        }
    };

    let db_path = match cli.db.clone().map(Ok).unwrap_or_else(|| hud_config.resolve_db_path()) {
        Ok(path) => path,
        Err(e) => {
            eprintln!("Cannot locate settings database: {}", e);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Some(Commands::Show { json }) => cli::show::run(&db_path, json),
        Some(Commands::Set { ref name, ref value }) => cli::set::run(&db_path, name, value),
        Some(Commands::Reset) => cli::reset::run(&db_path),
        None => {
            if run_hud(&cli, &hud_config, db_path).is_error() {
                std::process::exit(1);
            }
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run_hud(cli: &Cli, hud_config: &HudConfig, db_path: PathBuf) -> AppExit {
    let mut app = App::new();
    app.add_plugins(
        MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(Duration::from_millis(
            hud_config.poll_interval_ms.max(1),
        ))),
    )
    .add_plugins(LogPlugin {
        level: hud_config.level(),
        filter: hud_config.log_filter.clone(),
        ..default()
    });

    // The native plugin registers its own FovSource; without it the HUD runs detached.
    if cli.simulate {
        app.insert_resource(FovSource::new(SimulatedFov::default()));
    }

    app.add_plugins(SettingsPlugin::file(db_path))
        .add_plugins(HudPlugin);

    if let Some(frames) = cli.frames {
        app.insert_resource(FrameLimit(frames))
            .add_systems(Update, exit_after_frame_limit_system);
    }

    app.run()
}

#[derive(Resource)]
struct FrameLimit(u32);

fn exit_after_frame_limit_system(
    limit: Res<FrameLimit>,
    mut frames: Local<u32>,
    mut app_exit_writer: EventWriter<AppExit>,
) {
    *frames += 1;
    if *frames == limit.0 {
        info!("Frame limit of {} reached, exiting.", limit.0);
        app_exit_writer.write(AppExit::Success);
    }
}
