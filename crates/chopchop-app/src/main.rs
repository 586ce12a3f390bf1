//! chopchop - Bevy client
//!
//! Device input goes through the action router; the pause menu arbitrates
//! between mouse hover and keyboard/gamepad selection.

use std::path::PathBuf;

use bevy::input_focus::InputDispatchPlugin;
use bevy::prelude::*;
use chopchop_input::InputConfig;
use clap::Parser;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod gameplay;
mod input;
mod menu;

#[derive(Parser, Debug)]
#[command(name = "chopchop", about = "chopchop game client")]
struct Args {
    /// Input config file (default: ~/.config/chopchop/input.ron)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Open the pause menu on startup (overrides the config)
    #[arg(long)]
    menu: bool,
}

fn main() {
    let args = Args::parse();

    // Set up file logging
    let log_dir = std::env::var("CHOPCHOP_LOG_DIR").unwrap_or_else(|_| "/tmp".to_string());
    let file_appender = tracing_appender::rolling::never(&log_dir, "chopchop.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            // Debug for our crates, warn for others
            "chopchop_app=debug,chopchop_input=debug,warn".into()
        }))
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("Starting chopchop - logging to {}/chopchop.log", log_dir);

    let config = InputConfig::load_or_default(args.config.as_deref());
    let start_in_menu = args.menu || config.start_in_menu;

    App::new()
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "chopchop".into(),
                        resolution: (1280, 800).into(),
                        ..default()
                    }),
                    ..default()
                })
                // Tracing is already installed above
                .disable::<bevy::log::LogPlugin>(),
        )
        .add_plugins(InputDispatchPlugin)
        .add_plugins(input::InputPlugin { config })
        .add_plugins(menu::MenuPlugin { start_in_menu })
        .add_plugins(gameplay::GameplayPlugin)
        .run();
}
