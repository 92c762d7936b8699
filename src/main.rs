mod angle;
mod canvas;
mod config;
mod controller;
mod error;
mod quiz;
mod renderer;
mod scheduler;
mod theme;
mod viewer;

use std::path::PathBuf;

use config::Config;
use quiz::QuizEngine;
use theme::Palette;
use viewer::App;

fn init_logger(default_filters: &str) {
    let mut builder = pretty_env_logger::formatted_builder();
    match std::env::var("RUST_LOG") {
        Ok(filters) => builder.parse_filters(&filters),
        Err(_) => builder.parse_filters(default_filters),
    };
    builder.init();
}

fn load_quiz(config: &Config) -> QuizEngine {
    let path = match &config.quiz.questions {
        Some(path) => path,
        None => return QuizEngine::builtin(),
    };

    match quiz::questions::load(path).and_then(QuizEngine::new) {
        Ok(quiz) => {
            log::info!("Loaded {} questions from {}", quiz.question_count(), path.display());
            quiz
        }
        Err(error) => {
            log::warn!("{}", error);
            log::warn!("Using built-in questions");
            QuizEngine::builtin()
        }
    }
}

fn main() {
    let config_path = std::env::args_os().nth(1).map(PathBuf::from);
    let loaded = Config::load(config_path.as_deref());

    let log_level = match &loaded {
        Ok(config) => config.system.log_level.clone(),
        Err(_) => Config::default().system.log_level,
    };
    init_logger(&log_level);

    let config = loaded.unwrap_or_else(|error| {
        log::warn!("{}", error);
        log::warn!("Using default configuration");
        Config::default()
    });

    let palette = Palette::from_config(&config.theme).unwrap_or_else(|error| {
        log::warn!("{}, using the {:?} palette as is", error, config.theme.variant);
        Palette::from_variant(config.theme.variant)
    });

    log::info!("Starting radian trainer...");

    let mut app = App::new(&config, palette, load_quiz(&config));
    app.run();
}
