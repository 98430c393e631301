pub mod battle;
pub mod encode;
pub mod policy;
pub mod reward;
pub mod save;
pub mod skirmish;

pub use battle::*;
pub use policy::agent::Agent;
pub use policy::session::Session;

/// dimensional analysis types
pub type Value = f64;
pub type Probability = f64;

// learning defaults, overridable at construction
pub const DEFAULT_ALPHA: Value = 0.1;
pub const DEFAULT_GAMMA: Value = 0.995;
pub const DEFAULT_LAMBDA: Value = 0.8;
pub const DEFAULT_EPSILON: Probability = 0.1;

/// eligibility entries below this are dropped to bound trace memory
pub const TRACE_FLOOR: Value = 1e-3;

/// learning rate of the terminal nudge applied to the last switch context
pub const SWITCH_NUDGE_ALPHA: Value = 0.1;

// heuristic table seeding parameters
pub const MASTER_SEED_TEMPERATURE: Value = 10.0;
pub const SUB_SEED_TEMPERATURE: Value = 1.0;
pub const DELEGATE_BASELINE_SCORE: Value = 50.0;

// reward shaping weights
pub const W_FAINT: Value = 0.1;
pub const W_HEALTH: Value = 0.05;
pub const W_STATUS: Value = 0.01;
pub const W_BOOST: Value = 0.01;
pub const TERMINAL_REWARD: Value = 1.0;

/// stat stages saturate at +/-6
pub const MAX_BOOST_STAGE: i8 = 6;

/// progress bar
pub fn progress(n: usize) -> indicatif::ProgressBar {
    let tick = std::time::Duration::from_secs(10);
    let style =
        "{spinner:.cyan} [{pos}/{len}] {elapsed} @ {per_sec:>12} ~ {percent:>3}% {wide_bar:.cyan}";
    let style = indicatif::ProgressStyle::with_template(style).unwrap();
    let progress = indicatif::ProgressBar::new(n as u64);
    progress.set_style(style);
    progress.enable_steady_tick(tick);
    progress
}

/// initialize combined terminal + file logging
pub fn logs() {
    std::fs::create_dir_all("logs").expect("create logs directory");
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let time = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("time moves slow")
        .as_secs();
    let file = simplelog::WriteLogger::new(
        log::LevelFilter::Debug,
        config.clone(),
        std::fs::File::create(format!("logs/{}.log", time)).expect("create log file"),
    );
    let term = simplelog::TermLogger::new(
        log::LevelFilter::Info,
        config.clone(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, file]).expect("initialize logger");
}
