use battleq::battle::Choice;
use battleq::policy::{Agent, Hyper, Session};
use battleq::skirmish::{Battle, Phase, Scripted};
use battleq::Snapshot;
use clap::Parser;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::io::Write;
use std::path::PathBuf;

const LOG_EVERY: usize = 1000;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
/// Train the tabular agent against a scripted opponent
struct Args {
    /// number of matches to run
    #[arg(long, default_value_t = 100_000)]
    battles: usize,
    /// scripted opponent: random | maxpower
    #[arg(long, default_value = "random")]
    opponent: Scripted,
    /// checkpoint file for both tables
    #[arg(long, default_value = "models/tables.ckpt")]
    model: PathBuf,
    /// CSV training statistics
    #[arg(long, default_value = "logs/training.csv")]
    stats: PathBuf,
    /// checkpoint cadence, in matches
    #[arg(long, default_value_t = 5000)]
    save_every: usize,
    /// exploration schedule: linear decay from start to end
    #[arg(long, default_value_t = 0.5)]
    eps_start: f64,
    #[arg(long, default_value_t = 0.05)]
    eps_end: f64,
    #[arg(long, default_value_t = 50_000)]
    decay_battles: usize,
    /// learning rate
    #[arg(long, default_value_t = battleq::DEFAULT_ALPHA)]
    alpha: f64,
    /// discount
    #[arg(long, default_value_t = battleq::DEFAULT_GAMMA)]
    gamma: f64,
    /// trace decay
    #[arg(long, default_value_t = battleq::DEFAULT_LAMBDA)]
    lambda: f64,
    /// start unseen entries at 0.0 instead of heuristic seeds
    #[arg(long)]
    no_heuristic: bool,
    /// rng seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,
}

fn epsilon(args: &Args, battles_done: usize) -> f64 {
    if battles_done >= args.decay_battles {
        return args.eps_end;
    }
    let progress = battles_done as f64 / args.decay_battles as f64;
    (args.eps_start - progress * (args.eps_start - args.eps_end)).max(args.eps_end)
}

/// engine-default action when the core reports no legal choice
fn fallback<R: Rng>(view: &Snapshot, rng: &mut R) -> Choice {
    if !view.available_moves.is_empty() {
        let idx = rng.gen_range(0..view.available_moves.len());
        Choice::Move(view.available_moves[idx].clone())
    } else {
        Choice::Switch(0)
    }
}

/// run one match to completion. `None` means the match stalled out and
/// was abandoned without attributing an outcome.
fn episode<R: Rng>(
    agent: &mut Agent,
    session: &mut Session,
    opponent: Scripted,
    rng: &mut R,
) -> Option<bool> {
    let mut battle = Battle::new(rng);
    while !battle.over() {
        if battle.stalled() {
            agent.abandon(session);
            return None;
        }
        match battle.phase() {
            Phase::Turn => {
                let own_view = battle.snapshot_own();
                let own_choice = agent
                    .decide(session, &own_view, rng)
                    .unwrap_or_else(|| fallback(&own_view, rng));
                let foe_view = battle.snapshot_foe();
                let foe_choice = opponent.act(&foe_view, rng);
                battle.step_turn(own_choice, foe_choice, rng);
            }
            Phase::ReplaceOwn => {
                let view = battle.snapshot_own();
                let choice = agent
                    .decide(session, &view, rng)
                    .unwrap_or(Choice::Switch(0));
                battle.replace_own(choice);
            }
            Phase::ReplaceFoe => {
                let view = battle.snapshot_foe();
                let choice = opponent.act(&view, rng);
                battle.replace_foe(choice);
            }
            Phase::Done => break,
        }
    }
    let won = battle.won();
    agent.finish(session, &battle.snapshot_own(), won);
    Some(won)
}

fn log_stats(
    path: &PathBuf,
    battles: usize,
    rolling: f64,
    overall: f64,
    eps: f64,
    speed: f64,
    table_size: usize,
    opponent: Scripted,
) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let fresh = !path.exists();
    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;
    if fresh {
        writeln!(
            file,
            "Battles,RollingWin,OverallWin,Epsilon,Speed,TableSize,Opponent"
        )?;
    }
    writeln!(
        file,
        "{},{:.4},{:.4},{:.4},{:.1},{},{:?}",
        battles, rolling, overall, eps, speed, table_size, opponent
    )
}

fn main() {
    let args = Args::parse();
    battleq::logs();

    let hyper = Hyper {
        alpha: args.alpha,
        gamma: args.gamma,
        lambda: args.lambda,
        epsilon: args.eps_start,
        heuristic_init: !args.no_heuristic,
        ..Hyper::default()
    };
    let mut agent = Agent::restore(&args.model, hyper);
    let mut session = Session::new();
    let mut rng = match args.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_entropy(),
    };

    log::info!(
        "training {} battles vs {:?} (alpha {}, gamma {}, lambda {})",
        args.battles,
        args.opponent,
        hyper.alpha,
        hyper.gamma,
        hyper.lambda
    );

    let progress = battleq::progress(args.battles);
    let start = std::time::Instant::now();
    let mut wins = 0usize;
    let mut finished = 0usize;
    let mut abandoned = 0usize;
    let mut window_wins = 0usize;
    let mut window_battles = 0usize;

    for battle_idx in 0..args.battles {
        agent.hyper.epsilon = epsilon(&args, battle_idx);
        match episode(&mut agent, &mut session, args.opponent, &mut rng) {
            Some(won) => {
                finished += 1;
                window_battles += 1;
                if won {
                    wins += 1;
                    window_wins += 1;
                }
            }
            None => abandoned += 1,
        }
        progress.inc(1);

        if (battle_idx + 1) % args.save_every == 0 {
            if let Err(e) = agent.checkpoint(&args.model) {
                log::warn!("checkpoint failed: {}", e);
            }
        }
        if window_battles >= LOG_EVERY {
            let rolling = window_wins as f64 / window_battles as f64;
            let overall = wins as f64 / finished.max(1) as f64;
            let speed = finished as f64 / start.elapsed().as_secs_f64().max(1e-9);
            log::info!(
                "battle {}: rolling {:.0}% | overall {:.0}% | eps {:.3} | states {} | {:.1}/s",
                battle_idx + 1,
                rolling * 100.0,
                overall * 100.0,
                agent.hyper.epsilon,
                agent.master.len(),
                speed
            );
            if let Err(e) = log_stats(
                &args.stats,
                battle_idx + 1,
                rolling,
                overall,
                agent.hyper.epsilon,
                speed,
                agent.master.len(),
                args.opponent,
            ) {
                log::warn!("stats logging failed: {}", e);
            }
            window_wins = 0;
            window_battles = 0;
        }
    }
    progress.finish();

    if let Err(e) = agent.checkpoint(&args.model) {
        log::warn!("final checkpoint failed: {}", e);
    }
    log::info!(
        "done: {} finished, {} abandoned, overall win rate {:.1}%",
        finished,
        abandoned,
        100.0 * wins as f64 / finished.max(1) as f64
    );
}
