//! sim-runner: headless driver for the wagering simulator.
//!
//! Usage:
//!   sim-runner --seed 12345 --ticks 200 --strategy kelly
//!   sim-runner --config engine.json --ticks 50 --interval-ms 250
//!   sim-runner --seed 12345 --ipc-mode

mod ticker;

use anyhow::Result;
use std::env;
use std::io::{self, BufRead, Write};
use std::thread;
use std::time::Duration;
use ticker::Ticker;
use wager_sim_core::{
    clock::SystemClock,
    command::{DriverCommand, MAX_TICKS_PER_COMMAND},
    error::{SimError, SimResult},
    rng::SeededRng,
    EngineConfig, RiskLevel, SharedEngine, SimulationEngine, StateSnapshot, Strategy,
};

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let ipc_mode = args.iter().any(|a| a == "--ipc-mode");
    let ticks = parse_arg(&args, "--ticks", 100u64);
    let interval_ms = parse_arg(&args, "--interval-ms", 0u64);

    let mut config = match str_arg(&args, "--config") {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    apply_overrides(&mut config, &args)?;

    let rng = match str_arg(&args, "--seed").and_then(|s| s.parse::<u64>().ok()) {
        Some(seed) => SeededRng::new(seed),
        None => SeededRng::from_entropy(),
    };
    let seed = rng.seed();

    if !ipc_mode {
        println!("AutoBet wager simulator: sim-runner");
        println!("  seed:      {seed}");
        println!("  ticks:     {ticks}");
        println!("  strategy:  {}", config.strategy);
        println!("  risk:      {} (inert)", config.risk_level);
        println!("  balance:   {:.2}", config.initial_balance);
        println!("  base bet:  {:.2}", config.base_bet);
        println!();
    }

    let engine = SharedEngine::new(SimulationEngine::from_config(
        &config,
        Box::new(rng),
        Box::new(SystemClock),
    ));

    if ipc_mode {
        run_ipc_loop(&engine)?;
    } else {
        for _ in 0..ticks {
            engine.tick();
            if interval_ms > 0 {
                thread::sleep(Duration::from_millis(interval_ms));
            }
        }
        print_summary(&engine.get_state(), ticks);
    }

    Ok(())
}

/// Command-line flags win over the config file. Strategy names are lenient
/// (unknown means `Flat`); risk levels are strict.
fn apply_overrides(config: &mut EngineConfig, args: &[String]) -> SimResult<()> {
    config.initial_balance = parse_arg(args, "--balance", config.initial_balance);
    config.base_bet = parse_arg(args, "--base-bet", config.base_bet);
    if let Some(s) = str_arg(args, "--strategy") {
        config.strategy = Strategy::parse_or_flat(s);
    }
    if let Some(r) = str_arg(args, "--risk") {
        config.risk_level = r.parse()?;
    }
    Ok(())
}

fn run_ipc_loop(engine: &SharedEngine) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut ticker: Option<Ticker> = None;

    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let cmd: DriverCommand = match serde_json::from_str(&line) {
            Ok(c) => c,
            Err(e) => {
                let err_json = serde_json::json!({ "error": e.to_string() });
                writeln!(stdout, "{}", err_json)?;
                stdout.flush()?;
                continue;
            }
        };

        match handle_command(engine, &mut ticker, cmd) {
            Ok(Some(state)) => writeln!(stdout, "{}", serde_json::to_string(&state)?)?,
            Ok(None) => break,
            Err(e) => writeln!(stdout, "{}", serde_json::json!({ "error": e.to_string() }))?,
        }
        stdout.flush()?;
    }

    if let Some(mut t) = ticker.take() {
        t.stop();
    }
    Ok(())
}

/// Apply one command. `Ok(None)` means quit.
fn handle_command(
    engine: &SharedEngine,
    ticker: &mut Option<Ticker>,
    cmd: DriverCommand,
) -> SimResult<Option<StateSnapshot>> {
    let state = match cmd {
        DriverCommand::Quit => return Ok(None),
        DriverCommand::GetState => engine.get_state(),
        DriverCommand::Tick { count } => {
            if count > MAX_TICKS_PER_COMMAND {
                return Err(SimError::TickBatchTooLarge {
                    requested: count,
                    max: MAX_TICKS_PER_COMMAND,
                });
            }
            // Batch under one lock so no auto tick lands mid-batch.
            engine.with_engine(|e| {
                for _ in 0..count {
                    e.tick();
                }
                e.get_state()
            })
        }
        DriverCommand::Start { interval_ms } => {
            // One repeating trigger at a time.
            stop_ticker(ticker);
            let started = Ticker::start(engine.clone(), interval_ms);
            log::debug!("auto tick every {:?}", started.interval());
            *ticker = Some(started);
            engine.get_state()
        }
        DriverCommand::Stop => {
            stop_ticker(ticker);
            engine.get_state()
        }
        DriverCommand::Reset => {
            stop_ticker(ticker);
            engine.reset()
        }
        DriverCommand::SetStrategy { strategy } => {
            engine.set_strategy(Strategy::parse_or_flat(&strategy));
            engine.get_state()
        }
        DriverCommand::SetRisk { level } => {
            engine.set_risk(level.parse::<RiskLevel>()?);
            engine.get_state()
        }
        DriverCommand::Log { message } => {
            engine.log(message);
            engine.get_state()
        }
    };
    Ok(Some(state))
}

fn stop_ticker(ticker: &mut Option<Ticker>) {
    if let Some(mut t) = ticker.take() {
        t.stop();
    }
}

fn print_summary(state: &StateSnapshot, ticks: u64) {
    println!("=== RUN SUMMARY ===");
    println!("  ticks run:      {ticks}");
    println!("  balance:        {:.2}", state.balance);
    println!("  session profit: {:+.2}", state.session_profit());
    println!("  win rate:       {:.1}% ({}W - {}L)", state.win_rate(), state.wins, state.losses);
    println!("  next bet:       {:.2}", state.current_bet);
    if let Some(last) = last_round_line(state) {
        println!("  last round:     {last}");
    }

    println!();
    println!("=== RECENT LOG ===");
    for line in state.logs.iter().take(10) {
        println!("  {line}");
    }
}

fn last_round_line(state: &StateSnapshot) -> Option<String> {
    state.latest_round().map(|r| {
        format!(
            "roll {:.2} {} {:+.2} -> {:.2}",
            r.roll,
            if r.result.is_win() { "WIN" } else { "LOSS" },
            r.profit,
            r.balance_after_round
        )
    })
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}

fn str_arg<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}
