use anyhow::Context;
use clap::{Parser, Subcommand};
use engine::{BattleState, Roster, RosterConfig, RosterError, Side};
use serde_json::json;
use std::{
    io::{self, BufRead},
    path::PathBuf,
    process::ExitCode,
};

const EXIT_NOT_FOUND: u8 = 4;
const EXIT_MALFORMED: u8 = 5;
const HP_BAR_WIDTH: i32 = 20;

#[derive(Subcommand)]
enum Cmd {
    /// List every monster that has a definition file
    List {
        /// Print `{"names": [...]}` instead of one name per line
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Print one monster as JSON
    Show {
        /// Monster name (file base name, case-sensitive)
        name: String,
        /// Pretty-print JSON
        #[arg(long, default_value_t = false)]
        pretty: bool,
    },
    /// Battle two monsters; reads `1`, `2`, `r`, `q` from stdin
    Battle {
        /// Player 1's monster
        first: String,
        /// Player 2's monster
        second: String,
        /// Let the active side attack until someone wins
        #[arg(long, default_value_t = false)]
        auto: bool,
        /// Safety cap on attacks in --auto mode
        #[arg(long, default_value_t = 1000)]
        max_turns: u32,
    },
}

#[derive(Parser)]
#[command(name = "monster-battle")]
#[command(about = "Two-player monster battles from CSV definitions")]
struct Cli {
    /// Roster config file (JSON, or YAML by extension)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Directory holding `<name>.csv` definitions
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
    /// Directory holding `monsters/<name>/image.*` and `move.*` media
    #[arg(long, global = true)]
    public_dir: Option<PathBuf>,
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    cmd: Cmd,
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn roster_config(cli: &Cli) -> anyhow::Result<RosterConfig> {
    let mut cfg = match &cli.config {
        Some(path) => RosterConfig::load(path)?,
        None => RosterConfig::default(),
    };
    if let Some(dir) = &cli.data_dir {
        cfg.data_dir = dir.clone();
    }
    if let Some(dir) = &cli.public_dir {
        cfg.public_dir = dir.clone();
    }
    Ok(cfg)
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let roster = Roster::from_config(&roster_config(&cli)?);

    match cli.cmd {
        Cmd::List { json } => {
            let names = roster
                .list_identifiers()
                .with_context(|| format!("failed to list {}", roster.data_dir().display()))?;
            if json {
                println!("{}", json!({ "names": names }));
            } else {
                for name in names {
                    println!("{}", name);
                }
            }
        }
        Cmd::Show { name, pretty } => {
            let monster = match roster.resolve(&name) {
                Ok(m) => m,
                Err(e) => return report_roster_error(e),
            };
            let payload = json!({ "monster": monster });
            if pretty {
                println!("{}", serde_json::to_string_pretty(&payload)?);
            } else {
                println!("{}", payload);
            }
        }
        Cmd::Battle {
            first,
            second,
            auto,
            max_turns,
        } => {
            let (one, two) = match roster.resolve_pair(&first, &second) {
                Ok(pair) => pair,
                Err(e) => return report_roster_error(e),
            };
            let mut battle = BattleState::new(one, two);
            if auto {
                auto_battle(&mut battle, max_turns);
            } else {
                interactive_battle(&mut battle)?;
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn report_roster_error(err: RosterError) -> anyhow::Result<ExitCode> {
    match err {
        RosterError::NotFound(name) => {
            eprintln!("{}", json!({ "error": "Not found", "name": name }));
            Ok(ExitCode::from(EXIT_NOT_FOUND))
        }
        RosterError::Malformed { name, reason } => {
            eprintln!(
                "{}",
                json!({ "error": "Malformed", "name": name, "reason": reason.to_string() })
            );
            Ok(ExitCode::from(EXIT_MALFORMED))
        }
        RosterError::Io(e) => Err(e).context("failed to read monster definition"),
    }
}

fn auto_battle(battle: &mut BattleState, max_turns: u32) {
    let mut turns = 0u32;
    while !battle.is_finished() && turns < max_turns {
        battle.attempt_attack(battle.active_turn());
        turns += 1;
    }
    for line in battle.log() {
        println!("{}", line);
    }
    if battle.is_finished() {
        print_result(battle);
    } else {
        println!("No winner after {} attacks", turns);
    }
}

fn interactive_battle(battle: &mut BattleState) -> anyhow::Result<()> {
    println!("{}", battle.log()[0]);
    print_board(battle);

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("failed to read command")?;
        let seen = battle.log().len();
        let side = match line.trim() {
            "1" => Side::One,
            "2" => Side::Two,
            "r" => {
                battle.reset();
                for entry in battle.log() {
                    println!("{}", entry);
                }
                print_board(battle);
                continue;
            }
            "q" => break,
            "" => continue,
            other => {
                eprintln!("Unknown command {:?} (use 1, 2, r or q)", other);
                continue;
            }
        };

        if battle.attempt_attack(side).is_none() {
            if battle.is_finished() {
                eprintln!("The battle is over; press r to reset.");
            } else {
                eprintln!("Not your turn, P{}.", side.number());
            }
            continue;
        }
        for entry in &battle.log()[seen..] {
            println!("{}", entry);
        }
        print_board(battle);
    }
    Ok(())
}

fn print_board(battle: &BattleState) {
    for side in [Side::One, Side::Two] {
        let c = battle.combatant(side);
        let active = !battle.is_finished() && battle.active_turn() == side;
        let marker = if active { ">" } else { " " };
        println!(
            "{} P{} {:<12} {} {}/{}  [{} ({})]",
            marker,
            side.number(),
            c.record.name,
            hp_bar(c.current_hp, c.record.hp),
            c.current_hp,
            c.record.hp,
            c.record.move_name,
            c.record.move_power
        );
    }
    print_result(battle);
}

fn print_result(battle: &BattleState) {
    if let Some(side) = battle.winner() {
        println!("Winner: {}", battle.combatant(side).record.name);
    }
}

fn hp_bar(hp: i32, max_hp: i32) -> String {
    let pct = if max_hp > 0 {
        ((hp as f64 / max_hp as f64) * 100.0).round().clamp(0.0, 100.0) as i32
    } else {
        0
    };
    let filled = (pct * HP_BAR_WIDTH + 50) / 100;
    format!(
        "[{}{}]",
        "#".repeat(filled as usize),
        ".".repeat((HP_BAR_WIDTH - filled) as usize)
    )
}
