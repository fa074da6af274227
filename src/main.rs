//! Headless Gem Cascade runner (default binary).
//!
//! Reads one command per line from stdin and prints the board after every
//! change. Meant for scripting and for poking at the engine by hand:
//!
//! ```text
//! swap C R C R      swap two tiles and resolve the cascade
//! swap C R DIR      same, with the neighbour given as left/right/up/down
//! stage C R C R     swap two tiles, leave the cascade for `step`
//! step              resolve one cascade step of a staged swap
//! select C R        click-style selection (second adjacent pick swaps)
//! show              print the board
//! json              print a JSON snapshot of the board
//! restart [SEED]    start a new game
//! quit
//! ```
//!
//! Options: `--seed N`, `--config path.json`. Set `RUST_LOG=debug` to watch
//! the cascade steps.

use std::io::{self, BufRead, Write};

use anyhow::{bail, Context, Result};

use gem_cascade::core::EngineConfig;
use gem_cascade::engine::{GameSession, SelectOutcome, StepOutcome, SwapCheck, SwapOutcome};
use gem_cascade::types::{Coord, Direction};

struct Args {
    seed: u64,
    config: EngineConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Swap(Coord, Coord),
    Stage(Coord, Coord),
    Step,
    Select(Coord),
    Show,
    Json,
    Restart(Option<u64>),
    Quit,
}

fn main() -> Result<()> {
    env_logger::init();

    let args = parse_args()?;
    let mut session = GameSession::new(args.config, args.seed)?;

    let stdin = io::stdin();
    let mut out = io::stdout().lock();
    print_board(&mut out, &session)?;

    for line in stdin.lock().lines() {
        let line = line?;
        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(err) => {
                writeln!(out, "error: {:#}", err)?;
                continue;
            }
        };

        if command == Command::Quit {
            break;
        }
        if let Err(err) = run_command(&mut out, &mut session, command) {
            writeln!(out, "error: {:#}", err)?;
        }
    }
    Ok(())
}

fn parse_args() -> Result<Args> {
    let mut seed = 1;
    let mut config = EngineConfig::default();

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--seed" => {
                let value = args.next().context("--seed needs a value")?;
                seed = value
                    .parse::<u64>()
                    .with_context(|| format!("invalid seed {:?}", value))?;
            }
            "--config" => {
                let path = args.next().context("--config needs a path")?;
                config = EngineConfig::load(&path)?;
            }
            other => bail!("unknown argument {:?}", other),
        }
    }
    Ok(Args { seed, config })
}

fn parse_command(line: &str) -> Result<Option<Command>> {
    let words: Vec<&str> = line.split_whitespace().collect();
    let Some((&name, rest)) = words.split_first() else {
        return Ok(None);
    };

    let command = match name.to_lowercase().as_str() {
        "swap" => {
            let (a, b) = parse_pair(rest)?;
            Command::Swap(a, b)
        }
        "stage" => {
            let (a, b) = parse_pair(rest)?;
            Command::Stage(a, b)
        }
        "step" => Command::Step,
        "select" => Command::Select(parse_coord(rest)?),
        "show" => Command::Show,
        "json" => Command::Json,
        "restart" => match rest.first() {
            Some(seed) => Command::Restart(Some(
                seed.parse::<u64>()
                    .with_context(|| format!("invalid seed {:?}", seed))?,
            )),
            None => Command::Restart(None),
        },
        "quit" | "exit" => Command::Quit,
        other => bail!("unknown command {:?}", other),
    };
    Ok(Some(command))
}

fn parse_coord(words: &[&str]) -> Result<Coord> {
    let [col, row] = words else {
        bail!("expected `COL ROW`");
    };
    let col = col
        .parse::<i32>()
        .with_context(|| format!("invalid column {:?}", col))?;
    let row = row
        .parse::<i32>()
        .with_context(|| format!("invalid row {:?}", row))?;
    Ok(Coord::new(col, row))
}

fn parse_pair(words: &[&str]) -> Result<(Coord, Coord)> {
    match words.len() {
        3 => {
            let from = parse_coord(&words[..2])?;
            let dir = Direction::from_str(words[2])
                .with_context(|| format!("invalid direction {:?}", words[2]))?;
            Ok((from, from.step(dir)))
        }
        4 => Ok((parse_coord(&words[..2])?, parse_coord(&words[2..])?)),
        _ => bail!("expected `COL ROW COL ROW` or `COL ROW DIR`"),
    }
}

fn run_command(out: &mut impl Write, session: &mut GameSession, command: Command) -> Result<()> {
    match command {
        Command::Swap(a, b) => {
            let outcome = session.swap(a, b)?;
            report_swap(out, outcome)?;
            print_board(out, session)?;
        }
        Command::Stage(a, b) => {
            match session.begin_swap(a, b)? {
                SwapCheck::Matched => writeln!(out, "matched; `step` to resolve")?,
                SwapCheck::Reverted => writeln!(out, "no match, reverted")?,
                SwapCheck::Rejected(reason) => writeln!(out, "rejected: {:?}", reason)?,
            }
            print_board(out, session)?;
        }
        Command::Step => {
            match session.step()? {
                StepOutcome::Cleared(count) => writeln!(out, "cleared {}", count)?,
                StepOutcome::Stable => writeln!(out, "stable")?,
            }
            print_board(out, session)?;
        }
        Command::Select(coord) => match session.select(coord)? {
            SelectOutcome::Selected(coord) => writeln!(out, "selected {}", coord)?,
            SelectOutcome::Swapped(outcome) => {
                report_swap(out, outcome)?;
                print_board(out, session)?;
            }
        },
        Command::Show => print_board(out, session)?,
        Command::Json => writeln!(out, "{}", session.snapshot().to_json()?)?,
        Command::Restart(seed) => {
            let seed = seed.unwrap_or_else(|| session.seed().wrapping_add(1));
            session.restart(seed)?;
            print_board(out, session)?;
        }
        Command::Quit => {}
    }
    Ok(())
}

fn report_swap(out: &mut impl Write, outcome: SwapOutcome) -> io::Result<()> {
    match outcome {
        SwapOutcome::Committed {
            total_removed,
            cascades,
        } => writeln!(
            out,
            "committed: {} tiles over {} cascade(s)",
            total_removed, cascades
        ),
        SwapOutcome::Reverted => writeln!(out, "no match, reverted"),
        SwapOutcome::Rejected(reason) => writeln!(out, "rejected: {:?}", reason),
    }
}

fn print_board(out: &mut impl Write, session: &GameSession) -> io::Result<()> {
    let grid = session.grid();
    for (i, line) in grid.to_rows().iter().enumerate() {
        let row = grid.height() - 1 - i;
        writeln!(out, "{:>2} {}", row, line)?;
    }
    let cols: String = (0..grid.width()).map(|c| (b'0' + (c % 10) as u8) as char).collect();
    writeln!(out, "   {}", cols)?;
    writeln!(
        out,
        "score {}  moves {}  seed {}",
        session.score(),
        session.moves(),
        session.seed()
    )
}
