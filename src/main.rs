use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use log::warn;

use slide_2048::config::{Action, Config, Keymap};
use slide_2048::session::{Session, Turn};

#[derive(Debug, Parser)]
#[command(name = "slide-2048", version, about = "Play 2048 in the terminal")]
struct Cli {
    /// RNG seed for a reproducible game (overrides the config file)
    #[arg(long, value_name = "N")]
    seed: Option<u64>,

    /// TOML file with key bindings and an optional seed
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let config = match &cli.config {
        Some(path) => Config::from_toml(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => Config::default(),
    };
    let keymap = config.keys.keymap()?;
    let mut session = match cli.seed.or(config.seed) {
        Some(seed) => Session::from_seed(seed),
        None => Session::from_entropy(),
    };

    let stdin = io::stdin().lock();
    let mut out = io::stdout().lock();
    run(stdin, &mut out, &keymap, &mut session).context("terminal i/o failed")
}

/// Drive `session` from whitespace-separated key names on `input` until EOF or
/// a quit key, then write the summary line.
fn run<I: BufRead, W: Write>(
    input: I,
    out: &mut W,
    keymap: &Keymap,
    session: &mut Session,
) -> io::Result<()> {
    print_board(out, session)?;

    'input: for line in input.lines() {
        let line = line?;
        for key in line.split_whitespace() {
            match keymap.action(key) {
                Some(Action::Quit) => break 'input,
                Some(Action::NewGame) => {
                    session.new_game();
                    print_board(out, session)?;
                }
                Some(Action::Move(dir)) => {
                    let turn = session.play(dir);
                    if turn == Turn::Ignored {
                        writeln!(out, "Game over. Start a new game or quit.")?;
                    } else if turn.changed() {
                        print_board(out, session)?;
                        if session.is_over() {
                            writeln!(out, "Game Over!")?;
                        }
                    }
                }
                None => warn!("unbound key {key:?}"),
            }
        }
        out.flush()?;
    }

    writeln!(
        out,
        "Moves made: {}, Score: {}, Highest tile: {}",
        session.moves(),
        session.score(),
        session.highest_tile()
    )
}

fn print_board<W: Write>(out: &mut W, session: &Session) -> io::Result<()> {
    writeln!(out, "\nScore: {}\n{}", session.score(), session.grid())
}
