use std::env;

use anyhow::{anyhow, Context, Result};
use log::info;

use sokoban_runtime::{
    builtin_levels, load_level_pack, App, Command, Direction, Game, GameConfig, Renderer,
    SequenceEnd, SilentAudio, TextRenderer,
};

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {}

fn run() -> Result<()> {
    let options = CliOptions::parse()?;
    let levels = match &options.levels {
        Some(path) => load_level_pack(path)
            .with_context(|| format!("failed to load levels from {path}"))?,
        None => builtin_levels(),
    };
    let config = GameConfig {
        sequence_end: if options.wrap {
            SequenceEnd::Wrap
        } else {
            SequenceEnd::RepeatLast
        },
        background_music: !options.mute,
    };

    println!("Loaded {} level(s)", levels.len());
    let game = Game::new(levels, config).context("failed to start game")?;
    let mut app = App::new(game, SilentAudio);
    let mut renderer = TextRenderer::new();

    for command in &options.commands {
        let outcome = app.execute(*command);
        match (command, outcome) {
            (Command::Move(direction), Some(outcome)) => {
                if let Some(index) = outcome.completed_level {
                    println!("Level {} completed", index + 1);
                } else if !outcome.moved() {
                    info!("move {direction:?} rejected");
                }
            }
            (Command::Restart | Command::Start, _) => {
                println!("Restarted level {}", app.game().level_index() + 1);
            }
            _ => {}
        }
    }

    print_final_state(&app, &mut renderer);
    Ok(())
}

fn print_final_state(app: &App<SilentAudio>, renderer: &mut TextRenderer) {
    println!("Final state: {}", app.summary());
    renderer
        .render(&app.objects())
        .unwrap_or_else(|never| match never {});
    for row in renderer.frame() {
        println!("{row}");
    }
}

struct CliOptions {
    levels: Option<String>,
    commands: Vec<Command>,
    wrap: bool,
    mute: bool,
}

const USAGE: &str = "Usage: sokoban-runtime [--levels <file>] [--moves <UDLR!>] [--wrap] [--mute]";

impl CliOptions {
    fn parse() -> Result<Self> {
        Self::from_args(env::args().skip(1))
    }

    fn from_args(args: impl IntoIterator<Item = String>) -> Result<Self> {
        let mut args = args.into_iter();
        let mut options = Self {
            levels: None,
            commands: Vec::new(),
            wrap: false,
            mute: false,
        };
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--levels" => {
                    let path = args
                        .next()
                        .ok_or_else(|| anyhow!("--levels expects a file. {USAGE}"))?;
                    options.levels = Some(path);
                }
                "--moves" => {
                    let moves = args
                        .next()
                        .ok_or_else(|| anyhow!("--moves expects a sequence. {USAGE}"))?;
                    options.commands.extend(parse_moves(&moves)?);
                }
                "--wrap" => options.wrap = true,
                "--mute" => options.mute = true,
                other => {
                    return Err(anyhow!("Unknown argument: {other}. {USAGE}"));
                }
            }
        }
        Ok(options)
    }
}

fn parse_moves(moves: &str) -> Result<Vec<Command>> {
    moves
        .chars()
        .filter(|ch| !ch.is_whitespace())
        .map(|ch| match ch {
            '!' => Ok(Command::Restart),
            other => Direction::from_char(other)
                .map(Command::Move)
                .ok_or_else(|| anyhow!("Unknown move '{other}'. Expected U, D, L, R or !")),
        })
        .collect()
}
