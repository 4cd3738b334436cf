use std::io::{self, Stdout};

use crossterm::cursor::{Hide, Show};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::ExecutableCommand;
use log::info;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use maze_chase::{
    run, FixedRate, GameConfig, GameError, GameState, RandomWalk, Summary, TerminalKeys,
    TerminalRenderer,
};

fn main() -> Result<(), GameError> {
    env_logger::init();

    let config = GameConfig::from_env();
    // Validate before touching the terminal so a bad layout prints cleanly.
    let state = GameState::new(&config)?;

    let mut stdout = io::stdout();
    terminal::enable_raw_mode()?;
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(Hide)?;

    let result = play(&config, state, stdout);

    let mut stdout = io::stdout();
    stdout.execute(Show)?;
    stdout.execute(LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;

    let summary = result?;
    println!("Game Over!");
    println!("Score: {}", summary.score);
    Ok(())
}

fn play(config: &GameConfig, state: GameState, stdout: Stdout) -> Result<Summary, GameError> {
    let seed = config.seed.unwrap_or_else(rand::random);
    info!("ghost seed {seed}, tick {:?}", config.tick);

    let renderer = TerminalRenderer::new(stdout, config.width, config.height);
    let ghosts = RandomWalk::new(Pcg32::seed_from_u64(seed));
    run(state, TerminalKeys, renderer, ghosts, FixedRate::new(config.tick))
}
