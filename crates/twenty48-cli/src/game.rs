//! Interactive game loop: render the board, read a move, apply it, spawn a
//! tile when the move changed something, repeat until stuck or quit.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use log::{debug, info};
use rand::Rng;
use twenty48_core::engine::{Board, Move, SpawnWeights};

/// A parsed line of player input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Shift(Move),
    Quit,
}

/// How a single game ended.
enum Outcome {
    Quit,
    GameOver,
}

/// Map the first character of a line to a command, case-insensitively.
/// Returns `None` for anything that is not `u`/`d`/`l`/`r`/`q`.
fn parse_command(line: &str) -> Option<Command> {
    match line.trim().chars().next()?.to_ascii_lowercase() {
        'u' => Some(Command::Shift(Move::Up)),
        'd' => Some(Command::Shift(Move::Down)),
        'l' => Some(Command::Shift(Move::Left)),
        'r' => Some(Command::Shift(Move::Right)),
        'q' => Some(Command::Quit),
        _ => None,
    }
}

fn print_instructions(out: &mut impl Write) -> Result<()> {
    writeln!(out, "Welcome to 2048!")?;
    writeln!(out, "Rules:")?;
    writeln!(out, "Use [U]p, [D]own, [L]eft, [R]ight to move the tiles.")?;
    writeln!(
        out,
        "When two tiles with the same number touch, they merge into 1!"
    )?;
    writeln!(
        out,
        "Your goal is to get the highest number possible without getting stuck. Good luck!"
    )?;
    Ok(())
}

/// Write a prompt and read one line back; `None` means stdin hit EOF.
fn prompt(out: &mut impl Write, input: &mut impl BufRead, text: &str) -> Result<Option<String>> {
    write!(out, "{text}")?;
    out.flush()?;
    let mut line = String::new();
    let read = input
        .read_line(&mut line)
        .context("failed to read player input")?;
    if read == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}

/// Seed a fresh board with two random tiles.
fn new_game<R: Rng + ?Sized>(rng: &mut R, weights: SpawnWeights) -> Board {
    Board::EMPTY
        .with_random_tile_weighted(rng, weights)
        .with_random_tile_weighted(rng, weights)
}

/// Drive the whole session: instruction banner, one game per round, and the
/// play-again prompt between rounds.
pub fn run<I, O, R>(input: &mut I, out: &mut O, rng: &mut R, weights: SpawnWeights) -> Result<()>
where
    I: BufRead,
    O: Write,
    R: Rng + ?Sized,
{
    print_instructions(out)?;
    if prompt(out, input, "Press enter to start: ")?.is_none() {
        return Ok(());
    }
    loop {
        let mut board = new_game(rng, weights);
        info!("game started");
        writeln!(out, "Game had started.")?;
        writeln!(out, "The board now:")?;
        writeln!(out, "{board}")?;
        match play(&mut board, input, out, rng, weights)? {
            Outcome::Quit => {
                writeln!(
                    out,
                    "Thanks for playing! Your maximum tile is {}! Goodbye!",
                    board.highest_tile()
                )?;
                return Ok(());
            }
            Outcome::GameOver => {
                info!("game over, highest tile {}", board.highest_tile());
                writeln!(
                    out,
                    "Game over! Your maximum tile is {}! Good Job!",
                    board.highest_tile()
                )?;
            }
        }
        match prompt(out, input, "Would you want to play again? (y/n) ")? {
            Some(line) if !line.trim().to_ascii_lowercase().starts_with('n') => continue,
            _ => break,
        }
    }
    writeln!(out, "Thanks for playing! Goodbye!")?;
    Ok(())
}

/// Run one game to completion or until the player quits.
fn play<I, O, R>(
    board: &mut Board,
    input: &mut I,
    out: &mut O,
    rng: &mut R,
    weights: SpawnWeights,
) -> Result<Outcome>
where
    I: BufRead,
    O: Write,
    R: Rng + ?Sized,
{
    while !board.is_game_over() {
        let line = match prompt(
            out,
            input,
            "Please enter your move ([U]p, [D]own, [L]eft, [R]ight, [Q]uit): ",
        )? {
            Some(line) => line,
            None => return Ok(Outcome::Quit),
        };
        let command = match parse_command(&line) {
            Some(command) => command,
            None => {
                writeln!(out, "Invalid input, please try again.")?;
                continue;
            }
        };
        match command {
            Command::Quit => return Ok(Outcome::Quit),
            Command::Shift(direction) => {
                let moved = board.shift(direction);
                if moved == *board {
                    debug!("{direction:?} did not change the board");
                } else {
                    *board = moved.with_random_tile_weighted(rng, weights);
                }
                writeln!(out, "The board now:")?;
                writeln!(out, "{board}")?;
            }
        }
    }
    Ok(Outcome::GameOver)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::io::Cursor;

    #[test]
    fn parses_moves_case_insensitively() {
        assert_eq!(parse_command("u\n"), Some(Command::Shift(Move::Up)));
        assert_eq!(parse_command("D\n"), Some(Command::Shift(Move::Down)));
        assert_eq!(parse_command("  left\n"), Some(Command::Shift(Move::Left)));
        assert_eq!(parse_command("R"), Some(Command::Shift(Move::Right)));
        assert_eq!(parse_command("Q\n"), Some(Command::Quit));
        assert_eq!(parse_command("x\n"), None);
        assert_eq!(parse_command("\n"), None);
        assert_eq!(parse_command(""), None);
    }

    fn run_session(script: &str) -> String {
        let mut input = Cursor::new(script.as_bytes().to_vec());
        let mut out = Vec::new();
        let mut rng = StdRng::seed_from_u64(7);
        run(&mut input, &mut out, &mut rng, SpawnWeights::default()).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn quitting_reports_the_highest_tile() {
        let text = run_session("\nq\n");
        assert!(text.contains("Welcome to 2048!"));
        assert!(text.contains("Your maximum tile is"));
        assert!(text.contains("Goodbye!"));
    }

    #[test]
    fn invalid_input_reprompts() {
        let text = run_session("\nx\nq\n");
        assert!(text.contains("Invalid input, please try again."));
    }

    #[test]
    fn moves_are_applied_before_quit() {
        let text = run_session("\nl\nr\nq\n");
        // Board renders once at game start and once per accepted move.
        assert_eq!(text.matches("The board now:").count(), 3);
    }

    #[test]
    fn eof_ends_the_session_cleanly() {
        let text = run_session("\n");
        assert!(text.contains("Your maximum tile is"));
    }

    #[test]
    fn new_game_spawns_two_tiles() {
        let mut rng = StdRng::seed_from_u64(1);
        let board = new_game(&mut rng, SpawnWeights::default());
        assert_eq!(board.count_empty(), 14);
        assert!(board.tiles().filter(|&v| v != 0).all(|v| v == 2 || v == 4));
    }
}
