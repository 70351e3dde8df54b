use cubesweeper_core::{Coord, Coord3, Difficulty};

/// A line of player input.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Command {
    Reveal(Coord3),
    New(Option<Difficulty>),
    Help,
    Quit,
}

pub fn parse_command(line: &str) -> Result<Command, String> {
    let words: Vec<&str> = line.split_whitespace().collect();
    match words.as_slice() {
        ["q" | "quit" | "exit"] => Ok(Command::Quit),
        ["h" | "help" | "?"] => Ok(Command::Help),
        ["n" | "new"] => Ok(Command::New(None)),
        ["n" | "new", difficulty] => difficulty
            .parse()
            .map(|difficulty| Command::New(Some(difficulty)))
            .map_err(|_| format!("Unknown difficulty {difficulty:?}, try easy, medium or hard")),
        [x, y, z] => Ok(Command::Reveal((axis(x)?, axis(y)?, axis(z)?))),
        [] => Err("Type x y z to reveal a cell, or help".to_string()),
        _ => Err(format!("Could not understand {:?}", line.trim())),
    }
}

fn axis(word: &str) -> Result<Coord, String> {
    word.parse()
        .map_err(|_| format!("{word:?} is not a coordinate"))
}

pub const HELP: &str = "\
commands:
  x y z         reveal the cell at x, y, z (zero based)
  new [level]   start over, optionally as easy, medium or hard
  help          show this text
  quit          leave the game
legend: # hidden  ! pulsing hazard  . empty  1-6 adjacent hazards  $ reward  * hazard";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_reveals_and_keywords() {
        assert_eq!(parse_command("1 2 3"), Ok(Command::Reveal((1, 2, 3))));
        assert_eq!(parse_command("  4   0 0 "), Ok(Command::Reveal((4, 0, 0))));
        assert_eq!(parse_command("quit"), Ok(Command::Quit));
        assert_eq!(parse_command("new"), Ok(Command::New(None)));
        assert_eq!(parse_command("new Hard"), Ok(Command::New(Some(Difficulty::Hard))));
        assert_eq!(parse_command("?"), Ok(Command::Help));
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_command("").is_err());
        assert!(parse_command("1 2").is_err());
        assert!(parse_command("1 -2 3").is_err());
        assert!(parse_command("new extreme").is_err());
    }
}
