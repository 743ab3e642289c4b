use std::str::FromStr;

use anyhow::{Context, bail};
use synapse_core::{Coord, Coord2};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Tap(Coord2),
    Hint,
    Restart,
    Show,
    Help,
    Quit,
}

pub const HELP: &str = "\
Commands:
  <x> <y>    tap the cell in column x, row y
  hint       flash every letter of the word
  restart    new grid for the current word
  show       draw the grid again
  quit       leave the game";

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> anyhow::Result<Self> {
        let words: Vec<&str> = line.split([' ', ',']).filter(|w| !w.is_empty()).collect();
        let command = match words.as_slice() {
            ["h" | "hint"] => Self::Hint,
            ["r" | "restart"] => Self::Restart,
            ["s" | "show"] | [] => Self::Show,
            ["?" | "help"] => Self::Help,
            ["q" | "quit" | "exit"] => Self::Quit,
            [x, y] => {
                let x: Coord = x.parse().with_context(|| format!("Bad column {x:?}"))?;
                let y: Coord = y.parse().with_context(|| format!("Bad row {y:?}"))?;
                Self::Tap((x, y))
            }
            _ => bail!("Unknown command {:?}, type `help`", line.trim()),
        };
        Ok(command)
    }
}
