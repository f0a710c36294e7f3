use anyhow::{Context, Result, bail};
use minesweep_core::{Coord2, Difficulty};
use std::str::FromStr;

pub const HELP: &str = "\
commands:
  r <col> <row>          reveal a tile
  f <col> <row>          toggle a flag
  p <col> <row> <ms>     press a tile for <ms>, long presses flag
  retry                  replay the same mines
  new                    new mines, same difficulty
  d <easy|medium|hard>   change difficulty
  json                   dump the board as json
  q                      quit";

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Command {
    Reveal(Coord2),
    Flag(Coord2),
    Press { at: Coord2, held_ms: u64 },
    Retry,
    New,
    Difficulty(Difficulty),
    Json,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> Result<Self> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            bail!("empty command");
        };

        let command = match verb {
            "r" | "reveal" => Command::Reveal(coords(&mut words)?),
            "f" | "flag" => Command::Flag(coords(&mut words)?),
            "p" | "press" => {
                let at = coords(&mut words)?;
                let held_ms = next_word(&mut words, "duration")?
                    .parse()
                    .context("duration must be in milliseconds")?;
                Command::Press { at, held_ms }
            }
            "retry" => Command::Retry,
            "new" => Command::New,
            "d" | "difficulty" => {
                Command::Difficulty(next_word(&mut words, "difficulty")?.parse()?)
            }
            "json" => Command::Json,
            "h" | "help" | "?" => Command::Help,
            "q" | "quit" => Command::Quit,
            other => bail!("unknown command `{other}`, try `help`"),
        };

        if let Some(extra) = words.next() {
            bail!("unexpected `{extra}`");
        }
        Ok(command)
    }
}

fn next_word<'a>(words: &mut impl Iterator<Item = &'a str>, what: &str) -> Result<&'a str> {
    words.next().with_context(|| format!("missing {what}"))
}

fn coords<'a>(words: &mut impl Iterator<Item = &'a str>) -> Result<Coord2> {
    let col = next_word(words, "column")?
        .parse()
        .context("column must be a number")?;
    let row = next_word(words, "row")?
        .parse()
        .context("row must be a number")?;
    Ok((col, row))
}
