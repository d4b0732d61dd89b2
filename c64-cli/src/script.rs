//! Scan scripts for `c64-cli simulate`.
//!
//! One command per line, `#` starts a comment:
//!
//! ```text
//! at 100          # set the clock to 100 ms
//! wait 6          # advance the clock by 6 ms
//! down lshift     # close a key (by name, or as r<row>c<col>)
//! up r2c3
//! restore down    # ground the RESTORE column
//! scan 2          # run two scan cycles (default 1)
//! ```

use anyhow::{bail, Context, Result};
use c64_keymap::matrix::{COLS, RESTORE_COL, RESTORE_ROW, ROWS};
use c64_keymap::C64Key;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    At(u32),
    Wait(u32),
    Set { row: u8, col: u8, down: bool },
    Scan(u32),
}

pub fn parse_script(input: &str) -> Result<Vec<Step>> {
    let mut steps = Vec::new();

    for (line_num, line) in input.lines().enumerate() {
        let line = line.split('#').next().unwrap_or_default().trim();
        if line.is_empty() {
            continue;
        }

        let words: Vec<&str> = line.split_whitespace().collect();
        let step = match words.as_slice() {
            ["at", ms] => Step::At(parse_number(ms, line_num)?),
            ["wait", ms] => Step::Wait(parse_number(ms, line_num)?),
            ["scan"] => Step::Scan(1),
            ["scan", n] => Step::Scan(parse_number(n, line_num)?),
            ["down", key] => parse_key(key, true, line_num)?,
            ["up", key] => parse_key(key, false, line_num)?,
            ["restore", "down"] => restore(true),
            ["restore", "up"] => restore(false),
            ["restore", other] => {
                bail!("line {}: expected `restore down` or `restore up`, got `{}`", line_num + 1, other)
            }
            [command @ ("at" | "wait" | "down" | "up" | "restore")] => {
                bail!("line {}: `{}` needs an argument", line_num + 1, command)
            }
            [command, ..] => bail!("line {}: unknown command `{}`", line_num + 1, command),
            [] => continue,
        };
        steps.push(step);
    }

    Ok(steps)
}

fn parse_number(word: &str, line_num: usize) -> Result<u32> {
    word.parse()
        .with_context(|| format!("line {}: invalid number `{}`", line_num + 1, word))
}

fn restore(down: bool) -> Step {
    Step::Set { row: RESTORE_ROW, col: RESTORE_COL, down }
}

fn parse_key(word: &str, down: bool, line_num: usize) -> Result<Step> {
    if let Some(key) = C64Key::from_name(word) {
        let pos = key.position();
        return Ok(Step::Set { row: pos.row(), col: pos.col(), down });
    }

    if let Some((row, col)) = parse_cell(word) {
        if (row as usize) >= ROWS || (col as usize) >= COLS {
            bail!("line {}: cell `{}` is outside the 8x9 matrix", line_num + 1, word);
        }
        return Ok(Step::Set { row, col, down });
    }

    bail!("line {}: unknown key `{}`", line_num + 1, word)
}

/// `r<row>c<col>`
fn parse_cell(word: &str) -> Option<(u8, u8)> {
    let (row, col) = word.strip_prefix('r')?.split_once('c')?;
    Some((row.parse().ok()?, col.parse().ok()?))
}
