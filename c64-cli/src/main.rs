mod layout;
mod script;
mod simulate;

use anyhow::{Context, Result};
use c64_keymap::{C64Key, Target, Timing, TranslationTable};
use clap::{Parser, Subcommand, ValueEnum};
use log::LevelFilter;
use std::fs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "c64-cli")]
#[command(about = "Host tools for the C64 keyboard converter")]
struct Cli {
    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print what every key sends under a target
    Table {
        #[arg(long, value_enum, default_value_t = TargetArg::Ascii)]
        target: TargetArg,
    },
    /// Render the keyboard for every target as HTML/SVG
    Layout {
        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Replay a scan script through the keyboard pipeline
    Simulate {
        /// Path to the scan script
        script: PathBuf,
        /// Target held in the simulated EEPROM slot at power-up
        #[arg(long, value_enum, default_value_t = TargetArg::Ascii)]
        target: TargetArg,
        #[arg(long, default_value_t = c64_keymap::config::DEBOUNCE_MS)]
        debounce_ms: u32,
        #[arg(long, default_value_t = c64_keymap::config::MENU_STEP_MS)]
        menu_step_ms: u32,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum TargetArg {
    Ascii,
    Vice2Bmc64,
    Vice3,
    Mister,
}

impl From<TargetArg> for Target {
    fn from(arg: TargetArg) -> Self {
        match arg {
            TargetArg::Ascii => Target::Ascii,
            TargetArg::Vice2Bmc64 => Target::Vice2Bmc64,
            TargetArg::Vice3 => Target::Vice3,
            TargetArg::Mister => Target::Mister,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new().filter_level(level).parse_default_env().init();

    match cli.command {
        Command::Table { target } => {
            let target = Target::from(target);
            let table = TranslationTable::build(target);
            println!("Target {} ({})", target.number(), target.name());
            for key in C64Key::all() {
                let pos = key.position();
                println!(
                    "r{}c{}  {:<10} {:<12} {}",
                    pos.row(),
                    pos.col(),
                    key.label(),
                    key.name(),
                    table.symbol(key)
                );
            }
        }
        Command::Layout { output } => {
            let html = layout::generate_html();
            match output {
                Some(path) => {
                    fs::write(&path, html).with_context(|| format!("writing {}", path.display()))?;
                    println!("Wrote {}", path.display());
                }
                None => print!("{}", html),
            }
        }
        Command::Simulate { script: path, target, debounce_ms, menu_step_ms } => {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("reading {}", path.display()))?;
            let steps = script::parse_script(&contents)
                .with_context(|| format!("parsing {}", path.display()))?;

            let options = simulate::Options {
                stored_target: Target::from(target).number(),
                timing: Timing { debounce_ms, menu_step_ms, ..Timing::default() },
            };
            let transcript = simulate::run(&steps, &options);

            for event in &transcript.events {
                let report: Vec<String> = event.report.iter().map(|b| format!("{:02X}", b)).collect();
                println!("{:>8} ms  {:<24} {}", event.at_ms, event.op.to_string(), report.join(" "));
            }
            let blinks: Vec<String> = transcript.blinks.iter().map(u8::to_string).collect();
            println!(
                "{} scan(s), target {} ({}), slot {} after {} EEPROM write(s), LED blinks [{}]",
                transcript.scans,
                transcript.target.number(),
                transcript.target.name(),
                transcript.stored_target,
                transcript.store_writes,
                blinks.join(", ")
            );
        }
    }

    Ok(())
}
