use std::path::PathBuf;

use clap::Parser;
use env_logger::Env;

use schip8::constants::INSTRUCTIONS_PER_SECOND;

mod keymap;
mod run;

/// Run a CHIP-8 or SUPER-CHIP ROM
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[arg(help = "Path to the ROM file to run")]
    pub rom: PathBuf,

    #[arg(short, long, help = "Run with the SUPER-CHIP instruction set")]
    pub schip: bool,

    #[arg(
        short,
        long,
        help = "Use the COSMAC VIP shift, jump and load/store behaviour (ignored with --schip)"
    )]
    pub legacy: bool,

    #[arg(short, long, default_value_t = INSTRUCTIONS_PER_SECOND, help = "Instructions per second")]
    pub ips: u32,

    #[arg(long, default_value_t = 10, help = "Window pixels per low resolution pixel")]
    pub scale: u32,

    #[arg(long, help = "Seed for the random number generator")]
    pub seed: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    run::run(args)
}
