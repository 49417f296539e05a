use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use chip8_vm::{Disassembler, Memory};

#[derive(Parser, Debug)]
#[command(version, about = "Print the instructions of a CHIP-8 program")]
struct Args {
    /// Path to the ROM file
    rom: PathBuf,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let mut mem = Memory::new();
    mem.load_rom_by_file(&args.rom)
        .with_context(|| format!("failed to load {}", args.rom.display()))?;

    println!("ROM loaded (program length: {})", mem.program_len());
    for (addr, ins) in Disassembler::new(&mem) {
        println!("{addr:#x}\t{ins}");
    }

    Ok(())
}
