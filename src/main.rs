use std::{
    cell::Cell,
    path::PathBuf,
    rc::Rc,
    time::{Duration, Instant},
};

use anyhow::{anyhow, Context};
use clap::Parser;

use chip8_vm::{
    window::{scale_from_factor, Screen},
    Emulator, CPU_FREQUENCY,
};

#[derive(Parser, Debug)]
#[command(version, about = "Run a CHIP-8 program in a window")]
struct Args {
    /// Path to the ROM file
    rom: PathBuf,

    /// Window scale factor: 1, 2, 4, 8, 16 or 32
    #[arg(short, long, default_value_t = 16)]
    scale: u32,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let scale = scale_from_factor(args.scale)
        .ok_or_else(|| anyhow!("unsupported scale factor {}", args.scale))?;

    // the window writes the held keys here once per frame, the machine
    // reads them whenever an instruction asks
    let keys = Rc::new(Cell::new(0u16));
    let keypad = {
        let keys = keys.clone();
        move || keys.get()
    };

    let mut emu = Emulator::init(keypad);
    emu.load_from_file(&args.rom)
        .with_context(|| format!("failed to load {}", args.rom.display()))?;

    let title = args
        .rom
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "chip8-vm".to_string());
    let mut screen = Screen::new(&title, scale).context("failed to open window")?;

    let tick_len = Duration::from_secs_f64(1.0 / CPU_FREQUENCY);
    let mut last = Instant::now();
    let mut pending = Duration::ZERO;

    'run: while screen.is_open() {
        keys.set(screen.pressed_keys());

        let now = Instant::now();
        pending += now - last;
        last = now;

        while pending >= tick_len {
            if emu.tick().is_none() {
                log::info!("program ended at {:03x}", emu.pc.0);
                break 'run;
            }
            pending -= tick_len;
        }

        if emu.should_play_tone() {
            log::debug!("beep (sound timer {})", emu.sound_timer.count);
        }
        screen.update(&emu.fb).context("failed to present frame")?;
    }

    Ok(())
}
