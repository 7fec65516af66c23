use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use log::info;

use chip8_interpreter::chip::{
    chip8::{Chip8, Chip8Config, CHIP8_TICKS_PER_FRAME, CHIP8_WIDTH},
    Chip,
};

/// Runs a CHIP-8 program without a UI and prints the final screen.
#[derive(Parser, Debug)]
#[command(version)]
struct Args {
    /// Path to the program
    rom: PathBuf,

    /// Number of ticks (frames) to run
    #[arg(short, long, default_value_t = 600)]
    frames: usize,

    /// Instructions executed per tick
    #[arg(short, long, default_value_t = CHIP8_TICKS_PER_FRAME)]
    instructions_per_tick: usize,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = Args::parse();

    let mut chip8 = Chip8::with_config(Chip8Config {
        instructions_per_tick: args.instructions_per_tick,
    });
    let report = chip8.load_program(&args.rom)?;
    if report.truncated {
        eprintln!("warning: program truncated to {} bytes", report.bytes_loaded);
    }

    chip8.resume();
    for frame in 0..args.frames {
        chip8.tick();
        if chip8.last_fault().is_some() {
            info!("Stopped after {} frames", frame + 1);
            break;
        }
    }

    println!(
        "status: {:?}  pc: {:#05X}  i: {:#05X}  dt: {}  st: {}",
        chip8.status(),
        chip8.program_counter(),
        chip8.index(),
        chip8.delay_timer(),
        chip8.sound_timer()
    );
    if let Some(fault) = chip8.last_fault() {
        println!("fault: {}", fault);
    }

    for row in chip8.framebuffer().chunks(CHIP8_WIDTH) {
        let line: String = row.iter().map(|&on| if on { '#' } else { '.' }).collect();
        println!("{}", line);
    }
    Ok(())
}
