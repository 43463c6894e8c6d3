use std::fs::File;
use std::io::BufReader;
use std::ops::ControlFlow;

use anyhow::{anyhow, Context};
use log::info;
use sdl2::event::Event;
use sdl2::keyboard::Keycode;

use schip8::constants::TICK_RATE;
use schip8::{Chip8, Keypad, Ruleset, Scheduler, Timing};
use schip8_display::{Beeper, SdlDisplay};

use crate::keymap::keymap;
use crate::Args;

pub fn run(args: Args) -> anyhow::Result<()> {
    // Get SDL2 context
    let sdl = sdl2::init().map_err(|e| anyhow!(e))?;
    let display = SdlDisplay::new(&sdl, args.scale).map_err(|e| anyhow!(e))?;
    let mut beeper = Beeper::new(&sdl).map_err(|e| anyhow!(e))?;
    let mut events = sdl.event_pump().map_err(|e| anyhow!(e))?;

    let ruleset = if args.schip {
        Ruleset::schip()
    } else {
        Ruleset::chip8(args.legacy)
    };
    let mut chip8 = match args.seed {
        Some(seed) => Chip8::with_seed(ruleset, display, Keypad::new(), seed),
        None => Chip8::new(ruleset, display, Keypad::new()),
    };

    // Load ROM
    let file = File::open(&args.rom)
        .with_context(|| format!("unable to open {}", args.rom.display()))?;
    chip8
        .load_rom(&mut BufReader::new(file))
        .with_context(|| format!("unable to load {}", args.rom.display()))?;
    info!("running {} as {:?}", args.rom.display(), ruleset.instruction_set);

    let timing = Timing {
        tick_rate: TICK_RATE,
        instructions_per_second: args.ips,
    };
    let mut scheduler = Scheduler::new(chip8, timing);
    let result = scheduler.run_with(|chip8| {
        // Handle input
        for event in events.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => return ControlFlow::Break(()),
                Event::KeyDown {
                    keycode: Some(key), ..
                } => {
                    if let Some(key) = keymap(key) {
                        chip8.input_mut().press(key);
                    }
                }
                Event::KeyUp {
                    keycode: Some(key), ..
                } => {
                    if let Some(key) = keymap(key) {
                        chip8.input_mut().release(key);
                    }
                }
                _ => continue,
            }
        }

        beeper.update(chip8.sound_active());
        ControlFlow::Continue(())
    });
    beeper.stop_beep();

    result.with_context(|| format!("{} crashed", args.rom.display()))
}
