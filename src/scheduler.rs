use std::ops::ControlFlow;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use log::{error, info};

use crate::chip8::{Chip8, Flow};
use crate::constants::{INSTRUCTIONS_PER_SECOND, TICK_RATE};
use crate::display::Display;
use crate::error::DecodeError;
use crate::input::Input;

/// How fast the machine runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    /// Ticks per second; timers decrement and the display presents once per tick
    pub tick_rate: u32,
    pub instructions_per_second: u32,
}

impl Timing {
    pub fn tick_duration(&self) -> Duration {
        Duration::from_secs(1) / self.tick_rate.max(1)
    }

    /// The most instructions a single tick may execute; always at least one
    pub fn instructions_per_tick(&self) -> u32 {
        self.instructions_per_second
            .div_ceil(self.tick_rate.max(1))
            .max(1)
    }
}

impl Default for Timing {
    fn default() -> Self {
        Timing {
            tick_rate: TICK_RATE,
            instructions_per_second: INSTRUCTIONS_PER_SECOND,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    Continue,
    Exit,
}

/// # Scheduler
/// Drives a Chip8 in real time.
///
/// Every tick:
/// - both timers are decremented once
/// - instructions execute until a sprite is drawn, a key wait holds the CPU, or the tick's
///   budget runs out
/// - the display is presented, including on the tick the program exits
pub struct Scheduler<D, I> {
    chip8: Chip8<D, I>,
    timing: Timing,
}

impl<D: Display, I: Input> Scheduler<D, I> {
    pub fn new(chip8: Chip8<D, I>, timing: Timing) -> Self {
        Scheduler { chip8, timing }
    }

    pub fn chip8(&self) -> &Chip8<D, I> {
        &self.chip8
    }

    pub fn chip8_mut(&mut self) -> &mut Chip8<D, I> {
        &mut self.chip8
    }

    pub fn into_inner(self) -> Chip8<D, I> {
        self.chip8
    }

    pub fn timing(&self) -> Timing {
        self.timing
    }

    /// Runs a single tick without waiting for its time slot
    pub fn tick(&mut self) -> Result<Tick, DecodeError> {
        self.chip8.tick_timers();
        for _ in 0..self.timing.instructions_per_tick() {
            match self.chip8.step()? {
                Flow::Next => continue,
                Flow::Drew | Flow::Waiting => break,
                Flow::Exit => {
                    self.chip8.display_mut().present();
                    return Ok(Tick::Exit);
                }
            }
        }
        self.chip8.display_mut().present();
        Ok(Tick::Continue)
    }

    /// Ticks at the configured rate until `stop` is set or the program exits
    pub fn run(&mut self, stop: &AtomicBool) -> Result<(), DecodeError> {
        self.run_with(|_| {
            if stop.load(Ordering::Relaxed) {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        })
    }

    /// Ticks at the configured rate until `poll` breaks or the program exits.
    ///
    /// `poll` runs before every tick and is where a frontend feeds input to the machine.
    pub fn run_with<F>(&mut self, mut poll: F) -> Result<(), DecodeError>
    where
        F: FnMut(&mut Chip8<D, I>) -> ControlFlow<()>,
    {
        let period = self.timing.tick_duration();
        info!(
            "running at {} Hz with up to {} instructions per tick",
            self.timing.tick_rate,
            self.timing.instructions_per_tick()
        );

        let mut deadline = Instant::now();
        loop {
            if poll(&mut self.chip8).is_break() {
                info!("stopped");
                return Ok(());
            }

            match self.tick() {
                Ok(Tick::Continue) => {}
                Ok(Tick::Exit) => {
                    info!("program exited");
                    return Ok(());
                }
                Err(e) => {
                    error!("{}", e);
                    return Err(e);
                }
            }

            deadline += period;
            let now = Instant::now();
            if deadline > now {
                thread::sleep(deadline - now);
            } else {
                // fell behind; don't try to catch up
                deadline = now;
            }
        }
    }
}
