use std::io::Read;

use log::{debug, info, trace};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::constants::{FLAG_REGISTER_COUNT, MAX_ROM_SIZE, MEMORY_SIZE, PROGRAM_START, REGISTER_COUNT};
use crate::display::Display;
use crate::error::{DecodeError, LoadError};
use crate::input::Input;
use crate::instruction;
use crate::ruleset::Ruleset;
use crate::state::{KeyWait, State};

/// What the scheduler should do after a step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Keep executing
    Next,
    /// A sprite was drawn; the rest of the tick's budget is given up
    Drew,
    /// Held by `FX0A` until a key is pressed or released
    Waiting,
    /// The program asked to stop
    Exit,
}

/// # Chip-8
/// Chip-8 is a virtual machine and corresponding interpreted language.
///
/// Tracks:
///  - current `state`
///  - the `ruleset` it was built with
///  - the `display` it draws on and the `input` it polls
///  - a random number generator for `CXNN`
///
/// Supplies interfaces for:
/// - loading roms
/// - advancing the CPU one instruction at a time
/// - advancing its timers
/// - inspecting registers and timers, and reaching the display and input
pub struct Chip8<D, I> {
    pub(crate) state: State,
    pub(crate) ruleset: Ruleset,
    pub(crate) display: D,
    pub(crate) input: I,
    pub(crate) rng: StdRng,
}

impl<D: Display, I: Input> Chip8<D, I> {
    pub fn new(ruleset: Ruleset, display: D, input: I) -> Self {
        Self::with_rng(ruleset, display, input, StdRng::from_entropy())
    }

    /// A Chip8 whose `CXNN` results are reproducible
    pub fn with_seed(ruleset: Ruleset, display: D, input: I, seed: u64) -> Self {
        Self::with_rng(ruleset, display, input, StdRng::seed_from_u64(seed))
    }

    fn with_rng(ruleset: Ruleset, display: D, input: I, rng: StdRng) -> Self {
        Chip8 {
            state: State::new(ruleset.instruction_set),
            ruleset,
            display,
            input,
            rng,
        }
    }

    /// Copy a rom into memory at 0x200
    ///
    /// # Arguments
    /// * `rom` the raw program bytes
    pub fn load(&mut self, rom: &[u8]) -> Result<(), LoadError> {
        if rom.len() > MAX_ROM_SIZE {
            return Err(LoadError::TooLarge { size: rom.len() });
        }
        let start = PROGRAM_START as usize;
        self.state.memory[start..start + rom.len()].copy_from_slice(rom);
        info!("loaded {} byte ROM", rom.len());
        Ok(())
    }

    /// Load a rom from a source file
    ///
    /// # Arguments
    /// * `reader` a file reader that contains a ROM
    pub fn load_rom(&mut self, reader: &mut dyn Read) -> Result<(), LoadError> {
        let mut rom = Vec::with_capacity(MAX_ROM_SIZE);
        reader.read_to_end(&mut rom)?;
        self.load(&rom)
    }

    /// Advances the CPU by a single instruction
    /// - holds while a key stored by `FX0A` is still down
    /// - otherwise fetches, decodes and executes the opcode at the pc
    pub fn step(&mut self) -> Result<Flow, DecodeError> {
        if let KeyWait::AwaitingRelease { key } = self.state.key_wait {
            if self.input.is_key_down(key) {
                return Ok(Flow::Waiting);
            }
            debug!("key {:X} released", key);
            self.state.key_wait = KeyWait::Idle;
        }

        let pc = self.state.pc;
        let op = self.state.fetch();
        trace!(
            "{:04X} v{:02X?} i{:04X} pc{:04X}",
            op,
            self.state.v,
            self.state.i,
            pc
        );
        match instruction::from_op::<D, I>(op, self.ruleset.instruction_set) {
            Some(operation) => operation(self, op),
            None => Err(DecodeError::UnknownOpcode { opcode: op, pc }),
        }
    }

    /// Decrements both timers if they're nonzero
    pub fn tick_timers(&mut self) {
        self.state.delay_timer = self.state.delay_timer.saturating_sub(1);
        self.state.sound_timer = self.state.sound_timer.saturating_sub(1);
    }

    /// The beeper should sound while this is true
    pub fn sound_active(&self) -> bool {
        self.state.sound_timer > 0
    }

    pub fn is_waiting_for_key(&self) -> bool {
        self.state.key_wait != KeyWait::Idle
    }

    pub fn key_wait(&self) -> KeyWait {
        self.state.key_wait
    }

    pub fn registers(&self) -> &[u8; REGISTER_COUNT] {
        &self.state.v
    }

    pub fn flags(&self) -> [u8; FLAG_REGISTER_COUNT] {
        self.state.flags
    }

    pub fn index(&self) -> u16 {
        self.state.i
    }

    pub fn pc(&self) -> u16 {
        self.state.pc
    }

    pub fn delay_timer(&self) -> u8 {
        self.state.delay_timer
    }

    pub fn sound_timer(&self) -> u8 {
        self.state.sound_timer
    }

    pub fn memory(&self) -> &[u8; MEMORY_SIZE] {
        &self.state.memory
    }

    pub fn ruleset(&self) -> Ruleset {
        self.ruleset
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    pub fn input(&self) -> &I {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }

    /// Address of the instruction being executed
    pub(crate) fn current_pc(&self) -> u16 {
        self.state.pc.wrapping_sub(2) % MEMORY_SIZE as u16
    }

    /// Writes `op` at the pc and steps over it
    #[cfg(test)]
    pub(crate) fn exec(&mut self, op: u16) -> Result<Flow, DecodeError> {
        let [high, low] = op.to_be_bytes();
        let pc = self.state.pc;
        self.state.write(pc, high);
        self.state.write(pc.wrapping_add(1), low);
        self.step()
    }
}
