use crate::constants::{
    FLAG_REGISTER_COUNT, MEMORY_SIZE, PROGRAM_START, REGISTER_COUNT,
};
use crate::font::{FONT, FONT_ADDR, HIRES_FONT, HIRES_FONT_ADDR};
use crate::ruleset::InstructionSet;

/// Progress of a `FX0A` key wait
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyWait {
    Idle,
    /// `FX0A` re-executes until some key is down
    AwaitingKey { register: usize },
    /// The key has been stored; execution resumes once it goes up
    AwaitingRelease { key: u8 },
}

/// The machine state owned by the CPU
///
/// ## CPU
/// Registers
/// - (v) 16 primary 8-bit registers (V0..VF)
///     - the first 15 (V0..VE) are general purpose registers
///     - the 16th (VF) is the carry/borrow/collision flag
/// - (i) a 16-bit memory address register
/// - (flags) 8 SUPER-CHIP flag registers, only touched by `FX75`/`FX85`
///
/// Counter
/// - (pc) a 16-bit program counter starting at 0x200
///
/// Stack
/// - return addresses pushed by `2NNN` and popped by `00EE`; unbounded
///
/// Timers
/// - 2 8-bit timers (delay & sound), decremented once per tick while nonzero
///
/// ## Memory
/// - 4096 bytes of addressable memory
///     - 0x050..0x0A0 holds the low-res font
///     - 0x0A0..0x140 holds the high-res font (SUPER-CHIP only)
///     - ROMs are loaded from 0x200
/// - every address is reduced modulo 4096
#[derive(Clone)]
pub struct State {
    pub memory: [u8; MEMORY_SIZE],
    pub v: [u8; REGISTER_COUNT],
    pub i: u16,
    pub pc: u16,
    pub stack: Vec<u16>,
    pub delay_timer: u8,
    pub sound_timer: u8,
    pub flags: [u8; FLAG_REGISTER_COUNT],
    pub key_wait: KeyWait,
}

impl State {
    pub fn new(instruction_set: InstructionSet) -> Self {
        let mut memory = [0; MEMORY_SIZE];
        let font = FONT_ADDR as usize;
        memory[font..font + FONT.len()].copy_from_slice(&FONT);
        if instruction_set == InstructionSet::SuperChip {
            let hires_font = HIRES_FONT_ADDR as usize;
            memory[hires_font..hires_font + HIRES_FONT.len()].copy_from_slice(&HIRES_FONT);
        }

        State {
            memory,
            v: [0; REGISTER_COUNT],
            i: 0,
            pc: PROGRAM_START,
            stack: Vec::new(),
            delay_timer: 0,
            sound_timer: 0,
            flags: [0; FLAG_REGISTER_COUNT],
            key_wait: KeyWait::Idle,
        }
    }

    pub fn read(&self, addr: u16) -> u8 {
        self.memory[usize::from(addr) % MEMORY_SIZE]
    }

    pub fn write(&mut self, addr: u16, value: u8) {
        self.memory[usize::from(addr) % MEMORY_SIZE] = value;
    }

    /// Copies `len` bytes starting at `addr`, wrapping at the end of memory
    pub fn read_bytes(&self, addr: u16, len: usize) -> Vec<u8> {
        (0..len)
            .map(|offset| self.memory[(usize::from(addr) + offset) % MEMORY_SIZE])
            .collect()
    }

    /// Reads the big-endian opcode at the pc and moves past it
    pub fn fetch(&mut self) -> u16 {
        let op = u16::from_be_bytes([self.read(self.pc), self.read(self.pc.wrapping_add(1))]);
        self.pc = self.pc.wrapping_add(2) % MEMORY_SIZE as u16;
        op
    }

    /// Skips the instruction after the one being executed
    pub fn skip(&mut self) {
        self.pc = self.pc.wrapping_add(2) % MEMORY_SIZE as u16;
    }

    /// Points the pc back at the instruction being executed so it runs again
    pub fn rewind(&mut self) {
        self.pc = self.pc.wrapping_sub(2) % MEMORY_SIZE as u16;
    }

    pub fn jump_to(&mut self, addr: u16) {
        self.pc = addr & 0x0FFF;
    }
}
