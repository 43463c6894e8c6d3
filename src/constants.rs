/// Bytes of addressable memory
pub const MEMORY_SIZE: usize = 4096;

/// ROMs are loaded here; everything below is reserved for the interpreter
pub const PROGRAM_START: u16 = 0x200;

/// Largest ROM that fits between `PROGRAM_START` and the end of memory
pub const MAX_ROM_SIZE: usize = MEMORY_SIZE - PROGRAM_START as usize;

/// Number of general purpose registers (V0..VF)
pub const REGISTER_COUNT: usize = 16;

/// Number of persistent SUPER-CHIP flag registers
pub const FLAG_REGISTER_COUNT: usize = 8;

/// Number of keys on the hexadecimal keypad
pub const KEY_COUNT: usize = 16;

pub const LORES_WIDTH: usize = 64;
pub const LORES_HEIGHT: usize = 32;
pub const HIRES_WIDTH: usize = 128;
pub const HIRES_HEIGHT: usize = 64;

/// Columns moved by the SUPER-CHIP horizontal scroll instructions
pub const SCROLL_COLUMNS: usize = 4;

/// Timers are decremented and the display is presented at this rate (Hz)
pub const TICK_RATE: u32 = 60;

/// Default instruction throughput
pub const INSTRUCTIONS_PER_SECOND: u32 = 1000;
