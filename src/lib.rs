pub use chip8::{Chip8, Flow};
pub use display::{Display, FrameBuffer};
pub use error::{DecodeError, LoadError};
pub use input::{Input, Keypad};
pub use ruleset::{InstructionSet, Quirks, Ruleset};
pub use scheduler::{Scheduler, Tick, Timing};

mod chip8;
pub mod constants;
pub mod display;
mod error;
pub mod font;
pub mod input;
mod instruction;
mod opcode;
mod operations;
pub mod ruleset;
mod scheduler;
pub mod sprite;
pub mod state;
