//! # Rulesets
//! A single interpreter runs both CHIP-8 and SUPER-CHIP programs; what differs is
//! a `Ruleset` chosen at construction and fixed for the life of the machine.
//!
//! - `instruction_set` decides which opcodes decode and which fonts are loaded
//! - `quirks` pick between historical interpretations of shared opcodes

/// Opcode table and font selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstructionSet {
    /// The base instruction set with the low-res font
    Chip8,
    /// Base plus scrolling, hires mode, big sprites, flag registers and the hires font
    SuperChip,
}

/// Behaviours where historical interpreters disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quirks {
    /// `8XY6`/`8XYE` copy Vy into Vx before shifting
    pub shift_uses_vy: bool,
    /// `BNNN` offsets by V0 rather than Vx
    pub jump_uses_v0: bool,
    /// `FX55`/`FX65` leave I pointing past the last register
    pub memory_increments_index: bool,
    /// `8XY1`/`8XY2`/`8XY3` zero VF
    pub logic_clears_vf: bool,
}

impl Quirks {
    /// COSMAC VIP behaviour
    pub const LEGACY: Quirks = Quirks {
        shift_uses_vy: true,
        jump_uses_v0: true,
        memory_increments_index: true,
        logic_clears_vf: true,
    };

    /// Later CHIP-8 interpreters
    pub const MODERN: Quirks = Quirks {
        shift_uses_vy: false,
        jump_uses_v0: false,
        memory_increments_index: false,
        logic_clears_vf: true,
    };

    /// SUPER-CHIP always runs with modern semantics and leaves VF alone on logic ops
    pub const SUPER_CHIP: Quirks = Quirks {
        logic_clears_vf: false,
        ..Quirks::MODERN
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ruleset {
    pub instruction_set: InstructionSet,
    pub quirks: Quirks,
}

impl Ruleset {
    /// The base instruction set
    ///
    /// # Arguments
    /// * `legacy` whether to reproduce the COSMAC VIP quirks
    pub fn chip8(legacy: bool) -> Self {
        Ruleset {
            instruction_set: InstructionSet::Chip8,
            quirks: if legacy {
                Quirks::LEGACY
            } else {
                Quirks::MODERN
            },
        }
    }

    /// The extended instruction set
    pub fn schip() -> Self {
        Ruleset {
            instruction_set: InstructionSet::SuperChip,
            quirks: Quirks::SUPER_CHIP,
        }
    }

    pub fn is_extended(&self) -> bool {
        self.instruction_set == InstructionSet::SuperChip
    }
}
