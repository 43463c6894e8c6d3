use crate::chip8::{Chip8, Flow};
use crate::display::Display;
use crate::error::DecodeError;
use crate::input::Input;
use crate::opcode::Opcode;
use crate::operations::*;
use crate::ruleset::InstructionSet::{self, SuperChip};

pub type Operation<D, I> = fn(&mut Chip8<D, I>, u16) -> Result<Flow, DecodeError>;

/// Selects the Operation for an Opcode under the given instruction set.
///
/// Returns None if the opcode isn't defined, including SUPER-CHIP opcodes under plain CHIP-8.
pub fn from_op<D: Display, I: Input>(
    op: u16,
    instruction_set: InstructionSet,
) -> Option<Operation<D, I>> {
    let operation: Operation<D, I> = match (op.nibbles(), instruction_set) {
        ((0x0, 0x0, 0xE, 0x0), _) => clr,
        ((0x0, 0x0, 0xE, 0xE), _) => rts,
        ((0x0, 0x0, 0xC, _), SuperChip) => scd,
        ((0x0, 0x0, 0xF, 0xB), SuperChip) => scr,
        ((0x0, 0x0, 0xF, 0xC), SuperChip) => scl,
        ((0x0, 0x0, 0xF, 0xD), SuperChip) => exit,
        ((0x0, 0x0, 0xF, 0xE), SuperChip) => lores,
        ((0x0, 0x0, 0xF, 0xF), SuperChip) => hires,
        ((0x1, ..), _) => jump,
        ((0x2, ..), _) => call,
        ((0x3, ..), _) => ske,
        ((0x4, ..), _) => skne,
        ((0x5, .., 0x0), _) => skre,
        ((0x6, ..), _) => load,
        ((0x7, ..), _) => add,
        ((0x8, .., 0x0), _) => mv,
        ((0x8, .., 0x1), _) => or,
        ((0x8, .., 0x2), _) => and,
        ((0x8, .., 0x3), _) => xor,
        ((0x8, .., 0x4), _) => addr,
        ((0x8, .., 0x5), _) => sub,
        ((0x8, .., 0x6), _) => shr,
        ((0x8, .., 0x7), _) => subn,
        ((0x8, .., 0xE), _) => shl,
        ((0x9, .., 0x0), _) => skrne,
        ((0xA, ..), _) => loadi,
        ((0xB, ..), _) => jumpi,
        ((0xC, ..), _) => rnd,
        ((0xD, ..), _) => draw,
        ((0xE, _, 0x9, 0xE), _) => skpr,
        ((0xE, _, 0xA, 0x1), _) => skup,
        ((0xF, _, 0x0, 0x7), _) => moved,
        ((0xF, _, 0x0, 0xA), _) => keyd,
        ((0xF, _, 0x1, 0x5), _) => loads,
        ((0xF, _, 0x1, 0x8), _) => ld,
        ((0xF, _, 0x1, 0xE), _) => addi,
        ((0xF, _, 0x2, 0x9), _) => ldspr,
        ((0xF, _, 0x3, 0x0), SuperChip) => ldhspr,
        ((0xF, _, 0x3, 0x3), _) => bcd,
        ((0xF, _, 0x5, 0x5), _) => stor,
        ((0xF, _, 0x6, 0x5), _) => read,
        ((0xF, _, 0x7, 0x5), SuperChip) => storf,
        ((0xF, _, 0x8, 0x5), SuperChip) => readf,
        _ => return None,
    };
    Some(operation)
}

#[cfg(test)]
mod test_instruction {
    use crate::chip8::{Chip8, Flow};
    use crate::display::{Display, FrameBuffer};
    use crate::error::DecodeError;
    use crate::font::FONT;
    use crate::input::Keypad;
    use crate::ruleset::{Quirks, Ruleset};

    type TestChip8 = Chip8<FrameBuffer, Keypad>;

    fn chip8() -> TestChip8 {
        with_ruleset(Ruleset::chip8(false))
    }

    fn legacy() -> TestChip8 {
        with_ruleset(Ruleset::chip8(true))
    }

    fn schip() -> TestChip8 {
        with_ruleset(Ruleset::schip())
    }

    fn with_ruleset(ruleset: Ruleset) -> TestChip8 {
        Chip8::with_seed(ruleset, FrameBuffer::new(), Keypad::new(), 0)
    }

    fn lit(chip8: &TestChip8, x: usize, y: usize) -> bool {
        chip8.display().pixel(x, y)
    }

    #[test]
    fn test_00e0_cls() {
        let mut chip8 = chip8();
        chip8.display_mut().draw_pixel(0, 0, true);
        chip8.exec(0x00E0).unwrap();
        assert!(!lit(&chip8, 0, 0));
        assert_eq!(chip8.pc(), 0x202);
    }

    #[test]
    fn test_00ee_ret() {
        let mut chip8 = chip8();
        chip8.exec(0x2ABC).unwrap();
        chip8.exec(0x00EE).unwrap();
        assert_eq!(chip8.pc(), 0x202);
    }

    #[test]
    fn test_00ee_ret_nested_is_lifo() {
        let mut chip8 = chip8();
        chip8.exec(0x2400).unwrap();
        chip8.exec(0x2600).unwrap();
        chip8.exec(0x00EE).unwrap();
        assert_eq!(chip8.pc(), 0x402);
        chip8.exec(0x00EE).unwrap();
        assert_eq!(chip8.pc(), 0x202);
    }

    #[test]
    fn test_00ee_ret_underflow_is_fatal() {
        let mut chip8 = chip8();
        assert_eq!(
            chip8.exec(0x00EE),
            Err(DecodeError::StackUnderflow {
                opcode: 0x00EE,
                pc: 0x200
            })
        );
    }

    #[test]
    fn test_1nnn_jp() {
        let mut chip8 = chip8();
        chip8.exec(0x1ABC).unwrap();
        assert_eq!(chip8.pc(), 0x0ABC);
    }

    #[test]
    fn test_2nnn_call() {
        let mut chip8 = chip8();
        chip8.exec(0x2ABC).unwrap();
        assert_eq!(chip8.pc(), 0x0ABC);
        assert_eq!(chip8.state.stack, vec![0x202]);
    }

    #[test]
    fn test_3xnn_se() {
        let mut chip8 = chip8();
        chip8.state.v[0x1] = 0x11;
        chip8.exec(0x3111).unwrap();
        assert_eq!(chip8.pc(), 0x204);
        chip8.exec(0x3112).unwrap();
        assert_eq!(chip8.pc(), 0x206);
    }

    #[test]
    fn test_4xnn_sne() {
        let mut chip8 = chip8();
        chip8.state.v[0x1] = 0x11;
        chip8.exec(0x4112).unwrap();
        assert_eq!(chip8.pc(), 0x204);
        chip8.exec(0x4111).unwrap();
        assert_eq!(chip8.pc(), 0x206);
    }

    #[test]
    fn test_5xy0_se() {
        let mut chip8 = chip8();
        chip8.state.v[0x1] = 0x11;
        chip8.state.v[0x2] = 0x11;
        chip8.exec(0x5120).unwrap();
        assert_eq!(chip8.pc(), 0x204);
        chip8.exec(0x5130).unwrap();
        assert_eq!(chip8.pc(), 0x206);
    }

    #[test]
    fn test_9xy0_sne() {
        let mut chip8 = chip8();
        chip8.state.v[0x1] = 0x11;
        chip8.exec(0x9120).unwrap();
        assert_eq!(chip8.pc(), 0x204);
        chip8.state.v[0x2] = 0x11;
        chip8.exec(0x9120).unwrap();
        assert_eq!(chip8.pc(), 0x206);
    }

    #[test]
    fn test_5xy1_is_undefined() {
        let mut chip8 = chip8();
        assert_eq!(
            chip8.exec(0x5121),
            Err(DecodeError::UnknownOpcode {
                opcode: 0x5121,
                pc: 0x200
            })
        );
    }

    #[test]
    fn test_6xnn_ld_every_register() {
        let mut chip8 = chip8();
        for x in 0..16u16 {
            chip8.exec(0x6000 | x << 8 | 0x42 + x).unwrap();
            assert_eq!(chip8.registers()[x as usize], 0x42 + x as u8);
        }
    }

    #[test]
    fn test_7xnn_add_wraps() {
        let mut chip8 = chip8();
        chip8.exec(0x7180).unwrap();
        chip8.exec(0x7190).unwrap();
        assert_eq!(chip8.registers()[0x1], 0x10);
        assert_eq!(chip8.registers()[0xF], 0x0);
    }

    #[test]
    fn test_8xy0_ld() {
        let mut chip8 = chip8();
        chip8.state.v[0x2] = 0x22;
        chip8.exec(0x8120).unwrap();
        assert_eq!(chip8.registers()[0x1], 0x22);
    }

    #[test]
    fn test_8xy1_or() {
        let mut chip8 = chip8();
        chip8.state.v[0x1] = 0b0101;
        chip8.state.v[0x2] = 0b0011;
        chip8.state.v[0xF] = 0x1;
        chip8.exec(0x8121).unwrap();
        assert_eq!(chip8.registers()[0x1], 0b0111);
        assert_eq!(chip8.registers()[0xF], 0x0);
    }

    #[test]
    fn test_8xy2_and() {
        let mut chip8 = chip8();
        chip8.state.v[0x1] = 0b0101;
        chip8.state.v[0x2] = 0b0011;
        chip8.exec(0x8122).unwrap();
        assert_eq!(chip8.registers()[0x1], 0b0001);
    }

    #[test]
    fn test_8xy3_xor() {
        let mut chip8 = chip8();
        chip8.state.v[0x1] = 0b0101;
        chip8.state.v[0x2] = 0b0011;
        chip8.exec(0x8123).unwrap();
        assert_eq!(chip8.registers()[0x1], 0b0110);
    }

    #[test]
    fn test_8xy3_xor_keeps_vf_on_schip() {
        let mut chip8 = schip();
        chip8.state.v[0xF] = 0x1;
        chip8.exec(0x8123).unwrap();
        assert_eq!(chip8.registers()[0xF], 0x1);
    }

    #[test]
    fn test_8xy4_add_carry_for_all_operands() {
        let mut chip8 = chip8();
        for a in 0..=255u8 {
            for b in 0..=255u8 {
                chip8.state.v[0x1] = a;
                chip8.state.v[0x2] = b;
                chip8.exec(0x8124).unwrap();
                assert_eq!(chip8.registers()[0x1], a.wrapping_add(b));
                assert_eq!(chip8.registers()[0xF], (u16::from(a) + u16::from(b) > 255) as u8);
                chip8.state.pc = 0x200;
            }
        }
    }

    #[test]
    fn test_8xy5_sub_borrow_for_all_operands() {
        let mut chip8 = chip8();
        for a in 0..=255u8 {
            for b in 0..=255u8 {
                chip8.state.v[0x1] = a;
                chip8.state.v[0x2] = b;
                chip8.exec(0x8125).unwrap();
                assert_eq!(chip8.registers()[0x1], a.wrapping_sub(b));
                assert_eq!(chip8.registers()[0xF], (a >= b) as u8);
                chip8.state.pc = 0x200;
            }
        }
    }

    #[test]
    fn test_8xy7_subn_borrow_for_all_operands() {
        let mut chip8 = chip8();
        for a in 0..=255u8 {
            for b in 0..=255u8 {
                chip8.state.v[0x1] = a;
                chip8.state.v[0x2] = b;
                chip8.exec(0x8127).unwrap();
                assert_eq!(chip8.registers()[0x1], b.wrapping_sub(a));
                assert_eq!(chip8.registers()[0xF], (b >= a) as u8);
                chip8.state.pc = 0x200;
            }
        }
    }

    #[test]
    fn test_8xyf_flag_wins_over_result() {
        let mut chip8 = chip8();
        chip8.state.v[0xF] = 0xFF;
        chip8.state.v[0x1] = 0x01;
        chip8.exec(0x8F14).unwrap();
        assert_eq!(chip8.registers()[0xF], 0x1);
    }

    #[test]
    fn test_8xy6_shr_in_place() {
        let mut chip8 = chip8();
        chip8.state.v[0x1] = 0b0000_0011;
        chip8.state.v[0x2] = 0b1000_0000;
        chip8.exec(0x8126).unwrap();
        assert_eq!(chip8.registers()[0x1], 0b0000_0001);
        assert_eq!(chip8.registers()[0xF], 0x1);
    }

    #[test]
    fn test_8xy6_shr_copies_vy_when_legacy() {
        let mut chip8 = legacy();
        chip8.state.v[0x1] = 0b0000_0011;
        chip8.state.v[0x2] = 0b1000_0000;
        chip8.exec(0x8126).unwrap();
        assert_eq!(chip8.registers()[0x1], 0b0100_0000);
        assert_eq!(chip8.registers()[0xF], 0x0);
    }

    #[test]
    fn test_8xye_shl_in_place() {
        let mut chip8 = chip8();
        chip8.state.v[0x1] = 0b1000_0001;
        chip8.state.v[0x2] = 0b0000_0001;
        chip8.exec(0x812E).unwrap();
        assert_eq!(chip8.registers()[0x1], 0b0000_0010);
        assert_eq!(chip8.registers()[0xF], 0x1);
    }

    #[test]
    fn test_8xye_shl_copies_vy_when_legacy() {
        let mut chip8 = legacy();
        chip8.state.v[0x1] = 0b1000_0001;
        chip8.state.v[0x2] = 0b0000_0001;
        chip8.exec(0x812E).unwrap();
        assert_eq!(chip8.registers()[0x1], 0b0000_0010);
        assert_eq!(chip8.registers()[0xF], 0x0);
    }

    #[test]
    fn test_annn_ld_i() {
        let mut chip8 = chip8();
        chip8.exec(0xAABC).unwrap();
        assert_eq!(chip8.index(), 0x0ABC);
    }

    #[test]
    fn test_bnnn_jp_v0_when_legacy() {
        let mut chip8 = legacy();
        chip8.state.v[0x0] = 0x02;
        chip8.state.v[0x1] = 0x34;
        chip8.exec(0xB123).unwrap();
        assert_eq!(chip8.pc(), 0x125);
    }

    #[test]
    fn test_bxnn_jp_vx_when_modern() {
        let mut chip8 = schip();
        chip8.state.v[0x0] = 0x02;
        chip8.state.v[0x1] = 0x34;
        chip8.exec(0xB123).unwrap();
        assert_eq!(chip8.pc(), 0x157);
    }

    #[test]
    fn test_cxnn_rnd_is_masked() {
        let mut chip8 = chip8();
        for _ in 0..64 {
            chip8.exec(0xC10F).unwrap();
            assert_eq!(chip8.registers()[0x1] & 0xF0, 0);
        }
        chip8.exec(0xC100).unwrap();
        assert_eq!(chip8.registers()[0x1], 0);
    }

    #[test]
    fn test_cxnn_rnd_is_deterministic_per_seed() {
        let mut a = chip8();
        let mut b = chip8();
        for _ in 0..16 {
            a.exec(0xC1FF).unwrap();
            b.exec(0xC1FF).unwrap();
            assert_eq!(a.registers()[0x1], b.registers()[0x1]);
        }
    }

    #[test]
    fn test_dxyn_draws_font_zero() {
        let mut chip8 = chip8();
        chip8.load(&[0xA0, 0x50, 0xD0, 0x15]).unwrap();
        assert_eq!(chip8.step(), Ok(Flow::Next));
        assert_eq!(chip8.step(), Ok(Flow::Drew));
        for (y, byte) in FONT[..5].iter().enumerate() {
            for x in 0..8 {
                assert_eq!(lit(&chip8, x, y), byte & (0x80 >> x) != 0);
            }
        }
        assert_eq!(chip8.registers()[0xF], 0x0);
    }

    #[test]
    fn test_dxyn_collision_erases() {
        let mut chip8 = chip8();
        chip8.state.i = 0x50;
        chip8.exec(0xD015).unwrap();
        chip8.exec(0xD015).unwrap();
        assert_eq!(chip8.registers()[0xF], 0x1);
        assert!(chip8.display().rows().all(|row| row.iter().all(|&p| !p)));
    }

    #[test]
    fn test_dxyn_clips_right_and_bottom() {
        let mut chip8 = chip8();
        chip8.state.i = 0x300;
        chip8.state.memory[0x300..0x304].copy_from_slice(&[0xFF; 4]);
        chip8.state.v[0x0] = 62;
        chip8.state.v[0x1] = 30;
        chip8.exec(0xD014).unwrap();
        assert!(lit(&chip8, 62, 30));
        assert!(lit(&chip8, 63, 31));
        assert!(!lit(&chip8, 0, 30));
        assert!(!lit(&chip8, 62, 0));
        assert!(!lit(&chip8, 0, 0));
    }

    #[test]
    fn test_dxyn_origin_wraps() {
        let mut chip8 = chip8();
        chip8.state.i = 0x50;
        chip8.state.v[0x0] = 64 + 2;
        chip8.state.v[0x1] = 32 + 1;
        chip8.exec(0xD011).unwrap();
        assert!(lit(&chip8, 2, 1));
    }

    #[test]
    fn test_dxy0_draws_large_sprite_on_schip() {
        let mut chip8 = schip();
        chip8.exec(0x00FF).unwrap();
        chip8.state.i = 0x300;
        chip8.state.memory[0x300..0x320].copy_from_slice(&[0xFF; 32]);
        chip8.state.v[0x0] = 120;
        chip8.state.v[0x1] = 56;
        chip8.exec(0xD010).unwrap();
        // columns wrap, rows clip
        assert!(lit(&chip8, 127, 56));
        assert!(lit(&chip8, 7, 63));
        assert!(!lit(&chip8, 8, 56));
        assert!(!lit(&chip8, 120, 0));
    }

    #[test]
    fn test_dxyn_clips_at_hires_edges() {
        let mut chip8 = schip();
        chip8.exec(0x00FF).unwrap();
        chip8.state.i = 0x300;
        chip8.state.memory[0x300..0x302].copy_from_slice(&[0xFF; 2]);
        chip8.state.v[0x0] = 124;
        chip8.state.v[0x1] = 63;
        chip8.exec(0xD012).unwrap();
        assert!(lit(&chip8, 124, 63));
        assert!(lit(&chip8, 127, 63));
        assert!(!lit(&chip8, 0, 63));
        assert!(!lit(&chip8, 124, 0));
        assert_eq!(chip8.registers()[0xF], 0x0);
    }

    #[test]
    fn test_dxy0_draws_nothing_on_chip8() {
        let mut chip8 = chip8();
        chip8.state.i = 0x50;
        assert_eq!(chip8.exec(0xD010), Ok(Flow::Drew));
        assert!(!lit(&chip8, 0, 0));
    }

    #[test]
    fn test_ex9e_skp() {
        let mut chip8 = chip8();
        chip8.state.v[0x1] = 0xA;
        chip8.exec(0xE19E).unwrap();
        assert_eq!(chip8.pc(), 0x202);
        chip8.input_mut().press(0xA);
        chip8.exec(0xE19E).unwrap();
        assert_eq!(chip8.pc(), 0x206);
    }

    #[test]
    fn test_exa1_sknp() {
        let mut chip8 = chip8();
        chip8.state.v[0x1] = 0xA;
        chip8.exec(0xE1A1).unwrap();
        assert_eq!(chip8.pc(), 0x204);
        chip8.input_mut().press(0xA);
        chip8.exec(0xE1A1).unwrap();
        assert_eq!(chip8.pc(), 0x206);
    }

    #[test]
    fn test_fx07_fx15_fx18_timers() {
        let mut chip8 = chip8();
        chip8.state.v[0x1] = 0x20;
        chip8.exec(0xF115).unwrap();
        chip8.exec(0xF118).unwrap();
        assert_eq!(chip8.delay_timer(), 0x20);
        assert_eq!(chip8.sound_timer(), 0x20);
        chip8.tick_timers();
        chip8.exec(0xF207).unwrap();
        assert_eq!(chip8.registers()[0x2], 0x1F);
    }

    #[test]
    fn test_fx1e_add_i() {
        let mut chip8 = chip8();
        chip8.state.i = 0x100;
        chip8.state.v[0x1] = 0x10;
        chip8.exec(0xF11E).unwrap();
        assert_eq!(chip8.index(), 0x110);
        assert_eq!(chip8.registers()[0xF], 0x0);
    }

    #[test]
    fn test_fx1e_add_i_overflow_sets_vf() {
        let mut chip8 = chip8();
        chip8.state.i = 0xFFF;
        chip8.state.v[0x1] = 0x02;
        chip8.exec(0xF11E).unwrap();
        assert_eq!(chip8.index(), 0x001);
        assert_eq!(chip8.registers()[0xF], 0x1);
    }

    #[test]
    fn test_fx29_ld_f() {
        let mut chip8 = chip8();
        chip8.state.v[0xF] = 0xF;
        chip8.exec(0xFF29).unwrap();
        assert_eq!(chip8.index(), 0x9B);
    }

    #[test]
    fn test_fx30_ld_hf() {
        let mut chip8 = schip();
        chip8.state.v[0x1] = 0xF;
        chip8.exec(0xF130).unwrap();
        assert_eq!(chip8.index(), 0x136);
    }

    #[test]
    fn test_fx30_masks_to_a_digit() {
        let mut chip8 = schip();
        chip8.state.v[0x1] = 0xFF;
        chip8.exec(0xF130).unwrap();
        assert_eq!(chip8.index(), 0x136);
    }

    #[test]
    fn test_fx30_is_undefined_on_chip8() {
        let mut chip8 = chip8();
        assert!(matches!(
            chip8.exec(0xF130),
            Err(DecodeError::UnknownOpcode { opcode: 0xF130, .. })
        ));
    }

    #[test]
    fn test_fx33_bcd() {
        let mut chip8 = chip8();
        chip8.state.i = 0x300;
        chip8.state.v[0x1] = 255;
        chip8.exec(0xF133).unwrap();
        assert_eq!(&chip8.state.memory[0x300..0x303], &[2, 5, 5]);
    }

    #[test]
    fn test_fx55_stor() {
        let mut chip8 = chip8();
        chip8.state.i = 0x300;
        chip8.state.v[..4].copy_from_slice(&[1, 2, 3, 4]);
        chip8.exec(0xF255).unwrap();
        assert_eq!(&chip8.state.memory[0x300..0x304], &[1, 2, 3, 0]);
        assert_eq!(chip8.index(), 0x300);
    }

    #[test]
    fn test_fx55_stor_legacy_index_wraps() {
        let mut chip8 = legacy();
        chip8.state.i = 0xFFE;
        chip8.exec(0xF355).unwrap();
        assert_eq!(chip8.index(), 0x002);

        chip8.state.v[0x0] = 0x0;
        chip8.state.v[0xF] = 0x0;
        chip8.exec(0xF01E).unwrap();
        assert_eq!(chip8.index(), 0x002);
        assert_eq!(chip8.registers()[0xF], 0x0);
    }

    #[test]
    fn test_fx55_stor_increments_i_when_legacy() {
        let mut chip8 = legacy();
        chip8.exec(0xF255).unwrap();
        assert_eq!(chip8.index(), 0x3);
    }

    #[test]
    fn test_fx65_read() {
        let mut chip8 = chip8();
        chip8.state.i = 0x300;
        chip8.state.memory[0x300..0x304].copy_from_slice(&[1, 2, 3, 4]);
        chip8.exec(0xF265).unwrap();
        assert_eq!(&chip8.registers()[..4], &[1, 2, 3, 0]);
        assert_eq!(chip8.index(), 0x300);
    }

    #[test]
    fn test_fx65_read_increments_i_when_legacy() {
        let mut chip8 = legacy();
        chip8.state.i = 0x300;
        chip8.exec(0xF365).unwrap();
        assert_eq!(chip8.index(), 0x304);
    }

    #[test]
    fn test_legacy_quirks_are_ruleset_driven() {
        let chip8 = legacy();
        assert_eq!(chip8.ruleset().quirks, Quirks::LEGACY);
    }

    #[test]
    fn test_00cn_scd() {
        let mut chip8 = schip();
        chip8.exec(0x00FF).unwrap();
        for y in 0..16 {
            chip8.display_mut().draw_pixel(0, y, true);
        }
        chip8.exec(0x00CF).unwrap();
        assert!(!lit(&chip8, 0, 14));
        assert!((15..31).all(|y| lit(&chip8, 0, y)));
        assert!(!lit(&chip8, 0, 31));
    }

    #[test]
    fn test_00cn_scd_lores_moves_half() {
        let mut chip8 = schip();
        for y in 0..5 {
            chip8.display_mut().draw_pixel(0, y, true);
        }
        chip8.exec(0x00C5).unwrap();
        assert!(!lit(&chip8, 0, 1));
        assert!((2..7).all(|y| lit(&chip8, 0, y)));
    }

    #[test]
    fn test_00fb_scr() {
        let mut chip8 = schip();
        chip8.exec(0x00FF).unwrap();
        chip8.display_mut().draw_pixel(0, 0, true);
        chip8.exec(0x00FB).unwrap();
        assert!(!lit(&chip8, 3, 0));
        assert!(lit(&chip8, 4, 0));

        chip8.exec(0x00FE).unwrap();
        chip8.display_mut().draw_pixel(0, 0, true);
        chip8.exec(0x00FB).unwrap();
        assert!(!lit(&chip8, 1, 0));
        assert!(lit(&chip8, 2, 0));
    }

    #[test]
    fn test_00fc_scl() {
        let mut chip8 = schip();
        chip8.exec(0x00FF).unwrap();
        chip8.display_mut().draw_pixel(4, 0, true);
        chip8.exec(0x00FC).unwrap();
        assert!(lit(&chip8, 0, 0));
        assert!(!lit(&chip8, 1, 0));

        chip8.exec(0x00FE).unwrap();
        chip8.display_mut().draw_pixel(2, 0, true);
        chip8.exec(0x00FC).unwrap();
        assert!(lit(&chip8, 0, 0));
        assert!(!lit(&chip8, 1, 0));
    }

    #[test]
    fn test_00fd_exit() {
        let mut chip8 = schip();
        assert_eq!(chip8.exec(0x00FD), Ok(Flow::Exit));
    }

    #[test]
    fn test_00fe_00ff_switch_resolution_and_clear() {
        let mut chip8 = schip();
        chip8.display_mut().draw_pixel(0, 0, true);
        chip8.exec(0x00FF).unwrap();
        assert_eq!(chip8.display().width(), 128);
        assert!(!lit(&chip8, 0, 0));
        chip8.exec(0x00FE).unwrap();
        assert_eq!(chip8.display().height(), 32);
    }

    #[test]
    fn test_schip_only_opcodes_are_undefined_on_chip8() {
        for op in [0x00C1, 0x00FB, 0x00FC, 0x00FD, 0x00FE, 0x00FF, 0xF075, 0xF085] {
            let mut chip8 = chip8();
            assert_eq!(
                chip8.exec(op),
                Err(DecodeError::UnknownOpcode { opcode: op, pc: 0x200 })
            );
        }
    }

    #[test]
    fn test_fx75_fx85_flags_round_trip() {
        let mut chip8 = schip();
        chip8.state.v[..8].copy_from_slice(&[1, 2, 3, 4, 5, 6, 7, 8]);
        chip8.exec(0xF775).unwrap();
        assert_eq!(chip8.flags(), [1, 2, 3, 4, 5, 6, 7, 8]);
        chip8.state.v = [0; 16];
        chip8.exec(0xF385).unwrap();
        assert_eq!(&chip8.registers()[..5], &[1, 2, 3, 4, 0]);
    }

    #[test]
    fn test_fx75_past_flag_registers_is_fatal() {
        let mut chip8 = schip();
        assert_eq!(
            chip8.exec(0xF875),
            Err(DecodeError::FlagRegisterOutOfRange {
                opcode: 0xF875,
                pc: 0x200,
                register: 8
            })
        );
        assert!(chip8.exec(0xFF85).is_err());
    }
}
