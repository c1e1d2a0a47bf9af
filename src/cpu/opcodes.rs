//! オペコードテーブル
//!
//! 全256エントリを (ニーモニック, アドレッシングモード, 基本サイクル) の
//! レコードで持つ。インデックス付き読み取りのページ跨ぎペナルティは
//! アドレス解決側で加算するため、基本サイクルには含めない。
//! ストアとRMWはペナルティ込みの基本サイクル。

use super::addressing::AddressingMode;

/// 命令ニーモニック
///
/// `Ill` は文書化されていないオペコードのうちNOPとして扱わないもの。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mnemonic {
    Adc, And, Asl, Bcc, Bcs, Beq, Bit, Bmi, Bne, Bpl, Brk, Bvc, Bvs,
    Clc, Cld, Cli, Clv, Cmp, Cpx, Cpy, Dec, Dex, Dey, Eor, Inc, Inx,
    Iny, Jmp, Jsr, Lda, Ldx, Ldy, Lsr, Nop, Ora, Pha, Php, Pla, Plp,
    Rol, Ror, Rti, Rts, Sbc, Sec, Sed, Sei, Sta, Stx, Sty, Tax, Tay,
    Tsx, Txa, Txs, Tya, Ill,
}

/// オペコードテーブルのエントリ
#[derive(Debug, Clone, Copy)]
pub struct Opcode {
    pub mnemonic: Mnemonic,
    pub mode: AddressingMode,
    pub cycles: u32,
}

const fn op(mnemonic: Mnemonic, mode: AddressingMode, cycles: u32) -> Opcode {
    Opcode {
        mnemonic,
        mode,
        cycles,
    }
}

/// 256エントリのディスパッチテーブル
pub static OPCODES: [Opcode; 256] = build_table();

const fn build_table() -> [Opcode; 256] {
    use AddressingMode::*;
    use Mnemonic::*;

    // 未定義オペコードは1バイト2サイクルのNOP相当として初期化
    let mut t = [op(Ill, Implied, 2); 256];

    // LDA - Load Accumulator
    t[0xA9] = op(Lda, Immediate, 2);
    t[0xA5] = op(Lda, ZeroPage, 3);
    t[0xB5] = op(Lda, ZeroPageX, 4);
    t[0xAD] = op(Lda, Absolute, 4);
    t[0xBD] = op(Lda, AbsoluteX, 4);
    t[0xB9] = op(Lda, AbsoluteY, 4);
    t[0xA1] = op(Lda, IndirectX, 6);
    t[0xB1] = op(Lda, IndirectY, 5);

    // LDX - Load X Register
    t[0xA2] = op(Ldx, Immediate, 2);
    t[0xA6] = op(Ldx, ZeroPage, 3);
    t[0xB6] = op(Ldx, ZeroPageY, 4);
    t[0xAE] = op(Ldx, Absolute, 4);
    t[0xBE] = op(Ldx, AbsoluteY, 4);

    // LDY - Load Y Register
    t[0xA0] = op(Ldy, Immediate, 2);
    t[0xA4] = op(Ldy, ZeroPage, 3);
    t[0xB4] = op(Ldy, ZeroPageX, 4);
    t[0xAC] = op(Ldy, Absolute, 4);
    t[0xBC] = op(Ldy, AbsoluteX, 4);

    // STA - Store Accumulator
    t[0x85] = op(Sta, ZeroPage, 3);
    t[0x95] = op(Sta, ZeroPageX, 4);
    t[0x8D] = op(Sta, Absolute, 4);
    t[0x9D] = op(Sta, AbsoluteX, 5);
    t[0x99] = op(Sta, AbsoluteY, 5);
    t[0x81] = op(Sta, IndirectX, 6);
    t[0x91] = op(Sta, IndirectY, 6);

    // STX / STY
    t[0x86] = op(Stx, ZeroPage, 3);
    t[0x96] = op(Stx, ZeroPageY, 4);
    t[0x8E] = op(Stx, Absolute, 4);
    t[0x84] = op(Sty, ZeroPage, 3);
    t[0x94] = op(Sty, ZeroPageX, 4);
    t[0x8C] = op(Sty, Absolute, 4);

    // Transfer
    t[0xAA] = op(Tax, Implied, 2);
    t[0x8A] = op(Txa, Implied, 2);
    t[0xA8] = op(Tay, Implied, 2);
    t[0x98] = op(Tya, Implied, 2);
    t[0xBA] = op(Tsx, Implied, 2);
    t[0x9A] = op(Txs, Implied, 2);

    // Stack
    t[0x48] = op(Pha, Implied, 3);
    t[0x68] = op(Pla, Implied, 4);
    t[0x08] = op(Php, Implied, 3);
    t[0x28] = op(Plp, Implied, 4);

    // ADC - Add with Carry
    t[0x69] = op(Adc, Immediate, 2);
    t[0x65] = op(Adc, ZeroPage, 3);
    t[0x75] = op(Adc, ZeroPageX, 4);
    t[0x6D] = op(Adc, Absolute, 4);
    t[0x7D] = op(Adc, AbsoluteX, 4);
    t[0x79] = op(Adc, AbsoluteY, 4);
    t[0x61] = op(Adc, IndirectX, 6);
    t[0x71] = op(Adc, IndirectY, 5);

    // SBC - Subtract with Carry
    t[0xE9] = op(Sbc, Immediate, 2);
    t[0xE5] = op(Sbc, ZeroPage, 3);
    t[0xF5] = op(Sbc, ZeroPageX, 4);
    t[0xED] = op(Sbc, Absolute, 4);
    t[0xFD] = op(Sbc, AbsoluteX, 4);
    t[0xF9] = op(Sbc, AbsoluteY, 4);
    t[0xE1] = op(Sbc, IndirectX, 6);
    t[0xF1] = op(Sbc, IndirectY, 5);

    // Compare
    t[0xC9] = op(Cmp, Immediate, 2);
    t[0xC5] = op(Cmp, ZeroPage, 3);
    t[0xD5] = op(Cmp, ZeroPageX, 4);
    t[0xCD] = op(Cmp, Absolute, 4);
    t[0xDD] = op(Cmp, AbsoluteX, 4);
    t[0xD9] = op(Cmp, AbsoluteY, 4);
    t[0xC1] = op(Cmp, IndirectX, 6);
    t[0xD1] = op(Cmp, IndirectY, 5);
    t[0xE0] = op(Cpx, Immediate, 2);
    t[0xE4] = op(Cpx, ZeroPage, 3);
    t[0xEC] = op(Cpx, Absolute, 4);
    t[0xC0] = op(Cpy, Immediate, 2);
    t[0xC4] = op(Cpy, ZeroPage, 3);
    t[0xCC] = op(Cpy, Absolute, 4);

    // Increment / Decrement
    t[0xE6] = op(Inc, ZeroPage, 5);
    t[0xF6] = op(Inc, ZeroPageX, 6);
    t[0xEE] = op(Inc, Absolute, 6);
    t[0xFE] = op(Inc, AbsoluteX, 7);
    t[0xC6] = op(Dec, ZeroPage, 5);
    t[0xD6] = op(Dec, ZeroPageX, 6);
    t[0xCE] = op(Dec, Absolute, 6);
    t[0xDE] = op(Dec, AbsoluteX, 7);
    t[0xE8] = op(Inx, Implied, 2);
    t[0xC8] = op(Iny, Implied, 2);
    t[0xCA] = op(Dex, Implied, 2);
    t[0x88] = op(Dey, Implied, 2);

    // Logical - AND / ORA / EOR
    t[0x29] = op(And, Immediate, 2);
    t[0x25] = op(And, ZeroPage, 3);
    t[0x35] = op(And, ZeroPageX, 4);
    t[0x2D] = op(And, Absolute, 4);
    t[0x3D] = op(And, AbsoluteX, 4);
    t[0x39] = op(And, AbsoluteY, 4);
    t[0x21] = op(And, IndirectX, 6);
    t[0x31] = op(And, IndirectY, 5);
    t[0x09] = op(Ora, Immediate, 2);
    t[0x05] = op(Ora, ZeroPage, 3);
    t[0x15] = op(Ora, ZeroPageX, 4);
    t[0x0D] = op(Ora, Absolute, 4);
    t[0x1D] = op(Ora, AbsoluteX, 4);
    t[0x19] = op(Ora, AbsoluteY, 4);
    t[0x01] = op(Ora, IndirectX, 6);
    t[0x11] = op(Ora, IndirectY, 5);
    t[0x49] = op(Eor, Immediate, 2);
    t[0x45] = op(Eor, ZeroPage, 3);
    t[0x55] = op(Eor, ZeroPageX, 4);
    t[0x4D] = op(Eor, Absolute, 4);
    t[0x5D] = op(Eor, AbsoluteX, 4);
    t[0x59] = op(Eor, AbsoluteY, 4);
    t[0x41] = op(Eor, IndirectX, 6);
    t[0x51] = op(Eor, IndirectY, 5);

    // Shifts / Rotates
    t[0x0A] = op(Asl, Accumulator, 2);
    t[0x06] = op(Asl, ZeroPage, 5);
    t[0x16] = op(Asl, ZeroPageX, 6);
    t[0x0E] = op(Asl, Absolute, 6);
    t[0x1E] = op(Asl, AbsoluteX, 7);
    t[0x4A] = op(Lsr, Accumulator, 2);
    t[0x46] = op(Lsr, ZeroPage, 5);
    t[0x56] = op(Lsr, ZeroPageX, 6);
    t[0x4E] = op(Lsr, Absolute, 6);
    t[0x5E] = op(Lsr, AbsoluteX, 7);
    t[0x2A] = op(Rol, Accumulator, 2);
    t[0x26] = op(Rol, ZeroPage, 5);
    t[0x36] = op(Rol, ZeroPageX, 6);
    t[0x2E] = op(Rol, Absolute, 6);
    t[0x3E] = op(Rol, AbsoluteX, 7);
    t[0x6A] = op(Ror, Accumulator, 2);
    t[0x66] = op(Ror, ZeroPage, 5);
    t[0x76] = op(Ror, ZeroPageX, 6);
    t[0x6E] = op(Ror, Absolute, 6);
    t[0x7E] = op(Ror, AbsoluteX, 7);

    // BIT test
    t[0x24] = op(Bit, ZeroPage, 3);
    t[0x2C] = op(Bit, Absolute, 4);

    // Branches
    t[0x10] = op(Bpl, Relative, 2);
    t[0x30] = op(Bmi, Relative, 2);
    t[0x50] = op(Bvc, Relative, 2);
    t[0x70] = op(Bvs, Relative, 2);
    t[0x90] = op(Bcc, Relative, 2);
    t[0xB0] = op(Bcs, Relative, 2);
    t[0xD0] = op(Bne, Relative, 2);
    t[0xF0] = op(Beq, Relative, 2);

    // Jump / Call
    t[0x4C] = op(Jmp, Absolute, 3);
    t[0x6C] = op(Jmp, Indirect, 5);
    t[0x20] = op(Jsr, Absolute, 6);
    t[0x60] = op(Rts, Implied, 6);

    // Interrupts
    t[0x00] = op(Brk, Implied, 7);
    t[0x40] = op(Rti, Implied, 6);

    // Flag operations
    t[0x18] = op(Clc, Implied, 2);
    t[0x38] = op(Sec, Implied, 2);
    t[0x58] = op(Cli, Implied, 2);
    t[0x78] = op(Sei, Implied, 2);
    t[0xB8] = op(Clv, Implied, 2);
    t[0xD8] = op(Cld, Implied, 2);
    t[0xF8] = op(Sed, Implied, 2);

    // NOP
    t[0xEA] = op(Nop, Implied, 2);

    // 文書化されていないNOPファミリ（オペランドサイズだけ消費する）
    t[0x1A] = op(Nop, Implied, 2);
    t[0x3A] = op(Nop, Implied, 2);
    t[0x5A] = op(Nop, Implied, 2);
    t[0x7A] = op(Nop, Implied, 2);
    t[0xDA] = op(Nop, Implied, 2);
    t[0xFA] = op(Nop, Implied, 2);
    t[0x80] = op(Nop, Immediate, 2);
    t[0x82] = op(Nop, Immediate, 2);
    t[0x89] = op(Nop, Immediate, 2);
    t[0xC2] = op(Nop, Immediate, 2);
    t[0xE2] = op(Nop, Immediate, 2);
    t[0x04] = op(Nop, ZeroPage, 3);
    t[0x44] = op(Nop, ZeroPage, 3);
    t[0x64] = op(Nop, ZeroPage, 3);
    t[0x14] = op(Nop, ZeroPageX, 4);
    t[0x34] = op(Nop, ZeroPageX, 4);
    t[0x54] = op(Nop, ZeroPageX, 4);
    t[0x74] = op(Nop, ZeroPageX, 4);
    t[0xD4] = op(Nop, ZeroPageX, 4);
    t[0xF4] = op(Nop, ZeroPageX, 4);
    t[0x0C] = op(Nop, Absolute, 4);
    t[0x1C] = op(Nop, AbsoluteX, 4);
    t[0x3C] = op(Nop, AbsoluteX, 4);
    t[0x5C] = op(Nop, AbsoluteX, 4);
    t[0x7C] = op(Nop, AbsoluteX, 4);
    t[0xDC] = op(Nop, AbsoluteX, 4);
    t[0xFC] = op(Nop, AbsoluteX, 4);

    t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_documented_opcodes_present() {
        // 文書化された151命令が全てIll以外になっていること
        let documented: [u8; 151] = [
            0x69, 0x65, 0x75, 0x6D, 0x7D, 0x79, 0x61, 0x71, 0x29, 0x25, 0x35, 0x2D, 0x3D, 0x39,
            0x21, 0x31, 0x0A, 0x06, 0x16, 0x0E, 0x1E, 0x90, 0xB0, 0xF0, 0x24, 0x2C, 0x30, 0xD0,
            0x10, 0x00, 0x50, 0x70, 0x18, 0xD8, 0x58, 0xB8, 0xC9, 0xC5, 0xD5, 0xCD, 0xDD, 0xD9,
            0xC1, 0xD1, 0xE0, 0xE4, 0xEC, 0xC0, 0xC4, 0xCC, 0xC6, 0xD6, 0xCE, 0xDE, 0xCA, 0x88,
            0x49, 0x45, 0x55, 0x4D, 0x5D, 0x59, 0x41, 0x51, 0xE6, 0xF6, 0xEE, 0xFE, 0xE8, 0xC8,
            0x4C, 0x6C, 0x20, 0xA9, 0xA5, 0xB5, 0xAD, 0xBD, 0xB9, 0xA1, 0xB1, 0xA2, 0xA6, 0xB6,
            0xAE, 0xBE, 0xA0, 0xA4, 0xB4, 0xAC, 0xBC, 0x4A, 0x46, 0x56, 0x4E, 0x5E, 0xEA, 0x09,
            0x05, 0x15, 0x0D, 0x1D, 0x19, 0x01, 0x11, 0x48, 0x08, 0x68, 0x28, 0x2A, 0x26, 0x36,
            0x2E, 0x3E, 0x6A, 0x66, 0x76, 0x6E, 0x7E, 0x40, 0x60, 0xE9, 0xE5, 0xF5, 0xED, 0xFD,
            0xF9, 0xE1, 0xF1, 0x38, 0xF8, 0x78, 0x85, 0x95, 0x8D, 0x9D, 0x99, 0x81, 0x91, 0x86,
            0x96, 0x8E, 0x84, 0x94, 0x8C, 0xAA, 0xA8, 0xBA, 0x8A, 0x9A, 0x98,
        ];
        assert_eq!(documented.len(), 151);
        for &opc in &documented {
            assert_ne!(
                OPCODES[opc as usize].mnemonic,
                Mnemonic::Ill,
                "opcode ${:02X} missing",
                opc
            );
        }
    }

    #[test]
    fn test_store_base_cycles_include_index_penalty() {
        assert_eq!(OPCODES[0x9D].cycles, 5); // STA abs,X
        assert_eq!(OPCODES[0x99].cycles, 5); // STA abs,Y
        assert_eq!(OPCODES[0x91].cycles, 6); // STA (zp),Y
        assert_eq!(OPCODES[0xBD].cycles, 4); // LDA abs,X はペナルティ別枠
    }
}
