//! アドレッシングモードの実装
//!
//! 6502のアドレッシングモードを定義し、実効アドレスを解決する

use super::{Cpu, MemoryBus};

/// アドレッシングモードの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressingMode {
    /// 即値（Immediate） - #$nn
    Immediate,
    /// ゼロページ - $nn
    ZeroPage,
    /// ゼロページ,X - $nn,X
    ZeroPageX,
    /// ゼロページ,Y - $nn,Y
    ZeroPageY,
    /// 絶対 - $nnnn
    Absolute,
    /// 絶対,X - $nnnn,X
    AbsoluteX,
    /// 絶対,Y - $nnnn,Y
    AbsoluteY,
    /// 間接 - ($nnnn)、JMP専用
    Indirect,
    /// 間接,X（プリインデックス） - ($nn,X)
    IndirectX,
    /// 間接,Y（ポストインデックス） - ($nn),Y
    IndirectY,
    /// 相対（ブランチ命令用） - $nn
    Relative,
    /// 暗黙的
    Implied,
    /// アキュムレータ
    Accumulator,
}

impl AddressingMode {
    /// オペコードに続くオペランドのバイト数
    pub fn operand_size(self) -> u16 {
        match self {
            AddressingMode::Implied | AddressingMode::Accumulator => 0,
            AddressingMode::Immediate
            | AddressingMode::ZeroPage
            | AddressingMode::ZeroPageX
            | AddressingMode::ZeroPageY
            | AddressingMode::IndirectX
            | AddressingMode::IndirectY
            | AddressingMode::Relative => 1,
            AddressingMode::Absolute
            | AddressingMode::AbsoluteX
            | AddressingMode::AbsoluteY
            | AddressingMode::Indirect => 2,
        }
    }
}

impl Cpu {
    //--------------------------------------------------
    // アドレッシングモードのヘルパー関数
    //--------------------------------------------------

    /// 実効アドレスを解決
    ///
    /// インデックス付きモードでページ境界を越えた読み取りアクセスは
    /// 追加1サイクル。書き込み（およびRMW）はテーブルの基本サイクルに
    /// ペナルティ込みなのでここでは加算しない。
    pub(super) fn operand_address<M: MemoryBus>(
        &mut self,
        memory: &mut M,
        mode: AddressingMode,
        write: bool,
    ) -> u16 {
        match mode {
            AddressingMode::ZeroPage => self.fetch_byte(memory) as u16,
            AddressingMode::ZeroPageX => {
                let base = self.fetch_byte(memory);
                base.wrapping_add(self.regs.x) as u16
            }
            AddressingMode::ZeroPageY => {
                let base = self.fetch_byte(memory);
                base.wrapping_add(self.regs.y) as u16
            }
            AddressingMode::Absolute => self.fetch_word(memory),
            AddressingMode::AbsoluteX => {
                let base = self.fetch_word(memory);
                let addr = base.wrapping_add(self.regs.x as u16);
                if !write && Self::page_crossed(base, addr) {
                    self.cycles += 1;
                }
                addr
            }
            AddressingMode::AbsoluteY => {
                let base = self.fetch_word(memory);
                let addr = base.wrapping_add(self.regs.y as u16);
                if !write && Self::page_crossed(base, addr) {
                    self.cycles += 1;
                }
                addr
            }
            AddressingMode::Indirect => {
                // JMP ($xxFF) のNMOSバグ: 上位バイトはページ内で折り返す
                let ptr = self.fetch_word(memory);
                let low = memory.read(ptr) as u16;
                let high_addr = (ptr & 0xFF00) | (ptr.wrapping_add(1) & 0x00FF);
                let high = memory.read(high_addr) as u16;
                (high << 8) | low
            }
            AddressingMode::IndirectX => {
                let base = self.fetch_byte(memory);
                let ptr = base.wrapping_add(self.regs.x);
                let low = memory.read(ptr as u16) as u16;
                let high = memory.read(ptr.wrapping_add(1) as u16) as u16;
                (high << 8) | low
            }
            AddressingMode::IndirectY => {
                let ptr = self.fetch_byte(memory);
                let low = memory.read(ptr as u16) as u16;
                let high = memory.read(ptr.wrapping_add(1) as u16) as u16;
                let base = (high << 8) | low;
                let addr = base.wrapping_add(self.regs.y as u16);
                if !write && Self::page_crossed(base, addr) {
                    self.cycles += 1;
                }
                addr
            }
            // Immediate/Relative/Implied/Accumulatorはここには来ない
            _ => unreachable!("mode {:?} has no effective address", mode),
        }
    }

    /// 読み取りオペランドを取得（即値またはメモリ）
    pub(super) fn load_operand<M: MemoryBus>(
        &mut self,
        memory: &mut M,
        mode: AddressingMode,
    ) -> u8 {
        if mode == AddressingMode::Immediate {
            self.fetch_byte(memory)
        } else {
            let addr = self.operand_address(memory, mode, false);
            memory.read(addr)
        }
    }

    /// オペランドを読み飛ばす（NOP/不正オペコード用、メモリアクセスなし）
    pub(super) fn skip_operand(&mut self, mode: AddressingMode) {
        self.regs.pc = self.regs.pc.wrapping_add(mode.operand_size());
    }

    /// ブランチを実行（共通ロジック）
    ///
    /// 不成立2サイクル、成立+1、成立かつページ跨ぎでさらに+1
    pub(super) fn branch<M: MemoryBus>(&mut self, memory: &mut M, condition: bool) {
        let offset = self.fetch_byte(memory) as i8;
        if condition {
            let old_pc = self.regs.pc;
            self.regs.pc = self.regs.pc.wrapping_add(offset as u16);
            self.cycles += 1;
            if Self::page_crossed(old_pc, self.regs.pc) {
                self.cycles += 1;
            }
        }
    }

    #[inline]
    pub(super) fn page_crossed(a: u16, b: u16) -> bool {
        (a & 0xFF00) != (b & 0xFF00)
    }
}
