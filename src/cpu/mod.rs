//! MOS 6502 CPU エミュレータ
//!
//! Apple IIeで使用されるNMOS 6502プロセッサのエミュレーション実装。
//! デコードは256エントリのオペコードテーブル経由で、命令実行は
//! ニーモニックに対する網羅的matchで行う。

pub mod addressing;
pub mod opcodes;

use addressing::AddressingMode;
use opcodes::{Mnemonic, Opcode, OPCODES};

use crate::snapshot::CpuSnapshot;

/// CPUのステータスレジスタのフラグビット
pub mod flags {
    pub const CARRY: u8 = 0b0000_0001; // C: キャリーフラグ
    pub const ZERO: u8 = 0b0000_0010; // Z: ゼロフラグ
    pub const IRQ_DISABLE: u8 = 0b0000_0100; // I: 割り込み禁止フラグ
    pub const DECIMAL: u8 = 0b0000_1000; // D: BCDモードフラグ
    pub const BREAK: u8 = 0b0001_0000; // B: ブレークフラグ（スタック上のみ）
    pub const UNUSED: u8 = 0b0010_0000; // 未使用（常に1）
    pub const OVERFLOW: u8 = 0b0100_0000; // V: オーバーフローフラグ
    pub const NEGATIVE: u8 = 0b1000_0000; // N: 負数フラグ
}

/// NMIベクター
pub const NMI_VECTOR: u16 = 0xFFFA;
/// リセットベクター
pub const RESET_VECTOR: u16 = 0xFFFC;
/// IRQ/BRKベクター
pub const IRQ_VECTOR: u16 = 0xFFFE;

/// CPUレジスタの状態
#[derive(Debug, Clone)]
pub struct Registers {
    /// アキュムレータ（A）
    pub a: u8,
    /// Xインデックスレジスタ
    pub x: u8,
    /// Yインデックスレジスタ
    pub y: u8,
    /// スタックポインタ（スタックは$0100+sp）
    pub sp: u8,
    /// プログラムカウンタ
    pub pc: u16,
    /// ステータスレジスタ（プロセッサフラグ）
    pub status: u8,
}

impl Default for Registers {
    fn default() -> Self {
        Registers {
            a: 0,
            x: 0,
            y: 0,
            sp: 0xFD, // スタックは$01FDから開始
            pc: 0,
            status: flags::UNUSED | flags::IRQ_DISABLE,
        }
    }
}

impl Registers {
    /// フラグをセット
    pub fn set_flag(&mut self, flag: u8, value: bool) {
        if value {
            self.status |= flag;
        } else {
            self.status &= !flag;
        }
    }

    /// フラグを取得
    pub fn get_flag(&self, flag: u8) -> bool {
        (self.status & flag) != 0
    }

    /// ゼロフラグと負数フラグを値に基づいて更新
    pub fn update_zero_negative_flags(&mut self, value: u8) {
        self.set_flag(flags::ZERO, value == 0);
        self.set_flag(flags::NEGATIVE, (value & 0x80) != 0);
    }
}

/// メモリバスインターフェース
/// CPUがメモリにアクセスするために必要なトレイト
pub trait MemoryBus {
    /// メモリから1バイト読み取り
    fn read(&mut self, address: u16) -> u8;
    /// メモリに1バイト書き込み
    fn write(&mut self, address: u16, value: u8);
}

/// 6502 CPUエミュレータ
///
/// 自前のメモリは持たず、全てのロード/ストアはバス経由。
/// 1命令実行するごとに消費サイクル数を返す。
#[derive(Debug, Clone, Default)]
pub struct Cpu {
    /// CPUレジスタ
    pub regs: Registers,
    /// 累積サイクル数（単調増加）
    pub total_cycles: u64,
    /// 現在の命令で消費したサイクル
    cycles: u32,
    /// リセットベクターのフェッチが済んだか
    pub initialized: bool,
}

impl Cpu {
    /// 新しいCPUインスタンスを作成
    pub fn new() -> Self {
        Cpu {
            regs: Registers::default(),
            total_cycles: 0,
            cycles: 0,
            initialized: false,
        }
    }

    /// CPUをリセット
    ///
    /// リセットベクター（$FFFC-$FFFD）からPCを読み込み、
    /// SP=$FD、A=X=Y=0、P=$24（IとUNUSED）に初期化する。
    pub fn reset<M: MemoryBus>(&mut self, memory: &mut M) {
        self.regs = Registers::default();
        let low = memory.read(RESET_VECTOR) as u16;
        let high = memory.read(RESET_VECTOR + 1) as u16;
        self.regs.pc = (high << 8) | low;
        self.total_cycles += 7; // リセットには7サイクル必要
        self.initialized = true;
    }

    /// IRQ（マスカブル割り込み）を通知
    ///
    /// Iフラグが立っていれば無視される。受理時は7サイクル消費。
    pub fn irq<M: MemoryBus>(&mut self, memory: &mut M) -> u32 {
        if self.regs.get_flag(flags::IRQ_DISABLE) {
            return 0;
        }
        self.interrupt(memory, IRQ_VECTOR)
    }

    /// NMI（ノンマスカブル割り込み）を通知
    pub fn nmi<M: MemoryBus>(&mut self, memory: &mut M) -> u32 {
        self.interrupt(memory, NMI_VECTOR)
    }

    /// 割り込みシーケンス共通部
    ///
    /// PC上位/下位、Bをクリアしたステータスの順にプッシュし、
    /// Iをセットしてベクターをロードする。
    fn interrupt<M: MemoryBus>(&mut self, memory: &mut M, vector: u16) -> u32 {
        self.push_word(memory, self.regs.pc);
        let status = (self.regs.status | flags::UNUSED) & !flags::BREAK;
        self.push_byte(memory, status);
        self.regs.set_flag(flags::IRQ_DISABLE, true);
        let low = memory.read(vector) as u16;
        let high = memory.read(vector + 1) as u16;
        self.regs.pc = (high << 8) | low;
        self.total_cycles += 7;
        7
    }

    /// デバッガ向けのレジスタスナップショット
    pub fn snapshot(&self) -> CpuSnapshot {
        CpuSnapshot {
            pc: self.regs.pc,
            sp: self.regs.sp,
            a: self.regs.a,
            x: self.regs.x,
            y: self.regs.y,
            p: self.regs.status,
            cycles: self.total_cycles,
            initialized: self.initialized,
        }
    }

    /// 1命令を実行し、消費したサイクル数を返す
    pub fn step<M: MemoryBus>(&mut self, memory: &mut M) -> u32 {
        let opcode_pc = self.regs.pc;
        let opcode = self.fetch_byte(memory);
        let entry = OPCODES[opcode as usize];
        self.cycles = entry.cycles;
        self.execute(memory, entry, opcode, opcode_pc);
        self.total_cycles += self.cycles as u64;
        self.cycles
    }

    /// PCから1バイトフェッチしてPCをインクリメント
    pub(super) fn fetch_byte<M: MemoryBus>(&mut self, memory: &mut M) -> u8 {
        let value = memory.read(self.regs.pc);
        self.regs.pc = self.regs.pc.wrapping_add(1);
        value
    }

    /// PCから2バイト（ワード、リトルエンディアン）をフェッチ
    pub(super) fn fetch_word<M: MemoryBus>(&mut self, memory: &mut M) -> u16 {
        let low = self.fetch_byte(memory) as u16;
        let high = self.fetch_byte(memory) as u16;
        (high << 8) | low
    }

    /// スタックに1バイトプッシュ
    fn push_byte<M: MemoryBus>(&mut self, memory: &mut M, value: u8) {
        memory.write(0x0100 | self.regs.sp as u16, value);
        self.regs.sp = self.regs.sp.wrapping_sub(1);
    }

    /// スタックから1バイトポップ
    fn pop_byte<M: MemoryBus>(&mut self, memory: &mut M) -> u8 {
        self.regs.sp = self.regs.sp.wrapping_add(1);
        memory.read(0x0100 | self.regs.sp as u16)
    }

    /// スタックに2バイトプッシュ（上位バイト先）
    fn push_word<M: MemoryBus>(&mut self, memory: &mut M, value: u16) {
        self.push_byte(memory, (value >> 8) as u8);
        self.push_byte(memory, value as u8);
    }

    /// スタックから2バイトポップ
    fn pop_word<M: MemoryBus>(&mut self, memory: &mut M) -> u16 {
        let low = self.pop_byte(memory) as u16;
        let high = self.pop_byte(memory) as u16;
        (high << 8) | low
    }

    /// デコード済みエントリを実行
    fn execute<M: MemoryBus>(&mut self, memory: &mut M, entry: Opcode, opcode: u8, opcode_pc: u16) {
        match entry.mnemonic {
            // ロード
            Mnemonic::Lda => {
                let v = self.load_operand(memory, entry.mode);
                self.regs.a = v;
                self.regs.update_zero_negative_flags(v);
            }
            Mnemonic::Ldx => {
                let v = self.load_operand(memory, entry.mode);
                self.regs.x = v;
                self.regs.update_zero_negative_flags(v);
            }
            Mnemonic::Ldy => {
                let v = self.load_operand(memory, entry.mode);
                self.regs.y = v;
                self.regs.update_zero_negative_flags(v);
            }

            // ストア
            Mnemonic::Sta => {
                let addr = self.operand_address(memory, entry.mode, true);
                memory.write(addr, self.regs.a);
            }
            Mnemonic::Stx => {
                let addr = self.operand_address(memory, entry.mode, true);
                memory.write(addr, self.regs.x);
            }
            Mnemonic::Sty => {
                let addr = self.operand_address(memory, entry.mode, true);
                memory.write(addr, self.regs.y);
            }

            // 転送
            Mnemonic::Tax => {
                self.regs.x = self.regs.a;
                self.regs.update_zero_negative_flags(self.regs.x);
            }
            Mnemonic::Txa => {
                self.regs.a = self.regs.x;
                self.regs.update_zero_negative_flags(self.regs.a);
            }
            Mnemonic::Tay => {
                self.regs.y = self.regs.a;
                self.regs.update_zero_negative_flags(self.regs.y);
            }
            Mnemonic::Tya => {
                self.regs.a = self.regs.y;
                self.regs.update_zero_negative_flags(self.regs.a);
            }
            Mnemonic::Tsx => {
                self.regs.x = self.regs.sp;
                self.regs.update_zero_negative_flags(self.regs.x);
            }
            Mnemonic::Txs => {
                // TXSはフラグに影響しない
                self.regs.sp = self.regs.x;
            }

            // スタック
            Mnemonic::Pha => self.push_byte(memory, self.regs.a),
            Mnemonic::Pla => {
                self.regs.a = self.pop_byte(memory);
                self.regs.update_zero_negative_flags(self.regs.a);
            }
            Mnemonic::Php => {
                // PHPがプッシュするバイトはBとUNUSEDがセットされる
                let status = self.regs.status | flags::BREAK | flags::UNUSED;
                self.push_byte(memory, status);
            }
            Mnemonic::Plp => {
                self.regs.status = self.pop_byte(memory);
                self.regs.set_flag(flags::UNUSED, true);
                self.regs.set_flag(flags::BREAK, false);
            }

            // 算術
            Mnemonic::Adc => {
                let v = self.load_operand(memory, entry.mode);
                self.do_adc(v);
            }
            Mnemonic::Sbc => {
                let v = self.load_operand(memory, entry.mode);
                self.do_sbc(v);
            }

            // 比較
            Mnemonic::Cmp => {
                let v = self.load_operand(memory, entry.mode);
                self.compare(self.regs.a, v);
            }
            Mnemonic::Cpx => {
                let v = self.load_operand(memory, entry.mode);
                self.compare(self.regs.x, v);
            }
            Mnemonic::Cpy => {
                let v = self.load_operand(memory, entry.mode);
                self.compare(self.regs.y, v);
            }

            // インクリメント/デクリメント
            Mnemonic::Inc => {
                let addr = self.operand_address(memory, entry.mode, true);
                let v = memory.read(addr).wrapping_add(1);
                memory.write(addr, v);
                self.regs.update_zero_negative_flags(v);
            }
            Mnemonic::Dec => {
                let addr = self.operand_address(memory, entry.mode, true);
                let v = memory.read(addr).wrapping_sub(1);
                memory.write(addr, v);
                self.regs.update_zero_negative_flags(v);
            }
            Mnemonic::Inx => {
                self.regs.x = self.regs.x.wrapping_add(1);
                self.regs.update_zero_negative_flags(self.regs.x);
            }
            Mnemonic::Iny => {
                self.regs.y = self.regs.y.wrapping_add(1);
                self.regs.update_zero_negative_flags(self.regs.y);
            }
            Mnemonic::Dex => {
                self.regs.x = self.regs.x.wrapping_sub(1);
                self.regs.update_zero_negative_flags(self.regs.x);
            }
            Mnemonic::Dey => {
                self.regs.y = self.regs.y.wrapping_sub(1);
                self.regs.update_zero_negative_flags(self.regs.y);
            }

            // 論理演算
            Mnemonic::And => {
                let v = self.load_operand(memory, entry.mode);
                self.regs.a &= v;
                self.regs.update_zero_negative_flags(self.regs.a);
            }
            Mnemonic::Ora => {
                let v = self.load_operand(memory, entry.mode);
                self.regs.a |= v;
                self.regs.update_zero_negative_flags(self.regs.a);
            }
            Mnemonic::Eor => {
                let v = self.load_operand(memory, entry.mode);
                self.regs.a ^= v;
                self.regs.update_zero_negative_flags(self.regs.a);
            }

            // シフト/ローテート
            Mnemonic::Asl => self.read_modify_write(memory, entry.mode, Self::do_asl),
            Mnemonic::Lsr => self.read_modify_write(memory, entry.mode, Self::do_lsr),
            Mnemonic::Rol => self.read_modify_write(memory, entry.mode, Self::do_rol),
            Mnemonic::Ror => self.read_modify_write(memory, entry.mode, Self::do_ror),

            // BIT test
            Mnemonic::Bit => {
                let v = self.load_operand(memory, entry.mode);
                self.regs.set_flag(flags::ZERO, (self.regs.a & v) == 0);
                self.regs.set_flag(flags::NEGATIVE, (v & 0x80) != 0);
                self.regs.set_flag(flags::OVERFLOW, (v & 0x40) != 0);
            }

            // ブランチ
            Mnemonic::Bpl => {
                let c = !self.regs.get_flag(flags::NEGATIVE);
                self.branch(memory, c);
            }
            Mnemonic::Bmi => {
                let c = self.regs.get_flag(flags::NEGATIVE);
                self.branch(memory, c);
            }
            Mnemonic::Bvc => {
                let c = !self.regs.get_flag(flags::OVERFLOW);
                self.branch(memory, c);
            }
            Mnemonic::Bvs => {
                let c = self.regs.get_flag(flags::OVERFLOW);
                self.branch(memory, c);
            }
            Mnemonic::Bcc => {
                let c = !self.regs.get_flag(flags::CARRY);
                self.branch(memory, c);
            }
            Mnemonic::Bcs => {
                let c = self.regs.get_flag(flags::CARRY);
                self.branch(memory, c);
            }
            Mnemonic::Bne => {
                let c = !self.regs.get_flag(flags::ZERO);
                self.branch(memory, c);
            }
            Mnemonic::Beq => {
                let c = self.regs.get_flag(flags::ZERO);
                self.branch(memory, c);
            }

            // ジャンプ/コール
            Mnemonic::Jmp => {
                self.regs.pc = if entry.mode == AddressingMode::Indirect {
                    self.operand_address(memory, entry.mode, false)
                } else {
                    self.fetch_word(memory)
                };
            }
            Mnemonic::Jsr => {
                let target = self.fetch_word(memory);
                // JSRは命令最終バイトのアドレスをプッシュする
                self.push_word(memory, self.regs.pc.wrapping_sub(1));
                self.regs.pc = target;
            }
            Mnemonic::Rts => {
                self.regs.pc = self.pop_word(memory).wrapping_add(1);
            }

            // 割り込み
            Mnemonic::Brk => {
                // BRKは2バイト命令として振る舞う（パディングバイトを飛ばす）
                self.push_word(memory, self.regs.pc.wrapping_add(1));
                let status = self.regs.status | flags::BREAK | flags::UNUSED;
                self.push_byte(memory, status);
                self.regs.set_flag(flags::IRQ_DISABLE, true);
                let low = memory.read(IRQ_VECTOR) as u16;
                let high = memory.read(IRQ_VECTOR + 1) as u16;
                self.regs.pc = (high << 8) | low;
            }
            Mnemonic::Rti => {
                self.regs.status = (self.pop_byte(memory) | flags::UNUSED) & !flags::BREAK;
                self.regs.pc = self.pop_word(memory);
            }

            // フラグ操作
            Mnemonic::Clc => self.regs.set_flag(flags::CARRY, false),
            Mnemonic::Sec => self.regs.set_flag(flags::CARRY, true),
            Mnemonic::Cli => self.regs.set_flag(flags::IRQ_DISABLE, false),
            Mnemonic::Sei => self.regs.set_flag(flags::IRQ_DISABLE, true),
            Mnemonic::Clv => self.regs.set_flag(flags::OVERFLOW, false),
            Mnemonic::Cld => self.regs.set_flag(flags::DECIMAL, false),
            Mnemonic::Sed => self.regs.set_flag(flags::DECIMAL, true),

            // NOP（文書化されていないマルチバイトNOPを含む）
            Mnemonic::Nop => self.skip_operand(entry.mode),

            // 不正オペコード: オペランド分だけPCを進めてNOP扱い
            Mnemonic::Ill => {
                log::debug!("Illegal opcode ${:02X} at ${:04X}", opcode, opcode_pc);
                self.skip_operand(entry.mode);
            }
        }
    }

    /// RMW命令の共通経路（アキュムレータ/メモリ両対応）
    fn read_modify_write<M: MemoryBus>(
        &mut self,
        memory: &mut M,
        mode: AddressingMode,
        f: fn(&mut Self, u8) -> u8,
    ) {
        if mode == AddressingMode::Accumulator {
            let r = f(self, self.regs.a);
            self.regs.a = r;
        } else {
            let addr = self.operand_address(memory, mode, true);
            let v = memory.read(addr);
            let r = f(self, v);
            memory.write(addr, r);
        }
    }

    fn do_asl(&mut self, value: u8) -> u8 {
        self.regs.set_flag(flags::CARRY, (value & 0x80) != 0);
        let result = value << 1;
        self.regs.update_zero_negative_flags(result);
        result
    }

    fn do_lsr(&mut self, value: u8) -> u8 {
        self.regs.set_flag(flags::CARRY, (value & 0x01) != 0);
        let result = value >> 1;
        self.regs.update_zero_negative_flags(result);
        result
    }

    fn do_rol(&mut self, value: u8) -> u8 {
        let carry_in = if self.regs.get_flag(flags::CARRY) { 1 } else { 0 };
        self.regs.set_flag(flags::CARRY, (value & 0x80) != 0);
        let result = (value << 1) | carry_in;
        self.regs.update_zero_negative_flags(result);
        result
    }

    fn do_ror(&mut self, value: u8) -> u8 {
        let carry_in = if self.regs.get_flag(flags::CARRY) { 0x80 } else { 0 };
        self.regs.set_flag(flags::CARRY, (value & 0x01) != 0);
        let result = (value >> 1) | carry_in;
        self.regs.update_zero_negative_flags(result);
        result
    }

    /// 比較命令の共通経路（C = レジスタ >= 値、借りなしでセット）
    fn compare(&mut self, reg: u8, value: u8) {
        let result = reg.wrapping_sub(value);
        self.regs.set_flag(flags::CARRY, reg >= value);
        self.regs.update_zero_negative_flags(result);
    }

    /// ADC - キャリー付き加算（BCDモード対応）
    fn do_adc(&mut self, value: u8) {
        let carry = if self.regs.get_flag(flags::CARRY) {
            1u16
        } else {
            0u16
        };

        if self.regs.get_flag(flags::DECIMAL) {
            // BCDモード
            // NMOSではZはバイナリ和から、N/Vは調整後の結果から決まる
            let binary = self.regs.a as u16 + value as u16 + carry;
            let mut low = (self.regs.a & 0x0F) as u16 + (value & 0x0F) as u16 + carry;
            let mut high = (self.regs.a >> 4) as u16 + (value >> 4) as u16;

            if low > 9 {
                low -= 10;
                high += 1;
            }

            let result = if high > 9 {
                self.regs.set_flag(flags::CARRY, true);
                (((high - 10) << 4) | (low & 0x0F)) as u8
            } else {
                self.regs.set_flag(flags::CARRY, false);
                ((high << 4) | (low & 0x0F)) as u8
            };

            self.regs.set_flag(flags::ZERO, (binary & 0xFF) == 0);
            self.regs.set_flag(flags::NEGATIVE, (result & 0x80) != 0);
            self.regs.set_flag(
                flags::OVERFLOW,
                ((self.regs.a ^ result) & (value ^ result) & 0x80) != 0,
            );
            self.regs.a = result;
        } else {
            let result = self.regs.a as u16 + value as u16 + carry;
            let result8 = result as u8;

            self.regs.set_flag(flags::CARRY, result > 0xFF);
            self.regs.set_flag(
                flags::OVERFLOW,
                ((self.regs.a ^ result8) & (value ^ result8) & 0x80) != 0,
            );
            self.regs.update_zero_negative_flags(result8);
            self.regs.a = result8;
        }
    }

    /// SBC - キャリー付き減算（C = 借りなし、BCDモード対応）
    fn do_sbc(&mut self, value: u8) {
        if self.regs.get_flag(flags::DECIMAL) {
            // BCDモード: N/Z/Vはバイナリ差から、Cは借りの有無
            let borrow = if self.regs.get_flag(flags::CARRY) {
                0i16
            } else {
                1i16
            };
            let binary = self.regs.a as i16 - value as i16 - borrow;
            let mut low = (self.regs.a & 0x0F) as i16 - (value & 0x0F) as i16 - borrow;
            let mut high = (self.regs.a >> 4) as i16 - (value >> 4) as i16;

            if low < 0 {
                low += 10;
                high -= 1;
            }

            let result = if high < 0 {
                (((high + 10) << 4) | (low & 0x0F)) as u8
            } else {
                ((high << 4) | (low & 0x0F)) as u8
            };

            let binary8 = binary as u8;
            self.regs.set_flag(flags::CARRY, binary >= 0);
            self.regs.set_flag(flags::ZERO, binary8 == 0);
            self.regs.set_flag(flags::NEGATIVE, (binary8 & 0x80) != 0);
            self.regs.set_flag(
                flags::OVERFLOW,
                ((self.regs.a ^ binary8) & (!value ^ binary8) & 0x80) != 0,
            );
            self.regs.a = result;
        } else {
            // SBCはADCの補数として実装
            self.do_adc(!value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// テスト用のシンプルなメモリ（64KB RAM）
    struct TestMemory {
        ram: Vec<u8>,
    }

    impl TestMemory {
        fn new() -> Self {
            TestMemory {
                ram: vec![0; 65536],
            }
        }

        fn load(&mut self, address: u16, data: &[u8]) {
            for (i, &byte) in data.iter().enumerate() {
                let addr = (address as usize).wrapping_add(i) & 0xFFFF;
                self.ram[addr] = byte;
            }
        }
    }

    impl MemoryBus for TestMemory {
        fn read(&mut self, address: u16) -> u8 {
            self.ram[address as usize]
        }

        fn write(&mut self, address: u16, value: u8) {
            self.ram[address as usize] = value;
        }
    }

    fn setup(program: &[u8]) -> (Cpu, TestMemory) {
        let mut memory = TestMemory::new();
        memory.load(0x8000, program);
        memory.ram[RESET_VECTOR as usize] = 0x00;
        memory.ram[RESET_VECTOR as usize + 1] = 0x80;
        let mut cpu = Cpu::new();
        cpu.reset(&mut memory);
        (cpu, memory)
    }

    #[test]
    fn test_reset_vector() {
        let mut memory = TestMemory::new();
        memory.ram[0xFFFC] = 0x00;
        memory.ram[0xFFFD] = 0xC6;
        let mut cpu = Cpu::new();
        assert!(!cpu.initialized);
        cpu.reset(&mut memory);
        assert_eq!(cpu.regs.pc, 0xC600);
        assert_eq!(cpu.regs.sp, 0xFD);
        assert_eq!(cpu.regs.status, 0x24);
        assert!(cpu.initialized);
    }

    #[test]
    fn test_lda_immediate_flags() {
        let (mut cpu, mut memory) = setup(&[0xA9, 0x00, 0xA9, 0x80]);
        cpu.step(&mut memory);
        assert!(cpu.regs.get_flag(flags::ZERO));
        cpu.step(&mut memory);
        assert_eq!(cpu.regs.a, 0x80);
        assert!(cpu.regs.get_flag(flags::NEGATIVE));
        assert!(!cpu.regs.get_flag(flags::ZERO));
    }

    #[test]
    fn test_adc_binary_carry_overflow() {
        // 0x50 + 0x50 = 0xA0: V=1, C=0, N=1
        let (mut cpu, mut memory) = setup(&[0x69, 0x50]);
        cpu.regs.a = 0x50;
        cpu.step(&mut memory);
        assert_eq!(cpu.regs.a, 0xA0);
        assert!(cpu.regs.get_flag(flags::OVERFLOW));
        assert!(!cpu.regs.get_flag(flags::CARRY));
        assert!(cpu.regs.get_flag(flags::NEGATIVE));
    }

    #[test]
    fn test_adc_decimal() {
        // Dフラグ有効で $15 + $27 = $42
        let (mut cpu, mut memory) = setup(&[0xF8, 0x69, 0x27]);
        cpu.regs.a = 0x15;
        cpu.step(&mut memory); // SED
        cpu.step(&mut memory); // ADC #$27
        assert_eq!(cpu.regs.a, 0x42);
        assert!(!cpu.regs.get_flag(flags::CARRY));
        assert!(!cpu.regs.get_flag(flags::ZERO));
        assert!(!cpu.regs.get_flag(flags::NEGATIVE));
    }

    #[test]
    fn test_adc_decimal_carry_out() {
        // $99 + $01 = $00 キャリー
        let (mut cpu, mut memory) = setup(&[0xF8, 0x69, 0x01]);
        cpu.regs.a = 0x99;
        cpu.step(&mut memory);
        cpu.step(&mut memory);
        assert_eq!(cpu.regs.a, 0x00);
        assert!(cpu.regs.get_flag(flags::CARRY));
    }

    #[test]
    fn test_sbc_decimal() {
        // Dフラグ有効、C=1（借りなし）で $42 - $27 = $15
        let (mut cpu, mut memory) = setup(&[0xF8, 0x38, 0xE9, 0x27]);
        cpu.regs.a = 0x42;
        cpu.step(&mut memory); // SED
        cpu.step(&mut memory); // SEC
        cpu.step(&mut memory); // SBC #$27
        assert_eq!(cpu.regs.a, 0x15);
        assert!(cpu.regs.get_flag(flags::CARRY));
    }

    #[test]
    fn test_sbc_binary_borrow() {
        // C=1で 0x10 - 0x20 = 0xF0、借りが発生してC=0
        let (mut cpu, mut memory) = setup(&[0x38, 0xE9, 0x20]);
        cpu.regs.a = 0x10;
        cpu.step(&mut memory);
        cpu.step(&mut memory);
        assert_eq!(cpu.regs.a, 0xF0);
        assert!(!cpu.regs.get_flag(flags::CARRY));
        assert!(cpu.regs.get_flag(flags::NEGATIVE));
    }

    #[test]
    fn test_branch_cycles() {
        // 不成立: 2サイクル
        let (mut cpu, mut memory) = setup(&[0xD0, 0x10]);
        cpu.regs.set_flag(flags::ZERO, true);
        assert_eq!(cpu.step(&mut memory), 2);

        // 成立・同一ページ内: 3サイクル
        let (mut cpu, mut memory) = setup(&[0xD0, 0x10]);
        cpu.regs.set_flag(flags::ZERO, false);
        assert_eq!(cpu.step(&mut memory), 3);
        assert_eq!(cpu.regs.pc, 0x8012);

        // 成立・ページ跨ぎ: 4サイクル（$80FD + 2 + $10 = $810F）
        let (mut cpu, mut memory) = setup(&[]);
        memory.load(0x80FD, &[0xD0, 0x10]);
        cpu.regs.pc = 0x80FD;
        cpu.regs.set_flag(flags::ZERO, false);
        assert_eq!(cpu.step(&mut memory), 4);
        assert_eq!(cpu.regs.pc, 0x810F);
    }

    #[test]
    fn test_indexed_read_page_cross_penalty() {
        // LDA $80F0,X / X=$20 → $8110、ページ跨ぎで5サイクル
        let (mut cpu, mut memory) = setup(&[0xBD, 0xF0, 0x80]);
        cpu.regs.x = 0x20;
        assert_eq!(cpu.step(&mut memory), 5);

        // 跨がなければ4サイクル
        let (mut cpu, mut memory) = setup(&[0xBD, 0x00, 0x80]);
        cpu.regs.x = 0x20;
        assert_eq!(cpu.step(&mut memory), 4);
    }

    #[test]
    fn test_store_indexed_always_pays_penalty() {
        // STA abs,X はページ跨ぎに関係なく5サイクル
        let (mut cpu, mut memory) = setup(&[0x9D, 0x00, 0x20]);
        cpu.regs.x = 0x05;
        cpu.regs.a = 0x7F;
        assert_eq!(cpu.step(&mut memory), 5);
        assert_eq!(memory.ram[0x2005], 0x7F);
    }

    #[test]
    fn test_stack_wraps_in_page_one() {
        let (mut cpu, mut memory) = setup(&[0x48, 0x48]);
        cpu.regs.sp = 0x00;
        cpu.regs.a = 0xAB;
        cpu.step(&mut memory);
        assert_eq!(memory.ram[0x0100], 0xAB);
        assert_eq!(cpu.regs.sp, 0xFF);
        cpu.step(&mut memory);
        assert_eq!(memory.ram[0x01FF], 0xAB);
    }

    #[test]
    fn test_php_pushes_break_and_unused() {
        let (mut cpu, mut memory) = setup(&[0x08, 0x28]);
        cpu.regs.status = flags::UNUSED | flags::CARRY;
        cpu.step(&mut memory);
        let pushed = memory.ram[0x01FD];
        assert_eq!(pushed & flags::BREAK, flags::BREAK);
        assert_eq!(pushed & flags::UNUSED, flags::UNUSED);
        // PLPで戻すとBはクリア、UNUSEDはセットのまま
        cpu.step(&mut memory);
        assert!(!cpu.regs.get_flag(flags::BREAK));
        assert!(cpu.regs.get_flag(flags::UNUSED));
        assert!(cpu.regs.get_flag(flags::CARRY));
    }

    #[test]
    fn test_jmp_indirect_page_wrap_quirk() {
        // JMP ($02FF): 下位=$02FF、上位は$0200から読む
        let (mut cpu, mut memory) = setup(&[0x6C, 0xFF, 0x02]);
        memory.ram[0x02FF] = 0x34;
        memory.ram[0x0200] = 0x12;
        memory.ram[0x0300] = 0x99; // こちらは使われない
        assert_eq!(cpu.step(&mut memory), 5);
        assert_eq!(cpu.regs.pc, 0x1234);
    }

    #[test]
    fn test_jsr_rts_roundtrip() {
        let (mut cpu, mut memory) = setup(&[0x20, 0x00, 0x90]);
        memory.load(0x9000, &[0x60]); // RTS
        assert_eq!(cpu.step(&mut memory), 6);
        assert_eq!(cpu.regs.pc, 0x9000);
        assert_eq!(cpu.step(&mut memory), 6);
        assert_eq!(cpu.regs.pc, 0x8003);
    }

    #[test]
    fn test_brk_rti() {
        let (mut cpu, mut memory) = setup(&[0x00, 0xFF]);
        memory.ram[0xFFFE] = 0x00;
        memory.ram[0xFFFF] = 0x90;
        memory.load(0x9000, &[0x40]); // RTI
        assert_eq!(cpu.step(&mut memory), 7);
        assert_eq!(cpu.regs.pc, 0x9000);
        assert!(cpu.regs.get_flag(flags::IRQ_DISABLE));
        // スタック上のバイトはBセット
        assert_eq!(memory.ram[0x01FB] & flags::BREAK, flags::BREAK);
        cpu.step(&mut memory); // RTI
        // BRKは2バイト命令として復帰する
        assert_eq!(cpu.regs.pc, 0x8002);
        assert!(!cpu.regs.get_flag(flags::BREAK));
        assert!(cpu.regs.get_flag(flags::UNUSED));
    }

    #[test]
    fn test_irq_respects_i_flag() {
        let (mut cpu, mut memory) = setup(&[]);
        memory.ram[0xFFFE] = 0x00;
        memory.ram[0xFFFF] = 0xA0;
        // リセット直後はIがセットされているのでIRQは無視
        assert_eq!(cpu.irq(&mut memory), 0);
        assert_eq!(cpu.regs.pc, 0x8000);
        cpu.regs.set_flag(flags::IRQ_DISABLE, false);
        assert_eq!(cpu.irq(&mut memory), 7);
        assert_eq!(cpu.regs.pc, 0xA000);
        // プッシュされたステータスはBクリア
        assert_eq!(memory.ram[0x01FB] & flags::BREAK, 0);
    }

    #[test]
    fn test_nmi_ignores_i_flag() {
        let (mut cpu, mut memory) = setup(&[]);
        memory.ram[0xFFFA] = 0x00;
        memory.ram[0xFFFB] = 0xB0;
        assert!(cpu.regs.get_flag(flags::IRQ_DISABLE));
        assert_eq!(cpu.nmi(&mut memory), 7);
        assert_eq!(cpu.regs.pc, 0xB000);
    }

    #[test]
    fn test_illegal_opcode_advances_and_burns_cycles() {
        // $02は1バイトNOP扱い
        let (mut cpu, mut memory) = setup(&[0x02, 0xEA]);
        assert_eq!(cpu.step(&mut memory), 2);
        assert_eq!(cpu.regs.pc, 0x8001);
        // $04（文書化されていないNOP zp）は2バイト消費
        let (mut cpu, mut memory) = setup(&[0x04, 0x12]);
        assert_eq!(cpu.step(&mut memory), 3);
        assert_eq!(cpu.regs.pc, 0x8002);
    }

    #[test]
    fn test_rmw_absolute_x() {
        // INC $2000,X は7サイクル固定
        let (mut cpu, mut memory) = setup(&[0xFE, 0x00, 0x20]);
        cpu.regs.x = 0x01;
        memory.ram[0x2001] = 0xFF;
        assert_eq!(cpu.step(&mut memory), 7);
        assert_eq!(memory.ram[0x2001], 0x00);
        assert!(cpu.regs.get_flag(flags::ZERO));
    }

    #[test]
    fn test_cycle_counter_monotonic() {
        let (mut cpu, mut memory) = setup(&[0xEA, 0xEA, 0xEA]);
        let start = cpu.total_cycles;
        cpu.step(&mut memory);
        cpu.step(&mut memory);
        cpu.step(&mut memory);
        assert_eq!(cpu.total_cycles, start + 6);
    }

    #[test]
    fn test_snapshot_unused_bit_always_set() {
        let (mut cpu, mut memory) = setup(&[0xA9, 0x00]);
        cpu.step(&mut memory);
        let snap = cpu.snapshot();
        assert_eq!(snap.p & 0x20, 0x20);
        assert!(snap.initialized);
    }

    #[test]
    fn test_compare_sets_carry_on_no_borrow() {
        let (mut cpu, mut memory) = setup(&[0xC9, 0x30]);
        cpu.regs.a = 0x40;
        cpu.step(&mut memory);
        assert!(cpu.regs.get_flag(flags::CARRY));
        assert!(!cpu.regs.get_flag(flags::ZERO));
        let (mut cpu, mut memory) = setup(&[0xC9, 0x50]);
        cpu.regs.a = 0x40;
        cpu.step(&mut memory);
        assert!(!cpu.regs.get_flag(flags::CARRY));
    }

    #[test]
    fn test_zero_page_index_wraps() {
        // LDA $F0,X / X=$20 → $10（ゼロページ内で折り返す）
        let (mut cpu, mut memory) = setup(&[0xB5, 0xF0]);
        cpu.regs.x = 0x20;
        memory.ram[0x0010] = 0x5A;
        cpu.step(&mut memory);
        assert_eq!(cpu.regs.a, 0x5A);
    }

    #[test]
    fn test_ror_through_carry() {
        let (mut cpu, mut memory) = setup(&[0x38, 0x6A]); // SEC, ROR A
        cpu.regs.a = 0x02;
        cpu.step(&mut memory);
        cpu.step(&mut memory);
        assert_eq!(cpu.regs.a, 0x81);
        assert!(!cpu.regs.get_flag(flags::CARRY));
        assert!(cpu.regs.get_flag(flags::NEGATIVE));
    }
}
