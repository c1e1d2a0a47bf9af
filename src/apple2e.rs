//! Apple IIe エミュレータドライバ
//!
//! CPU、MMU（RAM/ROM/キーボード/Disk IIを内包）を統合し、
//! サイクル単位で時間を進める。外部スレッドからポーリングする
//! ホストはマシン全体をMutexで包む（スナップショットは値渡しなので
//! ロック外に生きた参照は漏れない）。

use crate::cpu::Cpu;
use crate::disk::Disk2;
use crate::error::Error;
use crate::keyboard::Keyboard;
use crate::mmu::{Mmu, SoftSwitches};
use crate::snapshot::{CpuSnapshot, DiskSnapshot};

/// Apple IIeエミュレータのメイン構造体
pub struct Apple2e {
    /// 6502 CPU
    pub cpu: Cpu,
    /// メモリ管理ユニット（全デバイスを所有）
    pub mmu: Mmu,
    /// 累積サイクル数
    pub total_cycles: u64,
}

impl Default for Apple2e {
    fn default() -> Self {
        Self::new()
    }
}

impl Apple2e {
    /// 新しいエミュレータインスタンスを作成
    pub fn new() -> Self {
        Apple2e {
            cpu: Cpu::new(),
            mmu: Mmu::new(),
            total_cycles: 0,
        }
    }

    fn disk_mut(&mut self) -> &mut Disk2 {
        self.mmu.disk.get_or_insert_with(Disk2::new)
    }

    fn keyboard_mut(&mut self) -> &mut Keyboard {
        self.mmu.keyboard.get_or_insert_with(Keyboard::new)
    }

    /// ROMイメージをロード（16KBにパディング/切り詰め）
    pub fn load_rom(&mut self, rom_data: &[u8]) {
        self.mmu.rom.load(rom_data);
        log::info!("Loaded ROM image ({} bytes)", rom_data.len());
    }

    /// ディスクイメージをロード
    pub fn load_disk(
        &mut self,
        drive: usize,
        data: &[u8],
        write_protected: bool,
        filename: Option<String>,
    ) -> Result<(), Error> {
        self.disk_mut()
            .insert_disk(drive, data, write_protected, filename)
    }

    /// ディスクをイジェクト
    pub fn eject_disk(&mut self, drive: usize) {
        self.disk_mut().eject_disk(drive);
    }

    /// キー入力（7ビットASCII）
    pub fn press_key(&mut self, ascii: u8) {
        self.keyboard_mut().press_key(ascii);
    }

    /// エミュレータをリセット
    ///
    /// ソフトスイッチとディスクコントローラを初期状態へ戻し、
    /// リセットベクターからPCをフェッチする。
    pub fn reset(&mut self) {
        self.mmu.reset_switches();
        self.disk_mut().reset();
        self.cpu.reset(&mut self.mmu);
        self.total_cycles = self.cpu.total_cycles;
        log::info!("Reset: PC=${:04X}", self.cpu.regs.pc);
    }

    /// マシンが実行可能な状態か（ROMロード済み + リセット済み）
    pub fn is_initialized(&self) -> bool {
        self.cpu.initialized && self.mmu.rom.is_loaded()
    }

    /// 指定サイクル数ぶん実行する
    ///
    /// 返却されたサイクルの合計がnに達するまでCPUを回し、そのあと
    /// 実行した総サイクル数だけディスクのニブルタイマーを進める。
    /// 実際に実行したサイクル数を返す（命令境界で丸めるためn以上に
    /// なり得る）。
    pub fn step_cycles(&mut self, n: u64) -> Result<u64, Error> {
        if !self.is_initialized() {
            return Err(Error::NotInitialized);
        }

        let mut executed: u64 = 0;
        while executed < n {
            executed += self.cpu.step(&mut self.mmu) as u64;
        }
        self.total_cycles += executed;

        if let Some(disk) = self.mmu.disk.as_mut() {
            disk.advance(executed);
        }

        Ok(executed)
    }

    /// 副作用なしのメモリ読み取り（メモリビューア用）
    ///
    /// MMUのソフトスイッチを発火させずデバイスの生の状態を読む。
    pub fn read_memory(&self, address: u16) -> u8 {
        self.mmu.peek(address)
    }

    /// CPUスナップショットを取得
    pub fn snapshot_cpu(&self) -> CpuSnapshot {
        self.cpu.snapshot()
    }

    /// ソフトスイッチ状態のコピーを取得
    pub fn snapshot_switches(&self) -> SoftSwitches {
        self.mmu.switches
    }

    /// ディスクスナップショットを取得
    pub fn snapshot_disk(&self) -> DiskSnapshot {
        self.mmu
            .disk
            .as_ref()
            .map(|d| d.snapshot())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::disk::{BYTES_PER_SECTOR, DSK_SIZE, SECTORS_PER_TRACK, TRACKS};
    use crate::memory::ROM_SIZE;

    /// $D000にプログラムを置いた16KB ROMイメージを作る
    fn make_rom(program: &[u8]) -> Vec<u8> {
        let mut rom = vec![0xEAu8; ROM_SIZE];
        rom[0x1000..0x1000 + program.len()].copy_from_slice(program);
        // リセットベクター ($FFFC-$FFFD) -> $D000
        rom[0x3FFC] = 0x00;
        rom[0x3FFD] = 0xD0;
        rom
    }

    fn make_test_disk() -> Vec<u8> {
        let mut disk = vec![0u8; DSK_SIZE];
        for track in 0..TRACKS {
            for sector in 0..SECTORS_PER_TRACK {
                let offset = (track * SECTORS_PER_TRACK + sector) * BYTES_PER_SECTOR;
                disk[offset] = track as u8;
                disk[offset + 1] = sector as u8;
            }
        }
        disk
    }

    #[test]
    fn test_step_before_init_fails() {
        let mut machine = Apple2e::new();
        assert!(matches!(
            machine.step_cycles(100),
            Err(Error::NotInitialized)
        ));
        // ROMなしでリセットしてもまだ実行不可
        machine.reset();
        assert!(matches!(
            machine.step_cycles(100),
            Err(Error::NotInitialized)
        ));
    }

    #[test]
    fn test_reset_fetches_vector() {
        let mut machine = Apple2e::new();
        machine.load_rom(&make_rom(&[]));
        machine.reset();
        let snap = machine.snapshot_cpu();
        assert_eq!(snap.pc, 0xD000);
        assert_eq!(snap.sp, 0xFD);
        assert_eq!(snap.p, 0x24);
        assert!(snap.initialized);
    }

    #[test]
    fn test_program_writes_ram() {
        // LDA #$45 / STA $0300 / JMP $D005
        let mut machine = Apple2e::new();
        machine.load_rom(&make_rom(&[
            0xA9, 0x45, 0x8D, 0x00, 0x03, 0x4C, 0x05, 0xD0,
        ]));
        machine.reset();
        let executed = machine.step_cycles(100).unwrap();
        assert!(executed >= 100);
        assert_eq!(machine.read_memory(0x0300), 0x45);
    }

    #[test]
    fn test_keyboard_roundtrip_through_bus() {
        // LDA $C000 / STA $0310 / LDA $C010 / LDA $C000 / STA $0311 / spin
        let mut machine = Apple2e::new();
        machine.load_rom(&make_rom(&[
            0xAD, 0x00, 0xC0, // LDA $C000
            0x8D, 0x10, 0x03, // STA $0310
            0xAD, 0x10, 0xC0, // LDA $C010 (strobe clear)
            0xAD, 0x00, 0xC0, // LDA $C000
            0x8D, 0x11, 0x03, // STA $0311
            0x4C, 0x0F, 0xD0, // JMP $D00F
        ]));
        machine.reset();
        machine.press_key(b'A');
        machine.step_cycles(40).unwrap();
        assert_eq!(machine.read_memory(0x0310), 0xC1);
        assert_eq!(machine.read_memory(0x0311), 0x41);
    }

    #[test]
    fn test_cpu_drives_disk_motor_and_nibble_timer() {
        // LDA $C0E9 (motor on) / LDA $C0EC / LDA $C0EE (read mode) / spin
        let mut machine = Apple2e::new();
        machine.load_rom(&make_rom(&[
            0xAD, 0xE9, 0xC0, // LDA $C0E9
            0xAD, 0xEC, 0xC0, // LDA $C0EC
            0xAD, 0xEE, 0xC0, // LDA $C0EE
            0x4C, 0x09, 0xD0, // JMP $D009
        ]));
        machine.load_disk(0, &make_test_disk(), false, None).unwrap();
        machine.reset();
        machine.step_cycles(3200).unwrap();

        let snap = machine.snapshot_disk();
        assert!(snap.motor_on);
        assert_eq!(snap.selected_drive, 0);
        assert!(snap.drives[0].has_disk);
        // ニブルタイマーが回ってストリームが流れている
        assert!(snap.drives[0].nibble_pos > 0);
        assert!(snap.drives[0].nibble_pos < 6656);
    }

    #[test]
    fn test_read_memory_is_side_effect_free() {
        let mut machine = Apple2e::new();
        machine.load_rom(&make_rom(&[]));
        machine.reset();
        let before = machine.snapshot_switches();
        // PAGE2スイッチを覗いても状態は変わらない
        machine.read_memory(0xC055);
        machine.read_memory(0xC050);
        assert_eq!(machine.snapshot_switches(), before);
        // キーボードストローブも落ちない
        machine.press_key(b'Q');
        machine.read_memory(0xC010);
        machine.read_memory(0xC000);
        assert_eq!(machine.read_memory(0xC000), 0xD1);
    }

    #[test]
    fn test_eject_disk() {
        let mut machine = Apple2e::new();
        machine.load_disk(1, &make_test_disk(), true, Some("d.dsk".into())).unwrap();
        assert!(machine.snapshot_disk().drives[1].has_disk);
        machine.eject_disk(1);
        let snap = machine.snapshot_disk();
        assert!(!snap.drives[1].has_disk);
        assert_eq!(snap.drives[1].filename, None);
    }
}
