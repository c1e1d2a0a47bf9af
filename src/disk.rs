//! Apple II Disk II コントローラエミュレーション
//!
//! Disk II hardware emulation based on "Beneath Apple DOS" documentation
//! DSK形式（143,360バイト）のディスクイメージをロード時に6-and-2 GCRの
//! ニブル列へエンコードし、モーターON中は32サイクルごとに1ニブルを
//! データラッチへ流し込む。

use crate::bus::{AddressRange, BusDevice};
use crate::disk_log::{
    log_disk_ejected, log_disk_inserted, log_drive_select, log_motor_off, log_motor_on,
    log_nibble, log_sequencer_mode, log_sync_found, log_track_change,
};
use crate::error::Error;
use crate::snapshot::{DiskSnapshot, DriveSnapshot};

/// ディスクの定数
pub const TRACKS: usize = 35;
pub const SECTORS_PER_TRACK: usize = 16;
pub const BYTES_PER_SECTOR: usize = 256;
pub const BYTES_PER_TRACK: usize = SECTORS_PER_TRACK * BYTES_PER_SECTOR;
pub const DSK_SIZE: usize = TRACKS * BYTES_PER_TRACK; // 143360 bytes

/// トラック1本あたりのニブル数
pub const NIB_TRACK_SIZE: usize = 6656;
/// ニブルイメージ全体のサイズ
pub const NIB_SIZE: usize = TRACKS * NIB_TRACK_SIZE;

/// Disk II I/O範囲（スロット6）
pub const DISK_IO_START: u16 = 0xC0E0;
pub const DISK_IO_END: u16 = 0xC0EF;

/// 1ニブルが流れてくるのに要するCPUサイクル数
/// （4µsビットセル × 8ビット ≒ 1MHzで32サイクル）
pub const CYCLES_PER_NIBBLE: u64 = 32;

/// ハーフトラックの上限（トラック34まで）
const MAX_HALF_TRACK: i32 = (TRACKS as i32 - 1) * 2;

/// アドレスフィールドのボリューム番号
const VOLUME_NUMBER: u8 = 0xFE;

/// 6-and-2エンコーディングテーブル
const WRITE_TABLE: [u8; 64] = [
    0x96, 0x97, 0x9A, 0x9B, 0x9D, 0x9E, 0x9F, 0xA6,
    0xA7, 0xAB, 0xAC, 0xAD, 0xAE, 0xAF, 0xB2, 0xB3,
    0xB4, 0xB5, 0xB6, 0xB7, 0xB9, 0xBA, 0xBB, 0xBC,
    0xBD, 0xBE, 0xBF, 0xCB, 0xCD, 0xCE, 0xCF, 0xD3,
    0xD6, 0xD7, 0xD9, 0xDA, 0xDB, 0xDC, 0xDD, 0xDE,
    0xDF, 0xE5, 0xE6, 0xE7, 0xE9, 0xEA, 0xEB, 0xEC,
    0xED, 0xEE, 0xEF, 0xF2, 0xF3, 0xF4, 0xF5, 0xF6,
    0xF7, 0xF9, 0xFA, 0xFB, 0xFC, 0xFD, 0xFE, 0xFF,
];

/// DOS 3.3セクターインターリーブ（物理セクタ→論理セクタ）
const DOS_SECTOR_ORDER: [usize; 16] = [0, 7, 14, 6, 13, 5, 12, 4, 11, 3, 10, 2, 9, 1, 8, 15];

/// シーケンサー機能（Q7, Q6の組み合わせで決まる）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequencerFunction {
    /// Q7=L, Q6=L: 読み取りシフト
    ReadSequencing,
    /// Q7=L, Q6=H: 書き込みプロテクトセンス
    CheckWriteProtAndInitWrite,
    /// Q7=H, Q6=L: 書き込みシフト
    DataShiftWrite,
    /// Q7=H, Q6=H: 書き込みロード
    DataLoadWrite,
}

/// フロッピードライブ1台分の状態
#[derive(Clone, Default)]
pub struct FloppyDrive {
    /// トラックごとのニブル列（35 × 6656バイト、ディスク挿入中のみ）
    nibbles: Option<Vec<u8>>,
    /// 表示用ファイル名
    filename: Option<String>,
    /// 書き込みプロテクト
    write_protected: bool,
    /// ハーフトラック位置（0-68）
    phase: i32,
    /// 現在トラック内のニブル位置（0-6655）
    nibble_pos: usize,
    /// 書き込みが発生したか
    modified: bool,
}

impl FloppyDrive {
    /// ディスクが挿入されているか
    pub fn has_disk(&self) -> bool {
        self.nibbles.is_some()
    }

    /// 現在のトラック番号（0-34、ハーフトラックを切り捨て）
    pub fn current_track(&self) -> usize {
        ((self.phase / 2) as usize).min(TRACKS - 1)
    }

    /// トラック内のニブル位置
    pub fn nibble_pos(&self) -> usize {
        self.nibble_pos
    }

    pub fn filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }

    pub fn write_protected(&self) -> bool {
        self.write_protected
    }

    pub fn modified(&self) -> bool {
        self.modified
    }

    fn snapshot(&self) -> DriveSnapshot {
        DriveSnapshot {
            has_disk: self.has_disk(),
            current_track: self.current_track(),
            nibble_pos: self.nibble_pos,
            filename: self.filename.clone(),
            write_protected: self.write_protected,
        }
    }
}

/// Disk IIインターフェースカード（$C0E0-$C0EF）
#[derive(Clone)]
pub struct Disk2 {
    /// ドライブ0と1
    pub drives: [FloppyDrive; 2],
    /// 選択されているドライブ (0 or 1)
    selected_drive: usize,
    /// データラッチ
    latch: u8,
    /// モーターオン
    motor_on: bool,
    /// マグネット状態（フェーズ0-3のビットマスク）
    phase_mask: u8,
    /// Q6状態（false=L, true=H）
    q6: bool,
    /// Q7状態（false=L, true=H）
    q7: bool,
    /// シーケンサー機能
    seq_func: SequencerFunction,
    /// ニブルタイマーの繰越サイクル
    cycle_acc: u64,
    /// 同期マーカー検出用の直近3ニブル
    sync_buf: [u8; 3],
}

impl Default for Disk2 {
    fn default() -> Self {
        Self::new()
    }
}

impl Disk2 {
    pub fn new() -> Self {
        Disk2 {
            drives: [FloppyDrive::default(), FloppyDrive::default()],
            selected_drive: 0,
            latch: 0,
            motor_on: false,
            phase_mask: 0,
            q6: false,
            q7: false,
            seq_func: SequencerFunction::ReadSequencing,
            cycle_acc: 0,
            sync_buf: [0; 3],
        }
    }

    /// コントローラをリセット
    ///
    /// 挿入中のディスクは保持し、ヘッドはトラック0へ戻す。
    pub fn reset(&mut self) {
        self.selected_drive = 0;
        self.latch = 0;
        self.motor_on = false;
        self.phase_mask = 0;
        self.q6 = false;
        self.q7 = false;
        self.seq_func = SequencerFunction::ReadSequencing;
        self.cycle_acc = 0;
        self.sync_buf = [0; 3];
        for drive in &mut self.drives {
            drive.phase = 0;
            drive.nibble_pos = 0;
        }
    }

    /// ディスクをロード
    ///
    /// 143,360バイトのDSKイメージを受け取り、全35トラックを
    /// ニブル列へエンコードする。それ以外のサイズは拒否。
    pub fn insert_disk(
        &mut self,
        drive: usize,
        data: &[u8],
        write_protected: bool,
        filename: Option<String>,
    ) -> Result<(), Error> {
        if drive > 1 {
            return Err(Error::InvalidDrive(drive));
        }
        if data.len() != DSK_SIZE {
            return Err(Error::InvalidImageSize(data.len()));
        }

        let floppy = &mut self.drives[drive];
        floppy.nibbles = Some(Self::encode_dsk(data));
        floppy.write_protected = write_protected;
        floppy.nibble_pos = 0;
        floppy.modified = false;
        log_disk_inserted(drive, filename.as_deref());
        floppy.filename = filename;
        Ok(())
    }

    /// ディスクをイジェクト
    ///
    /// ニブルバッファを解放する。ヘッド位置（トラック）は変えない。
    pub fn eject_disk(&mut self, drive: usize) {
        if drive > 1 {
            return;
        }
        let floppy = &mut self.drives[drive];
        floppy.nibbles = None;
        floppy.filename = None;
        floppy.write_protected = false;
        floppy.modified = false;
        log_disk_ejected(drive);
    }

    //--------------------------------------------------
    // テレメトリ（UI向け読み取り専用）
    //--------------------------------------------------

    pub fn motor_on(&self) -> bool {
        self.motor_on
    }

    pub fn selected_drive(&self) -> usize {
        self.selected_drive
    }

    pub fn q6(&self) -> bool {
        self.q6
    }

    pub fn q7(&self) -> bool {
        self.q7
    }

    pub fn phase_mask(&self) -> u8 {
        self.phase_mask
    }

    pub fn data_latch(&self) -> u8 {
        self.latch
    }

    pub fn sequencer_function(&self) -> SequencerFunction {
        self.seq_func
    }

    /// コントローラ全体のスナップショット
    pub fn snapshot(&self) -> DiskSnapshot {
        DiskSnapshot {
            motor_on: self.motor_on,
            selected_drive: self.selected_drive,
            q6: self.q6,
            q7: self.q7,
            phase_mask: self.phase_mask,
            data_latch: self.latch,
            drives: [self.drives[0].snapshot(), self.drives[1].snapshot()],
        }
    }

    //--------------------------------------------------
    // ソフトスイッチ（$C0E0-$C0EF、下位4ビットで分岐）
    //--------------------------------------------------

    /// I/O読み取り
    ///
    /// 読み書きどちらのアクセスでも副作用は同じ。偶数アドレスの
    /// 読み取りはラッチを返し、奇数アドレスはフローティングバス。
    pub fn io_read(&mut self, reg: u8) -> u8 {
        let reg = reg & 0x0F;
        self.io_access(reg);

        if (reg & 1) == 0 {
            self.latch
        } else {
            0xFF
        }
    }

    /// I/O書き込み
    pub fn io_write(&mut self, reg: u8, value: u8) {
        let reg = reg & 0x0F;
        self.io_access(reg);

        // 書き込みロードモードならラッチに値を設定
        if self.seq_func == SequencerFunction::DataLoadWrite {
            self.latch = value;
        }
    }

    /// アクセス共通の副作用
    fn io_access(&mut self, reg: u8) {
        match reg {
            // Phase 0-3 ステッパーモーター制御
            0x00..=0x07 => self.control_stepper(reg),
            // Motor off / on
            0x08 => self.control_motor(false),
            0x09 => self.control_motor(true),
            // Drive 1 / 2 select
            0x0A => self.select_drive(0),
            0x0B => self.select_drive(1),
            // Q6L / Q6H / Q7L / Q7H
            0x0C..=0x0F => self.update_sequencer_function(reg),
            _ => {}
        }

        // Q6L (shift): 書き込みモードならラッチをディスクへシフトアウト
        if reg == 0x0C && self.seq_func == SequencerFunction::DataShiftWrite {
            self.write_nibble();
        }

        // センスモード中はラッチのbit7が書き込みプロテクトを反映する
        if self.seq_func == SequencerFunction::CheckWriteProtAndInitWrite {
            self.latch = if self.drives[self.selected_drive].write_protected {
                0x80
            } else {
                0x00
            };
        }
    }

    /// シーケンサー機能を更新（Q6: $C0xC/$C0xD、Q7: $C0xE/$C0xF）
    fn update_sequencer_function(&mut self, reg: u8) {
        match reg & 0x03 {
            0x00 => self.q6 = false, // Q6L
            0x01 => self.q6 = true,  // Q6H
            0x02 => self.q7 = false, // Q7L
            0x03 => self.q7 = true,  // Q7H
            _ => {}
        }

        let func = match (self.q7, self.q6) {
            (false, false) => SequencerFunction::ReadSequencing,
            (false, true) => SequencerFunction::CheckWriteProtAndInitWrite,
            (true, false) => SequencerFunction::DataShiftWrite,
            (true, true) => SequencerFunction::DataLoadWrite,
        };
        if self.seq_func != func {
            log_sequencer_mode(self.q6, self.q7);
        }
        self.seq_func = func;
    }

    /// モーター制御
    fn control_motor(&mut self, on: bool) {
        if on != self.motor_on {
            self.motor_on = on;
            if on {
                log_motor_on();
            } else {
                log_motor_off();
            }
        }
    }

    /// ドライブ選択
    fn select_drive(&mut self, drive: usize) {
        if drive != self.selected_drive {
            self.selected_drive = drive;
            log_drive_select(drive);
        }
    }

    /// ステッパーモーター制御
    ///
    /// フェーズのON遷移のみでヘッドが動く。現在のマグネットフェーズ
    /// （ハーフトラック位置 mod 4）に対して+1 mod 4のフェーズが
    /// エナジャイズされたら+1ハーフトラック、-1 mod 4なら-1。
    fn control_stepper(&mut self, reg: u8) {
        let phase = (reg >> 1) & 3;
        let phase_bit = 1u8 << phase;

        if (reg & 1) != 0 {
            self.phase_mask |= phase_bit;
            self.step_head(phase);
        } else {
            self.phase_mask &= !phase_bit;
        }
    }

    fn step_head(&mut self, energized: u8) {
        let drive = &mut self.drives[self.selected_drive];
        let current = (drive.phase & 3) as u8;
        let old_track = drive.current_track();

        if energized == (current + 1) & 3 {
            drive.phase = (drive.phase + 1).min(MAX_HALF_TRACK);
        } else if energized == (current + 3) & 3 {
            drive.phase = (drive.phase - 1).max(0);
        }

        let new_track = drive.current_track();
        if new_track != old_track {
            log_track_change(old_track as u8, new_track as u8);
        }
    }

    /// ニブルタイマーを進める
    ///
    /// モーターON・読み取りシフトモード・ディスクありのとき、
    /// 32サイクルごとに1ニブルをラッチへ送り込む。端数サイクルは
    /// 次回呼び出しへ繰り越す。
    pub fn advance(&mut self, cycles: u64) {
        if !self.motor_on || self.seq_func != SequencerFunction::ReadSequencing {
            self.cycle_acc = 0;
            return;
        }
        let d = self.selected_drive;
        if !self.drives[d].has_disk() {
            self.cycle_acc = 0;
            return;
        }

        self.cycle_acc += cycles;
        while self.cycle_acc >= CYCLES_PER_NIBBLE {
            self.cycle_acc -= CYCLES_PER_NIBBLE;
            let drive = &mut self.drives[d];
            let track = drive.current_track();
            let pos = drive.nibble_pos;
            if let Some(nibbles) = drive.nibbles.as_ref() {
                self.latch = nibbles[track * NIB_TRACK_SIZE + pos];
                drive.nibble_pos = (pos + 1) % NIB_TRACK_SIZE;
                log_nibble(track, pos, self.latch);
                self.check_sync_marker(track, pos);
            }
        }
    }

    /// 同期マーカー検出（ログ用）
    ///
    /// ラッチを通過したニブル列からD5 AA 96（アドレス）と
    /// D5 AA AD（データ）のプロローグを検出する。
    fn check_sync_marker(&mut self, track: usize, pos: usize) {
        self.sync_buf[0] = self.sync_buf[1];
        self.sync_buf[1] = self.sync_buf[2];
        self.sync_buf[2] = self.latch;

        if self.sync_buf == [0xD5, 0xAA, 0x96] {
            log_sync_found("D5 AA 96 (Address)", track, pos);
        } else if self.sync_buf == [0xD5, 0xAA, 0xAD] {
            log_sync_found("D5 AA AD (Data)", track, pos);
        }
    }

    /// 書き込みシフト: ラッチを現在位置へ書き込んで1ニブル進める
    fn write_nibble(&mut self) {
        let d = self.selected_drive;
        if !self.motor_on {
            return;
        }
        let latch = self.latch;
        let drive = &mut self.drives[d];
        if drive.write_protected {
            return;
        }
        let track = drive.current_track();
        let pos = drive.nibble_pos;
        if let Some(nibbles) = drive.nibbles.as_mut() {
            nibbles[track * NIB_TRACK_SIZE + pos] = latch;
            drive.nibble_pos = (pos + 1) % NIB_TRACK_SIZE;
            drive.modified = true;
        }
    }

    //--------------------------------------------------
    // GCRエンコード/デコード
    //--------------------------------------------------

    /// DSKイメージ全体をニブル列へ変換
    ///
    /// トラックレイアウト:
    ///   GAP1 48バイト、セクタごとに
    ///   [D5 AA 96 + 4-and-4アドレス + DE AA EB] GAP2 6バイト
    ///   [D5 AA AD + 342ニブル + チェックサム + DE AA EB] GAP3 27バイト
    /// 残りは自己同期バイト（0xFF）で6656まで埋める。
    fn encode_dsk(dsk_data: &[u8]) -> Vec<u8> {
        let mut nib = vec![0xFFu8; NIB_SIZE];

        for track in 0..TRACKS {
            let mut pos = track * NIB_TRACK_SIZE + 48; // GAP1

            for sector in 0..SECTORS_PER_TRACK {
                // 物理セクタsectorには論理セクタDOS_SECTOR_ORDER[sector]が入る
                let logical = DOS_SECTOR_ORDER[sector];
                let dsk_offset = track * BYTES_PER_TRACK + logical * BYTES_PER_SECTOR;

                // アドレスフィールド
                nib[pos] = 0xD5;
                nib[pos + 1] = 0xAA;
                nib[pos + 2] = 0x96;
                pos += 3;
                pos = Self::encode_4and4(&mut nib, pos, VOLUME_NUMBER);
                pos = Self::encode_4and4(&mut nib, pos, track as u8);
                pos = Self::encode_4and4(&mut nib, pos, sector as u8);
                let checksum = VOLUME_NUMBER ^ track as u8 ^ sector as u8;
                pos = Self::encode_4and4(&mut nib, pos, checksum);
                nib[pos] = 0xDE;
                nib[pos + 1] = 0xAA;
                nib[pos + 2] = 0xEB;
                pos += 3;

                // GAP2（自己同期）
                pos += 6;

                // データフィールド
                nib[pos] = 0xD5;
                nib[pos + 1] = 0xAA;
                nib[pos + 2] = 0xAD;
                pos += 3;
                let encoded =
                    Self::encode_6and2(&dsk_data[dsk_offset..dsk_offset + BYTES_PER_SECTOR]);
                nib[pos..pos + 343].copy_from_slice(&encoded);
                pos += 343;
                nib[pos] = 0xDE;
                nib[pos + 1] = 0xAA;
                nib[pos + 2] = 0xEB;
                pos += 3;

                // GAP3（自己同期）
                pos += 27;
            }
        }

        nib
    }

    /// 4-and-4エンコード（奇数ビット列、偶数ビット列の2バイト）
    fn encode_4and4(nib: &mut [u8], pos: usize, value: u8) -> usize {
        nib[pos] = (value >> 1) | 0xAA;
        nib[pos + 1] = value | 0xAA;
        pos + 2
    }

    /// 4-and-4デコード
    fn decode_4and4(odd: u8, even: u8) -> u8 {
        ((odd << 1) | 1) & even
    }

    /// 6-and-2エンコーディング
    ///
    /// 256バイトのセクタを342ニブル+チェックサム1ニブルに展開する。
    /// 各バイトの下位2ビット（D1,D0を入れ替えたもの）を86バイトの
    /// 補助バッファに集め、逆順で先に書き出す。
    fn encode_6and2(data: &[u8]) -> [u8; 343] {
        let mut aux = [0u8; 86];
        for i in 0..256 {
            let idx = i % 86;
            let shift = 2 * (i / 86);
            let two = ((data[i] & 0x01) << 1) | ((data[i] & 0x02) >> 1);
            aux[idx] |= two << shift;
        }

        let mut out = [0u8; 343];
        let mut k = 0;
        let mut checksum = 0u8;

        // 補助バッファを逆順でエンコード（XORチェーン）
        for i in (0..86).rev() {
            out[k] = WRITE_TABLE[((aux[i] ^ checksum) & 0x3F) as usize];
            checksum = aux[i];
            k += 1;
        }

        // メインデータ（上位6ビット）
        for i in 0..256 {
            let six = data[i] >> 2;
            out[k] = WRITE_TABLE[((six ^ checksum) & 0x3F) as usize];
            checksum = six;
            k += 1;
        }

        // 最終チェックサム
        out[k] = WRITE_TABLE[(checksum & 0x3F) as usize];
        out
    }

    /// 6-and-2デコード（チェックサム検証付き）
    fn decode_6and2(encoded: &[u8]) -> Option<[u8; 256]> {
        if encoded.len() < 343 {
            return None;
        }

        let mut inverse = [0xFFu8; 256];
        for (i, &code) in WRITE_TABLE.iter().enumerate() {
            inverse[code as usize] = i as u8;
        }

        // 補助バイト: ストリーム先頭86個はaux[85]..aux[0]の順
        let mut aux = [0u8; 86];
        let mut prev = 0u8;
        for (j, &code) in encoded.iter().take(86).enumerate() {
            let six = inverse[code as usize];
            if six == 0xFF {
                return None;
            }
            let val = six ^ prev;
            prev = val;
            aux[85 - j] = val;
        }

        // メインデータ（上位6ビット）
        let mut data = [0u8; 256];
        for i in 0..256 {
            let six = inverse[encoded[86 + i] as usize];
            if six == 0xFF {
                return None;
            }
            let val = six ^ prev;
            prev = val;
            data[i] = val << 2;
        }

        // チェックサム照合
        let check = inverse[encoded[342] as usize];
        if check == 0xFF || check != prev {
            return None;
        }

        // 下位2ビットを復元（エンコード時の入れ替えを戻す）
        for i in 0..256 {
            let idx = i % 86;
            let shift = 2 * (i / 86);
            let two = (aux[idx] >> shift) & 0x03;
            data[i] |= ((two & 0x01) << 1) | ((two & 0x02) >> 1);
        }

        Some(data)
    }

    /// ニブルトラックから物理セクタ1つをデコード
    fn decode_sector(nib_track: &[u8], target_sector: usize) -> Option<[u8; 256]> {
        let mut pos = 0;
        while pos + 11 < nib_track.len() {
            // アドレスフィールドマーカー (D5 AA 96)
            if nib_track[pos] == 0xD5 && nib_track[pos + 1] == 0xAA && nib_track[pos + 2] == 0x96 {
                let sector = Self::decode_4and4(nib_track[pos + 7], nib_track[pos + 8]);

                if sector as usize == target_sector {
                    // データフィールドマーカー (D5 AA AD) を探す
                    let mut data_pos = pos + 11;
                    while data_pos + 345 < nib_track.len() {
                        if nib_track[data_pos] == 0xD5
                            && nib_track[data_pos + 1] == 0xAA
                            && nib_track[data_pos + 2] == 0xAD
                        {
                            return Self::decode_6and2(&nib_track[data_pos + 3..]);
                        }
                        data_pos += 1;
                    }
                    return None;
                }
            }
            pos += 1;
        }
        None
    }

    /// ディスクイメージをDSK形式でエクスポート
    ///
    /// ニブル列から全セクタを逆デコードし、物理→論理の
    /// デインターリーブを行って元のバイト配置へ戻す。
    pub fn export_dsk(&self, drive: usize) -> Result<Vec<u8>, Error> {
        if drive > 1 {
            return Err(Error::InvalidDrive(drive));
        }
        let floppy = &self.drives[drive];
        let nibbles = match &floppy.nibbles {
            Some(n) => n,
            None => return Err(Error::InvalidDrive(drive)),
        };

        let mut dsk_data = vec![0u8; DSK_SIZE];
        for track in 0..TRACKS {
            let nib_track = &nibbles[track * NIB_TRACK_SIZE..(track + 1) * NIB_TRACK_SIZE];
            for physical in 0..SECTORS_PER_TRACK {
                if let Some(sector_data) = Self::decode_sector(nib_track, physical) {
                    let logical = DOS_SECTOR_ORDER[physical];
                    let offset = track * BYTES_PER_TRACK + logical * BYTES_PER_SECTOR;
                    dsk_data[offset..offset + BYTES_PER_SECTOR].copy_from_slice(&sector_data);
                } else {
                    log::warn!("export: could not decode T{} S{}", track, physical);
                }
            }
        }
        Ok(dsk_data)
    }
}

impl BusDevice for Disk2 {
    fn read(&mut self, address: u16) -> u8 {
        self.io_read((address & 0x0F) as u8)
    }

    fn write(&mut self, address: u16, value: u8) {
        self.io_write((address & 0x0F) as u8, value);
    }

    fn address_range(&self) -> AddressRange {
        (DISK_IO_START, DISK_IO_END)
    }

    fn name(&self) -> &'static str {
        "Disk2"
    }
}
