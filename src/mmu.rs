//! Apple IIe メモリ管理ユニット（MMU）
//!
//! 全てのCPUアクセスをアドレスでデコードし、RAM / ROM / キーボード /
//! Disk II / ソフトスイッチへルーティングする。ソフトスイッチは
//! 読み書きどちらのアクセスでも副作用を持つ（値バイトは無視される）。

use crate::bus::{AddressRange, BusDevice};
use crate::cpu::MemoryBus;
use crate::disk::{Disk2, DISK_IO_END, DISK_IO_START};
use crate::keyboard::{Keyboard, KB_DATA, KB_STROBE};
use crate::memory::{Ram, Rom, RAM_END, ROM_START};

/// I/Oページ先頭
pub const IO_START: u16 = 0xC000;
/// I/Oページ終端
pub const IO_END: u16 = 0xCFFF;

// ビデオ/スクリーンモードのソフトスイッチ（Apple IIe実機アドレス）
pub const SW_GRAPHICS_MODE: u16 = 0xC050;
pub const SW_TEXT_MODE: u16 = 0xC051;
pub const SW_FULL_SCREEN: u16 = 0xC052;
pub const SW_MIXED_MODE: u16 = 0xC053;
pub const SW_PAGE1: u16 = 0xC054;
pub const SW_PAGE2: u16 = 0xC055;
pub const SW_LORES: u16 = 0xC056;
pub const SW_HIRES: u16 = 0xC057;

// バンク切り替えスイッチ（連続した16種のうち8種を使用）
pub const BANK_READ_MAIN: u16 = 0xC080;
pub const BANK_READ_AUX: u16 = 0xC081;
pub const BANK_WRITE_MAIN: u16 = 0xC082;
pub const BANK_WRITE_AUX: u16 = 0xC083;
pub const BANK_READ_MAIN_WRITE_AUX: u16 = 0xC084;
pub const BANK_READ_AUX_WRITE_MAIN: u16 = 0xC085;
pub const BANK_READ_MAIN_WRITE_MAIN: u16 = 0xC086;
pub const BANK_READ_AUX_WRITE_AUX: u16 = 0xC087;

/// ビデオモード
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum VideoMode {
    Text,
    Graphics,
}

/// スクリーンモード
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum ScreenMode {
    Full,
    Mixed,
}

/// 表示ページ
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum PageSelect {
    Page1,
    Page2,
}

/// グラフィックスモード
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum GraphicsMode {
    Lores,
    Hires,
}

/// メモリバンク
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum MemoryBank {
    Main,
    Aux,
}

/// ソフトスイッチの状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct SoftSwitches {
    pub video_mode: VideoMode,
    pub screen_mode: ScreenMode,
    pub page_select: PageSelect,
    pub graphics_mode: GraphicsMode,
    pub read_bank: MemoryBank,
    pub write_bank: MemoryBank,
}

impl Default for SoftSwitches {
    fn default() -> Self {
        SoftSwitches {
            video_mode: VideoMode::Text, // 起動時はテキストモード
            screen_mode: ScreenMode::Full,
            page_select: PageSelect::Page1,
            graphics_mode: GraphicsMode::Lores,
            read_bank: MemoryBank::Main,
            write_bank: MemoryBank::Main,
        }
    }
}

/// MMU本体
///
/// 全デバイスを所有し、アドレス優先順位は
/// キーボードI/O > Disk II I/O > ソフトスイッチ（$C0xxページ内）。
/// RAM/ROMは範囲で排他。未マップ領域は読み取り0xFF、書き込み破棄。
pub struct Mmu {
    pub ram: Ram,
    pub rom: Rom,
    pub keyboard: Option<Keyboard>,
    pub disk: Option<Disk2>,
    pub switches: SoftSwitches,
}

impl Default for Mmu {
    fn default() -> Self {
        Self::new()
    }
}

impl Mmu {
    pub fn new() -> Self {
        Mmu {
            ram: Ram::new(),
            rom: Rom::new(),
            keyboard: Some(Keyboard::new()),
            disk: Some(Disk2::new()),
            switches: SoftSwitches::default(),
        }
    }

    /// ソフトスイッチ状態を起動時デフォルトに戻す
    pub fn reset_switches(&mut self) {
        self.switches = SoftSwitches::default();
    }

    /// ソフトスイッチ読み取り
    ///
    /// モード照会の戻り値は副作用を適用する「前」の状態から計算する。
    /// 照会結果は、そのアドレスが選択するモードが現在有効なら0x00、
    /// そうでなければ0xFF。バンクスイッチは常に0x00を返す。
    fn read_soft_switch(&mut self, address: u16) -> u8 {
        let result = match address {
            SW_GRAPHICS_MODE => self.query(self.switches.video_mode == VideoMode::Graphics),
            SW_TEXT_MODE => self.query(self.switches.video_mode == VideoMode::Text),
            SW_FULL_SCREEN => self.query(self.switches.screen_mode == ScreenMode::Full),
            SW_MIXED_MODE => self.query(self.switches.screen_mode == ScreenMode::Mixed),
            SW_PAGE1 => self.query(self.switches.page_select == PageSelect::Page1),
            SW_PAGE2 => self.query(self.switches.page_select == PageSelect::Page2),
            SW_LORES => self.query(self.switches.graphics_mode == GraphicsMode::Lores),
            SW_HIRES => self.query(self.switches.graphics_mode == GraphicsMode::Hires),
            BANK_READ_MAIN..=BANK_READ_AUX_WRITE_AUX => 0x00,
            _ => 0xFF,
        };
        self.apply_soft_switch(address);
        result
    }

    fn query(&self, active: bool) -> u8 {
        if active {
            0x00
        } else {
            0xFF
        }
    }

    /// ソフトスイッチの副作用を適用（読み書き共通）
    fn apply_soft_switch(&mut self, address: u16) {
        match address {
            SW_GRAPHICS_MODE => self.switches.video_mode = VideoMode::Graphics,
            SW_TEXT_MODE => self.switches.video_mode = VideoMode::Text,
            SW_FULL_SCREEN => self.switches.screen_mode = ScreenMode::Full,
            SW_MIXED_MODE => self.switches.screen_mode = ScreenMode::Mixed,
            SW_PAGE1 => self.switches.page_select = PageSelect::Page1,
            SW_PAGE2 => self.switches.page_select = PageSelect::Page2,
            SW_LORES => self.switches.graphics_mode = GraphicsMode::Lores,
            SW_HIRES => self.switches.graphics_mode = GraphicsMode::Hires,
            BANK_READ_MAIN..=BANK_READ_AUX_WRITE_AUX => self.handle_bank_switch(address),
            _ => {}
        }
    }

    /// バンク切り替え
    fn handle_bank_switch(&mut self, address: u16) {
        match address {
            BANK_READ_MAIN => self.switches.read_bank = MemoryBank::Main,
            BANK_READ_AUX => self.switches.read_bank = MemoryBank::Aux,
            BANK_WRITE_MAIN => self.switches.write_bank = MemoryBank::Main,
            BANK_WRITE_AUX => self.switches.write_bank = MemoryBank::Aux,
            BANK_READ_MAIN_WRITE_AUX => {
                self.switches.read_bank = MemoryBank::Main;
                self.switches.write_bank = MemoryBank::Aux;
            }
            BANK_READ_AUX_WRITE_MAIN => {
                self.switches.read_bank = MemoryBank::Aux;
                self.switches.write_bank = MemoryBank::Main;
            }
            BANK_READ_MAIN_WRITE_MAIN => {
                self.switches.read_bank = MemoryBank::Main;
                self.switches.write_bank = MemoryBank::Main;
            }
            BANK_READ_AUX_WRITE_AUX => {
                self.switches.read_bank = MemoryBank::Aux;
                self.switches.write_bank = MemoryBank::Aux;
            }
            _ => {}
        }
    }

    /// 副作用なしの覗き見読み取り（デバッガ/メモリビューア用）
    ///
    /// ソフトスイッチもキーボードストローブもDisk IIステートマシンも
    /// 一切動かさず、デバイスの生の状態だけを読む。
    pub fn peek(&self, address: u16) -> u8 {
        match address {
            0x0000..=RAM_END => self.ram.peek(address),
            KB_DATA => match &self.keyboard {
                Some(kbd) => kbd.peek_latch(),
                None => 0xFF,
            },
            IO_START..=IO_END => 0xFF,
            ROM_START..=0xFFFF => self.rom.peek(address),
        }
    }
}

impl MemoryBus for Mmu {
    fn read(&mut self, address: u16) -> u8 {
        match address {
            0x0000..=RAM_END => {
                // アクセス前に現在のバンク選択をRAMへプッシュ
                self.ram
                    .set_read_bank(self.switches.read_bank == MemoryBank::Aux);
                self.ram.read(address)
            }
            // キーボードが未接続なら$C000/$C010はソフトスイッチ経路へ
            KB_DATA | KB_STROBE => match self.keyboard.as_mut() {
                Some(kbd) => kbd.read(address),
                None => self.read_soft_switch(address),
            },
            DISK_IO_START..=DISK_IO_END => match self.disk.as_mut() {
                Some(disk) => disk.io_read((address & 0x0F) as u8),
                None => self.read_soft_switch(address),
            },
            IO_START..=0xC0FF => self.read_soft_switch(address),
            ROM_START..=0xFFFF => self.rom.read(address),
            // $C100-$CFFF等の未マップ領域
            _ => 0xFF,
        }
    }

    fn write(&mut self, address: u16, value: u8) {
        match address {
            0x0000..=RAM_END => {
                self.ram
                    .set_write_bank(self.switches.write_bank == MemoryBank::Aux);
                self.ram.write(address, value);
            }
            KB_DATA | KB_STROBE => match self.keyboard.as_mut() {
                Some(kbd) => kbd.write(address, value),
                None => self.apply_soft_switch(address),
            },
            DISK_IO_START..=DISK_IO_END => match self.disk.as_mut() {
                Some(disk) => disk.io_write((address & 0x0F) as u8, value),
                None => self.apply_soft_switch(address),
            },
            // ソフトスイッチは書き込みでも読み取りと同じ副作用
            IO_START..=0xC0FF => self.apply_soft_switch(address),
            ROM_START..=0xFFFF => self.rom.write(address, value),
            // 未マップ領域への書き込みは黙って破棄
            _ => {}
        }
    }
}

impl BusDevice for Mmu {
    fn read(&mut self, address: u16) -> u8 {
        MemoryBus::read(self, address)
    }

    fn write(&mut self, address: u16, value: u8) {
        MemoryBus::write(self, address, value)
    }

    fn address_range(&self) -> AddressRange {
        (0x0000, 0xFFFF)
    }

    fn name(&self) -> &'static str {
        "MMU"
    }
}
