//! A2E - Apple IIe Emulation Core in Rust
//!
//! Apple IIeのコアサブシステムをサイクル単位で駆動するエミュレーション
//! ライブラリ:
//! - NMOS 6502 CPU（テーブルディスパッチ、BCD演算対応）
//! - バンク切り替えMMUとソフトスイッチ
//! - Disk IIコントローラ（DSK形式、6-and-2 GCRエンコード）
//! - キーボードラッチ
//!
//! ウィンドウ/描画/オーディオはホスト側の責務で、このクレートは
//! スナップショットと副作用なしのメモリ読み取りだけを公開する。

pub mod apple2e;
pub mod bus;
pub mod config;
pub mod cpu;
pub mod disk;
pub mod disk_log;
pub mod error;
pub mod keyboard;
pub mod memory;
pub mod mmu;
pub mod snapshot;
