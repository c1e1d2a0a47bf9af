//! スナップショット機能
//!
//! デバッグUI向けにCPUとディスクの状態を値渡しで公開する。
//! スナップショットはコピーなので、UI側が生きた状態への参照を
//! 保持することはない。

use serde::{Deserialize, Serialize};

/// CPUレジスタのスナップショット
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CpuSnapshot {
    pub pc: u16,
    pub sp: u8,
    pub a: u8,
    pub x: u8,
    pub y: u8,
    /// ステータスレジスタ（bit5は常に1）
    pub p: u8,
    /// 累積サイクル数
    pub cycles: u64,
    /// リセットベクターのフェッチ済みか
    pub initialized: bool,
}

/// ドライブ1台分のスナップショット
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct DriveSnapshot {
    pub has_disk: bool,
    /// 現在のトラック（0-34）
    pub current_track: usize,
    /// トラック内のニブル位置（0-6655）
    pub nibble_pos: usize,
    pub filename: Option<String>,
    pub write_protected: bool,
}

/// Disk IIコントローラのスナップショット
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct DiskSnapshot {
    pub motor_on: bool,
    /// 選択中のドライブ（0 or 1）
    pub selected_drive: usize,
    pub q6: bool,
    pub q7: bool,
    /// エナジャイズ中のフェーズのビットマスク（bit0-3）
    pub phase_mask: u8,
    /// データラッチ
    pub data_latch: u8,
    pub drives: [DriveSnapshot; 2],
}
