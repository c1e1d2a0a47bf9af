//! Disk II ログシステム
//!
//! 原則:
//! 1. ログは「現象」ではなく「判断」を記録
//! 2. 状態遷移のみ記録（毎回のI/Oは記録しない）
//! 3. レベル分離: FLOW / STATE / NIBBLE

use std::sync::atomic::{AtomicU32, Ordering};

bitflags::bitflags! {
    /// ログカテゴリ
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct DiskLogLevel: u32 {
        /// L1: 何が起きているか（人間向け）
        const FLOW   = 0b0001;
        /// L2: 状態遷移（開発者向け）
        const STATE  = 0b0010;
        /// L3: 生データ（短時間のみ）
        const NIBBLE = 0b0100;
    }
}

/// グローバルログレベル
static LOG_LEVEL: AtomicU32 = AtomicU32::new(0);

/// ログレベルを設定
pub fn set_log_level(level: DiskLogLevel) {
    LOG_LEVEL.store(level.bits(), Ordering::Relaxed);
}

/// 現在のログレベルを取得
pub fn get_log_level() -> DiskLogLevel {
    DiskLogLevel::from_bits_truncate(LOG_LEVEL.load(Ordering::Relaxed))
}

/// ログレベルが有効かチェック
#[inline]
pub fn is_enabled(flag: DiskLogLevel) -> bool {
    (LOG_LEVEL.load(Ordering::Relaxed) & flag.bits()) != 0
}

/// "flow,state"のようなカンマ区切り指定をパース
pub fn parse_log_level(s: &str) -> DiskLogLevel {
    let mut level = DiskLogLevel::empty();
    for part in s.split(',') {
        match part.trim().to_lowercase().as_str() {
            "flow" => level |= DiskLogLevel::FLOW,
            "state" => level |= DiskLogLevel::STATE,
            "nibble" => level |= DiskLogLevel::NIBBLE,
            "all" => level = DiskLogLevel::all(),
            "" | "none" => {}
            other => log::warn!("Unknown disk log level: {}", other),
        }
    }
    level
}

// ============================================================
// ログ出力関数（状態遷移ベース）
// ============================================================

/// [FLOW] モーターON
pub fn log_motor_on() {
    if is_enabled(DiskLogLevel::FLOW) {
        log::info!("[DISK] Motor ON");
    }
}

/// [FLOW] モーターOFF
pub fn log_motor_off() {
    if is_enabled(DiskLogLevel::FLOW) {
        log::info!("[DISK] Motor OFF");
    }
}

/// [FLOW] ドライブ選択
pub fn log_drive_select(drive: usize) {
    if is_enabled(DiskLogLevel::FLOW) {
        log::info!("[DISK] Drive {} selected", drive + 1);
    }
}

/// [STATE] トラック変更
pub fn log_track_change(from: u8, to: u8) {
    if is_enabled(DiskLogLevel::STATE) {
        log::info!("[STATE] Track {} -> {}", from, to);
    }
}

/// [STATE] シーケンサーモード変更
pub fn log_sequencer_mode(q6: bool, q7: bool) {
    if is_enabled(DiskLogLevel::STATE) {
        log::debug!("[STATE] Q6={} Q7={}", q6 as u8, q7 as u8);
    }
}

/// [FLOW] 同期マーク検出
pub fn log_sync_found(marker: &str, track: usize, pos: usize) {
    if is_enabled(DiskLogLevel::FLOW) {
        log::debug!("[DISK] Sync {} at T={} pos={}", marker, track, pos);
    }
}

/// [FLOW] ディスク挿入/排出
pub fn log_disk_inserted(drive: usize, name: Option<&str>) {
    if is_enabled(DiskLogLevel::FLOW) {
        log::info!("[DISK] Inserted in drive {}: {}", drive + 1, name.unwrap_or("<memory>"));
    }
}

pub fn log_disk_ejected(drive: usize) {
    if is_enabled(DiskLogLevel::FLOW) {
        log::info!("[DISK] Ejected from drive {}", drive + 1);
    }
}

/// [NIBBLE] ラッチ更新（大量に出るので注意）
pub fn log_nibble(track: usize, pos: usize, nibble: u8) {
    if is_enabled(DiskLogLevel::NIBBLE) {
        log::trace!("[NIB] T={} pos={} ${:02X}", track, pos, nibble);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_log_level() {
        assert_eq!(parse_log_level("flow"), DiskLogLevel::FLOW);
        assert_eq!(
            parse_log_level("flow,state"),
            DiskLogLevel::FLOW | DiskLogLevel::STATE
        );
        assert_eq!(parse_log_level("all"), DiskLogLevel::all());
        assert_eq!(parse_log_level("none"), DiskLogLevel::empty());
    }

    #[test]
    fn test_level_gating() {
        set_log_level(DiskLogLevel::STATE);
        assert!(is_enabled(DiskLogLevel::STATE));
        assert!(!is_enabled(DiskLogLevel::FLOW));
        set_log_level(DiskLogLevel::empty());
        assert_eq!(get_log_level(), DiskLogLevel::empty());
    }
}
