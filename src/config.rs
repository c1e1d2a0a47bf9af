//! 設定ファイル管理モジュール
//!
//! エミュレータの設定をJSON形式で永続化

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// 設定ファイルのデフォルトパス
const CONFIG_FILE: &str = "a2e_config.json";

fn default_cycles() -> u64 {
    1_000_000
}

/// エミュレータ設定
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// 最後に使用したROMのパス
    pub last_rom: Option<String>,
    /// 最後に使用したディスク1のパス
    pub last_disk1: Option<String>,
    /// 最後に使用したディスク2のパス
    pub last_disk2: Option<String>,
    /// ロードするディスクを書き込みプロテクトにするか
    pub write_protect: bool,
    /// ヘッドレス実行のデフォルトサイクル数
    #[serde(default = "default_cycles")]
    pub cycles: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            last_rom: None,
            last_disk1: None,
            last_disk2: None,
            write_protect: false,
            cycles: default_cycles(),
        }
    }
}

impl Config {
    /// 設定ファイルを読み込む
    pub fn load() -> Self {
        Self::load_from(CONFIG_FILE)
    }

    /// 指定したパスから設定を読み込む
    ///
    /// ファイルが無い/壊れている場合はデフォルトにフォールバック。
    pub fn load_from<P: AsRef<Path>>(path: P) -> Self {
        match fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(config) => config,
                Err(e) => {
                    log::warn!("Failed to parse config: {}, using defaults", e);
                    Config::default()
                }
            },
            Err(_) => Config::default(),
        }
    }

    /// 設定ファイルを保存する
    pub fn save(&self) -> Result<(), String> {
        self.save_to(CONFIG_FILE)
    }

    /// 指定したパスに設定を保存する
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<(), String> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;
        fs::write(path, json).map_err(|e| format!("Failed to write config: {}", e))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config = Config::load_from("/nonexistent/a2e_config.json");
        assert_eq!(config.cycles, 1_000_000);
        assert!(!config.write_protect);
        assert!(config.last_rom.is_none());
    }

    #[test]
    fn test_roundtrip_through_json() {
        let config = Config {
            last_rom: Some("roms/apple2e.rom".to_string()),
            write_protect: true,
            ..Config::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(back.last_rom.as_deref(), Some("roms/apple2e.rom"));
        assert!(back.write_protect);
    }
}
