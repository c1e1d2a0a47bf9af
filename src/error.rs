//! エミュレータのエラー型
//!
//! CPUとMMUは全入力に対して全域関数なのでエラーを返さない。
//! エラーになるのはロード系と、初期化前のステップ実行のみ。

use std::fmt;

/// クレート共通のエラー
#[derive(Debug)]
pub enum Error {
    /// ディスクイメージのサイズが143,360バイトではない
    InvalidImageSize(usize),
    /// ドライブ番号が0/1以外
    InvalidDrive(usize),
    /// ROMロードとリセットが済む前にステップ実行した
    NotInitialized,
    /// ホストのファイルシステムエラー
    IoFailure(std::io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidImageSize(size) => {
                write!(f, "invalid disk image size: {} bytes (expected 143360)", size)
            }
            Error::InvalidDrive(drive) => write!(f, "invalid drive number: {}", drive),
            Error::NotInitialized => write!(f, "machine not initialized (load ROM and reset first)"),
            Error::IoFailure(e) => write!(f, "I/O failure: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::IoFailure(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::IoFailure(e)
    }
}
