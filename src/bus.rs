//! バスデバイスの共通インターフェース
//!
//! Apple IIeのアドレスバスに接続されるデバイス（RAM、ROM、キーボード、
//! Disk II、MMU）が実装する役割を定義

/// デバイスが所有するアドレス範囲（inclusive）
pub type AddressRange = (u16, u16);

/// バスデバイスの役割
///
/// 各デバイスは16ビットアドレスでの読み書きと、自身が所有する
/// アドレス範囲を公開する。範囲外アクセスの扱いはデバイス側の責任
/// （ROMは0xFFを返す等）。
pub trait BusDevice {
    /// 1バイト読み取り
    fn read(&mut self, address: u16) -> u8;
    /// 1バイト書き込み
    fn write(&mut self, address: u16, value: u8);
    /// 所有するアドレス範囲を取得
    fn address_range(&self) -> AddressRange;
    /// デバイス名を取得
    fn name(&self) -> &'static str;
}
