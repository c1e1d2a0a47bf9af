//! A2E - Apple IIe エミュレータ（ヘッドレスCLIホスト）
//!
//! ROMとディスクイメージをロードし、指定サイクル数だけコアを回して
//! スナップショットやメモリダンプを出力する。GUIホストはこのバイナリ
//! ではなく、ライブラリのスナップショットAPIの上に別途構築する。
//!
//! # 使用方法
//! ```text
//! a2e --rom roms/apple2e.rom -1 dos33.dsk --cycles 2000000 --snapshot
//! ```

use a2e::apple2e::Apple2e;
use a2e::config::Config;
use a2e::disk_log;
use a2e::error::Error;
use clap::Parser;
use std::fs;
use std::path::Path;
use std::process;

/// A2E - Apple IIe Emulator
#[derive(Parser, Debug)]
#[command(name = "a2e")]
#[command(author = "A2E Project")]
#[command(version = "0.2.0")]
#[command(about = "A2E - Apple IIe emulation core (headless host)", long_about = None)]
struct Args {
    /// ROMファイル
    #[arg(short, long)]
    rom: Option<String>,

    /// ディスクイメージファイル（ドライブ1）
    #[arg(short = '1', long)]
    disk1: Option<String>,

    /// ディスクイメージファイル（ドライブ2）
    #[arg(short = '2', long)]
    disk2: Option<String>,

    /// 実行するサイクル数
    #[arg(long)]
    cycles: Option<u64>,

    /// ディスクを書き込みプロテクトでロード
    #[arg(long)]
    write_protect: bool,

    /// 実行後にCPU/ディスクスナップショットをJSONで出力
    #[arg(long)]
    snapshot: bool,

    /// 実行後に指定アドレスから256バイトをダンプ（16進指定、例: --dump C600）
    #[arg(long)]
    dump: Option<String>,

    /// ディスクログレベル (flow,state,nibble,all)
    #[arg(long, default_value = "")]
    disk_log: String,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    disk_log::set_log_level(disk_log::parse_log_level(&args.disk_log));

    let mut config = Config::load();
    let rom_path = match args.rom.clone().or_else(|| config.last_rom.clone()) {
        Some(path) => path,
        None => {
            eprintln!("No ROM specified (use --rom, see --help)");
            process::exit(1);
        }
    };

    let mut machine = Apple2e::new();

    // ROMロード
    match read_file(&rom_path) {
        Ok(data) => {
            machine.load_rom(&data);
            config.last_rom = Some(rom_path.clone());
        }
        Err(e) => {
            eprintln!("Failed to read ROM {}: {}", rom_path, e);
            process::exit(1);
        }
    }

    // ディスクロード
    let write_protect = args.write_protect || config.write_protect;
    let disks = [(0usize, args.disk1.clone()), (1usize, args.disk2.clone())];
    for (drive, path) in disks.into_iter() {
        let path = match path {
            Some(p) => p,
            None => continue,
        };
        let data = match read_file(&path) {
            Ok(data) => data,
            Err(e) => {
                eprintln!("Failed to read disk image {}: {}", path, e);
                process::exit(1);
            }
        };
        let name = Path::new(&path)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned());
        if let Err(e) = machine.load_disk(drive, &data, write_protect, name) {
            eprintln!("Failed to load disk {} into drive {}: {}", path, drive + 1, e);
            process::exit(1);
        }
        log::info!("Loaded disk {}: {}", drive + 1, path);
        match drive {
            0 => config.last_disk1 = Some(path),
            _ => config.last_disk2 = Some(path),
        }
    }

    machine.reset();

    let cycles = args.cycles.unwrap_or(config.cycles);
    match machine.step_cycles(cycles) {
        Ok(executed) => log::info!("Executed {} cycles", executed),
        Err(e) => {
            eprintln!("Execution failed: {}", e);
            process::exit(1);
        }
    }

    if args.snapshot {
        print_snapshots(&machine);
    }

    if let Some(dump) = args.dump.as_deref() {
        match parse_hex_addr(dump) {
            Ok(addr) => dump_memory(&machine, addr),
            Err(e) => {
                eprintln!("{}", e);
                process::exit(1);
            }
        }
    }

    if let Err(e) = config.save() {
        log::warn!("Could not save config: {}", e);
    }
}

/// ファイル全体を読み込む（失敗はIOFailureへ）
fn read_file(path: &str) -> Result<Vec<u8>, Error> {
    Ok(fs::read(path)?)
}

/// "$C600" / "0xC600" / "C600" 形式のアドレスをパース
fn parse_hex_addr(s: &str) -> Result<u16, String> {
    let trimmed = s.trim_start_matches('$').trim_start_matches("0x");
    u16::from_str_radix(trimmed, 16).map_err(|_| format!("Invalid address: {}", s))
}

/// CPU/ディスクのスナップショットをJSONで出力
fn print_snapshots(machine: &Apple2e) {
    let cpu = machine.snapshot_cpu();
    let disk = machine.snapshot_disk();
    match (
        serde_json::to_string_pretty(&cpu),
        serde_json::to_string_pretty(&disk),
    ) {
        (Ok(cpu_json), Ok(disk_json)) => {
            println!("CPU: {}", cpu_json);
            println!("Disk: {}", disk_json);
        }
        _ => eprintln!("Failed to serialize snapshots"),
    }
}

/// 指定アドレスから256バイトを16進+ASCIIでダンプ
///
/// 副作用なしのread_memory経由なのでソフトスイッチは発火しない。
fn dump_memory(machine: &Apple2e, base: u16) {
    for row in 0..16u16 {
        let row_addr = base.wrapping_add(row * 16);
        let mut hex = String::with_capacity(48);
        let mut ascii = String::with_capacity(16);
        for col in 0..16u16 {
            let byte = machine.read_memory(row_addr.wrapping_add(col));
            hex.push_str(&format!("{:02X} ", byte));
            ascii.push(if (32..127).contains(&byte) {
                byte as char
            } else {
                '.'
            });
        }
        println!("${:04X}  {} {}", row_addr, hex, ascii);
    }
}
