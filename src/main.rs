use std::env::VarError;
use std::fmt::Write;
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use indicatif::{MultiProgress, ProgressBar, ProgressState, ProgressStyle};
use indicatif_log_bridge::LogWrapper;
use log::{debug, error, info, trace};
use serialport::SerialPort;

use mangonel_lib::{Table, Variant, CHUNK_SIZE, CRC16, CRC16_TABLE, XMODEM, XMODEM_TABLE};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum VariantArg {
    /// Reflected CRC-16, polynomial 0xA001, initial value 0xFFFF
    Crc16,
    /// Xmodem-CRC, polynomial 0x1021, initial value 0x0000
    Xmodem,
}

impl VariantArg {
    fn variant(self) -> Variant {
        match self {
            VariantArg::Crc16 => CRC16,
            VariantArg::Xmodem => XMODEM,
        }
    }

    fn table(self) -> &'static Table {
        match self {
            VariantArg::Crc16 => &CRC16_TABLE,
            VariantArg::Xmodem => &XMODEM_TABLE,
        }
    }
}

#[derive(Parser)]
#[command(name = "mangonel", about = "Streaming CRC-16 for files, pipes and serial links")]
struct Cli {
    /// File to checksum; reads stdin when omitted or `-`
    #[arg(value_name = "FILE", conflicts_with = "serial_port")]
    input: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = VariantArg::Xmodem)]
    variant: VariantArg,

    /// Use the 256-entry lookup table instead of the bit-serial update
    #[arg(long)]
    table: bool,

    /// Checksum bytes received on this serial port
    #[arg(long, value_name = "PORT", requires = "length")]
    serial_port: Option<String>,

    #[arg(long, value_name = "BAUD", default_value_t = 115_200)]
    baud: u32,

    /// Number of bytes to receive from the serial port
    #[arg(long, value_name = "BYTES")]
    length: Option<u64>,

    #[arg(long, value_name = "MS", default_value_t = 1_000)]
    timeout_ms: u64,

    /// Expected checksum; exit with status 1 on mismatch
    #[arg(long, value_name = "HEX", value_parser = parse_hex)]
    expect: Option<u16>,
}

#[derive(Clone, Copy)]
enum Engine {
    BitSerial(Variant),
    Table(&'static Table),
}

impl Engine {
    fn variant(self) -> Variant {
        match self {
            Engine::BitSerial(variant) => variant,
            Engine::Table(table) => table.variant(),
        }
    }

    fn resume(self, crc: u16, data: &[u8]) -> u16 {
        match self {
            Engine::BitSerial(variant) => variant.resume(crc, data),
            Engine::Table(table) => table.resume(crc, data),
        }
    }
}

fn main() -> ExitCode {
    if let Err(VarError::NotPresent) = std::env::var("RUST_LOG") {
        std::env::set_var("RUST_LOG", "info");
    }
    let logger = env_logger::Builder::from_env(env_logger::Env::default()).build();

    let multi = MultiProgress::new();
    LogWrapper::new(multi.clone(), logger)
        .try_init()
        .expect("Failed to initialize logger.");

    let args = Cli::parse();
    let engine = if args.table {
        Engine::Table(args.variant.table())
    } else {
        Engine::BitSerial(args.variant.variant())
    };
    debug!(
        "Using {} ({}), check value {:#06X}.",
        engine.variant().name,
        if args.table { "table" } else { "bit-serial" },
        engine.variant().check()
    );

    let (crc, count) = if let Some(port_name) = &args.serial_port {
        let length = args.length.expect("--length is required with --serial-port");
        let mut port = open_serial_port(port_name, args.baud, Duration::from_millis(args.timeout_ms));
        info!("Receiving {} bytes on {}.", length, port_name);
        let progress = multi.add(progress_bar(Some(length)));
        let result = checksum_reader(&mut port.as_mut().take(length), engine, &progress)
            .and_then(|(crc, count)| expect_length(crc, count, length));
        progress.finish();
        multi.remove(&progress);
        result.expect("Failed to receive bytes from serial port.")
    } else {
        let mut input = open_input(args.input.as_deref()).expect("Failed to open input.");
        let progress = multi.add(progress_bar(input.len));
        let result = checksum_reader(&mut input.reader, engine, &progress);
        progress.finish();
        multi.remove(&progress);
        result.expect("Failed to read input.")
    };

    println!("{} {:#06X} {} bytes", engine.variant().name, crc, count);

    match args.expect {
        Some(expected) if expected != crc => {
            error!("Checksum mismatch: expected {:#06X}, got {:#06X}.", expected, crc);
            ExitCode::FAILURE
        }
        Some(_) => {
            info!("Checksum OK.");
            ExitCode::SUCCESS
        }
        None => ExitCode::SUCCESS,
    }
}

struct Input {
    reader: Box<dyn Read>,
    len: Option<u64>,
}

fn open_input(path: Option<&Path>) -> io::Result<Input> {
    match path {
        Some(path) if path != Path::new("-") => {
            let file = File::open(path)?;
            let len = file.metadata()?.len();
            debug!("Reading {} ({} bytes).", path.display(), len);
            Ok(Input {
                reader: Box::new(file),
                len: Some(len),
            })
        }
        _ => {
            debug!("Reading stdin.");
            Ok(Input {
                reader: Box::new(io::stdin().lock()),
                len: None,
            })
        }
    }
}

fn open_serial_port(port: &str, baud: u32, timeout: Duration) -> Box<dyn SerialPort> {
    serialport::new(port, baud)
        .timeout(timeout)
        .open()
        .expect("Failed to open serial port")
}

fn progress_bar(len: Option<u64>) -> ProgressBar {
    let Some(len) = len else {
        return ProgressBar::hidden();
    };
    let progress = ProgressBar::new(len);
    progress.set_style(ProgressStyle::with_template("{spinner:.green} [{elapsed_precise}] [{bar:60.cyan/blue}] {bytes}/{total_bytes} ({eta})")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .with_key(
            "eta",
            |state: &ProgressState, w: &mut dyn Write|
                { let _ = write!(w, "{:.1}s", state.eta().as_secs_f64()); })
        .progress_chars("#>-"));
    progress
}

/// Folds everything `reader` yields through `engine`, one chunk at a time.
///
/// Returns the checksum and the number of bytes consumed.
fn checksum_reader<R: Read + ?Sized>(
    reader: &mut R,
    engine: Engine,
    progress: &ProgressBar,
) -> io::Result<(u16, u64)> {
    let mut buf = vec![0u8; CHUNK_SIZE];
    let mut crc = engine.variant().init;
    let mut count = 0u64;
    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        crc = engine.resume(crc, &buf[..n]);
        count += n as u64;
        progress.inc(n as u64);
        trace!("{} bytes, crc {:#06X}", count, crc);
    }
    Ok((crc, count))
}

fn expect_length(crc: u16, count: u64, length: u64) -> io::Result<(u16, u64)> {
    if count == length {
        Ok((crc, count))
    } else {
        Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            format!("received {} of {} bytes", count, length),
        ))
    }
}

fn parse_hex(s: &str) -> Result<u16, String> {
    let digits = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    u16::from_str_radix(digits, 16).map_err(|e| format!("invalid checksum `{}`: {}", s, e))
}
