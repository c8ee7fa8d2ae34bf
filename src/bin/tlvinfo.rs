//! TlvInfo CLI
//!
//! Inspect and edit a TlvInfo EEPROM image file.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tlvinfo::codec;
use tlvinfo::codes;
use tlvinfo::oem::{self, Command};
use tlvinfo::transport::{ChunkedEeprom, ImageFileBus};
use tlvinfo::{Config, LoadOutcome, Result, TlvStore};
use tracing_subscriber::{fmt, EnvFilter};

type FileStore = TlvStore<ChunkedEeprom<ImageFileBus>>;

/// TlvInfo EEPROM tool
#[derive(Parser, Debug)]
#[command(name = "tlvinfo")]
#[command(about = "Inspect and edit TlvInfo EEPROM images")]
#[command(version)]
struct Args {
    /// EEPROM image file
    #[arg(short, long, default_value = "./eeprom.bin")]
    image: PathBuf,

    /// Image capacity in bytes
    #[arg(short, long, default_value = "256")]
    capacity: usize,

    /// EEPROM chip address
    #[arg(long, default_value = "80")]
    chip: u8,

    /// Largest single transfer in bytes
    #[arg(long, default_value = "16")]
    chunk_size: usize,

    /// Delay after each written chunk in milliseconds
    #[arg(long, default_value = "0")]
    settle_ms: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print header and all records
    Show,

    /// Print one field
    Get {
        /// Field name or type code (e.g. ethaddr, 0x24)
        field: String,
    },

    /// Set a field, or delete it when no value is given
    Set {
        /// Field name or type code
        field: String,

        /// New value
        value: Option<String>,
    },

    /// Reset the image to empty and blank the rest of the device
    Erase,

    /// Run one OEM config command line (get/set/write/erase)
    Exec {
        /// Command words
        #[arg(trailing_var_arg = true, required = true)]
        line: Vec<String>,
    },
}

fn main() {
    // Logs go to stderr; stdout carries command output
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,tlvinfo=info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = Config::builder()
        .image_path(&args.image)
        .capacity(args.capacity)
        .chip_addr(args.chip)
        .chunk_size(args.chunk_size)
        .write_settle_ms(args.settle_ms)
        .build();

    let mut store = match open_store(&config) {
        Ok(store) => store,
        Err(e) => {
            tracing::error!("Failed to open eeprom image: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = run(&mut store, args.command) {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

fn open_store(config: &Config) -> Result<FileStore> {
    config.validate()?;
    let bus = ImageFileBus::open(&config.image_path, config.chip_addr, config.capacity)?;
    let eeprom = ChunkedEeprom::new(bus, config)?;
    TlvStore::new(eeprom, config)
}

fn run(store: &mut FileStore, command: Commands) -> Result<()> {
    match command {
        Commands::Show => show(store),
        Commands::Get { field } => {
            match store.get_field(&field)? {
                Some(value) => println!("{}", value),
                None => {
                    tracing::error!("{} is not present", field);
                    std::process::exit(1);
                }
            }
            Ok(())
        }
        Commands::Set { field, value } => {
            store.set_field(&field, value.as_deref())?;
            store.flush()
        }
        Commands::Erase => store.erase_device(),
        Commands::Exec { line } => {
            let command = Command::parse(&line.join(" "))?;
            let response = oem::execute(store, &command);
            println!("{}", response);
            if response.is_okay() {
                Ok(())
            } else {
                std::process::exit(1);
            }
        }
    }
}

fn show(store: &mut FileStore) -> Result<()> {
    if let LoadOutcome::Recovered(cause) = store.load()? {
        println!("EEPROM contents invalid ({:?}); showing an empty image", cause);
    }

    let header = store.image().header()?;
    println!("TlvInfo Header:");
    println!("   Id String:    TlvInfo");
    println!("   Version:      {}", header.version);
    println!("   Total Length: {}", header.total_len);

    println!("TLV Name             Code Len Value");
    println!("-------------------- ---- --- -----");
    for record in store.records()? {
        println!(
            "{:<20} 0x{:02X} {:>3} {}",
            codes::describe(record.code),
            record.code,
            record.value.len(),
            codec::render_for_code(record.code, &record.value)
        );
    }

    if store.image().is_checksum_valid() {
        println!("Checksum is valid.");
    } else {
        println!("Checksum is invalid.");
    }
    Ok(())
}
