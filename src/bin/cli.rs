//! ownet CLI Client
//!
//! Command-line interface for querying an owserver.

use clap::{Parser, Subcommand, ValueEnum};
use ownet::{Config, DeviceFormat, Flags, OwClient, OwError, TemperatureScale};
use tracing_subscriber::{fmt, EnvFilter};

/// ownet CLI
#[derive(Parser, Debug)]
#[command(name = "ownet-cli")]
#[command(about = "Query one-wire devices through an owserver")]
#[command(version)]
struct Args {
    /// Server address (host or host:port)
    #[arg(short, long, default_value = "127.0.0.1:4304")]
    server: String,

    /// Socket read timeout in milliseconds (0 = none)
    #[arg(short, long, default_value = "8000")]
    timeout: u64,

    /// Temperature scale for temperature readings
    #[arg(long, value_enum, default_value = "celsius")]
    scale: Scale,

    /// Device id display format
    #[arg(long, value_enum, default_value = "f.i")]
    format: Format,

    /// Log every header sent and received
    #[arg(short, long)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Read an attribute value
    Read {
        /// Attribute path, e.g. /28.0E67C0000000/temperature
        path: String,

        /// Expected data length
        #[arg(short, long)]
        len: Option<i32>,
    },

    /// Write a value to an attribute
    Write {
        /// Attribute path
        path: String,

        /// Value to write
        value: String,
    },

    /// List a directory (one packet per entry)
    Dir {
        #[arg(default_value = "/")]
        path: String,
    },

    /// List a directory (single packet)
    Dirall {
        #[arg(default_value = "/")]
        path: String,
    },

    /// Read a file or list a directory
    Get {
        #[arg(default_value = "/")]
        path: String,
    },

    /// Check whether a device or attribute is present
    Present {
        /// Device or attribute path
        path: String,
    },

    /// Check the server is alive
    Ping,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Scale {
    Celsius,
    Fahrenheit,
    Kelvin,
    Rankine,
}

impl From<Scale> for TemperatureScale {
    fn from(scale: Scale) -> Self {
        match scale {
            Scale::Celsius => TemperatureScale::Celsius,
            Scale::Fahrenheit => TemperatureScale::Fahrenheit,
            Scale::Kelvin => TemperatureScale::Kelvin,
            Scale::Rankine => TemperatureScale::Rankine,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    #[value(name = "f.i")]
    FdotI,
    #[value(name = "fi")]
    FI,
    #[value(name = "f.i.c")]
    FdotIdotC,
    #[value(name = "f.ic")]
    FdotIC,
    #[value(name = "fi.c")]
    FIdotC,
    #[value(name = "fic")]
    FIC,
}

impl From<Format> for DeviceFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::FdotI => DeviceFormat::FdotI,
            Format::FI => DeviceFormat::FI,
            Format::FdotIdotC => DeviceFormat::FdotIdotC,
            Format::FdotIC => DeviceFormat::FdotIC,
            Format::FIdotC => DeviceFormat::FIdotC,
            Format::FIC => DeviceFormat::FIC,
        }
    }
}

fn main() {
    let args = Args::parse();

    // Initialize tracing/logging
    fmt()
        .with_env_filter(log_filter(args.debug))
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let config = match build_config(&args) {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("{}", e);
            std::process::exit(2);
        }
    };

    tracing::debug!("ownet-cli v{} -> {}", ownet::VERSION, config.addr());

    let mut client = OwClient::new(config);
    let result = run(&mut client, args.command);
    client.disconnect();

    match result {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            tracing::error!("{}", e);
            std::process::exit(1);
        }
    }
}

/// `--debug` overrides `RUST_LOG`; otherwise `RUST_LOG` or `warn`
fn log_filter(debug: bool) -> EnvFilter {
    if debug {
        return EnvFilter::new("warn,ownet=trace");
    }
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
}

fn build_config(args: &Args) -> Result<Config, OwError> {
    let base = Config::from_addr(&args.server)?;
    let flags = Flags::default()
        .with_temperature_scale(args.scale.into())
        .with_device_format(args.format.into());

    Ok(Config::builder()
        .host(base.host)
        .port(base.port)
        .read_timeout_ms(args.timeout)
        .flags(flags)
        .build())
}

/// Execute one command, returning the process exit code
fn run(client: &mut OwClient, command: Commands) -> Result<i32, OwError> {
    match command {
        Commands::Read { path, len } => {
            let value = match len {
                Some(len) => client.read_with_len(&path, len)?,
                None => client.read(&path)?,
            };
            println!("{}", value.trim_end_matches('\0'));
        }
        Commands::Write { path, value } => {
            client.write(&path, &value)?;
        }
        Commands::Dir { path } => {
            for entry in client.dir(&path)? {
                println!("{}", entry);
            }
        }
        Commands::Dirall { path } => {
            for entry in client.dir_all(&path)? {
                println!("{}", entry);
            }
        }
        Commands::Get { path } => {
            println!("{}", client.get(&path)?.trim_end_matches('\0'));
        }
        Commands::Present { path } => {
            return match client.presence(&path) {
                Ok(_) => {
                    println!("1");
                    Ok(0)
                }
                Err(OwError::NotFound { .. }) => {
                    println!("0");
                    Ok(1)
                }
                Err(e) => Err(e),
            };
        }
        Commands::Ping => {
            client.ping()?;
            println!("ok");
        }
    }
    Ok(0)
}
