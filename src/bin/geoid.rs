use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use zk13::{IdentityAssembler, IdentityConfig, Ristretto255, SecureRng, WireFormat};

#[derive(Parser, Debug)]
#[command(name = "geoid")]
#[command(about = "Generate a pseudonymous geo-identity with a ZK13 proof", long_about = None)]
#[command(version)]
struct Args {
    /// Latitude in decimal degrees
    #[arg(long, env = "GEOID_LAT", allow_hyphen_values = true)]
    lat: f64,

    /// Longitude in decimal degrees
    #[arg(long, env = "GEOID_LON", allow_hyphen_values = true)]
    lon: f64,

    /// Modulus size of the proof (overrides the config file)
    #[arg(short, long, env = "GEOID_BITS")]
    bits: Option<u64>,

    /// Decimal digits kept when snapping to the grid (overrides the config file)
    #[arg(short, long, env = "GEOID_PRECISION")]
    precision: Option<u8>,

    /// JSON configuration file
    #[arg(short, long, env = "GEOID_CONFIG")]
    config: Option<PathBuf>,

    /// Output encoding
    #[arg(short, long, env = "GEOID_FORMAT", value_enum, default_value = "compact")]
    format: Format,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Compact,
    Structured,
}

impl From<Format> for WireFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Compact => WireFormat::Compact,
            Format::Structured => WireFormat::Structured,
        }
    }
}

fn load_config(args: &Args) -> Result<IdentityConfig, Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => IdentityConfig::from_json(&std::fs::read_to_string(path)?)?,
        None => IdentityConfig::default(),
    };
    if let Some(bits) = args.bits {
        config.proof_bits = bits;
    }
    if let Some(precision) = args.precision {
        config.grid.precision = precision;
    }
    Ok(config)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = load_config(&args)?;
    let assembler = IdentityAssembler::new(&config);
    let mut rng = SecureRng::new();

    let address = assembler.assemble(args.lat, args.lon, config.proof_bits, &mut rng)?;
    info!(
        public_key = %hex::encode(Ristretto255::element_to_bytes(address.public_key())),
        cell = %address.anon_geo_location(),
        "generated network address"
    );

    let format = WireFormat::from(args.format);
    println!("{}", format.encode(&address)?);
    Ok(())
}
