use clap::{ArgAction, Parser, Subcommand};

mod dgst;
mod pkey;
mod sign;

/// RS256 JSON Web Token signer.
#[derive(Parser)]
#[command(name = "rsalite")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). `RUST_LOG` takes
    /// precedence when set.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign a header and payload and print the compact JWS.
    Sign {
        /// PKCS#8 PEM private key file.
        #[arg(short, long)]
        key: String,
        /// Header JSON (default: {"alg":"RS256","typ":"JWT"}).
        #[arg(long, conflicts_with = "header_file")]
        header: Option<String>,
        /// Read the header JSON from a file.
        #[arg(long)]
        header_file: Option<String>,
        /// Payload JSON.
        #[arg(short, long, required_unless_present = "payload_file")]
        payload: Option<String>,
        /// Read the payload JSON from a file (use - for stdin).
        #[arg(long, conflicts_with = "payload")]
        payload_file: Option<String>,
    },
    /// Display an RSA private key.
    Pkey {
        /// PKCS#8 PEM private key file.
        #[arg(short, long)]
        input: String,
        /// Print the key components.
        #[arg(short, long)]
        text: bool,
    },
    /// SHA-256 digest of a file.
    Dgst {
        /// Input file (use - for stdin).
        #[arg(default_value = "-")]
        file: String,
    },
}

fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    let result = match &cli.command {
        Commands::Sign {
            key,
            header,
            header_file,
            payload,
            payload_file,
        } => sign::run(
            key,
            sign::Source::pick(header.as_deref(), header_file.as_deref()),
            sign::Source::pick(payload.as_deref(), payload_file.as_deref()),
        ),
        Commands::Pkey { input, text } => pkey::run(input, *text),
        Commands::Dgst { file } => dgst::run(file),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
