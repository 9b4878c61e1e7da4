use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use hufftext::config::{CliConfig, DEFAULT_CONFIG_FILE};
use hufftext::{ByteStore, LocalStorage};

#[derive(Parser)]
#[command(name = "hufftext")]
#[command(about = "Static Huffman compression for text files")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long, global = true, help = "Config file path")]
    config: Option<String>,

    #[arg(long, global = true, help = "Directory relative paths resolve against (overrides config)")]
    root: Option<String>,

    #[arg(long, global = true, help = "Output as JSON")]
    json: bool,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Compress a UTF-8 text file
    Encode {
        input: String,
        #[arg(short, long, help = "Compressed file (default: <input>.<compressed_extension>)")]
        output: Option<String>,
    },
    /// Restore the text of a compressed file
    Decode {
        input: String,
        #[arg(short, long, help = "Text file (default: input without the compressed extension)")]
        output: Option<String>,
    },
    /// Show the header and tree layout of a compressed file
    Inspect {
        input: String,
    },
    GenerateConfig {
        #[arg(long, default_value = DEFAULT_CONFIG_FILE, help = "Config file path")]
        output: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = CliConfig::load(cli.config.as_deref())?;
    if let Some(root) = cli.root {
        config.root_directory = root.into();
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let store = LocalStorage::new(config.root_directory.clone());

    match cli.command {
        Commands::Encode { input, output } => {
            let output = output.unwrap_or_else(|| config.compressed_name(&input));

            let raw = store
                .read_all(&input)
                .with_context(|| format!("reading {}", input))?;
            let text = String::from_utf8(raw)
                .with_context(|| format!("{} is not valid UTF-8", input))?;
            let units: Vec<u16> = text.encode_utf16().collect();

            let stats = hufftext::encode(&units, &store, &output)?;
            info!("Encoded {} into {}", input, output);

            if cli.json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&serde_json::json!({
                        "input": input,
                        "output": output,
                        "stats": stats,
                        "compressed_bytes": stats.compressed_bytes(),
                        "ratio": stats.ratio(),
                    }))?
                );
            } else {
                println!("{}", stats);
            }
        }
        Commands::Decode { input, output } => {
            let output = output.unwrap_or_else(|| config.decoded_name(&input));

            let units = hufftext::decode(&store, &input)?;
            let text = String::from_utf16(&units)
                .with_context(|| format!("{} does not decode to valid UTF-16", input))?;
            store
                .write_all(&output, text.as_bytes())
                .with_context(|| format!("writing {}", output))?;
            info!("Decoded {} into {}", input, output);

            if cli.json {
                println!(
                    "{}",
                    serde_json::json!({
                        "input": input,
                        "output": output,
                        "total_chars": units.len(),
                    })
                );
            } else {
                println!("{} char(s) written to {}", units.len(), output);
            }
        }
        Commands::Inspect { input } => {
            let data = store
                .read_all(&input)
                .with_context(|| format!("reading {}", input))?;
            let summary = hufftext::inspect_slice(&data, &input)?;

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else if summary.file_bytes == 0 {
                println!("{}: empty file (empty text)", input);
            } else {
                println!("{}", input);
                println!("   Header: {}", hex::encode(summary.header));
                println!("   Format version: {}", summary.version);
                println!("   File size: {} bytes", summary.file_bytes);
                println!(
                    "   Tree: {} bytes ({} bits in last byte), {} leaves, depth {}",
                    summary.tree_bytes, summary.tree_last_bits, summary.leaf_count, summary.tree_depth
                );
                println!(
                    "   Text: {} bytes ({} bits in last byte)",
                    summary.text_bytes, summary.text_last_bits
                );
            }
        }
        Commands::GenerateConfig { output } => {
            CliConfig::default().save(&output)?;
            if cli.json {
                println!("{}", serde_json::json!({"config": output}));
            } else {
                println!("Wrote default config to {}", output);
            }
        }
    }

    Ok(())
}
