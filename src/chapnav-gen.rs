use anyhow::Result;
use chapnav::{generate_series, write_series_file, SampleOptions};
use env_logger::{Builder, Target};
use log::LevelFilter;
use std::env;

struct Config {
    seed: u64,
    options: SampleOptions,
    output_file: Option<String>,
    use_brotli: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            seed: 42,
            options: SampleOptions::default(),
            output_file: None,
            use_brotli: false,
        }
    }
}

fn next_value<'a>(args: &'a [String], i: &mut usize, flag: &str) -> Result<&'a str> {
    *i += 1;
    match args.get(*i) {
        Some(value) => Ok(value.as_str()),
        None => anyhow::bail!("{} requires an argument", flag),
    }
}

fn parse_args() -> Result<Config> {
    let args: Vec<String> = env::args().collect();
    let mut config = Config::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-seed" => {
                config.seed = next_value(&args, &mut i, "-seed")?.parse()?;
            }
            "-items" => {
                config.options.total_items = next_value(&args, &mut i, "-items")?.parse()?;
            }
            "-read" => {
                config.options.read_fraction = next_value(&args, &mut i, "-read")?.parse()?;
            }
            "-decimals" => {
                config.options.decimal_rate = next_value(&args, &mut i, "-decimals")?.parse()?;
            }
            "-no_volumes" => {
                config.options.with_volumes = false;
            }
            "-out" => {
                config.output_file = Some(next_value(&args, &mut i, "-out")?.to_string());
            }
            "-brotli" => {
                config.use_brotli = true;
            }
            "-h" | "-help" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            _ => {
                eprintln!("Warning: Unknown argument: {}", args[i]);
            }
        }
        i += 1;
    }

    Ok(config)
}

fn print_help() {
    println!("Sample Series Generator");
    println!("Usage: chapnav-gen [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("  -seed <N>              Random seed (default: 42)");
    println!("  -items <N>             Number of whole items (default: 240, max 5000)");
    println!("  -read <F>              Fraction of items already read, 0..1 (default: 0.4)");
    println!("  -decimals <F>          Chance of a .1 sub-chapter per item (default: 0.03)");
    println!("  -no_volumes            Omit the volume mapping (numbered ranges only)");
    println!("  -out <FILE>            Output file path (default: series.json)");
    println!("  -brotli                Write compressed series using Brotli (output: *.json.br)");
    println!("  -h, -help, --help      Show this help message");
}

fn main() -> Result<()> {
    if env::var("RUST_LOG").is_err() {
        Builder::new()
            .target(Target::Stdout)
            .filter_level(LevelFilter::Warn)
            .filter_module("chapnav", LevelFilter::Info)
            .init();
    } else {
        env_logger::init();
    }

    let config = parse_args()?;
    let output_path = config.output_file.clone().unwrap_or_else(|| {
        if config.use_brotli {
            "series.json.br".to_string()
        } else {
            "series.json".to_string()
        }
    });

    let series = generate_series(config.seed, &config.options);
    write_series_file(&output_path, &series)?;

    println!(
        "Series '{}' with {} items written to: {}",
        series.title,
        series.total_items.unwrap_or(0),
        output_path
    );
    Ok(())
}
