use anyhow::Result;
use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint};
use log::LevelFilter;
use std::path::PathBuf;

use blockmat_cli::demos::blocks::run_blocks;
use blockmat_cli::demos::power::{load_power_config, run_power, PowerConfig};
use blockmat_cli::util::validate_json_file;

fn main() -> Result<()> {
    env_logger::Builder::default()
        .filter_level(LevelFilter::Error)
        .parse_env(env_logger::Env::default().filter_or("BLOCKMAT_LOG", "error,blockmat=info"))
        .init();

    let matches = Command::new("blockmat")
        .version(clap::crate_version!())
        .about("Dense vector, matrix and block-matrix arithmetic demos")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("power")
                .about("Raise a matrix to a power by repeated multiplication and time it")
                .arg(
                    Arg::new("config")
                        .help("Path to a JSON power configuration. Defaults to the 2x2 shear matrix.")
                        .required(false)
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("exponent")
                        .short('e')
                        .long("exponent")
                        .help("Exponent. Overrides the exponent in the configuration file.")
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(
                    Arg::new("print")
                        .long("print")
                        .help("Print the resulting matrix as a table.")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("blocks")
                .about("Multiply two block matrices block-wise and flat, and compare"),
        )
        .get_matches();

    match matches.subcommand() {
        Some(("power", sub_m)) => handle_power(sub_m),
        Some(("blocks", _)) => handle_blocks(),
        _ => unreachable!("Subcommand is required by CLI configuration"),
    }
}

fn handle_power(matches: &ArgMatches) -> Result<()> {
    let mut config = if let Some(config_path) = matches.get_one::<PathBuf>("config") {
        validate_json_file(&config_path.to_string_lossy())?;
        log::info!("[blockmat::power] Using config: {:?}", config_path);
        load_power_config(config_path)?
    } else {
        PowerConfig::default()
    };

    if let Some(exponent) = matches.get_one::<usize>("exponent") {
        config.exponent = *exponent;
    }

    let report = run_power(&config)?;
    if matches.get_flag("print") {
        println!("{}", report.result.render_with(&config.format));
    }
    println!("{:?}", report.result.as_slice());
    println!("{:.20} sec", report.elapsed.as_secs_f64());
    Ok(())
}

fn handle_blocks() -> Result<()> {
    let report = run_blocks()?;
    println!("{}", report.left);
    println!("{}", report.right);
    println!("{}", report.blocked);
    println!("{}", report.flat);
    println!("block and flat products agree: {}", report.agrees(1e-9));
    Ok(())
}
