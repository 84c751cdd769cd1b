//! nori - a small terminal emulator.

use std::error::Error;
use std::path::PathBuf;
use std::process;

use nori_pty::{Child, WindowSize};
use nori_term::config::{parse_dimensions, CliArgs, Config};
use nori_term::{event_loop, Terminal};

const VERSION: &str = env!("CARGO_PKG_VERSION");
const HELP_TEXT: &str = r#"nori - a small terminal emulator

USAGE:
    nori [OPTIONS]

OPTIONS:
    -c, --config <PATH>        Path to config file (default: ~/.config/nori/config.toml)
    -s, --shell <SHELL>        Shell command to run (default: $SHELL)
    -d, --dimensions <CxR>     Screen size, e.g. 80x25
    -h, --help                 Print help information
    -V, --version              Print version information

ENVIRONMENT VARIABLES:
    NORI_SHELL                 Override shell command
    NORI_DIMENSIONS            Override screen size (e.g. 132x43)
    RUST_LOG                   Log filter (e.g. debug)
"#;

fn parse_args() -> Result<CliArgs, String> {
    let args: Vec<String> = std::env::args().collect();
    let mut cli = CliArgs::default();
    let mut i = 1;

    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => {
                println!("{HELP_TEXT}");
                process::exit(0);
            }
            "-V" | "--version" => {
                println!("nori {VERSION}");
                process::exit(0);
            }
            "-c" | "--config" => {
                i += 1;
                let path = args
                    .get(i)
                    .ok_or_else(|| "--config requires a path argument".to_string())?;
                cli.config_path = Some(PathBuf::from(path));
            }
            "-s" | "--shell" => {
                i += 1;
                let shell = args
                    .get(i)
                    .ok_or_else(|| "--shell requires a command argument".to_string())?;
                cli.shell = Some(shell.clone());
            }
            "-d" | "--dimensions" => {
                i += 1;
                let size = args
                    .get(i)
                    .ok_or_else(|| "--dimensions requires a COLSxROWS argument".to_string())?;
                cli.dimensions = Some(
                    parse_dimensions(size)
                        .ok_or_else(|| format!("invalid dimensions: {size}"))?,
                );
            }
            arg => {
                return Err(format!("unknown option: {arg}. Use --help for usage."));
            }
        }
        i += 1;
    }

    Ok(cli)
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = match parse_args() {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(2);
        }
    };

    let config = Config::load_with_args(&cli)?;
    let (cols, rows) = config.dimensions;
    log::info!("starting nori {VERSION} at {cols}x{rows}");

    let child = Child::spawn_shell(config.shell.as_deref(), WindowSize::new(rows, cols))?;
    let terminal = Terminal::new(cols as usize, rows as usize);
    event_loop::run(child, terminal)?;

    log::info!("nori exited");
    Ok(())
}
