use std::io;
use std::process;

use clap::Parser;
use log::LevelFilter;

use watermark_overlay::Session;

#[derive(Parser)]
#[command(
    name = "watermark",
    about = "Overlay a watermark image onto a base image",
    version,
    after_help = "The program asks for the images and blend settings on standard input.\n\
                  Any invalid answer ends the program with a distinct exit code (21-31)."
)]
struct Cli {
    /// Log validation and blending details to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    let stdin = io::stdin();
    if let Err(e) = Session::new(stdin.lock(), io::stdout()).run() {
        println!("{e}");
        process::exit(e.exit_code());
    }
}
