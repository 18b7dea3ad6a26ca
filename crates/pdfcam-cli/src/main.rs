mod cli;
mod drills_cmd;
mod import_cmd;
mod shared;

use clap::Parser;
use cli::Cli;

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        cli::Commands::Import {
            ref file,
            format,
            ref options,
        } => import_cmd::run(file, format, options),
        cli::Commands::Drills {
            ref file,
            format,
            ref options,
        } => drills_cmd::run(file, format, options),
    };

    if let Err(code) = result {
        std::process::exit(code);
    }
}
