mod commands;
mod terminal;

use std::process::ExitCode;

use commands::{CommandLine, sync};
use terminal::{logging, print};

fn main() -> ExitCode {
    let commands = CommandLine::parse_args();

    logging::init_logging(commands.is_verbose());
    print::banner();

    let cfg = commands.to_config();
    print::header("syncing monitoring config");
    sync::sync(cfg, commands.is_verbose())
}
