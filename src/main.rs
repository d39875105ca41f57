use colored::Colorize;

use json_apex::cli::CommandLineInterface;

fn main() {
    let command_line_interface = CommandLineInterface::load();
    command_line_interface.init_logging();
    if let Err(error) = command_line_interface.run() {
        eprintln!("{} {error:#}", "error:".red().bold());
        std::process::exit(1);
    }
}
