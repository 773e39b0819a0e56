use colored::Colorize;

fn main() {
    pretty_env_logger::init();
    let command_line_interface = gir_luals::cli::CommandLineInterface::load();
    if let Err(error) = command_line_interface.run() {
        eprintln!("{} {error:#}", "error:".red().bold());
        std::process::exit(1);
    }
}
