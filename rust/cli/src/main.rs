use std::io;

fn main() {
    cribbage_cli::logging::init_logging();
    let code = cribbage_cli::run(std::env::args(), &mut io::stdout(), &mut io::stderr());
    std::process::exit(code);
}
