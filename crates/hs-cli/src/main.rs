fn main() {
    hs_cli::init_logging();
    std::process::exit(hs_cli::run_cli_from_args(std::env::args_os()));
}
