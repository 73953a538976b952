fn main() {
    pretty_env_logger::init_custom_env("DAYLINE_LOG");
    if let Err(err) = dayline::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
