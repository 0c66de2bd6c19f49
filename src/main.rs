fn main() {
    if let Err(err) = depmind::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
