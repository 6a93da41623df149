fn main() {
    if let Err(err) = yolocheck::run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}
