fn main() {
    if let Err(err) = dfd_layout::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
