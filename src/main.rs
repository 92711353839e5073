fn main() {
    if let Err(err) = hg_ams_acas::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
