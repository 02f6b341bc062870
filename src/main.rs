fn main() {
    if let Err(err) = wallet_ledger::app::run(std::env::args_os()) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
