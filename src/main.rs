//! rGuestDesk main entrypoint.

use rguestdesk::run;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
