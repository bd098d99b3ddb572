use std::io;

use bikeshare::{Console, Session, TripLoader};

/// City files are read from the working directory.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Set RUST_LOG=debug to see load and filter details on stderr
    env_logger::init();

    let console = Console::new(io::stdin().lock(), io::stdout().lock());
    let mut session = Session::new(console, TripLoader::new("."));
    session.run()?;
    Ok(())
}
