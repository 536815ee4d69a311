use anyhow::Result;
use taskvault::{commands::Cli, libs::logging};

fn main() -> Result<()> {
    logging::init();
    Cli::menu()
}
