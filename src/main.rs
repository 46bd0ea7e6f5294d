//! pyinst - freezes a Python application into a standalone executable.
//!
//! Runs PyInstaller with platform-specific naming, explicit dependency lists
//! and, on Windows, an embedded version resource.

use std::process;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Initialize logging
    env_logger::init();

    // Run CLI and get exit code
    let exit_code = match pyinst_bundler::cli::run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    };

    process::exit(exit_code);
}
