//! Page host binary.
//! Run with: cargo run --bin routine-picker-server

use std::process::ExitCode;

use routine_picker::start;

fn main() -> ExitCode {
    start::run()
}
