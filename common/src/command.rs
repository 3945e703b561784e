use std::io;

/// Runs an external command line and reports whether it exited successfully.
pub trait CommandRunner {
    fn run(&self, command_line: &str) -> io::Result<bool>;
}
