use std::process::ExitCode;

fn main() -> ExitCode {
    hydrate_lib::run()
}
