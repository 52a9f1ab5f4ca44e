//! Binary entrypoint for the `gosh` CLI.

use std::process::ExitCode;

fn main() -> ExitCode {
    init_tracing();

    // Recording and replay are handled in commands::dispatch via GOSH_RECORD / GOSH_REPLAY.
    match gosh::run(std::env::args_os()) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

/// Log to stderr only when `RUST_LOG` asks for it, so command output stays clean.
fn init_tracing() {
    if std::env::var_os("RUST_LOG").is_none() {
        return;
    }
    let init_result = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();
    if let Err(err) = init_result {
        eprintln!("Warning: tracing already initialized: {err}");
    }
}
