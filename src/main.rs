//! Host-side helper: `cargo run` builds the wasm bundle into `static/pkg`
//! and serves `static/` locally. `cargo run -- --share` also opens an ngrok
//! tunnel to the local server.

use std::process::{Command, ExitCode, Stdio};
use std::{env, thread, time::Duration};

const DEFAULT_PORT: &str = "8000";

fn main() -> ExitCode {
    let port = env::var("PORT").unwrap_or_else(|_| DEFAULT_PORT.to_string());
    let share = env::args().any(|a| a == "--share");

    println!("Building WASM pkg …");
    match Command::new("wasm-pack")
        .args(["build", "--release", "--target", "web", "--out-dir", "static/pkg"])
        .status()
    {
        Ok(st) if st.success() => {}
        Ok(_) => {
            eprintln!("wasm-pack finished with errors.");
            return ExitCode::FAILURE;
        }
        Err(_) => {
            eprintln!("wasm-pack not found in PATH (https://rustwasm.github.io/wasm-pack/). Serving whatever is already in static/pkg.");
        }
    }

    println!("Serving static/ at http://127.0.0.1:{port} …");
    let mut server = match Command::new("python3")
        .args(["-m", "http.server", &port, "--directory", "static"])
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
    {
        Ok(child) => child,
        Err(err) => {
            eprintln!("failed to start http server: {err}");
            return ExitCode::FAILURE;
        }
    };

    if share {
        match Command::new("ngrok").args(["http", &port]).spawn() {
            Ok(_) => println!("ngrok tunnel starting …"),
            Err(_) => eprintln!("ngrok not found; serving locally only."),
        }
    }

    // Stay up until the server exits.
    loop {
        match server.try_wait() {
            Ok(Some(status)) => {
                eprintln!("http server exited: {status}");
                return ExitCode::FAILURE;
            }
            Ok(None) => thread::sleep(Duration::from_secs(1)),
            Err(err) => {
                eprintln!("lost track of http server: {err}");
                return ExitCode::FAILURE;
            }
        }
    }
}
