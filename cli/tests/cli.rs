//! Runs the built `httpclient` binary.

use std::process::Command;

fn httpclient() -> Command {
    Command::new(env!("CARGO_BIN_EXE_httpclient"))
}

#[test]
fn no_arguments_prints_help_and_exits_1() {
    let output = httpclient().output().unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("Usage: httpclient [OPTIONS] [GET|POST] <URL>"), "{stdout}");
}

#[test]
fn refused_connection_exits_nonzero_with_message() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let output = httpclient()
        .arg(format!("http://127.0.0.1:{port}/"))
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("connection failed"), "{stderr}");
}
