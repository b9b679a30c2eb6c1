use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::process::Command;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;
use std::{env, path::PathBuf};

const AEN_ENV: [&str; 9] = [
    "AEN_BASE_URL",
    "AEN_USERNAME",
    "AEN_PASSWORD",
    "AEN_SERVICE_ID",
    "AEN_TIMEOUT_MS",
    "AEN_USER_AGENT",
    "AEN_REQUEST_LOG",
    "AEN_RETRY",
    "AEN_RETRY_MAX",
];

fn cli_bin_path() -> PathBuf {
    if let Ok(path) = env::var("CARGO_BIN_EXE_aen") {
        return PathBuf::from(path);
    }

    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let workspace_root = manifest_dir
        .parent()
        .and_then(|p| p.parent())
        .map(PathBuf::from)
        .expect("workspace root");
    let bin_name = if cfg!(windows) { "aen.exe" } else { "aen" };
    let fallback = workspace_root.join("target").join("debug").join(bin_name);
    assert!(
        fallback.exists(),
        "aen binary not found at {}",
        fallback.display()
    );
    fallback
}

fn clean_command() -> Command {
    let mut command = Command::new(cli_bin_path());
    for name in AEN_ENV {
        command.env_remove(name);
    }
    command.env("RUST_LOG", "off");
    command
}

/// Serves `responses` to consecutive connections and reports each request line.
fn spawn_server(responses: Vec<&'static str>) -> (String, mpsc::Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("local addr");
    let (sender, receiver) = mpsc::channel();
    thread::spawn(move || {
        for response in responses {
            let Ok((mut stream, _)) = listener.accept() else {
                return;
            };
            let mut reader = BufReader::new(stream.try_clone().expect("clone"));
            let mut request_line = String::new();
            let _ = reader.read_line(&mut request_line);
            loop {
                let mut line = String::new();
                match reader.read_line(&mut line) {
                    Ok(0) | Err(_) => break,
                    Ok(_) if line.trim_end().is_empty() => break,
                    Ok(_) => {}
                }
            }
            let _ = sender.send(request_line.trim_end().to_string());
            let _ = stream.write_all(response.as_bytes());
            let _ = stream.flush();
        }
    });
    (format!("http://{addr}/api/v2"), receiver)
}

#[test]
fn missing_credentials_exit_non_zero_before_any_request() {
    // Given a reachable endpoint but no username/password
    // When running `aen ping`
    // Then the process fails and the server never sees a request.
    let (base_url, requests) = spawn_server(vec![
        "HTTP/1.1 200 OK\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
    ]);
    let output = clean_command()
        .args(["--base-url", &base_url, "ping"])
        .output()
        .expect("run ping");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("missing credentials"), "stderr: {stderr}");
    assert!(
        requests.recv_timeout(Duration::from_millis(300)).is_err(),
        "no request may be sent without credentials"
    );
}

#[test]
fn missing_password_is_reported_even_with_username_flag() {
    let output = clean_command()
        .args(["--base-url", "http://127.0.0.1:9/api", "--username", "alice", "locales"])
        .output()
        .expect("run locales");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("AEN_PASSWORD"), "stderr: {stderr}");
}

#[test]
fn missing_endpoint_exits_non_zero() {
    let output = clean_command().arg("ping").output().expect("run ping");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("--base-url"), "stderr: {stderr}");
}

#[test]
fn ping_logs_in_and_out_and_prints_json() {
    let (base_url, requests) = spawn_server(vec![
        "HTTP/1.1 200 OK\r\nSet-Cookie: JSESSIONID=s1; Path=/\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
        "HTTP/1.1 200 OK\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
    ]);
    let output = clean_command()
        .args(["--base-url", &base_url, "--username", "alice", "ping"])
        .env("AEN_PASSWORD", "pw")
        .output()
        .expect("run ping");

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout is json");
    assert_eq!(stdout["status"], "ok");
    assert_eq!(stdout["username"], "alice");

    let first = requests.recv_timeout(Duration::from_secs(5)).expect("login");
    assert!(first.starts_with("GET /api/v2/user/login"));
    let second = requests.recv_timeout(Duration::from_secs(5)).expect("logout");
    assert!(second.starts_with("GET /api/v2/user/logout"));
}

#[test]
fn rejected_login_exits_non_zero_with_classified_message() {
    let (base_url, _requests) = spawn_server(vec![
        "HTTP/1.1 401 Unauthorized\r\nContent-Type: application/json\r\nContent-Length: 29\r\nConnection: close\r\n\r\n{\"message\":\"bad credentials\"}",
    ]);
    let output = clean_command()
        .args(["--base-url", &base_url, "--username", "alice", "ping"])
        .env("AEN_PASSWORD", "wrong")
        .output()
        .expect("run ping");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("permission denied"), "stderr: {stderr}");
    assert!(stderr.contains("bad credentials"), "stderr: {stderr}");
    assert!(!stderr.contains("wrong"), "password must not be echoed");
}

#[test]
fn retry_env_repeats_a_failed_read() {
    let (base_url, requests) = spawn_server(vec![
        "HTTP/1.1 200 OK\r\nSet-Cookie: JSESSIONID=s1; Path=/\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
        "HTTP/1.1 503 Service Unavailable\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
        "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: 6\r\nConnection: close\r\n\r\n[\"de\"]",
        "HTTP/1.1 200 OK\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
    ]);
    let output = clean_command()
        .args(["--base-url", &base_url, "--username", "alice", "locales"])
        .env("AEN_PASSWORD", "pw")
        .env("AEN_RETRY", "1")
        .env("AEN_RETRY_MAX", "1")
        .output()
        .expect("run locales");

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout is json");
    assert_eq!(stdout, serde_json::json!(["de"]));

    let lines: Vec<String> = (0..4)
        .map(|_| requests.recv_timeout(Duration::from_secs(5)).expect("request"))
        .collect();
    assert!(lines[1].starts_with("GET /api/v2/session/locales"));
    assert!(lines[2].starts_with("GET /api/v2/session/locales"));
    assert!(lines[3].starts_with("GET /api/v2/user/logout"));
}

#[test]
fn without_retry_env_a_failed_read_is_reported() {
    let (base_url, _requests) = spawn_server(vec![
        "HTTP/1.1 200 OK\r\nSet-Cookie: JSESSIONID=s1; Path=/\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
        "HTTP/1.1 503 Service Unavailable\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
        "HTTP/1.1 200 OK\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
    ]);
    let output = clean_command()
        .args(["--base-url", &base_url, "--username", "alice", "locales"])
        .env("AEN_PASSWORD", "pw")
        .output()
        .expect("run locales");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("server fault"), "stderr: {stderr}");
}
