//! End-to-end tests driving the `clings` binary.
//!
//! Each test points `CLINGS_CONFIG` at a scratch directory so a user's own
//! config never leaks in.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use serde_json::Value;
use tempfile::TempDir;

const TODOS: &str = r#"[
    {"id": "t1", "name": "Pay rent", "status": "open", "due": "2000-01-01", "tags": ["home"]},
    {"id": "t2", "name": "Plan trip", "status": "open", "tags": ["travel"]},
    {"id": "t3", "name": "Ship release", "status": "completed", "project": "Work", "tags": ["work"]},
    {"id": "t4", "name": "Old idea", "status": "canceled", "tags": ["Urgent"]}
]"#;

struct Env {
    dir: TempDir,
}

impl Env {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("todos.json"), TODOS).unwrap();
        Self { dir }
    }

    fn todos(&self) -> PathBuf {
        self.dir.path().join("todos.json")
    }

    fn config(&self) -> PathBuf {
        self.dir.path().join("config").join("config.toml")
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_clings"));
        cmd.env("CLINGS_CONFIG", self.config())
            .env_remove("CLINGS_INPUT")
            .env_remove("RUST_LOG")
            .env("NO_COLOR", "1");
        cmd
    }

    fn run(&self, args: &[&str]) -> Output {
        self.command().args(args).output().unwrap()
    }
}

fn stdout_json(output: &Output) -> Value {
    serde_json::from_slice(&output.stdout).unwrap()
}

fn ids(value: &Value) -> Vec<String> {
    value["todos"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["id"].as_str().unwrap().to_string())
        .collect()
}

fn path_arg(path: &Path) -> &str {
    path.to_str().unwrap()
}

#[test]
fn test_search_overdue_open_todos() {
    let env = Env::new();
    let todos = env.todos();
    let output = env.run(&[
        "--json",
        "search",
        "--where",
        "due < today AND status = open",
        "--input",
        path_arg(&todos),
    ]);

    assert!(output.status.success());
    let value = stdout_json(&output);
    assert_eq!(ids(&value), vec!["t1"]);
    assert_eq!(value["matched"], 1);
}

#[test]
fn test_search_grouping_and_tags() {
    let env = Env::new();
    let todos = env.todos();
    let output = env.run(&[
        "--json",
        "search",
        "--where",
        "(status = open OR status = canceled) AND tags CONTAINS 'urgent'",
        "--input",
        path_arg(&todos),
    ]);

    assert!(output.status.success());
    assert_eq!(ids(&stdout_json(&output)), vec!["t4"]);
}

#[test]
fn test_search_limit_reports_truncation() {
    let env = Env::new();
    let todos = env.todos();
    let output = env.run(&[
        "--json",
        "search",
        "-w",
        "status != completed",
        "-i",
        path_arg(&todos),
        "--limit",
        "2",
    ]);

    assert!(output.status.success());
    let value = stdout_json(&output);
    assert_eq!(ids(&value), vec!["t1", "t2"]);
    assert_eq!(value["matched"], 3);
    assert_eq!(value["shown"], 2);
    assert_eq!(value["truncated"], true);
}

#[test]
fn test_search_reads_stdin() {
    let env = Env::new();
    let mut child = env
        .command()
        .args(["--json", "search", "--where", "project = work"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(TODOS.as_bytes())
        .unwrap();
    let output = child.wait_with_output().unwrap();

    assert!(output.status.success());
    assert_eq!(ids(&stdout_json(&output)), vec!["t3"]);
}

#[test]
fn test_search_uses_configured_input_and_limit() {
    let env = Env::new();
    let config = env.config();
    fs::create_dir_all(config.parent().unwrap()).unwrap();
    fs::write(
        &config,
        format!(
            "[search]\nlimit = 1\n\n[input]\npath = {:?}\n",
            path_arg(&env.todos())
        ),
    )
    .unwrap();

    let output = env.run(&["--json", "search", "--where", "name LIKE 'p%'"]);

    assert!(output.status.success());
    let value = stdout_json(&output);
    assert_eq!(ids(&value), vec!["t1"]);
    assert_eq!(value["matched"], 2);
}

#[test]
fn test_search_query_matches_name() {
    let env = Env::new();
    let todos = env.todos();
    let output = env.run(&["--json", "search", "TRIP", "--input", path_arg(&todos)]);

    assert!(output.status.success());
    let value = stdout_json(&output);
    assert_eq!(ids(&value), vec!["t2"]);
    assert_eq!(
        value["filter"],
        "name CONTAINS 'TRIP' OR notes CONTAINS 'TRIP'"
    );
}

#[test]
fn test_search_tag_project_and_due_shortcuts() {
    let env = Env::new();
    let todos = env.todos();

    let by_tag = env.run(&["--json", "search", "--tag", "work", "-i", path_arg(&todos)]);
    assert!(by_tag.status.success());
    assert_eq!(ids(&stdout_json(&by_tag)), vec!["t3"]);

    let by_project = env.run(&["--json", "search", "--project", "work", "-i", path_arg(&todos)]);
    assert!(by_project.status.success());
    assert_eq!(ids(&stdout_json(&by_project)), vec!["t3"]);

    let by_due = env.run(&["--json", "search", "--due", "2000-01-01", "-i", path_arg(&todos)]);
    assert!(by_due.status.success());
    assert_eq!(ids(&stdout_json(&by_due)), vec!["t1"]);
}

#[test]
fn test_search_shortcuts_combine_with_where() {
    let env = Env::new();
    let todos = env.todos();
    let output = env.run(&[
        "--json",
        "search",
        "p",
        "--where",
        "status = open OR status = completed",
        "--tag",
        "home",
        "--input",
        path_arg(&todos),
    ]);

    assert!(output.status.success());
    assert_eq!(ids(&stdout_json(&output)), vec!["t1"]);
}

#[test]
fn test_search_without_criteria_lists_everything() {
    let env = Env::new();
    let todos = env.todos();
    let output = env.run(&["--json", "search", "--input", path_arg(&todos)]);

    assert!(output.status.success());
    let value = stdout_json(&output);
    assert_eq!(ids(&value), vec!["t1", "t2", "t3", "t4"]);
    assert!(value["filter"].is_null());
}

#[test]
fn test_search_unknown_due_date() {
    let env = Env::new();
    let todos = env.todos();
    let output = env.run(&[
        "--json",
        "search",
        "--due",
        "someday",
        "--input",
        path_arg(&todos),
    ]);

    assert_eq!(output.status.code(), Some(1));
    let value: Value = serde_json::from_slice(&output.stderr).unwrap();
    assert_eq!(value["error"]["code"], "INVALID_ARGUMENT");
    assert!(value["error"]["position"].is_null());
}

#[test]
fn test_search_table_output() {
    let env = Env::new();
    let todos = env.todos();
    let output = env.run(&[
        "search",
        "--where",
        "tags CONTAINS work",
        "--input",
        path_arg(&todos),
    ]);

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with("ID"));
    assert!(stdout.contains("Ship release"));
    assert!(!stdout.contains("Pay rent"));
}

#[test]
fn test_filter_error_exit_code_and_position() {
    let env = Env::new();
    let output = env.run(&["--json", "check", "status ~ open"]);

    assert_eq!(output.status.code(), Some(1));
    let value: Value = serde_json::from_slice(&output.stderr).unwrap();
    assert_eq!(value["error"]["code"], "FILTER_ERROR");
    assert_eq!(value["error"]["position"], 7);
}

#[test]
fn test_configured_json_output_also_formats_errors() {
    let env = Env::new();
    let config = env.config();
    fs::create_dir_all(config.parent().unwrap()).unwrap();
    fs::write(&config, "[output]\njson = true\n").unwrap();

    let output = env.run(&["check", "status ~ open"]);

    assert_eq!(output.status.code(), Some(1));
    let value: Value = serde_json::from_slice(&output.stderr).unwrap();
    assert_eq!(value["error"]["code"], "FILTER_ERROR");
    assert_eq!(value["error"]["position"], 7);
}

#[test]
fn test_filter_error_text_has_pointer() {
    let env = Env::new();
    let output = env.run(&["check", "(status = open"]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.starts_with("Error: filter error:"));
    assert!(stderr.contains("  (status = open\n"));
    assert!(stderr.trim_end().ends_with('^'));
}

#[test]
fn test_missing_input_exit_code() {
    let env = Env::new();
    let missing = env.dir.path().join("missing.json");
    let output = env.run(&[
        "--json",
        "search",
        "--where",
        "status = open",
        "--input",
        path_arg(&missing),
    ]);

    assert_eq!(output.status.code(), Some(3));
    let value: Value = serde_json::from_slice(&output.stderr).unwrap();
    assert_eq!(value["error"]["code"], "INPUT_ERROR");
}

#[test]
fn test_check_prints_tree() {
    let env = Env::new();
    let output = env.run(&["check", "a = 1 OR b = 2 AND c = 3"]);

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("a = 1 OR b = 2 AND c = 3"));
    assert!(stdout.contains("AND\n  OR\n    a = 1\n    b = 2\n  c = 3\n"));
}

#[test]
fn test_config_init_then_path() {
    let env = Env::new();

    let init = env.run(&["--json", "config", "init"]);
    assert!(init.status.success());
    assert_eq!(stdout_json(&init)["created"], true);
    assert!(env.config().exists());

    let path = env.run(&["config", "path"]);
    assert!(path.status.success());
    let stdout = String::from_utf8(path.stdout).unwrap();
    assert_eq!(stdout.trim(), path_arg(&env.config()));
}

#[test]
fn test_broken_config_blocks_search_not_config() {
    let env = Env::new();
    let config = env.config();
    fs::create_dir_all(config.parent().unwrap()).unwrap();
    fs::write(&config, "[search\n").unwrap();
    let todos = env.todos();

    let search = env.run(&["search", "--where", "a = b", "--input", path_arg(&todos)]);
    assert_eq!(search.status.code(), Some(5));

    let path = env.run(&["config", "path"]);
    assert!(path.status.success());
}

#[test]
fn test_completions() {
    let env = Env::new();
    let output = env.run(&["completions", "bash"]);
    assert!(output.status.success());
    assert!(String::from_utf8(output.stdout).unwrap().contains("clings"));
}
