use std::process::{Command, Output};

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_patch_notes"))
        .args(args)
        .env("RUST_LOG", "warn")
        .output()
        .expect("run CLI")
}

fn assert_success(output: &Output) {
    assert!(
        output.status.success(),
        "cli exited with {}: {}",
        output.status,
        String::from_utf8_lossy(&output.stderr)
    );
}

#[test]
fn parse_writes_change_rows() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("changes.csv");

    let output = run(&[
        "parse",
        "--input",
        "tests/fixtures/patch_notes.txt",
        "--output",
        out.to_str().unwrap(),
    ]);
    assert_success(&output);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Rows: 11"), "stdout: {}", stdout);

    let csv = std::fs::read_to_string(&out).unwrap();
    let lines: Vec<_> = csv.lines().collect();
    assert_eq!(lines.len(), 12);
    assert_eq!(lines[0], "patch,build,date,section,change_type,previous,now,full_text");
    assert!(lines[1].starts_with(",,,,single,,,Diablo IV Patch Notes"));
    assert!(csv.contains(
        "2.5.3,70356,\"January 28, 2026\",Skills,comparison,115% damage,135% damage,Changed from 115% damage to 135% damage"
    ));
    assert!(csv.contains(
        "2.5.3,70356,\"January 28, 2026\",Skills,single,,,Previous: 8 second Cooldown"
    ));
    assert!(csv.contains(
        "2.5.2,70100,\"January 14, 2026\",Items,comparison,Previously 3 seconds,Now 2 seconds,"
    ));
}

#[test]
fn chunk_reads_documents_json() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("patches.json");
    let out = dir.path().join("chunks.json");
    std::fs::write(
        &input,
        r#"[
            {"version": "2.5.3", "build": "70356", "date": "January 28, 2026", "content": "One two. Three four. Five."},
            {"version": "2.5.2", "content": ""},
            {"version": "2.5.1", "content": "Six seven eight nine."}
        ]"#,
    )
    .unwrap();

    let output = run(&[
        "chunk",
        "-i",
        input.to_str().unwrap(),
        "-o",
        out.to_str().unwrap(),
        "--max-words",
        "2",
    ]);
    assert_success(&output);
    assert!(String::from_utf8_lossy(&output.stdout).contains("Chunks: 4"));

    let rows: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    let rows = rows.as_array().unwrap();
    let ids: Vec<_> = rows.iter().map(|r| r["chunk_id"].as_u64().unwrap()).collect();
    assert_eq!(ids, vec![0, 1, 2, 3]);
    assert_eq!(rows[3]["version"], "2.5.1");
    assert_eq!(rows[3]["word_count"], 4);
}

#[test]
fn max_words_from_environment() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("patches.json");
    let out = dir.path().join("chunks.csv");
    std::fs::write(&input, r#"[{"content": "A b. C d. E f."}]"#).unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_patch_notes"))
        .args(["chunk", "-i", input.to_str().unwrap(), "-o", out.to_str().unwrap()])
        .env("PATCH_NOTES_MAX_WORDS", "4")
        .output()
        .expect("run CLI");
    assert_success(&output);
    assert!(String::from_utf8_lossy(&output.stdout).contains("Chunks: 2"));
}

#[test]
fn run_pipeline_writes_both_tables() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("notes.sqlite");
    let db_arg = db.to_str().unwrap();

    let output = run(&[
        "run",
        "--input",
        "tests/fixtures/patch_notes.txt",
        "--changes",
        db_arg,
        "--chunks",
        db_arg,
        "--max-words",
        "400",
    ]);
    assert_success(&output);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Rows: 11"), "stdout: {}", stdout);
    // preamble, 2.5.3 and 2.5.2 each fit in one chunk
    assert!(stdout.contains("Chunks: 3"), "stdout: {}", stdout);
    assert!(db.exists());
}

#[test]
fn missing_input_fails() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("changes.csv");
    let output = run(&[
        "parse",
        "--input",
        "tests/fixtures/no-such-notes.html",
        "--output",
        out.to_str().unwrap(),
    ]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("no-such-notes.html"));
    assert!(!out.exists());
}

#[test]
fn explicit_flags_ignore_bad_environment() {
    let dir = tempfile::tempdir().unwrap();
    let changes = dir.path().join("changes.csv");
    let output = Command::new(env!("CARGO_BIN_EXE_patch_notes"))
        .args([
            "parse",
            "--input",
            "tests/fixtures/patch_notes.txt",
            "--output",
            changes.to_str().unwrap(),
        ])
        .env("PATCH_NOTES_MAX_WORDS", "lots")
        .output()
        .expect("run CLI");
    assert_success(&output);

    let input = dir.path().join("patches.json");
    let chunks = dir.path().join("chunks.csv");
    std::fs::write(&input, r#"[{"content": "A b. C d."}]"#).unwrap();
    let output = Command::new(env!("CARGO_BIN_EXE_patch_notes"))
        .args([
            "chunk",
            "-i",
            input.to_str().unwrap(),
            "-o",
            chunks.to_str().unwrap(),
            "-w",
            "2",
        ])
        .env("PATCH_NOTES_MAX_WORDS", "lots")
        .output()
        .expect("run CLI");
    assert_success(&output);
    assert!(String::from_utf8_lossy(&output.stdout).contains("Chunks: 2"));
}

#[test]
fn bad_environment_fails_when_budget_needed() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("patches.json");
    let chunks = dir.path().join("chunks.csv");
    std::fs::write(&input, r#"[{"content": "A b."}]"#).unwrap();
    let output = Command::new(env!("CARGO_BIN_EXE_patch_notes"))
        .args(["chunk", "-i", input.to_str().unwrap(), "-o", chunks.to_str().unwrap()])
        .env("PATCH_NOTES_MAX_WORDS", "lots")
        .output()
        .expect("run CLI");
    assert!(!output.status.success());
    assert!(!chunks.exists());
}

#[test]
fn empty_documents_still_write_header() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("patches.json");
    let chunks = dir.path().join("chunks.csv");
    std::fs::write(&input, r#"[{"version": "2.5.3", "content": ""}]"#).unwrap();

    let output = run(&["chunk", "-i", input.to_str().unwrap(), "-o", chunks.to_str().unwrap()]);
    assert_success(&output);
    assert!(String::from_utf8_lossy(&output.stdout).contains("Chunks: 0"));
    assert_eq!(
        std::fs::read_to_string(&chunks).unwrap(),
        "chunk_id,version,build,date,chunk_text,word_count\n"
    );
}
