use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

fn dox_binary() -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove deps/
    path.push("dox");
    path
}

fn setup_test_env() -> (TempDir, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().to_path_buf();

    let content = root.join("src").join("content");
    let dumps = content.join("brain-dumps");
    let staging = content.join("staging");
    let docs = content.join("docs");
    fs::create_dir_all(&dumps).unwrap();
    fs::create_dir_all(&staging).unwrap();
    fs::create_dir_all(&docs).unwrap();

    fs::write(
        dumps.join("sprint-ramble.mdx"),
        "---\n\
         title: Sprint planning ramble\n\
         date: 2025-06-01\n\
         source: transcript\n\
         duration: 14m\n\
         tags:\n\
         - planning\n\
         processed: true\n\
         stagedItems:\n\
         - deploy-checklist\n\
         ---\n\
         \n\
         Raw transcript about deploys and the release process.\n",
    )
    .unwrap();
    fs::write(
        dumps.join("raw-ideas.mdx"),
        "---\n\
         title: Raw ideas\n\
         date: 2025-06-02\n\
         source: text\n\
         processed: false\n\
         ---\n\
         \n\
         Half-formed thoughts about API versioning.\n",
    )
    .unwrap();
    fs::write(
        staging.join("deploy-checklist.mdx"),
        "---\n\
         title: Deploy checklist\n\
         description: Steps for a safe production deploy.\n\
         sourceFile: sprint-ramble\n\
         extractedDate: 2025-06-03\n\
         targetCategory: operations\n\
         status: ready\n\
         tags:\n\
         - deploy\n\
         ---\n\
         \n\
         1. Freeze merges.\n\
         2. Run the smoke suite.\n",
    )
    .unwrap();
    fs::write(
        docs.join("getting-started.mdx"),
        "---\n\
         title: Getting Started\n\
         description: Orientation for new contributors.\n\
         category: meta\n\
         sidebar: true\n\
         ---\n\
         \n\
         Welcome aboard.\n",
    )
    .unwrap();
    fs::write(
        docs.join("wip-page.mdx"),
        "---\n\
         title: Work in progress\n\
         description: Not ready yet.\n\
         draft: true\n\
         ---\n\
         \n\
         Unfinished.\n",
    )
    .unwrap();

    let config_content = format!(
        "[content]\nroot = \"{}\"\n",
        content.display().to_string().replace('\\', "/")
    );

    let config_path = root.join("dox.toml");
    fs::write(&config_path, config_content).unwrap();

    (tmp, config_path)
}

fn run_dox(config_path: &Path, args: &[&str]) -> (String, String, bool) {
    let binary = dox_binary();
    let output = Command::new(&binary)
        .arg("--config")
        .arg(config_path.to_str().unwrap())
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("Failed to run dox binary at {:?}: {}", binary, e));

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let success = output.status.success();
    (stdout, stderr, success)
}

fn content_dir(config_path: &Path) -> PathBuf {
    config_path.parent().unwrap().join("src").join("content")
}

#[test]
fn test_init_creates_collections() {
    let tmp = TempDir::new().unwrap();
    let config_path = tmp.path().join("dox.toml");
    let content = tmp.path().join("content");
    fs::write(
        &config_path,
        format!(
            "[content]\nroot = \"{}\"\n",
            content.display().to_string().replace('\\', "/")
        ),
    )
    .unwrap();

    let (stdout, stderr, success) = run_dox(&config_path, &["init"]);
    assert!(success, "init failed: stdout={}, stderr={}", stdout, stderr);
    assert!(content.join("brain-dumps").is_dir());
    assert!(content.join("staging").is_dir());
    assert!(content.join("docs").is_dir());
    assert!(content.join("docs").join("getting-started.mdx").exists());

    // Idempotent
    let (_, _, success2) = run_dox(&config_path, &["init"]);
    assert!(success2, "Second init failed (not idempotent)");
}

#[test]
fn test_check_passes_on_valid_tree() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, stderr, success) = run_dox(&config_path, &["check"]);
    assert!(success, "check failed: stdout={}, stderr={}", stdout, stderr);
    assert!(stdout.contains("0 errors"), "got: {}", stdout);
    assert!(stdout.contains("ok"));
}

#[test]
fn test_check_fails_on_broken_source_file() {
    let (_tmp, config_path) = setup_test_env();

    fs::write(
        content_dir(&config_path).join("staging").join("orphan.mdx"),
        "---\ntitle: Orphan\ndescription: d\nsourceFile: no-such-dump\n\
         extractedDate: 2025-06-04\nstatus: new\ntags: []\n---\nOrphan body.\n",
    )
    .unwrap();

    let (stdout, stderr, success) = run_dox(&config_path, &["check"]);
    assert!(!success, "check should fail on a broken reference");
    assert!(stdout.contains("no-such-dump"), "got: {}", stdout);
    assert!(stderr.contains("validation failed"), "got: {}", stderr);
}

#[test]
fn test_check_fails_on_broken_staged_items() {
    let (_tmp, config_path) = setup_test_env();

    fs::write(
        content_dir(&config_path)
            .join("brain-dumps")
            .join("bad-dump.mdx"),
        "---\ntitle: Bad dump\ndate: 2025-06-05\nsource: text\nprocessed: true\n\
         stagedItems:\n- ghost-entry\n---\nSomething.\n",
    )
    .unwrap();

    let (stdout, _, success) = run_dox(&config_path, &["check"]);
    assert!(!success);
    assert!(stdout.contains("ghost-entry"), "got: {}", stdout);
}

#[test]
fn test_check_fails_on_unterminated_frontmatter() {
    let (_tmp, config_path) = setup_test_env();

    fs::write(
        content_dir(&config_path).join("docs").join("broken.mdx"),
        "---\ntitle: Broken\ndescription: d\n",
    )
    .unwrap();

    let (stdout, _, success) = run_dox(&config_path, &["check"]);
    assert!(!success);
    assert!(stdout.contains("not terminated"), "got: {}", stdout);
}

#[test]
fn test_check_fails_on_unknown_frontmatter_key() {
    let (_tmp, config_path) = setup_test_env();

    fs::write(
        content_dir(&config_path).join("docs").join("typo.mdx"),
        "---\ntitle: Typo\ndescription: d\ndrafts: true\n---\nBody.\n",
    )
    .unwrap();

    let (stdout, _, success) = run_dox(&config_path, &["check"]);
    assert!(!success, "unknown keys should fail validation");
    assert!(stdout.contains("typo"), "got: {}", stdout);
}

#[test]
fn test_check_warning_is_not_fatal_unless_strict() {
    let (_tmp, config_path) = setup_test_env();

    // processed dump without staged items: warning-level
    fs::write(
        content_dir(&config_path)
            .join("brain-dumps")
            .join("mid-extraction.mdx"),
        "---\ntitle: Mid extraction\ndate: 2025-06-06\nsource: audio\nprocessed: true\n---\n\
         Still being worked through.\n",
    )
    .unwrap();

    let (stdout, _, success) = run_dox(&config_path, &["check"]);
    assert!(success, "warnings alone should not fail: {}", stdout);
    assert!(stdout.contains("1 warning"), "got: {}", stdout);

    let (_, stderr, strict_success) = run_dox(&config_path, &["check", "--strict"]);
    assert!(!strict_success, "--strict should fail on warnings");
    assert!(stderr.contains("validation failed"));
}

#[test]
fn test_check_json_output() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, _, success) = run_dox(&config_path, &["check", "--json"]);
    assert!(success);
    let findings: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert!(findings.is_array());
}

#[test]
fn test_capture_creates_dump() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, stderr, success) = run_dox(
        &config_path,
        &["capture", "My New Dump", "--source", "text", "--tags", "a,b"],
    );
    assert!(
        success,
        "capture failed: stdout={}, stderr={}",
        stdout, stderr
    );

    let path = content_dir(&config_path)
        .join("brain-dumps")
        .join("my-new-dump.mdx");
    assert!(path.exists());
    let text = fs::read_to_string(&path).unwrap();
    assert!(text.contains("title: My New Dump"));
    assert!(text.contains("processed: false"));

    // the new dump still validates
    let (_, _, check_ok) = run_dox(&config_path, &["check"]);
    assert!(check_ok);
}

#[test]
fn test_capture_refuses_duplicate() {
    let (_tmp, config_path) = setup_test_env();

    run_dox(&config_path, &["capture", "Once"]);
    let (_, stderr, success) = run_dox(&config_path, &["capture", "Once"]);
    assert!(!success, "duplicate capture should fail");
    assert!(stderr.contains("already exists"), "got: {}", stderr);
}

#[test]
fn test_capture_unknown_source_errors() {
    let (_tmp, config_path) = setup_test_env();

    let (_, stderr, success) = run_dox(&config_path, &["capture", "X", "--source", "video"]);
    assert!(!success);
    assert!(stderr.contains("Unknown source kind"), "got: {}", stderr);
}

#[test]
fn test_extract_creates_staging_entry_and_marks_dump() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, stderr, success) = run_dox(
        &config_path,
        &["extract", "raw-ideas", "--title", "API Notes"],
    );
    assert!(
        success,
        "extract failed: stdout={}, stderr={}",
        stdout, stderr
    );

    let staging_path = content_dir(&config_path)
        .join("staging")
        .join("api-notes.mdx");
    assert!(staging_path.exists());
    let staging_text = fs::read_to_string(&staging_path).unwrap();
    assert!(staging_text.contains("status: new"));
    assert!(staging_text.contains("sourceFile: raw-ideas"));

    let dump_text = fs::read_to_string(
        content_dir(&config_path)
            .join("brain-dumps")
            .join("raw-ideas.mdx"),
    )
    .unwrap();
    assert!(dump_text.contains("processed: true"));
    assert!(dump_text.contains("api-notes"));
    // body carried through the rewrite
    assert!(dump_text.contains("Half-formed thoughts about API versioning."));

    // references are consistent afterwards
    let (_, _, check_ok) = run_dox(&config_path, &["check"]);
    assert!(check_ok);
}

#[test]
fn test_extract_missing_dump_errors() {
    let (_tmp, config_path) = setup_test_env();

    let (_, stderr, success) = run_dox(&config_path, &["extract", "nope", "--title", "T"]);
    assert!(!success);
    assert!(stderr.contains("not found"), "got: {}", stderr);
}

#[test]
fn test_advance_moves_forward_only() {
    let (_tmp, config_path) = setup_test_env();

    // backward: ready -> reviewed
    let (_, stderr, success) = run_dox(&config_path, &["advance", "deploy-checklist", "reviewed"]);
    assert!(!success, "backward advance should fail");
    assert!(stderr.contains("only advances"), "got: {}", stderr);

    // same state
    let (_, stderr, success) = run_dox(&config_path, &["advance", "deploy-checklist", "ready"]);
    assert!(!success);
    assert!(stderr.contains("already"), "got: {}", stderr);

    // forward
    let (stdout, _, success) = run_dox(&config_path, &["advance", "deploy-checklist", "integrated"]);
    assert!(success, "forward advance failed: {}", stdout);
    assert!(stdout.contains("ready -> integrated"));

    let text = fs::read_to_string(
        content_dir(&config_path)
            .join("staging")
            .join("deploy-checklist.mdx"),
    )
    .unwrap();
    assert!(text.contains("status: integrated"));
}

#[test]
fn test_advance_unknown_status_errors() {
    let (_tmp, config_path) = setup_test_env();

    let (_, stderr, success) = run_dox(&config_path, &["advance", "deploy-checklist", "done"]);
    assert!(!success);
    assert!(stderr.contains("Unknown status"), "got: {}", stderr);
}

#[test]
fn test_promote_requires_ready() {
    let (_tmp, config_path) = setup_test_env();

    run_dox(
        &config_path,
        &["extract", "raw-ideas", "--title", "Not Ready Yet"],
    );
    let (_, stderr, success) = run_dox(&config_path, &["promote", "not-ready-yet"]);
    assert!(!success, "promoting a 'new' entry should fail");
    assert!(stderr.contains("advance it to 'ready'"), "got: {}", stderr);
}

#[test]
fn test_promote_creates_doc_and_integrates() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, stderr, success) = run_dox(&config_path, &["promote", "deploy-checklist"]);
    assert!(
        success,
        "promote failed: stdout={}, stderr={}",
        stdout, stderr
    );

    let doc_path = content_dir(&config_path)
        .join("docs")
        .join("deploy-checklist.mdx");
    assert!(doc_path.exists());
    let doc_text = fs::read_to_string(&doc_path).unwrap();
    assert!(doc_text.contains("title: Deploy checklist"));
    assert!(doc_text.contains("draft: true"));
    assert!(doc_text.contains("category: operations"));
    assert!(doc_text.contains("Freeze merges."));

    let staging_text = fs::read_to_string(
        content_dir(&config_path)
            .join("staging")
            .join("deploy-checklist.mdx"),
    )
    .unwrap();
    assert!(staging_text.contains("status: integrated"));

    // promoting again is refused
    let (_, stderr, again) = run_dox(&config_path, &["promote", "deploy-checklist"]);
    assert!(!again);
    assert!(stderr.contains("already integrated"), "got: {}", stderr);
}

#[test]
fn test_promote_publish_flag() {
    let (_tmp, config_path) = setup_test_env();

    let (_, _, success) = run_dox(&config_path, &["promote", "deploy-checklist", "--publish"]);
    assert!(success);
    let doc_text = fs::read_to_string(
        content_dir(&config_path)
            .join("docs")
            .join("deploy-checklist.mdx"),
    )
    .unwrap();
    assert!(doc_text.contains("draft: false"));
}

#[test]
fn test_list_published_excludes_drafts() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, _, success) = run_dox(&config_path, &["list", "docs", "--published"]);
    assert!(success);
    assert!(stdout.contains("getting-started"), "got: {}", stdout);
    assert!(!stdout.contains("wip-page"), "got: {}", stdout);

    // without the flag both appear
    let (stdout, _, _) = run_dox(&config_path, &["list", "docs"]);
    assert!(stdout.contains("wip-page"));
}

#[test]
fn test_list_staging_by_status() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, _, success) = run_dox(&config_path, &["list", "staging", "--status", "ready"]);
    assert!(success);
    assert!(stdout.contains("deploy-checklist"));

    let (stdout, _, _) = run_dox(&config_path, &["list", "staging", "--status", "new"]);
    assert!(stdout.contains("No entries"));
}

#[test]
fn test_list_json() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, _, success) = run_dox(&config_path, &["list", "staging", "--json"]);
    assert!(success);
    let rows: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(rows[0]["slug"], "deploy-checklist");
    assert_eq!(rows[0]["sourceFile"], "sprint-ramble");
}

#[test]
fn test_list_unknown_collection_errors() {
    let (_tmp, config_path) = setup_test_env();

    let (_, stderr, success) = run_dox(&config_path, &["list", "pages"]);
    assert!(!success);
    assert!(stderr.contains("Unknown collection"), "got: {}", stderr);
}

#[test]
fn test_get_prints_entry() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, _, success) = run_dox(&config_path, &["get", "staging", "deploy-checklist"]);
    assert!(success);
    assert!(stdout.contains("--- Entry ---"));
    assert!(stdout.contains("sourceFile:  sprint-ramble"));
    assert!(stdout.contains("--- Body ---"));
    assert!(stdout.contains("Freeze merges."));
}

#[test]
fn test_get_missing_entry_errors() {
    let (_tmp, config_path) = setup_test_env();

    let (_, stderr, success) = run_dox(&config_path, &["get", "docs", "nonexistent"]);
    assert!(!success);
    assert!(stderr.contains("not found"), "got: {}", stderr);
}

#[test]
fn test_stats_overview() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, _, success) = run_dox(&config_path, &["stats"]);
    assert!(success);
    assert!(stdout.contains("Brain dumps:  2"), "got: {}", stdout);
    assert!(stdout.contains("Staging:      1"));
    assert!(stdout.contains("Docs:         2"));
}

#[test]
fn test_export_emits_full_graph() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, _, success) = run_dox(&config_path, &["export"]);
    assert!(success);
    let data: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(data["brain_dumps"].as_array().unwrap().len(), 2);
    assert_eq!(data["staging"][0]["slug"], "deploy-checklist");
    assert!(data["docs"][0]["body"].as_str().is_some());
}

#[test]
fn test_collections_health() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, _, success) = run_dox(&config_path, &["collections"]);
    assert!(success);
    assert!(stdout.contains("brain-dumps"));
    assert!(stdout.contains("staging"));
    assert!(stdout.contains("docs"));
    assert!(stdout.contains("OK"));
}

#[test]
fn test_missing_config_errors() {
    let tmp = TempDir::new().unwrap();
    let config_path = tmp.path().join("absent.toml");

    let (_, stderr, success) = run_dox(&config_path, &["stats"]);
    assert!(!success);
    assert!(stderr.contains("config"), "got: {}", stderr);
}
