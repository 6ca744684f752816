//! End-to-end runs of a source list against a temporary working directory.

mod common;

use common::recording_runner::RecordingRunner;
use srcsync_core::orchestrator::CommandFailure;
use srcsync_core::source_list::parse_source_list;
use srcsync_core::{
    run_sources, FetchOutcome, RunOptions, ShellRunner, SourceTypeDef, SourceTypeRegistry,
};
use std::fs;
use tempfile::tempdir;

const LIST: &str = "\
https://example.com/foo.tar.gz  # comment

# pinned mirrors
ftp://host/file.rar
svn.example.org/proj/trunk
https://github.com/user/tool.git
";

fn output_text(buf: Vec<u8>) -> String {
    String::from_utf8(buf).unwrap()
}

#[test]
fn sequential_run_reports_every_line() {
    let dir = tempdir().unwrap();
    fs::create_dir(dir.path().join("proj")).unwrap();
    let registry = SourceTypeRegistry::builtin().unwrap();
    let runner = RecordingRunner::new();
    let lines = parse_source_list(LIST);
    let mut out: Vec<u8> = Vec::new();

    let report = run_sources(
        &registry,
        &lines,
        dir.path(),
        &runner,
        &RunOptions::default(),
        &mut out,
    )
    .unwrap();

    assert_eq!(
        runner.commands(),
        vec![
            "mkdir ./foo; wget https://example.com/foo.tar.gz; tar xvzf foo.tar.gz -C ./foo; rm -rf foo.tar.gz;",
            "cd proj; svn up;",
            "git clone https://github.com/user/tool.git;",
        ]
    );

    let outcomes: Vec<_> = report.lines.iter().map(|l| l.outcome.clone()).collect();
    assert_eq!(
        outcomes,
        vec![
            FetchOutcome::Succeeded,
            FetchOutcome::Skipped,
            FetchOutcome::Skipped,
            FetchOutcome::Unclassifiable,
            FetchOutcome::Succeeded,
            FetchOutcome::Succeeded,
        ]
    );
    assert_eq!(report.summary.succeeded, 3);
    assert_eq!(report.summary.skipped, 3);
    assert!(report.summary.all_succeeded());

    let text = output_text(out);
    assert!(text.contains("- Downloading https://example.com/foo.tar.gz...\n"));
    assert!(text.contains("- Updating svn.example.org/proj/trunk...\n"));
    assert!(text.contains("- No valid URL (ftp://host/file.rar). Skipped.\n"));
    assert_eq!(text.matches("- No valid URL. Skipped.").count(), 2);
    assert!(text.ends_with("- Done!\n3 succeeded, 0 failed, 0 unresolved, 3 skipped\n"));
}

#[test]
fn failure_does_not_stop_later_urls() {
    let dir = tempdir().unwrap();
    let registry = SourceTypeRegistry::builtin().unwrap();
    let runner = RecordingRunner::failing_on("foo.tar.gz");
    let lines = parse_source_list(LIST);
    let mut out: Vec<u8> = Vec::new();

    let report = run_sources(
        &registry,
        &lines,
        dir.path(),
        &runner,
        &RunOptions::default(),
        &mut out,
    )
    .unwrap();

    assert_eq!(runner.commands().len(), 3);
    assert_eq!(
        report.lines[0].outcome,
        FetchOutcome::Failed(CommandFailure::Exit(Some(1)))
    );
    assert_eq!(report.lines[5].outcome, FetchOutcome::Succeeded);
    assert_eq!(report.summary.failed, 1);
    assert!(!report.summary.all_succeeded());
    assert!(output_text(out).contains("  failed: exit status 1\n"));
}

#[test]
fn unresolvable_name_is_reported_and_skipped() {
    let dir = tempdir().unwrap();
    let registry = SourceTypeRegistry::builtin().unwrap();
    let runner = RecordingRunner::new();
    let lines = parse_source_list("https://svn.example.org/\nhttps://example.com/a.zip\n");
    let mut out: Vec<u8> = Vec::new();

    let report = run_sources(
        &registry,
        &lines,
        dir.path(),
        &runner,
        &RunOptions::default(),
        &mut out,
    )
    .unwrap();

    assert!(matches!(report.lines[0].outcome, FetchOutcome::Unresolved(_)));
    assert_eq!(report.lines[1].outcome, FetchOutcome::Succeeded);
    assert_eq!(report.summary.unresolved, 1);
    assert!(!report.summary.all_succeeded());
    assert_eq!(runner.commands().len(), 1);
}

#[test]
fn dry_run_executes_nothing() {
    let dir = tempdir().unwrap();
    let registry = SourceTypeRegistry::builtin().unwrap();
    let runner = RecordingRunner::new();
    let lines = parse_source_list(LIST);
    let mut out: Vec<u8> = Vec::new();
    let options = RunOptions {
        jobs: 4,
        dry_run: true,
    };

    let report = run_sources(&registry, &lines, dir.path(), &runner, &options, &mut out).unwrap();

    assert!(runner.commands().is_empty());
    assert_eq!(report.summary.planned, 3);
    let text = output_text(out);
    assert!(text.contains("  $ git clone https://github.com/user/tool.git;\n"));
    assert!(text.contains("3 planned, 0 succeeded"));
}

#[test]
fn parallel_run_keeps_blocks_whole_and_reports_in_input_order() {
    let dir = tempdir().unwrap();
    let registry = SourceTypeRegistry::builtin().unwrap();
    let runner = RecordingRunner::failing_on("tool.git");
    let text: String = (0..8)
        .map(|i| format!("https://example.com/pkg{}.zip\n", i))
        .chain(std::iter::once("https://github.com/user/tool.git\n".to_string()))
        .collect();
    let lines = parse_source_list(&text);
    let mut out: Vec<u8> = Vec::new();
    let options = RunOptions {
        jobs: 3,
        dry_run: false,
    };

    let report = run_sources(&registry, &lines, dir.path(), &runner, &options, &mut out).unwrap();

    assert_eq!(runner.commands().len(), 9);
    for (i, line) in report.lines.iter().take(8).enumerate() {
        assert_eq!(line.line_no, i + 1);
        assert_eq!(line.plan.as_ref().unwrap().name, format!("pkg{}", i));
        assert_eq!(line.outcome, FetchOutcome::Succeeded);
    }
    assert!(matches!(report.lines[8].outcome, FetchOutcome::Failed(_)));
    assert_eq!(report.summary.succeeded, 8);
    assert_eq!(report.summary.failed, 1);

    // Each announcement is immediately followed by that URL's own captured output.
    let text = output_text(out);
    let lines: Vec<&str> = text.lines().collect();
    for (i, line) in lines.iter().enumerate() {
        if let Some(url) = line
            .strip_prefix("- Downloading ")
            .and_then(|rest| rest.strip_suffix("..."))
        {
            let next = lines[i + 1];
            assert!(next.starts_with("ran ") && next.contains(url), "{}", next);
        }
    }
}

#[test]
fn real_shell_downloads_then_updates() {
    let dir = tempdir().unwrap();
    let custom = SourceTypeDef {
        key: "local".to_string(),
        url_pattern: r"^local:".to_string(),
        extension: None,
        filename_pattern: Some(r"^local:(\w+)$".to_string()),
        download: "mkdir $filename && echo fetched > $filename/state;".to_string(),
        update: "echo refreshed >> $filename/state; #download".to_string(),
    };
    let registry = SourceTypeRegistry::with_custom(&[custom]).unwrap();
    let runner = ShellRunner::default();
    let lines = parse_source_list("local:demo\n");

    let first = run_sources(
        &registry,
        &lines,
        dir.path(),
        &runner,
        &RunOptions::default(),
        &mut Vec::<u8>::new(),
    )
    .unwrap();
    assert_eq!(first.lines[0].outcome, FetchOutcome::Succeeded);
    assert_eq!(
        fs::read_to_string(dir.path().join("demo/state")).unwrap(),
        "fetched\n"
    );

    // Update appends, then the inlined download fails because the directory exists.
    let second = run_sources(
        &registry,
        &lines,
        dir.path(),
        &runner,
        &RunOptions::default(),
        &mut Vec::<u8>::new(),
    )
    .unwrap();
    assert_eq!(
        second.lines[0].plan.as_ref().unwrap().command,
        "echo refreshed >> demo/state; mkdir demo && echo fetched > demo/state;"
    );
    assert!(matches!(
        second.lines[0].outcome,
        FetchOutcome::Failed(CommandFailure::Exit(Some(_)))
    ));
    assert_eq!(
        fs::read_to_string(dir.path().join("demo/state")).unwrap(),
        "fetched\nrefreshed\n"
    );
}
