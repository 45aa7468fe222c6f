//! Source scan for the designer's never-raise contract.
//!
//! Store mutations answer with `Outcome`, designer round trips with `bool` or
//! `Option`, and neither may panic. This walks the production files under
//! `src/` (test files are skipped) and flags the constructs that would break
//! that contract or bypass the crate's logging and config seams.

use std::fs;
use std::path::Path;

/// A banned construct and the files, if any, where it is expected.
struct Rule {
    pattern: &'static str,
    allowed_in: &'static [&'static str],
    reason: &'static str,
}

const RULES: &[Rule] = &[
    Rule { pattern: ".unwrap()", allowed_in: &[], reason: "panics on None or Err" },
    Rule { pattern: ".expect(", allowed_in: &[], reason: "panics on None or Err" },
    Rule { pattern: "panic!(", allowed_in: &[], reason: "operations report failure as values" },
    Rule { pattern: "unreachable!(", allowed_in: &[], reason: "operations report failure as values" },
    Rule { pattern: "todo!(", allowed_in: &[], reason: "unfinished code path" },
    Rule { pattern: "unimplemented!(", allowed_in: &[], reason: "unfinished code path" },
    Rule { pattern: "let _ =", allowed_in: &[], reason: "drops a Result unread" },
    Rule { pattern: ".ok()", allowed_in: &["src/persistence/config.rs"], reason: "turns an error into None unlogged" },
    Rule { pattern: "std::env::var", allowed_in: &["src/persistence/config.rs"], reason: "env is read by BackendConfig" },
    Rule { pattern: "println!(", allowed_in: &[], reason: "log through tracing" },
    Rule { pattern: "eprintln!(", allowed_in: &[], reason: "log through tracing" },
    Rule { pattern: "#[allow(dead_code)]", allowed_in: &[], reason: "delete unused code instead" },
];

struct SourceFile {
    path: String,
    lines: Vec<String>,
}

fn production_sources() -> Vec<SourceFile> {
    let mut files = Vec::new();
    walk(Path::new("src"), &mut files);
    files
}

fn walk(dir: &Path, out: &mut Vec<SourceFile>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for path in entries.flatten().map(|entry| entry.path()) {
        if path.is_dir() {
            walk(&path, out);
            continue;
        }
        let name = path.to_string_lossy().replace('\\', "/");
        if !name.ends_with(".rs") || name.ends_with("_test.rs") {
            continue;
        }
        if let Ok(content) = fs::read_to_string(&path) {
            out.push(SourceFile { path: name, lines: content.lines().map(str::to_owned).collect() });
        }
    }
}

/// Code lines of `file`, numbered from 1, with comment lines dropped.
fn code_lines(file: &SourceFile) -> impl Iterator<Item = (usize, &str)> {
    file.lines
        .iter()
        .enumerate()
        .map(|(i, line)| (i + 1, line.as_str()))
        .filter(|(_, line)| !line.trim_start().starts_with("//"))
}

#[test]
fn sources_are_found() {
    let files = production_sources();
    assert!(files.iter().any(|f| f.path == "src/store.rs"), "run from the crate root");
}

#[test]
fn banned_constructs_stay_out_of_production_code() {
    let files = production_sources();
    let mut violations = Vec::new();
    for rule in RULES {
        for file in files.iter().filter(|f| !rule.allowed_in.contains(&f.path.as_str())) {
            for (no, _) in code_lines(file).filter(|(_, line)| line.contains(rule.pattern)) {
                violations.push(format!("  {}:{no}: `{}` ({})", file.path, rule.pattern, rule.reason));
            }
        }
    }
    assert!(violations.is_empty(), "banned constructs found:\n{}", violations.join("\n"));
}

#[test]
fn float_clamp_only_behind_range_guard() {
    // `f64::clamp` panics when min > max, which a footprint wider than the
    // room produces. Every call must sit behind the `lo <= hi` check.
    let files = production_sources();
    let mut calls = Vec::new();
    for file in &files {
        for (no, line) in code_lines(file).filter(|(_, line)| line.contains(".clamp(")) {
            calls.push((file.path.clone(), no, line.contains("if lo <= hi")));
        }
    }
    assert!(!calls.is_empty(), "footprint clamp not found");
    let unguarded: Vec<_> = calls.iter().filter(|(_, _, guarded)| !guarded).collect();
    assert!(unguarded.is_empty(), "unguarded clamp calls: {unguarded:?}");
}

#[test]
fn furniture_removal_is_bounds_checked() {
    // `Vec::remove` panics past the end; the store checks the index first.
    let store = production_sources().into_iter().find(|f| f.path == "src/store.rs");
    let Some(store) = store else {
        panic!("src/store.rs missing");
    };
    let lines: Vec<(usize, &str)> = code_lines(&store).collect();
    for (pos, (no, line)) in lines.iter().enumerate() {
        if !line.contains(".furniture.remove(") {
            continue;
        }
        let window = &lines[pos.saturating_sub(4)..pos];
        assert!(
            window.iter().any(|(_, prev)| prev.contains(">= self.furniture.len()")),
            "src/store.rs:{no}: furniture removed without a preceding bounds check"
        );
    }
}
