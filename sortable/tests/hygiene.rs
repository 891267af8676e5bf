//! Hygiene: source-level standards for the sortable crate.
//!
//! Every pattern has a budget, normally zero. Production code under `src/`
//! is scanned; sibling `*_test.rs` files are exempt. A budget only shrinks.

use std::fs;
use std::path::{Path, PathBuf};

struct Rule {
    name: &'static str,
    pattern: &'static str,
    budget: usize,
}

const RULES: &[Rule] = &[
    // Crashes.
    Rule { name: "unwrap", pattern: ".unwrap()", budget: 0 },
    Rule { name: "expect", pattern: ".expect(", budget: 0 },
    Rule { name: "panic", pattern: "panic!(", budget: 0 },
    Rule { name: "unreachable", pattern: "unreachable!(", budget: 0 },
    Rule { name: "todo", pattern: "todo!(", budget: 0 },
    Rule { name: "unimplemented", pattern: "unimplemented!(", budget: 0 },
    // Errors dropped without a look.
    Rule { name: "silent discard", pattern: "let _ =", budget: 0 },
    Rule { name: "dot ok", pattern: ".ok()", budget: 0 },
    // Structure.
    Rule { name: "allow dead code", pattern: "#[allow(dead_code)]", budget: 0 },
    // Library output goes through tracing.
    Rule { name: "println", pattern: "println!(", budget: 0 },
    Rule { name: "eprintln", pattern: "eprintln!(", budget: 0 },
    Rule { name: "dbg", pattern: "dbg!(", budget: 0 },
];

fn production_files(dir: &Path, out: &mut Vec<(PathBuf, String)>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            production_files(&path, out);
            continue;
        }
        let is_rs = path.extension().is_some_and(|e| e == "rs");
        let is_test = path.to_string_lossy().ends_with("_test.rs");
        if is_rs && !is_test {
            if let Ok(content) = fs::read_to_string(&path) {
                out.push((path, content));
            }
        }
    }
}

fn hits(files: &[(PathBuf, String)], pattern: &str) -> Vec<(String, usize)> {
    files
        .iter()
        .map(|(path, content)| (path.display().to_string(), content.lines().filter(|l| l.contains(pattern)).count()))
        .filter(|(_, n)| *n > 0)
        .collect()
}

#[test]
fn source_tree_is_not_empty() {
    let mut files = Vec::new();
    production_files(Path::new("src"), &mut files);
    assert!(files.iter().any(|(p, _)| p.ends_with("lib.rs")), "run from the crate root");
}

#[test]
fn budgets_hold() {
    let mut files = Vec::new();
    production_files(Path::new("src"), &mut files);

    let mut report = Vec::new();
    for rule in RULES {
        let found = hits(&files, rule.pattern);
        let count: usize = found.iter().map(|(_, n)| n).sum();
        if count > rule.budget {
            let detail: Vec<String> = found.iter().map(|(p, n)| format!("    {p}: {n}")).collect();
            report.push(format!("{} budget exceeded: found {count}, max {}\n{}", rule.name, rule.budget, detail.join("\n")));
        }
    }
    assert!(report.is_empty(), "{}", report.join("\n"));
}
