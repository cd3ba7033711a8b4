//! Tagged progress lines on stdout.
//!
//! The `[OK]`/`[ERROR]`/`[WARN]`/`[info]` tags are part of the pipeline's
//! external interface and are parsed by callers, so they go to stdout via
//! `println!` rather than through the tracing subscriber.

use std::fmt::Display;

pub fn section(title: &str) {
    let rule = "=".repeat(70);
    println!("\n{rule}");
    println!("  {title}");
    println!("{rule}\n");
}

pub fn ok(msg: impl Display) {
    println!("[OK] {msg}");
}

pub fn error(msg: impl Display) {
    println!("[ERROR] {msg}");
}

pub fn warn(msg: impl Display) {
    println!("[WARN] {msg}");
}

pub fn info(msg: impl Display) {
    println!("[info] {msg}");
}

/// Indented echo of a step's trailing stdout lines.
pub fn tail(stdout: &str, lines: usize) {
    let all: Vec<&str> = stdout.trim().lines().collect();
    let start = all.len().saturating_sub(lines);
    for line in &all[start..] {
        println!("  {line}");
    }
}
