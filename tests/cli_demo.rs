//! CLI integration tests for the demo and bench modes.

use std::process::{Command, Output};

fn run_binary(args: &[&str]) -> Output {
    let bin = env!("CARGO_BIN_EXE_diagonal_duet");
    Command::new(bin)
        .args(args)
        .output()
        .expect("failed to run binary")
}

/// Demo output lines with debug-build log lines filtered out.
fn visible_lines(stdout: &str) -> Vec<&str> {
    stdout
        .lines()
        .filter(|line| !line.starts_with('['))
        .collect()
}

/// Parse the fixed-width matrix block printed under `title`. Only valid
/// for matrices narrow enough to fit a single column block.
fn parse_matrix(stdout: &str, title: &str) -> Vec<Vec<i64>> {
    let mut rows = Vec::new();
    let mut in_block = false;
    for line in stdout.lines() {
        if line.starts_with('[') {
            continue;
        }
        if line.trim() == title {
            in_block = true;
            continue;
        }
        if in_block {
            if line.trim().is_empty() {
                break;
            }
            let Some((_, cells)) = line.split_once('|') else {
                continue;
            };
            let parsed: Vec<i64> = cells
                .split_whitespace()
                .filter_map(|token| token.parse().ok())
                .collect();
            // The header row (C1 C2 ...) yields no integers.
            if !parsed.is_empty() {
                rows.push(parsed);
            }
        }
    }
    assert!(!rows.is_empty(), "matrix block {title:?} missing from output");
    rows
}

fn reported_sum(stdout: &str, label: &str) -> i64 {
    let line = stdout
        .lines()
        .find(|line| line.starts_with(label))
        .unwrap_or_else(|| panic!("sum line for {label:?} missing from output"));
    line.rsplit_once("= ")
        .and_then(|(_, value)| value.trim().parse().ok())
        .unwrap_or_else(|| panic!("sum line for {label:?} has no integer: {line}"))
}

#[test]
fn demo_prints_matrices_then_labeled_sums() {
    let output = run_binary(&[]);
    assert!(
        output.status.success(),
        "demo exited with non-zero status: {:?}",
        output.status
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines = visible_lines(&stdout);

    let results_at = lines
        .iter()
        .position(|line| *line == "==== Results ====")
        .expect("results rule missing");
    for title in ["==== Generated matrices ====", "Matrix 1", "Matrix 2"] {
        let at = lines
            .iter()
            .position(|line| *line == title)
            .unwrap_or_else(|| panic!("{title:?} missing from output"));
        assert!(at < results_at, "{title:?} printed after the results rule");
    }

    // Exactly two sum lines, both after the results rule.
    let sum_positions: Vec<usize> = lines
        .iter()
        .enumerate()
        .filter(|(_, line)| line.contains("principal diagonal sum"))
        .map(|(index, _)| index)
        .collect();
    assert_eq!(sum_positions.len(), 2, "expected exactly two sum lines");
    assert!(sum_positions.iter().all(|&at| at > results_at));
    assert!(stdout.contains("Worker 1 (matrix 1): principal diagonal sum = "));
    assert!(stdout.contains("Worker 2 (matrix 2): principal diagonal sum = "));
}

#[test]
fn reported_sums_match_the_printed_diagonals() {
    let output = run_binary(&[]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);

    for (title, label) in [
        ("Matrix 1", "Worker 1 (matrix 1)"),
        ("Matrix 2", "Worker 2 (matrix 2)"),
    ] {
        let rows = parse_matrix(&stdout, title);
        assert_eq!(rows.len(), 4, "default demo matrix should be 4x4");
        let diagonal: i64 = rows.iter().enumerate().map(|(index, row)| row[index]).sum();
        assert_eq!(
            reported_sum(&stdout, label),
            diagonal,
            "{label} reported a sum that differs from the printed diagonal"
        );
    }
}

#[test]
fn fixed_seed_runs_are_reproducible() {
    let first = run_binary(&["5", "42"]);
    let second = run_binary(&["5", "42"]);
    assert!(first.status.success() && second.status.success());

    let first_out = String::from_utf8_lossy(&first.stdout);
    let second_out = String::from_utf8_lossy(&second.stdout);
    for title in ["Matrix 1", "Matrix 2"] {
        assert_eq!(
            parse_matrix(&first_out, title),
            parse_matrix(&second_out, title),
            "{title} differs between two runs with the same seed"
        );
    }

    // The two phase-two workers may print in either order.
    let sums = |stdout: &str| {
        let mut pair = [
            reported_sum(stdout, "Worker 1 (matrix 1)"),
            reported_sum(stdout, "Worker 2 (matrix 2)"),
        ];
        pair.sort_unstable();
        pair
    };
    assert_eq!(sums(&first_out), sums(&second_out));
}

#[test]
fn inverted_range_fails_with_invalid_argument() {
    let output = run_binary(&["4", "42", "9", "1"]);
    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("invalid argument"),
        "stderr missing invalid-argument message: {stderr}"
    );
}

#[test]
fn bench_prints_a_csv_summary() {
    let output = run_binary(&["bench", "8", "3"]);
    assert!(
        output.status.success(),
        "bench exited with non-zero status: {:?}",
        output.status
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    let header_at = stdout
        .lines()
        .position(|line| {
            line == "n,iterations,elapsed_ms,throughput_runs_per_s,avg_run_us,cpu_user_s,cpu_sys_s,checksum"
        })
        .expect("bench CSV header missing");
    let row = stdout
        .lines()
        .nth(header_at + 1)
        .expect("bench CSV row missing");
    assert!(row.starts_with("8,3,"), "unexpected bench row: {row}");
}
