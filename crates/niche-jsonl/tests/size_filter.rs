//! File-level tests for the size filter.
//!
//! These tests run [`SizeFilter`] against real files on disk and check the
//! output file byte for byte.
//!
//! # Test Categories
//!
//! - Catalog scenarios: mixed sizes, boundary lines, everything dropped
//! - Output contract: order, verbatim content, empty output still created
//! - Repeatability: identical output across runs
//! - Failure paths: missing input, reuse of a finished filter

use niche_jsonl::{
    filter_file, Error, FilterConfig, FilterObserver, FilterState, FilterSummary, MaxSize,
    NoopObserver, SizeFilter,
};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const MB: usize = 1024 * 1024;

// =============================================================================
// Helpers
// =============================================================================

/// Builds a JSON-looking line of exactly `len` bytes.
fn line_of_len(len: usize) -> String {
    if len < 10 {
        return "x".repeat(len);
    }
    // `{"bio":"` plus `"}` is ten bytes.
    format!("{{\"bio\":\"{}\"}}", "a".repeat(len - 10))
}

fn write_input(dir: &TempDir, name: &str, lines: &[String]) -> PathBuf {
    let path = dir.path().join(name);
    let mut content = lines.join("\n");
    if !lines.is_empty() {
        content.push('\n');
    }
    fs::write(&path, content).expect("write input");
    path
}

fn read_output_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .expect("read output")
        .lines()
        .map(str::to_string)
        .collect()
}

// =============================================================================
// Catalog Scenarios
// =============================================================================

#[tokio::test]
async fn mixed_sizes_drop_only_the_line_over_fifteen_megabytes() {
    let dir = TempDir::new().unwrap();
    let lines = vec![
        line_of_len(10),
        line_of_len(20),
        line_of_len(15 * MB + 1),
        line_of_len(30),
        line_of_len(15 * MB),
    ];
    let input = write_input(&dir, "artists.jsonl", &lines);
    let output = dir.path().join("artists_filtered.jsonl");

    let summary = filter_file(&input, &output, MaxSize::from_megabytes(15.0).unwrap())
        .await
        .unwrap();

    assert_eq!(summary.lines_processed, 5);
    assert_eq!(summary.lines_dropped, 1);
    assert_eq!(summary.lines_written, 4);
    assert_eq!(summary.dropped_line_numbers, vec![3]);

    let written = read_output_lines(&output);
    assert_eq!(written.len(), 4);
    assert_eq!(written[0], lines[0]);
    assert_eq!(written[1], lines[1]);
    assert_eq!(written[2], lines[3]);
    assert_eq!(written[3].len(), 15 * MB);
}

#[tokio::test]
async fn five_megabyte_line_is_kept_under_default_threshold() {
    let dir = TempDir::new().unwrap();
    let lines = vec![
        line_of_len(10),
        line_of_len(20),
        line_of_len(5 * MB + 1),
        line_of_len(30),
        line_of_len(15 * MB),
    ];
    let input = write_input(&dir, "genres.jsonl", &lines);
    let output = dir.path().join("genres_filtered.jsonl");

    let summary = filter_file(&input, &output, MaxSize::default()).await.unwrap();

    assert_eq!(summary.lines_processed, 5);
    assert_eq!(summary.lines_dropped, 0);
    assert_eq!(read_output_lines(&output), lines);
}

#[tokio::test]
async fn tiny_threshold_drops_every_line_and_leaves_empty_output() {
    let dir = TempDir::new().unwrap();
    let lines: Vec<String> = (0..7).map(|i| format!("{{\"id\":{i}}}")).collect();
    let input = write_input(&dir, "requests.jsonl", &lines);
    let output = dir.path().join("requests_filtered.jsonl");

    let summary = filter_file(&input, &output, MaxSize::from_megabytes(0.000_001).unwrap())
        .await
        .unwrap();

    assert_eq!(summary.lines_processed, 7);
    assert_eq!(summary.lines_dropped, 7);
    assert_eq!(summary.dropped_line_numbers, (1..=7).collect::<Vec<u64>>());
    assert!(output.exists());
    assert_eq!(fs::metadata(&output).unwrap().len(), 0);
}

#[tokio::test]
async fn empty_input_produces_empty_output() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "empty.jsonl", &[]);
    let output = dir.path().join("empty_filtered.jsonl");

    let summary = filter_file(&input, &output, MaxSize::default()).await.unwrap();

    assert_eq!(summary.lines_processed, 0);
    assert_eq!(summary.lines_dropped, 0);
    assert!(summary.dropped_line_numbers.is_empty());
    assert!(output.exists());
    assert_eq!(fs::read(&output).unwrap(), b"");
}

// =============================================================================
// Output Contract
// =============================================================================

#[tokio::test]
async fn kept_lines_preserve_order_and_content() {
    let dir = TempDir::new().unwrap();
    let lines: Vec<String> = (1..=50)
        .map(|i| {
            if i % 7 == 0 {
                format!("{{\"id\":{i},\"blob\":\"{}\"}}", "z".repeat(200))
            } else {
                format!("{{\"id\":{i},\"name\":\"Artist ünïcödé {i}\"}}")
            }
        })
        .collect();
    let input = write_input(&dir, "users.jsonl", &lines);
    let output = dir.path().join("users_filtered.jsonl");

    let summary = filter_file(&input, &output, MaxSize::from_bytes(100)).await.unwrap();

    let expected: Vec<String> = lines
        .iter()
        .enumerate()
        .filter(|(i, _)| (i + 1) % 7 != 0)
        .map(|(_, l)| l.clone())
        .collect();
    assert_eq!(read_output_lines(&output), expected);
    assert_eq!(summary.dropped_line_numbers, vec![7, 14, 21, 28, 35, 42, 49]);
    assert_eq!(
        summary.lines_processed,
        summary.lines_written + summary.lines_dropped
    );
}

#[tokio::test]
async fn invalid_json_passes_through_untouched() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("broken.jsonl");
    fs::write(&input, b"{not json\n\n  padded  \n{\"ok\":true}").unwrap();
    let output = dir.path().join("broken_filtered.jsonl");

    let summary = filter_file(&input, &output, MaxSize::from_bytes(64)).await.unwrap();

    assert_eq!(summary.lines_processed, 4);
    assert_eq!(fs::read(&output).unwrap(), b"{not json\n\n  padded  \n{\"ok\":true}\n");
}

#[tokio::test]
async fn multibyte_characters_are_measured_in_bytes() {
    let dir = TempDir::new().unwrap();
    // Four characters, twelve bytes.
    let input = write_input(&dir, "kanji.jsonl", &["音楽音楽".to_string()]);
    let output = dir.path().join("kanji_filtered.jsonl");

    let at_limit = filter_file(&input, &output, MaxSize::from_bytes(12)).await.unwrap();
    assert_eq!(at_limit.lines_dropped, 0);

    let under_limit = filter_file(&input, &output, MaxSize::from_bytes(11)).await.unwrap();
    assert_eq!(under_limit.lines_dropped, 1);
}

#[tokio::test]
async fn existing_output_is_truncated() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "in.jsonl", &["{}".to_string()]);
    let output = dir.path().join("out.jsonl");
    fs::write(&output, "stale content that is much longer\n".repeat(10)).unwrap();

    filter_file(&input, &output, MaxSize::default()).await.unwrap();

    assert_eq!(fs::read_to_string(&output).unwrap(), "{}\n");
}

// =============================================================================
// Repeatability
// =============================================================================

#[tokio::test]
async fn repeated_runs_produce_identical_output() {
    let dir = TempDir::new().unwrap();
    let lines: Vec<String> = (0..500).map(|i| "q".repeat(i % 97)).collect();
    let input = write_input(&dir, "playlists.jsonl", &lines);
    let first = dir.path().join("first.jsonl");
    let second = dir.path().join("second.jsonl");

    let a = filter_file(&input, &first, MaxSize::from_bytes(50)).await.unwrap();
    let b = filter_file(&input, &second, MaxSize::from_bytes(50)).await.unwrap();

    assert_eq!(a, b);
    assert_eq!(fs::read(&first).unwrap(), fs::read(&second).unwrap());
}

// =============================================================================
// Progress Reporting
// =============================================================================

#[derive(Default)]
struct ProgressLog {
    counts: Vec<u64>,
    completed: Option<FilterSummary>,
}

impl FilterObserver for ProgressLog {
    fn on_progress(&mut self, lines_processed: u64) {
        assert!(self.completed.is_none(), "progress after completion");
        self.counts.push(lines_processed);
    }

    fn on_complete(&mut self, summary: &FilterSummary) {
        self.completed = Some(summary.clone());
    }
}

#[tokio::test]
async fn progress_is_reported_at_fixed_cadence() {
    let dir = TempDir::new().unwrap();
    let lines: Vec<String> = (0..2_500).map(|i| i.to_string()).collect();
    let input = write_input(&dir, "ids.jsonl", &lines);
    let output = dir.path().join("ids_filtered.jsonl");

    let mut log = ProgressLog::default();
    let mut filter =
        SizeFilter::new(FilterConfig::new(MaxSize::from_bytes(3)).with_progress_interval(1_000));
    let summary = filter.run_files(&input, &output, &mut log).await.unwrap();

    assert_eq!(log.counts, vec![1_000, 2_000]);
    assert_eq!(log.completed, Some(summary.clone()));
    // "1000" through "2499" are four bytes.
    assert_eq!(summary.lines_dropped, 1_500);
}

// =============================================================================
// Failure Paths
// =============================================================================

#[tokio::test]
async fn missing_input_is_an_io_error_and_leaves_filter_idle() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("out.jsonl");
    let mut filter = SizeFilter::new(FilterConfig::default());

    let err = filter
        .run_files(dir.path().join("missing.jsonl"), &output, NoopObserver)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Io(_)));
    assert_eq!(filter.state(), FilterState::Idle);
    assert!(!output.exists());
}

#[tokio::test]
async fn finished_filter_does_not_touch_a_new_output() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "in.jsonl", &["a".to_string()]);
    let mut filter = SizeFilter::new(FilterConfig::default());
    filter
        .run_files(&input, dir.path().join("one.jsonl"), NoopObserver)
        .await
        .unwrap();

    let second = dir.path().join("two.jsonl");
    let err = filter
        .run_files(&input, &second, NoopObserver)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::AlreadyRun(FilterState::Completed)));
    assert!(!second.exists());
}
