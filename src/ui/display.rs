//! Status lines for per-file outcomes and run summaries.

use std::path::Path;

use bytesize::ByteSize;
use console::style;

use crate::config::KEY_PAD_BYTE;
use crate::error::WalkError;
use crate::transform::{FileReport, Outcome, SourceFate};
use crate::types::ProcessorMode;
use crate::walker::Summary;

/// Announces the cipher in use and, when the key was padded, says so.
pub fn show_key(cipher: &str, input_len: usize, key_len: usize) {
    println!("{} {}", style("→").cyan(), style(format!("Using {cipher}")).bold());

    if let Some(note) = key_note(input_len, key_len) {
        println!("{} {}", style("!").yellow(), style(note).yellow());
    }
}

/// Prints one task's outcome, including a warning when the source survived
/// a removal attempt.
pub fn show_outcome(outcome: &Outcome) {
    match outcome {
        Ok(report) => {
            println!("{} {}", style("✓").green(), style(report_line(report)).bold());

            match &report.source_fate {
                SourceFate::Kept => {}
                SourceFate::Removed => println!("  {} {}", style("✓").green(), removed_line(report.mode, &report.source)),
                SourceFate::RemoveFailed(e) => {
                    eprintln!("  {} {}", style("!").yellow(), style(format!("cannot delete {}: {e}", report.source.display())).yellow());
                }
            }
        }
        Err(e) => {
            let label = if e.is_decryption_failure() { "Decryption error" } else { "Error" };
            eprintln!("{} {}", style("✗").red(), style(format!("{label}: {e}")).red());
        }
    }
}

pub fn show_summary(mode: ProcessorMode, summary: &Summary) {
    println!();
    let line = summary_line(mode, summary);

    if summary.failed == 0 {
        println!("{} {}", style("✓").green(), style(line).bold());
    } else {
        println!("{} {}", style("!").yellow(), style(line).bold());
    }
}

pub fn show_walk_error(error: &WalkError) {
    eprintln!("{} {}", style("✗").red(), style(format!("Error walking the directory: {error}")).red());
}

fn key_note(input_len: usize, key_len: usize) -> Option<String> {
    if input_len < key_len {
        Some(format!("key padded from {input_len} to {key_len} bytes with '{}'; this is not key stretching", char::from(KEY_PAD_BYTE)))
    } else if input_len > key_len {
        Some(format!("key truncated from {input_len} to {key_len} bytes"))
    } else {
        None
    }
}

fn report_line(report: &FileReport) -> String {
    format!("{}: {} -> {} ({})", report.mode.past_tense(), report.source.display(), report.output.display(), ByteSize::b(report.bytes))
}

fn removed_line(mode: ProcessorMode, path: &Path) -> String {
    let kind = match mode {
        ProcessorMode::Encrypt => "Original",
        ProcessorMode::Decrypt => "Encrypted",
    };

    format!("{kind} file deleted: {}", path.display())
}

fn summary_line(mode: ProcessorMode, summary: &Summary) -> String {
    let verb = mode.past_tense().to_lowercase();
    let mut line = format!("{} of {} file(s) {verb}, {} written", summary.succeeded, summary.total(), ByteSize::b(summary.bytes));

    if summary.failed > 0 {
        line.push_str(&format!(", {} failed", summary.failed));
    }

    line
}
