//! Terminal rendering of progress reports.

use std::fmt::Write;

use crate::schema::ProgressReport;

const GREEN: &str = "\x1b[0;32m";
const RED: &str = "\x1b[0;31m";
const GREEN_BACKGROUND: &str = "\x1b[42m";
const RED_BACKGROUND: &str = "\x1b[41m";
const DEFAULT_BACKGROUND: &str = "\x1b[49m";
const RESET: &str = "\x1b[0m";

/// Colour each symbol green if it matches the target, red otherwise.
///
/// Spaces are drawn as a coloured block so they stay visible.
pub fn colorize(symbols: &str, matches: &[bool]) -> String {
    let mut out = String::with_capacity(symbols.len() * 8);

    for (symbol, &same) in symbols.chars().zip(matches) {
        out.push_str(if same { GREEN } else { RED });
        if symbol == ' ' {
            out.push_str(if same { GREEN_BACKGROUND } else { RED_BACKGROUND });
            out.push(' ');
            out.push_str(DEFAULT_BACKGROUND);
        } else {
            out.push(symbol);
        }
    }

    out.push_str(RESET);
    out
}

/// One progress line: generation, rendered candidate, score.
pub fn summary_line(report: &ProgressReport, color: bool) -> String {
    let mut line = String::new();
    let _ = write!(line, "Gen {:3}:\t", report.generation);

    if color {
        line.push_str(&colorize(&report.candidate.symbols, &report.matches));
    } else {
        line.push_str(&report.candidate.symbols);
    }

    let _ = write!(line, "\tBest Score: {:2}", report.score);
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::CandidateSnapshot;

    #[test]
    fn test_colorize_marks_matches() {
        let out = colorize("ab", &[true, false]);
        assert_eq!(out, format!("{}a{}b{}", GREEN, RED, RESET));
    }

    #[test]
    fn test_colorize_spaces_get_background() {
        let out = colorize(" ", &[false]);
        assert_eq!(
            out,
            format!("{}{} {}{}", RED, RED_BACKGROUND, DEFAULT_BACKGROUND, RESET)
        );
    }

    #[test]
    fn test_summary_line_plain() {
        let report = ProgressReport {
            generation: 7,
            score: 4,
            target_length: 5,
            candidate: CandidateSnapshot {
                symbols: "hexlo".to_string(),
                generation: 7,
            },
            target: "hello".to_string(),
            matches: vec![true, true, false, true, true],
        };
        assert_eq!(summary_line(&report, false), "Gen   7:\thexlo\tBest Score:  4");
        assert!(summary_line(&report, true).contains(GREEN));
    }
}
