use std::fmt::Write;

use crate::cli::ReportMode;
use crate::diff::CompareResult;
use crate::utils::format_g;

fn fraction(r: Option<f64>) -> String {
    format_g(r.unwrap_or(f64::NAN), 11)
}

/// Renders the result table. Counts are zero-padded to twelve digits and
/// followed by their share of the compared length.
pub fn render(result: &CompareResult, mode: ReportMode) -> String {
    let mut out = String::new();

    if matches!(mode, ReportMode::Bytes | ReportMode::Both) {
        let _ = writeln!(
            out,
            "Bytes equal: {:012} {}",
            result.bytes_equal(),
            fraction(result.byte_equal_ratio())
        );
        let _ = writeln!(
            out,
            "Bytes diff:  {:012} {}",
            result.byte_diff_count,
            fraction(result.byte_diff_ratio())
        );
    }
    if matches!(mode, ReportMode::Bits | ReportMode::Both) {
        let _ = writeln!(
            out,
            "Bits equal:  {:012} {}",
            result.bits_equal(),
            fraction(result.bit_equal_ratio())
        );
        let _ = writeln!(
            out,
            "Bits diff:   {:012} {}",
            result.bit_diff_count,
            fraction(result.bit_diff_ratio())
        );
    }
    out
}
