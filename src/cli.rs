use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};

use crate::error::Result;
use crate::utils::{parse_constant_byte, parse_u64_literal};

/// Count the bytes and bits that differ between two files, or between a
/// file and a constant byte value.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// First file
    pub file1: PathBuf,

    /// Second file, or the constant byte value with -c (e.g. 0xff, 255, 0377)
    pub file2: String,

    /// Offset into the first file
    pub skip1: Option<String>,

    /// Offset into the second file (ignored with -c)
    pub skip2: Option<String>,

    /// Compare the first file to a constant byte value
    #[arg(short = 'c', long = "constant")]
    pub constant: bool,

    /// Maximum number of bytes to compare (0 = up to the first end of file)
    #[arg(short = 'n', long = "max-len", value_name = "LEN")]
    pub max_len: Option<String>,

    /// Which counts to print
    #[arg(long, value_enum, default_value_t = ReportMode::Both)]
    pub mode: ReportMode,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportMode {
    Bytes,
    Bits,
    Both,
}

/// The second operand of a comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operand {
    File(PathBuf),
    Constant(u8),
}

#[derive(Debug)]
pub struct Options {
    pub file1: PathBuf,
    pub operand: Operand,
    pub skip1: u64,
    pub skip2: u64,
    pub max_len: Option<u64>,
    pub mode: ReportMode,
}

pub fn build_options(args: &Args) -> Result<Options> {
    let operand = if args.constant {
        Operand::Constant(parse_constant_byte(&args.file2)?)
    } else {
        Operand::File(PathBuf::from(&args.file2))
    };

    let offset = |what, literal: &Option<String>| match literal {
        Some(s) => parse_u64_literal(what, s),
        None => Ok(0),
    };

    let max_len = match &args.max_len {
        Some(s) => Some(parse_u64_literal("length", s)?).filter(|&n| n != 0),
        None => None,
    };

    Ok(Options {
        file1: args.file1.clone(),
        operand,
        skip1: offset("skip1", &args.skip1)?,
        skip2: offset("skip2", &args.skip2)?,
        max_len,
        mode: args.mode,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DiffcountError;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("diffcount").chain(argv.iter().copied())).unwrap()
    }

    #[test]
    fn test_two_files_with_offsets() {
        let opts = build_options(&parse(&["a.bin", "b.bin", "0x10", "8", "-n", "1024"])).unwrap();
        assert_eq!(opts.file1, PathBuf::from("a.bin"));
        assert_eq!(opts.operand, Operand::File(PathBuf::from("b.bin")));
        assert_eq!((opts.skip1, opts.skip2), (16, 8));
        assert_eq!(opts.max_len, Some(1024));
        assert_eq!(opts.mode, ReportMode::Both);
    }

    #[test]
    fn test_constant_mode() {
        let opts = build_options(&parse(&["-c", "a.bin", "0xff", "--mode", "bits"])).unwrap();
        assert_eq!(opts.operand, Operand::Constant(0xff));
        assert_eq!(opts.skip1, 0);
        assert_eq!(opts.max_len, None);
        assert_eq!(opts.mode, ReportMode::Bits);
    }

    #[test]
    fn test_zero_length_is_unbounded() {
        let opts = build_options(&parse(&["a", "b", "-n", "0"])).unwrap();
        assert_eq!(opts.max_len, None);
    }

    #[test]
    fn test_bad_constant_rejected() {
        let err = build_options(&parse(&["-c", "a.bin", "300"])).unwrap_err();
        assert!(matches!(err, DiffcountError::InvalidConstantLiteral { .. }));
    }

    #[test]
    fn test_bad_offset_rejected() {
        let err = build_options(&parse(&["a", "b", "1", "x2"])).unwrap_err();
        assert!(matches!(err, DiffcountError::InvalidNumber { what: "skip2", .. }));
    }

    #[test]
    fn test_leftover_arguments_rejected() {
        let argv = ["diffcount", "a", "b", "1", "2", "3"];
        assert!(Args::try_parse_from(argv).is_err());
    }
}
