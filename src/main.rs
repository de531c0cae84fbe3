use anyhow::{Context, Result};
use clap::Parser;
use log::LevelFilter;

use diffcount::{build_options, report, run_diffcount, Args};

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    // RUST_LOG, when set, wins over -v
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let opts = build_options(&args)?;
    let result = run_diffcount(&opts)
        .with_context(|| format!("comparing {}", opts.file1.display()))?;

    print!("{}", report::render(&result, opts.mode));
    Ok(())
}
