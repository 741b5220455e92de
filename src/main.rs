use anyhow::Result;
use clap::{CommandFactory, Parser};

mod date;
mod format;
mod metadata;
mod types;
mod walk;

fn main() -> Result<()> {
    let cfg = types::Config::parse();

    // Anything that is not a real folder, or is the filesystem root, gets
    // the help text instead of an error.
    if !cfg.folder.is_dir() || cfg.folder.parent().is_none() {
        types::Config::command().print_help()?;
        return Ok(());
    }

    let pieces = format::parse_pattern(&cfg.fmt);
    let mut summary = types::Summary::default();
    walk::process_folder(&cfg.folder, &pieces, cfg.recursive, &mut summary)?;

    println!("{summary}");
    Ok(())
}
