use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use gegl_opgen::{GenerateOpts, OpTable};
use tracing::Level;

/// Generate GEGL point-composer operation sources from the operation table.
#[derive(Parser, Debug)]
#[command(name = "gegl-opgen", version)]
struct Cli {
    /// Directory receiving the generated `.c` files (created if missing).
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Operation table JSON to use instead of the built-in one.
    #[arg(long)]
    table: Option<PathBuf>,

    /// Generate only this table entry (repeatable).
    #[arg(long = "only", value_name = "NAME")]
    only: Vec<String>,

    /// Print the planned files and registered names; write nothing.
    #[arg(long, default_value_t = false)]
    list: bool,

    /// Log at DEBUG level.
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::INFO })
        .init();

    let table = match &cli.table {
        Some(path) => OpTable::from_path(path)
            .with_context(|| format!("load operation table '{}'", path.display()))?,
        None => OpTable::builtin().context("load built-in operation table")?,
    };

    let opts = GenerateOpts {
        out_dir: cli.out_dir,
        dry_run: false,
        only: (!cli.only.is_empty()).then_some(cli.only),
    };

    if cli.list {
        return cmd_list(&table, &opts);
    }

    let stats = gegl_opgen::generate(&table, &opts)?;
    eprintln!(
        "wrote {} files ({} bytes) to {}",
        stats.files.len(),
        stats.bytes,
        opts.out_dir.display()
    );
    Ok(())
}

fn cmd_list(table: &OpTable, opts: &GenerateOpts) -> anyhow::Result<()> {
    for op in table.select(opts.only.as_deref())? {
        let ident = op.ident();
        let path = opts.out_dir.join(ident.file_name());
        match &ident.compat_name {
            Some(compat) => println!("{}\t{}\t{}", path.display(), ident.name, compat),
            None => println!("{}\t{}", path.display(), ident.name),
        }
    }
    Ok(())
}
