//! md3obj command-line binary

fn main() -> anyhow::Result<()> {
    md3obj::cli::run_cli()
}
