use color_eyre::eyre::Result;

fn main() -> Result<()> {
    color_eyre::install()?;
    csv_qualify::run()?;
    Ok(())
}
