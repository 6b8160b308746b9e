use sheetloc::{DelimitedFileSource, RunConfig, TabSource, parse_tab};

/// Parses the configured tab and reports problems without writing files.
pub fn run_check(config: &RunConfig) -> Result<(), sheetloc::Error> {
    let platform = config.platform.platform();
    let options = config.parse_options()?;
    let tab = DelimitedFileSource::from_path(&config.source).fetch(&config.tab)?;
    let parsed = parse_tab(tab, &options, platform.as_ref(), &config.formats)?;

    let localizations = &parsed.localizations;
    println!(
        "{} key(s), language(s): {}",
        localizations.len(),
        localizations.languages().join(", ")
    );
    for diagnostic in &parsed.diagnostics {
        println!("⚠️  {}", diagnostic);
    }
    Ok(())
}
