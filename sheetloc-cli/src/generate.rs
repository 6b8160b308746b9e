use sheetloc::{DelimitedFileSource, RunConfig, RunReport, run};

/// Runs the whole pipeline and prints what was written.
pub fn run_generate(config: &RunConfig, json: bool) -> Result<(), sheetloc::Error> {
    let source = DelimitedFileSource::from_path(&config.source);
    let report = run(config, &source)?;

    if json {
        println!("{}", render_json(&report)?);
        return Ok(());
    }

    for path in &report.written {
        println!("✅ {}", path.display());
    }
    println!(
        "{} key(s) written to {} file(s), {} warning(s)",
        report.keys,
        report.written.len(),
        report.diagnostics.len()
    );
    Ok(())
}

fn render_json(report: &RunReport) -> Result<String, sheetloc::Error> {
    serde_json::to_string_pretty(report).map_err(|e| sheetloc::Error::Io(e.into()))
}
