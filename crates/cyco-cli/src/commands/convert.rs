use std::path::Path;

use anyhow::{bail, Context, Result};
use tracing::info;

use cyco_io::{read_document, FileType};

pub fn handle(input: &Path, output: &Path) -> Result<()> {
    let input_type = FileType::resolve(input)
        .with_context(|| format!("reading input {}", input.display()))?;
    let output_type = FileType::detect(output)?;
    if !input_type.is_dynawo() {
        bail!(
            "'{}' is a federate descriptor; only Dynawo files can be converted",
            input.display()
        );
    }

    let document = read_document(input)
        .with_context(|| format!("parsing {} as {}", input.display(), input_type.friendly_name()))?;
    if !document.writes_as(output_type) {
        bail!(
            "cannot write a {} as {}",
            input_type.friendly_name(),
            output_type
        );
    }
    info!(from = %input.display(), to = %output.display(), "converting");
    document
        .write(output)
        .with_context(|| format!("writing {}", output.display()))?;
    println!("Converted {} -> {}", input.display(), output.display());
    Ok(())
}
