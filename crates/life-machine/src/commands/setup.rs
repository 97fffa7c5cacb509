use std::path::Path;

use life_machine_core::CONFIG_FILE;
use life_machine_operations::operations::SetupOperation;

use crate::error::Result;

pub(crate) fn run(project_root: &Path) -> Result<()> {
    let output = SetupOperation::new().execute(project_root)?;

    for file in &output.files {
        println!("{}: {}", file.action, file.path.display());
    }
    println!(
        "Life Machine is ready. Adjust .github/{CONFIG_FILE} and add the LM_NPM_TOKEN \
         (and optionally LM_DISCORD_TOKEN) repository secrets."
    );

    Ok(())
}
