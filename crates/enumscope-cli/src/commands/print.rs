//! Print command - inspect frame variables declared in the project file

use anyhow::Result;

use super::CatalogOptions;

/// Arguments for the print command
#[derive(Debug, Clone, Default)]
pub struct PrintArgs {
    /// Variable name or `(Type)value` cast; all variables when absent
    pub expression: Option<String>,
    pub catalog: CatalogOptions,
    pub json: bool,
}

/// Run the print command
pub fn run(args: PrintArgs) -> Result<()> {
    print!("{}", render(&args)?);
    Ok(())
}

/// Produce the command output without printing it.
pub fn render(args: &PrintArgs) -> Result<String> {
    let mut session = args.catalog.session()?;

    if args.json {
        let value = match &args.expression {
            Some(expression) => serde_json::to_value(session.evaluate(expression)?)?,
            None => serde_json::to_value(session.variables()?)?,
        };
        return Ok(format!("{}\n", serde_json::to_string_pretty(&value)?));
    }

    match &args.expression {
        Some(expression) => Ok(format!("{}\n", session.print(Some(expression.as_str())))),
        None => {
            let variables = session.variables()?;
            if variables.is_empty() {
                return Ok("No variables in frame.\n".to_string());
            }
            Ok(variables
                .iter()
                .map(|v| format!("{} = {}\n", v.name, v.value))
                .collect())
        }
    }
}
