//! Types command - list the enum catalog

use anyhow::{Context, Result};
use colored::Colorize;
use enumscope_runtime::debugger::{ConfigCatalog, TypeResolver};
use enumscope_runtime::{EnumMember, EnumTypeDescriptor};
use std::io::IsTerminal;

use super::CatalogOptions;

/// Arguments for the types command
#[derive(Debug, Clone, Default)]
pub struct TypesArgs {
    pub catalog: CatalogOptions,
    pub json: bool,
    pub no_color: bool,
}

/// Run the types command
pub fn run(args: TypesArgs) -> Result<()> {
    let color = !args.no_color && std::io::stdout().is_terminal();
    print!("{}", render(&args, color)?);
    Ok(())
}

/// Resolve every catalog type, in file order.
fn descriptors(args: &TypesArgs) -> Result<Vec<EnumTypeDescriptor>> {
    let config = args.catalog.load()?;
    let catalog = ConfigCatalog::from_project(&config.project);
    catalog
        .type_names()
        .map(|name| {
            catalog
                .resolve(name)
                .with_context(|| format!("Invalid enum type '{}'", name))
        })
        .collect()
}

/// Produce the command output without printing it.
pub fn render(args: &TypesArgs, color: bool) -> Result<String> {
    let descriptors = descriptors(args)?;

    if args.json {
        let types: Vec<serde_json::Value> = descriptors.iter().map(type_json).collect();
        return Ok(format!("{}\n", serde_json::to_string_pretty(&types)?));
    }

    if descriptors.is_empty() {
        return Ok("No enum types defined.\n".to_string());
    }

    let mut out = String::new();
    for desc in &descriptors {
        let name = if color {
            desc.name().bold().to_string()
        } else {
            desc.name().to_string()
        };
        let kind = match (desc.is_bit_flags(), color) {
            (true, true) => format!(", {}", "flags".cyan()),
            (true, false) => ", flags".to_string(),
            (false, _) => String::new(),
        };
        out.push_str(&format!("{}: {}{}\n", name, desc.repr(), kind));
        out.push_str(&format!("  declared   {}\n", member_list(desc.members().iter())));
        out.push_str(&format!("  ascending  {}\n", member_list(desc.ascending())));
    }
    Ok(out)
}

fn member_list<'a>(members: impl Iterator<Item = &'a EnumMember>) -> String {
    let items: Vec<String> = members
        .map(|m| format!("{} = {}", m.name(), m.value()))
        .collect();
    if items.is_empty() {
        "(no members)".to_string()
    } else {
        items.join(", ")
    }
}

fn type_json(desc: &EnumTypeDescriptor) -> serde_json::Value {
    serde_json::json!({
        "name": desc.name(),
        "underlying": desc.repr().to_string(),
        "flags": desc.is_bit_flags(),
        "members": members_json(desc.members().iter()),
        "ascending": members_json(desc.ascending()),
    })
}

fn members_json<'a>(members: impl Iterator<Item = &'a EnumMember>) -> Vec<serde_json::Value> {
    members
        .map(|m| serde_json::json!({ "name": m.name(), "value": m.value() }))
        .collect()
}
