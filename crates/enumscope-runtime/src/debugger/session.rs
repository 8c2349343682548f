//! Inspection session.
//!
//! Holds one stopped frame worth of enum-typed variables and answers
//! variable requests against it, both as MI records (`-var-create`) and as
//! plain `print` output.

use enumscope_config::{Config, ProjectConfig};

use crate::debugger::inspection::{ConfigCatalog, DescriptorCache, Inspector, TypeResolver};
use crate::debugger::protocol::{parse_mi_command, MiCommand, MiRecord, VarObject, Variable};
use crate::debugger::InspectError;
use crate::formatter::EnumFormatter;

/// A variable of the inspected frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameVariable {
    pub name: String,
    pub type_name: String,
    pub raw: i128,
}

/// Reply to one MI input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MiReply {
    pub text: String,
    /// Set after `-gdb-exit`.
    pub exit: bool,
}

/// Answers inspection requests for one frame.
pub struct InspectionSession<R = ConfigCatalog> {
    cache: DescriptorCache<R>,
    inspector: Inspector,
    frame: Vec<FrameVariable>,
    next_var_id: usize,
    last_print: Option<String>,
}

impl InspectionSession<ConfigCatalog> {
    /// Session over the enum catalog and variables of a loaded config.
    pub fn from_config(config: &Config) -> Self {
        let formatter = EnumFormatter::new().with_separator(config.flags_separator());
        Self::from_project(&config.project, formatter)
    }

    /// Session over a project config with an explicit formatter.
    pub fn from_project(project: &ProjectConfig, formatter: EnumFormatter) -> Self {
        let mut session = Self::new(ConfigCatalog::from_project(project), formatter);
        for var in &project.variables {
            session.add_variable(&var.name, &var.type_name, i128::from(var.value));
        }
        session
    }
}

impl<R: TypeResolver> InspectionSession<R> {
    pub fn new(resolver: R, formatter: EnumFormatter) -> Self {
        Self {
            cache: DescriptorCache::new(resolver),
            inspector: Inspector::new(formatter),
            frame: Vec::new(),
            next_var_id: 1,
            last_print: None,
        }
    }

    /// Add or replace a frame variable.
    pub fn add_variable(&mut self, name: &str, type_name: &str, raw: i128) {
        let var = FrameVariable {
            name: name.to_string(),
            type_name: type_name.to_string(),
            raw,
        };
        match self.frame.iter_mut().find(|v| v.name == name) {
            Some(existing) => *existing = var,
            None => self.frame.push(var),
        }
    }

    pub fn frame(&self) -> &[FrameVariable] {
        &self.frame
    }

    pub fn descriptor_cache(&self) -> &DescriptorCache<R> {
        &self.cache
    }

    /// Evaluate an expression to a formatted variable.
    ///
    /// Accepted forms are a frame variable name, or a cast of an integer
    /// literal to an enum type: `(TypeName)101`.
    pub fn evaluate(&mut self, expression: &str) -> Result<Variable, InspectError> {
        let expression = expression.trim();
        if let Some((type_name, raw)) = parse_cast(expression) {
            let desc = self.cache.get(type_name)?;
            return Ok(self.inspector.inspect_value(expression, &desc, raw));
        }

        let var = self
            .frame
            .iter()
            .find(|v| v.name == expression)
            .ok_or_else(|| InspectError::UnknownVariable(expression.to_string()))?;
        let desc = self.cache.get(&var.type_name)?;
        Ok(self.inspector.inspect_value(&var.name, &desc, var.raw))
    }

    /// Create an MI variable object for `expression`.
    pub fn var_create(&mut self, expression: &str) -> Result<VarObject, InspectError> {
        let var = self.evaluate(expression)?;
        let name = format!("var{}", self.next_var_id);
        self.next_var_id += 1;
        Ok(VarObject {
            name,
            expression: expression.to_string(),
            value: var.value,
            type_name: var.type_name,
        })
    }

    /// CLI `print`: `name = value`.
    ///
    /// Without an argument the previous one is reused.
    pub fn print(&mut self, arg: Option<&str>) -> String {
        if let Some(arg) = arg {
            self.last_print = Some(arg.to_string());
        }
        let Some(expression) = self.last_print.clone() else {
            return "The history is empty.".to_string();
        };
        match self.evaluate(&expression) {
            Ok(var) => format!("{} = {}", var.name, var.value),
            Err(e) => e.to_string(),
        }
    }

    /// All frame variables, formatted and sorted by name.
    pub fn variables(&mut self) -> Result<Vec<Variable>, InspectError> {
        let mut names: Vec<String> = self.frame.iter().map(|v| v.name.clone()).collect();
        names.sort();
        names.iter().map(|name| self.evaluate(name)).collect()
    }

    /// Answer one line of MI input.
    pub fn handle_mi_line(&mut self, line: &str) -> MiReply {
        let request = parse_mi_command(line);
        let (record, exit) = match &request.command {
            MiCommand::VarCreate { expression } => match self.var_create(expression) {
                Ok(obj) => (obj.to_record(), false),
                Err(e) => (MiRecord::Error(e.to_string()), false),
            },
            MiCommand::GdbExit => (MiRecord::Exit, true),
            MiCommand::Unknown(command) => {
                tracing::debug!(%command, "unsupported MI command");
                (
                    MiRecord::Error(format!("Unknown command: {command}")),
                    false,
                )
            }
        };
        MiReply {
            text: record.render(request.token.as_deref()),
            exit,
        }
    }
}

/// `(TypeName)123` or `(TypeName)-5`.
fn parse_cast(expression: &str) -> Option<(&str, i128)> {
    let rest = expression.strip_prefix('(')?;
    let (type_name, literal) = rest.split_once(')')?;
    let type_name = type_name.trim();
    if type_name.is_empty() {
        return None;
    }
    let raw = literal.trim().parse().ok()?;
    Some((type_name, raw))
}
