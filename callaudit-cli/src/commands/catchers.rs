//! `callaudit catchers` command handler

use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use callaudit_core::config::CallauditConfig;
use callaudit_core::error::CallauditError;
use callaudit_engine::{AuditConfig, CatcherLoader, CatcherRegistry};

use crate::cli::{CatchersAction, CatchersArgs};
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

const BUILTIN_SOURCE: &str = "built-in";

/// Execute the `catchers` command.
pub async fn execute(
    args: CatchersArgs,
    config_path: &Path,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    match args.action {
        CatchersAction::List { catchers } => execute_list(config_path, catchers, writer).await,
        CatchersAction::Validate { path } => execute_validate(&path, writer).await,
    }
}

async fn execute_list(
    config_path: &Path,
    catchers: Option<PathBuf>,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    let path = match catchers {
        Some(path) => Some(path),
        None => {
            let config = CallauditConfig::load_or_default(config_path).await?;
            AuditConfig::from_core(&config).catchers_path
        }
    };

    let (source, registry) = match path {
        Some(path) => {
            info!(path = %path.display(), "loading catcher definitions");
            let registry = CatcherLoader::load_registry(&path).await?;
            (path.display().to_string(), registry)
        }
        None => (BUILTIN_SOURCE.to_owned(), CatcherRegistry::builtin().map_err(CallauditError::from)?),
    };

    writer.render(&CatcherListReport::new(source, &registry))?;

    Ok(())
}

async fn execute_validate(path: &Path, writer: &OutputWriter) -> Result<(), CliError> {
    info!(path = %path.display(), "validating catcher definitions");

    let report = match CatcherLoader::load_registry(path).await {
        Ok(registry) => CatcherValidationReport {
            path: path.display().to_string(),
            valid: true,
            catchers: registry.len(),
            errors: Vec::new(),
        },
        Err(e) => CatcherValidationReport {
            path: path.display().to_string(),
            valid: false,
            catchers: 0,
            errors: vec![e.to_string()],
        },
    };

    writer.render(&report)?;

    if !report.valid {
        return Err(CliError::Pattern(format!(
            "{} has invalid catcher definitions",
            report.path
        )));
    }

    Ok(())
}

#[derive(Serialize)]
pub struct CatcherListReport {
    pub source: String,
    pub total: usize,
    pub catchers: Vec<CatcherEntry>,
}

impl CatcherListReport {
    fn new(source: String, registry: &CatcherRegistry) -> Self {
        Self {
            source,
            total: registry.len(),
            catchers: registry
                .iter()
                .map(|c| CatcherEntry {
                    id: c.id().to_owned(),
                    category: c.category().to_owned(),
                    sub_category: c.sub_category().to_owned(),
                    primary_pattern: c.primary().as_str().to_owned(),
                    details: c.details().iter().map(|d| d.name().to_owned()).collect(),
                })
                .collect(),
        }
    }
}

#[derive(Serialize)]
pub struct CatcherEntry {
    pub id: String,
    pub category: String,
    pub sub_category: String,
    pub primary_pattern: String,
    pub details: Vec<String>,
}

impl Render for CatcherListReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        writeln!(
            w,
            "Catchers ({} total, source: {})",
            self.total.to_string().bold(),
            self.source
        )?;
        writeln!(w)?;
        writeln!(
            w,
            "{:<20} {:<10} {:<10} {:<28} Details",
            "ID", "Type", "SubType", "Primary"
        )?;
        writeln!(w, "{}", "-".repeat(84))?;

        for c in &self.catchers {
            writeln!(
                w,
                "{:<20} {:<10} {:<10} {:<28} {}",
                c.id,
                c.category,
                c.sub_category,
                c.primary_pattern,
                c.details.join(", ")
            )?;
        }

        Ok(())
    }
}

#[derive(Serialize)]
pub struct CatcherValidationReport {
    pub path: String,
    pub valid: bool,
    pub catchers: usize,
    pub errors: Vec<String>,
}

impl Render for CatcherValidationReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        writeln!(w, "Catcher Validation: {}", self.path.bold())?;
        if self.valid {
            writeln!(
                w,
                "  Result: {} ({} catchers)",
                "VALID".green().bold(),
                self.catchers
            )?;
        } else {
            writeln!(w, "  Result: {}", "INVALID".red().bold())?;
            for err in &self.errors {
                writeln!(w, "  Error: {}", err.red())?;
            }
        }

        Ok(())
    }
}
