//! `callaudit audit` command handler

use std::io::Write;
use std::path::Path;

use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use callaudit_core::config::CallauditConfig;
use callaudit_core::types::{ColumnSpec, ReportFormat};
use callaudit_engine::{AuditConfig, AuditReport, AuditorBuilder, CatcherLoader, render_table};

use crate::cli::AuditArgs;
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `audit` command.
///
/// Exits successfully whether or not anything matched; an interrupted run
/// still prints the partial result.
pub async fn execute(
    args: AuditArgs,
    config_path: &Path,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    let config = CallauditConfig::load_or_default(config_path).await?;
    let audit_config = apply_overrides(AuditConfig::from_core(&config), &args)?;

    let registry = CatcherLoader::resolve(&audit_config).await?;
    info!(
        root = %audit_config.root.display(),
        catchers = registry.len(),
        export = audit_config.report_enabled,
        "starting audit"
    );

    let auditor = AuditorBuilder::new()
        .config(audit_config)
        .registry(registry)
        .build()?;

    let cancel = CancellationToken::new();
    let interrupt = tokio::spawn({
        let cancel = cancel.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("interrupt received, stopping audit");
                cancel.cancel();
            }
        }
    });

    let result = auditor.run(cancel).await;
    interrupt.abort();
    let report = result?;

    writer.render(&report)?;

    Ok(())
}

/// Layer command-line flags over the configured engine settings.
fn apply_overrides(mut config: AuditConfig, args: &AuditArgs) -> Result<AuditConfig, CliError> {
    if let Some(project) = &args.project {
        config.root = project.clone();
    }
    if let Some(catchers) = &args.catchers {
        config.catchers_path = Some(catchers.clone());
    }
    if let Some(dir) = &args.report_dir {
        config.output_dir = dir.clone();
    }
    if !args.formats.is_empty() {
        let mut formats = Vec::new();
        for raw in &args.formats {
            let format = ReportFormat::from_str_loose(raw).ok_or_else(|| {
                CliError::Config(format!("invalid report format: {raw} (expected: csv, json)"))
            })?;
            if !formats.contains(&format) {
                formats.push(format);
            }
        }
        config.formats = formats;
    }
    if args.no_export {
        config.report_enabled = false;
    }

    Ok(config)
}

impl Render for AuditReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        writeln!(w, "Audit: {}", self.root.display().to_string().bold())?;
        writeln!(w)?;
        render_table(&self.rows, &ColumnSpec::console_columns(), w)?;
        writeln!(w)?;

        if self.rows.is_empty() {
            writeln!(w, "{}", self.summary.green())?;
        } else {
            writeln!(w, "{}", self.summary.bold())?;
        }

        let unreadable: Vec<_> = self.unreadable().collect();
        if !unreadable.is_empty() {
            writeln!(w)?;
            writeln!(w, "{}", "Unreadable files:".yellow().bold())?;
            for skipped in unreadable {
                writeln!(w, "  {} ({})", skipped.file_name, skipped.reason)?;
            }
        }

        if !self.artifacts.is_empty() {
            writeln!(w)?;
            for artifact in &self.artifacts {
                writeln!(
                    w,
                    "Report [{}]: {}",
                    artifact.format,
                    artifact.path.display().to_string().cyan()
                )?;
            }
        }

        for failure in &self.export_errors {
            writeln!(
                w,
                "{} [{}]: {}",
                "Report failed".red().bold(),
                failure.format,
                failure.message.red()
            )?;
        }

        if self.cancelled {
            writeln!(w)?;
            writeln!(w, "{}", "Audit interrupted; results are partial.".yellow())?;
        }

        Ok(())
    }
}
