//! Complete runs against a repository: load, generate, commit.
//!
//! Everything a run reads is loaded before the first mutation. Any error
//! aborts the run before the commit, so a failed run never publishes a
//! partial result. The commit happens at most once, and only when the run
//! changed something.

use log::info;

use super::report::{RunKind, RunReport};
use super::{audit_naming, generate_page_logging, generate_validation, recolor_microflows};
use crate::config::GeneratorConfig;
use crate::error::GenError;
use crate::model::DocumentKind;
use crate::repository::{ModelRepository, load_all};

pub async fn run_validation<R>(repo: &mut R, config: &GeneratorConfig) -> Result<RunReport, GenError>
where
    R: ModelRepository + ?Sized,
{
    info!(modules = config.validation.modules.len(); "Starting validation run");
    let modules: Vec<String> = config
        .validation
        .modules
        .iter()
        .map(|m| m.name.clone())
        .collect();
    if !modules.is_empty() {
        load_all(repo, DocumentKind::DomainModel, &modules).await?;
    }

    let mut report = RunReport::new(RunKind::Validation);
    generate_validation(repo.working_copy_mut(), &config.validation, &mut report)?;
    finish(repo, config, report).await
}

pub async fn run_page_logging<R>(repo: &mut R, config: &GeneratorConfig) -> Result<RunReport, GenError>
where
    R: ModelRepository + ?Sized,
{
    info!(module = config.page_logging.logging_module.as_str(); "Starting page logging run");
    let pages = load_all(repo, DocumentKind::Page, &[]).await?;
    load_all(repo, DocumentKind::DomainModel, &[]).await?;
    info!(pages = pages; "Pages loaded");

    let mut report = RunReport::new(RunKind::PageLogging);
    generate_page_logging(repo.working_copy_mut(), &config.page_logging, &mut report)?;
    finish(repo, config, report).await
}

pub async fn run_recolor<R>(repo: &mut R, config: &GeneratorConfig) -> Result<RunReport, GenError>
where
    R: ModelRepository + ?Sized,
{
    info!(modules = config.recolor.modules.len(); "Starting recolor run");
    load_all(repo, DocumentKind::Microflow, &config.recolor.modules).await?;

    let mut report = RunReport::new(RunKind::Recolor);
    recolor_microflows(repo.working_copy_mut(), &config.recolor, &mut report)?;
    finish(repo, config, report).await
}

/// Naming audit. Never commits.
pub async fn run_naming_audit<R>(repo: &mut R, config: &GeneratorConfig) -> Result<RunReport, GenError>
where
    R: ModelRepository + ?Sized,
{
    info!(modules = config.naming.modules.len(); "Starting naming audit");
    let mut report = RunReport::new(RunKind::NamingAudit);
    audit_naming(repo.working_copy(), &config.naming, &mut report)?;
    Ok(report)
}

async fn finish<R>(repo: &mut R, config: &GeneratorConfig, mut report: RunReport) -> Result<RunReport, GenError>
where
    R: ModelRepository + ?Sized,
{
    if !report.has_changes() {
        info!(skipped = report.skips.len(); "No changes, skipping commit");
        return Ok(report);
    }
    info!(
        microflows = report.created_microflows.len(),
        folders = report.created_folders.len(),
        recolored = report.recolored;
        "Committing changes"
    );
    report.revision = Some(repo.commit(config.commit_branch()).await?);
    Ok(report)
}
