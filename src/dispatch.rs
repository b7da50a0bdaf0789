use std::io::Write;

use anyhow::{Context, Result};
use tick_core::unix_now;
use tick_issues::{import_issues, IssueSource};
use tick_render::{render_aligned, render_categories, render_table};
use tick_store::{CategoryRepo, CredentialRepo, Database, TaskRepo};
use tracing::{debug, info};

use crate::cli::{Intent, RenderRequest};

/// Runs one resolved intent against the store and writes user output.
pub struct Dispatcher {
    db: Database,
    issues: Box<dyn IssueSource>,
    import_category: String,
}

impl Dispatcher {
    pub fn new(db: Database, issues: Box<dyn IssueSource>, import_category: impl Into<String>) -> Self {
        Self {
            db,
            issues,
            import_category: import_category.into(),
        }
    }

    pub async fn run<W: Write>(&self, intent: Intent, out: &mut W) -> Result<()> {
        let tasks = TaskRepo::new(self.db.clone());

        match intent {
            Intent::Recategorize { category_id, ids } => {
                let moved = tasks.update_category(category_id, &ids)?;
                info!(category_id, count = moved, "tasks recategorized");
                writeln!(out, "Moved {moved} task(s) to category {category_id}")?;
            }
            Intent::DeleteDone => {
                let removed = tasks.delete_done()?;
                writeln!(out, "Deleted {removed} finished task(s)")?;
            }
            Intent::MarkDone(ids) => {
                let marked = tasks.mark_done(&ids)?;
                writeln!(out, "Marked {marked} task(s) done")?;
            }
            Intent::Save(new) => {
                let outcome = tasks.save(&new)?;
                let id = outcome.task().id;
                if outcome.is_created() {
                    writeln!(out, "Added task {id}")?;
                } else {
                    writeln!(out, "Task {id} already has this description, nothing added")?;
                }
            }
            Intent::Delete(ids) => {
                let removed = tasks.delete_by_ids(&ids)?;
                writeln!(out, "Deleted {removed} task(s)")?;
            }
            Intent::ImportIssues => {
                let Some(token) = CredentialRepo::new(self.db.clone()).token()? else {
                    debug!("no token configured, skipping import");
                    writeln!(out, "No GitHub token configured, add one with --gittoken")?;
                    return Ok(());
                };
                let report = import_issues(self.issues.as_ref(), &token, &tasks, &self.import_category)
                    .await
                    .context("failed to import GitHub issues")?;
                writeln!(
                    out,
                    "Imported {} issue(s), {} already present",
                    report.created, report.duplicates
                )?;
            }
            Intent::SetToken(token) => {
                CredentialRepo::new(self.db.clone()).set_token(&token)?;
                writeln!(out, "GitHub token saved")?;
            }
            Intent::Render(request) => self.render(&tasks, &request, out)?,
        }
        Ok(())
    }

    fn render<W: Write>(&self, tasks: &TaskRepo, request: &RenderRequest, out: &mut W) -> Result<()> {
        if request.show_categories {
            let categories = CategoryRepo::new(self.db.clone()).list()?;
            render_categories(out, &categories)?;
        }

        let listed = tasks.list(request.order)?;
        if request.table {
            render_table(out, &listed, unix_now())?;
        } else {
            render_aligned(out, &listed)?;
        }
        Ok(())
    }
}
