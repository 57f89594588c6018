//! Migration orchestrator
//!
//! Sequences the phases strictly forward, never branching back:
//! validate-pre, resolve sources, provision targets, collect, rank and
//! partition, mutate, validate-post, decide. Everything runs inside one
//! transaction on the single exclusive connection; the decide phase
//! either commits the whole batch or rolls all of it back. Fatal
//! validation failures always roll back and surface as errors.

use crate::{collect, mutate, provision, rank, report, validate};
use crate::paths::resolve_path;
use markban_common::config::{Disposition, SourceSpec};
use markban_common::db::models::Entry;
use markban_common::{Error, RestructureConfig, Result};
use sqlx::{Connection, SqliteConnection};
use std::io::{self, BufRead, Write};
use tracing::{error, info, warn};

/// How the decide phase resolves once validation has passed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Ask the injected [`Confirm`] capability
    Interactive,
    /// Always commit
    Commit,
    /// Always roll back, for inspection-only runs
    DryRun,
}

/// Commit/reject decision capability
///
/// Production reads the console; tests supply canned answers.
pub trait Confirm {
    fn confirm(&mut self) -> bool;
}

/// Console-backed [`Confirm`]: accepts exactly "yes" (trimmed,
/// case-insensitive), anything else rejects. Blocks until a line
/// arrives; killing the process instead is an implicit rollback since
/// nothing was committed.
pub struct ConsoleConfirm;

impl Confirm for ConsoleConfirm {
    fn confirm(&mut self) -> bool {
        print!("Type 'yes' to commit, anything else to rollback: ");
        let _ = io::stdout().flush();
        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line).is_err() {
            return false;
        }
        line.trim().eq_ignore_ascii_case("yes")
    }
}

/// Terminal state of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Committed,
    RolledBack,
}

/// What a completed run did (or would have done, on rollback paths)
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub outcome: RunOutcome,
    pub active: usize,
    pub queued: usize,
    pub completed: usize,
}

impl RunSummary {
    /// Total entries moved inside the transaction
    pub fn moved(&self) -> usize {
        self.active + self.queued + self.completed
    }
}

struct StagedCounts {
    active: usize,
    queued: usize,
    completed: usize,
}

/// The migration engine, parameterized by one explicit configuration value
pub struct Restructure {
    config: RestructureConfig,
}

impl Restructure {
    pub fn new(config: RestructureConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RestructureConfig {
        &self.config
    }

    /// Run the full state machine on an open store connection
    ///
    /// Errors out (after rolling back) on fatal pre/post validation
    /// defects or any unexpected failure; deliberate rollbacks (dry run,
    /// declined confirmation) complete normally with
    /// [`RunOutcome::RolledBack`].
    pub async fn run(
        &self,
        conn: &mut SqliteConnection,
        mode: Mode,
        confirm: &mut dyn Confirm,
    ) -> Result<RunSummary> {
        let mut tx = conn.begin().await?;

        let staged = match self.run_phases(&mut *tx).await {
            Ok(staged) => staged,
            Err(e) => {
                tx.rollback().await?;
                return Err(e);
            }
        };

        // DECIDE
        let commit = match mode {
            Mode::DryRun => {
                info!("Dry run complete, rolling back all changes");
                false
            }
            Mode::Commit => {
                info!("Auto-commit: all validations passed");
                true
            }
            Mode::Interactive => confirm.confirm(),
        };

        let outcome = if commit {
            tx.commit().await?;
            info!("Changes committed: {}", self.config.db_path.display());
            RunOutcome::Committed
        } else {
            tx.rollback().await?;
            info!("Changes rolled back (no modifications made)");
            RunOutcome::RolledBack
        };

        Ok(RunSummary {
            outcome,
            active: staged.active,
            queued: staged.queued,
            completed: staged.completed,
        })
    }

    async fn run_phases(&self, conn: &mut SqliteConnection) -> Result<StagedCounts> {
        let config = &self.config;

        // VALIDATE_PRE
        info!("Validating initial store state");
        let dup_guids = validate::duplicate_guids(conn).await?;
        if !dup_guids.is_empty() {
            for (guid, count) in &dup_guids {
                error!("Duplicate guid {guid} ({count} occurrences)");
            }
            return Err(Error::Integrity(format!(
                "Store has {} duplicated guid value(s)",
                dup_guids.len()
            )));
        }
        info!("All guids are unique");

        let trunk_dups = validate::duplicate_positions(conn, config.trunk_id).await?;
        if !trunk_dups.is_empty() {
            warn!(
                "Trunk has {} duplicated position value(s), reindexing",
                trunk_dups.len()
            );
            validate::reindex_positions(conn, config.trunk_id).await?;
        }
        info!("Trunk positions are valid");

        // RESOLVE_SOURCES
        info!("Locating source folders");
        let mut resolved: Vec<(&SourceSpec, i64)> = Vec::new();
        for source in &config.sources {
            match resolve_path(conn, config.root_id, &source.path).await? {
                Some(id) => {
                    info!("{}: id={}", source.name, id);
                    resolved.push((source, id));
                }
                None => {
                    // Missing sources contribute zero entries, not an abort
                    warn!("{}: NOT FOUND ({}), skipping", source.name, source.path.join(" / "));
                }
            }
        }

        // PROVISION_TARGETS (fixed declared order, appended after trunk max)
        info!("Provisioning status folders in trunk");
        let active_id = provision::ensure_folder(conn, config.trunk_id, &config.active_folder).await?;
        let queued_id = provision::ensure_folder(conn, config.trunk_id, &config.queued_folder).await?;
        let completed_id =
            provision::ensure_folder(conn, config.trunk_id, &config.completed_folder).await?;
        info!(
            "{}: id={}, {}: id={}, {}: id={}",
            config.active_folder, active_id,
            config.queued_folder, queued_id,
            config.completed_folder, completed_id
        );

        // COLLECT
        info!("Collecting entries from source folders");
        let mut pool: Vec<Entry> = Vec::new();
        let mut completed_group: Vec<Entry> = Vec::new();
        for (source, folder_id) in &resolved {
            let entries = collect::collect_entries(conn, *folder_id, source.recursive).await?;
            info!("{}: {} entries", source.name, entries.len());
            match source.disposition {
                Disposition::Ranked => pool.extend(entries),
                Disposition::Completed => completed_group.extend(entries),
            }
        }
        info!(
            "Pool: {} ranked candidates, {} completed",
            pool.len(),
            completed_group.len()
        );

        // RANK_PARTITION (the completed group bypasses ranking entirely)
        info!("Applying WIP limit of {}", config.wip_limit);
        let partition = rank::rank_and_partition(pool, config.wip_limit);
        info!(
            "{}: {} entries, {}: {} entries, {}: {} entries",
            config.active_folder, partition.front.len(),
            config.queued_folder, partition.remainder.len(),
            config.completed_folder, completed_group.len()
        );
        for entry in &partition.front {
            info!("  selected for {}: {}", config.active_folder, entry.display_title());
        }

        // MUTATE
        info!("Moving entries");
        let staged = StagedCounts {
            active: partition.front.len(),
            queued: partition.remainder.len(),
            completed: completed_group.len(),
        };
        for (position, entry) in partition.front.iter().enumerate() {
            mutate::move_entry(conn, config, entry.id, active_id, position as i64).await?;
        }
        for (position, entry) in partition.remainder.iter().enumerate() {
            mutate::move_entry(conn, config, entry.id, queued_id, position as i64).await?;
        }
        for (position, entry) in completed_group.iter().enumerate() {
            mutate::move_entry(conn, config, entry.id, completed_id, position as i64).await?;
        }
        info!(
            "Moved {} entries",
            staged.active + staged.queued + staged.completed
        );

        // VALIDATE_POST (fatal on any defect; repair here could mask a real bug)
        info!("Validating final store state");
        let mut defects: Vec<String> = Vec::new();
        if !validate::duplicate_guids(conn).await?.is_empty() {
            defects.push("duplicate guids after migration".to_string());
        }
        let status_folders = [
            (config.active_folder.as_str(), active_id),
            (config.queued_folder.as_str(), queued_id),
            (config.completed_folder.as_str(), completed_id),
        ];
        for (title, folder_id) in status_folders {
            if !validate::duplicate_positions(conn, folder_id).await?.is_empty() {
                defects.push(format!("duplicate positions in {title}"));
            }
        }
        if !defects.is_empty() {
            for defect in &defects {
                error!("Post-migration defect: {defect}");
            }
            return Err(Error::Integrity(format!(
                "Post-migration validation failed: {}",
                defects.join("; ")
            )));
        }
        info!("Final store state is valid");

        // Structure report
        for (title, folder_id) in status_folders {
            for line in report::folder_report(conn, folder_id, title).await? {
                info!("{line}");
            }
        }

        Ok(staged)
    }
}
