use crate::{
    db::tasks::Tasks,
    libs::{messages::Message, view::View},
    msg_print, msg_success,
};
use anyhow::Result;

/// Number of log entries shown under "Recent Errors".
const RECENT_ERRORS: usize = 3;

/// Prints task counters, backup usage and the session error log.
pub fn cmd(tasks: &Tasks) -> Result<()> {
    let stats = tasks.stats();
    let errors = tasks.store().errors();

    msg_print!(Message::SessionStatsHeader, true);
    msg_print!(Message::TaskSummary {
        total: stats.total,
        completed: stats.completed,
        pending: stats.pending,
    });
    msg_print!(Message::BackupCount(
        tasks.store().backups()?.len(),
        tasks.store().max_backups()
    ));
    msg_print!(Message::TotalErrorsLogged(errors.len()));

    if errors.is_empty() {
        msg_success!(Message::NoErrorsRecorded);
        return Ok(());
    }

    msg_print!(Message::ErrorSummaryHeader, true);
    View::error_counts(errors);
    msg_print!(Message::RecentErrorsHeader, true);
    View::recent_errors(errors, RECENT_ERRORS);
    Ok(())
}
