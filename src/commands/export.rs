use super::Session;
use crate::{
    libs::{
        error_log::ErrorKind,
        export::{ExportFormat, Exporter},
        messages::Message,
        task::TaskFilter,
    },
    msg_error, msg_info, msg_success,
};
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Which tasks to export
    #[arg(long, value_enum, default_value_t = TaskFilter::All)]
    pub filter: TaskFilter,

    /// Output format
    #[arg(long, value_enum, default_value_t = ExportFormat::Json)]
    pub format: ExportFormat,

    /// Output file (defaults to a file in the export directory)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn cmd(session: &Session, args: ExportArgs) -> Result<()> {
    let exporter = match args.output {
        Some(path) => Exporter::new(args.format, args.filter, path),
        None => Exporter::in_dir(&session.config.export_path()?, args.format, args.filter),
    };
    run(&exporter, session, args.filter)
}

/// JSON export into the export directory, as offered by the menu.
///
/// A failed write is reported and logged in the session error log rather
/// than returned.
pub fn to_export_dir(session: &mut Session, filter: TaskFilter) -> Result<()> {
    let exporter = Exporter::in_dir(&session.config.export_path()?, ExportFormat::Json, filter);

    if let Err(e) = run(&exporter, session, filter) {
        session.tasks.store_mut().errors_mut().record(ErrorKind::Export, format!("{:#}", e));
        msg_error!(e);
    }
    Ok(())
}

fn run(exporter: &Exporter, session: &Session, filter: TaskFilter) -> Result<()> {
    let count = match exporter.export(session.tasks.all()) {
        Ok(count) => count,
        Err(e) => {
            let message = Message::ExportFailed(format!("{:#}", e)).to_string();
            return Err(e.context(message));
        }
    };

    if count == 0 {
        let label = match filter {
            TaskFilter::All => "matching",
            TaskFilter::Done => "completed",
            TaskFilter::Pending => "pending",
        };
        msg_info!(Message::NothingToExport(label.to_string()));
    } else {
        msg_success!(Message::ExportCompleted(count, exporter.output_path().display().to_string()));
    }
    Ok(())
}
