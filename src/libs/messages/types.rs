#[derive(Debug, Clone)]
pub enum Message {
    // === TASK MESSAGES ===
    TaskAdded(u32, String),         // id, title
    TaskToggled(u32, bool),         // id, done
    TaskTitleUpdated(u32, String),  // id, title
    TaskDeleted(u32, String),       // id, title
    TasksCleared(usize),            // count
    TaskNotFoundWithId(u32),
    NoTasks,
    NoTasksForAction(String), // action
    TaskSummary {
        total: usize,
        completed: usize,
        pending: usize,
    },
    InvalidTitle(usize), // max length
    ConfirmDeleteTask(String),
    ConfirmClearTasks(usize),

    // === PERSISTENCE MESSAGES ===
    TasksSaved(usize, String), // count, path
    AutoSaved,
    AutoSaveFailed(String),
    ChangesNotSaved,
    SaveFailed(String),
    BackupWarning(String),
    TasksLoaded(usize, String), // count, path
    TasksSkipped(usize),
    FreshStart(String),               // path
    RecoveredFromBackup(usize, String), // count, backup
    TasksFileCorrupted(String),       // path
    TasksFileUnreadable(String),      // reason
    NoTasksLoaded(String),            // path
    TasksMerged(usize, usize),        // added, renumbered
    TaskRenumbered(u32, u32),         // old, new
    TasksReplaced(usize),
    ImportFailed(String),

    // === EXPORT MESSAGES ===
    ExportCompleted(usize, String), // count, path
    NothingToExport(String),        // filter
    ExportFailed(String),

    // === BACKUP MESSAGES ===
    BackupsHeader(usize),
    NoBackupsFound,
    BackupCreated(String),
    NothingToBackup,
    RecoveryFailed,
    ConfirmReplaceWithRecovered(usize),

    // === STATISTICS MESSAGES ===
    SessionStatsHeader,
    TotalErrorsLogged(usize),
    ErrorSummaryHeader,
    RecentErrorsHeader,
    NoErrorsRecorded,
    ErrorLogCleared,
    BackupCount(usize, usize), // present, max

    // === MENU MESSAGES ===
    Welcome,
    Farewell,
    SessionSummary(usize, usize), // tasks, errors
    AutoSaveToggled(bool),
    UnexpectedError(String),
    MenuTitle,
    MenuAddTask,
    MenuListTasks,
    MenuToggleTask,
    MenuEditTask,
    MenuDeleteTask,
    MenuClearTasks,
    MenuSaveLoad,
    MenuImportExport,
    MenuStatsRecovery,
    MenuQuit,
    MenuSaveNow,
    MenuLoadFile,
    MenuToggleAutoSave(bool), // currently enabled
    MenuExportAll,
    MenuExportCompleted,
    MenuExportPending,
    MenuImport,
    MenuSessionStats,
    MenuListBackups,
    MenuRecover,
    MenuClearErrorLog,
    MenuBack,

    // === CONFIGURATION MESSAGES ===
    ConfigWizardHeader,
    ConfigSaved,
    ConfigLoadFailed(String),

    // === PROMPTS ===
    PromptTaskTitle,
    PromptTaskId(String), // action
    PromptNewTitle,
    PromptLoadFile,
    PromptImportFile,
    PromptMergeWithCurrent,
    PromptSaveBeforeQuit,
    PromptTasksFile,
    PromptExportDir,
    PromptMaxBackups,
    PromptAutoSave,
    ValueBelowMinimum(u32),
    FilenameEmpty,

    // === GENERAL MESSAGES ===
    OperationCancelled,
}
