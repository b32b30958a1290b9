/// Every user-facing message taskman prints.
///
/// Text lives in the `Display` implementation in `display.rs`; call sites
/// only pick a variant and its parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    ConfigDeleted,
    ConfigModuleServer,
    ServerAddress(String),
    ConfigUnreadable(String),
    InvalidApiUrl(String),

    // === SESSION MESSAGES ===
    LoginSucceeded(String),
    LoginFailed,
    AlreadyLoggedIn(String),
    NotLoggedIn,
    SessionVerifying,
    SignupSucceeded(String),
    SignupFailed,
    LoggedOut,
    CurrentUser { username: String, email: String },

    // === TASK MESSAGES ===
    TasksHeader,
    TasksNotFound,
    TaskCreated(String),
    TaskUpdated(String),
    TaskDeleted(String),
    TaskNotFound(String),
    TaskEditCancelled,
    PageIndicator { current: u32, total: u32 },

    // === CATEGORY MESSAGES ===
    CategoriesHeader,
    CategoriesNotFound,
    CategoryCreated(String),
    CategoryDeleted(String),
    CategoryNotFound(String),

    // === CALENDAR MESSAGES ===
    CalendarHeader(String),
    NoTasksDue(String),

    // === ERROR MESSAGES ===
    RequestFailed(String),
    ServerUnreachable(String),
    OperationFailed(String),
    ListStale,

    // === PROMPTS ===
    PromptServerApiUrl,
    PromptUsername,
    PromptEmail,
    PromptPassword,
    PromptPasswordConfirm,
    PromptPasswordMismatch,
    PromptTaskTitle,
    PromptTaskDescription,
    ConfirmDeleteTask(String),
    ConfirmDeleteCategory(String),
}
