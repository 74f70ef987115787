use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "roost", about = concat!("roost v", env!("CARGO_PKG_VERSION"), " - chores, expenses, and house chat"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Run against a different household directory
    #[arg(short = 'C', long = "household-dir", global = true)]
    pub household_dir: Option<String>,

    /// Treat this date (YYYY-MM-DD) as today
    #[arg(long, global = true)]
    pub today: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new household in the current directory
    Init(InitArgs),
    /// List the roster
    Roommates,
    /// List tasks
    Tasks(TasksArgs),
    /// Add, edit, complete, or remove a task
    Task(TaskCmd),
    /// List expenses, newest first
    Expenses,
    /// Add, edit, or remove an expense
    Expense(ExpenseCmd),
    /// Show what you are owed and what you owe
    Balance,
    /// Show the month calendar with task due dates
    Calendar(CalendarArgs),
    /// List conversations
    Chats,
    /// Open, create, read, or send to a conversation
    Chat(ChatCmd),
    /// Show the recent activity feed
    Feed,
}

// ---------------------------------------------------------------------------
// Init args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct InitArgs {
    /// Household name (default: inferred from directory name)
    #[arg(long)]
    pub name: Option<String>,
}

// ---------------------------------------------------------------------------
// Tasks
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct TasksArgs {
    /// my, all, or completed (default: last used)
    #[arg(long)]
    pub filter: Option<String>,
}

#[derive(Args)]
pub struct TaskCmd {
    #[command(subcommand)]
    pub action: TaskAction,
}

#[derive(Subcommand)]
pub enum TaskAction {
    /// Add a task
    Add(TaskAddArgs),
    /// Add a task for yourself, due today
    Quick(TaskQuickArgs),
    /// Change a task's fields
    Edit(TaskEditArgs),
    /// Toggle a task between pending and completed
    Done(TaskIdArg),
    /// Delete a task
    Rm(TaskIdArg),
}

#[derive(Args)]
pub struct TaskAddArgs {
    /// Task title
    pub title: String,
    /// Due date (YYYY-MM-DD)
    #[arg(long)]
    pub due: String,
    /// Roommate id to assign (repeatable)
    #[arg(long = "assign", required = true)]
    pub assignees: Vec<u32>,
    #[arg(long)]
    pub description: Option<String>,
    /// one-time, weekly, or monthly
    #[arg(long)]
    pub recurrence: Option<String>,
    /// low, moderate, or high
    #[arg(long)]
    pub urgency: Option<String>,
}

#[derive(Args)]
pub struct TaskQuickArgs {
    /// Task title
    pub title: String,
}

#[derive(Args)]
pub struct TaskEditArgs {
    /// Task id
    pub id: u32,
    #[arg(long)]
    pub title: Option<String>,
    /// Due date (YYYY-MM-DD)
    #[arg(long)]
    pub due: Option<String>,
    /// Replace assignees (repeatable)
    #[arg(long = "assign")]
    pub assignees: Vec<u32>,
    #[arg(long)]
    pub description: Option<String>,
    /// one-time, weekly, or monthly
    #[arg(long)]
    pub recurrence: Option<String>,
    /// low, moderate, high, or none
    #[arg(long)]
    pub urgency: Option<String>,
}

#[derive(Args)]
pub struct TaskIdArg {
    /// Task id
    pub id: u32,
}

// ---------------------------------------------------------------------------
// Expenses
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct ExpenseCmd {
    #[command(subcommand)]
    pub action: ExpenseAction,
}

#[derive(Subcommand)]
pub enum ExpenseAction {
    /// Record an expense
    Add(ExpenseAddArgs),
    /// Change an expense's fields
    Edit(ExpenseEditArgs),
    /// Delete an expense
    Rm(ExpenseIdArg),
}

#[derive(Args)]
pub struct ExpenseAddArgs {
    pub description: String,
    pub amount: f64,
    /// Roommate name who paid
    #[arg(long)]
    pub payer: String,
    /// Participant name (repeatable, default: everyone)
    #[arg(long = "with")]
    pub participants: Vec<String>,
    /// Date (YYYY-MM-DD, default: today)
    #[arg(long)]
    pub date: Option<String>,
    /// Record as already settled
    #[arg(long)]
    pub settled: bool,
}

#[derive(Args)]
pub struct ExpenseEditArgs {
    /// Expense id
    pub id: u32,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub amount: Option<f64>,
    #[arg(long)]
    pub payer: Option<String>,
    /// Replace participants (repeatable)
    #[arg(long = "with")]
    pub participants: Vec<String>,
    /// Date (YYYY-MM-DD)
    #[arg(long)]
    pub date: Option<String>,
    /// Mark settled
    #[arg(long, conflicts_with = "pending")]
    pub settled: bool,
    /// Mark pending
    #[arg(long)]
    pub pending: bool,
}

#[derive(Args)]
pub struct ExpenseIdArg {
    /// Expense id
    pub id: u32,
}

// ---------------------------------------------------------------------------
// Calendar
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct CalendarArgs {
    /// Month to show (YYYY-MM, default: this month)
    #[arg(long)]
    pub month: Option<String>,
}

// ---------------------------------------------------------------------------
// Chat
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct ChatCmd {
    #[command(subcommand)]
    pub action: ChatAction,
}

#[derive(Subcommand)]
pub enum ChatAction {
    /// Open (or create) a direct chat with a roommate
    Direct(ChatDirectArgs),
    /// Create a group chat
    Group(ChatGroupArgs),
    /// Send a message
    Send(ChatSendArgs),
    /// Show a conversation's messages
    Show(ChatShowArgs),
    /// Toggle mute for a conversation
    Mute(ConversationIdArg),
}

#[derive(Args)]
pub struct ChatDirectArgs {
    /// Roommate id
    pub roommate: u32,
}

#[derive(Args)]
pub struct ChatGroupArgs {
    /// Group name
    pub name: String,
    /// Roommate id to include (repeatable)
    #[arg(long = "with")]
    pub participants: Vec<u32>,
}

#[derive(Args)]
pub struct ChatSendArgs {
    /// Message text
    pub text: String,
    /// Conversation id (default: the last one shown or sent to)
    #[arg(long = "to")]
    pub conversation: Option<u32>,
}

#[derive(Args)]
pub struct ChatShowArgs {
    /// Conversation id (default: the last one shown or sent to)
    pub conversation: Option<u32>,
}

#[derive(Args)]
pub struct ConversationIdArg {
    /// Conversation id
    pub conversation: u32,
}
