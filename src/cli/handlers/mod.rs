mod init;
pub use init::cmd_init;

use std::path::PathBuf;

use chrono::{Local, NaiveDate, NaiveDateTime};

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::config_io::{self, DATA_DIR, ROOST_DIR};
use crate::io::kv::FileStore;
use crate::io::state::{self, ViewState};
use crate::model::expense::{ExpenseDraft, ExpenseStatus};
use crate::model::task::{Recurrence, TaskDraft, Urgency};
use crate::ops::task_filter::FilterMode;
use crate::store::{Command, EntityStore, StoreOptions, ViewUpdate};
use crate::util::dates::{parse_date, parse_month};

type CliResult = Result<(), Box<dyn std::error::Error>>;

/// Loaded household plus the clock every derived view is computed against
struct Session {
    store: EntityStore,
    now: NaiveDateTime,
    json: bool,
}

impl Session {
    fn today(&self) -> NaiveDate {
        self.now.date()
    }
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> CliResult {
    if let Commands::Init(args) = cli.command {
        return cmd_init(args, cli.household_dir.as_deref());
    }

    let now = resolve_now(cli.today.as_deref())?;
    let store = load_household(cli.household_dir.as_deref(), now.date())?;
    let mut session = Session {
        store,
        now,
        json: cli.json,
    };

    match cli.command {
        Commands::Init(_) => Ok(()),
        Commands::Roommates => cmd_roommates(&session),
        Commands::Tasks(args) => cmd_tasks(&mut session, args),
        Commands::Task(cmd) => cmd_task(&mut session, cmd),
        Commands::Expenses => cmd_expenses(&session),
        Commands::Expense(cmd) => cmd_expense(&mut session, cmd),
        Commands::Balance => cmd_balance(&session),
        Commands::Calendar(args) => cmd_calendar(&session, args),
        Commands::Chats => cmd_chats(&session),
        Commands::Chat(cmd) => cmd_chat(&mut session, cmd),
        Commands::Feed => cmd_feed(&session),
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// `--today` keeps the wall-clock time of day so message times stay real.
fn resolve_now(today: Option<&str>) -> Result<NaiveDateTime, Box<dyn std::error::Error>> {
    let now = Local::now().naive_local();
    match today {
        Some(s) => Ok(parse_date(s)?.and_time(now.time())),
        None => Ok(now),
    }
}

fn load_household(dir: Option<&str>, today: NaiveDate) -> Result<EntityStore, Box<dyn std::error::Error>> {
    let start: PathBuf = match dir {
        Some(d) => std::fs::canonicalize(d).map_err(|e| format!("cannot resolve -C path '{}': {}", d, e))?,
        None => std::env::current_dir()?,
    };
    let root = config_io::discover_household(&start)?;
    let roost_dir = root.join(ROOST_DIR);
    let config = config_io::read_config(&roost_dir)?;
    let kv = FileStore::open(&roost_dir.join(DATA_DIR))?;
    tracing::debug!(household = %config.household.name, "loading household");
    Ok(EntityStore::load(Box::new(kv), StoreOptions::from_config(&config), today)?)
}

fn apply(session: &mut Session, command: Command) -> CliResult {
    let update = session.store.handle(command, session.now)?;
    print_update(&update, session.json)
}

fn print_update(update: &ViewUpdate, json: bool) -> CliResult {
    if json {
        println!("{}", serde_json::to_string_pretty(update)?);
    } else {
        println!("{}", update.notice);
    }
    Ok(())
}

fn remember(session: &mut Session, change: impl FnOnce(&mut ViewState)) -> CliResult {
    let mut view_state = state::read_view_state(session.store.kv());
    let before = view_state.clone();
    change(&mut view_state);
    if view_state != before {
        state::write_view_state(session.store.kv_mut(), &view_state)?;
    }
    Ok(())
}

fn parse_recurrence(s: &str) -> Result<Recurrence, String> {
    Recurrence::parse(s).ok_or_else(|| {
        format!(
            "unknown recurrence '{}' (expected: one-time, weekly, monthly)",
            s
        )
    })
}

/// An explicit conversation id, else the one last shown or sent to
fn resolve_conversation(session: &Session, given: Option<u32>) -> Result<u32, String> {
    given
        .or_else(|| state::read_view_state(session.store.kv()).current_conversation)
        .ok_or_else(|| "no conversation given and none opened yet (try: roost chats)".to_string())
}

/// `none` clears the urgency
fn parse_urgency(s: &str) -> Result<Option<Urgency>, String> {
    if s.eq_ignore_ascii_case("none") {
        return Ok(None);
    }
    Urgency::parse(s)
        .map(Some)
        .ok_or_else(|| format!("unknown urgency '{}' (expected: low, moderate, high, none)", s))
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

fn cmd_roommates(session: &Session) -> CliResult {
    let current = session.store.current_user_id();
    let members = session.store.roster().members();
    if session.json {
        let rows: Vec<RoommateJson> = members
            .iter()
            .map(|r| RoommateJson {
                roommate: r,
                is_current_user: r.id == current,
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        for r in members {
            println!("{}", format_roommate_line(r, current));
        }
    }
    Ok(())
}

fn cmd_tasks(session: &mut Session, args: TasksArgs) -> CliResult {
    let mode = match args.filter.as_deref() {
        Some(s) => {
            let mode = FilterMode::parse(s)?;
            remember(session, |vs| vs.task_filter = mode)?;
            mode
        }
        None => state::read_view_state(session.store.kv()).task_filter,
    };

    let view = session.store.task_list_view(mode, session.today());
    if session.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    if let Some((heading, hint)) = view.empty {
        for line in format_empty_state(heading, hint) {
            println!("{}", line);
        }
        return Ok(());
    }
    for task in &view.tasks {
        println!("{}", format_task_line(task, session.store.roster()));
    }
    Ok(())
}

fn cmd_expenses(session: &Session) -> CliResult {
    let rows = session.store.expense_list_view(session.today());
    if session.json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else if rows.is_empty() {
        println!("No expenses yet");
    } else {
        for row in &rows {
            println!("{}", format_expense_line(row));
        }
    }
    Ok(())
}

fn cmd_balance(session: &Session) -> CliResult {
    let summary = session.store.balance_summary();
    if session.json {
        println!("{}", serde_json::to_string_pretty(&balance_to_json(&summary))?);
    } else {
        for line in format_balance(&summary) {
            println!("{}", line);
        }
    }
    Ok(())
}

fn cmd_calendar(session: &Session, args: CalendarArgs) -> CliResult {
    let grid = match args.month.as_deref() {
        Some(s) => {
            let (year, month) = parse_month(s)?;
            let first = NaiveDate::from_ymd_opt(year, month, 1)
                .ok_or_else(|| format!("invalid month '{}'", s))?;
            session.store.calendar_for_month(first, session.today())
        }
        None => session.store.calendar_grid(session.today()),
    };
    if session.json {
        println!("{}", serde_json::to_string_pretty(&calendar_to_json(&grid))?);
    } else {
        for line in format_calendar(&grid) {
            println!("{}", line);
        }
    }
    Ok(())
}

fn cmd_chats(session: &Session) -> CliResult {
    let conversations = session.store.conversation_list_view();
    let candidates = session.store.direct_chat_candidates();
    if session.json {
        let out = ChatsJson {
            conversations,
            candidates,
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    for row in &conversations {
        println!("{}", format_conversation_line(row));
    }
    let new_chats: Vec<_> = candidates.iter().filter(|c| !c.chat_exists).collect();
    if !new_chats.is_empty() {
        println!();
        println!("Start a chat with:");
        for c in new_chats {
            println!("  {}  {}", c.roommate_id, c.name);
        }
    }
    Ok(())
}

fn cmd_feed(session: &Session) -> CliResult {
    let sections = session.store.feed_view();
    if session.json {
        println!("{}", serde_json::to_string_pretty(&sections)?);
    } else {
        for line in format_feed(&sections) {
            println!("{}", line);
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Task commands
// ---------------------------------------------------------------------------

fn cmd_task(session: &mut Session, cmd: TaskCmd) -> CliResult {
    match cmd.action {
        TaskAction::Add(args) => cmd_task_add(session, args),
        TaskAction::Quick(args) => apply(session, Command::QuickAddTask(args.title)),
        TaskAction::Edit(args) => cmd_task_edit(session, args),
        TaskAction::Done(args) => apply(session, Command::ToggleTask(args.id)),
        TaskAction::Rm(args) => apply(session, Command::DeleteTask(args.id)),
    }
}

fn cmd_task_add(session: &mut Session, args: TaskAddArgs) -> CliResult {
    let draft = TaskDraft {
        title: args.title,
        description: args.description.unwrap_or_default(),
        assignees: args.assignees,
        due_date: Some(parse_date(&args.due)?),
        recurrence: args
            .recurrence
            .as_deref()
            .map(parse_recurrence)
            .transpose()?
            .unwrap_or_default(),
        urgency: args.urgency.as_deref().map(parse_urgency).transpose()?.flatten(),
    };
    apply(session, Command::AddTask(draft))
}

fn cmd_task_edit(session: &mut Session, args: TaskEditArgs) -> CliResult {
    let task = session
        .store
        .task(args.id)
        .ok_or_else(|| format!("task not found: {}", args.id))?;
    let mut draft = TaskDraft::from_task(task);

    if let Some(title) = args.title {
        draft.title = title;
    }
    if let Some(due) = args.due {
        draft.due_date = Some(parse_date(&due)?);
    }
    if !args.assignees.is_empty() {
        draft.assignees = args.assignees;
    }
    if let Some(description) = args.description {
        draft.description = description;
    }
    if let Some(recurrence) = args.recurrence {
        draft.recurrence = parse_recurrence(&recurrence)?;
    }
    if let Some(urgency) = args.urgency {
        draft.urgency = parse_urgency(&urgency)?;
    }
    apply(session, Command::EditTask { id: args.id, draft })
}

// ---------------------------------------------------------------------------
// Expense commands
// ---------------------------------------------------------------------------

fn cmd_expense(session: &mut Session, cmd: ExpenseCmd) -> CliResult {
    match cmd.action {
        ExpenseAction::Add(args) => cmd_expense_add(session, args),
        ExpenseAction::Edit(args) => cmd_expense_edit(session, args),
        ExpenseAction::Rm(args) => apply(session, Command::DeleteExpense(args.id)),
    }
}

fn cmd_expense_add(session: &mut Session, args: ExpenseAddArgs) -> CliResult {
    let participants = if args.participants.is_empty() {
        session.store.roster().names()
    } else {
        args.participants
    };
    let date = match args.date.as_deref() {
        Some(s) => parse_date(s)?,
        None => session.today(),
    };
    let draft = ExpenseDraft {
        description: args.description,
        amount: args.amount,
        payer: args.payer,
        participants,
        date: Some(date),
        status: if args.settled {
            ExpenseStatus::Settled
        } else {
            ExpenseStatus::Pending
        },
    };
    apply(session, Command::AddExpense(draft))
}

fn cmd_expense_edit(session: &mut Session, args: ExpenseEditArgs) -> CliResult {
    let expense = session
        .store
        .expense(args.id)
        .ok_or_else(|| format!("expense not found: {}", args.id))?;
    let mut draft = ExpenseDraft::from_expense(expense);

    if let Some(description) = args.description {
        draft.description = description;
    }
    if let Some(amount) = args.amount {
        draft.amount = amount;
    }
    if let Some(payer) = args.payer {
        draft.payer = payer;
    }
    if !args.participants.is_empty() {
        draft.participants = args.participants;
    }
    if let Some(date) = args.date {
        draft.date = Some(parse_date(&date)?);
    }
    if args.settled {
        draft.status = ExpenseStatus::Settled;
    } else if args.pending {
        draft.status = ExpenseStatus::Pending;
    }
    apply(session, Command::EditExpense { id: args.id, draft })
}

// ---------------------------------------------------------------------------
// Chat commands
// ---------------------------------------------------------------------------

fn cmd_chat(session: &mut Session, cmd: ChatCmd) -> CliResult {
    match cmd.action {
        ChatAction::Direct(args) => apply(session, Command::OpenDirectChat(args.roommate)),
        ChatAction::Group(args) => apply(
            session,
            Command::CreateGroupChat {
                name: args.name,
                participants: args.participants,
            },
        ),
        ChatAction::Send(args) => {
            let conversation_id = resolve_conversation(session, args.conversation)?;
            apply(
                session,
                Command::SendMessage {
                    conversation_id,
                    text: args.text,
                },
            )?;
            remember(session, |vs| vs.current_conversation = Some(conversation_id))
        }
        ChatAction::Show(args) => {
            let conversation_id = resolve_conversation(session, args.conversation)?;
            cmd_chat_show(session, conversation_id)
        }
        ChatAction::Mute(args) => apply(session, Command::ToggleMute(args.conversation)),
    }
}

fn cmd_chat_show(session: &mut Session, conversation_id: u32) -> CliResult {
    let view = session.store.messages_view(conversation_id)?;
    remember(session, |vs| vs.current_conversation = Some(conversation_id))?;

    if session.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }
    let muted = if view.muted { " [muted]" } else { "" };
    println!("== {}{} ==", view.name, muted);
    if view.messages.is_empty() {
        println!("No messages yet");
    }
    for row in &view.messages {
        println!("{}", format_message_line(row));
    }
    Ok(())
}
