//! Interactive session controller.
//!
//! # Responsibility
//! - Drive login/registration until an account is obtained.
//! - Run the add/view/delete/complete/logout loop for that account.
//!
//! # Invariants
//! - The task list is reloaded from storage at the top of every iteration.
//! - User mistakes (bad answers, unknown ids, conflicts) are reported and
//!   re-prompted; only I/O and storage failures end the session with an error.
//! - End of input ends the session cleanly.

use crate::render;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::{self, BufRead, Write};
use taskmgr_core::{
    core_version, Account, AccountRepository, AccountService, AccountServiceError, RepoError,
    TaskId, TaskRepository, TaskService, TaskServiceError,
};

/// How a session finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    LoggedOut,
    /// Input reached end-of-file before logout.
    InputClosed,
}

/// Fatal session failure.
#[derive(Debug)]
pub enum SessionError {
    Io(io::Error),
    Repo(RepoError),
}

impl Display for SessionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "console I/O failed: {err}"),
            Self::Repo(err) => write!(f, "storage failed: {err}"),
        }
    }
}

impl Error for SessionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<io::Error> for SessionError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<RepoError> for SessionError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Rejected console input. Reported to the user, never fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidInput {
    YesNo(String),
    MenuChoice(String),
    TaskId(String),
}

impl Display for InvalidInput {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::YesNo(_) => write!(f, "Invalid option. Please try again."),
            Self::MenuChoice(_) => write!(f, "Invalid choice. Please try again."),
            Self::TaskId(_) => write!(f, "Invalid task ID."),
        }
    }
}

impl Error for InvalidInput {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HasAccount {
    Yes,
    No,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Add,
    View,
    Delete,
    Complete,
    Logout,
}

/// Accepts `y`/`n` in any case, ignoring surrounding whitespace.
pub fn parse_has_account(raw: &str) -> Result<HasAccount, InvalidInput> {
    match raw.trim().to_lowercase().as_str() {
        "y" => Ok(HasAccount::Yes),
        "n" => Ok(HasAccount::No),
        _ => Err(InvalidInput::YesNo(raw.to_string())),
    }
}

pub fn parse_menu_choice(raw: &str) -> Result<MenuChoice, InvalidInput> {
    match raw.trim() {
        "1" => Ok(MenuChoice::Add),
        "2" => Ok(MenuChoice::View),
        "3" => Ok(MenuChoice::Delete),
        "4" => Ok(MenuChoice::Complete),
        "5" => Ok(MenuChoice::Logout),
        _ => Err(InvalidInput::MenuChoice(raw.to_string())),
    }
}

/// Parses a task id; anything that is not a `TaskId` integer is rejected.
pub fn parse_task_id(raw: &str) -> Result<TaskId, InvalidInput> {
    raw.trim()
        .parse()
        .map_err(|_| InvalidInput::TaskId(raw.to_string()))
}

/// Line-oriented prompt/echo wrapper over an input and output stream.
pub struct Console<I, O> {
    input: I,
    output: O,
}

impl<I: BufRead, O: Write> Console<I, O> {
    pub fn new(input: I, output: O) -> Self {
        Self { input, output }
    }

    /// Prints `text` without a newline and reads one line.
    ///
    /// Returns the line without its terminator, or `None` at end of input.
    /// Bytes that are not UTF-8 are replaced, so such a line reaches the
    /// parsers as ordinary invalid input.
    pub fn prompt(&mut self, text: &str) -> io::Result<Option<String>> {
        write!(self.output, "{text}")?;
        self.output.flush()?;

        let mut raw = Vec::new();
        if self.input.read_until(b'\n', &mut raw)? == 0 {
            return Ok(None);
        }
        let line = String::from_utf8_lossy(&raw);
        Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
    }

    pub fn say(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.output, "{text}")
    }
}

#[cfg(test)]
impl<I, O> Console<I, O> {
    fn into_output(self) -> O {
        self.output
    }
}

/// Runs one full session: authentication, then the action loop.
pub fn run_session<A, T, I, O>(
    accounts: &mut AccountService<A>,
    task_repo: T,
    console: &mut Console<I, O>,
) -> Result<SessionEnd, SessionError>
where
    A: AccountRepository,
    T: TaskRepository,
    I: BufRead,
    O: Write,
{
    console.say(&render::banner(core_version()))?;

    let Some(account) = obtain_account(accounts, console)? else {
        warn!("event=session_end module=cli status=input_closed stage=auth");
        return Ok(SessionEnd::InputClosed);
    };

    let tasks = TaskService::new(task_repo, account.identifier);
    let end = action_loop(&tasks, console)?;
    info!("event=session_end module=cli status=ok end={end:?}");
    Ok(end)
}

fn obtain_account<A, I, O>(
    accounts: &mut AccountService<A>,
    console: &mut Console<I, O>,
) -> Result<Option<Account>, SessionError>
where
    A: AccountRepository,
    I: BufRead,
    O: Write,
{
    loop {
        let Some(answer) = console.prompt("\nDo you have an account? (y/n): ")? else {
            return Ok(None);
        };
        let attempt = match parse_has_account(&answer) {
            Ok(HasAccount::Yes) => login(accounts, console)?,
            Ok(HasAccount::No) => register(accounts, console)?,
            Err(err) => {
                console.say(&render::failure(&err.to_string()))?;
                continue;
            }
        };
        match attempt {
            Attempt::Done(account) => return Ok(Some(account)),
            Attempt::Retry => {}
            Attempt::InputClosed => return Ok(None),
        }
    }
}

enum Attempt {
    Done(Account),
    Retry,
    InputClosed,
}

fn read_credentials<I: BufRead, O: Write>(
    console: &mut Console<I, O>,
) -> io::Result<Option<(String, String)>> {
    let Some(identifier) = console.prompt("Enter your email: ")? else {
        return Ok(None);
    };
    let Some(password) = console.prompt("Enter your password: ")? else {
        return Ok(None);
    };
    Ok(Some((identifier.trim().to_string(), password.trim().to_string())))
}

fn login<A, I, O>(
    accounts: &AccountService<A>,
    console: &mut Console<I, O>,
) -> Result<Attempt, SessionError>
where
    A: AccountRepository,
    I: BufRead,
    O: Write,
{
    let Some((identifier, password)) = read_credentials(console)? else {
        return Ok(Attempt::InputClosed);
    };
    match accounts.authenticate(&identifier, &password) {
        Ok(account) => {
            console.say(&render::success("Login successful!"))?;
            Ok(Attempt::Done(account))
        }
        Err(AccountServiceError::Repo(err)) => Err(err.into()),
        Err(_) => {
            console.say(&render::failure("Invalid email or password!"))?;
            Ok(Attempt::Retry)
        }
    }
}

fn register<A, I, O>(
    accounts: &mut AccountService<A>,
    console: &mut Console<I, O>,
) -> Result<Attempt, SessionError>
where
    A: AccountRepository,
    I: BufRead,
    O: Write,
{
    let Some((identifier, password)) = read_credentials(console)? else {
        return Ok(Attempt::InputClosed);
    };
    match accounts.register(&identifier, &password) {
        Ok(account) => {
            console.say(&render::success("User registered successfully!"))?;
            Ok(Attempt::Done(account))
        }
        Err(AccountServiceError::Repo(err)) => Err(err.into()),
        Err(_) => {
            console.say(&render::failure(
                "Email already registered! Please try logging in.",
            ))?;
            Ok(Attempt::Retry)
        }
    }
}

fn action_loop<T, I, O>(
    service: &TaskService<T>,
    console: &mut Console<I, O>,
) -> Result<SessionEnd, SessionError>
where
    T: TaskRepository,
    I: BufRead,
    O: Write,
{
    loop {
        let mut tasks = service.load()?;
        console.say(&render::menu(service.owner(), &tasks))?;

        let Some(raw_choice) = console.prompt("\nEnter your choice: ")? else {
            return Ok(SessionEnd::InputClosed);
        };
        let choice = match parse_menu_choice(&raw_choice) {
            Ok(choice) => choice,
            Err(err) => {
                console.say(&render::failure(&err.to_string()))?;
                continue;
            }
        };

        match choice {
            MenuChoice::Add => {
                let Some(title) = console.prompt("Enter task title: ")? else {
                    return Ok(SessionEnd::InputClosed);
                };
                let task = service.add(&mut tasks, title)?;
                console.say(&render::success(&format!(
                    "Task '{}' added successfully!",
                    task.title
                )))?;
            }
            MenuChoice::View => console.say(&render::task_list(&tasks))?,
            MenuChoice::Delete => {
                let Some(raw_id) = console.prompt("Enter task ID to delete: ")? else {
                    return Ok(SessionEnd::InputClosed);
                };
                let message = match parse_task_id(&raw_id) {
                    Ok(id) => match service.delete(&mut tasks, id) {
                        Ok(_) => render::success(&format!("Task with ID {id} deleted.")),
                        Err(err) => not_found_message(err)?,
                    },
                    Err(err) => render::failure(&err.to_string()),
                };
                console.say(&message)?;
            }
            MenuChoice::Complete => {
                let Some(raw_id) = console.prompt("Enter task ID to mark as complete: ")? else {
                    return Ok(SessionEnd::InputClosed);
                };
                let message = match parse_task_id(&raw_id) {
                    Ok(id) => match service.mark_complete(&mut tasks, id) {
                        Ok(task) => render::success(&format!(
                            "Task '{}' marked as completed!",
                            task.title
                        )),
                        Err(err) => not_found_message(err)?,
                    },
                    Err(err) => render::failure(&err.to_string()),
                };
                console.say(&message)?;
            }
            MenuChoice::Logout => {
                service.save(&tasks)?;
                console.say(&render::success("Logging out..."))?;
                return Ok(SessionEnd::LoggedOut);
            }
        }
    }
}

/// Renders `NotFound` for the user; storage failures stay fatal.
fn not_found_message(err: TaskServiceError) -> Result<String, SessionError> {
    match err {
        TaskServiceError::NotFound(id) => {
            Ok(render::failure(&format!("Task with ID {id} not found.")))
        }
        TaskServiceError::Repo(err) => Err(err.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use taskmgr_core::{open_data_dir, DataDir, JsonAccountRepository, JsonTaskRepository, Task};

    fn run_script(data_dir: &DataDir, script: &str) -> (SessionEnd, String) {
        run_script_bytes(data_dir, script.as_bytes())
    }

    fn run_script_bytes(data_dir: &DataDir, script: &[u8]) -> (SessionEnd, String) {
        let mut accounts = AccountService::load(JsonAccountRepository::new(data_dir)).unwrap();
        let mut console = Console::new(Cursor::new(script.to_vec()), Vec::new());
        let end = run_session(
            &mut accounts,
            JsonTaskRepository::new(data_dir),
            &mut console,
        )
        .unwrap();
        let output = String::from_utf8(console.into_output()).unwrap();
        (end, output)
    }

    fn stored_tasks(data_dir: &DataDir, owner: &str) -> Vec<Task> {
        JsonTaskRepository::new(data_dir).load_tasks(owner).unwrap()
    }

    #[test]
    fn parse_has_account_accepts_only_y_and_n() {
        assert_eq!(parse_has_account("Y\n").unwrap(), HasAccount::Yes);
        assert_eq!(parse_has_account(" n ").unwrap(), HasAccount::No);
        assert!(parse_has_account("yes").is_err());
        assert!(parse_has_account("").is_err());
    }

    #[test]
    fn parse_menu_choice_maps_one_through_five() {
        assert_eq!(parse_menu_choice("1").unwrap(), MenuChoice::Add);
        assert_eq!(parse_menu_choice("5").unwrap(), MenuChoice::Logout);
        assert!(matches!(
            parse_menu_choice("6"),
            Err(InvalidInput::MenuChoice(raw)) if raw == "6"
        ));
    }

    #[test]
    fn parse_task_id_rejects_non_integers() {
        assert_eq!(parse_task_id(" 12 ").unwrap(), 12);
        assert!(parse_task_id("abc").is_err());
        assert!(parse_task_id("-1").is_err());
        assert!(parse_task_id("1.5").is_err());
        assert!(parse_task_id("99999999999").is_err());
    }

    #[test]
    fn register_add_and_logout_persists_everything() {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = open_data_dir(dir.path()).unwrap();

        let (end, output) = run_script(&data_dir, "n\nU@Test.com\npw1\n1\n  buy milk  \n5\n");

        assert_eq!(end, SessionEnd::LoggedOut);
        assert!(output.contains("User registered successfully!"));
        assert!(output.contains("Logged in as u@test.com"));
        assert!(output.contains("Task '  buy milk  ' added successfully!"));
        assert!(output.contains("Logging out..."));
        assert_eq!(
            stored_tasks(&data_dir, "u@test.com"),
            vec![Task::new(1, "  buy milk  ")]
        );
    }

    #[test]
    fn login_after_restart_succeeds_only_with_correct_password() {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = open_data_dir(dir.path()).unwrap();
        run_script(&data_dir, "n\nu@test.com\npw1\n5\n");

        let (end, output) = run_script(&data_dir, "y\nu@test.com\npw1\n5\n");
        assert_eq!(end, SessionEnd::LoggedOut);
        assert!(output.contains("Login successful!"));

        let (end, output) = run_script(&data_dir, "y\nu@test.com\nwrong\n");
        assert_eq!(end, SessionEnd::InputClosed);
        assert!(output.contains("Invalid email or password!"));
        assert!(!output.contains("Login successful!"));
    }

    #[test]
    fn failed_login_returns_to_account_prompt() {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = open_data_dir(dir.path()).unwrap();
        run_script(&data_dir, "n\nu@test.com\npw1\n5\n");

        let (end, output) = run_script(
            &data_dir,
            "y\nnobody@test.com\npw1\ny\nu@test.com\npw1\n5\n",
        );
        assert_eq!(end, SessionEnd::LoggedOut);
        assert_eq!(output.matches("Do you have an account?").count(), 2);
        assert!(output.contains("Login successful!"));
    }

    #[test]
    fn duplicate_registration_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = open_data_dir(dir.path()).unwrap();
        run_script(&data_dir, "n\na@b.com\npw\n5\n");

        let (end, output) = run_script(&data_dir, "n\nA@B.com\nother\n");
        assert_eq!(end, SessionEnd::InputClosed);
        assert!(output.contains("Email already registered!"));
    }

    #[test]
    fn invalid_inputs_are_reported_without_ending_the_session() {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = open_data_dir(dir.path()).unwrap();

        let (end, output) = run_script(
            &data_dir,
            "maybe\nn\na@b.com\npw\n9\n3\nabc\n4\n7\n3\n2\n5\n",
        );

        assert_eq!(end, SessionEnd::LoggedOut);
        assert!(output.contains("Invalid option. Please try again."));
        assert!(output.contains("Invalid choice. Please try again."));
        assert!(output.contains("Invalid task ID."));
        assert!(output.contains("Task with ID 7 not found."));
        assert!(output.contains("Task with ID 2 not found."));
    }

    #[test]
    fn complete_delete_and_view_round_trip_through_storage() {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = open_data_dir(dir.path()).unwrap();

        let (_, output) = run_script(
            &data_dir,
            "n\nu@test.com\npw\n1\nfirst\n1\nsecond\n4\n1\n3\n2\n2\n5\n",
        );

        assert!(output.contains("Task 'first' marked as completed!"));
        assert!(output.contains("Task with ID 2 deleted."));
        assert!(output.contains("1 task: 1 completed, 0 pending"));
        let mut expected = Task::new(1, "first");
        expected.complete();
        assert_eq!(stored_tasks(&data_dir, "u@test.com"), vec![expected]);
    }

    #[test]
    fn action_loop_reloads_tasks_written_elsewhere() {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = open_data_dir(dir.path()).unwrap();
        run_script(&data_dir, "n\nu@test.com\npw\n5\n");
        JsonTaskRepository::new(&data_dir)
            .save_tasks("u@test.com", &[Task::new(1, "from disk")])
            .unwrap();

        let (_, output) = run_script(&data_dir, "y\nu@test.com\npw\n2\n5\n");
        assert!(output.contains("from disk"));
    }

    #[test]
    fn non_utf8_lines_are_rejected_as_invalid_input() {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = open_data_dir(dir.path()).unwrap();

        let mut script = b"\xff\xfe\nn\nu@test.com\npw\n".to_vec();
        script.extend_from_slice(b"\xff\xfe\n3\n\xff\n5\n");
        let (end, output) = run_script_bytes(&data_dir, &script);

        assert_eq!(end, SessionEnd::LoggedOut);
        assert!(output.contains("Invalid option. Please try again."));
        assert!(output.contains("Invalid choice. Please try again."));
        assert!(output.contains("Invalid task ID."));
        assert_eq!(output.matches("Enter your choice:").count(), 3);
    }

    #[test]
    fn end_of_input_in_action_loop_ends_session() {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = open_data_dir(dir.path()).unwrap();

        let (end, _) = run_script(&data_dir, "n\nu@test.com\npw\n1\n");
        assert_eq!(end, SessionEnd::InputClosed);
        assert!(stored_tasks(&data_dir, "u@test.com").is_empty());
    }
}
