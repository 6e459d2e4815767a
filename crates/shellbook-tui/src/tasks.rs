// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::event::{Message, Request};
use log::{debug, error};
use shellbook_app::CommandSource;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::sync::mpsc::Sender;
use std::thread;
use std::time::Duration;

pub const STATUS_CLEAR_DELAY: Duration = Duration::from_secs(4);

/// Runs one request against `source` and turns the outcome into a message.
pub fn execute(source: &dyn CommandSource, request: &Request) -> Message {
    let outcome = match request {
        Request::LoadCommands => source.list_commands().map(Message::CommandsLoaded),
        Request::LoadCommand(id) => source
            .get_command(*id)
            .map(|command| Message::CommandLoaded { id: *id, command }),
        Request::DeleteCommands(ids) => {
            source
                .delete_commands(ids)
                .map(|deleted| Message::CommandsChanged {
                    upserted: Vec::new(),
                    deleted,
                })
        }
        Request::SetStatus { ids, status } => {
            source
                .set_status(ids, *status)
                .map(|upserted| Message::CommandsChanged {
                    upserted,
                    deleted: Vec::new(),
                })
        }
        Request::ImportHistory => {
            source
                .import_history()
                .map(|upserted| Message::CommandsChanged {
                    upserted,
                    deleted: Vec::new(),
                })
        }
        Request::ClearStatus { token } => Ok(Message::ClearStatus { token: *token }),
    };
    outcome.unwrap_or_else(|err| {
        let context = request.describe();
        error!("{context} failed: {err:#}");
        Message::Failed {
            context,
            error: format!("{err:#}"),
        }
    })
}

/// Executes requests on worker threads and posts results to the event loop.
#[derive(Clone)]
pub struct TaskRunner {
    source: Arc<dyn CommandSource>,
    tx: Sender<Message>,
}

impl TaskRunner {
    pub fn new(source: Arc<dyn CommandSource>, tx: Sender<Message>) -> Self {
        Self { source, tx }
    }

    pub fn dispatch(&self, request: Request) {
        debug!("dispatch {}", request.describe());
        let source = Arc::clone(&self.source);
        let tx = self.tx.clone();
        thread::spawn(move || {
            let message = match request {
                Request::ClearStatus { token } => {
                    thread::sleep(STATUS_CLEAR_DELAY);
                    Message::ClearStatus { token }
                }
                request => run_guarded(source.as_ref(), &request),
            };
            let _ = tx.send(message);
        });
    }
}

fn run_guarded(source: &dyn CommandSource, request: &Request) -> Message {
    match panic::catch_unwind(AssertUnwindSafe(|| execute(source, request))) {
        Ok(message) => message,
        Err(payload) => {
            let context = request.describe();
            let reason = panic_reason(payload.as_ref());
            error!("{context} panicked: {reason}");
            Message::Failed {
                context,
                error: reason,
            }
        }
    }
}

fn panic_reason(payload: &(dyn Any + Send)) -> String {
    if let Some(reason) = payload.downcast_ref::<&str>() {
        (*reason).to_owned()
    } else if let Some(reason) = payload.downcast_ref::<String>() {
        reason.clone()
    } else {
        "task panicked".to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::{TaskRunner, execute, run_guarded};
    use crate::event::{Message, Request};
    use anyhow::{Result, bail};
    use shellbook_app::{Command, CommandId, CommandSource, CommandStatus};
    use std::sync::Arc;
    use std::sync::mpsc;
    use std::time::Duration;

    struct Broken;

    impl CommandSource for Broken {
        fn list_commands(&self) -> Result<Vec<Command>> {
            bail!("database is locked")
        }

        fn get_command(&self, _id: CommandId) -> Result<Option<Command>> {
            Ok(None)
        }

        fn delete_commands(&self, _ids: &[CommandId]) -> Result<Vec<CommandId>> {
            panic!("boom")
        }

        fn set_status(&self, _ids: &[CommandId], _status: CommandStatus) -> Result<Vec<Command>> {
            Ok(Vec::new())
        }

        fn import_history(&self) -> Result<Vec<Command>> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn errors_become_failed_messages() {
        match execute(&Broken, &Request::LoadCommands) {
            Message::Failed { context, error } => {
                assert_eq!(context, "load commands");
                assert_eq!(error, "database is locked");
            }
            other => panic!("unexpected message: {other:?}"),
        }
    }

    #[test]
    fn missing_command_is_not_an_error() {
        let id = CommandId::new(5);
        assert!(matches!(
            execute(&Broken, &Request::LoadCommand(id)),
            Message::CommandLoaded { command: None, .. }
        ));
    }

    #[test]
    fn panics_are_caught_at_the_task_boundary() {
        let message = run_guarded(&Broken, &Request::DeleteCommands(vec![CommandId::new(1)]));
        match message {
            Message::Failed { context, error } => {
                assert_eq!(context, "delete 1 command");
                assert_eq!(error, "boom");
            }
            other => panic!("unexpected message: {other:?}"),
        }
    }

    #[test]
    fn runner_posts_results_back() {
        let (tx, rx) = mpsc::channel();
        let runner = TaskRunner::new(Arc::new(Broken), tx);
        runner.dispatch(Request::SetStatus {
            ids: vec![CommandId::new(1)],
            status: CommandStatus::Saved,
        });
        let message = rx
            .recv_timeout(Duration::from_secs(5))
            .expect("task result");
        assert!(matches!(message, Message::CommandsChanged { .. }));
    }
}
