use crate::db::StudentId;
use crate::error::RosterError;
use crate::service::controller::{Outcome, RecordController};
use crate::service::dispatch::{Command, dispatch};
use crate::view::{TableSnapshot, TableView};

use ractor::{Actor, ActorProcessingErr, ActorRef, RpcReplyPort};
use tracing::{debug, info};

/// Messages handled by the roster actor.
#[derive(Debug)]
pub enum RosterActorMessage {
    /// Run one command and reply with its outcome.
    Dispatch(Command, RpcReplyPort<Result<Outcome, RosterError>>),
    /// Mark the row holding this id as clicked. Replies `false` if not displayed.
    Click(StudentId, RpcReplyPort<bool>),
    /// Copy of the table as it stands, notices drained.
    Snapshot(RpcReplyPort<TableSnapshot>),
}

/// Handle for front ends. Commands are processed one at a time, so a UI loop
/// only ever awaits a reply and never blocks on the database itself.
#[derive(Clone)]
pub struct RosterHandle {
    actor: ActorRef<RosterActorMessage>,
}

impl RosterHandle {
    pub async fn dispatch(&self, command: Command) -> Result<Outcome, RosterError> {
        ractor::call!(self.actor, RosterActorMessage::Dispatch, command)
            .map_err(|e| RosterError::RactorError(format!("Dispatch RPC failed: {e}")))?
    }

    pub async fn click(&self, id: StudentId) -> Result<bool, RosterError> {
        ractor::call!(self.actor, RosterActorMessage::Click, id)
            .map_err(|e| RosterError::RactorError(format!("Click RPC failed: {e}")))
    }

    pub async fn snapshot(&self) -> Result<TableSnapshot, RosterError> {
        ractor::call!(self.actor, RosterActorMessage::Snapshot)
            .map_err(|e| RosterError::RactorError(format!("Snapshot RPC failed: {e}")))
    }

    /// Stop the actor; pending calls fail with an actor error.
    pub fn stop(&self) {
        self.actor.stop(None);
    }
}

struct RosterActorState {
    controller: RecordController,
    view: TableView,
}

struct RosterActor;

#[ractor::async_trait]
impl Actor for RosterActor {
    type Msg = RosterActorMessage;
    type State = RosterActorState;
    type Arguments = (RecordController, TableView);

    async fn pre_start(
        &self,
        _myself: ActorRef<Self::Msg>,
        arguments: Self::Arguments,
    ) -> Result<Self::State, ActorProcessingErr> {
        let (controller, view) = arguments;
        info!("RosterActor started");
        Ok(RosterActorState { controller, view })
    }

    async fn handle(
        &self,
        _myself: ActorRef<Self::Msg>,
        message: Self::Msg,
        state: &mut Self::State,
    ) -> Result<(), ActorProcessingErr> {
        match message {
            RosterActorMessage::Dispatch(command, reply_port) => {
                let command_id = command.id();
                let result = dispatch(&state.controller, &mut state.view, command).await;
                debug!(command = %command_id, ok = result.is_ok(), "command handled");
                let _ = reply_port.send(result);
            }
            RosterActorMessage::Click(id, reply_port) => {
                let _ = reply_port.send(state.view.click_id(id));
            }
            RosterActorMessage::Snapshot(reply_port) => {
                let snapshot = state.view.snapshot();
                state.view.take_notices();
                let _ = reply_port.send(snapshot);
            }
        }
        Ok(())
    }
}

/// Spawn the roster actor around a controller and the view it refreshes.
pub async fn spawn(
    controller: RecordController,
    view: TableView,
) -> Result<RosterHandle, RosterError> {
    let (actor, _jh) = Actor::spawn(None, RosterActor, (controller, view))
        .await
        .map_err(|e| RosterError::RactorError(format!("failed to spawn RosterActor: {e}")))?;
    Ok(RosterHandle { actor })
}
