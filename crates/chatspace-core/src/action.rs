//! Application actions emitted by the workspace components.
//!
//! The components never navigate on their own; they hand an [`Action`] to
//! whatever dispatcher the host supplies.

use strum::IntoStaticStr;
use tokio::sync::mpsc;

/// Requests the workspace layer makes of the host application.
#[derive(Debug, Clone, PartialEq, Eq, IntoStaticStr)]
#[strum(serialize_all = "camelCase")]
pub enum Action {
    /// Open the workspace editor in create mode.
    OpenWorkspaceCreator,
    /// Open the workspace editor for an existing workspace.
    OpenWorkspaceEditor { workspace_id: String },
}

impl Action {
    /// The action's registered name, e.g. `openWorkspaceCreator`.
    pub fn name(&self) -> &'static str {
        self.into()
    }
}

/// Receives actions from the workspace components.
pub trait ActionDispatcher: Send + Sync {
    fn dispatch(&self, action: Action);
}

/// Dispatcher that forwards actions into an unbounded channel.
#[derive(Debug, Clone)]
pub struct ChannelDispatcher {
    sender: mpsc::UnboundedSender<Action>,
}

impl ChannelDispatcher {
    /// Creates the dispatcher and the receiving end for the host.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Action>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

impl ActionDispatcher for ChannelDispatcher {
    fn dispatch(&self, action: Action) {
        // A closed receiver means the host is shutting down.
        let _ = self.sender.send(action);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_names() {
        assert_eq!(Action::OpenWorkspaceCreator.name(), "openWorkspaceCreator");
        assert_eq!(
            Action::OpenWorkspaceEditor {
                workspace_id: "1".into()
            }
            .name(),
            "openWorkspaceEditor"
        );
    }

    #[test]
    fn test_channel_dispatcher_forwards() {
        let (dispatcher, mut receiver) = ChannelDispatcher::new();
        dispatcher.dispatch(Action::OpenWorkspaceCreator);
        assert_eq!(receiver.try_recv().unwrap(), Action::OpenWorkspaceCreator);
        assert!(receiver.try_recv().is_err());
    }

    #[test]
    fn test_channel_dispatcher_ignores_closed_receiver() {
        let (dispatcher, receiver) = ChannelDispatcher::new();
        drop(receiver);
        dispatcher.dispatch(Action::OpenWorkspaceCreator);
    }
}
