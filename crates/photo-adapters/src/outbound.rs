//! Render de respuestas del core a mensajes de chat.
use photo_core::{Reply, SessionStatus, UserId};
use serde::{Deserialize, Serialize};

/// Botones ofrecidos mientras se pide un paso.
pub const STEP_BUTTONS: &[&str] = &["confirm", "skip", "cancel"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundMessage {
    pub user: UserId,
    pub text: String,
    /// Etiquetas de botón (teclado inline); vacío si no aplica.
    pub buttons: Vec<String>,
}

impl OutboundMessage {
    fn plain(user: &UserId, text: String) -> Self {
        Self { user: user.clone(),
               text,
               buttons: Vec::new() }
    }
}

pub fn render(user: &UserId, reply: &Reply) -> OutboundMessage {
    match reply {
        Reply::Prompt { step_name } => OutboundMessage { user: user.clone(),
                                                         text: format!("Please send the {step_name}."),
                                                         buttons: STEP_BUTTONS.iter().map(|b| b.to_string()).collect() },
        Reply::Ack { step_name } => OutboundMessage::plain(user, format!("Photo recorded for {step_name}.")),
        Reply::CancelAck => OutboundMessage::plain(user, "Session cancelled. Send /start to begin again.".to_string()),
        Reply::Summary { text } => OutboundMessage::plain(user, format!("All steps done. Summary: {text}")),
        Reply::Status(SessionStatus::NoSession) => OutboundMessage::plain(user, "No active session. Send /start to begin.".to_string()),
        Reply::Status(SessionStatus::Active { step_index,
                                              step_name,
                                              recorded }) => {
            OutboundMessage::plain(user,
                                   format!("Step {} ({step_name}): {recorded} photo(s) recorded.", step_index + 1))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_carries_step_buttons() {
        let msg = render(&UserId(5),
                         &Reply::Prompt { step_name: "gauge photo".into() });
        assert_eq!(msg.text, "Please send the gauge photo.");
        assert_eq!(msg.buttons, vec!["confirm", "skip", "cancel"]);
    }

    #[test]
    fn status_is_one_based_for_humans() {
        let msg = render(&UserId(5),
                         &Reply::Status(SessionStatus::Active { step_index: 0,
                                                                step_name: "A".into(),
                                                                recorded: 2 }));
        assert_eq!(msg.text, "Step 1 (A): 2 photo(s) recorded.");
        assert!(msg.buttons.is_empty());
    }
}
