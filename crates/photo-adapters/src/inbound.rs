//! Decodificación de actualizaciones entrantes.
//!
//! Forma (no formato de cable) de lo que entrega el transporte:
//! - texto: `/start`, `/status`, `/cancel`, etiquetas de botón
//!   (`confirm`, `next`, `done`, `skip`, `cancel`) o marcador `photo:<ref>`.
//! - foto: referencia opaca del archivo subido.
use photo_core::{ArtifactRef, ControlAction, SessionCommand, UserId};
use serde::{Deserialize, Serialize};

use crate::errors::AdapterError;

const PHOTO_MARKER: &str = "photo:";

/// Actualización de chat ya separada del formato del transporte.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatUpdate {
    pub user: UserId,
    pub text: Option<String>,
    /// Referencia de la foto adjunta, si la hay. Tiene prioridad sobre el
    /// texto (el caption de una foto no es un comando).
    pub photo: Option<String>,
}

impl ChatUpdate {
    pub fn text(user: UserId, text: impl Into<String>) -> Self {
        Self { user,
               text: Some(text.into()),
               photo: None }
    }

    pub fn photo(user: UserId, artifact: impl Into<String>) -> Self {
        Self { user,
               text: None,
               photo: Some(artifact.into()) }
    }
}

/// Traduce una actualización a un comando del core.
pub fn decode(update: &ChatUpdate) -> Result<SessionCommand, AdapterError> {
    if let Some(photo) = update.photo.as_deref() {
        return photo_command(photo);
    }
    let text = update.text.as_deref().map(str::trim).unwrap_or_default();
    if text.is_empty() {
        return Err(AdapterError::EmptyUpdate);
    }
    if let Some(rest) = strip_prefix_ignore_case(text, PHOTO_MARKER) {
        return photo_command(rest);
    }

    // Comandos con barra: "/start@bot_name" también vale.
    let word = text.trim_start_matches('/');
    let word = word.split('@').next().unwrap_or(word).to_ascii_lowercase();
    match word.as_str() {
        "start" => Ok(SessionCommand::Start),
        "status" => Ok(SessionCommand::Status),
        "next" | "done" => Ok(SessionCommand::Control(ControlAction::Confirm)),
        other => other.parse::<ControlAction>()
                      .map(SessionCommand::Control)
                      .map_err(|_| AdapterError::UnknownCommand(text.to_string())),
    }
}

fn photo_command(raw: &str) -> Result<SessionCommand, AdapterError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(AdapterError::MissingArtifactRef);
    }
    Ok(SessionCommand::Photo(ArtifactRef::new(raw)))
}

fn strip_prefix_ignore_case<'a>(text: &'a str, prefix: &str) -> Option<&'a str> {
    let head = text.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix).then(|| &text[prefix.len()..])
}
