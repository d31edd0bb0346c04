//! Entrada de consola: convierte líneas de texto en `ChatUpdate`.
//!
//! Formato de línea:
//! - `@<id> <resto>` usa el usuario `<id>` para esa línea; sin prefijo se
//!   usa el usuario por defecto.
//! - `photo <ref>` simula el envío de una foto con referencia `<ref>`.
//! - Cualquier otro texto se entrega tal cual (`/start`, `confirm`, ...).
use photo_adapters::ChatUpdate;
use photo_core::UserId;

use crate::errors::DomainError;

pub const DEFAULT_CONSOLE_USER: UserId = UserId(1);

pub fn parse_line(line: &str, default_user: UserId) -> Result<Option<ChatUpdate>, DomainError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (user, rest) = match line.strip_prefix('@') {
        Some(tail) => {
            let (id, rest) = tail.split_once(char::is_whitespace).unwrap_or((tail, ""));
            let id: i64 = id.parse()
                            .map_err(|_| DomainError::Validation(format!("id de usuario inválido: {id}")))?;
            (UserId(id), rest.trim())
        }
        None => (default_user, line),
    };
    if rest.is_empty() {
        return Err(DomainError::Validation("línea sin contenido tras el usuario".into()));
    }
    let mut words = rest.splitn(2, char::is_whitespace);
    let head = words.next().unwrap_or_default();
    if head.eq_ignore_ascii_case("photo") {
        let artifact = words.next().map(str::trim).unwrap_or_default();
        if artifact.is_empty() {
            return Err(DomainError::Validation("falta la referencia de la foto".into()));
        }
        return Ok(Some(ChatUpdate::photo(user, artifact)));
    }
    Ok(Some(ChatUpdate::text(user, rest)))
}
