use notes_api::{Credentials, Note, Registration};

use super::Command;
use crate::client::NotesClient;
use crate::error::NotesError;

/// Run a command and render its result as text for the terminal.
pub async fn execute_command(client: &NotesClient, command: Command) -> Result<String, NotesError> {
    match command {
        Command::Register {
            name,
            email,
            password,
            profile,
        } => {
            let mut registration = Registration::new(name, email, password);
            registration.profile = profile;
            let account = client.register(&registration).await?;
            Ok(format!("Registered: {}", account))
        }
        Command::Login { email, password } => {
            client.login(&Credentials::new(email, password)).await?;
            Ok("Logged in".to_string())
        }
        Command::Logout => {
            client.logout();
            Ok("Logged out".to_string())
        }
        Command::WhoAmI => {
            let user = client.require_session().await?;
            Ok(match (user.name, user.email) {
                (Some(name), Some(email)) => format!("Authenticated as {} <{}>", name, email),
                _ => "Authenticated".to_string(),
            })
        }
        Command::ListNotes => {
            let notes = client.list_notes().await?;
            if notes.is_empty() {
                return Ok("No notes".to_string());
            }
            Ok(notes.iter().map(render_note).collect::<Vec<_>>().join("\n"))
        }
        Command::CreateNote(note) => {
            let created = client.create_note(&note).await?;
            Ok(format!("Created {}", render_note(&created)))
        }
        Command::UpdateNote { id, note } => {
            let updated = client.update_note(&id, &note).await?;
            Ok(format!("Updated {}", render_note(&updated)))
        }
        Command::DeleteNote(id) => {
            client.delete_note(&id).await?;
            Ok(format!("Deleted {}", id))
        }
    }
}

fn render_note(note: &Note) -> String {
    let updated = note
        .updated_at
        .map(|ts| ts.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_default();
    format!("[{}] {} ({})\n    {}", note.id, note.title, updated, note.content)
}
