use notes_api::{NoteDraft, NoteId};
use serde_json::{Map, Value};

use super::Command;

pub const USAGE: &str = "\
usage: notes <command> [args]

  register <name> <email> <password> [key=value ...]
  login <email> <password>
  logout
  whoami
  list
  create <title> <content>
  update <id> [title=...] [content=...]
  delete <id>";

/// Map command-line arguments (without the program name) to a command.
pub fn parse_args(args: &[String]) -> Result<Command, String> {
    let Some((name, rest)) = args.split_first() else {
        return Err(USAGE.to_string());
    };

    match (name.as_str(), rest) {
        ("register", [name, email, password, extra @ ..]) => Ok(Command::Register {
            name: name.clone(),
            email: email.clone(),
            password: password.clone(),
            profile: parse_profile(extra)?,
        }),
        ("login", [email, password]) => Ok(Command::Login {
            email: email.clone(),
            password: password.clone(),
        }),
        ("logout", []) => Ok(Command::Logout),
        ("whoami", []) => Ok(Command::WhoAmI),
        ("list", []) => Ok(Command::ListNotes),
        ("create", [title, content]) => Ok(Command::CreateNote(
            NoteDraft::new().title(title.as_str()).content(content.as_str()),
        )),
        ("update", [id, fields @ ..]) => Ok(Command::UpdateNote {
            id: NoteId::from(id.as_str()),
            note: parse_draft(fields)?,
        }),
        ("delete", [id]) => Ok(Command::DeleteNote(NoteId::from(id.as_str()))),
        _ => Err(USAGE.to_string()),
    }
}

fn split_pair(arg: &str) -> Result<(&str, &str), String> {
    arg.split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{}'", arg))
}

/// Extra profile fields are opaque; numbers are sent as JSON numbers.
fn parse_profile(args: &[String]) -> Result<Map<String, Value>, String> {
    args.iter()
        .map(|arg| {
            let (key, value) = split_pair(arg)?;
            let value = value
                .parse::<i64>()
                .map(Value::from)
                .unwrap_or_else(|_| Value::from(value));
            Ok((key.to_string(), value))
        })
        .collect()
}

fn parse_draft(args: &[String]) -> Result<NoteDraft, String> {
    args.iter().try_fold(NoteDraft::new(), |draft, arg| {
        match split_pair(arg)? {
            ("title", value) => Ok(draft.title(value)),
            ("content", value) => Ok(draft.content(value)),
            (key, _) => Err(format!("unknown note field '{}'", key)),
        }
    })
}
