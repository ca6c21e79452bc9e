use anyhow::Result;

use notes::commands::{execute_command, parse_args};
use notes::NotesClient;
use notes_auth::Settings;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = match parse_args(&args) {
        Ok(command) => command,
        Err(usage) => {
            eprintln!("{}", usage);
            std::process::exit(2);
        }
    };

    let log = notes::logging::init_logging()?;
    tracing::debug!(path = %log.path().display(), "Logging initialized");

    let settings = Settings::new()?;
    settings.validate().map_err(anyhow::Error::msg)?;
    let client = NotesClient::from_settings(&settings)?;

    match execute_command(&client, command).await {
        Ok(output) => println!("{}", output),
        Err(e) => {
            tracing::warn!("Command failed: {}", e);
            eprintln!("Error: {}", e);
            // Flush the log file before exiting
            drop(log);
            std::process::exit(1);
        }
    }

    Ok(())
}
