use notes_api::{ApiError, Client, Request};
use reqwest::header::{HeaderMap, HeaderValue};

#[tokio::main]
pub async fn main() -> Result<(), ApiError> {
    let client = Client::new("http://localhost:3000/api/v1")?;

    let mut headers = HeaderMap::new();
    headers.insert("token", HeaderValue::from_static("3b8ny__api_token"));

    let notes = client.send(&Request::notes().list(), headers).await?;
    for note in notes {
        println!("{} {}", note.id, note.title);
    }
    Ok(())
}
