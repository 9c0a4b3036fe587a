//! Fetch everything deleted since a timestamp, the way a webhook receiver
//! resynchronises after a change notification.
//!
//! Run:
//! `cargo run --example async_sync_deleted_entities -- 2024-01-01T00:00:00Z`

use ss12000_client::{DeletedEntitiesQuery, Paging, Ss12000Client};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let after = std::env::args()
        .nth(1)
        .ok_or("usage: async_sync_deleted_entities <RFC 3339 timestamp>")?;

    let client = Ss12000Client::from_env()?;
    for diagnostic in client.diagnostics() {
        eprintln!("warning: {diagnostic}");
    }

    let mut query = DeletedEntitiesQuery {
        after: Some(after),
        paging: Paging::limit(100),
        ..DeletedEntitiesQuery::default()
    };

    loop {
        let page = client.get_deleted_entities(&query).await?;
        println!("{}", serde_json::to_string_pretty(&page["data"])?);

        match page["pageToken"].as_str() {
            Some(token) => {
                query.after = None;
                query.paging = Paging::limit(100).after_token(token);
            }
            None => break,
        }
    }

    Ok(())
}
