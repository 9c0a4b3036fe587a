//! List persons page by page using the async `Ss12000Client`.
//!
//! Run:
//! `cargo run --example async_list_persons`
//!
//! Required env vars:
//! - `SS12000_BASE_URL`
//!
//! Optional env vars:
//! - `SS12000_ACCESS_TOKEN`
//! - `SS12000_NAME_CONTAINS` (name filter)
//! - `SS12000_PAGE_LIMIT` (defaults to `25`)

use ss12000_client::{Paging, PersonsQuery, Ss12000Client};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let client = Ss12000Client::from_env()?;
    let limit = std::env::var("SS12000_PAGE_LIMIT")
        .ok()
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(25);

    let mut query = PersonsQuery {
        name_contains: std::env::var("SS12000_NAME_CONTAINS").ok().map(|name| vec![name]),
        expand_reference_names: Some(true),
        paging: Paging::limit(limit),
        ..PersonsQuery::default()
    };

    let mut total = 0;
    loop {
        let page = client.get_persons(&query).await?;
        if let Some(persons) = page["data"].as_array() {
            total += persons.len();
            for person in persons {
                println!(
                    "{} {} {}",
                    person["id"].as_str().unwrap_or("?"),
                    person["givenName"].as_str().unwrap_or(""),
                    person["familyName"].as_str().unwrap_or("")
                );
            }
        }

        match page["pageToken"].as_str() {
            Some(token) => query.paging = Paging::limit(limit).after_token(token),
            None => break,
        }
    }

    println!("{total} persons");
    Ok(())
}
