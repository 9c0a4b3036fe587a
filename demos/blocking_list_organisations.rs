//! List school units using the blocking client.
//!
//! Run:
//! `cargo run --example blocking_list_organisations`

use ss12000_client::{BlockingSs12000Client, OrganisationsQuery, Paging, Resource};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let client = BlockingSs12000Client::from_env()?;

    let query = OrganisationsQuery {
        organisation_type: Some(vec!["Skolenhet".to_owned()]),
        paging: Paging::limit(20),
        ..OrganisationsQuery::default()
    };
    let organisations = client.list(Resource::Organisations, &query)?;

    println!("{}", serde_json::to_string_pretty(&organisations)?);
    Ok(())
}
