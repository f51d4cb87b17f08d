//! Example: Creating, reading and deleting a Parse object.
//!
//! Reads `PARSE_SERVER_URL`, `PARSE_APPLICATION_ID`, `PARSE_REST_API_KEY`
//! and optionally `PARSE_MASTER_KEY` from the environment or a `.env` file.
//!
//! Run with: cargo run --example basic_usage

use std::time::Duration;

use parse_rest_client::ParseClientBuilder;
use serde_json::json;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let client = ParseClientBuilder::from_env()?
        .timeout(Duration::from_secs(10))
        .build()?;
    println!("Client: {:?}", client);

    println!("=== Create ===");
    let response = client
        .post("classes/GameScore", &json!({ "score": 1337, "playerName": "Sean Plott" }))
        .await?;
    println!("Status: {}", response.status());
    let created: serde_json::Value = serde_json::from_str(&response.text().await?)?;
    println!("Body: {}", created);

    let Some(object_id) = created["objectId"].as_str() else {
        println!("No objectId returned, stopping");
        return Ok(());
    };
    let resource = format!("classes/GameScore/{object_id}");

    println!("\n=== Read ===");
    let response = client.get(&resource).await?;
    println!("Status: {}", response.status());
    println!("Body: {}", response.text().await?);

    println!("\n=== Update ===");
    let response = client.put(&resource, &json!({ "score": 73453 })).await?;
    println!("Status: {}", response.status());

    println!("\n=== Delete ===");
    let response = client.delete(&resource).await?;
    println!("Status: {}", response.status());

    Ok(())
}
