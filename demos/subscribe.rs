use httpsched::{Call, CallType, SchedulerClient};
use serde_json::json;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let client = SchedulerClient::from_env()?;

    let subscribed = client
        .call(&Call::subscribe(json!({
            "user": "root",
            "name": "httpsched-demo",
            "failover_timeout": 60.0
        })))
        .await?;
    println!("subscribed via {}", client.endpoint());

    let client = match subscribed.default_header {
        Some(header) => client.with_default_header(header),
        None => anyhow::bail!("master did not issue a stream id"),
    };

    // The first event on the stream is SUBSCRIBED and carries the framework id.
    let mut events = subscribed.response;
    if let Some(chunk) = events.chunk().await? {
        println!("{}", String::from_utf8_lossy(&chunk));
    }

    client
        .call_no_data(
            &Call::new(CallType::Reconcile).with_field("reconcile", json!({ "tasks": [] })),
        )
        .await?;

    Ok(())
}
