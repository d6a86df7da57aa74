use memlink::hooks::RawMessage;
use memlink::{
    CaptureHook, MemoryClient, MemoryConfig, RecallHook, TurnEndEvent, TurnStartEvent,
};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    info!("memlink demo starting");

    let config = Arc::new(MemoryConfig::from_env());
    let client = Arc::new(MemoryClient::new(&config)?);

    match client.get_stats().await {
        Ok(stats) => info!(
            "connected: {} entities, {} facts, {} relations",
            stats.entities, stats.facts, stats.relations
        ),
        Err(e) => info!("stats unavailable ({}), continuing", e),
    }

    let recall = RecallHook::new(client.clone(), config.clone());
    let capture = CaptureHook::new(client.clone(), config.clone());

    // Simulate one host turn
    let session_key = Uuid::new_v4().to_string();
    let prompt = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "what do you remember about this project?".to_string());

    let event = TurnStartEvent {
        prompt: prompt.clone(),
        session_key: session_key.clone(),
    };

    let injected = recall.on_turn_start(&event).await;
    match &injected {
        Some(context) => {
            println!("\n=== INJECTED CONTEXT ===");
            println!("{}", context);
        }
        None => println!("\n(no context injected this turn)"),
    }

    // The agent would respond here; capture the resulting transcript
    let user_content = match &injected {
        Some(context) => format!("{}\n{}", context, prompt),
        None => prompt,
    };

    let turn_end = TurnEndEvent {
        success: true,
        messages: vec![
            RawMessage {
                role: Some("user".to_string()),
                content: Some(user_content),
            },
            RawMessage {
                role: Some("assistant".to_string()),
                content: Some("Here is what I know so far.".to_string()),
            },
        ],
    };

    capture.on_turn_end(&turn_end).await;
    recall.end_session(&session_key);

    info!("demo turn complete");
    Ok(())
}
