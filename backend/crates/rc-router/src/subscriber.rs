use crate::{ActivityRouter, Result as RouterResult};

use rc_config::PubSubConfig;
use rc_ws::ShutdownGuard;

use futures::StreamExt;
use log::{error, info};

/// The coordinator loop: the single process-wide pub/sub subscription.
///
/// Each published message is handed to the router, which picks one
/// worker. The subscription lives for the whole process; an ended
/// stream is reported and left to the supervisor.
pub async fn run_subscriber(
    config: &PubSubConfig,
    router: ActivityRouter,
    mut shutdown: ShutdownGuard,
) -> RouterResult<()> {
    let client = redis::Client::open(config.url())?;
    let mut pubsub = client.get_async_pubsub().await?;
    pubsub.subscribe(&config.channel).await?;
    info!("Subscribed to activity channel {}", config.channel);

    let mut stream = pubsub.on_message();

    loop {
        tokio::select! {
            msg = stream.next() => {
                match msg {
                    Some(msg) => {
                        let channel = msg.get_channel_name().to_string();
                        let payload = msg.get_payload_bytes().to_vec();
                        router.route(&channel, &payload).await;
                    }
                    None => {
                        error!("Pub/sub message stream ended");
                        break;
                    }
                }
            }

            _ = shutdown.wait() => {
                info!("Coordinator subscription shutting down");
                break;
            }
        }
    }

    Ok(())
}
