use mongodb::Client;
use std::time::Instant;

/// Health check status for MongoDB
#[derive(Debug, Clone)]
pub struct HealthStatus {
    pub healthy: bool,
    /// Error details when unhealthy
    pub message: Option<String>,
    pub response_time_ms: u64,
}

/// Check MongoDB connectivity with a lightweight command.
pub async fn check_health(client: &Client) -> bool {
    client.list_database_names().await.is_ok()
}

/// Check MongoDB health with timing and error detail.
pub async fn check_health_detailed(client: &Client) -> HealthStatus {
    let start = Instant::now();

    match client.list_database_names().await {
        Ok(_) => HealthStatus {
            healthy: true,
            message: None,
            response_time_ms: start.elapsed().as_millis() as u64,
        },
        Err(e) => HealthStatus {
            healthy: false,
            message: Some(e.to_string()),
            response_time_ms: start.elapsed().as_millis() as u64,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    #[ignore] // Requires actual MongoDB
    async fn reports_healthy_local_instance() {
        let client = Client::with_uri_str("mongodb://localhost:27017")
            .await
            .unwrap();
        assert!(check_health(&client).await);

        let status = check_health_detailed(&client).await;
        assert!(status.healthy);
        assert!(status.message.is_none());
    }
}
