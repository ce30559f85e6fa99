/// Push URL with the run time appended, e.g. "https://status/api/push/abc?ping=" + "3"
pub fn uptime_target(url: &str, elapsed_secs: u64) -> String {
    format!("{}{}", url, elapsed_secs)
}

/// Fire-and-forget ping to an uptime monitor. Failures are logged only.
pub async fn ping_uptime(client: &reqwest::Client, url: &str, elapsed_secs: u64) {
    let target = uptime_target(url, elapsed_secs);

    match client
        .get(&target)
        .send()
        .await
        .and_then(|response| response.error_for_status())
    {
        Ok(response) => tracing::info!("Pinged uptime monitor ({})", response.status()),
        Err(e) => tracing::error!("There was an error pinging the uptime status monitor: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_elapsed_seconds() {
        assert_eq!(
            uptime_target("https://status.example.com/api/push/abc?status=up&ping=", 12),
            "https://status.example.com/api/push/abc?status=up&ping=12"
        );
    }

    #[tokio::test]
    async fn unreachable_monitor_does_not_panic() {
        let client = reqwest::Client::new();
        ping_uptime(&client, "http://127.0.0.1:9/ping?t=", 1).await;
    }
}
