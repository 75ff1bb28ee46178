//! HTTP client wrapper - fetches and decodes the user list

use std::time::{Duration, Instant};

use anyhow::{anyhow, Context, Result};

use crate::models::User;

/// Fetch the users at `url`.
///
/// Transport errors, non-2xx statuses and malformed bodies all come back as
/// errors whose top-level message is meant for display.
pub async fn fetch_users(client: &reqwest::Client, url: &str) -> Result<Vec<User>> {
    let start = Instant::now();
    tracing::info!(url, "Fetching users");

    let resp = client.get(url).send().await.map_err(|e| {
        if e.is_timeout() {
            anyhow!("Request timed out")
        } else if e.is_connect() {
            anyhow!("Connection failed: {}", e)
        } else {
            anyhow!("Request failed: {}", e)
        }
    })?;

    let status = resp.status().as_u16();
    let body = resp
        .text()
        .await
        .map_err(|e| anyhow!("Error reading body: {}", e))?;

    let users = parse_users(status, &body)?;
    tracing::info!(
        url,
        status,
        users = users.len(),
        time_ms = start.elapsed().as_millis() as u64,
        "Users fetched"
    );
    Ok(users)
}

/// Decode a users response body, rejecting non-success statuses
pub fn parse_users(status: u16, body: &str) -> Result<Vec<User>> {
    if !(200..300).contains(&status) {
        return Err(anyhow!("Server responded with status {}", status));
    }
    serde_json::from_str(body).context("Response is not a valid user list")
}

/// Create an HTTP client; `timeout` of `None` waits indefinitely
pub fn create_client(timeout: Option<Duration>) -> reqwest::Client {
    let builder = reqwest::Client::builder();
    let builder = match timeout {
        Some(timeout) => builder.timeout(timeout),
        None => builder,
    };
    builder.build().unwrap_or_else(|_| reqwest::Client::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Client that talks to the local test listener directly
    fn local_client(timeout: Duration) -> reqwest::Client {
        reqwest::Client::builder()
            .no_proxy()
            .timeout(timeout)
            .build()
            .unwrap()
    }

    #[test]
    fn test_parse_users_ok() {
        let body = r#"[{"id":1,"name":"Ada","email":"ada@example.com"},{"id":2,"name":"Linus","email":"l@example.com"}]"#;
        let users = parse_users(200, body).unwrap();
        assert_eq!(users.len(), 2);
        assert_eq!(users[1].name, "Linus");
    }

    #[test]
    fn test_parse_users_empty_list() {
        assert!(parse_users(200, "[]").unwrap().is_empty());
    }

    #[test]
    fn test_parse_users_bad_status() {
        let err = parse_users(404, "Not Found").unwrap_err();
        assert_eq!(err.to_string(), "Server responded with status 404");
    }

    #[tokio::test]
    async fn test_closed_port_reports_connection_failure() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = local_client(Duration::from_secs(5));
        let err = fetch_users(&client, &format!("http://{}/users", addr))
            .await
            .unwrap_err();
        assert!(err.to_string().starts_with("Connection failed: "), "{}", err);
    }

    #[tokio::test]
    async fn test_silent_server_reports_timeout() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        // Accept connections but never answer
        let server = tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                held.push(socket);
            }
        });

        let client = local_client(Duration::from_millis(200));
        let err = fetch_users(&client, &format!("http://{}/users", addr))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Request timed out");
        server.abort();
    }

    #[tokio::test]
    async fn test_malformed_url_reports_request_failure() {
        let client = create_client(None);
        let err = fetch_users(&client, "not a url").await.unwrap_err();
        assert!(err.to_string().starts_with("Request failed: "), "{}", err);
    }

    #[test]
    fn test_parse_users_bad_body() {
        let err = parse_users(200, "{\"oops\": true}").unwrap_err();
        assert_eq!(err.to_string(), "Response is not a valid user list");
    }
}
