//! Client-side API access and board state.

pub mod board;

use reqwest::Response;
use uuid::Uuid;

use crate::errors::ClientError;
use crate::ticket::{
    ErrorResponse, GenerateRequest, Ticket, TicketResponse, TicketStatus, TicketsResponse,
    UpdateStatusRequest,
};

/// Typed HTTP client for the taskdeck REST surface.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Decode a non-2xx reply into the server's `{"error"}` body; fall back
    /// to the bare status when the body isn't the expected shape.
    async fn check(resp: Response) -> Result<Response, ClientError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let message = match resp.json::<ErrorResponse>().await {
            Ok(body) => body.error,
            Err(_) => format!("HTTP {}", status),
        };
        Err(ClientError::Api { status, message })
    }

    pub async fn generate_tickets(&self, prompt: &str) -> Result<Vec<Ticket>, ClientError> {
        let resp = self
            .http
            .post(self.url("/api/generate-tickets"))
            .json(&GenerateRequest {
                prompt: Some(prompt.to_string()),
            })
            .send()
            .await?;
        let body: TicketsResponse = Self::check(resp).await?.json().await?;
        Ok(body.tickets)
    }

    pub async fn list_tickets(&self) -> Result<Vec<Ticket>, ClientError> {
        let resp = self.http.get(self.url("/api/tickets")).send().await?;
        let body: TicketsResponse = Self::check(resp).await?.json().await?;
        Ok(body.tickets)
    }

    pub async fn update_status(
        &self,
        id: Uuid,
        status: TicketStatus,
    ) -> Result<Ticket, ClientError> {
        let resp = self
            .http
            .put(self.url(&format!("/api/tickets/{}/status", id)))
            .json(&UpdateStatusRequest {
                status: Some(status.as_str().to_string()),
            })
            .send()
            .await?;
        let body: TicketResponse = Self::check(resp).await?.json().await?;
        Ok(body.ticket)
    }

    pub async fn delete_ticket(&self, id: Uuid) -> Result<(), ClientError> {
        let resp = self
            .http
            .delete(self.url(&format!("/api/tickets/{}", id)))
            .send()
            .await?;
        Self::check(resp).await?;
        Ok(())
    }

    pub async fn clear_all(&self) -> Result<(), ClientError> {
        let resp = self.http.delete(self.url("/api/tickets")).send().await?;
        Self::check(resp).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = ApiClient::new("http://localhost:5000/");
        assert_eq!(client.base_url(), "http://localhost:5000");
        assert_eq!(
            client.url("/api/tickets"),
            "http://localhost:5000/api/tickets"
        );
    }
}
