use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::multipart::{Form, Part};

use crate::api::{Acknowledgment, ApiError, ApiResult, PassengerApi, TransportError};
use crate::domain::passenger::{Passenger, PassengerPayload};

/// Passenger API reached over HTTP at a fixed base URL.
#[derive(Debug, Clone)]
pub struct HttpPassengerApi {
    client: Client,
    base_url: String,
}

impl HttpPassengerApi {
    pub fn new(base_url: &str, timeout: Duration) -> ApiResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn add_url(&self) -> String {
        format!("{}/add", self.base_url)
    }

    async fn ensure_success(response: reqwest::Response) -> ApiResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let text = match response.text().await {
            Ok(text) if !text.trim().is_empty() => text,
            _ => status
                .canonical_reason()
                .unwrap_or("Unknown error")
                .to_string(),
        };
        Err(TransportError::status(status.as_u16(), text).into())
    }
}

/// Unwraps the `{ "data": [...] }` envelope returned by the list endpoint.
pub fn decode_passenger_list(body: &[u8]) -> ApiResult<Vec<Passenger>> {
    let value: serde_json::Value = serde_json::from_slice(body)
        .map_err(|e| ApiError::Format(format!("body is not JSON: {e}")))?;

    let data = value
        .get("data")
        .ok_or_else(|| ApiError::Format("missing `data` field".to_string()))?;
    if !data.is_array() {
        return Err(ApiError::Format("`data` is not a list".to_string()));
    }

    serde_json::from_value(data.clone())
        .map_err(|e| ApiError::Format(format!("invalid passenger entry: {e}")))
}

/// Builds the multipart body for `POST {base}/add`.
pub fn build_form(payload: &PassengerPayload) -> ApiResult<Form> {
    let mut form = Form::new();
    for (name, value) in payload.text_fields() {
        form = form.text(name, value);
    }
    for (slot, attachment) in payload.attachments() {
        let mut part =
            Part::bytes(attachment.bytes.clone()).file_name(attachment.file_name.clone());
        if let Some(content_type) = &attachment.content_type {
            part = part.mime_str(content_type)?;
        }
        form = form.part(slot.field_name(), part);
    }
    Ok(form)
}

#[async_trait]
impl PassengerApi for HttpPassengerApi {
    async fn list_passengers(&self) -> ApiResult<Vec<Passenger>> {
        let response = self.client.get(&self.base_url).send().await?;
        let response = Self::ensure_success(response).await?;
        let body = response.bytes().await?;
        decode_passenger_list(&body)
    }

    async fn submit_passenger(&self, payload: &PassengerPayload) -> ApiResult<Acknowledgment> {
        let form = build_form(payload)?;
        let response = self.client.post(self.add_url()).multipart(form).send().await?;
        let response = Self::ensure_success(response).await?;
        let body = response.bytes().await?;
        let ack = serde_json::from_slice(&body)
            .map_err(|e| ApiError::Format(format!("acknowledgment is not JSON: {e}")))?;
        Ok(Acknowledgment(ack))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::passenger::Attachment;
    use crate::domain::types::{Gender, PassengerAge, PassengerName};

    #[test]
    fn decodes_data_envelope_in_order() {
        let body = br#"{"data":[{"name":"Ada","age":36},{"name":"Bob","age":"40"}]}"#;
        let passengers = decode_passenger_list(body).unwrap();

        assert_eq!(passengers.len(), 2);
        assert_eq!(passengers[0].name, Some("Ada".into()));
        assert_eq!(passengers[1].name, Some("Bob".into()));
        assert_eq!(passengers[1].age, Some("40".into()));
    }

    #[test]
    fn rejects_non_list_data() {
        let result = decode_passenger_list(br#"{"data":"not-a-list"}"#);
        assert!(matches!(result, Err(ApiError::Format(_))));
    }

    #[test]
    fn rejects_bare_array_and_garbage() {
        assert!(matches!(
            decode_passenger_list(br#"[{"name":"Ada"}]"#),
            Err(ApiError::Format(_))
        ));
        assert!(matches!(
            decode_passenger_list(b"<html>"),
            Err(ApiError::Format(_))
        ));
        assert!(matches!(
            decode_passenger_list(br#"{"data":[1,2]}"#),
            Err(ApiError::Format(_))
        ));
    }

    #[test]
    fn base_url_drops_trailing_slash() {
        let api =
            HttpPassengerApi::new("http://localhost:5000/api/", Duration::from_secs(5)).unwrap();
        assert_eq!(api.base_url(), "http://localhost:5000/api");
        assert_eq!(api.add_url(), "http://localhost:5000/api/add");
    }

    #[test]
    fn form_rejects_malformed_content_type() {
        let payload = PassengerPayload {
            name: PassengerName::new("Ada").unwrap(),
            age: PassengerAge::new("36").unwrap(),
            gender: Gender::Female,
            contact: None,
            email: None,
            photo: Some(Attachment::new("me.png", Some("not a mime".into()), vec![1])),
            id_card: None,
        };
        assert!(matches!(build_form(&payload), Err(ApiError::Transport(_))));
    }
}
