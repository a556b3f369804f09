use crate::api::ActivityApi;
use crate::image::ImageUpload;
use activity_core::{ActivityError, ActivityResult};
use activity_domain::{Activity, ActivityDraft, ActivityUpdate, ReorderBatch};
use async_trait::async_trait;
use reqwest::{multipart, Client, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// `ActivityApi` over HTTP/JSON.
#[derive(Debug, Clone)]
pub struct HttpActivityApi {
    client: Client,
    base: Url,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    image_path: String,
}

impl HttpActivityApi {
    /// `base_url` is the API root, e.g. `http://127.0.0.1:8000/api`.
    pub fn new(base_url: &str) -> ActivityResult<Self> {
        let base = parse_base(base_url)?;
        let client = Client::builder()
            .build()
            .map_err(|e| ActivityError::Internal(format!("HTTP client setup failed: {}", e)))?;
        Ok(Self { client, base })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, segments: &[&str]) -> ActivityResult<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| {
                ActivityError::Validation(format!("API URL cannot be a base: {}", self.base))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn send(&self, request: RequestBuilder) -> ActivityResult<Response> {
        let response = request.send().await.map_err(transport_error)?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(status_error(status.as_u16(), &body))
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> ActivityResult<T> {
        let response = self.send(request).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| ActivityError::Serialization(e.to_string()))
    }
}

#[async_trait]
impl ActivityApi for HttpActivityApi {
    async fn list_activities(&self) -> ActivityResult<Vec<Activity>> {
        let url = self.endpoint(&["activities"])?;
        tracing::debug!("GET {}", url);
        self.send_json(self.client.get(url)).await
    }

    async fn get_activity(&self, id: &str) -> ActivityResult<Activity> {
        let url = self.endpoint(&["activities", id])?;
        tracing::debug!("GET {}", url);
        self.send_json(self.client.get(url)).await
    }

    async fn create_activity(&self, draft: &ActivityDraft) -> ActivityResult<Activity> {
        let url = self.endpoint(&["activities"])?;
        tracing::debug!("POST {}", url);
        self.send_json(self.client.post(url).json(draft)).await
    }

    async fn update_activity(
        &self,
        id: &str,
        update: &ActivityUpdate,
    ) -> ActivityResult<Activity> {
        let url = self.endpoint(&["activities", id])?;
        tracing::debug!("PUT {}", url);
        self.send_json(self.client.put(url).json(update)).await
    }

    async fn delete_activity(&self, id: &str) -> ActivityResult<()> {
        let url = self.endpoint(&["activities", id])?;
        tracing::debug!("DELETE {}", url);
        self.send(self.client.delete(url)).await?;
        Ok(())
    }

    async fn reorder_activities(&self, batch: &ReorderBatch) -> ActivityResult<()> {
        let url = self.endpoint(&["activities", "reorder"])?;
        tracing::debug!("PUT {} ({} items)", url, batch.len());
        self.send(self.client.put(url).json(batch)).await?;
        Ok(())
    }

    async fn upload_image(&self, id: &str, image: ImageUpload) -> ActivityResult<String> {
        let url = self.endpoint(&["activities", id, "upload-image"])?;
        tracing::debug!("POST {} ({})", url, image.file_name());
        let file_name = image.file_name().to_string();
        let mime = image.mime_type();
        let part = multipart::Part::bytes(image.into_bytes())
            .file_name(file_name)
            .mime_str(mime)
            .map_err(|e| ActivityError::Internal(e.to_string()))?;
        let form = multipart::Form::new().part("file", part);
        let uploaded: UploadResponse = self
            .send_json(self.client.post(url).multipart(form))
            .await?;
        Ok(uploaded.image_path)
    }
}

/// Absolute URL of a stored image: `image_path` is served from the origin of
/// the API, not from under the API path.
pub fn image_url(api_base: &str, image_path: &str) -> Option<String> {
    let trimmed = image_path.trim().trim_start_matches('/');
    if trimmed.is_empty() {
        return None;
    }
    let mut url = parse_base(api_base).ok()?;
    url.set_path(&format!("/{}", trimmed));
    url.set_query(None);
    url.set_fragment(None);
    Some(url.to_string())
}

fn parse_base(base_url: &str) -> ActivityResult<Url> {
    Url::parse(base_url)
        .map_err(|e| ActivityError::Validation(format!("Invalid API URL '{}': {}", base_url, e)))
}

fn transport_error(err: reqwest::Error) -> ActivityError {
    if err.is_decode() {
        ActivityError::Serialization(err.to_string())
    } else {
        ActivityError::Connection(err.to_string())
    }
}

fn status_error(status: u16, body: &str) -> ActivityError {
    let detail = error_detail(body).unwrap_or_else(|| format!("HTTP {}", status));
    match status {
        404 => ActivityError::NotFound(detail),
        400 | 422 => ActivityError::Validation(detail),
        _ => ActivityError::Api { status, detail },
    }
}

/// Error bodies look like `{"detail": ...}`; a string detail is used as is,
/// anything else is shown as JSON.
fn error_detail(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }
    match serde_json::from_str::<serde_json::Value>(trimmed) {
        Ok(serde_json::Value::Object(map)) => match map.get("detail") {
            Some(serde_json::Value::String(detail)) => Some(detail.clone()),
            Some(other) => Some(other.to_string()),
            None => Some(trimmed.to_string()),
        },
        _ => Some(trimmed.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_building() {
        let api = HttpActivityApi::new("http://127.0.0.1:8000/api").unwrap();
        assert_eq!(
            api.endpoint(&["activities"]).unwrap().as_str(),
            "http://127.0.0.1:8000/api/activities"
        );
        assert_eq!(
            api.endpoint(&["activities", "reorder"]).unwrap().as_str(),
            "http://127.0.0.1:8000/api/activities/reorder"
        );

        let trailing = HttpActivityApi::new("http://host/api/").unwrap();
        assert_eq!(
            trailing.endpoint(&["activities", "a b"]).unwrap().as_str(),
            "http://host/api/activities/a%20b"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(matches!(
            HttpActivityApi::new("not a url"),
            Err(ActivityError::Validation(_))
        ));
    }

    #[test]
    fn test_image_url_uses_origin() {
        assert_eq!(
            image_url("http://127.0.0.1:8000/api", "/uploads/abc.jpg").as_deref(),
            Some("http://127.0.0.1:8000/uploads/abc.jpg")
        );
        assert_eq!(
            image_url("http://127.0.0.1:8000/api", "uploads/abc.jpg").as_deref(),
            Some("http://127.0.0.1:8000/uploads/abc.jpg")
        );
        assert_eq!(image_url("http://127.0.0.1:8000/api", ""), None);
    }

    #[test]
    fn test_status_error_mapping() {
        assert!(matches!(
            status_error(404, r#"{"detail":"Atividade não encontrada"}"#),
            ActivityError::NotFound(ref d) if d == "Atividade não encontrada"
        ));
        assert!(matches!(
            status_error(422, r#"{"detail":[{"loc":["body","title"]}]}"#),
            ActivityError::Validation(ref d) if d.contains("loc")
        ));
        assert!(matches!(
            status_error(500, ""),
            ActivityError::Api { status: 500, ref detail } if detail == "HTTP 500"
        ));
        assert!(matches!(
            status_error(502, "Bad Gateway"),
            ActivityError::Api { ref detail, .. } if detail == "Bad Gateway"
        ));
    }
}
