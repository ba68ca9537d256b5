use std::sync::Arc;
use std::time::Duration;

use reqwest::Url;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::domain::entities::presentation::Presentation;
use crate::infra::google::{api_failure, ApiFailure, FailureKind};
use crate::usecase::ports::credentials::CredentialError;
use crate::usecase::ports::credentials::TokenProvider;
use crate::usecase::ports::presentation_store::{
    BatchReply, PresentationStore, ReplaceAllText, StoreError,
};

pub const SLIDES_BASE_URL: &str = "https://slides.googleapis.com";

pub fn batch_update_body(requests: &[ReplaceAllText]) -> Value {
    let requests: Vec<Value> = requests
        .iter()
        .map(|request| {
            json!({
                "replaceAllText": {
                    "containsText": {
                        "text": request.find,
                        "matchCase": request.match_case,
                    },
                    "replaceText": request.replace,
                }
            })
        })
        .collect();
    json!({ "requests": requests })
}

#[derive(Debug, Deserialize)]
struct BatchUpdateResponse {
    #[serde(default)]
    replies: Vec<Reply>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Reply {
    replace_all_text: Option<ReplaceAllTextReply>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReplaceAllTextReply {
    #[serde(default)]
    occurrences_changed: u32,
}

/// Replies that are not replace-all replies are dropped, which surfaces as a
/// short reply list to the caller.
pub fn parse_batch_reply(raw: &str) -> Result<BatchReply, StoreError> {
    let body: BatchUpdateResponse = serde_json::from_str(raw)
        .map_err(|err| StoreError::InvalidResponse(err.to_string()))?;
    Ok(BatchReply {
        occurrences_changed: body
            .replies
            .into_iter()
            .filter_map(|reply| reply.replace_all_text)
            .map(|reply| reply.occurrences_changed)
            .collect(),
    })
}

/// `suffix` is appended to the id segment, e.g. `:batchUpdate`.
pub fn presentation_url(
    base_url: &str,
    presentation_id: &str,
    suffix: &str,
) -> Result<Url, StoreError> {
    let mut url = Url::parse(base_url)
        .map_err(|err| StoreError::Transport(format!("invalid slides url: {err}")))?;
    url.path_segments_mut()
        .map_err(|_| StoreError::Transport("slides url cannot be a base".to_string()))?
        .pop_if_empty()
        .extend(["v1", "presentations", &format!("{presentation_id}{suffix}")]);
    Ok(url)
}

pub fn store_error(presentation_id: &str, failure: &ApiFailure) -> StoreError {
    match failure.kind() {
        FailureKind::NotFound => StoreError::DocumentNotFound(presentation_id.to_string()),
        FailureKind::Permission => StoreError::Permission(presentation_id.to_string()),
        FailureKind::Unauthorized => {
            StoreError::Credential(CredentialError::Rejected(failure.to_string()))
        }
        FailureKind::Other => StoreError::Transport(failure.to_string()),
    }
}

pub struct GoogleSlidesStore {
    client: reqwest::blocking::Client,
    auth: Arc<dyn TokenProvider>,
}

impl GoogleSlidesStore {
    pub fn new(auth: Arc<dyn TokenProvider>) -> Result<Self, StoreError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|err| StoreError::Transport(err.to_string()))?;
        Ok(Self { client, auth })
    }

    fn check(
        &self,
        presentation_id: &str,
        response: reqwest::blocking::Response,
    ) -> Result<String, StoreError> {
        if response.status().is_success() {
            return response
                .text()
                .map_err(|err| StoreError::Transport(err.to_string()));
        }
        let failure = api_failure(response);
        debug!(presentation_id, %failure, "presentation request failed");
        Err(store_error(presentation_id, &failure))
    }
}

impl PresentationStore for GoogleSlidesStore {
    fn get(&self, presentation_id: &str) -> Result<Presentation, StoreError> {
        let url = presentation_url(SLIDES_BASE_URL, presentation_id, "")?;
        let token = self.auth.access_token()?;
        let response = self
            .client
            .get(url)
            .bearer_auth(token)
            .send()
            .map_err(|err| StoreError::Transport(err.to_string()))?;
        let raw = self.check(presentation_id, response)?;
        serde_json::from_str(&raw).map_err(|err| StoreError::InvalidResponse(err.to_string()))
    }

    fn batch_replace(
        &self,
        presentation_id: &str,
        requests: &[ReplaceAllText],
    ) -> Result<BatchReply, StoreError> {
        let url = presentation_url(SLIDES_BASE_URL, presentation_id, ":batchUpdate")?;
        let token = self.auth.access_token()?;
        let response = self
            .client
            .post(url)
            .bearer_auth(token)
            .json(&batch_update_body(requests))
            .send()
            .map_err(|err| StoreError::Transport(err.to_string()))?;
        let raw = self.check(presentation_id, response)?;
        parse_batch_reply(&raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batch_body_matches_case_and_keeps_order() {
        let body = batch_update_body(&[
            ReplaceAllText {
                find: "[Placeholder for Name]".to_string(),
                replace: "Jane Doe".to_string(),
                match_case: true,
            },
            ReplaceAllText {
                find: "[Placeholder for ID]".to_string(),
                replace: "E100".to_string(),
                match_case: true,
            },
        ]);

        assert_eq!(
            body["requests"][0]["replaceAllText"]["containsText"]["text"],
            "[Placeholder for Name]"
        );
        assert_eq!(
            body["requests"][0]["replaceAllText"]["containsText"]["matchCase"],
            true
        );
        assert_eq!(body["requests"][1]["replaceAllText"]["replaceText"], "E100");
        assert_eq!(body["requests"].as_array().map(Vec::len), Some(2));
    }

    #[test]
    fn reply_without_count_means_zero_changes() {
        let reply = parse_batch_reply(
            r#"{"presentationId":"p","replies":[{"replaceAllText":{"occurrencesChanged":2}},{"replaceAllText":{}}]}"#,
        )
        .expect("reply should parse");

        assert_eq!(reply.occurrences_changed, vec![2, 0]);
    }

    #[test]
    fn foreign_replies_shorten_the_list() {
        let reply = parse_batch_reply(r#"{"replies":[{},{"replaceAllText":{"occurrencesChanged":1}}]}"#)
            .expect("reply should parse");

        assert_eq!(reply.occurrences_changed, vec![1]);
    }

    #[test]
    fn presentation_url_keeps_id_in_one_segment() {
        let url = presentation_url(SLIDES_BASE_URL, "deck/1?x#y", ":batchUpdate")
            .expect("url should build");

        assert_eq!(
            url.as_str(),
            "https://slides.googleapis.com/v1/presentations/deck%2F1%3Fx%23y:batchUpdate"
        );
    }

    #[test]
    fn plain_presentation_url() {
        let url = presentation_url(SLIDES_BASE_URL, "deck-1", "").expect("url should build");

        assert_eq!(url.as_str(), "https://slides.googleapis.com/v1/presentations/deck-1");
    }

    #[test]
    fn http_statuses_map_to_store_errors() {
        assert_eq!(
            store_error("deck-1", &ApiFailure::from_body(404, "")),
            StoreError::DocumentNotFound("deck-1".to_string())
        );
        assert_eq!(
            store_error("deck-1", &ApiFailure::from_body(403, "")),
            StoreError::Permission("deck-1".to_string())
        );
        assert!(matches!(
            store_error("deck-1", &ApiFailure::from_body(401, "")),
            StoreError::Credential(CredentialError::Rejected(_))
        ));
        assert!(matches!(
            store_error("deck-1", &ApiFailure::from_body(500, "backend error")),
            StoreError::Transport(message) if message.contains("HTTP 500")
        ));
    }

    #[test]
    fn garbage_reply_is_invalid_response() {
        assert!(matches!(
            parse_batch_reply("<html>"),
            Err(StoreError::InvalidResponse(_))
        ));
    }
}
