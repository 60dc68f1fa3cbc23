pub mod client;
pub mod error;
pub mod extract;
pub mod fallback;
pub mod net;
pub mod openrouter;
pub mod prompt;

pub use client::{ChatClient, UnconfiguredClient};
pub use error::AiError;
pub use net::{AlwaysOnline, Connectivity};
pub use openrouter::OpenRouterClient;

use tracing::{debug, warn};

use crate::snacks::dto::GenerateSnackRequest;

/// Structured nutrition output of the generator, before persistence.
#[derive(Debug, Clone, PartialEq)]
pub struct AiSnack {
    pub title: String,
    pub description: String,
    pub ingredients: String,
    pub instructions: String,
    pub kcal: f64,
    pub protein: f64,
    pub fat: f64,
    pub carbohydrates: f64,
    pub fibre: f64,
}

/// Produces a recommendation for the given preferences. Total: any backend,
/// extraction or connectivity failure folds into the deterministic fallback,
/// so the caller always gets a result.
pub async fn generate(
    client: &dyn ChatClient,
    connectivity: &dyn Connectivity,
    prefs: &GenerateSnackRequest,
) -> AiSnack {
    if !connectivity.is_online() {
        debug!("offline, using fallback recommendation");
        return fallback::fallback_recommendation(prefs);
    }

    let messages = [client::Message::user(prompt::build_prompt(prefs))];
    let format = client
        .supports_structured_output()
        .then(prompt::snack_response_format);

    match client::chat_with_retry(client, &messages, format.as_ref()).await {
        Ok(response) => match extract::parse_snack(&response.content) {
            Some(snack) => snack,
            None => {
                warn!(model = %response.model, "model response had no usable JSON, using fallback");
                fallback::fallback_recommendation(prefs)
            }
        },
        Err(e) => {
            warn!(error = %e, "generation backend unavailable, using fallback");
            fallback::fallback_recommendation(prefs)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use client::{ChatResponse, Message, ResponseFormat};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn prefs(snack_type: &str, diet: &str) -> GenerateSnackRequest {
        serde_json::from_value(serde_json::json!({
            "meals_eaten": "eggs and toast",
            "snack_type": snack_type,
            "location": "work",
            "goal": "maintain",
            "preferred_diet": diet,
        }))
        .expect("request should deserialize")
    }

    struct ScriptedClient {
        calls: AtomicUsize,
        reply: Result<&'static str, fn() -> AiError>,
    }

    #[async_trait]
    impl ChatClient for ScriptedClient {
        async fn chat(
            &self,
            _messages: &[Message],
            _response_format: Option<&ResponseFormat>,
        ) -> Result<ChatResponse, AiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.reply {
                Ok(content) => Ok(ChatResponse {
                    content: (*content).to_string(),
                    model: "test-model".into(),
                }),
                Err(make) => Err(make()),
            }
        }

        fn supports_structured_output(&self) -> bool {
            false
        }
    }

    #[tokio::test]
    async fn unreachable_backend_yields_the_fallback_recipe() {
        let client = ScriptedClient {
            calls: AtomicUsize::new(0),
            reply: Err(|| AiError::Authentication("no key".into())),
        };
        let snack = generate(&client, &AlwaysOnline, &prefs("sweet", "vegan")).await;
        assert_eq!(snack.title, "Chia pudding with berries");
    }

    #[tokio::test]
    async fn unusable_response_yields_the_fallback_recipe() {
        let client = ScriptedClient {
            calls: AtomicUsize::new(0),
            reply: Ok("I'm sorry, I can only answer questions about cheese."),
        };
        let snack = generate(&client, &AlwaysOnline, &prefs("salty", "standard")).await;
        assert_eq!(snack.title, "Hummus with vegetables");
    }

    #[tokio::test]
    async fn usable_response_wins_over_the_fallback() {
        let client = ScriptedClient {
            calls: AtomicUsize::new(0),
            reply: Ok(r#"{"title":"Edamame","kcal":130,"protein":11,"fat":5,"carbohydrates":10,"fibre":4}"#),
        };
        let snack = generate(&client, &AlwaysOnline, &prefs("salty", "standard")).await;
        assert_eq!(snack.title, "Edamame");
        assert_eq!(snack.kcal, 130.0);
    }

    #[tokio::test]
    async fn offline_short_circuits_without_calling_the_backend() {
        let client = ScriptedClient {
            calls: AtomicUsize::new(0),
            reply: Ok(r#"{"title":"Should not be used"}"#),
        };
        let snack = generate(&client, &net::Offline, &prefs("light", "standard")).await;
        assert_eq!(snack.title, "Seasonal fruit bowl");
        assert_eq!(client.calls.load(Ordering::SeqCst), 0);
    }
}
