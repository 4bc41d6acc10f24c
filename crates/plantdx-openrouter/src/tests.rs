//! Snapshot tests for the OpenRouter client

#[cfg(test)]
mod snapshot_tests {
    use crate::{OpenRouterClient, OpenRouterConfig, VisionProvider};
    use insta::assert_yaml_snapshot;

    #[test]
    fn test_config_snapshot() {
        let config = OpenRouterConfig::new("test_api_key_redacted");

        assert_yaml_snapshot!(config, @r#"
        api_key: test_api_key_redacted
        api_url: "https://openrouter.ai/api/v1"
        model: google/gemini-2.0-flash-001
        app_url: "http://localhost"
        app_title: Smart Agriculture App
        "#);
    }

    #[test]
    fn test_completions_url() {
        let mut config = OpenRouterConfig::new("key");
        assert_eq!(config.completions_url(), "https://openrouter.ai/api/v1/chat/completions");

        config.api_url = "http://127.0.0.1:8080/v1/".to_string();
        assert_eq!(config.completions_url(), "http://127.0.0.1:8080/v1/chat/completions");
    }

    #[test]
    fn test_model_override() {
        let client = OpenRouterClient::new(OpenRouterConfig::new("key"))
            .unwrap()
            .with_model("openai/gpt-4o-mini");

        assert_yaml_snapshot!(client.model_id(), @"openai/gpt-4o-mini");
    }
}
