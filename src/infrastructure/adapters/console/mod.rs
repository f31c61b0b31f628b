//! Console presentation of aggregated results

use crate::domain::entities::{AggregatedResponse, ProviderId, ProviderResult};
use crate::infrastructure::llm::providers::placeholder;

/// Shown for token counts the provider did not report
const UNKNOWN: &str = "—";

/// Renders result cards as plain text
pub struct ConsoleRenderer {
    width: usize,
}

impl ConsoleRenderer {
    pub fn new() -> Self {
        Self { width: 60 }
    }

    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width.max(20);
        self
    }

    /// Status lines printed while the providers are working
    pub fn render_loading(&self, providers: &[ProviderId]) -> String {
        providers
            .iter()
            .map(|id| format!("[{}] Generating response...", id.label()))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// One card per result, in response order
    pub fn render_response(&self, response: &AggregatedResponse) -> String {
        let mut out = format!("Prompt: {}\n", response.prompt);
        for result in &response.results {
            out.push('\n');
            out.push_str(&self.render_result(result));
        }
        out
    }

    pub fn render_result(&self, result: &ProviderResult) -> String {
        let rule = "-".repeat(self.width);
        let mut lines = vec![
            rule.clone(),
            format!("{} ({})", result.id.label(), result.id.as_str()),
            rule.clone(),
        ];

        match (&result.error, &result.text) {
            (Some(error), _) => lines.push(format!("ERROR: {}", error)),
            (None, Some(text)) => lines.extend(text.lines().map(str::to_string)),
            (None, None) => lines.push(placeholder(result.id)),
        }

        lines.push(format!(
            "Tokens: used {} / remaining {}",
            count(result.tokens_used),
            count(result.tokens_remaining)
        ));
        lines.push(rule);
        lines.join("\n") + "\n"
    }
}

impl Default for ConsoleRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn count(value: Option<u64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| UNKNOWN.to_string())
}
