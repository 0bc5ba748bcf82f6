//! Ollama `/api/generate` client.
//!
//! The endpoint streams newline-delimited JSON objects, each carrying a
//! `response` text fragment; the fragments are accumulated into the final
//! reply. Lines that fail to parse are skipped — partial chunks and keep-
//! alive noise are normal in the stream.

use anyhow::{Context, Result, bail};
use futures_util::StreamExt;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::config::AdvisorConfig;

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
}

/// Send a prompt and accumulate the streamed reply, trimmed.
pub async fn generate(config: &AdvisorConfig, prompt: &str) -> Result<String> {
    let body = GenerateRequest {
        model: &config.model,
        prompt,
    };

    let client = reqwest::Client::new();
    let resp = client
        .post(&config.api_url)
        .json(&body)
        .send()
        .await
        .with_context(|| format!("requesting {}", config.api_url))?;

    let status = resp.status();
    if !status.is_success() {
        let text = resp.text().await.unwrap_or_default();
        bail!("ollama error: {status} {text}");
    }

    let mut stream = resp.bytes_stream();
    let mut pending = String::new();
    let mut reply = String::new();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.context("reading ollama stream")?;
        pending.push_str(&String::from_utf8_lossy(&chunk));
        while let Some(newline) = pending.find('\n') {
            let line: String = pending.drain(..=newline).collect();
            append_fragment(&line, &mut reply);
        }
    }
    append_fragment(&pending, &mut reply);

    debug!(chars = reply.len(), "accumulated model reply");
    Ok(reply.trim().to_string())
}

/// Forward a free-form chat message and return the reply verbatim.
pub async fn chat(config: &AdvisorConfig, message: &str) -> Result<String> {
    generate(config, message).await
}

fn append_fragment(line: &str, reply: &mut String) {
    let line = line.trim();
    if line.is_empty() {
        return;
    }
    let Ok(value) = serde_json::from_str::<Value>(line) else {
        return;
    };
    if let Some(fragment) = value.get("response").and_then(Value::as_str) {
        reply.push_str(fragment);
    }
}
