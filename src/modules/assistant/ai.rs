//! Gemini client for the AI co-pilot.
//!
//! The call is blocking — ALWAYS run in a background thread!
//! From the caller's point of view it never fails: a missing credential,
//! a transport error or a malformed response all come back as localized
//! fallback text, so a chat turn always resolves.

use crate::config::Language;
use crate::i18n;
use anyhow::{Context, Result};
use std::time::Duration;

const TIMEOUT_SECS: u64 = 60;
const ENDPOINT: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent";

/// Produce the model reply for one chat turn.
/// `history` is the rolling window of prior turns, oldest first,
/// already formatted as `"<role>: <text>"` lines.
pub fn generate(api_key: &str, message: &str, history: &[String], lang: Language) -> String {
    let s = i18n::get_strings(lang);

    if api_key.trim().is_empty() {
        return s.ai_missing_key.to_string();
    }

    let prompt = build_prompt(message, history, lang);

    match call_gemini(api_key, &prompt) {
        Ok(text) if text.trim().is_empty() => s.ai_empty.to_string(),
        Ok(text) => text,
        Err(err) => {
            // Best-effort diagnostic; the user only ever sees the apology
            eprintln!("AI request failed: {:#}", err);
            s.ai_error.to_string()
        }
    }
}

fn build_prompt(message: &str, history: &[String], lang: Language) -> String {
    let language_instruction = match lang {
        Language::Chinese => "Please reply in Traditional Chinese (繁體中文).",
        Language::English => "Please reply in English.",
    };

    format!(
        r#"System Instruction: You are an expert car infotainment assistant for Android-based head units.
Your goal is to help the user manage their in-car system.
{language_instruction}

The user might ask for recommended apps. Here are some good ones for Android head units:
1. Nova Launcher (for better UI).
2. VLC for Android (for playing local movies).
3. Torque Pro (for OBD2 diagnostics).
4. Spotify/YouTube Music.
5. Waze (alternative to Google Maps).

If the user asks technical questions about clearing cache or system settings, explain that the shell cannot do it directly, but they can use the "Maintenance" tab to see the ADB commands.

Keep answers short, concise, and helpful for a driver who might be glancing at the screen.

Conversation History:
{history}

User: {message}"#,
        history = history.join("\n"),
    )
}

fn call_gemini(api_key: &str, prompt: &str) -> Result<String> {
    let agent = ureq::AgentBuilder::new()
        .timeout(Duration::from_secs(TIMEOUT_SECS))
        .build();

    let body = serde_json::json!({
        "contents": [{"parts": [{"text": prompt}]}]
    });

    let resp = agent
        .post(ENDPOINT)
        .set("x-goog-api-key", api_key)
        .set("content-type", "application/json")
        .send_string(&serde_json::to_string(&body)?);

    match resp {
        Ok(resp) => {
            let json: serde_json::Value = serde_json::from_reader(resp.into_reader())
                .context("Failed to parse Gemini response")?;
            json["candidates"][0]["content"]["parts"][0]["text"]
                .as_str()
                .map(|s| s.to_string())
                .context("Unexpected Gemini response format")
        }
        Err(ureq::Error::Status(code, resp)) => {
            let body = resp.into_string().unwrap_or_default();
            let msg: String = body.chars().take(200).collect();
            anyhow::bail!("Gemini API error {}: {}", code, msg)
        }
        Err(ureq::Error::Transport(e)) => {
            anyhow::bail!("Network error (Gemini): {}", e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_short_circuits() {
        // No network involved: the fixed localized string comes straight back
        let out = generate("", "hello", &[], Language::English);
        assert_eq!(
            out,
            i18n::get_strings(Language::English).ai_missing_key
        );
        let out = generate("   ", "hello", &[], Language::Chinese);
        assert_eq!(out, i18n::get_strings(Language::Chinese).ai_missing_key);
    }

    #[test]
    fn test_prompt_carries_language_directive() {
        let en = build_prompt("hi", &[], Language::English);
        assert!(en.contains("Please reply in English."));
        let zh = build_prompt("hi", &[], Language::Chinese);
        assert!(zh.contains("Traditional Chinese"));
    }

    #[test]
    fn test_prompt_embeds_history_and_message() {
        let history = vec![
            "User: best music app?".to_string(),
            "Assistant: Try Spotify.".to_string(),
        ];
        let prompt = build_prompt("and for maps?", &history, Language::English);
        let u = prompt.find("User: best music app?").unwrap();
        let a = prompt.find("Assistant: Try Spotify.").unwrap();
        let m = prompt.find("User: and for maps?").unwrap();
        // Oldest first, latest user text last
        assert!(u < a && a < m);
        assert!(prompt.contains("Maintenance"));
    }
}
