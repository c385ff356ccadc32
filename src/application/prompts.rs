//! Prompt builders for the three pipeline stages.

use crate::domain::{Message, Metadata};

/// Builds the classification prompt for the detection stage.
pub fn detection_prompt(message: &Message, history: &[Message]) -> String {
    format!(
        "You are a fraud analyst. Decide whether the latest message is a scam attempt.\n\
         \n\
         Indicator categories to watch for:\n\
         - urgency or artificial deadlines\n\
         - requests for credentials, OTPs or PINs\n\
         - impersonation of banks, government agencies or support staff\n\
         - phishing links\n\
         - prize, lottery or cashback lures\n\
         - payment redirection or unusual payment channels\n\
         - threats of account blocking or legal action\n\
         - unusual grammar or spelling anomalies\n\
         \n\
         Conversation so far:\n{history}\n\
         \n\
         Latest message:\n{text}\n\
         \n\
         Respond ONLY with JSON:\n\
         {{\"is_scam\": true/false, \"confidence\": 0.0-1.0, \"scam_type\": \"...\", \
         \"reasoning\": \"...\", \"indicators_found\": [\"...\"]}}",
        history = render_history(history, "No previous messages"),
        text = message.text,
    )
}

/// Builds the persona prompt for the engagement stage.
pub fn engagement_prompt(
    scammer_message: &str,
    history: &[Message],
    metadata: &Metadata,
) -> String {
    format!(
        "You are Ramesh Kumar, a 62-year-old retired school teacher who is not \
         comfortable with technology. Someone is messaging you; you do not realize \
         they are a scammer. You want to be helpful and you are a little worried.\n\
         \n\
         Your goal is to keep the conversation going and get them to explain \
         themselves: which bank or company they are from, what exactly the \
         transaction is, and how they want you to verify or pay.\n\
         \n\
         Rules:\n\
         - Reply in {language}.\n\
         - Keep it SHORT: 2-3 sentences.\n\
         - Sound natural and slightly confused; small imperfections are fine.\n\
         - Never show suspicion, never mention scams, never break character.\n\
         - Output the reply text only, with no commentary around it.\n\
         \n\
         Conversation so far:\n{history}\n\
         \n\
         They just said: \"{scammer_message}\"",
        language = metadata.language(),
        history = render_history(history, "This is the first message"),
    )
}

/// Builds the extraction prompt over a full transcript.
pub fn extraction_prompt(transcript: &str) -> String {
    format!(
        "Extract fraud indicators from this conversation between a scammer and \
         a potential victim.\n\
         \n\
         Conversation:\n{transcript}\n\
         \n\
         Respond ONLY with JSON in exactly this shape, using empty arrays when \
         nothing was found:\n\
         {{\"bankAccounts\": [], \"upiIds\": [], \"phoneNumbers\": [], \
         \"phishingLinks\": [], \"emailAddresses\": []}}",
    )
}

/// Renders history as `sender: text` lines, oldest first.
fn render_history(history: &[Message], when_empty: &str) -> String {
    if history.is_empty() {
        return when_empty.to_string();
    }
    history
        .iter()
        .map(Message::transcript_line)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Renders the full transcript for extraction: history, then the latest
/// scammer message, then the agent's reply, in chronological order.
pub fn render_transcript(history: &[Message], latest: &Message, agent_reply: &str) -> String {
    let mut lines: Vec<String> = history.iter().map(Message::transcript_line).collect();
    lines.push(latest.transcript_line());
    lines.push(format!("user: {}", agent_reply));
    lines.join("\n")
}
