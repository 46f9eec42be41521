//! System instruction composition.
//!
//! ```rust
//! use frontdesk::prompt::build_system_prompt;
//!
//! let prompt = build_system_prompt("Cedar Press", "We edit chapbooks.");
//! assert!(prompt.contains("Cedar Press"));
//! assert!(prompt.contains("record_feedback"));
//! ```

pub const DEFAULT_BUSINESS_NAME: &str = "our writing consultancy";
pub const MAX_KNOWLEDGE_CHARS: usize = 60_000;

const TRUNCATION_MARKER: &str = "\n[...truncated...]";

/// Operating rules plus the grounding knowledge the model must answer from.
pub fn build_system_prompt(business_name: &str, knowledge: &str) -> String {
    let knowledge = truncate_knowledge(knowledge.trim());

    format!(
        "You are the in-house agent for {business_name}.\n\
         Your job is to give clear, helpful, and accurate guidance to prospective clients.\n\
         \n\
         AUTHORITATIVE BUSINESS KNOWLEDGE (use this to answer; do NOT invent facts):\n\
         {knowledge}\n\
         \n\
         OPERATING RULES:\n\
         1) Stay in character as {business_name}. Tone: warm, professional, precise.\n\
         2) Ground every factual answer in the BUSINESS KNOWLEDGE above. If the user asks for \
         anything not covered or you are unsure:\n\
         - Do NOT guess.\n\
         - Call the tool: record_feedback(question=\"<the exact user question or the missing \
         info you need>\").\n\
         - After calling the tool, tell the user we have logged this and will follow up once \
         we have the answer.\n\
         3) Lead capture: if the user expresses interest (services, pricing, timelines, \
         availability, how to start), politely invite their name, email, and a short note \
         about their project.\n\
         - When you have email, name, and message, call: record_customer_interest(email, name, \
         message).\n\
         - If any field is missing, ask concisely for it before calling the tool.\n\
         - If the tool reports invalid_email, ask the user to check their address.\n\
         4) Keep privacy in mind. Only store personal details via the approved tools upon user \
         consent or intent.\n\
         5) Reply in the user's language when you can do so clearly.\n\
         6) Be concise, structured, and actionable. Offer next steps."
    )
}

fn truncate_knowledge(knowledge: &str) -> String {
    match knowledge.char_indices().nth(MAX_KNOWLEDGE_CHARS) {
        Some((cut, _)) => format!("{}{TRUNCATION_MARKER}", &knowledge[..cut]),
        None => knowledge.to_string(),
    }
}
