// src/classifier/prompt.rs
// Prompt construction for the classification and insight pipelines. All pure
// functions; the taxonomy and rules live only in the system prompt so the
// user prompt stays a thin carrier of the guest message and its context.

use super::types::ClassificationRequest;
use crate::llm::ChatMessage;
use crate::taxonomy::ServiceCategory;

/// Builds the classification system prompt: the category taxonomy, the hard
/// classification rules, and the exact JSON reply shape.
pub fn build_system_prompt() -> String {
    let mut prompt = String::new();

    prompt.push_str(
        "You are an AI-powered hotel service request classifier with advanced natural \
         language understanding. Analyze guest messages and decide whether service \
         tickets should be created.\n\n",
    );

    prompt.push_str("SERVICE CATEGORIES AND DEFINITIONS:\n");
    for category in ServiceCategory::ALL {
        prompt.push_str(&format!("- \"{}\": {}\n", category.key(), category.description()));
    }
    prompt.push('\n');

    prompt.push_str("CLASSIFICATION RULES:\n");
    prompt.push_str("1. ONLY create tickets for explicit service requests or problem reports\n");
    prompt.push_str(
        "2. NO tickets for: greetings, pleasantries, thank you messages, general questions \
         without service requests\n",
    );
    prompt.push_str(
        "3. Multiple categories ONLY when the guest explicitly mentions multiple distinct \
         services\n",
    );
    prompt.push_str("4. Generate a specific, actionable single-line message for staff per category\n");
    prompt.push_str("5. Assess urgency and priority from the context and language used\n");
    prompt.push_str("6. Estimate completion time from service complexity\n\n");

    prompt.push_str("URGENCY LEVELS:\n");
    prompt.push_str("- low: routine requests, non-urgent maintenance, general services\n");
    prompt.push_str("- medium: comfort issues, moderate problems, standard room service\n");
    prompt.push_str("- high: safety concerns, significant discomfort, urgent repairs\n");
    prompt.push_str("- urgent: emergencies, security issues, critical breakdowns\n\n");

    prompt.push_str("RESPONSE FORMAT (JSON only, no markdown):\n");
    prompt.push_str(
        "{\n  \"should_create_ticket\": boolean,\n  \"categories\": [\n    {\n      \
         \"category\": \"service_category_key\",\n      \"message\": \"Specific, actionable \
         message for staff\",\n      \"urgency\": \"urgency_level\"\n    }\n  ],\n  \
         \"confidence\": 0.0-1.0,\n  \"reasoning\": \"single-line explanation of the \
         classification decision\",\n  \"suggested_priority\": \"overall_priority_level\",\n  \
         \"estimated_completion_time\": \"time_estimate_or_null\"\n}\n\n",
    );

    prompt.push_str("EXAMPLES:\n");
    prompt.push_str("Input: \"Hello, good morning!\"\n");
    prompt.push_str(
        "Output: {\"should_create_ticket\": false, \"categories\": [], \"confidence\": 0.98, \
         \"reasoning\": \"Greeting without service request\", \"suggested_priority\": \"none\", \
         \"estimated_completion_time\": null}\n\n",
    );
    prompt.push_str("Input: \"I need coffee urgently for my meeting\"\n");
    prompt.push_str(
        "Output: {\"should_create_ticket\": true, \"categories\": [{\"category\": \
         \"service_fb\", \"message\": \"Guest requires urgent coffee delivery for business \
         meeting\", \"urgency\": \"high\"}], \"confidence\": 0.95, \"reasoning\": \"Explicit \
         urgent food/beverage request\", \"suggested_priority\": \"high\", \
         \"estimated_completion_time\": \"10-15 minutes\"}\n\n",
    );

    prompt.push_str(
        "Analyze ONLY explicit content. Generate intelligent, contextual responses. \
         Return valid JSON only.",
    );

    prompt
}

/// Builds the user prompt: the guest message plus optional identity context.
/// Never repeats the rules or the taxonomy.
pub fn build_user_prompt(request: &ClassificationRequest) -> String {
    let mut prompt = format!("Guest Message: '{}'", request.guest_message);

    if let Some(guest_id) = &request.guest_id {
        prompt.push_str(&format!("\nGuest ID: {}", guest_id));
    }
    if let Some(room_number) = &request.room_number {
        prompt.push_str(&format!("\nRoom Number: {}", room_number));
    }

    prompt.push_str("\n\nClassify this guest message and provide the JSON response:");
    prompt
}

/// The full role-tagged conversation for a primary classification call.
pub fn classification_messages(request: &ClassificationRequest) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(build_system_prompt()),
        ChatMessage::user(build_user_prompt(request)),
    ]
}

/// Builds the repair prompt: the malformed reply verbatim plus the original
/// guest message, asking for a corrected pure-JSON answer.
pub fn build_repair_prompt(broken: &str, guest_message: &str) -> String {
    let mut prompt = String::new();

    prompt.push_str("The following JSON response is malformed:\n");
    prompt.push_str(broken);
    prompt.push_str("\n\nOriginal guest message: \"");
    prompt.push_str(guest_message);
    prompt.push_str("\"\n\n");
    prompt.push_str(
        "Provide a corrected, valid JSON response for this hotel service classification. \
         Return ONLY valid JSON without any markdown or explanation.",
    );

    prompt
}

pub fn repair_messages(broken: &str, guest_message: &str) -> Vec<ChatMessage> {
    vec![ChatMessage::user(build_repair_prompt(broken, guest_message))]
}

/// Builds the open-ended insight prompt. Unlike classification this requests
/// an unconstrained analytical payload; unknown keys are expected.
pub fn build_insight_prompt(guest_message: &str) -> String {
    let mut prompt = String::new();

    prompt.push_str(&format!("GUEST MESSAGE: \"{}\"\n\n", guest_message));
    prompt.push_str(
        "Analyze this hotel guest message and provide detailed psychological and \
         operational insights for the staff serving this guest.\n\n",
    );
    prompt.push_str("Provide insights in pure JSON format (no markdown):\n");
    prompt.push_str("{\n");
    prompt.push_str("    \"sentiment\": \"overall sentiment\",\n");
    prompt.push_str("    \"emotion_detected\": \"primary emotion\",\n");
    prompt.push_str("    \"urgency_indicators\": [\"urgency signals in the message\"],\n");
    prompt.push_str("    \"service_complexity\": \"assessed complexity level\",\n");
    prompt.push_str("    \"guest_profile\": \"inferred guest characteristics\",\n");
    prompt.push_str("    \"communication_style\": \"analyzed communication pattern\",\n");
    prompt.push_str("    \"implicit_needs\": [\"unstated requirements\"],\n");
    prompt.push_str("    \"recommended_approach\": \"suggested staff approach\",\n");
    prompt.push_str("    \"contextual_hints\": [\"relevant context clues\"]\n");
    prompt.push_str("}\n\n");
    prompt.push_str("Return valid JSON only.");

    prompt
}

pub fn insight_messages(guest_message: &str) -> Vec<ChatMessage> {
    vec![ChatMessage::user(build_insight_prompt(guest_message))]
}
