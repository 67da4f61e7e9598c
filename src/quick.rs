//! Short-answer replies.
//!
//! The knowledge engine's short-answer endpoint replies with one line of
//! plain text, or with one of two fixed sentences when it has nothing to say.

/// Reply when the engine has no short answer for a query.
pub const NO_SHORT_ANSWER: &str = "No short answer available";

/// Reply when the engine could not parse the query.
pub const NOT_UNDERSTOOD: &str = "Wolfram|Alpha did not understand your input";

/// Longest query echoed back in a hint.
const HINT_QUERY_CHARS: usize = 35;

/// Answer some queries without asking upstream.
pub fn canned(query: &str) -> Option<&'static str> {
    match query.trim() {
        "mafs" | "maths" => Some("2+2 = 4-1 = 3"),
        _ => None,
    }
}

/// Turn a short-answer reply into the message shown to the user.
///
/// `prefix` is the command prefix used in the hint pointing at the full query.
pub fn interpret(query: &str, reply: &str, prefix: &str) -> String {
    match reply.trim() {
        NO_SHORT_ANSWER => format!(
            "{}. Hint: try doing `{}wolfram {}` in a bot commands channel.",
            NO_SHORT_ANSWER,
            prefix,
            shorten(query)
        ),
        NOT_UNDERSTOOD => "Sorry, I don't understand what you said.".to_string(),
        _ => reply.to_string(),
    }
}

fn shorten(query: &str) -> String {
    if query.chars().count() > HINT_QUERY_CHARS {
        let head: String = query.chars().take(HINT_QUERY_CHARS).collect();
        format!("{}…", head)
    } else {
        query.to_string()
    }
}
