//! Chatbot intent routing: greetings, IPC section questions, crime descriptions and legal FAQs.

use crate::classifier;
use crate::faq::KnowledgeBase;
use crate::sections;
use crate::shared::ChatReply;
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;

const EMPTY_QUERY_REPLY: &str = "Please ask a question about your case or IPC sections.";
const GREETING_REPLY: &str = "Hello! I'm your FIR assistant. How can I help you today?";
const MORE_DETAIL_REPLY: &str = "Please provide a more detailed description of the case for analysis.";
const NO_SECTIONS_REPLY: &str = "I couldn't determine any applicable IPC sections for this case description. Please provide more details or consult with a legal professional.";
const IPC_OVERVIEW_REPLY: &str = "The Indian Penal Code (IPC) is the official criminal code of India. It covers all substantive aspects of criminal law. You can ask me about specific sections like 'What is IPC 302?' or type 'list common IPC sections' to see frequently referenced sections.";
const FALLBACK_REPLY: &str = "I don't understand that query. You can ask about filing an FIR, information about specific IPC sections, or describe a situation to get relevant IPC sections.";
const HELP_REPLY: &str = "I can help you with the following:\n\n\
1️⃣ Answer common questions about filing an FIR\n   Example: 'How do I file an FIR?'\n\n\
2️⃣ Get information about IPC sections\n   Example: 'What is IPC section 302?'\n\n\
3️⃣ List commonly referenced IPC sections\n   Example: 'List common IPC sections'\n\n\
4️⃣ Analyze a case description to find applicable IPC sections\n   Examples:\n\
   - 'Analyze this complaint: My phone was stolen yesterday'\n\
   - 'Someone broke into my house and stole valuables'\n\
   - 'I was assaulted by a group of people yesterday'\n\
   - 'My neighbor threatened me'\n\n\
Just describe your situation, and I'll identify which IPC sections might apply!";

static GREETING_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:hello|hi|hey|greetings|good morning|good afternoon|good evening|howdy)\b")
        .expect("greeting pattern is valid")
});

/// "302", "ipc 376", "section 354d", "indian penal code section 420".
static SECTION_CODE_RES: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"^(?:ipc\s*)?([0-9]{1,3}[a-z]?)$",
        r"^(?:ipc|indian penal code)?\s*section\s*([0-9]{1,3}[a-z]?)$",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("section code pattern is valid"))
    .collect()
});

static SECTION_INFO_RES: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?:what is|tell me about|information about|explain|details of|meaning of) (?:section|ipc)(?: section)? ([0-9a-z]+)$",
        r"what does (?:section|ipc)(?: section)? ([0-9a-z]+) (?:mean|say|state)",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("section info pattern is valid"))
    .collect()
});

/// Explicit analysis requests; the capture is the description to classify.
static ANALYZE_RES: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"analyze (?:this|my) complaint[:\s]+(.*)",
        r"what sections apply to[:\s]+(.*)",
        r"which ipc sections apply to[:\s]+(.*)",
        r"legal sections for[:\s]+(.*)",
        r"(?:my|the) case (?:is|involves|about)[:\s]+(.*)",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("analyze pattern is valid"))
    .collect()
});

/// Descriptions shorter than this (in characters) are sent back for more detail.
const MIN_DESCRIPTION_CHARS: usize = 10;

static LIST_SECTIONS_RES: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?:list|show|tell me about|what are)(?: the)? (?:common|popular|important|all) (?:ipc|indian penal code) sections$",
        r"(?:list|show|tell me)(?: the)? (?:ipc|indian penal code) sections$",
        r"(?:what|which) (?:ipc|indian penal code) sections (?:are there|exist|are available)$",
        r"(?:give me|show me) (?:a list of|some) (?:ipc|indian penal code) sections$",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("list sections pattern is valid"))
    .collect()
});

static SECTION_MENTION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b([0-9]{1,3}[a-z]?)\b").expect("section mention pattern is valid"));

/// What a chat query is asking for, in routing priority order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Empty,
    AnalyzeComplaint(String),
    CaseDescription,
    Greeting,
    SectionInfo(String),
    ListSections,
    Faq,
    Help,
    IpcGeneral(Option<String>),
    Unknown,
}

/// Answers chat queries from the IPC catalog, the keyword classifier and the FAQ knowledge base.
pub struct ChatAssistant {
    faq: Arc<KnowledgeBase>,
}

impl ChatAssistant {
    pub fn new(faq: Arc<KnowledgeBase>) -> Self {
        Self { faq }
    }

    pub fn knowledge_base(&self) -> &KnowledgeBase {
        &self.faq
    }

    pub fn intent(&self, query: &str) -> Intent {
        let normalized = normalize(query);
        if normalized.is_empty() {
            return Intent::Empty;
        }
        if let Some(description) = first_capture(&ANALYZE_RES, &normalized) {
            return Intent::AnalyzeComplaint(description.trim().to_string());
        }
        if classifier::is_case_description(&normalized) {
            return Intent::CaseDescription;
        }
        if GREETING_RE.is_match(&normalized) {
            return Intent::Greeting;
        }
        if let Some(code) = first_capture(&SECTION_CODE_RES, &normalized) {
            return Intent::SectionInfo(code);
        }
        if let Some(code) = first_capture(&SECTION_INFO_RES, &normalized) {
            return Intent::SectionInfo(code);
        }
        if LIST_SECTIONS_RES.iter().any(|re| re.is_match(&normalized)) {
            return Intent::ListSections;
        }
        if self.faq.best_match(&normalized).is_some() {
            return Intent::Faq;
        }
        if normalized.contains("help") || normalized.contains("assist") {
            return Intent::Help;
        }
        if normalized.contains("ipc") || normalized.contains("section") || normalized.contains("penal code") {
            let code = SECTION_MENTION_RE
                .captures(&normalized)
                .and_then(|c| c.get(1))
                .map(|m| m.as_str().to_string());
            return Intent::IpcGeneral(code);
        }
        Intent::Unknown
    }

    pub fn respond(&self, query: &str) -> ChatReply {
        let intent = self.intent(query);
        tracing::debug!(target: "fir::chat", ?intent, "routed chat query");
        match intent {
            Intent::Empty => ChatReply::text(EMPTY_QUERY_REPLY),
            Intent::AnalyzeComplaint(description) if description.chars().count() < MIN_DESCRIPTION_CHARS => {
                ChatReply::text(MORE_DETAIL_REPLY)
            }
            Intent::AnalyzeComplaint(description) => analyze(&description),
            Intent::CaseDescription => analyze(query),
            Intent::Greeting => ChatReply::text(GREETING_REPLY),
            Intent::SectionInfo(code) | Intent::IpcGeneral(Some(code)) => section_info(&code),
            Intent::ListSections => ChatReply::text(sections::list_common()),
            Intent::Faq => self.faq_answer(query),
            Intent::Help => ChatReply::text(HELP_REPLY),
            Intent::IpcGeneral(None) => ChatReply::text(IPC_OVERVIEW_REPLY),
            Intent::Unknown => ChatReply::text(FALLBACK_REPLY),
        }
    }

    fn faq_answer(&self, query: &str) -> ChatReply {
        match self.faq.best_match(&normalize(query)) {
            Some(m) => ChatReply::with_data(
                m.answer,
                serde_json::json!({ "source": "faq", "keyword": m.keyword }),
            ),
            None => ChatReply::text(FALLBACK_REPLY),
        }
    }
}

/// Lowercased and trimmed, with trailing sentence punctuation removed.
fn normalize(query: &str) -> String {
    query
        .trim()
        .trim_end_matches(['?', '.', '!'])
        .trim()
        .to_lowercase()
}

fn first_capture(patterns: &[Regex], text: &str) -> Option<String> {
    patterns
        .iter()
        .find_map(|re| re.captures(text))
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

fn section_info(code: &str) -> ChatReply {
    tracing::info!(target: "fir::chat", code, "IPC section query");
    match sections::lookup(code) {
        Some(section) => ChatReply::with_data(
            sections::describe(section),
            serde_json::json!({ "section": section }),
        ),
        None => ChatReply::text(sections::not_found(code)),
    }
}

fn analyze(query: &str) -> ChatReply {
    let matches = classifier::classify(query);
    if matches.is_empty() {
        return ChatReply::text(NO_SECTIONS_REPLY);
    }
    ChatReply::with_data(
        classifier::render(&matches),
        serde_json::json!({ "analysis": { "sections": matches } }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assistant() -> ChatAssistant {
        let kb = KnowledgeBase::from_json_str(
            r#"[
                {"keywords": ["fir"], "answer": "File an FIR at..."},
                {"keywords": ["bail"], "answer": "Bail procedure is..."}
            ]"#,
        )
        .unwrap();
        ChatAssistant::new(Arc::new(kb))
    }

    #[test]
    fn routes_intents_in_priority_order() {
        let bot = assistant();
        assert_eq!(bot.intent("   "), Intent::Empty);
        assert_eq!(bot.intent("Someone stole my phone yesterday"), Intent::CaseDescription);
        assert_eq!(bot.intent("Hello there"), Intent::Greeting);
        assert_eq!(bot.intent("302"), Intent::SectionInfo("302".to_string()));
        assert_eq!(bot.intent("IPC 376"), Intent::SectionInfo("376".to_string()));
        assert_eq!(bot.intent("section 354d"), Intent::SectionInfo("354d".to_string()));
        assert_eq!(bot.intent("What is IPC section 302?"), Intent::SectionInfo("302".to_string()));
        assert_eq!(bot.intent("list common ipc sections"), Intent::ListSections);
        assert_eq!(bot.intent("How do I file an FIR?"), Intent::Faq);
        assert_eq!(bot.intent("I need help"), Intent::Help);
        assert_eq!(bot.intent("tell me about the ipc"), Intent::IpcGeneral(None));
        assert_eq!(bot.intent("blah blah"), Intent::Unknown);
    }

    #[test]
    fn explicit_analysis_requests_capture_the_description() {
        let bot = assistant();
        assert_eq!(
            bot.intent("Analyze this complaint: my phone went missing from my bag"),
            Intent::AnalyzeComplaint("my phone went missing from my bag".to_string())
        );
        assert_eq!(
            bot.intent("my case is about: a man took my bike"),
            Intent::AnalyzeComplaint("about: a man took my bike".to_string())
        );
        assert_eq!(
            bot.intent("Which IPC sections apply to: a thief stole my bike?"),
            Intent::AnalyzeComplaint("a thief stole my bike".to_string())
        );
    }

    #[test]
    fn explicit_analysis_classifies_the_capture() {
        let bot = assistant();
        let reply = bot.respond("analyze my complaint: my neighbour stole my bicycle");
        let data = reply.data.unwrap();
        assert_eq!(data["analysis"]["sections"][0]["section_code"], "379");

        let reply = bot.respond("analyze this complaint: my phone went missing from my bag");
        assert_eq!(reply.text, NO_SECTIONS_REPLY);
    }

    #[test]
    fn short_analysis_request_asks_for_detail() {
        assert_eq!(assistant().respond("analyze this complaint: theft").text, MORE_DETAIL_REPLY);
        assert_eq!(assistant().respond("legal sections for:").text, MORE_DETAIL_REPLY);
    }

    #[test]
    fn greeting_needs_a_whole_word() {
        assert_ne!(assistant().intent("this is about the ipc"), Intent::Greeting);
    }

    #[test]
    fn section_question_returns_details() {
        let reply = assistant().respond("What is IPC section 302?");
        assert!(reply.text.starts_with("Information about IPC Section 302:"));
        let data = reply.data.unwrap();
        assert_eq!(data["section"]["code"], "302");
        assert_eq!(data["section"]["name"], "Punishment for murder");
    }

    #[test]
    fn unknown_section_lists_alternatives() {
        let reply = assistant().respond("ipc 999");
        assert!(reply.text.contains("couldn't find information about IPC section 999"));
        assert!(reply.data.is_none());
    }

    #[test]
    fn crime_description_is_analyzed() {
        let reply = assistant().respond("Someone stole my phone yesterday");
        assert!(reply.text.contains("Section 379: Punishment for theft (Relevance: High)"));
        let data = reply.data.unwrap();
        assert_eq!(data["analysis"]["sections"][0]["section_code"], "379");
        assert_eq!(data["analysis"]["sections"][0]["keywords_matched"][0], "stole");
    }

    #[test]
    fn unmapped_crime_has_no_sections() {
        let reply = assistant().respond("there was a break-in at my house");
        assert_eq!(reply.text, NO_SECTIONS_REPLY);
    }

    #[test]
    fn faq_answer_is_tagged() {
        let reply = assistant().respond("How do I file an FIR?");
        assert_eq!(reply.text, "File an FIR at...");
        let data = reply.data.unwrap();
        assert_eq!(data["source"], "faq");
        assert_eq!(data["keyword"], "fir");
    }

    #[test]
    fn figurative_crime_words_fall_through() {
        let reply = assistant().respond("I watched a movie where a man was murdered");
        assert_eq!(reply.text, FALLBACK_REPLY);
    }

    #[test]
    fn listing_and_overview() {
        let bot = assistant();
        assert!(bot.respond("show me some ipc sections").text.starts_with("Here are some commonly referenced IPC sections"));
        assert_eq!(bot.respond("tell me about the ipc").text, IPC_OVERVIEW_REPLY);
        assert_eq!(bot.respond("").text, EMPTY_QUERY_REPLY);
    }
}
