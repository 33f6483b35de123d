//! Keyword classifier mapping crime descriptions to IPC sections.
//!
//! A query is treated as a case description when it names a crime as a whole word and does not
//! use the word figuratively ("this traffic is killing me"). Descriptions are then matched against
//! a direct keyword table: exact tokens score 0.85, near-miss spellings of longer keywords 0.75.

use crate::faq::levenshtein;
use crate::sections::{self, IpcSection};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

const EXACT_CONFIDENCE: f32 = 0.85;
const FUZZY_CONFIDENCE: f32 = 0.75;
const CONFIDENCE_THRESHOLD: f32 = 0.30;
const MIN_SIMILARITY: f32 = 0.7;
const MAX_RESULTS: usize = 3;
/// Keywords must be longer than this for fuzzy matching; query words at least this long.
const FUZZY_MIN_LEN: usize = 5;

/// Phrases that use crime words without describing a crime.
const FIGURATIVE_EXPRESSIONS: &[&str] = &[
    "killing me", "killing time", "killing it", "killed it", "killing the game",
    "watched a movie", "saw a film", "read a book", "in a movie", "in a book",
    "in a novel", "in a story", "in a game", "video game", "playing a game",
    "hypothetically", "if someone were to", "what would happen if",
    "what if", "in theory", "theoretically", "in a hypothetical",
    "beauty", "beautiful", "gorgeous", "stunning", "amazing", "awesome",
    "metaphorically", "figuratively", "not literally",
];

/// Subset of figurative phrases for which a murder section is always dropped.
const FIGURATIVE_KILLING: &[&str] = &["killing me", "killing time", "killed it", "killing it"];

const CASE_KEYWORDS: &[&str] = &[
    // violence
    "murder", "murdered", "murderer", "murderd", "murdred",
    "kill", "killed", "killing", "killer", "homicide", "manslaughter",
    "stab", "stabbed", "stabbing", "stabing", "stabed", "stabd",
    "shoot", "shot", "shooting", "strangle", "strangled", "strangling",
    "poison", "poisoned", "poisoning", "beat to death", "beaten to death",
    // physical harm
    "assault", "assaulted", "assaulting", "asault", "asaulted",
    "attack", "attacked", "attacking", "beat", "beaten", "beating",
    "hit", "hitting", "slap", "slapped", "slapping", "punch", "punched",
    "kick", "kicked", "kicking", "wound", "wounded", "wounding",
    "hurt", "hurting", "injury", "injured", "injuring", "harm", "harmed",
    // property
    "theft", "thief", "thieves", "theif", "theift", "steal", "stole", "stolen", "stealing",
    "robbery", "robbed", "robbing", "roberry", "robed", "burglary", "burglar",
    "broke into", "breaking in", "break-in", "shoplifting", "shoplifted",
    "snatch", "snatched", "snatching", "pickpocket", "pickpocketed",
    // sexual
    "rape", "raped", "raping", "sexual assault", "sexually assaulted",
    "molest", "molested", "molesting", "sexual harassment", "sexually harassed",
    "indecent", "obscene", "lewd", "voyeurism", "stalking", "stalked",
    // fraud
    "fraud", "fraudulent", "frauded", "cheat", "cheated", "cheating", "cheeted", "cheeting",
    "deceive", "deceived", "deceiving", "scam", "scammed", "scamming",
    "forge", "forged", "forging", "forgery", "counterfeit", "counterfeited",
    "impersonate", "impersonated", "impersonating", "identity theft",
    // other
    "kidnap", "kidnapped", "kidnapping", "kidnaped", "kidnapin", "abduct", "abducted",
    "threat", "threatened", "threatening", "blackmail", "blackmailed", "extort", "extorted",
    "bribe", "bribed", "bribing", "corruption", "corrupt", "corrupted",
    "trespass", "trespassed", "trespassing", "vandalize", "vandalized",
    "defame", "defamed", "defaming", "slander", "slandered", "libel",
    "abuse", "abused", "abusing", "harass", "harassed", "harassing", "harasment", "harased",
    "accident", "damage", "damaged", "damaging",
];

/// Common misspelling of "harassing" that is accepted even though it is not a whole-word keyword.
const HARASSING_MISSPELLING: &str = "harrasing";

/// Direct keyword -> section table, scanned in order.
const DIRECT_CRIMES: &[(&str, &str)] = &[
    ("murder", "302"), ("murdered", "302"), ("murderer", "302"), ("murderd", "302"),
    ("murdred", "302"), ("killed", "302"), ("killing", "302"), ("homicide", "302"),
    ("manslaughter", "304"),
    ("assault", "323"), ("assaulted", "323"), ("assaulting", "323"), ("asault", "323"),
    ("asaulted", "323"), ("attacked", "323"), ("beat", "323"), ("beaten", "323"),
    ("hit", "323"), ("slapped", "323"), ("punched", "323"), ("kicked", "323"),
    ("hurt", "323"), ("injury", "323"), ("injured", "323"), ("wound", "323"), ("wounded", "323"),
    ("stab", "324"), ("stabbed", "324"), ("stabbing", "324"), ("stabing", "324"),
    ("stabed", "324"), ("stabd", "324"), ("knife", "324"),
    ("theft", "379"), ("thief", "379"), ("theif", "379"), ("theift", "379"),
    ("stole", "379"), ("stolen", "379"), ("stealing", "379"),
    ("robbery", "392"), ("robbed", "392"), ("robbing", "392"), ("roberry", "392"), ("robed", "392"),
    ("rape", "376"), ("raped", "376"), ("raping", "376"), ("sexual", "376"),
    ("molest", "376"), ("molested", "376"),
    ("cheat", "420"), ("cheated", "420"), ("cheating", "420"), ("cheeted", "420"),
    ("cheeting", "420"), ("fraud", "420"), ("fraudulent", "420"), ("scam", "420"), ("scammed", "420"),
    ("kidnap", "363"), ("kidnapped", "363"), ("kidnapping", "363"), ("kidnaped", "363"),
    ("kidnapin", "363"), ("abduct", "363"), ("abducted", "363"),
    ("defame", "499"), ("defamed", "499"), ("defaming", "499"), ("slander", "499"), ("slandered", "499"),
    ("harass", "354D"), ("harassed", "354D"), ("harassing", "354D"), ("harasment", "354D"),
    ("harased", "354D"), ("stalking", "354D"), ("stalked", "354D"),
    ("threat", "506"), ("threatened", "506"), ("threatening", "506"), ("blackmail", "506"),
    ("intimidate", "506"), ("intimidated", "506"),
];

/// Token-level spelling corrections applied before direct matching.
const MISSPELLINGS: &[(&str, &str)] = &[
    ("muder", "murder"), ("mudered", "murdered"), ("murderd", "murdered"), ("murdred", "murdered"),
    ("homocide", "homicide"), ("homocid", "homicide"), ("killd", "killed"), ("kiled", "killed"),
    ("asault", "assault"), ("asaulted", "assaulted"), ("asaulting", "assaulting"),
    ("atack", "attack"), ("atacked", "attacked"), ("beeting", "beating"), ("beet", "beat"),
    ("hiting", "hitting"), ("hited", "hit"),
    ("stabing", "stabbing"), ("stabed", "stabbed"), ("stabd", "stabbed"), ("nife", "knife"),
    ("theif", "thief"), ("theift", "theft"), ("steeling", "stealing"), ("stoled", "stolen"),
    ("roberry", "robbery"), ("robed", "robbed"), ("robing", "robbing"),
    ("harasment", "harassment"), ("harased", "harassed"), ("harrasing", "harassing"),
    ("slanderd", "slandered"),
    ("cheeted", "cheated"), ("cheeting", "cheating"), ("frauded", "defrauded"),
    ("scamed", "scammed"), ("deceved", "deceived"),
    ("kidnaped", "kidnapped"), ("kidnapin", "kidnapping"),
    ("sexualy", "sexually"),
    ("blackmaled", "blackmailed"), ("threatend", "threatened"), ("threatning", "threatening"),
    ("signatur", "signature"),
    ("tresspas", "trespass"), ("tresspased", "trespassed"),
    ("damagd", "damaged"), ("destroyd", "destroyed"), ("vandalizd", "vandalized"),
];

/// Query words never considered for fuzzy matching.
const STOP_WORDS: &[&str] = &[
    "with", "this", "that", "then", "than", "they", "them", "their", "there", "these", "those",
    "some", "from", "have", "what", "when", "where", "which", "while", "about", "after", "before",
    "during", "under", "above", "below", "between", "through", "today", "tomorrow", "yesterday",
    "medium", "media", "online", "person", "people", "neighbor",
];

static CASE_KEYWORD_RE: Lazy<Regex> = Lazy::new(|| {
    let alternation = CASE_KEYWORDS
        .iter()
        .map(|k| regex::escape(k))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"\b(?:{})\b", alternation)).expect("case keyword pattern is valid")
});

/// One applicable section with the evidence that selected it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionMatch {
    pub section_code: String,
    pub section_name: String,
    pub section_description: String,
    pub confidence: f32,
    pub keywords_matched: Vec<String>,
    pub relevance: String,
}

impl SectionMatch {
    fn exact(section: &IpcSection, keyword: &str) -> Self {
        Self::build(
            section,
            EXACT_CONFIDENCE,
            keyword,
            format!(
                "This section applies because your description contains '{}', which is directly related to {}.",
                keyword, section.name
            ),
        )
    }

    fn similar(section: &IpcSection, word: &str, keyword: &str) -> Self {
        Self::build(
            section,
            FUZZY_CONFIDENCE,
            word,
            format!(
                "This section applies because your description contains '{}', which is similar to '{}' and related to {}.",
                word, keyword, section.name
            ),
        )
    }

    fn build(section: &IpcSection, confidence: f32, matched: &str, relevance: String) -> Self {
        Self {
            section_code: section.code.to_string(),
            section_name: section.name.to_string(),
            section_description: section.description.to_string(),
            confidence,
            keywords_matched: vec![matched.to_string()],
            relevance,
        }
    }

    /// "High" above 0.7, "Moderate" above 0.5, otherwise "Low".
    pub fn relevance_label(&self) -> &'static str {
        if self.confidence > 0.7 {
            "High"
        } else if self.confidence > 0.5 {
            "Moderate"
        } else {
            "Low"
        }
    }
}

/// True when `query` reads like a report of a crime rather than figurative speech.
pub fn is_case_description(query: &str) -> bool {
    let lowered = query.to_lowercase();
    if let Some(expr) = FIGURATIVE_EXPRESSIONS.iter().find(|e| lowered.contains(*e)) {
        tracing::debug!(target: "fir::classifier", expression = %expr, "figurative expression");
        return false;
    }
    if lowered.contains(HARASSING_MISSPELLING) {
        return true;
    }
    CASE_KEYWORD_RE.is_match(&lowered)
}

/// Lowercases, strips punctuation, splits on whitespace and corrects common misspellings.
pub fn preprocess(text: &str) -> Vec<String> {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '_' { c } else { ' ' })
        .collect();
    cleaned
        .split_whitespace()
        .map(|token| {
            MISSPELLINGS
                .iter()
                .find(|(wrong, _)| *wrong == token)
                .map(|(_, right)| (*right).to_string())
                .unwrap_or_else(|| token.to_string())
        })
        .collect()
}

/// Applicable sections for a case description, best first, at most three.
pub fn classify(query: &str) -> Vec<SectionMatch> {
    let lowered = query.to_lowercase();
    let mut tokens = preprocess(query);
    // The misspelling counts anywhere, even inside a longer word.
    if lowered.contains(HARASSING_MISSPELLING) {
        tokens.push("harassing".to_string());
    }
    let mut matches: Vec<SectionMatch> = Vec::new();

    for &(keyword, code) in DIRECT_CRIMES {
        let Some(section) = sections::get(code) else {
            continue;
        };
        let candidate = if tokens.iter().any(|t| t == keyword) {
            Some(SectionMatch::exact(section, keyword))
        } else if keyword.chars().count() > FUZZY_MIN_LEN {
            tokens
                .iter()
                .filter(|w| w.chars().count() >= FUZZY_MIN_LEN && !STOP_WORDS.contains(&w.as_str()))
                .find(|w| similarity(w, keyword) >= MIN_SIMILARITY)
                .map(|w| SectionMatch::similar(section, w, keyword))
        } else {
            None
        };
        if let Some(candidate) = candidate {
            merge(&mut matches, candidate);
        }
    }

    matches.retain(|m| m.confidence >= CONFIDENCE_THRESHOLD);
    if FIGURATIVE_KILLING.iter().any(|e| lowered.contains(e)) {
        matches.retain(|m| m.section_code != "302");
    }
    matches.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
    matches.truncate(MAX_RESULTS);
    drop_overlapping(&mut matches);

    tracing::debug!(
        target: "fir::classifier",
        sections = ?matches.iter().map(|m| m.section_code.as_str()).collect::<Vec<_>>(),
        "classified case description"
    );
    matches
}

/// `1 - distance / longer length`, in characters.
fn similarity(word: &str, keyword: &str) -> f32 {
    let max_len = word.chars().count().max(keyword.chars().count());
    if max_len == 0 {
        return 1.0;
    }
    1.0 - levenshtein(word, keyword) as f32 / max_len as f32
}

/// One entry per section; a strictly more confident match replaces the evidence.
fn merge(matches: &mut Vec<SectionMatch>, candidate: SectionMatch) {
    match matches
        .iter_mut()
        .find(|m| m.section_code == candidate.section_code)
    {
        Some(existing) => {
            if candidate.confidence > existing.confidence {
                existing.confidence = candidate.confidence;
                existing.keywords_matched = candidate.keywords_matched;
                existing.relevance = candidate.relevance;
            }
        }
        None => matches.push(candidate),
    }
}

/// Removes the less confident of any two matches sharing more than half of their keywords.
fn drop_overlapping(matches: &mut Vec<SectionMatch>) {
    let mut to_remove: Vec<usize> = Vec::new();
    for i in 0..matches.len() {
        for j in (i + 1)..matches.len() {
            let (a, b) = (&matches[i], &matches[j]);
            if a.keywords_matched.is_empty() || b.keywords_matched.is_empty() {
                continue;
            }
            let shared = a
                .keywords_matched
                .iter()
                .filter(|k| b.keywords_matched.contains(k))
                .count();
            let smaller = a.keywords_matched.len().min(b.keywords_matched.len());
            if shared as f32 / smaller as f32 > 0.5 {
                to_remove.push(if a.confidence < b.confidence { i } else { j });
            }
        }
    }
    to_remove.sort_unstable();
    to_remove.dedup();
    for idx in to_remove.into_iter().rev() {
        matches.remove(idx);
    }
}

/// Multi-line analysis text listing each section with its relevance and matched keywords.
pub fn render(matches: &[SectionMatch]) -> String {
    let mut out = String::from("Based on your description, the following IPC sections may apply:\n\n");
    for m in matches {
        out.push_str(&format!(
            "📋 Section {}: {} (Relevance: {})\n   {}\n",
            m.section_code,
            m.section_name,
            m.relevance_label(),
            m.section_description
        ));
        if !m.keywords_matched.is_empty() {
            let keywords = m
                .keywords_matched
                .iter()
                .map(|k| format!("'{}'", k))
                .collect::<Vec<_>>()
                .join(", ");
            out.push_str(&format!("   Keywords matched: {}\n", keywords));
        }
        out.push('\n');
    }
    out.push_str("📝 Note: This analysis is based on the information you provided and identifies potentially applicable IPC sections from keywords. The actual sections applied in a legal case may vary based on the complete evidence and legal interpretation.\n\n");
    out.push_str("If you'd like to provide more details about the case, I can refine this analysis further.");
    out
}
