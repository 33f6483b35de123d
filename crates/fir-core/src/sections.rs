//! Catalog of commonly referenced Indian Penal Code sections.

use serde::Serialize;

/// One IPC section as shown to users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IpcSection {
    pub code: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    /// Completes "This section typically applies to cases involving ...".
    #[serde(skip)]
    pub applies_to: &'static str,
}

const fn section(
    code: &'static str,
    name: &'static str,
    description: &'static str,
    applies_to: &'static str,
) -> IpcSection {
    IpcSection {
        code,
        name,
        description,
        applies_to,
    }
}

/// Sections the chatbot can describe and the classifier can map to.
pub const SECTIONS: [IpcSection; 25] = [
    section(
        "299",
        "Culpable homicide",
        "Whoever causes death by doing an act with the intention of causing death, or with the intention of causing such bodily injury as is likely to cause death, commits the offence of culpable homicide.",
        "culpable homicide where death is caused with the intention of causing death",
    ),
    section(
        "300",
        "Murder",
        "Except in the cases hereinafter excepted, culpable homicide is murder if the act by which the death is caused is done with the intention of causing death.",
        "murder where culpable homicide is committed with the intention of causing death",
    ),
    section(
        "302",
        "Punishment for murder",
        "Whoever commits murder shall be punished with death, or imprisonment for life, and shall also be liable to fine.",
        "murder or homicide with punishment of death or imprisonment for life",
    ),
    section(
        "304",
        "Punishment for culpable homicide not amounting to murder",
        "Whoever commits culpable homicide not amounting to murder shall be punished with imprisonment for life, or imprisonment of either description for a term which may extend to ten years, and shall also be liable to fine.",
        "culpable homicide not amounting to murder",
    ),
    section(
        "304A",
        "Causing death by negligence",
        "Whoever causes the death of any person by doing any rash or negligent act not amounting to culpable homicide shall be punished with imprisonment of either description for a term which may extend to two years, or with fine, or with both.",
        "death caused by negligence",
    ),
    section(
        "304B",
        "Dowry death",
        "Where the death of a woman is caused by any burns or bodily injury or occurs otherwise than under normal circumstances within seven years of her marriage.",
        "dowry death within 7 years of marriage",
    ),
    section(
        "307",
        "Attempt to murder",
        "Whoever does any act with such intention or knowledge that, if he by that act caused death, he would be guilty of murder, shall be punished with imprisonment of either description for a term which may extend to ten years.",
        "attempted murder",
    ),
    section(
        "323",
        "Punishment for voluntarily causing hurt",
        "Whoever voluntarily causes hurt shall be punished with imprisonment of either description for a term which may extend to one year, or with fine which may extend to one thousand rupees, or with both.",
        "voluntarily causing hurt",
    ),
    section(
        "324",
        "Voluntarily causing hurt by dangerous weapons or means",
        "Whoever voluntarily causes hurt by means of any instrument for shooting, stabbing or cutting, or any instrument which, used as a weapon of offence, is likely to cause death.",
        "voluntarily causing hurt by dangerous weapons",
    ),
    section(
        "326",
        "Voluntarily causing grievous hurt by dangerous weapons or means",
        "Whoever voluntarily causes grievous hurt by means of any instrument for shooting, stabbing or cutting, or any instrument which, used as a weapon of offence, is likely to cause death.",
        "voluntarily causing grievous hurt by dangerous weapons",
    ),
    section(
        "354",
        "Assault or criminal force to woman with intent to outrage her modesty",
        "Whoever assaults or uses criminal force to any woman, intending to outrage or knowing it to be likely that he will thereby outrage her modesty.",
        "assault or criminal force to woman with intent to outrage her modesty",
    ),
    section(
        "354A",
        "Sexual harassment",
        "A man committing physical contact and advances involving unwelcome and explicit sexual overtures, a demand or request for sexual favours, or making sexually coloured remarks.",
        "sexual harassment",
    ),
    section(
        "354D",
        "Stalking",
        "Any man who follows a woman and contacts, or attempts to contact such woman to foster personal interaction repeatedly despite a clear indication of disinterest, or monitors her use of electronic communication.",
        "stalking",
    ),
    section(
        "363",
        "Punishment for kidnapping",
        "Whoever kidnaps any person from India or from lawful guardianship shall be punished with imprisonment of either description for a term which may extend to seven years, and shall also be liable to fine.",
        "kidnapping",
    ),
    section(
        "376",
        "Punishment for rape",
        "Whoever commits rape shall be punished with imprisonment of either description for a term which shall not be less than seven years.",
        "rape or sexual assault",
    ),
    section(
        "379",
        "Punishment for theft",
        "Whoever commits theft shall be punished with imprisonment of either description for a term which may extend to three years, or with fine, or with both.",
        "theft",
    ),
    section(
        "380",
        "Theft in dwelling house",
        "Whoever commits theft in any building, tent or vessel, which is used as a human dwelling, or used for the custody of property.",
        "theft in dwelling house",
    ),
    section(
        "392",
        "Punishment for robbery",
        "Whoever commits robbery shall be punished with rigorous imprisonment for a term which may extend to ten years, and shall also be liable to fine.",
        "robbery",
    ),
    section(
        "406",
        "Punishment for criminal breach of trust",
        "Whoever commits criminal breach of trust shall be punished with imprisonment of either description for a term which may extend to three years, or with fine, or with both.",
        "criminal breach of trust",
    ),
    section(
        "420",
        "Cheating and dishonestly inducing delivery of property",
        "Whoever cheats and thereby dishonestly induces the person deceived to deliver any property to any person.",
        "cheating and dishonestly inducing delivery of property",
    ),
    section(
        "498A",
        "Husband or relative of husband of a woman subjecting her to cruelty",
        "Whoever, being the husband or the relative of the husband of a woman, subjects such woman to cruelty.",
        "cruelty by husband or relatives of husband",
    ),
    section(
        "499",
        "Defamation",
        "Whoever, by words either spoken or intended to be read, or by signs or by visible representations, makes or publishes any imputation concerning any person intending to harm the reputation of such person.",
        "defamation",
    ),
    section(
        "504",
        "Intentional insult with intent to provoke breach of the peace",
        "Whoever intentionally insults, and thereby gives provocation to any person, intending or knowing it to be likely that such provocation will cause him to break the public peace.",
        "intentional insult with intent to provoke breach of peace",
    ),
    section(
        "506",
        "Punishment for criminal intimidation",
        "Whoever commits the offence of criminal intimidation shall be punished with imprisonment of either description for a term which may extend to two years, or with fine, or with both.",
        "criminal intimidation",
    ),
    section(
        "509",
        "Word, gesture or act intended to insult the modesty of a woman",
        "Whoever, intending to insult the modesty of any woman, utters any word, makes any sound or gesture, or exhibits any object.",
        "word, gesture or act intended to insult the modesty of a woman",
    ),
];

const CATEGORIES: [(&str, &[&str]); 5] = [
    ("Offenses Against Human Body", &["299", "300", "302", "304", "304A", "304B", "307", "323", "324", "326"]),
    ("Sexual Offenses", &["354", "354A", "354D", "376", "509"]),
    ("Kidnapping", &["363"]),
    ("Property Offenses", &["379", "380", "392", "406", "420"]),
    ("Public Order & Tranquility", &["498A", "499", "504", "506"]),
];

/// Exact code match (case-insensitive).
pub fn get(code: &str) -> Option<&'static IpcSection> {
    SECTIONS.iter().find(|s| s.code.eq_ignore_ascii_case(code))
}

/// The "typically applies to" phrase for `code`.
pub fn context(code: &str) -> Option<&'static str> {
    get(code).map(|s| s.applies_to)
}

/// Grouping used by the "list common sections" reply, in display order.
pub fn categories() -> &'static [(&'static str, &'static [&'static str])] {
    &CATEGORIES
}

/// Normalizes `term` ("ipc 302", " 354d ") and looks it up: exact code, then a code containing
/// the term, then a name containing it.
pub fn lookup(term: &str) -> Option<&'static IpcSection> {
    let term = normalize_code(term);
    if term.is_empty() {
        return None;
    }
    if let Some(section) = get(&term) {
        return Some(section);
    }
    if let Some(section) = SECTIONS.iter().find(|s| s.code.contains(term.as_str())) {
        return Some(section);
    }
    let lowered = term.to_lowercase();
    SECTIONS
        .iter()
        .find(|s| s.name.to_lowercase().contains(&lowered))
}

fn normalize_code(term: &str) -> String {
    let upper = term.trim().to_uppercase();
    match upper.strip_prefix("IPC") {
        Some(rest) => rest.trim().to_string(),
        None => upper,
    }
}

/// Full "Information about IPC Section ..." text.
pub fn describe(section: &IpcSection) -> String {
    format!(
        "Information about IPC Section {}:\n\nName: {}\nDescription: {}\n\nThis section typically applies to cases involving {}.",
        section.code, section.name, section.description, section.applies_to
    )
}

/// Reply for a code that is not in the catalog.
pub fn not_found(term: &str) -> String {
    let available: Vec<&str> = SECTIONS.iter().take(5).map(|s| s.code).collect();
    format!(
        "I couldn't find information about IPC section {}. Please check the section number and try again.\n\nSome available sections are: {}... (and more)",
        normalize_code(term),
        available.join(", ")
    )
}

/// Category listing with truncated descriptions.
pub fn list_common() -> String {
    let mut out = String::from("Here are some commonly referenced IPC sections by category:\n\n");
    for &(category, codes) in categories() {
        out.push_str(category);
        out.push('\n');
        out.push_str(&"-".repeat(category.chars().count()));
        out.push('\n');
        for code in codes {
            match get(code) {
                Some(s) => {
                    let description = truncate(s.description, 50);
                    out.push_str(&format!("• Section {}: {} - {}\n", s.code, s.name, description));
                }
                None => out.push_str(&format!("• Section {}: Information not available\n", code)),
            }
        }
        out.push('\n');
    }
    out.push_str("You can ask for more details about any specific section by typing 'What is IPC section [number]?'");
    out
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max_chars).collect();
    cut.push_str("...");
    cut
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn codes_are_unique() {
        let codes: HashSet<&str> = SECTIONS.iter().map(|s| s.code).collect();
        assert_eq!(codes.len(), SECTIONS.len());
    }

    #[test]
    fn every_category_code_is_in_catalog() {
        for &(_, codes) in categories() {
            for code in codes {
                assert!(get(code).is_some(), "missing {code}");
            }
        }
        assert_eq!(categories()[0].0, "Offenses Against Human Body");
        assert_eq!(categories().len(), 5);
    }

    #[test]
    fn context_by_code() {
        assert_eq!(context("420"), Some("cheating and dishonestly inducing delivery of property"));
        assert_eq!(context("354d"), get("354D").map(|s| s.applies_to));
        assert_eq!(context("9999"), None);
    }

    #[test]
    fn lookup_normalizes_prefix_and_case() {
        assert_eq!(lookup("302").unwrap().code, "302");
        assert_eq!(lookup("IPC 302").unwrap().code, "302");
        assert_eq!(lookup(" ipc302 ").unwrap().code, "302");
        assert_eq!(lookup("354d").unwrap().code, "354D");
    }

    #[test]
    fn lookup_falls_back_to_partial_code_then_name() {
        assert_eq!(lookup("498").unwrap().code, "498A");
        assert_eq!(lookup("stalking").unwrap().code, "354D");
        assert_eq!(lookup("dowry").unwrap().code, "304B");
        assert!(lookup("9999").is_none());
        assert!(lookup("  ").is_none());
    }

    #[test]
    fn describe_includes_context() {
        let text = describe(get("379").unwrap());
        assert!(text.starts_with("Information about IPC Section 379:"));
        assert!(text.ends_with("cases involving theft."));
    }

    #[test]
    fn listing_truncates_descriptions() {
        let listing = list_common();
        assert!(listing.contains("Sexual Offenses\n---------------\n"));
        assert!(listing.contains("• Section 302: Punishment for murder - "));
        assert!(listing.contains("..."));
        assert!(listing.ends_with("'What is IPC section [number]?'"));
    }
}
