//! fir-core: FIR assistant library (config, legal FAQ matcher, IPC section catalog and
//! classifier, chat routing, chat history).
//!
//! The gateway loads a [`KnowledgeBase`] once at startup, wraps it in an `Arc` and hands it to
//! [`ChatAssistant`]; nothing re-reads the FAQ file per request.

mod chat;
pub mod classifier;
mod faq;
mod history;
pub mod sections;
mod shared;

pub use shared::{ChatReply, CoreConfig};

pub use faq::{levenshtein, FaqError, FaqMatch, KnowledgeBase, KnowledgeEntry, MAX_FUZZY_DISTANCE};

pub use chat::{ChatAssistant, Intent};

pub use classifier::SectionMatch;
pub use history::{HistoryEntry, HistoryError, HistoryStore};
pub use sections::IpcSection;
