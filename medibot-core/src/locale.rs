//! Localization table for every user-facing string the client renders.
//!
//! The backend answers in the user's language already; this table only covers
//! the client's own chrome (greeting, pending indicator, error and
//! no-provider notices, match-card labels) plus the specialty-name lookup used
//! to localize the canonical specialty identifier on a match card.
//!
//! Lookups never fail. An unknown language code resolves to English, an
//! unknown specialty resolves to its canonical identifier.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, LazyLock};

/// Canonical identifier the backend falls back to when triage is inconclusive.
pub const GENERAL_MEDICINE: &str = "General Medicine";

/// The closed set of languages the client ships strings for.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    #[default]
    En,
    Hi,
    Mr,
}

impl Language {
    /// Every supported language, in selector order.
    pub const ALL: [Language; 3] = [Language::En, Language::Hi, Language::Mr];

    /// Wire code sent to the backend in the `language` field.
    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Hi => "hi",
            Language::Mr => "mr",
        }
    }

    /// Name of the language written in that language, for the selector.
    pub fn native_name(self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Hi => "हिन्दी",
            Language::Mr => "मराठी",
        }
    }

    /// Returns the language that follows `self` in the selector (wraps around).
    pub fn next(self) -> Self {
        match self {
            Language::En => Language::Hi,
            Language::Hi => Language::Mr,
            Language::Mr => Language::En,
        }
    }

    /// Returns the language that precedes `self` in the selector (wraps around).
    pub fn prev(self) -> Self {
        match self {
            Language::En => Language::Mr,
            Language::Hi => Language::En,
            Language::Mr => Language::Hi,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Returned by [`Language::from_str`] for codes outside the supported set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported language code '{0}'")]
pub struct UnknownLanguage(pub String);

impl FromStr for Language {
    type Err = UnknownLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Language::En),
            "hi" => Ok(Language::Hi),
            "mr" => Ok(Language::Mr),
            other => Err(UnknownLanguage(other.to_owned())),
        }
    }
}

/// All client-side strings for one language.
///
/// Immutable once built. `specialties` maps the backend's canonical specialty
/// identifier (English, e.g. `"Cardiology"`) to the label shown on a match card.
#[derive(Debug, Clone)]
pub struct LocalizationEntry {
    pub greeting: String,
    pub thinking: String,
    pub error: String,
    pub no_doc: String,
    pub match_found: String,
    pub join_btn: String,
    pub specialties: HashMap<String, String>,
}

impl LocalizationEntry {
    /// The string keys every entry must define.
    pub const REQUIRED_KEYS: [&'static str; 6] =
        ["greeting", "thinking", "error", "no_doc", "match", "join_btn"];

    /// String-keyed access to the required strings.
    ///
    /// Unknown keys, and keys whose value is blank, return `default`.
    pub fn lookup<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        let value = match key {
            "greeting" => self.greeting.as_str(),
            "thinking" => self.thinking.as_str(),
            "error" => self.error.as_str(),
            "no_doc" => self.no_doc.as_str(),
            "match" => self.match_found.as_str(),
            "join_btn" => self.join_btn.as_str(),
            _ => return default,
        };
        if value.trim().is_empty() {
            default
        } else {
            value
        }
    }

    /// Localized label for a canonical specialty identifier, if this entry has one.
    pub fn specialty(&self, canonical_id: &str) -> Option<&str> {
        self.specialties
            .get(canonical_id.trim())
            .map(String::as_str)
            .filter(|label| !label.trim().is_empty())
    }
}

/// Language → [`LocalizationEntry`] mapping with English as the fallback.
#[derive(Debug, Clone)]
pub struct LocalizationTable {
    entries: HashMap<Language, LocalizationEntry>,
    fallback: LocalizationEntry,
}

static BUILTIN: LazyLock<Arc<LocalizationTable>> =
    LazyLock::new(|| Arc::new(LocalizationTable::from_entries(builtin_entries())));

impl LocalizationTable {
    /// The table shipped with the client (English, Hindi, Marathi).
    pub fn builtin() -> Arc<Self> {
        Arc::clone(&BUILTIN)
    }

    /// Builds a table from explicit entries.
    ///
    /// The English entry becomes the fallback for languages without one. When
    /// English itself is absent, the built-in English strings are used.
    pub fn from_entries(entries: HashMap<Language, LocalizationEntry>) -> Self {
        let fallback = entries
            .get(&Language::En)
            .cloned()
            .unwrap_or_else(english);
        Self { entries, fallback }
    }

    /// Entry for `language`, or the English entry when it has none.
    pub fn entry(&self, language: Language) -> &LocalizationEntry {
        self.entries.get(&language).unwrap_or(&self.fallback)
    }

    /// Entry for a raw language code; unrecognized codes get the English entry.
    pub fn resolve(&self, code: &str) -> &LocalizationEntry {
        match code.parse::<Language>() {
            Ok(language) => self.entry(language),
            Err(_) => &self.fallback,
        }
    }

    /// Localized specialty label, else the canonical identifier itself.
    ///
    /// A blank identifier resolves to the General Medicine label so the
    /// result is never empty.
    pub fn resolve_specialty(&self, language: Language, canonical_id: &str) -> String {
        let canonical_id = canonical_id.trim();
        let entry = self.entry(language);
        if canonical_id.is_empty() {
            return entry
                .specialty(GENERAL_MEDICINE)
                .unwrap_or(GENERAL_MEDICINE)
                .to_owned();
        }
        entry
            .specialty(canonical_id)
            .unwrap_or(canonical_id)
            .to_owned()
    }
}

fn specialties(pairs: [(&str, &str); 6]) -> HashMap<String, String> {
    pairs
        .into_iter()
        .map(|(id, label)| (id.to_owned(), label.to_owned()))
        .collect()
}

fn english() -> LocalizationEntry {
    LocalizationEntry {
        greeting: "Hello! I am your AI Nurse. Please describe your symptoms.".into(),
        thinking: "AI is thinking...".into(),
        error: "Could not connect to the server. Is the MediBot service running?".into(),
        no_doc: "No doctors are currently available online. Please schedule an appointment."
            .into(),
        match_found: "Match Found".into(),
        join_btn: "Join Video Call".into(),
        specialties: specialties([
            ("General Medicine", "General Medicine"),
            ("Cardiology", "Cardiology"),
            ("Neurology", "Neurology"),
            ("Dermatology", "Dermatology"),
            ("Orthopedics", "Orthopedics"),
            ("Dentistry", "Dentistry"),
        ]),
    }
}

fn hindi() -> LocalizationEntry {
    LocalizationEntry {
        greeting: "नमस्ते! मैं आपकी AI नर्स हूँ। कृपया अपने लक्षणों का वर्णन करें।".into(),
        thinking: "AI सोच रहा है...".into(),
        error: "सर्वर से कनेक्ट नहीं हो सका।".into(),
        no_doc: "वर्तमान में कोई डॉक्टर ऑनलाइन उपलब्ध नहीं है।".into(),
        match_found: "डॉक्टर मिले".into(),
        join_btn: "वीडियो कॉल शुरू करें".into(),
        specialties: specialties([
            ("General Medicine", "सामान्य चिकित्सा (General Medicine)"),
            ("Cardiology", "हृदयरोग विशेषज्ञ (Cardiology)"),
            ("Neurology", "न्यूरोलॉजिस्ट (Neurology)"),
            ("Dermatology", "त्वचा विशेषज्ञ (Dermatology)"),
            ("Orthopedics", "हड्डी रोग विशेषज्ञ (Orthopedics)"),
            ("Dentistry", "दंत चिकित्सक (Dentist)"),
        ]),
    }
}

fn marathi() -> LocalizationEntry {
    LocalizationEntry {
        greeting: "नमस्कार! मी तुमची एआय नर्स आहे. कृपया तुमच्या लक्षणांचे वर्णन करा.".into(),
        thinking: "AI विचार करत आहे...".into(),
        error: "सर्व्हरशी कनेक्ट होऊ शकलो नाही.".into(),
        no_doc: "सध्या कोणतेही डॉक्टर ऑनलाइन उपलब्ध नाहीत.".into(),
        match_found: "डॉक्टर सापडले".into(),
        join_btn: "व्हिडिओ कॉल सुरू करा".into(),
        specialties: specialties([
            ("General Medicine", "जनरल फिजिशियन (General Medicine)"),
            ("Cardiology", "हृदयरोग तज्ञ (Cardiologist)"),
            ("Neurology", "मेंदू विकार तज्ञ (Neurologist)"),
            ("Dermatology", "त्वचा रोग तज्ञ (Dermatologist)"),
            ("Orthopedics", "अस्थिरोग तज्ञ (Orthopedic)"),
            ("Dentistry", "दंत चिकित्सक (Dentist)"),
        ]),
    }
}

fn builtin_entries() -> HashMap<Language, LocalizationEntry> {
    HashMap::from([
        (Language::En, english()),
        (Language::Hi, hindi()),
        (Language::Mr, marathi()),
    ])
}
