//! Turning a homework status into the sentence the student receives

use std::collections::BTreeMap;

use review_client::Homework;

use crate::error::{BotError, BotResult};

/// Known status codes and the verdict sentence sent for each
pub const DEFAULT_VERDICTS: [(&str, &str); 3] = [
    ("approved", "Работа проверена: ревьюеру всё понравилось. Ура!"),
    ("reviewing", "Работа взята на проверку ревьюером."),
    ("rejected", "Работа проверена: у ревьюера есть замечания."),
];

/// Immutable mapping from status code to verdict sentence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerdictCatalog {
    verdicts: BTreeMap<String, String>,
}

impl Default for VerdictCatalog {
    fn default() -> Self {
        Self::new(DEFAULT_VERDICTS)
    }
}

impl VerdictCatalog {
    pub fn new<I, K, V>(verdicts: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            verdicts: verdicts
                .into_iter()
                .map(|(code, text)| (code.into(), text.into()))
                .collect(),
        }
    }

    pub fn verdict(&self, status: &str) -> Option<&str> {
        self.verdicts.get(status).map(String::as_str)
    }
}

/// Builds notification text for the most recent homework record
#[derive(Debug, Clone, Default)]
pub struct StatusInterpreter {
    catalog: VerdictCatalog,
}

impl StatusInterpreter {
    pub fn new(catalog: VerdictCatalog) -> Self {
        Self { catalog }
    }

    pub fn interpret(&self, homework: &Homework) -> BotResult<String> {
        let name = homework.name.as_deref().ok_or_else(|| {
            BotError::IncompleteSubmission("record has no homework_name".to_string())
        })?;
        let status = homework.status.as_deref().ok_or_else(|| {
            BotError::IncompleteSubmission(format!("homework \"{}\" has no status", name))
        })?;
        let verdict = self
            .catalog
            .verdict(status)
            .ok_or_else(|| BotError::UnknownStatus(status.to_string()))?;

        Ok(format!(
            "Изменился статус проверки работы \"{}\". {}",
            name, verdict
        ))
    }
}
