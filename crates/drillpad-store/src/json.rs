//! Flat-file JSON persistence.
//!
//! One document per logical store, read and overwritten whole on every
//! operation. A `tokio::sync::Mutex` per document serializes writers;
//! readers take the same lock so they never observe a torn file. There is
//! no cross-process locking and no durability beyond last-write-wins.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use drillpad_core::error::QuizError;
use drillpad_core::model::{Answer, Problem, Review, UserRecord};
use drillpad_core::traits::{AnswerStore, ProblemCatalog, ReviewStore, UserStatsStore};

/// `problems.json`: the catalog document.
#[derive(Debug, Default, Serialize, Deserialize)]
struct ProblemsDoc {
    #[serde(default)]
    problems: Vec<Problem>,
}

/// `answers.json`: `user_id` to string-keyed `problem_id` to `Answer`.
#[derive(Debug, Default, Serialize, Deserialize)]
struct AnswersDoc {
    #[serde(default)]
    answers: BTreeMap<String, BTreeMap<String, Answer>>,
}

/// `reviews.json`: string-keyed `problem_id` to reviews in append order.
type ReviewsDoc = BTreeMap<String, Vec<Review>>;

/// `user_stats.json`: `user_id` to persisted snapshot.
type UserStatsDoc = BTreeMap<String, UserRecord>;

/// Flat-file store implementing every storage trait over one data
/// directory.
pub struct JsonStore {
    problems_path: PathBuf,
    answers_path: PathBuf,
    reviews_path: PathBuf,
    stats_path: PathBuf,
    problems_lock: Mutex<()>,
    answers_lock: Mutex<()>,
    reviews_lock: Mutex<()>,
    stats_lock: Mutex<()>,
}

impl JsonStore {
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        let data_dir = data_dir.as_ref();
        Self {
            problems_path: data_dir.join("problems.json"),
            answers_path: data_dir.join("answers.json"),
            reviews_path: data_dir.join("reviews.json"),
            stats_path: data_dir.join("user_stats.json"),
            problems_lock: Mutex::new(()),
            answers_lock: Mutex::new(()),
            reviews_lock: Mutex::new(()),
            stats_lock: Mutex::new(()),
        }
    }

    /// Read a whole document. A missing file is an empty document; an
    /// unreadable file is `StorageUnavailable`; unparsable JSON is
    /// `MalformedRecord`.
    fn load_doc<T: DeserializeOwned + Default>(path: &Path) -> Result<T, QuizError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(T::default()),
            Err(e) => {
                return Err(QuizError::StorageUnavailable(format!(
                    "read {}: {e}",
                    path.display()
                )))
            }
        };
        serde_json::from_str(&content).map_err(|e| QuizError::MalformedRecord {
            store: doc_name(path),
            detail: e.to_string(),
        })
    }

    /// Serialize and overwrite a whole document.
    fn save_doc<T: Serialize>(path: &Path, doc: &T) -> Result<(), QuizError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                QuizError::StorageUnavailable(format!("create {}: {e}", parent.display()))
            })?;
        }
        let json = serde_json::to_string_pretty(doc).map_err(|e| {
            QuizError::StorageUnavailable(format!("serialize {}: {e}", path.display()))
        })?;
        std::fs::write(path, json).map_err(|e| {
            QuizError::StorageUnavailable(format!("write {}: {e}", path.display()))
        })?;
        tracing::debug!(path = %path.display(), "document written");
        Ok(())
    }
}

/// Parse a string problem-id key from a stored document.
fn parse_problem_key(path: &Path, key: &str) -> Result<u32, QuizError> {
    key.parse().map_err(|_| QuizError::MalformedRecord {
        store: doc_name(path),
        detail: format!("non-numeric problem id key '{key}'"),
    })
}

fn doc_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[async_trait]
impl ProblemCatalog for JsonStore {
    async fn all_problems(&self) -> Result<Vec<Problem>, QuizError> {
        let _guard = self.problems_lock.lock().await;
        let mut doc: ProblemsDoc = Self::load_doc(&self.problems_path)?;
        doc.problems.sort_by_key(|p| p.id);
        Ok(doc.problems)
    }

    async fn problem_by_id(&self, problem_id: u32) -> Result<Option<Problem>, QuizError> {
        let _guard = self.problems_lock.lock().await;
        let doc: ProblemsDoc = Self::load_doc(&self.problems_path)?;
        Ok(doc.problems.into_iter().find(|p| p.id == problem_id))
    }

    async fn replace_problems(&self, problems: Vec<Problem>) -> Result<(), QuizError> {
        let _guard = self.problems_lock.lock().await;
        Self::save_doc(&self.problems_path, &ProblemsDoc { problems })
    }
}

#[async_trait]
impl AnswerStore for JsonStore {
    async fn answer(
        &self,
        user_id: &str,
        problem_id: u32,
    ) -> Result<Option<Answer>, QuizError> {
        let _guard = self.answers_lock.lock().await;
        let doc: AnswersDoc = Self::load_doc(&self.answers_path)?;
        Ok(doc
            .answers
            .get(user_id)
            .and_then(|rows| rows.get(&problem_id.to_string()))
            .cloned())
    }

    async fn put_answer(&self, answer: &Answer) -> Result<(), QuizError> {
        let _guard = self.answers_lock.lock().await;
        let mut doc: AnswersDoc = Self::load_doc(&self.answers_path)?;
        doc.answers
            .entry(answer.user_id.clone())
            .or_default()
            .insert(answer.problem_id.to_string(), answer.clone());
        Self::save_doc(&self.answers_path, &doc)
    }

    async fn answers_for_user(
        &self,
        user_id: &str,
    ) -> Result<BTreeMap<u32, Answer>, QuizError> {
        let _guard = self.answers_lock.lock().await;
        let doc: AnswersDoc = Self::load_doc(&self.answers_path)?;
        let Some(rows) = doc.answers.get(user_id) else {
            return Ok(BTreeMap::new());
        };
        rows.iter()
            .map(|(key, answer)| {
                Ok((parse_problem_key(&self.answers_path, key)?, answer.clone()))
            })
            .collect()
    }

    async fn all_answers(
        &self,
    ) -> Result<BTreeMap<String, BTreeMap<u32, Answer>>, QuizError> {
        let _guard = self.answers_lock.lock().await;
        let doc: AnswersDoc = Self::load_doc(&self.answers_path)?;
        doc.answers
            .into_iter()
            .map(|(user_id, rows)| {
                let converted = rows
                    .into_iter()
                    .map(|(key, answer)| {
                        Ok((parse_problem_key(&self.answers_path, &key)?, answer))
                    })
                    .collect::<Result<BTreeMap<u32, Answer>, QuizError>>()?;
                Ok((user_id, converted))
            })
            .collect()
    }
}

#[async_trait]
impl ReviewStore for JsonStore {
    async fn append_review(&self, review: &Review) -> Result<(), QuizError> {
        let _guard = self.reviews_lock.lock().await;
        let mut doc: ReviewsDoc = Self::load_doc(&self.reviews_path)?;
        doc.entry(review.problem_id.to_string())
            .or_default()
            .push(review.clone());
        Self::save_doc(&self.reviews_path, &doc)
    }

    async fn reviews_for_problem(
        &self,
        problem_id: u32,
    ) -> Result<Vec<Review>, QuizError> {
        let _guard = self.reviews_lock.lock().await;
        let doc: ReviewsDoc = Self::load_doc(&self.reviews_path)?;
        Ok(doc.get(&problem_id.to_string()).cloned().unwrap_or_default())
    }
}

#[async_trait]
impl UserStatsStore for JsonStore {
    async fn user_record(&self, user_id: &str) -> Result<Option<UserRecord>, QuizError> {
        let _guard = self.stats_lock.lock().await;
        let doc: UserStatsDoc = Self::load_doc(&self.stats_path)?;
        Ok(doc.get(user_id).cloned())
    }

    async fn put_user_record(
        &self,
        user_id: &str,
        record: &UserRecord,
    ) -> Result<(), QuizError> {
        let _guard = self.stats_lock.lock().await;
        let mut doc: UserStatsDoc = Self::load_doc(&self.stats_path)?;
        doc.insert(user_id.to_string(), record.clone());
        Self::save_doc(&self.stats_path, &doc)
    }
}
