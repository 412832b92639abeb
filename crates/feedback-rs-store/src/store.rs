//! Record store keeping an in-memory list and its backing file in sync.

use crate::codec::{FIELD_SEPARATOR, decode_line, encode_record};
use crate::error::{LoadIssue, ParseError, StoreError};
use crate::model::FeedbackRecord;
use crate::policy::{InputPolicy, scrub_classification};
use crate::query::SearchQuery;
use crate::stats::{self, RatingStats, SentimentSummary};
use feedback_rs_classifier::Classifier;
use feedback_rs_config::RatingConfig;
use log::{debug, info, warn};
use std::collections::{BTreeMap, HashSet};
use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Result of reading the backing file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadedRecords {
    /// Valid records in file order.
    pub records: Vec<FeedbackRecord>,
    /// Lines that were skipped.
    pub issues: Vec<LoadIssue>,
}

/// Read and parse the backing file.
///
/// A missing file is an empty store. Malformed lines, including lines that
/// are not valid UTF-8, are logged and reported in `issues`; only I/O
/// failures abort the load.
pub fn load_records(path: &Path, rating: RatingConfig) -> Result<LoadedRecords, StoreError> {
    let read_error = |source: std::io::Error| StoreError::StorageRead {
        path: path.to_path_buf(),
        source,
    };
    let file = match File::open(path) {
        Ok(file) => file,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            debug!("backing file missing; starting empty (path={})", path.display());
            return Ok(LoadedRecords::default());
        }
        Err(err) => return Err(read_error(err)),
    };

    let mut loaded = LoadedRecords::default();
    let mut seen = HashSet::new();
    for (index, raw) in BufReader::new(file).split(b'\n').enumerate() {
        let mut raw = raw.map_err(read_error)?;
        if raw.last() == Some(&b'\r') {
            raw.pop();
        }
        if raw.iter().all(u8::is_ascii_whitespace) {
            continue;
        }
        let parsed = std::str::from_utf8(&raw)
            .map_err(|_| ParseError::InvalidEncoding)
            .and_then(|line| decode_line(line, rating))
            .and_then(|record| {
                if seen.insert(record.id) {
                    Ok(record)
                } else {
                    Err(ParseError::DuplicateId(record.id))
                }
            });
        match parsed {
            Ok(record) => loaded.records.push(record),
            Err(error) => {
                warn!(
                    "skipping malformed feedback line (path={}, line={}): {error}",
                    path.display(),
                    index + 1
                );
                loaded.issues.push(LoadIssue {
                    line: index + 1,
                    error,
                    raw,
                });
            }
        }
    }
    info!(
        "loaded feedback (path={}, records={}, skipped={})",
        path.display(),
        loaded.records.len(),
        loaded.issues.len()
    );
    Ok(loaded)
}

/// Id in the first field of a skipped line, when it still parses.
fn leading_id(raw: &[u8]) -> Option<u32> {
    let field = raw.split(|byte| *byte == FIELD_SEPARATOR as u8).next()?;
    std::str::from_utf8(field).ok()?.trim().parse().ok()
}

/// Rewrite the backing file with `records`, one line each, followed by the
/// skipped lines in `preserved` exactly as they were read.
///
/// Lines go to a sibling temp file that is then renamed over the target.
fn write_records(
    path: &Path,
    records: &[FeedbackRecord],
    preserved: &[LoadIssue],
) -> Result<(), StoreError> {
    let write_error = |source: std::io::Error| StoreError::StorageWrite {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_error)?;
    }
    let temp_path = temp_path(path);
    let written = write_lines(&temp_path, records, preserved)
        .and_then(|()| fs::rename(&temp_path, path));
    if let Err(err) = written {
        let _ = fs::remove_file(&temp_path);
        return Err(write_error(err));
    }
    debug!(
        "rewrote backing file (path={}, records={}, preserved={})",
        path.display(),
        records.len(),
        preserved.len()
    );
    Ok(())
}

fn write_lines(
    path: &Path,
    records: &[FeedbackRecord],
    preserved: &[LoadIssue],
) -> std::io::Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .truncate(true)
        .write(true)
        .open(path)?;
    let mut writer = BufWriter::new(file);
    for record in records {
        writeln!(writer, "{}", encode_record(record))?;
    }
    for issue in preserved {
        writer.write_all(&issue.raw)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Authoritative list of feedback records plus its backing file.
///
/// Every successful mutation rewrites the file before returning; a failed
/// rewrite leaves the in-memory list untouched. Lines skipped on load are
/// carried through every rewrite.
pub struct FeedbackStore {
    path: PathBuf,
    records: Vec<FeedbackRecord>,
    issues: Vec<LoadIssue>,
    classifier: Box<dyn Classifier>,
    policy: InputPolicy,
    /// Highest id seen on load or handed out during this run.
    high_water: u32,
}

impl FeedbackStore {
    /// Open the store at `path`, loading any existing records.
    pub fn open(
        path: impl AsRef<Path>,
        classifier: Box<dyn Classifier>,
        policy: InputPolicy,
    ) -> Result<Self, StoreError> {
        let mut store = Self {
            path: path.as_ref().to_path_buf(),
            records: Vec::new(),
            issues: Vec::new(),
            classifier,
            policy,
            high_water: 0,
        };
        store.load()?;
        Ok(store)
    }

    /// Reload records from the backing file, replacing the in-memory list.
    pub fn load(&mut self) -> Result<&[FeedbackRecord], StoreError> {
        let loaded = load_records(&self.path, self.policy.rating)?;
        self.records = loaded.records;
        self.issues = loaded.issues;
        let skipped_max = self
            .issues
            .iter()
            .filter_map(|issue| leading_id(&issue.raw))
            .max()
            .unwrap_or(0);
        self.high_water = self.high_water.max(self.max_id()).max(skipped_max);
        Ok(&self.records)
    }

    /// Backing file location.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Input rules in force.
    pub fn policy(&self) -> InputPolicy {
        self.policy
    }

    /// Lines skipped by the last load. They stay in the backing file.
    pub fn load_issues(&self) -> &[LoadIssue] {
        &self.issues
    }

    /// Validate, classify, and persist a new feedback entry.
    pub fn add(
        &mut self,
        student_name: &str,
        course: &str,
        rating: i64,
        comment: &str,
    ) -> Result<FeedbackRecord, StoreError> {
        let student_name = self.policy.clean_text("student name", student_name, true)?;
        let course = self.policy.clean_text("course", course, true)?;
        let rating = self.policy.check_rating(rating)?;
        let comment = self.policy.clean_text("comment", comment, false)?;

        let classification = scrub_classification(self.classifier.classify(&comment)?);
        let id = self
            .high_water
            .max(self.max_id())
            .checked_add(1)
            .ok_or(StoreError::IdsExhausted)?;
        let record = FeedbackRecord {
            id,
            student_name,
            course,
            rating,
            comment,
            sentiment_label: classification.label,
            sentiment_score: classification.score.clamp(-1.0, 1.0),
            emotion: classification.emotion,
            key_phrases: classification.key_phrases,
        };

        let mut next = self.records.clone();
        next.push(record.clone());
        write_records(&self.path, &next, &self.issues)?;
        self.records = next;
        self.high_water = id;
        info!(
            "feedback added (id={}, rating={}, sentiment={})",
            record.id, record.rating, record.sentiment_label
        );
        Ok(record)
    }

    /// Remove the record with `id`, returning it.
    pub fn delete(&mut self, id: u32) -> Result<FeedbackRecord, StoreError> {
        let index = self
            .records
            .iter()
            .position(|record| record.id == id)
            .ok_or(StoreError::NotFound(id))?;
        let mut next = self.records.clone();
        let removed = next.remove(index);
        write_records(&self.path, &next, &self.issues)?;
        self.records = next;
        info!("feedback deleted (id={id})");
        Ok(removed)
    }

    /// Remove every record whose student name equals `name`, ignoring case.
    pub fn delete_by_student(&mut self, name: &str) -> Result<Vec<FeedbackRecord>, StoreError> {
        let wanted = name.trim().to_lowercase();
        let (removed, kept): (Vec<_>, Vec<_>) = self
            .records
            .iter()
            .cloned()
            .partition(|record| record.student_name.to_lowercase() == wanted);
        if removed.is_empty() {
            return Err(StoreError::NoStudent(name.trim().to_string()));
        }
        write_records(&self.path, &kept, &self.issues)?;
        self.records = kept;
        info!("feedback deleted by student (removed={})", removed.len());
        Ok(removed)
    }

    /// Lazily yield matching records in file order.
    ///
    /// The returned iterator can be cloned to restart the search.
    pub fn search<'a>(
        &'a self,
        query: &'a SearchQuery,
    ) -> impl Iterator<Item = &'a FeedbackRecord> + Clone + 'a {
        self.records
            .iter()
            .filter(move |record| query.matches(record))
    }

    /// All records in file order.
    pub fn list(&self) -> &[FeedbackRecord] {
        &self.records
    }

    /// Look up a record by id.
    pub fn get(&self, id: u32) -> Option<&FeedbackRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    /// Count per rating over the configured range, zero buckets included.
    pub fn rating_distribution(&self) -> BTreeMap<u8, usize> {
        stats::rating_distribution(&self.records, self.policy.rating)
    }

    /// Average, highest, and lowest rating, `None` when empty.
    pub fn rating_stats(&self) -> Option<RatingStats> {
        RatingStats::from_records(&self.records)
    }

    /// Per-label and per-emotion overview.
    pub fn sentiment_summary(&self) -> SentimentSummary {
        SentimentSummary::from_records(&self.records)
    }

    fn max_id(&self) -> u32 {
        self.records.iter().map(|record| record.id).max().unwrap_or(0)
    }
}
