//! The index builder.
//!
//! Datasets are ingested in priority order (ties keep the configured
//! order), so a conflicting claim on a name is always won by the highest
//! priority dataset regardless of interleaving. Every surviving row
//! becomes one document; the committed store is immutable.

use std::cmp::Reverse;
use std::collections::{HashMap, HashSet};

use taxamatch_backend_memory::{Document, DocumentStore, MemoryStore, StoreError};
use taxamatch_features::{phonetic_key, treat_word, CleanedName};
use taxamatch_model::{Classification, IndexRecord, ParsedName, RankType, TaxonomicStatus};
use taxamatch_parser::NameParser;

use crate::schema;
use crate::source::{PriorityConfig, SourceDataset, SourceRow};

#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("store error: {0}")]
    Store(#[from] StoreError),
    #[error("record serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// A row the build could not index, with the reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    pub dataset_id: String,
    pub lsid: String,
    pub reason: String,
}

#[derive(Debug, Default)]
pub struct BuildReport {
    pub datasets: usize,
    pub rows: usize,
    pub indexed: usize,
    pub duplicates: usize,
    pub homonyms: usize,
    pub skipped: Vec<SkippedRow>,
}

/// Merges a name and its authorship into the complete display name.
/// A known complete name from the source wins outright.
pub fn build_name_complete(name: &str, author: Option<&str>, known: Option<&str>) -> String {
    if let Some(k) = known.map(str::trim).filter(|k| !k.is_empty()) {
        return k.to_string();
    }
    let name = name.trim();
    let author = author.map(str::trim).filter(|a| !a.is_empty());
    match author {
        None => name.to_string(),
        Some(a) if name.is_empty() => a.to_string(),
        Some(a) if a.starts_with(name) => a.to_string(),
        Some(a) if name.ends_with(a) => name.to_string(),
        Some(a) => format!("{name} {a}"),
    }
}

pub struct IndexBuilder {
    parser: NameParser,
    priorities: PriorityConfig,
}

impl IndexBuilder {
    pub fn new(priorities: PriorityConfig) -> IndexBuilder {
        IndexBuilder {
            parser: NameParser::new(),
            priorities,
        }
    }

    /// Builds and commits a store from the given datasets.
    pub fn build(
        &self,
        datasets: &[SourceDataset],
    ) -> Result<(MemoryStore, BuildReport), BuildError> {
        let mut report = BuildReport {
            datasets: datasets.len(),
            ..BuildReport::default()
        };

        // priority order, stable over the configured order
        let mut order: Vec<usize> = (0..datasets.len()).collect();
        order.sort_by_key(|&i| Reverse(self.priorities.priority_for(&datasets[i].id)));

        let mut records: Vec<IndexRecord> = Vec::new();
        let mut components: Vec<ComponentKeys> = Vec::new();
        let mut vernaculars: Vec<Vec<String>> = Vec::new();
        let mut claimed: HashSet<ClaimKey> = HashSet::new();

        for &di in &order {
            let dataset = &datasets[di];
            let priority = self.priorities.priority_for(&dataset.id);
            tracing::info!(dataset = %dataset.id, rows = dataset.rows.len(), priority, "ingesting dataset");
            for row in &dataset.rows {
                report.rows += 1;
                match self.index_row(dataset, priority, row, &mut claimed, records.len() as u64) {
                    RowOutcome::Indexed(record, keys) => {
                        records.push(record);
                        components.push(keys);
                        vernaculars.push(row.vernacular_names.clone());
                    }
                    RowOutcome::Duplicate => report.duplicates += 1,
                    RowOutcome::Skipped(reason) => {
                        tracing::debug!(dataset = %dataset.id, lsid = %row.lsid, %reason, "row skipped");
                        report.skipped.push(SkippedRow {
                            dataset_id: dataset.id.clone(),
                            lsid: row.lsid.clone(),
                            reason,
                        });
                    }
                }
            }
        }

        report.homonyms = flag_homonyms(&mut records);
        assign_nested_set(&mut records);

        let mut store = MemoryStore::new();
        for ((record, keys), common_names) in records.iter().zip(&components).zip(&vernaculars) {
            store.add(to_document(record, keys, common_names)?)?;
        }
        store.commit()?;
        report.indexed = records.len();
        tracing::info!(
            indexed = report.indexed,
            duplicates = report.duplicates,
            skipped = report.skipped.len(),
            homonyms = report.homonyms,
            "index build complete"
        );
        Ok((store, report))
    }

    fn index_row(
        &self,
        dataset: &SourceDataset,
        priority: i32,
        row: &SourceRow,
        claimed: &mut HashSet<ClaimKey>,
        next_id: u64,
    ) -> RowOutcome {
        if row.name.trim().is_empty() {
            return RowOutcome::Skipped("missing name".to_string());
        }
        let rank = match row.rank.as_deref().map(str::trim).filter(|r| !r.is_empty()) {
            None => return RowOutcome::Skipped("missing rank".to_string()),
            Some(r) => match RankType::from_name(r) {
                Some(rank) => rank,
                None => return RowOutcome::Skipped(format!("unresolvable rank {r:?}")),
            },
        };

        let cleaned = CleanedName::new(&row.name);
        let parsed = self.parser.parse(&cleaned.basic);
        let canonical = parsed.canonical_name();
        let canonical_basic = CleanedName::new(&canonical).basic;

        let mut status = row
            .status
            .as_deref()
            .map(TaxonomicStatus::from_term)
            .unwrap_or(TaxonomicStatus::Accepted);
        if status == TaxonomicStatus::Accepted && row.accepted_lsid.is_some() {
            status = TaxonomicStatus::Synonym;
        }

        // The same name may legitimately appear as both an accepted taxon
        // and a synonym of another taxon (a species split), so the claim
        // key carries the synonym target as well as name and kingdom.
        let key = ClaimKey {
            name: canonical_basic.to_lowercase(),
            kingdom: row
                .kingdom
                .as_deref()
                .map(|k| k.trim().to_lowercase())
                .unwrap_or_default(),
            synonym_of: row.accepted_lsid.clone().unwrap_or_default(),
        };
        if !claimed.insert(key) {
            return RowOutcome::Duplicate;
        }

        let authorship = row
            .author
            .as_deref()
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .map(str::to_string)
            .or_else(|| parsed.authorship().map(str::to_string));
        let name_complete = build_name_complete(
            &cleaned.name,
            authorship.as_deref(),
            row.name_complete.as_deref(),
        );

        let mut other_names: Vec<String> = Vec::new();
        for candidate in [&cleaned.normalised, &cleaned.basic, &canonical] {
            if candidate != &cleaned.name && !other_names.contains(candidate) {
                other_names.push(candidate.clone());
            }
        }

        let (phrase, voucher) = match &parsed {
            ParsedName::Phrase(p) => (Some(p.clean_phrase.clone()), p.clean_voucher.clone()),
            _ => (None, None),
        };

        let keys = component_keys(&parsed);
        RowOutcome::Indexed(IndexRecord {
            id: next_id,
            lsid: row.lsid.clone(),
            accepted_lsid: row.accepted_lsid.clone(),
            name: cleaned.name.clone(),
            name_complete,
            authorship,
            rank,
            status,
            classification: Classification {
                kingdom: row.kingdom.clone(),
                phylum: row.phylum.clone(),
                class: row.class.clone(),
                order: row.order.clone(),
                family: row.family.clone(),
                genus: row.genus.clone(),
                species: row.species.clone(),
                subspecies: None,
                scientific_name: Some(cleaned.name.clone()),
                authorship: None,
            },
            other_names,
            phrase,
            voucher,
            dataset_id: dataset.id.clone(),
            priority,
            left: None,
            right: None,
            homonym: false,
        }, keys)
    }
}

enum RowOutcome {
    Indexed(IndexRecord, ComponentKeys),
    Duplicate,
    Skipped(String),
}

/// Treated keys of the name components, indexed so the resolver can fall
/// back to per-component fuzzy lookup when the whole-name key misses.
#[derive(Debug, Clone, Default)]
struct ComponentKeys {
    genus: Option<String>,
    epithet: Option<String>,
}

fn component_keys(parsed: &ParsedName) -> ComponentKeys {
    match parsed {
        ParsedName::WellFormed(n) | ParsedName::Placeholder(n) => ComponentKeys {
            genus: n.genus_or_monomial.as_deref().map(|g| treat_word(g, false)),
            epithet: n.specific_epithet.as_deref().map(|e| treat_word(e, true)),
        },
        ParsedName::Phrase(p) => ComponentKeys {
            genus: Some(treat_word(&p.genus, false)),
            epithet: p.specific_epithet.as_deref().map(|e| treat_word(e, true)),
        },
        ParsedName::Unparsable { .. } => ComponentKeys::default(),
    }
}

#[derive(PartialEq, Eq, Hash)]
struct ClaimKey {
    name: String,
    kingdom: String,
    synonym_of: String,
}

/// Flags every record whose canonical name is claimed in more than one
/// kingdom. Returns the number of flagged records.
fn flag_homonyms(records: &mut [IndexRecord]) -> usize {
    let mut kingdoms_by_name: HashMap<String, HashSet<String>> = HashMap::new();
    for r in records.iter() {
        let kingdom = r
            .classification
            .kingdom
            .as_deref()
            .map(|k| k.to_lowercase())
            .unwrap_or_default();
        kingdoms_by_name
            .entry(r.name.to_lowercase())
            .or_default()
            .insert(kingdom);
    }
    let mut flagged = 0;
    for r in records.iter_mut() {
        if kingdoms_by_name
            .get(&r.name.to_lowercase())
            .is_some_and(|k| k.len() >= 2)
        {
            r.homonym = true;
            flagged += 1;
        }
    }
    flagged
}

/// Assigns nested-set bounds over accepted records. The forest derives
/// from classification paths: a record's parent is the deepest populated
/// classification value that resolves to an accepted record of a strictly
/// broader rank with a consistent classification. The walk runs in
/// document order; synonyms carry no bounds.
fn assign_nested_set(records: &mut [IndexRecord]) {
    let n = records.len();
    let mut by_name: HashMap<String, usize> = HashMap::new();
    for (i, r) in records.iter().enumerate() {
        if !r.is_synonym() {
            by_name.entry(r.name.to_lowercase()).or_insert(i);
        }
    }

    let mut parent: Vec<Option<usize>> = vec![None; n];
    for (i, r) in records.iter().enumerate() {
        if r.is_synonym() {
            continue;
        }
        let c = &r.classification;
        let candidates = [
            &c.species, &c.genus, &c.family, &c.order, &c.class, &c.phylum, &c.kingdom,
        ];
        for value in candidates.into_iter().flatten() {
            if value.eq_ignore_ascii_case(&r.name) {
                continue;
            }
            if let Some(&p) = by_name.get(&value.to_lowercase()) {
                if p != i
                    && records[p].rank.id() < r.rank.id()
                    && records[p].classification.matches_non_null(&r.classification)
                {
                    parent[i] = Some(p);
                    break;
                }
            }
        }
    }

    let mut children: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut roots: Vec<usize> = Vec::new();
    for i in 0..n {
        if records[i].is_synonym() {
            continue;
        }
        match parent[i] {
            Some(p) => children[p].push(i),
            None => roots.push(i),
        }
    }

    enum Frame {
        Enter(usize),
        Exit(usize),
    }
    let mut counter: u64 = 0;
    let mut stack: Vec<Frame> = roots.iter().rev().map(|&r| Frame::Enter(r)).collect();
    while let Some(frame) = stack.pop() {
        match frame {
            Frame::Enter(i) => {
                counter += 1;
                records[i].left = Some(counter);
                stack.push(Frame::Exit(i));
                for &child in children[i].iter().rev() {
                    stack.push(Frame::Enter(child));
                }
            }
            Frame::Exit(i) => {
                counter += 1;
                records[i].right = Some(counter);
            }
        }
    }
}

fn to_document(
    record: &IndexRecord,
    keys: &ComponentKeys,
    common_names: &[String],
) -> Result<Document, BuildError> {
    let mut doc = Document::new()
        .int(schema::ID, record.id as i64)
        .text(schema::LSID, &record.lsid)
        .text_opt(schema::ACCEPTED_LSID, record.accepted_lsid.as_deref())
        .text(schema::NAME, &record.name)
        .text(schema::RANK, record.rank.name())
        .int(schema::RANK_ID, i64::from(record.rank.id()))
        .text_opt(schema::AUTHOR, record.authorship.as_deref())
        .text(schema::DATASET_ID, &record.dataset_id)
        .int(schema::PRIORITY, i64::from(record.priority))
        .text(schema::HOMONYM, if record.homonym { "true" } else { "false" })
        .text(
            schema::STATUS,
            match record.status {
                TaxonomicStatus::Accepted => "accepted",
                TaxonomicStatus::Synonym => "synonym",
                TaxonomicStatus::Misapplied => "misapplied",
                TaxonomicStatus::Excluded => "excluded",
            },
        );
    if record.name_complete != record.name {
        doc = doc.text(schema::NAME, &record.name_complete);
    }
    for other in &record.other_names {
        doc = doc.text(schema::OTHER_NAMES, other);
    }
    let canonical = record
        .other_names
        .last()
        .map(String::as_str)
        .unwrap_or(&record.name);
    doc = doc
        .text(schema::PHONETIC, phonetic_key(canonical))
        .text_opt(schema::PHONETIC_GENUS, keys.genus.as_deref())
        .text_opt(schema::PHONETIC_EPITHET, keys.epithet.as_deref());
    let c = &record.classification;
    doc = doc
        .text_opt(schema::KINGDOM, c.kingdom.as_deref())
        .text_opt(schema::PHYLUM, c.phylum.as_deref())
        .text_opt(schema::CLASS, c.class.as_deref())
        .text_opt(schema::ORDER, c.order.as_deref())
        .text_opt(schema::FAMILY, c.family.as_deref())
        .text_opt(schema::GENUS, c.genus.as_deref())
        .text_opt(schema::SPECIES, c.species.as_deref())
        .text_opt(schema::PHRASE, record.phrase.as_deref())
        .text_opt(schema::VOUCHER, record.voucher.as_deref());
    if let Some(left) = record.left {
        doc = doc.int(schema::LEFT, left as i64);
    }
    if let Some(right) = record.right {
        doc = doc.int(schema::RIGHT, right as i64);
    }
    for common in common_names {
        doc = doc.text(schema::COMMON_NAME, common);
    }
    doc = doc.text(schema::RECORD, serde_json::to_string(record)?);
    Ok(doc)
}
