//! The read-time match cascade.
//!
//! [`MatchResolver`] resolves a supplied name against a committed store.
//! Stages run in order of reliability; the first stage with a hit wins:
//!
//! 1. exact match on the name field
//! 2. exact match on the alternate-names field
//! 3. phrase-component match, when the parser produced a phrase name
//! 4. phonetic-key match on the supplied string, whole-name key first,
//!    then the per-component keys of a binomial
//! 5. authorship-strip retry: recurse once on the canonical form,
//!    reporting a canonical match
//! 6. empty result
//!
//! An empty result is a valid outcome. Errors are reserved for conditions
//! the caller must arbitrate, chiefly unresolvable homonyms. The read path
//! is pure and synchronous over the committed store.

use once_cell::sync::Lazy;
use regex::Regex;

use taxamatch_backend_memory::{DocumentStore, Query, StoreError};
use taxamatch_features::{is_close_match, phonetic_key, treat_word, CleanedName};
use taxamatch_index::schema;
use taxamatch_model::{
    Classification, IndexRecord, MatchResult, MatchType, NameQuality, ParsedName, RankType,
};
use taxamatch_parser::NameParser;

/// Kingdom hints tolerate a misspelling this far from a stored kingdom.
const KINGDOM_MAX_LENGTH_DIFF: usize = 3;
const KINGDOM_MAX_EDIT_DIST: usize = 3;

#[derive(Debug, thiserror::Error)]
pub enum MatchError {
    /// The name is a cross-kingdom homonym and no hint singles a record
    /// out. Candidates are returned for the caller to arbitrate.
    #[error("unresolvable homonym {name:?} ({} candidates)", candidates.len())]
    Homonym {
        name: String,
        candidates: Vec<IndexRecord>,
    },
    #[error("store error: {0}")]
    Store(#[from] StoreError),
    #[error("search failed: {0}")]
    Search(String),
}

/// One resolution request. `rank` is a mandatory filter; `kingdom` and
/// `genus` are boosts plus homonym arbitration hints.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub name: String,
    pub rank: Option<RankType>,
    pub kingdom: Option<String>,
    pub genus: Option<String>,
    pub max_results: usize,
}

impl SearchRequest {
    pub fn new(name: impl Into<String>) -> SearchRequest {
        SearchRequest {
            name: name.into(),
            rank: None,
            kingdom: None,
            genus: None,
            max_results: 10,
        }
    }

    pub fn with_rank(mut self, rank: RankType) -> SearchRequest {
        self.rank = Some(rank);
        self
    }

    pub fn with_kingdom(mut self, kingdom: impl Into<String>) -> SearchRequest {
        self.kingdom = Some(kingdom.into());
        self
    }
}

static SPECIES_PLURAL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bspp\.?(\s|$)").unwrap());
static AFFINITY_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\baff\.?\s+").unwrap());
static CONFER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bcf\.?\s+").unwrap());
static INDETERMINATE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+sp\.?$").unwrap());

pub struct MatchResolver<S: DocumentStore> {
    store: S,
    parser: NameParser,
}

impl<S: DocumentStore> MatchResolver<S> {
    pub fn new(store: S) -> MatchResolver<S> {
        MatchResolver {
            store,
            parser: NameParser::new(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Resolves a name through the cascade.
    pub fn search(&self, request: SearchRequest) -> Result<MatchResult, MatchError> {
        let mut quality = Vec::new();
        let name = match self.preprocess(&request.name, &mut quality)? {
            Some(name) => name,
            None => {
                let mut result = MatchResult::empty();
                result.quality = quality;
                return Ok(result);
            }
        };
        let mut result = self.cascade(&name, &request, 0)?;
        for flag in quality {
            result = result.with_quality(flag);
        }
        Ok(result)
    }

    /// Direct lookup by record identifier.
    pub fn search_by_id(&self, id: u64) -> Result<MatchResult, MatchError> {
        let query = Query::range(schema::ID, id as i64, id as i64);
        let records = self.fetch(&query, 1)?;
        Ok(match records.into_iter().next() {
            Some(record) => {
                let name = record.name.clone();
                MatchResult::hit(record, MatchType::TaxonId, name)
            }
            None => MatchResult::empty(),
        })
    }

    /// Direct lookup by source identifier.
    pub fn search_by_lsid(&self, lsid: &str) -> Result<MatchResult, MatchError> {
        Ok(match self.record_by_lsid(lsid)? {
            Some(record) => {
                let name = record.name.clone();
                MatchResult::hit(record, MatchType::TaxonId, name)
            }
            None => MatchResult::empty(),
        })
    }

    /// Lookup by vernacular name.
    pub fn search_common_name(&self, common_name: &str) -> Result<MatchResult, MatchError> {
        let query = Query::term(schema::COMMON_NAME, common_name);
        let records = self.fetch(&query, 1)?;
        Ok(match records.into_iter().next() {
            Some(record) => {
                let name = record.name.clone();
                MatchResult::hit(record, MatchType::Vernacular, name)
            }
            None => MatchResult::empty(),
        })
    }

    /// Walks the supplied classification from its lowest populated level
    /// upward until something matches. A match above the lowest level is
    /// reported as a higher-classification match.
    pub fn search_classification(
        &self,
        classification: &Classification,
    ) -> Result<MatchResult, MatchError> {
        const DESCENDING: [RankType; 8] = [
            RankType::Subspecies,
            RankType::Species,
            RankType::Genus,
            RankType::Family,
            RankType::Order,
            RankType::Class,
            RankType::Phylum,
            RankType::Kingdom,
        ];
        let mut lowest = true;
        for rank in DESCENDING {
            let value = match classification.value_for(rank) {
                Some(v) => v,
                None => continue,
            };
            let request = SearchRequest {
                name: value.to_string(),
                rank: Some(rank),
                kingdom: classification.kingdom.clone(),
                genus: classification.genus.clone(),
                max_results: 10,
            };
            match self.search(request) {
                Ok(result) if !result.is_empty() => {
                    let mut result = result;
                    if !lowest {
                        result.match_type = Some(MatchType::HigherClassification);
                    }
                    return Ok(result);
                }
                // keep walking upward on a miss
                Ok(_) => {}
                Err(MatchError::Homonym { .. }) if !lowest => {}
                Err(e) => return Err(e),
            }
            lowest = false;
        }
        Ok(MatchResult::empty())
    }

    fn cascade(
        &self,
        name: &str,
        request: &SearchRequest,
        depth: usize,
    ) -> Result<MatchResult, MatchError> {
        let cleaned = CleanedName::new(name);
        let parsed = self.parser.parse(&cleaned.basic);
        let canonical = parsed.canonical_name();

        // stage 1: the name field, through each cleaning stage
        let mut candidates = vec![cleaned.name.as_str()];
        if cleaned.has_normalised() {
            candidates.push(cleaned.normalised.as_str());
        }
        if cleaned.has_basic() {
            candidates.push(cleaned.basic.as_str());
        }
        for candidate in &candidates {
            let records = self.query_term(schema::NAME, candidate, request)?;
            if !records.is_empty() {
                return self.resolve(records, MatchType::Exact, candidate, request);
            }
        }

        // stage 2: alternate names
        for candidate in &candidates {
            let records = self.query_term(schema::OTHER_NAMES, candidate, request)?;
            if !records.is_empty() {
                return self.resolve(records, MatchType::Canonical, candidate, request);
            }
        }

        // stage 3: phrase components
        if let ParsedName::Phrase(phrase) = &parsed {
            let mut should = vec![Query::term(schema::GENUS, &phrase.genus)];
            if let Some(voucher) = &phrase.clean_voucher {
                should.push(Query::term(schema::VOUCHER, voucher));
            }
            if let Some(epithet) = &phrase.specific_epithet {
                should.push(Query::term(schema::SPECIES, epithet));
            }
            let query = Query::boolean(
                vec![Query::term(schema::PHRASE, &phrase.clean_phrase)],
                should,
            );
            let records = self.fetch(&query, request.max_results)?;
            if !records.is_empty() {
                return self.resolve(records, MatchType::Phrase, &cleaned.basic, request);
            }
        }

        // stage 4: phonetic key of the supplied string. The index holds
        // keys of canonical names, so authorship in the input keeps this
        // stage from firing and the retry below handles it instead.
        let key = phonetic_key(&cleaned.basic);
        if !key.is_empty() {
            let records = self.query_term(schema::PHONETIC, &key, request)?;
            if !records.is_empty() {
                return self.resolve(records, MatchType::Phonetic, &cleaned.basic, request);
            }
        }
        // per-component keys catch what the whole-name key cannot, such
        // as gendered epithet endings. Skipped when authorship is still
        // attached; the retry below strips it and comes back through here.
        if canonical == cleaned.name {
            if let Some((genus, epithet)) = epithet_components(&parsed) {
                let must = vec![
                    Query::term(schema::PHONETIC_GENUS, treat_word(genus, false)),
                    Query::term(schema::PHONETIC_EPITHET, treat_word(epithet, true)),
                ];
                let records = self.run_query(must, request)?;
                if !records.is_empty() {
                    return self.resolve(records, MatchType::Phonetic, &cleaned.basic, request);
                }
            }
        }

        // stage 5: strip authorship and retry once
        if depth == 0 && !canonical.is_empty() && canonical != cleaned.name {
            let mut result = self.cascade(&canonical, request, depth + 1)?;
            if !result.is_empty() {
                result.match_type = Some(MatchType::Canonical);
                result.cleaned_name = Some(canonical);
                return Ok(result);
            }
        }

        tracing::debug!(name, "no match");
        Ok(MatchResult::empty())
    }

    /// Pre-checks on the raw name. `Ok(None)` means the search is over
    /// before it starts (plural species markers).
    fn preprocess(
        &self,
        raw: &str,
        quality: &mut Vec<NameQuality>,
    ) -> Result<Option<String>, MatchError> {
        let mut name = raw.split_whitespace().collect::<Vec<_>>().join(" ");
        if name.is_empty() {
            return Err(MatchError::Search("no name supplied".to_string()));
        }
        if is_bare_rank_marker(&name) {
            return Err(MatchError::Search(format!(
                "{name:?} is a rank marker, not a name"
            )));
        }
        if SPECIES_PLURAL_RE.is_match(&name) {
            quality.push(NameQuality::SpeciesPlural);
            return Ok(None);
        }
        if name.contains('?') {
            quality.push(NameQuality::QuestionSpecies);
            name = name.replace('?', " ");
        }
        if AFFINITY_RE.is_match(&name) {
            quality.push(NameQuality::AffinitySpecies);
            name = AFFINITY_RE.replace_all(&name, "").into_owned();
        }
        if CONFER_RE.is_match(&name) {
            quality.push(NameQuality::ConferSpecies);
            name = CONFER_RE.replace_all(&name, "").into_owned();
        }
        if INDETERMINATE_RE.is_match(&name) {
            quality.push(NameQuality::IndeterminateSpecies);
            name = INDETERMINATE_RE.replace_all(&name, "").into_owned();
        }
        let name = name.split_whitespace().collect::<Vec<_>>().join(" ");
        if name.is_empty() {
            return Err(MatchError::Search("no name supplied".to_string()));
        }
        Ok(Some(name))
    }

    /// Applies the result checks to the hit list: excluded preference,
    /// homonym arbitration, parent-child synonym detection, status flags.
    fn resolve(
        &self,
        records: Vec<IndexRecord>,
        match_type: MatchType,
        cleaned_name: &str,
        request: &SearchRequest,
    ) -> Result<MatchResult, MatchError> {
        use taxamatch_model::TaxonomicStatus;

        let mut quality = Vec::new();

        // prefer a non-excluded record when both appear
        let chosen = match records
            .iter()
            .position(|r| r.status != TaxonomicStatus::Excluded)
        {
            Some(i) => records[i].clone(),
            None => {
                quality.push(NameQuality::Excluded);
                records[0].clone()
            }
        };

        let chosen = if chosen.homonym {
            quality.push(NameQuality::Homonym);
            self.arbitrate_homonym(chosen, &records, request, cleaned_name)?
        } else {
            chosen
        };

        let chosen = match self.resolve_parent_child(&records)? {
            Some(accepted) => {
                quality.push(NameQuality::ParentChildSynonym);
                accepted
            }
            None => chosen,
        };

        if chosen.status == TaxonomicStatus::Misapplied {
            quality.push(NameQuality::Misapplied);
        }
        if chosen.status == TaxonomicStatus::Excluded && !quality.contains(&NameQuality::Excluded) {
            quality.push(NameQuality::Excluded);
        }

        let mut result = MatchResult::hit(chosen, match_type, cleaned_name.to_string());
        for flag in quality {
            result = result.with_quality(flag);
        }
        Ok(result)
    }

    /// A kingdom hint picks out the candidate whose kingdom matches
    /// exactly or within the close-match bounds; with no usable hint the
    /// caller gets the full candidate set back as an error.
    fn arbitrate_homonym(
        &self,
        chosen: IndexRecord,
        records: &[IndexRecord],
        request: &SearchRequest,
        cleaned_name: &str,
    ) -> Result<IndexRecord, MatchError> {
        if let Some(hint) = request.kingdom.as_deref() {
            if let Some(resolved) = records.iter().find(|r| {
                r.classification.kingdom.as_deref().is_some_and(|k| {
                    is_close_match(hint, k, KINGDOM_MAX_LENGTH_DIFF, KINGDOM_MAX_EDIT_DIST)
                })
            }) {
                return Ok(resolved.clone());
            }
        }
        // a single candidate needs no arbitration even when flagged
        if records.len() == 1 {
            return Ok(chosen);
        }
        Err(MatchError::Homonym {
            name: cleaned_name.to_string(),
            candidates: records.to_vec(),
        })
    }

    /// Detects the species-split shape: the hits contain both an accepted
    /// record and a synonym whose target is an ancestor of that record.
    /// Resolution goes to the child.
    fn resolve_parent_child(
        &self,
        records: &[IndexRecord],
    ) -> Result<Option<IndexRecord>, MatchError> {
        for synonym in records.iter().filter(|r| r.is_synonym()) {
            let target_lsid = match &synonym.accepted_lsid {
                Some(lsid) => lsid,
                None => continue,
            };
            let target = match self.record_by_lsid(target_lsid)? {
                Some(t) => t,
                None => continue,
            };
            for accepted in records.iter().filter(|r| !r.is_synonym()) {
                if target.contains(accepted) {
                    return Ok(Some(accepted.clone()));
                }
            }
        }
        Ok(None)
    }

    fn record_by_lsid(&self, lsid: &str) -> Result<Option<IndexRecord>, MatchError> {
        let records = self.fetch(&Query::term(schema::LSID, lsid), 1)?;
        Ok(records.into_iter().next())
    }

    fn query_term(
        &self,
        field: &str,
        value: &str,
        request: &SearchRequest,
    ) -> Result<Vec<IndexRecord>, MatchError> {
        self.run_query(vec![Query::term(field, value)], request)
    }

    /// Runs the given must clauses with the request's rank filter and
    /// kingdom/genus boosts applied.
    fn run_query(
        &self,
        mut must: Vec<Query>,
        request: &SearchRequest,
    ) -> Result<Vec<IndexRecord>, MatchError> {
        if let Some(rank) = request.rank {
            let id = i64::from(rank.id());
            must.push(Query::range(schema::RANK_ID, id, id));
        }
        let mut should = Vec::new();
        if let Some(kingdom) = &request.kingdom {
            should.push(Query::term(schema::KINGDOM, kingdom));
        }
        if let Some(genus) = &request.genus {
            should.push(Query::term(schema::GENUS, genus));
        }
        self.fetch(&Query::boolean(must, should), request.max_results)
    }

    fn fetch(&self, query: &Query, limit: usize) -> Result<Vec<IndexRecord>, MatchError> {
        let hits = self.store.search(query, limit)?;
        let mut records = Vec::with_capacity(hits.len());
        for hit in hits {
            let doc = self.store.doc(hit.doc_id)?;
            let json = doc
                .first_text(schema::RECORD)
                .ok_or_else(|| MatchError::Search("document has no stored record".to_string()))?;
            let record: IndexRecord = serde_json::from_str(json)
                .map_err(|e| MatchError::Search(format!("stored record is unreadable: {e}")))?;
            records.push(record);
        }
        Ok(records)
    }
}

fn epithet_components(parsed: &ParsedName) -> Option<(&str, &str)> {
    match parsed {
        ParsedName::WellFormed(n) | ParsedName::Placeholder(n) => Some((
            n.genus_or_monomial.as_deref()?,
            n.specific_epithet.as_deref()?,
        )),
        _ => None,
    }
}

fn is_bare_rank_marker(name: &str) -> bool {
    let mut tokens = name.split_whitespace();
    let first = match tokens.next() {
        Some(t) => t,
        None => return false,
    };
    if tokens.next().is_some() {
        return false;
    }
    let bare = first.trim_end_matches('.').to_lowercase();
    RankType::from_name(&bare).is_some()
        || matches!(bare.as_str(), "sp" | "spp" | "ssp" | "subsp" | "var" | "cv" | "f")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use taxamatch_backend_memory::MemoryStore;
    use taxamatch_index::{IndexBuilder, PriorityConfig, SourceDataset, SourceRow};

    fn plant(lsid: &str, name: &str, rank: &str) -> SourceRow {
        SourceRow {
            lsid: lsid.to_string(),
            name: name.to_string(),
            rank: Some(rank.to_string()),
            kingdom: Some("Plantae".to_string()),
            ..SourceRow::default()
        }
    }

    fn resolver() -> MatchResolver<MemoryStore> {
        let dataset = SourceDataset {
            id: "dr1".to_string(),
            rows: vec![
                plant("p:1", "Plantae", "kingdom"),
                SourceRow {
                    genus: Some("Acacia".to_string()),
                    ..plant("p:2", "Acacia", "genus")
                },
                SourceRow {
                    genus: Some("Acacia".to_string()),
                    author: Some("Link".to_string()),
                    vernacular_names: vec!["Silver Wattle".to_string()],
                    ..plant("p:3", "Acacia dealbata", "species")
                },
                SourceRow {
                    accepted_lsid: Some("p:3".to_string()),
                    status: Some("synonym".to_string()),
                    ..plant("p:4", "Racosperma dealbatum", "species")
                },
                SourceRow {
                    genus: Some("Goodenia".to_string()),
                    ..plant(
                        "p:5",
                        "Goodenia sp. Bachsten Creek (M.D. Barrett 685) WA Herbarium",
                        "species",
                    )
                },
                SourceRow {
                    lsid: "f:1".to_string(),
                    name: "Morganella".to_string(),
                    rank: Some("genus".to_string()),
                    kingdom: Some("Fungi".to_string()),
                    ..SourceRow::default()
                },
                SourceRow {
                    lsid: "a:1".to_string(),
                    name: "Morganella".to_string(),
                    rank: Some("genus".to_string()),
                    kingdom: Some("Animalia".to_string()),
                    ..SourceRow::default()
                },
                // species split: the name is both an accepted species and
                // a synonym of its own genus
                SourceRow {
                    genus: Some("Corybas".to_string()),
                    ..plant("p:6", "Corybas", "genus")
                },
                SourceRow {
                    genus: Some("Corybas".to_string()),
                    ..plant("p:7", "Corybas unguiculatus", "species")
                },
                SourceRow {
                    accepted_lsid: Some("p:6".to_string()),
                    status: Some("synonym".to_string()),
                    genus: Some("Corybas".to_string()),
                    ..plant("p:8", "Corybas unguiculatus", "species")
                },
                SourceRow {
                    genus: Some("Acacia".to_string()),
                    ..plant("p:9", "Acacia elegantas", "species")
                },
            ],
        };
        let builder = IndexBuilder::new(PriorityConfig::default());
        let (store, _) = builder.build(&[dataset]).unwrap();
        MatchResolver::new(store)
    }

    #[test]
    fn exact_match_wins() {
        let r = resolver();
        let result = r.search(SearchRequest::new("Acacia dealbata")).unwrap();
        assert_eq!(result.match_type, Some(MatchType::Exact));
        assert_eq!(result.record.unwrap().lsid, "p:3");
    }

    #[test]
    fn exact_beats_phonetic() {
        let r = resolver();
        let result = r.search(SearchRequest::new("Acacia")).unwrap();
        assert_eq!(result.match_type, Some(MatchType::Exact));
        assert_eq!(result.record.unwrap().lsid, "p:2");
    }

    #[test]
    fn misspelling_falls_through_to_phonetic() {
        let r = resolver();
        let result = r.search(SearchRequest::new("Acacia dealbatta")).unwrap();
        assert_eq!(result.match_type, Some(MatchType::Phonetic));
        assert_eq!(result.record.unwrap().lsid, "p:3");
    }

    #[test]
    fn gendered_epithet_matches_through_component_keys() {
        let r = resolver();
        // the whole-name keys differ; only the treated epithet keys collide
        let result = r.search(SearchRequest::new("Acacia elegantis")).unwrap();
        assert_eq!(result.match_type, Some(MatchType::Phonetic));
        assert_eq!(result.record.unwrap().lsid, "p:9");
    }

    #[test]
    fn authorship_strips_to_canonical_match() {
        let r = resolver();
        let result = r
            .search(SearchRequest::new("Acacia dealbata Benth."))
            .unwrap();
        assert_eq!(result.match_type, Some(MatchType::Canonical));
        assert_eq!(result.cleaned_name.as_deref(), Some("Acacia dealbata"));
        assert_eq!(result.record.unwrap().lsid, "p:3");
    }

    #[test]
    fn complete_name_matches_exactly() {
        let r = resolver();
        let result = r.search(SearchRequest::new("Acacia dealbata Link")).unwrap();
        assert_eq!(result.match_type, Some(MatchType::Exact));
        assert_eq!(result.record.unwrap().lsid, "p:3");
    }

    #[test]
    fn phrase_name_matches_through_components() {
        let r = resolver();
        // voucher formatted differently from the stored form
        let result = r
            .search(SearchRequest::new(
                "Goodenia sp. Bachsten Creek (M.D.Barrett 685)",
            ))
            .unwrap();
        assert_eq!(result.match_type, Some(MatchType::Phrase));
        assert_eq!(result.record.unwrap().lsid, "p:5");
    }

    #[test]
    fn synonym_resolves_with_accepted_pointer() {
        let r = resolver();
        let result = r.search(SearchRequest::new("Racosperma dealbatum")).unwrap();
        let record = result.record.unwrap();
        assert!(record.is_synonym());
        assert_eq!(record.accepted_lsid.as_deref(), Some("p:3"));
    }

    #[test]
    fn homonym_without_hint_is_an_error() {
        let r = resolver();
        let err = r.search(SearchRequest::new("Morganella")).unwrap_err();
        match err {
            MatchError::Homonym { candidates, .. } => assert_eq!(candidates.len(), 2),
            other => panic!("expected homonym error, got {other:?}"),
        }
    }

    #[test]
    fn kingdom_hint_resolves_homonyms() {
        let r = resolver();
        let result = r
            .search(SearchRequest::new("Morganella").with_kingdom("Animalia"))
            .unwrap();
        assert_eq!(result.record.unwrap().lsid, "a:1");
        // a close misspelling still resolves
        let result = r
            .search(SearchRequest::new("Morganella").with_kingdom("Animallia"))
            .unwrap();
        assert_eq!(result.record.unwrap().lsid, "a:1");
        assert!(result.quality.contains(&NameQuality::Homonym));
    }

    #[test]
    fn far_off_kingdom_hint_does_not_resolve() {
        let r = resolver();
        let err = r
            .search(SearchRequest::new("Morganella").with_kingdom("Protista"))
            .unwrap_err();
        assert!(matches!(err, MatchError::Homonym { .. }));
    }

    #[test]
    fn species_plural_yields_flagged_empty_result() {
        let r = resolver();
        let result = r.search(SearchRequest::new("Acacia spp.")).unwrap();
        assert!(result.is_empty());
        assert!(result.quality.contains(&NameQuality::SpeciesPlural));
    }

    #[test]
    fn bare_rank_marker_is_rejected() {
        let r = resolver();
        assert!(matches!(
            r.search(SearchRequest::new("sp.")),
            Err(MatchError::Search(_))
        ));
        assert!(matches!(
            r.search(SearchRequest::new("genus")),
            Err(MatchError::Search(_))
        ));
    }

    #[test]
    fn uncertainty_markers_flag_but_still_match() {
        let r = resolver();
        let result = r.search(SearchRequest::new("Acacia aff. dealbata")).unwrap();
        assert!(result.quality.contains(&NameQuality::AffinitySpecies));
        assert_eq!(result.record.unwrap().lsid, "p:3");

        let result = r.search(SearchRequest::new("Acacia cf. dealbata")).unwrap();
        assert!(result.quality.contains(&NameQuality::ConferSpecies));

        let result = r.search(SearchRequest::new("Acacia dealbata?")).unwrap();
        assert!(result.quality.contains(&NameQuality::QuestionSpecies));
    }

    #[test]
    fn indeterminate_species_matches_the_genus() {
        let r = resolver();
        let result = r.search(SearchRequest::new("Acacia sp.")).unwrap();
        assert!(result.quality.contains(&NameQuality::IndeterminateSpecies));
        assert_eq!(result.record.unwrap().lsid, "p:2");
    }

    #[test]
    fn rank_filter_is_mandatory() {
        let r = resolver();
        let result = r
            .search(SearchRequest::new("Acacia").with_rank(RankType::Species))
            .unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn parent_child_synonym_resolves_to_child() {
        let r = resolver();
        let result = r.search(SearchRequest::new("Corybas unguiculatus")).unwrap();
        assert!(result.quality.contains(&NameQuality::ParentChildSynonym));
        let record = result.record.unwrap();
        assert_eq!(record.lsid, "p:7");
        assert!(!record.is_synonym());
    }

    #[test]
    fn id_lookups() {
        let r = resolver();
        let by_lsid = r.search_by_lsid("p:3").unwrap();
        assert_eq!(by_lsid.match_type, Some(MatchType::TaxonId));
        let id = by_lsid.record.as_ref().unwrap().id;
        let by_id = r.search_by_id(id).unwrap();
        assert_eq!(by_id.record.unwrap().lsid, "p:3");
        assert!(r.search_by_lsid("nope").unwrap().is_empty());
    }

    #[test]
    fn common_name_lookup() {
        let r = resolver();
        let result = r.search_common_name("Silver Wattle").unwrap();
        assert_eq!(result.match_type, Some(MatchType::Vernacular));
        assert_eq!(result.record.unwrap().lsid, "p:3");
    }

    #[test]
    fn classification_walk_reports_higher_match() {
        let r = resolver();
        let c = Classification {
            kingdom: Some("Plantae".to_string()),
            genus: Some("Acacia".to_string()),
            species: Some("Acacia missingspecies".to_string()),
            ..Classification::default()
        };
        let result = r.search_classification(&c).unwrap();
        assert_eq!(result.match_type, Some(MatchType::HigherClassification));
        assert_eq!(result.record.unwrap().lsid, "p:2");
    }

    #[test]
    fn classification_walk_keeps_direct_match_type() {
        let r = resolver();
        let c = Classification {
            kingdom: Some("Plantae".to_string()),
            genus: Some("Acacia".to_string()),
            species: Some("Acacia dealbata".to_string()),
            ..Classification::default()
        };
        let result = r.search_classification(&c).unwrap();
        assert_eq!(result.match_type, Some(MatchType::Exact));
    }

    #[test]
    fn no_match_is_an_empty_result_not_an_error() {
        let r = resolver();
        let result = r.search(SearchRequest::new("Zyzomys argurus")).unwrap();
        assert!(result.is_empty());
    }
}
