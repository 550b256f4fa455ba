//! Proximity query descriptor, continuation token, and ranked results.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use super::{GeoPoint, RecordFilter, RecordId, SpatialRecord};
use crate::error::{CivicmapError, Result};

/// Page size used when the caller does not ask for one
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Hard ceiling on results per page
pub const MAX_PAGE_SIZE: usize = 20;

/// Continuation state for "load more": the last seen (distance, identifier) pair.
///
/// Wire form is `"<distance>:<id>"`. Distances are formatted with the shortest
/// representation that parses back to the same `f64`, so a token survives the
/// round trip through a client unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ResumeToken {
    distance: f64,
    id: RecordId,
}

impl ResumeToken {
    pub fn new(distance: f64, id: RecordId) -> Result<Self> {
        // -0.0 would sort before every zero-distance record under total_cmp
        let distance = if distance == 0.0 { 0.0 } else { distance };
        let token = Self { distance, id };
        token.validate()?;
        Ok(token)
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn id(&self) -> RecordId {
        self.id
    }

    /// Distance must be finite and non-negative
    pub fn validate(&self) -> Result<()> {
        if !self.distance.is_finite() {
            return Err(CivicmapError::InvalidCursor {
                reason: format!("distance {} is not finite", self.distance),
            });
        }
        if self.distance < 0.0 {
            return Err(CivicmapError::InvalidCursor {
                reason: format!("distance {} is negative", self.distance),
            });
        }
        Ok(())
    }
}

impl fmt::Display for ResumeToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.distance, self.id)
    }
}

impl FromStr for ResumeToken {
    type Err = CivicmapError;

    fn from_str(s: &str) -> Result<Self> {
        let malformed = || CivicmapError::InvalidCursor {
            reason: format!("expected '<distance>:<id>', got '{}'", s),
        };

        let (distance, id) = s.split_once(':').ok_or_else(malformed)?;
        let distance: f64 = distance.trim().parse().map_err(|_| malformed())?;
        let id: u64 = id.trim().parse().map_err(|_| malformed())?;

        ResumeToken::new(distance, RecordId(id))
    }
}

impl TryFrom<String> for ResumeToken {
    type Error = CivicmapError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<ResumeToken> for String {
    fn from(token: ResumeToken) -> Self {
        token.to_string()
    }
}

/// A single proximity search request
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProximityQuery {
    pub origin: GeoPoint,
    pub resume_after: Option<ResumeToken>,
    pub page_size: usize,
    /// Passed through to the record store; orthogonal to ranking
    pub filter: RecordFilter,
}

impl ProximityQuery {
    /// First-page query with the default page size
    pub fn new(origin: GeoPoint) -> Self {
        Self {
            origin,
            resume_after: None,
            page_size: DEFAULT_PAGE_SIZE,
            filter: RecordFilter::default(),
        }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn resume_after(mut self, token: ResumeToken) -> Self {
        self.resume_after = Some(token);
        self
    }

    pub fn with_filter(mut self, filter: RecordFilter) -> Self {
        self.filter = filter;
        self
    }
}

/// A record annotated with its distance (meters) from the query origin
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RankedResult {
    pub record: SpatialRecord,
    pub distance: f64,
}

impl RankedResult {
    pub fn new(record: SpatialRecord, distance: f64) -> Self {
        Self { record, distance }
    }

    pub fn id(&self) -> RecordId {
        self.record.id
    }

    /// Total order: ascending distance, ties broken by ascending identifier
    pub fn rank_cmp(&self, other: &Self) -> Ordering {
        self.distance.total_cmp(&other.distance).then_with(|| self.id().cmp(&other.id()))
    }

    /// True when this result ranks strictly after the token's position
    pub fn ranks_after(&self, token: &ResumeToken) -> bool {
        self.distance
            .total_cmp(&token.distance)
            .then_with(|| self.id().cmp(&token.id))
            .is_gt()
    }

    pub fn resume_token(&self) -> ResumeToken {
        ResumeToken { distance: self.distance, id: self.id() }
    }
}

/// One page of ranked results
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProximityPage {
    pub results: Vec<RankedResult>,
    pub has_more: bool,
}

impl ProximityPage {
    /// Token for the next page, present only when more results exist
    pub fn next_resume(&self) -> Option<ResumeToken> {
        if !self.has_more {
            return None;
        }
        self.results.last().map(RankedResult::resume_token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ranked(id: u64, distance: f64) -> RankedResult {
        let point = GeoPoint::new(0.0, 0.0).unwrap();
        RankedResult::new(SpatialRecord::new(RecordId(id), point), distance)
    }

    #[test]
    fn test_token_round_trip_is_exact() {
        let distance = 1000.0_f64 / 3.0;
        let token = ResumeToken::new(distance, RecordId(42)).unwrap();
        let parsed: ResumeToken = token.to_string().parse().unwrap();
        assert_eq!(parsed, token);
        assert_eq!(parsed.distance().to_bits(), distance.to_bits());
    }

    #[test]
    fn test_token_rejects_malformed() {
        for input in ["", "12.5", "abc:1", "12.5:x", "12.5:-1", "-1.0:3", "NaN:3", "inf:3"] {
            let err = input.parse::<ResumeToken>().unwrap_err();
            assert!(matches!(err, CivicmapError::InvalidCursor { .. }), "input {input:?}");
        }
    }

    #[test]
    fn test_token_serde_uses_string_form() {
        let token = ResumeToken::new(0.5, RecordId(3)).unwrap();
        let json = serde_json::to_string(&token).unwrap();
        assert_eq!(json, r#""0.5:3""#);

        let parsed: ResumeToken = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, token);
        assert!(serde_json::from_str::<ResumeToken>(r#""-2:3""#).is_err());
    }

    #[test]
    fn test_negative_zero_token_resumes_like_zero() {
        let token: ResumeToken = "-0:3".parse().unwrap();
        assert!(!ranked(2, 0.0).ranks_after(&token));
        assert!(ranked(4, 0.0).ranks_after(&token));
    }

    #[test]
    fn test_rank_cmp_breaks_ties_by_id() {
        assert!(ranked(1, 5.0).rank_cmp(&ranked(2, 5.0)).is_lt());
        assert!(ranked(9, 4.0).rank_cmp(&ranked(1, 5.0)).is_lt());
        assert!(ranked(3, 5.0).rank_cmp(&ranked(3, 5.0)).is_eq());
    }

    #[test]
    fn test_ranks_after_is_strict() {
        let token = ranked(5, 10.0).resume_token();
        assert!(!ranked(5, 10.0).ranks_after(&token));
        assert!(!ranked(4, 10.0).ranks_after(&token));
        assert!(ranked(6, 10.0).ranks_after(&token));
        assert!(ranked(1, 10.5).ranks_after(&token));
        assert!(!ranked(99, 9.5).ranks_after(&token));
    }

    #[test]
    fn test_next_resume_only_when_more() {
        let mut page = ProximityPage { results: vec![ranked(1, 1.0), ranked(2, 2.0)], has_more: true };
        assert_eq!(page.next_resume(), Some(ranked(2, 2.0).resume_token()));

        page.has_more = false;
        assert_eq!(page.next_resume(), None);
    }

    #[test]
    fn test_query_builder() {
        let origin = GeoPoint::new(50.0, 14.0).unwrap();
        let token = ResumeToken::new(3.0, RecordId(1)).unwrap();
        let query = ProximityQuery::new(origin).with_page_size(5).resume_after(token);

        assert_eq!(query.page_size, 5);
        assert_eq!(query.resume_after, Some(token));
        assert_eq!(ProximityQuery::new(origin).page_size, DEFAULT_PAGE_SIZE);
    }

    proptest! {
        #[test]
        fn prop_token_wire_form_is_lossless(distance in 0.0..2.1e7f64, id in any::<u64>()) {
            let token = ResumeToken::new(distance, RecordId(id)).unwrap();
            let parsed: ResumeToken = token.to_string().parse().unwrap();

            prop_assert_eq!(parsed.distance().to_bits(), token.distance().to_bits());
            prop_assert_eq!(parsed.id(), token.id());
        }

        #[test]
        fn prop_resume_excludes_token_position(
            distance in 0.0..1.0e4f64,
            id in 1u64..1000,
            other in 0.0..1.0e4f64,
            other_id in 1u64..1000,
        ) {
            let token = ranked(id, distance).resume_token();
            let candidate = ranked(other_id, other);

            // ranks_after agrees with the page order
            prop_assert_eq!(
                candidate.ranks_after(&token),
                candidate.rank_cmp(&ranked(id, distance)).is_gt()
            );
        }
    }
}
