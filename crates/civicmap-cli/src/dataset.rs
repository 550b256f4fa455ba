//! GeoJSON report loader

use anyhow::{bail, Context, Result};
use chrono::Utc;
use civicmap_core::models::{ActorId, GeoPoint, RecordId, Report, ReportState};
use civicmap_store::memory::MemoryReportStore;
use geojson::{Feature, GeoJson};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Reports read from a file, plus how many features could not be used
#[derive(Debug)]
pub struct Dataset {
    pub reports: Vec<Report>,
    pub skipped: usize,
}

impl Dataset {
    /// Load every report into a fresh in-memory store
    pub fn into_store(self) -> MemoryReportStore {
        let store = MemoryReportStore::new();
        for report in self.reports {
            store.insert(report);
        }
        store
    }
}

/// Read Point features from a GeoJSON file
///
/// Positions are `[lng, lat]` on disk. Features without a Point geometry are
/// skipped; a Point with out-of-range coordinates is an error.
pub fn load_reports(path: &Path) -> Result<Dataset> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let geojson: GeoJson = content
        .parse()
        .with_context(|| format!("Failed to parse GeoJSON in {}", path.display()))?;

    let features = match geojson {
        GeoJson::FeatureCollection(fc) => fc.features,
        GeoJson::Feature(feature) => vec![feature],
        GeoJson::Geometry(_) => bail!("{} holds a bare geometry; expected features", path.display()),
    };

    let explicit_ids: Vec<Option<u64>> = features.iter().map(feature_id).collect();
    // None once the id space above the largest explicit id is used up
    let mut next_id = explicit_ids.iter().flatten().max().map_or(Some(1), |max| max.checked_add(1));
    let mut seen = HashSet::new();

    let mut reports = Vec::with_capacity(features.len());
    let mut skipped = 0;

    for (idx, (feature, explicit)) in features.iter().zip(explicit_ids).enumerate() {
        let Some(location) = point_location(feature, idx)? else {
            tracing::warn!(feature = idx, "Skipping feature without Point geometry");
            skipped += 1;
            continue;
        };

        let id = match explicit {
            Some(id) => id,
            None => {
                let Some(id) = next_id else {
                    bail!("No id left to assign to feature {} in {}", idx, path.display());
                };
                next_id = id.checked_add(1);
                id
            }
        };
        if !seen.insert(id) {
            bail!("Duplicate feature id {} in {}", id, path.display());
        }

        reports.push(Report {
            id: RecordId(id),
            title: string_property(feature, "title").unwrap_or_else(|| format!("Report {}", id)),
            state: state_property(feature, idx)?,
            category_id: u64_property(feature, "category_id").unwrap_or(0),
            territory_id: u64_property(feature, "territory_id").unwrap_or(0),
            owner_id: ActorId(u64_property(feature, "owner_id").unwrap_or(0)),
            location,
            created_at: Utc::now(),
        });
    }

    tracing::debug!(path = %path.display(), loaded = reports.len(), skipped, "Loaded reports");

    Ok(Dataset { reports, skipped })
}

fn feature_id(feature: &Feature) -> Option<u64> {
    match &feature.id {
        Some(geojson::feature::Id::Number(n)) => n.as_u64(),
        Some(geojson::feature::Id::String(s)) => s.parse().ok(),
        None => u64_property(feature, "id"),
    }
}

fn point_location(feature: &Feature, idx: usize) -> Result<Option<GeoPoint>> {
    let Some(geometry) = &feature.geometry else {
        return Ok(None);
    };

    match &geometry.value {
        geojson::Value::Point(position) if position.len() >= 2 => {
            let (lng, lat) = (position[0], position[1]);
            let point = GeoPoint::new(lat, lng)
                .with_context(|| format!("Feature {} has invalid coordinates", idx))?;
            Ok(Some(point))
        }
        _ => Ok(None),
    }
}

fn state_property(feature: &Feature, idx: usize) -> Result<ReportState> {
    let Some(value) = feature.property("state") else {
        return Ok(ReportState::default());
    };

    let code = value
        .as_u64()
        .and_then(|code| u8::try_from(code).ok())
        .with_context(|| format!("Feature {} has a non-integer state {}", idx, value))?;
    ReportState::try_from(code).with_context(|| format!("Feature {} has an invalid state", idx))
}

fn string_property(feature: &Feature, key: &str) -> Option<String> {
    feature.property(key).and_then(|v| v.as_str()).map(str::to_string)
}

fn u64_property(feature: &Feature, key: &str) -> Option<u64> {
    feature.property(key).and_then(|v| v.as_u64())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_geojson(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_positions_are_longitude_first() {
        let file = write_geojson(
            r#"{
                "type": "FeatureCollection",
                "features": [
                    {
                        "type": "Feature",
                        "id": 12,
                        "geometry": { "type": "Point", "coordinates": [14.42, 50.08] },
                        "properties": { "title": "Pothole", "category_id": 3, "territory_id": 2 }
                    }
                ]
            }"#,
        );

        let dataset = load_reports(file.path()).unwrap();
        let report = &dataset.reports[0];

        assert_eq!(report.id, RecordId(12));
        assert_eq!(report.location.latitude(), 50.08);
        assert_eq!(report.location.longitude(), 14.42);
        assert_eq!(report.title, "Pothole");
        assert_eq!(report.category_id, 3);
        assert_eq!(report.territory_id, 2);
    }

    #[test]
    fn test_missing_ids_follow_explicit_ones() {
        let file = write_geojson(
            r#"{
                "type": "FeatureCollection",
                "features": [
                    { "type": "Feature", "geometry": { "type": "Point", "coordinates": [14.0, 50.0] }, "properties": null },
                    { "type": "Feature", "geometry": { "type": "Point", "coordinates": [14.1, 50.0] }, "properties": { "id": 5 } },
                    { "type": "Feature", "geometry": { "type": "Point", "coordinates": [14.2, 50.0] }, "properties": {} }
                ]
            }"#,
        );

        let dataset = load_reports(file.path()).unwrap();
        let ids: Vec<_> = dataset.reports.iter().map(|r| r.id.0).collect();

        assert_eq!(ids, vec![6, 5, 7]);
        assert_eq!(dataset.reports[0].title, "Report 6");
    }

    #[test]
    fn test_largest_id_does_not_overflow() {
        let lone = write_geojson(
            r#"{ "type": "Feature", "id": 18446744073709551615, "geometry": { "type": "Point", "coordinates": [14.0, 50.0] }, "properties": {} }"#,
        );
        let dataset = load_reports(lone.path()).unwrap();
        assert_eq!(dataset.reports[0].id, RecordId(u64::MAX));

        let needs_id = write_geojson(
            r#"{
                "type": "FeatureCollection",
                "features": [
                    { "type": "Feature", "id": 18446744073709551615, "geometry": { "type": "Point", "coordinates": [14.0, 50.0] }, "properties": {} },
                    { "type": "Feature", "geometry": { "type": "Point", "coordinates": [14.1, 50.0] }, "properties": {} }
                ]
            }"#,
        );
        let err = load_reports(needs_id.path()).unwrap_err();
        assert!(err.to_string().contains("No id left"));
    }

    #[test]
    fn test_state_property() {
        let file = write_geojson(
            r#"{
                "type": "FeatureCollection",
                "features": [
                    { "type": "Feature", "id": 1, "geometry": { "type": "Point", "coordinates": [14.0, 50.0] }, "properties": { "state": 2 } },
                    { "type": "Feature", "id": 2, "geometry": { "type": "Point", "coordinates": [14.1, 50.0] }, "properties": {} }
                ]
            }"#,
        );
        let dataset = load_reports(file.path()).unwrap();
        assert_eq!(dataset.reports[0].state, ReportState::Solved);
        assert_eq!(dataset.reports[1].state, ReportState::Waiting);

        let bad = write_geojson(
            r#"{ "type": "Feature", "id": 1, "geometry": { "type": "Point", "coordinates": [14.0, 50.0] }, "properties": { "state": 7 } }"#,
        );
        assert!(load_reports(bad.path()).is_err());
    }

    #[test]
    fn test_non_point_features_are_skipped() {
        let file = write_geojson(
            r#"{
                "type": "FeatureCollection",
                "features": [
                    { "type": "Feature", "geometry": { "type": "LineString", "coordinates": [[14.0, 50.0], [14.1, 50.1]] }, "properties": {} },
                    { "type": "Feature", "geometry": null, "properties": {} },
                    { "type": "Feature", "geometry": { "type": "Point", "coordinates": [14.0, 50.0] }, "properties": {} }
                ]
            }"#,
        );

        let dataset = load_reports(file.path()).unwrap();
        assert_eq!(dataset.reports.len(), 1);
        assert_eq!(dataset.skipped, 2);
    }

    #[test]
    fn test_out_of_range_point_is_an_error() {
        // Latitude-first on disk puts 120 in the latitude slot
        let file = write_geojson(
            r#"{ "type": "Feature", "geometry": { "type": "Point", "coordinates": [50.0, 120.0] }, "properties": {} }"#,
        );

        assert!(load_reports(file.path()).is_err());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let file = write_geojson(
            r#"{
                "type": "FeatureCollection",
                "features": [
                    { "type": "Feature", "id": 1, "geometry": { "type": "Point", "coordinates": [14.0, 50.0] }, "properties": {} },
                    { "type": "Feature", "id": 1, "geometry": { "type": "Point", "coordinates": [14.1, 50.0] }, "properties": {} }
                ]
            }"#,
        );

        let err = load_reports(file.path()).unwrap_err();
        assert!(err.to_string().contains("Duplicate feature id 1"));
    }

    #[test]
    fn test_bare_geometry_rejected() {
        let file = write_geojson(r#"{ "type": "Point", "coordinates": [14.0, 50.0] }"#);
        assert!(load_reports(file.path()).is_err());
    }

    #[test]
    fn test_into_store() {
        let file = write_geojson(
            r#"{ "type": "Feature", "id": 3, "geometry": { "type": "Point", "coordinates": [14.0, 50.0] }, "properties": {} }"#,
        );

        let store = load_reports(file.path()).unwrap().into_store();
        assert_eq!(store.len(), 1);
    }
}
