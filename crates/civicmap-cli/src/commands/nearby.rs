use crate::cli::NearbyArgs;
use crate::dataset::load_reports;
use crate::output::OutputWriter;
use crate::output_types::{NearbyItem, NearbyOutput, NearbyRow};
use anyhow::{Context, Result};
use civicmap_core::config::{CliConfigOverrides, LayeredConfig, SearchSettings};
use civicmap_core::models::{GeoPoint, ProximityQuery, RecordFilter, RecordId, ResumeToken};
use civicmap_search::ProximitySearchEngine;
use std::collections::HashMap;
use std::path::Path;

pub async fn execute(args: NearbyArgs, config_path: Option<&Path>, output: &OutputWriter) -> Result<()> {
    let settings = load_settings(config_path, &args)?;

    let dataset = load_reports(&args.data)?;
    if dataset.skipped > 0 {
        output.warning(format!(
            "Skipped {} feature(s) without Point geometry",
            dataset.skipped
        ));
    }

    let titles: HashMap<RecordId, String> =
        dataset.reports.iter().map(|r| (r.id, r.title.clone())).collect();
    let engine = ProximitySearchEngine::new(dataset.into_store(), settings);

    let origin = GeoPoint::new(args.lat, args.lng)?;
    let page_size = args.page_size.unwrap_or(settings.default_page_size);
    let mut query = ProximityQuery::new(origin)
        .with_page_size(page_size)
        .with_filter(RecordFilter {
            category_id: args.category_id,
            territory_id: args.territory_id,
        });

    if let Some(token) = args.resume.as_deref() {
        let token: ResumeToken = token.parse().context("Invalid --resume token")?;
        query = query.resume_after(token);
    }

    let mut results = Vec::new();
    let mut pages = 0;
    let next_resume = loop {
        let page = engine.search(&query).await?;
        pages += 1;

        results.extend(page.results.iter().map(|result| {
            let title = titles.get(&result.id()).cloned().unwrap_or_default();
            NearbyItem::new(result, title)
        }));

        match page.next_resume() {
            Some(token) if args.all => query = query.resume_after(token),
            next => break next,
        }
    };

    tracing::debug!(pages, results = results.len(), "Nearby search finished");

    let report = NearbyOutput {
        origin,
        page_size,
        pages,
        has_more: next_resume.is_some(),
        next_resume,
        results,
    };

    if output.is_json() {
        return output.result(&report);
    }

    output.section(format!("Reports nearest to {}", report.origin));
    let rows = report
        .results
        .iter()
        .enumerate()
        .map(|(i, item)| NearbyRow::new(i + 1, item))
        .collect();
    output.table::<NearbyRow>(rows);

    if let Some(token) = report.next_resume {
        output.kv("More results", format!("--resume {}", token));
    }

    Ok(())
}

/// Defaults, then the config file, then env vars, then command-line overrides
fn load_settings(config_path: Option<&Path>, args: &NearbyArgs) -> Result<SearchSettings> {
    let mut config = LayeredConfig::with_defaults();
    if let Some(path) = config_path {
        config = config
            .load_from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?;
    }

    let mut config = config.load_from_env();
    // A lowered ceiling also caps the page size used when none is requested
    let default_page_size = args
        .max_page_size
        .filter(|&max| max < config.default_page_size.value);
    config.update_from_cli(CliConfigOverrides {
        default_page_size,
        max_page_size: args.max_page_size,
    });

    for (key, (value, source)) in config.to_inspection_map() {
        tracing::debug!(key = %key, value = %value, ?source, "Search setting");
    }

    Ok(config.search_settings()?)
}
