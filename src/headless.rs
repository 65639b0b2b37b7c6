//! Headless mode: load a catalogue, run one filter pass, print the outcome
//! as JSON.
//!
//! This is what `orbat --query …` runs instead of the TUI. The output object
//! has three keys, `search_mode`, `jump_targets` and `units`, with units
//! serialized in the same shape the catalogue file uses.

use anyhow::Context;
use orbat_core::{filter_units, Catalogue, FilterOptions, FilterOutcome, Query, Side};
use std::io::Write;
use std::path::PathBuf;

/// Everything headless mode needs, already resolved against the config.
#[derive(Debug, Clone)]
pub struct HeadlessArgs {
    pub side: Side,
    pub data_dir: PathBuf,
    /// Explicit catalogue file; overrides `data_dir` + `side` lookup.
    pub catalogue: Option<PathBuf>,
    pub query: String,
    /// Details mode: no placeholder patches are injected.
    pub details: bool,
    pub pretty: bool,
}

/// Load the catalogue from `file` when given, else from `data_dir` by side.
pub fn load_catalogue(
    side: Side,
    data_dir: &std::path::Path,
    file: Option<&std::path::Path>,
) -> anyhow::Result<Catalogue> {
    let catalogue = match file {
        Some(path) => Catalogue::from_path(side, path),
        None => Catalogue::load(side, data_dir),
    };
    catalogue.context("failed to load catalogue")
}

/// Run one filter pass over `catalogue`.
pub fn outcome(catalogue: &Catalogue, query: &str, details: bool) -> FilterOutcome {
    let query = Query::parse(query);
    filter_units(&catalogue.units, &query, FilterOptions { compact: !details })
}

/// Serialize an outcome, compact or pretty-printed.
pub fn render(outcome: &FilterOutcome, pretty: bool) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(outcome)
    } else {
        serde_json::to_string(outcome)
    }
}

/// Load, filter and write the JSON outcome followed by a newline.
pub fn run<W: Write>(args: &HeadlessArgs, out: &mut W) -> anyhow::Result<()> {
    let catalogue = load_catalogue(args.side, &args.data_dir, args.catalogue.as_deref())?;
    let outcome = outcome(&catalogue, &args.query, args.details);
    tracing::info!(
        query = %args.query,
        search_mode = outcome.search_mode,
        roots = outcome.units.len(),
        "headless filter pass"
    );
    let json = render(&outcome, args.pretty).context("failed to serialize outcome")?;
    writeln!(out, "{json}").context("failed to write output")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};

    const DOC: &str = r#"[
        { "name": "1st Corps", "subunits": [
            { "name": "Recon", "meta": { "tags": "drone" } },
            { "name": "Supply" }
        ]},
        { "name": "2nd Corps" }
    ]"#;

    #[test]
    fn empty_query_is_identity() {
        let cat = Catalogue::from_json_str(Side::Ua, DOC).unwrap();
        let out = outcome(&cat, "", false);
        assert!(!out.search_mode);
        assert_eq!(out.units, cat.units);
    }

    #[test]
    fn render_matches_catalogue_shape() {
        let cat = Catalogue::from_json_str(Side::Ua, DOC).unwrap();
        let out = outcome(&cat, "drone", false);
        let value: Value = serde_json::from_str(&render(&out, false).unwrap()).unwrap();
        assert_eq!(
            value,
            json!({
                "search_mode": true,
                "jump_targets": [{ "index": 0, "anchor": "cat-0", "name": "1st Corps" }],
                "units": [{
                    "name": "1st Corps",
                    "subunits": [{
                        "name": "Recon",
                        "meta": { "tags": "drone" },
                        "patches": [{ "full": "images/unknown.jpg", "thumb": "images/unknown.jpg" }]
                    }]
                }]
            })
        );
    }

    #[test]
    fn details_mode_skips_placeholder() {
        let cat = Catalogue::from_json_str(Side::Ua, DOC).unwrap();
        let out = outcome(&cat, "drone", true);
        assert!(out.units[0].children()[0].patches.is_none());
    }

    #[test]
    fn run_writes_one_line() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("ua.json"), DOC).unwrap();
        let args = HeadlessArgs {
            side: Side::Ua,
            data_dir: dir.path().to_path_buf(),
            catalogue: None,
            query: "2nd".into(),
            details: false,
            pretty: false,
        };
        let mut buf = Vec::new();
        run(&args, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text.lines().count(), 1);
        assert!(text.contains("2nd Corps"));
    }

    #[test]
    fn missing_catalogue_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let args = HeadlessArgs {
            side: Side::Ru,
            data_dir: dir.path().to_path_buf(),
            catalogue: None,
            query: "x".into(),
            details: false,
            pretty: false,
        };
        let err = run(&args, &mut Vec::new()).unwrap_err();
        assert!(format!("{err:#}").contains("ru.json"));
    }
}
