//! Static catalogue documents used across harnesses.

use orbat_core::{Catalogue, Side};
use std::path::Path;

/// The worked example: two roots, a matching leaf with no patches, a
/// non-matching leaf, and an unrelated root.
pub const CATALOGUE_EXAMPLE: &str = r#"[
  { "name": "A",
    "subunits": [
      { "name": "B", "meta": { "tags": "alpha" } },
      { "name": "C" }
    ] },
  { "name": "D", "meta": { "description": "Beta" } }
]"#;

/// A deeper document with patches, anonymous units and extra keys.
pub const CATALOGUE_DEEP: &str = r#"[
  { "name": "Ground Forces",
    "id": 17,
    "subunits": [
      { "name": "North Command",
        "subunits": [
          { "name": "1st Tank Brigade",
            "meta": { "description": "Armoured brigade.", "tags": "armour, tanks" },
            "patches": [ { "full": "img/1.jpg", "thumb": "img/1_t.jpg" } ] },
          { "name": "58th Motor Rifle Brigade", "meta": { "tags": "infantry" } },
          { "meta": { "tags": "armour" } }
        ] }
    ] },
  { "name": "Air Assault Forces",
    "meta": { "tags": "airborne" },
    "patches": [ { "full": "img/aaf.jpg", "thumb": "img/aaf_t.jpg" } ],
    "subunits": [
      { "name": "25th Airborne Brigade" },
      { "name": "80th Air Assault Brigade", "subunits": [] }
    ] }
]"#;

/// A document that is not a JSON array.
pub const CATALOGUE_MALFORMED: &str = r#"{ "name": "not an array" }"#;

pub fn example_catalogue() -> Catalogue {
    Catalogue::from_json_str(Side::Ua, CATALOGUE_EXAMPLE).expect("example fixture parses")
}

pub fn deep_catalogue() -> Catalogue {
    Catalogue::from_json_str(Side::Ua, CATALOGUE_DEEP).expect("deep fixture parses")
}

/// Write `ua.json` and `ru.json` into `dir`.
pub fn write_data_dir(dir: &Path) -> std::io::Result<()> {
    std::fs::write(dir.join("ua.json"), CATALOGUE_DEEP)?;
    std::fs::write(dir.join("ru.json"), CATALOGUE_EXAMPLE)?;
    Ok(())
}
