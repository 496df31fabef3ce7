//! Terminal rendering of API results.

use std::fmt::Write as _;
use std::pin::Pin;

use futures::{Stream, TryStreamExt};
use mpsdk_core::Division;
use serde::Serialize;

pub(crate) fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Prints one compact JSON document per item and returns how many were
/// printed. Stops at the first error.
pub(crate) async fn print_json_lines<T, E, S>(mut items: Pin<&mut S>) -> anyhow::Result<usize>
where
    T: Serialize,
    E: std::error::Error + Send + Sync + 'static,
    S: Stream<Item = Result<T, E>>,
{
    let mut count = 0;
    while let Some(item) = items.try_next().await? {
        println!("{}", serde_json::to_string(&item)?);
        count += 1;
    }
    Ok(count)
}

/// One line per division, indented two spaces per tree depth, with disabled
/// divisions marked.
pub(crate) fn format_division_tree(roots: &[Division]) -> String {
    let mut out = String::new();
    for root in roots {
        write_division(&mut out, root, 0);
    }
    out
}

fn write_division(out: &mut String, division: &Division, depth: usize) {
    let marker = if division.is_enabled() { "" } else { " (disabled)" };
    let _ = writeln!(
        out,
        "{:indent$}{} {}{marker}",
        "",
        division.code(),
        division.name(),
        indent = depth * 2
    );
    for child in division.children() {
        write_division(out, child, depth + 1);
    }
}

#[cfg(test)]
mod tests {
    use mpsdk_core::{build_division_tree, normalize_list};
    use serde_json::json;

    use super::*;

    #[test]
    fn division_tree_is_indented_by_depth() {
        let divisions: Vec<Division> = normalize_list(&json!([
            {"code": "FR", "parentCode": null, "level": 0, "isEnabled": true, "name": "France"},
            {"code": "FR-IDF", "parentCode": "FR", "level": 1, "isEnabled": false, "name": "Ile-de-France"},
            {"code": "FR-75", "parentCode": "FR-IDF", "level": 2, "isEnabled": true, "name": "Paris"}
        ]))
        .unwrap();

        let rendered = format_division_tree(&build_division_tree(divisions));

        assert_eq!(
            rendered,
            "FR France\n  FR-IDF Ile-de-France (disabled)\n    FR-75 Paris\n"
        );
    }

    #[test]
    fn empty_forest_renders_nothing() {
        assert_eq!(format_division_tree(&[]), "");
    }
}
