//! Hierarchical divisions (regions, departments, ...) that can be switched
//! on or off per company or product.
//!
//! Payloads are flat: each division names its parent by code. Nodes are
//! normalized first, then [`build_division_tree`] attaches children.

use std::collections::{HashMap, HashSet};

use serde::{Serialize, Serializer};

use crate::error::NormalizeError;
use crate::record::{FromRecord, Record};

/// Who switched a division off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DisabledBy {
    Admin,
    Vendor,
}

impl DisabledBy {
    /// `"A"` is the marketplace administrator; anything else is a vendor.
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        if code == "A" {
            Self::Admin
        } else {
            Self::Vendor
        }
    }

    #[must_use]
    pub fn as_code(self) -> &'static str {
        match self {
            Self::Admin => "A",
            Self::Vendor => "V",
        }
    }
}

impl Serialize for DisabledBy {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Division {
    code: String,
    parent_code: Option<String>,
    level: i64,
    is_enabled: bool,
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    company_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    disabled_by: Option<DisabledBy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    product_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_level: Option<i64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    children: Vec<Division>,
}

impl Division {
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// `None` for a root division.
    #[must_use]
    pub fn parent_code(&self) -> Option<&str> {
        self.parent_code.as_deref()
    }

    #[must_use]
    pub fn level(&self) -> i64 {
        self.level
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.is_enabled
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn company_id(&self) -> Option<i64> {
        self.company_id
    }

    #[must_use]
    pub fn disabled_by(&self) -> Option<DisabledBy> {
        self.disabled_by
    }

    #[must_use]
    pub fn product_id(&self) -> Option<i64> {
        self.product_id
    }

    #[must_use]
    pub fn max_level(&self) -> Option<i64> {
        self.max_level
    }

    /// Always empty on freshly normalized divisions.
    #[must_use]
    pub fn children(&self) -> &[Division] {
        &self.children
    }

    /// Depth-first walk over this division and its descendants.
    pub fn descendants(&self) -> impl Iterator<Item = &Division> + '_ {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let node = stack.pop()?;
            stack.extend(node.children.iter().rev());
            Some(node)
        })
    }
}

impl FromRecord for Division {
    fn from_record(record: &Record<'_>) -> Result<Self, NormalizeError> {
        Ok(Self {
            code: record.string("code")?,
            parent_code: record.nullable_string("parentCode")?,
            level: record.int("level")?,
            is_enabled: record.bool("isEnabled")?,
            name: record.string("name")?,
            company_id: record.opt_int("companyId")?,
            disabled_by: record
                .opt_string("disabledBy")?
                .map(|code| DisabledBy::from_code(&code)),
            product_id: record.opt_int("productId")?,
            max_level: record.opt_int("maxLevel")?,
            children: Vec::new(),
        })
    }
}

/// Assembles flat divisions into a forest, keeping input order among
/// siblings.
///
/// A division that names itself as parent, whose parent code is absent from
/// `divisions`, or which only reaches itself through its parents, is logged
/// and returned as a root.
#[must_use]
pub fn build_division_tree(divisions: Vec<Division>) -> Vec<Division> {
    let codes: HashSet<String> = divisions.iter().map(|d| d.code.clone()).collect();
    let mut children_of: HashMap<String, Vec<(usize, Division)>> = HashMap::new();
    let mut roots = Vec::new();

    for (idx, division) in divisions.into_iter().enumerate() {
        match &division.parent_code {
            Some(parent) if codes.contains(parent) && parent != &division.code => {
                children_of
                    .entry(parent.clone())
                    .or_default()
                    .push((idx, division));
            }
            Some(parent) if parent == &division.code => {
                tracing::warn!(
                    code = %division.code,
                    "division is its own parent, promoting to root"
                );
                roots.push(division);
            }
            Some(parent) => {
                tracing::warn!(
                    code = %division.code,
                    parent_code = %parent,
                    "division parent not found, promoting to root"
                );
                roots.push(division);
            }
            None => roots.push(division),
        }
    }

    let mut forest: Vec<Division> = roots
        .into_iter()
        .map(|root| attach_children(root, &mut children_of))
        .collect();

    // Whatever is left hangs off a parent cycle that no root reaches.
    while let Some(parent) = earliest_pending(&children_of) {
        let Some(siblings) = children_of.get_mut(&parent) else {
            break;
        };
        let (_, division) = siblings.remove(0);
        if siblings.is_empty() {
            children_of.remove(&parent);
        }
        tracing::warn!(
            code = %division.code,
            parent_code = %parent,
            "division parent chain is cyclic, promoting to root"
        );
        forest.push(attach_children(division, &mut children_of));
    }

    forest
}

fn attach_children(
    mut node: Division,
    children_of: &mut HashMap<String, Vec<(usize, Division)>>,
) -> Division {
    if let Some(children) = children_of.remove(&node.code) {
        node.children = children
            .into_iter()
            .map(|(_, child)| attach_children(child, children_of))
            .collect();
    }
    node
}

fn earliest_pending(children_of: &HashMap<String, Vec<(usize, Division)>>) -> Option<String> {
    children_of
        .iter()
        .filter_map(|(parent, siblings)| siblings.first().map(|(idx, _)| (*idx, parent)))
        .min()
        .map(|(_, parent)| parent.clone())
}

/// A company's activation state for one division.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DivisionCompany {
    code: String,
    is_enabled: bool,
    disabled_by: Option<DisabledBy>,
}

impl DivisionCompany {
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.is_enabled
    }

    #[must_use]
    pub fn disabled_by(&self) -> Option<DisabledBy> {
        self.disabled_by
    }
}

impl FromRecord for DivisionCompany {
    fn from_record(record: &Record<'_>) -> Result<Self, NormalizeError> {
        Ok(Self {
            code: record.string("code")?,
            is_enabled: record.bool("isEnabled")?,
            disabled_by: record
                .opt_string("disabledBy")?
                .map(|code| DisabledBy::from_code(&code)),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::{Arc, Mutex};

    use serde_json::{json, Value};

    use super::*;
    use crate::record::normalize_list;

    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Runs `f` under a fmt subscriber and returns everything it logged.
    fn logged<T>(f: impl FnOnce() -> T) -> (T, String) {
        let buffer = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&buffer);
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .with_writer(move || Captured(Arc::clone(&sink)))
            .finish();
        let value = tracing::subscriber::with_default(subscriber, f);
        let output = String::from_utf8(buffer.lock().unwrap().clone()).unwrap();
        (value, output)
    }

    fn node(code: &str, parent: Option<&str>) -> Value {
        json!({
            "code": code,
            "parentCode": parent,
            "level": if parent.is_some() { 2 } else { 1 },
            "isEnabled": true,
            "name": format!("Division {code}")
        })
    }

    fn divisions(nodes: Vec<Value>) -> Vec<Division> {
        normalize_list(&Value::Array(nodes)).unwrap()
    }

    fn codes(nodes: &[Division]) -> Vec<&str> {
        nodes.iter().map(Division::code).collect()
    }

    #[test]
    fn child_is_attached_to_root() {
        let forest = build_division_tree(divisions(vec![node("A", None), node("B", Some("A"))]));
        assert_eq!(codes(&forest), ["A"]);
        assert_eq!(codes(forest[0].children()), ["B"]);
        assert!(forest[0].children()[0].children().is_empty());
    }

    #[test]
    fn child_listed_before_parent_still_attaches() {
        let forest = build_division_tree(divisions(vec![
            node("FR-ARA", Some("FR")),
            node("FR", None),
            node("FR-01", Some("FR-ARA")),
            node("FR-IDF", Some("FR")),
        ]));
        assert_eq!(codes(&forest), ["FR"]);
        assert_eq!(codes(forest[0].children()), ["FR-ARA", "FR-IDF"]);
        assert_eq!(codes(forest[0].children()[0].children()), ["FR-01"]);

        let walked: Vec<_> = forest[0].descendants().map(Division::code).collect();
        assert_eq!(walked, ["FR", "FR-ARA", "FR-01", "FR-IDF"]);
    }

    #[test]
    fn orphan_becomes_root() {
        let (forest, log) = logged(|| {
            build_division_tree(divisions(vec![node("A", None), node("C", Some("X"))]))
        });
        assert_eq!(codes(&forest), ["A", "C"]);
        assert!(log.contains("division parent not found"));
    }

    #[test]
    fn self_parent_becomes_root_with_its_own_warning() {
        let (forest, log) = logged(|| {
            build_division_tree(divisions(vec![node("A", Some("A")), node("B", Some("A"))]))
        });
        assert_eq!(codes(&forest), ["A"]);
        assert_eq!(codes(forest[0].children()), ["B"]);
        assert!(log.contains("division is its own parent"));
        assert!(!log.contains("parent not found"));
    }

    #[test]
    fn cycle_members_are_not_lost() {
        let forest =
            build_division_tree(divisions(vec![node("A", Some("B")), node("B", Some("A"))]));
        assert_eq!(codes(&forest), ["A"]);
        assert_eq!(codes(forest[0].children()), ["B"]);
    }

    #[test]
    fn parent_code_is_required_even_if_null() {
        let raw = json!([{"code": "A", "level": 1, "isEnabled": true, "name": "A"}]);
        let err = normalize_list::<Division>(&raw).unwrap_err();
        assert_eq!(err.key(), "[0].parentCode");
    }

    #[test]
    fn disabled_by_maps_admin_and_vendor() {
        let raw = json!([
            {"code": "A", "isEnabled": false, "disabledBy": "A"},
            {"code": "B", "isEnabled": false, "disabledBy": "V"},
            {"code": "C", "isEnabled": true}
        ]);
        let companies: Vec<DivisionCompany> = normalize_list(&raw).unwrap();
        assert_eq!(companies[0].disabled_by(), Some(DisabledBy::Admin));
        assert_eq!(companies[1].disabled_by(), Some(DisabledBy::Vendor));
        assert_eq!(companies[2].disabled_by(), None);
    }

    #[test]
    fn leaf_serializes_without_children_key() {
        let forest = build_division_tree(divisions(vec![node("A", None)]));
        let value = serde_json::to_value(&forest[0]).unwrap();
        assert!(value.get("children").is_none());
        assert_eq!(value["parentCode"], Value::Null);
    }
}
