use std::fmt;

use crate::reader::DependencyMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DependencyChange {
    Unchanged,
    MinorOrPatch,
    Major,
}

impl fmt::Display for DependencyChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Unchanged => "Unchanged",
            Self::MinorOrPatch => "Minor / Patch",
            Self::Major => "Major",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyComparison {
    pub name: String,
    pub local: String,
    pub latest: String,
    pub change: DependencyChange,
}

impl fmt::Display for DependencyComparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.change {
            DependencyChange::Unchanged => write!(
                f,
                "{}: {} {} - {}",
                self.name, self.change, self.local, self.latest
            ),
            DependencyChange::MinorOrPatch | DependencyChange::Major => write!(
                f,
                "{}: {} {} - {}",
                self.name,
                self.change,
                strip_caret(&self.local),
                strip_caret(&self.latest)
            ),
        }
    }
}

fn strip_caret(range: &str) -> &str {
    range.strip_prefix('^').unwrap_or(range)
}

/// First dot-separated component of a range, after dropping a leading `^`.
///
/// No other range syntax is interpreted: `~1.2.0` yields `~1`.
#[must_use]
pub fn major_component(range: &str) -> &str {
    strip_caret(range).split('.').next().unwrap_or_default()
}

#[must_use]
pub fn classify(local: &str, latest: &str) -> DependencyChange {
    if local == latest {
        DependencyChange::Unchanged
    } else if major_component(local) == major_component(latest) {
        DependencyChange::MinorOrPatch
    } else {
        DependencyChange::Major
    }
}

/// Compares every dependency of `local` against the same name in `latest`.
///
/// Results follow `local`'s order; names without a counterpart in `latest`
/// are skipped.
#[must_use]
pub fn compare_dependencies(
    local: &DependencyMap,
    latest: &DependencyMap,
) -> Vec<DependencyComparison> {
    local
        .iter()
        .filter_map(|(name, local_range)| {
            latest.get(name).map(|latest_range| DependencyComparison {
                name: name.clone(),
                local: local_range.clone(),
                latest: latest_range.clone(),
                change: classify(local_range, latest_range),
            })
        })
        .collect()
}

#[must_use]
pub fn first_major(comparisons: &[DependencyComparison]) -> Option<&DependencyComparison> {
    comparisons
        .iter()
        .find(|comparison| comparison.change == DependencyChange::Major)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deps(entries: &[(&str, &str)]) -> DependencyMap {
        entries
            .iter()
            .map(|(name, range)| ((*name).to_string(), (*range).to_string()))
            .collect()
    }

    #[test]
    fn same_major_is_minor_or_patch() {
        assert_eq!(classify("^2.1.0", "^2.3.0"), DependencyChange::MinorOrPatch);
    }

    #[test]
    fn different_major_is_major() {
        assert_eq!(classify("^1.0.0", "^2.0.0"), DependencyChange::Major);
    }

    #[test]
    fn identical_ranges_are_unchanged() {
        assert_eq!(classify("^4.17.21", "^4.17.21"), DependencyChange::Unchanged);
    }

    #[test]
    fn caret_is_stripped_on_one_side_only_when_present() {
        assert_eq!(classify("^3.0.0", "3.1.0"), DependencyChange::MinorOrPatch);
    }

    #[test]
    fn other_range_prefixes_are_compared_verbatim() {
        assert_eq!(major_component("~1.2.0"), "~1");
        assert_eq!(classify("~1.2.0", "1.3.0"), DependencyChange::Major);
    }

    #[test]
    fn major_component_of_bare_major() {
        assert_eq!(major_component("^5"), "5");
        assert_eq!(major_component(""), "");
    }

    #[test]
    fn compares_by_name_in_local_order() {
        let local = deps(&[("zod", "^3.22.0"), ("axios", "^1.6.0"), ("left-pad", "^1.0.0")]);
        let latest = deps(&[("axios", "^1.5.0"), ("zod", "^3.22.0")]);

        let comparisons = compare_dependencies(&local, &latest);

        assert_eq!(comparisons.len(), 2);
        assert_eq!(comparisons[0].name, "zod");
        assert_eq!(comparisons[0].change, DependencyChange::Unchanged);
        assert_eq!(comparisons[1].name, "axios");
        assert_eq!(comparisons[1].change, DependencyChange::MinorOrPatch);
    }

    #[test]
    fn first_major_finds_earliest_major() {
        let local = deps(&[("a", "^1.0.0"), ("b", "^2.0.0"), ("c", "^5.0.0")]);
        let latest = deps(&[("a", "^1.1.0"), ("b", "^1.0.0"), ("c", "^4.0.0")]);

        let comparisons = compare_dependencies(&local, &latest);

        let major = first_major(&comparisons).expect("a major update exists");
        assert_eq!(major.name, "b");
    }

    #[test]
    fn first_major_is_none_without_major_updates() {
        let local = deps(&[("a", "^1.0.0")]);
        let latest = deps(&[("a", "^1.0.0")]);

        assert!(first_major(&compare_dependencies(&local, &latest)).is_none());
    }

    #[test]
    fn display_strips_caret_for_changed_ranges() {
        let comparison = DependencyComparison {
            name: "axios".to_string(),
            local: "^1.6.0".to_string(),
            latest: "^1.5.0".to_string(),
            change: DependencyChange::MinorOrPatch,
        };

        assert_eq!(comparison.to_string(), "axios: Minor / Patch 1.6.0 - 1.5.0");
    }

    #[test]
    fn display_keeps_caret_for_unchanged_ranges() {
        let comparison = DependencyComparison {
            name: "zod".to_string(),
            local: "^3.22.0".to_string(),
            latest: "^3.22.0".to_string(),
            change: DependencyChange::Unchanged,
        };

        assert_eq!(comparison.to_string(), "zod: Unchanged ^3.22.0 - ^3.22.0");
    }
}
