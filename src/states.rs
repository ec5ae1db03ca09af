// The six user-facing population states and their legend metadata.
use crate::types::{Category, CategoryMeta, PopulationSnapshot};

/// Legend/tooltip configuration for every category, in display order.
pub const CATEGORY_METADATA: [CategoryMeta; 6] = [
    CategoryMeta {
        key: Category::Susceptible,
        title: "Susceptibles",
        description: "Population not immune to the disease",
        checkable: false,
        checked_by_default: false,
        color: "#c8ffba",
    },
    CategoryMeta {
        key: Category::Infected,
        title: "Infectados",
        description: "Infeccionees activas (incl. incu, sin diag) (excl. hosp, UCI)",
        checkable: true,
        checked_by_default: true,
        color: "#f0027f",
    },
    CategoryMeta {
        key: Category::Hospitalized,
        title: "Hospitalizados",
        description: "Hospitalizaciones activas (excluyendo UCI)",
        checkable: true,
        checked_by_default: true,
        color: "#8da0cb",
    },
    CategoryMeta {
        key: Category::Icu,
        title: "UCI",
        description: "Pacientes activos en cuidados intensivos",
        checkable: true,
        checked_by_default: true,
        color: "#386cb0",
    },
    CategoryMeta {
        key: Category::Recovered,
        title: "Recuperados",
        description: "Número acumulado de recuperados",
        checkable: true,
        checked_by_default: false,
        color: "#4daf4a",
    },
    CategoryMeta {
        key: Category::Fatalities,
        title: "Muertos",
        description: "Número acumulado de muertos",
        checkable: true,
        checked_by_default: true,
        color: "#000000",
    },
];

pub fn category_metadata() -> &'static [CategoryMeta] {
    &CATEGORY_METADATA
}

/// Look up the metadata record for one category.
pub fn meta_for(category: Category) -> &'static CategoryMeta {
    // Table order matches the enum declaration order.
    &CATEGORY_METADATA[category as usize]
}

pub fn snapshot(
    susceptible: f64,
    infected: f64,
    hospitalized: f64,
    icu: f64,
    recovered: f64,
    fatalities: f64,
) -> PopulationSnapshot {
    PopulationSnapshot::new(susceptible, infected, hospitalized, icu, recovered, fatalities)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn metadata_covers_every_category_once_in_order() {
        let meta = category_metadata();
        assert_eq!(meta.len(), 6);
        let keys: Vec<&str> = meta.iter().map(|m| m.key.as_str()).collect();
        assert_eq!(
            keys,
            vec!["susceptible", "infected", "hospitalized", "icu", "recovered", "fatalities"]
        );
        let unique: HashSet<&str> = keys.iter().copied().collect();
        assert_eq!(unique.len(), 6);
    }

    #[test]
    fn metadata_is_stable_across_calls() {
        assert_eq!(category_metadata(), category_metadata());
    }

    #[test]
    fn meta_lookup_matches_table() {
        for c in Category::ALL {
            assert_eq!(meta_for(c).key, c);
        }
        assert!(!meta_for(Category::Susceptible).checkable);
        assert!(!meta_for(Category::Recovered).checked_by_default);
        assert_eq!(meta_for(Category::Fatalities).color, "#000000");
    }

    #[test]
    fn metadata_json_uses_front_end_keys() {
        let json = serde_json::to_value(category_metadata()).unwrap();
        let first = &json[0];
        assert_eq!(first["key"], "susceptible");
        assert_eq!(first["tooltip_title"], "Susceptibles");
        assert_eq!(first["tooltip_desc"], "Population not immune to the disease");
        assert_eq!(first["checkable"], false);
        assert_eq!(first["checked"], false);
        assert_eq!(first["color"], "#c8ffba");
        assert_eq!(json[3]["key"], "icu");
    }

    #[test]
    fn snapshot_keeps_nan() {
        let s = snapshot(f64::NAN, 1.0, 2.0, 3.0, 4.0, 5.0);
        assert!(s.susceptible().is_nan());
        assert_eq!(s.fatalities(), 5.0);
    }
}
