//! Part matching and seller grouping
//!
//! Make and model compare case-insensitively and exactly, the year is a
//! substring test so `2021` finds `2020-2023`, and the part name is a
//! case-insensitive substring test. Blank filters are ignored.

use partsmart_types::{Part, SearchCriteria};

/// Drop blank filters so backends only see the ones that apply
pub fn normalize(criteria: &SearchCriteria) -> SearchCriteria {
    fn keep(value: &Option<String>) -> Option<String> {
        value.as_ref().filter(|v| !v.trim().is_empty()).cloned()
    }

    SearchCriteria {
        vehicle_make: keep(&criteria.vehicle_make),
        vehicle_model: keep(&criteria.vehicle_model),
        vehicle_year: keep(&criteria.vehicle_year),
        part_name: keep(&criteria.part_name),
    }
}

/// Whether `part` passes every filter in `criteria`
pub fn matches(criteria: &SearchCriteria, part: &Part) -> bool {
    let criteria = normalize(criteria);

    if let Some(make) = &criteria.vehicle_make {
        if !eq_ignore_case(part.vehicle_make.as_deref(), make) {
            return false;
        }
    }
    if let Some(model) = &criteria.vehicle_model {
        if !eq_ignore_case(part.vehicle_model.as_deref(), model) {
            return false;
        }
    }
    if let Some(year) = &criteria.vehicle_year {
        match part.vehicle_year.as_deref() {
            Some(part_year) if part_year.contains(year.as_str()) => {}
            _ => return false,
        }
    }
    if let Some(name) = &criteria.part_name {
        if !part.name.to_lowercase().contains(&name.to_lowercase()) {
            return false;
        }
    }

    true
}

fn eq_ignore_case(value: Option<&str>, wanted: &str) -> bool {
    value
        .map(|v| v.to_lowercase() == wanted.to_lowercase())
        .unwrap_or(false)
}

/// Group matching parts by seller id
///
/// Groups come out in order of each seller's first part, and parts keep
/// their input order within a group.
pub fn group_by_seller(parts: Vec<Part>) -> Vec<(String, Vec<Part>)> {
    let mut groups: Vec<(String, Vec<Part>)> = Vec::new();

    for part in parts {
        match groups.iter_mut().find(|(seller_id, _)| *seller_id == part.seller_id) {
            Some((_, group)) => group.push(part),
            None => groups.push((part.seller_id.clone(), vec![part])),
        }
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use partsmart_types::Availability;

    fn part(id: &str, seller: &str, name: &str, make: &str, model: &str, year: &str) -> Part {
        Part {
            id: id.to_string(),
            seller_id: seller.to_string(),
            name: name.to_string(),
            description: None,
            price: Some(100.0),
            vehicle_make: Some(make.to_string()),
            vehicle_model: Some(model.to_string()),
            vehicle_year: Some(year.to_string()),
            availability: Availability::InStock,
            image_url: None,
            created_at: Utc::now(),
        }
    }

    fn criteria(make: &str, model: &str, year: &str, name: &str) -> SearchCriteria {
        let opt = |s: &str| (!s.is_empty()).then(|| s.to_string());
        SearchCriteria {
            vehicle_make: opt(make),
            vehicle_model: opt(model),
            vehicle_year: opt(year),
            part_name: opt(name),
        }
    }

    #[test]
    fn test_empty_criteria_matches_everything() {
        let p = part("p1", "s1", "Brake Pad Set", "Toyota", "Camry", "2020-2023");
        assert!(matches(&SearchCriteria::default(), &p));
        assert!(matches(&criteria(" ", "", "", ""), &p));
    }

    #[test]
    fn test_make_and_model_are_exact_but_case_insensitive() {
        let p = part("p1", "s1", "Brake Pad Set", "Toyota", "Camry", "2020-2023");
        assert!(matches(&criteria("toyota", "CAMRY", "", ""), &p));
        assert!(!matches(&criteria("toy", "", "", ""), &p));
        assert!(!matches(&criteria("", "Corolla", "", ""), &p));
    }

    #[test]
    fn test_year_matches_inside_range() {
        let p = part("p1", "s1", "Brake Pad Set", "Toyota", "Camry", "2020-2023");
        assert!(matches(&criteria("", "", "2020", ""), &p));
        assert!(matches(&criteria("", "", "2023", ""), &p));
        assert!(!matches(&criteria("", "", "2019", ""), &p));
    }

    #[test]
    fn test_missing_field_fails_provided_filter() {
        let mut p = part("p1", "s1", "Oil Filter", "Honda", "Civic", "2018");
        p.vehicle_make = None;
        p.vehicle_year = None;
        assert!(!matches(&criteria("Honda", "", "", ""), &p));
        assert!(!matches(&criteria("", "", "2018", ""), &p));
        assert!(matches(&criteria("", "civic", "", "filter"), &p));
    }

    #[test]
    fn test_part_name_is_substring() {
        let p = part("p1", "s1", "Brake Pad Set - Front", "Toyota", "Camry", "2021");
        assert!(matches(&criteria("", "", "", "brake pad"), &p));
        assert!(matches(&criteria("", "", "", "FRONT"), &p));
        assert!(!matches(&criteria("", "", "", "rear"), &p));
    }

    #[test]
    fn test_grouping_keeps_first_seen_order() {
        let parts = vec![
            part("p1", "s2", "Brake Pad", "Toyota", "Camry", "2021"),
            part("p2", "s1", "Brake Disc", "Toyota", "Camry", "2021"),
            part("p3", "s2", "Brake Hose", "Toyota", "Camry", "2021"),
        ];
        let groups = group_by_seller(parts);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, "s2");
        let ids: Vec<_> = groups[0].1.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["p1", "p3"]);
        assert_eq!(groups[1].0, "s1");
        assert_eq!(groups[1].1.len(), 1);
    }
}
