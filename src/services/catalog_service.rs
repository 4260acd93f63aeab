use std::cmp::Ordering;

use chrono::NaiveDate;

use crate::{
    constants::catalog::{COLLEGES, SCHOLARSHIPS},
    models::{
        domain::catalog::{College, CollegeSortKey, Scholarship, ScholarshipSortKey},
        dto::request::{CollegeSearchParams, ScholarshipSearchParams},
    },
};

pub const DEADLINE_FORMAT: &str = "%Y-%m-%d";

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.trim().to_lowercase())
}

/// Stable sort on `key`. Incomparable keys compare equal.
pub fn sort_results<T, K, F>(items: &mut [T], key: F, ascending: bool)
where
    K: PartialOrd,
    F: Fn(&T) -> K,
{
    items.sort_by(|a, b| {
        let ordering = key(a).partial_cmp(&key(b)).unwrap_or(Ordering::Equal);
        if ascending {
            ordering
        } else {
            ordering.reverse()
        }
    });
}

/// Unparseable deadlines never exclude a scholarship.
fn deadline_not_before(scholarship: &Scholarship, after: NaiveDate) -> bool {
    NaiveDate::parse_from_str(&scholarship.deadline, DEADLINE_FORMAT)
        .map_or(true, |deadline| deadline >= after)
}

pub fn search_colleges(params: &CollegeSearchParams) -> Vec<College> {
    let mut colleges: Vec<College> = COLLEGES
        .iter()
        .filter(|c| params.q.as_deref().map_or(true, |q| contains_ignore_case(&c.name, q)))
        .filter(|c| params.min_sat.map_or(true, |min| c.avg_sat >= min))
        .filter(|c| params.max_tuition.map_or(true, |max| c.tuition <= max))
        .filter(|c| params.min_acceptance.map_or(true, |min| c.acceptance_rate >= min))
        .filter(|c| params.max_acceptance.map_or(true, |max| c.acceptance_rate <= max))
        .filter(|c| {
            params
                .country
                .as_deref()
                .map_or(true, |country| contains_ignore_case(&c.location, country))
        })
        .cloned()
        .collect();

    let ascending = params.ascending.unwrap_or(true);
    match params.sort_by {
        Some(CollegeSortKey::Name) => sort_results(&mut colleges, |c| c.name.clone(), ascending),
        Some(CollegeSortKey::AvgSat) => sort_results(&mut colleges, |c| c.avg_sat, ascending),
        Some(CollegeSortKey::Tuition) => sort_results(&mut colleges, |c| c.tuition, ascending),
        Some(CollegeSortKey::AcceptanceRate) => {
            sort_results(&mut colleges, |c| c.acceptance_rate, ascending)
        }
        None => {}
    }
    colleges
}

pub fn search_scholarships(params: &ScholarshipSearchParams) -> Vec<Scholarship> {
    let mut scholarships: Vec<Scholarship> = SCHOLARSHIPS
        .iter()
        .filter(|s| params.q.as_deref().map_or(true, |q| contains_ignore_case(&s.name, q)))
        .filter(|s| params.min_amount.map_or(true, |min| s.amount >= min))
        .filter(|s| {
            params.country.as_deref().map_or(true, |country| {
                s.countries
                    .iter()
                    .any(|eligible| eligible.eq_ignore_ascii_case(country.trim()))
            })
        })
        .filter(|s| params.deadline_after.map_or(true, |after| deadline_not_before(s, after)))
        .cloned()
        .collect();

    let ascending = params.ascending.unwrap_or(true);
    match params.sort_by {
        Some(ScholarshipSortKey::Name) => {
            sort_results(&mut scholarships, |s| s.name.clone(), ascending)
        }
        Some(ScholarshipSortKey::Amount) => sort_results(&mut scholarships, |s| s.amount, ascending),
        // ISO dates order lexicographically
        Some(ScholarshipSortKey::Deadline) => {
            sort_results(&mut scholarships, |s| s.deadline.clone(), ascending)
        }
        None => {}
    }
    scholarships
}
