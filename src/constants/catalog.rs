use once_cell::sync::Lazy;

use crate::models::domain::catalog::{College, Scholarship};

pub static COLLEGES: Lazy<Vec<College>> = Lazy::new(|| {
    vec![
        college(1, "Massachusetts Institute of Technology", "Cambridge, USA", 1550, 55000, 4.1),
        college(2, "New York University Abu Dhabi", "Abu Dhabi, UAE", 1480, 53000, 4.4),
        college(3, "Harvard University", "Cambridge, USA", 1520, 54000, 3.4),
        college(4, "Stanford University", "Stanford, USA", 1505, 56000, 3.9),
    ]
});

pub static SCHOLARSHIPS: Lazy<Vec<Scholarship>> = Lazy::new(|| {
    vec![
        scholarship(1, "Fulbright Scholarship", 20000, "2025-11-15", &["USA"]),
        scholarship(2, "UAE Government Scholarship", 30000, "2025-10-30", &["UAE"]),
        scholarship(
            3,
            "Global Excellence Award",
            15000,
            "2025-12-01",
            &["USA", "UK", "UAE", "Canada"],
        ),
    ]
});

fn college(
    id: u32,
    name: &str,
    location: &str,
    avg_sat: u32,
    tuition: u32,
    acceptance_rate: f64,
) -> College {
    College {
        id,
        name: name.to_string(),
        location: location.to_string(),
        avg_sat,
        tuition,
        acceptance_rate,
    }
}

fn scholarship(id: u32, name: &str, amount: u32, deadline: &str, countries: &[&str]) -> Scholarship {
    Scholarship {
        id,
        name: name.to_string(),
        amount,
        deadline: deadline.to_string(),
        countries: countries.iter().map(|c| c.to_string()).collect(),
    }
}
