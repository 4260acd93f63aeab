use async_graphql::{Enum, SimpleObject};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize, SimpleObject)]
pub struct College {
    pub id: u32,
    pub name: String,
    pub location: String,
    pub avg_sat: u32,
    pub tuition: u32,
    pub acceptance_rate: f64,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, SimpleObject)]
pub struct Scholarship {
    pub id: u32,
    pub name: String,
    pub amount: u32,
    pub deadline: String,
    pub countries: Vec<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize, Enum)]
#[serde(rename_all = "snake_case")]
pub enum CollegeSortKey {
    Name,
    AvgSat,
    Tuition,
    AcceptanceRate,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize, Enum)]
#[serde(rename_all = "snake_case")]
pub enum ScholarshipSortKey {
    Name,
    Amount,
    Deadline,
}
