/// Math topics and their named subtopics.
pub const MATH_TOPICS: [(&str, [&str; 5]); 4] = [
    (
        "algebra",
        [
            "Linear equations",
            "Quadratic equations",
            "Inequalities",
            "Functions",
            "Systems of equations",
        ],
    ),
    (
        "geometry",
        [
            "Lines and angles",
            "Triangles",
            "Circles",
            "Polygons",
            "Coordinate geometry",
        ],
    ),
    (
        "statistics",
        [
            "Mean, median, mode",
            "Standard deviation",
            "Probability",
            "Data interpretation",
            "Normal distribution",
        ],
    ),
    (
        "word_problems",
        [
            "Rate problems",
            "Work problems",
            "Mixture problems",
            "Distance problems",
            "Percent problems",
        ],
    ),
];

pub fn subtopics_for(topic: &str) -> Option<&'static [&'static str]> {
    MATH_TOPICS
        .iter()
        .find(|(name, _)| *name == topic)
        .map(|(_, subtopics)| subtopics.as_slice())
}
