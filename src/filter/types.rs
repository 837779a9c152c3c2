use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    /// Recognizes `asc` and `desc` exactly; anything else is `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "asc" => Some(SortDirection::Asc),
            "desc" => Some(SortDirection::Desc),
            _ => None,
        }
    }

    pub fn to_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// Columns a movie listing may be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovieSortField {
    Title,
    Rating,
    ReleaseDate,
}

impl MovieSortField {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "title" => Some(MovieSortField::Title),
            "rating" => Some(MovieSortField::Rating),
            "release_date" => Some(MovieSortField::ReleaseDate),
            _ => None,
        }
    }

    pub fn column(&self) -> &'static str {
        match self {
            MovieSortField::Title => "title",
            MovieSortField::Rating => "rating",
            MovieSortField::ReleaseDate => "release_date",
        }
    }
}
