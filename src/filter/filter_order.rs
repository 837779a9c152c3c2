use std::cmp::Ordering;

use crate::database::models::Movie;

use super::types::{MovieSortField, SortDirection};

/// Validated ordering for movie listings.
///
/// Built only from the closed [`MovieSortField`] and [`SortDirection`] sets, so
/// the SQL it yields is always one of a fixed number of static fragments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MovieSort {
    pub field: MovieSortField,
    pub direction: SortDirection,
}

impl Default for MovieSort {
    fn default() -> Self {
        Self {
            field: MovieSortField::Rating,
            direction: SortDirection::Desc,
        }
    }
}

impl MovieSort {
    pub fn new(field: MovieSortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    /// Build from raw query parameters. Missing or unrecognized values fall
    /// back to the defaults (`rating`, `desc`) independently of each other.
    pub fn from_params(sort_by: Option<&str>, sort_order: Option<&str>) -> Self {
        let defaults = Self::default();
        Self {
            field: sort_by
                .and_then(MovieSortField::parse)
                .unwrap_or(defaults.field),
            direction: sort_order
                .and_then(SortDirection::parse)
                .unwrap_or(defaults.direction),
        }
    }

    /// `ORDER BY` fragment for this sort. Ties are broken by id so listings
    /// are stable.
    pub fn order_by_clause(&self) -> &'static str {
        use MovieSortField::*;
        use SortDirection::*;

        match (self.field, self.direction) {
            (Title, Asc) => "ORDER BY title ASC, id ASC",
            (Title, Desc) => "ORDER BY title DESC, id ASC",
            (Rating, Asc) => "ORDER BY rating ASC, id ASC",
            (Rating, Desc) => "ORDER BY rating DESC, id ASC",
            (ReleaseDate, Asc) => "ORDER BY release_date ASC, id ASC",
            (ReleaseDate, Desc) => "ORDER BY release_date DESC, id ASC",
        }
    }

    /// In-process equivalent of [`order_by_clause`](Self::order_by_clause).
    pub fn compare(&self, a: &Movie, b: &Movie) -> Ordering {
        let primary = match self.field {
            MovieSortField::Title => a.title.cmp(&b.title),
            MovieSortField::Rating => a.rating.total_cmp(&b.rating),
            MovieSortField::ReleaseDate => a.release_date.cmp(&b.release_date),
        };
        let primary = match self.direction {
            SortDirection::Asc => primary,
            SortDirection::Desc => primary.reverse(),
        };
        primary.then_with(|| a.id.cmp(&b.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn movie(id: i32, title: &str, rating: f64, year: i32) -> Movie {
        Movie {
            id,
            title: title.to_string(),
            description: String::new(),
            release_date: NaiveDate::from_ymd_opt(year, 1, 1).unwrap(),
            rating,
        }
    }

    #[test]
    fn defaults_to_rating_desc() {
        let sort = MovieSort::from_params(None, None);
        assert_eq!(sort, MovieSort::new(MovieSortField::Rating, SortDirection::Desc));
        assert_eq!(sort.order_by_clause(), "ORDER BY rating DESC, id ASC");
    }

    #[test]
    fn unknown_values_behave_like_defaults() {
        let unknown = MovieSort::from_params(Some("unknown"), Some("unknown"));
        let explicit = MovieSort::from_params(Some("rating"), Some("desc"));
        assert_eq!(unknown, explicit);
        assert_eq!(unknown.order_by_clause(), explicit.order_by_clause());
    }

    #[test]
    fn each_parameter_falls_back_on_its_own() {
        let sort = MovieSort::from_params(Some("title"), Some("sideways"));
        assert_eq!(sort, MovieSort::new(MovieSortField::Title, SortDirection::Desc));

        let sort = MovieSort::from_params(Some("budget; DROP TABLE movies"), Some("asc"));
        assert_eq!(sort, MovieSort::new(MovieSortField::Rating, SortDirection::Asc));
    }

    #[test]
    fn matching_is_case_sensitive() {
        let sort = MovieSort::from_params(Some("Title"), Some("ASC"));
        assert_eq!(sort, MovieSort::default());
    }

    #[test]
    fn release_date_sort_uses_its_column() {
        let sort = MovieSort::from_params(Some("release_date"), Some("asc"));
        assert_eq!(sort.field.column(), "release_date");
        assert_eq!(sort.order_by_clause(), "ORDER BY release_date ASC, id ASC");
    }

    #[test]
    fn every_clause_names_its_column_and_direction() {
        for field in [MovieSortField::Title, MovieSortField::Rating, MovieSortField::ReleaseDate] {
            for direction in [SortDirection::Asc, SortDirection::Desc] {
                let clause = MovieSort::new(field, direction).order_by_clause();
                let expected = format!("ORDER BY {} {}, id ASC", field.column(), direction.to_sql());
                assert_eq!(clause, expected);
            }
        }
    }

    #[test]
    fn compare_orders_like_the_sql_fragment() {
        let mut movies = vec![
            movie(1, "Alien", 8.5, 1979),
            movie(2, "Brazil", 7.9, 1985),
            movie(3, "Casablanca", 8.5, 1942),
        ];

        movies.sort_by(|a, b| MovieSort::default().compare(a, b));
        let ids: Vec<i32> = movies.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![1, 3, 2]);

        let by_date = MovieSort::new(MovieSortField::ReleaseDate, SortDirection::Asc);
        movies.sort_by(|a, b| by_date.compare(a, b));
        let ids: Vec<i32> = movies.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);

        let by_title = MovieSort::new(MovieSortField::Title, SortDirection::Desc);
        movies.sort_by(|a, b| by_title.compare(a, b));
        let ids: Vec<i32> = movies.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }
}
