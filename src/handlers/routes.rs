//! Route parsing
//!
//! `/` shows the landing sections; `/register/:id` mounts the registration
//! form. Any other path mounts the form for its last segment.

use crate::utils::helpers::last_path_segment;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Landing,
    /// Raw direction token, not yet resolved
    Register(Option<String>),
}

impl Route {
    pub fn from_path(path: &str) -> Self {
        let path = path
            .split(|c| c == '?' || c == '#')
            .next()
            .unwrap_or_default()
            .trim();

        let segments: Vec<&str> = path.split('/').filter(|segment| !segment.is_empty()).collect();
        match segments.as_slice() {
            [] => Route::Landing,
            ["register"] => Route::Register(None),
            ["register", id, ..] => Route::Register(Some(id.to_string())),
            _ => Route::Register(last_path_segment(path).map(str::to_string)),
        }
    }

    pub fn token(&self) -> Option<&str> {
        match self {
            Route::Landing => None,
            Route::Register(token) => token.as_deref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_is_landing() {
        assert_eq!(Route::from_path("/"), Route::Landing);
        assert_eq!(Route::from_path(""), Route::Landing);
        assert_eq!(Route::from_path("/?utm=ig"), Route::Landing);
    }

    #[test]
    fn test_register_routes() {
        assert_eq!(Route::from_path("/register/RoboSumo"), Route::Register(Some("RoboSumo".to_string())));
        assert_eq!(Route::from_path("/register/ai?ref=bot"), Route::Register(Some("ai".to_string())));
        assert_eq!(Route::from_path("/register/"), Route::Register(None));
    }

    #[test]
    fn test_other_paths_use_last_segment() {
        assert_eq!(Route::from_path("/events/contest").token(), Some("contest"));
        assert_eq!(Route::from_path("fixtirolar").token(), Some("fixtirolar"));
    }
}
