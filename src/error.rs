use crate::Point;
use core::fmt;

/// Which end of a search request was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Endpoint {
    Start,
    Goal,
}

/// Fixed-size resource that ran out during a search.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resource {
    /// The node pool was full when a new cell had to be tracked.
    NodePool,
    /// The path did not fit in the output buffer.
    PathBuffer,
    /// The configured expansion budget was used up.
    ExpansionBudget,
    /// A path cost did not fit in a node's cost field.
    CostRange,
}

/// Why a search did not produce a path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchError {
    /// Start or goal is outside the grid or blocked. No search work was done.
    InvalidEndpoint { endpoint: Endpoint, point: Point },
    /// Every cell reachable from the start was explored without finding the goal.
    Unreachable,
    /// The search was cut short, so the goal may still be reachable.
    ResourceExhausted(Resource),
}

impl SearchError {
    /// Non-positive status code for callers that only carry an integer result:
    /// `0` for a rejected endpoint, `-1` for no path and `-2` for a search
    /// that ran out of resources.
    pub fn code(&self) -> i32 {
        match self {
            SearchError::InvalidEndpoint { .. } => 0,
            SearchError::Unreachable => -1,
            SearchError::ResourceExhausted(_) => -2,
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Endpoint::Start => write!(f, "start"),
            Endpoint::Goal => write!(f, "goal"),
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Resource::NodePool => write!(f, "node pool"),
            Resource::PathBuffer => write!(f, "path buffer"),
            Resource::ExpansionBudget => write!(f, "expansion budget"),
            Resource::CostRange => write!(f, "cost range"),
        }
    }
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SearchError::InvalidEndpoint { endpoint, point } => {
                write!(f, "{endpoint} {point:?} is out of bounds or blocked")
            }
            SearchError::Unreachable => write!(f, "goal is not reachable from start"),
            SearchError::ResourceExhausted(resource) => {
                write!(f, "search ran out of {resource}")
            }
        }
    }
}

impl std::error::Error for SearchError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_non_positive() {
        let errors = [
            SearchError::InvalidEndpoint {
                endpoint: Endpoint::Goal,
                point: Point::new(1, 1),
            },
            SearchError::Unreachable,
            SearchError::ResourceExhausted(Resource::NodePool),
        ];
        assert!(errors.iter().all(|e| e.code() <= 0));
        assert_ne!(errors[1].code(), errors[2].code());
    }

    #[test]
    fn display_names_the_resource() {
        let e = SearchError::ResourceExhausted(Resource::PathBuffer);
        assert_eq!(e.to_string(), "search ran out of path buffer");
    }
}
