//! Resource path table.
//!
//! Maps the logical resource names accepted under `/bnet/{name}` to the
//! paths the BNet server actually serves. The table is total over the
//! enum, so every name a route can resolve has a backend path; unknown
//! names fail to parse and are rejected at the route boundary.

/// Logical resource exposed by the BNet server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Marking,
    Config,
    Transition,
    Token,
}

impl Resource {
    /// All resources, in route-name order.
    pub const ALL: [Resource; 4] = [
        Resource::Marking,
        Resource::Config,
        Resource::Transition,
        Resource::Token,
    ];

    /// Parse the name a client used in the request path.
    pub fn from_name(name: &str) -> Option<Resource> {
        match name {
            "marking" => Some(Resource::Marking),
            "config" => Some(Resource::Config),
            "transition" => Some(Resource::Transition),
            "token" => Some(Resource::Token),
            _ => None,
        }
    }

    /// Logical name, as it appears in the request path.
    pub fn name(&self) -> &'static str {
        match self {
            Resource::Marking => "marking",
            Resource::Config => "config",
            Resource::Transition => "transition",
            Resource::Token => "token",
        }
    }

    /// Path suffix the BNet server serves this resource under.
    pub fn backend_path(&self) -> &'static str {
        match self {
            Resource::Marking => "/get_marking",
            Resource::Config => "/get_config",
            Resource::Transition => "/trigger_manual_transition",
            Resource::Token => "/add_token",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_name_round_trips() {
        for resource in Resource::ALL {
            assert_eq!(Resource::from_name(resource.name()), Some(resource));
        }
    }

    #[test]
    fn test_backend_paths() {
        assert_eq!(Resource::Marking.backend_path(), "/get_marking");
        assert_eq!(Resource::Config.backend_path(), "/get_config");
        assert_eq!(
            Resource::Transition.backend_path(),
            "/trigger_manual_transition"
        );
        assert_eq!(Resource::Token.backend_path(), "/add_token");
    }

    #[test]
    fn test_unknown_name_rejected() {
        assert_eq!(Resource::from_name("markings"), None);
        assert_eq!(Resource::from_name(""), None);
        assert_eq!(Resource::from_name("MARKING"), None);
    }
}
