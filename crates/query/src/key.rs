//! Cache keys: a resource tag plus the parameters that vary the result.

use std::fmt;

use strum_macros::{Display, EnumString};

/// Resource tags; mutations invalidate cached reads by tag, coarsely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum Resource {
    Projects,
    Tasks,
    Teams,
    TeamMembers,
    Users,
    Activities,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    pub resource: Resource,
    pub params: Vec<String>,
}

impl QueryKey {
    /// A key with no parameters, e.g. the unscoped project list.
    pub fn of(resource: Resource) -> Self {
        Self {
            resource,
            params: Vec::new(),
        }
    }

    pub fn with<I, S>(resource: Resource, params: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            resource,
            params: params.into_iter().map(Into::into).collect(),
        }
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.resource)?;
        for param in &self.params {
            write!(f, ":{param}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scoped_and_unscoped_keys_differ() {
        let all = QueryKey::of(Resource::Tasks);
        let scoped = QueryKey::with(Resource::Tasks, ["p1"]);
        assert_ne!(all, scoped);
        assert_eq!(scoped.to_string(), "tasks:p1");
    }
}
