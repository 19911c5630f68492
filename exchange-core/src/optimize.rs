use std::fmt;

use crate::ModelError;

/// Token meaning "minimise elapsed cycles".
pub const TIME_TOKEN: &str = "time";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptimizeTarget {
    Time,
    Resource(String),
}

impl From<&str> for OptimizeTarget {
    fn from(token: &str) -> Self {
        if token == TIME_TOKEN {
            OptimizeTarget::Time
        } else {
            OptimizeTarget::Resource(token.to_owned())
        }
    }
}

impl fmt::Display for OptimizeTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptimizeTarget::Time => f.write_str(TIME_TOKEN),
            OptimizeTarget::Resource(name) => f.write_str(name),
        }
    }
}

/// Ordered optimisation hints. Carried alongside the economy; the greedy
/// scheduler does not rank launches by it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptimizeDirective {
    targets: Vec<OptimizeTarget>,
}

impl OptimizeDirective {
    pub fn new(targets: Vec<OptimizeTarget>) -> Result<Self, ModelError> {
        if targets.is_empty() {
            return Err(ModelError::EmptyOptimize);
        }
        Ok(Self { targets })
    }

    pub fn from_tokens<'a>(tokens: impl IntoIterator<Item = &'a str>) -> Result<Self, ModelError> {
        Self::new(tokens.into_iter().map(OptimizeTarget::from).collect())
    }

    pub fn targets(&self) -> &[OptimizeTarget] {
        &self.targets
    }

    pub fn minimizes_time(&self) -> bool {
        self.targets.contains(&OptimizeTarget::Time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_token_is_recognised() {
        let directive = OptimizeDirective::from_tokens(["time", "euro"]).unwrap();
        assert!(directive.minimizes_time());
        assert_eq!(
            directive.targets()[1],
            OptimizeTarget::Resource("euro".into())
        );
    }

    #[test]
    fn empty_directive_is_rejected() {
        assert_eq!(
            OptimizeDirective::from_tokens([]).unwrap_err(),
            ModelError::EmptyOptimize
        );
    }
}
