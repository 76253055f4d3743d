use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;

/// Represents the profiling API deployments the CLI can talk to.
#[derive(Clone, Default, PartialEq, Eq)]
pub enum Environment {
    /// Local development server.
    #[default]
    Local,
    /// A self-hosted deployment reachable at an arbitrary base URL.
    Custom { api_url: String },
}

impl Environment {
    /// Returns the API base URL associated with the environment.
    pub fn api_url(&self) -> String {
        match self {
            Environment::Local => "http://localhost:8000".to_string(),
            Environment::Custom { api_url } => api_url.clone(),
        }
    }

    /// Builds a custom environment from a base URL.
    pub fn from_url(url: &str) -> Self {
        Environment::Custom {
            api_url: url.trim_end_matches('/').to_string(),
        }
    }
}

impl FromStr for Environment {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "" | "local" => Ok(Environment::Local),
            lower if lower.starts_with("http://") || lower.starts_with("https://") => {
                // Keep the original casing in the URL itself.
                Ok(Environment::from_url(s))
            }
            _ => Err(()),
        }
    }
}

impl Display for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Local => write!(f, "Local"),
            Environment::Custom { .. } => write!(f, "Custom"),
        }
    }
}

impl Debug for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Environment::{}, URL: {}", self, self.api_url())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_local_and_custom_environments() {
        assert_eq!("local".parse::<Environment>().unwrap(), Environment::Local);
        assert_eq!("".parse::<Environment>().unwrap(), Environment::Local);
        assert_eq!(
            "https://profiles.example.com/"
                .parse::<Environment>()
                .unwrap(),
            Environment::Custom {
                api_url: "https://profiles.example.com".to_string()
            }
        );
        assert!("garbage".parse::<Environment>().is_err());
    }

    #[test]
    fn custom_url_is_returned_verbatim() {
        let env = Environment::from_url("https://profiles.example.com");
        assert_eq!(env.api_url(), "https://profiles.example.com");
    }
}
