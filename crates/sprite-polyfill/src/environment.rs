//! Environment detection
//!
//! Decides from the agent string and frame nesting whether the runtime can
//! render external `<use>` references natively.

use std::cell::OnceCell;
use std::sync::LazyLock;

use regex::Regex;

static LEGACY_IE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bTrident/[567]\b|\bMSIE (?:9|10)\.0\b").expect("valid regex"));
static LEGACY_EDGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bEdge/12\.(\d+)\b").expect("valid regex"));
static WEBKIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bAppleWebKit/(\d+)\b").expect("valid regex"));
static ANY_EDGE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bEdge/\d").expect("valid regex"));

/// First Edge 12 build that handles external references
const EDGE_FIXED_BUILD: u64 = 10547;
/// First WebKit version that handles external references
const WEBKIT_FIXED_VERSION: u64 = 537;

/// Ambient runtime description
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    /// Agent identification string
    pub user_agent: String,
    /// Whether the current context is nested inside another browsing context
    pub nested_in_frame: bool,
}

impl Environment {
    pub fn new(user_agent: impl Into<String>) -> Self {
        Self {
            user_agent: user_agent.into(),
            nested_in_frame: false,
        }
    }

    pub fn in_frame(mut self, nested: bool) -> Self {
        self.nested_in_frame = nested;
        self
    }
}

/// Whether the environment needs the polyfill
pub fn requires_polyfill(env: &Environment) -> bool {
    let ua = env.user_agent.as_str();

    LEGACY_IE.is_match(ua)
        || below(captured_version(&LEGACY_EDGE, ua), EDGE_FIXED_BUILD)
        || below(captured_version(&WEBKIT, ua), WEBKIT_FIXED_VERSION)
        || (ANY_EDGE.is_match(ua) && env.nested_in_frame)
}

fn captured_version(re: &Regex, ua: &str) -> Option<u64> {
    re.captures(ua)?.get(1)?.as_str().parse().ok()
}

/// An absent version is never below the threshold
fn below(version: Option<u64>, threshold: u64) -> bool {
    version.is_some_and(|v| v < threshold)
}

/// Memoizing detector; the runtime cannot change during a session
#[derive(Debug)]
pub struct EnvironmentDetector {
    environment: Environment,
    decision: OnceCell<bool>,
}

impl EnvironmentDetector {
    pub fn new(environment: Environment) -> Self {
        Self {
            environment,
            decision: OnceCell::new(),
        }
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    pub fn requires_polyfill(&self) -> bool {
        *self.decision.get_or_init(|| {
            let required = requires_polyfill(&self.environment);
            tracing::debug!("Polyfill required: {} ({})", required, self.environment.user_agent);
            required
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHROME: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
    const FIREFOX: &str = "Mozilla/5.0 (X11; Linux x86_64; rv:121.0) Gecko/20100101 Firefox/121.0";
    const IE10: &str = "Mozilla/5.0 (compatible; MSIE 10.0; Windows NT 6.2; Trident/6.0)";
    const IE11: &str = "Mozilla/5.0 (Windows NT 10.0; Trident/7.0; rv:11.0) like Gecko";
    const EDGE_OLD: &str = "Mozilla/5.0 (Windows NT 10.0) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/42.0.2311.135 Safari/537.36 Edge/12.10240";
    const EDGE_FIXED: &str = "Mozilla/5.0 (Windows NT 10.0) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/46.0.2486.0 Safari/537.36 Edge/13.10586";

    fn required(ua: &str) -> bool {
        requires_polyfill(&Environment::new(ua))
    }

    #[test]
    fn test_modern_browsers_native() {
        assert!(!required(CHROME));
        assert!(!required(FIREFOX));
        assert!(!required(""));
    }

    #[test]
    fn test_legacy_ie() {
        assert!(required(IE10));
        assert!(required(IE11));
        assert!(required("Mozilla/4.0 (compatible; MSIE 9.0; Windows NT 6.1)"));
        assert!(!required("Mozilla/4.0 (compatible; MSIE 8.0; Windows NT 6.1)"));
    }

    #[test]
    fn test_legacy_edge_build() {
        assert!(required(EDGE_OLD));
        assert!(!required("Mozilla/5.0 AppleWebKit/537.36 Edge/12.10547"));
    }

    #[test]
    fn test_webkit_threshold() {
        assert!(required("Mozilla/5.0 AppleWebKit/536 (KHTML, like Gecko) Safari/536"));
        assert!(!required("Mozilla/5.0 AppleWebKit/538 (KHTML, like Gecko) Safari/538"));
        assert!(!required("Mozilla/5.0 AppleWebKit/537 (KHTML, like Gecko)"));
    }

    #[test]
    fn test_edge_in_frame() {
        assert!(!required(EDGE_FIXED));
        assert!(requires_polyfill(&Environment::new(EDGE_FIXED).in_frame(true)));
        assert!(!requires_polyfill(&Environment::new(CHROME).in_frame(true)));
    }

    #[test]
    fn test_unparsable_version_not_required() {
        assert!(!required("AppleWebKit/99999999999999999999999"));
        assert!(!required("AppleWebKit/abc"));
    }

    #[test]
    fn test_detector_is_idempotent() {
        let detector = EnvironmentDetector::new(Environment::new(IE10));
        assert!(detector.requires_polyfill());
        assert!(detector.requires_polyfill());

        let detector = EnvironmentDetector::new(Environment::new(CHROME));
        assert_eq!(detector.requires_polyfill(), detector.requires_polyfill());
    }
}
