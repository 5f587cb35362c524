//! Shared set of hostnames that bypass redirect-safety heuristics.

use arc_swap::ArcSwap;
use std::collections::HashSet;
use std::sync::Arc;

use super::classifier::{ClassificationResult, classify};

/// Hosts every registry starts with.
pub const DEFAULT_TRUSTED_DOMAINS: &[&str] = &["localhost", "127.0.0.1"];

/// Copy-on-write registry of trusted hostnames.
///
/// Readers take a lock-free [`Arc`] snapshot; writers clone the current set, modify
/// the clone and swap it in. A classification therefore always sees one consistent
/// version of the set, regardless of concurrent add/remove calls.
///
/// Hostnames are stored lowercase and compared case-insensitively.
pub struct TrustedDomainRegistry {
    domains: ArcSwap<HashSet<String>>,
}

impl TrustedDomainRegistry {
    /// Creates a registry seeded with [`DEFAULT_TRUSTED_DOMAINS`].
    pub fn new() -> Self {
        Self::with_domains(std::iter::empty::<String>())
    }

    /// Creates a registry seeded with the defaults plus `extra`.
    pub fn with_domains<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let domains: HashSet<String> = DEFAULT_TRUSTED_DOMAINS
            .iter()
            .map(|d| d.to_string())
            .chain(extra.into_iter().filter_map(|d| normalize(d.as_ref())))
            .collect();

        Self {
            domains: ArcSwap::from_pointee(domains),
        }
    }

    /// Adds a hostname. Returns `false` if it was already present or is blank.
    pub fn add(&self, domain: &str) -> bool {
        let Some(domain) = normalize(domain) else {
            return false;
        };

        let mut inserted = false;
        self.domains.rcu(|current| {
            let mut next = HashSet::clone(current);
            inserted = next.insert(domain.clone());
            next
        });
        inserted
    }

    /// Removes a hostname. Returns `false` if it was not present.
    pub fn remove(&self, domain: &str) -> bool {
        let Some(domain) = normalize(domain) else {
            return false;
        };

        let mut removed = false;
        self.domains.rcu(|current| {
            let mut next = HashSet::clone(current);
            removed = next.remove(&domain);
            next
        });
        removed
    }

    pub fn contains(&self, domain: &str) -> bool {
        normalize(domain).is_some_and(|d| self.domains.load().contains(&d))
    }

    /// Sorted list of trusted hostnames.
    pub fn list(&self) -> Vec<String> {
        let mut domains: Vec<String> = self.domains.load().iter().cloned().collect();
        domains.sort();
        domains
    }

    pub fn len(&self) -> usize {
        self.domains.load().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Point-in-time copy of the set, unaffected by later writes.
    pub fn snapshot(&self) -> Arc<HashSet<String>> {
        self.domains.load_full()
    }

    /// Classifies `url` against the current snapshot.
    pub fn classify(&self, url: &str) -> ClassificationResult {
        classify(url, &self.snapshot())
    }
}

impl Default for TrustedDomainRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn normalize(domain: &str) -> Option<String> {
    let domain = domain.trim().to_lowercase();
    (!domain.is_empty()).then_some(domain)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_seeded_with_defaults() {
        let registry = TrustedDomainRegistry::new();

        assert!(registry.contains("localhost"));
        assert!(registry.contains("127.0.0.1"));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_with_extra_domains() {
        let registry = TrustedDomainRegistry::with_domains(["Example.COM", " ", "docs.rs"]);

        assert!(registry.contains("example.com"));
        assert!(registry.contains("docs.rs"));
        assert_eq!(registry.len(), 4);
    }

    #[test]
    fn test_add_and_remove() {
        let registry = TrustedDomainRegistry::new();

        assert!(registry.add("Example.com"));
        assert!(!registry.add("example.com"));
        assert!(registry.contains("EXAMPLE.COM"));

        assert!(registry.remove("example.COM"));
        assert!(!registry.remove("example.com"));
        assert!(!registry.contains("example.com"));
    }

    #[test]
    fn test_add_blank_is_rejected() {
        let registry = TrustedDomainRegistry::new();
        assert!(!registry.add("   "));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_list_is_sorted() {
        let registry = TrustedDomainRegistry::new();
        registry.add("b.example");
        registry.add("a.example");

        assert_eq!(
            registry.list(),
            vec!["127.0.0.1", "a.example", "b.example", "localhost"]
        );
    }

    #[test]
    fn test_snapshot_is_isolated_from_later_writes() {
        let registry = TrustedDomainRegistry::new();
        let before = registry.snapshot();

        registry.add("example.com");

        assert!(!before.contains("example.com"));
        assert!(registry.snapshot().contains("example.com"));
    }

    #[test]
    fn test_classify_uses_current_domains() {
        let registry = TrustedDomainRegistry::new();
        assert!(!registry.classify("https://example.tk/login").is_trusted);

        registry.add("example.tk");
        let result = registry.classify("https://example.tk/login");
        assert!(result.is_trusted);
        assert!(result.warnings.is_empty());

        registry.remove("localhost");
        assert!(!registry.classify("http://localhost/").is_trusted);
    }

    #[test]
    fn test_concurrent_writers_do_not_lose_updates() {
        let registry = Arc::new(TrustedDomainRegistry::new());

        let handles: Vec<_> = (0..8)
            .map(|t| {
                let registry = Arc::clone(&registry);
                thread::spawn(move || {
                    for i in 0..50 {
                        registry.add(&format!("host-{t}-{i}.example"));
                        let _ = registry.classify("https://example.com/");
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(registry.len(), 2 + 8 * 50);
    }
}
