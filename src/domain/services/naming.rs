//! Naming Service
//!
//! Deterministic names for gateway sub-resources. Every build step that
//! emits pools, policies or targets goes through these helpers, so a
//! reference built here matches the resource built elsewhere byte for byte.

/// Longest name the gateway accepts for a sub-resource.
pub const MAX_ALLOWED_LENGTH: usize = 80;

const POOL_PREFIX: &str = "pool-";
const LOAD_DISTRIBUTION_PREFIX: &str = "ldp-";

/// Cap a name at [`MAX_ALLOWED_LENGTH`].
///
/// Longer names keep their head and get `-<crc32 of the full name>`
/// appended, so two long names sharing a prefix stay distinct.
pub fn format_prop_name(name: &str) -> String {
    if name.chars().count() <= MAX_ALLOWED_LENGTH {
        return name.to_string();
    }

    let suffix = format!("-{:08x}", crc32fast::hash(name.as_bytes()));
    let keep = MAX_ALLOWED_LENGTH - suffix.len();
    let head: String = name.chars().take(keep).collect();

    format!("{}{}", head, suffix)
}

/// Name of the backend address pool for a service port / backend port pair.
///
/// `service_name` is already namespace-qualified (`<namespace>-<service>`).
pub fn address_pool_name(service_name: &str, service_port: &str, backend_port: u16) -> String {
    format_prop_name(&format!(
        "{}{}-{}-bp-{}",
        POOL_PREFIX, service_name, service_port, backend_port
    ))
}

/// Gateway-side name of the policy `name` in `namespace`.
pub fn load_distribution_name(namespace: &str, name: &str) -> String {
    format_prop_name(&format!("{}{}-{}", LOAD_DISTRIBUTION_PREFIX, namespace, name))
}

/// Name of the target declared at `index` in `policy_name`.
///
/// `index` is the position in the declared list, not in the filtered one.
pub fn load_distribution_target_name(policy_name: &str, index: usize) -> String {
    format!("{}-target-{}", policy_name, index)
}

#[cfg(test)]
mod tests {
    use super::*;

    // ===== format_prop_name Tests =====

    #[test]
    fn test_short_name_unchanged() {
        assert_eq!(format_prop_name("pool-ns-svc-80-bp-8080"), "pool-ns-svc-80-bp-8080");
    }

    #[test]
    fn test_name_at_limit_unchanged() {
        let name = "a".repeat(MAX_ALLOWED_LENGTH);
        assert_eq!(format_prop_name(&name), name);
    }

    #[test]
    fn test_long_name_capped() {
        let name = "a".repeat(MAX_ALLOWED_LENGTH + 20);
        let capped = format_prop_name(&name);

        assert_eq!(capped.len(), MAX_ALLOWED_LENGTH);
        assert!(capped.starts_with("aaaa"));
    }

    #[test]
    fn test_long_names_with_shared_prefix_stay_distinct() {
        let prefix = "x".repeat(MAX_ALLOWED_LENGTH);
        let a = format_prop_name(&format!("{}-one", prefix));
        let b = format_prop_name(&format!("{}-two", prefix));

        assert_ne!(a, b);
    }

    #[test]
    fn test_long_name_is_deterministic() {
        let name = "ldp-".to_string() + &"n".repeat(100);
        assert_eq!(format_prop_name(&name), format_prop_name(&name));
    }

    // ===== Resource Name Tests =====

    #[test]
    fn test_address_pool_name() {
        assert_eq!(address_pool_name("ns1-svcA", "80", 8080), "pool-ns1-svcA-80-bp-8080");
    }

    #[test]
    fn test_address_pool_name_with_named_port() {
        assert_eq!(address_pool_name("ns1-svcA", "http", 0), "pool-ns1-svcA-http-bp-0");
    }

    #[test]
    fn test_load_distribution_name() {
        assert_eq!(load_distribution_name("ns1", "ldp1"), "ldp-ns1-ldp1");
    }

    #[test]
    fn test_load_distribution_name_distinguishes_namespaces() {
        assert_ne!(
            load_distribution_name("ns1", "ldp1"),
            load_distribution_name("ns2", "ldp1")
        );
    }

    #[test]
    fn test_target_name_uses_index() {
        assert_eq!(load_distribution_target_name("ldp1", 0), "ldp1-target-0");
        assert_eq!(load_distribution_target_name("ldp1", 12), "ldp1-target-12");
    }
}
