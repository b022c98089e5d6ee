/// Environment variable holding an explicit configuration file path.
pub const CONFIG_PATH_ENV: &str = "NIOS_RPZ_CONFIG_PATH";

/// Prefix of environment overrides, e.g. `NIOS_RPZ_NIOS__PASSWORD`.
pub const ENV_PREFIX: &str = "NIOS_RPZ";

/// Between the prefix and the first key.
pub const ENV_PREFIX_SEPARATOR: &str = "_";

/// Between nested keys.
pub const ENV_SEPARATOR: &str = "__";

/// Directory under the user's configuration directory.
pub const APP_DIR: &str = "nios-rpz";

/// State file name used when `[state] path` is not set. Relative to the
/// configuration file.
pub const DEFAULT_STATE_FILE: &str = "state.json";

/// Example configuration
pub const DEFAULT_CONFIG: &str = r#"
# Logging configuration
[log]
# Level can be "error", "warn", "info", "debug", or "trace"
level = "info"

# Reconcile interval in seconds, 0 applies once and exits
[update]
interval = 0

# Grid master connection
[nios]
host = "gridmaster.example.com"
username = "admin"
# Prefer setting NIOS_RPZ_NIOS__PASSWORD in the environment
password = ""
wapi_version = "2.13.7"
timeout_secs = 60
insecure_tls = false

# State file location (optional, defaults to state.json next to this file)
# [state]
# path = "/var/lib/nios-rpz/state.json"

# Managed records
# [[resource]]
# address = "block-bad-site"
# kind = "cname"
# fields = { name = "bad.example.com.rpz.local", canonical = "", rp_zone = "rpz.local" }
# extattrs = { site = "hq" }

# Adopt an existing object instead of creating it
# [[resource]]
# address = "legacy-redirect"
# kind = "a"
# import = "record:rpz:a/ZG5zLmJpbmRfYSQ:legacy.rpz.local/default"
# fields = { name = "legacy.rpz.local", ipv4addr = "10.1.1.1", rp_zone = "rpz.local" }
"#;
