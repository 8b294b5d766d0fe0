// Template renderer adapter

//! Template rendering
//!
//! Builds the [`TemplateContext`] handed to the template and wraps the engine
//! behind [`TemplateEngine`]. The shipped engine is minijinja, which speaks
//! Jinja2 and is run with strict undefined handling so that a misspelt
//! variable fails the render instead of silently producing an empty table.
//!
//! Context variables:
//!
//! | name | value |
//! |---|---|
//! | `ipv6_host_replace` | one `"<addr> <hostname> <short>\n"` line per IPv6 address |
//! | `ipv4_host_replace` | one `"<addr> <hostname> <short>\n"` line per IPv4 address |
//! | `hostname_variable` | full hostname |
//! | `hostname_variable_extra` | hostname up to the first `.` |

use crate::error::{Error, Result};
use crate::types::{HostIdentity, InterfaceAddresses};
use minijinja::{context, Environment, UndefinedBehavior};
use std::fs;
use std::path::Path;

/// IPv6 records variable
pub const IPV6_HOST_REPLACE: &str = "ipv6_host_replace";
/// IPv4 records variable
pub const IPV4_HOST_REPLACE: &str = "ipv4_host_replace";
/// Full hostname variable
pub const HOSTNAME_VARIABLE: &str = "hostname_variable";
/// Short hostname variable
pub const HOSTNAME_VARIABLE_EXTRA: &str = "hostname_variable_extra";

/// Variables made visible to the template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateContext {
    /// IPv6 hosts records
    pub ipv6_host_replace: String,
    /// IPv4 hosts records
    pub ipv4_host_replace: String,
    /// Full hostname
    pub hostname_variable: String,
    /// Short hostname
    pub hostname_variable_extra: String,
}

impl TemplateContext {
    /// Build the context for a set of addresses and a host identity
    ///
    /// Both families are always present; an empty family gives an empty string.
    pub fn new(addresses: &InterfaceAddresses, identity: &HostIdentity) -> Self {
        Self {
            ipv6_host_replace: host_records(&addresses.v6, identity),
            ipv4_host_replace: host_records(&addresses.v4, identity),
            hostname_variable: identity.hostname.clone(),
            hostname_variable_extra: identity.short_hostname.clone(),
        }
    }

    /// All variables as `(name, value)` pairs
    pub fn entries(&self) -> [(&'static str, &str); 4] {
        [
            (IPV6_HOST_REPLACE, &self.ipv6_host_replace),
            (IPV4_HOST_REPLACE, &self.ipv4_host_replace),
            (HOSTNAME_VARIABLE, &self.hostname_variable),
            (HOSTNAME_VARIABLE_EXTRA, &self.hostname_variable_extra),
        ]
    }
}

/// One newline-terminated hosts record per address
pub fn host_records(addresses: &[String], identity: &HostIdentity) -> String {
    addresses
        .iter()
        .map(|addr| {
            format!(
                "{} {} {}\n",
                addr, identity.hostname, identity.short_hostname
            )
        })
        .collect()
}

/// Pluggable template engine
pub trait TemplateEngine {
    /// Render `template` with the context variables visible to it
    fn render_str(&self, template: &str, ctx: &TemplateContext) -> Result<String>;
}

/// Jinja2 engine backed by minijinja
#[derive(Debug, Default)]
pub struct JinjaEngine;

impl TemplateEngine for JinjaEngine {
    fn render_str(&self, template: &str, ctx: &TemplateContext) -> Result<String> {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        for (name, value) in ctx.entries() {
            env.add_global(name, value.to_string());
        }

        env.render_str(template, context! {})
            .map_err(|e| Error::TemplateRender(e.to_string()))
    }
}

/// Read the template at `path` and render it
///
/// The file is read on every call so template edits apply on the next change.
pub fn render_template(
    engine: &dyn TemplateEngine,
    path: &Path,
    ctx: &TemplateContext,
) -> Result<String> {
    let template = fs::read_to_string(path).map_err(|source| Error::TemplateRead {
        path: path.to_path_buf(),
        source,
    })?;

    engine.render_str(&template, ctx)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity() -> HostIdentity {
        HostIdentity::from_hostname("web01.example.com")
    }

    #[test]
    fn test_host_records_format() {
        let addrs = vec!["10.0.0.5".to_string(), "10.0.0.6".to_string()];
        assert_eq!(
            host_records(&addrs, &identity()),
            "10.0.0.5 web01.example.com web01\n10.0.0.6 web01.example.com web01\n"
        );
    }

    #[test]
    fn test_context_has_all_keys_with_empty_family() {
        let addrs = InterfaceAddresses::new(["10.0.0.5"], []);
        let ctx = TemplateContext::new(&addrs, &identity());

        let names: Vec<&str> = ctx.entries().iter().map(|(name, _)| *name).collect();
        assert_eq!(
            names,
            vec![
                "ipv6_host_replace",
                "ipv4_host_replace",
                "hostname_variable",
                "hostname_variable_extra"
            ]
        );
        assert_eq!(ctx.ipv6_host_replace, "");
        assert_eq!(ctx.ipv4_host_replace, "10.0.0.5 web01.example.com web01\n");
        assert_eq!(ctx.hostname_variable, "web01.example.com");
        assert_eq!(ctx.hostname_variable_extra, "web01");
    }

    #[test]
    fn test_jinja_renders_all_variables() {
        let addrs = InterfaceAddresses::new(["10.0.0.5"], ["fd00::5"]);
        let ctx = TemplateContext::new(&addrs, &HostIdentity::from_hostname("host"));
        let template = "127.0.0.1 localhost\n{{ ipv4_host_replace }}{{ ipv6_host_replace }}# {{ hostname_variable }}/{{ hostname_variable_extra }}";

        let rendered = JinjaEngine.render_str(template, &ctx).unwrap();
        assert_eq!(
            rendered,
            "127.0.0.1 localhost\n10.0.0.5 host host\nfd00::5 host host\n# host/host"
        );
    }

    #[test]
    fn test_jinja_empty_family_renders_nothing() {
        let addrs = InterfaceAddresses::new(["10.0.0.5"], []);
        let ctx = TemplateContext::new(&addrs, &HostIdentity::from_hostname("host"));

        let rendered = JinjaEngine.render_str("[{{ipv6_host_replace}}]", &ctx).unwrap();
        assert_eq!(rendered, "[]");
    }

    #[test]
    fn test_jinja_undefined_variable_fails() {
        let ctx = TemplateContext::new(&InterfaceAddresses::default(), &identity());
        let err = JinjaEngine
            .render_str("{{ no_such_variable }}", &ctx)
            .unwrap_err();
        assert!(matches!(err, Error::TemplateRender(_)));
    }

    #[test]
    fn test_jinja_syntax_error_fails() {
        let ctx = TemplateContext::new(&InterfaceAddresses::default(), &identity());
        let err = JinjaEngine.render_str("{% if %}", &ctx).unwrap_err();
        assert!(matches!(err, Error::TemplateRender(_)));
    }

    #[test]
    fn test_render_template_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = TemplateContext::new(&InterfaceAddresses::default(), &identity());

        let err = render_template(&JinjaEngine, &dir.path().join("hosts.j2"), &ctx).unwrap_err();
        assert!(matches!(err, Error::TemplateRead { .. }));
    }

    #[test]
    fn test_render_template_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hosts.j2");
        std::fs::write(&path, "{{ipv4_host_replace}}").unwrap();

        let addrs = InterfaceAddresses::new(["10.0.0.5"], []);
        let ctx = TemplateContext::new(&addrs, &HostIdentity::from_hostname("host"));
        assert_eq!(
            render_template(&JinjaEngine, &path, &ctx).unwrap(),
            "10.0.0.5 host host\n"
        );
    }
}
