//! Static catalog of the remote API's endpoints.
//!
//! Each [`Endpoint`] pairs an HTTP method with a path template. Templates name
//! their placeholders (`/users/{userid}`) for readability, but substitution is
//! strictly positional: the n-th argument fills the n-th placeholder.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::error::{ApiError, Result};
use crate::http::HttpMethod;

/// Version prefix prepended to every resolved path.
pub const API_PREFIX: &str = "/api/v1";

/// Everything outside RFC 3986 unreserved characters is escaped, so an
/// argument can never introduce a `/` or `?` into the path.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// One catalog entry: the verb and the path template below [`API_PREFIX`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    pub method: HttpMethod,
    pub template: &'static str,
}

impl Endpoint {
    pub const fn new(method: HttpMethod, template: &'static str) -> Self {
        Self { method, template }
    }

    const fn get(template: &'static str) -> Self {
        Self::new(HttpMethod::Get, template)
    }

    const fn post(template: &'static str) -> Self {
        Self::new(HttpMethod::Post, template)
    }

    const fn put(template: &'static str) -> Self {
        Self::new(HttpMethod::Put, template)
    }

    const fn delete(template: &'static str) -> Self {
        Self::new(HttpMethod::Delete, template)
    }

    pub fn placeholder_count(&self) -> usize {
        self.template.matches('{').count()
    }

    /// Substitute `args` into the template and prefix [`API_PREFIX`].
    ///
    /// Fails with [`ApiError::MalformedRequest`] when the argument count does
    /// not match the placeholder count or an argument is empty.
    pub fn resolve(&self, args: &[&str]) -> Result<String> {
        let expected = self.placeholder_count();
        if args.len() != expected {
            return Err(ApiError::MalformedRequest(format!(
                "{} {} expects {expected} path argument(s), got {}",
                self.method,
                self.template,
                args.len()
            )));
        }

        let mut path = String::with_capacity(API_PREFIX.len() + self.template.len());
        path.push_str(API_PREFIX);

        let mut rest = self.template;
        let mut args = args.iter();
        while let Some(start) = rest.find('{') {
            let end = rest[start..]
                .find('}')
                .map(|offset| start + offset)
                .ok_or_else(|| {
                    ApiError::MalformedRequest(format!(
                        "unterminated placeholder in {}",
                        self.template
                    ))
                })?;
            let name = &rest[start + 1..end];
            let arg = args.next().ok_or_else(|| {
                ApiError::MalformedRequest(format!("missing value for {{{name}}}"))
            })?;
            if arg.is_empty() {
                return Err(ApiError::MalformedRequest(format!(
                    "empty value for {{{name}}} in {}",
                    self.template
                )));
            }
            path.push_str(&rest[..start]);
            path.extend(utf8_percent_encode(arg, PATH_SEGMENT));
            rest = &rest[end + 1..];
        }
        path.push_str(rest);
        Ok(path)
    }
}

pub mod users {
    use super::Endpoint;

    pub const LIST: Endpoint = Endpoint::get("/users");
    pub const GET: Endpoint = Endpoint::get("/users/{userid}");
    pub const NEW: Endpoint = Endpoint::post("/users");
    pub const UPDATE: Endpoint = Endpoint::put("/users");
    pub const DELETE: Endpoint = Endpoint::delete("/users/{userid}");
    pub const PASSWORD: Endpoint = Endpoint::put("/users/{userid}/password");
}

pub mod aliases {
    use super::Endpoint;

    pub const GET: Endpoint = Endpoint::get("/aliasaddresses/{addressid}");
    pub const NEW: Endpoint = Endpoint::post("/aliasaddresses/{userid}");
    pub const UPDATE: Endpoint = Endpoint::put("/aliasaddresses/{addressid}");
    pub const DELETE: Endpoint = Endpoint::delete("/aliasaddresses/{addressid}");
}

pub mod domains {
    use super::Endpoint;

    pub const LIST: Endpoint = Endpoint::get("/domains");
    pub const GET: Endpoint = Endpoint::get("/domains/{domainid}");
    pub const GET_BY_NAME: Endpoint = Endpoint::get("/domains/byname/{domainname}");
    pub const NEW: Endpoint = Endpoint::post("/domains");
    pub const UPDATE: Endpoint = Endpoint::put("/domains/{domainid}");
    pub const DELETE: Endpoint = Endpoint::delete("/domains/{domainid}");
}

pub mod domain_aliases {
    use super::Endpoint;

    pub const LIST: Endpoint = Endpoint::get("/domainaliases/{domainid}");
    pub const GET: Endpoint = Endpoint::get("/domainaliases/{domainid}/{aliasid}");
    pub const NEW: Endpoint = Endpoint::post("/domainaliases/{domainid}");
    pub const UPDATE: Endpoint = Endpoint::put("/domainaliases/{domainid}/{aliasid}");
    pub const DELETE: Endpoint = Endpoint::delete("/domainaliases/{domainid}/{aliasid}");
}

pub mod delivery_servers {
    use super::Endpoint;

    pub const LIST: Endpoint = Endpoint::get("/deliveryservers/{domainid}");
    pub const GET: Endpoint = Endpoint::get("/deliveryservers/{domainid}/{serverid}");
    pub const NEW: Endpoint = Endpoint::post("/deliveryservers/{domainid}");
    pub const UPDATE: Endpoint = Endpoint::put("/deliveryservers/{domainid}/{serverid}");
    pub const DELETE: Endpoint = Endpoint::delete("/deliveryservers/{domainid}/{serverid}");
}

pub mod auth_servers {
    use super::Endpoint;

    pub const LIST: Endpoint = Endpoint::get("/authservers/{domainid}");
    pub const GET: Endpoint = Endpoint::get("/authservers/{domainid}/{serverid}");
    pub const NEW: Endpoint = Endpoint::post("/authservers/{domainid}");
    pub const UPDATE: Endpoint = Endpoint::put("/authservers/{domainid}/{serverid}");
    pub const DELETE: Endpoint = Endpoint::delete("/authservers/{domainid}/{serverid}");
}

pub mod ldap_settings {
    use super::Endpoint;

    pub const GET: Endpoint = Endpoint::get("/ldapsettings/{domainid}/{serverid}/{settingsid}");
    pub const NEW: Endpoint = Endpoint::post("/ldapsettings/{domainid}/{serverid}");
    pub const UPDATE: Endpoint =
        Endpoint::put("/ldapsettings/{domainid}/{serverid}/{settingsid}");
    pub const DELETE: Endpoint =
        Endpoint::delete("/ldapsettings/{domainid}/{serverid}/{settingsid}");
}

pub mod radius_settings {
    use super::Endpoint;

    pub const GET: Endpoint = Endpoint::get("/radiussettings/{domainid}/{serverid}/{settingsid}");
    pub const NEW: Endpoint = Endpoint::post("/radiussettings/{domainid}/{serverid}");
    pub const UPDATE: Endpoint =
        Endpoint::put("/radiussettings/{domainid}/{serverid}/{settingsid}");
    pub const DELETE: Endpoint =
        Endpoint::delete("/radiussettings/{domainid}/{serverid}/{settingsid}");
}

pub mod organizations {
    use super::Endpoint;

    pub const LIST: Endpoint = Endpoint::get("/organizations");
    pub const GET: Endpoint = Endpoint::get("/organizations/{orgid}");
    pub const NEW: Endpoint = Endpoint::post("/organizations");
    pub const UPDATE: Endpoint = Endpoint::put("/organizations/{orgid}");
    pub const DELETE: Endpoint = Endpoint::delete("/organizations/{orgid}");
}

pub mod relays {
    use super::Endpoint;

    pub const GET: Endpoint = Endpoint::get("/relays/{relayid}");
    pub const NEW: Endpoint = Endpoint::post("/relays/{orgid}");
    pub const UPDATE: Endpoint = Endpoint::put("/relays/{relayid}");
    pub const DELETE: Endpoint = Endpoint::delete("/relays/{relayid}");
}

pub mod fallback_servers {
    use super::Endpoint;

    pub const LIST: Endpoint = Endpoint::get("/fallbackservers/list/{orgid}");
    pub const GET: Endpoint = Endpoint::get("/fallbackservers/{serverid}");
    pub const NEW: Endpoint = Endpoint::post("/fallbackservers/{orgid}");
    pub const UPDATE: Endpoint = Endpoint::put("/fallbackservers/{serverid}");
    pub const DELETE: Endpoint = Endpoint::delete("/fallbackservers/{serverid}");
}

pub const STATUS: Endpoint = Endpoint::get("/status");

/// Every catalog entry by dotted name.
pub const ALL: &[(&str, Endpoint)] = &[
    ("users.list", users::LIST),
    ("users.get", users::GET),
    ("users.new", users::NEW),
    ("users.update", users::UPDATE),
    ("users.delete", users::DELETE),
    ("users.password", users::PASSWORD),
    ("aliases.get", aliases::GET),
    ("aliases.new", aliases::NEW),
    ("aliases.update", aliases::UPDATE),
    ("aliases.delete", aliases::DELETE),
    ("domains.list", domains::LIST),
    ("domains.get", domains::GET),
    ("domains.get_by_name", domains::GET_BY_NAME),
    ("domains.new", domains::NEW),
    ("domains.update", domains::UPDATE),
    ("domains.delete", domains::DELETE),
    ("domain_aliases.list", domain_aliases::LIST),
    ("domain_aliases.get", domain_aliases::GET),
    ("domain_aliases.new", domain_aliases::NEW),
    ("domain_aliases.update", domain_aliases::UPDATE),
    ("domain_aliases.delete", domain_aliases::DELETE),
    ("delivery_servers.list", delivery_servers::LIST),
    ("delivery_servers.get", delivery_servers::GET),
    ("delivery_servers.new", delivery_servers::NEW),
    ("delivery_servers.update", delivery_servers::UPDATE),
    ("delivery_servers.delete", delivery_servers::DELETE),
    ("auth_servers.list", auth_servers::LIST),
    ("auth_servers.get", auth_servers::GET),
    ("auth_servers.new", auth_servers::NEW),
    ("auth_servers.update", auth_servers::UPDATE),
    ("auth_servers.delete", auth_servers::DELETE),
    ("ldap_settings.get", ldap_settings::GET),
    ("ldap_settings.new", ldap_settings::NEW),
    ("ldap_settings.update", ldap_settings::UPDATE),
    ("ldap_settings.delete", ldap_settings::DELETE),
    ("radius_settings.get", radius_settings::GET),
    ("radius_settings.new", radius_settings::NEW),
    ("radius_settings.update", radius_settings::UPDATE),
    ("radius_settings.delete", radius_settings::DELETE),
    ("organizations.list", organizations::LIST),
    ("organizations.get", organizations::GET),
    ("organizations.new", organizations::NEW),
    ("organizations.update", organizations::UPDATE),
    ("organizations.delete", organizations::DELETE),
    ("relays.get", relays::GET),
    ("relays.new", relays::NEW),
    ("relays.update", relays::UPDATE),
    ("relays.delete", relays::DELETE),
    ("fallback_servers.list", fallback_servers::LIST),
    ("fallback_servers.get", fallback_servers::GET),
    ("fallback_servers.new", fallback_servers::NEW),
    ("fallback_servers.update", fallback_servers::UPDATE),
    ("fallback_servers.delete", fallback_servers::DELETE),
    ("status", STATUS),
];
