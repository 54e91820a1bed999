//! Typed operations over the Baruwa management API.
//!
//! Every method names its endpoint and passes path arguments in template
//! order; [`BaruwaClient::api_call`] does the rest. Calls are independent
//! round-trips, so one client can be shared freely between threads.

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::dispatcher::Dispatcher;
use crate::endpoints::{
    aliases, auth_servers, delivery_servers, domain_aliases, domains, fallback_servers,
    ldap_settings, organizations, radius_settings, relays, users, Endpoint, STATUS,
};
use crate::error::Result;
use crate::transport::{Transport, UreqTransport};

/// Client for the Baruwa management API.
///
/// Generic over its [`Transport`] so tests can swap the network out;
/// `BaruwaClient::new` uses [`UreqTransport`].
///
/// ```
/// use std::time::Duration;
/// use baruwa_core::{BaruwaClient, ClientConfig};
///
/// let config = ClientConfig::new("https://mail.example.com/", "token")
///     .with_timeout(Duration::from_secs(10));
/// let client = BaruwaClient::new(config);
/// assert_eq!(client.config().base_url(), "https://mail.example.com");
/// ```
#[derive(Debug, Clone)]
pub struct BaruwaClient<T: Transport = UreqTransport> {
    dispatcher: Dispatcher,
    transport: T,
}

impl BaruwaClient<UreqTransport> {
    pub fn new(config: ClientConfig) -> Self {
        let transport = UreqTransport::new(config.timeout());
        Self::with_transport(config, transport)
    }

    /// Build from `BARUWA_API_*` environment variables; see
    /// [`ClientConfig::from_env`].
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(ClientConfig::from_env()?))
    }
}

impl<T: Transport> BaruwaClient<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self {
            dispatcher: Dispatcher::new(config),
            transport,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        self.dispatcher.config()
    }

    /// Resolve `endpoint` with `args`, send `body` as JSON and return the
    /// parsed reply.
    ///
    /// # Errors
    /// `MalformedRequest` when `args` does not fit the template, `Transport`
    /// when no response arrived, `Api` for any status outside 200/201/204.
    pub fn api_call<B>(&self, endpoint: Endpoint, args: &[&str], body: Option<&B>) -> Result<Value>
    where
        B: Serialize + ?Sized,
    {
        let outcome = self
            .dispatcher
            .build_request(endpoint, args, body)
            .and_then(|request| {
                debug!(method = %request.method, path = %request.path, "dispatching request");
                self.transport.execute(&request)
            })
            .and_then(|response| {
                debug!(status = response.status, "received response");
                self.dispatcher.parse_response(response)
            });

        if let Err(err) = &outcome {
            warn!(
                method = %endpoint.method,
                template = endpoint.template,
                code = err.code(),
                "API call failed: {err}"
            );
        }
        outcome
    }

    fn call(&self, endpoint: Endpoint, args: &[&str]) -> Result<Value> {
        self.api_call::<Value>(endpoint, args, None)
    }

    fn call_with<B>(&self, endpoint: Endpoint, args: &[&str], data: &B) -> Result<Value>
    where
        B: Serialize + ?Sized,
    {
        self.api_call(endpoint, args, Some(data))
    }

    // users

    pub fn get_users(&self) -> Result<Value> {
        self.call(users::LIST, &[])
    }

    pub fn get_user(&self, userid: u64) -> Result<Value> {
        self.call(users::GET, &[&userid.to_string()])
    }

    pub fn create_user<B: Serialize + ?Sized>(&self, data: &B) -> Result<Value> {
        self.call_with(users::NEW, &[], data)
    }

    pub fn update_user<B: Serialize + ?Sized>(&self, data: &B) -> Result<Value> {
        self.call_with(users::UPDATE, &[], data)
    }

    pub fn delete_user(&self, userid: u64) -> Result<Value> {
        self.call(users::DELETE, &[&userid.to_string()])
    }

    pub fn set_user_passwd<B: Serialize + ?Sized>(&self, userid: u64, data: &B) -> Result<Value> {
        self.call_with(users::PASSWORD, &[&userid.to_string()], data)
    }

    // alias addresses

    pub fn get_aliases(&self, addressid: u64) -> Result<Value> {
        self.call(aliases::GET, &[&addressid.to_string()])
    }

    pub fn create_alias<B: Serialize + ?Sized>(&self, userid: u64, data: &B) -> Result<Value> {
        self.call_with(aliases::NEW, &[&userid.to_string()], data)
    }

    pub fn update_alias<B: Serialize + ?Sized>(&self, addressid: u64, data: &B) -> Result<Value> {
        self.call_with(aliases::UPDATE, &[&addressid.to_string()], data)
    }

    pub fn delete_alias<B: Serialize + ?Sized>(&self, addressid: u64, data: &B) -> Result<Value> {
        self.call_with(aliases::DELETE, &[&addressid.to_string()], data)
    }

    // domains

    pub fn get_domains(&self) -> Result<Value> {
        self.call(domains::LIST, &[])
    }

    pub fn get_domain(&self, domainid: u64) -> Result<Value> {
        self.call(domains::GET, &[&domainid.to_string()])
    }

    pub fn get_domain_by_name(&self, domainname: &str) -> Result<Value> {
        self.call(domains::GET_BY_NAME, &[domainname])
    }

    pub fn create_domain<B: Serialize + ?Sized>(&self, data: &B) -> Result<Value> {
        self.call_with(domains::NEW, &[], data)
    }

    pub fn update_domain<B: Serialize + ?Sized>(&self, domainid: u64, data: &B) -> Result<Value> {
        self.call_with(domains::UPDATE, &[&domainid.to_string()], data)
    }

    pub fn delete_domain(&self, domainid: u64) -> Result<Value> {
        self.call(domains::DELETE, &[&domainid.to_string()])
    }

    // domain aliases

    pub fn get_domainaliases(&self, domainid: u64) -> Result<Value> {
        self.call(domain_aliases::LIST, &[&domainid.to_string()])
    }

    pub fn get_domainalias(&self, domainid: u64, aliasid: u64) -> Result<Value> {
        self.call(
            domain_aliases::GET,
            &[&domainid.to_string(), &aliasid.to_string()],
        )
    }

    pub fn create_domainalias<B: Serialize + ?Sized>(
        &self,
        domainid: u64,
        data: &B,
    ) -> Result<Value> {
        self.call_with(domain_aliases::NEW, &[&domainid.to_string()], data)
    }

    pub fn update_domainalias<B: Serialize + ?Sized>(
        &self,
        domainid: u64,
        aliasid: u64,
        data: &B,
    ) -> Result<Value> {
        self.call_with(
            domain_aliases::UPDATE,
            &[&domainid.to_string(), &aliasid.to_string()],
            data,
        )
    }

    pub fn delete_domainalias<B: Serialize + ?Sized>(
        &self,
        domainid: u64,
        aliasid: u64,
        data: &B,
    ) -> Result<Value> {
        self.call_with(
            domain_aliases::DELETE,
            &[&domainid.to_string(), &aliasid.to_string()],
            data,
        )
    }

    // delivery servers

    pub fn get_deliveryservers(&self, domainid: u64) -> Result<Value> {
        self.call(delivery_servers::LIST, &[&domainid.to_string()])
    }

    pub fn get_deliveryserver(&self, domainid: u64, serverid: u64) -> Result<Value> {
        self.call(
            delivery_servers::GET,
            &[&domainid.to_string(), &serverid.to_string()],
        )
    }

    pub fn create_deliveryserver<B: Serialize + ?Sized>(
        &self,
        domainid: u64,
        data: &B,
    ) -> Result<Value> {
        self.call_with(delivery_servers::NEW, &[&domainid.to_string()], data)
    }

    pub fn update_deliveryserver<B: Serialize + ?Sized>(
        &self,
        domainid: u64,
        serverid: u64,
        data: &B,
    ) -> Result<Value> {
        self.call_with(
            delivery_servers::UPDATE,
            &[&domainid.to_string(), &serverid.to_string()],
            data,
        )
    }

    pub fn delete_deliveryserver<B: Serialize + ?Sized>(
        &self,
        domainid: u64,
        serverid: u64,
        data: &B,
    ) -> Result<Value> {
        self.call_with(
            delivery_servers::DELETE,
            &[&domainid.to_string(), &serverid.to_string()],
            data,
        )
    }

    // authentication servers

    pub fn get_authservers(&self, domainid: u64) -> Result<Value> {
        self.call(auth_servers::LIST, &[&domainid.to_string()])
    }

    pub fn get_authserver(&self, domainid: u64, serverid: u64) -> Result<Value> {
        self.call(
            auth_servers::GET,
            &[&domainid.to_string(), &serverid.to_string()],
        )
    }

    pub fn create_authserver<B: Serialize + ?Sized>(
        &self,
        domainid: u64,
        data: &B,
    ) -> Result<Value> {
        self.call_with(auth_servers::NEW, &[&domainid.to_string()], data)
    }

    pub fn update_authserver<B: Serialize + ?Sized>(
        &self,
        domainid: u64,
        serverid: u64,
        data: &B,
    ) -> Result<Value> {
        self.call_with(
            auth_servers::UPDATE,
            &[&domainid.to_string(), &serverid.to_string()],
            data,
        )
    }

    pub fn delete_authserver<B: Serialize + ?Sized>(
        &self,
        domainid: u64,
        serverid: u64,
        data: &B,
    ) -> Result<Value> {
        self.call_with(
            auth_servers::DELETE,
            &[&domainid.to_string(), &serverid.to_string()],
            data,
        )
    }

    // LDAP settings

    pub fn get_ldapsettings(&self, domainid: u64, serverid: u64, settingsid: u64) -> Result<Value> {
        self.call(
            ldap_settings::GET,
            &[
                &domainid.to_string(),
                &serverid.to_string(),
                &settingsid.to_string(),
            ],
        )
    }

    pub fn create_ldapsettings<B: Serialize + ?Sized>(
        &self,
        domainid: u64,
        serverid: u64,
        data: &B,
    ) -> Result<Value> {
        self.call_with(
            ldap_settings::NEW,
            &[&domainid.to_string(), &serverid.to_string()],
            data,
        )
    }

    pub fn update_ldapsettings<B: Serialize + ?Sized>(
        &self,
        domainid: u64,
        serverid: u64,
        settingsid: u64,
        data: &B,
    ) -> Result<Value> {
        self.call_with(
            ldap_settings::UPDATE,
            &[
                &domainid.to_string(),
                &serverid.to_string(),
                &settingsid.to_string(),
            ],
            data,
        )
    }

    pub fn delete_ldapsettings<B: Serialize + ?Sized>(
        &self,
        domainid: u64,
        serverid: u64,
        settingsid: u64,
        data: &B,
    ) -> Result<Value> {
        self.call_with(
            ldap_settings::DELETE,
            &[
                &domainid.to_string(),
                &serverid.to_string(),
                &settingsid.to_string(),
            ],
            data,
        )
    }

    // RADIUS settings

    pub fn get_radiussettings(
        &self,
        domainid: u64,
        serverid: u64,
        settingsid: u64,
    ) -> Result<Value> {
        self.call(
            radius_settings::GET,
            &[
                &domainid.to_string(),
                &serverid.to_string(),
                &settingsid.to_string(),
            ],
        )
    }

    pub fn create_radiussettings<B: Serialize + ?Sized>(
        &self,
        domainid: u64,
        serverid: u64,
        data: &B,
    ) -> Result<Value> {
        self.call_with(
            radius_settings::NEW,
            &[&domainid.to_string(), &serverid.to_string()],
            data,
        )
    }

    pub fn update_radiussettings<B: Serialize + ?Sized>(
        &self,
        domainid: u64,
        serverid: u64,
        settingsid: u64,
        data: &B,
    ) -> Result<Value> {
        self.call_with(
            radius_settings::UPDATE,
            &[
                &domainid.to_string(),
                &serverid.to_string(),
                &settingsid.to_string(),
            ],
            data,
        )
    }

    pub fn delete_radiussettings<B: Serialize + ?Sized>(
        &self,
        domainid: u64,
        serverid: u64,
        settingsid: u64,
        data: &B,
    ) -> Result<Value> {
        self.call_with(
            radius_settings::DELETE,
            &[
                &domainid.to_string(),
                &serverid.to_string(),
                &settingsid.to_string(),
            ],
            data,
        )
    }

    // organizations

    pub fn get_organizations(&self) -> Result<Value> {
        self.call(organizations::LIST, &[])
    }

    pub fn get_organization(&self, orgid: u64) -> Result<Value> {
        self.call(organizations::GET, &[&orgid.to_string()])
    }

    pub fn create_organization<B: Serialize + ?Sized>(&self, data: &B) -> Result<Value> {
        self.call_with(organizations::NEW, &[], data)
    }

    pub fn update_organization<B: Serialize + ?Sized>(
        &self,
        orgid: u64,
        data: &B,
    ) -> Result<Value> {
        self.call_with(organizations::UPDATE, &[&orgid.to_string()], data)
    }

    pub fn delete_organization(&self, orgid: u64) -> Result<Value> {
        self.call(organizations::DELETE, &[&orgid.to_string()])
    }

    // relay settings

    pub fn get_relay(&self, relayid: u64) -> Result<Value> {
        self.call(relays::GET, &[&relayid.to_string()])
    }

    pub fn create_relay<B: Serialize + ?Sized>(&self, orgid: u64, data: &B) -> Result<Value> {
        self.call_with(relays::NEW, &[&orgid.to_string()], data)
    }

    pub fn update_relay<B: Serialize + ?Sized>(&self, relayid: u64, data: &B) -> Result<Value> {
        self.call_with(relays::UPDATE, &[&relayid.to_string()], data)
    }

    pub fn delete_relay<B: Serialize + ?Sized>(&self, relayid: u64, data: &B) -> Result<Value> {
        self.call_with(relays::DELETE, &[&relayid.to_string()], data)
    }

    // fallback servers

    pub fn get_fallbackservers(&self, orgid: u64) -> Result<Value> {
        self.call(fallback_servers::LIST, &[&orgid.to_string()])
    }

    pub fn get_fallbackserver(&self, serverid: u64) -> Result<Value> {
        self.call(fallback_servers::GET, &[&serverid.to_string()])
    }

    pub fn create_fallbackserver<B: Serialize + ?Sized>(
        &self,
        orgid: u64,
        data: &B,
    ) -> Result<Value> {
        self.call_with(fallback_servers::NEW, &[&orgid.to_string()], data)
    }

    pub fn update_fallbackserver<B: Serialize + ?Sized>(
        &self,
        serverid: u64,
        data: &B,
    ) -> Result<Value> {
        self.call_with(fallback_servers::UPDATE, &[&serverid.to_string()], data)
    }

    pub fn delete_fallbackserver<B: Serialize + ?Sized>(
        &self,
        serverid: u64,
        data: &B,
    ) -> Result<Value> {
        self.call_with(fallback_servers::DELETE, &[&serverid.to_string()], data)
    }

    // system

    pub fn get_status(&self) -> Result<Value> {
        self.call(STATUS, &[])
    }
}
